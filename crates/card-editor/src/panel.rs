//! Property-panel edits.
//!
//! `update_element` takes whatever it is given, so every numeric value a
//! panel produces is checked here first: non-finite numbers are rejected,
//! out-of-range numbers are clamped (and logged).

use card_core::{
    Animation, CanvasConfig, CardError, Color, EditLimits, Element, ElementKind, ElementPatch,
    Fill, Position, Range, Result, Size,
};

/// One field change from a property panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Width(f32),
    Height(f32),
    Radius(f32),
    FontSize(f32),
    Opacity(f32),
    GlowBlur(f32),
    Color(Color),
    Animation(Animation),
    Background(Fill),
    TextShadow(Option<String>),
    Filter(Option<String>),
    Transform(Option<String>),
    LetterSpacing(String),
    TextAlign(String),
    TextDecoration(String),
    /// Anything else, as a raw partial update.
    Patch(ElementPatch),
}

impl PropertyEdit {
    fn into_patch(self, el: &Element) -> ElementPatch {
        let (w, h) = el.size.extent();
        let mut patch = ElementPatch::default();
        match self {
            PropertyEdit::Width(v) => patch.size = Some(Size::boxed(v, h)),
            PropertyEdit::Height(v) => patch.size = Some(Size::boxed(w, v)),
            PropertyEdit::Radius(v) => patch.size = Some(Size::Radius { radius: v }),
            PropertyEdit::FontSize(v) => patch.font_size = Some(v),
            PropertyEdit::Opacity(v) => patch.opacity = Some(v),
            PropertyEdit::GlowBlur(v) => patch.glow_blur = Some(v),
            PropertyEdit::Color(c) => patch.color = Some(c),
            PropertyEdit::Animation(a) => patch.animation = Some(a),
            PropertyEdit::Background(f) => patch.background = Some(f),
            PropertyEdit::TextShadow(s) => patch.text_shadow = Some(s),
            PropertyEdit::Filter(s) => patch.filter = Some(s),
            PropertyEdit::Transform(s) => patch.transform = Some(s),
            PropertyEdit::LetterSpacing(s) => patch.letter_spacing = Some(s),
            PropertyEdit::TextAlign(s) => patch.text_align = Some(s),
            PropertyEdit::TextDecoration(s) => patch.text_decoration = Some(s),
            PropertyEdit::Patch(p) => patch = p,
        }
        patch
    }
}

fn finite(field: &'static str, v: f32) -> Result<f32> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CardError::InvalidInput {
            field,
            reason: format!("{v} is not a number"),
        })
    }
}

fn bounded(field: &'static str, v: f32, range: Range) -> Result<f32> {
    let v = finite(field, v)?;
    if !range.contains(v) {
        log::warn!("{field} {v} outside [{}, {}]; clamped", range.min, range.max);
    }
    Ok(range.clamp(v))
}

/// `range` with both ends capped at `max`.
fn capped(range: Range, max: f32) -> Range {
    Range::new(range.min.min(max), range.max.min(max))
}

/// Width and height ranges for a box-sized element, never larger than the card.
fn box_ranges(el: &Element, limits: &EditLimits, canvas: &CanvasConfig) -> (Range, Range) {
    let (rw, rh) = match &el.kind {
        ElementKind::Image { .. } => (limits.image_size, limits.image_size),
        ElementKind::Shape { shape, .. } => limits.shape_box(*shape),
        ElementKind::Text { .. } | ElementKind::ArtText { .. } => {
            let r = Range::new(canvas.min_element_size, canvas.max_element_size);
            (r, r)
        }
    };
    (capped(rw, canvas.width), capped(rh, canvas.height))
}

/// Check and clamp every numeric field of `patch` for `el`.
pub fn sanitize_patch(
    el: &Element,
    mut patch: ElementPatch,
    limits: &EditLimits,
    canvas: &CanvasConfig,
) -> Result<ElementPatch> {
    let radial = matches!(el.size, Size::Radius { .. });

    if let Some(size) = patch.size {
        patch.size = Some(match (size, radial) {
            (Size::Box { width, height }, false) => {
                let (rw, rh) = box_ranges(el, limits, canvas);
                Size::boxed(bounded("width", width, rw)?, bounded("height", height, rh)?)
            }
            (Size::Radius { radius }, true) => Size::Radius {
                radius: bounded(
                    "radius",
                    radius,
                    capped(limits.radius, canvas.width.min(canvas.height) / 2.0),
                )?,
            },
            (Size::Box { .. }, true) => {
                return Err(CardError::InvalidInput {
                    field: "size",
                    reason: "circles and stars are sized by radius".to_string(),
                });
            }
            (Size::Radius { .. }, false) => {
                return Err(CardError::InvalidInput {
                    field: "radius",
                    reason: format!("{} elements have no radius", el.tag()),
                });
            }
        });
    }

    // A new size can push the far edge off the card, so the origin is
    // re-clamped whenever either changes.
    if patch.position.is_some() || patch.size.is_some() {
        let pos = patch.position.unwrap_or(el.position);
        let (w, h) = patch.size.unwrap_or(el.size).extent();
        let x = finite("x", pos.x)?.clamp(0.0, (canvas.width - w).max(0.0));
        let y = finite("y", pos.y)?.clamp(0.0, (canvas.height - h).max(0.0));
        patch.position = Some(Position::new(x, y));
    }
    if let Some(v) = patch.font_size {
        patch.font_size = Some(bounded("fontSize", v, limits.font_size)?);
    }
    if let Some(v) = patch.opacity {
        patch.opacity = Some(bounded("opacity", v, limits.opacity)?);
    }
    if let Some(v) = patch.glow_blur {
        patch.glow_blur = Some(bounded("glowBlur", v, limits.glow_blur)?);
    }
    Ok(patch)
}

/// Turn a panel edit into a checked patch for `el`.
pub fn validate_edit(
    el: &Element,
    edit: PropertyEdit,
    limits: &EditLimits,
    canvas: &CanvasConfig,
) -> Result<ElementPatch> {
    let patch = edit.into_patch(el);
    sanitize_patch(el, patch, limits, canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::{ShapeKind, create_image, create_shape, create_text, ImageRef};
    use pretty_assertions::assert_eq;

    fn check(el: &Element, edit: PropertyEdit) -> Result<ElementPatch> {
        validate_edit(el, edit, &EditLimits::default(), &CanvasConfig::default())
    }

    #[test]
    fn width_clamped_per_kind() {
        let line = create_shape(ShapeKind::Line);
        let patch = check(&line, PropertyEdit::Width(900.0)).unwrap();
        assert_eq!(patch.size, Some(Size::boxed(500.0, 2.0)));

        let image = create_image(ImageRef::new("data:image/png;base64,AA"));
        let patch = check(&image, PropertyEdit::Height(10.0)).unwrap();
        assert_eq!(patch.size, Some(Size::boxed(200.0, 40.0)));
    }

    #[test]
    fn radius_only_for_radial() {
        let circle = create_shape(ShapeKind::Circle);
        let patch = check(&circle, PropertyEdit::Radius(500.0)).unwrap();
        assert_eq!(patch.size, Some(Size::Radius { radius: 200.0 }));

        assert!(check(&circle, PropertyEdit::Width(50.0)).is_err());
        assert!(check(&create_shape(ShapeKind::Heart), PropertyEdit::Radius(50.0)).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        let text = create_text();
        assert!(matches!(
            check(&text, PropertyEdit::FontSize(f32::NAN)),
            Err(CardError::InvalidInput { field: "fontSize", .. })
        ));
    }

    #[test]
    fn scalar_ranges() {
        let text = create_text();
        assert_eq!(check(&text, PropertyEdit::FontSize(4.0)).unwrap().font_size, Some(8.0));
        let rect = create_shape(ShapeKind::Rectangle);
        assert_eq!(check(&rect, PropertyEdit::Opacity(0.0)).unwrap().opacity, Some(0.1));
        assert_eq!(check(&text, PropertyEdit::GlowBlur(9.0)).unwrap().glow_blur, Some(3.0));
    }

    #[test]
    fn raw_patch_is_checked_too() {
        let rect = create_shape(ShapeKind::Rectangle);
        let patch = ElementPatch {
            size: Some(Size::boxed(1000.0, 5.0)),
            position: Some(Position::new(-5.0, 390.0)),
            ..ElementPatch::default()
        };
        let patch = check(&rect, PropertyEdit::Patch(patch)).unwrap();
        assert_eq!(patch.size, Some(Size::boxed(400.0, 20.0)));
        assert_eq!(patch.position, Some(Position::new(0.0, 380.0)));
    }

    #[test]
    fn size_edit_keeps_element_on_card() {
        let mut image = create_image(ImageRef::new("data:image/png;base64,AA"));
        assert_eq!(image.position, Position::new(150.0, 150.0));

        let patch = check(&image, PropertyEdit::Width(600.0)).unwrap();
        assert_eq!(patch.size, Some(Size::boxed(600.0, 150.0)));
        assert_eq!(patch.position, Some(Position::new(0.0, 150.0)));

        image.size = Size::boxed(600.0, 150.0);
        image.position = Position::new(0.0, 150.0);
        let patch = check(&image, PropertyEdit::Height(600.0)).unwrap();
        assert_eq!(patch.size, Some(Size::boxed(600.0, 400.0)));
        assert_eq!(patch.position, Some(Position::new(0.0, 0.0)));
    }

    #[test]
    fn radius_capped_at_half_card() {
        let circle = create_shape(ShapeKind::Circle);
        let canvas = CanvasConfig {
            height: 300.0,
            ..CanvasConfig::default()
        };
        let patch =
            validate_edit(&circle, PropertyEdit::Radius(200.0), &EditLimits::default(), &canvas)
                .unwrap();
        assert_eq!(patch.size, Some(Size::Radius { radius: 150.0 }));
    }
}
