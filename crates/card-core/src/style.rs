//! Style derivation: presentation data computed from element state.
//!
//! Everything here is a pure function of the element (or element list).
//! The renderer calls these on every scene change; the property panel
//! calls [`text_apply_patch`] when the user applies a text edit.

use crate::element::ElementPatch;
use crate::model::*;
use crate::recolor::{recolor_filter, recolor_shadow};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

// ─── Outline and shadow ──────────────────────────────────────────────────

/// Outline (stroke) and shadow for an element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlineAndShadow {
    /// Reserved slot; always `None` for now.
    pub stroke: Option<String>,
    pub shadow: Option<String>,
}

pub fn derive_outline_and_shadow(element: &Element) -> OutlineAndShadow {
    let shadow = element
        .effects()
        .and_then(|fx| fx.text_shadow.clone())
        .filter(|s| !s.trim().is_empty() && s.trim() != "none");
    OutlineAndShadow {
        stroke: None,
        shadow,
    }
}

// ─── Glow ────────────────────────────────────────────────────────────────

pub const DEFAULT_GLOW_BLUR: f32 = 1.0;

/// Keyframe name bound to an art-text element's id.
pub fn glow_keyframes_name(element: &Element) -> String {
    format!("glow-custom-{}", element.id)
}

/// Color the glow is painted in.
///
/// With a text-clipped fill the glyph fill color wins. A missing fill uses
/// the text color; a transparent fill glows cyan. Unclipped text glows in
/// its text color.
pub fn glow_color(element: &Element) -> Color {
    match &element.kind {
        ElementKind::ArtText { text, effects } if effects.background_clip_text => {
            match effects.text_fill {
                Some(fill) => fill.color().unwrap_or(Color::CYAN),
                None => text.color,
            }
        }
        ElementKind::ArtText { text, .. } | ElementKind::Text { text } => text.color,
        ElementKind::Image { .. } | ElementKind::Shape { .. } => Color::CYAN,
    }
}

fn px(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}px")
}

fn glow_shadow(radii: [f32; 3], blur: f32, color: &str) -> String {
    radii
        .iter()
        .map(|r| format!("0 0 {} {color}", px(r * blur)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `@keyframes` block per glowing art-text element, concatenated.
/// Empty when nothing glows.
pub fn derive_glow_keyframes(elements: &[Element]) -> String {
    let mut css = String::new();
    for el in elements {
        let Some(fx) = el.effects() else { continue };
        if fx.animation != Animation::Glow {
            continue;
        }
        let blur = fx.glow_blur.unwrap_or(DEFAULT_GLOW_BLUR);
        let color = glow_color(el).to_css();
        let _ = write!(
            css,
            "@keyframes {} {{\n  from {{ text-shadow: {}; }}\n  to {{ text-shadow: {}; }}\n}}\n",
            glow_keyframes_name(el),
            glow_shadow([3.0, 4.5, 6.0], blur, &color),
            glow_shadow([6.0, 9.0, 12.0], blur, &color),
        );
    }
    log::trace!("glow keyframes: {} bytes", css.len());
    css
}

/// CSS `animation` declaration for an art-text element.
pub fn animation_css(element: &Element) -> Option<String> {
    let fx = element.effects()?;
    match fx.animation {
        Animation::None => None,
        Animation::Glow => Some(format!(
            "{} 2s ease-in-out infinite alternate",
            glow_keyframes_name(element)
        )),
        Animation::Bounce => Some("bounce 1s infinite".to_string()),
        Animation::Pulse => Some("pulse 2s infinite".to_string()),
        Animation::Rainbow => Some("rainbow 3s linear infinite".to_string()),
        Animation::Flicker => Some("flicker 1.5s infinite".to_string()),
    }
}

// ─── Text presentation ───────────────────────────────────────────────────

/// Everything a paint target needs to draw a text or art-text element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedTextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    /// Glyph color; `None` means transparent glyphs over a clipped background.
    pub color: Option<Color>,
    pub background: Option<String>,
    pub background_image: Option<String>,
    pub clip_to_text: bool,
    pub outline: OutlineAndShadow,
    pub filter: Option<String>,
    pub transform: Option<String>,
    pub animation: Option<String>,
    pub letter_spacing: Option<String>,
    pub text_decoration: Option<String>,
    pub text_align: Option<String>,
}

pub fn derive_text_style(element: &Element) -> Option<DerivedTextStyle> {
    let text = element.text_style()?;
    let mut style = DerivedTextStyle {
        font_family: text.font_family.clone(),
        font_size: text.font_size,
        bold: text.bold,
        italic: text.italic,
        color: Some(text.color),
        outline: derive_outline_and_shadow(element),
        animation: animation_css(element),
        ..DerivedTextStyle::default()
    };
    if let Some(fx) = element.effects() {
        if fx.background_clip_text {
            style.color = match fx.text_fill {
                Some(TextFill::Transparent) => None,
                Some(TextFill::Solid(c)) => Some(c),
                None => Some(text.color),
            };
        }
        style.background = fx.background.as_ref().map(Fill::to_css);
        style.background_image = fx.background_image.as_ref().map(|i| i.as_str().to_string());
        style.clip_to_text = fx.background_clip_text;
        style.filter = fx.filter.clone();
        style.transform = fx.transform.clone();
        style.letter_spacing = fx.letter_spacing.clone();
        style.text_decoration = fx.text_decoration.clone();
        style.text_align = fx.text_align.clone();
    }
    Some(style)
}

/// The color the property panel shows for a selected text element.
pub fn display_color(element: &Element) -> Option<Color> {
    let text = element.text_style()?;
    let fill = element.effects().and_then(|fx| fx.text_fill).and_then(|f| f.color());
    Some(fill.unwrap_or(text.color))
}

// ─── Color consistency on text apply ─────────────────────────────────────

/// Values from the text panel's "apply" action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

/// Build the patch for a text apply, keeping shadow and filter colors in
/// step with the new text color.
///
/// Art text with a gradient clip keeps its gradient glyphs: the typed
/// color only becomes the fallback color and effects are left alone.
/// A solid or transparent clip gets the color pushed into the glyph fill.
pub fn text_apply_patch(element: &Element, input: &TextInput) -> ElementPatch {
    let mut patch = ElementPatch {
        content: Some(input.content.clone()),
        font_size: Some(input.font_size),
        font_family: Some(input.font_family.clone()),
        color: Some(input.color),
        bold: Some(input.bold),
        italic: Some(input.italic),
        ..ElementPatch::default()
    };

    let Some(fx) = element.effects() else {
        return patch;
    };

    let gradient_clip =
        fx.background_clip_text && fx.background.as_ref().is_some_and(Fill::is_gradient);
    if gradient_clip {
        patch.text_fill = Some(TextFill::Transparent);
        return patch;
    }

    if fx.background_clip_text {
        patch.text_fill = Some(TextFill::Solid(input.color));
    }
    if let Some(shadow) = &fx.text_shadow {
        patch.text_shadow = Some(Some(recolor_shadow(shadow, input.color)));
    }
    if let Some(filter) = &fx.filter {
        patch.filter = Some(Some(recolor_filter(filter, input.color)));
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ArtTextPreset, create_art_text, create_text};
    use pretty_assertions::assert_eq;

    fn glowing(blur: Option<f32>) -> Element {
        let mut preset = ArtTextPreset::default();
        preset.effects.animation = Animation::Glow;
        preset.effects.glow_blur = blur;
        create_art_text(preset)
    }

    fn solid_clip() -> Element {
        let mut preset = ArtTextPreset::default();
        preset.effects.background = Some(Fill::Solid(Color::BLACK));
        preset.effects.text_fill = Some(TextFill::Solid(Color::rgb8(0, 255, 0)));
        preset.effects.text_shadow = Some("0 0 3px rgba(0,255,0,0.8)".to_string());
        preset.effects.filter = Some("drop-shadow(0 0 2px #00FF00)".to_string());
        create_art_text(preset)
    }

    #[test]
    fn outline_is_reserved() {
        let el = create_art_text(ArtTextPreset::default());
        let out = derive_outline_and_shadow(&el);
        assert_eq!(out.stroke, None);
        assert_eq!(out.shadow.as_deref(), Some("2px 2px 4px rgba(0,0,0,0.5)"));
        assert_eq!(derive_outline_and_shadow(&create_text()), OutlineAndShadow::default());
    }

    #[test]
    fn no_glow_no_css() {
        let els = vec![create_text(), create_art_text(ArtTextPreset::default())];
        assert_eq!(derive_glow_keyframes(&els), "");
    }

    #[test]
    fn glow_block_radii() {
        let el = glowing(None);
        let css = derive_glow_keyframes(std::slice::from_ref(&el));
        let name = format!("@keyframes glow-custom-{} {{", el.id);
        assert!(css.starts_with(&name));
        assert_eq!(css.matches("@keyframes").count(), 1);
        assert!(css.contains("from { text-shadow: 0 0 3px #00FFFF, 0 0 4.5px #00FFFF, 0 0 6px #00FFFF; }"));
        assert!(css.contains("to { text-shadow: 0 0 6px #00FFFF, 0 0 9px #00FFFF, 0 0 12px #00FFFF; }"));
    }

    #[test]
    fn glow_blur_scales() {
        let css = derive_glow_keyframes(&[glowing(Some(2.0))]);
        assert!(css.contains("0 0 6px #00FFFF, 0 0 9px #00FFFF, 0 0 12px #00FFFF; }\n  to"));
        assert!(css.contains("0 0 12px #00FFFF, 0 0 18px #00FFFF, 0 0 24px #00FFFF"));
    }

    #[test]
    fn glow_per_element() {
        let a = glowing(None);
        let b = glowing(Some(0.5));
        let css = derive_glow_keyframes(&[a.clone(), create_text(), b.clone()]);
        assert_eq!(css.matches("@keyframes").count(), 2);
        assert!(css.contains(&glow_keyframes_name(&a)));
        assert!(css.contains(&glow_keyframes_name(&b)));
    }

    #[test]
    fn glow_color_resolution() {
        assert_eq!(glow_color(&glowing(None)), Color::CYAN);
        assert_eq!(glow_color(&solid_clip()), Color::rgb8(0, 255, 0));

        let mut preset = ArtTextPreset::default();
        preset.effects.text_fill = None;
        preset.text.color = Color::rgb8(200, 10, 10);
        assert_eq!(glow_color(&create_art_text(preset)), Color::rgb8(200, 10, 10));

        let mut preset = ArtTextPreset::default();
        preset.effects.background_clip_text = false;
        preset.text.color = Color::rgb8(1, 2, 3);
        assert_eq!(glow_color(&create_art_text(preset)), Color::rgb8(1, 2, 3));
    }

    #[test]
    fn animation_declarations() {
        let el = glowing(None);
        assert_eq!(
            animation_css(&el),
            Some(format!("glow-custom-{} 2s ease-in-out infinite alternate", el.id))
        );
        let mut preset = ArtTextPreset::default();
        preset.effects.animation = Animation::Flicker;
        assert_eq!(
            animation_css(&create_art_text(preset)).as_deref(),
            Some("flicker 1.5s infinite")
        );
        assert_eq!(animation_css(&create_text()), None);
    }

    fn input(color: Color) -> TextInput {
        TextInput {
            content: "Happy birthday".to_string(),
            font_size: 40.0,
            font_family: "custom-Lobster".to_string(),
            color,
            bold: true,
            italic: false,
        }
    }

    #[test]
    fn apply_gradient_clip_leaves_effects() {
        let el = create_art_text(ArtTextPreset::default());
        let patch = text_apply_patch(&el, &input(Color::rgb8(255, 0, 0)));
        assert_eq!(patch.text_fill, Some(TextFill::Transparent));
        assert_eq!(patch.color, Some(Color::rgb8(255, 0, 0)));
        assert_eq!(patch.text_shadow, None);
        assert_eq!(patch.filter, None);
    }

    #[test]
    fn apply_solid_clip_recolors() {
        let el = solid_clip();
        let red = Color::rgb8(255, 0, 0);
        let patch = text_apply_patch(&el, &input(red));
        assert_eq!(patch.text_fill, Some(TextFill::Solid(red)));
        assert_eq!(
            patch.text_shadow,
            Some(Some("0 0 3px rgba(255,0,0,0.8)".to_string()))
        );
        assert_eq!(
            patch.filter,
            Some(Some("drop-shadow(0 0 2px #FF0000)".to_string()))
        );
    }

    #[test]
    fn apply_plain_text() {
        let el = create_text();
        let patch = text_apply_patch(&el, &input(Color::WHITE));
        assert_eq!(patch.content.as_deref(), Some("Happy birthday"));
        assert_eq!(patch.text_fill, None);
        assert_eq!(patch.text_shadow, None);
    }

    #[test]
    fn display_color_prefers_fill() {
        assert_eq!(display_color(&solid_clip()), Some(Color::rgb8(0, 255, 0)));
        assert_eq!(
            display_color(&create_art_text(ArtTextPreset::default())),
            Some(Color::WHITE)
        );
    }
}
