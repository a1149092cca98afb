//! Element constructors and the pure scene mutation primitives.
//!
//! Nothing here clamps or validates geometry: gestures clamp in the
//! interaction engine, and property edits enforce their own bounds before
//! building an [`ElementPatch`].

use crate::error::{CardError, Result};
use crate::id::ElementId;
use crate::model::*;
use serde::{Deserialize, Deserializer, Serialize};

// ─── Constructors ────────────────────────────────────────────────────────

pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// A plain text element with the editor's default copy.
pub fn create_text() -> Element {
    Element {
        id: ElementId::generate("text"),
        position: Position::new(200.0, 200.0),
        size: Size::boxed(240.0, 36.0),
        kind: ElementKind::Text {
            text: TextStyle {
                content: "Double click to edit".to_string(),
                font_size: 24.0,
                font_family: DEFAULT_FONT_FAMILY.to_string(),
                color: Color::BLACK,
                bold: false,
                italic: false,
            },
        },
    }
}

/// Everything needed to create an art-text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtTextPreset {
    pub text: TextStyle,
    #[serde(default)]
    pub effects: TextEffects,
    /// Explicit box; derived from font size when absent.
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl Default for ArtTextPreset {
    fn default() -> Self {
        Self {
            text: TextStyle {
                content: "Art Text".to_string(),
                font_size: 36.0,
                font_family: DEFAULT_FONT_FAMILY.to_string(),
                color: Color::WHITE,
                bold: true,
                italic: false,
            },
            effects: TextEffects {
                background: Some(Fill::Gradient(
                    "linear-gradient(45deg, #FF6B6B, #4ECDC4)".to_string(),
                )),
                background_clip_text: true,
                text_fill: Some(TextFill::Transparent),
                text_shadow: Some("2px 2px 4px rgba(0,0,0,0.5)".to_string()),
                letter_spacing: Some("normal".to_string()),
                text_align: Some("center".to_string()),
                ..TextEffects::default()
            },
            size: None,
            position: None,
        }
    }
}

/// Art text with a freshly generated, never reused id.
pub fn create_art_text(preset: ArtTextPreset) -> Element {
    let fs = preset.text.font_size;
    let id = ElementId::generate("art-text");
    log::debug!("create art text {id} ({:?})", preset.effects.animation);
    Element {
        id,
        position: preset.position.unwrap_or(Position::new(200.0, 200.0)),
        size: preset.size.unwrap_or(Size::boxed(fs * 10.0, fs * 1.5)),
        kind: ElementKind::ArtText {
            text: preset.text,
            effects: Box::new(preset.effects),
        },
    }
}

pub fn create_image(source: ImageRef) -> Element {
    Element {
        id: ElementId::generate("image"),
        position: Position::new(150.0, 150.0),
        size: Size::boxed(200.0, 150.0),
        kind: ElementKind::Image {
            source,
            opacity: 1.0,
        },
    }
}

/// Default size and color for each preset shape.
pub fn shape_defaults(kind: ShapeKind) -> (Size, Color) {
    let (size, hex) = match kind {
        ShapeKind::Rectangle => (Size::boxed(150.0, 100.0), 0x3B82F6),
        ShapeKind::Circle => (Size::Radius { radius: 50.0 }, 0xEF4444),
        ShapeKind::Triangle => (Size::boxed(100.0, 100.0), 0x10B981),
        ShapeKind::Arrow => (Size::boxed(120.0, 40.0), 0xF59E0B),
        ShapeKind::Star => (Size::Radius { radius: 40.0 }, 0x8B5CF6),
        ShapeKind::Heart => (Size::boxed(80.0, 80.0), 0xEC4899),
        ShapeKind::Line => (Size::boxed(100.0, 2.0), 0x6B7280),
    };
    let color = Color::rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
    (size, color)
}

pub fn create_shape(kind: ShapeKind) -> Element {
    let (size, color) = shape_defaults(kind);
    Element {
        id: ElementId::generate("shape"),
        position: Position::new(200.0, 150.0),
        size,
        kind: ElementKind::Shape {
            shape: kind,
            color,
            opacity: 1.0,
        },
    }
}

// ─── Partial update ──────────────────────────────────────────────────────

/// Deserialize a present-but-null field as `Some(None)` (clear), keeping
/// an absent field as `None` (leave alone).
fn clearable<'de, D, T>(d: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

/// A shallow partial update. `None` fields are left untouched; fields that
/// don't apply to the target variant are ignored. The element id is not
/// patchable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub opacity: Option<f32>,
    /// Text color, or fill color for shapes.
    pub color: Option<Color>,
    pub content: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub source: Option<ImageRef>,

    pub background: Option<Fill>,
    pub background_clip_text: Option<bool>,
    pub text_fill: Option<TextFill>,
    #[serde(deserialize_with = "clearable")]
    pub background_image: Option<Option<ImageRef>>,
    #[serde(deserialize_with = "clearable")]
    pub text_shadow: Option<Option<String>>,
    #[serde(deserialize_with = "clearable")]
    pub filter: Option<Option<String>>,
    #[serde(deserialize_with = "clearable")]
    pub transform: Option<Option<String>>,
    pub animation: Option<Animation>,
    pub glow_blur: Option<f32>,
    pub letter_spacing: Option<String>,
    pub text_decoration: Option<String>,
    pub text_align: Option<String>,
}

fn set<T>(slot: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *slot = v.clone();
    }
}

fn set_some<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        self == &ElementPatch::default()
    }

    pub fn geometry(position: Position, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }

    /// Merge this patch into `el` in place.
    pub fn apply(&self, el: &mut Element) {
        set(&mut el.position, &self.position);
        set(&mut el.size, &self.size);

        match &mut el.kind {
            ElementKind::Text { text } => self.apply_text(text),
            ElementKind::ArtText { text, effects } => {
                self.apply_text(text);
                self.apply_effects(effects);
            }
            ElementKind::Image { source, opacity } => {
                set(source, &self.source);
                set(opacity, &self.opacity);
            }
            ElementKind::Shape { color, opacity, .. } => {
                set(color, &self.color);
                set(opacity, &self.opacity);
            }
        }
    }

    fn apply_text(&self, text: &mut TextStyle) {
        set(&mut text.content, &self.content);
        set(&mut text.font_size, &self.font_size);
        set(&mut text.font_family, &self.font_family);
        set(&mut text.color, &self.color);
        set(&mut text.bold, &self.bold);
        set(&mut text.italic, &self.italic);
    }

    fn apply_effects(&self, fx: &mut TextEffects) {
        set_some(&mut fx.background, &self.background);
        set(&mut fx.background_clip_text, &self.background_clip_text);
        set_some(&mut fx.text_fill, &self.text_fill);
        set(&mut fx.background_image, &self.background_image);
        set(&mut fx.text_shadow, &self.text_shadow);
        set(&mut fx.filter, &self.filter);
        set(&mut fx.transform, &self.transform);
        set(&mut fx.animation, &self.animation);
        set_some(&mut fx.glow_blur, &self.glow_blur);
        set_some(&mut fx.letter_spacing, &self.letter_spacing);
        set_some(&mut fx.text_decoration, &self.text_decoration);
        set_some(&mut fx.text_align, &self.text_align);
    }
}

// ─── Scene primitives ────────────────────────────────────────────────────

/// Append an element on top of the paint order.
pub fn add_element(scene: &Scene, element: Element) -> Scene {
    let mut next = scene.clone();
    next.elements.push(element);
    next
}

/// New scene with `elements[index]` shallow-merged with `patch`.
pub fn update_element(scene: &Scene, index: usize, patch: &ElementPatch) -> Result<Scene> {
    CardError::check_index(index, scene.len())?;
    let mut next = scene.clone();
    patch.apply(&mut next.elements[index]);
    Ok(next)
}

/// New scene without `elements[index]`; every higher index shifts down by one.
pub fn delete_element(scene: &Scene, index: usize) -> Result<Scene> {
    CardError::check_index(index, scene.len())?;
    let mut next = scene.clone();
    let removed = next.elements.remove(index);
    log::debug!("delete {} at {index}", removed.id);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three() -> Scene {
        let mut scene = Scene::blank();
        scene.elements = vec![
            create_text(),
            create_shape(ShapeKind::Rectangle),
            create_shape(ShapeKind::Circle),
        ];
        scene
    }

    #[test]
    fn shape_defaults_per_kind() {
        let circle = create_shape(ShapeKind::Circle);
        assert_eq!(circle.size, Size::Radius { radius: 50.0 });
        assert_eq!(circle.position, Position::new(200.0, 150.0));
        let ElementKind::Shape { color, opacity, .. } = circle.kind else {
            panic!("expected shape");
        };
        assert_eq!(color.to_hex(), "#EF4444");
        assert_eq!(opacity, 1.0);

        let line = create_shape(ShapeKind::Line);
        assert_eq!(line.size, Size::boxed(100.0, 2.0));
    }

    #[test]
    fn art_text_size_from_font() {
        let mut preset = ArtTextPreset::default();
        preset.text.font_size = 40.0;
        let el = create_art_text(preset);
        assert_eq!(el.size, Size::boxed(400.0, 60.0));
        assert!(el.id.as_str().starts_with("art-text-"));
    }

    #[test]
    fn update_is_shallow_and_pure() {
        let scene = three();
        let patch = ElementPatch {
            position: Some(Position::new(10.0, 20.0)),
            color: Some(Color::WHITE),
            ..ElementPatch::default()
        };
        let next = update_element(&scene, 1, &patch).unwrap();

        assert_eq!(next.elements[1].position, Position::new(10.0, 20.0));
        assert_eq!(next.elements[1].size, scene.elements[1].size);
        assert_eq!(next.elements[1].id, scene.elements[1].id);
        assert_eq!(scene.elements[1].position, Position::new(200.0, 150.0));
    }

    #[test]
    fn update_does_not_clamp() {
        let scene = three();
        let patch = ElementPatch {
            size: Some(Size::boxed(5000.0, 1.0)),
            ..ElementPatch::default()
        };
        let next = update_element(&scene, 1, &patch).unwrap();
        assert_eq!(next.elements[1].size, Size::boxed(5000.0, 1.0));
    }

    #[test]
    fn delete_shifts_higher_indices() {
        let scene = three();
        let last = scene.elements[2].id;
        let next = delete_element(&scene, 1).unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(next.elements[1].id, last);
    }

    #[test]
    fn stale_index_is_an_error() {
        let scene = three();
        assert_eq!(
            delete_element(&scene, 3),
            Err(CardError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(update_element(&scene, 7, &ElementPatch::default()).is_err());
    }

    #[test]
    fn patch_json_null_clears() {
        let patch: ElementPatch =
            serde_json::from_str(r#"{"textShadow": null, "fontSize": 30}"#).unwrap();
        assert_eq!(patch.text_shadow, Some(None));
        assert_eq!(patch.filter, None);
        assert_eq!(patch.font_size, Some(30.0));
    }
}
