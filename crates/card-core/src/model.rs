//! Card scene model.
//!
//! A `Scene` is a background plus a flat, ordered list of elements.
//! Paint order is list order: index 0 is painted first (bottom), the last
//! element is on top. There is no separate z-index.

use crate::css;
use crate::error::CardError;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors and fills ────────────────────────────────────────────────────

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    /// Glow fallback when an element has no usable color.
    pub const CYAN: Color = Color::rgb8(0, 255, 255);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);

        match bytes.len() {
            3 => Some(Self::rgb8(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba8(
                short(0)?,
                short(1)?,
                short(2)?,
                short(3)? as f32 / 255.0,
            )),
            6 => Some(Self::rgb8(
                css::hex_byte(bytes[0], bytes[1])?,
                css::hex_byte(bytes[2], bytes[3])?,
                css::hex_byte(bytes[4], bytes[5])?,
            )),
            8 => Some(Self::rgba8(
                css::hex_byte(bytes[0], bytes[1])?,
                css::hex_byte(bytes[2], bytes[3])?,
                css::hex_byte(bytes[4], bytes[5])?,
                css::hex_byte(bytes[6], bytes[7])? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Parse any color literal the editor accepts: hex, `rgb()` or `rgba()`.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        css::parse_color(s).ok_or_else(|| CardError::InvalidColor(s.to_string()))
    }

    /// `#RRGGBB`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS form: hex when opaque, `rgba()` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            self.to_hex()
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl TryFrom<String> for Color {
    type Error = CardError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_css()
    }
}

/// A background: solid color, transparent, or a raw CSS gradient expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Fill {
    Solid(Color),
    Transparent,
    Gradient(String),
}

impl Fill {
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            Ok(Fill::Transparent)
        } else if s.contains("gradient(") {
            Ok(Fill::Gradient(s.to_string()))
        } else {
            Color::parse(s).map(Fill::Solid)
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Fill::Gradient(_))
    }

    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Fill::Solid(c) => Some(*c),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Fill::Solid(c) => c.to_css(),
            Fill::Transparent => "transparent".to_string(),
            Fill::Gradient(g) => g.clone(),
        }
    }
}

impl TryFrom<String> for Fill {
    type Error = CardError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Fill::parse(&s)
    }
}

impl From<Fill> for String {
    fn from(f: Fill) -> Self {
        f.to_css()
    }
}

/// Glyph fill paired with a text-clipped background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextFill {
    Transparent,
    Solid(Color),
}

impl TextFill {
    pub fn color(&self) -> Option<Color> {
        match self {
            TextFill::Solid(c) => Some(*c),
            TextFill::Transparent => None,
        }
    }
}

impl TryFrom<String> for TextFill {
    type Error = CardError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().eq_ignore_ascii_case("transparent") {
            Ok(TextFill::Transparent)
        } else {
            Color::parse(&s).map(TextFill::Solid)
        }
    }
}

impl From<TextFill> for String {
    fn from(f: TextFill) -> Self {
        match f {
            TextFill::Transparent => "transparent".to_string(),
            TextFill::Solid(c) => c.to_css(),
        }
    }
}

/// Reference to binary image data: a data URL or an external handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Top-left anchor in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Explicit box, or a radius for circles and stars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    Box { width: f32, height: f32 },
    Radius { radius: f32 },
}

impl Size {
    pub const fn boxed(width: f32, height: f32) -> Self {
        Size::Box { width, height }
    }

    /// Bounding dimensions; a radius covers a `2r × 2r` box.
    pub fn extent(&self) -> (f32, f32) {
        match *self {
            Size::Box { width, height } => (width, height),
            Size::Radius { radius } => (radius * 2.0, radius * 2.0),
        }
    }
}

/// Axis-aligned bounding box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Star,
    Heart,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Arrow,
        ShapeKind::Star,
        ShapeKind::Heart,
        ShapeKind::Line,
    ];

    /// Circles and stars are sized by radius.
    pub fn is_radial(self) -> bool {
        matches!(self, ShapeKind::Circle | ShapeKind::Star)
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Arrow => "Arrow",
            ShapeKind::Star => "Star",
            ShapeKind::Heart => "Heart",
            ShapeKind::Line => "Line",
        }
    }
}

/// Named animation preset for art text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    None,
    Glow,
    Bounce,
    Pulse,
    Rainbow,
    Flicker,
}

/// Typography shared by plain text and art text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: Color,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// The visual-effects bundle carried by art text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextEffects {
    /// Fill painted behind the glyphs (clipped to them when `background_clip_text`).
    pub background: Option<Fill>,
    pub background_clip_text: bool,
    pub text_fill: Option<TextFill>,
    pub background_image: Option<ImageRef>,
    pub text_shadow: Option<String>,
    pub filter: Option<String>,
    pub transform: Option<String>,
    pub animation: Animation,
    /// Glow intensity multiplier; only read when `animation` is glow.
    pub glow_blur: Option<f32>,
    pub letter_spacing: Option<String>,
    pub text_decoration: Option<String>,
    pub text_align: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    Text {
        #[serde(flatten)]
        text: TextStyle,
    },
    ArtText {
        #[serde(flatten)]
        text: TextStyle,
        effects: Box<TextEffects>,
    },
    Image {
        source: ImageRef,
        #[serde(default = "opaque")]
        opacity: f32,
    },
    Shape {
        shape: ShapeKind,
        color: Color,
        #[serde(default = "opaque")]
        opacity: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

/// One positioned object on the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub position: Position,
    pub size: Size,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.size.extent();
        Bounds {
            x: self.position.x,
            y: self.position.y,
            width,
            height,
        }
    }

    /// Opacity for images and shapes; text is always opaque.
    pub fn opacity(&self) -> f32 {
        match &self.kind {
            ElementKind::Image { opacity, .. } | ElementKind::Shape { opacity, .. } => *opacity,
            ElementKind::Text { .. } | ElementKind::ArtText { .. } => 1.0,
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match &self.kind {
            ElementKind::Text { text } | ElementKind::ArtText { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn effects(&self) -> Option<&TextEffects> {
        match &self.kind {
            ElementKind::ArtText { effects, .. } => Some(effects),
            _ => None,
        }
    }

    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match &self.kind {
            ElementKind::Shape { shape, .. } => Some(*shape),
            _ => None,
        }
    }

    /// Variant tag as used in serialized form and generated ids.
    pub fn tag(&self) -> &'static str {
        match &self.kind {
            ElementKind::Text { .. } => "text",
            ElementKind::ArtText { .. } => "art-text",
            ElementKind::Image { .. } => "image",
            ElementKind::Shape { .. } => "shape",
        }
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// Id of the blank scene produced when a load misses.
pub const BLANK_SCENE_ID: &str = "blank-new";
/// Ids of persisted designs carry this prefix.
pub const SAVED_PREFIX: &str = "saved-";

/// The card: background plus ordered elements. Unit of undo and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub background: Fill,
    #[serde(default)]
    pub background_image: Option<ImageRef>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn blank() -> Self {
        Self {
            id: Some(BLANK_SCENE_ID.to_string()),
            name: "Blank Card".to_string(),
            background: Fill::Solid(Color::WHITE),
            background_image: None,
            elements: Vec::new(),
        }
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn get_by_id(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_forms() {
        assert_eq!(Color::from_hex("#0ff"), Some(Color::CYAN));
        assert_eq!(Color::from_hex("3B82F6").unwrap().to_hex(), "#3B82F6");
        let c = Color::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn fill_parse() {
        assert_eq!(Fill::parse("transparent").unwrap(), Fill::Transparent);
        assert_eq!(
            Fill::parse("#ffffff").unwrap(),
            Fill::Solid(Color::WHITE)
        );
        assert!(Fill::parse("linear-gradient(45deg, #FF6B6B, #4ECDC4)")
            .unwrap()
            .is_gradient());
        assert!(Fill::parse("papayawhip").is_err());
    }

    #[test]
    fn radius_extent() {
        assert_eq!(Size::Radius { radius: 50.0 }.extent(), (100.0, 100.0));
        assert_eq!(Size::boxed(150.0, 100.0).extent(), (150.0, 100.0));
    }

    #[test]
    fn element_json_shape() {
        let el = Element {
            id: ElementId::intern("shape-1"),
            position: Position::new(200.0, 150.0),
            size: Size::Radius { radius: 50.0 },
            kind: ElementKind::Shape {
                shape: ShapeKind::Circle,
                color: Color::from_hex("#EF4444").unwrap(),
                opacity: 1.0,
            },
        };
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "shape");
        assert_eq!(json["shape"], "circle");
        assert_eq!(json["color"], "#EF4444");
        assert_eq!(json["size"]["radius"], 50.0);

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn blank_scene() {
        let scene = Scene::blank();
        assert_eq!(scene.id.as_deref(), Some("blank-new"));
        assert_eq!(scene.name, "Blank Card");
        assert_eq!(scene.background.to_css(), "#FFFFFF");
        assert!(scene.is_empty());
    }
}
