//! Template lookup boundary and the scene-source routing used on load.

use card_core::element::DEFAULT_FONT_FAMILY;
use card_core::model::SAVED_PREFIX;
use card_core::{Animation, ArtTextPreset, Color, Fill, Scene, TextEffects, TextFill, TextStyle};
use std::collections::BTreeMap;

/// Where a session's initial scene comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneSource {
    Blank,
    Template(String),
    /// A persisted design, by store id.
    Saved(String),
}

impl SceneSource {
    /// Route an editor id: `saved-<id>` loads a persisted design, any other
    /// non-empty id a template, and nothing a blank card.
    pub fn from_route(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            None | Some("") => SceneSource::Blank,
            Some(id) => match id.strip_prefix(SAVED_PREFIX) {
                Some(saved) => SceneSource::Saved(saved.to_string()),
                None => SceneSource::Template(id.to_string()),
            },
        }
    }
}

/// Read-only catalog of preset designs.
pub trait TemplateSource {
    fn lookup(&self, id: &str) -> Option<Scene>;

    /// Named art-text style presets offered in the sidebar.
    fn art_text_preset(&self, _id: &str) -> Option<ArtTextPreset> {
        None
    }
}

/// In-memory template catalog.
#[derive(Debug, Default, Clone)]
pub struct TemplateCatalog {
    scenes: BTreeMap<String, Scene>,
    art_text: BTreeMap<String, ArtTextPreset>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in art-text presets.
    pub fn with_builtin_art_text() -> Self {
        let mut catalog = Self::new();
        for (id, preset) in builtin_art_text() {
            catalog.art_text.insert(id.to_string(), preset);
        }
        catalog
    }

    pub fn insert(&mut self, id: impl Into<String>, scene: Scene) {
        let id = id.into();
        let mut scene = scene;
        scene.id = Some(id.clone());
        self.scenes.insert(id, scene);
    }

    pub fn insert_art_text(&mut self, id: impl Into<String>, preset: ArtTextPreset) {
        self.art_text.insert(id.into(), preset);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }
}

impl TemplateSource for TemplateCatalog {
    fn lookup(&self, id: &str) -> Option<Scene> {
        self.scenes.get(id).cloned()
    }

    fn art_text_preset(&self, id: &str) -> Option<ArtTextPreset> {
        self.art_text.get(id).cloned()
    }
}

fn preset(content: &str, font_size: f32, family: &str, color: Color, effects: TextEffects) -> ArtTextPreset {
    ArtTextPreset {
        text: TextStyle {
            content: content.to_string(),
            font_size,
            font_family: family.to_string(),
            color,
            bold: true,
            italic: false,
        },
        effects,
        size: None,
        position: None,
    }
}

/// Solid text-clipped fill in `color`, centered.
fn clipped(color: Color) -> TextEffects {
    TextEffects {
        background: Some(Fill::Solid(color)),
        background_clip_text: true,
        text_fill: Some(TextFill::Solid(color)),
        letter_spacing: Some("normal".to_string()),
        text_align: Some("center".to_string()),
        ..TextEffects::default()
    }
}

fn css(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn builtin_art_text() -> Vec<(&'static str, ArtTextPreset)> {
    let coral = Color::rgb8(0xFF, 0x6B, 0x6B);
    let silver = Color::rgb8(0xCC, 0xCC, 0xCC);
    let flame = Color::rgb8(0xFF, 0x45, 0x00);
    let red = Color::rgb8(0xFF, 0x00, 0x00);
    let tan = Color::rgb8(0xDE, 0xB8, 0x87);
    vec![
        (
            "gradient-basic",
            preset(
                "Art Text",
                36.0,
                DEFAULT_FONT_FAMILY,
                coral,
                TextEffects {
                    text_shadow: css("1px 1px 2px rgba(0,0,0,0.3)"),
                    ..clipped(coral)
                },
            ),
        ),
        (
            "neon-glow",
            preset(
                "Neon Art Text",
                40.0,
                DEFAULT_FONT_FAMILY,
                Color::CYAN,
                TextEffects {
                    background: Some(Fill::Transparent),
                    text_shadow: css("0 0 2px #00FFFF, 0 0 4px #00FFFF"),
                    filter: css("drop-shadow(0 0 6px #00FFFF)"),
                    animation: Animation::Glow,
                    glow_blur: Some(0.8),
                    letter_spacing: css("2px"),
                    ..clipped(Color::CYAN)
                },
            ),
        ),
        (
            "metal-shine",
            preset(
                "Metal Art Text",
                38.0,
                DEFAULT_FONT_FAMILY,
                silver,
                TextEffects {
                    text_shadow: css("1px 1px 1px rgba(0,0,0,0.6)"),
                    filter: css("drop-shadow(2px 2px 4px rgba(0,0,0,0.3))"),
                    letter_spacing: css("1px"),
                    ..clipped(silver)
                },
            ),
        ),
        (
            "fire-effect",
            preset(
                "Fire Art Text",
                42.0,
                DEFAULT_FONT_FAMILY,
                flame,
                TextEffects {
                    text_shadow: css("0 0 2px #FF4500, 0 0 4px #FF4500"),
                    filter: css("drop-shadow(0 0 8px #FF4500)"),
                    animation: Animation::Flicker,
                    ..clipped(flame)
                },
            ),
        ),
        (
            "rainbow-text",
            preset(
                "Rainbow Art Text",
                36.0,
                DEFAULT_FONT_FAMILY,
                red,
                TextEffects {
                    animation: Animation::Rainbow,
                    letter_spacing: css("2px"),
                    ..clipped(red)
                },
            ),
        ),
        (
            "vintage-retro",
            preset(
                "Vintage Art Text",
                34.0,
                "Georgia",
                tan,
                TextEffects {
                    text_shadow: css("1px 1px 2px rgba(139,69,19,0.4)"),
                    transform: css("rotate(-2deg)"),
                    filter: css("sepia(20%)"),
                    letter_spacing: css("1px"),
                    ..clipped(tan)
                },
            ),
        ),
        (
            "crystal-glass",
            preset(
                "Crystal Art Text",
                40.0,
                DEFAULT_FONT_FAMILY,
                Color::WHITE,
                TextEffects {
                    text_shadow: css("0 0 3px rgba(255,255,255,0.8), 0 0 6px rgba(255,255,255,0.6)"),
                    filter: css("blur(0.2px) brightness(1.1)"),
                    letter_spacing: css("3px"),
                    ..clipped(Color::WHITE)
                },
            ),
        ),
        (
            "comic-style",
            preset(
                "Comic Art Text",
                44.0,
                "Impact",
                Color::WHITE,
                TextEffects {
                    background: Some(Fill::Solid(red)),
                    animation: Animation::Bounce,
                    ..clipped(Color::WHITE)
                },
            ),
        ),
    ]
}
