pub mod config;
mod css;
pub mod element;
pub mod error;
pub mod id;
pub mod model;
pub mod recolor;
pub mod style;
pub mod zorder;

pub use config::{CancelPolicy, CanvasConfig, EditLimits, EditorConfig, Range};
pub use element::{
    ArtTextPreset, ElementPatch, add_element, create_art_text, create_image, create_shape,
    create_text, delete_element, update_element,
};
pub use error::{AssetError, CardError, Result};
pub use id::ElementId;
pub use model::*;
pub use recolor::{recolor_filter, recolor_shadow, recolor_shadow_hex};
pub use style::{TextInput, derive_glow_keyframes, derive_outline_and_shadow, text_apply_patch};
pub use zorder::{Reordered, ZMove, bring_forward, bring_to_front, send_backward, send_to_back};
