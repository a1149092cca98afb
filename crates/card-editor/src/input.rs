//! Pointer events in canvas-local coordinates.

use serde::Deserialize;

/// A pointer event delivered to the interaction engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    /// Pointer capture lost before release.
    Cancel,
}

impl PointerEvent {
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                Some((x, y))
            }
            PointerEvent::Cancel => None,
        }
    }
}
