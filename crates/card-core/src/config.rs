//! Editor configuration.
//!
//! Every field has a default, so a host only needs to send the knobs it
//! wants to change (e.g. `{"historyLimit": 50}`).

use crate::model::ShapeKind;
use serde::{Deserialize, Serialize};

/// Fixed canvas geometry and the geometry clamps applied during gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    pub min_element_size: f32,
    pub max_element_size: f32,
    /// Dragging stops this far from the right and bottom edges so a
    /// handle-sized part of the element stays grabbable.
    pub drag_margin: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            min_element_size: 20.0,
            max_element_size: 600.0,
            drag_margin: 50.0,
        }
    }
}

impl CanvasConfig {
    /// Repair a host-supplied canvas so every geometry clamp has a
    /// non-empty range: the element size range fits inside the card.
    pub fn normalized(self) -> Self {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        let min_element_size = self.min_element_size.max(1.0).min(width.min(height));
        Self {
            width,
            height,
            min_element_size,
            max_element_size: self.max_element_size.max(min_element_size),
            drag_margin: self.drag_margin.max(0.0),
        }
    }
}

/// What happens to a live drag/resize when the pointer is lost before release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelPolicy {
    /// Leave the live geometry in place without recording it.
    #[default]
    KeepLive,
    /// Record the live geometry as if the pointer had been released.
    CommitLive,
    /// Restore the geometry captured at gesture start.
    Rollback,
}

/// Inclusive numeric range for a property-panel field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Never panics: an inverted range resolves to `max`.
    pub fn clamp(&self, v: f32) -> f32 {
        v.max(self.min).min(self.max)
    }

    /// The same range with its ends in order.
    pub fn normalized(self) -> Self {
        if self.min > self.max {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Bounds enforced on direct property edits before they reach the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditLimits {
    pub font_size: Range,
    pub opacity: Range,
    pub glow_blur: Range,
    pub image_size: Range,
    /// Rectangle, triangle and heart.
    pub box_shape_size: Range,
    pub radius: Range,
    pub arrow_width: Range,
    pub arrow_height: Range,
    pub line_width: Range,
    pub line_height: Range,
}

impl Default for EditLimits {
    fn default() -> Self {
        Self {
            font_size: Range::new(8.0, 120.0),
            opacity: Range::new(0.1, 1.0),
            glow_blur: Range::new(0.5, 3.0),
            image_size: Range::new(40.0, 600.0),
            box_shape_size: Range::new(20.0, 400.0),
            radius: Range::new(10.0, 200.0),
            arrow_width: Range::new(40.0, 300.0),
            arrow_height: Range::new(20.0, 150.0),
            line_width: Range::new(20.0, 500.0),
            line_height: Range::new(1.0, 20.0),
        }
    }
}

impl EditLimits {
    pub fn normalized(self) -> Self {
        Self {
            font_size: self.font_size.normalized(),
            opacity: self.opacity.normalized(),
            glow_blur: self.glow_blur.normalized(),
            image_size: self.image_size.normalized(),
            box_shape_size: self.box_shape_size.normalized(),
            radius: self.radius.normalized(),
            arrow_width: self.arrow_width.normalized(),
            arrow_height: self.arrow_height.normalized(),
            line_width: self.line_width.normalized(),
            line_height: self.line_height.normalized(),
        }
    }

    /// Width and height ranges for a box-sized shape.
    pub fn shape_box(&self, kind: ShapeKind) -> (Range, Range) {
        match kind {
            ShapeKind::Arrow => (self.arrow_width, self.arrow_height),
            ShapeKind::Line => (self.line_width, self.line_height),
            ShapeKind::Circle | ShapeKind::Star => (self.radius, self.radius),
            ShapeKind::Rectangle | ShapeKind::Triangle | ShapeKind::Heart => {
                (self.box_shape_size, self.box_shape_size)
            }
        }
    }
}

/// Per-session editor configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub canvas: CanvasConfig,
    /// Maximum number of snapshots kept; `None` keeps everything.
    pub history_limit: Option<usize>,
    pub cancel_policy: CancelPolicy,
    pub limits: EditLimits,
}

impl EditorConfig {
    /// Config with every range usable. Host JSON can describe a canvas
    /// smaller than its minimum element size, or an inverted limit.
    pub fn normalized(self) -> Self {
        let fixed = Self {
            canvas: self.canvas.normalized(),
            limits: self.limits.normalized(),
            ..self.clone()
        };
        if fixed != self {
            log::warn!("editor config adjusted: {:?} -> {:?}", self.canvas, fixed.canvas);
        }
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_card_canvas() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.canvas.width, 600.0);
        assert_eq!(cfg.canvas.height, 400.0);
        assert_eq!(cfg.history_limit, None);
        assert_eq!(cfg.cancel_policy, CancelPolicy::KeepLive);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: EditorConfig =
            serde_json::from_str(r#"{"historyLimit": 5, "cancelPolicy": "rollback"}"#).unwrap();
        assert_eq!(cfg.history_limit, Some(5));
        assert_eq!(cfg.cancel_policy, CancelPolicy::Rollback);
        assert_eq!(cfg.canvas, CanvasConfig::default());
    }

    #[test]
    fn shape_ranges() {
        let limits = EditLimits::default();
        let (w, h) = limits.shape_box(ShapeKind::Line);
        assert_eq!((w.min, w.max, h.min, h.max), (20.0, 500.0, 1.0, 20.0));
        assert_eq!(limits.opacity.clamp(0.0), 0.1);
    }

    #[test]
    fn inverted_range_does_not_panic() {
        let r = Range::new(50.0, 40.0);
        assert_eq!(r.clamp(10.0), 40.0);
        assert_eq!(r.clamp(99.0), 40.0);
        assert_eq!(r.normalized(), Range::new(40.0, 50.0));
    }

    #[test]
    fn degenerate_canvas_normalized() {
        let cfg: EditorConfig =
            serde_json::from_str(r#"{"canvas":{"minElementSize":50,"height":40}}"#).unwrap();
        let cfg = cfg.normalized();
        assert_eq!(cfg.canvas.height, 40.0);
        assert_eq!(cfg.canvas.min_element_size, 40.0);
        assert!(cfg.canvas.max_element_size >= cfg.canvas.min_element_size);
        assert_eq!(EditorConfig::default().normalized(), EditorConfig::default());
    }
}
