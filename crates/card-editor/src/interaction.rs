//! Drag and resize state machine.
//!
//! ```text
//! Idle ──down on body──▶ Dragging ──move──▶ Dragging ──up──▶ Idle (commit)
//!  │                                                   └─cancel─▶ Idle
//!  └──down on handle──▶ Resizing ──move──▶ Resizing ──up──▶ Idle (commit)
//! ```
//!
//! Moves mutate the live scene directly; nothing reaches history until the
//! gesture ends, so a whole gesture is one undo step.

use card_core::{
    CancelPolicy, CanvasConfig, Element, ElementId, ElementPatch, Position, Result, Scene, Size,
};
use card_render::Handle;

/// Geometry captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartGeometry {
    pub position: Position,
    pub width: f32,
    pub height: f32,
    /// Sized by radius (circle, star).
    pub radial: bool,
}

impl StartGeometry {
    pub fn of(el: &Element) -> Self {
        let (width, height) = el.size.extent();
        Self {
            position: el.position,
            width,
            height,
            radial: matches!(el.size, Size::Radius { .. }),
        }
    }

    fn size(&self) -> Size {
        if self.radial {
            Size::Radius {
                radius: self.width / 2.0,
            }
        } else {
            Size::boxed(self.width, self.height)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        id: ElementId,
        /// Pointer minus element origin at pointer-down.
        offset: (f32, f32),
        start: StartGeometry,
    },
    Resizing {
        id: ElementId,
        handle: Handle,
        start: StartGeometry,
        start_pointer: (f32, f32),
    },
}

/// What the session should do once a gesture is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    /// No gesture was active.
    None,
    /// Record one history snapshot of the live scene.
    Commit,
    /// Leave the scene as it is without recording.
    Discard,
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// New origin for a drag, clamped so the element stays on the card and at
/// least `drag_margin` from the right/bottom edges.
pub fn drag_position(
    pointer: (f32, f32),
    offset: (f32, f32),
    extent: (f32, f32),
    canvas: &CanvasConfig,
) -> Position {
    let max_x = (canvas.width - canvas.drag_margin).min(canvas.width - extent.0).max(0.0);
    let max_y = (canvas.height - canvas.drag_margin).min(canvas.height - extent.1).max(0.0);
    Position::new(
        (pointer.0 - offset.0).clamp(0.0, max_x),
        (pointer.1 - offset.1).clamp(0.0, max_y),
    )
}

/// Geometry after dragging `handle` by `(dx, dy)` from `start`.
///
/// West/north handles move the origin by the same delta they shrink the
/// size, so the opposite edge stays put. Size is clamped to the configured
/// range (never larger than the card); when a west/north handle hits the
/// clamp the origin is compensated so the east/south edge still stays put.
/// Radial shapes collapse the box to `radius = round((w + h) / 4)`.
pub fn resize_geometry(
    start: &StartGeometry,
    handle: Handle,
    dx: f32,
    dy: f32,
    canvas: &CanvasConfig,
) -> (Position, Size) {
    let mut x = start.position.x;
    let mut y = start.position.y;
    let mut w = start.width;
    let mut h = start.height;

    if handle.west() {
        x += dx;
        w -= dx;
    } else if handle.east() {
        w += dx;
    }
    if handle.north() {
        y += dy;
        h -= dy;
    } else if handle.south() {
        h += dy;
    }

    let min = canvas.min_element_size;
    let max_w = canvas.max_element_size.min(canvas.width);
    let max_h = canvas.max_element_size.min(canvas.height);

    if w < min {
        if handle.west() {
            x -= min - w;
        }
        w = min;
    }
    if w > max_w {
        if handle.west() {
            x += w - max_w;
        }
        w = max_w;
    }
    if h < min {
        if handle.north() {
            y -= min - h;
        }
        h = min;
    }
    if h > max_h {
        if handle.north() {
            y += h - max_h;
        }
        h = max_h;
    }

    let size = if start.radial {
        let diameter = (((w + h) / 4.0).round() * 2.0).max(min).min(max_w.min(max_h));
        w = diameter;
        h = diameter;
        Size::Radius {
            radius: diameter / 2.0,
        }
    } else {
        Size::boxed(w, h)
    };

    let x = x.min(canvas.width - w).max(0.0);
    let y = y.min(canvas.height - h).max(0.0);
    (Position::new(x, y), size)
}

// ─── Engine ──────────────────────────────────────────────────────────────

pub struct Interaction {
    gesture: Gesture,
    canvas: CanvasConfig,
    cancel_policy: CancelPolicy,
}

impl Interaction {
    pub fn new(canvas: CanvasConfig, cancel_policy: CancelPolicy) -> Self {
        Self {
            gesture: Gesture::Idle,
            canvas,
            cancel_policy,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Element the active gesture operates on.
    pub fn target(&self) -> Option<ElementId> {
        target_of(&self.gesture)
    }

    /// Pointer-down on an element body.
    pub fn begin_drag(&mut self, el: &Element, px: f32, py: f32) {
        let offset = (px - el.position.x, py - el.position.y);
        log::debug!("drag start {} offset {offset:?}", el.id);
        self.gesture = Gesture::Dragging {
            id: el.id,
            offset,
            start: StartGeometry::of(el),
        };
    }

    /// Pointer-down on one of the element's resize handles.
    pub fn begin_resize(&mut self, el: &Element, handle: Handle, px: f32, py: f32) {
        log::debug!("resize start {} via {}", el.id, handle.name());
        self.gesture = Gesture::Resizing {
            id: el.id,
            handle,
            start: StartGeometry::of(el),
            start_pointer: (px, py),
        };
    }

    /// Apply the live geometry for a pointer move. Returns whether the
    /// scene changed.
    pub fn pointer_move(&mut self, scene: &mut Scene, px: f32, py: f32) -> Result<bool> {
        let (id, patch) = match &self.gesture {
            Gesture::Idle => return Ok(false),
            Gesture::Dragging { id, offset, start } => {
                let pos = drag_position((px, py), *offset, (start.width, start.height), &self.canvas);
                let patch = ElementPatch {
                    position: Some(pos),
                    ..ElementPatch::default()
                };
                (*id, patch)
            }
            Gesture::Resizing {
                id,
                handle,
                start,
                start_pointer,
            } => {
                let (dx, dy) = (px - start_pointer.0, py - start_pointer.1);
                let (pos, size) = resize_geometry(start, *handle, dx, dy, &self.canvas);
                (*id, ElementPatch::geometry(pos, size))
            }
        };

        let Some(index) = scene.index_of(id) else {
            log::warn!("gesture target {id} vanished; dropping gesture");
            self.gesture = Gesture::Idle;
            return Ok(false);
        };
        log::trace!("live {id}: {:?} {:?}", patch.position, patch.size);
        patch.apply(&mut scene.elements[index]);
        Ok(true)
    }

    /// Pointer released: the gesture ends with exactly one commit.
    pub fn pointer_up(&mut self) -> GestureEnd {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => GestureEnd::None,
            gesture => {
                log::debug!("gesture end {:?}", target_of(&gesture));
                GestureEnd::Commit
            }
        }
    }

    /// Pointer capture lost. Resolved by the configured cancel policy.
    pub fn cancel(&mut self, scene: &mut Scene) -> GestureEnd {
        let gesture = std::mem::take(&mut self.gesture);
        let (id, start) = match &gesture {
            Gesture::Idle => return GestureEnd::None,
            Gesture::Dragging { id, start, .. } | Gesture::Resizing { id, start, .. } => {
                (*id, *start)
            }
        };
        log::debug!("gesture cancelled on {id} ({:?})", self.cancel_policy);
        match self.cancel_policy {
            CancelPolicy::KeepLive => GestureEnd::Discard,
            CancelPolicy::CommitLive => GestureEnd::Commit,
            CancelPolicy::Rollback => {
                if let Some(index) = scene.index_of(id) {
                    ElementPatch::geometry(start.position, start.size())
                        .apply(&mut scene.elements[index]);
                }
                GestureEnd::Discard
            }
        }
    }

    /// Forget any active gesture (scene replaced by load/undo/redo).
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

fn target_of(gesture: &Gesture) -> Option<ElementId> {
    match gesture {
        Gesture::Idle => None,
        Gesture::Dragging { id, .. } | Gesture::Resizing { id, .. } => Some(*id),
    }
}
