//! Hit testing: point → element body or resize handle.
//!
//! Handles of the selected element are checked first so they win over a
//! body drawn on top of them. Bodies are then walked in reverse paint
//! order (last painted = topmost).

use card_core::{Bounds, ElementId, Scene};
use smallvec::SmallVec;

/// Distance from a handle center that still counts as grabbing it.
pub const HANDLE_RADIUS: f32 = 8.0;

/// One of the eight resize handles on an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
    ];

    /// Handle moves the left edge.
    pub fn west(self) -> bool {
        matches!(self, Handle::Nw | Handle::W | Handle::Sw)
    }

    /// Handle moves the right edge.
    pub fn east(self) -> bool {
        matches!(self, Handle::Ne | Handle::E | Handle::Se)
    }

    /// Handle moves the top edge.
    pub fn north(self) -> bool {
        matches!(self, Handle::Nw | Handle::N | Handle::Ne)
    }

    /// Handle moves the bottom edge.
    pub fn south(self) -> bool {
        matches!(self, Handle::Sw | Handle::S | Handle::Se)
    }

    /// Center of this handle on the given box.
    pub fn anchor(self, b: &Bounds) -> (f32, f32) {
        let (cx, cy) = b.center();
        let x = if self.west() {
            b.x
        } else if self.east() {
            b.x + b.width
        } else {
            cx
        };
        let y = if self.north() {
            b.y
        } else if self.south() {
            b.y + b.height
        } else {
            cy
        };
        (x, y)
    }

    pub fn name(self) -> &'static str {
        match self {
            Handle::Nw => "nw",
            Handle::N => "n",
            Handle::Ne => "ne",
            Handle::E => "e",
            Handle::Se => "se",
            Handle::S => "s",
            Handle::Sw => "sw",
            Handle::W => "w",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }
}

/// Handle centers for a bounding box, in `Handle::ALL` order.
pub fn handle_points(b: &Bounds) -> SmallVec<[(Handle, f32, f32); 8]> {
    Handle::ALL
        .into_iter()
        .map(|h| {
            let (x, y) = h.anchor(b);
            (h, x, y)
        })
        .collect()
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitPart {
    Body { index: usize, id: ElementId },
    Handle { index: usize, id: ElementId, handle: Handle },
}

impl HitPart {
    pub fn index(&self) -> usize {
        match *self {
            HitPart::Body { index, .. } | HitPart::Handle { index, .. } => index,
        }
    }
}

/// Find what is under (px, py). Returns `None` on empty background.
pub fn hit_test(scene: &Scene, selected: Option<ElementId>, px: f32, py: f32) -> Option<HitPart> {
    if let Some(id) = selected
        && let Some(index) = scene.index_of(id)
    {
        let bounds = scene.elements[index].bounds();
        for (handle, hx, hy) in handle_points(&bounds) {
            let (dx, dy) = (px - hx, py - hy);
            if dx * dx + dy * dy <= HANDLE_RADIUS * HANDLE_RADIUS {
                return Some(HitPart::Handle { index, id, handle });
            }
        }
    }

    scene
        .elements
        .iter()
        .enumerate()
        .rev()
        .find(|(_, el)| el.bounds().contains(px, py))
        .map(|(index, el)| HitPart::Body { index, id: el.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::{Position, ShapeKind, add_element, create_shape};
    use pretty_assertions::assert_eq;

    fn overlapping() -> Scene {
        let mut a = create_shape(ShapeKind::Rectangle);
        a.position = Position::new(10.0, 10.0);
        let mut b = create_shape(ShapeKind::Rectangle);
        b.position = Position::new(60.0, 60.0);
        add_element(&add_element(&Scene::blank(), a), b)
    }

    #[test]
    fn topmost_body_wins() {
        let scene = overlapping();
        let hit = hit_test(&scene, None, 100.0, 100.0).unwrap();
        assert_eq!(hit, HitPart::Body { index: 1, id: scene.elements[1].id });

        let hit = hit_test(&scene, None, 20.0, 20.0).unwrap();
        assert_eq!(hit.index(), 0);
    }

    #[test]
    fn background_miss() {
        assert_eq!(hit_test(&overlapping(), None, 590.0, 390.0), None);
    }

    #[test]
    fn selected_handle_beats_body_on_top() {
        let scene = overlapping();
        let bottom = scene.elements[0].id;
        // se corner of the bottom rect sits inside the top rect
        let hit = hit_test(&scene, Some(bottom), 161.0, 111.0).unwrap();
        assert_eq!(
            hit,
            HitPart::Handle {
                index: 0,
                id: bottom,
                handle: Handle::Se
            }
        );
    }

    #[test]
    fn handle_anchors() {
        let b = Bounds {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
        };
        let pts = handle_points(&b);
        assert_eq!(pts.len(), 8);
        assert_eq!(Handle::N.anchor(&b), (50.0, 0.0));
        assert_eq!(Handle::Sw.anchor(&b), (0.0, 50.0));
        assert_eq!(Handle::E.anchor(&b), (100.0, 25.0));
        assert_eq!(Handle::from_name("ne"), Some(Handle::Ne));
        assert_eq!(Handle::from_name("x"), None);
    }
}
