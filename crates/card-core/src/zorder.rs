//! Z-order operations.
//!
//! Paint order is array order, so reordering is just moving an element
//! within `Scene::elements`. Each operation reports the element's new index
//! so a caller tracking selection by index can follow it. Moves that would
//! go past either end are no-ops and return `Ok(None)`.

use crate::error::{CardError, Result};
use crate::model::Scene;

/// Result of a successful reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct Reordered {
    pub scene: Scene,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZMove {
    ToFront,
    ToBack,
    Forward,
    Backward,
}

impl ZMove {
    /// Notification text shown after a successful move.
    pub fn message(self) -> &'static str {
        match self {
            ZMove::ToFront => "Element brought to front",
            ZMove::ToBack => "Element sent to back",
            ZMove::Forward => "Element brought forward",
            ZMove::Backward => "Element sent backward",
        }
    }
}

/// Where `index` ends up after `op` in a list of `len`, or `None` at a boundary.
fn target(op: ZMove, index: usize, len: usize) -> Option<usize> {
    let last = len - 1;
    match op {
        ZMove::ToFront | ZMove::Forward if index == last => None,
        ZMove::ToBack | ZMove::Backward if index == 0 => None,
        ZMove::ToFront => Some(last),
        ZMove::ToBack => Some(0),
        ZMove::Forward => Some(index + 1),
        ZMove::Backward => Some(index - 1),
    }
}

pub fn reorder(scene: &Scene, index: usize, op: ZMove) -> Result<Option<Reordered>> {
    CardError::check_index(index, scene.len())?;
    let Some(to) = target(op, index, scene.len()) else {
        log::trace!("z-order {op:?} at {index}: already at boundary");
        return Ok(None);
    };

    let mut next = scene.clone();
    match op {
        ZMove::Forward | ZMove::Backward => next.elements.swap(index, to),
        ZMove::ToFront | ZMove::ToBack => {
            let el = next.elements.remove(index);
            next.elements.insert(to, el);
        }
    }
    log::debug!("z-order {op:?}: {index} -> {to}");
    Ok(Some(Reordered {
        scene: next,
        index: to,
    }))
}

/// Move to the end of the list (topmost).
pub fn bring_to_front(scene: &Scene, index: usize) -> Result<Option<Reordered>> {
    reorder(scene, index, ZMove::ToFront)
}

/// Move to index 0 (bottom).
pub fn send_to_back(scene: &Scene, index: usize) -> Result<Option<Reordered>> {
    reorder(scene, index, ZMove::ToBack)
}

/// Swap with the next element up.
pub fn bring_forward(scene: &Scene, index: usize) -> Result<Option<Reordered>> {
    reorder(scene, index, ZMove::Forward)
}

/// Swap with the next element down.
pub fn send_backward(scene: &Scene, index: usize) -> Result<Option<Reordered>> {
    reorder(scene, index, ZMove::Backward)
}
