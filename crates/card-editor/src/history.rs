//! Linear undo/redo history of whole-scene snapshots.
//!
//! The history owns no live state: every stored scene is a deep copy, and
//! undo/redo hand back fresh copies. The live scene is replaced wholesale,
//! never patched from a snapshot.

use card_core::Scene;

pub struct History {
    snapshots: Vec<Scene>,
    index: usize,
    /// Maximum number of snapshots kept; oldest are dropped first.
    limit: Option<usize>,
}

impl History {
    /// Seed with the freshly loaded scene, so nothing is undoable yet.
    pub fn new(initial: &Scene, limit: Option<usize>) -> Self {
        Self {
            snapshots: vec![initial.clone()],
            index: 0,
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Drop everything and start again from `initial`.
    pub fn reset(&mut self, initial: &Scene) {
        self.snapshots.clear();
        self.snapshots.push(initial.clone());
        self.index = 0;
    }

    /// Record `scene` after the current position, discarding any redo states.
    pub fn record(&mut self, scene: &Scene) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(scene.clone());
        self.index = self.snapshots.len() - 1;

        if let Some(limit) = self.limit
            && self.snapshots.len() > limit
        {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.index -= excess;
        }
        log::debug!("history: recorded #{} of {}", self.index, self.snapshots.len());
    }

    pub fn undo(&mut self) -> Option<Scene> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        log::debug!("history: undo to #{}", self.index);
        Some(self.snapshots[self.index].clone())
    }

    pub fn redo(&mut self) -> Option<Scene> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        log::debug!("history: redo to #{}", self.index);
        Some(self.snapshots[self.index].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Snapshot at the current position.
    pub fn current(&self) -> &Scene {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::{ShapeKind, add_element, create_shape};
    use pretty_assertions::assert_eq;

    fn grow(scene: &Scene) -> Scene {
        add_element(scene, create_shape(ShapeKind::Heart))
    }

    #[test]
    fn seeded_not_undoable() {
        let h = History::new(&Scene::blank(), None);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn undo_returns_previous() {
        let s0 = Scene::blank();
        let mut h = History::new(&s0, None);
        let s1 = grow(&s0);
        h.record(&s1);
        assert!(h.can_undo());
        assert_eq!(h.undo(), Some(s0));
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), Some(s1));
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn record_after_undo_drops_redo() {
        let s0 = Scene::blank();
        let mut h = History::new(&s0, None);
        let s1 = grow(&s0);
        let s2 = grow(&s1);
        h.record(&s1);
        h.record(&s2);
        h.undo();
        h.undo();
        assert!(h.can_redo());

        h.record(&grow(&s0));
        assert!(!h.can_redo());
        assert_eq!(h.redo(), None);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn snapshots_are_independent() {
        let mut live = Scene::blank();
        let mut h = History::new(&live, None);
        live = grow(&live);
        h.record(&live);
        live.elements[0].position.x = 999.0;
        assert_eq!(h.current().elements[0].position.x, 200.0);
    }

    #[test]
    fn limit_trims_oldest() {
        let mut scene = Scene::blank();
        let mut h = History::new(&scene, Some(3));
        for _ in 0..5 {
            scene = grow(&scene);
            h.record(&scene);
        }
        assert_eq!(h.len(), 3);
        let mut undo_count = 0;
        while h.undo().is_some() {
            undo_count += 1;
        }
        assert_eq!(undo_count, 2);
        assert_eq!(h.current().len(), 3);
    }
}
