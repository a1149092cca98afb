//! Persistence boundary.
//!
//! The session only calls `save` with its live scene and uses the returned
//! id as a navigation target. `MemoryStore` keeps MessagePack-encoded
//! records, the same shape a browser key-value store would hold.

use card_core::id::now_millis;
use card_core::{CardError, Result, Scene};
use serde::{Deserialize, Serialize};

/// A persisted design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    pub id: String,
    /// Unix millis of the last save.
    pub saved_at: u64,
    pub scene: Scene,
}

pub trait DesignStore {
    /// Upsert by id. A scene without an id gets a fresh one.
    fn save(&mut self, scene: &Scene) -> Result<SavedDesign>;

    /// All designs in first-saved order.
    fn list(&self) -> Result<Vec<SavedDesign>>;

    fn get(&self, id: &str) -> Result<Option<SavedDesign>>;

    /// Returns whether the store accepted the delete.
    fn delete(&mut self, id: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<(String, Vec<u8>)>,
}

fn encode(design: &SavedDesign) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(design).map_err(|e| CardError::Codec(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<SavedDesign> {
    rmp_serde::from_slice(bytes).map_err(|e| CardError::Codec(e.to_string()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl DesignStore for MemoryStore {
    fn save(&mut self, scene: &Scene) -> Result<SavedDesign> {
        let id = scene.id.clone().unwrap_or_else(|| now_millis().to_string());
        let mut stored = scene.clone();
        stored.id = Some(id.clone());
        let design = SavedDesign {
            id: id.clone(),
            saved_at: now_millis(),
            scene: stored,
        };
        let bytes = encode(&design)?;

        match self.records.iter_mut().find(|(rid, _)| *rid == id) {
            Some((_, slot)) => *slot = bytes,
            None => self.records.push((id.clone(), bytes)),
        }
        log::debug!("store: saved {id} ({} records)", self.records.len());
        Ok(design)
    }

    fn list(&self) -> Result<Vec<SavedDesign>> {
        self.records.iter().map(|(_, bytes)| decode(bytes)).collect()
    }

    fn get(&self, id: &str) -> Result<Option<SavedDesign>> {
        self.records
            .iter()
            .find(|(rid, _)| rid == id)
            .map(|(_, bytes)| decode(bytes))
            .transpose()
    }

    fn delete(&mut self, id: &str) -> bool {
        self.records.retain(|(rid, _)| rid != id);
        true
    }
}
