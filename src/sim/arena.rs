//! Body storage with stable ids and tombstoned removal
//!
//! Slots are never reused, so a `BodyId` handed to a renderer or queued in a
//! collision event stays meaningful for the rest of the scene. Retired bodies
//! keep their data and can still be read through [`Arena::retired`].

use serde::{Deserialize, Serialize};

use super::body::BodyId;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<T> {
    value: T,
    live: bool,
}

/// Append-only arena keyed by `BodyId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body, returning its id
    pub fn insert(&mut self, value: T) -> BodyId {
        let id = BodyId(self.slots.len() as u32);
        self.slots.push(Slot { value, live: true });
        id
    }

    /// Tombstone a body. Returns false if it was already retired or never existed.
    pub fn retire(&mut self, id: BodyId) -> bool {
        match self.slots.get_mut(id.0 as usize) {
            Some(slot) if slot.live => {
                slot.live = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_live(&self, id: BodyId) -> bool {
        self.slots.get(id.0 as usize).is_some_and(|s| s.live)
    }

    /// Live body by id
    pub fn get(&self, id: BodyId) -> Option<&T> {
        self.slots
            .get(id.0 as usize)
            .filter(|s| s.live)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0 as usize)
            .filter(|s| s.live)
            .map(|s| &mut s.value)
    }

    /// Live bodies in id order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.live)
            .map(|(i, s)| (BodyId(i as u32), &s.value))
    }

    /// Tombstoned bodies in id order
    pub fn retired(&self) -> impl Iterator<Item = (BodyId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.live)
            .map(|(i, s)| (BodyId(i as u32), &s.value))
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
