//! Normalized-key index over a growable arena of `RankedGeo` slots. Slots are
//! addressed by `SlotId` and never move or disappear while the index lives.
use std::collections::HashMap;

use tokio::sync::mpsc::Receiver;
use tracing::{debug, info};

use geowiki_core::{normalize_key, GeoEntity, RankedGeo, RankedPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Debug, Default)]
pub struct JoinIndex {
    slots: Vec<RankedGeo>,
    lookup: HashMap<String, SlotId>,
}

impl JoinIndex {
    pub fn new() -> Self { Self::default() }

    /// Drain the entity queue into a fresh index. Returns once the producer
    /// closes the queue.
    pub async fn build(mut rx: Receiver<GeoEntity>, log_sample: usize) -> Self {
        let mut index = Self::new();
        while let Some(entity) = rx.recv().await {
            if index.slots.len() < log_sample {
                debug!("Adding {} to the lookup table", entity.wiki);
            }
            index.insert(entity);
        }
        info!("Built lookup table: {} entities, {} distinct keys", index.len(), index.key_count());
        index
    }

    /// Allocate a slot for `entity` and register it under its normalized wiki
    /// key. A later entity with the same key takes over the lookup entry; the
    /// earlier slot stays in the arena, unreachable by lookup.
    pub fn insert(&mut self, entity: GeoEntity) -> SlotId {
        let id = SlotId(self.slots.len());
        let key = normalize_key(&entity.wiki);
        self.slots.push(RankedGeo::new(entity));
        if let Some(previous) = self.lookup.insert(key, id) {
            debug!(previous = previous.0, current = id.0, "Lookup key collision, last entity wins");
        }
        id
    }

    /// Slot registered under the normalized form of `title`.
    pub fn lookup(&self, title: &str) -> Option<SlotId> {
        self.lookup.get(&normalize_key(title)).copied()
    }

    pub fn get(&self, id: SlotId) -> Option<&RankedGeo> { self.slots.get(id.0) }

    /// Attach `page` to slot `id`. Hands the page back if the slot is already
    /// ranked or does not exist.
    pub fn attach(&mut self, id: SlotId, page: RankedPage) -> Result<(), RankedPage> {
        match self.slots.get_mut(id.0) {
            Some(slot) => slot.attach(page),
            None => Err(page),
        }
    }

    /// Number of slots (one per entity read).
    pub fn len(&self) -> usize { self.slots.len() }

    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Number of distinct normalized keys.
    pub fn key_count(&self) -> usize { self.lookup.len() }

    pub fn into_slots(self) -> Vec<RankedGeo> { self.slots }
}
