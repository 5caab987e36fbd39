//! Shared candidate pool consumed room by room.
//!
//! Backed by a tombstoned arena: taking a candidate leaves a hole instead of
//! shifting the tail, so removal is O(1) and the remaining candidates keep
//! their relative order.

use crate::domain::Candidate;

#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    slots: Vec<Option<Candidate>>,
    live: usize,
}

impl CandidatePool {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let live = candidates.len();
        Self {
            slots: candidates.into_iter().map(Some).collect(),
            live,
        }
    }

    /// Number of candidates still in the pool.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots, including tombstones. Valid slot indices are `0..slot_count()`.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&Candidate> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Remove and return the candidate at `slot`, leaving a tombstone.
    pub fn take(&mut self, slot: usize) -> Option<Candidate> {
        let taken = self.slots.get_mut(slot).and_then(Option::take);
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    /// Live candidates in pool order, with their slot indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Candidate)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, c)| c.as_ref().map(|c| (slot, c)))
    }

    /// Snapshot of the remaining candidates in pool order.
    pub fn remaining(&self) -> Vec<&Candidate> {
        self.iter().map(|(_, c)| c).collect()
    }

    /// Drop tombstones. Slot indices are renumbered.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    pub fn into_remaining(self) -> Vec<Candidate> {
        self.slots.into_iter().flatten().collect()
    }
}
