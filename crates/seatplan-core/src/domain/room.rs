//! Rooms and the seats filled within them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::branch::BranchPair;
use super::candidate::Candidate;

/// Fill phase that seated a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPhase {
    /// Constrained by the room's branch pair and the per-branch sub-cap.
    Primary,
    /// Unconstrained fill once primary fill could not reach capacity.
    Overflow,
}

/// A seated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub sequence_number: u32,
    pub phase: FillPhase,
    pub candidate: Candidate,
}

/// Output record for one seat: `{sequenceNumber, id, name, branch}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub sequence_number: u32,
    pub id: String,
    pub name: String,
    pub branch: String,
}

/// A physical exam room with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub capacity: usize,
    /// Preferred branch pair; `None` when fewer than two branches exist.
    pub pair: Option<BranchPair>,
    seats: Vec<Seat>,
}

impl Room {
    pub fn new(id: impl Into<String>, capacity: usize, pair: Option<BranchPair>) -> Self {
        Self {
            id: id.into(),
            capacity,
            pair,
            seats: Vec::new(),
        }
    }

    /// Seat `candidate` with the next sequence number and return that number.
    ///
    /// Callers must check [`Room::is_full`] first.
    pub fn seat(&mut self, mut candidate: Candidate, phase: FillPhase) -> u32 {
        debug_assert!(!self.is_full(), "room {} is already full", self.id);
        let sequence_number = self.seats.len() as u32 + 1;
        candidate.room = Some(self.id.clone());
        candidate.sequence_number = Some(sequence_number);
        self.seats.push(Seat {
            sequence_number,
            phase,
            candidate,
        });
        sequence_number
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.seats.len())
    }

    pub fn primary_count(&self) -> usize {
        self.count_phase(FillPhase::Primary)
    }

    pub fn overflow_count(&self) -> usize {
        self.count_phase(FillPhase::Overflow)
    }

    fn count_phase(&self, phase: FillPhase) -> usize {
        self.seats.iter().filter(|s| s.phase == phase).count()
    }

    /// Seated candidates per branch, across both fill phases.
    pub fn branch_counts(&self) -> BTreeMap<String, usize> {
        tally(self.seats.iter())
    }

    /// Seated candidates per branch, primary fill only.
    pub fn primary_branch_counts(&self) -> BTreeMap<String, usize> {
        tally(self.seats.iter().filter(|s| s.phase == FillPhase::Primary))
    }

    /// Ordered roster in the downstream output shape.
    pub fn roster(&self) -> Vec<SeatRecord> {
        self.seats
            .iter()
            .map(|seat| SeatRecord {
                sequence_number: seat.sequence_number,
                id: seat.candidate.id.clone(),
                name: seat.candidate.name.clone(),
                branch: seat.candidate.branch.clone(),
            })
            .collect()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.seats.into_iter().map(|s| s.candidate).collect()
    }
}

fn tally<'a>(seats: impl Iterator<Item = &'a Seat>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for seat in seats {
        *counts.entry(seat.candidate.branch.clone()).or_insert(0) += 1;
    }
    counts
}
