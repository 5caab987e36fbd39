//! Allocation requests and their eager validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::error::{Result, SeatPlanError};
use crate::capacity::check_room_count;

/// Default number of seats per room.
pub const DEFAULT_CAPACITY: usize = 40;

/// Everything one allocation pass needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub candidates: Vec<Candidate>,
    /// Operator-selected room labels, in the order supplied.
    pub rooms: Vec<String>,
    pub capacity: usize,
    /// Per-branch limit during primary fill.
    pub sub_cap: usize,
}

impl AllocationRequest {
    /// Build a request whose sub-cap is half the capacity.
    pub fn new(candidates: Vec<Candidate>, rooms: Vec<String>, capacity: usize) -> Self {
        Self {
            candidates,
            rooms,
            capacity,
            sub_cap: capacity / 2,
        }
    }

    pub fn with_sub_cap(mut self, sub_cap: usize) -> Self {
        self.sub_cap = sub_cap;
        self
    }

    /// Check every precondition without touching the candidates.
    ///
    /// Returns the required room count on success.
    pub fn validate(&self) -> Result<usize> {
        if self.capacity == 0 {
            return Err(SeatPlanError::InvalidCapacity(self.capacity));
        }
        if self.sub_cap == 0 || self.sub_cap > self.capacity {
            return Err(SeatPlanError::InvalidSubCap {
                sub_cap: self.sub_cap,
                capacity: self.capacity,
            });
        }
        if self.candidates.is_empty() {
            return Err(SeatPlanError::EmptyPool);
        }

        let mut seen_rooms = HashSet::new();
        for room in &self.rooms {
            if room.trim().is_empty() {
                return Err(SeatPlanError::InvalidRoomLabel);
            }
            if !seen_rooms.insert(room.as_str()) {
                return Err(SeatPlanError::DuplicateRoom(room.clone()));
            }
        }

        let mut seen_ids = HashSet::new();
        for candidate in &self.candidates {
            if !seen_ids.insert(candidate.id.as_str()) {
                return Err(SeatPlanError::DuplicateCandidate(candidate.id.clone()));
            }
        }

        check_room_count(self.candidates.len(), self.capacity, self.rooms.len())
    }
}
