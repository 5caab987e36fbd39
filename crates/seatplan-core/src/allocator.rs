//! Greedy per-room seat allocation.
//!
//! Rooms are filled one at a time, in the order given, from a single shared
//! pool. Each room runs two phases:
//!
//! 1. **Primary fill** scans the pool in order and seats candidates from the
//!    room's preferred [`BranchPair`], at most `sub_cap` per branch and at
//!    most `capacity` in total.
//! 2. **Overflow fill** runs only when the room is still short after primary
//!    fill; it rescans the remaining pool from the start and seats anyone.
//!
//! The result is greedy by room order and deliberately not globally balanced:
//! a later room sees only what earlier rooms left behind.

use tracing::{debug, info};

use crate::domain::{BranchPair, FillPhase, Room};
use crate::pairs::pair_for_room;
use crate::pool::CandidatePool;

/// Fills rooms from a [`CandidatePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatAllocator {
    capacity: usize,
    sub_cap: usize,
}

impl SeatAllocator {
    pub fn new(capacity: usize, sub_cap: usize) -> Self {
        Self { capacity, sub_cap }
    }

    /// Allocator with the default sub-cap of half the capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, capacity / 2)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn sub_cap(&self) -> usize {
        self.sub_cap
    }

    /// Fill one room per entry of `room_ids`, in order, taking the pair at
    /// `index % pairs.len()` as each room's preference.
    ///
    /// Candidates are removed from `pool` as they are seated. Once the pool
    /// runs dry the remaining rooms are returned short or empty.
    pub fn allocate(
        &self,
        pool: &mut CandidatePool,
        room_ids: &[String],
        pairs: &[BranchPair],
    ) -> Vec<Room> {
        let mut rooms = Vec::with_capacity(room_ids.len());
        for (index, room_id) in room_ids.iter().enumerate() {
            let pair = pair_for_room(pairs, index).cloned();
            let mut room = Room::new(room_id.clone(), self.capacity, pair);
            self.fill_room(pool, &mut room);
            pool.compact();
            rooms.push(room);
        }
        rooms
    }

    /// Run primary then, if needed, overflow fill for a single room.
    pub fn fill_room(&self, pool: &mut CandidatePool, room: &mut Room) {
        if let Some(pair) = room.pair.clone() {
            self.primary_fill(pool, room, &pair);
        }

        let primary = room.len();
        if !room.is_full() {
            self.overflow_fill(pool, room);
        }
        let overflow = room.len() - primary;

        if overflow > 0 {
            if let Some(pair) = &room.pair {
                info!(
                    room = %room.id,
                    pair = %pair,
                    primary,
                    overflow,
                    "branch pair could not fill room, relaxed to overflow fill"
                );
            }
        }
        debug!(
            room = %room.id,
            seated = room.len(),
            primary,
            overflow,
            pool_remaining = pool.len(),
            "room filled"
        );
    }

    fn primary_fill(&self, pool: &mut CandidatePool, room: &mut Room, pair: &BranchPair) {
        let mut counts = [0usize; 2];
        for slot in 0..pool.slot_count() {
            if room.is_full() {
                break;
            }
            let Some(branch_slot) = pool.get(slot).and_then(|c| pair.slot_of(&c.branch)) else {
                continue;
            };
            if counts[branch_slot] >= self.sub_cap || counts[0] + counts[1] >= self.capacity {
                continue;
            }
            if let Some(candidate) = pool.take(slot) {
                counts[branch_slot] += 1;
                room.seat(candidate, FillPhase::Primary);
            }
        }
    }

    fn overflow_fill(&self, pool: &mut CandidatePool, room: &mut Room) {
        for slot in 0..pool.slot_count() {
            if room.is_full() {
                break;
            }
            if let Some(candidate) = pool.take(slot) {
                room.seat(candidate, FillPhase::Overflow);
            }
        }
    }
}
