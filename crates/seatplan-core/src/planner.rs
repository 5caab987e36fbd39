//! End-to-end allocation pass: validate, shuffle, pair, fill.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::allocator::SeatAllocator;
use crate::domain::{AllocationRequest, BranchPair, Result, Room};
use crate::pairs::{distinct_branches, generate_branch_pairs};
use crate::pool::CandidatePool;
use crate::rng::shuffle;

/// Outcome of a successful allocation pass.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationPlan {
    /// Rooms in allocation order (the shuffled room order).
    pub rooms: Vec<Room>,
    /// Branches in the shuffled order the pairs were generated from.
    pub branches: Vec<String>,
    pub pairs: Vec<BranchPair>,
    pub capacity: usize,
    pub sub_cap: usize,
}

impl AllocationPlan {
    pub fn total_seated(&self) -> usize {
        self.rooms.iter().map(Room::len).sum()
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

/// Run one allocation pass over `request`, drawing all randomness from `rng`.
///
/// Validation runs first and fails without consuming anything. Then the room
/// order, the candidate pool and the branch order are shuffled, in that order,
/// the pair sequence is generated and every room is filled.
pub fn plan_allocation<R: Rng + ?Sized>(
    request: AllocationRequest,
    rng: &mut R,
) -> Result<AllocationPlan> {
    let required = request.validate()?;

    let AllocationRequest {
        mut candidates,
        mut rooms,
        capacity,
        sub_cap,
    } = request;
    let total = candidates.len();

    shuffle(&mut rooms, rng);
    shuffle(&mut candidates, rng);
    let mut branches = distinct_branches(&candidates);
    shuffle(&mut branches, rng);

    let pairs = generate_branch_pairs(&branches);
    let allocator = SeatAllocator::new(capacity, sub_cap);
    let mut pool = CandidatePool::new(candidates);
    let rooms = allocator.allocate(&mut pool, &rooms, &pairs);
    debug_assert!(pool.is_empty(), "validated room count must seat every candidate");

    let plan = AllocationPlan {
        rooms,
        branches,
        pairs,
        capacity,
        sub_cap,
    };
    info!(
        candidates = total,
        rooms = required,
        branches = plan.branches.len(),
        pairs = plan.pairs.len(),
        overflow = plan.rooms.iter().map(Room::overflow_count).sum::<usize>(),
        "allocation complete"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, SeatPlanError};
    use crate::rng::seeded_rng;

    fn request(branches: &[(&str, usize)], rooms: usize, capacity: usize) -> AllocationRequest {
        let mut candidates = Vec::new();
        for (branch, n) in branches {
            for i in 0..*n {
                let position = candidates.len();
                candidates.push(Candidate::new(
                    format!("{branch}{i:03}"),
                    format!("{branch} {i}"),
                    *branch,
                    position,
                ));
            }
        }
        let rooms = (0..rooms).map(|i| format!("{}", 101 + i)).collect();
        AllocationRequest::new(candidates, rooms, capacity)
    }

    #[test]
    fn test_plan_is_reproducible_for_a_seed() {
        let req = request(&[("A", 30), ("B", 25), ("C", 25)], 2, 40);
        let a = plan_allocation(req.clone(), &mut seeded_rng(Some(11))).expect("plan a");
        let b = plan_allocation(req, &mut seeded_rng(Some(11))).expect("plan b");
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.pairs, b.pairs);
    }

    #[test]
    fn test_plan_seats_everyone() {
        let req = request(&[("A", 30), ("B", 25), ("C", 26)], 3, 40);
        let plan = plan_allocation(req, &mut seeded_rng(Some(3))).expect("plan");
        assert_eq!(plan.total_seated(), 81);
        assert_eq!(plan.pairs.len(), 3);
        assert!(plan.rooms.iter().all(|r| r.len() <= 40));
    }

    #[test]
    fn test_mismatch_fails_before_allocation() {
        let req = request(&[("A", 81)], 2, 40);
        let err = plan_allocation(req, &mut seeded_rng(Some(1))).unwrap_err();
        assert!(matches!(
            err,
            SeatPlanError::RoomCountMismatch {
                required_rooms: 3,
                supplied_rooms: 2
            }
        ));
    }

    #[test]
    fn test_room_lookup_by_label() {
        let req = request(&[("A", 10), ("B", 10)], 1, 40);
        let plan = plan_allocation(req, &mut seeded_rng(Some(5))).expect("plan");
        let room = plan.room("101").expect("room 101");
        assert_eq!(room.len(), 20);
        assert!(plan.room("999").is_none());
    }

    #[test]
    fn test_capacity_far_above_pool_seats_everyone_in_one_room() {
        let req = request(&[("A", 1), ("B", 1)], 1, usize::MAX / 2);
        let plan = plan_allocation(req, &mut seeded_rng(Some(4))).expect("plan");
        assert_eq!(plan.rooms.len(), 1);
        assert_eq!(plan.total_seated(), 2);
        assert_eq!(plan.rooms[0].primary_count(), 2);
    }
}
