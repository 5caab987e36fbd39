use std::collections::BTreeMap;

use proptest::prelude::*;
use seatplan_core::{
    check_room_count, plan_allocation, required_rooms, seeded_rng, AllocationRequest, Candidate,
    FillPhase,
};

fn pool(counts: &[usize]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (b, n) in counts.iter().enumerate() {
        for i in 0..*n {
            let position = out.len();
            out.push(Candidate::new(
                format!("B{b}-{i}"),
                format!("Candidate {b}/{i}"),
                format!("B{b}"),
                position,
            ));
        }
    }
    out
}

fn arb_request() -> impl Strategy<Value = (AllocationRequest, u64)> {
    (
        prop::collection::vec(0usize..60, 1..6),
        2usize..50,
        any::<u64>(),
    )
        .prop_filter("pool must not be empty", |(counts, _, _)| {
            counts.iter().sum::<usize>() > 0
        })
        .prop_map(|(counts, capacity, seed)| {
            let candidates = pool(&counts);
            let rooms = required_rooms(candidates.len(), capacity).expect("capacity > 0");
            let labels = (0..rooms).map(|i| format!("R{i}")).collect();
            (AllocationRequest::new(candidates, labels, capacity), seed)
        })
}

proptest! {
    #[test]
    fn only_the_required_room_count_is_accepted(
        total in 1usize..500,
        capacity in 1usize..60,
        supplied in 0usize..30,
    ) {
        let required = total.div_ceil(capacity);
        let result = check_room_count(total, capacity, supplied);
        if supplied == required {
            prop_assert_eq!(result.expect("accepted"), required);
        } else {
            let report = result.unwrap_err().mismatch_report().expect("mismatch");
            prop_assert_eq!(report.required_rooms, required);
            prop_assert_eq!(report.supplied_rooms, supplied);
        }
    }

    #[test]
    fn every_candidate_is_seated_exactly_once((request, seed) in arb_request()) {
        let mut expected: Vec<String> = request.candidates.iter().map(|c| c.id.clone()).collect();
        let plan = plan_allocation(request, &mut seeded_rng(Some(seed))).expect("plan");

        let mut seated: Vec<String> = plan
            .rooms
            .iter()
            .flat_map(|r| r.seats().iter().map(|s| s.candidate.id.clone()))
            .collect();
        expected.sort();
        seated.sort();
        prop_assert_eq!(seated, expected);
    }

    #[test]
    fn rooms_respect_capacity_and_sub_cap((request, seed) in arb_request()) {
        let capacity = request.capacity;
        let sub_cap = request.sub_cap;
        let plan = plan_allocation(request, &mut seeded_rng(Some(seed))).expect("plan");

        for room in &plan.rooms {
            prop_assert!(room.len() <= capacity);
            for count in room.primary_branch_counts().values() {
                prop_assert!(*count <= sub_cap);
            }
            if let Some(pair) = &room.pair {
                for seat in room.seats().iter().filter(|s| s.phase == FillPhase::Primary) {
                    prop_assert!(pair.contains(&seat.candidate.branch));
                }
            } else {
                prop_assert_eq!(room.primary_count(), 0);
            }
        }
    }

    #[test]
    fn sequence_numbers_are_contiguous_from_one((request, seed) in arb_request()) {
        let plan = plan_allocation(request, &mut seeded_rng(Some(seed))).expect("plan");
        for room in &plan.rooms {
            for (i, seat) in room.seats().iter().enumerate() {
                prop_assert_eq!(seat.sequence_number as usize, i + 1);
                prop_assert_eq!(seat.candidate.sequence_number, Some(seat.sequence_number));
                prop_assert_eq!(seat.candidate.room.as_deref(), Some(room.id.as_str()));
            }
            // Overflow seats only ever follow primary seats.
            let first_overflow = room
                .seats()
                .iter()
                .position(|s| s.phase == FillPhase::Overflow)
                .unwrap_or(room.len());
            prop_assert!(room.seats()[first_overflow..]
                .iter()
                .all(|s| s.phase == FillPhase::Overflow));
        }
    }

    #[test]
    fn only_the_last_room_may_be_short((request, seed) in arb_request()) {
        let capacity = request.capacity;
        let total = request.candidates.len();
        let plan = plan_allocation(request, &mut seeded_rng(Some(seed))).expect("plan");

        let (last, full) = plan.rooms.split_last().expect("at least one room");
        prop_assert!(full.iter().all(|r| r.len() == capacity));
        prop_assert_eq!(last.len(), total - full.len() * capacity);
    }

    #[test]
    fn pair_sequence_covers_every_branch_pair_once((request, seed) in arb_request()) {
        let branches: BTreeMap<String, ()> = request
            .candidates
            .iter()
            .map(|c| (c.branch.clone(), ()))
            .collect();
        let n = branches.len();
        let plan = plan_allocation(request, &mut seeded_rng(Some(seed))).expect("plan");

        prop_assert_eq!(plan.pairs.len(), n * n.saturating_sub(1) / 2);
        for (i, room) in plan.rooms.iter().enumerate() {
            let expected = if plan.pairs.is_empty() {
                None
            } else {
                Some(&plan.pairs[i % plan.pairs.len()])
            };
            prop_assert_eq!(room.pair.as_ref(), expected);
        }
    }
}
