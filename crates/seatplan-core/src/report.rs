//! Allocation summary artifact (`allocation_summary.json`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{BranchPair, Room};
use crate::planner::AllocationPlan;

pub const SUMMARY_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSummary {
    pub room: String,
    pub pair: Option<BranchPair>,
    pub seated: usize,
    pub primary: usize,
    pub overflow: usize,
    pub branch_counts: BTreeMap<String, usize>,
}

impl RoomSummary {
    pub fn from_room(room: &Room) -> Self {
        Self {
            room: room.id.clone(),
            pair: room.pair.clone(),
            seated: room.len(),
            primary: room.primary_count(),
            overflow: room.overflow_count(),
            branch_counts: room.branch_counts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationSummary {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub capacity: usize,
    pub sub_cap: usize,
    pub total_candidates: usize,
    pub pairs: Vec<BranchPair>,
    pub rooms: Vec<RoomSummary>,
    /// SHA-256 over the ordered rosters; equal seeds and inputs give equal digests.
    pub roster_digest: String,
}

impl AllocationSummary {
    pub fn new(plan: &AllocationPlan, seed: Option<u64>) -> Self {
        Self {
            schema_version: SUMMARY_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            seed,
            capacity: plan.capacity,
            sub_cap: plan.sub_cap,
            total_candidates: plan.total_seated(),
            pairs: plan.pairs.clone(),
            rooms: plan.rooms.iter().map(RoomSummary::from_room).collect(),
            roster_digest: roster_digest(&plan.rooms),
        }
    }
}

/// Hex SHA-256 over `room \t seq \t id \t branch` lines, rooms in order.
pub fn roster_digest(rooms: &[Room]) -> String {
    let mut hasher = Sha256::new();
    for room in rooms {
        for seat in room.seats() {
            hasher.update(
                format!(
                    "{}\t{}\t{}\t{}\n",
                    room.id, seat.sequence_number, seat.candidate.id, seat.candidate.branch
                )
                .as_bytes(),
            );
        }
    }
    hex::encode(hasher.finalize())
}

/// Write the summary in pretty JSON format.
pub fn write_summary_json(path: &Path, summary: &AllocationSummary) -> Result<()> {
    let content = serde_json::to_string_pretty(summary).context("serialize allocation summary")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, FillPhase};

    fn room(id: &str, ids: &[&str]) -> Room {
        let mut room = Room::new(id, 4, Some(BranchPair::new("A", "B")));
        for (i, cid) in ids.iter().enumerate() {
            room.seat(Candidate::new(*cid, *cid, "A", i), FillPhase::Primary);
        }
        room
    }

    #[test]
    fn test_digest_depends_on_order() {
        let a = roster_digest(&[room("1", &["x", "y"])]);
        let b = roster_digest(&[room("1", &["y", "x"])]);
        assert_ne!(a, b);
        assert_eq!(a, roster_digest(&[room("1", &["x", "y"])]));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_room_summary_counts_phases() {
        let mut r = room("2", &["x"]);
        r.seat(Candidate::new("z", "z", "C", 9), FillPhase::Overflow);
        let summary = RoomSummary::from_room(&r);
        assert_eq!(summary.seated, 2);
        assert_eq!(summary.primary, 1);
        assert_eq!(summary.overflow, 1);
        assert_eq!(summary.branch_counts.get("C"), Some(&1));
    }
}
