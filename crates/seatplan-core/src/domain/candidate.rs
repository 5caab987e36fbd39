//! Candidate records.

use serde::{Deserialize, Serialize};

/// Input record for a single candidate, as handed over by roster ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    pub branch: String,
}

/// A candidate taking part in one allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Opaque unique identifier (e.g. a university seat number).
    pub id: String,
    pub name: String,
    pub branch: String,
    /// Position in the roster as read, before any shuffling.
    pub position: usize,
    /// Room the candidate was seated in, once allocated.
    pub room: Option<String>,
    /// 1-based sequence number within `room`, once allocated.
    pub sequence_number: Option<u32>,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        branch: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            branch: branch.into(),
            position,
            room: None,
            sequence_number: None,
        }
    }

    pub fn from_record(record: CandidateRecord, position: usize) -> Self {
        Self::new(record.id, record.name, record.branch, position)
    }

    pub fn is_allocated(&self) -> bool {
        self.room.is_some()
    }

    pub fn record(&self) -> CandidateRecord {
        CandidateRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// Convert input records into candidates, numbering positions in input order.
pub fn candidates_from_records(records: Vec<CandidateRecord>) -> Vec<Candidate> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| Candidate::from_record(record, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_candidate_is_unallocated() {
        let c = Candidate::new("1BM21CS001", "Asha", "CSE", 0);
        assert!(!c.is_allocated());
        assert_eq!(c.sequence_number, None);
    }

    #[test]
    fn test_positions_follow_record_order() {
        let records = vec![
            CandidateRecord {
                id: "a".to_string(),
                name: "A".to_string(),
                branch: "CSE".to_string(),
            },
            CandidateRecord {
                id: "b".to_string(),
                name: "B".to_string(),
                branch: "ECE".to_string(),
            },
        ];
        let candidates = candidates_from_records(records);
        assert_eq!(candidates[0].position, 0);
        assert_eq!(candidates[1].position, 1);
        assert_eq!(candidates[1].record().branch, "ECE");
    }
}
