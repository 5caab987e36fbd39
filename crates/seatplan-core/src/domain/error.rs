//! Error taxonomy for seat planning.

use serde::{Deserialize, Serialize};

/// Errors produced while validating or executing an allocation request.
///
/// Every validation variant is raised before the candidate pool is touched,
/// so a rejected request never leaves a partially consumed pool behind.
#[derive(Debug, thiserror::Error)]
pub enum SeatPlanError {
    #[error("room count mismatch: {required_rooms} rooms required, {supplied_rooms} supplied")]
    RoomCountMismatch {
        required_rooms: usize,
        supplied_rooms: usize,
    },

    #[error("candidate pool is empty")]
    EmptyPool,

    #[error("invalid room capacity: {0}")]
    InvalidCapacity(usize),

    #[error("invalid per-branch sub-cap {sub_cap} for capacity {capacity}")]
    InvalidSubCap { sub_cap: usize, capacity: usize },

    #[error("room supplied more than once: {0}")]
    DuplicateRoom(String),

    #[error("room label must not be blank")]
    InvalidRoomLabel,

    #[error("candidate id appears more than once: {0}")]
    DuplicateCandidate(String),

    #[error("malformed roster {origin} (line {line}): {reason}")]
    MalformedRoster {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SeatPlanError {
    /// Structured `{requiredRooms, suppliedRooms}` payload for a room-count
    /// mismatch, `None` for every other variant.
    pub fn mismatch_report(&self) -> Option<MismatchReport> {
        match self {
            SeatPlanError::RoomCountMismatch {
                required_rooms,
                supplied_rooms,
            } => Some(MismatchReport {
                required_rooms: *required_rooms,
                supplied_rooms: *supplied_rooms,
            }),
            _ => None,
        }
    }
}

/// Caller-facing shape of a [`SeatPlanError::RoomCountMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchReport {
    pub required_rooms: usize,
    pub supplied_rooms: usize,
}

/// Result type for seat planning operations.
pub type Result<T> = std::result::Result<T, SeatPlanError>;
