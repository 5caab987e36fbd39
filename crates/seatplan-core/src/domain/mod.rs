//! Domain models for seat planning.
//!
//! Canonical definitions for the entities of one allocation pass:
//! - `Candidate`: a person to be seated, tagged with a branch
//! - `Room`: a fixed-capacity room and its ordered roster
//! - `BranchPair`: the two branches a room prefers to mix
//! - `AllocationRequest`: pool, rooms and capacity constants

pub mod branch;
pub mod candidate;
pub mod error;
pub mod request;
pub mod room;

pub use branch::BranchPair;
pub use candidate::{candidates_from_records, Candidate, CandidateRecord};
pub use error::{MismatchReport, Result, SeatPlanError};
pub use request::{AllocationRequest, DEFAULT_CAPACITY};
pub use room::{FillPhase, Room, Seat, SeatRecord};
