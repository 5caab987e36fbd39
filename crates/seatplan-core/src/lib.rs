//! Seatplan core library.
//!
//! Assigns exam candidates, grouped by branch, to a fixed set of rooms. Each
//! room prefers a pair of branches and seats at most half its capacity from
//! either; rooms that cannot be filled that way fall back to seating anyone.
//!
//! The decision logic lives in [`pairs`], [`capacity`], [`pool`],
//! [`allocator`] and [`planner`]. The remaining modules are file adapters
//! around it.

pub mod allocator;
pub mod archive;
pub mod capacity;
pub mod config;
pub mod domain;
pub mod manifest;
pub mod pairs;
pub mod planner;
pub mod pool;
pub mod render;
pub mod report;
pub mod rng;
pub mod roster;
pub mod telemetry;

pub use allocator::SeatAllocator;
pub use archive::archive_directory;
pub use capacity::{check_room_count, required_rooms};
pub use config::SeatPlanConfig;
pub use domain::{
    candidates_from_records, AllocationRequest, BranchPair, Candidate, CandidateRecord, FillPhase,
    MismatchReport, Result, Room, Seat, SeatPlanError, SeatRecord, DEFAULT_CAPACITY,
};
pub use manifest::{manifests_for, write_manifests, write_manifests_json, RoomManifest};
pub use pairs::{distinct_branches, generate_branch_pairs, pair_for_room};
pub use planner::{plan_allocation, AllocationPlan};
pub use pool::CandidatePool;
pub use render::{render_all, render_attendance_sheet, SheetTemplate};
pub use report::{write_summary_json, AllocationSummary, RoomSummary};
pub use rng::{seeded_rng, shuffle};
pub use roster::read_roster;
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
