//! Log output for seatplan runs.
//!
//! Logs go to stderr only. Stdout belongs to the allocation report and the
//! room-count mismatch JSON, which scripts read as-is. Plan outcomes and rooms
//! whose branch pair had to relax to overflow fill are logged at `info`.
//! Per-room fill counts and loaded roster sheets are logged at `debug`.
//! `RUST_LOG` overrides the level chosen on the command line.

use std::io;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Route seatplan's events to stderr, as text or as JSON lines.
///
/// Returns `false` when a subscriber was already installed, in which case the
/// existing one keeps receiving events.
pub fn init_tracing(json: bool, level: Level) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let json_lines = json.then(|| fmt::layer().json().with_writer(io::stderr));
    let text_lines = (!json).then(|| fmt::layer().with_target(false).with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_lines)
        .with(text_lines)
        .try_init()
        .is_ok()
}
