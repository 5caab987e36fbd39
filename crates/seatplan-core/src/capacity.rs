//! Room-count planning.
//!
//! The room count is a hard gate: allocation only starts when the operator
//! supplied exactly `ceil(total / capacity)` rooms.

use crate::domain::error::{Result, SeatPlanError};

/// Number of rooms needed to seat `total` candidates at `capacity` per room.
pub fn required_rooms(total: usize, capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(SeatPlanError::InvalidCapacity(capacity));
    }
    Ok(total.div_ceil(capacity))
}

/// Accept `supplied` only if it equals the required room count.
pub fn check_room_count(total: usize, capacity: usize, supplied: usize) -> Result<usize> {
    let required = required_rooms(total, capacity)?;
    if supplied != required {
        tracing::debug!(total, capacity, required, supplied, "room count rejected");
        return Err(SeatPlanError::RoomCountMismatch {
            required_rooms: required,
            supplied_rooms: supplied,
        });
    }
    Ok(required)
}
