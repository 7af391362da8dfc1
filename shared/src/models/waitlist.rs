//! Waitlist projections
//!
//! Plain data returned by the reservation service; no queue internals leak here.

use serde::{Deserialize, Serialize};

/// One row of a restaurant's waiting list, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingEntry {
    pub reservation_id: i64,
    pub display_name: String,
    pub contact_phone: String,
    pub joined_at: i64,
}

/// A user's place in one restaurant's queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingPosition {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub position: usize,
}
