//! Review Model

use serde::{Deserialize, Serialize};

/// Review entity (one row per restaurant, user, submission)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub restaurant_id: i64,
    pub user_id: i64,
    pub stars: i32,
    pub menu: String,
    pub contents: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub stars: i32,
    #[serde(default)]
    pub menu: String,
    pub contents: String,
}

/// Update review payload (full replacement of the editable fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub stars: i32,
    #[serde(default)]
    pub menu: String,
    pub contents: String,
}
