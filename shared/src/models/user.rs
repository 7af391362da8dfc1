//! User Model

use serde::{Deserialize, Serialize};

/// Registered user profile as seen by the waitlist core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
}
