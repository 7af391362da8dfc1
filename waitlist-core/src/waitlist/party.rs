//! Party - 一个候位方 (注册用户或匿名手机号)

use std::fmt;

use shared::models::WaitingEntry;
use shared::util::{now_millis, snowflake_id};

/// Display name shown for parties that joined by phone only
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous user";

/// Identity of a party within one queue
///
/// Registered users are keyed by user id, anonymous parties by their
/// normalized phone number. The two never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartyKey {
    User(i64),
    Phone(String),
}

impl PartyKey {
    /// The user id for registered parties
    pub fn user_id(&self) -> Option<i64> {
        match self {
            PartyKey::User(id) => Some(*id),
            PartyKey::Phone(_) => None,
        }
    }
}

impl fmt::Display for PartyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyKey::User(id) => write!(f, "user:{id}"),
            PartyKey::Phone(phone) => write!(f, "phone:{phone}"),
        }
    }
}

/// A waiting entrant
///
/// Immutable once it is in a queue. `sequence` is assigned by the queue on
/// join and is the ordering key; `joined_at` is wall-clock and informative only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub reservation_id: i64,
    pub restaurant_id: i64,
    pub party_key: PartyKey,
    pub display_name: String,
    pub contact_phone: String,
    pub joined_at: i64,
    pub(super) sequence: u64,
}

impl Party {
    pub fn new(
        restaurant_id: i64,
        party_key: PartyKey,
        display_name: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            reservation_id: snowflake_id(),
            restaurant_id,
            party_key,
            display_name: display_name.into(),
            contact_phone: contact_phone.into(),
            joined_at: now_millis(),
            sequence: 0,
        }
    }

    /// Per-queue join order (1 for the first party ever admitted)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.party_key, PartyKey::User(_))
    }

    /// Outward projection used by list views
    pub fn to_entry(&self) -> WaitingEntry {
        WaitingEntry {
            reservation_id: self.reservation_id,
            display_name: self.display_name.clone(),
            contact_phone: self.contact_phone.clone(),
            joined_at: self.joined_at,
        }
    }
}
