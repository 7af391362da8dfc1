//! Numeric error codes
//!
//! The thousands digit selects the category (see [`ErrorCategory`](super::ErrorCategory)):
//! 0 general, 2 permission, 3 restaurant, 4 waitlist, 5 review, 6 user, 9 system.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable outward error code, serialized as a bare `u16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    Unknown = 1,
    /// Malformed phone, stars, text length, coordinates, hours
    ValidationFailed = 2,

    /// Caller may not manage this restaurant
    ManagerRequired = 2002,

    RestaurantNotFound = 3001,

    AlreadyWaiting = 4001,
    ReservationNotFound = 4002,
    QueueEmpty = 4003,

    ReviewNotFound = 5001,

    UserNotFound = 6001,

    InternalError = 9001,
    /// A collaborator could not be reached; the caller may retry
    NetworkError = 9003,
}

impl ErrorCode {
    /// Every defined code, ascending
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::ManagerRequired,
        ErrorCode::RestaurantNotFound,
        ErrorCode::AlreadyWaiting,
        ErrorCode::ReservationNotFound,
        ErrorCode::QueueEmpty,
        ErrorCode::ReviewNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::InternalError,
        ErrorCode::NetworkError,
    ];

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default English message
    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::ManagerRequired => "Restaurant manager role is required",
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::AlreadyWaiting => "Waiting already exists",
            ErrorCode::ReservationNotFound => "Reservation not found or already canceled",
            ErrorCode::QueueEmpty => "Waiting does not exist",
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Collaborator unreachable",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` that is not one of [`ErrorCode::ALL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
