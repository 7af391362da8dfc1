//! Shared types for the waitlist workspace
//!
//! Common types used across crates: the unified error system,
//! restaurant / waitlist / review data models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
