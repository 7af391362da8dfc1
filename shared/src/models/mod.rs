//! Data models
//!
//! Shared between the waitlist core and whatever request layer wraps it.
//! All IDs are `i64`.

pub mod restaurant;
pub mod review;
pub mod user;
pub mod waitlist;

// Re-exports
pub use restaurant::*;
pub use review::*;
pub use user::*;
pub use waitlist::*;
