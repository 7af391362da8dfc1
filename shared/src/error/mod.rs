//! Unified error system
//!
//! - [`ErrorCode`]: stable `u16` codes, one per outward outcome
//! - [`ErrorCategory`]: domain of a code
//! - [`AppError`]: code + message + structured details
//! - [`ApiResponse`]: response envelope
//!
//! ```
//! use shared::error::{AppError, ApiResponse, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::AlreadyWaiting).with_detail("party", "user:7");
//! assert_eq!(err.http_status().as_u16(), 409);
//!
//! let body: ApiResponse<()> = err.into();
//! assert_eq!(body.code, ErrorCode::AlreadyWaiting);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
