use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::waitlist::QueueError;

/// 服务层错误
///
/// 每种错误对应唯一的 [`ErrorCode`]，因此对外只有一个稳定的状态码。
/// `QueueEmpty` 与 `ReservationNotFound` 属于调用方日常处理的结果，不是故障。
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Restaurant with ID {0} not found")]
    RestaurantNotFound(i64),

    #[error("Waiting already exists: {0}")]
    AlreadyWaiting(String),

    #[error("Reservation not found or already canceled")]
    ReservationNotFound,

    #[error("Waiting does not exist for restaurant {0}")]
    QueueEmpty(i64),

    #[error("Review {0} not found")]
    ReviewNotFound(i64),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Collaborator failure that is not one of the named outcomes (never retried here)
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] AppError),
}

impl ServiceError {
    /// Map a queue-level failure for the given restaurant
    pub(crate) fn from_queue(restaurant_id: i64, err: QueueError) -> Self {
        match err {
            QueueError::DuplicateEntry(key) => ServiceError::AlreadyWaiting(key.to_string()),
            QueueError::NotFound(_) => ServiceError::ReservationNotFound,
            QueueError::EmptyQueue => ServiceError::QueueEmpty(restaurant_id),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::RestaurantNotFound(id) => {
                AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant with ID {id} not found"))
                    .with_detail("restaurant_id", id)
            }
            ServiceError::AlreadyWaiting(party) => {
                AppError::new(ErrorCode::AlreadyWaiting).with_detail("party", party)
            }
            ServiceError::ReservationNotFound => AppError::new(ErrorCode::ReservationNotFound),
            ServiceError::QueueEmpty(id) => {
                AppError::new(ErrorCode::QueueEmpty).with_detail("restaurant_id", id)
            }
            ServiceError::ReviewNotFound(id) => {
                AppError::new(ErrorCode::ReviewNotFound).with_detail("review_id", id)
            }
            ServiceError::Unauthorized => AppError::new(ErrorCode::ManagerRequired),
            ServiceError::InvalidInput(msg) => AppError::validation(msg),
            ServiceError::Collaborator(e) => {
                tracing::error!(code = %e.code, error = %e, "Collaborator call failed");
                e
            }
        }
    }
}

/// 服务层 Result 类型别名
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
