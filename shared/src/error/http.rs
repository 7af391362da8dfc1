use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// The single outward HTTP status of this code
    ///
    /// `QueueEmpty` is an expected outcome and answers 400, not 404.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::RestaurantNotFound
            | Self::ReservationNotFound
            | Self::ReviewNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyWaiting => StatusCode::CONFLICT,
            Self::ManagerRequired => StatusCode::FORBIDDEN,
            Self::ValidationFailed | Self::QueueEmpty => StatusCode::BAD_REQUEST,
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unknown | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let table = [
            (ErrorCode::Success, StatusCode::OK),
            (ErrorCode::RestaurantNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::ReservationNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::ReviewNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::AlreadyWaiting, StatusCode::CONFLICT),
            (ErrorCode::ManagerRequired, StatusCode::FORBIDDEN),
            (ErrorCode::QueueEmpty, StatusCode::BAD_REQUEST),
            (ErrorCode::ValidationFailed, StatusCode::BAD_REQUEST),
            (ErrorCode::NetworkError, StatusCode::SERVICE_UNAVAILABLE),
            (ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in table {
            assert_eq!(code.http_status(), status, "{code:?}");
        }
    }
}
