use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use common::models::CustomerValidationError;
use thiserror::Error;

/// Client-facing failures. The message is the whole response body, so it
/// must never carry storage detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid customer ID")]
    InvalidId,
    #[error("Invalid request payload")]
    InvalidPayload,
    #[error(transparent)]
    Validation(#[from] CustomerValidationError),
    #[error("Customer not found")]
    NotFound,
    #[error("{0}")]
    Internal(&'static str),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidPayload | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(format!("{self}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn error_body_is_message_with_trailing_newline() {
        let response = ApiError::Validation(CustomerValidationError).error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            body.as_ref(),
            b"First name, last name, and email are required\n"
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("Failed to create customer").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
