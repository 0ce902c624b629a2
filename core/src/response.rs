//! Axum integration for [`HttpOutcome`].
//!
//! Enabled with the `axum` feature. A handler can return the outcome it got
//! from the mediator directly:
//!
//! - success with a value: the status and the value as JSON
//! - success without a value: the status and an empty body
//! - failure: the status and an [`ErrorBody`] as JSON
//!
//! A status outside `100..=999` cannot be written to the wire and is sent as
//! `500 Internal Server Error`.

use crate::http_outcome::HttpOutcome;
use crate::validation_error::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body of a failed [`HttpOutcome`]
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Human-readable error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Field-level validation errors
    pub validation_errors: Vec<ValidationError>,
}

impl<T: Serialize> IntoResponse for HttpOutcome<T> {
    fn into_response(self) -> Response {
        let success = self.is_success();
        let (code, value, details) = self.into_parts();
        let status = StatusCode::from_u16(code).unwrap_or_else(|_| {
            tracing::error!(status = code, "Outcome status is not a valid HTTP status code");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                code = details.error_code().unwrap_or_default(),
                message = details.error_message().unwrap_or_default(),
                "Request failed with server error"
            );
        }

        if success {
            return match value {
                Some(value) => (status, Json(value)).into_response(),
                None => status.into_response(),
            };
        }

        let body = ErrorBody {
            error_code: details.error_code().map(str::to_string),
            error_message: details.error_message().map(str::to_string),
            validation_errors: details.into_validation_errors(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_serializes_value() {
        let response = HttpOutcome::ok(vec!["Test1", "Test2"]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!(["Test1", "Test2"]));
    }

    #[tokio::test]
    async fn no_content_has_empty_body() {
        let response = HttpOutcome::<()>::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn bad_request_lists_validation_errors() {
        let outcome: HttpOutcome<String> = HttpOutcome::bad_request(vec![ValidationError::new(
            "NotEmptyValidator",
            "'Name' must not be empty.",
            "Name",
        )]);
        let response = outcome.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["validation_errors"][0]["property_name"], "Name");
        assert!(body.get("error_code").is_none());
    }

    #[tokio::test]
    async fn unauthorized_carries_code_and_message() {
        let outcome: HttpOutcome = HttpOutcome::unauthorized_with(
            Some("TokenExpired".to_string()),
            Some("The access token has expired".to_string()),
        );
        let response = outcome.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error_code"], "TokenExpired");
        assert_eq!(body["error_message"], "The access token has expired");
    }

    #[tokio::test]
    async fn unrepresentable_status_becomes_server_error() {
        let outcome = HttpOutcome::<()>::failure_with(
            1042_u16,
            crate::outcome::Failure::new().with_code("Custom"),
        );
        let response = outcome.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error_code"], "Custom");
    }
}
