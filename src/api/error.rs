//! HTTP mapping of exchange failures.
//!
//! | Failure | Status |
//! |---------|--------|
//! | Send failure, peer refused credentials | 401 Unauthorized |
//! | Any other send failure | 417 Expectation Failed |
//! | Invalid response | 417 Expectation Failed |
//! | Internal | 500 Internal Server Error |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::connector::ExchangeFailure;

impl ExchangeFailure {
    /// Returns the HTTP status reported to API callers.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MessageSend(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Self::MessageSend(_) | Self::InvalidResponse(_) => StatusCode::EXPECTATION_FAILED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExchangeFailure {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::MessageSend(e) => json!({
                "message": "Failed to send IDS message.",
                "details": e.to_string(),
            }),
            Self::InvalidResponse(e) => json!({
                "message": "Received an invalid IDS response.",
                "details": e.to_string(),
            }),
            Self::Internal(e) => {
                error!(error = %e, "Internal error while handling IDS exchange");
                json!({ "message": "Something went wrong." })
            }
        };

        (status, Json(body)).into_response()
    }
}
