//! Route handlers for IDS message endpoints.

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Display;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use tracing::debug;

use crate::connector::{ArtifactOutcome, DescriptionOutcome, ExchangeFailure};
use crate::identifiers::{ElementId, Recipient};

use super::ApiState;

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters of `POST /api/ids/description`.
#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    /// The peer connector.
    pub recipient: Recipient,

    /// The requested element; absent or empty for the self-description.
    #[serde(rename = "elementId", default, deserialize_with = "empty_as_none")]
    pub element_id: Option<ElementId>,
}

/// Query parameters of `POST /api/ids/artifact`.
#[derive(Debug, Deserialize)]
pub struct ArtifactQuery {
    /// The peer connector.
    pub recipient: Recipient,

    /// The requested artifact.
    #[serde(rename = "requestedArtifact")]
    pub requested_artifact: ElementId,
}

/// Treats a missing or blank parameter as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Sends a description request to `recipient`.
pub(super) async fn send_description_request(
    State(state): State<ApiState>,
    Query(query): Query<DescriptionQuery>,
) -> Result<DescriptionOutcome, ExchangeFailure> {
    debug!(recipient = %query.recipient, element_id = ?query.element_id, "Description request");

    state
        .connector
        .request_description(&query.recipient, query.element_id.as_ref())
        .await
}

/// Sends an artifact request to `recipient`.
pub(super) async fn send_artifact_request(
    State(state): State<ApiState>,
    Query(query): Query<ArtifactQuery>,
) -> Result<ArtifactOutcome, ExchangeFailure> {
    debug!(recipient = %query.recipient, artifact = %query.requested_artifact, "Artifact request");

    state
        .connector
        .request_artifact(&query.recipient, &query.requested_artifact)
        .await
}

// ============================================================================
// Responses
// ============================================================================

fn raw_payload(payload: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        payload,
    )
        .into_response()
}

impl IntoResponse for DescriptionOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Component(component) => (StatusCode::OK, Json(component)).into_response(),
            Self::Payload(payload) => raw_payload(payload),
            Self::Passthrough(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        }
    }
}

impl IntoResponse for ArtifactOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Payload(payload) => raw_payload(payload),
            Self::Passthrough(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::router;
    use crate::connector::Connector;
    use crate::test_support::{
        FailingDeserializer, FnTransport, connector_with, description_response, rejection,
    };

    const RESOURCE: &str = r#"{"type":"Resource","id":"urn:x:1"}"#;
    const PEER: &str = "https%3A%2F%2Fpeer.example%2Fids";

    fn app(transport: FnTransport) -> Router {
        router(connector_with(Arc::new(transport)))
    }

    async fn post(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, content_type, String::from_utf8(body.to_vec()).expect("utf8"))
    }

    #[tokio::test]
    async fn test_self_description_returns_json_component() {
        let app = app(FnTransport::responding(description_response(RESOURCE)));

        let (status, content_type, body) =
            post(app, &format!("/api/ids/description?recipient={PEER}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let json: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(json["@id"], "urn:x:1");
        assert_eq!(json["@type"], "Resource");
    }

    #[tokio::test]
    async fn test_element_description_returns_raw_text() {
        let app = app(FnTransport::responding(description_response(RESOURCE)));

        let (status, content_type, body) = post(
            app,
            &format!("/api/ids/description?recipient={PEER}&elementId=urn%3Ax%3A1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.expect("content type").starts_with("text/plain"));
        assert_eq!(body, RESOURCE);
    }

    #[tokio::test]
    async fn test_empty_element_id_means_self_description() {
        let app = app(FnTransport::responding(description_response(RESOURCE)));

        let (status, content_type, _) =
            post(app, &format!("/api/ids/description?recipient={PEER}&elementId=")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_rejection_returns_envelope_with_ok() {
        let app = app(FnTransport::responding(rejection(
            "https://w3id.org/idsa/code/NOT_FOUND",
        )));

        let (status, _, body) = post(
            app,
            &format!("/api/ids/description?recipient={PEER}&elementId=urn%3Ax%3A2"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).expect("json");
        assert!(json["header"].as_str().expect("header").contains("ids:RejectionMessage"));
        assert_eq!(json["payload"], "Request was rejected.");
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_expectation_failed() {
        let (status, _, body) = post(
            app(FnTransport::unreachable()),
            &format!("/api/ids/description?recipient={PEER}"),
        )
        .await;

        assert_eq!(status, StatusCode::EXPECTATION_FAILED);
        assert!(body.contains("Failed to send IDS message."));
    }

    #[tokio::test]
    async fn test_unauthorized_peer() {
        let (status, _, _) = post(
            app(FnTransport::unauthorized()),
            &format!("/api/ids/description?recipient={PEER}"),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_internal_failure() {
        let connector = Connector::builder()
            .connector_id("https://connector.example")
            .transport(Arc::new(FnTransport::responding(description_response(
                RESOURCE,
            ))))
            .deserializer(Arc::new(FailingDeserializer))
            .build()
            .expect("connector");

        let (status, _, body) = post(
            router(connector),
            &format!("/api/ids/description?recipient={PEER}"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("deserializer crashed"));
    }

    #[tokio::test]
    async fn test_missing_recipient_is_bad_request() {
        let (status, _, _) = post(
            app(FnTransport::unreachable()),
            "/api/ids/description?elementId=urn%3Ax%3A1",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_artifact_returns_raw_data() {
        let envelope = crate::test_support::response("ids:ArtifactResponseMessage", Some("42"));
        let (status, _, body) = post(
            app(FnTransport::responding(envelope)),
            &format!("/api/ids/artifact?recipient={PEER}&requestedArtifact=urn%3Aartifact%3A1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }
}
