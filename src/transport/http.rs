//! IDS multipart messages over HTTP(S).
//!
//! Each request is a single `POST` to the recipient URL with a
//! `multipart/form-data` body:
//!
//! | Part | Content-Type | Content |
//! |------|--------------|---------|
//! | `header` | `application/ld+json` | [`MessageHeader`] |
//!
//! The response must be multipart as well; it is decoded into a
//! [`ResponseEnvelope`] without interpreting the header.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identifiers::Recipient;
use crate::protocol::{
    HEADER_PART, Issuer, MessageHeader, RequestMessage, ResponseEnvelope, multipart,
};

use super::MessageTransport;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for a complete request/response round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type of the header part.
const JSON_LD: &str = "application/ld+json";

// ============================================================================
// HttpTransport
// ============================================================================

/// Sends IDS messages as multipart HTTP requests.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    /// HTTP client with the request timeout applied.
    client: Client,
    /// Identity stated in outbound headers.
    issuer: Issuer,
    /// Configured round-trip timeout.
    timeout: Duration,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("issuer", &self.issuer.connector)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport with the default timeout (30s).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be created.
    pub fn new(issuer: Issuer) -> Result<Self> {
        Self::with_timeout(issuer, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a transport with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be created.
    pub fn with_timeout(issuer: Issuer, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            issuer,
            timeout,
        })
    }

    /// Returns the issuer stated in outbound headers.
    #[inline]
    #[must_use]
    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    /// Builds the multipart form for `message`.
    fn build_form(&self, recipient: &Recipient, message: &RequestMessage) -> Result<Form> {
        let header = MessageHeader::build(message, &self.issuer, recipient);
        debug!(message_id = %header.id(), kind = %message.kind(), %recipient, "Built message header");

        let header_part = Part::text(header.to_json()?)
            .mime_str(JSON_LD)
            .map_err(|e| Error::message_build(e.to_string()))?;

        Ok(Form::new().part(HEADER_PART, header_part))
    }

    /// Configured timeout in milliseconds, saturating at `u64::MAX`.
    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Maps a client error to a transport error.
    fn map_send_error(&self, recipient: &Recipient, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::request_timeout(recipient.as_url(), self.timeout_ms())
        } else if err.is_connect() || err.is_request() {
            Error::connection(recipient.as_url(), err.to_string())
        } else if err.is_builder() {
            Error::message_build(err.to_string())
        } else {
            Error::Http(err)
        }
    }
}

// ============================================================================
// MessageTransport Implementation
// ============================================================================

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn send(
        &self,
        recipient: &Recipient,
        message: &RequestMessage,
    ) -> Result<ResponseEnvelope> {
        let form = self.build_form(recipient, message)?;

        let response = self
            .client
            .post(recipient.as_url().clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(recipient, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%recipient, status = status.as_u16(), "Peer refused credentials");
            return Err(Error::unauthorized(recipient.as_url(), status.as_u16()));
        }
        if !status.is_success() {
            warn!(%recipient, status = status.as_u16(), "Peer answered with error status");
            return Err(Error::peer_status(recipient.as_url(), status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| Error::invalid_response("Response has no Content-Type"))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(recipient, e))?;

        debug!(%recipient, status = status.as_u16(), body_len = body.len(), "Received response");

        multipart::decode(&content_type, body).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Router;
    use axum::http::{HeaderMap, StatusCode as AxumStatus, header};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use tokio::net::TcpListener;
    use url::Url;

    const BOUNDARY: &str = "peerboundary";

    fn issuer() -> Issuer {
        let mut issuer = Issuer::new(Url::parse("https://connector.example").expect("url"));
        issuer.security_token = Some("token-123".to_string());
        issuer
    }

    fn multipart_response(header_json: &str, payload: &str) -> Response {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"header\"\r\n\r\n{header_json}\r\n\
             --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"payload\"\r\n\r\n{payload}\r\n\
             --{BOUNDARY}--\r\n"
        );
        (
            [(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )],
            body,
        )
            .into_response()
    }

    /// Echoes the received header part back as the payload.
    async fn echo_peer(headers: HeaderMap, body: String) -> Response {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with("multipart/form-data") {
            return AxumStatus::BAD_REQUEST.into_response();
        }
        multipart_response(r#"{"@type":"ids:DescriptionResponseMessage"}"#, &body)
    }

    async fn unauthorized_peer() -> AxumStatus {
        AxumStatus::UNAUTHORIZED
    }

    async fn broken_peer() -> AxumStatus {
        AxumStatus::BAD_GATEWAY
    }

    async fn json_peer() -> impl IntoResponse {
        ([(header::CONTENT_TYPE, "application/json")], "{}")
    }

    async fn slow_peer() -> AxumStatus {
        tokio::time::sleep(Duration::from_secs(2)).await;
        AxumStatus::OK
    }

    async fn spawn_peer() -> Url {
        let app = Router::new()
            .route("/echo", post(echo_peer))
            .route("/unauthorized", post(unauthorized_peer))
            .route("/broken", post(broken_peer))
            .route("/json", post(json_peer))
            .route("/slow", post(slow_peer));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Url::parse(&format!("http://{addr}/")).expect("url")
    }

    fn recipient(base: &Url, path: &str) -> Recipient {
        Recipient::new(base.join(path).expect("join"))
    }

    #[tokio::test]
    async fn test_send_description_request() {
        let base = spawn_peer().await;
        let transport = HttpTransport::new(issuer()).expect("transport");
        let element = "urn:x:1".parse().expect("element");

        let envelope = transport
            .send(
                &recipient(&base, "echo"),
                &RequestMessage::description(Some(element)),
            )
            .await
            .expect("send");

        let echoed = envelope.payload().expect("payload");
        assert!(echoed.contains("name=\"header\""));
        assert!(echoed.contains("ids:DescriptionRequestMessage"));
        assert!(echoed.contains("urn:x:1"));
        assert!(echoed.contains("token-123"));
        assert!(envelope.header().is_some());
    }

    #[tokio::test]
    async fn test_unauthorized_status() {
        let base = spawn_peer().await;
        let transport = HttpTransport::new(issuer()).expect("transport");

        let err = transport
            .send(&recipient(&base, "unauthorized"), &RequestMessage::description(None))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_error_status() {
        let base = spawn_peer().await;
        let transport = HttpTransport::new(issuer()).expect("transport");

        let err = transport
            .send(&recipient(&base, "broken"), &RequestMessage::description(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PeerStatus { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_non_multipart_response_is_invalid() {
        let base = spawn_peer().await;
        let transport = HttpTransport::new(issuer()).expect("transport");

        let err = transport
            .send(&recipient(&base, "json"), &RequestMessage::description(None))
            .await
            .unwrap_err();
        assert!(err.is_invalid_response());
    }

    #[tokio::test]
    async fn test_timeout() {
        let base = spawn_peer().await;
        let transport =
            HttpTransport::with_timeout(issuer(), Duration::from_millis(100)).expect("transport");

        let err = transport
            .send(&recipient(&base, "slow"), &RequestMessage::description(None))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_timeout_ms_saturates() {
        let transport =
            HttpTransport::with_timeout(issuer(), Duration::from_millis(1500)).expect("transport");
        assert_eq!(transport.timeout_ms(), 1500);

        let huge = HttpTransport {
            timeout: Duration::MAX,
            ..transport
        };
        assert_eq!(huge.timeout_ms(), u64::MAX);
    }

    #[tokio::test]
    async fn test_unreachable_peer() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let transport = HttpTransport::new(issuer()).expect("transport");
        let unreachable: Recipient = format!("http://{addr}/ids").parse().expect("recipient");

        let err = transport
            .send(&unreachable, &RequestMessage::description(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
        assert!(err.is_transport_error());
    }
}
