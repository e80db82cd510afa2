//! Multipart decoding of IDS responses.
//!
//! Peers answer with a `multipart/form-data` (or `multipart/mixed`) body
//! whose named parts become the entries of a [`ResponseEnvelope`].

// ============================================================================
// Imports
// ============================================================================

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::stream;
use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::envelope::ResponseEnvelope;

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a multipart response body.
///
/// # Arguments
///
/// * `content_type` - The response `Content-Type` header (must carry a boundary)
/// * `body` - The complete response body
///
/// # Errors
///
/// - [`Error::InvalidResponse`] if the content type has no boundary or the
///   body has no `header` part
/// - [`Error::Multipart`] if the body is not valid multipart
pub async fn decode(content_type: &str, body: Bytes) -> Result<ResponseEnvelope> {
    let boundary = multer::parse_boundary(content_type).map_err(|e| {
        Error::invalid_response(format!("Response is not multipart ({content_type}): {e}"))
    })?;

    trace!(body_len = body.len(), "Decoding multipart response");

    let body_stream = stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);
    let mut envelope = ResponseEnvelope::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            debug!("Skipping unnamed multipart part");
            continue;
        };

        let content = field.text().await?;
        trace!(part = %name, len = content.len(), "Decoded part");
        envelope.insert(name, content);
    }

    if envelope.header().is_none() {
        return Err(Error::invalid_response("Response has no header part"));
    }

    Ok(envelope)
}

// ============================================================================
// Tests
// ============================================================================
