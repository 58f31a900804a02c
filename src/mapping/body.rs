//! Body buffering.

use axum::body::{Body, Bytes};

use crate::error::EchoError;

/// Read the whole body and put an identical, unread copy back in its place.
///
/// Any read error is fatal to the caller; the original stream is gone by then.
pub async fn buffer_body(body: &mut Body) -> Result<Bytes, EchoError> {
    let stream = std::mem::take(body);

    let bytes = axum::body::to_bytes(stream, usize::MAX)
        .await
        .map_err(|e| EchoError::BodyReadFailure(e.to_string()))?;

    *body = Body::from(bytes.clone());
    Ok(bytes)
}
