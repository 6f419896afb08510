// Chunked render-event streaming: 4-byte big-endian length + JSON payload
use crate::infrastructure::http_response::brotli_compress;
use crate::infrastructure::surface_store::RenderEvent;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

pub const CHUNKED_CONTENT_TYPE: &str = "application/x-dashboard-chunks";

/// Create a chunked streaming response of render events
pub fn chunked_event_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = RenderEvent> + Send + 'static,
{
    let byte_stream =
        stream.then(move |event| async move { serialize_chunk(&event, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed one by one, so no Content-Encoding on the response
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, CHUNKED_CONTENT_TYPE)
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single RenderEvent to a chunk
pub async fn serialize_chunk(event: &RenderEvent, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(event)?;

    let payload = if compress {
        brotli_compress(buffer).await?
    } else {
        buffer
    };

    let length = u32::try_from(payload.len())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "chunk too large"))?;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Stream render events from a store subscription. Lagged receivers skip
/// the missed events; the next chunk still carries a full rendering.
pub fn stream_from_receiver(
    rx: broadcast::Receiver<RenderEvent>,
    compress: bool,
) -> impl IntoResponse {
    let events = BroadcastStream::new(rx);
    let stream = async_stream::stream! {
        futures::pin_mut!(events);
        while let Some(item) = events.next().await {
            match item {
                Ok(event) => yield event,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Render stream lagged");
                }
            }
        }
    };

    match chunked_event_stream(stream, compress) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
