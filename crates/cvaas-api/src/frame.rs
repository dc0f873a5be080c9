// Newline-delimited frame decoding for server-streaming calls.
//
// The gateway writes one JSON object per line: `{"result": {...}}` for each
// streamed element, or `{"error": {...}}` when the stream fails after the
// response headers were already sent.

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One element of a `GetAll` stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamResult {
    /// The resource state, decoded by the caller into its wire type.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Timestamp of the state, as reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Notification type (`INITIAL`, `UPDATED`, ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Status object carried by error frames and non-2xx bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
struct Frame {
    #[serde(default)]
    result: Option<StreamResult>,
    #[serde(default)]
    error: Option<RpcStatus>,
}

/// Turn a raw byte stream into a stream of decoded results.
///
/// Chunk boundaries need not line up with frame boundaries; bytes are
/// buffered until a full line is available. The stream ends after the first
/// error it yields.
pub fn decode_frames<S, E>(bytes: S) -> impl Stream<Item = Result<StreamResult, Error>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send,
    E: Into<Error> + Send,
{
    async_stream::try_stream! {
        let mut buf = BytesMut::new();
        let mut bytes = Box::pin(bytes);

        while let Some(chunk) = bytes.next().await {
            let chunk: Bytes = chunk.map_err(Into::<Error>::into)?;
            buf.extend_from_slice(&chunk);

            while let Some(pos) = buf.iter().position(|b| *b == b'\n') {
                let line = buf.split_to(pos + 1);
                if let Some(result) = parse_line(&line)? {
                    yield result;
                }
            }
        }

        // Trailing frame without a final newline.
        if let Some(result) = parse_line(&buf)? {
            yield result;
        }
    }
}

/// Decode a single frame line. Blank lines are skipped.
fn parse_line(line: &[u8]) -> Result<Option<StreamResult>, Error> {
    let text = std::str::from_utf8(line)
        .map_err(|e| Error::Deserialization {
            message: format!("frame is not valid UTF-8: {e}"),
            body: String::from_utf8_lossy(line).into_owned(),
        })?
        .trim();

    if text.is_empty() {
        return Ok(None);
    }

    let frame: Frame = serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: text.to_owned(),
    })?;

    match frame {
        Frame {
            error: Some(status), ..
        } => Err(Error::Rpc {
            code: status.code,
            message: status.message,
            status: None,
        }),
        Frame {
            result: Some(result),
            ..
        } => Ok(Some(result)),
        Frame { .. } => Err(Error::Deserialization {
            message: "frame carries neither result nor error".into(),
            body: text.to_owned(),
        }),
    }
}
