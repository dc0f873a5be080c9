// ── Stream consumer ──
//
// Drains one `GetAll` stream into an ordered list. The read is
// all-or-nothing: the first failure discards everything received so far.

use cvaas_api::{Resource, ResultStream};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::deadline::Deadline;
use crate::error::CoreError;

/// Read `stream` to its clean end, decoding each value as `W` and mapping
/// it into `R` in arrival order.
pub async fn drain<W, R>(
    resource: Resource,
    stream: ResultStream<'_>,
    deadline: &Deadline,
) -> Result<Vec<R>, CoreError>
where
    W: DeserializeOwned,
    R: From<W>,
{
    let records = deadline.run(collect::<W, R>(resource, stream)).await??;
    info!(%resource, count = records.len(), "stream drained");
    Ok(records)
}

async fn collect<W, R>(resource: Resource, mut stream: ResultStream<'_>) -> Result<Vec<R>, CoreError>
where
    W: DeserializeOwned,
    R: From<W>,
{
    let mut records = Vec::new();

    while let Some(item) = stream.next().await {
        let result = item.map_err(|e| CoreError::from_stream_read(resource, e))?;
        debug!(%resource, kind = ?result.kind, "stream element");

        let wire: W = serde_json::from_value(result.value).map_err(|e| {
            CoreError::from_stream_read(
                resource,
                cvaas_api::Error::Deserialization {
                    message: e.to_string(),
                    body: String::new(),
                },
            )
        })?;
        records.push(R::from(wire));
    }

    Ok(records)
}
