use super::PresenceHandle;
use crate::reading::RawReading;
use anyhow::{Context, Result};
use futures::StreamExt;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;
use tracing::{info, warn};

/// Why `feed_lines` returned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedEnd {
    EndOfInput,
    Shutdown,
}

/// Submit JSON-line readings (`{"id":[192,5,31,59],"timestamp_ms":1000}`)
/// from `reader` until it ends or `shutdown` resolves.
///
/// `shutdown` is also raced against each submit, so a full command queue
/// cannot hold off an interrupt.
pub async fn feed_lines<R, F>(reader: R, handle: &PresenceHandle, shutdown: F) -> Result<FeedEnd>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = LinesStream::new(reader.lines());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next() => {
                let line = match line {
                    Some(line) => line.context("Failed to read input")?,
                    None => {
                        info!("End of input");
                        return Ok(FeedEnd::EndOfInput);
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                let reading = match serde_json::from_str::<RawReading>(&line) {
                    Ok(reading) => reading,
                    Err(e) => {
                        warn!(error = %e, line = %line, "Skipping malformed reading");
                        continue;
                    }
                };
                tokio::select! {
                    result = handle.submit(reading) => result?,
                    _ = &mut shutdown => {
                        warn!("Interrupted while the command queue was full");
                        return Ok(FeedEnd::Shutdown);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted");
                return Ok(FeedEnd::Shutdown);
            }
        }
    }
}
