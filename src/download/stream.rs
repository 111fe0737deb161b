//! Response body -> file, without holding the body in memory

use futures_util::StreamExt;
use reqwest::Response;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::progress::{ProgressSink, ProgressThrottle};

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("transfer interrupted: {0}")]
    Source(String),

    #[error("failed to write {path}: {source}")]
    Sink {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Stream `response` into `dest` and return the size written.
///
/// On any error from the network or the filesystem the partial file is
/// removed before the error is returned.
pub async fn download_to_file(
    response: Response,
    dest: &Path,
    progress: Option<ProgressSink<'_>>,
) -> Result<u64, StreamError> {
    match copy_body(response, dest, progress.as_ref()).await {
        Ok(size) => Ok(size),
        Err(err) => {
            warn!(path = %dest.display(), error = %err, "Download failed, removing partial file");
            if let Err(e) = tokio::fs::remove_file(dest).await {
                debug!(path = %dest.display(), error = %e, "Partial file cleanup failed");
            }
            Err(err)
        }
    }
}

async fn copy_body(
    response: Response,
    dest: &Path,
    progress: Option<&ProgressSink<'_>>,
) -> Result<u64, StreamError> {
    let sink_error = |source: std::io::Error| StreamError::Sink {
        path: dest.display().to_string(),
        source,
    };

    let total = response.content_length();
    let mut file = File::create(dest).await.map_err(sink_error)?;
    let mut stream = response.bytes_stream();
    let mut throttle = progress.map(|p| ProgressThrottle::new(p.interval));
    let mut received = 0u64;

    // the next chunk is only pulled once the previous one is written
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| StreamError::Source(e.to_string()))?;
        file.write_all(&chunk).await.map_err(sink_error)?;
        received += chunk.len() as u64;

        if let (Some(sink), Some(throttle)) = (progress, throttle.as_mut()) {
            if throttle.ready(Instant::now()) {
                sink.log.progress(sink.key, received, total);
            }
        }
    }

    file.flush().await.map_err(sink_error)?;
    drop(file);

    let size = tokio::fs::metadata(dest).await.map_err(sink_error)?.len();
    if let Some(sink) = progress {
        sink.log.progress(sink.key, size, Some(size));
    }

    debug!(path = %dest.display(), size, "Download completed");
    Ok(size)
}
