//! Best-effort download of dataset attachments

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use super::file_name_is_safe;
use super::stream::{StreamError, download_to_file};
use crate::http::{HttpClient, HttpError};
use crate::humanize::ByteSize;
use crate::models::{AttachmentFile, AttachmentRef};
use crate::observability::TaskLog;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("\"{0}\" is not a usable file name")]
    UnsafeName(String),

    #[error("\"{0}\" would overwrite the dataset export")]
    ExportCollision(String),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Download every attachment into `tmp_dir`, one at a time.
///
/// Each file is named after the attachment title. An attachment that fails
/// is logged and left out of the result; it never fails the batch.
/// `export` is the already written export file, which no attachment may
/// replace.
pub async fn fetch_all(
    client: &HttpClient,
    attachments: &[AttachmentRef],
    tmp_dir: &Path,
    export: &Path,
    log: &dyn TaskLog,
) -> Vec<AttachmentFile> {
    let mut files = Vec::with_capacity(attachments.len());

    for attachment in attachments {
        let title = &attachment.metas.title;
        match fetch_one(client, attachment, tmp_dir, export).await {
            Ok((file, size)) => {
                info!(title = %title, size, "Attachment downloaded");
                log.info(&format!(
                    "Attachment \"{}\" downloaded ({})",
                    title,
                    ByteSize(size)
                ));
                files.push(file);
            }
            Err(err) => {
                warn!(title = %title, url = %attachment.metas.url, error = %err, "Attachment skipped");
                log.error(&format!(
                    "Failed to download attachment \"{}\": {}",
                    title, err
                ));
            }
        }
    }

    files
}

async fn fetch_one(
    client: &HttpClient,
    attachment: &AttachmentRef,
    tmp_dir: &Path,
    export: &Path,
) -> Result<(AttachmentFile, u64), AttachmentError> {
    let title = &attachment.metas.title;
    if !file_name_is_safe(title) {
        return Err(AttachmentError::UnsafeName(title.clone()));
    }

    let dest = tmp_dir.join(title);
    if dest == export {
        return Err(AttachmentError::ExportCollision(title.clone()));
    }

    let response = client.get_stream(&attachment.metas.url, &[]).await?;
    let size = download_to_file(response, &dest, None).await?;

    Ok((
        AttachmentFile {
            title: title.clone(),
            file_path: dest.to_string_lossy().into_owned(),
        },
        size,
    ))
}
