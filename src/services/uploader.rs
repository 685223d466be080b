use crate::config::constants::MAX_FILES_PER_UPLOAD;
use crate::models::category::allowed_extension;
use crate::models::Notice;
use crate::services::storage::StorageError;
use crate::utils::io::{sanitize_filename, stream_to_file};
use axum::BoxError;
use bytes::Bytes;
use futures::Stream;
use std::path::Path;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Debug, PartialEq)]
pub enum Rejection {
    EmptyName,
    Unsupported,
}

/// Tally of one upload request.
#[derive(Debug, Default)]
pub struct UploadReport {
    fields: usize,
    selected: usize,
    rejected: usize,
    discarded: usize,
    pub stored: Vec<String>,
}

impl UploadReport {
    pub fn new() -> UploadReport {
        UploadReport::default()
    }

    /// Registers a file field and tells whether it is within the batch cap.
    pub fn admit(&mut self, filename: &str) -> bool {
        self.fields += 1;
        if !filename.is_empty() {
            self.selected += 1;
        }
        if self.fields > MAX_FILES_PER_UPLOAD {
            self.discarded += 1;
            return false;
        }
        true
    }

    pub fn reject(&mut self, reason: Rejection) {
        if reason == Rejection::Unsupported {
            self.rejected += 1;
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        if self.selected == 0 {
            return vec![Notice::NoFileSelected];
        }

        let mut notices = Vec::new();
        if self.discarded > 0 {
            notices.push(Notice::Capped(MAX_FILES_PER_UPLOAD));
        }
        match self.stored.len() {
            0 => notices.push(Notice::NoValidFile),
            n => {
                notices.push(Notice::Uploaded(n));
                if self.rejected > 0 {
                    notices.push(Notice::Rejected(self.rejected));
                }
            }
        }
        notices
    }
}

/// Checks a submitted filename and returns the extension to store it under.
pub fn accept(filename: &str) -> Result<String, Rejection> {
    if filename.is_empty() {
        return Err(Rejection::EmptyName);
    }
    allowed_extension(filename).ok_or(Rejection::Unsupported)
}

/// Writes one upload to `dir` under a fresh `<uuid>.<extension>` name and
/// returns that name. The client's filename is only kept for the log.
pub async fn store<S, E>(
    dir: &Path,
    filename: &str,
    extension: &str,
    stream: S,
) -> Result<String, StorageError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
    let path = dir.join(&stored_name);
    debug!("writing {} to {}", sanitize_filename(filename), path.display());

    match stream_to_file(&path, stream).await {
        Ok(written) => {
            info!(
                "stored {} as {} ({} bytes)",
                sanitize_filename(filename),
                stored_name,
                written
            );
            Ok(stored_name)
        }
        Err(e) => {
            error!("failed to write {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}

pub fn log_rejection(filename: &str, reason: &Rejection) {
    match reason {
        Rejection::EmptyName => debug!("skipping file field without a filename"),
        Rejection::Unsupported => warn!(
            "rejected {}: unsupported file type",
            sanitize_filename(filename)
        ),
    }
}
