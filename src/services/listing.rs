use crate::models::CategorizedListing;
use crate::services::storage::StorageError;
use std::path::Path;

/// Groups every entry of `dir` by category. Subdirectories are listed like
/// files and nothing is sorted. A missing or unreadable directory is an error.
pub async fn build_listing(dir: &Path) -> Result<CategorizedListing, StorageError> {
    let mut listing = CategorizedListing::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        listing.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(listing)
}
