use axum::BoxError;
use bytes::Bytes;
use futures::Stream;
use futures::TryStreamExt;
use std::io;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::{fs::File, io::BufWriter};
use tokio_util::io::StreamReader;

/// Copies `stream` into a new file at `path` and returns the number of bytes
/// written. A failed copy leaves whatever was written so far on disk.
pub async fn stream_to_file<S, E>(path: &Path, stream: S) -> io::Result<u64>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    // Convert the stream into an AsyncRead.
    let body_with_io_error = stream.map_err(io::Error::other);
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    // Create the file. File implements AsyncWrite.
    let mut file = BufWriter::new(File::create(path).await?);

    // Copy the body into the file.
    let written = tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(written)
}

/// Reduces a client supplied filename to a plain ASCII basename: directory
/// parts are dropped, whitespace becomes `_`, and anything outside
/// `[A-Za-z0-9._-]` is removed. Leading dots and underscores are trimmed so the
/// result can never be `..` or a hidden file.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let joined = basename.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
