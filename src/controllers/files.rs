use crate::models::CategorizedListing;
use crate::routes::router::AppState;
use crate::services::listing::build_listing;
use crate::services::storage::{open_stored, StorageError};
use axum::{
    body::Body,
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::Response,
};
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

#[utoipa::path(
    get,
    path = "/uploads/{name}",
    params(
        ("name" = String, Path, description = "Generated name of a stored file")
    ),
    responses(
        (status = 200, description = "Raw file content"),
        (status = 400, description = "Name escapes the storage directory"),
        (status = 404, description = "No such file")
    ),
    tag = "files"
)]
pub async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let (file, len) = open_stored(&state.storage, &name)
        .await
        .map_err(|e| match e {
            StorageError::InvalidName => {
                debug!("refusing to serve {:?}", name);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            StorageError::NotFound => (StatusCode::NOT_FOUND, e.to_string()),
            StorageError::Io(_) => {
                error!("{}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        })?;

    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, len)
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Uploaded files grouped by category", body = CategorizedListing),
        (status = 500, description = "Storage directory unreadable")
    ),
    tag = "files"
)]
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<CategorizedListing>, (StatusCode, String)> {
    build_listing(&state.storage.path())
        .await
        .map(Json)
        .map_err(|e| {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}
