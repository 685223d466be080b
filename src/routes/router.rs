use crate::controllers::files::__path_download;
use crate::controllers::files::__path_list_files;
use crate::controllers::files::{download, list_files};
use crate::controllers::health::__path_health;
use crate::controllers::health::health;
use crate::controllers::index::__path_index;
use crate::controllers::index::__path_upload;
use crate::controllers::index::{index, upload};
use crate::models::health_dto::Health;
use crate::models::{CategorizedListing, Category};
use crate::services::storage::StorageDir;
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use tower_http::trace;
use tower_http::trace::TraceLayer;
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub storage: StorageDir,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        index,
        upload,
        download,
        list_files,
        health
    ),
    components(
        schemas(CategorizedListing, Category, Health)
    ),
    tags(
        (name = "files", description = "Upload, listing and retrieval"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

/// `body_limit` caps request bodies in bytes; `None` leaves uploads unbounded.
pub fn create_routes(state: AppState, body_limit: Option<usize>) -> Router {
    let body_limit = match body_limit {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(index).post(upload))
        .route("/uploads/{name}", get(download))
        .route("/api/files", get(list_files))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(body_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_openapi_document() {
        let dir = tempdir().unwrap();
        let app = create_routes(
            AppState {
                storage: StorageDir::new(dir.path().to_path_buf()),
            },
            None,
        );

        let req = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        for path in ["/", "/uploads/{name}", "/api/files", "/health"] {
            assert!(doc["paths"][path].is_object(), "{path}");
        }
    }

    #[tokio::test]
    async fn test_body_limit() {
        let dir = tempdir().unwrap();
        let app = create_routes(
            AppState {
                storage: StorageDir::new(dir.path().to_path_buf()),
            },
            Some(1024),
        );

        let boundary = "----LimitBoundary";
        let mut body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"big.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n"
        )
        .into_bytes();
        body.extend(vec![b'x'; 4096]);
        body.extend(format!("\r\n--{boundary}--\r\n").as_bytes());
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();

        assert_ne!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.status().is_client_error() || response.status().is_server_error());
    }
}
