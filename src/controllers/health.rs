use crate::models::health_dto::Health;
use crate::routes::router::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = Health),
        (status = 503, description = "Storage directory is not readable")
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>, StatusCode> {
    // Check the storage directory can still be listed
    let storage = state.storage.path();
    let storage_status = match tokio::fs::read_dir(&storage).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("storage directory {} unavailable: {}", storage.display(), e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    Ok(Json(Health {
        status: "ok".to_string(),
        storage: storage_status.to_string(),
    }))
}
