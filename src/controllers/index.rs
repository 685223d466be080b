use crate::config::constants::FLASH_COOKIE;
use crate::models::notice_dto::{decode_notices, encode_notices};
use crate::routes::router::AppState;
use crate::services::listing::build_listing;
use crate::services::uploader::{self, UploadReport};
use crate::views;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{error, info};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Uploaded files grouped by category"),
        (status = 500, description = "Storage directory unreadable")
    ),
    tag = "files"
)]
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), (StatusCode, String)> {
    let notices = jar
        .get(FLASH_COOKIE)
        .map(|c| decode_notices(c.value()))
        .unwrap_or_default();

    let listing = build_listing(&state.storage.path()).await.map_err(|e| {
        error!("{}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    Ok((jar, Html(views::index_page(&listing, &notices))))
}

#[utoipa::path(
    post,
    path = "/",
    request_body(
        content_type = "multipart/form-data",
        description = "Up to 9 files in `files` fields, or one in a `file` field"
    ),
    responses(
        (status = 303, description = "Upload processed, outcome carried in the flash cookie"),
        (status = 400, description = "Malformed multipart body"),
        (status = 500, description = "A file could not be written")
    ),
    tag = "files"
)]
pub async fn upload(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), (StatusCode, String)> {
    let mut report = UploadReport::new();
    // Taken once so a concurrent directory change cannot split a batch
    let dir = state.storage.path();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if !matches!(field.name(), Some("file" | "files")) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();

        if !report.admit(&filename) {
            continue;
        }

        match uploader::accept(&filename) {
            Ok(extension) => {
                let stored = uploader::store(&dir, &filename, &extension, field)
                    .await
                    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
                report.stored.push(stored);
            }
            Err(reason) => {
                uploader::log_rejection(&filename, &reason);
                report.reject(reason);
            }
        }
    }

    let notices = report.notices();
    info!("upload finished: {}", encode_notices(&notices));

    let cookie = Cookie::build((FLASH_COOKIE, encode_notices(&notices)))
        .path("/")
        .http_only(true);
    Ok((jar.add(cookie), Redirect::to("/")))
}
