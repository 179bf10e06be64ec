use axum::{
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::server::error::ApiError;

const INDEX: &str = "index.html";

// Embed the guestbook front end at compile time
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct GuestbookAssets;

/// Router fallback: serve the embedded guestbook front end
pub async fn serve_static(method: Method, uri: Uri) -> Response {
    serve_assets::<GuestbookAssets>(method, uri).await
}

/// Serve `E` for GET/HEAD requests that matched no route; other methods get a JSON 404
pub async fn serve_assets<E: RustEmbed>(method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return ApiError::RouteNotFound.into_response();
    }
    serve_spa::<E>(uri.path())
}

/// Generic SPA serving function with fallback to index.html
pub fn serve_spa<E: RustEmbed>(path: &str) -> Response {
    let path = path.trim_start_matches('/');

    // If path is empty, serve index.html
    let path = if path.is_empty() { INDEX } else { path };

    if let Some(content) = E::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response();
    }

    // SPA fallback: anything that is not a real asset gets the index page,
    // so client-side routes resolve
    match E::get(INDEX) {
        Some(content) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content.data,
        )
            .into_response(),
        None => {
            tracing::error!(path, "{} missing from embedded assets", INDEX);
            (StatusCode::INTERNAL_SERVER_ERROR, "index.html not found").into_response()
        }
    }
}
