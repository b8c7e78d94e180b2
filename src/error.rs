use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not bind to {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        log::error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
    }
}
