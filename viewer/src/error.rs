use thiserror::Error;

/// Message shown for any non-success HTTP status.
pub const ORDER_NOT_FOUND: &str = "Order not found";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", ORDER_NOT_FOUND)]
    NotFound { status: u16 },

    #[error("invalid order URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed order body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct RenderError(#[from] pub tera::Error);
