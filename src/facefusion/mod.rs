//! Client for the Tencent Cloud face-fusion API, plus the base64 image codec it relies on.

pub mod client;
pub mod codec;
pub mod config;
pub mod signing;

use thiserror::Error;

pub use client::FaceFusionClient;
pub use codec::{decode_image, encode_image};
pub use config::FaceFusionConfig;

#[derive(Debug, Error)]
pub enum FusionError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("face fusion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed face fusion payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("face fusion API error {code}: {message}")]
    Api { code: String, message: String },
    #[error("face fusion response carried no image")]
    MissingImage,
    #[error("face fusion config: {0}")]
    Config(String),
}
