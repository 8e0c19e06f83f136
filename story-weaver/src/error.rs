//! Error definitions for the client and the binaries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("{var} not found in .env file or environment variables.")]
    MissingApiKey { var: &'static str },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// 是否为配置类错误（在发起网络请求前即可检测）。
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::MissingApiKey { .. } | Self::InvalidConfig { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
