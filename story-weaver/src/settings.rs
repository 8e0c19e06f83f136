//! Startup configuration: `.env` file first, then the process environment.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// API Key 环境变量。
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// 可选：覆盖 API 基础 URL。
pub const BASE_URL_VAR: &str = "GENAI_BASE_URL";
/// 可选：覆盖 API 版本。
pub const API_VERSION_VAR: &str = "GENAI_API_VERSION";

/// 进程启动时读取一次的配置。
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Settings {
    /// 加载当前目录（及上级目录）中的 `.env`，再读取环境变量。
    ///
    /// # Errors
    /// 当 API Key 缺失或为空时返回错误。
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(err) => log_dotenv_error(&err),
        }
        Self::from_env()
    }

    /// 加载指定 `.env` 文件，再读取环境变量。文件不存在时仅使用环境变量。
    ///
    /// # Errors
    /// 当 API Key 缺失或为空时返回错误。
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match dotenvy::from_path(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(err) => log_dotenv_error(&err),
        }
        Self::from_env()
    }

    /// 仅从进程环境变量读取配置。
    ///
    /// # Errors
    /// 当 API Key 缺失或为空时返回错误。
    pub fn from_env() -> Result<Self> {
        let api_key = non_blank_var(API_KEY_VAR).ok_or(Error::MissingApiKey { var: API_KEY_VAR })?;
        Ok(Self {
            api_key,
            base_url: non_blank_var(BASE_URL_VAR),
            api_version: non_blank_var(API_VERSION_VAR),
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn log_dotenv_error(err: &dotenvy::Error) {
    if err.not_found() {
        tracing::debug!("no .env file found");
    } else {
        tracing::warn!(error = %err, "ignoring unreadable .env file");
    }
}
