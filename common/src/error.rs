//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// ストレージ容量超過（書き込み拒否）
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
}

impl Error {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Error::QuotaExceeded { .. })
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
