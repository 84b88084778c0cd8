//! Code Review CLI Library
//!
//! 設定・レビューAPIクライアント・履歴ファイル・端末表示・エクスポート

pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod source;
pub mod storage;

pub use client::ReviewClient;
pub use config::Config;
pub use error::{CodeReviewError, Result};
pub use storage::FileStore;
