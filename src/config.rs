use crate::error::{CodeReviewError, Result};
use code_review_common::{DEFAULT_LANGUAGE, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "CODE_REVIEW_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub default_model: String,
    pub default_language: String,
    pub storage_quota_bytes: usize,
    /// 履歴・表示設定の保存先（省略時はデータディレクトリ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".into(),
            timeout_seconds: 60,
            default_model: DEFAULT_MODEL.into(),
            default_language: DEFAULT_LANGUAGE.into(),
            storage_quota_bytes: 5 * 1024 * 1024,  // ブラウザの localStorage 相当
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        // 環境変数を優先
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint;
            }
        }

        Ok(config)
    }

    /// 指定パスから読み込む（無ければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CodeReviewError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("code-review").join("config.json"))
    }

    /// 履歴ファイルなどの保存先
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|dir| dir.join("code-review"))
            .ok_or_else(|| CodeReviewError::Config("データディレクトリが見つかりません".into()))
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        let trimmed = endpoint.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CodeReviewError::Config(format!(
                "エンドポイントは http:// または https:// で始めてください: {}",
                endpoint
            )));
        }
        self.endpoint = trimmed.to_string();
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(CodeReviewError::Config("タイムアウトは1秒以上を指定してください".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }

    pub fn set_default_model(&mut self, model: String) -> Result<()> {
        if !code_review_common::models::is_known_model(&model) {
            return Err(CodeReviewError::Config(format!("未対応のモデル: {}", model)));
        }
        self.default_model = model;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.default_model, "gpt-5-nano");
        assert_eq!(config.default_language, "java");
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set_endpoint("https://review.example.com/".into()).unwrap();
        config.set_timeout(90).unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, "https://review.example.com");
        assert_eq!(loaded.timeout_seconds, 90);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeout_seconds": 30}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = Config::default();
        assert!(config.set_endpoint("localhost:8080".into()).is_err());
        assert!(config.set_timeout(0).is_err());
        assert!(config.set_default_model("gpt-99".into()).is_err());
        assert!(config.set_default_model("gpt-4o-mini".into()).is_ok());
    }
}
