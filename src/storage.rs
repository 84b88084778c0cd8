//! JSONファイルによるキー・バリューストレージ
//!
//! 1ファイルにキーと値のオブジェクトとして保存する。
//! 操作ごとにファイルを読み直すのでキャッシュは持たない。

use code_review_common::error::{Error, Result};
use code_review_common::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// ストレージファイル名
pub const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: usize,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            path: path.into(),
            quota_bytes,
        }
    }

    /// データディレクトリ内の既定ファイルを使う
    pub fn in_dir(dir: &Path, quota_bytes: usize) -> Self {
        Self::new(dir.join(STORE_FILE_NAME), quota_bytes)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, content)?;
        debug!("ストレージ書き込み: {} ({} keys)", self.path.display(), items.len());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        let used: usize = items.iter().map(|(k, v)| k.len() + v.len()).sum();
        if used > self.quota_bytes {
            return Err(Error::QuotaExceeded { key: key.to_string() });
        }

        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
