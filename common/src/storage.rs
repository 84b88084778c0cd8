//! キー・バリュー形式の永続ストレージ
//!
//! 履歴・設定の保存先を抽象化する。
//! ブラウザでは localStorage、CLIではJSONファイル、テストではメモリ上の実装を使う。

use crate::error::{Error, Result};
use std::collections::HashMap;

/// 文字列キー・文字列値のストレージ
///
/// 書き込みは容量超過時に [`Error::QuotaExceeded`] を返しうる。
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストレージ（容量制限つき）
///
/// 容量はキーと値のバイト数の合計で数える。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量制限つきで作成
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// 使用中のバイト数
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            let current = self.items.get(key).map_or(0, |old| key.len() + old.len());
            let projected = self.used_bytes() - current + key.len() + value.len();
            if projected > quota {
                return Err(Error::QuotaExceeded { key: key.to_string() });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
