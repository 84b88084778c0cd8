//! localStorage によるキー・バリューストレージ

use code_review_common::error::{Error, Result};
use code_review_common::{HistoryStore, KeyValueStore};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// ブラウザの localStorage
///
/// 状態は持たないので、必要な場面でその都度開く。
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// localStorage が使えなければ None
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

/// 履歴サービスを開く
pub fn open_history() -> Option<HistoryStore<LocalStore>> {
    LocalStore::open().map(HistoryStore::new)
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<DomException>()
        .map(|e| format!("{}: {}", e.name(), e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

fn is_quota_error(value: &JsValue) -> bool {
    value
        .dyn_ref::<DomException>()
        .is_some_and(|e| e.name() == "QuotaExceededError" || e.code() == DomException::QUOTA_EXCEEDED_ERR)
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| Error::Storage(describe(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(|e| {
            if is_quota_error(&e) {
                Error::QuotaExceeded { key: key.to_string() }
            } else {
                Error::Storage(describe(&e))
            }
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| Error::Storage(describe(&e)))
    }
}
