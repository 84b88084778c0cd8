//! localStorage 上の履歴・表示設定（ブラウザで実行）
//!
//! `wasm-pack test --headless --firefox web-wasm`

#![cfg(target_arch = "wasm32")]

use code_review_common::history::HISTORY_KEY;
use code_review_common::prefs::{self, LayoutMode};
use code_review_common::{AnalysisResult, HistoryStore, KeyValueStore, SectionContent};
use code_review_web::store::{open_history, LocalStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn reset() -> LocalStore {
    let mut store = LocalStore::open().expect("localStorage が使えない");
    store.remove_item(HISTORY_KEY).unwrap();
    store
}

#[wasm_bindgen_test]
fn test_local_store_round_trip() {
    let mut store = reset();
    store.set_item("code-review-test", "value").unwrap();
    assert_eq!(store.get_item("code-review-test").unwrap().as_deref(), Some("value"));
    store.remove_item("code-review-test").unwrap();
    assert_eq!(store.get_item("code-review-test").unwrap(), None);
}

#[wasm_bindgen_test]
fn test_history_on_local_storage() {
    let store = reset();
    let mut history = HistoryStore::new(store);
    let result = AnalysisResult {
        issues: SectionContent::from(vec!["Use snake_case"]),
        ..Default::default()
    };

    let entry = history.save_review("def f():\n pass", "python", "gpt-5-nano", &result);
    let reopened = open_history().expect("localStorage が使えない");
    assert_eq!(reopened.restore_entry(entry.id), Some(entry));
}

#[wasm_bindgen_test]
fn test_layout_preference_on_local_storage() {
    let mut store = reset();
    prefs::save_layout(&mut store, LayoutMode::FocusMode);
    assert_eq!(prefs::load_layout(&store), Some(LayoutMode::FocusMode));
}
