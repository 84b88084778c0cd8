//! レビュー履歴
//!
//! 過去のレビュー（リクエストと結果の組）をキー・バリューストレージに保存する。
//! 新しい順に最大20件。超過分は古いものから捨てる。
//!
//! 読み込み・書き込みの失敗は呼び出し元に返さず、ログに残すだけにする。

use crate::error::Error;
use crate::storage::KeyValueStore;
use crate::types::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 履歴の保存キー
pub const HISTORY_KEY: &str = "code-review-history";
/// 保持する最大件数
pub const MAX_HISTORY_ITEMS: usize = 20;
/// プレビューの最大文字数（省略記号を除く）
pub const PREVIEW_MAX_CHARS: usize = 50;

/// 履歴エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,                   // 作成時刻(ms)。単調増加
    pub timestamp: DateTime<Utc>,
    pub code: String,
    pub language: String,
    pub model: String,
    pub result: AnalysisResult,
    pub preview: String,
}

impl HistoryEntry {
    /// 一覧表示用の相対時刻
    pub fn relative_time(&self, now: DateTime<Utc>) -> String {
        format_relative_time(self.timestamp, now)
    }
}

/// コードの1行目からプレビューを作る
///
/// 50文字を超える場合は先頭50文字 + "..."。
pub fn make_preview(code: &str) -> String {
    let first_line = code.lines().next().unwrap_or("").trim();
    if first_line.chars().count() > PREVIEW_MAX_CHARS {
        let truncated: String = first_line.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}

/// 経過時間を "Just now" / "5m ago" / "3h ago" / "2d ago" / 日付 で表す
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// 履歴サービス
///
/// ストレージを所有し、エントリの唯一の持ち主になる。呼び出し元にはクローンを返す。
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// 新しい順の履歴（読めなければ空）
    pub fn get_history(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get_item(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("履歴の読み込みに失敗: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.id.cmp(&a.id));
                entries
            }
            Err(e) => {
                warn!("履歴データが壊れています: {}", e);
                Vec::new()
            }
        }
    }

    /// 現在時刻でレビューを保存する
    pub fn save_review(
        &mut self,
        code: &str,
        language: &str,
        model: &str,
        result: &AnalysisResult,
    ) -> HistoryEntry {
        self.save_review_at(Utc::now(), code, language, model, result)
    }

    /// 指定時刻でレビューを保存する
    ///
    /// IDは `max(now_ms, 最新ID + 1)`。同一ミリ秒内の保存でも重複しない。
    pub fn save_review_at(
        &mut self,
        now: DateTime<Utc>,
        code: &str,
        language: &str,
        model: &str,
        result: &AnalysisResult,
    ) -> HistoryEntry {
        let mut entries = self.get_history();
        let newest = entries.first().map(|e| e.id);
        let id = match newest {
            Some(newest) if newest >= now.timestamp_millis() => newest + 1,
            _ => now.timestamp_millis(),
        };

        let entry = HistoryEntry {
            id,
            timestamp: now,
            code: code.to_string(),
            language: language.to_string(),
            model: model.to_string(),
            result: result.clone(),
            preview: make_preview(code),
        };

        entries.insert(0, entry.clone());
        entries.truncate(MAX_HISTORY_ITEMS);
        self.persist(entries);

        debug!("履歴に保存: id={}", id);
        entry
    }

    /// IDが一致するエントリを削除する（無ければ何もしない）
    pub fn delete_entry(&mut self, id: i64) {
        let mut entries = self.get_history();
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() != before {
            self.persist(entries);
        }
    }

    /// 全件削除（確認は呼び出し元で行う）
    pub fn clear_history(&mut self) {
        if let Err(e) = self.store.remove_item(HISTORY_KEY) {
            warn!("履歴の削除に失敗: {}", e);
        }
    }

    /// IDでエントリを取り出す
    pub fn restore_entry(&self, id: i64) -> Option<HistoryEntry> {
        self.get_history().into_iter().find(|e| e.id == id)
    }

    /// 書き込み。容量超過なら古い半分を捨てて1回だけ再試行する
    fn persist(&mut self, mut entries: Vec<HistoryEntry>) {
        match self.write(&entries) {
            Ok(()) => {}
            Err(e) if e.is_quota_exceeded() => {
                let keep = entries.len() - entries.len() / 2;
                warn!("容量超過のため履歴を {} 件に削減して再試行", keep);
                entries.truncate(keep);

                if let Err(e) = self.write(&entries) {
                    warn!("履歴の保存に失敗（書き込みは破棄）: {}", e);
                }
            }
            Err(e) => warn!("履歴の保存に失敗: {}", e),
        }
    }

    fn write(&mut self, entries: &[HistoryEntry]) -> Result<(), Error> {
        let json = serde_json::to_string(entries)?;
        self.store.set_item(HISTORY_KEY, &json)
    }
}
