//! レビュー結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ReviewRequest: バックエンドへのリクエスト
//! - AnalysisResult: バックエンドからのレビュー結果
//! - ErrorPayload: 失敗時のエラーボディ

use serde::{Deserialize, Deserializer, Serialize};

/// セクションの内容（文字列または文字列リスト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    Items(Vec<String>),
}

impl Default for SectionContent {
    fn default() -> Self {
        SectionContent::Text(String::new())
    }
}

impl SectionContent {
    /// 空文字列・空リストの判定
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::Items(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

impl From<&str> for SectionContent {
    fn from(text: &str) -> Self {
        SectionContent::Text(text.to_string())
    }
}

impl From<String> for SectionContent {
    fn from(text: String) -> Self {
        SectionContent::Text(text)
    }
}

impl From<Vec<String>> for SectionContent {
    fn from(items: Vec<String>) -> Self {
        SectionContent::Items(items)
    }
}

impl From<Vec<&str>> for SectionContent {
    fn from(items: Vec<&str>) -> Self {
        SectionContent::Items(items.into_iter().map(str::to_string).collect())
    }
}

/// `null` と欠落を空文字列として扱う
fn nullable_section<'de, D>(deserializer: D) -> Result<SectionContent, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SectionContent>::deserialize(deserializer)?.unwrap_or_default())
}

/// AIレビュー結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "nullable_section")]
    pub explanation: SectionContent,    // コード説明

    #[serde(default, deserialize_with = "nullable_section")]
    pub issues: SectionContent,         // 問題点

    #[serde(default, deserialize_with = "nullable_section")]
    pub suggestions: SectionContent,    // 改善提案

    #[serde(default, deserialize_with = "nullable_section")]
    pub tiger_style: SectionContent,    // Tiger Style 推奨事項

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_code: Option<String>, // 書き換え後のコード
}

impl AnalysisResult {
    /// 書き換え後コードが元コードと実質的に異なる場合のみ返す
    pub fn improved_code(&self, original: &str) -> Option<&str> {
        self.formatted_code
            .as_deref()
            .filter(|code| code.trim() != original.trim())
    }
}

/// レビューリクエスト（`POST /review` のボディ）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub language: String,
    pub model: String,
}

impl ReviewRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            model: model.into(),
        }
    }
}

/// 失敗レスポンスのボディ
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorPayload {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorPayload {
    pub const FALLBACK_MESSAGE: &'static str = "Failed to analyze code";

    /// 人が読めるメッセージ（無ければ既定文言）
    pub fn into_message(self) -> String {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| Self::FALLBACK_MESSAGE.to_string())
    }

    /// ボディ文字列からメッセージを取り出す（JSONでなければ既定文言）
    pub fn message_from_body(body: &str) -> String {
        serde_json::from_str::<ErrorPayload>(body)
            .map(ErrorPayload::into_message)
            .unwrap_or_else(|_| Self::FALLBACK_MESSAGE.to_string())
    }
}
