use code_review_common::review;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeReviewError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{}", review::empty_code_message(.language))]
    EmptyCode { language: String },

    /// バックエンドが返したエラー（メッセージはそのまま表示する）
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Failed to fetch: {0}")]
    Transport(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("レスポンスの解析に失敗: {0}")]
    InvalidResponse(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("履歴が見つかりません: id={0}")]
    HistoryEntryNotFound(i64),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] code_review_common::Error),
}

impl CodeReviewError {
    /// 利用者向けメッセージ（タイムアウト・通信失敗にはヒントを付ける）
    pub fn user_message(&self) -> String {
        review::with_guidance(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodeReviewError>;
