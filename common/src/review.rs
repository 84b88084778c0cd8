//! レビュー実行まわりの共通処理
//!
//! - 入力検証（空コード）
//! - 失敗メッセージへのヒント付与
//! - 再送時のリクエスト順序管理

/// タイムアウト・通信失敗時に付けるヒント
pub const GUIDANCE_HINT: &str =
    "Tip: Complex code analysis can take up to 30 seconds. Please try again or simplify your code sample.";

/// 空コード時のメッセージ
pub fn empty_code_message(language: &str) -> String {
    format!("Please enter some {} code to review.", language.to_uppercase())
}

/// 送信前の入力検証
///
/// 空白のみのコードはエラーメッセージを返す（リクエストは送らない）。
pub fn validate_code(code: &str, language: &str) -> Result<(), String> {
    if code.trim().is_empty() {
        Err(empty_code_message(language))
    } else {
        Ok(())
    }
}

/// タイムアウト・通信失敗を示すメッセージか
pub fn needs_guidance(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("timeout") || lower.contains("failed to fetch")
}

/// 必要ならヒントを付けたメッセージ
pub fn with_guidance(message: &str) -> String {
    if needs_guidance(message) {
        format!("{}\n\n{}", message, GUIDANCE_HINT)
    } else {
        message.to_string()
    }
}

/// リクエストの通し番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// 最新リクエストの管理
///
/// 再送で置き換えられた古いリクエストの応答は破棄する。
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいリクエストを開始する（以前のチケットは無効になる）
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// 応答を反映してよいか
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// 進行中のリクエストをすべて無効にする
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
