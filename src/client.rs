//! レビューAPIクライアント
//!
//! `POST {endpoint}/review` にコードを送り、構造化されたレビュー結果を受け取る。
//! 自動リトライはしない。タイムアウトは [`ReviewClient::new`] で指定した秒数。

use crate::error::{CodeReviewError, Result};
use code_review_common::review::validate_code;
use code_review_common::{AnalysisResult, ErrorPayload, ReviewRequest};
use std::time::Duration;
use tracing::debug;

pub struct ReviewClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ReviewClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodeReviewError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn review_url(&self) -> String {
        format!("{}/review", self.base_url)
    }

    /// コードをレビューする
    ///
    /// 空白のみのコードはリクエストを送らずに [`CodeReviewError::EmptyCode`] を返す。
    pub async fn review(&self, request: &ReviewRequest) -> Result<AnalysisResult> {
        validate_code(&request.code, &request.language).map_err(|_| CodeReviewError::EmptyCode {
            language: request.language.clone(),
        })?;

        debug!("レビュー送信: language={}, model={}", request.language, request.model);

        let response = self
            .client
            .post(self.review_url())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!("レビュー応答: status={}, {} bytes", status, body.len());

        if !status.is_success() {
            return Err(CodeReviewError::Backend {
                status: status.as_u16(),
                message: ErrorPayload::message_from_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| CodeReviewError::InvalidResponse(e.to_string()))
    }

    fn transport_error(&self, error: reqwest::Error) -> CodeReviewError {
        if error.is_timeout() {
            CodeReviewError::Timeout(self.timeout.as_secs())
        } else {
            CodeReviewError::Transport(error.to_string())
        }
    }
}
