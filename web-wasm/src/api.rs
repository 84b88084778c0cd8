//! レビューAPI呼び出し（fetch）

use code_review_common::{AnalysisResult, ErrorPayload, ReviewRequest};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const REVIEW_URL: &str = "/review";
const TIMEOUT_SECONDS: u32 = 60;

/// fetch の失敗を文字列にする（ネットワーク失敗は "Failed to fetch"）
fn js_error(value: JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Failed to fetch".to_string())
}

async fn post_review(request: &ReviewRequest) -> Result<AnalysisResult, String> {
    let body = serde_json::to_string(request).map_err(|e| e.to_string())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(REVIEW_URL, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(ErrorPayload::message_from_body(&text));
    }

    serde_json::from_str(&text).map_err(|e| format!("Invalid response: {}", e))
}

/// レビューを依頼する（60秒でタイムアウト）
pub async fn review_code(request: &ReviewRequest) -> Result<AnalysisResult, String> {
    let fetch = Box::pin(post_review(request));
    let timeout = TimeoutFuture::new(TIMEOUT_SECONDS * 1000);

    match select(fetch, timeout).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => Err(format!("Request timeout after {}s", TIMEOUT_SECONDS)),
    }
}
