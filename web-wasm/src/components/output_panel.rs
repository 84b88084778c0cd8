//! レビュー結果の表示

use leptos::prelude::*;
use code_review_common::RenderedDocument;

#[component]
pub fn OutputPanel(
    document: ReadSignal<Option<RenderedDocument>>,
    error: ReadSignal<Option<String>>,
    notice: ReadSignal<Option<String>>,
    loading: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="output">
            <Show when=move || loading.get()>
                <div class="loading">"🔍 Analyzing your code..."</div>
            </Show>

            <Show when=move || error.with(Option::is_some)>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || notice.with(Option::is_some)>
                <div class="notice-message">{move || notice.get().unwrap_or_default()}</div>
            </Show>

            <Show
                when=move || document.with(Option::is_some)
                fallback=|| view! { <p class="text-muted">"Review results will appear here."</p> }
            >
                <div
                    class="review-result"
                    inner_html=move || document.with(|d| d.as_ref().map(RenderedDocument::wrapped_html).unwrap_or_default())
                ></div>
            </Show>
        </div>
    }
}
