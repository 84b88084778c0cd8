//! 入力エリア（コード・言語・モデル・操作ボタン・ファイル読み込み）

use leptos::prelude::*;
use leptos::task::spawn_local;
use code_review_common::language::{detect_language, placeholder, LANGUAGES};
use code_review_common::MODELS;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

#[component]
pub fn Editor<R, Q, C>(
    code: ReadSignal<String>,
    set_code: WriteSignal<String>,
    language: ReadSignal<String>,
    set_language: WriteSignal<String>,
    model: ReadSignal<String>,
    set_model: WriteSignal<String>,
    loading: ReadSignal<bool>,
    on_review: R,
    on_quick_format: Q,
    on_clear: C,
) -> impl IntoView
where
    R: Fn() + Copy + 'static,
    Q: Fn() + Copy + 'static,
    C: Fn() + Copy + 'static,
{
    // ファイルの内容を入力欄へ。拡張子から言語も切り替える
    let on_file = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        if let Some(detected) = detect_language(file.name()) {
            set_language.set(detected.to_string());
        }

        spawn_local(async move {
            match JsFuture::from(file.text()).await {
                Ok(text) => set_code.set(text.as_string().unwrap_or_default()),
                Err(e) => gloo::console::error!(format!("failed to read file: {:?}", e)),
            }
        });
        input.set_value("");
    };

    view! {
        <div class="editor">
            <div class="editor-toolbar">
                <select
                    class="language-select"
                    prop:value=move || language.get()
                    on:change=move |ev| set_language.set(event_target_value(&ev))
                >
                    {LANGUAGES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>

                <select
                    class="model-select"
                    prop:value=move || model.get()
                    on:change=move |ev| set_model.set(event_target_value(&ev))
                >
                    {MODELS
                        .iter()
                        .map(|m| view! { <option value=m.id>{format!("{} {}", m.icon, m.label)}</option> })
                        .collect_view()}
                </select>

                <label class="file-upload">
                    "📁 Open file"
                    <input type="file" accept=".java,.py,.js,.ts,.cs,.go,.rs,.cpp,.c,.h" on:change=on_file />
                </label>
            </div>

            <textarea
                class="code-input"
                spellcheck="false"
                placeholder=move || placeholder(&language.get())
                prop:value=move || code.get()
                on:input=move |ev| set_code.set(event_target_value(&ev))
            ></textarea>

            <div class="editor-actions">
                <button class="btn btn-primary" disabled=move || loading.get() on:click=move |_| on_review()>
                    {move || if loading.get() { "⏳ Reviewing..." } else { "🔍 Review Code" }}
                </button>
                <button class="btn" disabled=move || loading.get() on:click=move |_| on_quick_format()>
                    "⚡ Quick Format"
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_clear()>
                    "🗑️ Clear"
                </button>
            </div>
        </div>
    }
}
