//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::api;
use crate::components::{
    comparison_panel::ComparisonPanel,
    editor::Editor,
    header::Header,
    history_panel::HistoryPanel,
    output_panel::OutputPanel,
};
use crate::store::{open_history, LocalStore};
use code_review_common::review::{validate_code, with_guidance};
use code_review_common::{
    prefs, render, Comparison, ComparisonKind, HistoryEntry, LayoutMode, QuickFix, RenderedDocument,
    RequestSequencer, ReviewRequest, ALREADY_FORMATTED, DEFAULT_LANGUAGE, DEFAULT_MODEL,
};

/// 現在のウィンドウ幅(px)
pub fn window_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map_or(1280, |w| w as u32)
}

fn load_history() -> Vec<HistoryEntry> {
    open_history().map(|h| h.get_history()).unwrap_or_default()
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let saved_model = LocalStore::open()
        .and_then(|store| prefs::load_model(&store))
        .map_or(DEFAULT_MODEL, |m| m.id);
    let saved_layout = LocalStore::open()
        .and_then(|store| prefs::load_layout(&store))
        .unwrap_or_default();

    // 入力
    let (code, set_code) = signal(String::new());
    let (language, set_language) = signal(DEFAULT_LANGUAGE.to_string());
    let (model, set_model) = signal(saved_model.to_string());
    let (layout, set_layout) = signal(saved_layout.for_width(window_width()));

    // 出力
    let (document, set_document) = signal(None::<RenderedDocument>);
    let (comparison, set_comparison) = signal(None::<Comparison>);
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (history, set_history) = signal(load_history());

    let sequencer = StoredValue::new(RequestSequencer::new());

    // 選択の保存
    Effect::new(move |_| {
        let model = model.get();
        if let Some(mut store) = LocalStore::open() {
            prefs::save_model(&mut store, &model);
        }
    });
    Effect::new(move |_| {
        let layout = layout.get();
        if let Some(mut store) = LocalStore::open() {
            prefs::save_layout(&mut store, layout);
        }
    });

    // 画面幅に合わせてレイアウトを切り替える
    let _resize = window_event_listener(leptos::ev::resize, move |_| {
        let width = window_width();
        set_layout.update(|current| *current = current.for_width(width));
    });

    let clear_output = move || {
        set_error.set(None);
        set_notice.set(None);
    };

    // AIレビュー
    let on_review = move || {
        let code_value = code.get_untracked();
        let language_value = language.get_untracked();
        clear_output();

        if let Err(message) = validate_code(&code_value, &language_value) {
            set_error.set(Some(message));
            return;
        }

        let request = ReviewRequest::new(code_value, language_value, model.get_untracked());
        let mut ticket = None;
        sequencer.update_value(|s| ticket = Some(s.begin()));
        let Some(ticket) = ticket else {
            return;
        };

        set_loading.set(true);
        spawn_local(async move {
            let outcome = api::review_code(&request).await;

            // 再送・クリアで置き換えられた応答は捨てる
            if !sequencer.with_value(|s| s.is_current(ticket)) {
                return;
            }
            set_loading.set(false);

            match outcome {
                Ok(result) => {
                    set_comparison.set(result.improved_code(&request.code).map(|improved| {
                        Comparison::new(request.code.as_str(), improved, ComparisonKind::TigerStyle)
                    }));
                    set_document.set(Some(render(&result)));

                    if let Some(mut store) = open_history() {
                        store.save_review(&request.code, &request.language, &request.model, &result);
                        set_history.set(store.get_history());
                    }
                }
                Err(message) => {
                    gloo::console::warn!(format!("review failed: {}", message));
                    set_error.set(Some(with_guidance(&message)));
                }
            }
        });
    };

    // クイック整形
    let on_quick_format = move || {
        clear_output();
        let fix = QuickFix::new(&code.get_untracked(), &language.get_untracked());

        if fix.is_unchanged() {
            set_comparison.set(None);
            set_notice.set(Some(ALREADY_FORMATTED.to_string()));
        } else {
            set_comparison.set(Some(Comparison::new(fix.original, fix.formatted, ComparisonKind::QuickFormat)));
        }
    };

    let on_clear = move || {
        sequencer.update_value(|s| s.invalidate());
        set_loading.set(false);
        set_code.set(String::new());
        set_document.set(None);
        set_comparison.set(None);
        clear_output();
    };

    // 比較結果を入力欄に反映
    let on_apply = move || {
        if let Some(applied) = comparison.get_untracked() {
            set_code.set(applied.after);
        }
        set_comparison.set(None);
    };

    // 履歴から復元
    let on_restore = move |id: i64| {
        let Some(entry) = open_history().and_then(|h| h.restore_entry(id)) else {
            set_error.set(Some(format!("History entry {} not found", id)));
            set_history.set(load_history());
            return;
        };

        sequencer.update_value(|s| s.invalidate());
        set_loading.set(false);
        clear_output();
        set_comparison.set(entry.result.improved_code(&entry.code).map(|improved| {
            Comparison::new(entry.code.as_str(), improved, ComparisonKind::TigerStyle)
        }));
        set_document.set(Some(render(&entry.result)));
        set_language.set(entry.language);
        set_model.set(entry.model);
        set_code.set(entry.code);
    };

    let on_delete = move |id: i64| {
        if let Some(mut store) = open_history() {
            store.delete_entry(id);
            set_history.set(store.get_history());
        }
    };

    let on_clear_history = move || {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Clear all review history?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        if let Some(mut store) = open_history() {
            store.clear_history();
        }
        set_history.set(Vec::new());
    };

    let main_class = move || format!("main-content {}", layout.get().as_str());

    view! {
        <div class="container">
            <Header layout=layout set_layout=set_layout />

            <main class=main_class>
                <section class="input-section">
                    <Editor
                        code=code
                        set_code=set_code
                        language=language
                        set_language=set_language
                        model=model
                        set_model=set_model
                        loading=loading
                        on_review=on_review
                        on_quick_format=on_quick_format
                        on_clear=on_clear
                    />
                    <ComparisonPanel comparison=comparison layout=layout on_apply=on_apply />
                </section>

                <section class="output-section">
                    <OutputPanel document=document error=error notice=notice loading=loading />
                </section>

                <Show when=move || layout.get() != LayoutMode::FocusMode>
                    <aside class="history-section">
                        <HistoryPanel
                            history=history
                            on_restore=on_restore
                            on_delete=on_delete
                            on_clear=on_clear_history
                        />
                    </aside>
                </Show>
            </main>
        </div>
    }
}
