//! 履歴パネル

use leptos::prelude::*;
use chrono::Utc;
use code_review_common::models::model_icon;
use code_review_common::HistoryEntry;

#[component]
pub fn HistoryPanel<R, D, C>(
    history: ReadSignal<Vec<HistoryEntry>>,
    on_restore: R,
    on_delete: D,
    on_clear: C,
) -> impl IntoView
where
    R: Fn(i64) + Copy + Send + Sync + 'static,
    D: Fn(i64) + Copy + Send + Sync + 'static,
    C: Fn() + Copy + Send + Sync + 'static,
{
    let entries = move || {
        let now = Utc::now();
        history
            .get()
            .into_iter()
            .map(|entry| {
                let id = entry.id;
                view! {
                    <div class="history-item">
                        <div class="history-meta">
                            <span class="history-model">{model_icon(&entry.model)}</span>
                            <span class="history-language">{entry.language.to_uppercase()}</span>
                            <span class="history-time">{entry.relative_time(now)}</span>
                        </div>
                        <div class="history-preview">{entry.preview.clone()}</div>
                        <div class="history-actions">
                            <button class="history-btn restore-btn" on:click=move |_| on_restore(id)>
                                "📂 Restore"
                            </button>
                            <button class="history-btn delete-btn" on:click=move |_| on_delete(id)>
                                "🗑️"
                            </button>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="history-panel">
            <div class="history-header">
                <h3>"📜 History"</h3>
                <button
                    class="btn btn-small"
                    disabled=move || history.with(Vec::is_empty)
                    on:click=move |_| on_clear()
                >
                    "Clear All"
                </button>
            </div>

            <Show
                when=move || !history.with(Vec::is_empty)
                fallback=|| view! { <p class="text-muted">"No reviews yet."</p> }
            >
                <div class="history-list">{entries}</div>
            </Show>
        </div>
    }
}
