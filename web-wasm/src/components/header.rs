//! ヘッダーコンポーネント（レイアウト切り替え）

use leptos::prelude::*;
use code_review_common::LayoutMode;

#[component]
pub fn Header(layout: ReadSignal<LayoutMode>, set_layout: WriteSignal<LayoutMode>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🐅 Code Review"</h1>
            <p class="text-muted">"AI code review with quick formatting and Tiger Style recommendations"</p>

            <div class="layout-controls">
                <div class="layout-toggle-group">
                    {LayoutMode::ALL
                        .into_iter()
                        .map(|mode| {
                            view! {
                                <button
                                    class=move || {
                                        if layout.get() == mode { "layout-toggle active" } else { "layout-toggle" }
                                    }
                                    on:click=move |_| set_layout.set(mode)
                                >
                                    {mode.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </header>
    }
}
