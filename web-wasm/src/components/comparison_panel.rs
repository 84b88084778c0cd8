//! 変更前後の比較パネル

use leptos::prelude::*;
use crate::app::window_width;
use code_review_common::diff::SideBySideRow;
use code_review_common::prefs::ComparisonStyle;
use code_review_common::{Comparison, LayoutMode};

fn cell(side: Option<(usize, String)>) -> impl IntoView {
    let (number, text) = match side {
        Some((number, text)) => (number.to_string(), text),
        None => (String::new(), String::new()),
    };
    view! {
        <td class="line-no">{number}</td>
        <td class="line"><pre>{text}</pre></td>
    }
}

fn side_by_side(rows: Vec<SideBySideRow>) -> impl IntoView {
    view! {
        <table class="before-after-content side-by-side">
            <thead>
                <tr>
                    <th colspan="2">"Before"</th>
                    <th colspan="2">"After"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr class=if row.changed { "changed" } else { "" }>
                                {cell(row.left)}
                                {cell(row.right)}
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn stacked(comparison: &Comparison) -> impl IntoView {
    view! {
        <div class="before-after-content stacked">
            <pre class="diff">{comparison.unified()}</pre>
        </div>
    }
}

#[component]
pub fn ComparisonPanel<A>(
    comparison: ReadSignal<Option<Comparison>>,
    layout: ReadSignal<LayoutMode>,
    on_apply: A,
) -> impl IntoView
where
    A: Fn() + Copy + Send + Sync + 'static,
{
    let body = move || {
        comparison.get().map(|comparison| {
            let content = match layout.get().comparison_style(Some(window_width())) {
                ComparisonStyle::SideBySide => side_by_side(comparison.rows()).into_any(),
                ComparisonStyle::Stacked => stacked(&comparison).into_any(),
            };
            let stats = comparison.stats();

            view! {
                <div class="before-after-container">
                    <div class="before-after-header">
                        <span class="badge">{comparison.kind.badge()}</span>
                        <span class="diff-stats">{format!("+{} / -{}", stats.added, stats.removed)}</span>
                        <button class="btn btn-small" on:click=move |_| on_apply()>
                            "✅ Apply Changes"
                        </button>
                    </div>
                    {content}
                </div>
            }
        })
    };

    view! { <div class="comparison">{body}</div> }
}
