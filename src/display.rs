//! 端末表示
//!
//! 表示文字列を作る関数と、それを出力する関数を分けている。

use code_review_common::diff::SideBySideRow;
use code_review_common::history::format_relative_time;
use code_review_common::models::model_icon;
use code_review_common::prefs::ComparisonStyle;
use code_review_common::{Comparison, HistoryEntry, LayoutMode, RenderedDocument};
use chrono::{DateTime, Utc};

/// 左右比較の全体幅
pub const SIDE_BY_SIDE_WIDTH: usize = 120;

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

fn format_row(row: &SideBySideRow, column: usize) -> String {
    let side = |cell: &Option<(usize, String)>| match cell {
        Some((number, text)) => format!("{:>4} {}", number, fit(text, column)),
        None => format!("{:>4} {}", "", fit("", column)),
    };
    let marker = if row.changed { '┃' } else { '│' };
    format!("{} {} {}", side(&row.left), marker, side(&row.right))
        .trim_end()
        .to_string()
}

/// 左右比較の表
pub fn side_by_side_table(comparison: &Comparison, width: usize) -> String {
    // 行番号(4) + 空白 + 区切り(3) を除いた幅を2等分
    let column = width.saturating_sub(13) / 2;
    let mut lines = vec![format!(
        "{} {} {}",
        fit("     Before", column + 5),
        '│',
        "     After"
    )];
    lines.extend(comparison.rows().iter().map(|row| format_row(row, column)));
    lines.join("\n")
}

/// レイアウトに応じた比較表示（フォーカスモードでは表示しない）
pub fn comparison_view(comparison: &Comparison, layout: LayoutMode) -> Option<String> {
    if layout == LayoutMode::FocusMode {
        return None;
    }

    let stats = comparison.stats();
    let header = format!(
        "{}  (+{} / -{})",
        comparison.kind.badge(),
        stats.added,
        stats.removed
    );
    let body = match layout.comparison_style(None) {
        ComparisonStyle::SideBySide => side_by_side_table(comparison, SIDE_BY_SIDE_WIDTH),
        ComparisonStyle::Stacked => comparison.unified(),
    };

    Some(format!("{}\n{}", header, body.trim_end()))
}

pub fn print_comparison(comparison: &Comparison, layout: LayoutMode) {
    if let Some(view) = comparison_view(comparison, layout) {
        println!("{}\n", view);
    }
}

pub fn print_document(document: &RenderedDocument) {
    println!("{}\n", document.markdown);
}

/// 履歴一覧の1行
pub fn history_line(entry: &HistoryEntry, now: DateTime<Utc>) -> String {
    format!(
        "{}  {:<8} {} {:<10} {:<18} {}",
        entry.id,
        entry.relative_time(now),
        model_icon(&entry.model),
        entry.language,
        entry.model,
        entry.preview
    )
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("履歴はありません");
        return;
    }

    let now = Utc::now();
    println!("履歴 ({}件):", entries.len());
    for entry in entries {
        println!("  {}", history_line(entry, now));
    }
}

pub fn print_entry_header(entry: &HistoryEntry) {
    println!(
        "#{}  {}  {} {}  ({})\n",
        entry.id,
        entry.language,
        model_icon(&entry.model),
        entry.model,
        format_relative_time(entry.timestamp, Utc::now())
    );
}
