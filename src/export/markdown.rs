//! Markdownレポート

use code_review_common::formatter::to_markdown;
use code_review_common::HistoryEntry;

/// コードを囲むフェンス（コード中のバッククォート連続より長くする）
fn fence_for(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn code_block(code: &str, language: &str) -> String {
    let fence = fence_for(code);
    format!("{fence}{language}\n{}\n{fence}", code.trim_end())
}

pub fn render_report(entry: &HistoryEntry) -> String {
    let mut report = String::new();

    report.push_str("# Code Review Report\n\n");
    report.push_str(&format!("- **Date**: {}\n", entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
    report.push_str(&format!("- **Language**: {}\n", entry.language));
    report.push_str(&format!("- **Model**: {}\n\n", entry.model));

    report.push_str("## Submitted Code\n\n");
    report.push_str(&code_block(&entry.code, &entry.language));
    report.push_str("\n\n");

    report.push_str(&to_markdown(&entry.result));
    report.push('\n');

    if let Some(improved) = entry.result.improved_code(&entry.code) {
        report.push_str("\n## Improved Code\n\n");
        report.push_str(&code_block(improved, &entry.language));
        report.push('\n');
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_longer_than_backticks_in_code() {
        assert_eq!(fence_for("let x = 1;"), "```");
        assert_eq!(fence_for("s = \"````\""), "`````");
    }
}
