//! HTMLレポート（単体で開けるページ）

use code_review_common::{render, HistoryEntry};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
pre { background: #f5f7fa; padding: 1rem; overflow-x: auto; border-radius: 6px; }
.meta { color: #616e7c; }
.tiger-style { border-left: 4px solid #f59e0b; padding-left: 1rem; }
"#;

/// HTML特殊文字のエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn code_block(code: &str, language: &str) -> String {
    format!(
        "<pre><code class=\"language-{}\">{}</code></pre>\n",
        escape_html(language),
        escape_html(code.trim_end())
    )
}

pub fn render_report(entry: &HistoryEntry) -> String {
    let document = render(&entry.result);
    let mut body = String::new();

    body.push_str("<h1>Code Review Report</h1>\n");
    body.push_str(&format!(
        "<p class=\"meta\">{} · {} · {}</p>\n",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        escape_html(&entry.language),
        escape_html(&entry.model)
    ));
    body.push_str("<h2>Submitted Code</h2>\n");
    body.push_str(&code_block(&entry.code, &entry.language));
    body.push_str(&document.wrapped_html());
    body.push('\n');

    if let Some(improved) = entry.result.improved_code(&entry.code) {
        body.push_str("<h2>Improved Code</h2>\n");
        body.push_str(&code_block(improved, &entry.language));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Code Review Report</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        STYLE, body
    )
}
