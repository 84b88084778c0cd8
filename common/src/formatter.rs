//! レビュー結果の整形
//!
//! AnalysisResult → Markdown → HTML の変換。
//!
//! ## 処理フロー
//! 1. セクションごとに内容を正規化（リストの番号付け・リスト行の空行分離）
//! 2. 固定見出し4つのMarkdown文書を組み立て
//! 3. pulldown-cmark でHTML化（生HTMLはエスケープ）
//! 4. 問題点・提案・Tiger Style のみ、段落に残った番号付き文を `<ol>` に分割
//! 5. Tiger Style セクションを専用コンテナで囲む

use crate::types::{AnalysisResult, SectionContent};
use pulldown_cmark::{html, Event, Options, Parser};
use regex::{Captures, Regex};

lazy_static::lazy_static! {
    // 行頭の番号マーカー "1. "
    static ref ORDINAL_RE: Regex = Regex::new(r"^\d+\.\s+").unwrap();
    // 行頭の箇条書きマーカー "- " / "* "
    static ref BULLET_RE: Regex = Regex::new(r"^[-*]\s+").unwrap();
    // 段落内の番号マーカー
    static ref INLINE_ORDINAL_RE: Regex = Regex::new(r"\b\d+\.\s+").unwrap();
    // タグを含まない段落
    static ref PARAGRAPH_RE: Regex = Regex::new(r"<p>([^<]*)</p>").unwrap();
}

/// 結果のセクション（表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Explanation,
    Issues,
    Suggestions,
    TigerStyle,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Explanation,
        Section::Issues,
        Section::Suggestions,
        Section::TigerStyle,
    ];

    /// 見出し文字列
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Explanation => "📖 Code Explanation",
            Section::Issues => "🐛 Issues Found",
            Section::Suggestions => "💡 Suggestions",
            Section::TigerStyle => "🐅 Tiger Style Recommendations",
        }
    }

    /// 段落内リストの分割対象か（説明セクションは対象外）
    pub fn splits_inline_lists(&self) -> bool {
        !matches!(self, Section::Explanation)
    }

    pub fn content<'a>(&self, result: &'a AnalysisResult) -> &'a SectionContent {
        match self {
            Section::Explanation => &result.explanation,
            Section::Issues => &result.issues,
            Section::Suggestions => &result.suggestions,
            Section::TigerStyle => &result.tiger_style,
        }
    }
}

fn is_ordinal_item(line: &str) -> bool {
    ORDINAL_RE.is_match(line)
}

fn is_list_item(line: &str) -> bool {
    ORDINAL_RE.is_match(line) || BULLET_RE.is_match(line)
}

/// セクション内容をMarkdownに正規化する
///
/// - リスト: 番号が無ければ1始まりの番号を付け、空行区切りで連結
/// - 文字列: [`format_list_content`] でリスト行を空行で分離
pub fn format_content(content: &SectionContent) -> String {
    match content {
        SectionContent::Items(items) => {
            let has_numbering = items.iter().any(|item| is_ordinal_item(item.trim()));
            if has_numbering {
                items.join("\n\n")
            } else {
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| format!("{}. {}", index + 1, item))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        }
        SectionContent::Text(text) => format_list_content(text),
    }
}

/// 文字列中のリスト行の前後に空行を入れる
///
/// 行は前後の空白を除去する。空行が連続しないよう、直前・直後が既に空行なら追加しない。
pub fn format_list_content(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut processed: Vec<&str> = Vec::with_capacity(lines.len());

    for (i, &line) in lines.iter().enumerate() {
        if !is_list_item(line) {
            processed.push(line);
            continue;
        }

        if processed.last().is_some_and(|last| !last.is_empty()) {
            processed.push("");
        }
        processed.push(line);

        if let Some(next) = lines.get(i + 1) {
            if !next.is_empty() && !is_list_item(next) {
                processed.push("");
            }
        }
    }

    processed.join("\n")
}

/// Markdown文書を組み立てる
pub fn to_markdown(result: &AnalysisResult) -> String {
    Section::ALL
        .iter()
        .map(|section| format!("### {}\n{}", section.heading(), format_content(section.content(result))))
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

/// MarkdownをHTMLへ変換する（生HTMLはテキストとしてエスケープ）
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// 番号付き文が2つ以上残った段落を `<ol>` に分割する
///
/// 番号より前の文は導入段落として残す。分割できなければそのまま返す。
pub fn split_inline_lists(section_html: &str) -> String {
    PARAGRAPH_RE
        .replace_all(section_html, |caps: &Captures| {
            split_paragraph(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn split_paragraph(text: &str) -> Option<String> {
    let markers: Vec<_> = INLINE_ORDINAL_RE.find_iter(text).collect();
    if markers.len() < 2 {
        return None;
    }

    let items: Vec<&str> = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            text[marker.end()..end].trim()
        })
        .filter(|item| !item.is_empty())
        .collect();

    if items.len() < 2 {
        return None;
    }

    let mut output = String::new();
    let lead = text[..markers[0].start()].trim();
    if !lead.is_empty() {
        output.push_str(&format!("<p>{}</p>\n", lead));
    }
    output.push_str("<ol>\n");
    for item in items {
        output.push_str(&format!("<li>{}</li>\n", item));
    }
    output.push_str("</ol>");

    Some(output)
}

/// セクションごとの変換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub section: Section,
    /// 正規化後のMarkdown（見出しなし）
    pub markdown: String,
    /// 見出しを含むHTML
    pub html: String,
}

/// 変換結果の文書
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub markdown: String,
    pub sections: Vec<RenderedSection>,
    pub html: String,
}

impl RenderedDocument {
    pub fn section(&self, section: Section) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.section == section)
    }

    /// 表示用コンテナで囲んだHTML
    pub fn wrapped_html(&self) -> String {
        format!("<div class=\"output-content\">{}</div>", self.html)
    }
}

fn render_section(section: Section, result: &AnalysisResult) -> RenderedSection {
    let markdown = format_content(section.content(result));
    let heading_html = markdown_to_html(&format!("### {}", section.heading()));

    let mut content_html = markdown_to_html(&markdown);
    if section.splits_inline_lists() {
        content_html = split_inline_lists(&content_html);
    }
    if section == Section::TigerStyle {
        content_html = format!("<div class=\"tiger-style\">{}</div>", content_html);
    }

    RenderedSection {
        section,
        markdown,
        html: format!("{}{}", heading_html, content_html),
    }
}

/// レビュー結果を文書に変換する（純粋関数・失敗しない）
pub fn render(result: &AnalysisResult) -> RenderedDocument {
    let sections: Vec<RenderedSection> = Section::ALL
        .iter()
        .map(|section| render_section(*section, result))
        .collect();
    let html = sections.iter().map(|s| s.html.as_str()).collect::<String>();

    RenderedDocument {
        markdown: to_markdown(result),
        sections,
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // format_content テスト
    // =============================================

    #[test]
    fn test_format_content_numbers_plain_items() {
        let content = SectionContent::from(vec!["A", "B"]);
        assert_eq!(format_content(&content), "1. A\n\n2. B");
    }

    #[test]
    fn test_format_content_keeps_existing_numbers() {
        let content = SectionContent::from(vec!["1. A", "2. B"]);
        assert_eq!(format_content(&content), "1. A\n\n2. B");
    }

    #[test]
    fn test_format_content_empty() {
        assert_eq!(format_content(&SectionContent::Items(vec![])), "");
        assert_eq!(format_content(&SectionContent::default()), "");
    }

    #[test]
    fn test_format_list_content_isolates_lists() {
        let text = "Summary line\n1. First\n2. Second\nClosing line";
        assert_eq!(
            format_list_content(text),
            "Summary line\n\n1. First\n\n2. Second\n\nClosing line"
        );
    }

    #[test]
    fn test_format_list_content_bullets() {
        let text = "Intro\n- one\n* two\nOutro";
        assert_eq!(format_list_content(text), "Intro\n\n- one\n\n* two\n\nOutro");
    }

    #[test]
    fn test_format_list_content_no_double_blank() {
        let text = "Intro\n\n1. First\n\nOutro";
        assert_eq!(format_list_content(text), "Intro\n\n1. First\n\nOutro");
    }

    #[test]
    fn test_format_list_content_plain_text() {
        assert_eq!(format_list_content("Just a sentence."), "Just a sentence.");
        assert_eq!(format_list_content(""), "");
    }

    // =============================================
    // render テスト
    // =============================================

    #[test]
    fn test_to_markdown_heading_order() {
        let markdown = to_markdown(&AnalysisResult::default());
        let positions: Vec<usize> = Section::ALL
            .iter()
            .map(|s| markdown.find(s.heading()).expect("見出しが無い"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_single_issue_list() {
        let result = AnalysisResult {
            explanation: SectionContent::from("Defines f."),
            issues: SectionContent::from(vec!["Use snake_case"]),
            suggestions: SectionContent::Items(vec![]),
            tiger_style: SectionContent::Items(vec![]),
            formatted_code: None,
        };

        let document = render(&result);
        let issues = document.section(Section::Issues).expect("セクションが無い");
        assert!(issues.html.starts_with("<h3>🐛 Issues Found</h3>"));
        assert!(issues.html.contains("<ol>\n<li>Use snake_case</li>\n</ol>"));
        assert!(document.html.contains("<p>Defines f.</p>"));
    }

    #[test]
    fn test_render_splits_inline_list_outside_explanation() {
        let text = "Problems: 1. Missing docs 2. Unused import";
        let result = AnalysisResult {
            explanation: SectionContent::from(text),
            suggestions: SectionContent::from(text),
            ..Default::default()
        };

        let document = render(&result);
        let suggestions = &document.section(Section::Suggestions).expect("セクションが無い").html;
        assert!(suggestions.contains("<p>Problems:</p>"));
        assert!(suggestions.contains("<li>Missing docs</li>"));
        assert!(suggestions.contains("<li>Unused import</li>"));

        let explanation = &document.section(Section::Explanation).expect("セクションが無い").html;
        assert!(explanation.contains("<p>Problems: 1. Missing docs 2. Unused import</p>"));
        assert!(!explanation.contains("<ol>"));
    }

    #[test]
    fn test_split_inline_lists_single_marker_untouched() {
        let html = "<p>See item 1. only</p>\n";
        assert_eq!(split_inline_lists(html), html);
    }

    #[test]
    fn test_split_inline_lists_skips_paragraphs_with_tags() {
        let html = "<p>1. Use <code>x</code> 2. Drop y</p>\n";
        assert_eq!(split_inline_lists(html), html);
    }

    #[test]
    fn test_render_wraps_tiger_style() {
        let result = AnalysisResult {
            tiger_style: SectionContent::from(vec!["Assert invariants"]),
            ..Default::default()
        };

        let tiger = render(&result)
            .section(Section::TigerStyle)
            .expect("セクションが無い")
            .html
            .clone();
        assert!(tiger.contains("<div class=\"tiger-style\"><ol>"));
        assert!(tiger.contains("Assert invariants"));
    }

    #[test]
    fn test_render_escapes_raw_html() {
        let result = AnalysisResult {
            explanation: SectionContent::from("<script>alert(1)</script>"),
            ..Default::default()
        };

        let document = render(&result);
        assert!(!document.html.contains("<script>"));
        assert!(document.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_empty_result() {
        let document = render(&AnalysisResult::default());
        assert_eq!(document.sections.len(), 4);
        for section in Section::ALL {
            assert!(document.html.contains(section.heading()));
        }
        assert!(document.wrapped_html().starts_with("<div class=\"output-content\">"));
    }
}
