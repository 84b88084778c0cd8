//! エクスポートテスト

use code_review::export::{self, ExportFormat};
use code_review_common::{AnalysisResult, HistoryStore, MemoryStore, SectionContent};
use tempfile::tempdir;

fn sample_entry() -> code_review_common::HistoryEntry {
    let result = AnalysisResult {
        explanation: SectionContent::from("Adds two numbers."),
        issues: SectionContent::from(vec!["Missing spaces around operators"]),
        suggestions: SectionContent::from("Consider: 1. Use a linter 2. Add tests"),
        tiger_style: SectionContent::from(vec!["Assert arguments"]),
        formatted_code: Some("int add(int a, int b) { return a + b; }".to_string()),
    };

    let mut history = HistoryStore::new(MemoryStore::new());
    history.save_review("int add(int a,int b){return a+b;}", "java", "gpt-4o-mini", &result)
}

#[test]
fn test_markdown_report() {
    let entry = sample_entry();
    let report = export::render_report(&entry, ExportFormat::Markdown);

    assert!(report.starts_with("# Code Review Report"));
    assert!(report.contains("- **Model**: gpt-4o-mini"));
    assert!(report.contains("```java\nint add(int a,int b){return a+b;}\n```"));
    assert!(report.contains("### 🐛 Issues Found\n1. Missing spaces around operators"));
    assert!(report.contains("## Improved Code"));
}

#[test]
fn test_html_report() {
    let entry = sample_entry();
    let report = export::render_report(&entry, ExportFormat::Html);

    assert!(report.starts_with("<!DOCTYPE html>"));
    assert!(report.contains("<div class=\"output-content\">"));
    assert!(report.contains("<div class=\"tiger-style\">"));
    assert!(report.contains("<li>Use a linter</li>"));
    // コードはエスケープされる
    assert!(report.contains("int add(int a,int b){return a+b;}"));
    assert!(!report.contains("<script"));
}

#[test]
fn test_export_to_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let entry = sample_entry();

    let path = export::export_entry(&entry, ExportFormat::Html, dir.path()).unwrap();
    assert_eq!(path, dir.path().join(format!("review-{}.html", entry.id)));
    assert!(std::fs::read_to_string(&path).unwrap().contains("Code Review Report"));
}

#[test]
fn test_export_to_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("out").join("report.md");

    let path = export::export_entry(&sample_entry(), ExportFormat::Markdown, &target).unwrap();
    assert_eq!(path, target);
    assert!(target.exists());
}

#[test]
fn test_export_format_parse() {
    assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
    assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
    assert!("pdf".parse::<ExportFormat>().is_err());
}
