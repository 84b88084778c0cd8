pub mod markdown;
pub mod html;

use crate::error::Result;
use code_review_common::HistoryEntry;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(format!("Unknown format: {}. Use markdown or html", s)),
        }
    }
}

/// 出力先がディレクトリなら `review-<id>.<ext>` を付ける
pub fn output_path_for(output: &Path, entry: &HistoryEntry, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("review-{}.{}", entry.id, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// レポート本文を作る
pub fn render_report(entry: &HistoryEntry, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => markdown::render_report(entry),
        ExportFormat::Html => html::render_report(entry),
    }
}

/// レポートをファイルに書き出し、書き出したパスを返す
pub fn export_entry(entry: &HistoryEntry, format: ExportFormat, output: &Path) -> Result<PathBuf> {
    let path = output_path_for(output, entry, format);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, render_report(entry, format))?;
    Ok(path)
}
