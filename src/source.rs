//! レビュー対象コードの読み込み
//!
//! ファイルまたは標準入力（`-`）からコードを読み、拡張子から言語を判定する。

use crate::error::{CodeReviewError, Result};
use code_review_common::detect_language;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 読み込んだコード
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: Option<PathBuf>,
    pub code: String,
    /// 拡張子から判定した言語
    pub detected_language: Option<&'static str>,
}

impl SourceFile {
    /// 使用する言語を決める（明示指定 > 拡張子 > 既定値）
    pub fn resolve_language(&self, explicit: Option<&str>, fallback: &str) -> String {
        explicit
            .map(str::to_lowercase)
            .or_else(|| self.detected_language.map(str::to_string))
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// `-` なら標準入力、それ以外はファイルを読む
pub fn read_source(input: &Path) -> Result<SourceFile> {
    if input == Path::new("-") {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code)?;
        return Ok(SourceFile {
            path: None,
            code,
            detected_language: None,
        });
    }

    read_file(input)
}

pub fn read_file(path: &Path) -> Result<SourceFile> {
    if !path.is_file() {
        return Err(CodeReviewError::FileNotFound(path.display().to_string()));
    }

    let code = std::fs::read_to_string(path)?;
    Ok(SourceFile {
        path: Some(path.to_path_buf()),
        code,
        detected_language: detect_language(path),
    })
}
