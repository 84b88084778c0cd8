//! 対象言語
//!
//! ファイル拡張子から言語名への対応表と、入力欄のプレースホルダ。

use std::path::Path;

/// 既定の言語
pub const DEFAULT_LANGUAGE: &str = "java";

/// 選択可能な言語（値, 表示名）
pub const LANGUAGES: &[(&str, &str)] = &[
    ("java", "Java"),
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("csharp", "C#"),
    ("go", "Go"),
    ("rust", "Rust"),
    ("cpp", "C++"),
];

/// 拡張子から言語を判定する（大文字小文字は区別しない）
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    let language = match extension.to_lowercase().as_str() {
        "java" => "java",
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "cs" => "csharp",
        "go" => "go",
        "rs" => "rust",
        "cpp" | "c" | "h" => "cpp",
        _ => return None,
    };
    Some(language)
}

/// ファイル名から言語を判定する
pub fn detect_language(file_name: impl AsRef<Path>) -> Option<&'static str> {
    file_name
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_for_extension)
}

/// 入力欄のプレースホルダ
pub fn placeholder(language: &str) -> String {
    format!("Paste your {} code here...", language.to_uppercase())
}
