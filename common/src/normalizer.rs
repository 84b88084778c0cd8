//! テキスト正規化
//!
//! 全言語共通の下処理:
//! 1. 改行コードを `\n` に統一
//! 2. 各行の末尾空白を除去
//! 3. 連続する空行を1行にまとめる

/// 改行コードを `\n` に統一する
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// 各行の末尾空白を除去する
pub fn remove_trailing_whitespace(text: &str) -> String {
    text.split('\n').map(str::trim_end).collect::<Vec<_>>().join("\n")
}

/// 2行以上続く空行を1行にまとめる
///
/// 3つ以上連続する改行を2つにする。空白だけの行は末尾空白の除去後に空行になる前提。
pub fn collapse_blank_lines(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut newlines = 0;

    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        collapsed.push(ch);
    }

    collapsed
}

/// テキストを正規化する
///
/// 空文字列を含むすべての入力に対して定義され、
/// `normalize(normalize(x)) == normalize(x)` が成り立つ。
pub fn normalize(text: &str) -> String {
    let unified = normalize_line_endings(text);
    let trimmed = remove_trailing_whitespace(&unified);
    collapse_blank_lines(&trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_remove_trailing_whitespace() {
        assert_eq!(remove_trailing_whitespace("a  \n\tb\t\n  "), "a\n\tb\n");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_trailing_blank_line_kept() {
        assert_eq!(normalize("x\n\n\n"), "x\n\n");
        assert_eq!(normalize("x\n\n"), "x\n\n");
        assert_eq!(normalize("x  \r\n \r\n\t\r\n"), "x\n\n");
        assert_eq!(normalize("\n\n\n"), "\n\n");
    }

    #[test]
    fn test_normalize_combined() {
        let input = "class A {  \r\n\r\n   \r\n\r\n  int x;\t\r\n}\r\n";
        assert_eq!(normalize(input), "class A {\n\n  int x;\n}\n");
    }

    #[test]
    fn test_normalize_whitespace_only_lines_count_as_blank() {
        // 末尾空白除去後は空行扱い
        assert_eq!(normalize("a\n  \n\t\n \nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "\n",
            "\n\n\n",
            "a\r\n\r\n\r\nb  ",
            "  leading\n\n\n\ntrailing \t",
            "\r\r\rx\r",
            "x\n \n \n \ny\n\n",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
