//! 変更前後の比較
//!
//! クイックフォーマットの結果や `formattedCode` を元のコードと並べて表示するための差分。

use similar::{ChangeTag, DiffTag, TextDiff};

/// 比較の種類（バッジ表示に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    QuickFormat,
    TigerStyle,
}

impl ComparisonKind {
    pub fn badge(&self) -> &'static str {
        match self {
            ComparisonKind::QuickFormat => "⚡ Quick Format",
            ComparisonKind::TigerStyle => "🐅 Tiger Style Applied",
        }
    }
}

/// 変更前後のコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub before: String,
    pub after: String,
    pub kind: ComparisonKind,
}

impl Comparison {
    pub fn new(before: impl Into<String>, after: impl Into<String>, kind: ComparisonKind) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            kind,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }

    pub fn unified(&self) -> String {
        unified_diff(&self.before, &self.after)
    }

    pub fn rows(&self) -> Vec<SideBySideRow> {
        side_by_side(&self.before, &self.after)
    }

    pub fn stats(&self) -> DiffStats {
        diff_stats(&self.before, &self.after)
    }
}

/// 追加・削除行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

pub fn diff_stats(before: &str, after: &str) -> DiffStats {
    let diff = TextDiff::from_lines(before, after);
    let mut stats = DiffStats::default();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.added += 1,
            ChangeTag::Delete => stats.removed += 1,
            ChangeTag::Equal => {}
        }
    }
    stats
}

/// unified形式の差分（前後3行）
pub fn unified_diff(before: &str, after: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header("before", "after")
        .to_string()
}

/// 左右比較の1行分（行番号は1始まり）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBySideRow {
    pub left: Option<(usize, String)>,
    pub right: Option<(usize, String)>,
    pub changed: bool,
}

/// 左右に並べた差分
///
/// 置換ブロックは行ごとに左右を対応させ、余った側は空にする。
pub fn side_by_side(before: &str, after: &str) -> Vec<SideBySideRow> {
    let diff = TextDiff::from_lines(before, after);
    let old_lines = diff.old_slices();
    let new_lines = diff.new_slices();
    let line_at = |lines: &[&str], index: usize| -> Option<(usize, String)> {
        lines
            .get(index)
            .map(|line| (index + 1, line.trim_end_matches(['\n', '\r']).to_string()))
    };

    let mut rows = Vec::new();
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let height = old_range.len().max(new_range.len());

        for offset in 0..height {
            let left = if offset < old_range.len() {
                line_at(old_lines, old_range.start + offset)
            } else {
                None
            };
            let right = if offset < new_range.len() {
                line_at(new_lines, new_range.start + offset)
            } else {
                None
            };

            rows.push(SideBySideRow {
                left,
                right,
                changed: tag != DiffTag::Equal,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_comparison() {
        let comparison = Comparison::new("a\nb\n", "a\nb\n", ComparisonKind::QuickFormat);
        assert!(!comparison.is_changed());
        assert_eq!(comparison.stats(), DiffStats::default());
        assert!(comparison.rows().iter().all(|row| !row.changed));
    }

    #[test]
    fn test_side_by_side_replace() {
        let rows = side_by_side("int x=1;\nreturn x;\n", "int x = 1;\nreturn x;\n");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].changed);
        assert_eq!(rows[0].left, Some((1, "int x=1;".to_string())));
        assert_eq!(rows[0].right, Some((1, "int x = 1;".to_string())));
        assert!(!rows[1].changed);
    }

    #[test]
    fn test_side_by_side_insert_pads_left() {
        let rows = side_by_side("a\n", "a\nb\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].left, None);
        assert_eq!(rows[1].right, Some((2, "b".to_string())));
    }

    #[test]
    fn test_unified_diff_markers() {
        let diff = unified_diff("x=1\n", "x = 1\n");
        assert!(diff.contains("--- before"));
        assert!(diff.contains("+++ after"));
        assert!(diff.contains("-x=1"));
        assert!(diff.contains("+x = 1"));
    }

    #[test]
    fn test_diff_stats() {
        let stats = diff_stats("a\nb\nc\n", "a\nc\nd\ne\n");
        assert_eq!(stats, DiffStats { added: 2, removed: 1 });
    }

    #[test]
    fn test_badges() {
        assert_eq!(ComparisonKind::TigerStyle.badge(), "🐅 Tiger Style Applied");
        assert_ne!(ComparisonKind::QuickFormat.badge(), ComparisonKind::TigerStyle.badge());
    }
}
