//! 表示設定（最後に使ったモデル・レイアウト）
//!
//! 設定ファイルではなくキー・バリューストレージに保存する。

use crate::error::{Error, Result};
use crate::models::{self, ModelInfo};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// モデルの保存キー
pub const MODEL_KEY: &str = "code-review-model";
/// レイアウトの保存キー
pub const LAYOUT_KEY: &str = "code-review-layout";

/// 狭い画面の境界(px)
pub const NARROW_BREAKPOINT: u32 = 768;
/// フォーカスモードを許可する幅(px)
pub const WIDE_BREAKPOINT: u32 = 1200;

/// 画面レイアウト
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    #[default]
    TwoColumn,
    SingleColumn,
    FocusMode,
}

/// 比較表示の並べ方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonStyle {
    SideBySide,
    Stacked,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [
        LayoutMode::TwoColumn,
        LayoutMode::SingleColumn,
        LayoutMode::FocusMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::TwoColumn => "two-column",
            LayoutMode::SingleColumn => "single-column",
            LayoutMode::FocusMode => "focus-mode",
        }
    }

    /// 切り替えボタンの表示名
    pub fn label(&self) -> &'static str {
        match self {
            LayoutMode::TwoColumn => "📱 Side by Side",
            LayoutMode::SingleColumn => "📄 Single Column",
            LayoutMode::FocusMode => "🎯 Focus Mode",
        }
    }

    /// 画面幅に合わせたレイアウト
    ///
    /// 狭い画面は1カラム。中間幅ではフォーカスモードを2カラムに戻す。
    pub fn for_width(self, width: u32) -> LayoutMode {
        if width < NARROW_BREAKPOINT {
            LayoutMode::SingleColumn
        } else if width < WIDE_BREAKPOINT && self == LayoutMode::FocusMode {
            LayoutMode::TwoColumn
        } else {
            self
        }
    }

    /// 変更前後の比較の並べ方
    pub fn comparison_style(&self, width: Option<u32>) -> ComparisonStyle {
        let narrow = width.is_some_and(|w| w < NARROW_BREAKPOINT);
        if *self == LayoutMode::SingleColumn || narrow {
            ComparisonStyle::Stacked
        } else {
            ComparisonStyle::SideBySide
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LayoutMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::Config(format!("Unknown layout: {}", s)))
    }
}

/// 保存済みのモデル（一覧に無いものは無視）
pub fn load_model<S: KeyValueStore + ?Sized>(store: &S) -> Option<&'static ModelInfo> {
    match store.get_item(MODEL_KEY) {
        Ok(saved) => saved.as_deref().and_then(models::find_model),
        Err(e) => {
            warn!("モデル設定の読み込みに失敗: {}", e);
            None
        }
    }
}

pub fn save_model<S: KeyValueStore + ?Sized>(store: &mut S, model: &str) {
    if let Err(e) = store.set_item(MODEL_KEY, model) {
        warn!("モデル設定の保存に失敗: {}", e);
    }
}

/// 保存済みのレイアウト（不正値は無視）
pub fn load_layout<S: KeyValueStore + ?Sized>(store: &S) -> Option<LayoutMode> {
    match store.get_item(LAYOUT_KEY) {
        Ok(saved) => saved.and_then(|s| s.parse().ok()),
        Err(e) => {
            warn!("レイアウト設定の読み込みに失敗: {}", e);
            None
        }
    }
}

pub fn save_layout<S: KeyValueStore + ?Sized>(store: &mut S, layout: LayoutMode) {
    if let Err(e) = store.set_item(LAYOUT_KEY, layout.as_str()) {
        warn!("レイアウト設定の保存に失敗: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_layout_parse_and_display() {
        for mode in LayoutMode::ALL {
            assert_eq!(mode.to_string().parse::<LayoutMode>().unwrap(), mode);
        }
        assert!("grid".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_layout_for_width() {
        assert_eq!(LayoutMode::TwoColumn.for_width(500), LayoutMode::SingleColumn);
        assert_eq!(LayoutMode::FocusMode.for_width(1000), LayoutMode::TwoColumn);
        assert_eq!(LayoutMode::FocusMode.for_width(1400), LayoutMode::FocusMode);
        assert_eq!(LayoutMode::SingleColumn.for_width(1400), LayoutMode::SingleColumn);
    }

    #[test]
    fn test_comparison_style() {
        assert_eq!(LayoutMode::TwoColumn.comparison_style(None), ComparisonStyle::SideBySide);
        assert_eq!(LayoutMode::SingleColumn.comparison_style(None), ComparisonStyle::Stacked);
        assert_eq!(LayoutMode::FocusMode.comparison_style(Some(600)), ComparisonStyle::Stacked);
    }

    #[test]
    fn test_model_preference() {
        let mut store = MemoryStore::new();
        assert!(load_model(&store).is_none());

        save_model(&mut store, "gpt-4o-mini");
        assert_eq!(load_model(&store).map(|m| m.id), Some("gpt-4o-mini"));

        // 一覧に無いモデルは復元しない
        save_model(&mut store, "retired-model");
        assert!(load_model(&store).is_none());
    }

    #[test]
    fn test_layout_preference() {
        let mut store = MemoryStore::new();
        save_layout(&mut store, LayoutMode::FocusMode);
        assert_eq!(load_layout(&store), Some(LayoutMode::FocusMode));

        store.set_item(LAYOUT_KEY, "bogus").unwrap();
        assert_eq!(load_layout(&store), None);
    }
}
