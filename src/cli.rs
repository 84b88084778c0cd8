use clap::{Parser, Subcommand};
use code_review_common::LayoutMode;
use crate::export::ExportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "code-review")]
#[command(about = "AIコードレビュー・クイック整形ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// コードをAIでレビュー
    Review {
        /// 対象ファイル（`-` で標準入力）
        #[arg(required = true)]
        input: PathBuf,

        /// 言語（省略時は拡張子から判定）
        #[arg(short, long)]
        language: Option<String>,

        /// モデル（省略時は前回のモデル）
        #[arg(short, long)]
        model: Option<String>,

        /// 表示レイアウト (two-column/single-column/focus-mode)
        #[arg(long)]
        layout: Option<LayoutMode>,

        /// レビュー結果をHTMLでも保存
        #[arg(long)]
        html: Option<PathBuf>,

        /// 履歴に保存しない
        #[arg(long)]
        no_history: bool,
    },

    /// クイック整形（AIを使わない）
    Format {
        /// 対象ファイル（`-` で標準入力）
        #[arg(required = true)]
        input: PathBuf,

        /// 言語（省略時は拡張子から判定）
        #[arg(short, long)]
        language: Option<String>,

        /// 表示レイアウト (two-column/single-column/focus-mode)
        #[arg(long)]
        layout: Option<LayoutMode>,

        /// 整形結果をファイルに書き戻す
        #[arg(short, long)]
        write: bool,
    },

    /// レビュー履歴
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// 履歴のレビューをレポートとして出力
    Export {
        /// 履歴ID
        #[arg(required = true)]
        id: i64,

        /// 出力形式 (markdown/html)
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// レビューAPIのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 既定モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// 一覧（新しい順）
    List,

    /// 保存したレビューを表示
    Show {
        id: i64,
    },

    /// 1件削除
    Delete {
        id: i64,
    },

    /// 全件削除
    Clear {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },
}
