//! Code Review Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod normalizer;
pub mod quickfix;
pub mod formatter;
pub mod storage;
pub mod history;
pub mod prefs;
pub mod models;
pub mod language;
pub mod diff;
pub mod review;

pub use types::{AnalysisResult, ErrorPayload, ReviewRequest, SectionContent};
pub use error::{Error, Result};
pub use normalizer::normalize;
pub use quickfix::{apply_quick_fixes, QuickFix, ALREADY_FORMATTED};
pub use formatter::{render, RenderedDocument, Section};
pub use storage::{KeyValueStore, MemoryStore};
pub use history::{HistoryEntry, HistoryStore, MAX_HISTORY_ITEMS};
pub use prefs::LayoutMode;
pub use models::{ModelInfo, DEFAULT_MODEL, MODELS};
pub use language::{detect_language, DEFAULT_LANGUAGE};
pub use diff::{Comparison, ComparisonKind};
pub use review::{with_guidance, RequestSequencer, RequestTicket};
