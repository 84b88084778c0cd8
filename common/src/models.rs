//! 選択可能なAIモデル

/// モデル情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// 既定モデル
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// モデル一覧（表示順）
pub const MODELS: &[ModelInfo] = &[
    ModelInfo { id: "gpt-5-nano", label: "GPT-5 Nano", icon: "🤖" },
    ModelInfo { id: "gpt-4o-mini", label: "GPT-4o Mini", icon: "⚡" },
    ModelInfo { id: "gpt-3.5-turbo", label: "GPT-3.5 Turbo", icon: "💰" },
    ModelInfo { id: "gpt-4.1-nano", label: "GPT-4.1 Nano", icon: "🤖" },
    ModelInfo { id: "grok-code-fast-1", label: "Grok Code Fast", icon: "🚀" },
];

pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

pub fn is_known_model(id: &str) -> bool {
    find_model(id).is_some()
}

/// 履歴一覧用のアイコン（未知のモデルは 🤖）
pub fn model_icon(id: &str) -> &'static str {
    find_model(id).map_or("🤖", |m| m.icon)
}
