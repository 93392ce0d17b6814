//! # Craft Core
//!
//! 核心資料模型與類型定義

pub mod book;
pub mod config;
pub mod recipe;
pub mod unit;

// Re-export 主要類型
pub use book::RecipeBook;
pub use config::{ContainerPreference, Settings, Suffixes, UnitConfig};
pub use recipe::{Layer, Recipe, SimpleRecipe};
pub use unit::Unit;

/// 物品數量（非負整數）
pub type Quantity = u64;

/// 合成計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CraftError {
    #[error("數量格式錯誤: {0}")]
    Parse(String),

    #[error("數量不可為負數: {0}")]
    InvalidQuantity(i64),

    #[error("找不到配方: {0}")]
    RecipeNotFound(String),

    #[error("配方 '{name}' 格式錯誤: {reason}")]
    MalformedRecipe { name: String, reason: String },

    #[error("配方循環引用: {0}")]
    RecipeCycle(String),

    #[error("合成比例的輸入與輸出都必須大於零")]
    ZeroRatio,

    #[error("設定無效: {0}")]
    InvalidConfig(String),

    #[error("計算錯誤: {0}")]
    Calculation(String),
}

impl CraftError {
    /// 建立配方格式錯誤
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecipe {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CraftError>;
