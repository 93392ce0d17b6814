//! # Craft Store
//!
//! 設定檔與配方書的 JSON 持久化

use std::path::PathBuf;

use craft_core::CraftError;

pub mod json;
pub mod session;

// Re-export 主要類型
pub use json::{load_recipes, load_settings, save_recipes, save_settings};
pub use session::DataStore;

/// 預設設定檔
pub const DEFAULT_SETTINGS_FILE: &str = "config.json";

/// 預設配方檔
pub const DEFAULT_RECIPES_FILE: &str = "recipes.json";

/// 儲存錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("無法存取 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} 的 JSON 格式錯誤: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} 的內容無效: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error(transparent)]
    Invalid(#[from] CraftError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
