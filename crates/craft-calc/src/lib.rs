//! # Craft Calculation Engine
//!
//! 數量解析/格式化、配方展開、比例合成與座標換算

pub mod breakdown;
pub mod coords;
pub mod editor;
pub mod parsing;
pub mod ratio;
pub mod resolver;

// Re-export 主要類型
pub use breakdown::{describe, Breakdown, StackBreakdown};
pub use coords::{Coordinates, Dimension};
pub use editor::{parse_ingredients, RecipeDraft};
pub use parsing::{container_hint, format_tokens, parse_quantity};
pub use ratio::CraftRatio;
pub use resolver::{
    plan_layered, resolve_layered, resolve_simple, CraftPlan, CraftStep, RecipeResolver,
    Requirements,
};
