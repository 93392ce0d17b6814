//! # mincecalc
//!
//! Minecraft 物品數量換算與配方展開
//!
//! ```
//! use mincecalc::{parse_quantity, Breakdown, ContainerPreference, UnitConfig};
//!
//! let config = UnitConfig::default();
//! let total = parse_quantity("2sb, 5s, 3", &config).unwrap();
//! assert_eq!(total, 3779);
//!
//! let breakdown = Breakdown::new(total, &config, ContainerPreference::Shulker);
//! assert_eq!(breakdown.to_tokens(&config), "2sb, 5s, 3");
//! ```

pub use craft_calc::*;
pub use craft_core::*;
