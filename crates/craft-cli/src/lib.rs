//! # Craft CLI
//!
//! `mincecalc` 的命令列介面：參數、日誌、互動選單與單次指令

pub mod cli;
pub mod commands;
pub mod logging;
pub mod menu;
pub mod report;

pub use menu::Menu;
