//! 命令列參數定義

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use craft_store::{DEFAULT_RECIPES_FILE, DEFAULT_SETTINGS_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "mincecalc",
    version,
    about = "Minecraft 物品數量換算與合成計算",
    long_about = "換算物品、組、界伏盒與大箱子的數量，並依配方書計算合成所需的基礎材料。\n\n\
                  不帶子指令時進入互動選單。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 設定檔路徑
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE, global = true)]
    pub config: PathBuf,

    /// 配方檔路徑
    #[arg(long = "recipes", value_name = "PATH", default_value = DEFAULT_RECIPES_FILE, global = true)]
    pub recipes: PathBuf,

    /// 日誌詳細程度（-v 顯示 info，-vv 顯示 debug，-q 關閉）
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// 日誌輸出格式
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 換算數量，列出組數與兩種容器的拆解
    Convert {
        /// 數量，例如 "2sb, 5s, 3"
        #[arg(value_name = "AMOUNT")]
        amount: String,
    },

    /// 依配方書計算合成所需的基礎材料
    Craft {
        /// 目標物品
        #[arg(value_name = "ITEM")]
        item: String,

        /// 目標數量，例如 "3s"
        #[arg(value_name = "AMOUNT")]
        amount: String,
    },

    /// 列出配方書
    Recipes,
}

/// 日誌格式選項
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
