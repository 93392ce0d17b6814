//! 數量單位

use crate::config::UnitConfig;
use crate::Quantity;

/// 數量單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// 單一物品
    Item,
    /// 組
    Stack,
    /// 界伏盒
    ShulkerBox,
    /// 大箱子
    DoubleChest,
}

impl Unit {
    /// 每單位相當的物品數
    pub fn items_per_unit(self, config: &UnitConfig) -> Quantity {
        match self {
            Unit::Item => 1,
            Unit::Stack => config.stack_size,
            Unit::ShulkerBox => config.stack_size * config.shulker_stacks,
            Unit::DoubleChest => config.stack_size * config.double_chest_stacks,
        }
    }

    /// 顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            Unit::Item => "個物品",
            Unit::Stack => "組",
            Unit::ShulkerBox => "界伏盒",
            Unit::DoubleChest => "大箱子",
        }
    }
}
