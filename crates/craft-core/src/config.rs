//! 單位與設定模型

use serde::{Deserialize, Serialize};

use crate::unit::Unit;
use crate::{CraftError, Quantity};

/// 每組物品數
pub const STACK_SIZE: Quantity = 64;

/// 每個界伏盒的組數
pub const SHULKER_STACKS: Quantity = 27;

/// 每個大箱子的組數
pub const DOUBLE_CHEST_STACKS: Quantity = 54;

/// 數量後綴
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suffixes {
    /// 組
    pub stack: String,

    /// 界伏盒
    pub shulker: String,

    /// 大箱子
    pub double_chest: String,
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            stack: "s".to_string(),
            shulker: "sb".to_string(),
            double_chest: "dc".to_string(),
        }
    }
}

/// 容器偏好（格式化時優先使用的大型容器）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerPreference {
    /// 界伏盒
    #[default]
    #[serde(rename = "sb")]
    Shulker,

    /// 大箱子
    #[serde(rename = "dc")]
    DoubleChest,
}

impl ContainerPreference {
    /// 設定檔中的代碼
    pub fn code(self) -> &'static str {
        match self {
            ContainerPreference::Shulker => "sb",
            ContainerPreference::DoubleChest => "dc",
        }
    }

    /// 由代碼解析（不分大小寫）
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "sb" => Some(ContainerPreference::Shulker),
            "dc" => Some(ContainerPreference::DoubleChest),
            _ => None,
        }
    }

    /// 對應的單位
    pub fn unit(self) -> Unit {
        match self {
            ContainerPreference::Shulker => Unit::ShulkerBox,
            ContainerPreference::DoubleChest => Unit::DoubleChest,
        }
    }

    /// 每個容器的組數
    pub fn stacks_per_container(self, config: &UnitConfig) -> Quantity {
        match self {
            ContainerPreference::Shulker => config.shulker_stacks,
            ContainerPreference::DoubleChest => config.double_chest_stacks,
        }
    }
}

/// 使用者設定（持久化於 config.json）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 是否自動換算成容器/組
    pub auto_conversion: bool,

    /// 數量後綴
    pub suffixes: Suffixes,

    /// 預設容器偏好
    pub container_preference: ContainerPreference,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_conversion: true,
            suffixes: Suffixes::default(),
            container_preference: ContainerPreference::default(),
        }
    }
}

impl Settings {
    /// 建構器模式：設置自動換算
    pub fn with_auto_conversion(mut self, enabled: bool) -> Self {
        self.auto_conversion = enabled;
        self
    }

    /// 建構器模式：設置後綴
    pub fn with_suffixes(mut self, suffixes: Suffixes) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// 建構器模式：設置容器偏好
    pub fn with_container_preference(mut self, preference: ContainerPreference) -> Self {
        self.container_preference = preference;
        self
    }

    /// 轉換為單位設定
    pub fn unit_config(&self) -> UnitConfig {
        UnitConfig::new(self.suffixes.clone())
    }
}

/// 單位換算設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConfig {
    /// 每組物品數
    pub stack_size: Quantity,

    /// 每個界伏盒的組數
    pub shulker_stacks: Quantity,

    /// 每個大箱子的組數
    pub double_chest_stacks: Quantity,

    /// 數量後綴
    pub suffixes: Suffixes,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self::new(Suffixes::default())
    }
}

impl UnitConfig {
    /// 以遊戲固定尺寸創建單位設定
    pub fn new(suffixes: Suffixes) -> Self {
        Self {
            stack_size: STACK_SIZE,
            shulker_stacks: SHULKER_STACKS,
            double_chest_stacks: DOUBLE_CHEST_STACKS,
            suffixes,
        }
    }

    /// 某單位的後綴（物品本身沒有後綴）
    pub fn suffix(&self, unit: Unit) -> Option<&str> {
        match unit {
            Unit::Item => None,
            Unit::Stack => Some(self.suffixes.stack.as_str()),
            Unit::ShulkerBox => Some(self.suffixes.shulker.as_str()),
            Unit::DoubleChest => Some(self.suffixes.double_chest.as_str()),
        }
    }

    /// 依後綴長度由長到短排列的單位
    ///
    /// 解析時必須先比對較長的後綴，"sb" 才不會被誤判為 "s"。
    pub fn suffixes_longest_first(&self) -> Vec<(Unit, &str)> {
        let mut pairs: Vec<(Unit, &str)> = [Unit::DoubleChest, Unit::ShulkerBox, Unit::Stack]
            .into_iter()
            .filter_map(|unit| self.suffix(unit).map(|suffix| (unit, suffix)))
            .collect();
        pairs.sort_by_key(|(_, suffix)| std::cmp::Reverse(suffix.to_lowercase().len()));
        pairs
    }

    /// 驗證設定
    pub fn validate(&self) -> crate::Result<()> {
        if self.stack_size == 0 || self.shulker_stacks == 0 || self.double_chest_stacks == 0 {
            return Err(CraftError::InvalidConfig("容量必須為正整數".to_string()));
        }

        let suffixes = [
            &self.suffixes.stack,
            &self.suffixes.shulker,
            &self.suffixes.double_chest,
        ];

        for suffix in suffixes {
            if suffix.trim().is_empty() {
                return Err(CraftError::InvalidConfig("後綴不可為空".to_string()));
            }
            if suffix
                .chars()
                .any(|c| c.is_ascii_digit() || c.is_whitespace() || c == ',')
            {
                return Err(CraftError::InvalidConfig(format!(
                    "後綴 '{suffix}' 不可包含數字、空白或逗號"
                )));
            }
        }

        // 解析時以 Unicode 小寫比對，唯一性也必須以同樣方式判斷
        let lowered = suffixes.map(|suffix| suffix.to_lowercase());
        for (i, a) in lowered.iter().enumerate() {
            for b in lowered.iter().skip(i + 1) {
                if a == b {
                    return Err(CraftError::InvalidConfig(format!("後綴 '{a}' 重複")));
                }
            }
        }

        Ok(())
    }
}
