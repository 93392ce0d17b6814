//! 數量拆解（容器 / 組 / 物品）

use std::fmt;

use craft_core::{ContainerPreference, CraftError, Quantity, Settings, Unit, UnitConfig};

/// 容器拆解結果
///
/// `containers * 容器容量 + stacks * 每組數量 + items == 原始數量`，
/// 且 `stacks < 每容器組數`、`items < 每組數量`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    /// 使用的容器類型
    pub container: ContainerPreference,
    /// 容器數
    pub containers: Quantity,
    /// 剩餘整組數
    pub stacks: Quantity,
    /// 剩餘物品數
    pub items: Quantity,
}

impl Breakdown {
    /// 貪婪拆解：先算容器，餘數往下層遞補
    pub fn new(quantity: Quantity, config: &UnitConfig, container: ContainerPreference) -> Self {
        let StackBreakdown { stacks, items } = StackBreakdown::new(quantity, config);
        let stacks_per_container = container.stacks_per_container(config);

        Self {
            container,
            containers: stacks / stacks_per_container,
            stacks: stacks % stacks_per_container,
            items,
        }
    }

    /// 帶號數量的入口，負數回傳錯誤
    pub fn from_signed(
        quantity: i64,
        config: &UnitConfig,
        container: ContainerPreference,
    ) -> craft_core::Result<Self> {
        let quantity =
            Quantity::try_from(quantity).map_err(|_| CraftError::InvalidQuantity(quantity))?;
        Ok(Self::new(quantity, config, container))
    }

    /// 還原為物品總數
    pub fn total(&self, config: &UnitConfig) -> Quantity {
        self.containers * self.container.unit().items_per_unit(config)
            + self.stacks * config.stack_size
            + self.items
    }

    /// 非零的組成部分（由大到小）
    pub fn parts(&self) -> Vec<(Quantity, Unit)> {
        [
            (self.containers, self.container.unit()),
            (self.stacks, Unit::Stack),
            (self.items, Unit::Item),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .collect()
    }

    /// 轉為可再解析的數量字串，例如 "2sb, 5s, 3"
    pub fn to_tokens(&self, config: &UnitConfig) -> String {
        let tokens: Vec<String> = self
            .parts()
            .into_iter()
            .map(|(count, unit)| format!("{count}{}", config.suffix(unit).unwrap_or_default()))
            .collect();

        if tokens.is_empty() {
            "0".to_string()
        } else {
            tokens.join(", ")
        }
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        if parts.is_empty() {
            return write!(f, "0 {}", Unit::Item.label());
        }

        let rendered: Vec<String> = parts
            .into_iter()
            .map(|(count, unit)| format!("{count} {}", unit.label()))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// 組拆解結果（不含容器層級）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackBreakdown {
    pub stacks: Quantity,
    pub items: Quantity,
}

impl StackBreakdown {
    pub fn new(quantity: Quantity, config: &UnitConfig) -> Self {
        Self {
            stacks: quantity / config.stack_size,
            items: quantity % config.stack_size,
        }
    }
}

impl fmt::Display for StackBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}",
            self.stacks,
            Unit::Stack.label(),
            self.items,
            Unit::Item.label()
        )
    }
}

/// 依使用者設定描述數量
///
/// 關閉自動換算時只顯示物品總數。
pub fn describe(quantity: Quantity, settings: &Settings, container: ContainerPreference) -> String {
    if !settings.auto_conversion {
        return format!("{quantity} {}", Unit::Item.label());
    }
    Breakdown::new(quantity, &settings.unit_config(), container).to_string()
}
