//! 主世界 ↔ 地獄座標換算

use std::fmt;
use std::str::FromStr;

use craft_core::CraftError;
use rust_decimal::Decimal;

/// 地獄與主世界的水平比例（地獄 1 格 = 主世界 8 格）
pub const NETHER_SCALE: u32 = 8;

/// 維度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// 主世界
    Overworld,
    /// 地獄
    Nether,
}

impl Dimension {
    /// 另一個維度
    pub fn other(self) -> Self {
        match self {
            Dimension::Overworld => Dimension::Nether,
            Dimension::Nether => Dimension::Overworld,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Overworld => "主世界",
            Dimension::Nether => "地獄",
        }
    }
}

/// 方塊座標
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub x: Decimal,
    pub y: Decimal,
    pub z: Decimal,
}

impl Coordinates {
    pub fn new(x: Decimal, y: Decimal, z: Decimal) -> Self {
        Self { x, y, z }
    }

    /// 由三段文字解析座標
    pub fn parse(x: &str, y: &str, z: &str) -> craft_core::Result<Self> {
        Ok(Self::new(parse_axis(x)?, parse_axis(y)?, parse_axis(z)?))
    }

    /// 換算到另一個維度，Y 軸不變
    ///
    /// 結果超出 `Decimal` 範圍時回傳 `Calculation` 錯誤。
    pub fn convert(&self, from: Dimension) -> craft_core::Result<Self> {
        let scale = Decimal::from(NETHER_SCALE);
        let apply = |value: Decimal| {
            let converted = match from {
                Dimension::Overworld => value.checked_div(scale),
                Dimension::Nether => value.checked_mul(scale),
            };
            converted.ok_or_else(|| {
                CraftError::Calculation(format!(
                    "座標 {value} 換算到{}後超出範圍",
                    from.other().label()
                ))
            })
        };

        Ok(Self::new(apply(self.x)?, self.y, apply(self.z)?))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2})",
            self.x.round_dp(2),
            self.y.round_dp(2),
            self.z.round_dp(2)
        )
    }
}

/// 接受一般小數與科學記號（例如 `1e3`）
fn parse_axis(text: &str) -> craft_core::Result<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| CraftError::Parse(format!("'{text}' 不是有效的座標")))
}
