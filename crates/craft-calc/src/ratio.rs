//! 比例合成計算（不需配方書）

use craft_core::{CraftError, Quantity};

/// 合成比例：投入 `input` 個材料產出 `output` 個成品
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftRatio {
    pub input: Quantity,
    pub output: Quantity,
}

impl CraftRatio {
    /// 創建比例，任一邊為零時回傳錯誤
    pub fn new(input: Quantity, output: Quantity) -> craft_core::Result<Self> {
        if input == 0 || output == 0 {
            return Err(CraftError::ZeroRatio);
        }
        Ok(Self { input, output })
    }

    /// 達成目標產量所需的材料（無條件進位）
    pub fn required_input(&self, desired_output: Quantity) -> craft_core::Result<Quantity> {
        let numerator = u128::from(self.input) * u128::from(desired_output);
        narrow(numerator.div_ceil(u128::from(self.output)))
    }

    /// 現有材料最多可產出的數量（無條件捨去）
    ///
    /// 材料不足一批時無法開始合成。
    pub fn achievable_output(&self, available_input: Quantity) -> craft_core::Result<Quantity> {
        let numerator = u128::from(self.output) * u128::from(available_input);
        narrow(numerator / u128::from(self.input))
    }
}

fn narrow(value: u128) -> craft_core::Result<Quantity> {
    Quantity::try_from(value)
        .map_err(|_| CraftError::Calculation(format!("結果 {value} 超出範圍")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_zero_ratio_rejected() {
        assert!(matches!(CraftRatio::new(0, 1), Err(CraftError::ZeroRatio)));
        assert!(matches!(CraftRatio::new(8, 0), Err(CraftError::ZeroRatio)));
    }

    #[rstest]
    #[case(8, 1, 5, 40)]
    #[case(8, 2, 5, 20)]
    #[case(3, 2, 5, 8)]
    #[case(1, 4, 9, 3)]
    fn test_required_input(
        #[case] input: Quantity,
        #[case] output: Quantity,
        #[case] desired: Quantity,
        #[case] expected: Quantity,
    ) {
        let ratio = CraftRatio::new(input, output).unwrap();
        assert_eq!(ratio.required_input(desired).unwrap(), expected);
    }

    #[rstest]
    #[case(8, 1, 20, 2)]
    #[case(1, 4, 3, 12)]
    #[case(9, 1, 8, 0)]
    fn test_achievable_output(
        #[case] input: Quantity,
        #[case] output: Quantity,
        #[case] available: Quantity,
        #[case] expected: Quantity,
    ) {
        let ratio = CraftRatio::new(input, output).unwrap();
        assert_eq!(ratio.achievable_output(available).unwrap(), expected);
    }

    #[test]
    fn test_overflow_reported() {
        let ratio = CraftRatio::new(u64::MAX, 1).unwrap();
        assert!(matches!(
            ratio.required_input(2),
            Err(CraftError::Calculation(_))
        ));
    }
}
