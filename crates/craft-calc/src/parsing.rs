//! 數量字串解析
//!
//! 支援以逗號分隔的多段數量，例如 `"2sb, 5s, 3"`：
//! 每段為不帶正負號的整數，後面可接一個設定中的後綴（不分大小寫）。

use craft_core::{ContainerPreference, CraftError, Quantity, Unit, UnitConfig};

use crate::breakdown::Breakdown;

/// 解析整段數量字串為物品總數
pub fn parse_quantity(text: &str, config: &UnitConfig) -> craft_core::Result<Quantity> {
    let mut total: Quantity = 0;
    let mut token_count = 0;

    // 多餘的逗號產生的空段直接略過
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let amount = parse_token(token, config)?;
        total = total
            .checked_add(amount)
            .ok_or_else(|| CraftError::Parse(format!("數量過大: '{}'", text.trim())))?;
        token_count += 1;
    }

    if token_count == 0 {
        return Err(CraftError::Parse("輸入為空".to_string()));
    }

    tracing::trace!("解析數量 '{}' → {}", text.trim(), total);
    Ok(total)
}

/// 解析單段數量，例如 `"5s"`、`"2sb"`、`"10"`
pub fn parse_token(token: &str, config: &UnitConfig) -> craft_core::Result<Quantity> {
    let (count, unit) = split_token(token, config)?;
    count
        .checked_mul(unit.items_per_unit(config))
        .ok_or_else(|| CraftError::Parse(format!("數量過大: '{}'", token.trim())))
}

/// 拆成數字與單位
fn split_token(token: &str, config: &UnitConfig) -> craft_core::Result<(Quantity, Unit)> {
    let lowered = token.trim().to_lowercase();
    let (number, unit) = match_suffix(&lowered, config);
    let number = number.trim();

    if number.is_empty() {
        return Err(CraftError::Parse(format!("'{}' 缺少數字", token.trim())));
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        let digits_end = number
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(number.len());
        let rest = &number[digits_end..];

        // 開頭是整數、後面是字母：視為不認得的後綴
        if digits_end > 0 && rest.chars().all(char::is_alphabetic) {
            return Err(CraftError::Parse(format!(
                "未知的後綴 '{rest}'（可用: {}）",
                available_suffixes(config)
            )));
        }
        return Err(CraftError::Parse(format!(
            "'{}' 不是有效的非負整數",
            token.trim()
        )));
    }

    let count = number
        .parse::<Quantity>()
        .map_err(|_| CraftError::Parse(format!("數量過大: '{}'", token.trim())))?;
    Ok((count, unit))
}

/// 比對後綴，較長的後綴優先
fn match_suffix<'a>(lowered: &'a str, config: &UnitConfig) -> (&'a str, Unit) {
    for (unit, suffix) in config.suffixes_longest_first() {
        if let Some(number) = lowered.strip_suffix(suffix.to_lowercase().as_str()) {
            return (number, unit);
        }
    }
    (lowered, Unit::Item)
}

fn available_suffixes(config: &UnitConfig) -> String {
    [Unit::Stack, Unit::ShulkerBox, Unit::DoubleChest]
        .into_iter()
        .filter_map(|unit| config.suffix(unit))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 由輸入結尾的後綴推斷使用者習慣的容器
///
/// 以大箱子或界伏盒後綴結尾時回傳對應容器，其他情況回傳 `None`。
pub fn container_hint(text: &str, config: &UnitConfig) -> Option<ContainerPreference> {
    let lowered = text.trim().to_lowercase();
    let (_, unit) = match_suffix(&lowered, config);

    match unit {
        Unit::DoubleChest => Some(ContainerPreference::DoubleChest),
        Unit::ShulkerBox => Some(ContainerPreference::Shulker),
        Unit::Stack | Unit::Item => None,
    }
}

/// 將物品總數格式化為可再解析的數量字串
pub fn format_tokens(
    quantity: Quantity,
    config: &UnitConfig,
    container: ContainerPreference,
) -> String {
    Breakdown::new(quantity, config, container).to_tokens(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::Suffixes;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("2sb, 5s, 3", 3779)]
    #[case("10", 10)]
    #[case("5s", 320)]
    #[case("2SB", 3456)]
    #[case("1dc", 3456)]
    #[case(" 1 dc ", 3456)]
    #[case("5s,,3", 323)]
    #[case("0", 0)]
    fn test_parse_quantity(#[case] input: &str, #[case] expected: Quantity) {
        assert_eq!(parse_quantity(input, &UnitConfig::default()).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(",,")]
    #[case("s")]
    #[case("sb")]
    #[case("5x")]
    #[case("-5")]
    #[case("1.5s")]
    #[case("five")]
    #[case("99999999999999999999")]
    #[case("9999999999999999dc")]
    fn test_parse_errors(#[case] input: &str) {
        assert!(matches!(
            parse_quantity(input, &UnitConfig::default()),
            Err(CraftError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_suffix_message() {
        let err = parse_quantity("5x", &UnitConfig::default()).unwrap_err();
        assert!(err.to_string().contains("未知的後綴 'x'"));
    }

    #[test]
    fn test_longest_suffix_wins() {
        // 後綴長短順序與預設相反時仍須正確
        let config = UnitConfig::new(Suffixes {
            stack: "stk".to_string(),
            shulker: "k".to_string(),
            double_chest: "d".to_string(),
        });

        assert_eq!(parse_quantity("1stk", &config).unwrap(), 64);
        assert_eq!(parse_quantity("1k", &config).unwrap(), 1728);
        assert_eq!(parse_quantity("1d, 1stk", &config).unwrap(), 3520);
    }

    #[rstest]
    #[case("2dc", Some(ContainerPreference::DoubleChest))]
    #[case("5s, 1SB", Some(ContainerPreference::Shulker))]
    #[case("5s", None)]
    #[case("100", None)]
    fn test_container_hint(#[case] input: &str, #[case] expected: Option<ContainerPreference>) {
        assert_eq!(container_hint(input, &UnitConfig::default()), expected);
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_round_trips(quantity in 0u64..1_000_000_000, dc in any::<bool>()) {
            let config = UnitConfig::default();
            let container = if dc {
                ContainerPreference::DoubleChest
            } else {
                ContainerPreference::Shulker
            };

            let text = format_tokens(quantity, &config, container);
            prop_assert_eq!(parse_quantity(&text, &config).unwrap(), quantity);
        }

        #[test]
        fn prop_round_trips_with_custom_suffixes(
            config in valid_unit_config(),
            quantity in 0u64..1_000_000_000,
            dc in any::<bool>(),
        ) {
            let container = if dc {
                ContainerPreference::DoubleChest
            } else {
                ContainerPreference::Shulker
            };

            let text = format_tokens(quantity, &config, container);
            prop_assert_eq!(parse_quantity(&text, &config).unwrap(), quantity);
        }
    }

    /// 隨機後綴（含大小寫與帶重音字母），只保留通過驗證的組合
    fn valid_unit_config() -> impl Strategy<Value = UnitConfig> {
        let suffix = || "[a-zA-ZÀ-ÖØ-öø-ÿ]{1,3}";
        (suffix(), suffix(), suffix())
            .prop_map(|(stack, shulker, double_chest)| {
                UnitConfig::new(Suffixes {
                    stack,
                    shulker,
                    double_chest,
                })
            })
            .prop_filter("後綴必須通過驗證", |config| config.validate().is_ok())
    }

    #[test]
    fn test_unicode_case_suffix_parses_as_own_unit() {
        let config = UnitConfig::new(Suffixes {
            stack: "É".to_string(),
            shulker: "ö".to_string(),
            double_chest: "dc".to_string(),
        });
        config.validate().unwrap();

        assert_eq!(parse_quantity("1é", &config).unwrap(), 64);
        assert_eq!(parse_quantity("1Ö, 1É", &config).unwrap(), 1792);
    }
}
