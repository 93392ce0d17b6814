//! 配方模型

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{CraftError, Quantity};

/// 單步配方：一批投入 `inputs`，產出 `output` 個成品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleRecipe {
    /// 每批所需材料
    #[serde(deserialize_with = "deserialize_counts")]
    pub inputs: BTreeMap<String, Quantity>,

    /// 每批產出數量
    #[serde(deserialize_with = "deserialize_count")]
    pub output: Quantity,
}

impl SimpleRecipe {
    /// 創建新的單步配方
    pub fn new(output: Quantity) -> Self {
        Self {
            inputs: BTreeMap::new(),
            output,
        }
    }

    /// 建構器模式：添加材料
    pub fn with_input(mut self, item: impl Into<String>, quantity: Quantity) -> Self {
        self.inputs.insert(item.into(), quantity);
        self
    }

    /// 驗證配方（產出與材料數量必須為正）
    pub fn validate(&self, name: &str) -> crate::Result<()> {
        if self.output == 0 {
            return Err(CraftError::malformed(name, "產出數量必須大於零"));
        }
        if self.inputs.is_empty() {
            return Err(CraftError::malformed(name, "缺少材料"));
        }
        for (item, quantity) in &self.inputs {
            if item.trim().is_empty() {
                return Err(CraftError::malformed(name, "材料名稱不可為空"));
            }
            if *quantity == 0 {
                return Err(CraftError::malformed(
                    name,
                    format!("材料 '{item}' 的數量必須大於零"),
                ));
            }
        }
        Ok(())
    }
}

/// 多層配方中的一層（附帶產物名稱的單步配方）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// 本層產物
    pub name: String,

    #[serde(flatten)]
    pub recipe: SimpleRecipe,
}

impl Layer {
    pub fn new(name: impl Into<String>, recipe: SimpleRecipe) -> Self {
        Self {
            name: name.into(),
            recipe,
        }
    }
}

/// 配方
///
/// 多層配方依合成順序儲存：每層的材料只能是基礎材料或更早一層的產物。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipe {
    /// 多層配方
    Layered { layers: Vec<Layer> },

    /// 單步配方
    Simple(SimpleRecipe),
}

impl Recipe {
    /// 由 JSON 值解碼並驗證
    pub fn from_value(name: &str, value: serde_json::Value) -> crate::Result<Self> {
        let recipe: Recipe = serde_json::from_value(value)
            .map_err(|e| CraftError::malformed(name, e.to_string()))?;
        recipe.validate(name)?;
        Ok(recipe)
    }

    pub fn is_layered(&self) -> bool {
        matches!(self, Recipe::Layered { .. })
    }

    /// 驗證配方
    pub fn validate(&self, name: &str) -> crate::Result<()> {
        match self {
            Recipe::Simple(recipe) => recipe.validate(name),
            Recipe::Layered { layers } => validate_layers(name, layers),
        }
    }
}

/// 驗證多層配方的順序與內容
pub fn validate_layers(name: &str, layers: &[Layer]) -> crate::Result<()> {
    if layers.is_empty() {
        return Err(CraftError::malformed(name, "多層配方至少需要一層"));
    }

    let products: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, layer) in layers.iter().enumerate() {
        let layer_label = format!("{name} 第 {} 層", index + 1);

        if layer.name.trim().is_empty() {
            return Err(CraftError::malformed(layer_label, "產物名稱不可為空"));
        }
        if !seen.insert(layer.name.as_str()) {
            return Err(CraftError::malformed(
                layer_label,
                format!("'{}' 已由更早的一層產出", layer.name),
            ));
        }

        layer.recipe.validate(&layer_label)?;

        for item in layer.recipe.inputs.keys() {
            if item == &layer.name {
                return Err(CraftError::malformed(
                    layer_label,
                    format!("材料 '{item}' 與本層產物相同"),
                ));
            }
            if products[index + 1..].contains(&item.as_str()) {
                return Err(CraftError::malformed(
                    layer_label,
                    format!("材料 '{item}' 由之後的層產出"),
                ));
            }
        }
    }

    Ok(())
}

/// 接受整數或整數值的浮點數（舊版檔案會寫成 4.0）
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(u64),
    Float(f64),
}

impl RawCount {
    fn into_quantity<E: serde::de::Error>(self) -> Result<Quantity, E> {
        match self {
            RawCount::Int(value) => Ok(value),
            RawCount::Float(value)
                if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 =>
            {
                Ok(value as Quantity)
            }
            RawCount::Float(value) => Err(E::custom(format!(
                "數量必須為非負整數，收到 {value}"
            ))),
        }
    }
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Quantity, D::Error>
where
    D: Deserializer<'de>,
{
    RawCount::deserialize(deserializer)?.into_quantity()
}

fn deserialize_counts<'de, D>(deserializer: D) -> Result<BTreeMap<String, Quantity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, RawCount> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(item, count)| Ok((item, count.into_quantity::<D::Error>()?)))
        .collect()
}
