//! 新增配方的輸入處理

use std::collections::BTreeMap;

use craft_core::recipe::validate_layers;
use craft_core::{CraftError, Layer, Quantity, Recipe, RecipeBook, SimpleRecipe};

/// 解析材料清單，格式為 `材料:數量, 材料:數量`
pub fn parse_ingredients(text: &str) -> craft_core::Result<BTreeMap<String, Quantity>> {
    let mut inputs = BTreeMap::new();

    for pair in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, quantity) = pair
            .split_once(':')
            .ok_or_else(|| CraftError::Parse(format!("'{pair}' 格式錯誤，請使用 材料:數量")))?;

        let name = RecipeBook::normalize_name(name);
        if name.is_empty() {
            return Err(CraftError::Parse(format!("'{pair}' 缺少材料名稱")));
        }

        let quantity: Quantity = quantity
            .trim()
            .parse()
            .map_err(|_| CraftError::Parse(format!("'{name}' 的數量必須為正整數")))?;
        if quantity == 0 {
            return Err(CraftError::Parse(format!("'{name}' 的數量必須大於零")));
        }

        inputs.insert(name, quantity);
    }

    if inputs.is_empty() {
        return Err(CraftError::Parse("沒有輸入任何材料".to_string()));
    }

    Ok(inputs)
}

/// 編輯中的配方
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    name: String,
    layers: Vec<Layer>,
}

impl RecipeDraft {
    /// 開始編輯名為 `name` 的配方
    pub fn new(name: &str) -> craft_core::Result<Self> {
        let name = RecipeBook::normalize_name(name);
        if name.is_empty() {
            return Err(CraftError::malformed(name, "物品名稱不可為空"));
        }
        Ok(Self {
            name,
            layers: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// 直接建立單步配方
    pub fn simple(
        &self,
        output: Quantity,
        inputs: BTreeMap<String, Quantity>,
    ) -> craft_core::Result<(String, Recipe)> {
        let recipe = SimpleRecipe { inputs, output };
        recipe.validate(&self.name)?;
        Ok((self.name.clone(), Recipe::Simple(recipe)))
    }

    /// 加入一層，立即檢查本層內容
    pub fn add_layer(
        &mut self,
        product: &str,
        output: Quantity,
        inputs: BTreeMap<String, Quantity>,
    ) -> craft_core::Result<()> {
        let product = RecipeBook::normalize_name(product);
        let label = format!("{} 第 {} 層", self.name, self.layers.len() + 1);

        if product.is_empty() {
            return Err(CraftError::malformed(label, "產物名稱不可為空"));
        }
        if self.layers.iter().any(|layer| layer.name == product) {
            return Err(CraftError::malformed(
                label,
                format!("'{product}' 已由更早的一層產出"),
            ));
        }
        if inputs.contains_key(&product) {
            return Err(CraftError::malformed(
                label,
                format!("材料 '{product}' 與本層產物相同"),
            ));
        }

        let recipe = SimpleRecipe { inputs, output };
        recipe.validate(&label)?;

        self.layers.push(Layer::new(product, recipe));
        Ok(())
    }

    /// 完成多層配方
    ///
    /// 配方以最後一層的產物命名；與起始名稱不同時以最後一層為準。
    pub fn finish(self) -> craft_core::Result<(String, Recipe)> {
        let Some(last) = self.layers.last() else {
            return Err(CraftError::malformed(self.name, "多層配方至少需要一層"));
        };

        let key = last.name.clone();
        if key != self.name {
            tracing::warn!("最後一層產物 '{}' 與配方名稱 '{}' 不同，改用 '{}'", key, self.name, key);
        }

        validate_layers(&key, &self.layers)?;
        Ok((key, Recipe::Layered { layers: self.layers }))
    }
}
