//! 配方展開：由目標產量推算基礎材料
//!
//! 每一步都以整批合成計算（批數無條件進位），進位造成的多餘產出不另外回報。

use std::collections::{BTreeMap, HashMap, HashSet};

use craft_core::recipe::validate_layers;
use craft_core::{CraftError, Layer, Quantity, Recipe, RecipeBook, SimpleRecipe};

/// 物品名稱 → 數量
pub type Requirements = BTreeMap<String, Quantity>;

/// 單一合成步驟
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftStep {
    /// 產物
    pub name: String,
    /// 合成批數
    pub crafts: Quantity,
    /// 實際產出（可能多於需求）
    pub produced: Quantity,
    /// 本步驟投入的材料
    pub inputs: Requirements,
}

/// 合成計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftPlan {
    /// 目標物品
    pub target: String,
    /// 目標數量
    pub quantity: Quantity,
    /// 合成步驟（依合成順序）
    pub steps: Vec<CraftStep>,
    /// 基礎材料總量
    pub base_materials: Requirements,
}

impl CraftPlan {
    /// 產出某物品的步驟序號
    pub fn producing_step(&self, item: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.name == item)
    }
}

/// 單步配方展開
pub fn resolve_simple(recipe: &SimpleRecipe, desired: Quantity) -> craft_core::Result<Requirements> {
    craft_step("未命名配方", recipe, desired).map(|step| step.inputs)
}

/// 多層配方展開，只回傳基礎材料
pub fn resolve_layered(layers: &[Layer], desired: Quantity) -> craft_core::Result<Requirements> {
    plan_layered(layers, desired).map(|plan| plan.base_materials)
}

/// 多層配方展開
///
/// 由最後一層往前推：每層依下游累積的需求量計算批數，
/// 再把材料需求併入累計表。最後不屬於任何一層產物的項目即為基礎材料。
pub fn plan_layered(layers: &[Layer], desired: Quantity) -> craft_core::Result<CraftPlan> {
    let target = layers
        .last()
        .map(|layer| layer.name.clone())
        .unwrap_or_else(|| "多層配方".to_string());
    validate_layers(&target, layers)?;

    let produced: HashSet<&str> = layers.iter().map(|l| l.name.as_str()).collect();
    let mut needed: HashMap<String, Quantity> = HashMap::new();
    needed.insert(target.clone(), desired);

    let mut steps = Vec::with_capacity(layers.len());

    for layer in layers.iter().rev() {
        let need = match needed.get(&layer.name) {
            Some(&need) if need > 0 => need,
            _ => {
                tracing::debug!("{} 沒有下游需求，略過此層", layer.name);
                continue;
            }
        };

        let step = craft_step(&layer.name, &layer.recipe, need)?;
        for (item, quantity) in &step.inputs {
            add_demand(&mut needed, item, *quantity)?;
        }
        steps.push(step);
    }

    steps.reverse();

    let base_materials = needed
        .into_iter()
        .filter(|(item, _)| !produced.contains(item.as_str()))
        .collect();

    Ok(CraftPlan {
        target,
        quantity: desired,
        steps,
        base_materials,
    })
}

/// 計算單一步驟：批數 = ceil(需求 / 每批產出)
fn craft_step(name: &str, recipe: &SimpleRecipe, needed: Quantity) -> craft_core::Result<CraftStep> {
    recipe.validate(name)?;

    let crafts = needed.div_ceil(recipe.output);
    let produced = crafts
        .checked_mul(recipe.output)
        .ok_or_else(|| overflow(name))?;

    let inputs = recipe
        .inputs
        .iter()
        .map(|(item, per_craft)| {
            crafts
                .checked_mul(*per_craft)
                .map(|total| (item.clone(), total))
                .ok_or_else(|| overflow(name))
        })
        .collect::<craft_core::Result<Requirements>>()?;

    tracing::debug!(
        "合成 {}: 需求 {}, 批數 {}, 產出 {}",
        name,
        needed,
        crafts,
        produced
    );

    Ok(CraftStep {
        name: name.to_string(),
        crafts,
        produced,
        inputs,
    })
}

fn add_demand(
    demand: &mut HashMap<String, Quantity>,
    item: &str,
    quantity: Quantity,
) -> craft_core::Result<()> {
    let entry = demand.entry(item.to_string()).or_insert(0);
    *entry = entry.checked_add(quantity).ok_or_else(|| overflow(item))?;
    Ok(())
}

fn overflow(name: &str) -> CraftError {
    CraftError::Calculation(format!("'{name}' 的數量超出範圍"))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Done,
}

/// 以配方書展開配方
pub struct RecipeResolver<'a> {
    book: &'a RecipeBook,
}

impl<'a> RecipeResolver<'a> {
    pub fn new(book: &'a RecipeBook) -> Self {
        Self { book }
    }

    /// 主展開入口
    ///
    /// 多層配方只在自身的層之間展開。單步配方的材料若在配方書中也有單步配方，
    /// 會一併展開，直到只剩基礎材料。
    pub fn resolve(&self, item: &str, desired: Quantity) -> craft_core::Result<CraftPlan> {
        let key = RecipeBook::normalize_name(item);
        let recipe = self.book.lookup(&key)?;

        tracing::info!("展開配方 {} x {}", key, desired);

        match recipe {
            Recipe::Layered { layers } => {
                let mut plan = plan_layered(layers, desired)?;
                plan.target = key;
                Ok(plan)
            }
            Recipe::Simple(_) => self.expand_simple(&key, desired),
        }
    }

    /// 可再展開的單步配方
    fn simple_recipe(&self, item: &str) -> Option<&'a SimpleRecipe> {
        match self.book.get(item) {
            Some(Recipe::Simple(recipe)) => Some(recipe),
            _ => None,
        }
    }

    /// 依拓撲順序（產物在前、材料在後）累計需求後逐一計算
    fn expand_simple(&self, target: &str, desired: Quantity) -> craft_core::Result<CraftPlan> {
        let order = self.topological_order(target)?;
        tracing::debug!("展開順序: {:?}", order);

        let mut demand: HashMap<String, Quantity> = HashMap::new();
        demand.insert(target.to_string(), desired);

        let mut steps = Vec::new();
        let mut base_materials = Requirements::new();

        for item in &order {
            let need = demand.get(item).copied().unwrap_or(0);
            if need == 0 {
                continue;
            }
            let Some(recipe) = self.simple_recipe(item) else {
                continue;
            };

            let step = craft_step(item, recipe, need)?;
            for (input, quantity) in &step.inputs {
                let input = RecipeBook::normalize_name(input);
                if self.simple_recipe(&input).is_some() {
                    add_demand(&mut demand, &input, *quantity)?;
                } else {
                    let entry = base_materials.entry(input).or_insert(0);
                    *entry = entry
                        .checked_add(*quantity)
                        .ok_or_else(|| overflow(item))?;
                }
            }
            steps.push(step);
        }

        steps.reverse();

        Ok(CraftPlan {
            target: target.to_string(),
            quantity: desired,
            steps,
            base_materials,
        })
    }

    /// 拓撲排序：回傳從目標出發可達、且有單步配方的物品
    fn topological_order(&self, target: &str) -> craft_core::Result<Vec<String>> {
        let mut states: HashMap<String, VisitState> = HashMap::new();
        let mut order = Vec::new();
        let mut path = Vec::new();

        self.visit(target, &mut states, &mut order, &mut path)?;

        order.reverse();
        Ok(order)
    }

    fn visit(
        &self,
        item: &str,
        states: &mut HashMap<String, VisitState>,
        order: &mut Vec<String>,
        path: &mut Vec<String>,
    ) -> craft_core::Result<()> {
        match states.get(item) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::Visiting) => {
                path.push(item.to_string());
                return Err(CraftError::RecipeCycle(path.join(" → ")));
            }
            None => {}
        }

        let Some(recipe) = self.simple_recipe(item) else {
            return Ok(());
        };

        states.insert(item.to_string(), VisitState::Visiting);
        path.push(item.to_string());

        for input in recipe.inputs.keys() {
            self.visit(&RecipeBook::normalize_name(input), states, order, path)?;
        }

        path.pop();
        states.insert(item.to_string(), VisitState::Done);
        order.push(item.to_string());
        Ok(())
    }
}
