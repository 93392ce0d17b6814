//! 計算結果的文字輸出（選單與單次指令共用）

use std::io::{self, Write};

use craft_calc::{describe, Breakdown, CraftPlan, StackBreakdown};
use craft_core::{ContainerPreference, Quantity, Recipe, RecipeBook, Settings};

/// 物品總數與組數
pub fn write_stacks<W: Write>(out: &mut W, quantity: Quantity, settings: &Settings) -> io::Result<()> {
    let stacks = StackBreakdown::new(quantity, &settings.unit_config());

    writeln!(out, "物品總數: {quantity}")?;
    if settings.auto_conversion {
        writeln!(out, "等於: {stacks}")
    } else {
        writeln!(out, "（原始拆解: {stacks}）")
    }
}

/// 物品總數、組數與兩種容器的拆解
///
/// 關閉自動換算時不列出容器拆解。
pub fn write_containers<W: Write>(
    out: &mut W,
    quantity: Quantity,
    settings: &Settings,
) -> io::Result<()> {
    let config = settings.unit_config();

    writeln!(out, "物品總數: {quantity}")?;
    writeln!(out, "等於: {}", StackBreakdown::new(quantity, &config))?;

    if settings.auto_conversion {
        for container in [ContainerPreference::Shulker, ContainerPreference::DoubleChest] {
            let breakdown = Breakdown::new(quantity, &config, container);
            writeln!(
                out,
                " -> {}: {} ({})",
                container.unit().label(),
                breakdown,
                breakdown.to_tokens(&config)
            )?;
        }
    }
    Ok(())
}

/// 合成計畫：逐步驟列出批數與材料，最後列出基礎材料總量
pub fn write_plan<W: Write>(
    out: &mut W,
    plan: &CraftPlan,
    settings: &Settings,
    container: ContainerPreference,
) -> io::Result<()> {
    let show = |quantity: Quantity| describe(quantity, settings, container);

    writeln!(out, "合成 {} 的 '{}':", show(plan.quantity), plan.target)?;

    for (index, step) in plan.steps.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "步驟 {} ({}):", index + 1, step.name)?;
        writeln!(out, "  合成次數: {}（產出 {}）", step.crafts, show(step.produced))?;
        writeln!(out, "  所需材料:")?;
        for (item, quantity) in &step.inputs {
            match plan.producing_step(item) {
                Some(producer) => writeln!(out, "    - {item}: {}（由步驟 {} 產出）", show(*quantity), producer + 1)?,
                None => writeln!(out, "    - {item}: {}", show(*quantity))?,
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "--- 基礎材料總量 ---")?;
    if plan.base_materials.is_empty() {
        writeln!(out, "  （沒有基礎材料）")?;
    }
    for (item, quantity) in &plan.base_materials {
        writeln!(out, "  {item}: {}", show(*quantity))?;
    }
    Ok(())
}

/// 列出配方書
pub fn write_recipes<W: Write>(out: &mut W, book: &RecipeBook) -> io::Result<()> {
    if book.is_empty() {
        return writeln!(out, "尚無配方，請用選項 5 新增。");
    }

    writeln!(out, "可用配方:")?;
    for (name, recipe) in book.iter() {
        match recipe {
            Recipe::Simple(simple) => writeln!(
                out,
                "  {name}: {} -> {} {name}",
                join_inputs(simple.inputs.iter()),
                simple.output
            )?,
            Recipe::Layered { layers } => {
                let chain: Vec<&str> = layers.iter().map(|layer| layer.name.as_str()).collect();
                let output = layers.last().map(|layer| layer.recipe.output).unwrap_or_default();
                writeln!(
                    out,
                    "  {name}（{} 層）: {} -> {output} {name}",
                    layers.len(),
                    chain.join(" -> ")
                )?;
            }
        }
    }
    Ok(())
}

fn join_inputs<'a>(inputs: impl Iterator<Item = (&'a String, &'a Quantity)>) -> String {
    inputs
        .map(|(item, quantity)| format!("{quantity} {item}"))
        .collect::<Vec<_>>()
        .join(" + ")
}
