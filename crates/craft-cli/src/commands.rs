//! 單次指令

use std::io::Write;

use anyhow::Context;
use craft_calc::{container_hint, parse_quantity, RecipeResolver};
use craft_store::DataStore;

use crate::report::{write_containers, write_plan, write_recipes};

/// `convert <AMOUNT>`
pub fn run_convert<W: Write>(store: &DataStore, amount: &str, out: &mut W) -> anyhow::Result<()> {
    let quantity = parse_quantity(amount, &store.unit_config())
        .with_context(|| format!("無法解析數量 '{amount}'"))?;

    write_containers(out, quantity, store.settings())?;
    Ok(())
}

/// `craft <ITEM> <AMOUNT>`
pub fn run_craft<W: Write>(
    store: &DataStore,
    item: &str,
    amount: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let config = store.unit_config();
    let quantity =
        parse_quantity(amount, &config).with_context(|| format!("無法解析數量 '{amount}'"))?;
    if quantity == 0 {
        anyhow::bail!("目標數量必須大於零");
    }

    let plan = RecipeResolver::new(store.book())
        .resolve(item, quantity)
        .with_context(|| format!("無法計算 '{item}' 的材料"))?;

    let container =
        container_hint(amount, &config).unwrap_or(store.settings().container_preference);
    write_plan(out, &plan, store.settings(), container)?;
    Ok(())
}

/// `recipes`
pub fn run_recipes<W: Write>(store: &DataStore, out: &mut W) -> anyhow::Result<()> {
    write_recipes(out, store.book())?;
    Ok(())
}
