//! 配方書

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;
use crate::CraftError;

/// 配方書：小寫物品名稱 → 配方
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeBook {
    /// 創建空的配方書
    pub fn new() -> Self {
        Self::default()
    }

    /// 正規化物品名稱
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// 查詢配方（不分大小寫）
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(&Self::normalize_name(name))
    }

    /// 查詢配方，找不到時回傳錯誤
    pub fn lookup(&self, name: &str) -> crate::Result<&Recipe> {
        self.get(name)
            .ok_or_else(|| CraftError::RecipeNotFound(Self::normalize_name(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 驗證後加入配方，回傳被取代的舊配方
    pub fn insert(&mut self, name: &str, recipe: Recipe) -> crate::Result<Option<Recipe>> {
        let key = Self::normalize_name(name);
        if key.is_empty() {
            return Err(CraftError::malformed(name, "物品名稱不可為空"));
        }
        recipe.validate(&key)?;
        Ok(self.recipes.insert(key, recipe))
    }

    /// 依名稱排序的配方
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recipe)> {
        self.recipes.iter().map(|(name, recipe)| (name.as_str(), recipe))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::SimpleRecipe;

    #[test]
    fn test_insert_and_lookup_case_insensitive() {
        let mut book = RecipeBook::new();
        let chest = Recipe::Simple(SimpleRecipe::new(1).with_input("plank", 8));

        let previous = book.insert(" Chest ", chest.clone()).unwrap();
        assert!(previous.is_none());

        assert_eq!(book.lookup("CHEST").unwrap(), &chest);
        assert!(book.contains("chest"));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_insert_returns_replaced_recipe() {
        let mut book = RecipeBook::new();
        let first = Recipe::Simple(SimpleRecipe::new(1).with_input("plank", 8));
        let second = Recipe::Simple(SimpleRecipe::new(2).with_input("plank", 8));

        book.insert("chest", first.clone()).unwrap();
        let previous = book.insert("chest", second).unwrap();

        assert_eq!(previous, Some(first));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_insert_rejects_invalid_recipe() {
        let mut book = RecipeBook::new();
        let broken = Recipe::Simple(SimpleRecipe::new(0).with_input("x", 1));

        assert!(matches!(
            book.insert("x", broken),
            Err(CraftError::MalformedRecipe { .. })
        ));
        assert!(book.is_empty());
    }

    #[test]
    fn test_lookup_missing_recipe() {
        let book = RecipeBook::new();

        match book.lookup("Beacon") {
            Err(CraftError::RecipeNotFound(name)) => assert_eq!(name, "beacon"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
