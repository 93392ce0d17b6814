//! 工作階段資料：設定與配方書，每次變更後立即寫回

use std::path::{Path, PathBuf};

use craft_core::{ContainerPreference, Recipe, RecipeBook, Settings, Suffixes, UnitConfig};

use crate::json::{load_recipes, load_settings, save_recipes, save_settings};
use crate::Result;

/// 設定與配方書的持有者
#[derive(Debug)]
pub struct DataStore {
    settings_path: PathBuf,
    recipes_path: PathBuf,
    settings: Settings,
    book: RecipeBook,
}

impl DataStore {
    /// 由檔案載入（檔案不存在或損壞時使用預設值）
    pub fn open(settings_path: impl Into<PathBuf>, recipes_path: impl Into<PathBuf>) -> Self {
        let settings_path = settings_path.into();
        let recipes_path = recipes_path.into();
        let settings = load_settings(&settings_path);
        let book = load_recipes(&recipes_path);

        Self {
            settings_path,
            recipes_path,
            settings,
            book,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    pub fn unit_config(&self) -> UnitConfig {
        self.settings.unit_config()
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn recipes_path(&self) -> &Path {
        &self.recipes_path
    }

    /// 新增或取代配方並寫回，回傳被取代的舊配方
    ///
    /// 寫入失敗時記憶體中的配方書維持不變。
    pub fn add_recipe(&mut self, name: &str, recipe: Recipe) -> Result<Option<Recipe>> {
        let mut book = self.book.clone();
        let previous = book.insert(name, recipe)?;
        save_recipes(&self.recipes_path, &book)?;
        self.book = book;
        Ok(previous)
    }

    /// 切換自動換算，回傳新狀態
    pub fn toggle_auto_conversion(&mut self) -> Result<bool> {
        self.update_settings(|settings| settings.auto_conversion = !settings.auto_conversion)?;
        Ok(self.settings.auto_conversion)
    }

    /// 更新後綴，`None` 或空白表示維持原值
    pub fn set_suffixes(
        &mut self,
        stack: Option<&str>,
        shulker: Option<&str>,
        double_chest: Option<&str>,
    ) -> Result<()> {
        fn apply(target: &mut String, value: Option<&str>) {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                *target = value.to_string();
            }
        }

        self.update_settings(|settings| {
            apply(&mut settings.suffixes.stack, stack);
            apply(&mut settings.suffixes.shulker, shulker);
            apply(&mut settings.suffixes.double_chest, double_chest);
        })
    }

    /// 後綴重設為預設值
    pub fn reset_suffixes(&mut self) -> Result<()> {
        self.update_settings(|settings| settings.suffixes = Suffixes::default())
    }

    pub fn set_container_preference(&mut self, preference: ContainerPreference) -> Result<()> {
        self.update_settings(|settings| settings.container_preference = preference)
    }

    /// 驗證後寫回；驗證或寫入失敗時設定維持不變
    fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) -> Result<()> {
        let mut settings = self.settings.clone();
        change(&mut settings);
        settings.unit_config().validate()?;
        save_settings(&self.settings_path, &settings)?;
        self.settings = settings;
        Ok(())
    }
}
