//! 互動選單
//!
//! 每個選項執行完畢後重新顯示選單。操作中的錯誤只回報給使用者，不會結束程式；
//! 輸入結束（EOF）視同選擇離開。

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context};
use craft_calc::{
    container_hint, describe, parse_ingredients, parse_quantity, Coordinates, CraftRatio,
    Dimension, RecipeDraft, RecipeResolver,
};
use craft_core::{ContainerPreference, Quantity};
use craft_store::DataStore;

use crate::report::{write_containers, write_plan, write_recipes, write_stacks};

const SEPARATOR: &str = "--------------------";

/// 輸入已結束
#[derive(Debug, thiserror::Error)]
#[error("輸入已結束")]
pub struct EndOfInput;

/// 互動選單
pub struct Menu<R, W> {
    input: R,
    output: W,
    store: DataStore,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: DataStore, input: R, output: W) -> Self {
        Self {
            input,
            output,
            store,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// 取回資料與輸出
    pub fn into_inner(self) -> (DataStore, W) {
        (self.store, self.output)
    }

    /// 主迴圈，選擇離開或輸入結束時回傳
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.greet()?;

        loop {
            self.show_main_menu()?;

            let choice = match self.ask("請選擇 (1-8): ") {
                Ok(choice) => choice,
                Err(e) if e.is::<EndOfInput>() => return self.farewell(),
                Err(e) => return Err(e),
            };

            let result = match choice.as_str() {
                "1" => self.convert_to_stacks(),
                "2" => self.convert_to_containers(),
                "3" => self.ratio_helper(),
                "4" => self.advanced_crafting(),
                "5" => self.add_recipe(),
                "6" => self.convert_coordinates(),
                "7" => self.settings_menu(),
                "8" => return self.farewell(),
                _ => writeln!(self.output, "無效的選項，請輸入 1 到 8。").map_err(Into::into),
            };

            if let Err(e) = result {
                if e.is::<EndOfInput>() {
                    return self.farewell();
                }
                self.report_error(&e)?;
            }
        }
    }

    fn greet(&mut self) -> anyhow::Result<()> {
        if !self.store.book().is_empty() {
            return Ok(());
        }

        let path = self.store.recipes_path().display().to_string();
        if self.store.recipes_path().exists() {
            writeln!(self.output, "配方檔 ({path}) 沒有可用的配方。")?;
        } else {
            writeln!(self.output, "歡迎！找不到配方檔 ({path})。")?;
        }
        writeln!(self.output, "請用選項 5 新增配方。")?;
        Ok(())
    }

    fn farewell(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n再見，合成愉快！")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_main_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n--- Minecraft 合成計算小幫手 ---")?;
        writeln!(self.output, "1. 物品/容器 → 組/物品")?;
        writeln!(self.output, "2. 物品/組 → 容器拆解")?;
        writeln!(self.output, "3. 比例合成計算")?;
        writeln!(self.output, "4. 配方合成計算")?;
        writeln!(self.output, "5. 新增/編輯配方")?;
        writeln!(self.output, "6. 主世界 ↔ 地獄座標換算")?;
        writeln!(self.output, "7. 設定")?;
        writeln!(self.output, "8. 離開")?;
        writeln!(self.output, "-------------------------------------")?;
        Ok(())
    }

    fn report_error(&mut self, error: &anyhow::Error) -> anyhow::Result<()> {
        tracing::debug!("選單操作失敗: {:#}", error);
        writeln!(self.output, "錯誤: {error:#}")?;
        Ok(())
    }

    /// 讀一行並去除前後空白
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("讀取輸入失敗")?;
        if read == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    /// 讀取數量，同時回傳原始文字（用於推斷容器）
    fn ask_quantity(&mut self, prompt: &str) -> anyhow::Result<(Quantity, String)> {
        let text = self.ask(prompt)?;
        let quantity = parse_quantity(&text, &self.store.unit_config())?;
        Ok((quantity, text))
    }

    /// 讀取配方中的單一數量
    fn ask_count(&mut self, prompt: &str) -> anyhow::Result<Quantity> {
        let text = self.ask(prompt)?;
        text.parse()
            .map_err(|_| anyhow!("'{text}' 不是有效的正整數"))
    }

    fn quantity_prompt(&self, label: &str) -> String {
        let suffixes = &self.store.settings().suffixes;
        format!(
            "{label}（例如 '100', '5{s}', '2{sb}', '1{dc}' 或 '30{s}, 15'）: ",
            s = suffixes.stack,
            sb = suffixes.shulker,
            dc = suffixes.double_chest
        )
    }

    /// 以大型容器後綴結尾的輸入，顯示時改用該容器
    fn container_for(&self, text: &str) -> ContainerPreference {
        container_hint(text, &self.store.unit_config())
            .unwrap_or(self.store.settings().container_preference)
    }

    fn convert_to_stacks(&mut self) -> anyhow::Result<()> {
        let prompt = self.quantity_prompt("輸入總數量");
        let (quantity, _) = self.ask_quantity(&prompt)?;
        write_stacks(&mut self.output, quantity, self.store.settings())?;
        Ok(())
    }

    fn convert_to_containers(&mut self) -> anyhow::Result<()> {
        let prompt = self.quantity_prompt("輸入數量");
        let (quantity, _) = self.ask_quantity(&prompt)?;
        write_containers(&mut self.output, quantity, self.store.settings())?;
        Ok(())
    }

    fn ratio_helper(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n--- 比例合成計算 ---")?;
        let (input, _) = self.ask_quantity("每批需要的材料數量（例如 '8', '1s'）: ")?;
        let (output, _) = self.ask_quantity("每批產出的數量（例如 '1', '4'）: ")?;
        let ratio = CraftRatio::new(input, output)?;

        writeln!(self.output, "\n選擇計算方式:")?;
        writeln!(self.output, "1. 由目標產量計算所需材料")?;
        writeln!(self.output, "2. 由現有材料計算可產出數量")?;
        let choice = self.ask("輸入 1 或 2: ")?;
        let settings = self.store.settings().clone();

        match choice.as_str() {
            "1" => {
                let prompt = self.quantity_prompt("目標產量");
                let (desired, text) = self.ask_quantity(&prompt)?;
                if desired == 0 {
                    bail!("目標產量必須大於零");
                }
                let container = self.container_for(&text);
                let required = ratio.required_input(desired)?;

                writeln!(self.output, "\n目標產量: {}", describe(desired, &settings, container))?;
                writeln!(self.output, "需要材料: {}", describe(required, &settings, container))?;
            }
            "2" => {
                let prompt = self.quantity_prompt("現有材料");
                let (available, _) = self.ask_quantity(&prompt)?;
                let container = settings.container_preference;
                let produced = ratio.achievable_output(available)?;

                writeln!(self.output, "\n現有材料: {}", describe(available, &settings, container))?;
                writeln!(self.output, "可產出: {}", describe(produced, &settings, container))?;
            }
            _ => writeln!(self.output, "無效的選擇，請輸入 1 或 2。")?,
        }
        Ok(())
    }

    fn advanced_crafting(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n--- 配方合成計算 ---")?;
        write_recipes(&mut self.output, self.store.book())?;
        if self.store.book().is_empty() {
            return Ok(());
        }

        let target = self.ask("\n輸入目標物品名稱: ")?;
        self.store.book().lookup(&target)?;

        let prompt = self.quantity_prompt("目標數量");
        let (quantity, text) = self.ask_quantity(&prompt)?;
        if quantity == 0 {
            bail!("目標數量必須大於零");
        }
        let container = self.container_for(&text);

        let plan = RecipeResolver::new(self.store.book()).resolve(&target, quantity)?;

        writeln!(self.output, "{SEPARATOR}")?;
        write_plan(&mut self.output, &plan, self.store.settings(), container)?;
        writeln!(self.output, "{SEPARATOR}")?;
        Ok(())
    }

    fn add_recipe(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n--- 新增配方 ---")?;
        let name = self.ask("最終產物名稱（例如 'iron_ingot', 'hopper'）: ")?;
        let mut draft = RecipeDraft::new(&name)?;
        let requested = draft.name().to_string();

        if self.store.book().contains(&requested) {
            let answer = self.ask(&format!("'{requested}' 已有配方，要覆蓋嗎？(y/N): "))?;
            if !answer.eq_ignore_ascii_case("y") {
                writeln!(self.output, "已取消新增配方。")?;
                return Ok(());
            }
        }

        let layers = self.ask("這個配方有幾個合成步驟（層）？單步合成請輸入 1: ")?;
        let layers: usize = layers
            .parse()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| anyhow!("層數必須是正整數"))?;

        let (key, recipe) = if layers == 1 {
            let output = self.ask_count(&format!("每次合成產出幾個 '{requested}': "))?;
            let inputs = self.ask("材料（格式: 材料:數量, 材料:數量，例如 plank:8）: ")?;
            draft.simple(output, parse_ingredients(&inputs)?)?
        } else {
            for layer in 1..=layers {
                writeln!(self.output, "\n--- 第 {layer} 層 ---")?;
                let prompt = if layer == layers {
                    format!("本層產物（應為最終產物 '{requested}'）: ")
                } else {
                    "本層產物（例如 'stick'）: ".to_string()
                };
                let product = self.ask(&prompt)?;
                let output = self.ask_count(&format!("每次合成產出幾個 '{product}': "))?;
                let inputs = self.ask(&format!("第 {layer} 層的材料（格式: 材料:數量, 材料:數量）: "))?;
                draft.add_layer(&product, output, parse_ingredients(&inputs)?)?;
            }
            draft.finish()?
        };

        if key != requested {
            writeln!(self.output, "配方名稱改為最後一層的產物 '{key}'。")?;
        }

        self.store.add_recipe(&key, recipe)?;
        writeln!(self.output, "\n已儲存 '{key}' 的配方。")?;
        Ok(())
    }

    fn convert_coordinates(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n--- 主世界 ↔ 地獄座標換算 ---")?;
        writeln!(self.output, "1. 主世界 → 地獄")?;
        writeln!(self.output, "2. 地獄 → 主世界")?;

        let from = match self.ask("輸入 1 或 2: ")?.as_str() {
            "1" => Dimension::Overworld,
            "2" => Dimension::Nether,
            _ => {
                writeln!(self.output, "無效的選擇，請輸入 1 或 2。")?;
                return Ok(());
            }
        };

        let x = self.ask("X 座標: ")?;
        let y = self.ask("Y 座標: ")?;
        let z = self.ask("Z 座標: ")?;
        let coordinates = Coordinates::parse(&x, &y, &z)?;
        let converted = coordinates.convert(from)?;

        writeln!(self.output, "\n{} {}", from.label(), coordinates)?;
        writeln!(self.output, "  -> {} {}", from.other().label(), converted)?;
        Ok(())
    }

    fn settings_menu(&mut self) -> anyhow::Result<()> {
        loop {
            let settings = self.store.settings().clone();
            let suffixes = &settings.suffixes;

            writeln!(self.output, "\n--- 設定 ---")?;
            writeln!(
                self.output,
                "1. 切換自動換算（目前: {}）",
                if settings.auto_conversion { "開啟" } else { "關閉" }
            )?;
            writeln!(
                self.output,
                "2. 變更後綴（目前: 組='{}', 界伏盒='{}', 大箱子='{}'）",
                suffixes.stack, suffixes.shulker, suffixes.double_chest
            )?;
            writeln!(
                self.output,
                "3. 變更預設容器（目前: '{}'）",
                settings.container_preference.code()
            )?;
            writeln!(self.output, "4. 後綴重設為預設值")?;
            writeln!(self.output, "5. 返回主選單")?;

            let result = match self.ask("請選擇 (1-5): ")?.as_str() {
                "1" => self.toggle_auto_conversion(),
                "2" => self.change_suffixes(),
                "3" => self.change_container_preference(),
                "4" => self.reset_suffixes(),
                "5" => return Ok(()),
                _ => writeln!(self.output, "無效的選項，請輸入 1 到 5。").map_err(Into::into),
            };

            if let Err(e) = result {
                if e.is::<EndOfInput>() {
                    return Err(e);
                }
                self.report_error(&e)?;
            }
        }
    }

    fn toggle_auto_conversion(&mut self) -> anyhow::Result<()> {
        let enabled = self.store.toggle_auto_conversion()?;
        writeln!(
            self.output,
            "自動換算已{}。",
            if enabled { "開啟" } else { "關閉" }
        )?;
        Ok(())
    }

    fn change_suffixes(&mut self) -> anyhow::Result<()> {
        let current = self.store.settings().suffixes.clone();

        writeln!(self.output, "輸入新的後綴（留空則維持不變）:")?;
        let stack = self.ask(&format!("  組的後綴（目前: '{}'）: ", current.stack))?;
        let shulker = self.ask(&format!("  界伏盒的後綴（目前: '{}'）: ", current.shulker))?;
        let double_chest =
            self.ask(&format!("  大箱子的後綴（目前: '{}'）: ", current.double_chest))?;

        self.store
            .set_suffixes(Some(&stack), Some(&shulker), Some(&double_chest))?;
        writeln!(self.output, "後綴已更新。")?;
        Ok(())
    }

    fn change_container_preference(&mut self) -> anyhow::Result<()> {
        let code = self.ask("預設容器（'sb' 為界伏盒，'dc' 為大箱子）: ")?;

        match ContainerPreference::from_code(&code) {
            Some(preference) => {
                self.store.set_container_preference(preference)?;
                writeln!(self.output, "預設容器已更新。")?;
            }
            None => writeln!(self.output, "無效的容器，請輸入 'sb' 或 'dc'。")?,
        }
        Ok(())
    }

    fn reset_suffixes(&mut self) -> anyhow::Result<()> {
        self.store.reset_suffixes()?;
        writeln!(self.output, "後綴已重設為預設值。")?;
        Ok(())
    }
}
