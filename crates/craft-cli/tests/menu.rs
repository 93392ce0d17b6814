//! 互動選單測試（記憶體內的輸入輸出）

use std::fs;
use std::path::Path;

use craft_cli::commands::{run_convert, run_craft};
use craft_cli::Menu;
use craft_core::ContainerPreference;
use craft_store::DataStore;
use rstest::rstest;
use tempfile::{tempdir, TempDir};

fn open_store(dir: &TempDir) -> DataStore {
    DataStore::open(dir.path().join("config.json"), dir.path().join("recipes.json"))
}

/// 執行選單並回傳輸出與結束後的資料
fn run_menu(dir: &TempDir, script: &str) -> (String, DataStore) {
    let mut menu = Menu::new(open_store(dir), script.as_bytes(), Vec::new());
    menu.run().unwrap();
    let (store, output) = menu.into_inner();
    (String::from_utf8(output).unwrap(), store)
}

fn write_hopper_recipes(path: &Path) {
    fs::write(
        path,
        r#"{"recipes": {"hopper": {"layers": [
            {"name": "plank", "inputs": {"log": 1}, "output": 4},
            {"name": "chest", "inputs": {"plank": 8}, "output": 1},
            {"name": "hopper", "inputs": {"chest": 1, "iron_ingot": 5}, "output": 1}
        ]}}}"#,
    )
    .unwrap();
}

#[rstest]
#[case::exit_option("8\n")]
#[case::end_of_input("")]
#[case::end_of_input_mid_action("2\n")]
fn test_menu_exits_cleanly(#[case] script: &str) {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, script);

    assert!(output.contains("再見"));
}

#[test]
fn test_greeting_when_no_recipe_file() {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, "8\n");

    assert!(output.contains("找不到配方檔"));
    assert!(output.contains("1. 物品/容器 → 組/物品"));
}

#[test]
fn test_convert_to_containers() {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, "2\n2sb, 5s, 3\n8\n");

    assert!(output.contains("物品總數: 3779"));
    assert!(output.contains("2 界伏盒, 5 組, 3 個物品"));
    assert!(output.contains("1 大箱子, 5 組, 3 個物品"));
}

#[test]
fn test_convert_to_stacks() {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, "1\n130\n8\n");

    assert!(output.contains("等於: 2 組, 2 個物品"));
}

#[test]
fn test_errors_do_not_end_session() {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, "1\n5x\n9\n1\n64\n8\n");

    assert!(output.contains("錯誤: 數量格式錯誤"));
    assert!(output.contains("無效的選項"));
    assert!(output.contains("等於: 1 組, 0 個物品"));
    assert!(output.contains("再見"));
}

#[rstest]
#[case::required_input("3\n1\n4\n1\n10\n8\n", "需要材料: 3 個物品")]
#[case::achievable_output("3\n8\n1\n2\n20\n8\n", "可產出: 2 個物品")]
#[case::zero_ratio("3\n0\n1\n8\n", "錯誤: 合成比例")]
fn test_ratio_helper(#[case] script: &str, #[case] expected: &str) {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, script);

    assert!(output.contains(expected), "missing {expected:?} in:\n{output}");
}

#[test]
fn test_add_simple_recipe_and_craft() {
    let dir = tempdir().unwrap();
    let (output, store) = run_menu(&dir, "5\nChest\n1\n1\nplank:8\n4\nchest\n5\n8\n");

    assert!(output.contains("已儲存 'chest' 的配方"));
    assert!(output.contains("  plank: 40 個物品"));
    assert!(store.book().contains("chest"));

    let saved = fs::read_to_string(dir.path().join("recipes.json")).unwrap();
    assert!(saved.contains("\"recipes\""));
}

#[test]
fn test_add_layered_recipe_and_craft() {
    let dir = tempdir().unwrap();
    let script = "5\nhopper\n3\n\
                  plank\n4\nlog:1\n\
                  chest\n1\nplank:8\n\
                  hopper\n1\nchest:1, iron_ingot:5\n\
                  4\nhopper\n1\n8\n";
    let (output, store) = run_menu(&dir, script);

    assert!(store.book().lookup("hopper").unwrap().is_layered());
    assert!(output.contains("  log: 2 個物品"));
    assert!(output.contains("  iron_ingot: 5 個物品"));
}

#[test]
fn test_add_recipe_keeps_existing_without_confirmation() {
    let dir = tempdir().unwrap();
    write_hopper_recipes(&dir.path().join("recipes.json"));

    let (output, store) = run_menu(&dir, "5\nhopper\nn\n8\n");

    assert!(output.contains("已取消新增配方"));
    assert!(store.book().lookup("hopper").unwrap().is_layered());
}

#[test]
fn test_invalid_layer_is_reported() {
    let dir = tempdir().unwrap();
    let (output, store) = run_menu(&dir, "5\nplank\n2\nplank\n4\nplank:1\n8\n");

    assert!(output.contains("錯誤:"));
    assert!(store.book().is_empty());
}

#[test]
fn test_advanced_crafting_unknown_item() {
    let dir = tempdir().unwrap();
    write_hopper_recipes(&dir.path().join("recipes.json"));

    let (output, _) = run_menu(&dir, "4\ncomparator\n8\n");

    assert!(output.contains("hopper（3 層）"));
    assert!(output.contains("錯誤: 找不到配方: comparator"));
}

#[test]
fn test_shulker_suffix_switches_display_container() {
    let dir = tempdir().unwrap();
    write_hopper_recipes(&dir.path().join("recipes.json"));

    let (output, _) = run_menu(&dir, "7\n3\ndc\n5\n4\nhopper\n1sb\n8\n");

    assert!(output.contains("合成 1 界伏盒 的 'hopper'"));
}

#[rstest]
#[case::overworld_to_nether("6\n1\n100\n64\n-20\n8\n", "地獄 (12.50, 64.00, -2.50)")]
#[case::nether_to_overworld("6\n2\n12.5\n70\n3\n8\n", "主世界 (100.00, 70.00, 24.00)")]
#[case::scientific_notation("6\n1\n8e2\n64\n0\n8\n", "地獄 (100.00, 64.00, 0.00)")]
#[case::overflow_is_reported("6\n2\n79228162514264337593543950335\n0\n0\n8\n", "錯誤: 計算錯誤")]
fn test_coordinates(#[case] script: &str, #[case] expected: &str) {
    let dir = tempdir().unwrap();
    let (output, _) = run_menu(&dir, script);

    assert!(output.contains(expected), "missing {expected:?} in:\n{output}");
}

#[test]
fn test_settings_changes_persist() {
    let dir = tempdir().unwrap();
    let (output, store) = run_menu(&dir, "7\n1\n3\ndc\n2\nst\n\n\n5\n8\n");

    assert!(output.contains("自動換算已關閉"));
    assert!(!store.settings().auto_conversion);
    assert_eq!(store.settings().container_preference, ContainerPreference::DoubleChest);
    assert_eq!(store.settings().suffixes.stack, "st");

    let reopened = open_store(&dir);
    assert_eq!(reopened.settings(), store.settings());
}

#[test]
fn test_duplicate_suffix_rejected() {
    let dir = tempdir().unwrap();
    let (output, store) = run_menu(&dir, "7\n2\ndc\n\n\n5\n8\n");

    assert!(output.contains("錯誤: 設定無效"));
    assert_eq!(store.settings().suffixes.stack, "s");
}

#[test]
fn test_one_shot_convert() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);
    let mut output = Vec::new();

    run_convert(&store, "1dc", &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("物品總數: 3456"));
    assert!(output.contains("(2sb)"));
}

#[test]
fn test_one_shot_craft_errors() {
    let dir = tempdir().unwrap();
    write_hopper_recipes(&dir.path().join("recipes.json"));
    let store = open_store(&dir);
    let mut output = Vec::new();

    assert!(run_craft(&store, "hopper", "0", &mut output).is_err());
    assert!(run_craft(&store, "hopper", "abc", &mut output).is_err());

    let error = run_craft(&store, "anvil", "1", &mut output).unwrap_err();
    assert!(format!("{error:#}").contains("找不到配方: anvil"));

    run_craft(&store, "HOPPER", "2", &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("  log: 4 個物品"));
    assert!(output.contains("  iron_ingot: 10 個物品"));
}
