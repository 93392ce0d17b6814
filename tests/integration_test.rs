//! 集成測試

use mincecalc::*;
use rstest::rstest;

fn hopper_layers() -> Vec<Layer> {
    vec![
        Layer::new("plank", SimpleRecipe::new(4).with_input("log", 1)),
        Layer::new("chest", SimpleRecipe::new(1).with_input("plank", 8)),
        Layer::new(
            "hopper",
            SimpleRecipe::new(1)
                .with_input("chest", 1)
                .with_input("iron_ingot", 5),
        ),
    ]
}

fn requirements(pairs: &[(&str, Quantity)]) -> Requirements {
    pairs
        .iter()
        .map(|(item, quantity)| (item.to_string(), *quantity))
        .collect()
}

#[test]
fn test_parse_then_format_mixed_quantity() {
    // 場景：玩家輸入 "2sb, 5s, 3"，換算後再以大箱子顯示
    let config = UnitConfig::default();

    let total = parse_quantity("2sb, 5s, 3", &config).unwrap();
    assert_eq!(total, 3779);

    let shulker = Breakdown::new(total, &config, ContainerPreference::Shulker);
    assert_eq!((shulker.containers, shulker.stacks, shulker.items), (2, 5, 3));

    let double_chest = Breakdown::new(total, &config, ContainerPreference::DoubleChest);
    assert_eq!(double_chest.to_tokens(&config), "1dc, 5s, 3");
    assert_eq!(double_chest.total(&config), total);
}

#[test]
fn test_custom_suffixes_flow_through_parse_and_format() {
    let settings = Settings::default().with_suffixes(Suffixes {
        stack: "st".to_string(),
        shulker: "box".to_string(),
        double_chest: "dc".to_string(),
    });
    let config = settings.unit_config();
    config.validate().unwrap();

    assert_eq!(parse_quantity("1box, 2st", &config).unwrap(), 1856);
    assert_eq!(
        format_tokens(1856, &config, ContainerPreference::Shulker),
        "1box, 2st"
    );
    assert!(parse_quantity("1sb", &config).is_err());
}

#[rstest]
#[case(1, &[("plank", 8)])]
#[case(5, &[("plank", 40)])]
fn test_resolve_simple_chest(#[case] desired: Quantity, #[case] expected: &[(&str, Quantity)]) {
    let chest = SimpleRecipe::new(1).with_input("plank", 8);
    assert_eq!(resolve_simple(&chest, desired).unwrap(), requirements(expected));
}

#[test]
fn test_resolve_simple_rounds_batches_up() {
    let slab = SimpleRecipe::new(2).with_input("cobblestone", 8);
    assert_eq!(
        resolve_simple(&slab, 5).unwrap(),
        requirements(&[("cobblestone", 24)])
    );
}

#[test]
fn test_hopper_from_recipe_book() {
    // 場景：配方書中的多層配方，只回傳基礎材料
    let mut book = RecipeBook::new();
    book.insert("hopper", Recipe::Layered { layers: hopper_layers() })
        .unwrap();

    let plan = RecipeResolver::new(&book).resolve("Hopper", 1).unwrap();

    assert_eq!(
        plan.base_materials,
        requirements(&[("log", 2), ("iron_ingot", 5)])
    );
    assert_eq!(
        resolve_layered(&hopper_layers(), 1).unwrap(),
        plan.base_materials
    );
    assert!(!plan.base_materials.contains_key("plank"));
    assert!(!plan.base_materials.contains_key("chest"));
}

#[test]
fn test_quantity_input_drives_recipe_resolution() {
    // 場景：以 "1s" 指定目標數量，結果以界伏盒顯示
    let settings = Settings::default();
    let config = settings.unit_config();
    let mut book = RecipeBook::new();
    book.insert("hopper", Recipe::Layered { layers: hopper_layers() })
        .unwrap();

    let desired = parse_quantity("1s", &config).unwrap();
    let plan = RecipeResolver::new(&book).resolve("hopper", desired).unwrap();

    assert_eq!(plan.base_materials["log"], 128);
    assert_eq!(plan.base_materials["iron_ingot"], 320);
    assert_eq!(
        describe(plan.base_materials["iron_ingot"], &settings, settings.container_preference),
        "5 組"
    );
}

#[test]
fn test_drafted_recipe_resolves() {
    let mut draft = RecipeDraft::new("Torch").unwrap();
    draft
        .add_layer("stick", 4, parse_ingredients("plank:2").unwrap())
        .unwrap();
    draft
        .add_layer("torch", 4, parse_ingredients("stick:1, coal:1").unwrap())
        .unwrap();
    let (name, recipe) = draft.finish().unwrap();

    let mut book = RecipeBook::new();
    book.insert(&name, recipe).unwrap();
    let plan = RecipeResolver::new(&book).resolve("torch", 16).unwrap();

    assert_eq!(
        plan.base_materials,
        requirements(&[("plank", 2), ("coal", 4)])
    );
}

#[test]
fn test_error_cases() {
    let config = UnitConfig::default();

    assert!(matches!(
        parse_quantity("", &config),
        Err(CraftError::Parse(_))
    ));
    assert!(matches!(
        resolve_simple(&SimpleRecipe::new(0).with_input("x", 1), 5),
        Err(CraftError::MalformedRecipe { .. })
    ));
    assert!(matches!(
        RecipeResolver::new(&RecipeBook::new()).resolve("diamond_block", 1),
        Err(CraftError::RecipeNotFound(name)) if name == "diamond_block"
    ));
    assert!(matches!(
        Breakdown::from_signed(-1, &config, ContainerPreference::Shulker),
        Err(CraftError::InvalidQuantity(-1))
    ));
}
