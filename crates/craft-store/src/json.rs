//! JSON 檔案讀寫
//!
//! 檔案整份讀入、整份寫出；寫入時先寫到同目錄的暫存檔再改名，
//! 中途失敗不會留下寫了一半的檔案。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use craft_core::{Recipe, RecipeBook, Settings, Suffixes};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::{Result, StoreError};

/// 讀取設定檔，檔案不存在時回傳 `None`
pub fn read_settings(path: &Path) -> Result<Option<Settings>> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };

    let mut settings: Settings = serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(e) = settings.unit_config().validate() {
        tracing::warn!("{}: {}，後綴改用預設值", path.display(), e);
        settings.suffixes = Suffixes::default();
    }

    Ok(Some(settings))
}

/// 載入設定，失敗時使用預設值
pub fn load_settings(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(Some(settings)) => {
            tracing::info!("已載入設定 {}", path.display());
            settings
        }
        Ok(None) => {
            tracing::info!("找不到設定檔 {}，使用預設設定", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::error!("載入設定失敗: {}，使用預設設定", e);
            Settings::default()
        }
    }
}

/// 寫入設定檔
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    write_json(path, settings)?;
    tracing::info!("已儲存設定 {}", path.display());
    Ok(())
}

/// 讀取配方檔，檔案不存在時回傳 `None`
///
/// 接受 `{"recipes": {...}}` 與舊版未包裝的格式。
/// 無法解碼或驗證失敗的配方會被略過並記錄警告。
pub fn read_recipes(path: &Path) -> Result<Option<RecipeBook>> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };

    let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = recipe_entries(path, value)?;
    let mut book = RecipeBook::new();

    for (name, value) in entries {
        let inserted = Recipe::from_value(&name, value).and_then(|recipe| book.insert(&name, recipe));
        if let Err(e) = inserted {
            tracing::warn!("略過配方 '{}': {}", name, e);
        }
    }

    Ok(Some(book))
}

fn recipe_entries(path: &Path, value: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut root) = value else {
        return Err(StoreError::Format {
            path: path.to_path_buf(),
            reason: "最外層必須是物件".to_string(),
        });
    };

    match root.remove("recipes") {
        Some(Value::Object(recipes)) => Ok(recipes),
        Some(_) => Err(StoreError::Format {
            path: path.to_path_buf(),
            reason: "'recipes' 必須是物件".to_string(),
        }),
        None => {
            tracing::warn!(
                "{} 使用舊版格式，下次儲存時會包裝在 'recipes' 之下",
                path.display()
            );
            Ok(root)
        }
    }
}

/// 載入配方書，失敗時回傳空的配方書
pub fn load_recipes(path: &Path) -> RecipeBook {
    match read_recipes(path) {
        Ok(Some(book)) => {
            tracing::info!("已載入 {} 個配方 ({})", book.len(), path.display());
            book
        }
        Ok(None) => {
            tracing::info!("找不到配方檔 {}", path.display());
            RecipeBook::new()
        }
        Err(e) => {
            tracing::error!("載入配方失敗: {}，使用空的配方書", e);
            RecipeBook::new()
        }
    }
}

/// 寫入配方檔（一律包裝在 `recipes` 之下）
pub fn save_recipes(path: &Path, book: &RecipeBook) -> Result<()> {
    write_json(path, book)?;
    tracing::info!("已儲存 {} 個配方 ({})", book.len(), path.display());
    Ok(())
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// 以四格縮排寫出 JSON
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    buffer.push(b'\n');

    let temp = temp_path(path);
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let written = fs::write(&temp, &buffer).and_then(|()| fs::rename(&temp, path));
    if let Err(source) = written {
        // 失敗時不留下暫存檔
        if let Err(e) = fs::remove_file(&temp) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("無法刪除暫存檔 {}: {}", temp.display(), e);
            }
        }
        return Err(io_error(source));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
