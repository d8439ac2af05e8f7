use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const CATALOG_FILE_NAME: &str = "shortcuts.json";

pub const MSG_NOT_FOUND: &str =
    "shortcuts.json was not found. Place it in the same folder as the executable.";
pub const MSG_UNREADABLE: &str = "shortcuts.json could not be read.";
pub const MSG_INVALID_FORMAT: &str = "shortcuts.json has an invalid format. Check the JSON.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShortcutItem {
    pub name: String,
    pub keys: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShortcutCategory {
    pub name: String,
    pub items: Vec<ShortcutItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShortcutCatalog {
    pub categories: Vec<ShortcutCategory>,
}

impl ShortcutCatalog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Result of a catalog load. `error_message` is advisory: `data` is always
/// usable, even when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLoadResult {
    pub data: ShortcutCatalog,
    pub error_message: Option<String>,
}

impl CatalogLoadResult {
    fn failed(message: &str) -> Self {
        Self {
            data: ShortcutCatalog::default(),
            error_message: Some(message.to_string()),
        }
    }
}

// Raw shapes mirror the file; any field may be missing or null.

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawCatalog {
    categories: Option<Vec<RawCategory>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawCategory {
    name: Option<String>,
    items: Option<Vec<RawItem>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawItem {
    name: Option<String>,
    keys: Option<String>,
    note: Option<String>,
}

impl From<RawItem> for ShortcutItem {
    fn from(raw: RawItem) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            keys: raw.keys.unwrap_or_default(),
            note: raw.note.unwrap_or_default(),
        }
    }
}

impl From<RawCategory> for ShortcutCategory {
    fn from(raw: RawCategory) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            items: raw
                .items
                .unwrap_or_default()
                .into_iter()
                .map(ShortcutItem::from)
                .collect(),
        }
    }
}

impl From<RawCatalog> for ShortcutCatalog {
    fn from(raw: RawCatalog) -> Self {
        Self {
            categories: raw
                .categories
                .unwrap_or_default()
                .into_iter()
                .map(ShortcutCategory::from)
                .collect(),
        }
    }
}

/// Lower-case every object key so field lookup ignores case.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Parse catalog JSON. `Ok(None)` means the document was a bare `null`.
pub fn parse_catalog(json: &str) -> anyhow::Result<Option<ShortcutCatalog>> {
    let value: Value = serde_json::from_str(json).context("parse shortcut catalog json")?;
    if value.is_null() {
        return Ok(None);
    }
    let raw: RawCatalog =
        serde_json::from_value(lowercase_keys(value)).context("decode shortcut catalog")?;
    Ok(Some(raw.into()))
}

pub fn catalog_path_from_exe_path(exe_path: &Path) -> anyhow::Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(CATALOG_FILE_NAME))
}

pub fn resolve_catalog_path() -> anyhow::Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    catalog_path_from_exe_path(&exe_path)
}

/// Load `shortcuts.json` from the folder of the running executable.
pub fn load_from_executable_folder() -> CatalogLoadResult {
    match resolve_catalog_path() {
        Ok(path) => load_from_path(&path),
        Err(e) => {
            tracing::warn!("cannot locate shortcut catalog: {e:#}");
            CatalogLoadResult::failed(MSG_NOT_FOUND)
        }
    }
}

pub fn load_from_path(path: &Path) -> CatalogLoadResult {
    if !path.exists() {
        tracing::info!(path = %path.display(), "shortcut catalog not found");
        return CatalogLoadResult::failed(MSG_NOT_FOUND);
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read shortcut catalog: {e}");
            return CatalogLoadResult::failed(MSG_INVALID_FORMAT);
        }
    };
    // Text in other encodings is decoded lossily rather than rejected.
    let text = String::from_utf8_lossy(&bytes);
    let content = text.strip_prefix('\u{feff}').unwrap_or(&text);

    match parse_catalog(content) {
        Ok(Some(data)) => {
            tracing::debug!(categories = data.categories.len(), "shortcut catalog loaded");
            CatalogLoadResult {
                data,
                error_message: None,
            }
        }
        Ok(None) => CatalogLoadResult::failed(MSG_UNREADABLE),
        Err(e) => {
            tracing::warn!(path = %path.display(), "invalid shortcut catalog: {e:#}");
            CatalogLoadResult::failed(MSG_INVALID_FORMAT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_path_is_resolved_next_to_executable() {
        let exe = Path::new("/opt/hud/bin/shortcut_hud");
        let path = catalog_path_from_exe_path(exe).unwrap();
        assert_eq!(path, Path::new("/opt/hud/bin").join(CATALOG_FILE_NAME));
    }

    #[test]
    fn field_names_are_case_insensitive() {
        let json = r#"{"Categories":[{"NAME":"Edit","Items":[{"Name":"Copy","KEYS":"Ctrl+C","Note":"x"}]}]}"#;
        let catalog = parse_catalog(json).unwrap().unwrap();
        assert_eq!(catalog.categories[0].name, "Edit");
        assert_eq!(
            catalog.categories[0].items[0],
            ShortcutItem {
                name: "Copy".into(),
                keys: "Ctrl+C".into(),
                note: "x".into(),
            }
        );
    }

    #[test]
    fn nulls_and_missing_fields_become_empty() {
        let json = r#"{"categories":[{"name":null},{"items":[{"keys":"F5"},{}]}]}"#;
        let catalog = parse_catalog(json).unwrap().unwrap();
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[0].name, "");
        assert!(catalog.categories[0].items.is_empty());
        assert_eq!(catalog.categories[1].items[0].keys, "F5");
        assert_eq!(catalog.categories[1].items[1], ShortcutItem::default());
    }

    #[test]
    fn null_document_is_reported_separately() {
        assert_eq!(parse_catalog("null").unwrap(), None);
        assert!(parse_catalog("[1, 2]").is_err());
        assert!(parse_catalog("{ not json").is_err());
    }

    #[test]
    fn empty_object_yields_empty_catalog() {
        let catalog = parse_catalog("{}").unwrap().unwrap();
        assert!(catalog.is_empty());
    }
}
