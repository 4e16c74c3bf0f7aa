//! User settings stored in `~/.config/lapstock/settings.toml`.
//!
//! ```toml
//! [database]
//! path = "/srv/lapstock/lapstock.db"
//!
//! [listing]
//! page_size = 20
//! ```
//!
//! Reads go through `toml::Value` so keys this version doesn't know about
//! survive a rewrite.

use std::io;
use std::path::{Path, PathBuf};

use lapstock_db::DEFAULT_PAGE_SIZE;

/// Canonical path to the settings file: `~/.config/lapstock/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("lapstock").join("settings.toml")
}

/// Database location used when neither `--db` nor the settings file name one.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("lapstock").join("lapstock.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. `<data_dir>/lapstock/lapstock.db`
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_db_path_in(&settings_path(), cli_override)
}

fn resolve_db_path_in(settings: &Path, cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    load_db_path(settings).unwrap_or_else(default_db_path)
}

/// Listing page size from `listing.page_size`, falling back to the default.
pub(crate) fn page_size() -> u32 {
    page_size_in(&settings_path())
}

fn page_size_in(settings: &Path) -> u32 {
    load_document(settings)
        .and_then(|doc| doc.get("listing")?.get("page_size")?.as_integer())
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

fn load_document(settings: &Path) -> Option<toml::Value> {
    let contents = std::fs::read_to_string(settings).ok()?;
    contents.parse().ok()
}

/// Read `database.path`, if set.
fn load_db_path(settings: &Path) -> Option<PathBuf> {
    let doc = load_document(settings)?;
    let path = doc.get("database")?.get("path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save the database path in `settings.toml`.
pub(crate) fn save_db_path(path: &Path) -> io::Result<()> {
    save_db_path_in(&settings_path(), path)
}

fn save_db_path_in(settings: &Path, path: &Path) -> io::Result<()> {
    let mut doc = load_document(settings).unwrap_or_else(|| toml::Value::Table(Default::default()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let database = table
        .entry("database")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let db_table = database
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;
    db_table.insert(
        "path".to_string(),
        toml::Value::String(path.to_string_lossy().into_owned()),
    );

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string() -> Option<String> {
    let doc = load_document(&settings_path())?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cli_override_wins() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("settings.toml");
        save_db_path_in(&settings, Path::new("/saved.db")).unwrap();

        let resolved = resolve_db_path_in(&settings, Some(PathBuf::from("/flag.db")));
        assert_eq!(resolved, PathBuf::from("/flag.db"));
        assert_eq!(resolve_db_path_in(&settings, None), PathBuf::from("/saved.db"));
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("absent.toml");
        assert_eq!(resolve_db_path_in(&settings, None), default_db_path());
        assert_eq!(page_size_in(&settings), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn save_preserves_other_keys() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("nested").join("settings.toml");
        std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
        std::fs::write(&settings, "[listing]\npage_size = 50\n").unwrap();

        save_db_path_in(&settings, Path::new("/data/inv.db")).unwrap();

        assert_eq!(page_size_in(&settings), 50);
        assert_eq!(load_db_path(&settings), Some(PathBuf::from("/data/inv.db")));
    }

    #[test]
    fn invalid_page_size_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "[listing]\npage_size = 0\n").unwrap();
        assert_eq!(page_size_in(&settings), DEFAULT_PAGE_SIZE);
    }
}
