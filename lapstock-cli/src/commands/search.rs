use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lapstock_catalog::CatalogKind;

use crate::CliError;

use super::open_catalog;

/// Search active entries across catalogs.
pub(crate) fn run_search(
    db: Option<PathBuf>,
    query: &str,
    kind: Option<CatalogKind>,
) -> Result<(), CliError> {
    if query.trim().is_empty() {
        return Err(CliError::input("search query is empty"));
    }

    let (conn, _) = open_catalog(db)?;
    let results = lapstock_db::search_catalogs(&conn, query, kind)
        .map_err(|e| CliError::database(format!("Search failed: {}", e)))?;

    let hits: usize = results.values().map(Vec::len).sum();
    if hits == 0 {
        log::info!("No active entries match '{}'", query.trim());
        return Ok(());
    }

    for (kind, entries) in &results {
        if entries.is_empty() {
            continue;
        }
        log::info!(
            "{}",
            kind.display_name().if_supports_color(Stdout, |t| t.bold()),
        );
        for entry in entries {
            log::info!("  #{:<6} {}", entry.id, entry.name);
        }
    }
    Ok(())
}
