use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lapstock_catalog::CatalogKind;
use lapstock_db::EntryFilter;

use crate::CliError;

use super::{open_catalog, truncate_str};

/// List one page of active entries.
pub(crate) fn run_list(
    db: Option<PathBuf>,
    kind: CatalogKind,
    search: Option<String>,
    parent: Option<i64>,
    page: u32,
) -> Result<(), CliError> {
    if parent.is_some() && kind.parent_kind().is_none() {
        log::warn!("--parent has no effect for {} entries", kind);
    }

    let (conn, _) = open_catalog(db)?;
    let filter = EntryFilter {
        search,
        parent_id: parent,
        page: page.max(1),
        page_size: crate::settings::page_size(),
    };
    let result = lapstock_db::list_active_entries(&conn, kind, &filter)
        .map_err(|e| CliError::database(format!("Failed to list entries: {}", e)))?;

    log::info!(
        "{} ({} active, page {})",
        kind.display_name().if_supports_color(Stdout, |t| t.bold()),
        result.total,
        filter.page,
    );
    if result.entries.is_empty() {
        log::info!("  (no entries)");
        return Ok(());
    }

    let parent_label = kind.parent_kind().map(|p| p.short_name());
    for entry in &result.entries {
        let id = format!("#{}", entry.id);
        match (parent_label, entry.parent_id) {
            (Some(label), Some(pid)) => log::info!(
                "  {:>6}  {:<40} {}",
                id.if_supports_color(Stdout, |t| t.dimmed()),
                truncate_str(&entry.name, 40),
                format!("{label} #{pid}").if_supports_color(Stdout, |t| t.dimmed()),
            ),
            _ => log::info!(
                "  {:>6}  {}",
                id.if_supports_color(Stdout, |t| t.dimmed()),
                entry.name
            ),
        }
    }

    if result.more {
        crate::log_blank();
        log::info!("More results: use --page {}", filter.page + 1);
    }
    Ok(())
}
