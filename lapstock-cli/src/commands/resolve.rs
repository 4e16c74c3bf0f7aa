use std::path::PathBuf;

use lapstock_catalog::CatalogKind;
use serde_json::{Map, Value};

use crate::CliError;

use super::open_catalog;

/// Resolve a submission and print the canonical ids as JSON.
pub(crate) fn run_resolve(
    db: Option<PathBuf>,
    json: Option<String>,
    pairs: &[String],
    apply_to: Option<i64>,
) -> Result<(), CliError> {
    let fields = parse_submission(json.as_deref(), pairs)?;
    if fields.is_empty() {
        return Err(CliError::input("no submission fields given"));
    }

    let (conn, _) = open_catalog(db)?;
    let resolved = match apply_to {
        Some(laptop_id) => {
            lapstock_normalize::update_laptop_from_submission(&conn, laptop_id, &fields)
        }
        None => lapstock_normalize::resolve_submission(&conn, &fields),
    }
    .map_err(|e| CliError::catalog(format!("Submission rejected: {}", e)))?;

    for (kind, id) in resolved.created() {
        log::info!("Created {} #{}", kind, id);
    }
    if let Some(laptop_id) = apply_to {
        log::info!("Updated laptop #{}", laptop_id);
    }

    let output = serde_json::to_string_pretty(&resolved)
        .map_err(|e| CliError::other(format!("Failed to serialize result: {}", e)))?;
    println!("{output}");
    Ok(())
}

/// Build a submission from an optional JSON object plus `FIELD=VALUE` pairs.
///
/// Pairs override JSON keys. A pair value that parses as an integer becomes a
/// JSON number (an id); anything else is sent as text.
pub(crate) fn parse_submission(
    json: Option<&str>,
    pairs: &[String],
) -> Result<Map<String, Value>, CliError> {
    let mut fields = match json {
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(CliError::input("--json must be a JSON object")),
            Err(e) => return Err(CliError::input(format!("invalid --json: {}", e))),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::input(format!("expected FIELD=VALUE, got '{}'", pair)))?;
        let key = key.trim();
        let field = CatalogKind::from_field_name(key)
            .or_else(|| key.parse::<CatalogKind>().ok())
            .map(|kind| kind.field_name().to_string())
            .unwrap_or_else(|| key.to_string());
        let value = match value.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(value.to_string()),
        };
        fields.insert(field, value);
    }

    Ok(fields)
}
