//! YAML loading for human-curated catalog seed data.
//!
//! A seed directory holds one file per collection:
//!
//! ```text
//! catalog/
//!   brands.yaml
//!   processors.yaml
//!   stores.yaml
//!   ...
//! ```
//!
//! Each file names its kind and lists entries. An entry is either a plain
//! name or a name with children (models of a brand, locations of a store):
//!
//! ```yaml
//! kind: brand
//! entries:
//!   - Lenovo
//!   - name: Dell
//!     models: [Inspiron 15, XPS 13]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CatalogKind;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// One seed file: the entries of a single collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    pub kind: CatalogKind,
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

/// A seeded name, optionally with names of the child collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedEntry {
    Name(String),
    Nested {
        name: String,
        #[serde(default, alias = "models", alias = "locations")]
        children: Vec<String>,
    },
}

impl SeedEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Nested { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[String] {
        match self {
            Self::Name(_) => &[],
            Self::Nested { children, .. } => children,
        }
    }
}

/// Load a single seed file.
pub fn load_seed_file(path: &Path) -> Result<SeedFile, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load every `.yaml`/`.yml` seed file in a directory, in filename order.
///
/// A missing directory yields an empty list.
pub fn load_seed_dir(dir: &Path) -> Result<Vec<SeedFile>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::NotADirectory(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let seed = load_seed_file(&entry.path())?;
        log::debug!(
            "Loaded {} {} seed entries from {}",
            seed.entries.len(),
            seed.kind,
            entry.path().display()
        );
        files.push(seed);
    }

    Ok(files)
}
