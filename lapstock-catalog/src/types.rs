//! Data model types for the laptop catalog.
//!
//! A catalog is one of eleven collections of normalized names (brands,
//! processors, stores, ...). Inventory rows reference catalog entries by id.
//! Each collection kind carries a static [`CatalogDescriptor`] describing its
//! table, the inventory column that points at it, and its optional parent
//! scope.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Collection Kinds ────────────────────────────────────────────────────────

/// One of the catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Brand,
    Model,
    Processor,
    OperatingSystem,
    Screen,
    GraphicsCard,
    Storage,
    Ram,
    Store,
    Location,
    Supplier,
}

/// Every catalog kind. Parents are listed before their children.
pub const ALL_KINDS: &[CatalogKind] = &[
    CatalogKind::Brand,
    CatalogKind::Model,
    CatalogKind::Processor,
    CatalogKind::OperatingSystem,
    CatalogKind::Screen,
    CatalogKind::GraphicsCard,
    CatalogKind::Storage,
    CatalogKind::Ram,
    CatalogKind::Store,
    CatalogKind::Location,
    CatalogKind::Supplier,
];

/// Parent scope of a child collection (Model under Brand, Location under Store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentScope {
    pub kind: CatalogKind,
    /// Column on the child table holding the parent id.
    pub column: &'static str,
}

/// Static storage description of a catalog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogDescriptor {
    /// Table holding the catalog entries.
    pub table: &'static str,
    /// Foreign-key column on the inventory table that references this kind.
    pub inventory_column: &'static str,
    pub parent: Option<ParentScope>,
}

static BRAND: CatalogDescriptor = CatalogDescriptor {
    table: "brands",
    inventory_column: "brand_id",
    parent: None,
};
static MODEL: CatalogDescriptor = CatalogDescriptor {
    table: "laptop_models",
    inventory_column: "model_id",
    parent: Some(ParentScope {
        kind: CatalogKind::Brand,
        column: "brand_id",
    }),
};
static PROCESSOR: CatalogDescriptor = CatalogDescriptor {
    table: "processors",
    inventory_column: "processor_id",
    parent: None,
};
static OPERATING_SYSTEM: CatalogDescriptor = CatalogDescriptor {
    table: "operating_systems",
    inventory_column: "os_id",
    parent: None,
};
static SCREEN: CatalogDescriptor = CatalogDescriptor {
    table: "screens",
    inventory_column: "screen_id",
    parent: None,
};
static GRAPHICS_CARD: CatalogDescriptor = CatalogDescriptor {
    table: "graphics_cards",
    inventory_column: "graphics_card_id",
    parent: None,
};
static STORAGE: CatalogDescriptor = CatalogDescriptor {
    table: "storage",
    inventory_column: "storage_id",
    parent: None,
};
static RAM: CatalogDescriptor = CatalogDescriptor {
    table: "ram",
    inventory_column: "ram_id",
    parent: None,
};
static STORE: CatalogDescriptor = CatalogDescriptor {
    table: "stores",
    inventory_column: "store_id",
    parent: None,
};
static LOCATION: CatalogDescriptor = CatalogDescriptor {
    table: "locations",
    inventory_column: "location_id",
    parent: Some(ParentScope {
        kind: CatalogKind::Store,
        column: "store_id",
    }),
};
static SUPPLIER: CatalogDescriptor = CatalogDescriptor {
    table: "suppliers",
    inventory_column: "supplier_id",
    parent: None,
};

impl CatalogKind {
    /// Storage descriptor for this kind.
    pub fn descriptor(self) -> &'static CatalogDescriptor {
        match self {
            Self::Brand => &BRAND,
            Self::Model => &MODEL,
            Self::Processor => &PROCESSOR,
            Self::OperatingSystem => &OPERATING_SYSTEM,
            Self::Screen => &SCREEN,
            Self::GraphicsCard => &GRAPHICS_CARD,
            Self::Storage => &STORAGE,
            Self::Ram => &RAM,
            Self::Store => &STORE,
            Self::Location => &LOCATION,
            Self::Supplier => &SUPPLIER,
        }
    }

    /// Submission field name, identical to the inventory foreign-key column.
    pub fn field_name(self) -> &'static str {
        self.descriptor().inventory_column
    }

    /// Key used for this kind in statistics and search results.
    pub fn plural_key(self) -> &'static str {
        match self {
            Self::Brand => "brands",
            Self::Model => "models",
            Self::Processor => "processors",
            Self::OperatingSystem => "operating_systems",
            Self::Screen => "screens",
            Self::GraphicsCard => "graphics_cards",
            Self::Storage => "storage",
            Self::Ram => "ram",
            Self::Store => "stores",
            Self::Location => "locations",
            Self::Supplier => "suppliers",
        }
    }

    /// Short lowercase name used on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Processor => "processor",
            Self::OperatingSystem => "os",
            Self::Screen => "screen",
            Self::GraphicsCard => "gpu",
            Self::Storage => "storage",
            Self::Ram => "ram",
            Self::Store => "store",
            Self::Location => "location",
            Self::Supplier => "supplier",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Model => "Model",
            Self::Processor => "Processor",
            Self::OperatingSystem => "Operating System",
            Self::Screen => "Screen",
            Self::GraphicsCard => "Graphics Card",
            Self::Storage => "Storage",
            Self::Ram => "RAM",
            Self::Store => "Store",
            Self::Location => "Location",
            Self::Supplier => "Supplier",
        }
    }

    /// Extra accepted spellings beyond the short name, plural key and field name.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Model => &["laptop_model", "laptop_models"],
            Self::OperatingSystem => &["operating_system", "operating-system"],
            Self::GraphicsCard => &["graphics_card", "graphics-card", "gpus"],
            _ => &[],
        }
    }

    pub fn parent_kind(self) -> Option<CatalogKind> {
        self.descriptor().parent.map(|p| p.kind)
    }

    /// The collection scoped under this one, if any.
    pub fn child_kind(self) -> Option<CatalogKind> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|k| k.parent_kind() == Some(self))
    }

    /// Look up a kind by its submission field name (e.g. `"os_id"`).
    pub fn from_field_name(field: &str) -> Option<CatalogKind> {
        ALL_KINDS.iter().copied().find(|k| k.field_name() == field)
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Error)]
#[error("Unknown catalog kind: {0}")]
pub struct KindParseError(pub String);

impl std::str::FromStr for CatalogKind {
    type Err = KindParseError;

    /// Parse a kind from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        for &kind in ALL_KINDS {
            if kind.short_name() == lower
                || kind.plural_key() == lower
                || kind.field_name() == lower
                || kind.aliases().contains(&lower.as_str())
            {
                return Ok(kind);
            }
        }
        Err(KindParseError(s.to_string()))
    }
}

// ── Catalog Entry ───────────────────────────────────────────────────────────

/// A single normalized catalog value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub kind: CatalogKind,
    pub name: String,
    pub is_active: bool,
    /// Brand of a Model, Store of a Location. Always `None` for other kinds.
    pub parent_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

// ── Inventory ───────────────────────────────────────────────────────────────

/// An inventory row as far as catalog references are concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Laptop {
    pub id: i64,
    pub sku: String,
    pub display_name: String,
    pub brand_id: Option<i64>,
    pub model_id: Option<i64>,
    pub processor_id: Option<i64>,
    pub os_id: Option<i64>,
    pub screen_id: Option<i64>,
    pub graphics_card_id: Option<i64>,
    pub storage_id: Option<i64>,
    pub ram_id: Option<i64>,
    pub store_id: Option<i64>,
    pub location_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Laptop {
    /// The catalog reference held for `kind`.
    pub fn reference(&self, kind: CatalogKind) -> Option<i64> {
        match kind {
            CatalogKind::Brand => self.brand_id,
            CatalogKind::Model => self.model_id,
            CatalogKind::Processor => self.processor_id,
            CatalogKind::OperatingSystem => self.os_id,
            CatalogKind::Screen => self.screen_id,
            CatalogKind::GraphicsCard => self.graphics_card_id,
            CatalogKind::Storage => self.storage_id,
            CatalogKind::Ram => self.ram_id,
            CatalogKind::Store => self.store_id,
            CatalogKind::Location => self.location_id,
            CatalogKind::Supplier => self.supplier_id,
        }
    }

    pub fn set_reference(&mut self, kind: CatalogKind, id: Option<i64>) {
        let slot = match kind {
            CatalogKind::Brand => &mut self.brand_id,
            CatalogKind::Model => &mut self.model_id,
            CatalogKind::Processor => &mut self.processor_id,
            CatalogKind::OperatingSystem => &mut self.os_id,
            CatalogKind::Screen => &mut self.screen_id,
            CatalogKind::GraphicsCard => &mut self.graphics_card_id,
            CatalogKind::Storage => &mut self.storage_id,
            CatalogKind::Ram => &mut self.ram_id,
            CatalogKind::Store => &mut self.store_id,
            CatalogKind::Location => &mut self.location_id,
            CatalogKind::Supplier => &mut self.supplier_id,
        };
        *slot = id;
    }
}
