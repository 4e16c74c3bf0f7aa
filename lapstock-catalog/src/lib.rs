//! Laptop catalog data model types, raw form input classification, YAML seed
//! files, and recurring-expense date math.
//!
//! This crate defines the persistent data model for the catalog without
//! any database dependencies. Consumers can use these types directly for
//! serialization, display, or passing to `lapstock-db` for persistence.

pub mod expense;
pub mod input;
pub mod types;
pub mod yaml;

pub use expense::{add_months, next_due_date, ExpenseStatus, Frequency, RecurringExpense};
pub use input::RawValue;
pub use types::*;
pub use yaml::{load_seed_dir, load_seed_file, SeedEntry, SeedFile, YamlError};
