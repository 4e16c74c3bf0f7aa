//! Catalog normalization: turn raw form values into catalog ids.
//!
//! This crate owns the get-or-create resolution of free-text names, the
//! ordered resolution of a whole form submission, merging duplicate entries,
//! toggling entries active/inactive, and seeding catalogs from YAML. Every
//! public operation that writes runs as a single unit of work: it commits
//! completely or not at all.

pub mod activation;
pub mod merge;
pub mod resolver;
pub mod seed;
pub mod submission;

pub use activation::set_active;
pub use merge::{merge_entries, MergeOutcome};
pub use resolver::{resolve, resolve_entry, NormalizeError, Resolution};
pub use seed::{seed_catalog, SeedStats};
pub use submission::{
    resolve_fields, resolve_submission, update_laptop_from_submission, ResolvedSubmission,
    RESOLUTION_ORDER,
};
