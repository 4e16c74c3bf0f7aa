//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use lapstock_catalog::{CatalogKind, Frequency};

#[derive(Parser)]
#[command(name = "lapstock")]
#[command(about = "Normalize and maintain the laptop inventory catalogs", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database file (default: from settings, then the data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the catalog database, or migrate an existing one
    Init,

    /// Load catalog entries from YAML seed files
    Seed {
        /// Path to the seed directory (default: ./catalog)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Resolve a form submission to catalog ids, creating unseen names
    Resolve {
        /// Submission fields as a JSON object (e.g. '{"brand_id": "Acer"}')
        #[arg(long)]
        json: Option<String>,

        /// Submission fields as FIELD=VALUE pairs; integer values are ids
        fields: Vec<String>,

        /// Point this inventory row at the resolved ids
        #[arg(long)]
        apply_to: Option<i64>,
    },

    /// Fold a duplicate entry into its canonical entry
    Merge {
        /// Catalog kind (e.g. brand, model, store, location)
        kind: CatalogKind,

        /// ID of the duplicate entry to retire
        source: i64,

        /// ID of the entry that receives its references
        target: i64,
    },

    /// Make a catalog entry selectable again
    Activate {
        /// Catalog kind (e.g. brand, model, store, location)
        kind: CatalogKind,

        /// Entry ID
        id: i64,
    },

    /// Hide a catalog entry from selection without deleting it
    Deactivate {
        /// Catalog kind (e.g. brand, model, store, location)
        kind: CatalogKind,

        /// Entry ID
        id: i64,
    },

    /// Show active entry counts for every catalog
    Stats {
        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// List active entries of one catalog
    List {
        /// Catalog kind (e.g. brand, model, store, location)
        kind: CatalogKind,

        /// Case-insensitive substring filter on the name
        #[arg(long, short)]
        search: Option<String>,

        /// Only models of this brand / locations of this store
        #[arg(long)]
        parent: Option<i64>,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Search active entries by name across catalogs
    Search {
        /// Text to look for
        query: String,

        /// Restrict the search to one catalog kind
        #[arg(long, short)]
        kind: Option<CatalogKind>,
    },

    /// Recurring expense date helpers
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },

    /// Manage lapstock settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ExpenseAction {
    /// Project the next due date of a recurring expense
    NextDue {
        /// Current due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,

        /// Recurrence: daily, weekly, monthly, quarterly, yearly
        #[arg(long)]
        frequency: Option<Frequency>,

        /// Reference date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Treat the expense as already paid
        #[arg(long)]
        paid: bool,

        /// Reminder window in days before the due date
        #[arg(long, default_value = "7")]
        advance_days: u32,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and the resolved database path
    Show,

    /// Print the settings file path
    Path,

    /// Save the default database path
    SetDb {
        /// Database file to use when --db is not given
        path: PathBuf,
    },
}
