//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use valueof_core::items::{CalcMethod, Category, CategoryFilter};
use valueof_core::sort::{SortField, SortOrder};
use valueof_gist_sync::DEFAULT_API_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "valueof", version, about = "Track what your belongings cost per day of use")]
pub struct Cli {
    /// Directory holding the local database
    #[arg(long, env = "VALUEOF_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the Gist API
    #[arg(long, env = "VALUEOF_GIST_API_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
    pub api_url: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add an item
    Add(AddArgs),

    /// Edit fields of an existing item
    Edit {
        /// Item id
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
    },

    /// List items with their daily cost
    List {
        /// Category to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// purchaseDate, price, days, usageCount or daily
        #[arg(short, long, default_value = "purchaseDate")]
        sort: SortField,
        /// asc or desc
        #[arg(short, long, default_value = "desc")]
        order: SortOrder,
    },

    /// Show one item in detail
    Show {
        /// Item id
        id: String,
    },

    /// Show totals over the inventory
    Summary {
        /// Category to include, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Manage the icon set
    #[command(subcommand)]
    Icons(IconsCommand),

    /// Back up to and restore from a GitHub gist
    #[command(subcommand)]
    Sync(SyncCommand),

    /// Write all data to a JSON file
    Export {
        /// Target file; defaults to valueof_backup_<date>.json in the current directory
        path: Option<PathBuf>,
    },

    /// Replace all data with the content of a JSON file
    Import {
        /// Backup file to read
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Item name
    pub name: String,

    /// Purchase price
    #[arg(short, long)]
    pub price: Decimal,

    /// digital, life, clothes, beauty, furniture or other
    #[arg(short, long, default_value = "other")]
    pub category: Category,

    /// Purchase date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Date the item was retired (YYYY-MM-DD)
    #[arg(long)]
    pub retire_date: Option<NaiveDate>,

    /// time, count or none
    #[arg(short, long, default_value = "time")]
    pub method: CalcMethod,

    /// Number of uses for per-use items
    #[arg(short, long)]
    pub uses: Option<i64>,

    /// Glyph shown for the item
    #[arg(short, long)]
    pub icon: Option<String>,

    /// Image file to attach instead of an icon
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Free-form note
    #[arg(short, long)]
    pub note: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub price: Option<Decimal>,

    #[arg(short, long)]
    pub category: Option<Category>,

    /// Purchase date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    #[arg(long, conflicts_with = "clear_retire_date")]
    pub retire_date: Option<NaiveDate>,

    /// Mark the item as in use again
    #[arg(long)]
    pub clear_retire_date: bool,

    #[arg(short, long)]
    pub method: Option<CalcMethod>,

    #[arg(short, long)]
    pub uses: Option<i64>,

    #[arg(short, long)]
    pub icon: Option<String>,

    #[arg(long, conflicts_with = "clear_photo")]
    pub photo: Option<PathBuf>,

    /// Drop the attached photo
    #[arg(long)]
    pub clear_photo: bool,

    #[arg(short, long, conflicts_with = "clear_note")]
    pub note: Option<String>,

    #[arg(long)]
    pub clear_note: bool,
}

#[derive(Subcommand, Debug)]
pub enum IconsCommand {
    /// Show the available icons
    List,
    /// Add an icon
    Add { glyph: String },
    /// Remove an icon
    Remove { glyph: String },
    /// Restore the default icons
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
    /// Store the access token and optionally an existing gist id
    Configure {
        /// Personal access token with the gist scope; empty clears the configuration
        #[arg(long, env = "VALUEOF_GITHUB_TOKEN", hide_env_values = true)]
        token: String,
        /// Link to an existing backup gist
        #[arg(long)]
        gist_id: Option<String>,
    },
    /// Show the sync configuration
    Status,
    /// Upload all data, creating the gist on first use
    Push,
    /// Replace all data with the gist content
    Pull,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_defaults_to_newest_purchases_first() {
        let cli = Cli::try_parse_from(["valueof", "list"]).unwrap();
        match cli.command {
            Command::List {
                category,
                sort,
                order,
            } => {
                assert_eq!(category, CategoryFilter::All);
                assert_eq!(sort, SortField::PurchaseDate);
                assert_eq!(order, SortOrder::Desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_parses_typed_fields() {
        let cli = Cli::try_parse_from([
            "valueof", "add", "Headphones", "--price", "899.5", "--category", "digital",
            "--date", "2024-03-01", "--method", "by-count", "--uses", "12",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.price, Decimal::new(8995, 1));
        assert_eq!(args.category, Category::Digital);
        assert_eq!(args.method, CalcMethod::Count);
        assert_eq!(args.uses, Some(12));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert!(Cli::try_parse_from(["valueof", "list", "--sort", "color"]).is_err());
    }
}
