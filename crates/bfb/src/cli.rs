//! Clap derive structures for the `bfb` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Only
//! depends on clap so `build.rs` can compile it for man page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bfb -- terminal client for the BFB supply portal
#[derive(Debug, Parser)]
#[command(
    name = "bfb",
    version,
    about = "Track sites, inventory and supplier orders from the command line",
    long_about = "Command-line client for the BFB supply portal.\n\n\
        Reads dashboards and reports, manages supplier orders and site\n\
        inventory, and watches live pages against the portal REST backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "BFB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "BFB_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BFB_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (no timeout unless set)
    #[arg(long, env = "BFB_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Live refresh period in seconds for `watch` (0 disables)
    #[arg(long, env = "BFB_REFRESH", global = true)]
    pub refresh: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Portal pages, as accepted by `bfb watch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageArg {
    Dashboard,
    Supplier,
    Manager,
    Reports,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the KPI dashboard
    #[command(alias = "dash")]
    Dashboard,

    /// Show order and inventory status breakdowns
    Reports,

    /// Manage supplier orders
    #[command(alias = "o")]
    Orders(OrdersArgs),

    /// Manage site inventory
    #[command(alias = "inv", alias = "i")]
    Inventory(InventoryArgs),

    /// Manage construction sites
    Sites(SitesArgs),

    /// List materials
    Materials,

    /// List suppliers
    Suppliers,

    /// Check backend health
    Health,

    /// Re-render a page whenever its data changes (Ctrl+C to stop)
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List {
        /// Only orders with this status (e.g. SCHEDULED, DELAYED)
        #[arg(long)]
        status: Option<String>,
    },

    /// Mark an order delivered
    Deliver {
        /// Order ID
        id: u64,
    },

    /// Mark an order in transit
    Transit {
        /// Order ID
        id: u64,
    },

    /// Report a delay with a new ETA and a reason
    Delay {
        /// Order ID
        id: u64,
        /// New ETA (YYYY-MM-DD)
        #[arg(long)]
        eta: String,
        /// Why the order is late
        #[arg(long)]
        reason: String,
    },

    /// Change an order's ETA
    Eta {
        /// Order ID
        id: u64,
        /// New ETA (YYYY-MM-DD)
        eta: String,
    },

    /// Change an order's quantity
    Quantity {
        /// Order ID
        id: u64,
        /// New quantity (greater than zero)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Create an order
    Create {
        /// Material ID
        #[arg(long)]
        material: Option<u64>,
        /// Supplier ID
        #[arg(long)]
        supplier: Option<u64>,
        /// Site ID
        #[arg(long)]
        site: Option<u64>,
        /// Quantity to order
        #[arg(long, allow_negative_numbers = true)]
        quantity: String,
        /// Expected arrival (YYYY-MM-DD)
        #[arg(long)]
        eta: String,
    },

    /// Delete an order
    #[command(alias = "rm")]
    Delete {
        /// Order ID
        id: u64,
    },
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// List inventory lines
    #[command(alias = "ls")]
    List {
        /// Only lines for this site
        #[arg(long)]
        site: Option<u64>,
    },

    /// Add one unit to an inventory line
    Inc {
        /// Inventory ID
        id: u64,
    },

    /// Remove one unit from an inventory line
    Dec {
        /// Inventory ID
        id: u64,
    },

    /// Set the quantity of an inventory line
    Set {
        /// Inventory ID
        id: u64,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },

    /// Set the low-stock threshold of an inventory line
    Threshold {
        /// Inventory ID
        id: u64,
        /// New threshold
        #[arg(allow_negative_numbers = true)]
        threshold: i64,
    },
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites
    #[command(alias = "ls")]
    List,

    /// Add a site
    Add {
        /// Site name
        name: String,
        /// Site status (defaults to WORKING)
        #[arg(long)]
        status: Option<String>,
    },
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Page to watch
    #[arg(value_enum)]
    pub page: PageArg,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
