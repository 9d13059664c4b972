use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use dompet_core::VERSION;

/// Dompet - a local, single-user personal finance ledger
#[derive(Parser)]
#[command(name = "dompet")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger database
    #[arg(long, global = true, env = "DOMPET_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Where the ledger database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Display currency code written to the config
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Transaction type (income or expense)
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Amount (positive)
    #[arg(value_name = "AMOUNT")]
    pub amount: f64,

    /// Category name
    #[arg(short, long)]
    pub category: String,

    /// Merchant or payee
    #[arg(short, long)]
    pub merchant: Option<String>,

    /// Free-text note
    #[arg(short, long)]
    pub note: Option<String>,

    /// Transaction date (ISO-8601 or YYYY-MM-DD, default now)
    #[arg(long)]
    pub date: Option<String>,

    /// Receipt image reference
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Filter by type (income or expense)
    #[arg(value_name = "TYPE")]
    pub kind: Option<String>,

    /// Filter by category name
    #[arg(long)]
    pub category: Option<String>,

    /// Time window (e.g., "7d", "30d")
    #[arg(long, conflicts_with_all = ["since", "until", "month"])]
    pub last: Option<String>,

    /// Calendar month (YYYY-MM)
    #[arg(long, conflicts_with_all = ["since", "until"])]
    pub month: Option<String>,

    /// Start date (ISO-8601)
    #[arg(long)]
    pub since: Option<String>,

    /// End date (ISO-8601)
    #[arg(long)]
    pub until: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Transaction ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Transaction ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New type (income or expense)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// New amount
    #[arg(long)]
    pub amount: Option<f64>,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// Replace the description
    #[arg(long)]
    pub description: Option<String>,

    /// New date (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Attach a receipt image reference
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,

    /// Remove the receipt image reference
    #[arg(long)]
    pub clear_image: bool,
}

/// Arguments for delete commands
#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `category` command
#[derive(Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand)]
pub enum CategorySubcommand {
    /// List categories
    List(CategoryListArgs),

    /// Add a category (ignored if the name exists)
    Add(CategoryAddArgs),

    /// Delete a category (transactions keep its name)
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct CategoryListArgs {
    /// Only categories of this type
    #[arg(value_name = "TYPE")]
    pub kind: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CategoryAddArgs {
    /// Category name (unique across types)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Category type (income or expense)
    #[arg(long = "type", value_name = "TYPE", default_value = "expense")]
    pub kind: String,

    /// Icon name
    #[arg(long, default_value = "tag")]
    pub icon: String,

    /// Display color
    #[arg(long, default_value = "#6b7280")]
    pub color: String,
}

/// Arguments for the `budget` command
#[derive(Args)]
pub struct BudgetArgs {
    #[command(subcommand)]
    pub command: BudgetSubcommand,
}

#[derive(Subcommand)]
pub enum BudgetSubcommand {
    /// Show budgets with their progress for the current period
    List(BudgetListArgs),

    /// Add a budget
    Add(BudgetAddArgs),

    /// Change a budget
    Edit(BudgetEditArgs),

    /// Delete a budget
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct BudgetListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BudgetAddArgs {
    /// Category the ceiling applies to
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Spending ceiling
    #[arg(value_name = "AMOUNT")]
    pub amount: f64,

    /// Period (daily, weekly, monthly)
    #[arg(long, default_value = "monthly")]
    pub period: String,
}

#[derive(Args)]
pub struct BudgetEditArgs {
    /// Budget ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New ceiling
    #[arg(long)]
    pub amount: Option<f64>,

    /// New period
    #[arg(long)]
    pub period: Option<String>,
}

/// Arguments for the `summary` command
#[derive(Args)]
pub struct SummaryArgs {
    /// Calendar month (YYYY-MM, default current month)
    #[arg(long, conflicts_with = "all")]
    pub month: Option<String>,

    /// All-time totals
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command
#[derive(Args)]
pub struct StatsArgs {
    /// Calendar month (YYYY-MM, default current month)
    #[arg(long)]
    pub month: Option<String>,

    /// Include days without transactions
    #[arg(long)]
    pub fill: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `receipt` command
#[derive(Args)]
pub struct ReceiptArgs {
    /// File holding the extractor reply ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Note appended to the merchant in the description
    #[arg(short, long)]
    pub note: Option<String>,

    /// Category used when the receipt names none
    #[arg(long, default_value = "Other Expense")]
    pub fallback_category: String,

    /// Receipt image reference
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the ledger database and config file
    Init(InitArgs),

    /// Record an income or expense
    Add(AddArgs),

    /// List transactions, newest first
    List(ListArgs),

    /// Show a transaction by ID
    Show(ShowArgs),

    /// Change fields of a transaction
    Edit(EditArgs),

    /// Delete a transaction
    Delete(DeleteArgs),

    /// Manage categories
    Category(CategoryArgs),

    /// Manage budgets
    Budget(BudgetArgs),

    /// Income, expense and balance for a month
    Summary(SummaryArgs),

    /// Per-category and per-day breakdown for a month
    Stats(StatsArgs),

    /// Record an expense from a receipt extraction reply
    Receipt(ReceiptArgs),

    /// Back up the ledger
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
