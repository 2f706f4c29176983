//! crud - manage products and users from the terminal.

use clap::{Parser, Subcommand};

use crud_cli::commands::{products, users};
use crud_cli::{AppConfig, Context, OutputFormat};

/// Manage products and users through the CRUD API
#[derive(Parser)]
#[command(name = "crud")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API base URL (overrides CRUD_API__BASE_URL and crud.toml)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "card", global = true)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    #[command(subcommand)]
    Products(products::ProductCommands),

    /// Manage users
    #[command(subcommand)]
    Users(users::UserCommands),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    log::debug!("using API at {}", config.api.base_url);

    let mut ctx = Context::new(&config.api, cli.format);
    match cli.command {
        Commands::Products(cmd) => products::execute(cmd, &mut ctx),
        Commands::Users(cmd) => users::execute(cmd, &mut ctx),
    }
}
