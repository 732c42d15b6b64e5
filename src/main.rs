use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cartstore::catalog::HttpCatalog;
use cartstore::config::CartConfig;
use cartstore::notify::{Notifier, TracingNotifier};
use cartstore::storage::FileStore;
use cartstore::{Cart, CartServices, CartStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Log filter when `RUST_LOG` is unset. Rejection causes log at `warn` and
/// stay hidden; the notifier already showed the user-facing message.
const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("storage open failed: {0}")]
    Storage(#[from] cartstore::storage::StorageError),
    #[error("catalog client failed: {0}")]
    Catalog(#[from] cartstore::catalog::CatalogError),
    #[error("cart encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("cart operation failed")]
    Rejected,
}

#[derive(Parser, Debug)]
#[command(name = "cart", about = "Storefront cart backed by a JSON file and the stock API")]
struct Cli {
    #[arg(long, env = "CART_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "CART_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    #[arg(long, env = "CART_STORAGE_KEY")]
    storage_key: Option<String>,

    /// Send user-facing errors to the log (target `cart::toast`) instead of stderr.
    #[arg(long, env = "CART_LOG_TOASTS", default_value_t = false)]
    log_toasts: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cart and its totals.
    List,
    /// Add one unit of a product.
    Add { product_id: u64 },
    /// Remove a product line.
    Remove { product_id: u64 },
    /// Set the amount of a product already in the cart.
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Prints user-facing cart errors to stderr, like a toast would in the UI.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, ".env not loaded");
        }
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Rejected) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "cart command failed");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = CartConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_owned();
    }
    if let Some(path) = cli.storage_path {
        config.storage_path = path;
    }
    if let Some(key) = cli.storage_key {
        config.storage_key = key;
    }

    let catalog = Arc::new(HttpCatalog::new(config.api_url.clone(), config.timeouts)?);
    let storage = FileStore::open(&config.storage_path)?;
    tracing::debug!(api_url = %catalog.base_url(), path = %storage.path().display(), "cart ready");

    let notifier: Arc<dyn Notifier> = if cli.log_toasts { Arc::new(TracingNotifier) } else { Arc::new(ConsoleNotifier) };
    let services = CartServices { stock: catalog.clone(), products: catalog, notifier, storage: Arc::new(storage) };
    let store = CartStore::open(services, config.storage_key.clone());

    let outcome = match cli.command {
        Command::List => Ok(()),
        Command::Add { product_id } => store.add_product(product_id).await.map(drop),
        Command::Remove { product_id } => store.remove_product(product_id).await.map(drop),
        Command::Update { product_id, amount } => store.update_product_amount(product_id, amount).await.map(drop),
    };

    print_cart(&store.cart())?;
    // The notifier already told the user what went wrong.
    outcome.map_err(|_| CliError::Rejected)
}

fn print_cart(cart: &Cart) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(cart)?);
    println!("items: {}  units: {}  subtotal: {:.2}", cart.len(), cart.total_units(), cart.subtotal());
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
