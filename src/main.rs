use clap::Parser;
use crypticvalley::application::controller::OrderController;
use crypticvalley::config::AppConfig;
use crypticvalley::domain::menu::MenuCatalog;
use crypticvalley::domain::payment::PaymentOutcome;
use crypticvalley::error::{OrderError, Result as OrderResult};
use crypticvalley::infrastructure::simulated::{SettlementBehavior, SimulatedWallet};
use crypticvalley::interfaces::csv::intent_reader::{Intent, IntentReader};
use crypticvalley::interfaces::csv::menu_reader::MenuReader;
use crypticvalley::interfaces::csv::order_writer::OrderWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Intent script CSV file (`action,value` rows)
    intents: PathBuf,

    /// Menu CSV file (`name,price` rows). Defaults to the house menu.
    #[arg(long)]
    menu: Option<PathBuf>,

    /// JSON configuration file with network settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chain the simulated wallet is connected to. Defaults to the configured chain.
    #[arg(long)]
    wallet_chain_id: Option<u64>,

    /// Make the simulated wallet decline every payment
    #[arg(long, conflicts_with = "unreachable")]
    decline: bool,

    /// Make the simulated wallet unreachable
    #[arg(long)]
    unreachable: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_json_file(path).into_diagnostic()?,
        None => AppConfig::default(),
    };

    let catalog = match &cli.menu {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            MenuReader::new(file).into_catalog().into_diagnostic()?
        }
        None => MenuCatalog::house_menu().into_diagnostic()?,
    };

    let behavior = if cli.decline {
        SettlementBehavior::Decline("user denied transaction signature".to_string())
    } else if cli.unreachable {
        SettlementBehavior::Unreachable
    } else {
        SettlementBehavior::Confirm
    };
    let wallet = SimulatedWallet::new(cli.wallet_chain_id.unwrap_or(config.network.chain_id))
        .with_behavior(behavior);

    tracing::info!(
        network = %config.network.name,
        chain_id = config.network.chain_id,
        contract = config.contract_address.as_deref().unwrap_or("unset"),
        items = catalog.list().len(),
        "Restaurant open"
    );

    let controller = OrderController::new(Arc::new(catalog), Box::new(wallet), config.network);

    // Replay intents
    let file = File::open(cli.intents).into_diagnostic()?;
    let reader = IntentReader::new(file);
    for intent_result in reader.intents() {
        match intent_result {
            Ok(intent) => {
                if let Err(e) = apply(&controller, intent).await {
                    tracing::warn!(error = %e, "Error processing intent");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error reading intent");
            }
        }
    }

    // Output final state
    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer
        .write_snapshot(&controller.snapshot())
        .into_diagnostic()?;

    Ok(())
}

async fn apply(controller: &OrderController, intent: Intent) -> OrderResult<()> {
    match intent {
        Intent::ConnectWallet => {
            controller.connect_wallet().await?;
        }
        Intent::AddItem(name) => {
            let id = controller
                .catalog()
                .find_by_name(&name)
                .map(|item| item.id)
                .ok_or(OrderError::InvalidItem(name))?;
            controller.add_item(id)?;
        }
        Intent::RemoveLine(line_id) => {
            controller.remove_line(line_id)?;
        }
        Intent::SetTip(tip) => {
            controller.set_tip(tip)?;
        }
        Intent::Pay => match controller.initiate_payment().await? {
            PaymentOutcome::Paid { total, receipt } => {
                tracing::info!(
                    total = %total.display(),
                    tx_hash = %receipt.tx_hash,
                    "Done! Total paid: {}",
                    total.display()
                );
            }
            PaymentOutcome::AlreadyPending => {
                tracing::info!("Payment pending");
            }
        },
    }
    Ok(())
}

/// Structured logging to stderr, controlled via `RUST_LOG`.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crypticvalley=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}
