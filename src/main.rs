//! wallet-session CLI.
//!
//! One-shot commands wiring config → bridge → service: each invocation
//! builds a fresh session against the configured signer endpoint, runs a
//! single action, and prints the resulting session snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_session::config::loader::load_config;
use wallet_session::{MemorySessionStore, RpcBridge, WalletConfig, WalletService};

#[derive(Parser)]
#[command(name = "wallet-session", version, about = "Wallet connection and transaction submission")]
struct Cli {
    /// Path to the TOML configuration file; defaults apply when absent.
    #[arg(long, default_value = "wallet.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the wallet session snapshot without connecting.
    Status,
    /// Connect to the signer and print the resulting session.
    Connect,
    /// Submit a transfer and wait for confirmation.
    Send {
        /// Recipient address.
        to: String,
        /// Amount in native display units (e.g. "1.5").
        amount: String,
    },
    /// Purchase an item through the smart wallet.
    Purchase {
        /// Item identifier.
        item_id: u64,
    },
    /// Associate the wallet with an identity, paying the configured fee.
    Associate {
        /// Identity to bind (e.g. an email address).
        identity: String,
    },
    /// Read the smart-wallet custody balance.
    ContractBalance,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        WalletConfig::default()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("wallet_session={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        network = %config.network.name,
        rpc_url = %config.network.rpc_url,
        chain_id = config.network.chain_id,
        "wallet-session starting"
    );

    let bridge = Arc::new(RpcBridge::new(&config)?);
    let store = Arc::new(MemorySessionStore::new());
    let service = WalletService::new(bridge, store, &config);

    match cli.command {
        Command::Status => {}
        Command::Connect => {
            service.connect().await?;
        }
        Command::Send { to, amount } => {
            service.connect().await?;
            let result = service.send_transaction(&to, &amount)?.resolved().await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Purchase { item_id } => {
            service.connect().await?;
            let result = service.purchase_item(item_id)?.resolved().await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Associate { identity } => {
            service.connect().await?;
            let result = service.associate_wallet(&identity)?.resolved().await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::ContractBalance => {
            service.connect().await?;
            let balance = service.contract_balance().await?;
            println!("contract balance: {}", balance);
        }
    }

    println!("{}", serde_json::to_string_pretty(&service.snapshot())?);
    Ok(())
}
