use clap::Parser;
use contract_sentinel::blockchain::BlockchainClient;
use contract_sentinel::core::config::{
    DEFAULT_COMPLEXITY_THRESHOLD, DEFAULT_EXPLORER_URL, DEFAULT_MAX_CATCH_UP, DEFAULT_RPC_URL,
    DEFAULT_SLEEP_SECS,
};
use contract_sentinel::report::ConsoleReporter;
use contract_sentinel::{BlockScanner, ScanConfig};
use std::sync::Arc;
use std::time::Duration;

/// Watch new blocks for freshly deployed contracts worth a look
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Flag contracts whose bytecode is longer than this many hex characters
    #[arg(long, env = "SENTINEL_COMPLEXITY", default_value_t = DEFAULT_COMPLEXITY_THRESHOLD)]
    complexity: usize,

    /// Seconds to wait between polls
    #[arg(long, env = "SENTINEL_SLEEP", default_value_t = DEFAULT_SLEEP_SECS)]
    sleep: u64,

    /// Skip contracts matching the suspicious-pattern table
    #[arg(long, env = "SENTINEL_ANALYSIS")]
    analysis: bool,

    /// Check for ownership renunciation (nothing is flagged without it)
    #[arg(long, alias = "checkOwnership", env = "SENTINEL_CHECK_OWNERSHIP")]
    check_ownership: bool,

    /// JSON-RPC endpoint
    #[arg(short, long, env = "SENTINEL_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc: String,

    /// Block explorer base URL used in report lines
    #[arg(long, env = "SENTINEL_EXPLORER_URL", default_value = DEFAULT_EXPLORER_URL)]
    explorer: String,

    /// Process every block since the previous poll instead of only the head
    #[arg(long, env = "SENTINEL_CATCH_UP")]
    catch_up: bool,

    /// Most blocks processed in one poll when catching up
    #[arg(long, env = "SENTINEL_MAX_CATCH_UP", default_value_t = DEFAULT_MAX_CATCH_UP)]
    max_catch_up: u64,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for ScanConfig {
    fn from(args: Args) -> Self {
        ScanConfig {
            rpc_url: args.rpc,
            explorer_url: args.explorer,
            complexity_threshold: args.complexity,
            sleep: Duration::from_secs(args.sleep),
            analysis: args.analysis,
            check_ownership: args.check_ownership,
            catch_up: args.catch_up,
            max_catch_up: args.max_catch_up,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Setup logging
    let default_filter = if args.verbose {
        "contract_sentinel=debug"
    } else {
        "contract_sentinel=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = ScanConfig::from(args);
    config.validate()?;

    tracing::info!("Connecting to {}...", config.rpc_url);
    let client = match BlockchainClient::new(&config.rpc_url).await {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Error connecting: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to {}", client.chain_name());

    if !config.check_ownership {
        tracing::warn!("Ownership check disabled: no contract will be flagged");
    }

    let mut scanner = BlockScanner::new(client, Arc::new(config), Arc::new(ConsoleReporter));
    scanner.run().await;

    Ok(())
}
