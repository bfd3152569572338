use std::path::PathBuf;

use clap::Parser;

use customer_orders_gateway::lifecycle::startup;

#[derive(Parser)]
#[command(name = "customer-orders-gateway")]
#[command(about = "HTTP gateway aggregating the customer and order RPC services", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "ORDERS_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = startup::run(cli.config.as_deref()).await {
        tracing::error!(error = %e, "Fatal startup error");
        return Err(e.into());
    }

    Ok(())
}
