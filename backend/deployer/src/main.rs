//! FundMe deployer — entry point.
//!
//! Resolves the target network from `CHAIN_ID`, deploys a mock price feed
//! when that target is a disposable local simulator, deploys the FundMe
//! contract wired to the resolved feed, and submits it for verification on
//! named networks when a credential is configured.

mod config;
mod deploy;
mod errors;
mod rpc;
mod selector;
mod store;
mod verify;

use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, NetworkTarget};
use deploy::CliDeployer;
use verify::Verifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    let target = config::resolve_target(config.chain_id)?;
    let network_name = match &target {
        NetworkTarget::LocalSimulator => "local simulator",
        NetworkTarget::Named(entry) => entry.name,
    };
    info!("Deploying to chain {} ({network_name})", config.chain_id);

    // Deployment-record store.
    let pool = store::init_pool(&config.database_url).await?;

    // HTTP client shared between the RPC reads and the verifier.
    let http = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let health = rpc::get_health(&http, &config.rpc_url).await?;
    info!("RPC health: {health}");

    // The passphrase is ground truth for which chain the endpoint serves;
    // refuse to deploy across a mismatch.
    let network = rpc::get_network(&http, &config.rpc_url).await?;
    if network.passphrase != target.passphrase() {
        anyhow::bail!(
            "RPC at {} serves '{}' but chain {} expects '{}'",
            config.rpc_url,
            network.passphrase,
            config.chain_id,
            target.passphrase()
        );
    }

    let deployer = CliDeployer::new(pool, http.clone(), &config, &target);
    let verifier = Verifier::from_config(&http, &config);

    let outcome = selector::run(&deployer, verifier.as_ref(), &config, &target).await?;

    info!("---------------------");
    info!("Price feed: {}", outcome.price_feed);
    if outcome.fund_me.reused {
        info!("FundMe:     {} (reused)", outcome.fund_me.contract_id);
    } else {
        info!("FundMe:     {}", outcome.fund_me.contract_id);
    }

    Ok(())
}
