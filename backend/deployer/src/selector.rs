//! Deployment selection: which price feed a FundMe deployment gets wired to.
//!
//! On a development chain nothing survives between runs of the simulator,
//! so a mock price feed is deployed first and FundMe takes its fresh
//! address. On a named network the feed comes from the static table. The
//! run happens in two phases: mocks first, then the contract, then (named
//! networks only, credential permitting) verification.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, NetworkTarget};
use crate::deploy::{ContractDeployer, DeployRequest, Deployment};
use crate::errors::{DeployError, Result};
use crate::verify::{should_verify, Verifier};

pub const FUND_ME_CONTRACT: &str = "fund_me";
pub const MOCK_FEED_CONTRACT: &str = "mock_price_feed";

/// Mock feed fixture: $2000.00 quoted with 8 decimals.
pub const MOCK_FEED_DECIMALS: u32 = 8;
pub const MOCK_FEED_INITIAL_ANSWER: i128 = 200_000_000_000;

/// Everything the run produced, for logging and downstream tooling.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// Resolved price feed: the fresh mock on a development chain, the
    /// table entry elsewhere.
    pub price_feed: String,
    pub fund_me: Deployment,
}

/// Full deployment flow: mocks, contract, verification.
pub async fn run<D: ContractDeployer>(
    deployer: &D,
    verifier: Option<&Verifier>,
    config: &Config,
    target: &NetworkTarget,
) -> Result<DeployOutcome> {
    deploy_mocks(deployer, config, target).await?;
    deploy_fund_me(deployer, verifier, config, target).await
}

/// Deploy the mock price feed — development chains only.
pub async fn deploy_mocks<D: ContractDeployer>(
    deployer: &D,
    config: &Config,
    target: &NetworkTarget,
) -> Result<()> {
    if !target.is_development() {
        return Ok(());
    }

    info!("Local network detected, deploying mocks");
    deployer
        .deploy(&DeployRequest {
            name: MOCK_FEED_CONTRACT,
            wasm_path: wasm_path(config, MOCK_FEED_CONTRACT),
            constructor_args: vec![
                ("decimals".to_string(), MOCK_FEED_DECIMALS.to_string()),
                (
                    "initial-answer".to_string(),
                    MOCK_FEED_INITIAL_ANSWER.to_string(),
                ),
            ],
            confirmations: target.confirmations(),
        })
        .await?;
    info!("Mocks deployed");
    Ok(())
}

/// Deploy FundMe wired to the resolved price feed.
pub async fn deploy_fund_me<D: ContractDeployer>(
    deployer: &D,
    verifier: Option<&Verifier>,
    config: &Config,
    target: &NetworkTarget,
) -> Result<DeployOutcome> {
    let price_feed = match target {
        NetworkTarget::LocalSimulator => {
            deployer
                .get(MOCK_FEED_CONTRACT)
                .await?
                .ok_or_else(|| {
                    DeployError::Config(
                        "mock price feed has not been deployed on this chain".to_string(),
                    )
                })?
                .contract_id
        }
        NetworkTarget::Named(entry) => entry.price_feed.to_string(),
    };

    let owner = deployer.resolve_account(&config.source_account).await?;
    let asset = deployer.native_asset().await?;

    let constructor_args = vec![
        ("owner".to_string(), owner),
        ("price-feed".to_string(), price_feed.clone()),
        ("asset".to_string(), asset),
    ];

    let fund_me = deployer
        .deploy(&DeployRequest {
            name: FUND_ME_CONTRACT,
            wasm_path: wasm_path(config, FUND_ME_CONTRACT),
            constructor_args: constructor_args.clone(),
            confirmations: target.confirmations(),
        })
        .await?;

    if should_verify(target, config.verifier_api_key.as_deref()) {
        if let Some(verifier) = verifier {
            if let Err(e) = verifier
                .verify(&fund_me.contract_id, &fund_me.wasm_hash, &constructor_args)
                .await
            {
                warn!("Contract verification failed (continuing): {e}");
            }
        }
    }

    Ok(DeployOutcome {
        price_feed,
        fund_me,
    })
}

fn wasm_path(config: &Config, name: &str) -> PathBuf {
    Path::new(&config.wasm_dir).join(format!("{name}.wasm"))
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
