//! Application configuration: environment variables plus the static network
//! table.
//!
//! The table maps chain ids to the pre-existing price feed on each public
//! network. Chain ids in [`DEVELOPMENT_CHAIN_IDS`] run a disposable local
//! simulator instead; nothing deployed there survives a restart, so the
//! price feed has to be a freshly deployed mock every time. Resolution
//! happens once, up front, into a [`NetworkTarget`]; nothing downstream
//! compares raw chain ids.

use crate::errors::{DeployError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Target chain id; resolved against the table / development set.
    pub chain_id: u64,
    /// Named CLI identity that signs and funds the deployment.
    pub source_account: String,
    /// Soroban RPC endpoint of the target network.
    pub rpc_url: String,
    /// Path to the SQLite deployment-record database.
    pub database_url: String,
    /// Directory holding the built contract wasm files.
    pub wasm_dir: String,
    /// How often (in seconds) to poll the ledger while waiting confirmations.
    pub confirmation_poll_secs: u64,
    /// Contract verification service endpoint, if any.
    pub verifier_url: Option<String>,
    /// API credential for the verification service, if any.
    pub verifier_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            chain_id: env_var("CHAIN_ID")
                .map_err(|_| {
                    DeployError::Config("CHAIN_ID environment variable is required".to_string())
                })?
                .parse()
                .map_err(|_| DeployError::Config("Invalid CHAIN_ID".to_string()))?,
            source_account: env_var("SOURCE_ACCOUNT").unwrap_or_else(|_| "deployer".to_string()),
            rpc_url: env_var("RPC_URL")
                .unwrap_or_else(|_| "http://localhost:8000/soroban/rpc".to_string()),
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./deployments.db".to_string()),
            wasm_dir: env_var("WASM_DIR")
                .unwrap_or_else(|_| "target/wasm32-unknown-unknown/release".to_string()),
            confirmation_poll_secs: env_var("CONFIRMATION_POLL_SECS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .map_err(|_| DeployError::Config("Invalid CONFIRMATION_POLL_SECS".to_string()))?,
            verifier_url: env_var("VERIFIER_URL").ok(),
            verifier_api_key: env_var("VERIFIER_API_KEY").ok(),
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| DeployError::Config(format!("Missing env var: {key}")))
}

// ─────────────────────────────────────────────────────────
// Static network table
// ─────────────────────────────────────────────────────────

/// A public network with a pre-existing price feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    pub chain_id: u64,
    pub name: &'static str,
    pub passphrase: &'static str,
    /// Contract id of the asset/USD price feed already live on this network.
    pub price_feed: &'static str,
    /// Ledgers to wait after deploying before verification.
    pub confirmations: u32,
}

/// Chain ids that run a disposable local simulator.
pub const DEVELOPMENT_CHAIN_IDS: &[u64] = &[31337];

/// Passphrase of the standalone simulator network.
pub const LOCAL_PASSPHRASE: &str = "Standalone Network ; February 2017";

static NETWORK_CONFIG: &[NetworkEntry] = &[
    NetworkEntry {
        chain_id: 1,
        name: "pubnet",
        passphrase: "Public Global Stellar Network ; September 2015",
        price_feed: "CALI2BYU2JE6WVRUFYTS6MSBNEHGJ35P4AVCZYF3B6QOE3QKOB2PLE6M",
        confirmations: 6,
    },
    NetworkEntry {
        chain_id: 2,
        name: "testnet",
        passphrase: "Test SDF Network ; September 2015",
        price_feed: "CAVLP5DH2GJPZMVO7IJY4CVOD5MWEFTJFVPD2YY2FQXOQHRGHK4D6HLP",
        confirmations: 1,
    },
];

/// Look up a named network by chain id.
pub fn network_entry(chain_id: u64) -> Option<&'static NetworkEntry> {
    NETWORK_CONFIG.iter().find(|e| e.chain_id == chain_id)
}

// ─────────────────────────────────────────────────────────
// Target resolution
// ─────────────────────────────────────────────────────────

/// Where a deployment is headed. Replaces raw chain-id comparisons in the
/// selector: the decision is made here, once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkTarget {
    /// Disposable local simulator; price feed must be a fresh mock.
    LocalSimulator,
    /// Long-lived public network with a known price feed.
    Named(&'static NetworkEntry),
}

impl NetworkTarget {
    pub fn is_development(&self) -> bool {
        matches!(self, NetworkTarget::LocalSimulator)
    }

    pub fn passphrase(&self) -> &'static str {
        match self {
            NetworkTarget::LocalSimulator => LOCAL_PASSPHRASE,
            NetworkTarget::Named(entry) => entry.passphrase,
        }
    }

    pub fn confirmations(&self) -> u32 {
        match self {
            NetworkTarget::LocalSimulator => 1,
            NetworkTarget::Named(entry) => entry.confirmations,
        }
    }
}

/// Resolve a chain id into a deployment target.
///
/// A chain id that is neither a development chain nor present in the table
/// is a hard configuration failure.
pub fn resolve_target(chain_id: u64) -> Result<NetworkTarget> {
    if DEVELOPMENT_CHAIN_IDS.contains(&chain_id) {
        return Ok(NetworkTarget::LocalSimulator);
    }
    network_entry(chain_id)
        .map(NetworkTarget::Named)
        .ok_or(DeployError::UnknownChain(chain_id))
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
