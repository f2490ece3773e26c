//! Contract deployment — the boundary to the external deployment framework.
//!
//! The selector talks to a [`ContractDeployer`]; the production
//! implementation, [`CliDeployer`], drives the `stellar` CLI for the
//! chain-mutating operations and keeps a record of every deployment in the
//! store. Re-running with unchanged bytecode returns the recorded address
//! without touching the chain.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tokio::process::Command;
use tracing::info;

use crate::config::{Config, NetworkTarget};
use crate::errors::{DeployError, Result};
use crate::rpc;
use crate::store;

/// What to deploy: a named contract, its bytecode, and its constructor
/// arguments as `--key value` pairs.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub name: &'static str,
    pub wasm_path: PathBuf,
    pub constructor_args: Vec<(String, String)>,
    /// Ledgers to wait after a fresh deploy before returning.
    pub confirmations: u32,
}

/// A deployed (or reused) contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub contract_id: String,
    pub wasm_hash: String,
    /// True when an existing record satisfied the request without a deploy.
    pub reused: bool,
}

/// The deployment framework surface the selector works against.
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Deploy `request`, or return the recorded deployment when the same
    /// bytecode is already on this chain.
    async fn deploy(&self, request: &DeployRequest) -> Result<Deployment>;

    /// Most recent deployment of `name` on this chain, if any.
    async fn get(&self, name: &str) -> Result<Option<Deployment>>;

    /// Public address of a named signing identity.
    async fn resolve_account(&self, name: &str) -> Result<String>;

    /// Contract id of the chain's native asset.
    async fn native_asset(&self) -> Result<String>;
}

// ─────────────────────────────────────────────────────────
// CLI-backed implementation
// ─────────────────────────────────────────────────────────

pub struct CliDeployer {
    pool: SqlitePool,
    http: reqwest::Client,
    chain_id: u64,
    rpc_url: String,
    passphrase: &'static str,
    source_account: String,
    confirmation_poll_secs: u64,
}

impl CliDeployer {
    pub fn new(
        pool: SqlitePool,
        http: reqwest::Client,
        config: &Config,
        target: &NetworkTarget,
    ) -> Self {
        CliDeployer {
            pool,
            http,
            chain_id: config.chain_id,
            rpc_url: config.rpc_url.clone(),
            passphrase: target.passphrase(),
            source_account: config.source_account.clone(),
            confirmation_poll_secs: config.confirmation_poll_secs,
        }
    }

    async fn run_cli(&self, args: &[String]) -> Result<String> {
        let output = Command::new("stellar").args(args).output().await?;
        if !output.status.success() {
            return Err(DeployError::Cli(format!(
                "stellar {}: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        // The CLI prints progress to stderr; the last stdout line is the
        // answer (a contract id, an address, ...).
        Ok(String::from_utf8_lossy(&output.stdout)
            .trim()
            .lines()
            .last()
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

impl ContractDeployer for CliDeployer {
    async fn deploy(&self, request: &DeployRequest) -> Result<Deployment> {
        let wasm_hash = hash_wasm(&request.wasm_path).await?;

        if let Some(record) =
            store::find_by_wasm_hash(&self.pool, request.name, self.chain_id, &wasm_hash).await?
        {
            info!(
                "Reusing {} at {} (bytecode unchanged)",
                request.name, record.contract_id
            );
            return Ok(Deployment {
                contract_id: record.contract_id,
                wasm_hash,
                reused: true,
            });
        }

        info!(
            "Deploying {} from {}",
            request.name,
            request.wasm_path.display()
        );
        let args = deploy_args(
            request,
            &self.source_account,
            &self.rpc_url,
            self.passphrase,
        );
        let contract_id = self.run_cli(&args).await?;
        if contract_id.is_empty() {
            return Err(DeployError::Cli(format!(
                "stellar contract deploy printed no contract id for {}",
                request.name
            )));
        }

        rpc::wait_for_ledgers(
            &self.http,
            &self.rpc_url,
            request.confirmations,
            self.confirmation_poll_secs,
        )
        .await?;

        store::insert_deployment(
            &self.pool,
            request.name,
            self.chain_id,
            &contract_id,
            &wasm_hash,
        )
        .await?;
        info!("{} deployed at {}", request.name, contract_id);

        Ok(Deployment {
            contract_id,
            wasm_hash,
            reused: false,
        })
    }

    async fn get(&self, name: &str) -> Result<Option<Deployment>> {
        let record = store::latest_deployment(&self.pool, name, self.chain_id).await?;
        Ok(record.map(|r| Deployment {
            contract_id: r.contract_id,
            wasm_hash: r.wasm_hash,
            reused: true,
        }))
    }

    async fn resolve_account(&self, name: &str) -> Result<String> {
        let args = vec!["keys".to_string(), "address".to_string(), name.to_string()];
        let address = self.run_cli(&args).await?;
        if address.is_empty() {
            return Err(DeployError::Cli(format!("no address for identity {name}")));
        }
        Ok(address)
    }

    async fn native_asset(&self) -> Result<String> {
        // Pure derivation from the passphrase; no transaction involved.
        let args = vec![
            "contract".to_string(),
            "id".to_string(),
            "asset".to_string(),
            "--asset".to_string(),
            "native".to_string(),
            "--network-passphrase".to_string(),
            self.passphrase.to_string(),
        ];
        self.run_cli(&args).await
    }
}

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

/// sha256 of the wasm file, hex-encoded: the identity used to decide
/// whether bytecode changed since the last deployment.
async fn hash_wasm(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Assemble the `stellar contract deploy` argument list, constructor
/// arguments after the `--` separator.
fn deploy_args(
    request: &DeployRequest,
    source_account: &str,
    rpc_url: &str,
    passphrase: &str,
) -> Vec<String> {
    let mut args = vec![
        "contract".to_string(),
        "deploy".to_string(),
        "--wasm".to_string(),
        request.wasm_path.display().to_string(),
        "--source-account".to_string(),
        source_account.to_string(),
        "--rpc-url".to_string(),
        rpc_url.to_string(),
        "--network-passphrase".to_string(),
        passphrase.to_string(),
    ];
    if !request.constructor_args.is_empty() {
        args.push("--".to_string());
        for (key, value) in &request.constructor_args {
            args.push(format!("--{key}"));
            args.push(value.clone());
        }
    }
    args
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
