//! Soroban JSON-RPC client — the read side of the deployment pipeline.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied on transport errors and rate-limit
//!   responses, up to [`MAX_BACKOFF_SECS`] seconds and [`MAX_ATTEMPTS`]
//!   attempts; a deployment run is one-shot, so it fails rather than hangs.
//! * Malformed-request errors (`-32600`, `-32601`) are hard failures and are
//!   never retried; other RPC-level errors are treated as transient.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{DeployError, Result};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;
const MAX_ATTEMPTS: u32 = 5;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResult {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct NetworkResult {
    pub passphrase: String,
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LatestLedgerResult {
    pub sequence: u64,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// `getHealth` — returns the node's status string (`"healthy"` when usable).
pub async fn get_health(client: &Client, rpc_url: &str) -> Result<String> {
    let result: HealthResult = call(client, rpc_url, "getHealth", json!({})).await?;
    Ok(result.status)
}

/// `getNetwork` — the network the endpoint actually serves. The passphrase
/// is the ground truth for which chain we are talking to.
pub async fn get_network(client: &Client, rpc_url: &str) -> Result<NetworkResult> {
    call(client, rpc_url, "getNetwork", json!({})).await
}

/// `getLatestLedger` — current ledger sequence.
pub async fn get_latest_ledger(client: &Client, rpc_url: &str) -> Result<u64> {
    let result: LatestLedgerResult = call(client, rpc_url, "getLatestLedger", json!({})).await?;
    Ok(result.sequence)
}

/// Block until `confirmations` ledgers have closed on top of the current
/// one, polling every `poll_secs`. Returns the last observed sequence.
pub async fn wait_for_ledgers(
    client: &Client,
    rpc_url: &str,
    confirmations: u32,
    poll_secs: u64,
) -> Result<u64> {
    let start = get_latest_ledger(client, rpc_url).await?;
    let target = start + u64::from(confirmations);
    loop {
        let latest = get_latest_ledger(client, rpc_url).await?;
        if latest >= target {
            return Ok(latest);
        }
        debug!("At ledger {latest}, waiting for {target}");
        tokio::time::sleep(Duration::from_secs(poll_secs)).await;
    }
}

// ─────────────────────────────────────────────────────────
// Request plumbing
// ─────────────────────────────────────────────────────────

/// Whether an RPC-level error code is a hard failure (retrying cannot help).
fn is_hard_error(code: i64) -> bool {
    code == -32600 || code == -32601
}

async fn call<T: DeserializeOwned>(
    client: &Client,
    rpc_url: &str,
    method: &str,
    params: Value,
) -> Result<T> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let request_body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    for attempt in 1..=MAX_ATTEMPTS {
        let response = client.post(rpc_url).json(&request_body).send().await;

        let resp = match response {
            Err(e) => {
                warn!("{method} request failed (attempt {attempt}, retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => resp,
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (attempt {attempt}, retry in {backoff}s)");
            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
            continue;
        }

        let body: RpcResponse<T> = resp.json().await?;

        if let Some(err) = body.error {
            if is_hard_error(err.code) {
                return Err(DeployError::Rpc(format!(
                    "{method} hard error {}: {}",
                    err.code, err.message
                )));
            }
            warn!(
                "{method} soft error (attempt {attempt}, retry in {backoff}s): {} {}",
                err.code, err.message
            );
            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
            continue;
        }

        return body
            .result
            .ok_or_else(|| DeployError::Rpc(format!("Empty result from {method}")));
    }

    Err(DeployError::Rpc(format!(
        "{method} still failing after {MAX_ATTEMPTS} attempts"
    )))
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
