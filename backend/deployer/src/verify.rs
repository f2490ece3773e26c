//! Contract verification client.
//!
//! Verification publishes the contract's source mapping to an external
//! explorer service. It only makes sense on long-lived networks and only
//! when a credential is configured; a failure is worth a warning, never an
//! aborted deployment, so the caller downgrades the error.

use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::{Config, NetworkTarget};
use crate::errors::{DeployError, Result};

pub struct Verifier {
    client: Client,
    url: String,
    api_key: String,
}

impl Verifier {
    /// Build a verifier when both the endpoint and the credential are
    /// configured; otherwise verification is simply off.
    pub fn from_config(client: &Client, config: &Config) -> Option<Self> {
        match (&config.verifier_url, &config.verifier_api_key) {
            (Some(url), Some(api_key)) => Some(Verifier {
                client: client.clone(),
                url: url.clone(),
                api_key: api_key.clone(),
            }),
            _ => None,
        }
    }

    /// Submit a deployed contract for verification.
    pub async fn verify(
        &self,
        contract_id: &str,
        wasm_hash: &str,
        constructor_args: &[(String, String)],
    ) -> Result<()> {
        let args: serde_json::Map<String, serde_json::Value> = constructor_args
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();

        let response = self
            .client
            .post(format!("{}/verify", self.url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .json(&json!({
                "contractId": contract_id,
                "wasmHash": wasm_hash,
                "constructorArgs": args,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::Verification(format!(
                "verifier returned {status}: {}",
                body.trim()
            )));
        }

        info!("Contract {contract_id} submitted for verification");
        Ok(())
    }
}

/// Verification runs only off the development chains and only with a
/// credential present.
pub fn should_verify(target: &NetworkTarget, api_key: Option<&str>) -> bool {
    !target.is_development() && api_key.is_some()
}
