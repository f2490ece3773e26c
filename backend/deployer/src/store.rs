//! Deployment-record store — migrations and queries.
//!
//! One row per `(contract, chain, wasm hash)` deployment. The records are
//! what makes re-running the deployer idempotent: unchanged bytecode
//! short-cuts to the recorded address instead of deploying again.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::Result;

/// A deployment as stored in / read from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DeploymentRecord {
    pub id: i64,
    pub contract_name: String,
    pub chain_id: i64,
    pub contract_id: String,
    pub wasm_hash: String,
    pub deployed_at: i64,
}

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

/// Record a deployment. A row with the same `(contract_name, chain_id,
/// wasm_hash)` tuple is silently ignored, keeping repeated runs idempotent.
pub async fn insert_deployment(
    pool: &SqlitePool,
    contract_name: &str,
    chain_id: u64,
    contract_id: &str,
    wasm_hash: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO deployments
            (contract_name, chain_id, contract_id, wasm_hash, deployed_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(contract_name)
    .bind(chain_id as i64)
    .bind(contract_id)
    .bind(wasm_hash)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recent deployment of `contract_name` on `chain_id`, if any.
pub async fn latest_deployment(
    pool: &SqlitePool,
    contract_name: &str,
    chain_id: u64,
) -> Result<Option<DeploymentRecord>> {
    let row = sqlx::query_as::<_, DeploymentRecord>(
        r#"
        SELECT id, contract_name, chain_id, contract_id, wasm_hash, deployed_at
        FROM   deployments
        WHERE  contract_name = ?1 AND chain_id = ?2
        ORDER  BY id DESC
        LIMIT  1
        "#,
    )
    .bind(contract_name)
    .bind(chain_id as i64)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Deployment of `contract_name` on `chain_id` with exactly this bytecode.
pub async fn find_by_wasm_hash(
    pool: &SqlitePool,
    contract_name: &str,
    chain_id: u64,
    wasm_hash: &str,
) -> Result<Option<DeploymentRecord>> {
    let row = sqlx::query_as::<_, DeploymentRecord>(
        r#"
        SELECT id, contract_name, chain_id, contract_id, wasm_hash, deployed_at
        FROM   deployments
        WHERE  contract_name = ?1 AND chain_id = ?2 AND wasm_hash = ?3
        ORDER  BY id DESC
        LIMIT  1
        "#,
    )
    .bind(contract_name)
    .bind(chain_id as i64)
    .bind(wasm_hash)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
