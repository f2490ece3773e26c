//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by FundMe:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type      | Description                            |
//! |-------------|-----------|----------------------------------------|
//! | `Owner`     | `Address` | Withdrawal authority, set at construction |
//! | `PriceFeed` | `Address` | Price oracle contract                  |
//! | `Asset`     | `Address` | Funding asset (Stellar Asset Contract) |
//!
//! All three instance entries are written once by the constructor and never
//! mutated. Instance TTL is bumped by 7 days whenever it falls below 1 day
//! remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                    | Type           | Description                       |
//! |------------------------|----------------|-----------------------------------|
//! | `Funders`              | `Vec<Address>` | Insertion-ordered funder list     |
//! | `AmountFunded(addr)`   | `i128`         | Cumulative amount per address     |
//!
//! `Funders` may hold the same address multiple times (one entry per `fund`
//! call). An absent `AmountFunded` key reads as 0; withdrawal removes the
//! entries outright rather than writing zeros. Persistent TTL is bumped by
//! 30 days whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env, Vec};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys (`Owner`, `PriceFeed`, `Asset`) live as long as the
/// contract and are extended together. Persistent-tier keys (`Funders`,
/// `AmountFunded`) hold the contribution ledger with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Withdrawal authority (Instance).
    Owner,
    /// Price oracle contract address (Instance).
    PriceFeed,
    /// Funding asset contract address (Instance).
    Asset,
    /// Insertion-ordered list of contributor addresses (Persistent).
    Funders,
    /// Cumulative funded amount keyed by contributor (Persistent).
    AmountFunded(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

/// Panics if the constructor never ran, which the host rules out.
pub fn get_owner(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("owner not set")
}

pub fn set_price_feed(env: &Env, feed: &Address) {
    env.storage().instance().set(&DataKey::PriceFeed, feed);
    bump_instance(env);
}

pub fn get_price_feed(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PriceFeed)
        .expect("price feed not set")
}

pub fn set_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&DataKey::Asset, asset);
    bump_instance(env);
}

pub fn get_asset(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Asset)
        .expect("asset not set")
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key that is known to exist.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Load the funder list; empty before the first contribution and after each
/// withdrawal reset.
pub fn load_funders(env: &Env) -> Vec<Address> {
    let key = DataKey::Funders;
    match env.storage().persistent().get(&key) {
        Some(funders) => {
            bump_persistent(env, &key);
            funders
        }
        None => Vec::new(env),
    }
}

pub fn save_funders(env: &Env, funders: &Vec<Address>) {
    let key = DataKey::Funders;
    env.storage().persistent().set(&key, funders);
    bump_persistent(env, &key);
}

/// Cumulative amount funded by `funder`; 0 when no entry exists.
pub fn load_amount_funded(env: &Env, funder: &Address) -> i128 {
    let key = DataKey::AmountFunded(funder.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn save_amount_funded(env: &Env, funder: &Address, amount: i128) {
    let key = DataKey::AmountFunded(funder.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

/// Drop a funder's ledger entry entirely; subsequent loads read 0.
pub fn clear_amount_funded(env: &Env, funder: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::AmountFunded(funder.clone()));
}
