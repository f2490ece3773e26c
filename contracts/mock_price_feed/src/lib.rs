//! # Mock Price Feed
//!
//! Stand-in price aggregator for development chains, where no real oracle
//! survives between runs of the local simulator. Quotes a fixed decimal
//! scale and an answer set at deploy time; `set_answer` lets local tooling
//! move the price without redeploying.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Decimal scale of the quoted answer.
    Decimals,
    /// Latest quoted price.
    Answer,
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn __constructor(env: Env, decimals: u32, initial_answer: i128) {
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::Answer, &initial_answer);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .expect("decimals not set")
    }

    pub fn latest_answer(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::Answer)
            .expect("answer not set")
    }

    /// Replace the quoted price. Test/operator hook only.
    pub fn set_answer(env: Env, answer: i128) {
        env.storage().instance().set(&DataKey::Answer, &answer);
    }
}
