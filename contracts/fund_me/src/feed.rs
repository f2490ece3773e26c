//! Price feed interface.
//!
//! The minimal aggregator surface FundMe consumes: a price scaled by
//! `10^decimals`. Any deployed contract exporting these two functions
//! satisfies it; the generated [`PriceFeedClient`] is the only coupling.

use soroban_sdk::{contractclient, Env};

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// Decimal scale of [`PriceFeed::latest_answer`].
    fn decimals(env: Env) -> u32;

    /// Most recent USD price of the asset, scaled by `10^decimals`.
    fn latest_answer(env: Env) -> i128;
}
