//! # FundMe Contract
//!
//! Crowdfunding Soroban contract: anyone may fund it with the configured
//! asset as long as the contribution clears a USD-denominated minimum, and
//! only the owner may withdraw the accumulated balance.
//!
//! | Phase      | Entry Point(s)                                   |
//! |------------|--------------------------------------------------|
//! | Deploy     | `__constructor`                                  |
//! | Funding    | [`FundMe::fund`]                                 |
//! | Withdrawal | [`FundMe::withdraw`]                             |
//! | Queries    | `get_owner`, `get_price_feed`, `get_asset`, `get_funder`, `get_address_to_amount_funded`, `minimum_usd` |
//!
//! The USD value of a contribution is derived from an external price feed
//! consumed through [`feed::PriceFeedClient`]; conversion arithmetic lives in
//! [`price`], storage access in [`storage`]. This file contains only the
//! public entry points and event emissions.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, token, Address, Env,
    Vec,
};

mod events;
mod feed;
mod price;
mod storage;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_withdraw;

pub use events::{Funded, Withdrawn};
pub use feed::{PriceFeed, PriceFeedClient};
pub use price::{ASSET_DECIMALS, MINIMUM_USD};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InsufficientFunding = 1,
    NotOwner            = 2,
    IndexOutOfRange     = 3,
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    /// Deploy-time wiring, run exactly once by the host.
    ///
    /// - `owner` is the only address permitted to withdraw.
    /// - `price_feed` is the oracle contract quoting the asset's USD price.
    /// - `asset` is the Stellar Asset Contract contributions are paid in.
    ///
    /// All three are immutable for the life of the contract.
    pub fn __constructor(env: Env, owner: Address, price_feed: Address, asset: Address) {
        storage::set_owner(&env, &owner);
        storage::set_price_feed(&env, &price_feed);
        storage::set_asset(&env, &asset);
    }

    /// Contribute `amount` of the funding asset.
    ///
    /// The contribution's USD value, read through the price feed, must be at
    /// least [`MINIMUM_USD`]; otherwise the call reverts with
    /// `Error::InsufficientFunding` and no state changes.
    ///
    /// Each successful call appends `funder` to the funder list (repeat
    /// funders appear once per call) and adds `amount` to their cumulative
    /// total.
    pub fn fund(env: Env, funder: Address, amount: i128) {
        funder.require_auth();

        let feed = PriceFeedClient::new(&env, &storage::get_price_feed(&env));
        let answer = feed.latest_answer();
        let decimals = feed.decimals();
        if !price::meets_minimum(amount, answer, decimals) {
            panic_with_error!(&env, Error::InsufficientFunding);
        }

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        asset.transfer(&funder, &env.current_contract_address(), &amount);

        let mut funders = storage::load_funders(&env);
        funders.push_back(funder.clone());
        storage::save_funders(&env, &funders);

        let total = storage::load_amount_funded(&env, &funder) + amount;
        storage::save_amount_funded(&env, &funder, total);

        env.events().publish(
            (symbol_short!("funded"), funder.clone()),
            events::Funded { funder, amount },
        );
    }

    /// Withdraw the full contract balance to the owner and reset the ledger.
    ///
    /// Only the owner may call this; anyone else reverts with
    /// `Error::NotOwner`. The per-address amounts are removed and the funder
    /// list emptied *before* the outbound transfer; no ledger entry may
    /// survive into the external call. A failed transfer traps, and the host
    /// restores the pre-call state, ledgers included.
    pub fn withdraw(env: Env, caller: Address) {
        caller.require_auth();

        let owner = storage::get_owner(&env);
        if caller != owner {
            panic_with_error!(&env, Error::NotOwner);
        }

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        let balance = asset.balance(&env.current_contract_address());

        // Amounts first, then the list.
        let funders = storage::load_funders(&env);
        for funder in funders.iter() {
            storage::clear_amount_funded(&env, &funder);
        }
        storage::save_funders(&env, &Vec::new(&env));

        if balance > 0 {
            asset.transfer(&env.current_contract_address(), &owner, &balance);
        }

        env.events().publish(
            (symbol_short!("withdrawn"),),
            events::Withdrawn {
                owner,
                amount: balance,
            },
        );
    }

    /// Address fixed at deployment; sole withdrawal authority.
    pub fn get_owner(env: Env) -> Address {
        storage::get_owner(&env)
    }

    /// Price feed contract this deployment was wired to.
    pub fn get_price_feed(env: Env) -> Address {
        storage::get_price_feed(&env)
    }

    /// Stellar Asset Contract contributions are denominated in.
    pub fn get_asset(env: Env) -> Address {
        storage::get_asset(&env)
    }

    /// Funder at `index` in insertion order.
    ///
    /// Reverts with `Error::IndexOutOfRange` when `index` is not a valid
    /// position in the funder list.
    pub fn get_funder(env: Env, index: u32) -> Address {
        let funders = storage::load_funders(&env);
        match funders.get(index) {
            Some(funder) => funder,
            None => panic_with_error!(&env, Error::IndexOutOfRange),
        }
    }

    /// Cumulative amount funded by `funder`; 0 if they never funded (or the
    /// ledger was reset by a withdrawal since).
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        storage::load_amount_funded(&env, &funder)
    }

    /// Minimum contribution value in whole USD.
    pub fn minimum_usd() -> i128 {
        price::MINIMUM_USD
    }
}
