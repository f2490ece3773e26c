//! Typed event payloads published by the contract.
//!
//! `Funded` is published under the `("funded", funder)` topic on every
//! successful contribution; `Withdrawn` under `("withdrawn",)` when the
//! owner drains the contract.

use soroban_sdk::{contracttype, Address};

/// A contribution was accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funded {
    pub funder: Address,
    pub amount: i128,
}

/// The owner withdrew the full balance and the ledger was reset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub owner: Address,
    pub amount: i128,
}
