#![allow(dead_code)]

extern crate std;

use soroban_sdk::{token, Address};

use crate::FundMeClient;

/// INV-1: the sum of per-address funded amounts equals the contract's asset
/// balance. `funders` must list each distinct contributor once.
pub fn assert_ledger_matches_balance(
    asset: &token::Client,
    client: &FundMeClient,
    funders: &[&Address],
) {
    let mut sum = 0i128;
    for funder in funders {
        sum += client.get_address_to_amount_funded(funder);
    }
    let balance = asset.balance(&client.address);
    assert_eq!(
        sum, balance,
        "INV-1 violated: ledger sum {} != contract balance {}",
        sum, balance
    );
}

/// INV-2: no address ever has a negative cumulative amount.
pub fn assert_amount_non_negative(client: &FundMeClient, funder: &Address) {
    let amount = client.get_address_to_amount_funded(funder);
    assert!(
        amount >= 0,
        "INV-2 violated: funder has negative amount {}",
        amount
    );
}

/// INV-3: after a successful withdrawal, every prior contributor reads 0.
pub fn assert_amounts_cleared(client: &FundMeClient, funders: &[&Address]) {
    for funder in funders {
        let amount = client.get_address_to_amount_funded(funder);
        assert_eq!(
            amount, 0,
            "INV-3 violated: funder still shows {} after reset",
            amount
        );
    }
}

/// INV-4: after a successful withdrawal the funder list is empty, so index 0
/// is out of range.
pub fn assert_funder_list_empty(client: &FundMeClient) {
    assert!(
        client.try_get_funder(&0).is_err(),
        "INV-4 violated: funder list not empty after reset"
    );
}
