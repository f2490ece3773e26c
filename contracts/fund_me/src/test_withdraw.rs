extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use mock_price_feed::MockPriceFeed;

use crate::events::Withdrawn;
use crate::invariants;
use crate::{Error, FundMe, FundMeClient};

const FEED_DECIMALS: u32 = 8;
const FEED_ANSWER: i128 = 200_000_000_000;

/// One whole unit of the asset, comfortably above the $50 minimum.
const SEND_VALUE: i128 = 10_000_000;

fn setup<'a>() -> (
    Env,
    FundMeClient<'a>,
    Address,
    token::Client<'a>,
    token::StellarAssetClient<'a>,
) {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let asset_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(asset_admin);
    let asset = token::Client::new(&env, &sac.address());
    let asset_admin_client = token::StellarAssetClient::new(&env, &sac.address());

    let feed_id = env.register(MockPriceFeed, (FEED_DECIMALS, FEED_ANSWER));
    let contract_id = env.register(FundMe, (owner.clone(), feed_id, sac.address()));
    let client = FundMeClient::new(&env, &contract_id);

    (env, client, owner, asset, asset_admin_client)
}

fn fund_from_new_address(
    env: &Env,
    client: &FundMeClient,
    asset_admin: &token::StellarAssetClient,
    amount: i128,
) -> Address {
    let funder = Address::generate(env);
    asset_admin.mint(&funder, &amount);
    client.fund(&funder, &amount);
    funder
}

#[test]
fn owner_withdraws_a_single_contribution() {
    let (env, client, owner, asset, asset_admin) = setup();
    let funder = fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);

    let starting_contract_balance = asset.balance(&client.address);
    let starting_owner_balance = asset.balance(&owner);
    assert_eq!(starting_contract_balance, SEND_VALUE);

    client.withdraw(&owner);

    assert_eq!(asset.balance(&client.address), 0);
    assert_eq!(
        asset.balance(&owner),
        starting_owner_balance + starting_contract_balance
    );
    invariants::assert_amounts_cleared(&client, &[&funder]);
    invariants::assert_funder_list_empty(&client);
}

#[test]
fn withdraw_resets_the_ledger_for_five_funders() {
    let (env, client, owner, asset, asset_admin) = setup();

    let funders: std::vec::Vec<Address> = (0..5)
        .map(|_| fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE))
        .collect();

    let starting_owner_balance = asset.balance(&owner);
    assert_eq!(asset.balance(&client.address), 5 * SEND_VALUE);

    client.withdraw(&owner);

    assert_eq!(asset.balance(&client.address), 0);
    assert_eq!(
        asset.balance(&owner),
        starting_owner_balance + 5 * SEND_VALUE
    );
    for funder in &funders {
        assert_eq!(client.get_address_to_amount_funded(funder), 0);
    }
    invariants::assert_funder_list_empty(&client);
}

#[test]
fn only_the_owner_can_withdraw() {
    let (env, client, _owner, asset, asset_admin) = setup();
    let funder = fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);

    let attacker = Address::generate(&env);
    let result = client.try_withdraw(&attacker);
    assert_eq!(result, Err(Ok(Error::NotOwner)));

    // Rejection leaves the ledger and balance exactly as they were.
    assert_eq!(client.get_address_to_amount_funded(&funder), SEND_VALUE);
    assert_eq!(client.get_funder(&0), funder);
    assert_eq!(asset.balance(&client.address), SEND_VALUE);
}

#[test]
fn a_funder_is_not_the_owner() {
    let (env, client, _owner, _asset, asset_admin) = setup();
    let funder = fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);

    assert_eq!(client.try_withdraw(&funder), Err(Ok(Error::NotOwner)));
}

#[test]
fn withdraw_with_no_contributions_is_a_no_op() {
    let (_env, client, owner, asset, _asset_admin) = setup();

    client.withdraw(&owner);

    assert_eq!(asset.balance(&client.address), 0);
    assert_eq!(asset.balance(&owner), 0);
    invariants::assert_funder_list_empty(&client);
}

#[test]
fn withdraw_emits_withdrawn_event() {
    let (env, client, owner, _asset, asset_admin) = setup();
    fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);

    client.withdraw(&owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("withdrawn").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Withdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            owner,
            amount: SEND_VALUE,
        }
    );
}

#[test]
fn funding_resumes_on_a_clean_ledger_after_withdrawal() {
    let (env, client, owner, asset, asset_admin) = setup();
    let first = fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);

    client.withdraw(&owner);

    let second = fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);

    // The list restarts at index 0 and the first funder's entry stays gone.
    assert_eq!(client.get_funder(&0), second);
    assert!(client.try_get_funder(&1).is_err());
    assert_eq!(client.get_address_to_amount_funded(&first), 0);
    assert_eq!(client.get_address_to_amount_funded(&second), SEND_VALUE);
    invariants::assert_ledger_matches_balance(&asset, &client, &[&first, &second]);
}

#[test]
fn repeat_withdrawals_each_drain_the_current_balance() {
    let (env, client, owner, asset, asset_admin) = setup();

    fund_from_new_address(&env, &client, &asset_admin, SEND_VALUE);
    client.withdraw(&owner);
    assert_eq!(asset.balance(&client.address), 0);

    fund_from_new_address(&env, &client, &asset_admin, 3 * SEND_VALUE);
    client.withdraw(&owner);

    assert_eq!(asset.balance(&client.address), 0);
    assert_eq!(asset.balance(&owner), 4 * SEND_VALUE);
    invariants::assert_funder_list_empty(&client);
}
