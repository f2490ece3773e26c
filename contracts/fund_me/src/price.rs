//! Conversion between asset amounts and their USD value.
//!
//! The feed quotes the asset's USD price as an integer scaled by
//! `10^feed_decimals`; amounts are in the asset's own precision
//! ([`ASSET_DECIMALS`]). `usd_value` therefore lands back on the asset's
//! decimal scale, so the threshold comparison scales [`MINIMUM_USD`] the
//! same way.

/// Minimum contribution value in whole USD.
pub const MINIMUM_USD: i128 = 50;

/// Decimal precision of the funding asset (stroops).
pub const ASSET_DECIMALS: u32 = 7;

/// USD value of `amount`, scaled by `10^ASSET_DECIMALS`.
pub fn usd_value(amount: i128, price: i128, feed_decimals: u32) -> i128 {
    amount * price / 10i128.pow(feed_decimals)
}

/// Whether `amount` is worth at least [`MINIMUM_USD`] at the quoted price.
pub fn meets_minimum(amount: i128, price: i128, feed_decimals: u32) -> bool {
    usd_value(amount, price, feed_decimals) >= MINIMUM_USD * 10i128.pow(ASSET_DECIMALS)
}
