pub const FUND_ME_SEED: &[u8] = b"fund_me";
pub const VAULT_SEED: &[u8] = b"vault";
pub const FUNDER_SEED: &[u8] = b"funder";

/// Decimals of every rate handed out by a `PriceOracle`.
pub const RATE_DECIMALS: u8 = 8;
/// 50 USD at `RATE_DECIMALS`.
pub const MINIMUM_REFERENCE_VALUE: u128 = 50 * 10u128.pow(RATE_DECIMALS as u32);

pub const MAX_FUNDERS: usize = 100;
pub const MAX_PRICE_AGE: i64 = 3600; // 1 hour
pub const MAX_FEED_DECIMALS: u8 = 18;
pub const PRICE_FEED_VERSION: u8 = 0;
