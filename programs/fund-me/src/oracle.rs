//! Price conversion between lamports and USD.
//!
//! Rates are USD per SOL at `RATE_DECIMALS`, so a reference value is USD at
//! the same scale and compares directly against `MINIMUM_REFERENCE_VALUE`.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

use crate::constants::{MINIMUM_REFERENCE_VALUE, RATE_DECIMALS};
use crate::state::{FundMeError, PriceFeed};

pub trait PriceOracle {
    fn identity(&self) -> Pubkey;
    fn latest_rate(&self, now: i64) -> Result<u64>;
}

impl<'info> PriceOracle for Account<'info, PriceFeed> {
    fn identity(&self) -> Pubkey {
        self.key()
    }

    fn latest_rate(&self, now: i64) -> Result<u64> {
        self.rate_at(now)
    }
}

/// Rescales a raw feed answer with `decimals` places to `RATE_DECIMALS`.
pub fn normalize_rate(answer: i64, decimals: u8) -> Result<u64> {
    require!(answer > 0, FundMeError::OracleUnavailable);

    let answer = answer as u128;
    let scaled = if decimals >= RATE_DECIMALS {
        let divisor = 10u128
            .checked_pow((decimals - RATE_DECIMALS) as u32)
            .ok_or(FundMeError::OracleUnavailable)?;
        answer / divisor
    } else {
        let factor = 10u128
            .checked_pow((RATE_DECIMALS - decimals) as u32)
            .ok_or(FundMeError::OracleUnavailable)?;
        answer.checked_mul(factor).ok_or(FundMeError::OracleUnavailable)?
    };
    require!(scaled > 0, FundMeError::OracleUnavailable);

    u64::try_from(scaled).map_err(|_| error!(FundMeError::OracleUnavailable))
}

pub fn reference_value(lamports: u64, rate: u64) -> u128 {
    (lamports as u128) * (rate as u128) / LAMPORTS_PER_SOL as u128
}

/// Converts `lamports` at the oracle's current rate and rejects anything
/// worth less than `MINIMUM_REFERENCE_VALUE`.
pub fn ensure_contribution_value<O: PriceOracle>(oracle: &O, lamports: u64, now: i64) -> Result<u128> {
    let rate = oracle.latest_rate(now)?;
    let value = reference_value(lamports, rate);
    if value < MINIMUM_REFERENCE_VALUE {
        msg!("Contribution worth {} below minimum {}", value, MINIMUM_REFERENCE_VALUE);
        return err!(FundMeError::InsufficientValue);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::constants::{MAX_FEED_DECIMALS, MAX_PRICE_AGE, PRICE_FEED_VERSION};
    use crate::state::{FundMe, FunderAccount};
    use std::collections::HashMap;

    const NOW: i64 = 1_700_000_000;

    struct FixedOracle {
        id: Pubkey,
        feed: PriceFeed,
    }

    impl FixedOracle {
        fn new(answer: i64, decimals: u8) -> Self {
            let feed = PriceFeed::new(Pubkey::new_unique(), decimals, answer, NOW).unwrap();
            Self { id: Pubkey::new_unique(), feed }
        }
    }

    impl PriceOracle for FixedOracle {
        fn identity(&self) -> Pubkey {
            self.id
        }

        fn latest_rate(&self, now: i64) -> Result<u64> {
            self.feed.rate_at(now)
        }
    }

    /// Mirrors the `fund` / `withdraw` handlers without the lamport CPIs.
    struct Pool {
        fund_me: FundMe,
        records: HashMap<Pubkey, FunderAccount>,
        oracle: FixedOracle,
        vault: u64,
    }

    impl Pool {
        fn new(owner: Pubkey, oracle: FixedOracle) -> Self {
            let fund_me = FundMe {
                owner,
                price_feed: oracle.identity(),
                round: 0,
                total_funded: 0,
                funders: Vec::new(),
                bump: 255,
                vault_bump: 255,
            };
            Self { fund_me, records: HashMap::new(), oracle, vault: 0 }
        }

        fn fund(&mut self, funder: Pubkey, lamports: u64) -> Result<u64> {
            self.fund_me.ensure_price_feed(&self.oracle)?;
            ensure_contribution_value(&self.oracle, lamports, NOW)?;
            let record = self.records.entry(funder).or_insert(FunderAccount {
                fund_me: Pubkey::default(),
                funder,
                amount: 0,
                round: 0,
                bump: 255,
            });
            let balance = self.fund_me.record_contribution(record, funder, lamports)?;
            self.vault += lamports;
            Ok(balance)
        }

        fn withdraw(&mut self, caller: Pubkey) -> Result<u64> {
            let pooled = self.fund_me.settle(&caller)?;
            let paid = FundMe::payout(pooled, self.vault)?;
            self.vault -= paid;
            Ok(paid)
        }

        fn balance(&self, funder: &Pubkey) -> u64 {
            self.fund_me.balance_of(self.records.get(funder))
        }
    }

    /// Thousandths of a SOL in lamports.
    fn sol(millis: u64) -> u64 {
        millis * LAMPORTS_PER_SOL / 1000
    }

    #[test]
    fn normalizes_feed_decimals() {
        assert_eq!(normalize_rate(2000, 0).unwrap(), 2000_0000_0000);
        assert_eq!(normalize_rate(2000_0000_0000, 8).unwrap(), 2000_0000_0000);
        assert_eq!(normalize_rate(2000 * 10i64.pow(15), 15).unwrap(), 2000_0000_0000);
    }

    #[test]
    fn rejects_unusable_answers() {
        for (answer, decimals) in [(0, 8), (-1, 8), (1, 18), (i64::MAX, 0), (i64::MAX, 47), (1, u8::MAX)] {
            assert_eq!(
                normalize_rate(answer, decimals).unwrap_err(),
                Error::from(FundMeError::OracleUnavailable)
            );
        }
    }

    #[test]
    fn stale_or_unset_feed_is_unavailable() {
        let oracle = FixedOracle::new(2000_0000_0000, 8);
        assert!(oracle.latest_rate(NOW + MAX_PRICE_AGE).is_ok());
        assert_eq!(
            oracle.latest_rate(NOW + MAX_PRICE_AGE + 1).unwrap_err(),
            Error::from(FundMeError::OracleUnavailable)
        );

        let mut unset = FixedOracle::new(2000_0000_0000, 8);
        unset.feed.round_id = 0;
        assert_eq!(unset.latest_rate(NOW).unwrap_err(), Error::from(FundMeError::OracleUnavailable));
    }

    #[test]
    fn reference_value_does_not_overflow() {
        let value = reference_value(u64::MAX, u64::MAX);
        assert_eq!(value, (u64::MAX as u128) * (u64::MAX as u128) / LAMPORTS_PER_SOL as u128);
    }

    #[test]
    fn minimum_is_inclusive() {
        let oracle = FixedOracle::new(2000, 0);
        assert_eq!(ensure_contribution_value(&oracle, sol(25), NOW).unwrap(), MINIMUM_REFERENCE_VALUE);
        assert_eq!(
            ensure_contribution_value(&oracle, sol(25) - 1, NOW).unwrap_err(),
            Error::from(FundMeError::InsufficientValue)
        );
    }

    #[test]
    fn below_minimum_leaves_pool_untouched() {
        let mut pool = Pool::new(Pubkey::new_unique(), FixedOracle::new(2000_0000_0000, 8));
        let funder = Pubkey::new_unique();
        pool.fund(funder, sol(100)).unwrap();

        for lamports in [0, 1, sol(1), sol(24)] {
            let err = pool.fund(funder, lamports).unwrap_err();
            assert_eq!(err, Error::from(FundMeError::InsufficientValue));
            let stranger = Pubkey::new_unique();
            assert_eq!(pool.fund(stranger, lamports).unwrap_err(), Error::from(FundMeError::InsufficientValue));
            assert!(!pool.records.contains_key(&stranger));
        }

        assert_eq!(pool.balance(&funder), sol(100));
        assert_eq!(pool.fund_me.funders, vec![funder]);
        assert_eq!(pool.fund_me.total_funded, sol(100));
    }

    #[test]
    fn unavailable_oracle_aborts_fund() {
        let mut oracle = FixedOracle::new(2000_0000_0000, 8);
        oracle.feed.answer = -5;
        let mut pool = Pool::new(Pubkey::new_unique(), oracle);
        let funder = Pubkey::new_unique();

        assert_eq!(pool.fund(funder, sol(100)).unwrap_err(), Error::from(FundMeError::OracleUnavailable));
        assert_eq!(pool.fund_me.funder_count(), 0);
        assert_eq!(pool.balance(&funder), 0);
    }

    #[test]
    fn two_thousand_dollar_scenario() {
        let owner = Pubkey::new_unique();
        let caller = Pubkey::new_unique();
        let mut pool = Pool::new(owner, FixedOracle::new(2000, 0));

        assert_eq!(pool.fund(caller, sol(10)).unwrap_err(), Error::from(FundMeError::InsufficientValue));
        assert_eq!(pool.fund_me.funder_count(), 0);

        pool.fund(caller, sol(100)).unwrap();
        assert_eq!(pool.balance(&caller), sol(100));

        pool.fund(caller, sol(100)).unwrap();
        assert_eq!(pool.balance(&caller), sol(200));
        assert_eq!(pool.fund_me.funder_count(), 1);

        let stranger = Pubkey::new_unique();
        assert_eq!(pool.withdraw(stranger).unwrap_err(), Error::from(FundMeError::NotOwner));
        assert_eq!(pool.balance(&caller), sol(200));
        assert_eq!(pool.fund_me.funder(0).unwrap(), caller);

        assert_eq!(pool.withdraw(owner).unwrap(), sol(200));
        assert_eq!(pool.balance(&caller), 0);
        assert_eq!(pool.fund_me.funder_count(), 0);
    }

    #[test]
    fn many_funders_round_trip() {
        let owner = Pubkey::new_unique();
        let mut pool = Pool::new(owner, FixedOracle::new(2000_0000_0000, 8));
        let funders: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();

        for funder in &funders {
            pool.fund(*funder, LAMPORTS_PER_SOL).unwrap();
            assert_eq!(pool.balance(funder), LAMPORTS_PER_SOL);
        }
        assert_eq!(pool.fund_me.funders, funders);

        assert_eq!(pool.withdraw(owner).unwrap(), 5 * LAMPORTS_PER_SOL);
        for funder in &funders {
            assert_eq!(pool.balance(funder), 0);
        }
        assert_eq!(pool.fund_me.funder(0).unwrap_err(), Error::from(FundMeError::IndexOutOfRange));
    }

    #[test]
    fn feed_decimals_are_capped() {
        let feed = PriceFeed::new(Pubkey::new_unique(), MAX_FEED_DECIMALS, 2000 * 10i64.pow(15), NOW).unwrap();
        assert_eq!(feed.version, PRICE_FEED_VERSION);
        assert_eq!(feed.round_id, 1);

        for decimals in [MAX_FEED_DECIMALS + 1, u8::MAX] {
            assert_eq!(
                PriceFeed::new(Pubkey::new_unique(), decimals, 2000, NOW).unwrap_err(),
                Error::from(FundMeError::InvalidDecimals)
            );
        }
    }

    #[test]
    fn foreign_feed_is_rejected() {
        let owner = Pubkey::new_unique();
        let mut pool = Pool::new(owner, FixedOracle::new(2000_0000_0000, 8));
        pool.oracle = FixedOracle::new(1_000_000_0000_0000, 8);
        let funder = Pubkey::new_unique();

        assert_eq!(pool.fund(funder, sol(100)).unwrap_err(), Error::from(FundMeError::PriceFeedMismatch));
        assert_eq!(pool.balance(&funder), 0);
        assert_eq!(pool.fund_me.funder_count(), 0);
        assert_eq!(pool.vault, 0);
    }

    #[test]
    fn withdraw_pays_out_whole_vault() {
        let owner = Pubkey::new_unique();
        let mut pool = Pool::new(owner, FixedOracle::new(2000_0000_0000, 8));
        pool.fund(Pubkey::new_unique(), sol(100)).unwrap();
        // lamports sent straight to the vault
        pool.vault += 1_234;

        assert_eq!(pool.withdraw(owner).unwrap(), sol(100) + 1_234);
        assert_eq!(pool.vault, 0);
        assert_eq!(pool.withdraw(owner).unwrap(), 0);
    }

    #[test]
    fn short_vault_fails_withdraw() {
        let owner = Pubkey::new_unique();
        let mut pool = Pool::new(owner, FixedOracle::new(2000_0000_0000, 8));
        pool.fund(Pubkey::new_unique(), sol(100)).unwrap();
        pool.vault -= 1;

        assert_eq!(pool.withdraw(owner).unwrap_err(), Error::from(FundMeError::TransferFailed));
        assert_eq!(pool.vault, sol(100) - 1);
    }
}
