use anchor_lang::prelude::*;

use crate::constants::{MAX_FEED_DECIMALS, MAX_PRICE_AGE, PRICE_FEED_VERSION};
use crate::oracle::normalize_rate;
use crate::state::FundMeError;

/// USD price of one SOL, posted by a single authority.
#[account]
#[derive(Debug)]
pub struct PriceFeed {
    pub authority: Pubkey,
    pub decimals: u8,
    pub version: u8,
    pub round_id: u64,
    pub answer: i64,
    pub started_at: i64,
    pub updated_at: i64,
}

impl Space for PriceFeed {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // authority: Pubkey
        + 1     // decimals: u8
        + 1     // version: u8
        + 8     // round_id: u64
        + 8     // answer: i64
        + 8     // started_at: i64
        + 8;    // updated_at: i64
}

impl PriceFeed {
    pub fn new(authority: Pubkey, decimals: u8, initial_answer: i64, now: i64) -> Result<Self> {
        require!(decimals <= MAX_FEED_DECIMALS, FundMeError::InvalidDecimals);

        let mut feed = Self {
            authority,
            decimals,
            version: PRICE_FEED_VERSION,
            round_id: 0,
            answer: 0,
            started_at: 0,
            updated_at: 0,
        };
        feed.record_answer(initial_answer, now)?;
        Ok(feed)
    }

    pub fn record_answer(&mut self, answer: i64, now: i64) -> Result<()> {
        self.round_id = self.round_id.checked_add(1).ok_or(FundMeError::MathOverflow)?;
        self.answer = answer;
        self.started_at = now;
        self.updated_at = now;
        Ok(())
    }

    /// Latest answer at `RATE_DECIMALS`, provided it is positive and no
    /// older than `MAX_PRICE_AGE`.
    pub fn rate_at(&self, now: i64) -> Result<u64> {
        if self.round_id == 0 || now.saturating_sub(self.updated_at) > MAX_PRICE_AGE {
            msg!("Price feed stale: round {} updated at {}", self.round_id, self.updated_at);
            return err!(FundMeError::OracleUnavailable);
        }
        normalize_rate(self.answer, self.decimals)
    }
}

#[event]
pub struct PriceUpdated {
    pub price_feed: Pubkey,
    pub round_id: u64,
    pub answer: i64,
    pub timestamp: i64,
}
