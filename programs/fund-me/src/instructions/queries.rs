use anchor_lang::prelude::*;

use crate::constants::FUNDER_SEED;
use crate::oracle::{reference_value, PriceOracle};
use crate::state::{FundMe, FunderAccount, PriceFeed};

#[derive(Accounts)]
pub struct ReadFundMe<'info> {
    pub fund_me: Account<'info, FundMe>,
}

#[derive(Accounts)]
pub struct ReadFunderBalance<'info> {
    pub fund_me: Account<'info, FundMe>,

    /// CHECK: only used to derive the funder record address
    pub funder: UncheckedAccount<'info>,

    /// Absent for identities that never funded
    #[account(
        seeds = [FUNDER_SEED, fund_me.key().as_ref(), funder.key().as_ref()],
        bump
    )]
    pub funder_account: Option<Account<'info, FunderAccount>>,
}

#[derive(Accounts)]
pub struct ReadPriceFeed<'info> {
    pub price_feed: Account<'info, PriceFeed>,
}

impl<'info> ReadFundMe<'info> {
    pub fn owner(&self) -> Pubkey {
        self.fund_me.owner
    }

    pub fn price_feed(&self) -> Pubkey {
        self.fund_me.price_feed
    }

    pub fn funder(&self, index: u64) -> Result<Pubkey> {
        self.fund_me.funder(index)
    }

    pub fn funder_count(&self) -> u64 {
        self.fund_me.funder_count()
    }
}

impl<'info> ReadFunderBalance<'info> {
    pub fn balance(&self) -> u64 {
        let record = self.funder_account.as_ref().map(|account| &**account);
        self.fund_me.balance_of(record)
    }
}

impl<'info> ReadPriceFeed<'info> {
    pub fn version(&self) -> u8 {
        self.price_feed.version
    }

    pub fn conversion_rate(&self, lamports: u64) -> Result<u128> {
        let rate = self.price_feed.latest_rate(Clock::get()?.unix_timestamp)?;
        Ok(reference_value(lamports, rate))
    }
}
