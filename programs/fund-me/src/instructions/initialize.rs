use anchor_lang::prelude::*;

use crate::constants::{FUND_ME_SEED, VAULT_SEED};
use crate::oracle::PriceOracle;
use crate::state::{FundMe, FundMeInitialized, PriceFeed};

#[derive(Accounts)]
pub struct Initialize <'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub price_feed: Account<'info, PriceFeed>,

    #[account(
        init,
        payer = owner,
        space = FundMe::INIT_SPACE,
        seeds = [FUND_ME_SEED, owner.key().as_ref(), price_feed.key().as_ref()],
        bump
    )]
    pub fund_me: Account<'info, FundMe>,

    #[account(
        seeds = [VAULT_SEED, fund_me.key().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl <'info> Initialize <'info> {
    pub fn initialize(&mut self, bumps: &InitializeBumps) -> Result<()> {
        self.fund_me.set_inner(FundMe {
            owner: self.owner.key(),
            price_feed: self.price_feed.identity(),
            round: 0,
            total_funded: 0,
            funders: Vec::new(),
            bump: bumps.fund_me,
            vault_bump: bumps.vault,
        });

        emit!(FundMeInitialized {
            fund_me: self.fund_me.key(),
            owner: self.owner.key(),
            price_feed: self.price_feed.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
