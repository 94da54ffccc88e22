use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::{FUND_ME_SEED, FUNDER_SEED, VAULT_SEED};
use crate::oracle::ensure_contribution_value;
use crate::state::{FundMe, FundMeError, Funded, FunderAccount, PriceFeed};

#[derive(Accounts)]
pub struct Fund <'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [FUND_ME_SEED, fund_me.owner.as_ref(), fund_me.price_feed.as_ref()],
        bump = fund_me.bump
    )]
    pub fund_me: Account<'info, FundMe>,

    #[account(
        address = fund_me.price_feed @ FundMeError::PriceFeedMismatch
    )]
    pub price_feed: Account<'info, PriceFeed>,

    #[account(
        mut,
        seeds = [VAULT_SEED, fund_me.key().as_ref()],
        bump = fund_me.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    #[account(
        init_if_needed,
        payer = funder,
        space = FunderAccount::INIT_SPACE,
        seeds = [FUNDER_SEED, fund_me.key().as_ref(), funder.key().as_ref()],
        bump
    )]
    pub funder_account: Account<'info, FunderAccount>,

    pub system_program: Program<'info, System>,
}

impl <'info> Fund <'info> {
    pub fn fund(&mut self, amount: u64, bumps: &FundBumps) -> Result<()> {
        self.fund_me.ensure_price_feed(&self.price_feed)?;

        let now = Clock::get()?.unix_timestamp;
        let reference_value = ensure_contribution_value(&self.price_feed, amount, now)?;

        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.funder.to_account_info(),
                to: self.vault.to_account_info(),
            },
        );
        transfer(cpi_ctx, amount)?;

        self.funder_account.fund_me = self.fund_me.key();
        self.funder_account.funder = self.funder.key();
        self.funder_account.bump = bumps.funder_account;

        let balance = self.fund_me.record_contribution(
            &mut self.funder_account,
            self.funder.key(),
            amount,
        )?;

        emit!(Funded {
            fund_me: self.fund_me.key(),
            funder: self.funder.key(),
            amount,
            reference_value,
            balance,
            timestamp: now,
        });
        Ok(())
    }
}
