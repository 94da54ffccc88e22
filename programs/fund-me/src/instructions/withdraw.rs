use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::{FUND_ME_SEED, VAULT_SEED};
use crate::state::{FundMe, FundMeError, Withdrawn};

#[derive(Accounts)]
pub struct Withdraw <'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = fund_me.is_owner(&owner.key()) @ FundMeError::NotOwner,
        seeds = [FUND_ME_SEED, fund_me.owner.as_ref(), fund_me.price_feed.as_ref()],
        bump = fund_me.bump
    )]
    pub fund_me: Account<'info, FundMe>,

    #[account(
        mut,
        seeds = [VAULT_SEED, fund_me.key().as_ref()],
        bump = fund_me.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl <'info> Withdraw <'info> {
    pub fn withdraw(&mut self) -> Result<()> {
        // The ledger is emptied before any lamports move; a failed transfer
        // reverts the whole transaction, clearing included.
        let pooled = self.fund_me.settle(&self.owner.key())?;

        let held = FundMe::payout(pooled, self.vault.to_account_info().lamports())?;

        if held > 0 {
            let fund_me_key = self.fund_me.key();
            let vault_seeds = &[
                VAULT_SEED,
                fund_me_key.as_ref(),
                &[self.fund_me.vault_bump],
            ];
            let signer = &[&vault_seeds[..]];

            let cpi_ctx = CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.vault.to_account_info(),
                    to: self.owner.to_account_info(),
                },
                signer,
            );
            transfer(cpi_ctx, held).map_err(|_| error!(FundMeError::TransferFailed))?;
        }

        msg!("Withdrew {} lamports, round {} opened", held, self.fund_me.round);

        emit!(Withdrawn {
            fund_me: self.fund_me.key(),
            owner: self.owner.key(),
            amount: held,
            round: self.fund_me.round,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
