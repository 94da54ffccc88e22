use anchor_lang::prelude::*;

use crate::constants::MAX_FUNDERS;
use crate::oracle::PriceOracle;
use crate::state::FunderAccount;

#[account]
pub struct FundMe {
    pub owner: Pubkey,
    pub price_feed: Pubkey,
    pub round: u64,          // Bumped on every withdrawal
    pub total_funded: u64,   // Sum of live funder balances
    pub funders: Vec<Pubkey>,
    pub bump: u8,
    pub vault_bump: u8,
}

impl Space for FundMe {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // owner: Pubkey
        + 32    // price_feed: Pubkey
        + 8     // round: u64
        + 8     // total_funded: u64
        + 4 + 32 * MAX_FUNDERS // funders: Vec<Pubkey>
        + 1     // bump: u8
        + 1;    // vault_bump: u8
}

impl FundMe {
    pub fn is_owner(&self, caller: &Pubkey) -> bool {
        self.owner == *caller
    }

    /// Adds `amount` to the funder's balance for the current round,
    /// appending the funder to `funders` on its first live contribution.
    /// Returns the funder's new balance.
    pub fn record_contribution(
        &mut self,
        record: &mut FunderAccount,
        funder: Pubkey,
        amount: u64,
    ) -> Result<u64> {
        require!(amount > 0, FundMeError::InsufficientValue);

        let is_new = !record.is_live(self.round);
        let previous = if is_new { 0 } else { record.amount };
        let balance = previous.checked_add(amount).ok_or(FundMeError::MathOverflow)?;
        let total = self.total_funded.checked_add(amount).ok_or(FundMeError::MathOverflow)?;

        if is_new {
            require!(self.funders.len() < MAX_FUNDERS, FundMeError::FunderListFull);
            self.funders.push(funder);
            record.round = self.round;
        }
        record.amount = balance;
        self.total_funded = total;
        Ok(balance)
    }

    /// Empties the pool and returns the amount that was recorded in it.
    /// Every funder record from the closed round reads as zero afterwards.
    pub fn settle(&mut self, caller: &Pubkey) -> Result<u64> {
        require_keys_eq!(*caller, self.owner, FundMeError::NotOwner);

        let next_round = self.round.checked_add(1).ok_or(FundMeError::MathOverflow)?;
        let pooled = self.total_funded;

        self.funders.clear();
        self.total_funded = 0;
        self.round = next_round;
        Ok(pooled)
    }

    /// Lamports to send the owner out of a vault holding `held`. The vault
    /// must cover the `pooled` amount recorded before the clear.
    pub fn payout(pooled: u64, held: u64) -> Result<u64> {
        require!(held >= pooled, FundMeError::TransferFailed);
        Ok(held)
    }

    pub fn ensure_price_feed<O: PriceOracle>(&self, oracle: &O) -> Result<()> {
        require_keys_eq!(oracle.identity(), self.price_feed, FundMeError::PriceFeedMismatch);
        Ok(())
    }

    pub fn balance_of(&self, record: Option<&FunderAccount>) -> u64 {
        match record {
            Some(record) if record.is_live(self.round) => record.amount,
            _ => 0,
        }
    }

    pub fn funder(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.funders.get(i).copied())
            .ok_or_else(|| error!(FundMeError::IndexOutOfRange))
    }

    pub fn funder_count(&self) -> u64 {
        self.funders.len() as u64
    }
}

#[event]
pub struct FundMeInitialized {
    pub fund_me: Pubkey,
    pub owner: Pubkey,
    pub price_feed: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct Funded {
    pub fund_me: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub reference_value: u128,
    pub balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub fund_me: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub round: u64,
    pub timestamp: i64,
}

#[error_code]
pub enum FundMeError {
    #[msg("Price feed could not produce a rate")]
    OracleUnavailable,

    #[msg("You need to spend more SOL!")]
    InsufficientValue,

    #[msg("Only the owner can withdraw")]
    NotOwner,

    #[msg("Transfer to owner failed")]
    TransferFailed,

    #[msg("Funder index out of range")]
    IndexOutOfRange,

    #[msg("Funder list is full")]
    FunderListFull,

    #[msg("Price feed does not match the configured feed")]
    PriceFeedMismatch,

    #[msg("Price feed decimals out of range")]
    InvalidDecimals,

    #[msg("Unauthorized action")]
    Unauthorized,

    #[msg("Math overflow error")]
    MathOverflow,
}
