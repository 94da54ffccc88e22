use anchor_lang::prelude::*;

#[account]
pub struct FunderAccount {
    pub fund_me: Pubkey, // Parent ledger
    pub funder: Pubkey,  // Contributor's wallet
    pub amount: u64,     // Total contributed this round
    pub round: u64,      // Ledger round `amount` belongs to
    pub bump: u8,        // PDA bump
}

impl Space for FunderAccount {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // fund_me: Pubkey
        + 32    // funder: Pubkey
        + 8     // amount: u64
        + 8     // round: u64
        + 1;    // bump: u8
}

impl FunderAccount {
    pub fn is_live(&self, round: u64) -> bool {
        self.round == round && self.amount > 0
    }
}
