use anchor_lang::prelude::*;

use crate::state::{FundMeError, PriceFeed, PriceUpdated};

/// Stand up a feed that a single authority posts answers to
#[derive(Accounts)]
pub struct InitializePriceFeed<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = PriceFeed::INIT_SPACE,
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub system_program: Program<'info, System>,
}

/// Post a new answer
#[derive(Accounts)]
pub struct UpdatePriceFeed<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        has_one = authority @ FundMeError::Unauthorized,
    )]
    pub price_feed: Account<'info, PriceFeed>,
}

impl<'info> InitializePriceFeed<'info> {
    pub fn initialize_price_feed(&mut self, decimals: u8, initial_answer: i64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.price_feed.set_inner(PriceFeed::new(
            self.authority.key(),
            decimals,
            initial_answer,
            now,
        )?);

        msg!("Price feed initialized with {} decimals", decimals);

        emit!(PriceUpdated {
            price_feed: self.price_feed.key(),
            round_id: self.price_feed.round_id,
            answer: initial_answer,
            timestamp: now,
        });
        Ok(())
    }
}

impl<'info> UpdatePriceFeed<'info> {
    pub fn update_price_feed(&mut self, answer: i64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.price_feed.record_answer(answer, now)?;

        emit!(PriceUpdated {
            price_feed: self.price_feed.key(),
            round_id: self.price_feed.round_id,
            answer,
            timestamp: now,
        });
        Ok(())
    }
}
