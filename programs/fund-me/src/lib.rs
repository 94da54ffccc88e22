#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod oracle;
pub mod state;

pub use instructions::*;
pub use state::*;

declare_id!("ATiF1giG6ZVFHE8frXqmeqroDJnATdf1orwtu2yX1mp");

#[program]
pub mod fund_me {
    use super::*;

    pub fn initialize_price_feed(ctx: Context<InitializePriceFeed>, decimals: u8, initial_answer: i64) -> Result<()> {
        ctx.accounts.initialize_price_feed(decimals, initial_answer)
    }

    pub fn update_price_feed(ctx: Context<UpdatePriceFeed>, answer: i64) -> Result<()> {
        ctx.accounts.update_price_feed(answer)
    }

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        ctx.accounts.initialize(&ctx.bumps)?;
        Ok(())
    }

    pub fn fund(ctx: Context<Fund>, amount: u64) -> Result<()> {
        ctx.accounts.fund(amount, &ctx.bumps)?;
        Ok(())
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        ctx.accounts.withdraw()?;
        Ok(())
    }

    pub fn get_owner(ctx: Context<ReadFundMe>) -> Result<Pubkey> {
        Ok(ctx.accounts.owner())
    }

    pub fn get_price_feed(ctx: Context<ReadFundMe>) -> Result<Pubkey> {
        Ok(ctx.accounts.price_feed())
    }

    pub fn get_address_to_amount_funded(ctx: Context<ReadFunderBalance>) -> Result<u64> {
        Ok(ctx.accounts.balance())
    }

    pub fn get_funder(ctx: Context<ReadFundMe>, index: u64) -> Result<Pubkey> {
        ctx.accounts.funder(index)
    }

    pub fn get_funder_count(ctx: Context<ReadFundMe>) -> Result<u64> {
        Ok(ctx.accounts.funder_count())
    }

    pub fn get_version(ctx: Context<ReadPriceFeed>) -> Result<u8> {
        Ok(ctx.accounts.version())
    }

    pub fn get_conversion_rate(ctx: Context<ReadPriceFeed>, lamports: u64) -> Result<u128> {
        ctx.accounts.conversion_rate(lamports)
    }
}
