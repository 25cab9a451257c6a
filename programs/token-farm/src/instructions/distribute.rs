use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{require_balance, transfer_from_user_to_pool_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts required to inject a reward amount into the pool.
///
/// Only the configured admin (or the program admin) may distribute. The
/// reward tokens are pulled from the distributor's own token account.
#[derive(Accounts)]
pub struct Distribute<'info> {
    /// Distributor; must be an authorized admin.
    #[account(
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::Unauthorized
    )]
    pub owner: Signer<'info>,

    /// Global farm configuration.
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// Pool aggregate; only the accumulator and totals change.
    #[account(
        mut,
        address = global_config.farm_state,
    )]
    pub farm_state: Box<Account<'info, FarmState>>,

    #[account(address = global_config.reward_mint @ ErrorCode::InvalidMint)]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Distributor's reward token account (source of the injection).
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_reward_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program vault custodying distributed rewards.
    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// SPL Token / Token-2022 interface program.
    pub token_program: Interface<'info, TokenInterface>,
}

/// Distributes `amount` reward tokens pro-rata over all current stakers.
///
/// No participant record is touched; every staker observes the new
/// accumulator on their next settlement.
///
/// # Fails
/// - `Unauthorized` for non-admin callers.
/// - `InvalidAmount` if `amount` is zero.
/// - `NoStakers` if nothing is staked. The amount is not held for later.
/// - `TransferFailed` if the distributor's balance is below `amount`.
pub fn distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
    require_gt!(amount, 0, ErrorCode::InvalidAmount);
    require_balance(ctx.accounts.owner_reward_token.amount, amount)?;

    let farm_state = &mut ctx.accounts.farm_state;
    let increment = farm_state.distribute(amount)?;
    let timestamp = Clock::get()?.unix_timestamp;
    farm_state.last_distribution_timestamp = timestamp;
    if increment == 0 {
        msg!("Distribution of {} is below one unit per share; kept as dust", amount);
    }

    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_reward_token.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.reward_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.reward_mint.decimals,
    )?;

    emit!(RewardsDistributed {
        distributor: ctx.accounts.owner.key(),
        amount,
        total_staked: farm_state.total_staked,
        acc_reward_per_share: farm_state.acc_reward_per_share,
        timestamp,
    });

    Ok(())
}
