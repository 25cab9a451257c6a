use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{require_balance, transfer_from_user_to_pool_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts required for locking stake tokens in the farm.
///
/// Flow summary:
/// 1) Validate the amount and the user's stake token balance.
/// 2) Settle the user's pending reward with the stake held before this deposit.
/// 3) Record the new stake on the user and on the pool.
/// 4) Transfer stake tokens from the user into the stake vault.
/// 5) Emit `Deposited`.
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// User locking stake tokens (payer for lazy account creation).
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Global configuration; deposits must be enabled.
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// Pool aggregate (totals and accumulator).
    #[account(
        mut,
        address = global_config.farm_state,
    )]
    pub farm_state: Box<Account<'info, FarmState>>,

    /// Per-user staking record (created lazily).
    #[account(
        init_if_needed,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = UserStakeInfo::LEN
    )]
    pub user_stake_info: Box<Account<'info, UserStakeInfo>>,

    /// Stake token mint.
    #[account(address = global_config.stake_mint @ ErrorCode::InvalidMint)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// User's stake token account (source of the deposit).
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_stake_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program vault custodying all stake.
    #[account(
        mut,
        address = global_config.stake_vault,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// SPL Token / Token-2022 interface program.
    pub token_program: Interface<'info, TokenInterface>,

    /// System Program (for user record creation).
    pub system_program: Program<'info, System>,
}

/// Locks `amount` stake tokens for the caller.
///
/// # Fails
/// - `InvalidAmount` if `amount` is zero.
/// - `DepositsDisabled` if the admin paused deposits.
/// - `TransferFailed` if the caller's stake token balance is below `amount`.
pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require_gt!(amount, 0, ErrorCode::InvalidAmount);
    ctx.accounts.global_config.ensure_deposits_enabled()?;
    require_balance(ctx.accounts.owner_stake_token.amount, amount)?;

    let user_stake_info = &mut ctx.accounts.user_stake_info;
    let farm_state = &mut ctx.accounts.farm_state;

    // --- Lazy init of the user record ---
    if user_stake_info.owner == Pubkey::default() {
        user_stake_info.owner = ctx.accounts.owner.key();
        user_stake_info.bump = ctx.bumps.user_stake_info;
    }

    // --- Settle with the old stake, then record the new one ---
    let reward_settled = user_stake_info.deposit(farm_state, amount)?;

    // --- Pull stake tokens into custody (after all state writes) ---
    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_stake_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.stake_mint.decimals,
    )?;

    emit!(Deposited {
        user: ctx.accounts.owner.key(),
        amount,
        staked_amount: user_stake_info.staked_amount,
        reward_settled,
        total_staked: farm_state.total_staked,
    });

    Ok(())
}
