use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::transfer_from_pool_vault_to_user;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Admin sweep of reward tokens that sit in the reward vault but were never
/// distributed (e.g. sent there by a plain token transfer).
///
/// Everything up to `total_rewards_distributed - total_rewards_paid` stays in
/// the vault, rounding dust included, so no staker entitlement is reachable.
#[derive(Accounts)]
pub struct RecoverExcessRewards<'info> {
    /// Farm admin or program admin; receives the surplus.
    #[account(
        mut,
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::Unauthorized
    )]
    pub owner: Signer<'info>,

    /// Global farm configuration.
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// Pool aggregate, read for the outstanding liability bound.
    #[account(address = global_config.farm_state)]
    pub farm_state: Box<Account<'info, FarmState>>,

    /// Program authority PDA (reward vault authority).
    ///
    /// CHECK: seeds-checked PDA, signs the sweep.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(address = global_config.reward_mint @ ErrorCode::InvalidMint)]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program vault custodying distributed rewards.
    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Admin's reward ATA (created if missing).
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = reward_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_reward_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// SPL Token / Token-2022 interface program.
    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Transfers the unaccounted reward-vault surplus to the admin.
///
/// # Fails
/// - `Unauthorized` for non-admin callers.
/// - `NoExcessRewards` if the vault holds nothing beyond outstanding liabilities.
pub fn recover_excess_rewards(ctx: Context<RecoverExcessRewards>) -> Result<()> {
    let excess = ctx
        .accounts
        .farm_state
        .excess_rewards(ctx.accounts.reward_vault.amount)?;
    require_gt!(excess, 0, ErrorCode::NoExcessRewards);

    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner_reward_token.to_account_info(),
        ctx.accounts.reward_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        excess,
        ctx.accounts.reward_mint.decimals,
        &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    msg!("Recovered {} excess reward tokens", excess);
    emit!(ExcessRewardsRecovered {
        admin: ctx.accounts.owner.key(),
        amount: excess,
    });

    Ok(())
}
