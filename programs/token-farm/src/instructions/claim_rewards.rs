use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{require_balance, transfer_from_pool_vault_to_user};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Collect pending rewards without touching the stake.
///
/// Reward math overview:
/// - Global index: `farm_state.acc_reward_per_share` accumulates reward per
///   staked token, scaled by `PRECISION`.
/// - Per-user checkpoint: `user_stake_info.reward_debt`.
/// - Payout = `rewards_pending + staked * (global_idx - user_idx) / PRECISION`.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// Staker collecting rewards; pays for their reward ATA if missing.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Global farm configuration.
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

    /// Caller's stake record. A participant who never deposited has no
    /// account here and is rejected with `NothingStaked`.
    ///
    /// CHECK: seeds-checked PDA; decoded by `UserStakeInfo::load_or_empty`.
    #[account(
        mut,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
    )]
    pub user_stake_info: UncheckedAccount<'info>,

    /// Vault authority PDA.
    ///
    /// CHECK: seeds-checked PDA, only ever signs the vault transfer.
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

    /// User's reward ATA; created on demand to receive rewards.
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

/// Pays the caller's pending reward and checkpoints their accumulator.
///
/// # Fails
/// - `NothingStaked` if the caller has no stake.
/// - `NoRewardsToClaim` if nothing has accrued.
/// - `TransferFailed` if the reward vault cannot cover the payout.
pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
    let record_info = ctx.accounts.user_stake_info.to_account_info();
    let mut user_stake_info = UserStakeInfo::load_or_empty(&record_info)?;
    let farm_state = &mut ctx.accounts.farm_state;

    let reward = user_stake_info.claim(farm_state)?;
    user_stake_info.store(&record_info)?;

    require_balance(ctx.accounts.reward_vault.amount, reward)?;

    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner_reward_token.to_account_info(),
        ctx.accounts.reward_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        reward,
        ctx.accounts.reward_mint.decimals,
        &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(RewardsClaimed {
        user: ctx.accounts.owner.key(),
        reward,
    });

    Ok(())
}
