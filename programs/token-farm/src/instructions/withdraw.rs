use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{require_balance, transfer_from_pool_vault_to_user};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Withdraw the caller's entire stake together with every pending reward.
///
/// Funds movement:
/// - Principal moves from `stake_vault` → user's stake token account.
/// - Reward moves from `reward_vault` → user's reward ATA (created on demand).
///
/// Withdrawals are never gated by configuration switches.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User leaving the farm (payer for ATA creation if needed).
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

    /// Program authority PDA (token authority of both vaults).
    ///
    /// CHECK: seeds-checked PDA, signs both vault transfers.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(address = global_config.stake_mint @ ErrorCode::InvalidMint)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = global_config.reward_mint @ ErrorCode::InvalidMint)]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program vault custodying all stake.
    #[account(mut, address = global_config.stake_vault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program vault custodying distributed rewards.
    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's stake token account receiving the principal.
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_stake_token: Box<InterfaceAccount<'info, TokenAccount>>,

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

/// Releases the caller's full stake and pays out their settled reward.
///
/// Steps:
/// 1) Settle, zero the user's stake and shrink the pool (all state first).
/// 2) Check both vaults can cover their transfers.
/// 3) Transfer principal, then reward.
/// 4) Emit `Withdrawn`.
///
/// # Fails
/// - `NothingStaked` if the caller has no stake.
/// - `TransferFailed` if a vault cannot cover its transfer; the whole
///   transaction reverts.
pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let record_info = ctx.accounts.user_stake_info.to_account_info();
    let mut user_stake_info = UserStakeInfo::load_or_empty(&record_info)?;
    let farm_state = &mut ctx.accounts.farm_state;

    // --- 1) State transition ---
    let Withdrawal { principal, reward } = user_stake_info.withdraw(farm_state)?;
    user_stake_info.store(&record_info)?;

    // --- 2) Custody checks ---
    require_balance(ctx.accounts.stake_vault.amount, principal)?;
    require_balance(ctx.accounts.reward_vault.amount, reward)?;

    // --- 3) Transfers out of custody ---
    let signer_seeds: &[&[&[u8]]] = &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]];
    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.owner_stake_token.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        principal,
        ctx.accounts.stake_mint.decimals,
        signer_seeds,
    )?;
    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner_reward_token.to_account_info(),
        ctx.accounts.reward_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        reward,
        ctx.accounts.reward_mint.decimals,
        signer_seeds,
    )?;

    // --- 4) Event for indexers/UX ---
    emit!(Withdrawn {
        user: ctx.accounts.owner.key(),
        principal,
        reward,
        total_staked: farm_state.total_staked,
    });

    Ok(())
}
