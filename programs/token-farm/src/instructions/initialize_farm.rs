use crate::error::ErrorCode;
use crate::utils::mint_has_transfer_fee;
use crate::{states::*, FARM_NAME, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialize_farm`.
///
/// This handler:
/// - Initializes the global farm configuration.
/// - Initializes the pool aggregate (`FarmState`) with an empty pool.
/// - Creates the stake vault and the reward vault, both owned by the
///   program `authority` PDA.
///
/// Both mints must live under the same token program. Mints carrying a
/// Token-2022 transfer fee are rejected: the vault would receive less than
/// the booked amount.
#[derive(Accounts)]
pub struct InitializeFarm<'info> {
    /// Program-level admin; funds every account created here.
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::Unauthorized
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, owner of both vaults.
    ///
    /// CHECK: seeds-checked PDA; only its key is stored as vault owner.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Global configuration account holding farm parameters.
    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = GlobalConfig::LEN
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// Pool aggregate: totals and reward accumulator.
    #[account(
        init,
        seeds = [FARM_STATE_SEED.as_bytes()],
        bump,
        payer = owner,
        space = FarmState::LEN
    )]
    pub farm_state: Account<'info, FarmState>,

    /// Mint of the token users stake.
    #[account(mint::token_program = token_program)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Mint of the token paid as reward.
    #[account(
        mint::token_program = token_program,
        constraint = reward_mint.key() != stake_mint.key() @ ErrorCode::InvalidMint,
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-owned vault custodying staked tokens.
    #[account(
        init,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = stake_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program-owned vault custodying distributed rewards.
    #[account(
        init,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = reward_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program shared by both mints.
    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Initializes the farm configuration, the pool aggregate and both vaults.
///
/// Deposits start enabled; the pool starts empty with a zero accumulator.
pub fn initialize_farm(ctx: Context<InitializeFarm>, admin: Pubkey) -> Result<()> {
    require_keys_neq!(admin, Pubkey::default());
    for mint in [&ctx.accounts.stake_mint, &ctx.accounts.reward_mint] {
        require!(
            !mint_has_transfer_fee(&mint.to_account_info())?,
            ErrorCode::TransferFeeMint
        );
    }

    let config = ctx.accounts.global_config.deref_mut();
    config.bump = ctx.bumps.global_config;
    config.admin = admin;
    config.stake_mint = ctx.accounts.stake_mint.key();
    config.reward_mint = ctx.accounts.reward_mint.key();
    config.stake_vault = ctx.accounts.stake_vault.key();
    config.reward_vault = ctx.accounts.reward_vault.key();
    config.farm_state = ctx.accounts.farm_state.key();
    config.deposits_enabled = true;

    let farm_state = ctx.accounts.farm_state.deref_mut();
    farm_state.bump = ctx.bumps.farm_state;

    msg!("{} initialized", FARM_NAME);

    emit!(FarmInitialized {
        name: FARM_NAME.to_string(),
        admin,
        stake_mint: ctx.accounts.stake_mint.key(),
        reward_mint: ctx.accounts.reward_mint.key(),
        stake_vault: ctx.accounts.stake_vault.key(),
        reward_vault: ctx.accounts.reward_vault.key(),
    });
    Ok(())
}
