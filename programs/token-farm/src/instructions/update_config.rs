use crate::error::ErrorCode;
use crate::states::{ConfigUpdated, GlobalConfig, GLOBAL_CONFIG_SEED};
use anchor_lang::prelude::*;

pub const PARAM_ADMIN: u8 = 0;
pub const PARAM_DEPOSITS_ENABLED: u8 = 1;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Stored farm admin or program admin.
    #[account(
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    pub system_program: Program<'info, System>,
}

/// Changes one farm setting, chosen by `param`:
///
/// - `PARAM_ADMIN` (0): hands admin rights to the key of the first remaining
///   account; `value` is ignored.
/// - `PARAM_DEPOSITS_ENABLED` (1): pauses (`value == 0`) or resumes deposits.
///
/// Withdrawals and claims have no switch.
pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
    let config = &mut ctx.accounts.global_config;
    match param {
        PARAM_ADMIN => {
            let new_admin = ctx
                .remaining_accounts
                .first()
                .map(|account| account.key())
                .ok_or(ErrorCode::MissingRemainingAccount)?;
            require_keys_neq!(new_admin, Pubkey::default());
            msg!("Admin {} -> {}", config.admin, new_admin);
            config.admin = new_admin;
        }
        PARAM_DEPOSITS_ENABLED => {
            config.deposits_enabled = value != 0;
            msg!("Deposits enabled: {}", config.deposits_enabled);
        }
        _ => return err!(ErrorCode::InvalidParam),
    }

    emit!(ConfigUpdated {
        admin: config.admin,
        deposits_enabled: config.deposits_enabled,
    });
    Ok(())
}
