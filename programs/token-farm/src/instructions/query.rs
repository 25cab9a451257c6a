use crate::states::*;
use anchor_lang::prelude::*;

/// Read-only view of one participant. Mutates nothing.
///
/// `user_stake_info` is optional: an address that never deposited has no
/// record, and is reported as a zero-valued participant.
#[derive(Accounts)]
pub struct QueryStakingInfo<'info> {
    /// Participant being queried; never signs.
    ///
    /// CHECK: Only its key is used, to derive `user_stake_info`.
    pub user: UncheckedAccount<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(address = global_config.farm_state)]
    pub farm_state: Box<Account<'info, FarmState>>,

    #[account(
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump,
    )]
    pub user_stake_info: Option<Account<'info, UserStakeInfo>>,
}

pub fn get_staking_info(ctx: Context<QueryStakingInfo>) -> Result<StakingInfo> {
    UserStakeInfo::staking_info_of(
        ctx.accounts.user_stake_info.as_deref(),
        &ctx.accounts.farm_state,
    )
}

/// Read-only view of the pool aggregate.
#[derive(Accounts)]
pub struct QueryPoolInfo<'info> {
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(address = global_config.farm_state)]
    pub farm_state: Box<Account<'info, FarmState>>,
}

pub fn get_pool_info(ctx: Context<QueryPoolInfo>) -> Result<PoolInfo> {
    Ok(ctx.accounts.farm_state.pool_info())
}
