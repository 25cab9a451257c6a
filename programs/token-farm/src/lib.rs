use anchor_lang::prelude::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

declare_id!("7fRmPkVq3nS1yWcH2bLzJx8dEeUa4TgQ9oYhN5iKpD6v");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "Proportional Token Farm",
    project_url: "https://github.com/token-farm/token-farm",
    contacts: "email:security@token-farm.dev",
    policy: "https://github.com/token-farm/token-farm/blob/main/SECURITY.md"
}

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("B8VmoTgg2arRfw7qQVTYK9GohYeyMEjaCSW6jVPVBUgV");
}

pub const FARM_NAME: &str = "Proportional Token Farm";

pub const AUTH_SEED: &str = "farm_vault_auth";
pub const STAKE_VAULT_SEED: &str = "stake_vault";
pub const REWARD_VAULT_SEED: &str = "reward_vault";

/// Fixed-point scale of `FarmState::acc_reward_per_share`.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;
use states::{PoolInfo, StakingInfo};

#[program]
pub mod token_farm {

    use super::*;

    pub fn initialize_farm(ctx: Context<InitializeFarm>, admin: Pubkey) -> Result<()> {
        instructions::initialize_farm(ctx, admin)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
        instructions::update_config(ctx, param, value)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw(ctx)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards(ctx)
    }

    pub fn distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
        instructions::distribute(ctx, amount)
    }

    pub fn recover_excess_rewards(ctx: Context<RecoverExcessRewards>) -> Result<()> {
        instructions::recover_excess_rewards(ctx)
    }

    pub fn get_staking_info(ctx: Context<QueryStakingInfo>) -> Result<StakingInfo> {
        instructions::get_staking_info(ctx)
    }

    pub fn get_pool_info(ctx: Context<QueryPoolInfo>) -> Result<PoolInfo> {
        instructions::get_pool_info(ctx)
    }
}
