use anchor_lang::prelude::*;

/// Emitted once when the farm is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct FarmInitialized {
    /// Human-readable farm name.
    pub name: String,
    /// Farm admin (may later be updated).
    pub admin: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    /// Program-owned vault custodying staked tokens.
    pub stake_vault: Pubkey,
    /// Program-owned vault custodying distributed rewards.
    pub reward_vault: Pubkey,
}

/// Emitted whenever configuration is modified via `update_config`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ConfigUpdated {
    /// Admin after the update.
    pub admin: Pubkey,
    /// Whether deposits are accepted after the update.
    pub deposits_enabled: bool,
}

/// Emitted when a user locks stake tokens.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Deposited {
    pub user: Pubkey,
    /// Stake tokens added by this deposit.
    pub amount: u64,
    /// User's stake after the deposit.
    pub staked_amount: u64,
    /// Reward settled into the user's pending balance by this deposit.
    pub reward_settled: u64,
    /// Pool total after the deposit.
    pub total_staked: u64,
}

/// Emitted when a user withdraws their whole stake.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Withdrawn {
    pub user: Pubkey,
    /// Stake tokens returned.
    pub principal: u64,
    /// Reward tokens paid.
    pub reward: u64,
    /// Pool total after the withdrawal.
    pub total_staked: u64,
}

/// Emitted when a user collects rewards without unstaking.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsClaimed {
    pub user: Pubkey,
    pub reward: u64,
}

/// Emitted after every successful distribution.
///
/// `acc_reward_per_share` is the accumulator value after the injection; the
/// per-share increment is `amount * PRECISION / total_staked`, rounded down.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsDistributed {
    pub distributor: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub acc_reward_per_share: u128,
    pub timestamp: i64,
}

/// Emitted when the admin sweeps reward tokens that no staker can claim.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ExcessRewardsRecovered {
    pub admin: Pubkey,
    pub amount: u64,
}
