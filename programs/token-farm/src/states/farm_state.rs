use crate::{error::ErrorCode, PRECISION};
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// FarmState Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the pool aggregate account.
pub const FARM_STATE_SEED: &str = "farm_state";

/// Pool-wide staking totals and the reward-per-share accumulator.
///
/// This is the single aggregate every staking and distribution instruction
/// writes. Individual entitlements are never stored here; each
/// `UserStakeInfo` derives its share lazily from `acc_reward_per_share`.
#[account]
#[derive(Default, Debug)]
pub struct FarmState {
    /// PDA bump for this account.
    pub bump: u8,

    /// Sum of every participant's `staked_amount`. Always equal to the stake
    /// vault balance.
    pub total_staked: u64,

    /// Reward per unit of stake ever distributed, scaled by `PRECISION`.
    /// Only grows, and only through `distribute`.
    pub acc_reward_per_share: u128,

    /// Sum of every amount passed to `distribute`.
    pub total_rewards_distributed: u64,

    /// Sum of every reward paid out by `withdraw` and `claim_rewards`.
    pub total_rewards_paid: u64,

    /// Participants currently holding a non-zero stake.
    pub staker_count: u64,

    pub distribution_count: u64,

    /// UNIX timestamp (seconds) of the last successful distribution.
    pub last_distribution_timestamp: i64,
}

/// Read-only snapshot returned by the `pool_info` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolInfo {
    pub total_staked: u64,
    pub acc_reward_per_share: u128,
    pub total_rewards_distributed: u64,
    pub total_rewards_paid: u64,
    pub staker_count: u64,
}

impl FarmState {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 8 * 5: five `u64` fields
    /// - 16: one `u128` field
    /// - 8: one `i64` field
    pub const LEN: usize = 8 + 1 + 8 * 5 + 16 + 8;

    /// Spreads `amount` over the current stakers by advancing the accumulator.
    ///
    /// The increment is `amount * PRECISION / total_staked`, rounded down; the
    /// truncated remainder stays in the reward vault as pool-owned dust.
    /// Returns the increment. Leaves the state untouched on error.
    pub fn distribute(&mut self, amount: u64) -> Result<u128> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(self.total_staked > 0, ErrorCode::NoStakers);

        let increment = (amount as u128)
            .checked_mul(PRECISION)
            .ok_or(ErrorCode::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(ErrorCode::MathOverflow)?;
        let acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(increment)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_rewards_distributed = self
            .total_rewards_distributed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let distribution_count = self
            .distribution_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        self.acc_reward_per_share = acc_reward_per_share;
        self.total_rewards_distributed = total_rewards_distributed;
        self.distribution_count = distribution_count;
        Ok(increment)
    }

    /// Upper bound on what stakers can still be owed: everything distributed
    /// minus everything already paid. Includes rounding dust.
    pub fn outstanding_rewards(&self) -> Result<u64> {
        self.total_rewards_distributed
            .checked_sub(self.total_rewards_paid)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Portion of `reward_vault_balance` that no staker can ever claim: tokens
    /// that reached the vault without going through `distribute`.
    pub fn excess_rewards(&self, reward_vault_balance: u64) -> Result<u64> {
        Ok(reward_vault_balance.saturating_sub(self.outstanding_rewards()?))
    }

    /// Total paid after a payout of `amount`, refusing to pay more than was
    /// ever distributed.
    pub(crate) fn paid_after(&self, amount: u64) -> Result<u64> {
        let total_rewards_paid = self
            .total_rewards_paid
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(
            total_rewards_paid <= self.total_rewards_distributed,
            ErrorCode::MathOverflow
        );
        Ok(total_rewards_paid)
    }

    pub fn pool_info(&self) -> PoolInfo {
        PoolInfo {
            total_staked: self.total_staked,
            acc_reward_per_share: self.acc_reward_per_share,
            total_rewards_distributed: self.total_rewards_distributed,
            total_rewards_paid: self.total_rewards_paid,
            staker_count: self.staker_count,
        }
    }
}
