use crate::{
    error::ErrorCode,
    states::FarmState,
    utils::{mul_div_floor, to_token_amount},
    PRECISION,
};
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserStakeInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each user's stake info account.
pub const USER_STAKE_INFO_SEED: &str = "user_stake_info";

/// Stake and reward bookkeeping for a single participant.
///
/// Each staker has one `UserStakeInfo` account, derived from
/// `USER_STAKE_INFO_SEED + owner`. It is created on first deposit and never
/// closed, so a fully withdrawn participant is still queryable.
///
/// Entitlement is computed lazily: whatever the accumulator gained since
/// `reward_debt`, times `staked_amount`, belongs to this participant.
#[account]
#[derive(Default, Debug)]
pub struct UserStakeInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Owner (user) to whom this record belongs.
    pub owner: Pubkey,

    /// Stake tokens currently locked by this user.
    pub staked_amount: u64,

    /// `FarmState::acc_reward_per_share` as of the last settlement.
    pub reward_debt: u128,

    /// Settled reward not yet paid out.
    pub rewards_pending: u64,

    /// Total reward tokens paid to this user.
    pub total_rewards_claimed: u64,
}

/// Read-only view returned by the `staking_info` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakingInfo {
    pub staked_amount: u64,
    pub pending_reward: u64,
}

/// Amounts owed to a user leaving the farm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Withdrawal {
    pub principal: u64,
    pub reward: u64,
}

impl UserStakeInfo {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: owner pubkey
    /// - 8 * 3: three `u64` fields
    /// - 16: one `u128` field
    pub const LEN: usize = 8 + 1 + 32 + 8 * 3 + 16;

    pub fn is_active(&self) -> bool {
        self.staked_amount > 0
    }

    /// Reward accrued since the last checkpoint, rounded down.
    pub fn accrued_since_checkpoint(&self, farm: &FarmState) -> Result<u64> {
        let delta = farm
            .acc_reward_per_share
            .checked_sub(self.reward_debt)
            .ok_or(ErrorCode::MathOverflow)?;
        to_token_amount(mul_div_floor(delta, self.staked_amount as u128, PRECISION)?)
    }

    /// Everything the user would receive if they withdrew right now.
    pub fn pending_reward(&self, farm: &FarmState) -> Result<u64> {
        self.rewards_pending
            .checked_add(self.accrued_since_checkpoint(farm)?)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    pub fn staking_info(&self, farm: &FarmState) -> Result<StakingInfo> {
        Ok(StakingInfo {
            staked_amount: self.staked_amount,
            pending_reward: self.pending_reward(farm)?,
        })
    }

    /// `staking_info` for a participant that may have no record yet.
    pub fn staking_info_of(record: Option<&Self>, farm: &FarmState) -> Result<StakingInfo> {
        match record {
            Some(record) => record.staking_info(farm),
            None => Ok(StakingInfo::default()),
        }
    }

    /// Reads the record stored in `info`. A PDA that was never created reads
    /// as an empty, unstaked record.
    pub fn load_or_empty(info: &AccountInfo) -> Result<Self> {
        if info.data_is_empty() {
            return Ok(Self::default());
        }
        require_keys_eq!(
            *info.owner,
            crate::ID,
            anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
        );
        let data = info.try_borrow_data()?;
        Self::try_deserialize(&mut &data[..])
    }

    /// Writes the record back into an existing account.
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut dst: &mut [u8] = &mut data;
        self.try_serialize(&mut dst)
    }

    /// Moves newly accrued reward into `rewards_pending` and checkpoints the
    /// accumulator in the same step, so a second call yields zero.
    pub fn settle(&mut self, farm: &FarmState) -> Result<u64> {
        let owed = self.accrued_since_checkpoint(farm)?;
        let rewards_pending = self
            .rewards_pending
            .checked_add(owed)
            .ok_or(ErrorCode::MathOverflow)?;

        self.rewards_pending = rewards_pending;
        self.reward_debt = farm.acc_reward_per_share;
        Ok(owed)
    }

    /// Records a deposit of `amount` and returns the reward settled by it.
    ///
    /// Settlement uses the stake held *before* this deposit, so the new tokens
    /// earn nothing from distributions that already happened.
    pub fn deposit(&mut self, farm: &mut FarmState, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::InvalidAmount);

        let staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_staked = farm
            .total_staked
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let staker_count = if self.is_active() {
            farm.staker_count
        } else {
            farm.staker_count
                .checked_add(1)
                .ok_or(ErrorCode::MathOverflow)?
        };

        let settled = self.settle(farm)?;
        self.staked_amount = staked_amount;
        farm.total_staked = total_staked;
        farm.staker_count = staker_count;
        Ok(settled)
    }

    /// Settles and releases the full stake plus every pending reward.
    pub fn withdraw(&mut self, farm: &mut FarmState) -> Result<Withdrawal> {
        require!(self.is_active(), ErrorCode::NothingStaked);

        let principal = self.staked_amount;
        let reward = self.pending_reward(farm)?;
        let total_staked = farm
            .total_staked
            .checked_sub(principal)
            .ok_or(ErrorCode::MathOverflow)?;
        let staker_count = farm
            .staker_count
            .checked_sub(1)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_rewards_paid = farm.paid_after(reward)?;
        let total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(reward)
            .ok_or(ErrorCode::MathOverflow)?;

        self.staked_amount = 0;
        self.reward_debt = farm.acc_reward_per_share;
        self.rewards_pending = 0;
        self.total_rewards_claimed = total_rewards_claimed;
        farm.total_staked = total_staked;
        farm.staker_count = staker_count;
        farm.total_rewards_paid = total_rewards_paid;

        Ok(Withdrawal { principal, reward })
    }

    /// Settles and pays out pending reward while keeping the stake locked.
    pub fn claim(&mut self, farm: &mut FarmState) -> Result<u64> {
        require!(self.is_active(), ErrorCode::NothingStaked);

        let reward = self.pending_reward(farm)?;
        require!(reward > 0, ErrorCode::NoRewardsToClaim);
        let total_rewards_paid = farm.paid_after(reward)?;
        let total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(reward)
            .ok_or(ErrorCode::MathOverflow)?;

        self.reward_debt = farm.acc_reward_per_share;
        self.rewards_pending = 0;
        self.total_rewards_claimed = total_rewards_claimed;
        farm.total_rewards_paid = total_rewards_paid;

        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::test_utils::{account_info, error_code};
    use quickcheck::quickcheck;

    const UNIT: u64 = 1_000_000_000;

    #[test]
    fn sole_staker_receives_the_whole_distribution() {
        let mut farm = FarmState::default();
        let mut owner = UserStakeInfo::default();

        owner.deposit(&mut farm, 100 * UNIT).unwrap();
        farm.distribute(10 * UNIT).unwrap();
        assert_eq!(
            owner.staking_info(&farm).unwrap(),
            StakingInfo {
                staked_amount: 100 * UNIT,
                pending_reward: 10 * UNIT,
            }
        );

        let out = owner.withdraw(&mut farm).unwrap();
        assert_eq!(
            out,
            Withdrawal {
                principal: 100 * UNIT,
                reward: 10 * UNIT,
            }
        );
        assert_eq!(owner.staking_info(&farm).unwrap(), StakingInfo::default());
        assert_eq!(farm.total_staked, 0);
        assert_eq!(farm.staker_count, 0);
        assert_eq!(farm.total_rewards_paid, 10 * UNIT);
    }

    #[test]
    fn rewards_split_by_stake_ratio() {
        let mut farm = FarmState::default();
        let mut a = UserStakeInfo::default();
        let mut b = UserStakeInfo::default();

        a.deposit(&mut farm, 100 * UNIT).unwrap();
        b.deposit(&mut farm, 300 * UNIT).unwrap();
        assert_eq!(farm.staker_count, 2);
        farm.distribute(40 * UNIT).unwrap();

        assert_eq!(a.withdraw(&mut farm).unwrap().reward, 10 * UNIT);
        assert_eq!(b.withdraw(&mut farm).unwrap().reward, 30 * UNIT);
        assert_eq!(farm.outstanding_rewards().unwrap(), 0);
    }

    #[test]
    fn late_depositor_gets_no_retroactive_credit() {
        let mut farm = FarmState::default();
        let mut a = UserStakeInfo::default();
        let mut b = UserStakeInfo::default();

        a.deposit(&mut farm, 100 * UNIT).unwrap();
        farm.distribute(50 * UNIT).unwrap();
        b.deposit(&mut farm, 100 * UNIT).unwrap();
        assert_eq!(b.pending_reward(&farm).unwrap(), 0);

        farm.distribute(20 * UNIT).unwrap();
        assert_eq!(a.pending_reward(&farm).unwrap(), 60 * UNIT);
        assert_eq!(b.pending_reward(&farm).unwrap(), 10 * UNIT);
    }

    #[test]
    fn top_up_settles_with_previous_stake() {
        let mut farm = FarmState::default();
        let mut a = UserStakeInfo::default();
        let mut b = UserStakeInfo::default();

        a.deposit(&mut farm, 100 * UNIT).unwrap();
        b.deposit(&mut farm, 100 * UNIT).unwrap();
        farm.distribute(20 * UNIT).unwrap();

        assert_eq!(a.deposit(&mut farm, 200 * UNIT).unwrap(), 10 * UNIT);
        assert_eq!(a.rewards_pending, 10 * UNIT);
        assert_eq!(a.reward_debt, farm.acc_reward_per_share);
        assert_eq!(farm.staker_count, 2);

        farm.distribute(40 * UNIT).unwrap();
        assert_eq!(a.pending_reward(&farm).unwrap(), 40 * UNIT);
        assert_eq!(b.pending_reward(&farm).unwrap(), 20 * UNIT);
    }

    #[test]
    fn withdraw_with_nothing_staked_fails() {
        let mut farm = FarmState::default();
        let mut user = UserStakeInfo::default();
        let err = user.withdraw(&mut farm).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::NothingStaked));
    }

    #[test]
    fn zero_deposit_is_rejected_without_side_effects() {
        let mut farm = FarmState::default();
        let mut user = UserStakeInfo::default();
        let err = user.deposit(&mut farm, 0).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::InvalidAmount));
        assert_eq!(farm.staker_count, 0);
        assert_eq!(farm.total_staked, 0);
    }

    #[test]
    fn claim_keeps_stake_and_resets_pending() {
        let mut farm = FarmState::default();
        let mut user = UserStakeInfo::default();
        user.deposit(&mut farm, 100 * UNIT).unwrap();

        let err = user.claim(&mut farm).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::NoRewardsToClaim));

        farm.distribute(7 * UNIT).unwrap();
        assert_eq!(user.claim(&mut farm).unwrap(), 7 * UNIT);
        assert_eq!(user.staked_amount, 100 * UNIT);
        assert_eq!(user.total_rewards_claimed, 7 * UNIT);
        assert_eq!(user.pending_reward(&farm).unwrap(), 0);
        assert_eq!(farm.total_staked, 100 * UNIT);
    }

    #[test]
    fn restake_after_withdraw_starts_from_current_accumulator() {
        let mut farm = FarmState::default();
        let mut a = UserStakeInfo::default();
        let mut b = UserStakeInfo::default();

        a.deposit(&mut farm, 10 * UNIT).unwrap();
        b.deposit(&mut farm, 10 * UNIT).unwrap();
        farm.distribute(10 * UNIT).unwrap();
        a.withdraw(&mut farm).unwrap();
        farm.distribute(10 * UNIT).unwrap();

        a.deposit(&mut farm, 10 * UNIT).unwrap();
        assert_eq!(a.pending_reward(&farm).unwrap(), 0);
        assert_eq!(b.pending_reward(&farm).unwrap(), 15 * UNIT);
    }

    #[test]
    fn missing_record_reads_as_empty_and_cannot_withdraw() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = account_info(&key, &crate::ID, &mut lamports, &mut data);

        let mut farm = FarmState {
            total_staked: 100 * UNIT,
            staker_count: 1,
            ..Default::default()
        };
        farm.distribute(10 * UNIT).unwrap();

        let mut record = UserStakeInfo::load_or_empty(&info).unwrap();
        assert_eq!(record.staking_info(&farm).unwrap(), StakingInfo::default());
        let err = record.withdraw(&mut farm).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::NothingStaked));
        let err = record.claim(&mut farm).unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::NothingStaked));
        assert_eq!(farm.total_staked, 100 * UNIT);
    }

    #[test]
    fn stored_record_loads_back() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![0u8; UserStakeInfo::LEN];
        let info = account_info(&key, &crate::ID, &mut lamports, &mut data);

        let mut farm = FarmState::default();
        let mut record = UserStakeInfo {
            owner: Pubkey::new_unique(),
            ..Default::default()
        };
        record.deposit(&mut farm, 25 * UNIT).unwrap();
        record.store(&info).unwrap();

        let loaded = UserStakeInfo::load_or_empty(&info).unwrap();
        assert_eq!(loaded.owner, record.owner);
        assert_eq!(loaded.staked_amount, 25 * UNIT);
    }

    #[test]
    fn record_owned_by_another_program_is_rejected() {
        let key = Pubkey::new_unique();
        let foreign = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![1u8; UserStakeInfo::LEN];
        let info = account_info(&key, &foreign, &mut lamports, &mut data);
        assert!(UserStakeInfo::load_or_empty(&info).is_err());
    }

    #[test]
    fn absent_participant_queries_as_zero() {
        let mut farm = FarmState::default();
        let mut user = UserStakeInfo::default();
        user.deposit(&mut farm, 10 * UNIT).unwrap();
        farm.distribute(3 * UNIT).unwrap();

        assert_eq!(
            UserStakeInfo::staking_info_of(None, &farm).unwrap(),
            StakingInfo::default()
        );
        assert_eq!(
            UserStakeInfo::staking_info_of(Some(&user), &farm).unwrap(),
            StakingInfo {
                staked_amount: 10 * UNIT,
                pending_reward: 3 * UNIT,
            }
        );
    }

    quickcheck! {
        fn settle_twice_pays_once(stake: u64, reward: u64) -> bool {
            let stake = stake % (1_000_000 * UNIT) + 1;
            let reward = reward % (1_000_000 * UNIT) + 1;
            let mut farm = FarmState::default();
            let mut user = UserStakeInfo::default();
            user.deposit(&mut farm, stake).unwrap();
            farm.distribute(reward).unwrap();

            let first = user.settle(&farm).unwrap();
            let second = user.settle(&farm).unwrap();
            first <= reward && second == 0 && user.rewards_pending == first
        }
    }
}
