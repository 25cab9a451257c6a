//! Drives the accounting core through operation sequences the way the
//! instruction handlers do, with plain integers standing in for the vaults.

use anchor_lang::error::Error;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeMap;
use token_farm::error::ErrorCode;
use token_farm::states::{FarmState, UserStakeInfo, Withdrawal};

const UNIT: u64 = 1_000_000_000;

#[derive(Clone, Debug)]
enum Op {
    Deposit(u8, u64),
    Withdraw(u8),
    Claim(u8),
    Distribute(u64),
}

#[derive(Default)]
struct Ledger {
    farm: FarmState,
    users: BTreeMap<u8, UserStakeInfo>,
    stake_vault: u64,
    reward_vault: u64,
    paid_out: BTreeMap<u8, u64>,
}

fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(_) => u32::MAX,
    }
}

impl Ledger {
    /// Runs `f` against the participant's live record. A participant seen for
    /// the first time is only kept if `f` succeeds.
    fn with_user<T>(
        &mut self,
        id: u8,
        f: impl FnOnce(&mut UserStakeInfo, &mut FarmState) -> anchor_lang::Result<T>,
    ) -> anchor_lang::Result<T> {
        match self.users.get_mut(&id) {
            Some(user) => f(user, &mut self.farm),
            None => {
                let mut user = UserStakeInfo::default();
                let out = f(&mut user, &mut self.farm)?;
                self.users.insert(id, user);
                Ok(out)
            }
        }
    }

    fn snapshot(&self) -> String {
        format!(
            "{:?}|{:?}|{}|{}",
            self.farm, self.users, self.stake_vault, self.reward_vault
        )
    }

    fn apply(&mut self, op: &Op) -> anchor_lang::Result<()> {
        match *op {
            Op::Deposit(id, amount) => {
                self.with_user(id, |user, farm| user.deposit(farm, amount))?;
                self.stake_vault += amount;
            }
            Op::Withdraw(id) => {
                let Withdrawal { principal, reward } =
                    self.with_user(id, |user, farm| user.withdraw(farm))?;
                self.stake_vault -= principal;
                self.reward_vault -= reward;
                *self.paid_out.entry(id).or_default() += reward;
            }
            Op::Claim(id) => {
                let reward = self.with_user(id, |user, farm| user.claim(farm))?;
                self.reward_vault -= reward;
                *self.paid_out.entry(id).or_default() += reward;
            }
            Op::Distribute(amount) => {
                self.farm.distribute(amount)?;
                self.reward_vault += amount;
            }
        }
        Ok(())
    }

    fn pending_total(&self) -> u64 {
        self.users
            .values()
            .map(|u| u.pending_reward(&self.farm).unwrap())
            .sum()
    }

    fn check_invariants(&self) {
        let staked: u64 = self.users.values().map(|u| u.staked_amount).sum();
        assert_eq!(self.farm.total_staked, staked);
        assert_eq!(self.farm.total_staked, self.stake_vault);

        let active = self.users.values().filter(|u| u.is_active()).count() as u64;
        assert_eq!(self.farm.staker_count, active);

        for user in self.users.values() {
            assert!(user.reward_debt <= self.farm.acc_reward_per_share);
        }

        let paid: u64 = self.paid_out.values().sum();
        assert_eq!(paid, self.farm.total_rewards_paid);
        assert!(paid + self.pending_total() <= self.farm.total_rewards_distributed);
        assert_eq!(
            self.reward_vault,
            self.farm.total_rewards_distributed - self.farm.total_rewards_paid
        );
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 1u64..=1_000 * UNIT).prop_map(|(id, amount)| Op::Deposit(id, amount)),
        (0u8..4).prop_map(Op::Withdraw),
        (0u8..4).prop_map(Op::Claim),
        (1u64..=500 * UNIT).prop_map(Op::Distribute),
    ]
}

#[test]
fn owner_deposits_distributes_and_withdraws() {
    let mut ledger = Ledger::default();
    ledger.apply(&Op::Deposit(0, 100 * UNIT)).unwrap();
    assert_eq!(ledger.stake_vault, 100 * UNIT);

    ledger.apply(&Op::Distribute(10 * UNIT)).unwrap();
    assert_eq!(ledger.users[&0].pending_reward(&ledger.farm).unwrap(), 10 * UNIT);

    ledger.apply(&Op::Withdraw(0)).unwrap();
    assert_eq!(ledger.paid_out[&0], 10 * UNIT);
    assert_eq!(ledger.stake_vault, 0);
    let info = ledger.users[&0].staking_info(&ledger.farm).unwrap();
    assert_eq!(info.staked_amount, 0);
    assert_eq!(info.pending_reward, 0);
    ledger.check_invariants();
}

#[test]
fn distribution_to_empty_pool_custodies_nothing() {
    let mut ledger = Ledger::default();
    let before = ledger.snapshot();
    let err = ledger.apply(&Op::Distribute(10 * UNIT)).unwrap_err();
    assert_eq!(error_code(err), u32::from(ErrorCode::NoStakers));
    assert_eq!(ledger.snapshot(), before);
    assert_eq!(ledger.reward_vault, 0);
}

#[test]
fn random_history_drains_to_dust() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut ledger = Ledger::default();
    let mut applied = 0u64;

    for _ in 0..2_000 {
        let id = rng.random_range(0..6u8);
        let op = match rng.random_range(0..10u8) {
            0..=3 => Op::Deposit(id, rng.random_range(1..=10_000 * UNIT)),
            4..=5 => Op::Withdraw(id),
            6 => Op::Claim(id),
            _ => Op::Distribute(rng.random_range(1..=1_000 * UNIT)),
        };
        let before_acc = ledger.farm.acc_reward_per_share;
        if ledger.apply(&op).is_ok() {
            applied += 1;
        }
        assert!(ledger.farm.acc_reward_per_share >= before_acc);
    }
    ledger.check_invariants();

    let ids: Vec<u8> = ledger.users.keys().copied().collect();
    for id in ids {
        if ledger.apply(&Op::Withdraw(id)).is_ok() {
            applied += 1;
        }
    }
    ledger.check_invariants();
    assert_eq!(ledger.stake_vault, 0);
    assert_eq!(ledger.farm.staker_count, 0);

    // Every successful operation rounds down at most once, by under one unit.
    let dust = ledger.reward_vault;
    assert!(dust < applied, "dust {dust} after {applied} operations");
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut ledger = Ledger::default();
        for op in &ops {
            let before = ledger.snapshot();
            if ledger.apply(op).is_err() {
                prop_assert_eq!(ledger.snapshot(), before);
            }
            ledger.check_invariants();
        }
    }

    #[test]
    fn rewards_follow_stake_ratio(
        a in 1u64..=1_000_000 * UNIT,
        b in 1u64..=1_000_000 * UNIT,
        reward in 1u64..=1_000_000 * UNIT,
    ) {
        let mut ledger = Ledger::default();
        ledger.apply(&Op::Deposit(0, a)).unwrap();
        ledger.apply(&Op::Deposit(1, b)).unwrap();
        ledger.apply(&Op::Distribute(reward)).unwrap();

        let total = (a + b) as u128;
        for (id, stake) in [(0u8, a), (1u8, b)] {
            let exact = reward as u128 * stake as u128 / total;
            let got = ledger.users[&id].pending_reward(&ledger.farm).unwrap() as u128;
            prop_assert!(got <= exact);
            prop_assert!(exact - got <= 1);
        }
    }

    #[test]
    fn late_joiner_only_earns_later_distributions(
        history in prop::collection::vec(op_strategy(), 0..30),
        stake in 1u64..=1_000 * UNIT,
        reward in 1u64..=500 * UNIT,
    ) {
        let mut ledger = Ledger::default();
        for op in &history {
            let _ = ledger.apply(op);
        }

        ledger.apply(&Op::Deposit(9, stake)).unwrap();
        prop_assert_eq!(ledger.users[&9].pending_reward(&ledger.farm).unwrap(), 0);

        let total = ledger.farm.total_staked;
        ledger.apply(&Op::Distribute(reward)).unwrap();
        let expected = reward as u128 * stake as u128 / total as u128;
        let got = ledger.users[&9].pending_reward(&ledger.farm).unwrap() as u128;
        prop_assert!(got <= expected && expected - got <= 1);
    }

    #[test]
    fn repeated_settlement_pays_nothing_more(
        stake in 1u64..=1_000 * UNIT,
        reward in 1u64..=1_000 * UNIT,
    ) {
        let mut ledger = Ledger::default();
        ledger.apply(&Op::Deposit(0, stake)).unwrap();
        ledger.apply(&Op::Distribute(reward)).unwrap();
        ledger.apply(&Op::Claim(0)).unwrap();

        let before = ledger.snapshot();
        let err = ledger.apply(&Op::Claim(0)).unwrap_err();
        prop_assert_eq!(error_code(err), u32::from(ErrorCode::NoRewardsToClaim));
        prop_assert_eq!(ledger.snapshot(), before);
    }
}
