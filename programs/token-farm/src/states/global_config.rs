use crate::error::ErrorCode;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global Configuration Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global configuration account.
pub const GLOBAL_CONFIG_SEED: &str = "global_config";

/// Stores the farm's fixed addresses and its few tunable switches.
///
/// Created once by `initialize_farm` and referenced by every instruction.
/// Vault addresses are pinned here so instructions can validate them with a
/// plain `address = ...` constraint.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// PDA bump for this account (for seed derivation).
    pub bump: u8,

    /// Current admin of the farm (authorized to distribute and update config).
    pub admin: Pubkey,

    /// Mint of the stake asset (the LP token role).
    pub stake_mint: Pubkey,

    /// Mint of the reward asset.
    pub reward_mint: Pubkey,

    /// Program-owned vault custodying all staked tokens.
    pub stake_vault: Pubkey,

    /// Program-owned vault custodying distributed, not yet paid rewards.
    pub reward_vault: Pubkey,

    /// Pool aggregate account (totals and accumulator).
    pub farm_state: Pubkey,

    /// Global switch: if `false`, new deposits are rejected. Withdrawals are
    /// never gated.
    pub deposits_enabled: bool,
}

impl GlobalConfig {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 6: six Pubkeys
    /// - 1: one boolean
    pub const LEN: usize = 8 + 1 + 32 * 6 + 1;

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        *key == self.admin || *key == crate::admin::id()
    }

    pub fn ensure_deposits_enabled(&self) -> Result<()> {
        require!(self.deposits_enabled, ErrorCode::DepositsDisabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::test_utils::error_code;

    fn config() -> GlobalConfig {
        GlobalConfig {
            admin: Pubkey::new_unique(),
            deposits_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn stored_and_program_admins_are_accepted() {
        let config = config();
        assert!(config.is_admin(&config.admin));
        assert!(config.is_admin(&crate::admin::id()));
    }

    #[test]
    fn stranger_is_not_admin() {
        let config = config();
        assert!(!config.is_admin(&Pubkey::new_unique()));
        assert!(!config.is_admin(&Pubkey::default()));
    }

    #[test]
    fn handed_over_admin_loses_rights() {
        let mut config = config();
        let previous = config.admin;
        config.admin = Pubkey::new_unique();
        assert!(!config.is_admin(&previous));
        assert!(config.is_admin(&config.admin));
    }

    #[test]
    fn paused_deposits_are_rejected() {
        let mut config = config();
        assert!(config.ensure_deposits_enabled().is_ok());

        config.deposits_enabled = false;
        let err = config.ensure_deposits_enabled().unwrap_err();
        assert_eq!(error_code(err), u32::from(ErrorCode::DepositsDisabled));
    }
}
