pub mod initialize_farm;
pub use initialize_farm::*;

pub mod deposit;
pub use deposit::*;

pub mod withdraw;
pub use withdraw::*;

pub mod claim_rewards;
pub use claim_rewards::*;

pub mod distribute;
pub use distribute::*;

pub mod update_config;
pub use update_config::*;

pub mod recover_excess_rewards;
pub use recover_excess_rewards::*;

pub mod query;
pub use query::*;
