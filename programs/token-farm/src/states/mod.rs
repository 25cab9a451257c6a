pub mod events;
pub use events::*;

pub mod global_config;
pub use global_config::*;

pub mod farm_state;
pub use farm_state::*;

pub mod user_stake_info;
pub use user_stake_info::*;
