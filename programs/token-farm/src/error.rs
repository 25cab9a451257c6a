use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Caller has nothing staked")]
    NothingStaked,

    #[msg("Cannot distribute rewards while nothing is staked")]
    NoStakers,

    #[msg("Token transfer cannot be completed")]
    TransferFailed,

    #[msg("Caller is not authorized for this instruction")]
    Unauthorized,

    #[msg("Deposits are currently disabled")]
    DepositsDisabled,

    #[msg("No rewards available to claim")]
    NoRewardsToClaim,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Stake mint and reward mint must differ")]
    InvalidMint,

    #[msg("Invalid parameter provided")]
    InvalidParam,

    #[msg("Missing remaining account")]
    MissingRemainingAccount,

    #[msg("Reward vault holds no tokens above outstanding liabilities")]
    NoExcessRewards,

    #[msg("Mints with a transfer fee are not supported")]
    TransferFeeMint,
}
