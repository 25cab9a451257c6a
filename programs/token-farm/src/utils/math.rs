//! Wide-integer helpers for the reward accumulator.

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

// Expanded away from the anchor prelude: the macro body needs std's two-argument `Result`.
mod wide {
    uint::construct_uint! {
        pub struct U256(4);
    }
}
pub use wide::U256;

/// `a * b / denominator`, rounded down, with the product held in 256 bits.
///
/// Fails with `MathOverflow` on a zero denominator or when the quotient does
/// not fit back into a `u128`.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator != 0, ErrorCode::MathOverflow);
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(ErrorCode::MathOverflow)?;
    let quotient = product / U256::from(denominator);
    require!(quotient <= U256::from(u128::MAX), ErrorCode::MathOverflow);
    Ok(quotient.as_u128())
}

/// Narrows a token amount back to the SPL `u64` domain.
pub fn to_token_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(ErrorCode::MathOverflow))
}
