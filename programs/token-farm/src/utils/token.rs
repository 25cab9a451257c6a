use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{transfer_fee::TransferFeeConfig, BaseStateWithExtensions, StateWithExtensions},
};
use anchor_spl::token_interface;

/// Fails with `TransferFailed` when `balance` cannot cover `amount`.
///
/// Handlers call this before every CPI so a short balance surfaces as a farm
/// error instead of a token-program failure.
pub fn require_balance(balance: u64, amount: u64) -> Result<()> {
    require_gte!(balance, amount, ErrorCode::TransferFailed);
    Ok(())
}

/// Whether `mint` may withhold part of each transfer as a fee. Only Token-2022
/// mints carrying a `TransferFeeConfig` can; the fee may be zero today and
/// raised later, so its presence alone counts.
pub fn mint_has_transfer_fee(mint: &AccountInfo) -> Result<bool> {
    if *mint.owner != spl_token_2022::ID {
        return Ok(false);
    }
    let data = mint.try_borrow_data()?;
    let state = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&data)?;
    Ok(state.get_extension::<TransferFeeConfig>().is_ok())
}

/// Moves `amount` from a user-owned token account into a program vault.
/// The user signs the outer transaction, so no seeds are needed.
pub fn transfer_from_user_to_pool_vault<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to_vault: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            token_interface::TransferChecked {
                from,
                to: to_vault,
                authority,
                mint,
            },
        ),
        amount,
        mint_decimals,
    )
}

/// Moves `amount` out of a program vault, signing as the vault authority PDA.
pub fn transfer_from_pool_vault_to_user<'a>(
    authority: AccountInfo<'a>,
    from_vault: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            token_interface::TransferChecked {
                from: from_vault,
                to,
                authority,
                mint,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}
