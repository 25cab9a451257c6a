use anchor_lang::AccountDeserialize;
use anyhow::{format_err, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{account::Account, pubkey::Pubkey};
use token_farm::states::{FARM_STATE_SEED, GLOBAL_CONFIG_SEED, USER_STAKE_INFO_SEED};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

/// Fetches and decodes an Anchor account. `Ok(None)` if it does not exist.
pub fn fetch_anchor_account<T: AccountDeserialize>(
    rpc_client: &RpcClient,
    address: &Pubkey,
) -> Result<Option<T>> {
    let account = rpc_client
        .get_multiple_accounts(&[*address])?
        .pop()
        .ok_or_else(|| format_err!("rpc returned no entry for {}", address))?;
    account.as_ref().map(deserialize_anchor_account).transpose()
}

pub fn get_global_config_address(program_id: &Pubkey) -> Pubkey {
    let (global_config, _bump) =
        Pubkey::find_program_address(&[GLOBAL_CONFIG_SEED.as_bytes()], program_id);
    global_config
}

pub fn get_farm_state_address(program_id: &Pubkey) -> Pubkey {
    let (farm_state, _bump) =
        Pubkey::find_program_address(&[FARM_STATE_SEED.as_bytes()], program_id);
    farm_state
}

pub fn get_authority_address(program_id: &Pubkey) -> Pubkey {
    let (authority, _bump) =
        Pubkey::find_program_address(&[token_farm::AUTH_SEED.as_bytes()], program_id);
    authority
}

pub fn get_stake_vault_address(program_id: &Pubkey) -> Pubkey {
    let (stake_vault, _bump) =
        Pubkey::find_program_address(&[token_farm::STAKE_VAULT_SEED.as_bytes()], program_id);
    stake_vault
}

pub fn get_reward_vault_address(program_id: &Pubkey) -> Pubkey {
    let (reward_vault, _bump) =
        Pubkey::find_program_address(&[token_farm::REWARD_VAULT_SEED.as_bytes()], program_id);
    reward_vault
}

pub fn get_user_stake_info_address(user: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (user_stake_info, _bump) = Pubkey::find_program_address(
        &[USER_STAKE_INFO_SEED.as_bytes(), user.as_ref()],
        program_id,
    );
    user_stake_info
}

pub fn get_ata_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address_with_program_id(
        owner,
        mint,
        token_program,
    )
}

/// Maps a mint's owning program to the token program its accounts use.
pub fn token_program_of(mint: &Pubkey, mint_owner: &Pubkey) -> Result<Pubkey> {
    if *mint_owner == spl_token::id() || *mint_owner == spl_token_2022::id() {
        Ok(*mint_owner)
    } else {
        Err(format_err!(
            "{} is owned by {}, not a token program",
            mint,
            mint_owner
        ))
    }
}

/// Token program shared by the stake and reward mints, read from chain.
pub fn get_farm_token_program(
    rpc_client: &RpcClient,
    stake_mint: &Pubkey,
    reward_mint: &Pubkey,
) -> Result<Pubkey> {
    let accounts = rpc_client.get_multiple_accounts(&[*stake_mint, *reward_mint])?;
    let mut programs = Vec::with_capacity(2);
    for (mint, account) in [stake_mint, reward_mint].into_iter().zip(accounts) {
        let account = account.ok_or_else(|| format_err!("mint {} not found", mint))?;
        programs.push(token_program_of(mint, &account.owner)?);
    }
    if programs[0] != programs[1] {
        return Err(format_err!(
            "stake mint and reward mint live under different token programs"
        ));
    }
    Ok(programs[0])
}
