use anchor_client::{Client, Cluster, Program};
use anchor_lang::prelude::AccountMeta;
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair, system_program};
use std::rc::Rc;

use token_farm::accounts as farm_accounts;
use token_farm::instruction as farm_instructions;

use crate::instructions::utils::{
    get_ata_address, get_authority_address, get_farm_state_address, get_global_config_address,
    get_reward_vault_address, get_stake_vault_address, get_user_stake_info_address,
};

use super::super::{read_keypair_file, ClientConfig};

/// Program handle whose payer (and `owner` signer) is the keypair at `keypair_path`.
fn farm_program(config: &ClientConfig, keypair_path: &str) -> Result<Program<Rc<Keypair>>> {
    let signer = read_keypair_file(keypair_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(signer));
    Ok(client.program(config.token_farm_program)?)
}

pub fn initialize_farm_instr(
    config: &ClientConfig,
    admin: Pubkey,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.admin_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(farm_accounts::InitializeFarm {
            owner: program.payer(),
            authority: get_authority_address(&program_id),
            global_config: get_global_config_address(&program_id),
            farm_state: get_farm_state_address(&program_id),
            stake_mint: config.stake_mint,
            reward_mint: config.reward_mint,
            stake_vault: get_stake_vault_address(&program_id),
            reward_vault: get_reward_vault_address(&program_id),
            token_program,
            system_program: system_program::id(),
        })
        .args(farm_instructions::InitializeFarm { admin })
        .instructions()?;
    Ok(instructions)
}

pub fn update_config_instr(
    config: &ClientConfig,
    param: u8,
    value: u64,
    new_admin: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.admin_path)?;

    let mut ixs = program
        .request()
        .accounts(farm_accounts::UpdateConfig {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(farm_instructions::UpdateConfig { param, value })
        .instructions()?;

    // The new admin travels as the first remaining account.
    if let Some(admin) = new_admin {
        ixs[0].accounts.push(AccountMeta::new_readonly(admin, false));
    }

    Ok(ixs)
}

pub fn deposit_instr(
    config: &ClientConfig,
    amount: u64,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let ixs = program
        .request()
        .accounts(farm_accounts::Deposit {
            owner,
            global_config: get_global_config_address(&program_id),
            farm_state: get_farm_state_address(&program_id),
            user_stake_info: get_user_stake_info_address(&owner, &program_id),
            stake_mint: config.stake_mint,
            owner_stake_token: get_ata_address(&owner, &config.stake_mint, &token_program),
            stake_vault: get_stake_vault_address(&program_id),
            token_program,
            system_program: system_program::id(),
        })
        .args(farm_instructions::Deposit { amount })
        .instructions()?;
    Ok(ixs)
}

pub fn withdraw_instr(
    config: &ClientConfig,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let ixs = program
        .request()
        .accounts(farm_accounts::Withdraw {
            owner,
            global_config: get_global_config_address(&program_id),
            farm_state: get_farm_state_address(&program_id),
            user_stake_info: get_user_stake_info_address(&owner, &program_id),
            authority: get_authority_address(&program_id),
            stake_mint: config.stake_mint,
            reward_mint: config.reward_mint,
            stake_vault: get_stake_vault_address(&program_id),
            reward_vault: get_reward_vault_address(&program_id),
            owner_stake_token: get_ata_address(&owner, &config.stake_mint, &token_program),
            owner_reward_token: get_ata_address(&owner, &config.reward_mint, &token_program),
            token_program,
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(farm_instructions::Withdraw {})
        .instructions()?;
    Ok(ixs)
}

pub fn claim_rewards_instr(
    config: &ClientConfig,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let ixs = program
        .request()
        .accounts(farm_accounts::ClaimRewards {
            owner,
            global_config: get_global_config_address(&program_id),
            farm_state: get_farm_state_address(&program_id),
            user_stake_info: get_user_stake_info_address(&owner, &program_id),
            authority: get_authority_address(&program_id),
            reward_mint: config.reward_mint,
            reward_vault: get_reward_vault_address(&program_id),
            owner_reward_token: get_ata_address(&owner, &config.reward_mint, &token_program),
            token_program,
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(farm_instructions::ClaimRewards {})
        .instructions()?;
    Ok(ixs)
}

pub fn distribute_instr(
    config: &ClientConfig,
    amount: u64,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.admin_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let ixs = program
        .request()
        .accounts(farm_accounts::Distribute {
            owner,
            global_config: get_global_config_address(&program_id),
            farm_state: get_farm_state_address(&program_id),
            reward_mint: config.reward_mint,
            owner_reward_token: get_ata_address(&owner, &config.reward_mint, &token_program),
            reward_vault: get_reward_vault_address(&program_id),
            token_program,
        })
        .args(farm_instructions::Distribute { amount })
        .instructions()?;
    Ok(ixs)
}

pub fn recover_excess_rewards_instr(
    config: &ClientConfig,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = farm_program(config, &config.admin_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let ixs = program
        .request()
        .accounts(farm_accounts::RecoverExcessRewards {
            owner,
            global_config: get_global_config_address(&program_id),
            farm_state: get_farm_state_address(&program_id),
            authority: get_authority_address(&program_id),
            reward_mint: config.reward_mint,
            reward_vault: get_reward_vault_address(&program_id),
            owner_reward_token: get_ata_address(&owner, &config.reward_mint, &token_program),
            token_program,
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(farm_instructions::RecoverExcessRewards {})
        .instructions()?;
    Ok(ixs)
}
