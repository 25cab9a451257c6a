use anyhow::{format_err, Context, Result};
use clap::Parser;
use configparser::ini::Ini;
use serde::Serialize;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::str::FromStr;
use token_farm::states::{FarmState, UserStakeInfo};

mod instructions;
use instructions::farm_instructions::*;
use instructions::rpc::*;
use instructions::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    token_farm_program: Pubkey,
    stake_mint: Pubkey,
    reward_mint: Pubkey,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    match config.get("Global", key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format_err!("{} must not be empty", key)),
    }
}

fn required_pubkey(config: &Ini, key: &str) -> Result<Pubkey> {
    let value = required(config, key)?;
    Pubkey::from_str(&value).with_context(|| format!("{} is not a valid pubkey", key))
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to load {}: {}", client_config, e))?;

    Ok(ClientConfig {
        http_url: required(&config, "http_url")?,
        ws_url: required(&config, "ws_url")?,
        payer_path: required(&config, "payer_path")?,
        admin_path: required(&config, "admin_path")?,
        token_farm_program: required_pubkey(&config, "token_farm_program")?,
        stake_mint: required_pubkey(&config, "stake_mint")?,
        reward_mint: required_pubkey(&config, "reward_mint")?,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(long, default_value = "client_config.ini")]
    pub config: String,
    #[clap(subcommand)]
    pub command: TokenFarmCommands,
}

#[derive(Debug, Parser)]
pub enum TokenFarmCommands {
    InitializeFarm {
        #[arg(long)]
        admin: Pubkey,
    },
    /// 0 = set admin (`--admin`), 1 = deposits enabled (`--value` 0/1).
    UpdateConfig {
        #[arg(long)]
        param: u8,
        #[arg(long, default_value_t = 0)]
        value: u64,
        #[arg(long)]
        admin: Option<Pubkey>,
    },
    Deposit {
        #[arg(long)]
        amount: u64,
    },
    Withdraw {},
    ClaimRewards {},
    Distribute {
        #[arg(long)]
        amount: u64,
    },
    RecoverExcessRewards {},
    StakingInfo {
        /// Defaults to the payer.
        #[arg(long)]
        user: Option<Pubkey>,
    },
    PoolInfo {},
}

#[derive(Debug, Serialize)]
struct StakingReport {
    user: String,
    staked_amount: u64,
    pending_reward: u64,
    total_rewards_claimed: u64,
}

#[derive(Debug, Serialize)]
struct PoolReport {
    total_staked: u64,
    acc_reward_per_share: String,
    total_rewards_distributed: u64,
    total_rewards_paid: u64,
    staker_count: u64,
    distribution_count: u64,
    last_distribution_timestamp: i64,
}

fn sign_and_send(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &Keypair,
    extra_signers: &[&Keypair],
) -> Result<Signature> {
    let mut signers = vec![payer];
    signers.extend_from_slice(extra_signers);
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        instructions,
        Some(&payer.pubkey()),
        &signers,
        recent_hash,
    );
    send_txn(rpc_client, &txn, true)
}

fn load_farm_state(rpc_client: &RpcClient, program_id: &Pubkey) -> Result<FarmState> {
    let address = get_farm_state_address(program_id);
    fetch_anchor_account::<FarmState>(rpc_client, &address)?
        .ok_or_else(|| format_err!("farm state {} not found; is the farm initialized?", address))
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let farm_config = load_cfg(&opts.config)?;
    let payer = read_keypair_file(&farm_config.payer_path)?;
    let admin = || read_keypair_file(&farm_config.admin_path);
    let rpc_client = RpcClient::new(farm_config.http_url.to_string());
    let program_id = farm_config.token_farm_program;
    let token_program = || {
        get_farm_token_program(&rpc_client, &farm_config.stake_mint, &farm_config.reward_mint)
    };

    match opts.command {
        TokenFarmCommands::InitializeFarm { admin: new_admin } => {
            let ixs = initialize_farm_instr(&farm_config, new_admin, token_program()?)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[&admin()?])?;
            println!("{}", signature);
        }
        TokenFarmCommands::UpdateConfig {
            param,
            value,
            admin: new_admin,
        } => {
            let ixs = update_config_instr(&farm_config, param, value, new_admin)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[&admin()?])?;
            println!("{}", signature);
        }
        TokenFarmCommands::Deposit { amount } => {
            let ixs = deposit_instr(&farm_config, amount, token_program()?)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[])?;
            println!("{}", signature);
        }
        TokenFarmCommands::Withdraw {} => {
            let ixs = withdraw_instr(&farm_config, token_program()?)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[])?;
            println!("{}", signature);
        }
        TokenFarmCommands::ClaimRewards {} => {
            let ixs = claim_rewards_instr(&farm_config, token_program()?)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[])?;
            println!("{}", signature);
        }
        TokenFarmCommands::Distribute { amount } => {
            let ixs = distribute_instr(&farm_config, amount, token_program()?)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[&admin()?])?;
            println!("{}", signature);
        }
        TokenFarmCommands::RecoverExcessRewards {} => {
            let ixs = recover_excess_rewards_instr(&farm_config, token_program()?)?;
            let signature = sign_and_send(&rpc_client, &ixs, &payer, &[&admin()?])?;
            println!("{}", signature);
        }
        TokenFarmCommands::StakingInfo { user } => {
            let user = user.unwrap_or_else(|| payer.pubkey());
            let farm_state = load_farm_state(&rpc_client, &program_id)?;
            let user_stake_info = fetch_anchor_account::<UserStakeInfo>(
                &rpc_client,
                &get_user_stake_info_address(&user, &program_id),
            )?;
            // An address that never deposited reads as an empty position.
            let info = UserStakeInfo::staking_info_of(user_stake_info.as_ref(), &farm_state)
                .map_err(|e| format_err!("pending reward computation failed: {}", e))?;
            let claimed = user_stake_info.map_or(0, |record| record.total_rewards_claimed);
            let report = StakingReport {
                user: user.to_string(),
                staked_amount: info.staked_amount,
                pending_reward: info.pending_reward,
                total_rewards_claimed: claimed,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        TokenFarmCommands::PoolInfo {} => {
            let farm_state = load_farm_state(&rpc_client, &program_id)?;
            let info = farm_state.pool_info();
            let report = PoolReport {
                total_staked: info.total_staked,
                acc_reward_per_share: info.acc_reward_per_share.to_string(),
                total_rewards_distributed: info.total_rewards_distributed,
                total_rewards_paid: info.total_rewards_paid,
                staker_count: info.staker_count,
                distribution_count: farm_state.distribution_count,
                last_distribution_timestamp: farm_state.last_distribution_timestamp,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
