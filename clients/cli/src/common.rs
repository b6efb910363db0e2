use {
    crate::{config::Config, output::println_display, Error},
    clap::ArgMatches,
    solana_account::Account,
    solana_clap_v3_utils::keypair::pubkey_from_path,
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_instruction::Instruction,
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    solana_signer::Signer,
    solana_system_interface::instruction::transfer,
    solana_transaction::Transaction,
    std::sync::Arc,
    wpokt::verification::AccountFetchError,
};

pub fn parse_pubkey(value: &str) -> Result<Pubkey, String> {
    parse_address(value, "pubkey")
}

fn parse_address(path: &str, name: &str) -> Result<Pubkey, String> {
    let mut wallet_manager = None;
    pubkey_from_path(&ArgMatches::default(), path, name, &mut wallet_manager)
        .map_err(|_| format!("Failed to load pubkey {} at {}", name, path))
}

pub fn parse_token_program(value: &str) -> Result<Pubkey, String> {
    let pubkey = parse_pubkey(value)?;
    if pubkey == spl_token::id() || pubkey == spl_token_2022::id() {
        Ok(pubkey)
    } else {
        Err("Invalid token program. Must be spl-token or spl-token-2022".to_string())
    }
}

/// Account fetch used by the verification checks. A missing account is
/// `Ok(None)`; any RPC failure is reported as transient.
pub async fn fetch_account(
    rpc_client: &RpcClient,
    address: Pubkey,
) -> Result<Option<Account>, AccountFetchError> {
    Ok(rpc_client
        .get_account_with_commitment(&address, rpc_client.commitment())
        .await?
        .value)
}

pub async fn get_account_owner(rpc_client: &RpcClient, account: &Pubkey) -> Result<Pubkey, Error> {
    let owner = rpc_client.get_account(account).await?.owner;
    Ok(owner)
}

/// Transfers whatever `address` still lacks to be rent exempt at `space`
/// bytes. Returns the instruction, if any, and the lamports it moves.
pub async fn fund_rent(
    rpc_client: &RpcClient,
    payer: &Arc<dyn Signer>,
    address: &Pubkey,
    space: usize,
) -> Result<(Option<Instruction>, u64), Error> {
    let current_lamports = fetch_account(rpc_client, *address)
        .await?
        .map_or(0, |account| account.lamports);
    let rent = rpc_client
        .get_minimum_balance_for_rent_exemption(space)
        .await?;
    let lamports = rent.saturating_sub(current_lamports);
    let instruction = (lamports > 0).then(|| transfer(&payer.pubkey(), address, lamports));
    Ok((instruction, lamports))
}

/// Adds `signer` to `signers` unless a signer with the same key is there
pub fn push_signer(signers: &mut Vec<Arc<dyn Signer>>, signer: Arc<dyn Signer>) {
    if !signers.iter().any(|s| s.pubkey() == signer.pubkey()) {
        signers.push(signer);
    }
}

pub async fn process_transaction(
    config: &Config,
    transaction: Transaction,
) -> Result<Option<Signature>, Error> {
    if config.dry_run {
        let simulation_data = config.rpc_client.simulate_transaction(&transaction).await?;

        if let Some(err) = simulation_data.value.err {
            return Err(format!("Simulation failed: {}", err).into());
        }

        if config.verbose() {
            if let Some(logs) = simulation_data.value.logs {
                for log in logs {
                    println!("    {}", log);
                }
            }

            println!(
                "\nSimulation succeeded, consumed {} compute units",
                simulation_data.value.units_consumed.unwrap_or_default()
            );
        } else {
            println_display(config, "Simulation succeeded".to_string());
        }

        Ok(None)
    } else {
        Ok(Some(
            config
                .rpc_client
                .send_and_confirm_transaction_with_spinner(&transaction)
                .await?,
        ))
    }
}
