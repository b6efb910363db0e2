#![allow(dead_code)]

use {
    solana_cli_config::Config as SolanaConfig,
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_keypair::{write_keypair_file, Keypair},
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_sdk_ids::bpf_loader_upgradeable,
    solana_signer::Signer,
    solana_test_validator::{TestValidator, TestValidatorGenesis, UpgradeableProgramInfo},
    solana_transaction::Transaction,
    std::{path::PathBuf, process::Command, sync::Arc},
    tempfile::NamedTempFile,
};

pub const WPOKT_CLI_BIN: &str = env!("CARGO_BIN_EXE_wpokt");

pub struct TestEnv {
    pub rpc_client: Arc<RpcClient>,
    pub payer: Keypair,
    pub config_file_path: String,
    // Persist these to keep them in scope
    _validator: TestValidator,
    _keypair_file: NamedTempFile,
    _config_file: NamedTempFile,
}

pub async fn start_validator() -> (TestValidator, Keypair) {
    solana_logger::setup();
    let mut test_validator_genesis = TestValidatorGenesis::default();

    test_validator_genesis.add_upgradeable_programs_with_path(&[UpgradeableProgramInfo {
        program_id: wpokt::id(),
        loader: bpf_loader_upgradeable::id(),
        program_path: PathBuf::from("../../target/deploy/wpokt.so"),
        upgrade_authority: Pubkey::default(),
    }]);

    test_validator_genesis.start_async().await
}

pub async fn setup_test_env() -> TestEnv {
    let (validator, payer) = start_validator().await;
    let rpc_client = Arc::new(validator.get_async_rpc_client());

    // Write payer keypair to a temporary file
    let keypair_file = NamedTempFile::new().unwrap();
    write_keypair_file(&payer, &keypair_file).unwrap();
    let keypair_file_path = keypair_file.path().to_str().unwrap().to_string();

    // Create and save CLI configuration file
    let config_file = NamedTempFile::new().unwrap();
    let config_file_path = config_file.path().to_str().unwrap().to_string();
    let solana_config = SolanaConfig {
        json_rpc_url: validator.rpc_url(),
        websocket_url: validator.rpc_pubsub_url(),
        keypair_path: keypair_file_path,
        ..SolanaConfig::default()
    };
    solana_config.save(&config_file_path).unwrap();

    TestEnv {
        payer,
        rpc_client,
        config_file_path,
        _keypair_file: keypair_file,
        _config_file: config_file,
        _validator: validator,
    }
}

/// Runs the CLI against the test validator with json output
pub fn run_cli(env: &TestEnv, args: &[&str]) -> Result<serde_json::Value, String> {
    let output = Command::new(WPOKT_CLI_BIN)
        .args(args)
        .args(["-C", &env.config_file_path, "--output", "json"])
        .output()
        .unwrap();
    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).to_string());
    }
    let stdout = String::from_utf8(output.stdout).unwrap();
    Ok(serde_json::from_str(&stdout).unwrap())
}

pub fn json_pubkey(value: &serde_json::Value, key: &str) -> Pubkey {
    value[key].as_str().unwrap().parse().unwrap()
}

pub async fn create_token_account(
    env: &TestEnv,
    token_program: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Pubkey {
    let token_account = Keypair::new();
    let account_size = spl_token::state::Account::LEN;

    let tx = Transaction::new_signed_with_payer(
        &[
            solana_system_interface::instruction::create_account(
                &env.payer.pubkey(),
                &token_account.pubkey(),
                env.rpc_client
                    .get_minimum_balance_for_rent_exemption(account_size)
                    .await
                    .unwrap(),
                account_size as u64,
                token_program,
            ),
            spl_token_2022::instruction::initialize_account3(
                token_program,
                &token_account.pubkey(),
                mint,
                owner,
            )
            .unwrap(),
        ],
        Some(&env.payer.pubkey()),
        &[&env.payer, &token_account],
        env.rpc_client.get_latest_blockhash().await.unwrap(),
    );
    env.rpc_client
        .send_and_confirm_transaction(&tx)
        .await
        .unwrap();

    token_account.pubkey()
}

pub async fn get_balance(env: &TestEnv, token_account: &Pubkey) -> u64 {
    let data = env
        .rpc_client
        .get_account_data(token_account)
        .await
        .unwrap();
    spl_token::state::Account::unpack(&data).unwrap().amount
}

pub async fn get_supply(env: &TestEnv, mint: &Pubkey) -> u64 {
    let data = env.rpc_client.get_account_data(mint).await.unwrap();
    spl_token::state::Mint::unpack(&data).unwrap().supply
}
