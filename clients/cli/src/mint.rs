use {
    crate::{
        common::{fetch_account, parse_pubkey, process_transaction, push_signer},
        config::Config,
        output::{format_output, println_display},
        CommandResult, Error,
    },
    clap::{ArgMatches, Args},
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_clap_v3_utils::input_parsers::signer::{SignerSource, SignerSourceParserBuilder},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_signature::Signature,
    solana_signer::Signer,
    solana_transaction::Transaction,
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
    wpokt::{
        error::WPoktError,
        get_mint_authority_address_for_program,
        instruction::mint,
        state::{unpack_mint, unpack_token_account},
        verification::{verify_minted, verify_supply},
    },
};

#[derive(Clone, Debug, Args)]
pub struct MintArgs {
    /// The address of the constructed mint
    #[clap(value_parser = parse_pubkey)]
    pub mint: Pubkey,

    /// The address of the token account to receive the tokens
    #[clap(value_parser = parse_pubkey)]
    pub destination: Pubkey,

    /// The amount of tokens to mint, in base units
    #[clap(value_parser)]
    pub amount: u64,

    /// Signer source of the recorded minter if different from fee payer
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub minter: Option<SignerSource>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub destination: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub minter: Pubkey,
    pub amount: u64,
    pub destination_balance: u64,
    pub supply: u64,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for MintOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Mint:", &self.mint.to_string())?;
        writeln_name_value(f, "Destination:", &self.destination.to_string())?;
        writeln_name_value(f, "Minter:", &self.minter.to_string())?;
        writeln_name_value(f, "Amount:", &self.amount.to_string())?;
        writeln_name_value(
            f,
            "Destination balance:",
            &self.destination_balance.to_string(),
        )?;
        writeln_name_value(f, "Supply:", &self.supply.to_string())?;

        if let Some(signature) = self.signature {
            writeln_name_value(f, "Signature:", &signature.to_string())?;
        }

        Ok(())
    }
}

impl QuietDisplay for MintOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for MintOutput {}

/// Returns the token program, current supply and destination balance
async fn get_mint_state(
    rpc_client: &RpcClient,
    mint: &Pubkey,
    destination: &Pubkey,
) -> Result<(Pubkey, u64, u64), Error> {
    let mint_account = rpc_client.get_account(mint).await?;
    let supply = u64::from(unpack_mint(&mint_account.data)?.supply);

    let destination_account = rpc_client.get_account(destination).await?;
    let destination_state = unpack_token_account(&destination_account.data)?;
    if destination_state.mint != *mint {
        return Err(format!(
            "Token account {} does not belong to mint {}",
            destination, mint
        )
        .into());
    }

    Ok((
        mint_account.owner,
        supply,
        u64::from(destination_state.amount),
    ))
}

pub async fn command_mint(
    config: &Config,
    args: MintArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let payer = config.fee_payer()?;
    let minter =
        config.signer_or_fee_payer(args.minter.as_ref(), "minter", matches, wallet_manager)?;
    let rpc_client = &*config.rpc_client;

    let mint_authority_address =
        get_mint_authority_address_for_program(&args.mint, &config.program_id)?;
    let (token_program, supply, balance) =
        get_mint_state(rpc_client, &args.mint, &args.destination).await?;

    let expected_supply = supply.checked_add(args.amount).ok_or(WPoktError::Overflow)?;
    let expected_balance = balance.checked_add(args.amount).ok_or(WPoktError::Overflow)?;

    println_display(
        config,
        format!(
            "Minting {} tokens of mint {} to {}",
            args.amount, args.mint, args.destination
        ),
    );

    let instruction = mint(
        &config.program_id,
        &args.mint,
        &mint_authority_address,
        &args.destination,
        &minter.pubkey(),
        &token_program,
        args.amount,
    );

    let mut signers = vec![payer.clone()];
    push_signer(&mut signers, minter.clone());

    let latest_blockhash = rpc_client.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&payer.pubkey()));
    transaction.try_sign(&signers, latest_blockhash)?;

    let signature = process_transaction(config, transaction).await?;

    let (destination_balance, supply) = if signature.is_some() {
        let fetch = move |address| fetch_account(rpc_client, address);
        let minted = verify_minted(
            fetch,
            &config.program_id,
            &args.destination,
            expected_balance,
        )
        .await?;
        let constructed =
            verify_supply(fetch, &config.program_id, &args.mint, expected_supply).await?;
        println_display(config, "Mint verified".to_string());
        (minted.amount, constructed.supply)
    } else {
        (balance, supply)
    };

    Ok(format_output(
        config,
        MintOutput {
            mint: args.mint,
            destination: args.destination,
            minter: minter.pubkey(),
            amount: args.amount,
            destination_balance,
            supply,
            signature,
        },
    ))
}
