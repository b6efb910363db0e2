use {
    crate::{
        common::{
            fetch_account, fund_rent, get_account_owner, parse_pubkey, process_transaction,
            push_signer,
        },
        config::Config,
        output::{format_output, println_display},
        CommandResult,
    },
    clap::{ArgMatches, Args},
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_clap_v3_utils::input_parsers::signer::{SignerSource, SignerSourceParserBuilder},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
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
        get_mint_authority_address_with_seed_for_program, instruction::construct,
        state::MintAuthority, verification::verify_constructed,
    },
};

#[derive(Clone, Debug, Args)]
pub struct ConstructArgs {
    /// The address of the mint to bind
    #[clap(value_parser = parse_pubkey)]
    pub mint: Pubkey,

    /// The address that will be permitted to mint
    #[clap(value_parser = parse_pubkey)]
    pub initial_minter: Pubkey,

    /// Signer source of the current mint authority if different from fee
    /// payer
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub mint_creator: Option<SignerSource>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub mint_authority_address: Pubkey,
    pub bump_seed: u8,
    #[serde_as(as = "DisplayFromStr")]
    pub minter: Pubkey,
    pub funded_mint_authority_lamports: u64,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for ConstructOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Mint:", &self.mint.to_string())?;
        writeln_name_value(
            f,
            "Mint authority address:",
            &self.mint_authority_address.to_string(),
        )?;
        writeln_name_value(f, "Minter:", &self.minter.to_string())?;
        writeln_name_value(
            f,
            "Funded mint authority lamports:",
            &self.funded_mint_authority_lamports.to_string(),
        )?;

        if let Some(signature) = self.signature {
            writeln_name_value(f, "Signature:", &signature.to_string())?;
        }

        Ok(())
    }
}

impl QuietDisplay for ConstructOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}

impl VerboseDisplay for ConstructOutput {
    fn write_str(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        writeln!(w, "{}", self)?;
        writeln_name_value(w, "Bump seed:", &self.bump_seed.to_string())
    }
}

pub async fn command_construct(
    config: &Config,
    args: ConstructArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let payer = config.fee_payer()?;
    let mint_creator = config.signer_or_fee_payer(
        args.mint_creator.as_ref(),
        "mint_creator",
        matches,
        wallet_manager,
    )?;
    let rpc_client = &*config.rpc_client;

    let (mint_authority_address, bump_seed) =
        get_mint_authority_address_with_seed_for_program(&args.mint, &config.program_id)?;
    let token_program = get_account_owner(rpc_client, &args.mint).await?;

    println_display(
        config,
        format!(
            "Binding mint {} to authority {} with minter {}",
            args.mint, mint_authority_address, args.initial_minter
        ),
    );

    let mut instructions = vec![];

    // The program does not create the authority account itself, so make sure
    // it already holds its rent
    let (fund_instruction, funded_mint_authority_lamports) = fund_rent(
        rpc_client,
        &payer,
        &mint_authority_address,
        MintAuthority::LEN,
    )
    .await?;
    if let Some(instruction) = fund_instruction {
        println_display(
            config,
            format!(
                "Funding mint authority account {mint_authority_address} with \
                 {funded_mint_authority_lamports} lamports for rent"
            ),
        );
        instructions.push(instruction);
    }

    instructions.push(construct(
        &config.program_id,
        &args.mint,
        &mint_authority_address,
        &mint_creator.pubkey(),
        &token_program,
        &args.initial_minter,
    ));

    let mut signers = vec![payer.clone()];
    push_signer(&mut signers, mint_creator);

    let latest_blockhash = rpc_client.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&instructions, Some(&payer.pubkey()));
    transaction.try_sign(&signers, latest_blockhash)?;

    let signature = process_transaction(config, transaction).await?;

    if signature.is_some() {
        verify_constructed(
            move |address| fetch_account(rpc_client, address),
            &config.program_id,
            &args.mint,
            &args.initial_minter,
        )
        .await?;
        println_display(config, "Construction verified".to_string());
    }

    Ok(format_output(
        config,
        ConstructOutput {
            mint: args.mint,
            mint_authority_address,
            bump_seed,
            minter: args.initial_minter,
            funded_mint_authority_lamports,
            signature,
        },
    ))
}
