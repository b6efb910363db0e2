use {
    crate::{
        common::{fetch_account, parse_token_program, process_transaction},
        config::Config,
        output::{format_output, println_display},
        CommandResult,
    },
    clap::Args,
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
    solana_keypair::Keypair,
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    solana_signer::Signer,
    solana_system_interface::instruction::create_account,
    solana_transaction::Transaction,
    spl_token_2022::instruction::initialize_mint2,
    std::fmt::{Display, Formatter},
    wpokt::{
        get_mint_authority_address_for_program, state::MAX_DECIMALS,
        verification::verify_ready_for_construction,
    },
};

#[derive(Clone, Debug, Args)]
pub struct CreateMintArgs {
    /// Number of base 10 digits to the right of the decimal place
    #[clap(long, default_value_t = 6)]
    pub decimals: u8,

    /// The address of the token program the mint should belong to
    #[clap(long, value_parser = parse_token_program)]
    pub token_program: Option<Pubkey>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMintOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub mint_creator: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub mint_authority_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub token_program: Pubkey,
    pub decimals: u8,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for CreateMintOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Mint:", &self.mint.to_string())?;
        writeln_name_value(f, "Mint creator:", &self.mint_creator.to_string())?;
        writeln_name_value(
            f,
            "Mint authority address after construction:",
            &self.mint_authority_address.to_string(),
        )?;
        writeln_name_value(f, "Token program:", &self.token_program.to_string())?;
        writeln_name_value(f, "Decimals:", &self.decimals.to_string())?;

        if let Some(signature) = self.signature {
            writeln_name_value(f, "Signature:", &signature.to_string())?;
        }

        Ok(())
    }
}

impl QuietDisplay for CreateMintOutput {
    fn write_str(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        writeln!(w, "{}", self.mint)
    }
}
impl VerboseDisplay for CreateMintOutput {}

pub async fn command_create_mint(config: &Config, args: CreateMintArgs) -> CommandResult {
    if args.decimals > MAX_DECIMALS {
        return Err(format!("Decimals must be at most {}", MAX_DECIMALS).into());
    }

    let payer = config.fee_payer()?;
    let rpc_client = &*config.rpc_client;
    let token_program = args.token_program.unwrap_or_else(spl_token::id);

    let mint = Keypair::new();
    let mint_authority_address =
        get_mint_authority_address_for_program(&mint.pubkey(), &config.program_id)?;

    println_display(
        config,
        format!(
            "Creating mint {} with {} decimals",
            mint.pubkey(),
            args.decimals
        ),
    );

    let space = spl_token::state::Mint::LEN;
    let rent = rpc_client
        .get_minimum_balance_for_rent_exemption(space)
        .await?;

    let instructions = [
        create_account(
            &payer.pubkey(),
            &mint.pubkey(),
            rent,
            space as u64,
            &token_program,
        ),
        initialize_mint2(
            &token_program,
            &mint.pubkey(),
            &payer.pubkey(),
            None,
            args.decimals,
        )?,
    ];

    let latest_blockhash = rpc_client.get_latest_blockhash().await?;
    let transaction = Transaction::new_signed_with_payer(
        &instructions,
        Some(&payer.pubkey()),
        &[&*payer, &mint as &dyn Signer],
        latest_blockhash,
    );

    let signature = process_transaction(config, transaction).await?;

    if signature.is_some() {
        verify_ready_for_construction(
            move |address| fetch_account(rpc_client, address),
            &config.program_id,
            &mint.pubkey(),
        )
        .await?;
        println_display(config, "Mint is ready for construction".to_string());
    }

    Ok(format_output(
        config,
        CreateMintOutput {
            mint: mint.pubkey(),
            mint_creator: payer.pubkey(),
            mint_authority_address,
            token_program,
            decimals: args.decimals,
            signature,
        },
    ))
}
