use {
    crate::{
        common::{fetch_account, parse_pubkey},
        config::Config,
        output::format_output,
        CommandResult,
    },
    clap::Args,
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    std::fmt::{Display, Formatter},
    wpokt::verification::{verify_constructed, verify_minted, ConstructedState},
};

#[derive(Clone, Debug, Args)]
pub struct VerifyConstructionArgs {
    /// The address of the mint
    #[clap(value_parser = parse_pubkey)]
    pub mint: Pubkey,

    /// The minter that construction should have recorded
    #[clap(value_parser = parse_pubkey)]
    pub expected_minter: Pubkey,
}

#[derive(Clone, Debug, Args)]
pub struct VerifyMintArgs {
    /// The address of the token account
    #[clap(value_parser = parse_pubkey)]
    pub token_account: Pubkey,

    /// The balance the token account should hold, in base units
    #[clap(value_parser)]
    pub expected_amount: u64,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub mint_authority_address: Pubkey,
    pub bump_seed: u8,
    #[serde_as(as = "DisplayFromStr")]
    pub minter: Pubkey,
    pub supply: u64,
    pub decimals: u8,
}

impl From<ConstructedState> for ConstructionOutput {
    fn from(state: ConstructedState) -> Self {
        Self {
            mint: state.mint,
            mint_authority_address: state.mint_authority_address,
            bump_seed: state.mint_authority.bump_seed,
            minter: state.mint_authority.minter,
            supply: state.supply,
            decimals: state.decimals,
        }
    }
}

impl Display for ConstructionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Mint:", &self.mint.to_string())?;
        writeln_name_value(
            f,
            "Mint authority address:",
            &self.mint_authority_address.to_string(),
        )?;
        writeln_name_value(f, "Minter:", &self.minter.to_string())?;
        writeln_name_value(f, "Supply:", &self.supply.to_string())?;
        writeln_name_value(f, "Decimals:", &self.decimals.to_string())?;

        Ok(())
    }
}

impl QuietDisplay for ConstructionOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for ConstructionOutput {}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub token_account: Pubkey,
    pub amount: u64,
    pub construction: ConstructionOutput,
}

impl Display for MintedOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Token account:", &self.token_account.to_string())?;
        writeln_name_value(f, "Amount:", &self.amount.to_string())?;
        write!(f, "{}", self.construction)
    }
}

impl QuietDisplay for MintedOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for MintedOutput {}

pub async fn command_verify_construction(
    config: &Config,
    args: VerifyConstructionArgs,
) -> CommandResult {
    let rpc_client = &*config.rpc_client;
    let constructed = verify_constructed(
        move |address| fetch_account(rpc_client, address),
        &config.program_id,
        &args.mint,
        &args.expected_minter,
    )
    .await?;

    Ok(format_output(config, ConstructionOutput::from(constructed)))
}

pub async fn command_verify_mint(config: &Config, args: VerifyMintArgs) -> CommandResult {
    let rpc_client = &*config.rpc_client;
    let minted = verify_minted(
        move |address| fetch_account(rpc_client, address),
        &config.program_id,
        &args.token_account,
        args.expected_amount,
    )
    .await?;

    Ok(format_output(
        config,
        MintedOutput {
            token_account: minted.token_account,
            amount: minted.amount,
            construction: minted.constructed.into(),
        },
    ))
}
