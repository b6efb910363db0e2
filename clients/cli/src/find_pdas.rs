use {
    crate::{common::parse_pubkey, config::Config, output::format_output, CommandResult},
    clap::Args,
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    std::fmt::{Display, Formatter},
    wpokt::get_mint_authority_address_with_seed_for_program,
};

#[derive(Clone, Debug, Args)]
pub struct FindPdasArgs {
    /// The address of the mint
    #[clap(value_parser = parse_pubkey)]
    pub mint: Pubkey,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdasOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub mint_authority_address: Pubkey,
    pub bump_seed: u8,
}

impl Display for PdasOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Mint:", &self.mint.to_string())?;
        writeln_name_value(
            f,
            "Mint authority address:",
            &self.mint_authority_address.to_string(),
        )?;
        writeln_name_value(f, "Bump seed:", &self.bump_seed.to_string())?;

        Ok(())
    }
}

impl QuietDisplay for PdasOutput {
    fn write_str(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        writeln!(w, "{}", self.mint_authority_address)
    }
}
impl VerboseDisplay for PdasOutput {}

pub async fn command_find_pdas(config: &Config, args: FindPdasArgs) -> CommandResult {
    let (mint_authority_address, bump_seed) =
        get_mint_authority_address_with_seed_for_program(&args.mint, &config.program_id)?;

    Ok(format_output(
        config,
        PdasOutput {
            mint: args.mint,
            mint_authority_address,
            bump_seed,
        },
    ))
}
