use {
    crate::{
        common::parse_pubkey,
        config::Config,
        construct::{command_construct, ConstructArgs},
        create_mint::{command_create_mint, CreateMintArgs},
        find_pdas::{command_find_pdas, FindPdasArgs},
        mint::{command_mint, MintArgs},
        output::{parse_output_format, OUTPUT_FORMATS},
        verify::{
            command_verify_construction, command_verify_mint, VerifyConstructionArgs,
            VerifyMintArgs,
        },
        CommandResult,
    },
    clap::{
        builder::{PossibleValuesParser, TypedValueParser},
        ArgMatches, Parser, Subcommand,
    },
    solana_clap_v3_utils::input_parsers::{
        parse_url_or_moniker,
        signer::{SignerSource, SignerSourceParserBuilder},
    },
    solana_cli_output::OutputFormat,
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    std::rc::Rc,
};

#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about = "A command line tool for interacting with the wPOKT mint authority program"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    /// Configuration file to use
    #[clap(global(true), short = 'C', long = "config", id = "PATH")]
    pub config_file: Option<String>,

    /// Simulate transaction instead of executing
    #[clap(global(true), long, alias = "dryrun")]
    pub dry_run: bool,

    /// URL for Solana JSON `RPC` or moniker (or their first letter):
    /// [`mainnet-beta`, `testnet`, `devnet`, `localhost`].
    /// Default from the configuration file.
    #[clap(
        global(true),
        short = 'u',
        long = "url",
        id = "URL_OR_MONIKER",
        value_parser = parse_url_or_moniker,
    )]
    pub json_rpc_url: Option<String>,

    /// Specify the fee-payer account. This may be a keypair file, the ASK
    /// keyword or a hardware wallet URL. Defaults to the client keypair.
    #[clap(
        global(true),
        long,
        id = "PAYER_KEYPAIR",
        value_parser = SignerSourceParserBuilder::default().allow_all().build(),
    )]
    pub fee_payer: Option<SignerSource>,

    /// Address of the wPOKT program, if deployed somewhere other than the
    /// default program id
    #[clap(global(true), long, value_parser = parse_pubkey)]
    pub program_id: Option<Pubkey>,

    /// Show additional information
    #[clap(global(true), short, long)]
    pub verbose: bool,

    /// Return information in specified output format
    #[clap(
        global(true),
        long = "output",
        id = "FORMAT",
        conflicts_with = "verbose",
        value_parser = PossibleValuesParser::new(OUTPUT_FORMATS)
            .map(|o| parse_output_format(&o)),
    )]
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Find the mint authority address derived for a mint
    FindPdas(FindPdasArgs),
    /// Create a mint with the fee payer as its mint authority
    CreateMint(CreateMintArgs),
    /// Bind a mint's authority to the program and record the initial minter
    Construct(ConstructArgs),
    /// Mint tokens as the recorded minter
    Mint(MintArgs),
    /// Check that a mint has completed construction
    VerifyConstruction(VerifyConstructionArgs),
    /// Check the balance of a token account of a constructed mint
    VerifyMint(VerifyMintArgs),
}

impl Command {
    pub async fn execute(
        self,
        config: &Config,
        matches: &ArgMatches,
        wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
    ) -> CommandResult {
        match self {
            Command::FindPdas(args) => command_find_pdas(config, args).await,
            Command::CreateMint(args) => command_create_mint(config, args).await,
            Command::Construct(args) => {
                command_construct(config, args, matches, wallet_manager).await
            }
            Command::Mint(args) => command_mint(config, args, matches, wallet_manager).await,
            Command::VerifyConstruction(args) => command_verify_construction(config, args).await,
            Command::VerifyMint(args) => command_verify_mint(config, args).await,
        }
    }
}
