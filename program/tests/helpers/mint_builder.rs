use {
    crate::helpers::common::{KeyedAccount, TokenProgram, DEFAULT_MINT_DECIMALS, DEFAULT_MINT_SUPPLY},
    solana_account::Account,
    solana_program_option::COption,
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_rent::Rent,
};

pub struct MintBuilder {
    token_program: TokenProgram,
    mint_authority: Option<Pubkey>,
    supply: u64,
    decimals: u8,
    is_initialized: bool,
    mint_key: Option<Pubkey>,
}

impl Default for MintBuilder {
    fn default() -> Self {
        Self {
            token_program: TokenProgram::SplToken,
            mint_authority: None,
            supply: DEFAULT_MINT_SUPPLY,
            decimals: DEFAULT_MINT_DECIMALS,
            is_initialized: true,
            mint_key: None,
        }
    }
}

impl MintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_program(mut self, program: TokenProgram) -> Self {
        self.token_program = program;
        self
    }

    pub fn mint_authority(mut self, authority: Pubkey) -> Self {
        self.mint_authority = Some(authority);
        self
    }

    pub fn supply(mut self, supply: u64) -> Self {
        self.supply = supply;
        self
    }

    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn uninitialized(mut self) -> Self {
        self.is_initialized = false;
        self
    }

    pub fn mint_key(mut self, key: Pubkey) -> Self {
        self.mint_key = Some(key);
        self
    }

    pub fn build(self) -> KeyedAccount {
        let mut data = vec![0u8; spl_token::state::Mint::LEN];
        if self.is_initialized {
            let state = spl_token::state::Mint {
                mint_authority: COption::Some(
                    self.mint_authority.unwrap_or_else(Pubkey::new_unique),
                ),
                supply: self.supply,
                decimals: self.decimals,
                is_initialized: true,
                freeze_authority: COption::None,
            };
            state.pack_into_slice(&mut data);
        }

        KeyedAccount {
            key: self.mint_key.unwrap_or_else(Pubkey::new_unique),
            account: Account {
                lamports: Rent::default().minimum_balance(data.len()),
                data,
                owner: self.token_program.id(),
                ..Default::default()
            },
        }
    }
}
