use {
    crate::helpers::common::{KeyedAccount, TokenProgram},
    solana_account::Account,
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_rent::Rent,
    spl_token::state::AccountState,
};

pub struct TokenAccountBuilder {
    token_program: TokenProgram,
    mint: Option<Pubkey>,
    owner: Option<Pubkey>,
    amount: u64,
    account_key: Option<Pubkey>,
}

impl Default for TokenAccountBuilder {
    fn default() -> Self {
        Self {
            token_program: TokenProgram::SplToken,
            mint: None,
            owner: None,
            amount: 0,
            account_key: None,
        }
    }
}

impl TokenAccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_program(mut self, program: TokenProgram) -> Self {
        self.token_program = program;
        self
    }

    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    pub fn account_key(mut self, key: Pubkey) -> Self {
        self.account_key = Some(key);
        self
    }

    pub fn build(self) -> KeyedAccount {
        let state = spl_token::state::Account {
            mint: self.mint.expect("Mint is required for token account"),
            owner: self.owner.unwrap_or_else(Pubkey::new_unique),
            amount: self.amount,
            state: AccountState::Initialized,
            ..Default::default()
        };
        let mut data = vec![0u8; spl_token::state::Account::LEN];
        state.pack_into_slice(&mut data);

        KeyedAccount {
            key: self.account_key.unwrap_or_else(Pubkey::new_unique),
            account: Account {
                lamports: Rent::default().minimum_balance(data.len()),
                data,
                owner: self.token_program.id(),
                ..Default::default()
            },
        }
    }
}
