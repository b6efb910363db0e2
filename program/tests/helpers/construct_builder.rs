use {
    crate::helpers::{
        common::{init_mollusk, KeyedAccount, TokenProgram},
        mint_builder::MintBuilder,
    },
    mollusk_svm::{program::keyed_account_for_system_program, result::Check, Mollusk},
    solana_account::Account,
    solana_pubkey::Pubkey,
    wpokt::{get_mint_authority_address, instruction::construct},
};

pub struct ConstructResult {
    pub mint: KeyedAccount,
    pub mint_authority: KeyedAccount,
    pub mint_creator: Pubkey,
    pub initial_minter: Pubkey,
}

pub struct ConstructBuilder<'a> {
    mollusk: Mollusk,
    token_program: TokenProgram,
    token_program_addr: Option<Pubkey>,
    mint: Option<KeyedAccount>,
    mint_creator: Option<Pubkey>,
    initial_minter: Option<Pubkey>,
    mint_authority_addr: Option<Pubkey>,
    mint_authority_account: Option<Account>,
    creator_signs: bool,
    checks: Vec<Check<'a>>,
}

impl Default for ConstructBuilder<'_> {
    fn default() -> Self {
        Self {
            mollusk: init_mollusk(),
            token_program: TokenProgram::SplToken,
            token_program_addr: None,
            mint: None,
            mint_creator: None,
            initial_minter: None,
            mint_authority_addr: None,
            mint_authority_account: None,
            creator_signs: true,
            checks: vec![],
        }
    }
}

impl<'a> ConstructBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_program(mut self, program: TokenProgram) -> Self {
        self.token_program = program;
        self
    }

    pub fn token_program_addr(mut self, key: Pubkey) -> Self {
        self.token_program_addr = Some(key);
        self
    }

    pub fn mint(mut self, mint: KeyedAccount) -> Self {
        self.mint = Some(mint);
        self
    }

    pub fn mint_creator(mut self, creator: Pubkey) -> Self {
        self.mint_creator = Some(creator);
        self
    }

    pub fn initial_minter(mut self, minter: Pubkey) -> Self {
        self.initial_minter = Some(minter);
        self
    }

    pub fn mint_authority_addr(mut self, key: Pubkey) -> Self {
        self.mint_authority_addr = Some(key);
        self
    }

    pub fn mint_authority_account(mut self, account: Account) -> Self {
        self.mint_authority_account = Some(account);
        self
    }

    pub fn creator_does_not_sign(mut self) -> Self {
        self.creator_signs = false;
        self
    }

    pub fn check(mut self, check: Check<'a>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn execute(mut self) -> ConstructResult {
        let mint_creator = self.mint_creator.unwrap_or_else(Pubkey::new_unique);
        let initial_minter = self.initial_minter.unwrap_or_else(Pubkey::new_unique);
        let mint = self.mint.clone().unwrap_or_else(|| {
            MintBuilder::new()
                .token_program(self.token_program)
                .mint_authority(mint_creator)
                .build()
        });

        let mint_authority_addr = self
            .mint_authority_addr
            .unwrap_or_else(|| get_mint_authority_address(&mint.key).unwrap());
        let mint_authority_account = self.mint_authority_account.clone().unwrap_or(Account {
            lamports: 100_000_000,
            ..Default::default()
        });

        let token_program_id = self
            .token_program_addr
            .unwrap_or_else(|| self.token_program.id());
        let mut keyed_token_program = self.token_program.keyed_account();
        keyed_token_program.0 = token_program_id;

        let mut instruction = construct(
            &wpokt::id(),
            &mint.key,
            &mint_authority_addr,
            &mint_creator,
            &token_program_id,
            &initial_minter,
        );
        instruction.accounts[2].is_signer = self.creator_signs;

        let accounts = &[
            mint.pair(),
            (mint_authority_addr, mint_authority_account),
            (mint_creator, Account::default()),
            keyed_account_for_system_program(),
            keyed_token_program,
        ];

        if self.checks.is_empty() {
            self.checks.push(Check::success());
        }

        let result =
            self.mollusk
                .process_and_validate_instruction(&instruction, accounts, &self.checks);

        ConstructResult {
            mint: KeyedAccount {
                key: mint.key,
                account: result.get_account(&mint.key).unwrap().clone(),
            },
            mint_authority: KeyedAccount {
                key: mint_authority_addr,
                account: result.get_account(&mint_authority_addr).unwrap().clone(),
            },
            mint_creator,
            initial_minter,
        }
    }
}
