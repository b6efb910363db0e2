use {
    crate::helpers::{
        common::{init_mollusk, KeyedAccount, TokenProgram},
        construct_builder::ConstructResult,
        token_account_builder::TokenAccountBuilder,
    },
    mollusk_svm::{result::Check, Mollusk},
    solana_account::Account,
    solana_pubkey::Pubkey,
};

pub struct MintToResult {
    pub mint: KeyedAccount,
    pub mint_authority: KeyedAccount,
    pub destination: KeyedAccount,
}

pub struct MintToBuilder<'a> {
    mollusk: Mollusk,
    token_program: TokenProgram,
    constructed: ConstructResult,
    destination: Option<KeyedAccount>,
    minter: Option<Pubkey>,
    minter_signs: bool,
    mint_authority: Option<KeyedAccount>,
    amount: u64,
    checks: Vec<Check<'a>>,
}

impl<'a> MintToBuilder<'a> {
    pub fn new(constructed: ConstructResult) -> Self {
        Self {
            mollusk: init_mollusk(),
            token_program: TokenProgram::SplToken,
            constructed,
            destination: None,
            minter: None,
            minter_signs: true,
            mint_authority: None,
            amount: 100,
            checks: vec![],
        }
    }

    pub fn token_program(mut self, program: TokenProgram) -> Self {
        self.token_program = program;
        self
    }

    pub fn destination(mut self, destination: KeyedAccount) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn minter(mut self, minter: Pubkey) -> Self {
        self.minter = Some(minter);
        self
    }

    pub fn minter_does_not_sign(mut self) -> Self {
        self.minter_signs = false;
        self
    }

    pub fn mint_authority(mut self, mint_authority: KeyedAccount) -> Self {
        self.mint_authority = Some(mint_authority);
        self
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    pub fn check(mut self, check: Check<'a>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn execute(mut self) -> MintToResult {
        let mint = self.constructed.mint.clone();
        let mint_authority = self
            .mint_authority
            .clone()
            .unwrap_or_else(|| self.constructed.mint_authority.clone());
        let destination = self.destination.clone().unwrap_or_else(|| {
            TokenAccountBuilder::new()
                .token_program(self.token_program)
                .mint(mint.key)
                .build()
        });
        let minter = self.minter.unwrap_or(self.constructed.initial_minter);

        let mut instruction = wpokt::instruction::mint(
            &wpokt::id(),
            &mint.key,
            &mint_authority.key,
            &destination.key,
            &minter,
            &self.token_program.id(),
            self.amount,
        );
        instruction.accounts[3].is_signer = self.minter_signs;

        let accounts = &[
            mint.pair(),
            mint_authority.pair(),
            destination.pair(),
            (minter, Account::default()),
            self.token_program.keyed_account(),
        ];

        if self.checks.is_empty() {
            self.checks.push(Check::success());
        }

        let result =
            self.mollusk
                .process_and_validate_instruction(&instruction, accounts, &self.checks);

        MintToResult {
            mint: KeyedAccount {
                key: mint.key,
                account: result.get_account(&mint.key).unwrap().clone(),
            },
            mint_authority: KeyedAccount {
                key: mint_authority.key,
                account: result.get_account(&mint_authority.key).unwrap().clone(),
            },
            destination: KeyedAccount {
                key: destination.key,
                account: result.get_account(&destination.key).unwrap().clone(),
            },
        }
    }
}

impl MintToResult {
    /// Carries the post-mint state forward for a follow-up mint
    pub fn into_constructed(self, initial_minter: Pubkey) -> (ConstructResult, KeyedAccount) {
        (
            ConstructResult {
                mint: self.mint,
                mint_authority: self.mint_authority,
                mint_creator: Pubkey::default(),
                initial_minter,
            },
            self.destination,
        )
    }
}
