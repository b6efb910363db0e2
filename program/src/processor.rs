//! Program state processor

use {
    crate::{
        error::WPoktError,
        get_mint_authority_address_with_seed_for_program, get_mint_authority_signer_seeds,
        instruction::WPoktInstruction,
        state::{
            mint_authority_of, unpack_mint, unpack_token_account, validate_authority,
            MintAuthority,
        },
    },
    solana_account_info::{next_account_info, AccountInfo},
    solana_cpi::{invoke, invoke_signed},
    solana_msg::msg,
    solana_program_error::{ProgramError, ProgramResult},
    solana_pubkey::Pubkey,
    solana_rent::Rent,
    solana_system_interface::instruction::{allocate, assign},
    solana_sysvar::Sysvar,
    spl_token_2022::instruction::{mint_to, set_authority, AuthorityType},
};

/// Proof that the mint authority account was re-derived from its stored bump
/// seed and bound to the mint being minted. Only the processor can build
/// one, and only a holder can have the mint authority co-sign.
pub(crate) struct AuthoritySignature<'a> {
    mint: &'a Pubkey,
    bump_seed: [u8; 1],
}

impl<'a> AuthoritySignature<'a> {
    fn new(
        program_id: &Pubkey,
        mint_authority_account: &AccountInfo,
        mint_authority: &MintAuthority,
        mint: &'a Pubkey,
        current_mint_authority: Option<Pubkey>,
    ) -> Result<Self, ProgramError> {
        if !validate_authority(mint_authority, mint_authority_account.key, mint, program_id) {
            msg!("Mint authority account is not derived from the stored bump seed for this mint");
            return Err(WPoktError::InvalidAuthorityBinding.into());
        }
        if current_mint_authority != Some(*mint_authority_account.key) {
            msg!("Mint authority of the mint is not the program-derived address");
            return Err(WPoktError::InvalidAuthorityBinding.into());
        }
        Ok(Self {
            mint,
            bump_seed: [mint_authority.bump_seed],
        })
    }

    fn signer_seeds(&self) -> [&[u8]; 3] {
        get_mint_authority_signer_seeds(self.mint, &self.bump_seed)
    }
}

fn check_token_program(
    mint_account: &AccountInfo,
    token_program_account: &AccountInfo,
) -> ProgramResult {
    if *token_program_account.key != spl_token::id()
        && *token_program_account.key != spl_token_2022::id()
    {
        msg!("Token program is not SPL Token or SPL Token 2022");
        return Err(ProgramError::IncorrectProgramId);
    }
    if mint_account.owner != token_program_account.key {
        msg!("Mint account is not owned by the provided token program");
        return Err(WPoktError::CorruptOrUninitializedAccount.into());
    }
    Ok(())
}

/// Processes [`Construct`](enum.WPoktInstruction.html) instruction.
pub fn process_construct(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    initial_minter: Pubkey,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let mint_account = next_account_info(account_info_iter)?;
    let mint_authority_account = next_account_info(account_info_iter)?;
    let mint_creator_account = next_account_info(account_info_iter)?;
    let _system_program_account = next_account_info(account_info_iter)?;
    let token_program_account = next_account_info(account_info_iter)?;

    let (mint_authority_address, bump) =
        get_mint_authority_address_with_seed_for_program(mint_account.key, program_id)?;

    // PDA derivation validation

    if *mint_authority_account.key != mint_authority_address {
        msg!("Mint authority account address does not match expected PDA");
        return Err(WPoktError::InvalidAuthorityBinding.into());
    }

    // Exactly-once checks

    if mint_authority_account.data_len() > 0 || mint_authority_account.owner == program_id {
        msg!("Mint authority account already initialized");
        return Err(WPoktError::AlreadyConstructed.into());
    }

    check_token_program(mint_account, token_program_account)?;
    let mint = unpack_mint(&mint_account.try_borrow_data()?)?;
    let current_mint_authority = mint_authority_of(&mint);

    if current_mint_authority == Some(mint_authority_address) {
        msg!("Mint authority is already bound to the program-derived address");
        return Err(WPoktError::AlreadyConstructed.into());
    }
    if current_mint_authority != Some(*mint_creator_account.key) {
        msg!("Signer is not the current mint authority");
        return Err(WPoktError::Unauthorized.into());
    }
    if !mint_creator_account.is_signer {
        msg!("Mint creator did not sign");
        return Err(WPoktError::Unauthorized.into());
    }
    if u64::from(mint.supply) != 0 {
        msg!("Mint already has {} tokens in circulation", u64::from(mint.supply));
        return Err(WPoktError::CorruptOrUninitializedAccount.into());
    }

    let space = MintAuthority::LEN;
    let rent = Rent::get()?;
    let rent_required = rent.minimum_balance(space);
    if mint_authority_account.lamports() < rent_required {
        msg!(
            "Error: mint_authority_account requires pre-funding of {} lamports",
            rent_required
        );
        return Err(ProgramError::InsufficientFunds);
    }

    // Initialize mint authority PDA

    let bump_seed = [bump];
    let signer_seeds = get_mint_authority_signer_seeds(mint_account.key, &bump_seed);
    invoke_signed(
        &allocate(&mint_authority_address, space as u64),
        &[mint_authority_account.clone()],
        &[&signer_seeds],
    )?;
    invoke_signed(
        &assign(&mint_authority_address, program_id),
        &[mint_authority_account.clone()],
        &[&signer_seeds],
    )?;

    {
        let mut mint_authority_data = mint_authority_account.try_borrow_mut_data()?;
        let mint_authority =
            bytemuck::from_bytes_mut::<MintAuthority>(&mut mint_authority_data[..]);
        *mint_authority = MintAuthority::new(*mint_account.key, initial_minter, bump);
    }

    // Hand the mint authority over to the PDA

    invoke(
        &set_authority(
            token_program_account.key,
            mint_account.key,
            Some(&mint_authority_address),
            AuthorityType::MintTokens,
            mint_creator_account.key,
            &[],
        )?,
        &[mint_account.clone(), mint_creator_account.clone()],
    )?;

    msg!(
        "Mint {} bound to authority {} with minter {}",
        mint_account.key,
        mint_authority_address,
        initial_minter
    );

    Ok(())
}

/// Processes [`Mint`](enum.WPoktInstruction.html) instruction.
pub fn process_mint(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    if amount == 0 {
        msg!("Mint amount should be positive");
        return Err(WPoktError::ZeroAmount.into());
    }

    let account_info_iter = &mut accounts.iter();

    let mint_account = next_account_info(account_info_iter)?;
    let mint_authority_account = next_account_info(account_info_iter)?;
    let destination_account = next_account_info(account_info_iter)?;
    let minter_account = next_account_info(account_info_iter)?;
    let token_program_account = next_account_info(account_info_iter)?;

    if mint_authority_account.owner != program_id {
        msg!("Mint authority account is not owned by this program");
        return Err(WPoktError::InvalidAuthorityBinding.into());
    }

    check_token_program(mint_account, token_program_account)?;
    let mint = unpack_mint(&mint_account.try_borrow_data()?)?;

    let mint_authority_data = mint_authority_account.try_borrow_data()?;
    let mint_authority = MintAuthority::unpack(&mint_authority_data)?;

    let authority_signature = AuthoritySignature::new(
        program_id,
        mint_authority_account,
        mint_authority,
        mint_account.key,
        mint_authority_of(&mint),
    )?;

    if *minter_account.key != mint_authority.minter || !minter_account.is_signer {
        msg!("Signer is not the recorded minter");
        return Err(WPoktError::Unauthorized.into());
    }

    let destination = unpack_token_account(&destination_account.try_borrow_data()?)?;
    if destination.mint != *mint_account.key {
        msg!("Destination token account does not belong to the mint");
        return Err(WPoktError::CorruptOrUninitializedAccount.into());
    }

    let supply = u64::from(mint.supply);
    if supply.checked_add(amount).is_none()
        || u64::from(destination.amount).checked_add(amount).is_none()
    {
        msg!("Minting {} on top of supply {} overflows", amount, supply);
        return Err(WPoktError::Overflow.into());
    }

    drop(mint_authority_data);

    invoke_signed(
        &mint_to(
            token_program_account.key,
            mint_account.key,
            destination_account.key,
            mint_authority_account.key,
            &[],
            amount,
        )?,
        &[
            mint_account.clone(),
            destination_account.clone(),
            mint_authority_account.clone(),
        ],
        &[&authority_signature.signer_seeds()],
    )?;

    Ok(())
}

/// Instruction processor
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    input: &[u8],
) -> ProgramResult {
    match WPoktInstruction::unpack(input)? {
        WPoktInstruction::Construct { initial_minter } => {
            msg!("Instruction: Construct");
            process_construct(program_id, accounts, initial_minter)
        }
        WPoktInstruction::Mint { amount } => {
            msg!("Instruction: Mint");
            process_mint(program_id, accounts, amount)
        }
    }
}
