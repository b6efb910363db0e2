//! Program instructions

use {
    solana_instruction::{AccountMeta, Instruction},
    solana_program_error::ProgramError,
    solana_pubkey::Pubkey,
    std::convert::TryInto,
};

/// Instructions supported by the wPOKT program
#[derive(Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum WPoktInstruction {
    /// Bind the mint authority to the program-derived address and record the
    /// initial minter. Succeeds exactly once per mint. Assumes the caller has
    /// pre-funded the mint authority account for rent.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[w]` Mint, must be initialized and still have the creator as its
    ///    mint authority
    /// 1. `[w]` Unallocated mint authority account to create (PDA), address
    ///    must be: `get_mint_authority_address(mint_address)`
    /// 2. `[s]` Current mint authority of the mint (the mint creator)
    /// 3. `[]` System program
    /// 4. `[]` SPL Token program for the mint
    Construct {
        /// Address permitted to request minting
        initial_minter: Pubkey,
    },

    /// Mint tokens
    ///
    /// Validate the signer against the recorded minter and mint `amount`
    /// tokens into the destination account, co-signed by the
    /// program-derived mint authority.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[w]` Mint
    /// 1. `[]` Mint authority account, address must be:
    ///    `get_mint_authority_address(mint_address)`
    /// 2. `[w]` Destination token account
    /// 3. `[s]` Minter recorded in the mint authority account
    /// 4. `[]` SPL Token program for the mint
    Mint {
        /// little-endian `u64` representing the amount to mint
        amount: u64,
    },
}

impl WPoktInstruction {
    /// Packs a [`WPoktInstruction`](enum.WPoktInstruction.html) into a byte
    /// array.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        match self {
            WPoktInstruction::Construct { initial_minter } => {
                buf.push(0);
                buf.extend_from_slice(initial_minter.as_ref());
            }
            WPoktInstruction::Mint { amount } => {
                buf.push(1);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
        }
        buf
    }

    /// Unpacks a byte array into a
    /// [`WPoktInstruction`](enum.WPoktInstruction.html).
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        match input.split_first() {
            Some((&0, rest)) if rest.len() == 32 => {
                let initial_minter = Pubkey::try_from(rest)
                    .map_err(|_| ProgramError::InvalidInstructionData)?;
                Ok(WPoktInstruction::Construct { initial_minter })
            }
            Some((&1, rest)) if rest.len() == 8 => {
                let amount = rest
                    .try_into()
                    .map(u64::from_le_bytes)
                    .map_err(|_| ProgramError::InvalidInstructionData)?;
                Ok(WPoktInstruction::Mint { amount })
            }
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Creates `Construct` instruction.
pub fn construct(
    program_id: &Pubkey,
    mint_address: &Pubkey,
    mint_authority_address: &Pubkey,
    mint_creator_address: &Pubkey,
    token_program_id: &Pubkey,
    initial_minter: &Pubkey,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*mint_address, false),
        AccountMeta::new(*mint_authority_address, false),
        AccountMeta::new_readonly(*mint_creator_address, true),
        AccountMeta::new_readonly(solana_system_interface::program::id(), false),
        AccountMeta::new_readonly(*token_program_id, false),
    ];
    let data = WPoktInstruction::Construct {
        initial_minter: *initial_minter,
    }
    .pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `Mint` instruction.
pub fn mint(
    program_id: &Pubkey,
    mint_address: &Pubkey,
    mint_authority_address: &Pubkey,
    destination_address: &Pubkey,
    minter_address: &Pubkey,
    token_program_id: &Pubkey,
    amount: u64,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*mint_address, false),
        AccountMeta::new_readonly(*mint_authority_address, false),
        AccountMeta::new(*destination_address, false),
        AccountMeta::new_readonly(*minter_address, true),
        AccountMeta::new_readonly(*token_program_id, false),
    ];
    let data = WPoktInstruction::Mint { amount }.pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}
