//! Program state

use {
    crate::{create_mint_authority_address_for_program, error::WPoktError},
    bytemuck::{Pod, Zeroable},
    solana_program_error::ProgramError,
    solana_pubkey::Pubkey,
    spl_pod::primitives::PodBool,
    spl_token_2022::{
        extension::PodStateWithExtensions,
        pod::{PodAccount, PodMint},
    },
};

/// Largest mint precision for which one whole token still fits in a `u64`
/// supply (`10^19 < u64::MAX`).
pub const MAX_DECIMALS: u8 = 19;

/// Mint authority
///
/// Lives at `get_mint_authority_address(mint)`. The same address is set as
/// the mint authority of `mint`, so only this program can sign supply
/// increases, and only for the minter recorded here.
///
/// The layout is fixed: `mint` (32), `minter` (32), `bump_seed` (1),
/// `is_initialized` (1).
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MintAuthority {
    /// Mint governed by this authority
    pub mint: Pubkey,
    /// Address permitted to request minting
    pub minter: Pubkey,
    /// Bump seed of the derived authority address
    pub bump_seed: u8,
    /// Set once construction has completed
    pub is_initialized: PodBool,
}

impl MintAuthority {
    /// Serialized size of the record
    pub const LEN: usize = std::mem::size_of::<Self>();

    /// Creates an initialized record
    pub fn new(mint: Pubkey, minter: Pubkey, bump_seed: u8) -> Self {
        Self {
            mint,
            minter,
            bump_seed,
            is_initialized: PodBool::from_bool(true),
        }
    }

    /// Reads an initialized record from account data
    pub fn unpack(data: &[u8]) -> Result<&Self, ProgramError> {
        let state = bytemuck::try_from_bytes::<Self>(data)
            .map_err(|_| WPoktError::CorruptOrUninitializedAccount)?;
        if !bool::from(state.is_initialized) {
            return Err(WPoktError::CorruptOrUninitializedAccount.into());
        }
        Ok(state)
    }
}

/// Checks that `state` governs `expected_mint` and that `address`, the
/// account holding it, is the one derived for that mint from the stored bump
/// seed.
pub fn validate_authority(
    state: &MintAuthority,
    address: &Pubkey,
    expected_mint: &Pubkey,
    program_id: &Pubkey,
) -> bool {
    bool::from(state.is_initialized)
        && state.mint == *expected_mint
        && create_mint_authority_address_for_program(expected_mint, state.bump_seed, program_id)
            .is_some_and(|derived| derived == *address)
}

/// Checks that a mint is initialized and its precision is in range. Supply
/// is a `u64` and in range by construction.
pub fn validate_mint(mint: &PodMint) -> bool {
    bool::from(mint.is_initialized) && mint.decimals <= MAX_DECIMALS
}

/// Current mint authority of a mint, if any
pub fn mint_authority_of(mint: &PodMint) -> Option<Pubkey> {
    mint.mint_authority.ok_or(()).ok()
}

/// Reads a valid SPL Token or Token-2022 mint from account data
pub fn unpack_mint(data: &[u8]) -> Result<PodMint, ProgramError> {
    let mint = PodStateWithExtensions::<PodMint>::unpack(data)
        .map_err(|_| WPoktError::CorruptOrUninitializedAccount)?
        .base;
    if !validate_mint(mint) {
        return Err(WPoktError::CorruptOrUninitializedAccount.into());
    }
    Ok(*mint)
}

/// Reads an initialized SPL Token or Token-2022 token account from account
/// data
pub fn unpack_token_account(data: &[u8]) -> Result<PodAccount, ProgramError> {
    PodStateWithExtensions::<PodAccount>::unpack(data)
        .map(|state| *state.base)
        .map_err(|_| WPoktError::CorruptOrUninitializedAccount.into())
}
