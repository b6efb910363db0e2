//! Wrapped POKT program
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod entrypoint;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;
pub mod verification;

use {crate::error::WPoktError, solana_pubkey::Pubkey};

solana_pubkey::declare_id!("3d11MEunRpESAAEiH9Wy7m649CqPEqzsFnENsGxi5etf");

const MINT_AUTHORITY_SEED: &[u8] = br"authority";

pub(crate) fn get_mint_authority_seeds(mint: &Pubkey) -> [&[u8]; 2] {
    [MINT_AUTHORITY_SEED, mint.as_ref()]
}

pub(crate) fn get_mint_authority_signer_seeds<'a>(
    mint: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 3] {
    [MINT_AUTHORITY_SEED, mint.as_ref(), bump_seed]
}

/// Derive the mint authority address and its canonical bump seed for a
/// specific wPOKT program deployment.
///
/// Bump seeds are scanned from `u8::MAX` downward and the first one that
/// lands off the ed25519 curve is canonical. Fails with
/// [`WPoktError::NoValidAddress`] if every bump seed is exhausted.
pub fn get_mint_authority_address_with_seed_for_program(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), WPoktError> {
    Pubkey::try_find_program_address(&get_mint_authority_seeds(mint), program_id)
        .ok_or(WPoktError::NoValidAddress)
}

/// Derive the mint authority address and its canonical bump seed
pub fn get_mint_authority_address_with_seed(mint: &Pubkey) -> Result<(Pubkey, u8), WPoktError> {
    get_mint_authority_address_with_seed_for_program(mint, &id())
}

/// Derive the mint authority address for a mint. The same address holds the
/// [`MintAuthority`](state::MintAuthority) record.
pub fn get_mint_authority_address(mint: &Pubkey) -> Result<Pubkey, WPoktError> {
    get_mint_authority_address_for_program(mint, &id())
}

/// Derive the mint authority address for a mint for a specific wPOKT program
/// deployment.
pub fn get_mint_authority_address_for_program(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<Pubkey, WPoktError> {
    get_mint_authority_address_with_seed_for_program(mint, program_id).map(|(address, _)| address)
}

/// Re-derive the mint authority address from a stored bump seed. Returns
/// `None` if the seeds do not produce a valid program address.
pub(crate) fn create_mint_authority_address_for_program(
    mint: &Pubkey,
    bump_seed: u8,
    program_id: &Pubkey,
) -> Option<Pubkey> {
    let bump_seed = [bump_seed];
    Pubkey::create_program_address(
        &get_mint_authority_signer_seeds(mint, &bump_seed),
        program_id,
    )
    .ok()
}
