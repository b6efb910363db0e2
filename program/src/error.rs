//! Error types

use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive,
    solana_decode_error::DecodeError,
    solana_msg::msg,
    solana_program_error::ProgramError,
    thiserror::Error,
};

/// Errors that may be returned by the wPOKT program.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq, FromPrimitive)]
pub enum WPoktError {
    // 0
    /// Mint authority has already been bound to the program-derived address
    #[error("Mint authority has already been bound to the program-derived address")]
    AlreadyConstructed,
    /// Signer is not permitted to perform this operation
    #[error("Signer is not permitted to perform this operation")]
    Unauthorized,
    /// Mint authority account does not match the address derived for the mint
    #[error("Mint authority account does not match the address derived for the mint")]
    InvalidAuthorityBinding,
    /// Account data is corrupt or has not been initialized
    #[error("Account data is corrupt or has not been initialized")]
    CorruptOrUninitializedAccount,
    /// Mint amount would overflow the mint supply
    #[error("Mint amount would overflow the mint supply")]
    Overflow,

    // 5
    /// Mint amount should be positive
    #[error("Mint amount should be positive")]
    ZeroAmount,
    /// No bump seed produces a valid program-derived address
    #[error("No bump seed produces a valid program-derived address")]
    NoValidAddress,
    /// Ledger state is temporarily unavailable, the request may be retried
    #[error("Ledger state is temporarily unavailable, the request may be retried")]
    TransientUnavailable,
}

impl From<WPoktError> for ProgramError {
    fn from(e: WPoktError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for WPoktError {
    fn type_of() -> &'static str {
        "WPoktError"
    }
}

impl WPoktError {
    /// Recover a [`WPoktError`] from a program error, if it carries one
    pub fn from_program_error(error: &ProgramError) -> Option<Self> {
        match error {
            ProgramError::Custom(code) => Self::from_u32(*code),
            _ => None,
        }
    }
}

/// Logs program errors, decoding custom codes into [`WPoktError`] messages
pub fn log_error(error: &ProgramError) {
    match WPoktError::from_program_error(error) {
        Some(e) => msg!("Error: {}", e),
        None => msg!("Error: {}", error),
    }
}
