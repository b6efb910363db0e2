//! Read-only checks that on-chain state matches the post-conditions of
//! `Construct` and `Mint`.
//!
//! Every check re-fetches the accounts it needs through the supplied fetch
//! function, so results never depend on what the submitter reported.

use {
    crate::{
        error::WPoktError,
        get_mint_authority_address_with_seed_for_program,
        state::{
            mint_authority_of, unpack_mint, unpack_token_account, validate_authority,
            MintAuthority,
        },
    },
    solana_account::Account,
    solana_pubkey::Pubkey,
    std::future::Future,
    thiserror::Error,
};

/// Error returned by an account fetch function when the ledger could not be
/// reached
pub type AccountFetchError = Box<dyn std::error::Error + Send + Sync>;

/// Reasons a verification can fail
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Fetching account state failed; the check may be retried
    #[error("Ledger state unavailable: {0}")]
    TransientUnavailable(AccountFetchError),
    /// Account does not exist
    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),
    /// Account is owned by an unexpected program
    #[error("Account {address} is owned by {actual}, expected {expected}")]
    UnexpectedOwner {
        /// Account checked
        address: Pubkey,
        /// Owner required
        expected: Pubkey,
        /// Owner found
        actual: Pubkey,
    },
    /// Account data failed its validity predicate
    #[error("Account {0} is corrupt or uninitialized")]
    CorruptOrUninitialized(Pubkey),
    /// No program-derived address exists for the mint
    #[error("Cannot derive mint authority for {0}")]
    NoValidAddress(Pubkey),
    /// Mint authority is not the program-derived address
    #[error("Mint {mint} has mint authority {actual:?}, expected {expected}")]
    AuthorityNotBound {
        /// Mint checked
        mint: Pubkey,
        /// Derived authority address
        expected: Pubkey,
        /// Mint authority found
        actual: Option<Pubkey>,
    },
    /// Mint authority is already the program-derived address
    #[error("Mint {mint} is already bound to mint authority {mint_authority}")]
    AlreadyConstructed {
        /// Mint checked
        mint: Pubkey,
        /// Derived authority address
        mint_authority: Pubkey,
    },
    /// Mint has supply in circulation before construction
    #[error("Mint {mint} already has supply {supply}")]
    SupplyInCirculation {
        /// Mint checked
        mint: Pubkey,
        /// Supply found
        supply: u64,
    },
    /// Mint authority record does not belong to the mint or sits at the
    /// wrong address
    #[error("Mint authority record at {address} is not bound to mint {mint}")]
    InvalidAuthorityBinding {
        /// Address of the record
        address: Pubkey,
        /// Mint checked
        mint: Pubkey,
    },
    /// Recorded minter differs from the expected one
    #[error("Recorded minter is {actual}, expected {expected}")]
    MinterMismatch {
        /// Minter expected by the caller
        expected: Pubkey,
        /// Minter recorded on chain
        actual: Pubkey,
    },
    /// Token account balance differs from the expected one
    #[error("Token account {address} holds {actual}, expected {expected}")]
    AmountMismatch {
        /// Token account checked
        address: Pubkey,
        /// Balance expected by the caller
        expected: u64,
        /// Balance found
        actual: u64,
    },
    /// Mint supply differs from the expected one
    #[error("Mint {mint} has supply {actual}, expected {expected}")]
    SupplyMismatch {
        /// Mint checked
        mint: Pubkey,
        /// Supply expected by the caller
        expected: u64,
        /// Supply found
        actual: u64,
    },
}

impl VerificationError {
    /// The program error kind this failure corresponds to
    pub fn kind(&self) -> WPoktError {
        match self {
            Self::TransientUnavailable(_) => WPoktError::TransientUnavailable,
            Self::AccountNotFound(_)
            | Self::UnexpectedOwner { .. }
            | Self::CorruptOrUninitialized(_)
            | Self::AmountMismatch { .. }
            | Self::SupplyMismatch { .. }
            | Self::SupplyInCirculation { .. } => WPoktError::CorruptOrUninitializedAccount,
            Self::NoValidAddress(_) => WPoktError::NoValidAddress,
            Self::AuthorityNotBound { .. } | Self::InvalidAuthorityBinding { .. } => {
                WPoktError::InvalidAuthorityBinding
            }
            Self::AlreadyConstructed { .. } => WPoktError::AlreadyConstructed,
            Self::MinterMismatch { .. } => WPoktError::Unauthorized,
        }
    }

    /// Whether the failure came from the ledger being unreachable rather than
    /// from the state itself
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientUnavailable(_))
    }
}

/// State of a mint whose authority is bound to the program-derived address
#[derive(Clone, Debug, PartialEq)]
pub struct ConstructedState {
    /// Mint address
    pub mint: Pubkey,
    /// Derived mint authority address
    pub mint_authority_address: Pubkey,
    /// Mint authority record
    pub mint_authority: MintAuthority,
    /// Current supply
    pub supply: u64,
    /// Mint precision
    pub decimals: u8,
    /// Token program owning the mint
    pub token_program: Pubkey,
}

/// State of a mint that can still be constructed
#[derive(Clone, Debug, PartialEq)]
pub struct PendingState {
    /// Mint address
    pub mint: Pubkey,
    /// Address the mint authority will be bound to
    pub mint_authority_address: Pubkey,
    /// Bump seed of the derived address
    pub bump_seed: u8,
    /// Mint authority the creator still holds
    pub current_mint_authority: Option<Pubkey>,
    /// Mint precision
    pub decimals: u8,
}

/// State of a token account holding minted tokens
#[derive(Clone, Debug, PartialEq)]
pub struct MintedState {
    /// Token account address
    pub token_account: Pubkey,
    /// Token account balance
    pub amount: u64,
    /// Constructed mint of the token account
    pub constructed: ConstructedState,
}

async fn fetch_account<F, Fut>(
    fetch_account_fn: &F,
    address: &Pubkey,
) -> Result<Option<Account>, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    fetch_account_fn(*address)
        .await
        .map_err(VerificationError::TransientUnavailable)
}

async fn fetch_existing_account<F, Fut>(
    fetch_account_fn: &F,
    address: &Pubkey,
) -> Result<Account, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    fetch_account(fetch_account_fn, address)
        .await?
        .ok_or(VerificationError::AccountNotFound(*address))
}

fn check_token_program_owner(
    address: &Pubkey,
    account: &Account,
) -> Result<(), VerificationError> {
    if account.owner != spl_token::id() && account.owner != spl_token_2022::id() {
        return Err(VerificationError::UnexpectedOwner {
            address: *address,
            expected: spl_token::id(),
            actual: account.owner,
        });
    }
    Ok(())
}

fn derive_mint_authority(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), VerificationError> {
    get_mint_authority_address_with_seed_for_program(mint, program_id)
        .map_err(|_| VerificationError::NoValidAddress(*mint))
}

async fn fetch_constructed<F, Fut>(
    fetch_account_fn: &F,
    program_id: &Pubkey,
    mint_address: &Pubkey,
) -> Result<ConstructedState, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    let mint_account = fetch_existing_account(fetch_account_fn, mint_address).await?;
    check_token_program_owner(mint_address, &mint_account)?;
    let mint = unpack_mint(&mint_account.data)
        .map_err(|_| VerificationError::CorruptOrUninitialized(*mint_address))?;

    let (mint_authority_address, _) = derive_mint_authority(mint_address, program_id)?;
    let current_mint_authority = mint_authority_of(&mint);
    if current_mint_authority != Some(mint_authority_address) {
        return Err(VerificationError::AuthorityNotBound {
            mint: *mint_address,
            expected: mint_authority_address,
            actual: current_mint_authority,
        });
    }

    let mint_authority_account =
        fetch_existing_account(fetch_account_fn, &mint_authority_address).await?;
    if mint_authority_account.owner != *program_id {
        return Err(VerificationError::UnexpectedOwner {
            address: mint_authority_address,
            expected: *program_id,
            actual: mint_authority_account.owner,
        });
    }
    let mint_authority = *MintAuthority::unpack(&mint_authority_account.data)
        .map_err(|_| VerificationError::CorruptOrUninitialized(mint_authority_address))?;
    if !validate_authority(
        &mint_authority,
        &mint_authority_address,
        mint_address,
        program_id,
    ) {
        return Err(VerificationError::InvalidAuthorityBinding {
            address: mint_authority_address,
            mint: *mint_address,
        });
    }

    Ok(ConstructedState {
        mint: *mint_address,
        mint_authority_address,
        mint_authority,
        supply: u64::from(mint.supply),
        decimals: mint.decimals,
        token_program: mint_account.owner,
    })
}

/// Confirms that `mint_address` exists, is valid, and has not been
/// constructed yet: its mint authority is not the derived address, no mint
/// authority record exists, and nothing has been minted.
pub async fn verify_ready_for_construction<F, Fut>(
    fetch_account_fn: F,
    program_id: &Pubkey,
    mint_address: &Pubkey,
) -> Result<PendingState, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    let mint_account = fetch_existing_account(&fetch_account_fn, mint_address).await?;
    check_token_program_owner(mint_address, &mint_account)?;
    let mint = unpack_mint(&mint_account.data)
        .map_err(|_| VerificationError::CorruptOrUninitialized(*mint_address))?;

    let (mint_authority_address, bump_seed) = derive_mint_authority(mint_address, program_id)?;
    let current_mint_authority = mint_authority_of(&mint);
    if current_mint_authority == Some(mint_authority_address) {
        return Err(VerificationError::AlreadyConstructed {
            mint: *mint_address,
            mint_authority: mint_authority_address,
        });
    }

    let mint_authority_account =
        fetch_account(&fetch_account_fn, &mint_authority_address).await?;
    if mint_authority_account
        .is_some_and(|account| !account.data.is_empty() || account.owner == *program_id)
    {
        return Err(VerificationError::AlreadyConstructed {
            mint: *mint_address,
            mint_authority: mint_authority_address,
        });
    }

    let supply = u64::from(mint.supply);
    if supply != 0 {
        return Err(VerificationError::SupplyInCirculation {
            mint: *mint_address,
            supply,
        });
    }

    Ok(PendingState {
        mint: *mint_address,
        mint_authority_address,
        bump_seed,
        current_mint_authority,
        decimals: mint.decimals,
    })
}

/// Confirms that `mint_address` has completed construction: its mint
/// authority is the derived address, the record at that address governs the
/// mint, and the recorded minter is `expected_minter`.
pub async fn verify_constructed<F, Fut>(
    fetch_account_fn: F,
    program_id: &Pubkey,
    mint_address: &Pubkey,
    expected_minter: &Pubkey,
) -> Result<ConstructedState, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    let constructed = fetch_constructed(&fetch_account_fn, program_id, mint_address).await?;
    if constructed.mint_authority.minter != *expected_minter {
        return Err(VerificationError::MinterMismatch {
            expected: *expected_minter,
            actual: constructed.mint_authority.minter,
        });
    }
    Ok(constructed)
}

/// Confirms that `token_account` holds `expected_amount` tokens of a mint
/// that has completed construction.
pub async fn verify_minted<F, Fut>(
    fetch_account_fn: F,
    program_id: &Pubkey,
    token_account: &Pubkey,
    expected_amount: u64,
) -> Result<MintedState, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    let account = fetch_existing_account(&fetch_account_fn, token_account).await?;
    check_token_program_owner(token_account, &account)?;
    let token = unpack_token_account(&account.data)
        .map_err(|_| VerificationError::CorruptOrUninitialized(*token_account))?;

    let amount = u64::from(token.amount);
    if amount != expected_amount {
        return Err(VerificationError::AmountMismatch {
            address: *token_account,
            expected: expected_amount,
            actual: amount,
        });
    }

    let constructed = fetch_constructed(&fetch_account_fn, program_id, &token.mint).await?;
    if account.owner != constructed.token_program {
        return Err(VerificationError::UnexpectedOwner {
            address: *token_account,
            expected: constructed.token_program,
            actual: account.owner,
        });
    }
    Ok(MintedState {
        token_account: *token_account,
        amount,
        constructed,
    })
}

/// Confirms that a constructed mint's supply equals `expected_supply`.
pub async fn verify_supply<F, Fut>(
    fetch_account_fn: F,
    program_id: &Pubkey,
    mint_address: &Pubkey,
    expected_supply: u64,
) -> Result<ConstructedState, VerificationError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = Result<Option<Account>, AccountFetchError>>,
{
    let constructed = fetch_constructed(&fetch_account_fn, program_id, mint_address).await?;
    if constructed.supply != expected_supply {
        return Err(VerificationError::SupplyMismatch {
            mint: *mint_address,
            expected: expected_supply,
            actual: constructed.supply,
        });
    }
    Ok(constructed)
}
