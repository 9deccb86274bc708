//! Public identifier generation.
//!
//! Identifiers are 24 lowercase hex characters drawn from the thread-local
//! CSPRNG. They are exposed publicly instead of sequential primary keys, so
//! they reveal neither creation order nor row counts. The generator does not
//! guarantee uniqueness; the unique column does, and [`assign_unique`] retries
//! when a fresh identifier collides.

use std::future::Future;

use tracing::warn;

use crate::error::{AppError, AppResult};

/// Random bytes per identifier.
pub const ID_BYTES: usize = 12;
/// Length of the hex-encoded identifier.
pub const ID_LENGTH: usize = ID_BYTES * 2;
/// Fresh identifiers tried before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Generate a new random identifier.
pub fn generate_id() -> String {
    hex::encode(rand::random::<[u8; ID_BYTES]>())
}

/// Check that a string has the identifier shape (24 lowercase hex chars).
pub fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == ID_LENGTH
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Insert a row under a freshly generated identifier, retrying on collisions.
///
/// `insert` performs the write with the candidate identifier. When it fails
/// with a uniqueness violation and `is_taken` confirms the candidate already
/// exists, a new identifier is drawn. Other failures, including conflicts on
/// other unique columns, are returned unchanged.
pub async fn assign_unique<T, G, I, IFut, C, CFut>(
    mut next_id: G,
    mut insert: I,
    mut is_taken: C,
) -> AppResult<T>
where
    G: FnMut() -> String,
    I: FnMut(String) -> IFut,
    IFut: Future<Output = AppResult<T>>,
    C: FnMut(String) -> CFut,
    CFut: Future<Output = AppResult<bool>>,
{
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let candidate = next_id();

        match insert(candidate.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_conflict() && is_taken(candidate.clone()).await? => {
                warn!(
                    attempt,
                    identifier = %candidate,
                    "Generated identifier already in use, retrying"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(AppError::IdentifierExhausted(MAX_ID_ATTEMPTS))
}

/// Insert a row under a caller-supplied identifier, or a generated one.
///
/// A preset identifier must have the identifier shape and is inserted once;
/// a conflict on it is reported to the caller rather than retried.
pub async fn assign_identifier<T, I, IFut, C, CFut>(
    preset: Option<&str>,
    mut insert: I,
    is_taken: C,
) -> AppResult<T>
where
    I: FnMut(String) -> IFut,
    IFut: Future<Output = AppResult<T>>,
    C: FnMut(String) -> CFut,
    CFut: Future<Output = AppResult<bool>>,
{
    match preset {
        Some(id) if !is_valid_id(id) => Err(AppError::InvalidInput(format!(
            "Identifier '{}' must be {} lowercase hex characters",
            id, ID_LENGTH
        ))),
        Some(id) => insert(id.to_string()).await,
        None => assign_unique(generate_id, insert, is_taken).await,
    }
}
