//! Domain models and request types for the game catalog.

pub mod appcast;
pub mod asset;
pub mod crash_report;
pub mod game;
pub mod release;

// Re-export commonly used types
pub use appcast::{FeedDocument, FeedFile, PlatformEntry, ReleaseFeedItem};
pub use asset::{Platform, UploadedFile};
pub use crash_report::NewCrashReport;
pub use game::{DownloadLink, GameUpdate, NewGame};
pub use release::{DEFAULT_LOVE_VERSION, NewRelease, ReleaseUpdate};

use crate::error::{AppError, AppResult};

/// Column length limits shared by validation and the schema.
pub mod limits {
    pub const USERNAME: usize = 150;
    pub const NAME: usize = 128;
    pub const SLUG: usize = 128;
    pub const VERSION: usize = 14;
    pub const OS: usize = 14;
    pub const DISTINCT_ID: usize = 24;
    pub const TAG: usize = 20;
    pub const BLOB_PATH: usize = 200;
}

/// Reject values longer than a column allows.
pub fn check_length(field: &str, value: &str, max: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(AppError::InvalidInput(format!(
            "{} is {} characters long; at most {} allowed",
            field, len, max
        )));
    }
    Ok(())
}

/// Reject empty or whitespace-only values.
pub fn check_required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(())
}

/// Slugs are ASCII letters, digits, hyphens and underscores.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
