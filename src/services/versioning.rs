//! Release version policy.
//!
//! Releases carry `major.minor.patch` versions. A new release without an
//! explicit version gets the minor-bumped version of the game's most recent
//! release; the patch component is carried over unchanged.

use std::fmt;
use std::str::FromStr;

use crate::entity::release;
use crate::error::{AppError, AppResult};

/// Version assigned to a game's first release.
pub const INITIAL_VERSION: &str = "0.1.0";

/// A parsed `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Next minor version. Patch is kept as is.
    pub fn bump_minor(self) -> Self {
        Self {
            minor: self.minor + 1,
            ..self
        }
    }
}

impl FromStr for Version {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AppError::MalformedVersion(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(malformed());
        };

        let component = |p: &str| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            p.parse::<u64>().map_err(|_| malformed())
        };

        Ok(Self::new(
            component(*major)?,
            component(*minor)?,
            component(*patch)?,
        ))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Compute the version for a game's next release.
///
/// The most recently created release is the reference, regardless of slice
/// order. Ties on `created_at` go to the higher id.
pub fn next_version(releases: &[release::Model]) -> AppResult<String> {
    let latest = releases
        .iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    match latest {
        None => Ok(INITIAL_VERSION.to_string()),
        Some(release) => {
            let current: Version = release.version.parse()?;
            Ok(current.bump_minor().to_string())
        }
    }
}
