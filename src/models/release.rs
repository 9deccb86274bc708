//! Release request types.

use serde::Deserialize;

use super::{check_length, check_required, limits};
use crate::error::{AppError, AppResult};

/// LÖVE runtime version assumed when a release does not name one.
pub const DEFAULT_LOVE_VERSION: &str = "0.8.0";

/// Fields for publishing a release.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRelease {
    /// Explicit version; the next minor version is used when absent.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub love_version: Option<String>,
    #[serde(default)]
    pub changelog: Option<String>,
    /// Preset public identifier, for imports.
    #[serde(default)]
    pub uuid: Option<String>,
}

impl NewRelease {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref version) = self.version {
            check_required("version", version)?;
            check_length("version", version, limits::VERSION)?;
            check_path_segment(version)?;
        }
        if let Some(ref love_version) = self.love_version {
            check_required("love_version", love_version)?;
            check_length("love_version", love_version, limits::VERSION)?;
        }
        Ok(())
    }

    pub fn love_version(&self) -> &str {
        self.love_version.as_deref().unwrap_or(DEFAULT_LOVE_VERSION)
    }
}

/// Versions become a segment of blob keys, so they must not act as a path.
fn check_path_segment(version: &str) -> AppResult<()> {
    if version.contains(['/', '\\']) || version == "." || version == ".." {
        return Err(AppError::InvalidInput(format!(
            "version '{}' must not contain path separators",
            version
        )));
    }
    Ok(())
}

/// Changes to release metadata.
///
/// `changelog: Some(None)` clears the changelog.
#[derive(Debug, Clone, Default)]
pub struct ReleaseUpdate {
    pub love_version: Option<String>,
    pub changelog: Option<Option<String>>,
}

impl ReleaseUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref love_version) = self.love_version {
            check_required("love_version", love_version)?;
            check_length("love_version", love_version, limits::VERSION)?;
        }
        Ok(())
    }
}
