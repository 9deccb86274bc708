//! Game request types.

use serde::{Deserialize, Serialize};

use super::{check_length, check_required, is_valid_slug, limits};
use crate::error::{AppError, AppResult};

/// Fields for registering a game.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub slug: String,
    pub framework_id: i32,
    #[serde(default)]
    pub is_public: bool,
    /// Preset public identifier, for imports. Generated when absent.
    #[serde(default)]
    pub uuid: Option<String>,
}

impl NewGame {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, framework_id: i32) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            framework_id,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        check_required("name", &self.name)?;
        check_length("name", &self.name, limits::NAME)?;
        check_length("slug", &self.slug, limits::SLUG)?;

        if !is_valid_slug(&self.slug) {
            return Err(AppError::InvalidInput(format!(
                "Invalid slug '{}'. Use letters, numbers, hyphens and underscores",
                self.slug
            )));
        }

        Ok(())
    }
}

/// Changes to a game's mutable fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameUpdate {
    pub name: Option<String>,
    pub framework_id: Option<i32>,
    pub is_public: Option<bool>,
}

impl GameUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref name) = self.name {
            check_required("name", name)?;
            check_length("name", name, limits::NAME)?;
        }
        Ok(())
    }
}

/// A labeled per-platform download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
}
