//! Crash report ingestion payload.

use serde::Deserialize;

use super::{check_length, limits};
use crate::error::AppResult;

/// A crash report as sent by a game client.
///
/// Only the traceback is required; the other fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCrashReport {
    pub traceback: String,
    #[serde(default)]
    pub distinct_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub os: String,
}

impl NewCrashReport {
    pub fn validate(&self) -> AppResult<()> {
        check_length("distinct_id", &self.distinct_id, limits::DISTINCT_ID)?;
        check_length("version", &self.version, limits::VERSION)?;
        check_length("os", &self.os, limits::OS)?;
        Ok(())
    }
}
