//! Update feed document served to auto-update clients.
//!
//! The wire shape is fixed: optional fields are always present and serialize
//! as an empty string when unset.

use serde::{Serialize, Serializer};

fn empty_if_none<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

/// One downloadable file of a platform entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedFile {
    pub url: String,
    /// Size in bytes.
    pub length: i64,
}

/// A platform build available for a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformEntry {
    /// `macosx` or `windows`
    pub name: String,
    /// `universal` or `i386`
    pub arch: String,
    pub files: Vec<FeedFile>,
}

/// One release in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseFeedItem {
    pub title: String,
    pub version: String,
    #[serde(serialize_with = "empty_if_none")]
    pub changelog: Option<String>,
    /// Publication time, RFC 2822.
    #[serde(serialize_with = "empty_if_none")]
    pub published: Option<String>,
    pub platforms: Vec<PlatformEntry>,
}

/// The whole feed for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedDocument {
    pub title: String,
    #[serde(serialize_with = "empty_if_none")]
    pub description: Option<String>,
    pub items: Vec<ReleaseFeedItem>,
}
