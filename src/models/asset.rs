//! Platform tags and uploaded files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Download platform, mapped to the asset tag its builds are stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Osx,
}

impl Platform {
    /// Platforms in the order download links are listed.
    pub const ALL: [Platform; 2] = [Platform::Windows, Platform::Osx];

    /// Asset tag holding this platform's build.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Windows => "exe",
            Self::Osx => "osx",
        }
    }

    /// Path segment used in download URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Osx => "osx",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Osx => "OSX",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A file received from an uploader.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied name; only its last path component is kept.
    pub filename: String,
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
            content_type: None,
        }
    }

    /// Final path component of the client filename.
    ///
    /// Both `/` and `\` separate components.
    pub fn basename(&self) -> &str {
        self.filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.filename)
    }

    /// Lowercased extension of the basename, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.basename();
        name.rfind('.')
            .filter(|&i| i > 0 && i + 1 < name.len())
            .map(|i| name[i + 1..].to_lowercase())
    }
}
