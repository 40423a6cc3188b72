//! Asset and archive wrappers.
//!
//! Assets and archives describe file-like content shipped to the engine
//! alongside resource inputs: a local file path, inline text, a remote URI,
//! or (for archives) a named map of nested assets.
//!
//! A wrapper reconstructed from a malformed wire value is marked *invalid*;
//! it can be passed around freely, but marshaling it fails.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
enum AssetSource {
    File(String),
    Text(String),
    Remote(String),
    Invalid,
}

/// Content addressed by a local file path, inline text, or a remote URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    source: AssetSource,
}

impl Asset {
    /// Creates an asset backed by a local file.
    #[must_use]
    pub fn from_file(path: impl Into<String>) -> Self {
        Self {
            source: AssetSource::File(path.into()),
        }
    }

    /// Creates an asset backed by inline text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: AssetSource::Text(text.into()),
        }
    }

    /// Creates an asset backed by a remote URI.
    #[must_use]
    pub fn from_remote(uri: impl Into<String>) -> Self {
        Self {
            source: AssetSource::Remote(uri.into()),
        }
    }

    /// Creates an invalid asset, standing in for a wire value that could
    /// not be reconstructed.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            source: AssetSource::Invalid,
        }
    }

    /// Whether this asset was marked invalid at construction.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self.source, AssetSource::Invalid)
    }

    /// The local file path, if file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match &self.source {
            AssetSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// The inline text, if text-backed.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.source {
            AssetSource::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The remote URI, if remote-backed.
    #[must_use]
    pub fn remote(&self) -> Option<&str> {
        match &self.source {
            AssetSource::Remote(uri) => Some(uri),
            _ => None,
        }
    }
}

/// Either an asset or a nested archive; the entry type of an assets-backed
/// archive.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetOrArchive {
    /// A single asset entry.
    Asset(Asset),
    /// A nested archive entry.
    Archive(Archive),
}

#[derive(Clone, Debug, PartialEq)]
enum ArchiveSource {
    File(String),
    Remote(String),
    Assets(BTreeMap<String, AssetOrArchive>),
    Invalid,
}

/// A collection of assets addressed by a local path, a remote URI, or an
/// explicit named map of entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Archive {
    source: ArchiveSource,
}

impl Archive {
    /// Creates an archive backed by a local file.
    #[must_use]
    pub fn from_file(path: impl Into<String>) -> Self {
        Self {
            source: ArchiveSource::File(path.into()),
        }
    }

    /// Creates an archive backed by a remote URI.
    #[must_use]
    pub fn from_remote(uri: impl Into<String>) -> Self {
        Self {
            source: ArchiveSource::Remote(uri.into()),
        }
    }

    /// Creates an archive from a named map of assets and nested archives.
    #[must_use]
    pub fn from_assets(assets: BTreeMap<String, AssetOrArchive>) -> Self {
        Self {
            source: ArchiveSource::Assets(assets),
        }
    }

    /// Creates an invalid archive, standing in for a wire value that could
    /// not be reconstructed.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            source: ArchiveSource::Invalid,
        }
    }

    /// Whether this archive was marked invalid at construction.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self.source, ArchiveSource::Invalid)
    }

    /// The local file path, if file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match &self.source {
            ArchiveSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// The remote URI, if remote-backed.
    #[must_use]
    pub fn remote(&self) -> Option<&str> {
        match &self.source {
            ArchiveSource::Remote(uri) => Some(uri),
            _ => None,
        }
    }

    /// The named entries, if assets-backed.
    #[must_use]
    pub fn assets(&self) -> Option<&BTreeMap<String, AssetOrArchive>> {
        match &self.source {
            ArchiveSource::Assets(assets) => Some(assets),
            _ => None,
        }
    }
}
