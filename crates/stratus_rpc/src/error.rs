//! Error types for the wire protocol layer.

use semver::Version;
use stratus_core::error::OutputError;

/// Error returned by a resource constructor invoked during reference
/// resolution.
pub type ConstructError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while marshaling inputs into wire values.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    /// An output was encountered with `error_on_output` set. Implicitly
    /// awaiting would be unsound in that context, so the caller must apply
    /// over the output instead.
    #[error("cannot marshal an output value; use `apply` to access its value")]
    OutputNotAllowed,

    /// The asset was marked invalid at construction.
    #[error("invalid asset")]
    InvalidAsset,

    /// The archive was marked invalid at construction.
    #[error("invalid archive")]
    InvalidArchive,

    /// Top-level inputs must be a record or a string-keyed map.
    #[error("cannot marshal inputs that are not a record or map, saw {0}")]
    UnsupportedShape(&'static str),

    /// Awaiting an output failed because its producer rejected it.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Wraps a nested failure with the top-level property being marshaled.
    #[error("awaiting input property '{property}': {source}")]
    Property {
        /// The top-level property name.
        property: String,
        /// The underlying failure.
        #[source]
        source: Box<MarshalError>,
    },
}

impl MarshalError {
    pub(crate) fn property(property: impl Into<String>, source: MarshalError) -> Self {
        MarshalError::Property {
            property: property.into(),
            source: Box::new(source),
        }
    }
}

/// Errors produced while unmarshaling wire values.
#[derive(Debug, thiserror::Error)]
pub enum UnmarshalError {
    /// The wire value is not convertible to the destination kind.
    #[error("expected a {expected}, got a {actual}")]
    TypeMismatch {
        /// What the destination expected.
        expected: &'static str,
        /// The wire value's kind.
        actual: &'static str,
    },

    /// An asset wire value with none of its recognized sub-variants.
    #[error("expected asset to be one of File, String, or Remote; got none")]
    MalformedAsset,

    /// An archive wire value with none of its recognized sub-variants.
    #[error("expected archive to be one of Assets, File, or Remote; got none")]
    MalformedArchive,

    /// A resource reference carried a malformed package version.
    #[error("failed to parse provider version: {0}")]
    InvalidProviderVersion(String),

    /// A registered constructor failed to build the referenced resource.
    #[error("constructing resource reference: {0}")]
    Construct(#[source] ConstructError),

    /// Awaiting an output failed because its producer rejected it.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl UnmarshalError {
    /// A kind mismatch between the destination and the wire value.
    #[must_use]
    pub fn mismatch(expected: &'static str, actual: &'static str) -> Self {
        UnmarshalError::TypeMismatch { expected, actual }
    }
}

/// Errors produced by the versioned registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A value with this exact version is already registered under the key.
    #[error("existing registration for {key}: {version}")]
    Duplicate {
        /// The registration key.
        key: String,
        /// The already-registered version.
        version: Version,
    },
}
