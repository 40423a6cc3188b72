//! Uniform resource names.
//!
//! Every resource instance is identified by a [`Urn`]: an opaque, globally
//! unique string. URNs order by plain string comparison, which keeps
//! serialized dependency lists deterministic.
//!
//! The accessors on [`Urn`] slice out the conventional segments of an
//! engine-issued URN:
//!
//! ```text
//! urn:stratus:<stack>::<project>::<qualified type>::<name>
//! ```
//!
//! where the qualified type is a `$`-chain of type tokens (parents first)
//! and a type token has the shape `pkg:mod:Name`. Accessors degrade to empty
//! strings on malformed input; they never fail.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Reserved module token identifying provider resources.
///
/// A resource whose type token lives in this pseudo-module is a provider;
/// resource-reference resolution routes it through the package registry
/// instead of the module registry.
pub const PROVIDERS_MODULE: &str = "stratus:providers";

/// Globally unique identifier for a resource instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    /// Creates a URN from its string form.
    #[must_use]
    pub fn new(urn: impl Into<String>) -> Self {
        Self(urn.into())
    }

    /// Returns the URN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the resource name (the final `::` segment).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or("")
    }

    /// Returns the qualified type (the third `::` segment).
    ///
    /// The qualified type chains the types of all component ancestors, e.g.
    /// `a:b:Parent$c:d:Child`.
    #[must_use]
    pub fn qualified_type(&self) -> &str {
        self.0.split("::").nth(2).unwrap_or("")
    }

    /// Returns the resource's own type token (the last `$` part of the
    /// qualified type).
    #[must_use]
    pub fn type_token(&self) -> &str {
        self.qualified_type().rsplit('$').next().unwrap_or("")
    }

    /// Returns the module of the type token (`pkg:mod` of `pkg:mod:Name`).
    #[must_use]
    pub fn module(&self) -> &str {
        let token = self.type_token();
        match token.rfind(':') {
            Some(idx) => &token[..idx],
            None => "",
        }
    }

    /// Returns the name part of the type token (`Name` of `pkg:mod:Name`).
    ///
    /// For provider resources this is the provider's package name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.type_token().rsplit(':').next().unwrap_or("")
    }

    /// Returns `true` if this URN denotes a provider resource.
    #[must_use]
    pub fn is_provider(&self) -> bool {
        self.module() == PROVIDERS_MODULE
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Urn {
    fn from(urn: String) -> Self {
        Self(urn)
    }
}

impl From<&str> for Urn {
    fn from(urn: &str) -> Self {
        Self(urn.to_string())
    }
}
