//! Wire value model exchanged with the orchestration engine.
//!
//! [`PropertyValue`] is the language-neutral tagged union carried over the
//! RPC boundary; [`PropertyMap`] is the top-level container for a resource's
//! inputs and outputs. Field names and variant tags here are fixed by the
//! external protocol and must not drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratus_core::urn::Urn;

/// Top-level wire container: property name to wire value.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Tagged union of every value kind in the engine protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PropertyValue {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double; the only numeric wire type.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<PropertyValue>),
    /// String-keyed mapping; insertion order is irrelevant.
    Object(PropertyMap),
    /// File-like content.
    Asset(AssetValue),
    /// A collection of file-like content.
    Archive(ArchiveValue),
    /// A value that must be treated as sensitive.
    Secret(Box<PropertyValue>),
    /// An asynchronous value with resolution metadata.
    Output(OutputValue),
    /// Placeholder for a value not known until a later deployment step.
    Computed,
    /// Reference to a resource by URN.
    ResourceReference(ResourceReferenceValue),
}

impl PropertyValue {
    /// Whether this is the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Protocol-facing label, used in error messages.
    #[must_use]
    pub fn type_label(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Number(_) => "number",
            PropertyValue::String(_) => "string",
            PropertyValue::Array(_) => "array",
            PropertyValue::Object(_) => "object",
            PropertyValue::Asset(_) => "asset",
            PropertyValue::Archive(_) => "archive",
            PropertyValue::Secret(_) => "secret",
            PropertyValue::Output(_) => "output",
            PropertyValue::Computed => "computed",
            PropertyValue::ResourceReference(_) => "resource reference",
        }
    }
}

/// Wire form of an asynchronous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    /// The element; [`PropertyValue::Null`] when not known.
    pub element: Box<PropertyValue>,
    /// Whether the element has been determined.
    pub known: bool,
    /// Whether the element must be treated as sensitive.
    pub secret: bool,
    /// URNs of the resources the value depends on, sorted and deduplicated.
    pub dependencies: Vec<Urn>,
}

/// Wire form of an asset: exactly one of the fields is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetValue {
    /// Local file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Inline text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Remote URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Wire form of an archive: a path or URI, or a named map of nested assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveValue {
    /// Local file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Remote URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Nested assets by name; each entry is an asset or archive value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<BTreeMap<String, PropertyValue>>,
}

/// Wire form of a resource reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceReferenceValue {
    /// The referenced resource's URN.
    pub urn: Urn,
    /// The provider-assigned ID, present for custom resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The package version the reference was produced against; empty when
    /// unversioned.
    #[serde(rename = "packageVersion", default, skip_serializing_if = "String::is_empty")]
    pub package_version: String,
}

impl ResourceReferenceValue {
    /// Creates an unversioned reference.
    #[must_use]
    pub fn new(urn: Urn, id: Option<String>) -> Self {
        Self {
            urn,
            id,
            package_version: String::new(),
        }
    }
}

/// Whether a property key is reserved for engine-internal bookkeeping.
///
/// Reserved keys are skipped when populating generic maps during
/// unmarshaling.
#[must_use]
pub fn is_internal_key(key: &str) -> bool {
    key.starts_with("__")
}
