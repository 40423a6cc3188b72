//! Resource handles and dependency-graph classification.
//!
//! A [`Resource`] is a node in the infrastructure ownership tree: it owns an
//! ordered collection of children and is identified by a [`Urn`]. This core
//! never constructs user resources itself — the resource-construction layer
//! supplies the tree — but it does provide the lightweight placeholder
//! handles used when reconstructing references from wire values.

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::output::Output;
use crate::urn::Urn;

/// Opaque provider-assigned identifier of a custom resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates an ID from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// How a resource participates in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A directly-deployed engine object; a "real" node in the graph.
    Custom,
    /// An in-process aggregation of children with no engine-side identity
    /// of its own.
    LocalComponent,
    /// A component constructed by a remote plugin. The engine serializes
    /// the construction of its children as part of constructing it, so it
    /// behaves as an opaque node.
    RemoteComponent,
    /// A placeholder standing in for a resource known only by URN.
    DependencyOnly,
    /// A component handle reconstructed from engine state.
    Rehydrated,
}

impl ResourceKind {
    /// Whether resources of this kind are custom resources.
    #[must_use]
    pub fn is_custom(self) -> bool {
        matches!(self, ResourceKind::Custom)
    }

    /// Whether a resource of this kind stays in an expanded dependency set
    /// in its own right.
    ///
    /// Local components are pure aggregations: only their transitively
    /// reachable descendants matter, so they are dropped. Every other
    /// non-custom kind is kept as an opaque node.
    #[must_use]
    pub fn keeps_dependency(self) -> bool {
        !matches!(self, ResourceKind::LocalComponent)
    }
}

/// Shared handle to a resource.
pub type ResourceRef = Arc<dyn Resource>;

/// A node in the infrastructure ownership tree.
///
/// Implementations come from the resource-construction layer and from
/// generated SDK code; this core consumes them when expanding dependencies
/// and marshaling resource references.
pub trait Resource: Send + Sync + 'static {
    /// The resource's URN. May be unresolved until registration completes.
    fn urn(&self) -> Output<Urn>;

    /// Dependency-graph classification of this resource.
    fn kind(&self) -> ResourceKind;

    /// Ordered child resources owned by this resource.
    fn children(&self) -> Vec<ResourceRef> {
        Vec::new()
    }

    /// Provider-assigned ID; `Some` for custom resources only.
    fn id(&self) -> Option<Output<ResourceId>> {
        None
    }
}

/// Placeholder for a component resource known only by URN.
#[derive(Debug)]
pub struct DependencyResource {
    urn: Output<Urn>,
}

impl DependencyResource {
    /// Creates a placeholder for the given URN.
    #[must_use]
    pub fn new(urn: Urn) -> Self {
        Self {
            urn: Output::resolved(urn),
        }
    }
}

impl Resource for DependencyResource {
    fn urn(&self) -> Output<Urn> {
        self.urn.clone()
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::DependencyOnly
    }
}

/// Placeholder for a custom resource known only by URN and ID.
#[derive(Debug)]
pub struct DependencyCustomResource {
    urn: Output<Urn>,
    id: Output<ResourceId>,
}

impl DependencyCustomResource {
    /// Creates a placeholder for the given URN and ID.
    #[must_use]
    pub fn new(urn: Urn, id: ResourceId) -> Self {
        Self {
            urn: Output::resolved(urn),
            id: Output::resolved(id),
        }
    }
}

impl Resource for DependencyCustomResource {
    fn urn(&self) -> Output<Urn> {
        self.urn.clone()
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Custom
    }

    fn id(&self) -> Option<Output<ResourceId>> {
        Some(self.id.clone())
    }
}

/// Placeholder for a provider resource known only by URN and ID.
#[derive(Debug)]
pub struct DependencyProviderResource {
    urn: Output<Urn>,
    id: Output<ResourceId>,
}

impl DependencyProviderResource {
    /// Creates a placeholder for the given URN and ID.
    #[must_use]
    pub fn new(urn: Urn, id: ResourceId) -> Self {
        Self {
            urn: Output::resolved(urn),
            id: Output::resolved(id),
        }
    }

    /// The provider's package name, read from the URN's type token.
    #[must_use]
    pub fn package(&self) -> Output<String> {
        self.urn.apply(|urn| urn.type_name().to_string())
    }
}

impl Resource for DependencyProviderResource {
    fn urn(&self) -> Output<Urn> {
        self.urn.clone()
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Custom
    }

    fn id(&self) -> Option<Output<ResourceId>> {
        Some(self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert!(ResourceKind::Custom.is_custom());
        assert!(!ResourceKind::LocalComponent.is_custom());

        assert!(!ResourceKind::LocalComponent.keeps_dependency());
        assert!(ResourceKind::RemoteComponent.keeps_dependency());
        assert!(ResourceKind::DependencyOnly.keeps_dependency());
        assert!(ResourceKind::Rehydrated.keeps_dependency());
    }

    #[tokio::test]
    async fn dependency_resource_carries_its_urn() {
        let urn = Urn::new("urn:stratus:dev::proj::t:m:T::placeholder");
        let resource = DependencyResource::new(urn.clone());
        let state = resource.urn().wait().await.unwrap();
        assert_eq!(state.value, Some(urn));
        assert!(resource.id().is_none());
    }

    #[tokio::test]
    async fn dependency_custom_resource_has_an_id() {
        let resource = DependencyCustomResource::new(Urn::new("urn:x"), ResourceId::new("i-123"));
        assert!(resource.kind().is_custom());
        let id = resource.id().unwrap().wait().await.unwrap();
        assert_eq!(id.value, Some(ResourceId::new("i-123")));
    }

    #[tokio::test]
    async fn provider_package_comes_from_the_urn() {
        let resource = DependencyProviderResource::new(
            Urn::new("urn:stratus:dev::proj::stratus:providers:aws::default"),
            ResourceId::new("p-1"),
        );
        let package = resource.package().wait().await.unwrap();
        assert_eq!(package.value.as_deref(), Some("aws"));
    }
}
