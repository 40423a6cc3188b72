//! Dependency aggregation over the resource ownership tree.
//!
//! The engine tracks dependencies between "real" graph nodes. Local
//! components are in-process aggregations with no engine-side identity, so
//! depending on one really means depending on its transitively reachable
//! custom and remote descendants. [`expand_dependencies`] flattens a list
//! of resources into that minimal set.
//!
//! Given the tree
//!
//! ```text
//!           Comp1
//!       /     |      \
//!   Cust1   Comp2   Remote1
//!           /   \
//!       Cust2  Cust3
//! ```
//!
//! expanding `[Comp1]` yields `{Cust1, Cust2, Cust3, Remote1}`: the local
//! component nodes dissolve into their children, while the remote component
//! is itself a real node — the engine serializes the construction of its
//! children as part of constructing it, and those children are not
//! materialized in this process.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::OutputError;
use crate::resource::ResourceRef;
use crate::urn::Urn;

/// Expands resources into the minimal set of real dependency nodes, keyed
/// and ordered by URN.
///
/// `from` names the resource the expansion is being computed for, if any;
/// encountering it short-circuits so that a component under construction
/// does not depend on its own not-yet-registered children.
///
/// The expansion is idempotent: expanding an already-expanded set yields
/// the same set.
///
/// # Errors
///
/// Returns an error if awaiting any resource's URN fails.
///
/// # Panics
///
/// A resource reached here must have a known, non-secret URN; anything else
/// is a defect in the runtime or in generated code.
pub async fn expand_dependencies(
    deps: &[ResourceRef],
    from: Option<&ResourceRef>,
) -> Result<BTreeMap<Urn, ResourceRef>, OutputError> {
    let mut set = BTreeMap::new();
    for resource in deps {
        add_dependency(&mut set, resource, from).await?;
    }
    Ok(set)
}

/// Adds one resource (or, for component kinds, its expansion) to `set`.
///
/// Custom resources are added directly without recursing: children of a
/// custom resource are never dependency roots of their own. Non-custom
/// resources recurse into every child first and are then added themselves
/// only if their kind keeps the dependency.
fn add_dependency<'a>(
    set: &'a mut BTreeMap<Urn, ResourceRef>,
    resource: &'a ResourceRef,
    from: Option<&'a ResourceRef>,
) -> BoxFuture<'a, Result<(), OutputError>> {
    Box::pin(async move {
        if !resource.kind().is_custom() {
            if let Some(from) = from {
                if Arc::ptr_eq(resource, from) {
                    return Ok(());
                }
            }

            for child in resource.children() {
                add_dependency(set, &child, from).await?;
            }

            if !resource.kind().keeps_dependency() {
                return Ok(());
            }
        }

        let state = resource.urn().wait().await?;
        assert!(state.known, "dependency URN must be known");
        assert!(!state.secret, "dependency URN must not be secret");
        let urn = state.value.expect("known output carries a value");
        set.insert(urn, Arc::clone(resource));
        Ok(())
    })
}
