//! The foundational asynchronous value layer for Stratus (Layer 1).
//!
//! `stratus_core` provides the primitives the SDK builds resource programs
//! from:
//!
//! - [`output`] - Asynchronous values with knownness, secrecy, and
//!   dependency metadata, plus the combinators over them
//! - [`value`] - The runtime input union and record field tables
//! - [`resource`] - Resource handles and dependency-graph classification
//! - [`deps`] - Flattening the ownership tree into real dependency nodes
//! - [`asset`] - Asset and archive wrappers
//! - [`urn`] - Uniform resource names
//! - [`error`] - Rejection errors for asynchronous values
//!
//! # Architecture
//!
//! This crate is Layer 1 of the Stratus architecture:
//!
//! - **Layer 1** (`stratus_core`): asynchronous value primitives (this crate)
//! - **Layer 2** (`stratus_rpc`): the engine wire protocol
//! - **Layer 3** (generated SDKs, transport): per-package resource types and
//!   the RPC connection to the orchestration engine
//!
//! # Example
//!
//! ```
//! use stratus_core::output::{Output, all};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let host = Output::resolved("db.internal".to_string());
//! let port = Output::resolved(5432_u16);
//!
//! let url = host.then(move |host| {
//!     port.apply(move |port| format!("postgres://{host}:{port}"))
//! });
//!
//! let settled = url.wait().await.unwrap();
//! assert_eq!(settled.value.as_deref(), Some("postgres://db.internal:5432"));
//! # let _ = all(vec![Output::resolved(1), Output::resolved(2)]);
//! # }
//! ```

/// Asset and archive wrappers.
pub mod asset;

/// Dependency aggregation over the resource ownership tree.
pub mod deps;

/// Rejection errors for asynchronous values.
pub mod error;

/// Asynchronous values and combinators.
pub mod output;

/// Resource handles and dependency-graph classification.
pub mod resource;

/// Uniform resource names.
pub mod urn;

/// Runtime input values and record field tables.
pub mod value;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::asset::{Archive, Asset, AssetOrArchive};
    pub use crate::deps::expand_dependencies;
    pub use crate::error::OutputError;
    pub use crate::output::{Output, Resolved, Resolver, all};
    pub use crate::resource::{
        DependencyCustomResource, DependencyProviderResource, DependencyResource, Resource,
        ResourceId, ResourceKind, ResourceRef,
    };
    pub use crate::urn::Urn;
    pub use crate::value::{Input, InputField, InputMap, InputRecord, ToInput, to_output};
}

// Re-export key types at crate root for convenience
pub use error::OutputError;
pub use output::{Output, Resolved, Resolver};
pub use urn::Urn;
pub use value::Input;
