//! The engine wire protocol for Stratus (Layer 2).
//!
//! `stratus_rpc` converts between the runtime values of
//! [`stratus_core`] and the language-neutral wire format exchanged with the
//! out-of-process orchestration engine:
//!
//! - [`property`] - The wire value model ([`PropertyValue`], [`PropertyMap`])
//! - [`marshal`] - Runtime inputs to wire values, collecting dependencies
//! - [`unmarshal`] - Wire values back to runtime values or typed
//!   destinations
//! - [`registry`] - Versioned constructor registry for resource references
//! - [`error`] - The protocol error taxonomy
//!
//! # Architecture
//!
//! This crate is Layer 2 of the Stratus architecture:
//!
//! - **Layer 1** (`stratus_core`): asynchronous value primitives
//! - **Layer 2** (`stratus_rpc`): the engine wire protocol (this crate)
//! - **Layer 3** (generated SDKs, transport): per-package resource types and
//!   the RPC connection to the orchestration engine
//!
//! # Example
//!
//! ```
//! use stratus_core::value::Input;
//! use stratus_rpc::marshal::{MarshalOptions, marshal_inputs};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut inputs = stratus_core::value::InputMap::new();
//! inputs.insert("region".to_string(), Input::String("us-west-2".to_string()));
//!
//! let marshaled = marshal_inputs(&Input::Map(inputs), &MarshalOptions::default())
//!     .await
//!     .unwrap();
//! assert!(marshaled.properties.contains_key("region"));
//! assert!(marshaled.dependencies.is_empty());
//! # }
//! ```

/// The protocol error taxonomy.
pub mod error;

/// Marshaling runtime inputs into wire values.
pub mod marshal;

/// The wire value model.
pub mod property;

/// Versioned constructor registry for resource references.
pub mod registry;

/// Unmarshaling wire values back into runtime values.
pub mod unmarshal;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::{ConstructError, MarshalError, RegistryError, UnmarshalError};
    pub use crate::marshal::{MarshalOptions, MarshaledInputs, marshal_input, marshal_inputs};
    pub use crate::property::{
        ArchiveValue, AssetValue, OutputValue, PropertyMap, PropertyValue,
        ResourceReferenceValue, is_internal_key,
    };
    pub use crate::registry::{
        ResourceModule, ResourcePackage, ResourceRegistry, Versioned, VersionedMap,
    };
    pub use crate::unmarshal::{
        FromProperty, ObjectReader, UnmarshalContext, Unmarshaled, unmarshal, unmarshal_map,
        unmarshal_resource_reference, unmarshal_value,
    };
}

// Re-export key types at crate root for convenience
pub use marshal::{MarshalOptions, MarshaledInputs};
pub use property::{PropertyMap, PropertyValue};
pub use registry::ResourceRegistry;
pub use unmarshal::UnmarshalContext;
