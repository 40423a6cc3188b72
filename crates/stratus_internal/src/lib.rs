//! # Stratus Internal Library
//!
//! Re-exports the core Stratus crates for convenience.

/// Layer 1: asynchronous value primitives.
pub use stratus_core;

/// Layer 2: the engine wire protocol.
pub use stratus_rpc;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use stratus_core::prelude::*;
    pub use stratus_rpc::prelude::*;
}
