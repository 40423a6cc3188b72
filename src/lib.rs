//! The asynchronous value and dependency-tracking core of the Stratus
//! infrastructure SDK.
//!

pub use stratus_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use stratus_internal::prelude::*;
}
