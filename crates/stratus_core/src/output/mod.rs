//! Asynchronous values.
//!
//! An [`Output<T>`] represents a value that may not be known until remote
//! infrastructure has been materialized. Alongside the eventual element it
//! carries three pieces of metadata that thread through every combinator:
//!
//! - **known** — whether the element has been determined. A deployment
//!   preview legitimately leaves values unknown.
//! - **secret** — whether the element must be treated as sensitive. Secrecy
//!   is OR-composed across any transformation or merge.
//! - **dependencies** — the resources whose materialization produced the
//!   value, unioned across composition.
//!
//! An output is created unresolved, settled exactly once (by an RPC response
//! handler or a combinator), and immutable thereafter. Combinators never
//! mutate an existing output; they construct new ones that await the old.
//! Settling the same output twice is a defect and aborts.
//!
//! [`Output::wait`] is the sole suspension point in this layer. There is no
//! timeout or cancellation primitive on the output itself; the transport
//! layer cancels by rejecting with a cancellation-flavored error.
//!
//! Combinators drive their result cells from spawned tasks and therefore
//! must be called from within a Tokio runtime.
//!
//! # Example
//!
//! ```
//! use stratus_core::output::Output;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let port = Output::resolved(8080_u32);
//! let url = port.apply(|p| format!("https://example.com:{p}"));
//! let settled = url.wait().await.unwrap();
//! assert_eq!(settled.value.as_deref(), Some("https://example.com:8080"));
//! # }
//! ```

mod cell;
mod join;

pub use cell::Resolved;
pub use join::all;

use core::fmt;
use std::sync::Arc;

use crate::error::OutputError;
use crate::resource::ResourceRef;
use cell::Cell;

/// A typed asynchronous value with knownness, secrecy, and dependency
/// metadata.
///
/// Handles are cheap to clone; all clones observe the same settled state.
pub struct Output<T> {
    cell: Arc<Cell<T>>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("settled", &self.cell.is_settled())
            .finish()
    }
}

impl<T> Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an output already resolved to a known, non-secret value with
    /// no dependencies.
    #[must_use]
    pub fn resolved(value: T) -> Self {
        Self::from_parts(Some(value), true, false, Vec::new())
    }

    /// Creates an output resolved to a known secret value.
    #[must_use]
    pub fn secret(value: T) -> Self {
        Self::from_parts(Some(value), true, true, Vec::new())
    }

    /// Creates an output whose value is not (and will never become) known.
    #[must_use]
    pub fn unknown() -> Self {
        Self::from_parts(None, false, false, Vec::new())
    }

    /// Creates an already-rejected output.
    #[must_use]
    pub fn rejected(error: OutputError) -> Self {
        Self {
            cell: Arc::new(Cell::settled(Err(error))),
        }
    }

    /// Creates an output settled from explicit parts.
    #[must_use]
    pub fn from_parts(value: Option<T>, known: bool, secret: bool, deps: Vec<ResourceRef>) -> Self {
        Self {
            cell: Arc::new(Cell::settled(Ok(Resolved {
                value,
                known,
                secret,
                deps,
            }))),
        }
    }

    /// Creates an unresolved output together with its single-use resolver.
    #[must_use]
    pub fn unresolved() -> (Self, Resolver<T>) {
        let cell = Arc::new(Cell::new());
        let output = Self {
            cell: Arc::clone(&cell),
        };
        (output, Resolver { cell })
    }

    /// Suspends until the output settles.
    ///
    /// Safe to call from any number of tasks concurrently; every caller
    /// observes the same settled state.
    ///
    /// # Errors
    ///
    /// Returns the rejection error if the producer rejected the output.
    pub async fn wait(&self) -> Result<Resolved<T>, OutputError> {
        self.cell.wait().await
    }

    /// Transforms the eventual value with `f`.
    ///
    /// `f` runs only if this output resolves known and without error. An
    /// unknown source leaves the result unknown, preserving secrecy and
    /// dependencies; a rejected source rejects the result with the same
    /// error. `f` is never invoked in either case.
    #[must_use]
    pub fn apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.try_apply(|value| Ok(f(value)))
    }

    /// Transforms the eventual value with a fallible `f`; an `Err` rejects
    /// the result.
    #[must_use]
    pub fn try_apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, OutputError> + Send + 'static,
    {
        let (result, resolver) = Output::unresolved();
        let source = self.clone();
        tokio::spawn(async move {
            match source.wait().await {
                Err(err) => resolver.reject(err),
                Ok(state) if !state.known => {
                    resolver.fulfill(None, false, state.secret, state.deps);
                }
                Ok(state) => {
                    let value = state.value.expect("known output carries a value");
                    match f(value) {
                        Err(err) => resolver.reject(err),
                        Ok(mapped) => resolver.fulfill(Some(mapped), true, state.secret, state.deps),
                    }
                }
            }
        });
        result
    }

    /// Chains into another output, flattening one level.
    ///
    /// The inner output returned by `f` is awaited before the result
    /// settles: the result is known iff the inner output is known, secret if
    /// either side is secret, and depends on the union of both dependency
    /// sets. This is the explicit form of future flattening; outputs are
    /// never nested.
    #[must_use]
    pub fn then<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Output<U> + Send + 'static,
    {
        let (result, resolver) = Output::unresolved();
        let source = self.clone();
        tokio::spawn(async move {
            match source.wait().await {
                Err(err) => resolver.reject(err),
                Ok(outer) if !outer.known => {
                    resolver.fulfill(None, false, outer.secret, outer.deps);
                }
                Ok(outer) => {
                    let value = outer.value.expect("known output carries a value");
                    match f(value).wait().await {
                        Err(err) => resolver.reject(err),
                        Ok(inner) => {
                            let mut deps = outer.deps;
                            deps.extend(inner.deps);
                            resolver.fulfill(
                                inner.value,
                                inner.known,
                                outer.secret || inner.secret,
                                deps,
                            );
                        }
                    }
                }
            }
        });
        result
    }

    /// Returns an output with the same state but marked secret.
    #[must_use]
    pub fn to_secret(&self) -> Output<T> {
        let (result, resolver) = Output::unresolved();
        let source = self.clone();
        tokio::spawn(async move {
            match source.wait().await {
                Err(err) => resolver.reject(err),
                Ok(state) => resolver.fulfill(state.value, state.known, true, state.deps),
            }
        });
        result
    }
}

/// Single-use handle that settles an [`Output`].
///
/// Consumed on settle, so each resolver settles its output at most once.
pub struct Resolver<T> {
    cell: Arc<Cell<T>>,
}

impl<T> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl<T> Resolver<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Settles the output from explicit parts. `value` must be `Some` iff
    /// `known`.
    pub fn fulfill(self, value: Option<T>, known: bool, secret: bool, deps: Vec<ResourceRef>) {
        debug_assert_eq!(
            value.is_some(),
            known,
            "resolved element must be present exactly when known"
        );
        self.cell.settle(Ok(Resolved {
            value,
            known,
            secret,
            deps,
        }));
    }

    /// Resolves the output to a known, non-secret value with no
    /// dependencies.
    pub fn resolve(self, value: T) {
        self.fulfill(Some(value), true, false, Vec::new());
    }

    /// Rejects the output.
    pub fn reject(self, error: OutputError) {
        self.cell.settle(Err(error));
    }
}
