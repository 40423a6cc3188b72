//! One-shot resolution cell shared by an output and its resolver.

use core::fmt;

use tokio::sync::watch;

use crate::error::OutputError;
use crate::resource::ResourceRef;

/// Fully settled state of an output.
///
/// `value` is `Some` only when `known` is true. Unknown outputs carry no
/// element but still carry secrecy and dependencies.
#[derive(Clone)]
pub struct Resolved<T> {
    /// The element, present only when `known`.
    pub value: Option<T>,
    /// Whether the underlying value has been determined.
    pub known: bool,
    /// Whether the value must be treated as sensitive.
    pub secret: bool,
    /// Resources this value depends on.
    pub deps: Vec<ResourceRef>,
}

impl<T: fmt::Debug> fmt::Debug for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("value", &self.value)
            .field("known", &self.known)
            .field("secret", &self.secret)
            .field("deps", &self.deps.len())
            .finish()
    }
}

pub(crate) type SettleResult<T> = Result<Resolved<T>, OutputError>;

/// One-shot slot settled exactly once by a single writer and read by any
/// number of concurrent awaiters.
pub(crate) struct Cell<T> {
    tx: watch::Sender<Option<SettleResult<T>>>,
}

impl<T: Clone> Cell<T> {
    /// Creates an unsettled cell.
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Creates a cell already holding a settled state.
    pub(crate) fn settled(result: SettleResult<T>) -> Self {
        let (tx, _rx) = watch::channel(Some(result));
        Self { tx }
    }

    /// Settles the cell. Settling twice is a defect in the runtime or in
    /// generated code, not a recoverable condition.
    pub(crate) fn settle(&self, result: SettleResult<T>) {
        let previous = self.tx.send_replace(Some(result));
        assert!(previous.is_none(), "output settled more than once");
    }

    /// Suspends until the cell is settled and returns the settled state.
    pub(crate) async fn wait(&self) -> SettleResult<T> {
        let mut rx = self.tx.subscribe();
        let slot = rx
            .wait_for(Option::is_some)
            .await
            .expect("output cell sender dropped while a handle was live");
        slot.as_ref().expect("slot checked non-empty").clone()
    }
}

impl<T> Cell<T> {
    /// Whether the cell has been settled. Used for diagnostics only.
    pub(crate) fn is_settled(&self) -> bool {
        self.tx.borrow().is_some()
    }
}
