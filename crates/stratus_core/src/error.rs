//! Rejection errors for asynchronous values.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Error carried by a rejected [`Output`](crate::output::Output).
///
/// A rejection is broadcast to every awaiter of the output, so the
/// underlying error is reference-counted and this handle is cheap to clone.
/// Cancellation is reported through this same channel: the transport layer
/// rejects the output with a cancellation-flavored error.
#[derive(Clone)]
pub struct OutputError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl OutputError {
    /// Wraps an arbitrary error as a rejection.
    #[must_use]
    pub fn new(err: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(err),
        }
    }

    /// Creates a rejection from a plain message.
    #[must_use]
    pub fn msg(msg: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Message(msg.into())),
        }
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl StdError for OutputError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

/// Plain-message rejection payload.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);
