//! N-ary joins over outputs.

use futures::future::join_all;

use super::Output;

/// Joins any number of outputs into one output of all their values.
///
/// The join is known iff every input is known, secret if any input is
/// secret, and depends on the union of every input's dependencies. If any
/// input rejects, the join rejects with the first error encountered; inputs
/// settle concurrently, so which error is "first" is not guaranteed.
///
/// When the join is unknown, values of the known inputs are discarded: an
/// unknown join carries no element.
#[must_use]
pub fn all<T, I>(outputs: I) -> Output<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = Output<T>>,
{
    let outputs: Vec<Output<T>> = outputs.into_iter().collect();
    let (result, resolver) = Output::unresolved();
    tokio::spawn(async move {
        let settled = join_all(outputs.iter().map(Output::wait)).await;

        let mut values = Vec::with_capacity(settled.len());
        let mut known = true;
        let mut secret = false;
        let mut deps = Vec::new();
        for state in settled {
            match state {
                Err(err) => {
                    resolver.reject(err);
                    return;
                }
                Ok(state) => {
                    known &= state.known;
                    secret |= state.secret;
                    deps.extend(state.deps);
                    if let Some(value) = state.value {
                        values.push(value);
                    }
                }
            }
        }

        if known {
            resolver.fulfill(Some(values), true, secret, deps);
        } else {
            resolver.fulfill(None, false, secret, deps);
        }
    });
    result
}
