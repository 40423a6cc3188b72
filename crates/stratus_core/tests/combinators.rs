//! Integration tests for output combinators.
//!
//! These exercise the combinator contracts end to end:
//! - `apply` runs only on known, non-rejected sources
//! - `then` flattens exactly one level, merging metadata
//! - `all` AND-composes knownness and OR-composes secrecy
//! - dependency sets ride along untouched through every combinator

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use stratus_core::error::OutputError;
use stratus_core::output::{Output, all};
use stratus_core::resource::{Resource, ResourceKind, ResourceRef};
use stratus_core::urn::Urn;

// ─────────────────────────────────────────────────────────────────────────────
// Test Resources
// ─────────────────────────────────────────────────────────────────────────────

struct Marker {
    urn: Urn,
}

impl Resource for Marker {
    fn urn(&self) -> Output<Urn> {
        Output::resolved(self.urn.clone())
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Custom
    }
}

fn marker(urn: &str) -> ResourceRef {
    Arc::new(Marker { urn: Urn::new(urn) })
}

fn with_deps(value: i32, secret: bool, deps: Vec<ResourceRef>) -> Output<i32> {
    Output::from_parts(Some(value), true, secret, deps)
}

// ─────────────────────────────────────────────────────────────────────────────
// apply / try_apply
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn apply_maps_known_values() {
    let output = Output::resolved(21);
    let doubled = output.apply(|n| n * 2);
    let state = doubled.wait().await.unwrap();
    assert_eq!(state.value, Some(42));
    assert!(state.known);
}

#[tokio::test]
async fn apply_skips_the_callback_when_unknown() {
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);

    let source = Output::<i32>::from_parts(None, false, true, vec![marker("urn:m")]);
    let mapped = source.apply(move |n| {
        flag.store(true, Ordering::SeqCst);
        n + 1
    });

    let state = mapped.wait().await.unwrap();
    assert!(!state.known);
    assert!(state.secret, "secrecy survives the skipped transform");
    assert_eq!(state.deps.len(), 1, "dependencies survive the skipped transform");
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn apply_skips_the_callback_on_rejection() {
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);

    let source = Output::<i32>::rejected(OutputError::msg("deploy failed"));
    let mapped = source.apply(move |n| {
        flag.store(true, Ordering::SeqCst);
        n + 1
    });

    let err = mapped.wait().await.unwrap_err();
    assert_eq!(err.to_string(), "deploy failed");
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn try_apply_error_rejects_the_result() {
    let output = Output::resolved(1);
    let mapped = output.try_apply(|_| Err::<i32, _>(OutputError::msg("conversion failed")));
    let err = mapped.wait().await.unwrap_err();
    assert_eq!(err.to_string(), "conversion failed");
}

#[tokio::test]
async fn apply_preserves_secrecy_and_dependencies() {
    let source = with_deps(5, true, vec![marker("urn:dep")]);
    let state = source.apply(|n| n + 1).wait().await.unwrap();
    assert_eq!(state.value, Some(6));
    assert!(state.secret);
    assert_eq!(state.deps.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// then (explicit flattening chain)
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn then_flattens_one_level() {
    let outer = with_deps(10, false, vec![marker("urn:outer")]);
    let chained = outer.then(|n| with_deps(n * 2, true, vec![marker("urn:inner")]));

    let state = chained.wait().await.unwrap();
    assert_eq!(state.value, Some(20));
    assert!(state.known);
    assert!(state.secret, "inner secrecy is inherited");
    assert_eq!(state.deps.len(), 2, "dependency sets union");
}

#[tokio::test]
async fn then_with_unknown_inner_is_unknown() {
    let outer = Output::resolved(1);
    let chained = outer.then(|_| Output::<i32>::unknown());
    let state = chained.wait().await.unwrap();
    assert!(!state.known);
    assert_eq!(state.value, None);
}

#[tokio::test]
async fn then_with_unknown_outer_never_calls_back() {
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);

    let outer = Output::<i32>::unknown();
    let chained = outer.then(move |n| {
        flag.store(true, Ordering::SeqCst);
        Output::resolved(n)
    });

    let state = chained.wait().await.unwrap();
    assert!(!state.known);
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn then_with_rejected_inner_rejects() {
    let outer = Output::resolved(1);
    let chained = outer.then(|_| Output::<i32>::rejected(OutputError::msg("inner failed")));
    let err = chained.wait().await.unwrap_err();
    assert_eq!(err.to_string(), "inner failed");
}

// ─────────────────────────────────────────────────────────────────────────────
// all
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn all_unions_dependencies() {
    let joined = all(vec![
        with_deps(1, false, vec![marker("urn:a")]),
        with_deps(2, false, vec![marker("urn:b")]),
    ]);
    let state = joined.wait().await.unwrap();
    assert_eq!(state.value, Some(vec![1, 2]));
    assert_eq!(state.deps.len(), 2);
}

#[tokio::test]
async fn all_is_unknown_if_any_input_is() {
    let joined = all(vec![with_deps(1, true, Vec::new()), Output::unknown()]);
    let state = joined.wait().await.unwrap();
    assert!(!state.known);
    assert!(state.secret, "secrecy still ORs across an unknown join");
}

// ─────────────────────────────────────────────────────────────────────────────
// to_secret
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn to_secret_marks_without_changing_the_value() {
    let output = Output::resolved("hunter2".to_string());
    let state = output.to_secret().wait().await.unwrap();
    assert_eq!(state.value.as_deref(), Some("hunter2"));
    assert!(state.secret);
}

#[tokio::test]
async fn to_secret_preserves_unknownness() {
    let output = Output::<i32>::unknown();
    let state = output.to_secret().wait().await.unwrap();
    assert!(!state.known);
    assert!(state.secret);
}

// ─────────────────────────────────────────────────────────────────────────────
// Producer/consumer handoff
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn combinators_compose_over_late_resolution() {
    let (base, resolver) = Output::unresolved();
    let derived = base.apply(|n: i32| n + 1).then(|n| Output::resolved(n * 10));

    // Resolve from a separate task after the chain is already built.
    tokio::spawn(async move {
        tokio::task::yield_now().await;
        resolver.resolve(4);
    });

    let state = derived.wait().await.unwrap();
    assert_eq!(state.value, Some(50));
}
