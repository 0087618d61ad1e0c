#![cfg(feature = "control")]
//! Integration tests for `Lazy`.

use lazy_stream::control::{Lazy, LazyPoisonedError};
use rstest::rstest;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};

// =============================================================================
// Deferred Evaluation
// =============================================================================

#[rstest]
fn lazy_defers_computation() {
    let runs = Cell::new(0);
    let lazy = Lazy::new(|| {
        runs.set(runs.get() + 1);
        42
    });

    assert_eq!(runs.get(), 0);
    assert!(!lazy.is_initialized());
    assert!(lazy.get().is_none());
}

#[rstest]
fn lazy_force_computes_once() {
    let runs = Cell::new(0);
    let lazy = Lazy::new(|| {
        runs.set(runs.get() + 1);
        vec![1, 2, 3]
    });

    assert_eq!(*lazy.force(), vec![1, 2, 3]);
    assert_eq!(lazy.force().len(), 3);
    assert_eq!(runs.get(), 1);
    assert!(lazy.is_initialized());
    assert_eq!(lazy.get().map(|value| value.len()), Some(3));
}

#[rstest]
fn lazy_new_with_value_is_initialized() {
    let lazy = Lazy::new_with_value("ready");
    assert!(lazy.is_initialized());
    assert_eq!(*lazy.force(), "ready");
}

// =============================================================================
// Consuming
// =============================================================================

#[rstest]
fn lazy_into_inner_runs_pending_initializer() {
    let lazy = Lazy::new(|| 5);
    assert_eq!(lazy.into_inner(), Ok(5));
}

#[rstest]
fn lazy_into_initialized_skips_pending_initializer() {
    let runs = Cell::new(0);
    let pending = Lazy::new(|| {
        runs.set(runs.get() + 1);
        5
    });
    assert_eq!(pending.into_initialized(), None);
    assert_eq!(runs.get(), 0);

    let forced = Lazy::new(|| 6);
    let _ = forced.force();
    assert_eq!(forced.into_initialized(), Some(6));
}

#[rstest]
fn lazy_map_is_lazy() {
    let runs = Cell::new(0);
    let mapped = Lazy::new(|| {
        runs.set(runs.get() + 1);
        20
    })
    .map(|value| value + 1)
    .map(|value| value * 2);

    assert_eq!(runs.get(), 0);
    assert_eq!(*mapped.force(), 42);
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn lazy_force_mut_modifies_value() {
    let mut lazy = Lazy::new(|| vec![1]);
    lazy.force_mut().push(2);
    assert_eq!(*lazy.force(), vec![1, 2]);
}

// =============================================================================
// Poisoning
// =============================================================================

#[rstest]
fn lazy_poisoned_after_panic() {
    let lazy: Lazy<i32, _> = Lazy::new(|| panic!("initializer failed"));

    let result = catch_unwind(AssertUnwindSafe(|| *lazy.force()));
    assert!(result.is_err());
    assert!(lazy.is_poisoned());
    assert!(!lazy.is_initialized());

    let again = catch_unwind(AssertUnwindSafe(|| *lazy.force()));
    assert!(again.is_err());
    assert_eq!(lazy.into_inner(), Err(LazyPoisonedError));
}

// =============================================================================
// Formatting and Defaults
// =============================================================================

#[rstest]
#[case(false, "Lazy(<uninit>)")]
#[case(true, "Lazy(3)")]
fn lazy_debug(#[case] forced: bool, #[case] expected: &str) {
    let lazy = Lazy::new(|| 3);
    if forced {
        let _ = lazy.force();
    }
    assert_eq!(format!("{lazy:?}"), expected);
}

#[rstest]
fn lazy_default_is_deferred_default() {
    let lazy: Lazy<String> = Lazy::default();
    assert!(!lazy.is_initialized());
    assert_eq!(*lazy.force(), String::new());
}
