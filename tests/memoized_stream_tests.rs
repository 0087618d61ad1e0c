//! Integration tests for recompute-on-force and memoized evaluation.

use lazy_stream::stream::LazyStream;
use rstest::{fixture, rstest};
use std::cell::Cell;
use std::rc::Rc;

#[fixture]
fn runs() -> Rc<Cell<usize>> {
    Rc::new(Cell::new(0))
}

/// Squares of the naturals, counting how many times the mapping runs.
fn counted_squares(runs: &Rc<Cell<usize>>) -> LazyStream<u64> {
    let counter = Rc::clone(runs);
    LazyStream::from(0_u64).map(move |n| {
        counter.set(counter.get() + 1);
        n * n
    })
}

// =============================================================================
// Recompute on Force
// =============================================================================

#[rstest]
fn test_plain_stream_recomputes_on_each_traversal(runs: Rc<Cell<usize>>) {
    let squares = counted_squares(&runs);
    assert_eq!(runs.get(), 1);

    assert_eq!(squares.take(5).to_list(), vec![0, 1, 4, 9, 16]);
    let after_first = runs.get();
    assert_eq!(squares.take(5).to_list(), vec![0, 1, 4, 9, 16]);

    assert_eq!(runs.get() - after_first, after_first - 1);
}

#[rstest]
fn test_plain_stream_tails_are_distinct(runs: Rc<Cell<usize>>) {
    let squares = counted_squares(&runs);
    let first = squares.tail().unwrap();
    let second = squares.tail().unwrap();

    assert!(!first.ptr_eq(&second));
    assert_eq!(first.head(), second.head());
    assert!(!squares.is_tail_realized());
}

// =============================================================================
// Memoized
// =============================================================================

#[rstest]
fn test_memoized_stream_computes_each_element_once(runs: Rc<Cell<usize>>) {
    let squares = counted_squares(&runs).memoized();

    assert_eq!(squares.take(5).to_list(), vec![0, 1, 4, 9, 16]);
    let after_first = runs.get();
    assert_eq!(squares.take(5).to_list(), vec![0, 1, 4, 9, 16]);
    assert_eq!(squares.get(4), Ok(16));

    assert_eq!(runs.get(), after_first);
}

#[rstest]
fn test_memoized_tails_are_shared(runs: Rc<Cell<usize>>) {
    let squares = counted_squares(&runs).memoized();
    assert!(squares.is_memoized());
    assert!(!squares.is_tail_realized());

    let first = squares.tail().unwrap();
    let second = squares.tail().unwrap();

    assert!(first.ptr_eq(&second));
    assert!(first.is_memoized());
    assert!(squares.is_tail_realized());
}

#[rstest]
fn test_memoized_stream_extends_on_demand(runs: Rc<Cell<usize>>) {
    let squares = counted_squares(&runs).memoized();

    assert_eq!(squares.get(2), Ok(4));
    let after_short = runs.get();
    assert_eq!(squares.get(6), Ok(36));

    assert_eq!(runs.get() - after_short, 4);
}

#[rstest]
fn test_memoized_debug_grows_with_forcing() {
    let naturals = LazyStream::from(0).memoized();
    assert_eq!(format!("{naturals:?}"), "LazyStream[0, ..]");

    let _ = naturals.drop(3);
    assert_eq!(format!("{naturals:?}"), "LazyStream[0, 1, 2, 3, ..]");
}

#[rstest]
fn test_memoized_finite_stream_matches_source() {
    let source = LazyStream::range(0, 6).filter(|n| n % 2 == 1);
    let cached = source.memoized();

    assert_eq!(cached.to_list(), source.to_list());
    assert_eq!(cached.reverse().to_list(), vec![5, 3, 1]);
}

#[rstest]
fn test_dropping_long_memoized_stream() {
    let naturals = LazyStream::from(0_u32).memoized();
    assert_eq!(naturals.get(200_000), Ok(200_000));
    drop(naturals);
}
