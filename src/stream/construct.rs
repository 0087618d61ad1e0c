//! Stream constructors: arithmetic progressions, ranges, and generators.
//!
//! Every constructor returns a stream whose first node is built eagerly and
//! whose tail is a generator capturing only the values needed to resume.

use std::ops::{Add, Sub};

use num_traits::{One, Zero};

use super::{LazyStream, ReferenceCounter};

impl<T: Clone + 'static> LazyStream<T> {
    /// The infinite stream `seed, f(seed), f(f(seed)), ...`.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let powers = LazyStream::iterate(1_u64, |n| n * 2);
    /// assert_eq!(powers.take(5).to_list(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn iterate<F>(seed: T, function: F) -> Self
    where
        F: Fn(&T) -> T + 'static,
    {
        iterate_shared(seed, ReferenceCounter::new(function))
    }

    /// The infinite stream `value, value, value, ...`.
    pub fn repeat(value: T) -> Self {
        let next = value.clone();
        Self::deferred(value, move || Self::repeat(next.clone()))
    }

    /// The infinite stream `n, n+1, n+2, ...`.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// assert_eq!(LazyStream::from(3).take(5).to_list(), vec![3, 4, 5, 6, 7]);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from(n: T) -> Self
    where
        T: Add<Output = T> + One,
    {
        Self::from_step(n, T::one())
    }

    /// The infinite arithmetic progression `n, n+step, n+2*step, ...`.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// assert_eq!(LazyStream::from_step(10, -2).take(4).to_list(), vec![10, 8, 6, 4]);
    /// ```
    pub fn from_step(n: T, step: T) -> Self
    where
        T: Add<Output = T>,
    {
        Self::iterate(n, move |current| current.clone() + step.clone())
    }

    /// The half-open range `[from, to)`, counting up or down by one.
    ///
    /// Empty when `from == to`. Counting down subtracts one, so unsigned
    /// element types work in both directions.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// assert_eq!(LazyStream::range(1, 5).to_list(), vec![1, 2, 3, 4]);
    /// assert_eq!(LazyStream::range(5_u8, 1).to_list(), vec![5, 4, 3, 2]);
    /// assert!(LazyStream::range(1, 1).is_empty());
    /// ```
    pub fn range(from: T, to: T) -> Self
    where
        T: PartialOrd + Add<Output = T> + Sub<Output = T> + Zero + One,
    {
        if to > from {
            Self::range_step(from, to, T::one())
        } else if from > to {
            descending(from, to)
        } else {
            Self::nil()
        }
    }

    /// The half-open range `[from, to)` advancing by `step`.
    ///
    /// The range is non-empty only when
    /// `(to > from && step >= 0) || (from > to && step <= 0)`. A zero step
    /// with `to != from` therefore repeats `from` forever. The next element
    /// is only computed once it is known to lie before `to`, so ranges ending
    /// near the bounds of the element type do not overflow.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// assert_eq!(LazyStream::range_step(0, 10, 3).to_list(), vec![0, 3, 6, 9]);
    /// assert_eq!(LazyStream::range_step(10, 0, -4).to_list(), vec![10, 6, 2]);
    /// assert!(LazyStream::range_step(0, 10, -1).is_empty());
    /// assert_eq!(LazyStream::range_step(250_u8, 255, 10).to_list(), vec![250]);
    /// ```
    pub fn range_step(from: T, to: T, step: T) -> Self
    where
        T: PartialOrd + Add<Output = T> + Sub<Output = T> + Zero,
    {
        let zero = T::zero();
        let in_range = (to > from && step >= zero) || (from > to && step <= zero);
        if !in_range {
            return Self::nil();
        }
        stepped(from, to, step)
    }
}

fn stepped<T>(from: T, to: T, step: T) -> LazyStream<T>
where
    T: Clone + PartialOrd + Add<Output = T> + Sub<Output = T> + Zero + 'static,
{
    let current = from.clone();
    LazyStream::deferred(from, move || match next_step(&current, &to, &step) {
        Some(next) => stepped(next, to.clone(), step.clone()),
        None => LazyStream::nil(),
    })
}

/// `current + step` if it still lies strictly before `to`.
///
/// Only differences that stay within the type are evaluated: below zero
/// an ascending step cannot overflow, above zero a descending one cannot,
/// and otherwise `to - current` is compared against `step` instead.
fn next_step<T>(current: &T, to: &T, step: &T) -> Option<T>
where
    T: Clone + PartialOrd + Add<Output = T> + Sub<Output = T> + Zero,
{
    let zero = T::zero();
    let advance = || current.clone() + step.clone();
    if to > current {
        if *current < zero {
            let next = advance();
            return (next < *to).then_some(next);
        }
        (to.clone() - current.clone() > *step).then(advance)
    } else {
        if *current > zero {
            let next = advance();
            return (next > *to).then_some(next);
        }
        (to.clone() - current.clone() < *step).then(advance)
    }
}

fn iterate_shared<T, F>(seed: T, function: ReferenceCounter<F>) -> LazyStream<T>
where
    T: Clone + 'static,
    F: Fn(&T) -> T + 'static,
{
    let current = seed.clone();
    LazyStream::deferred(seed, move || {
        iterate_shared(function(&current), ReferenceCounter::clone(&function))
    })
}

fn descending<T>(from: T, to: T) -> LazyStream<T>
where
    T: Clone + PartialOrd + Sub<Output = T> + One + 'static,
{
    if from <= to {
        return LazyStream::nil();
    }

    let current = from.clone();
    LazyStream::deferred(from, move || descending(current.clone() - T::one(), to.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 5, vec![1, 2, 3, 4])]
    #[case(5, 1, vec![5, 4, 3, 2])]
    #[case(-2, 1, vec![-2, -1, 0])]
    #[case(1, 1, vec![])]
    fn test_range(#[case] from: i32, #[case] to: i32, #[case] expected: Vec<i32>) {
        assert_eq!(LazyStream::range(from, to).to_list(), expected);
    }

    #[rstest]
    #[case(0, 7, 2, vec![0, 2, 4, 6])]
    #[case(7, 0, -3, vec![7, 4, 1])]
    #[case(0, 7, -1, vec![])]
    #[case(7, 0, 1, vec![])]
    #[case(3, 3, 0, vec![])]
    fn test_range_step(
        #[case] from: i32,
        #[case] to: i32,
        #[case] step: i32,
        #[case] expected: Vec<i32>,
    ) {
        assert_eq!(LazyStream::range_step(from, to, step).to_list(), expected);
    }

    #[rstest]
    fn test_range_step_zero_step_repeats_forever() {
        let stream = LazyStream::range_step(1, 5, 0);
        assert_eq!(stream.take(6).to_list(), vec![1; 6]);
        assert!(!stream.drop(1_000).is_empty());
    }

    #[rstest]
    #[case(i32::MAX - 1, i32::MAX, 5, vec![i32::MAX - 1])]
    #[case(i32::MAX - 10, i32::MAX, 4, vec![i32::MAX - 10, i32::MAX - 6, i32::MAX - 2])]
    #[case(i32::MIN + 1, i32::MIN, -5, vec![i32::MIN + 1])]
    #[case(i32::MIN, i32::MAX, i32::MAX, vec![i32::MIN, -1, i32::MAX - 1])]
    #[case(i32::MAX, i32::MIN, i32::MIN, vec![i32::MAX, -1])]
    fn test_range_step_near_type_bounds(
        #[case] from: i32,
        #[case] to: i32,
        #[case] step: i32,
        #[case] expected: Vec<i32>,
    ) {
        assert_eq!(LazyStream::range_step(from, to, step).to_list(), expected);
    }

    #[rstest]
    fn test_unsigned_range_step_ending_at_max() {
        assert_eq!(LazyStream::range_step(250_u8, 255, 10).to_list(), vec![250]);
        assert_eq!(LazyStream::range_step(240_u8, 255, 5).to_list(), vec![240, 245, 250]);
        assert_eq!(LazyStream::range(253_u8, 255).to_list(), vec![253, 254]);
    }

    #[rstest]
    fn test_unsigned_descending_range() {
        assert_eq!(LazyStream::range(3_u32, 0).to_list(), vec![3, 2, 1]);
    }

    #[rstest]
    fn test_float_range() {
        assert_eq!(
            LazyStream::range_step(0.0, 1.0, 0.25).to_list(),
            vec![0.0, 0.25, 0.5, 0.75]
        );
    }

    #[rstest]
    fn test_from_is_infinite() {
        assert_eq!(LazyStream::from(0_u64).get(10_000), Ok(10_000));
    }

    #[rstest]
    fn test_repeat() {
        assert_eq!(LazyStream::repeat('x').take(3).to_list(), vec!['x'; 3]);
    }
}
