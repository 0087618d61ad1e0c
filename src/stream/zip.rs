//! Pairwise combination of streams and its inverse.

use super::{LazyStream, ReferenceCounter};

impl<T: 'static> LazyStream<T> {
    /// Pairs corresponding elements, lazily, stopping at the shorter stream.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let letters: LazyStream<char> = "abc".chars().collect();
    /// let pairs = LazyStream::from(1).zip(&letters);
    /// assert_eq!(pairs.to_list(), vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    /// ```
    pub fn zip<U>(&self, other: &LazyStream<U>) -> LazyStream<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        self.zip_with(other, |left, right| (left.clone(), right.clone()))
    }

    /// Combines corresponding elements with `function`, lazily, stopping at
    /// the shorter stream.
    pub fn zip_with<U, V, F>(&self, other: &LazyStream<U>, function: F) -> LazyStream<V>
    where
        U: 'static,
        V: 'static,
        F: Fn(&T, &U) -> V + 'static,
    {
        zip_shared(self, other, ReferenceCounter::new(function))
    }
}

impl<A: Clone + 'static, B: Clone + 'static> LazyStream<(A, B)> {
    /// Splits a stream of pairs into the stream of first components and the
    /// stream of second components.
    ///
    /// Both halves are lazy projections of `self`, so unzipping an infinite
    /// stream is fine and nothing is forced until a half is traversed.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let pairs = LazyStream::from(0).map(|n| (*n, n * n));
    /// let (numbers, squares) = pairs.unzip();
    /// assert_eq!(numbers.take(3).to_list(), vec![0, 1, 2]);
    /// assert_eq!(squares.take(3).to_list(), vec![0, 1, 4]);
    /// ```
    pub fn unzip(&self) -> (LazyStream<A>, LazyStream<B>) {
        (
            self.map(|(first, _)| first.clone()),
            self.map(|(_, second)| second.clone()),
        )
    }
}

/// Splits a stream of pairs into two streams. See [`LazyStream::unzip`].
pub fn unzip<A, B>(pairs: &LazyStream<(A, B)>) -> (LazyStream<A>, LazyStream<B>)
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    pairs.unzip()
}

fn zip_shared<T, U, V, F>(
    left: &LazyStream<T>,
    right: &LazyStream<U>,
    function: ReferenceCounter<F>,
) -> LazyStream<V>
where
    T: 'static,
    U: 'static,
    V: 'static,
    F: Fn(&T, &U) -> V + 'static,
{
    let (Some(left), Some(right)) = (left.node.as_ref(), right.node.as_ref()) else {
        return LazyStream::nil();
    };
    let head = function(&left.head, &right.head);
    let left = ReferenceCounter::clone(left);
    let right = ReferenceCounter::clone(right);
    LazyStream::deferred(head, move || {
        zip_shared(
            &left.force_tail(),
            &right.force_tail(),
            ReferenceCounter::clone(&function),
        )
    })
}
