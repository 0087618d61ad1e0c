//! The stream cell and its two primitive operations.
//!
//! A [`LazyStream`] is either empty or a shared node holding a head value
//! and a tail. A tail is realized (an existing stream, shared), deferred (a
//! generator that builds the tail each time it is forced), or memoized (a
//! generator run at most once, its result cached in a [`Lazy`] cell).
//! Everything else in this module family is written against
//! [`LazyStream::is_empty`] and [`LazyStream::force_tail`].

use std::fmt;

use super::{ReferenceCounter, StreamError, StreamResult};
use crate::control::Lazy;

/// A suspended computation producing the rest of a stream.
pub(super) type TailGenerator<T> = Box<dyn Fn() -> LazyStream<T>>;

/// A tail computed on first force and cached.
pub(super) type MemoizedTail<T> = Lazy<LazyStream<T>, Box<dyn FnOnce() -> LazyStream<T>>>;

pub(super) enum Tail<T> {
    Realized(LazyStream<T>),
    Deferred(TailGenerator<T>),
    Memoized(MemoizedTail<T>),
}

pub(super) struct Node<T> {
    pub(super) head: T,
    pub(super) tail: Tail<T>,
}

impl<T> Node<T> {
    /// Produces the tail of a node. Deferred tails are rebuilt on every call.
    pub(super) fn force_tail(&self) -> LazyStream<T> {
        match &self.tail {
            Tail::Realized(tail) => tail.clone(),
            Tail::Deferred(generator) => {
                log::trace!("forcing deferred stream tail");
                generator()
            }
            Tail::Memoized(cell) => cell.force().clone(),
        }
    }

    /// The tail if it exists without running anything.
    fn realized_tail(&self) -> Option<LazyStream<T>> {
        match &self.tail {
            Tail::Realized(tail) => Some(tail.clone()),
            Tail::Memoized(cell) => cell.get().map(|tail| tail.clone()),
            Tail::Deferred(_) => None,
        }
    }
}

/// An immutable, lazily evaluated, singly-linked stream.
///
/// Cloning a stream copies one reference-counted pointer. Realized tails are
/// shared between every stream that reaches them; deferred tails are
/// recomputed on every force unless the stream is
/// [`memoized`](LazyStream::memoized).
///
/// Operations that must see the whole stream (`size`, `to_list`, `reverse`,
/// `fold_left`, and unsuccessful searches) do not terminate on an infinite
/// stream. Bound the stream with [`take`](LazyStream::take) first.
///
/// # Examples
///
/// ```rust
/// use lazy_stream::stream::{LazyStream, cons};
///
/// let numbers = cons(1, &cons(2, &LazyStream::nil()));
/// assert_eq!(numbers.head(), Ok(&1));
/// assert_eq!(numbers.to_list(), vec![1, 2]);
///
/// let naturals = LazyStream::from(0_u64);
/// assert_eq!(naturals.take(3).to_list(), vec![0, 1, 2]);
/// ```
pub struct LazyStream<T> {
    pub(super) node: Option<ReferenceCounter<Node<T>>>,
}

impl<T> LazyStream<T> {
    /// The empty stream.
    #[inline]
    #[must_use]
    pub const fn nil() -> Self {
        Self { node: None }
    }

    /// Builds a node whose tail is produced by `generator` when forced.
    ///
    /// The generator runs again on every force of this node; it must build
    /// its result from what it captured and must not capture a stream derived
    /// from the one being built.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// fn countdown(n: u32) -> LazyStream<u32> {
    ///     if n == 0 {
    ///         return LazyStream::nil();
    ///     }
    ///     LazyStream::deferred(n, move || countdown(n - 1))
    /// }
    ///
    /// assert_eq!(countdown(3).to_list(), vec![3, 2, 1]);
    /// ```
    pub fn deferred<F>(head: T, generator: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::from_node(Node {
            head,
            tail: Tail::Deferred(Box::new(generator)),
        })
    }

    /// Prepends `value`, sharing `self` as the realized tail.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let tail = LazyStream::range(2, 4);
    /// let stream = tail.cons(1);
    /// assert_eq!(stream.to_list(), vec![1, 2, 3]);
    /// assert!(stream.force_tail().unwrap().ptr_eq(&tail));
    /// ```
    #[must_use]
    pub fn cons(&self, value: T) -> Self {
        Self::from_node(Node {
            head: value,
            tail: Tail::Realized(self.clone()),
        })
    }

    pub(super) fn from_node(node: Node<T>) -> Self {
        Self {
            node: Some(ReferenceCounter::new(node)),
        }
    }

    /// Whether this is the empty stream. Never forces anything.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// [`StreamError::EmptySequence`] if the stream is empty.
    pub fn head(&self) -> StreamResult<&T> {
        self.node
            .as_ref()
            .map(|node| &node.head)
            .ok_or(StreamError::empty("head"))
    }

    /// The stream without its first element.
    ///
    /// A realized tail is returned as is; a deferred tail is computed by
    /// running its generator, once per call.
    ///
    /// # Errors
    ///
    /// [`StreamError::EmptySequence`] if the stream is empty.
    pub fn force_tail(&self) -> StreamResult<Self> {
        self.node
            .as_ref()
            .map(|node| node.force_tail())
            .ok_or(StreamError::empty("tail"))
    }

    /// Same as [`force_tail`](LazyStream::force_tail).
    ///
    /// # Errors
    ///
    /// [`StreamError::EmptySequence`] if the stream is empty.
    #[inline]
    pub fn tail(&self) -> StreamResult<Self> {
        self.force_tail()
    }

    /// The head and the forced tail, or `None` for the empty stream.
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.node
            .as_ref()
            .map(|node| (&node.head, node.force_tail()))
    }

    /// Whether the first node's tail exists without forcing: a realized tail
    /// or an already computed memoized one. `false` when empty.
    pub fn is_tail_realized(&self) -> bool {
        self.node.as_ref().is_some_and(|node| match &node.tail {
            Tail::Realized(_) => true,
            Tail::Memoized(cell) => cell.is_initialized(),
            Tail::Deferred(_) => false,
        })
    }

    /// Whether both streams are the same node (or both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Clone> LazyStream<T> {
    /// A forcing iterator over the elements, yielding clones.
    ///
    /// The tail of an element is forced only when the element after it is
    /// requested, so bounding the iterator with `take` never evaluates past
    /// the last element taken. The iterator is infinite when the stream is.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let squares: Vec<u32> = LazyStream::from(1_u32).iter().map(|n| n * n).take(4).collect();
    /// assert_eq!(squares, vec![1, 4, 9, 16]);
    /// ```
    #[inline]
    pub fn iter(&self) -> LazyStreamIterator<T> {
        LazyStreamIterator {
            current: self.clone(),
            yielded: None,
        }
    }
}

/// Prepends `value` to `tail`. The tail is realized and shared.
pub fn cons<T>(value: T, tail: &LazyStream<T>) -> LazyStream<T> {
    tail.cons(value)
}

/// Iterator returned by [`LazyStream::iter`].
pub struct LazyStreamIterator<T> {
    current: LazyStream<T>,
    // Node whose head was returned last; its tail is forced lazily.
    yielded: Option<ReferenceCounter<Node<T>>>,
}

impl<T: Clone> Iterator for LazyStreamIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(previous) = self.yielded.take() {
            self.current = previous.force_tail();
        }
        let node = self.current.node.take()?;
        let head = node.head.clone();
        self.yielded = Some(node);
        Some(head)
    }
}

impl<T> Clone for LazyStream<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<T> Default for LazyStream<T> {
    #[inline]
    fn default() -> Self {
        Self::nil()
    }
}

impl<T> Drop for LazyStream<T> {
    // Unlinks uniquely owned realized nodes one at a time so that releasing
    // a long materialized stream does not recurse once per node.
    fn drop(&mut self) {
        let mut current = self.node.take();
        while let Some(node) = current {
            current = match ReferenceCounter::try_unwrap(node) {
                Ok(Node {
                    tail: Tail::Realized(mut tail),
                    ..
                }) => tail.node.take(),
                Ok(Node {
                    tail: Tail::Memoized(cell),
                    ..
                }) => cell.into_initialized().and_then(|mut tail| tail.node.take()),
                Ok(_) | Err(_) => None,
            };
        }
    }
}

impl<T> FromIterator<T> for LazyStream<T> {
    /// Builds a finite stream whose tails are all realized.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut elements: Vec<T> = iter.into_iter().collect();
        let mut stream = Self::nil();
        while let Some(element) = elements.pop() {
            stream = stream.cons(element);
        }
        stream
    }
}

impl<T: Clone> IntoIterator for LazyStream<T> {
    type Item = T;
    type IntoIter = LazyStreamIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        LazyStreamIterator {
            current: self,
            yielded: None,
        }
    }
}

impl<T: Clone> IntoIterator for &LazyStream<T> {
    type Item = T;
    type IntoIter = LazyStreamIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shows the prefix that exists without forcing; the first unforced tail
/// is rendered as `..`.
impl<T: fmt::Debug> fmt::Debug for LazyStream<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "LazyStream[")?;
        let mut current = self.clone();
        let mut first = true;
        while let Some(node) = current.node.take() {
            if !first {
                write!(formatter, ", ")?;
            }
            first = false;
            write!(formatter, "{:?}", node.head)?;
            match node.realized_tail() {
                Some(tail) => current = tail,
                None => write!(formatter, ", ..")?,
            }
        }
        write!(formatter, "]")
    }
}
