//! Opt-in memoization of forced tails.
//!
//! By default a deferred tail is rebuilt every time it is forced. A
//! memoized stream instead keeps each tail in a [`Lazy`] cell, so the
//! upstream work behind every node runs at most once and repeated
//! traversals see the very same nodes.

use super::node::{MemoizedTail, Node, Tail};
use super::{LazyStream, ReferenceCounter};

impl<T: Clone + 'static> LazyStream<T> {
    /// A view of this stream whose tails are computed at most once.
    ///
    /// Only the first node is built here. Each tail of the result is a
    /// memoized view of the corresponding upstream tail, created on first
    /// force and cached in the node.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let runs = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&runs);
    /// let squares = LazyStream::from(1_u64)
    ///     .map(move |n| {
    ///         counter.set(counter.get() + 1);
    ///         n * n
    ///     })
    ///     .memoized();
    ///
    /// assert_eq!(squares.take(4).to_list(), vec![1, 4, 9, 16]);
    /// assert_eq!(squares.take(4).to_list(), vec![1, 4, 9, 16]);
    /// assert_eq!(runs.get(), 4);
    /// ```
    #[must_use]
    pub fn memoized(&self) -> Self {
        let Some(node) = self.node.as_ref() else {
            return Self::nil();
        };
        if let Tail::Memoized(_) = node.tail {
            return self.clone();
        }

        let upstream = ReferenceCounter::clone(node);
        let cell: MemoizedTail<T> = MemoizedTail::new(Box::new(move || {
            log::trace!("computing memoized stream tail");
            upstream.force_tail().memoized()
        }));
        Self::from_node(Node {
            head: node.head.clone(),
            tail: Tail::Memoized(cell),
        })
    }

    /// Whether the first node caches its tail.
    pub fn is_memoized(&self) -> bool {
        self.node
            .as_ref()
            .is_some_and(|node| matches!(node.tail, Tail::Memoized(_)))
    }
}
