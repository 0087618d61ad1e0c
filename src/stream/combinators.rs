//! Searching, filtering, mapping, slicing, and folding.
//!
//! Lazy combinators (`filter`, `map`, `take`, `take_while`) return a node
//! whose tail generator captures the combinator state and the upstream
//! node; the upstream tail is forced only when the new tail is. Everything
//! else walks the stream in a loop and forces as it goes.
//!
//! # Divergence
//!
//! `size`, `to_list`, `reverse`, `fold_left`, `reduce_left`, and searches
//! that never find a match (`contains`, `exists`, `find_first`, `filter`
//! with no further match, `drop_while`) run forever on an infinite stream.
//! Nothing here caps the work; bound the stream with `take` first.

use super::{LazyStream, ReferenceCounter, StreamError, StreamResult};

impl<T> LazyStream<T> {
    /// Counts the elements by walking the whole stream.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut current = self.clone();
        while let Some(node) = current.node.take() {
            count += 1;
            current = node.force_tail();
        }
        count
    }

    /// Whether `value` occurs in the stream.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.exists(|element| element == value)
    }

    /// Whether any element satisfies `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        let mut current = self.clone();
        while let Some(node) = current.node.take() {
            if predicate(&node.head) {
                return true;
            }
            current = node.force_tail();
        }
        false
    }

    /// Skips the first `count` elements. Shorter streams yield the empty
    /// stream.
    #[must_use]
    pub fn drop(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count {
            match current.node.take() {
                Some(node) => current = node.force_tail(),
                None => break,
            }
        }
        current
    }

    /// Skips leading elements while they satisfy `predicate`.
    #[must_use]
    pub fn drop_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        let mut current = self.clone();
        while let Some(node) = current.node.as_ref() {
            if !predicate(&node.head) {
                break;
            }
            let next = node.force_tail();
            current = next;
        }
        current
    }

    /// Skips leading elements while they do not satisfy `predicate`.
    #[must_use]
    pub fn drop_while_not<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.drop_while(|element| !predicate(element))
    }

    /// Left fold: `function(function(function(start, e0), e1), ...)`.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let sum = LazyStream::range(1, 6).fold_left(0, |total, n| total + n);
    /// assert_eq!(sum, 15);
    /// ```
    pub fn fold_left<U, F>(&self, start: U, mut function: F) -> U
    where
        F: FnMut(U, &T) -> U,
    {
        let mut accumulator = start;
        let mut current = self.clone();
        while let Some(node) = current.node.take() {
            accumulator = function(accumulator, &node.head);
            current = node.force_tail();
        }
        accumulator
    }
}

impl<T: Clone> LazyStream<T> {
    /// The element at `index`, counting from zero.
    ///
    /// # Errors
    ///
    /// [`StreamError::IndexOutOfRange`] if the stream has `index` or fewer
    /// elements.
    pub fn get(&self, index: usize) -> StreamResult<T> {
        let mut current = self.clone();
        let mut position = 0;
        while let Some(node) = current.node.take() {
            if position == index {
                return Ok(node.head.clone());
            }
            position += 1;
            current = node.force_tail();
        }
        Err(StreamError::IndexOutOfRange {
            index,
            length: position,
        })
    }

    /// A one-element stream holding the first element that satisfies
    /// `predicate`, or the empty stream.
    #[must_use]
    pub fn find_first<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        let found = self.drop_while_not(predicate);
        match found.node.as_ref() {
            Some(node) => Self::nil().cons(node.head.clone()),
            None => Self::nil(),
        }
    }

    /// A one-element stream holding the first element that does not satisfy
    /// `predicate`, or the empty stream.
    #[must_use]
    pub fn find_first_not<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.find_first(|element| !predicate(element))
    }

    /// The elements in reverse order, as a fully realized stream.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.fold_left(Self::nil(), |reversed, element| reversed.cons(element.clone()))
    }

    /// Collects every element into a `Vec`, in order.
    pub fn to_list(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Folds the tail with the head as the starting value.
    ///
    /// # Errors
    ///
    /// [`StreamError::EmptySequence`] if the stream is empty.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let product = LazyStream::range(1, 6).reduce_left(|total, n| total * n);
    /// assert_eq!(product, Ok(120));
    /// ```
    pub fn reduce_left<F>(&self, function: F) -> StreamResult<T>
    where
        F: FnMut(T, &T) -> T,
    {
        let node = self.node.as_ref().ok_or(StreamError::empty("reduce_left"))?;
        Ok(node.force_tail().fold_left(node.head.clone(), function))
    }
}

impl<T: Clone + 'static> LazyStream<T> {
    /// The elements that satisfy `predicate`, lazily.
    ///
    /// Building the filtered stream searches for the first match; each
    /// further match is searched for when the previous tail is forced.
    ///
    /// ```rust
    /// use lazy_stream::stream::LazyStream;
    ///
    /// let multiples = LazyStream::from(1).filter(|n| n % 4 == 0);
    /// assert_eq!(multiples.take(3).to_list(), vec![4, 8, 12]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        filter_shared(self.clone(), ReferenceCounter::new(predicate))
    }

    /// The elements that do not satisfy `predicate`, lazily.
    #[must_use]
    pub fn filter_not<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter(move |element| !predicate(element))
    }

    /// Applies `function` to every element, lazily.
    ///
    /// The mapped head is computed immediately; the rest on demand.
    pub fn map<U, F>(&self, function: F) -> LazyStream<U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        map_shared(self, ReferenceCounter::new(function))
    }

    /// The first `count` elements, lazily. Never forces past the last
    /// element it yields.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        let Some(node) = self.node.as_ref() else {
            return Self::nil();
        };
        match count {
            0 => Self::nil(),
            1 => Self::nil().cons(node.head.clone()),
            _ => {
                let upstream = ReferenceCounter::clone(node);
                Self::deferred(node.head.clone(), move || {
                    upstream.force_tail().take(count - 1)
                })
            }
        }
    }

    /// The longest prefix whose elements satisfy `predicate`, lazily.
    #[must_use]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        take_while_shared(self, ReferenceCounter::new(predicate))
    }
}

fn filter_shared<T, P>(mut stream: LazyStream<T>, predicate: ReferenceCounter<P>) -> LazyStream<T>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    while let Some(node) = stream.node.take() {
        if predicate(&node.head) {
            let head = node.head.clone();
            return LazyStream::deferred(head, move || {
                filter_shared(node.force_tail(), ReferenceCounter::clone(&predicate))
            });
        }
        stream = node.force_tail();
    }
    LazyStream::nil()
}

fn map_shared<T, U, F>(stream: &LazyStream<T>, function: ReferenceCounter<F>) -> LazyStream<U>
where
    T: 'static,
    U: 'static,
    F: Fn(&T) -> U + 'static,
{
    let Some(node) = stream.node.as_ref() else {
        return LazyStream::nil();
    };
    let head = function(&node.head);
    let upstream = ReferenceCounter::clone(node);
    LazyStream::deferred(head, move || {
        map_shared(&upstream.force_tail(), ReferenceCounter::clone(&function))
    })
}

fn take_while_shared<T, P>(stream: &LazyStream<T>, predicate: ReferenceCounter<P>) -> LazyStream<T>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    match stream.node.as_ref() {
        Some(node) if predicate(&node.head) => {
            let upstream = ReferenceCounter::clone(node);
            LazyStream::deferred(node.head.clone(), move || {
                take_while_shared(&upstream.force_tail(), ReferenceCounter::clone(&predicate))
            })
        }
        _ => LazyStream::nil(),
    }
}
