//! Compute-once cells for single-threaded code.
//!
//! [`Lazy`] holds either a pending initializer or the value it produced.
//! The initializer runs on the first [`Lazy::force`]; every later call hands
//! back the cached value. Memoized streams store their tails in these cells.
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::control::Lazy;
//! use std::cell::Cell;
//!
//! let runs = Cell::new(0);
//! let area = Lazy::new(|| {
//!     runs.set(runs.get() + 1);
//!     std::f64::consts::PI * 5.0 * 5.0
//! });
//!
//! assert_eq!(runs.get(), 0);
//! assert!((*area.force() - 78.539_816).abs() < 1e-5);
//! assert!((*area.force() - 78.539_816).abs() < 1e-5);
//! assert_eq!(runs.get(), 1);
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use thiserror::Error;

/// Error returned by [`Lazy::into_inner`] when the initializer panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Lazy: initializer panicked, the value is unavailable")]
pub struct LazyPoisonedError;

/// Where a [`Lazy`] cell is in its lifecycle.
#[derive(Debug)]
pub enum LazyState<T, F> {
    /// Waiting to run the initializer.
    Uninit(F),
    /// The initializer ran and produced this value.
    Init(T),
    /// The initializer panicked while running.
    Poisoned,
}

/// A value computed on first access and cached afterwards.
///
/// `Lazy` is not `Sync`; use [`ConcurrentLazy`](super::ConcurrentLazy) when
/// the cell is shared between threads.
///
/// # Panics
///
/// [`force`](Lazy::force) panics if the cell is poisoned, or if the
/// initializer re-enters `force` on the same cell.
pub struct Lazy<T, F = fn() -> T> {
    state: RefCell<LazyState<T, F>>,
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Wraps `initializer` without running it.
    #[inline]
    pub const fn new(initializer: F) -> Self {
        Self {
            state: RefCell::new(LazyState::Uninit(initializer)),
        }
    }

    /// Returns the value, running the initializer if this is the first call.
    ///
    /// ```rust
    /// use lazy_stream::control::Lazy;
    ///
    /// let greeting = Lazy::new(|| "hello".to_string());
    /// assert_eq!(greeting.force().len(), 5);
    /// ```
    pub fn force(&self) -> Ref<'_, T> {
        self.ensure_initialized();
        Ref::map(self.state.borrow(), |state| match state {
            LazyState::Init(value) => value,
            LazyState::Uninit(_) | LazyState::Poisoned => {
                unreachable!("Lazy is initialized after ensure_initialized")
            }
        })
    }

    /// Returns the value mutably, running the initializer if needed.
    ///
    /// Later calls to [`force`](Lazy::force) observe the modification.
    ///
    /// ```rust
    /// use lazy_stream::control::Lazy;
    ///
    /// let mut pi = Lazy::new(|| std::f64::consts::PI);
    /// *pi.force_mut() = 3.14;
    /// assert_eq!(*pi.force(), 3.14);
    /// ```
    pub fn force_mut(&mut self) -> RefMut<'_, T> {
        self.ensure_initialized();
        RefMut::map(self.state.borrow_mut(), |state| match state {
            LazyState::Init(value) => value,
            LazyState::Uninit(_) | LazyState::Poisoned => {
                unreachable!("Lazy is initialized after ensure_initialized")
            }
        })
    }

    /// Consumes the cell and returns its value, computing it if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`LazyPoisonedError`] if an earlier initialization panicked.
    pub fn into_inner(self) -> Result<T, LazyPoisonedError> {
        match self.state.into_inner() {
            LazyState::Init(value) => Ok(value),
            LazyState::Uninit(initializer) => Ok(initializer()),
            LazyState::Poisoned => Err(LazyPoisonedError),
        }
    }

    /// Builds a new cell that forces this one and applies `function`.
    ///
    /// ```rust
    /// use lazy_stream::control::Lazy;
    ///
    /// let doubled = Lazy::new(|| 21).map(|value| value * 2);
    /// assert_eq!(*doubled.force(), 42);
    /// ```
    pub fn map<U, G>(self, function: G) -> Lazy<U, impl FnOnce() -> U>
    where
        G: FnOnce(T) -> U,
    {
        Lazy::new(move || match self.into_inner() {
            Ok(value) => function(value),
            Err(error) => panic!("{error}"),
        })
    }

    fn ensure_initialized(&self) {
        let initializer = {
            let mut state = self.state.borrow_mut();
            match &*state {
                LazyState::Init(_) => return,
                LazyState::Poisoned => panic!("Lazy instance has been poisoned"),
                LazyState::Uninit(_) => {}
            }
            // Poisoned stays in place if the initializer unwinds.
            match std::mem::replace(&mut *state, LazyState::Poisoned) {
                LazyState::Uninit(initializer) => initializer,
                LazyState::Init(_) | LazyState::Poisoned => unreachable!(),
            }
        };

        log::trace!("running Lazy initializer");
        let value = initializer();
        *self.state.borrow_mut() = LazyState::Init(value);
    }
}

impl<T> Lazy<T> {
    /// A cell that already holds `value`.
    #[inline]
    pub const fn new_with_value(value: T) -> Self {
        Self {
            state: RefCell::new(LazyState::Init(value)),
        }
    }
}

impl<T, F> Lazy<T, F> {
    /// Returns the value if it has already been computed; never initializes.
    pub fn get(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            LazyState::Init(value) => Some(value),
            LazyState::Uninit(_) | LazyState::Poisoned => None,
        })
        .ok()
    }

    /// Consumes the cell, returning the value only if it was already computed.
    /// A pending initializer is dropped without running.
    pub fn into_initialized(self) -> Option<T> {
        match self.state.into_inner() {
            LazyState::Init(value) => Some(value),
            LazyState::Uninit(_) | LazyState::Poisoned => None,
        }
    }

    /// Whether the initializer has run to completion.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Init(_))
    }

    /// Whether the initializer panicked.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Poisoned)
    }
}

impl<T: Default> Default for Lazy<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            LazyState::Init(value) => formatter.debug_tuple("Lazy").field(value).finish(),
            LazyState::Uninit(_) => formatter.write_str("Lazy(<uninit>)"),
            LazyState::Poisoned => formatter.write_str("Lazy(<poisoned>)"),
        }
    }
}
