//! Compute-once cells that can be shared between threads.
//!
//! [`ConcurrentLazy`] guarantees the initializer runs at most once no matter
//! how many threads race to force it. Once the value exists, reading it takes
//! no lock. The initializer itself sits behind a `parking_lot` mutex and is
//! taken out exactly once.
//!
//! If the initializer panics the cell is poisoned: `force` panics from then
//! on and [`ConcurrentLazy::into_inner`] reports
//! [`ConcurrentLazyPoisonedError`].
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::control::ConcurrentLazy;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let table = Arc::new(ConcurrentLazy::new(|| (0..10).map(|n| n * n).collect::<Vec<u64>>()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let table = Arc::clone(&table);
//!         thread::spawn(move || table.force()[9])
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 81);
//! }
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

/// Error returned by [`ConcurrentLazy::into_inner`] when the initializer
/// panicked before producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ConcurrentLazy: initializer already consumed or poisoned")]
pub struct ConcurrentLazyPoisonedError;

/// A thread-safe value computed on first access and cached afterwards.
///
/// `ConcurrentLazy<T, F>` is `Sync` whenever `T: Send + Sync` and `F: Send`.
pub struct ConcurrentLazy<T, F = fn() -> T> {
    value: OnceLock<T>,
    initializer: Mutex<Option<F>>,
    poisoned: AtomicBool,
}

impl<T, F: FnOnce() -> T> ConcurrentLazy<T, F> {
    /// Wraps `initializer` without running it.
    pub fn new(initializer: F) -> Self {
        Self {
            value: OnceLock::new(),
            initializer: Mutex::new(Some(initializer)),
            poisoned: AtomicBool::new(false),
        }
    }

    /// Returns the value, running the initializer if no thread has yet.
    ///
    /// Threads that arrive while another thread is initializing block until
    /// the value is ready.
    ///
    /// # Panics
    ///
    /// Panics if the initializer panicked on an earlier call.
    pub fn force(&self) -> &T {
        self.value.get_or_init(|| {
            let Some(initializer) = self.initializer.lock().take() else {
                panic!("ConcurrentLazy instance has been poisoned")
            };
            log::trace!("running ConcurrentLazy initializer");
            match catch_unwind(AssertUnwindSafe(initializer)) {
                Ok(value) => value,
                Err(payload) => {
                    self.poisoned.store(true, Ordering::Release);
                    resume_unwind(payload)
                }
            }
        })
    }

    /// Consumes the cell and returns its value, computing it if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ConcurrentLazyPoisonedError`] if an earlier initialization
    /// panicked.
    pub fn into_inner(self) -> Result<T, ConcurrentLazyPoisonedError> {
        match self.value.into_inner() {
            Some(value) => Ok(value),
            None => self
                .initializer
                .into_inner()
                .map(|initializer| initializer())
                .ok_or(ConcurrentLazyPoisonedError),
        }
    }
}

impl<T> ConcurrentLazy<T> {
    /// A cell that already holds `value`.
    pub fn new_with_value(value: T) -> Self {
        Self {
            value: OnceLock::from(value),
            initializer: Mutex::new(None),
            poisoned: AtomicBool::new(false),
        }
    }
}

impl<T, F> ConcurrentLazy<T, F> {
    /// Returns the value if some thread has already computed it.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Whether the value is available.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Whether an initializer panicked.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Acquire)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for ConcurrentLazy<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => formatter
                .debug_tuple("ConcurrentLazy")
                .field(value)
                .finish(),
            None => formatter.write_str("ConcurrentLazy(<uninit>)"),
        }
    }
}
