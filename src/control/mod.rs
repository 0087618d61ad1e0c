//! Deferred values with memoization.
//!
//! - [`Lazy`]: a compute-once cell for single-threaded code
//! - [`ConcurrentLazy`]: a compute-once cell safe to share between threads
//!
//! Both run their initializer on first access and cache the result. Streams
//! use [`Lazy`] to cache forced tails when asked to via
//! [`LazyStream::memoized`](crate::stream::LazyStream::memoized).
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::control::Lazy;
//!
//! let answer = Lazy::new(|| 6 * 7);
//! assert!(!answer.is_initialized());
//! assert_eq!(*answer.force(), 42);
//! assert!(answer.is_initialized());
//! ```

mod concurrent_lazy;
mod lazy;

pub use concurrent_lazy::{ConcurrentLazy, ConcurrentLazyPoisonedError};
pub use lazy::{Lazy, LazyPoisonedError, LazyState};
