//! Immutable, lazily evaluated streams.
//!
//! [`LazyStream`] is a persistent singly-linked sequence whose tails may be
//! computed on demand. It can be infinite: only the nodes a consumer
//! actually reaches are ever built.
//!
//! - Construction: [`LazyStream::from`], [`LazyStream::from_step`],
//!   [`LazyStream::range`], [`LazyStream::range_step`],
//!   [`LazyStream::iterate`], [`cons`], [`LazyStream::nil`]
//! - Lazy combinators: `filter`, `map`, `take`, `take_while`, `zip`, `unzip`
//! - Eager operations: `size`, `get`, `drop`, `reverse`, `to_list`,
//!   `fold_left`, `reduce_left`
//!
//! # Forcing and sharing
//!
//! A deferred tail is recomputed every time it is forced. Keep the forced
//! tail in a variable to reuse it, or call [`LazyStream::memoized`] to cache
//! every tail in its node. Realized tails (from [`cons`], `collect`, or
//! `reverse`) are shared by every stream that reaches them.
//!
//! # Examples
//!
//! ```rust
//! use lazy_stream::stream::{LazyStream, primes};
//!
//! let evens = LazyStream::from(0).filter(|n| n % 2 == 0);
//! assert_eq!(evens.take(4).to_list(), vec![0, 2, 4, 6]);
//!
//! let total = LazyStream::range(1, 6).fold_left(0, |sum, n| sum + n);
//! assert_eq!(total, 15);
//!
//! assert_eq!(primes::<u32>().take(5).to_list(), vec![2, 3, 5, 7, 11]);
//! ```

/// Shared pointer behind stream nodes.
///
/// Nodes are reference counted because closures and multiple streams alias
/// the same tails. Streams are single-threaded, so this is `Rc`.
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod combinators;
mod construct;
mod error;
mod memo;
mod node;
#[cfg(feature = "serde")]
mod serialization;
mod sieve;
mod zip;

pub use error::{StreamError, StreamResult};
pub use node::{LazyStream, LazyStreamIterator, cons};
pub use sieve::{Sieve, primes};
pub use zip::unzip;

static_assertions::assert_not_impl_any!(LazyStream<i32>: Send, Sync);
static_assertions::assert_impl_all!(StreamError: Send, Sync, std::error::Error);
