//! # lazy-stream
//!
//! Immutable, lazily evaluated streams with structural sharing, plus the
//! compute-once cells they are built with.
//!
//! ## Overview
//!
//! - **Streams**: [`LazyStream`](stream::LazyStream), a persistent singly-linked
//!   sequence whose tails are computed on demand, with filter, map, fold,
//!   zip, and take/drop combinators
//! - **Control**: [`Lazy`](control::Lazy) and
//!   [`ConcurrentLazy`](control::ConcurrentLazy) memoized values
//!
//! ## Feature Flags
//!
//! - `control`: `Lazy` and `ConcurrentLazy`
//! - `stream`: `LazyStream` and its combinators (implies `control`)
//! - `serde`: `Serialize`/`Deserialize` for `LazyStream`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_stream::prelude::*;
//!
//! let squares = LazyStream::from(1_u64).map(|n| n * n);
//! assert_eq!(squares.take(4).to_list(), vec![1, 4, 9, 16]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use lazy_stream::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "stream")]
pub mod stream;
