//! The sieve of Eratosthenes over lazy streams.
//!
//! A [`Sieve`] is the state of the sieve between two emitted primes: the
//! candidates that survived every earlier prime. Emitting the head of the
//! candidates and advancing stacks one more divisibility filter on the
//! rest. Nothing past the last requested prime is ever examined.

use std::ops::{Add, Rem};

use num_traits::{One, Zero};

use super::LazyStream;

/// Sieve state: the candidates not divisible by any prime emitted so far.
///
/// ```rust
/// use lazy_stream::stream::{LazyStream, Sieve};
///
/// let primes = Sieve::new(LazyStream::from(2_u32)).into_stream();
/// assert_eq!(primes.take(6).to_list(), vec![2, 3, 5, 7, 11, 13]);
/// ```
#[derive(Clone)]
pub struct Sieve<T> {
    candidates: LazyStream<T>,
}

impl<T> Sieve<T>
where
    T: Clone + Rem<Output = T> + Zero + PartialEq + 'static,
{
    /// Starts a sieve over `candidates`. The first candidate is taken to be
    /// prime, so `candidates` usually starts at 2.
    pub const fn new(candidates: LazyStream<T>) -> Self {
        Self { candidates }
    }

    /// The stream of survivors. Each tail force advances a copy of the sieve
    /// by one prime.
    pub fn into_stream(self) -> LazyStream<T> {
        let Ok(prime) = self.candidates.head().cloned() else {
            return LazyStream::nil();
        };
        LazyStream::deferred(prime, move || self.advance().into_stream())
    }

    /// The sieve after emitting the current head: the remaining candidates
    /// with every multiple of that head removed.
    fn advance(&self) -> Self {
        let Some((prime, rest)) = self.candidates.uncons() else {
            return self.clone();
        };
        log::debug!("adding sieve stage");
        let prime = prime.clone();
        Self::new(rest.filter(move |candidate| {
            candidate.clone() % prime.clone() != T::zero()
        }))
    }
}

impl<T> LazyStream<T>
where
    T: Clone + Rem<Output = T> + Zero + PartialEq + 'static,
{
    /// Sieves this stream: keeps each element not divisible by an earlier
    /// kept element.
    #[must_use]
    pub fn sieve(&self) -> Self {
        Sieve::new(self.clone()).into_stream()
    }
}

/// The infinite stream of primes, `2, 3, 5, 7, 11, ...`.
///
/// ```rust
/// use lazy_stream::stream::primes;
///
/// assert_eq!(primes::<u64>().take(5).to_list(), vec![2, 3, 5, 7, 11]);
/// ```
pub fn primes<T>() -> LazyStream<T>
where
    T: Clone + Add<Output = T> + Rem<Output = T> + Zero + One + PartialEq + 'static,
{
    LazyStream::from(T::one() + T::one()).sieve()
}
