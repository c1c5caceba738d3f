//! Wrapped functions backed by a [`KeyedCache`].
//!
//! A [`Memoized`] owns its cache; dropping the wrapper drops the cache and
//! lets the registry forget it. Arguments of any arity travel as one tuple
//! `A`, which a key projection reduces to the cache key `K`:
//!
//! ```text
//!   call(args: A)
//!     │
//!     ├── key(&args) ──▶ K ──▶ KeyedCache<K, R> ── hit ──▶ R
//!     │                                   │
//!     │                                  miss
//!     │                                   ▼
//!     └──────────────────────────▶ body(&self, args) ──▶ R (stored under K)
//! ```
//!
//! The body receives `&self`, so a recursive function reaches its own cache
//! for sub-problems; see [`memoize_recursive`].
//!
//! ## Arity helpers
//!
//! [`memoize2`] through [`memoize5`] wrap plain multi-argument functions
//! keyed by the whole argument tuple, and `call2`..`call5` spread the tuple
//! back out at the call site. [`memoize2_on`] through [`memoize5_on`] take a
//! cache name and a key projection over the spread arguments.

use std::hash::Hash;
use std::sync::Arc;

use crate::builder::MemoBuilder;
use crate::memo::{KeyedCache, MemoStats};
use crate::traits::MemoStatsSource;

type KeyFn<A, K> = Box<dyn Fn(&A) -> K>;
type BodyFn<A, K, R> = Box<dyn Fn(&Memoized<A, K, R>, A) -> R>;
type TryBodyFn<A, K, R, E> = Box<dyn Fn(&TryMemoized<A, K, R, E>, A) -> Result<R, E>>;

/// A function wrapped in a compute-once cache.
///
/// `f'(a) == f(a)` for every argument, and the wrapped function runs at most
/// once per distinct projected key. The wrapped function must be pure with
/// respect to the key: two arguments that project to the same key are
/// treated as the same work.
pub struct Memoized<A, K, R> {
    cache: Arc<KeyedCache<K, R>>,
    key: KeyFn<A, K>,
    body: BodyFn<A, K, R>,
}

impl<A, K, R> Memoized<A, K, R>
where
    K: Eq + Hash,
    R: Clone,
{
    pub(crate) fn from_parts(
        cache: Arc<KeyedCache<K, R>>,
        key: KeyFn<A, K>,
        body: BodyFn<A, K, R>,
    ) -> Self {
        Self { cache, key, body }
    }

    /// Returns the result for `args`, running the wrapped function only on a miss.
    pub fn call(&self, args: A) -> R {
        let key = (self.key)(&args);
        self.cache.get_or_compute(key, || (self.body)(self, args))
    }

    /// Returns the backing cache.
    pub fn cache(&self) -> &KeyedCache<K, R> {
        &self.cache
    }

    /// Returns `(name, size)` of the backing cache.
    pub fn stats(&self) -> MemoStats {
        self.cache.stats()
    }
}

/// A fallible function wrapped in a compute-once cache.
///
/// Only `Ok` results are stored; an `Err` is handed back and the next call
/// with the same key retries.
pub struct TryMemoized<A, K, R, E> {
    cache: Arc<KeyedCache<K, R>>,
    key: KeyFn<A, K>,
    body: TryBodyFn<A, K, R, E>,
}

impl<A, K, R, E> TryMemoized<A, K, R, E>
where
    K: Eq + Hash,
    R: Clone,
{
    pub(crate) fn from_parts(
        cache: Arc<KeyedCache<K, R>>,
        key: KeyFn<A, K>,
        body: TryBodyFn<A, K, R, E>,
    ) -> Self {
        Self { cache, key, body }
    }

    /// Returns the result for `args`, running the wrapped function only on a miss.
    pub fn call(&self, args: A) -> Result<R, E> {
        let key = (self.key)(&args);
        self.cache.try_get_or_compute(key, || (self.body)(self, args))
    }

    /// Returns the backing cache.
    pub fn cache(&self) -> &KeyedCache<K, R> {
        &self.cache
    }

    /// Returns `(name, size)` of the backing cache.
    pub fn stats(&self) -> MemoStats {
        self.cache.stats()
    }
}

impl<A, K, R> std::fmt::Debug for Memoized<A, K, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<A, K, R, E> std::fmt::Debug for TryMemoized<A, K, R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryMemoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Wraps a single-argument function, keyed by the argument itself.
///
/// The cache is registered with [`CacheRegistry::global`](crate::memo::CacheRegistry::global).
///
/// # Example
///
/// ```
/// use memokit::memo::memoize;
///
/// let collatz_len = memoize(|mut n: u64| {
///     let mut steps = 0;
///     while n != 1 {
///         n = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
///         steps += 1;
///     }
///     steps
/// });
/// assert_eq!(collatz_len.call(27), 111);
/// assert_eq!(collatz_len.stats().size, 1);
/// ```
pub fn memoize<A, R, F>(f: F) -> Memoized<A, A, R>
where
    A: Clone + Eq + Hash + Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + 'static,
{
    MemoBuilder::new().build(A::clone, f)
}

/// Like [`memoize`], with a diagnostic name reported by the registry.
pub fn memoize_named<A, R, F>(name: impl Into<String>, f: F) -> Memoized<A, A, R>
where
    A: Clone + Eq + Hash + Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + 'static,
{
    MemoBuilder::new().name(name).build(A::clone, f)
}

/// Wraps a function keyed by a caller-supplied projection of its argument.
///
/// # Example
///
/// ```
/// use memokit::memo::memoize_on;
///
/// // Case-insensitive: "Rust" and "RUST" are the same work.
/// let len = memoize_on(|s: &String| s.to_lowercase(), |s: String| s.len());
/// assert_eq!(len.call("Rust".to_string()), 4);
/// assert_eq!(len.call("RUST".to_string()), 4);
/// assert_eq!(len.stats().size, 1);
/// ```
pub fn memoize_on<A, K, R, P, F>(key: P, f: F) -> Memoized<A, K, R>
where
    A: 'static,
    K: Eq + Hash + Send + 'static,
    R: Clone + Send + 'static,
    P: Fn(&A) -> K + 'static,
    F: Fn(A) -> R + 'static,
{
    MemoBuilder::new().build(key, f)
}

/// Wraps a recursive function whose body calls back through the wrapper.
///
/// # Example
///
/// ```
/// use memokit::memo::memoize_recursive;
///
/// let fib = memoize_recursive(|n: &u64| *n, |fib, n: u64| -> u64 {
///     if n < 2 { n } else { fib.call(n - 1) + fib.call(n - 2) }
/// });
/// assert_eq!(fib.call(90), 2_880_067_194_370_816_120);
/// assert_eq!(fib.stats().size, 91);
/// ```
pub fn memoize_recursive<A, K, R, P, F>(key: P, f: F) -> Memoized<A, K, R>
where
    A: 'static,
    K: Eq + Hash + Send + 'static,
    R: Clone + Send + 'static,
    P: Fn(&A) -> K + 'static,
    F: Fn(&Memoized<A, K, R>, A) -> R + 'static,
{
    MemoBuilder::new().build_recursive(key, f)
}

/// Wraps a fallible function; errors are returned but never cached.
pub fn try_memoize_on<A, K, R, E, P, F>(key: P, f: F) -> TryMemoized<A, K, R, E>
where
    A: 'static,
    K: Eq + Hash + Send + 'static,
    R: Clone + Send + 'static,
    E: 'static,
    P: Fn(&A) -> K + 'static,
    F: Fn(A) -> Result<R, E> + 'static,
{
    MemoBuilder::new().build_fallible(key, f)
}

macro_rules! memoize_arity {
    ($memoize:ident, $memoize_on:ident, $call:ident; $($arg:ident: $ty:ident),+) => {
        /// Wraps a multi-argument function keyed by the full argument tuple.
        pub fn $memoize<$($ty,)+ R, F>(f: F) -> Memoized<($($ty,)+), ($($ty,)+), R>
        where
            $($ty: Clone + Eq + Hash + Send + 'static,)+
            R: Clone + Send + 'static,
            F: Fn($($ty),+) -> R + 'static,
        {
            MemoBuilder::new().build(
                |args: &($($ty,)+)| args.clone(),
                move |($($arg,)+)| f($($arg),+),
            )
        }

        /// Wraps a multi-argument function keyed by `key` over borrowed
        /// arguments, with an optional diagnostic name.
        pub fn $memoize_on<$($ty,)+ K, R, P, F>(
            name: Option<&str>,
            key: P,
            f: F,
        ) -> Memoized<($($ty,)+), K, R>
        where
            $($ty: 'static,)+
            K: Eq + Hash + Send + 'static,
            R: Clone + Send + 'static,
            P: Fn($(&$ty),+) -> K + 'static,
            F: Fn($($ty),+) -> R + 'static,
        {
            let builder = match name {
                Some(name) => MemoBuilder::new().name(name),
                None => MemoBuilder::new(),
            };
            builder.build(
                move |args: &($($ty,)+)| {
                    let ($($arg,)+) = args;
                    key($($arg),+)
                },
                move |($($arg,)+)| f($($arg),+),
            )
        }

        impl<$($ty,)+ K, R> Memoized<($($ty,)+), K, R>
        where
            K: Eq + Hash,
            R: Clone,
        {
            /// Calls the wrapped function with spread arguments.
            pub fn $call(&self, $($arg: $ty),+) -> R {
                self.call(($($arg,)+))
            }
        }
    };
}

memoize_arity!(memoize2, memoize2_on, call2; a: A, b: B);
memoize_arity!(memoize3, memoize3_on, call3; a: A, b: B, c: C);
memoize_arity!(memoize4, memoize4_on, call4; a: A, b: B, c: C, d: D);
memoize_arity!(memoize5, memoize5_on, call5; a: A, b: B, c: C, d: D, e: E);
