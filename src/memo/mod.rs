//! Generic memoization: compute-once caches keyed by an argument projection.
//!
//! ## Key Components
//!
//! - [`KeyedCache`]: the compute-once store.
//! - [`Memoized`] / [`TryMemoized`]: functions wrapped around a cache.
//! - [`CacheRegistry`]: weak, process-wide index of live caches.
//! - [`MemoStats`]: `(name, size)` diagnostics.

pub mod keyed;
pub mod memoized;
pub mod registry;
pub mod stats;

pub use keyed::KeyedCache;
pub use memoized::{
    Memoized, TryMemoized, memoize, memoize_named, memoize_on, memoize_recursive, memoize2,
    memoize2_on, memoize3, memoize3_on, memoize4, memoize4_on, memoize5, memoize5_on,
    try_memoize_on,
};
pub use registry::CacheRegistry;
pub use stats::MemoStats;
