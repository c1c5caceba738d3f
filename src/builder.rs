//! Builder for memoized functions.
//!
//! Collects the optional settings of a memo cache (diagnostic name, initial
//! capacity, which registry sees it) and hides the wiring between the
//! wrapped function, its [`KeyedCache`], and the registry.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use memokit::builder::MemoBuilder;
//! use memokit::memo::CacheRegistry;
//!
//! let registry = Arc::new(CacheRegistry::new());
//! let cube = MemoBuilder::new()
//!     .name("cube")
//!     .initial_capacity(64)
//!     .registry(Arc::clone(&registry))
//!     .build(|n: &u32| *n, |n: u32| u64::from(n).pow(3));
//!
//! assert_eq!(cube.call(3), 27);
//! assert_eq!(registry.all_stats()[0].size, 1);
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::memo::{CacheRegistry, KeyedCache, Memoized, TryMemoized};

/// Which registry, if any, learns about a built cache.
#[derive(Debug, Clone, Default)]
pub enum Registration {
    /// [`CacheRegistry::global`].
    #[default]
    Global,
    /// A caller-owned registry, e.g. one per test.
    Shared(Arc<CacheRegistry>),
    /// Not registered anywhere; only the wrapper can report stats.
    None,
}

/// Builder for [`Memoized`] and [`TryMemoized`] functions.
#[derive(Debug, Clone, Default)]
pub struct MemoBuilder {
    name: Option<String>,
    initial_capacity: usize,
    registration: Registration,
}

impl MemoBuilder {
    /// Creates a builder for an unnamed cache registered globally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostic name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Pre-sizes the cache. This is an allocation hint, not a bound.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Registers the cache with `registry` instead of the global one.
    pub fn registry(mut self, registry: Arc<CacheRegistry>) -> Self {
        self.registration = Registration::Shared(registry);
        self
    }

    /// Keeps the cache out of every registry.
    pub fn unregistered(mut self) -> Self {
        self.registration = Registration::None;
        self
    }

    /// Checks the settings without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(ConfigError::new(
                "cache name must not be empty; omit it for an anonymous cache",
            )),
            _ => Ok(()),
        }
    }

    /// Builds a wrapper around `f`, keyed by `key(&args)`.
    pub fn build<A, K, R, P, F>(self, key: P, f: F) -> Memoized<A, K, R>
    where
        A: 'static,
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
        P: Fn(&A) -> K + 'static,
        F: Fn(A) -> R + 'static,
    {
        self.build_recursive(key, move |_, args| f(args))
    }

    /// Builds a wrapper whose body receives the wrapper itself for recursive calls.
    pub fn build_recursive<A, K, R, P, F>(self, key: P, f: F) -> Memoized<A, K, R>
    where
        A: 'static,
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
        P: Fn(&A) -> K + 'static,
        F: Fn(&Memoized<A, K, R>, A) -> R + 'static,
    {
        Memoized::from_parts(self.make_cache(), Box::new(key), Box::new(f))
    }

    /// Builds a wrapper around a fallible `f`; errors are never cached.
    pub fn build_fallible<A, K, R, E, P, F>(self, key: P, f: F) -> TryMemoized<A, K, R, E>
    where
        A: 'static,
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
        E: 'static,
        P: Fn(&A) -> K + 'static,
        F: Fn(A) -> Result<R, E> + 'static,
    {
        self.build_fallible_recursive(key, move |_, args| f(args))
    }

    /// Fallible counterpart of [`build_recursive`](Self::build_recursive).
    pub fn build_fallible_recursive<A, K, R, E, P, F>(
        self,
        key: P,
        f: F,
    ) -> TryMemoized<A, K, R, E>
    where
        A: 'static,
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
        E: 'static,
        P: Fn(&A) -> K + 'static,
        F: Fn(&TryMemoized<A, K, R, E>, A) -> Result<R, E> + 'static,
    {
        TryMemoized::from_parts(self.make_cache(), Box::new(key), Box::new(f))
    }

    /// Validating counterpart of [`build`](Self::build).
    pub fn try_build<A, K, R, P, F>(self, key: P, f: F) -> Result<Memoized<A, K, R>, ConfigError>
    where
        A: 'static,
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
        P: Fn(&A) -> K + 'static,
        F: Fn(A) -> R + 'static,
    {
        self.validate()?;
        Ok(self.build(key, f))
    }

    /// Validating counterpart of [`build_recursive`](Self::build_recursive).
    pub fn try_build_recursive<A, K, R, P, F>(
        self,
        key: P,
        f: F,
    ) -> Result<Memoized<A, K, R>, ConfigError>
    where
        A: 'static,
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
        P: Fn(&A) -> K + 'static,
        F: Fn(&Memoized<A, K, R>, A) -> R + 'static,
    {
        self.validate()?;
        Ok(self.build_recursive(key, f))
    }

    fn make_cache<K, R>(self) -> Arc<KeyedCache<K, R>>
    where
        K: Eq + Hash + Send + 'static,
        R: Clone + Send + 'static,
    {
        let cache = Arc::new(KeyedCache::with_capacity(self.name, self.initial_capacity));
        match self.registration {
            Registration::Global => CacheRegistry::global().register(&cache),
            Registration::Shared(registry) => registry.register(&cache),
            Registration::None => {},
        }
        cache
    }
}
