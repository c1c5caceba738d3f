//! memokit: compute-once memoization and cycle-accelerated simulation.
//!
//! - [`memo`]: wrap a pure function in a cache keyed by a projection of its
//!   arguments; a weak process-wide [`CacheRegistry`](memo::CacheRegistry)
//!   reports what every live cache holds.
//! - [`cycle`]: apply a deterministic transition towards a huge step count,
//!   detect the first repeated state, and answer from the recorded history.
//! - [`solvers`]: worked consumers of both.

pub mod builder;
pub mod cycle;
pub mod error;
pub mod memo;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod solvers;
pub mod traits;
