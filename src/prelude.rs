pub use crate::builder::MemoBuilder;
pub use crate::cycle::{
    Acceleration, AcceleratorConfig, CycleAccelerator, CycleDescriptor, FnTransition, RoundRobin,
    SimulationRun, accelerate, accelerate_phased,
};
pub use crate::error::{ConfigError, InvariantError, ParseError};
pub use crate::memo::{
    CacheRegistry, KeyedCache, MemoStats, Memoized, TryMemoized, memoize, memoize_named,
    memoize_on, memoize_recursive, memoize2, memoize2_on, memoize3, memoize3_on, memoize4,
    memoize4_on, memoize5, memoize5_on, try_memoize_on,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{AccelerationMetricsSnapshot, MemoMetricsSnapshot};
pub use crate::traits::{MemoStatsSource, Transition};
