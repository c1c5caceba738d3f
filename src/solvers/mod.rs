//! Worked consumers of the two engines.
//!
//! - [`arrangements`]: recursive counting over a shrinking record, memoized
//!   on the remaining sub-problem.
//! - [`platform`]: a four-phase tilting grid resolved after billions of
//!   steps through cycle acceleration.

pub mod arrangements;
pub mod platform;
