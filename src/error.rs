//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when the internal invariants of a
//!   simulation run are violated (`check_invariants`).
//! - [`ConfigError`]: Returned when configuration parameters are invalid
//!   (e.g. a zero probe limit, an empty cache name).
//! - [`ParseError`]: Returned by the bundled solvers when their text input is
//!   malformed.
//!
//! Internal defects that can only be reached through a bug in this crate
//! (a zero-length cycle period, a missing history entry) are not represented
//! here; they panic at the point of detection.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::cycle::{AcceleratorConfig, CycleAccelerator, FnTransition};
//! use memokit::error::ConfigError;
//!
//! // Fallible constructor for user-configurable parameters
//! let accel: Result<CycleAccelerator<_, _>, ConfigError> = CycleAccelerator::try_with_config(
//!     FnTransition::new(|s: &u8| s.wrapping_add(1)),
//!     |s: &u8| *s,
//!     AcceleratorConfig::default().probe_limit(64),
//! );
//! assert!(accel.is_ok());
//!
//! // A zero probe limit is caught without panicking
//! let bad = CycleAccelerator::try_with_config(
//!     FnTransition::new(|s: &u8| s.wrapping_add(1)),
//!     |s: &u8| *s,
//!     AcceleratorConfig::default().probe_limit(0),
//! );
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`SimulationRun::check_invariants`](crate::cycle::SimulationRun::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`CycleAccelerator::try_with_config`](crate::cycle::CycleAccelerator::try_with_config)
/// and the builder `try_build*()` methods.
///
/// # Example
///
/// ```
/// use memokit::builder::MemoBuilder;
///
/// let err = MemoBuilder::new()
///     .name("")
///     .try_build(|n: &u64| *n, |n: u64| n * 2)
///     .unwrap_err();
/// assert!(err.to_string().contains("name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Error returned when solver input cannot be parsed.
///
/// `line` is 1-based; `0` means the error is not tied to a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    msg: String,
}

impl ParseError {
    /// Creates a new `ParseError` for the given input line.
    #[inline]
    pub fn new(line: usize, msg: impl Into<String>) -> Self {
        Self {
            line,
            msg: msg.into(),
        }
    }

    /// Returns the 1-based line number, or `0` for whole-input errors.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            f.write_str(&self.msg)
        } else {
            write!(f, "line {}: {}", self.line, self.msg)
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
