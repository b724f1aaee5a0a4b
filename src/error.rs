//! Error types for the seglru crate.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by [`SlruPolicy::check_invariants`] when the
//!   protected membership and the per-entry segments disagree.
//! - [`ConfigError`]: Returned when policy configuration parameters are
//!   invalid (e.g. an out-of-range protected ratio).
//!
//! Caller contract violations (an empty victim candidate set, a slot the
//! store does not hold) are not errors: they panic.
//!
//! ## Example Usage
//!
//! ```
//! use seglru::builder::SlruConfig;
//! use seglru::error::ConfigError;
//!
//! let config: Result<SlruConfig, ConfigError> = SlruConfig::try_from_ratio(16, 0.75);
//! assert_eq!(config.unwrap().protected_capacity, 12);
//!
//! let bad = SlruConfig::try_from_ratio(16, 1.5);
//! assert!(bad.is_err());
//! ```
//!
//! [`SlruPolicy::check_invariants`]: crate::policy::slru::SlruPolicy::check_invariants

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the policy's internal invariants are violated.
///
/// Produced by
/// [`SlruPolicy::check_invariants`](crate::policy::slru::SlruPolicy::check_invariants).
/// Carries a human-readable description of which invariant failed. Seeing one
/// of these means a bug in the engine or a host that mutated entries behind
/// its back.
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

/// Error returned when policy configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`SlruConfig::try_from_ratio`](crate::builder::SlruConfig::try_from_ratio)
/// and [`SlruPolicyBuilder::try_build`](crate::builder::SlruPolicyBuilder::try_build).
///
/// # Example
///
/// ```
/// use seglru::builder::SlruConfig;
///
/// let err = SlruConfig::try_from_ratio(0, 0.5).unwrap_err();
/// assert!(err.to_string().contains("total slots"));
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
// Tests
// ---------------------------------------------------------------------------
