//! Configuration and builder for [`SlruPolicy`].
//!
//! Capacities can be given directly, or derived from a total slot count and
//! the fraction of slots the protected segment may hold.
//!
//! ## Example
//!
//! ```rust
//! use seglru::builder::SlruPolicyBuilder;
//! use seglru::clock::LogicalClock;
//! use seglru::policy::slru::VictimFallback;
//!
//! let policy = SlruPolicyBuilder::new(6)
//!     .probation_capacity(2)
//!     .victim_fallback(VictimFallback::Strict)
//!     .build(LogicalClock::new());
//! assert_eq!(policy.protected_capacity(), 6);
//!
//! // 8-way set, three quarters protected
//! let policy = SlruPolicyBuilder::from_ratio(8, 0.75)
//!     .try_build(LogicalClock::new())
//!     .unwrap();
//! assert_eq!(policy.protected_capacity(), 6);
//! assert_eq!(policy.probation_capacity(), 2);
//! ```

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::policy::slru::{SlruPolicy, VictimFallback};

/// Immutable parameters of an SLRU engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlruConfig {
    /// Upper bound on the protected segment. Zero disables promotion.
    pub protected_capacity: usize,
    /// Informational: probation is not bounded by the engine.
    pub probation_capacity: usize,
    pub victim_fallback: VictimFallback,
}

impl SlruConfig {
    /// Splits `total_slots` into protected and probation capacities.
    ///
    /// Protected gets `floor(total_slots * protected_ratio)`, probation the rest.
    /// A product within `1e-9` of a whole number counts as that number, so
    /// `(100, 0.29)` yields 29 protected slots despite f64 representation error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `total_slots` is zero or `protected_ratio` is
    /// not a finite value within `[0.0, 1.0]`.
    pub fn try_from_ratio(total_slots: usize, protected_ratio: f64) -> Result<Self, ConfigError> {
        if total_slots == 0 {
            return Err(ConfigError::new("total slots must be > 0"));
        }
        if !protected_ratio.is_finite() || !(0.0..=1.0).contains(&protected_ratio) {
            return Err(ConfigError::new(format!(
                "protected ratio must be within [0.0, 1.0], got {protected_ratio}"
            )));
        }

        let exact = total_slots as f64 * protected_ratio;
        let nearest = exact.round();
        let protected_capacity = if (exact - nearest).abs() < 1e-9 {
            nearest as usize
        } else {
            exact.floor() as usize
        };
        let protected_capacity = protected_capacity.min(total_slots);
        Ok(Self {
            protected_capacity,
            probation_capacity: total_slots - protected_capacity,
            victim_fallback: VictimFallback::default(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Sizing {
    Fixed(usize),
    Ratio {
        total_slots: usize,
        protected_ratio: f64,
    },
}

/// Builder for [`SlruPolicy`].
#[derive(Debug, Clone)]
pub struct SlruPolicyBuilder {
    sizing: Sizing,
    probation_override: Option<usize>,
    victim_fallback: VictimFallback,
}

impl SlruPolicyBuilder {
    /// Starts from an explicit protected capacity and a probation capacity of 0.
    pub fn new(protected_capacity: usize) -> Self {
        Self {
            sizing: Sizing::Fixed(protected_capacity),
            probation_override: None,
            victim_fallback: VictimFallback::default(),
        }
    }

    /// Derives both capacities from a slot count, validated at build time.
    pub fn from_ratio(total_slots: usize, protected_ratio: f64) -> Self {
        Self {
            sizing: Sizing::Ratio {
                total_slots,
                protected_ratio,
            },
            probation_override: None,
            victim_fallback: VictimFallback::default(),
        }
    }

    /// Sets the informational probation capacity.
    ///
    /// On a ratio-sized builder this replaces only the derived probation
    /// capacity; the ratio is still validated at build time.
    pub fn probation_capacity(mut self, probation_capacity: usize) -> Self {
        self.probation_override = Some(probation_capacity);
        self
    }

    pub fn victim_fallback(mut self, fallback: VictimFallback) -> Self {
        self.victim_fallback = fallback;
        self
    }

    /// Resolves the configuration without building an engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if ratio sizing was requested with invalid
    /// parameters.
    pub fn config(&self) -> Result<SlruConfig, ConfigError> {
        let mut config = match self.sizing {
            Sizing::Fixed(protected) => SlruConfig {
                protected_capacity: protected,
                probation_capacity: 0,
                victim_fallback: VictimFallback::default(),
            },
            Sizing::Ratio {
                total_slots,
                protected_ratio,
            } => SlruConfig::try_from_ratio(total_slots, protected_ratio)?,
        };
        if let Some(probation) = self.probation_override {
            config.probation_capacity = probation;
        }
        config.victim_fallback = self.victim_fallback;
        Ok(config)
    }

    /// Builds the engine.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build<C: Clock>(self, clock: C) -> SlruPolicy<C> {
        match self.try_build(clock) {
            Ok(policy) => policy,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the engine, returning an error on invalid parameters instead
    /// of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use seglru::builder::SlruPolicyBuilder;
    /// use seglru::clock::LogicalClock;
    ///
    /// let bad = SlruPolicyBuilder::from_ratio(16, f64::NAN).try_build(LogicalClock::new());
    /// assert!(bad.is_err());
    /// ```
    pub fn try_build<C: Clock>(self, clock: C) -> Result<SlruPolicy<C>, ConfigError> {
        Ok(SlruPolicy::with_config(self.config()?, clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{LogicalClock, ManualClock};

    #[test]
    fn ratio_splits_total() {
        let config = SlruConfig::try_from_ratio(10, 0.8).unwrap();
        assert_eq!(config.protected_capacity, 8);
        assert_eq!(config.probation_capacity, 2);
        assert_eq!(config.victim_fallback, VictimFallback::DemoteProtected);
    }

    #[test]
    fn ratio_bounds_are_inclusive() {
        let all = SlruConfig::try_from_ratio(4, 1.0).unwrap();
        assert_eq!((all.protected_capacity, all.probation_capacity), (4, 0));

        let none = SlruConfig::try_from_ratio(4, 0.0).unwrap();
        assert_eq!((none.protected_capacity, none.probation_capacity), (0, 4));
    }

    #[test]
    fn ratio_rejects_bad_input() {
        assert!(SlruConfig::try_from_ratio(0, 0.5).is_err());
        assert!(SlruConfig::try_from_ratio(4, -0.1).is_err());
        assert!(SlruConfig::try_from_ratio(4, 1.01).is_err());
        assert!(SlruConfig::try_from_ratio(4, f64::INFINITY).is_err());

        let err = SlruConfig::try_from_ratio(4, f64::NAN).unwrap_err();
        assert!(err.message().contains("protected ratio"));
    }

    #[test]
    fn builder_sets_every_field() {
        let policy = SlruPolicyBuilder::new(3)
            .probation_capacity(5)
            .victim_fallback(VictimFallback::Strict)
            .build(ManualClock::new());
        assert_eq!(policy.protected_capacity(), 3);
        assert_eq!(policy.probation_capacity(), 5);
        assert_eq!(policy.victim_fallback(), VictimFallback::Strict);
    }

    #[test]
    fn probation_override_keeps_ratio_protected() {
        let config = SlruPolicyBuilder::from_ratio(8, 0.5)
            .probation_capacity(10)
            .config()
            .unwrap();
        assert_eq!(config.protected_capacity, 4);
        assert_eq!(config.probation_capacity, 10);
    }

    #[test]
    fn ratio_split_absorbs_float_error() {
        // 100.0 * 0.29 is 28.999999999999996 in f64
        let config = SlruConfig::try_from_ratio(100, 0.29).unwrap();
        assert_eq!(config.protected_capacity, 29);
        assert_eq!(config.probation_capacity, 71);

        let config = SlruConfig::try_from_ratio(7, 0.5).unwrap();
        assert_eq!(config.protected_capacity, 3);
    }

    #[test]
    fn probation_override_does_not_hide_invalid_ratio() {
        let zero_slots = SlruPolicyBuilder::from_ratio(0, 0.5)
            .probation_capacity(3)
            .try_build(LogicalClock::new());
        assert!(zero_slots.is_err());

        let nan_ratio = SlruPolicyBuilder::from_ratio(8, f64::NAN)
            .probation_capacity(3)
            .try_build(LogicalClock::new());
        assert!(nan_ratio.is_err());
    }

    #[test]
    fn try_build_surfaces_config_error() {
        let result = SlruPolicyBuilder::from_ratio(8, 2.0).try_build(LogicalClock::new());
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "total slots must be > 0")]
    fn build_panics_on_invalid_config() {
        let _ = SlruPolicyBuilder::from_ratio(0, 0.5).build(LogicalClock::new());
    }

    #[test]
    fn policy_builder_shortcut() {
        let policy = SlruPolicy::builder(2).build(LogicalClock::new());
        assert_eq!(policy.protected_capacity(), 2);
        assert_eq!(policy.probation_capacity(), 0);
    }
}
