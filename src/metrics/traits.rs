//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are kept in small, separate traits so
//! that policy code only ever writes counters.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │  SlruPolicyMetricsRecorder   │   written by SlruPolicy on every call
//!   └──────────────┬───────────────┘
//!                  │
//!   Consumption (decoupled from recording):
//!   ┌──────────────▼───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │───►│ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for SLRU engine decisions.
pub trait SlruPolicyMetricsRecorder {
    /// Touch on an already-protected slot.
    fn record_touch_protected(&mut self);
    /// Touch that promoted into free protected capacity.
    fn record_touch_promoted(&mut self);
    /// Touch that promoted by demoting the stalest protected member.
    fn record_touch_swapped(&mut self);
    /// Touch on a probation slot with no protected capacity at all.
    fn record_touch_unpromoted(&mut self);
    fn record_reset(&mut self, was_protected: bool);
    fn record_invalidate(&mut self, was_protected: bool);
    fn record_probation_victim(&mut self);
    fn record_protected_victim(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Publishes snapshots to a monitoring system.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
