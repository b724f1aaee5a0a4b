/// Point-in-time copy of [`SlruPolicyMetrics`](crate::metrics::metrics_impl::SlruPolicyMetrics)
/// plus gauges read from the engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SlruPolicyMetricsSnapshot {
    pub touch_calls: u64,
    pub protected_touches: u64,
    pub promotions: u64,
    pub swap_demotions: u64,
    pub unpromoted_touches: u64,

    pub reset_calls: u64,
    pub protected_resets: u64,

    pub invalidate_calls: u64,
    pub protected_invalidations: u64,

    pub victim_calls: u64,
    pub probation_victims: u64,
    pub protected_victims: u64,

    // gauges captured at snapshot time
    pub protected_len: usize,
    pub protected_capacity: usize,
    pub probation_capacity: usize,
}
