use crate::metrics::snapshot::SlruPolicyMetricsSnapshot;
use crate::metrics::traits::SlruPolicyMetricsRecorder;

#[derive(Debug, Default, Clone)]
pub struct SlruPolicyMetrics {
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
}

impl SlruPolicyMetrics {
    pub fn snapshot(
        &self,
        protected_len: usize,
        protected_capacity: usize,
        probation_capacity: usize,
    ) -> SlruPolicyMetricsSnapshot {
        SlruPolicyMetricsSnapshot {
            touch_calls: self.touch_calls,
            protected_touches: self.protected_touches,
            promotions: self.promotions,
            swap_demotions: self.swap_demotions,
            unpromoted_touches: self.unpromoted_touches,
            reset_calls: self.reset_calls,
            protected_resets: self.protected_resets,
            invalidate_calls: self.invalidate_calls,
            protected_invalidations: self.protected_invalidations,
            victim_calls: self.victim_calls,
            probation_victims: self.probation_victims,
            protected_victims: self.protected_victims,
            protected_len,
            protected_capacity,
            probation_capacity,
        }
    }
}

impl SlruPolicyMetricsRecorder for SlruPolicyMetrics {
    fn record_touch_protected(&mut self) {
        self.touch_calls += 1;
        self.protected_touches += 1;
    }
    fn record_touch_promoted(&mut self) {
        self.touch_calls += 1;
        self.promotions += 1;
    }
    fn record_touch_swapped(&mut self) {
        self.touch_calls += 1;
        self.promotions += 1;
        self.swap_demotions += 1;
    }
    fn record_touch_unpromoted(&mut self) {
        self.touch_calls += 1;
        self.unpromoted_touches += 1;
    }
    fn record_reset(&mut self, was_protected: bool) {
        self.reset_calls += 1;
        if was_protected {
            self.protected_resets += 1;
        }
    }
    fn record_invalidate(&mut self, was_protected: bool) {
        self.invalidate_calls += 1;
        if was_protected {
            self.protected_invalidations += 1;
        }
    }
    fn record_probation_victim(&mut self) {
        self.victim_calls += 1;
        self.probation_victims += 1;
    }
    fn record_protected_victim(&mut self) {
        self.victim_calls += 1;
        self.protected_victims += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_counts_as_promotion() {
        let mut m = SlruPolicyMetrics::default();
        m.record_touch_promoted();
        m.record_touch_swapped();
        m.record_touch_unpromoted();

        let snap = m.snapshot(2, 2, 6);
        assert_eq!(snap.touch_calls, 3);
        assert_eq!(snap.promotions, 2);
        assert_eq!(snap.swap_demotions, 1);
        assert_eq!(snap.unpromoted_touches, 1);
        assert_eq!(snap.probation_capacity, 6);
    }

    #[test]
    fn reconciliation_counters_split_by_segment() {
        let mut m = SlruPolicyMetrics::default();
        m.record_reset(true);
        m.record_reset(false);
        m.record_invalidate(true);
        m.record_protected_victim();

        assert_eq!(m.reset_calls, 2);
        assert_eq!(m.protected_resets, 1);
        assert_eq!(m.protected_invalidations, 1);
        assert_eq!(m.victim_calls, 1);
        assert_eq!(m.protected_victims, 1);
    }
}
