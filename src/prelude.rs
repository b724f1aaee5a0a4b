pub use crate::builder::{SlruConfig, SlruPolicyBuilder};
pub use crate::clock::{Clock, LogicalClock, ManualClock, Tick};
pub use crate::ds::{SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SlruPolicyMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
pub use crate::policy::slru::ConcurrentSlruPolicy;
pub use crate::policy::slru::{Segment, SlruEntry, SlruPolicy, VictimFallback};
pub use crate::traits::{EntryStore, ReplacementPolicy};
