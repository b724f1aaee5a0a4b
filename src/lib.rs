//! seglru: a Segmented LRU (SLRU) replacement policy for slot-based caches.
//!
//! The host cache owns its slots and one [`SlruEntry`](policy::slru::SlruEntry)
//! per slot; [`SlruPolicy`](policy::slru::SlruPolicy) decides how entries move
//! between the probation and protected segments and which slot to evict.

pub mod builder;
pub mod clock;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
