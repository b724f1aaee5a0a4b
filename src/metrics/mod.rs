//! Feature-gated policy counters (`metrics` feature).
//!
//! Recording, snapshotting and exporting are split into separate traits, see
//! [`traits`].

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
