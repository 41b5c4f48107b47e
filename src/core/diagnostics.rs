//! Reporting of recoverable storage anomalies.
//!
//! The store never fails on corrupt persisted data. An unreadable partition is
//! treated as empty; an unreadable record is skipped by reads and written back
//! unchanged. Either way its [`Diagnostics`] collaborator is told what happened.

use std::fmt;
use tracing::warn;

/// Something unexpected that the store recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The persisted value did not decode as a record sequence and was read as empty
    CorruptPartition {
        /// Partition key
        partition: String,
        /// Decoder error message
        reason: String,
    },
    /// One element of the partition did not decode as a record; it is hidden from
    /// reads and kept verbatim on the next write
    CorruptRecord {
        /// Partition key
        partition: String,
        /// Position of the element in the stored sequence
        index: usize,
        /// Decoder error message
        reason: String,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptPartition { partition, reason } => {
                write!(f, "partition '{partition}' is corrupt and was read as empty: {reason}")
            }
            Self::CorruptRecord {
                partition,
                index,
                reason,
            } => write!(
                f,
                "record {index} of partition '{partition}' is unreadable and was kept as stored: {reason}"
            ),
        }
    }
}

/// Receives anomalies from record stores.
pub trait Diagnostics: Send + Sync + fmt::Debug {
    /// Called once per occurrence.
    fn report(&self, anomaly: &Anomaly);
}

/// Default sink; emits each anomaly as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, anomaly: &Anomaly) {
        warn!("{anomaly}");
    }
}
