use crate::core::models::results::SweepRecord;
use std::sync::mpsc::{SyncSender, TrySendError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Result consumer has disconnected")]
    Disconnected,

    #[error("Record rejected: {0}")]
    Rejected(String),
}

/// Destination of sweep records. Only the collector thread calls into a sink, so
/// implementations need no internal synchronization.
pub trait ResultSink {
    fn append(&mut self, record: SweepRecord) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// `Vec::append` shadows the trait method on a concrete `Vec`; call through `ResultSink`.
impl ResultSink for Vec<SweepRecord> {
    fn append(&mut self, record: SweepRecord) -> Result<(), SinkError> {
        self.push(record);
        Ok(())
    }
}

/// Blocks while the bounded queue is full, so a slow consumer throttles the sweep.
impl ResultSink for SyncSender<SweepRecord> {
    fn append(&mut self, record: SweepRecord) -> Result<(), SinkError> {
        match self.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(record)) => {
                self.send(record).map_err(|_| SinkError::Disconnected)
            }
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Disconnected),
        }
    }
}

/// In-memory sink with an optional record limit.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<SweepRecord>,
    limit: Option<usize>,
    flushes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    #[inline]
    pub fn records(&self) -> &[SweepRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn into_records(self) -> Vec<SweepRecord> {
        self.records
    }
}

impl ResultSink for MemorySink {
    fn append(&mut self, record: SweepRecord) -> Result<(), SinkError> {
        if let Some(limit) = self.limit {
            if self.records.len() >= limit {
                return Err(SinkError::Rejected(format!(
                    "sink is full ({} records)",
                    limit
                )));
            }
        }
        self.records.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}
