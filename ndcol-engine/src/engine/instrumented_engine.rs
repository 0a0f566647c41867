use super::ArrayEngine;
use crate::types::{Selection, VariableInfo};
use ndcol_result::Result;
use ndcol_types::{ArrayBuffer, ElementType};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A thread-safe container for engine traffic counters.
#[derive(Debug, Default)]
pub struct EngineStats {
    // --- Calls across the seam ---
    pub gets: AtomicU64,
    pub puts: AtomicU64,
    pub defines: AtomicU64,
    pub inquiries: AtomicU64,

    // --- Volume ---
    pub elements_read: AtomicU64,
    pub elements_written: AtomicU64,
    pub bytes_read: AtomicU64,
    pub bytes_written: AtomicU64,

    // --- Failures reported by the wrapped engine ---
    pub failed_gets: AtomicU64,
    pub failed_puts: AtomicU64,
}

impl EngineStats {
    /// Capture a point-in-time snapshot of the accumulated counters.
    pub fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            defines: self.defines.load(Ordering::Relaxed),
            inquiries: self.inquiries.load(Ordering::Relaxed),
            elements_read: self.elements_read.load(Ordering::Relaxed),
            elements_written: self.elements_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            failed_gets: self.failed_gets.load(Ordering::Relaxed),
            failed_puts: self.failed_puts.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.gets.store(0, Ordering::Relaxed);
        self.puts.store(0, Ordering::Relaxed);
        self.defines.store(0, Ordering::Relaxed);
        self.inquiries.store(0, Ordering::Relaxed);
        self.elements_read.store(0, Ordering::Relaxed);
        self.elements_written.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.failed_gets.store(0, Ordering::Relaxed);
        self.failed_puts.store(0, Ordering::Relaxed);
    }
}

/// Immutable copy of [`EngineStats`] counters captured at a specific moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStatsSnapshot {
    pub gets: u64,
    pub puts: u64,
    pub defines: u64,
    pub inquiries: u64,
    pub elements_read: u64,
    pub elements_written: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub failed_gets: u64,
    pub failed_puts: u64,
}

impl EngineStatsSnapshot {
    /// Compute the delta between two snapshots (`newer - older`). Saturates at zero.
    pub fn delta_since(&self, older: &Self) -> Self {
        macro_rules! delta {
            ($field:ident) => {
                self.$field.saturating_sub(older.$field)
            };
        }
        Self {
            gets: delta!(gets),
            puts: delta!(puts),
            defines: delta!(defines),
            inquiries: delta!(inquiries),
            elements_read: delta!(elements_read),
            elements_written: delta!(elements_written),
            bytes_read: delta!(bytes_read),
            bytes_written: delta!(bytes_written),
            failed_gets: delta!(failed_gets),
            failed_puts: delta!(failed_puts),
        }
    }

    /// Total engine calls that moved data.
    pub fn transfers(&self) -> u64 {
        self.gets + self.puts
    }
}

/// A wrapper around any engine that counts the traffic crossing it.
#[derive(Debug)]
pub struct InstrumentedEngine<E: ArrayEngine> {
    inner: E,
    stats: Arc<EngineStats>,
}

impl<E> InstrumentedEngine<E>
where
    E: ArrayEngine,
{
    /// Wraps an engine and returns the instrumented version along with a
    /// handle to its statistics.
    pub fn new(inner: E) -> (Self, Arc<EngineStats>) {
        let stats = Arc::new(EngineStats::default());
        (
            Self {
                inner,
                stats: Arc::clone(&stats),
            },
            stats,
        )
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E> ArrayEngine for InstrumentedEngine<E>
where
    E: ArrayEngine,
{
    fn inquire_variable(&self, name: &str) -> Result<Option<VariableInfo>> {
        self.stats.inquiries.fetch_add(1, Ordering::Relaxed);
        self.inner.inquire_variable(name)
    }

    fn define_variable(
        &self,
        name: &str,
        element_type: ElementType,
        ndim: usize,
    ) -> Result<VariableInfo> {
        self.stats.defines.fetch_add(1, Ordering::Relaxed);
        self.inner.define_variable(name, element_type, ndim)
    }

    fn put(&self, name: &str, selection: &Selection, data: &ArrayBuffer) -> Result<()> {
        self.stats.puts.fetch_add(1, Ordering::Relaxed);
        match self.inner.put(name, selection, data) {
            Ok(()) => {
                self.stats
                    .elements_written
                    .fetch_add(data.len() as u64, Ordering::Relaxed);
                self.stats
                    .bytes_written
                    .fetch_add(data.byte_len() as u64, Ordering::Relaxed);
                Ok(())
            }
            Err(e) => {
                self.stats.failed_puts.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    fn get(&self, name: &str, selection: &Selection) -> Result<ArrayBuffer> {
        self.stats.gets.fetch_add(1, Ordering::Relaxed);
        match self.inner.get(name, selection) {
            Ok(buf) => {
                self.stats
                    .elements_read
                    .fetch_add(buf.len() as u64, Ordering::Relaxed);
                self.stats
                    .bytes_read
                    .fetch_add(buf.byte_len() as u64, Ordering::Relaxed);
                Ok(buf)
            }
            Err(e) => {
                self.stats.failed_gets.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }
}
