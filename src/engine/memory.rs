//! In-memory reference engine
//!
//! BTreeMap-based engine with prefix-partitioned cursors, used by tests,
//! benches, and the workload driver. Cursors operate on a snapshot taken at
//! open time: each adapter instance is used by one worker at a time, so a
//! cursor never needs to observe writes made after it was opened.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use parking_lot::RwLock;

use crate::error::{BenchError, Result};

use super::{CursorRead, EngineCursor, SeekOutcome, StorageEngine};

/// Reference engine storing all data in an ordered in-memory map
#[derive(Default)]
pub struct MemoryEngine {
    /// Ordered key space (many concurrent readers, exclusive writer)
    entries: RwLock<BTreeMap<Vec<u8>, Bytes>>,

    /// Set once by [`StorageEngine::close`]; all operations fail afterwards
    closed: AtomicBool,
}

impl MemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check whether the engine holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BenchError::Engine("engine is closed".to_string()));
        }
        Ok(())
    }
}

impl StorageEngine for MemoryEngine {
    type Cursor = MemoryCursor;

    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        self.check_open()?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        self.check_open()?;
        self.entries.write().insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.check_open()?;
        self.entries.write().remove(key);
        Ok(())
    }

    fn open_cursor(&self, prefix: Option<&[u8]>) -> Result<Self::Cursor> {
        self.check_open()?;
        let entries = self.entries.read();

        let rows: Vec<(Bytes, Bytes)> = match prefix {
            Some(prefix) => entries
                .range(prefix.to_vec()..)
                .take_while(|(key, _)| key.starts_with(prefix))
                .map(|(key, value)| (Bytes::copy_from_slice(key), value.clone()))
                .collect(),
            None => entries
                .iter()
                .map(|(key, value)| (Bytes::copy_from_slice(key), value.clone()))
                .collect(),
        };

        Ok(MemoryCursor { rows, pos: 0 })
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        self.entries.write().clear();
        Ok(())
    }
}

/// Cursor over a snapshot of one partition (or the whole keyspace)
pub struct MemoryCursor {
    /// Snapshot rows in key order
    rows: Vec<(Bytes, Bytes)>,
    /// Next row to read
    pos: usize,
}

impl EngineCursor for MemoryCursor {
    fn seek(&mut self, key: &[u8]) -> Result<SeekOutcome> {
        // Position at the nearest key at or after the sought key.
        self.pos = self.rows.partition_point(|(k, _)| &k[..] < key);

        if self.pos < self.rows.len() {
            Ok(SeekOutcome::Found)
        } else {
            Ok(SeekOutcome::NotFound)
        }
    }

    fn read_next(&mut self) -> Result<CursorRead> {
        match self.rows.get(self.pos) {
            Some((key, value)) => {
                self.pos += 1;
                Ok(CursorRead::Row {
                    key: key.clone(),
                    value: value.clone(),
                })
            }
            None => Ok(CursorRead::EndOfPartition),
        }
    }

    fn release(&mut self) {
        // Drop the snapshot eagerly; release may be called more than once.
        self.rows = Vec::new();
        self.pos = 0;
    }
}
