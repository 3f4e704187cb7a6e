//! Engine Module
//!
//! The seam between adapters and the embedded storage engines they drive.
//!
//! ## Responsibilities
//! - Define the point-operation and cursor capabilities an engine supplies
//! - Own the shared engine handle lifecycle across adapter instances
//! - Provide a reference in-memory engine with prefix-partitioned cursors
//!
//! Each engine binding implements [`StorageEngine`] over its native API;
//! everything above this module (codec, scans, the workload API) is engine
//! agnostic.

mod context;
mod memory;

pub use context::EngineContext;
pub use memory::{MemoryCursor, MemoryEngine};

use bytes::Bytes;

use crate::error::Result;

/// Outcome of positioning a cursor at or after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    /// The cursor is positioned on a key at or after the sought key
    Found,

    /// No key at or after the sought key exists within the cursor's scope
    NotFound,
}

/// Result of advancing a cursor
///
/// End of partition is an expected control-flow branch of the scan state
/// machine, not an error, so it is part of the result type rather than an
/// error variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorRead {
    /// The next row in key order within the cursor's scope
    Row { key: Bytes, value: Bytes },

    /// The cursor's scope holds no further rows
    EndOfPartition,
}

/// An open engine cursor, optionally scoped to a key prefix
pub trait EngineCursor {
    /// Position the cursor at the first key at or after `key` within scope
    fn seek(&mut self, key: &[u8]) -> Result<SeekOutcome>;

    /// Read the row under the cursor and advance past it
    fn read_next(&mut self) -> Result<CursorRead>;

    /// Release the cursor's engine resources. Idempotent.
    fn release(&mut self);
}

/// Point and cursor primitives supplied by an embedded storage engine
///
/// Implementations are shared across adapter instances via
/// [`EngineContext`]; all methods take `&self` and must be safe for
/// concurrent callers.
pub trait StorageEngine {
    type Cursor: EngineCursor;

    /// Fetch the value stored under a key
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>>;

    /// Store a value under a key, replacing any existing value
    fn put(&self, key: &[u8], value: Bytes) -> Result<()>;

    /// Remove a key and its value
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Open a cursor over keys sharing `prefix`, or over the whole keyspace
    /// when `prefix` is `None`
    fn open_cursor(&self, prefix: Option<&[u8]>) -> Result<Self::Cursor>;

    /// Physically close the engine. Driven by [`EngineContext`] when the
    /// last adapter detaches.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
