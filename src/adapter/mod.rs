//! Adapter Module
//!
//! The uniform benchmark workload API and its generic implementation.
//!
//! ## Responsibilities
//! - Expose the five logical workload operations over any storage engine
//! - Serialize records to blobs on the write path, decode on the read path
//! - Delegate range scans to the prefix-scoped scan iterator
//! - Participate in the shared engine lifecycle (attach/detach)
//!
//! ## Data Flow
//! ```text
//! read:    key ──▶ engine.get ──▶ blob ──▶ codec ──▶ Record
//! insert:  Record ──▶ codec ──▶ blob ──▶ engine.put
//! scan:    start key ──▶ scan iterator ──▶ cursor ops + codec ──▶ Records
//! ```

mod client;

pub use client::KvAdapter;

use crate::error::Result;
use crate::record::{FieldFilter, Record};

/// The uniform key/value workload API exposed to the benchmark caller
///
/// Methods take `&mut self`: one adapter instance is used by exactly one
/// worker at a time by contract, and the write path reuses a per-adapter
/// serialization buffer.
pub trait WorkloadAdapter {
    /// Read one record, materializing the fields selected by `filter`
    ///
    /// Returns `Ok(None)` when the key does not exist.
    fn read(&mut self, key: &str, filter: &FieldFilter) -> Result<Option<Record>>;

    /// Scan up to `record_count` records in key order from `start_key`
    ///
    /// Best-effort: fewer records near keyspace boundaries is success.
    fn scan(
        &mut self,
        start_key: &str,
        record_count: usize,
        filter: &FieldFilter,
    ) -> Result<Vec<Record>>;

    /// Replace the record stored under a key
    fn update(&mut self, key: &str, record: &Record) -> Result<()>;

    /// Store a new record under a key
    fn insert(&mut self, key: &str, record: &Record) -> Result<()>;

    /// Remove a key and its record
    fn delete(&mut self, key: &str) -> Result<()>;
}
