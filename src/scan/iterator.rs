//! Prefix-scoped scan iterator
//!
//! Drives a sequence of cursor operations to emulate an ordered range scan
//! on engines whose cursors are most efficient when scoped to a key prefix.
//!
//! ## Algorithm
//! 1. Open a cursor scoped to the start key's prefix and seek to the start
//!    key; a seek miss fails the scan.
//! 2. Read and decode rows until the requested count is reached or the
//!    partition ends.
//! 3. At end of partition, hop to a cursor scoped to the next prefix and
//!    read it from its beginning. A missing next prefix means the prefix
//!    keyspace is exhausted; the rows collected so far are the result.
//! 4. After three empty-partition hops, fall back to one unscoped cursor
//!    seeked to the last attempted prefix and finish the scan there.
//!
//! The scan contract is best-effort up to `record_count`: fewer rows near
//! keyspace boundaries is success, mirroring real end-of-data.

use crate::config::Config;
use crate::engine::{CursorRead, EngineCursor, SeekOutcome, StorageEngine};
use crate::error::{BenchError, Result};
use crate::record::{deserialize, FieldFilter, Record};

use super::{next_prefix, prefix_of};

/// Releases the held cursor when dropped, so every scan exit path (row
/// count reached, prefix exhaustion, decode failure, engine error) ends
/// with the cursor released.
struct CursorGuard<C: EngineCursor> {
    cursor: C,
}

impl<C: EngineCursor> CursorGuard<C> {
    fn new(cursor: C) -> Self {
        Self { cursor }
    }

    /// Swap in a new cursor, releasing the old one
    fn replace(&mut self, next: C) {
        self.cursor.release();
        self.cursor = next;
    }
}

impl<C: EngineCursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        self.cursor.release();
    }
}

impl<C: EngineCursor> std::ops::Deref for CursorGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.cursor
    }
}

impl<C: EngineCursor> std::ops::DerefMut for CursorGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.cursor
    }
}

/// Scan up to `record_count` records in key order starting at `start_key`
///
/// Rows are decoded through the record codec, honoring `filter`. The start
/// key is expected to exist or have a successor within the engine ordering;
/// otherwise the scan fails with [`BenchError::KeyNotFound`].
pub fn scan_records<E: StorageEngine>(
    engine: &E,
    config: &Config,
    start_key: &str,
    record_count: usize,
    filter: &FieldFilter,
) -> Result<Vec<Record>> {
    // None means unscoped: the key is too short to narrow, or prefix-scoped
    // scanning is disabled by config.
    let mut current_prefix: Option<String> =
        prefix_of(start_key, config.prefix_length).map(str::to_string);

    let mut cursor = CursorGuard::new(
        engine.open_cursor(current_prefix.as_deref().map(str::as_bytes))?,
    );

    if cursor.seek(start_key.as_bytes())? == SeekOutcome::NotFound {
        tracing::error!(start_key, "scan found nothing at or after start key");
        return Err(BenchError::KeyNotFound);
    }

    let mut rows = Vec::with_capacity(record_count);
    let mut tries = config.empty_partition_tries;

    while rows.len() < record_count {
        match cursor.read_next()? {
            CursorRead::Row { value, .. } => {
                rows.push(deserialize(&value, filter)?);
            }
            CursorRead::EndOfPartition => {
                // An unscoped cursor's end is the end of data.
                let Some(prefix) = current_prefix.as_deref() else {
                    break;
                };

                // Prefix keyspace exhausted: a short scan is success.
                let Some(next) = next_prefix(prefix, &config.key_token)? else {
                    break;
                };

                if tries == 0 {
                    // Three strikes: stop partition-hopping and finish on one
                    // unscoped cursor, resuming at the last attempted prefix.
                    tracing::debug!(prefix = %next, "falling back to unscoped scan");
                    cursor.replace(engine.open_cursor(None)?);
                    current_prefix = None;

                    if cursor.seek(next.as_bytes())? == SeekOutcome::NotFound {
                        // Best-effort continuation: keep what was collected.
                        break;
                    }
                } else {
                    tries -= 1;
                    // The new partition is read from its beginning; no seek.
                    cursor.replace(engine.open_cursor(Some(next.as_bytes()))?);
                    current_prefix = Some(next);
                }
            }
        }
    }

    Ok(rows)
}
