//! Scan Iterator Tests
//!
//! Partition hops, the three-strikes unscoped fallback, and cursor release
//! discipline, observed through an instrumented engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use benchkv::engine::{CursorRead, EngineCursor, MemoryCursor, MemoryEngine, SeekOutcome, StorageEngine};
use benchkv::record::{serialize, FieldFilter, Record};
use benchkv::scan::scan_records;
use benchkv::{BenchError, Config, Result};

// =============================================================================
// Instrumented Engine
// =============================================================================

/// Wraps the reference engine, recording every cursor open (with its prefix
/// scope) and every cursor release.
#[derive(Default)]
struct RecordingEngine {
    inner: MemoryEngine,
    opened: Mutex<Vec<Option<String>>>,
    releases: Arc<AtomicUsize>,
}

impl RecordingEngine {
    fn opened_prefixes(&self) -> Vec<Option<String>> {
        self.opened.lock().clone()
    }

    fn open_count(&self) -> usize {
        self.opened.lock().len()
    }

    fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl StorageEngine for RecordingEngine {
    type Cursor = RecordingCursor;

    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        self.inner.put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.inner.delete(key)
    }

    fn open_cursor(&self, prefix: Option<&[u8]>) -> Result<Self::Cursor> {
        self.opened
            .lock()
            .push(prefix.map(|p| String::from_utf8_lossy(p).into_owned()));

        Ok(RecordingCursor {
            inner: self.inner.open_cursor(prefix)?,
            releases: Arc::clone(&self.releases),
            released: false,
        })
    }
}

struct RecordingCursor {
    inner: MemoryCursor,
    releases: Arc<AtomicUsize>,
    released: bool,
}

impl EngineCursor for RecordingCursor {
    fn seek(&mut self, key: &[u8]) -> Result<SeekOutcome> {
        self.inner.seek(key)
    }

    fn read_next(&mut self) -> Result<CursorRead> {
        self.inner.read_next()
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.release();
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn config() -> Config {
    Config::default()
}

fn sample_blob() -> Bytes {
    let mut record = Record::new();
    record.insert("field0", Bytes::from_static(b"aaa"));
    record.insert("field1", Bytes::from_static(b"bbb"));
    serialize(&record)
}

fn load_keys(engine: &RecordingEngine, numbers: impl IntoIterator<Item = usize>) {
    let blob = sample_blob();
    for n in numbers {
        let key = format!("user{}", n);
        engine.put(key.as_bytes(), blob.clone()).unwrap();
    }
}

// =============================================================================
// Basic Scan Tests
// =============================================================================

#[test]
fn test_scan_collects_requested_rows_within_one_partition() {
    let engine = RecordingEngine::default();
    load_keys(&engine, 1000..1010); // all under prefix "user100"

    let rows = scan_records(&engine, &config(), "user1000", 5, &FieldFilter::All).unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(engine.opened_prefixes(), vec![Some("user100".to_string())]);
}

#[test]
fn test_scan_starts_at_start_key_not_partition_start() {
    let engine = RecordingEngine::default();
    load_keys(&engine, 1000..1010);

    let rows = scan_records(&engine, &config(), "user1005", 3, &FieldFilter::All).unwrap();

    // Rows before the start key in the same partition are not returned.
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_scan_crosses_partition_boundary() {
    let engine = RecordingEngine::default();
    load_keys(&engine, 1000..1020); // "user100" holds 1000..1009, "user101" holds 1010..1019

    let rows = scan_records(&engine, &config(), "user1000", 15, &FieldFilter::All).unwrap();

    assert_eq!(rows.len(), 15);
    assert_eq!(
        engine.opened_prefixes(),
        vec![Some("user100".to_string()), Some("user101".to_string())]
    );
}

#[test]
fn test_scan_decodes_through_field_filter() {
    let engine = RecordingEngine::default();
    load_keys(&engine, 1000..1004);

    let filter = FieldFilter::only(["field0"]);
    let rows = scan_records(&engine, &config(), "user1000", 4, &filter).unwrap();

    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("field0"), Some(&Bytes::from_static(b"aaa")));
    }
}

#[test]
fn test_scan_seek_miss_is_an_error() {
    let engine = RecordingEngine::default();

    let result = scan_records(&engine, &config(), "user1000", 5, &FieldFilter::All);
    assert!(matches!(result, Err(BenchError::KeyNotFound)));

    // The failed cursor was still released.
    assert_eq!(engine.release_count(), engine.open_count());
}

#[test]
fn test_scan_short_at_prefix_keyspace_end() {
    let engine = RecordingEngine::default();
    load_keys(&engine, 9990..9995); // "user999" is the last possible prefix

    let rows = scan_records(&engine, &config(), "user9990", 100, &FieldFilter::All).unwrap();

    // A short scan at the end of the keyspace is success, not an error.
    assert_eq!(rows.len(), 5);
    assert_eq!(engine.opened_prefixes(), vec![Some("user999".to_string())]);
}

#[test]
fn test_scan_unscoped_when_prefix_disabled() {
    let engine = RecordingEngine::default();
    load_keys(&engine, 1000..1005);

    let config = Config::builder().prefix_length(0).build().unwrap();
    let rows = scan_records(&engine, &config, "user1000", 5, &FieldFilter::All).unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(engine.opened_prefixes(), vec![None]);
}

// =============================================================================
// Fallback Tests
// =============================================================================

#[test]
fn test_fallback_after_exactly_three_empty_partitions() {
    let engine = RecordingEngine::default();
    // 5 rows under "user100", then "user101".."user103" completely empty,
    // then 5 rows under "user104".
    load_keys(&engine, 1000..1005);
    load_keys(&engine, 1040..1045);

    let rows = scan_records(&engine, &config(), "user1000", 10, &FieldFilter::All).unwrap();

    // All 10 rows are found: 5 scoped, 5 after the unscoped fallback.
    assert_eq!(rows.len(), 10);

    // Scoped hops through the three empty partitions, then the unscoped
    // cursor, in that order.
    assert_eq!(
        engine.opened_prefixes(),
        vec![
            Some("user100".to_string()),
            Some("user101".to_string()),
            Some("user102".to_string()),
            Some("user103".to_string()),
            None,
        ]
    );

    // Every opened cursor was released.
    assert_eq!(engine.release_count(), engine.open_count());
}

#[test]
fn test_no_fallback_when_rows_arrive_before_third_strike() {
    let engine = RecordingEngine::default();
    // Two empty partitions, then data again: stays scoped throughout.
    load_keys(&engine, 1000..1005);
    load_keys(&engine, 1030..1035);

    let rows = scan_records(&engine, &config(), "user1000", 10, &FieldFilter::All).unwrap();

    assert_eq!(rows.len(), 10);
    assert_eq!(
        engine.opened_prefixes(),
        vec![
            Some("user100".to_string()),
            Some("user101".to_string()),
            Some("user102".to_string()),
            Some("user103".to_string()),
        ]
    );
}

#[test]
fn test_fallback_seek_miss_returns_rows_collected() {
    let engine = RecordingEngine::default();
    // Rows only in the start partition; the fallback's unscoped seek finds
    // nothing after it.
    load_keys(&engine, 1000..1005);

    let config = Config::builder().empty_partition_tries(0).build().unwrap();
    let rows = scan_records(&engine, &config, "user1000", 10, &FieldFilter::All).unwrap();

    // Best-effort continuation: the 5 collected rows, no error.
    assert_eq!(rows.len(), 5);
    assert_eq!(
        engine.opened_prefixes(),
        vec![Some("user100".to_string()), None]
    );
    assert_eq!(engine.release_count(), engine.open_count());
}

// =============================================================================
// Prefix Convention Tests
// =============================================================================

#[test]
fn test_non_numeric_prefix_aborts_scan() {
    let engine = RecordingEngine::default();
    let blob = sample_blob();
    engine.put(b"userabcd", blob.clone()).unwrap();
    engine.put(b"userabce", blob).unwrap();

    // Start key "userabcd" yields prefix "userabc"; advancing it requires a
    // numeral where there is none.
    let result = scan_records(&engine, &config(), "userabcd", 10, &FieldFilter::All);

    assert!(matches!(result, Err(BenchError::PrefixConvention(_))));
    assert_eq!(engine.release_count(), engine.open_count());
}
