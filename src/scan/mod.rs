//! Scan Module
//!
//! Prefix-partitioned range scans over engine cursors.
//!
//! ## Responsibilities
//! - Derive scan partition prefixes from keys
//! - Advance prefixes lexicographically under the numeric-suffix convention
//! - Drive the cursor state machine: seek, read, partition hops, fallback
//! - Guarantee cursor release on every exit path
//!
//! ## Why prefix-scoped cursors
//! Engines whose internals are partitioned by key prefix serve a
//! prefix-scoped cursor far more efficiently than a full-table cursor when
//! the prefix is selective. Near the tail of a generated keyspace, long runs
//! of empty prefixes make partition-hopping slower than one unscoped scan;
//! after three empty partitions the scan falls back to an unscoped cursor.

mod iterator;
mod prefix;

pub use iterator::scan_records;
pub use prefix::{next_prefix, prefix_of};
