//! # benchkv
//!
//! Benchmark-client adapters for embedded key-value engines:
//! - A uniform read/scan/update/insert/delete workload API
//! - A multi-field record codec storing named fields as one opaque blob
//! - Prefix-partitioned range scans with unscoped fallback
//! - Shared engine lifecycle across per-thread adapter instances
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Workload Adapter (per thread)               │
//! │           read / scan / update / insert / delete             │
//! └────────────┬───────────────────────────────┬────────────────┘
//!              │                               │
//! ┌────────────▼────────────┐     ┌────────────▼────────────┐
//! │      Record Codec       │     │   Prefix-Scoped Scan    │
//! │  (fields ⇄ wire blob)   │     │     (cursor hops)       │
//! └────────────┬────────────┘     └────────────┬────────────┘
//!              │                               │
//! ┌────────────▼───────────────────────────────▼────────────────┐
//! │                     Engine Context                           │
//! │          (shared handle, last-adapter-out close)             │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │
//!                        ┌──────▼──────┐
//!                        │   Engine    │
//!                        │ get/put/del │
//!                        │   cursors   │
//!                        └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod scan;
pub mod engine;
pub mod adapter;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::Config;
pub use record::{FieldFilter, Record};
pub use engine::{EngineContext, MemoryEngine, StorageEngine};
pub use adapter::{KvAdapter, WorkloadAdapter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of benchkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
