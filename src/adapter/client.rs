//! Generic engine adapter
//!
//! Implements the workload API over any [`StorageEngine`] by composing the
//! record codec and the prefix-scoped scan iterator.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};

use crate::engine::{EngineContext, StorageEngine};
use crate::error::Result;
use crate::record::{self, FieldFilter, Record};
use crate::scan::scan_records;

use super::WorkloadAdapter;

/// Benchmark client adapter bound to a shared engine context
///
/// Create one per worker thread with [`KvAdapter::attach`]. Dropping the
/// adapter detaches it; the last adapter out closes the engine.
pub struct KvAdapter<E: StorageEngine> {
    /// Shared engine handle and configuration
    context: Arc<EngineContext<E>>,

    /// Reusable serialization buffer for the write path
    write_buf: BytesMut,
}

impl<E: StorageEngine> KvAdapter<E> {
    /// Attach a new adapter to the engine context
    ///
    /// Fails once the context has closed the engine.
    pub fn attach(context: &Arc<EngineContext<E>>) -> Result<Self> {
        context.register_adapter()?;

        let capacity = context.config().value_buffer_size();
        Ok(Self {
            context: Arc::clone(context),
            write_buf: BytesMut::with_capacity(capacity),
        })
    }

    /// Serialize a record through the reusable write buffer
    fn encode(&mut self, record: &Record) -> Bytes {
        self.write_buf.clear();
        self.write_buf
            .reserve(self.context.config().value_buffer_size());
        record::serialize_into(&mut self.write_buf, record);
        self.write_buf.split().freeze()
    }
}

impl<E: StorageEngine> WorkloadAdapter for KvAdapter<E> {
    fn read(&mut self, key: &str, filter: &FieldFilter) -> Result<Option<Record>> {
        match self.context.engine().get(key.as_bytes())? {
            Some(blob) => Ok(Some(record::deserialize(&blob, filter)?)),
            None => Ok(None),
        }
    }

    fn scan(
        &mut self,
        start_key: &str,
        record_count: usize,
        filter: &FieldFilter,
    ) -> Result<Vec<Record>> {
        scan_records(
            self.context.engine(),
            self.context.config(),
            start_key,
            record_count,
            filter,
        )
    }

    fn update(&mut self, key: &str, record: &Record) -> Result<()> {
        // Same storage operation as insert: the engines store whole blobs,
        // so an update is a full replacement.
        let blob = self.encode(record);
        self.context.engine().put(key.as_bytes(), blob)
    }

    fn insert(&mut self, key: &str, record: &Record) -> Result<()> {
        let blob = self.encode(record);
        self.context.engine().put(key.as_bytes(), blob)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.context.engine().delete(key.as_bytes())
    }
}

impl<E: StorageEngine> Drop for KvAdapter<E> {
    fn drop(&mut self) {
        self.context.release_adapter();
    }
}
