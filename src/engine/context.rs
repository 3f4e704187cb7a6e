//! Engine context
//!
//! Owns the shared engine handle and its lifecycle.
//!
//! One engine is opened per process and shared by every adapter instance
//! (one adapter per client thread). The context tracks how many adapters
//! are attached and physically closes the engine exactly once, when the
//! last one detaches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{BenchError, Result};

use super::StorageEngine;

/// Shared ownership of an engine handle across adapter instances
///
/// ## Concurrency
/// - `attached`: atomic counter, lock-free on the hot attach/detach path
/// - `closed`: mutex-guarded so the physical close happens exactly once,
///   even with concurrent detaches
pub struct EngineContext<E: StorageEngine> {
    /// The engine handle, opened once per process
    engine: E,

    /// Configuration shared by every attached adapter
    config: Config,

    /// Number of currently attached adapters
    attached: AtomicUsize,

    /// Whether the engine has been physically closed
    closed: Mutex<bool>,
}

impl<E: StorageEngine> EngineContext<E> {
    /// Wrap an opened engine handle
    ///
    /// Validates the configuration; a bad config is a recoverable error for
    /// the host application, never a process abort.
    pub fn new(engine: E, config: Config) -> Result<Arc<Self>> {
        config.validate()?;

        Ok(Arc::new(Self {
            engine,
            config,
            attached: AtomicUsize::new(0),
            closed: Mutex::new(false),
        }))
    }

    /// Access the engine handle
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Access the shared configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of currently attached adapters
    pub fn attached_count(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }

    /// Whether the engine has been physically closed
    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }

    /// Register an attaching adapter
    ///
    /// Fails with [`BenchError::Closed`] once the engine has been closed;
    /// the lock is held across the check and increment so a concurrent
    /// last-detach cannot close the engine under a new adapter.
    pub(crate) fn register_adapter(&self) -> Result<()> {
        let closed = self.closed.lock();
        if *closed {
            return Err(BenchError::Closed);
        }

        self.attached.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Release a detaching adapter; the last one out closes the engine
    pub(crate) fn release_adapter(&self) {
        if self.attached.fetch_sub(1, Ordering::SeqCst) == 1 {
            let mut closed = self.closed.lock();
            if !*closed {
                if let Err(e) = self.engine.close() {
                    tracing::error!("engine close failed: {}", e);
                }
                *closed = true;
            }
        }
    }
}
