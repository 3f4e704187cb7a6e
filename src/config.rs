//! Configuration for benchkv adapters
//!
//! Centralized configuration with sensible defaults.
//!
//! Defaults follow the common benchmark key convention: keys look like
//! `user1000`, and a 7-character prefix breaks the generated keyspace into
//! roughly 1000 scan partitions.

use crate::error::{BenchError, Result};

/// Value buffers are rounded up to a multiple of this (one page-aligned block).
const VALUE_BUF_ALIGN: usize = 8192;

/// Per-field overhead in a serialized record: name bytes plus two u32 lengths,
/// with slack for field-name digits.
const FIELD_OVERHEAD: usize = 20;

/// Configuration shared by all adapter instances attached to one engine
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Key Convention
    // -------------------------------------------------------------------------
    /// Literal token every workload key starts with (e.g. "user" in "user1000")
    pub key_token: String,

    /// Number of leading key characters that form a scan partition prefix.
    /// Must be greater than `key_token.len()`; 0 disables prefix-scoped scans.
    pub prefix_length: usize,

    // -------------------------------------------------------------------------
    // Scan Configuration
    // -------------------------------------------------------------------------
    /// Consecutive empty-partition transitions tolerated before a scan falls
    /// back to a single unscoped cursor.
    pub empty_partition_tries: u32,

    // -------------------------------------------------------------------------
    // Record Shape
    // -------------------------------------------------------------------------
    /// Expected number of fields per record (buffer sizing only)
    pub field_count: usize,

    /// Expected length of each field value in bytes (buffer sizing only)
    pub field_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_token: "user".to_string(),
            // Breaks a "userNNNN..." keyspace into ~1000 partitions
            prefix_length: 7,
            empty_partition_tries: 3,
            field_count: 10,
            field_length: 100,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validate the configuration
    ///
    /// Returns a recoverable error so the host application decides whether
    /// to abort.
    pub fn validate(&self) -> Result<()> {
        if self.key_token.is_empty() {
            return Err(BenchError::Config("key_token must not be empty".to_string()));
        }

        // prefix_length == 0 disables scoped scans entirely, which is legal
        if self.prefix_length != 0 && self.prefix_length <= self.key_token.len() {
            return Err(BenchError::Config(format!(
                "prefix_length {} leaves no room for a numeric suffix after token '{}'",
                self.prefix_length, self.key_token
            )));
        }

        Ok(())
    }

    /// Size for a reusable value buffer: enough for `field_count` fields of
    /// `field_length` bytes plus per-field framing, rounded up to an 8 KiB
    /// multiple.
    pub fn value_buffer_size(&self) -> usize {
        let raw = self.field_count * (self.field_length + FIELD_OVERHEAD);
        (raw + VALUE_BUF_ALIGN - 1) & !(VALUE_BUF_ALIGN - 1)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the literal key token (e.g. "user")
    pub fn key_token(mut self, token: impl Into<String>) -> Self {
        self.config.key_token = token.into();
        self
    }

    /// Set the scan partition prefix length (0 disables scoped scans)
    pub fn prefix_length(mut self, len: usize) -> Self {
        self.config.prefix_length = len;
        self
    }

    /// Set the empty-partition tolerance before unscoped fallback
    pub fn empty_partition_tries(mut self, tries: u32) -> Self {
        self.config.empty_partition_tries = tries;
        self
    }

    /// Set the expected field count per record
    pub fn field_count(mut self, count: usize) -> Self {
        self.config.field_count = count;
        self
    }

    /// Set the expected field value length in bytes
    pub fn field_length(mut self, len: usize) -> Self {
        self.config.field_length = len;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
