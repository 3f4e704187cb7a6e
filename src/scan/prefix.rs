//! Prefix arithmetic
//!
//! Keys follow the convention `<token><decimal numeral>` (e.g. "user1000").
//! A scan partition prefix is the leading `prefix_length` characters of a
//! key; the next partition is the prefix with its numeral incremented.

use crate::error::{BenchError, Result};

/// Derive the scan partition prefix of a key
///
/// Returns `None` when prefix-scoped scanning cannot apply: a configured
/// length of 0 (feature disabled) or a key too short to be narrowed by the
/// prefix.
pub fn prefix_of(key: &str, prefix_length: usize) -> Option<&str> {
    if prefix_length == 0 || key.len() <= prefix_length {
        return None;
    }

    key.get(..prefix_length)
}

/// Compute the lexicographically next partition prefix
///
/// Parses the decimal numeral after `token`, increments it, and re-renders
/// `token` plus the new numeral without padding. Returns `Ok(None)` when the
/// incremented numeral exceeds the capacity of the original suffix width
/// (the prefix keyspace is exhausted). A non-numeric suffix violates the key
/// convention and fails with [`BenchError::PrefixConvention`].
pub fn next_prefix(prefix: &str, token: &str) -> Result<Option<String>> {
    let suffix = prefix.strip_prefix(token).ok_or_else(|| {
        BenchError::PrefixConvention(format!(
            "prefix '{}' does not start with token '{}'",
            prefix, token
        ))
    })?;

    let numeral: u64 = suffix.parse().map_err(|_| {
        BenchError::PrefixConvention(format!(
            "prefix '{}' contains non-numeric characters after '{}'",
            prefix, token
        ))
    })?;

    let next = numeral + 1;

    // Exhausted once the numeral outgrows the suffix width, e.g. "user999"
    // has no successor at width 3.
    let width = suffix.len() as u32;
    match 10u64.checked_pow(width) {
        Some(capacity) if next > capacity - 1 => return Ok(None),
        _ => {}
    }

    Ok(Some(format!("{}{}", token, next)))
}
