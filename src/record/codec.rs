//! Record codec
//!
//! Encoding and decoding between [`Record`] and the wire blob stored under a
//! key.
//!
//! Both directions are pure functions over owned buffers: no inputs are
//! rejected on encode (zero-length names and values are legal), and decode
//! fails loudly on any blob whose declared lengths overrun the buffer.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{BenchError, Result};

use super::{FieldFilter, Record};

/// Width of each length field in the wire blob
const LEN_WIDTH: usize = 4;

/// Serialize a record into a wire blob
///
/// For each field in insertion order: name length, name bytes, value length,
/// value bytes. No overall framing.
pub fn serialize(record: &Record) -> Bytes {
    let payload: usize = record
        .iter()
        .map(|(name, value)| 2 * LEN_WIDTH + name.len() + value.len())
        .sum();

    let mut blob = BytesMut::with_capacity(payload);
    serialize_into(&mut blob, record);
    blob.freeze()
}

/// Serialize a record into an existing buffer
///
/// Lets adapters reuse one write buffer across operations.
pub fn serialize_into(blob: &mut BytesMut, record: &Record) {
    for (name, value) in record.iter() {
        blob.put_u32(name.len() as u32);
        blob.put_slice(name.as_bytes());
        blob.put_u32(value.len() as u32);
        blob.put_slice(value);
    }
}

/// Deserialize a wire blob into a record, honoring a field filter
///
/// Walks the blob from offset 0 to its exact end. Fields not selected by the
/// filter are skipped by their declared value length rather than decoded, so
/// offset tracking stays correct. A blob truncated mid-field is corruption
/// and fails with [`BenchError::Decode`] rather than yielding a partial
/// record.
pub fn deserialize(blob: &Bytes, filter: &FieldFilter) -> Result<Record> {
    let mut record = Record::new();
    let mut offset = 0usize;

    while offset < blob.len() {
        let name_len = read_len(blob, offset, "field name")?;
        offset += LEN_WIDTH;

        let name_end = checked_end(blob, offset, name_len, "field name")?;
        let name = std::str::from_utf8(&blob[offset..name_end])
            .map_err(|e| BenchError::Decode(format!("field name is not UTF-8: {}", e)))?
            .to_string();
        offset = name_end;

        let value_len = read_len(blob, offset, "field value")?;
        offset += LEN_WIDTH;

        let value_end = checked_end(blob, offset, value_len, "field value")?;
        if filter.matches(&name) {
            record.insert(name, blob.slice(offset..value_end));
        }
        offset = value_end;
    }

    Ok(record)
}

/// Read a big-endian u32 length at `offset`, failing if the blob is too short
fn read_len(blob: &Bytes, offset: usize, what: &str) -> Result<usize> {
    if blob.len() - offset < LEN_WIDTH {
        return Err(BenchError::Decode(format!(
            "truncated {} length at offset {} ({} bytes remain)",
            what,
            offset,
            blob.len() - offset
        )));
    }

    let raw: [u8; LEN_WIDTH] = blob[offset..offset + LEN_WIDTH].try_into().unwrap();
    Ok(u32::from_be_bytes(raw) as usize)
}

/// Bounds-check a declared length against the remaining blob
fn checked_end(blob: &Bytes, offset: usize, len: usize, what: &str) -> Result<usize> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| BenchError::Decode(format!("{} length overflows", what)))?;

    if end > blob.len() {
        return Err(BenchError::Decode(format!(
            "{} of {} bytes at offset {} overruns blob of {} bytes",
            what,
            len,
            offset,
            blob.len()
        )));
    }

    Ok(end)
}
