//! Persistent counters kept in the metadata table.

use valuectx_storage::Transaction;

use super::error::{GraphError, GraphResult};

/// Table name for counters and other bookkeeping.
pub const TABLE_METADATA: &str = "metadata";

/// Counter for entity ids.
pub(crate) const ENTITY_COUNTER: &[u8] = b"next_entity_id";
/// Counter for edge ids.
pub(crate) const EDGE_COUNTER: &[u8] = b"next_edge_id";
/// Counter for numeric index entry sequence numbers.
pub(crate) const INDEX_SEQUENCE: &[u8] = b"next_index_sequence";

/// Read a counter without advancing it. Counters start at 1.
pub(crate) fn peek<T: Transaction>(tx: &T, counter: &[u8]) -> GraphResult<u64> {
    match tx.get(TABLE_METADATA, counter)? {
        Some(bytes) => {
            let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                GraphError::DataCorruption(format!(
                    "counter {} has {} bytes",
                    String::from_utf8_lossy(counter),
                    bytes.len()
                ))
            })?;
            Ok(u64::from_be_bytes(raw))
        }
        None => Ok(1),
    }
}

/// Return the next value of a counter and advance it.
pub(crate) fn next<T: Transaction>(tx: &mut T, counter: &[u8]) -> GraphResult<u64> {
    let value = peek(tx, counter)?;
    let following = value
        .checked_add(1)
        .ok_or_else(|| GraphError::DataCorruption("counter overflow".to_owned()))?;
    tx.put(TABLE_METADATA, counter, &following.to_be_bytes())?;
    Ok(value)
}
