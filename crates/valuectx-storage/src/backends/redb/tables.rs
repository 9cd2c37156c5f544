//! Redb table definitions and key encoding utilities.
//!
//! Redb table definitions are static, so every logical table shares one
//! physical table. Physical keys are `<table_name><0x00><key>`.

use redb::TableDefinition;

/// The physical table that stores all key-value pairs.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> = TableDefinition::new("valuectx_data");

/// Separator byte between table name and key in the encoded key.
pub const KEY_SEPARATOR: u8 = 0x00;

/// Encode a logical table name and key into a physical key.
pub fn encode_key(table: &str, key: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(table.len() + 1 + key.len());
    encoded.extend_from_slice(table.as_bytes());
    encoded.push(KEY_SEPARATOR);
    encoded.extend_from_slice(key);
    encoded
}

/// Strip the table prefix from a physical key.
///
/// Returns `None` if the key is malformed (missing separator).
pub fn decode_key(encoded: &[u8]) -> Option<(&str, &[u8])> {
    let sep_pos = encoded.iter().position(|&b| b == KEY_SEPARATOR)?;
    let table = std::str::from_utf8(&encoded[..sep_pos]).ok()?;
    Some((table, &encoded[sep_pos + 1..]))
}

/// The first physical key of a logical table.
pub fn table_start_key(table: &str) -> Vec<u8> {
    encode_key(table, &[])
}

/// The first physical key past a logical table.
pub fn table_end_key(table: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + 1);
    key.extend_from_slice(table.as_bytes());
    key.push(KEY_SEPARATOR + 1);
    key
}
