//! Key encoding for ordered storage.
//!
//! Entity and edge records live in their own tables and are keyed by their
//! id in big-endian form, so a table scan visits them in id order:
//!
//! - Entity keys: `[PREFIX_ENTITY][entity_id: u64]`
//! - Edge keys: `[PREFIX_EDGE][edge_id: u64]`
//!
//! Numeric index keys are built by [`crate::index`].

use crate::types::{EdgeId, EntityId};

/// Key prefix for entity data.
pub const PREFIX_ENTITY: u8 = 0x01;
/// Key prefix for edge data.
pub const PREFIX_EDGE: u8 = 0x02;

/// Encode an entity ID as a storage key.
#[inline]
#[must_use]
pub fn encode_entity_key(id: EntityId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_ENTITY);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Encode an edge ID as a storage key.
#[inline]
#[must_use]
pub fn encode_edge_key(id: EdgeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_EDGE);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Decode an entity ID from a storage key.
#[must_use]
pub fn decode_entity_key(key: &[u8]) -> Option<EntityId> {
    decode_id_key(PREFIX_ENTITY, key).map(EntityId::new)
}

/// Decode an edge ID from a storage key.
#[must_use]
pub fn decode_edge_key(key: &[u8]) -> Option<EdgeId> {
    decode_id_key(PREFIX_EDGE, key).map(EdgeId::new)
}

fn decode_id_key(prefix: u8, key: &[u8]) -> Option<u64> {
    match key.split_first() {
        Some((&p, rest)) if p == prefix => rest.try_into().ok().map(u64::from_be_bytes),
        _ => None,
    }
}

/// Create an exclusive upper bound key by incrementing a prefix.
///
/// The returned key is the smallest key that is greater than all keys with
/// the given prefix. If every byte is 0xFF a zero byte is appended instead.
#[must_use]
pub fn increment_prefix(prefix: &[u8]) -> Vec<u8> {
    let mut end_prefix = prefix.to_vec();
    while let Some(last) = end_prefix.last_mut() {
        if *last < u8::MAX {
            *last += 1;
            return end_prefix;
        }
        end_prefix.pop();
    }
    // All bytes were 0xFF
    let mut key = prefix.to_vec();
    key.push(0);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_key_roundtrip() {
        let key = encode_entity_key(EntityId::new(42));
        assert_eq!(key.len(), 9);
        assert_eq!(decode_entity_key(&key), Some(EntityId::new(42)));
        assert_eq!(decode_edge_key(&key), None);
    }

    #[test]
    fn edge_keys_are_ordered() {
        assert!(encode_edge_key(EdgeId::new(2)) < encode_edge_key(EdgeId::new(256)));
    }

    #[test]
    fn decode_invalid_key() {
        assert_eq!(decode_entity_key(&[]), None);
        assert_eq!(decode_entity_key(&[PREFIX_ENTITY, 1, 2]), None);
    }

    #[test]
    fn increment_prefix_carries() {
        assert_eq!(increment_prefix(&[1, 2]), vec![1, 3]);
        assert_eq!(increment_prefix(&[1, 0xFF]), vec![2]);
        assert_eq!(increment_prefix(&[0xFF, 0xFF]), vec![0xFF, 0xFF, 0]);
    }

    #[test]
    fn increment_prefix_bounds_all_extensions() {
        let prefix = [3u8, 0xFF];
        let end = increment_prefix(&prefix);
        let mut longer = prefix.to_vec();
        longer.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
        assert!(longer < end);
    }
}
