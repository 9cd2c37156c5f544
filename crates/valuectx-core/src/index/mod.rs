//! Named numeric index entries and range-scan bounds.
//!
//! A named index maps `(element, key)` pairs to numbers. Every recorded number
//! is one storage key; the layout puts the number right after the
//! `(target, index, key, kind)` prefix so that a prefix scan yields entries in
//! ascending numeric order:
//!
//! ```text
//! [target][name_len: u16][name][key_len: u16][key][kind tag][sortable value][element: u64][sequence: u64]
//! ```
//!
//! - `target` - nodes and relationships have separate namespaces
//! - `name_len`/`key_len` - length prefixes so `("ab", "c")` and `("a", "bc")` never collide
//! - `kind tag` - see [`NumericKind::tag`]
//! - `element` - the id of the indexed node or relationship
//! - `sequence` - unique per entry, so recording the same value twice keeps both
//!
//! # Example
//!
//! ```
//! use valuectx_core::index::{IndexTarget, NumericIndexEntry, NumericRangeScan};
//! use valuectx_core::Numeric;
//!
//! let entry = NumericIndexEntry::new(IndexTarget::Node, "time", "timestamp", 25i64.into_numeric(), 7, 1);
//! let key = entry.encode_key().unwrap();
//!
//! let scan = NumericRangeScan::inclusive(IndexTarget::Node, "time", "timestamp", 8i64, 30i64).unwrap();
//! assert!(scan.contains(&key));
//! assert_eq!(NumericIndexEntry::decode_key(&key).unwrap(), entry);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::keys::increment_prefix;
use crate::error::CoreError;
use crate::numeric::{Numeric, NumericKind, NumericValue};
use crate::types::{EdgeId, EntityId};

/// What kind of graph element a named index points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexTarget {
    /// The index records values for nodes.
    Node,
    /// The index records values for relationships.
    Relationship,
}

impl IndexTarget {
    /// The leading byte of every key belonging to this target.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Node => 0x01,
            Self::Relationship => 0x02,
        }
    }

    /// Look up a target by its tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::Node),
            0x02 => Some(Self::Relationship),
            _ => None,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Relationship => "relationship",
        }
    }
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An id type that can be stored in a named index.
pub trait IndexedElement:
    Copy + Eq + Ord + fmt::Debug + fmt::Display + Serialize + Send + Sync + 'static
{
    /// The index namespace for this element type.
    const TARGET: IndexTarget;

    /// The raw id.
    fn raw_id(self) -> u64;

    /// Rebuild the id from its raw form.
    fn from_raw_id(raw: u64) -> Self;
}

impl IndexedElement for EntityId {
    const TARGET: IndexTarget = IndexTarget::Node;

    fn raw_id(self) -> u64 {
        self.as_u64()
    }

    fn from_raw_id(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl IndexedElement for EdgeId {
    const TARGET: IndexTarget = IndexTarget::Relationship;

    fn raw_id(self) -> u64 {
        self.as_u64()
    }

    fn from_raw_id(raw: u64) -> Self {
        Self::new(raw)
    }
}

fn push_str(buf: &mut Vec<u8>, s: &str, what: &str) -> Result<(), CoreError> {
    let len = u16::try_from(s.len())
        .map_err(|_| CoreError::Validation(format!("{what} too long: {} bytes", s.len())))?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

fn read_str<'a>(bytes: &'a [u8], pos: &mut usize) -> Option<&'a str> {
    let len_bytes = bytes.get(*pos..*pos + 2)?;
    let len = usize::from(u16::from_be_bytes([len_bytes[0], len_bytes[1]]));
    *pos += 2;
    let s = std::str::from_utf8(bytes.get(*pos..*pos + len)?).ok()?;
    *pos += len;
    Some(s)
}

fn read_u64(bytes: &[u8], pos: &mut usize) -> Option<u64> {
    let raw: [u8; 8] = bytes.get(*pos..*pos + 8)?.try_into().ok()?;
    *pos += 8;
    Some(u64::from_be_bytes(raw))
}

/// Key prefix covering every entry of a named index.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the name is longer than `u16::MAX` bytes.
pub fn encode_index_prefix(target: IndexTarget, index: &str) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::with_capacity(3 + index.len());
    buf.push(target.tag());
    push_str(&mut buf, index, "index name")?;
    Ok(buf)
}

/// Key prefix covering every entry recorded under `key` in a named index.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the name or key is longer than `u16::MAX` bytes.
pub fn encode_key_prefix(target: IndexTarget, index: &str, key: &str) -> Result<Vec<u8>, CoreError> {
    let mut buf = encode_index_prefix(target, index)?;
    push_str(&mut buf, key, "index key")?;
    Ok(buf)
}

/// Key prefix covering every entry of one numeric kind under `key`.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the name or key is longer than `u16::MAX` bytes.
pub fn encode_kind_prefix(
    target: IndexTarget,
    index: &str,
    key: &str,
    kind: NumericKind,
) -> Result<Vec<u8>, CoreError> {
    let mut buf = encode_key_prefix(target, index, key)?;
    buf.push(kind.tag());
    Ok(buf)
}

/// One recorded number in a named index.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericIndexEntry {
    /// Node or relationship namespace.
    pub target: IndexTarget,
    /// Index name.
    pub index: String,
    /// Key within the index.
    pub key: String,
    /// The recorded number.
    pub value: NumericValue,
    /// Raw id of the indexed element.
    pub element: u64,
    /// Per-entry sequence number.
    pub sequence: u64,
}

impl NumericIndexEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(
        target: IndexTarget,
        index: impl Into<String>,
        key: impl Into<String>,
        value: NumericValue,
        element: u64,
        sequence: u64,
    ) -> Self {
        Self { target, index: index.into(), key: key.into(), value, element, sequence }
    }

    /// Encode this entry as a storage key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name or key is longer than `u16::MAX` bytes.
    pub fn encode_key(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = encode_kind_prefix(self.target, &self.index, &self.key, self.value.kind())?;
        self.value.encode_sortable(&mut buf);
        buf.extend_from_slice(&self.element.to_be_bytes());
        buf.extend_from_slice(&self.sequence.to_be_bytes());
        Ok(buf)
    }

    /// Decode an entry from a storage key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the key is malformed.
    pub fn decode_key(bytes: &[u8]) -> Result<Self, CoreError> {
        Self::try_decode(bytes)
            .ok_or_else(|| CoreError::Encoding("malformed numeric index key".to_owned()))
    }

    fn try_decode(bytes: &[u8]) -> Option<Self> {
        let target = IndexTarget::from_tag(*bytes.first()?)?;
        let mut pos = 1;
        let index = read_str(bytes, &mut pos)?.to_owned();
        let key = read_str(bytes, &mut pos)?.to_owned();
        let kind = NumericKind::from_tag(*bytes.get(pos)?)?;
        pos += 1;
        let value = NumericValue::decode_sortable(kind, bytes.get(pos..pos + kind.width())?).ok()?;
        pos += kind.width();
        let element = read_u64(bytes, &mut pos)?;
        let sequence = read_u64(bytes, &mut pos)?;
        if pos != bytes.len() {
            return None;
        }
        Some(Self { target, index, key, value, element, sequence })
    }

    /// Read only the element id from an encoded key.
    ///
    /// The element id sits at a fixed offset from the end of every key.
    #[must_use]
    pub fn decode_element(bytes: &[u8]) -> Option<u64> {
        let end = bytes.len().checked_sub(8)?;
        let start = end.checked_sub(8)?;
        bytes[start..end].try_into().ok().map(u64::from_be_bytes)
    }
}

/// Storage key bounds for a numeric range over one `(target, index, key, kind)`.
///
/// `start` is inclusive and `end` is exclusive, the same convention the
/// storage layer uses for range scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRangeScan {
    /// First key in the range (inclusive).
    pub start: Vec<u8>,
    /// First key past the range (exclusive).
    pub end: Vec<u8>,
}

impl NumericRangeScan {
    /// Build bounds for `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name or key is too long.
    pub fn inclusive<N: Numeric>(
        target: IndexTarget,
        index: &str,
        key: &str,
        min: N,
        max: N,
    ) -> Result<Self, CoreError> {
        Self::new(target, index, key, min, true, max, true)
    }

    /// Build bounds between `min` and `max` with explicit inclusivity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name or key is too long.
    pub fn new<N: Numeric>(
        target: IndexTarget,
        index: &str,
        key: &str,
        min: N,
        min_inclusive: bool,
        max: N,
        max_inclusive: bool,
    ) -> Result<Self, CoreError> {
        let prefix = encode_kind_prefix(target, index, key, N::KIND)?;

        let mut min_key = prefix.clone();
        min.encode_sortable(&mut min_key);
        let start = if min_inclusive { min_key } else { increment_prefix(&min_key) };

        let mut max_key = prefix;
        max.encode_sortable(&mut max_key);
        let end = if max_inclusive { increment_prefix(&max_key) } else { max_key };

        Ok(Self { start, end })
    }

    /// Bounds covering every entry of one kind under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name or key is too long.
    pub fn all_of_kind(
        target: IndexTarget,
        index: &str,
        key: &str,
        kind: NumericKind,
    ) -> Result<Self, CoreError> {
        let start = encode_kind_prefix(target, index, key, kind)?;
        let end = increment_prefix(&start);
        Ok(Self { start, end })
    }

    /// Returns `true` if no key can fall inside these bounds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `key` falls inside these bounds.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && key < self.end.as_slice()
    }
}
