//! Property-based tests for order preservation.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;

use crate::index::{IndexTarget, NumericIndexEntry, NumericRangeScan};
use crate::numeric::Numeric;
use crate::types::{Edge, EdgeId, Entity, EntityId};

use super::{Decoder, Encoder};

fn enc<N: Numeric>(v: N) -> Vec<u8> {
    let mut buf = Vec::new();
    v.encode_sortable(&mut buf);
    buf
}

proptest! {
    #[test]
    fn i32_order_preserved(a: i32, b: i32) {
        prop_assert_eq!(a.cmp(&b), enc(a).cmp(&enc(b)));
    }

    #[test]
    fn i64_order_preserved(a: i64, b: i64) {
        prop_assert_eq!(a.cmp(&b), enc(a).cmp(&enc(b)));
    }

    #[test]
    fn f32_order_preserved(
        a in any::<f32>().prop_filter("not NaN", |f| !f.is_nan()),
        b in any::<f32>().prop_filter("not NaN", |f| !f.is_nan()),
    ) {
        prop_assert_eq!(a.partial_cmp(&b), Some(enc(a).cmp(&enc(b))));
    }

    #[test]
    fn f64_order_preserved(
        a in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
        b in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
    ) {
        prop_assert_eq!(a.partial_cmp(&b), Some(enc(a).cmp(&enc(b))));
    }

    #[test]
    fn f64_decodes_to_equal_value(v in any::<f64>().prop_filter("not NaN", |f| !f.is_nan())) {
        prop_assert_eq!(f64::decode_sortable(&enc(v)).unwrap(), v);
    }

    #[test]
    fn inclusive_scan_matches_numeric_range(v: i64, a: i64, b: i64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let scan = NumericRangeScan::inclusive(IndexTarget::Node, "idx", "k", lo, hi).unwrap();
        let key = NumericIndexEntry::new(IndexTarget::Node, "idx", "k", v.into_numeric(), 1, 1)
            .encode_key()
            .unwrap();
        prop_assert_eq!(scan.contains(&key), lo <= v && v <= hi);
    }

    #[test]
    fn entity_record_roundtrip(id: u64, label in "[A-Z][a-z]{0,8}", n: i64) {
        let entity = Entity::new(EntityId::new(id)).with_label(label).with_property("n", n);
        prop_assert_eq!(Entity::decode(&entity.encode().unwrap()).unwrap(), entity);
    }

    #[test]
    fn edge_record_roundtrip(id: u64, s: u64, t: u64) {
        let edge = Edge::new(EdgeId::new(id), EntityId::new(s), EntityId::new(t), "REL");
        prop_assert_eq!(Edge::decode(&edge.encode().unwrap()).unwrap(), edge);
    }
}
