//! Encoding for stored graph records and storage keys.
//!
//! Entity and edge records are serialized with `bincode` behind a one-byte
//! format version. Keys are built by [`keys`] so that big-endian ids sort in
//! numeric order.

pub mod keys;
mod record;
mod traits;

#[cfg(test)]
mod proptest_tests;

pub use traits::{Decoder, Encoder, FORMAT_VERSION};
