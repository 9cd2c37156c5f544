//! Record serialization for [`Entity`] and [`Edge`].
//!
//! Format: one byte [`FORMAT_VERSION`] followed by the `bincode` (standard
//! config) serde encoding of the record.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::{Edge, Entity};

use super::traits::{Decoder, Encoder, FORMAT_VERSION};

fn encode_record<T: Serialize>(record: &T, buf: &mut Vec<u8>) -> Result<(), CoreError> {
    buf.push(FORMAT_VERSION);
    let body = bincode::serde::encode_to_vec(record, bincode::config::standard())
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    buf.extend_from_slice(&body);
    Ok(())
}

fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CoreError> {
    let (version, body) = bytes
        .split_first()
        .ok_or_else(|| CoreError::Encoding("empty record".to_owned()))?;
    if *version != FORMAT_VERSION {
        return Err(CoreError::Encoding(format!("unsupported format version: {version}")));
    }
    let (record, _) = bincode::serde::decode_from_slice(body, bincode::config::standard())
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(record)
}

impl Encoder for Entity {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        encode_record(self, buf)
    }
}

impl Decoder for Entity {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        decode_record(bytes)
    }
}

impl Encoder for Edge {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        encode_record(self, buf)
    }
}

impl Decoder for Edge {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        decode_record(bytes)
    }
}
