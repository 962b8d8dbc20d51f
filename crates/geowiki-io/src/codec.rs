use std::io::{Read, Write};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use geowiki_core::traits::RecordDecoder;
use geowiki_core::{Error, Result};

/// Upper bound on the encoded size of a single record. A corrupt length prefix
/// fails with a decode error instead of a huge allocation.
pub const MAX_RECORD_BYTES: u64 = 64 * 1024 * 1024;

/// Same layout `bincode::serialize_into` writes: fixed-width little-endian
/// integers, capped at `limit` bytes per value.
fn decode_options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding().allow_trailing_bytes().with_limit(limit)
}

/// Bincode-backed counted stream: a `u64` record count followed by that many
/// records.
pub struct BincodeDecoder<R> {
    reader: R,
    stream: String,
    decoded: u64,
}

impl<R: Read> BincodeDecoder<R> {
    /// `stream` names the source in error messages (usually the file path).
    pub fn new(reader: R, stream: impl Into<String>) -> Self {
        Self { reader, stream: stream.into(), decoded: 0 }
    }
}

impl<R: Read> RecordDecoder for BincodeDecoder<R> {
    fn read_count(&mut self) -> Result<u64> {
        decode_options(MAX_RECORD_BYTES)
            .deserialize_from::<_, u64>(&mut self.reader)
            .map_err(|e| Error::decode(&self.stream, format!("record count: {}", e)))
    }

    fn read_record<T: DeserializeOwned>(&mut self) -> Result<T> {
        let record = decode_options(MAX_RECORD_BYTES)
            .deserialize_from(&mut self.reader)
            .map_err(|e| Error::decode(&self.stream, format!("record {}: {}", self.decoded, e)))?;
        self.decoded += 1;
        Ok(record)
    }
}

/// Write `records` in the layout `BincodeDecoder` reads back.
pub fn encode_stream<T: Serialize, W: Write>(mut out: W, records: &[T]) -> Result<()> {
    let encode_err = |e: bincode::Error| Error::stage("encode", e);
    bincode::serialize_into(&mut out, &(records.len() as u64)).map_err(encode_err)?;
    for record in records {
        bincode::serialize_into(&mut out, record).map_err(encode_err)?;
    }
    out.flush()?;
    Ok(())
}
