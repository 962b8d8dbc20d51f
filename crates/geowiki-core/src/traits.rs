use std::io::Write;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::types::{GeoEntity, RankedPage};

/// Sequential decoder for a counted record stream: one leading count, then
/// exactly that many records.
pub trait RecordDecoder {
    fn read_count(&mut self) -> Result<u64>;
    fn read_record<T: DeserializeOwned>(&mut self) -> Result<T>;
}

/// Serializes joined records into one output encoding. Only ranked records
/// reach a format, so both halves are always present.
pub trait RecordFormat: Send + Sync {
    /// Short name used in logs (e.g. `text`).
    fn name(&self) -> &'static str;
    fn write_record(&self, out: &mut dyn Write, entity: &GeoEntity, page: &RankedPage) -> Result<()>;
}
