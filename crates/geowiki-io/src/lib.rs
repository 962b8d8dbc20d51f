//! geowiki-io
//!
//! Counted record streams in (`codec`, `reader`) and the joined output file
//! out (`format`, `writer`).
pub mod codec;
pub mod format;
pub mod reader;
pub mod writer;

pub use codec::{encode_stream, BincodeDecoder, MAX_RECORD_BYTES};
pub use format::{FormatRegistry, TextFormat};
pub use reader::{pump_records, spawn_reader};
pub use writer::{spawn_writer, WriteSummary};
