//! Times decode/encode round trips of parquet files under configurable
//! encoding, compression, and format version policies.
//!
//! The columnar format itself is handled by the `parquet` crate; this crate
//! only drives it and measures.

pub use batch::{Record, RecordBatch};
pub use codec::{ColumnarCodec, ParquetCodec};
pub use errors::{ErrorKind, ErrorPhase, RoundTripError, RoundTripResult};
pub use harness::{Harness, HarnessOpt, HarnessState, Phase, Target, TimingSample};
pub use policy::{CodecPolicy, CompressionSpec, FormatVersion, StatisticsLevel, ValueEncoding};
pub use report::{EncodedOutput, RunReport};

pub mod batch;
pub mod codec;
pub mod errors;
pub mod harness;
pub mod inspect;
pub mod policy;
pub mod report;
pub mod synthetic;

#[cfg(test)]
mod tests;
