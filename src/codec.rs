use std::cmp::min;
use std::fmt::Debug;
use std::fs::{self, File};
use std::path::Path;

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatchReader;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::errors::ParquetError;

use crate::batch::RecordBatch;
use crate::errors::{RoundTripError, RoundTripResult};
use crate::policy::CodecPolicy;

// How many rows are handed to the writer at a time, so row groups can be
// cut close to the policy's byte target.
const ROW_GROUP_PROBE_ROWS: usize = 4096;

/// The columnar file library the harness runs against.
pub trait ColumnarCodec: Debug {
  /// Reads every record of the file at `path`, in file order.
  fn decode(&self, path: &Path) -> RoundTripResult<RecordBatch>;

  /// Writes `batch` to `path` under `policy`, replacing anything already
  /// there.
  fn encode(&self, path: &Path, batch: &RecordBatch, policy: &CodecPolicy) -> RoundTripResult<()>;
}

/// [`ColumnarCodec`] backed by the `parquet` crate's arrow reader and writer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParquetCodec;

fn writer_err(err: ParquetError) -> RoundTripError {
  let err = RoundTripError::from(err);
  if err.is_io() {
    err
  } else {
    RoundTripError::encode(err.message)
  }
}

impl ColumnarCodec for ParquetCodec {
  fn decode(&self, path: &Path) -> RoundTripResult<RecordBatch> {
    // the whole file is read up front so decode timings exclude disk seeks
    let bytes = Bytes::from(fs::read(path)?);
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)?.build()?;
    let schema = reader.schema();
    let chunks = reader.collect::<Result<Vec<_>, ArrowError>>()?;
    RecordBatch::try_new(schema, chunks)
  }

  fn encode(&self, path: &Path, batch: &RecordBatch, policy: &CodecPolicy) -> RoundTripResult<()> {
    policy.validate(batch.schema())?;
    let properties = policy.writer_properties()?;

    let file = File::create(path)?;
    let mut writer =
      ArrowWriter::try_new(file, batch.schema().clone(), Some(properties)).map_err(writer_err)?;
    for chunk in batch.chunks() {
      let n = chunk.num_rows();
      let mut start = 0;
      while start < n {
        let len = min(ROW_GROUP_PROBE_ROWS, n - start);
        writer.write(&chunk.slice(start, len)).map_err(writer_err)?;
        if writer.in_progress_size() >= policy.row_group_size {
          writer.flush().map_err(writer_err)?;
        }
        start += len;
      }
    }
    writer.close().map_err(writer_err)?;
    Ok(())
  }
}
