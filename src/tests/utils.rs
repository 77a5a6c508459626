use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{AsArray, Int64Array};
use arrow::datatypes::{DataType, Field, Int64Type, Schema};
use arrow::record_batch::RecordBatch as ArrowBatch;

use crate::batch::RecordBatch;
use crate::codec::{ColumnarCodec, ParquetCodec};
use crate::errors::{ErrorKind, RoundTripError, RoundTripResult};
use crate::policy::CodecPolicy;

pub fn id_batch(ids: Vec<i64>) -> RecordBatch {
  let schema = Arc::new(Schema::new(vec![Field::new(
    "id",
    DataType::Int64,
    false,
  )]));
  let batch = ArrowBatch::try_new(schema, vec![Arc::new(Int64Array::from(ids))]).unwrap();
  RecordBatch::from_arrow(batch)
}

pub fn ids_of(batch: &RecordBatch) -> Vec<i64> {
  batch
    .chunks()
    .iter()
    .flat_map(|chunk| chunk.column(0).as_primitive::<Int64Type>().values().to_vec())
    .collect()
}

/// Writes `batch` to `dir/name` with the default policy.
pub fn write_source(dir: &Path, name: &str, batch: &RecordBatch) -> PathBuf {
  let path = dir.join(name);
  ParquetCodec
    .encode(&path, batch, &CodecPolicy::default())
    .unwrap();
  path
}

/// Delegates to [`ParquetCodec`], keeping a copy of every file it encodes.
#[derive(Debug, Default)]
pub struct RecordingCodec {
  pub n_decodes: RefCell<usize>,
  pub encoded: RefCell<Vec<Vec<u8>>>,
}

impl ColumnarCodec for RecordingCodec {
  fn decode(&self, path: &Path) -> RoundTripResult<RecordBatch> {
    *self.n_decodes.borrow_mut() += 1;
    ParquetCodec.decode(path)
  }

  fn encode(&self, path: &Path, batch: &RecordBatch, policy: &CodecPolicy) -> RoundTripResult<()> {
    ParquetCodec.encode(path, batch, policy)?;
    self.encoded.borrow_mut().push(fs::read(path)?);
    Ok(())
  }
}

/// Decodes normally but fails every encode with the given kind.
#[derive(Debug)]
pub struct FailingCodec {
  pub kind: ErrorKind,
  pub n_encodes: RefCell<usize>,
}

impl FailingCodec {
  pub fn new(kind: ErrorKind) -> Self {
    Self {
      kind,
      n_encodes: RefCell::new(0),
    }
  }
}

impl ColumnarCodec for FailingCodec {
  fn decode(&self, path: &Path) -> RoundTripResult<RecordBatch> {
    ParquetCodec.decode(path)
  }

  fn encode(&self, _path: &Path, _batch: &RecordBatch, _policy: &CodecPolicy) -> RoundTripResult<()> {
    *self.n_encodes.borrow_mut() += 1;
    Err(RoundTripError::new(self.kind, "refusing to encode"))
  }
}

/// Writes a fixed batch instead of the one it is given, counting encodes.
#[derive(Debug, Default)]
pub struct LossyCodec {
  pub n_encodes: RefCell<usize>,
}

impl ColumnarCodec for LossyCodec {
  fn decode(&self, path: &Path) -> RoundTripResult<RecordBatch> {
    ParquetCodec.decode(path)
  }

  fn encode(&self, path: &Path, _batch: &RecordBatch, policy: &CodecPolicy) -> RoundTripResult<()> {
    *self.n_encodes.borrow_mut() += 1;
    ParquetCodec.encode(path, &id_batch(vec![9]), policy)
  }
}
