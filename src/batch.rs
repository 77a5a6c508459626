use std::path::Path;

use arrow::array::ArrayRef;
use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch as ArrowBatch;

use crate::codec::{ColumnarCodec, ParquetCodec};
use crate::errors::{RoundTripError, RoundTripResult};

/// All records of one columnar file, in file order, with their shared schema.
///
/// Records are held as the arrow chunks the decoder produced; chunk
/// boundaries carry no meaning and are ignored by [`RecordBatch::same_contents`].
#[derive(Clone, Debug)]
pub struct RecordBatch {
  schema: SchemaRef,
  chunks: Vec<ArrowBatch>,
}

impl RecordBatch {
  /// Fails if any chunk's schema differs from `schema`.
  pub fn try_new(schema: SchemaRef, chunks: Vec<ArrowBatch>) -> RoundTripResult<Self> {
    for (i, chunk) in chunks.iter().enumerate() {
      if chunk.schema() != schema {
        return Err(RoundTripError::format(format!(
          "chunk {} has schema {:?} but batch schema is {:?}",
          i,
          chunk.schema(),
          schema,
        )));
      }
    }
    Ok(Self { schema, chunks })
  }

  pub fn from_arrow(batch: ArrowBatch) -> Self {
    Self {
      schema: batch.schema(),
      chunks: vec![batch],
    }
  }

  /// Decodes every record of the parquet file at `path`.
  pub fn load<P: AsRef<Path>>(path: P) -> RoundTripResult<Self> {
    ParquetCodec.decode(path.as_ref())
  }

  pub fn schema(&self) -> &SchemaRef {
    &self.schema
  }

  pub fn chunks(&self) -> &[ArrowBatch] {
    &self.chunks
  }

  pub fn num_rows(&self) -> usize {
    self.chunks.iter().map(|chunk| chunk.num_rows()).sum()
  }

  pub fn num_columns(&self) -> usize {
    self.schema.fields().len()
  }

  /// Returns the `i`th record, or `None` if out of bounds.
  pub fn record(&self, mut i: usize) -> Option<Record<'_>> {
    for chunk in &self.chunks {
      if i < chunk.num_rows() {
        return Some(Record { chunk, row: i });
      }
      i -= chunk.num_rows();
    }
    None
  }

  pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
    self
      .chunks
      .iter()
      .flat_map(|chunk| (0..chunk.num_rows()).map(move |row| Record { chunk, row }))
  }

  /// Copies all chunks into one contiguous arrow batch.
  pub fn concat(&self) -> RoundTripResult<ArrowBatch> {
    Ok(concat_batches(&self.schema, &self.chunks)?)
  }

  /// Whether both batches hold the same schema and the same records in the
  /// same order, regardless of how they are chunked.
  pub fn same_contents(&self, other: &RecordBatch) -> RoundTripResult<bool> {
    if self.schema.fields() != other.schema.fields() || self.num_rows() != other.num_rows() {
      return Ok(false);
    }
    let lhs = self.concat()?;
    let rhs = other.concat()?;
    // compare column data only; decoders may attach different schema metadata
    Ok(
      lhs
        .columns()
        .iter()
        .zip(rhs.columns())
        .all(|(l, r)| l.to_data() == r.to_data()),
    )
  }
}

/// A borrowed view of one record inside a [`RecordBatch`].
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
  chunk: &'a ArrowBatch,
  row: usize,
}

impl<'a> Record<'a> {
  /// The value of field `col_idx` as a one-element array.
  pub fn value(&self, col_idx: usize) -> Option<ArrayRef> {
    if col_idx >= self.chunk.num_columns() {
      return None;
    }
    Some(self.chunk.column(col_idx).slice(self.row, 1))
  }

  pub fn value_by_name(&self, name: &str) -> Option<ArrayRef> {
    let col_idx = self.chunk.schema().index_of(name).ok()?;
    self.value(col_idx)
  }

  pub fn num_fields(&self) -> usize {
    self.chunk.num_columns()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use arrow::array::{AsArray, Int64Array, StringArray};
  use arrow::datatypes::{DataType, Field, Int64Type, Schema};
  use tempfile::TempDir;

  use super::*;
  use crate::errors::ErrorKind;
  use crate::policy::CodecPolicy;

  fn id_batch(ids: Vec<i64>) -> ArrowBatch {
    let schema = Arc::new(Schema::new(vec![Field::new(
      "id",
      DataType::Int64,
      false,
    )]));
    ArrowBatch::try_new(schema, vec![Arc::new(Int64Array::from(ids))]).unwrap()
  }

  #[test]
  fn test_records_span_chunks() {
    let first = id_batch(vec![1, 2]);
    let second = id_batch(vec![3]);
    let batch = RecordBatch::try_new(first.schema(), vec![first, second]).unwrap();
    assert_eq!(batch.num_rows(), 3);
    assert_eq!(batch.num_columns(), 1);

    let ids = batch
      .records()
      .map(|record| record.value_by_name("id").unwrap().as_primitive::<Int64Type>().value(0))
      .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);

    let third = batch.record(2).unwrap();
    assert_eq!(third.num_fields(), 1);
    assert_eq!(
      third.value(0).unwrap().as_primitive::<Int64Type>().value(0),
      3
    );
    assert!(third.value(1).is_none());
    assert!(third.value_by_name("missing").is_none());
    assert!(batch.record(3).is_none());
  }

  #[test]
  fn test_same_contents_ignores_chunking() {
    let one_chunk = RecordBatch::from_arrow(id_batch(vec![1, 2, 3]));
    let first = id_batch(vec![1]);
    let two_chunks = RecordBatch::try_new(
      first.schema(),
      vec![first, id_batch(vec![2, 3])],
    )
    .unwrap();
    assert!(one_chunk.same_contents(&two_chunks).unwrap());

    let different = RecordBatch::from_arrow(id_batch(vec![1, 2, 4]));
    assert!(!one_chunk.same_contents(&different).unwrap());
  }

  #[test]
  fn test_mismatched_chunk_schema_is_rejected() {
    let ids = id_batch(vec![1]);
    let names_schema = Arc::new(Schema::new(vec![Field::new(
      "name",
      DataType::Utf8,
      true,
    )]));
    let names = ArrowBatch::try_new(
      names_schema,
      vec![Arc::new(StringArray::from(vec!["a"]))],
    )
    .unwrap();
    assert!(RecordBatch::try_new(ids.schema(), vec![ids, names]).is_err());
  }

  #[test]
  fn test_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ids.parquet");
    let source = RecordBatch::from_arrow(id_batch(vec![7, 8, 9]));
    ParquetCodec
      .encode(&path, &source, &CodecPolicy::default())
      .unwrap();
    assert!(RecordBatch::load(&path).unwrap().same_contents(&source).unwrap());

    let missing = RecordBatch::load(dir.path().join("missing.parquet")).unwrap_err();
    assert_eq!(
      missing.kind,
      ErrorKind::Io(std::io::ErrorKind::NotFound)
    );

    let garbage = dir.path().join("garbage.parquet");
    std::fs::write(&garbage, b"not parquet at all").unwrap();
    assert_eq!(
      RecordBatch::load(&garbage).unwrap_err().kind,
      ErrorKind::Format
    );
  }
}
