//! Random tables to benchmark against when no real dataset is at hand.

use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch as ArrowBatch;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::batch::RecordBatch;
use crate::errors::{RoundTripError, RoundTripResult};

/// One non-null column `int` of `n` random non-negative 31-bit values.
pub fn int64_batch(n: usize, seed: u64) -> RoundTripResult<RecordBatch> {
  let mut rng = StdRng::seed_from_u64(seed);
  let nums = (0..n)
    .map(|_| rng.gen_range(0..=i32::MAX as i64))
    .collect::<Vec<_>>();
  let schema = Arc::new(Schema::new(vec![Field::new(
    "int",
    DataType::Int64,
    false,
  )]));
  let batch = ArrowBatch::try_new(schema, vec![Arc::new(Int64Array::from(nums))])?;
  Ok(RecordBatch::from_arrow(batch))
}

/// One non-null column `str` of `n` random alphanumeric strings with lengths in
/// `[min_len, max_len]`.
pub fn string_batch(
  n: usize,
  min_len: usize,
  max_len: usize,
  seed: u64,
) -> RoundTripResult<RecordBatch> {
  if min_len > max_len {
    return Err(RoundTripError::invalid_argument(format!(
      "min length {} exceeds max length {}",
      min_len, max_len
    )));
  }

  let mut rng = StdRng::seed_from_u64(seed);
  let strings = (0..n)
    .map(|_| {
      let len = rng.gen_range(min_len..=max_len);
      (&mut rng)
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
    })
    .collect::<Vec<_>>();
  let schema = Arc::new(Schema::new(vec![Field::new(
    "str",
    DataType::Utf8,
    false,
  )]));
  let batch = ArrowBatch::try_new(schema, vec![Arc::new(StringArray::from(strings))])?;
  Ok(RecordBatch::from_arrow(batch))
}
