use std::fs::File;
use std::path::Path;

use parquet::file::metadata::{ColumnChunkMetaData, RowGroupMetaData};
use parquet::file::reader::{FileReader, SerializedFileReader};
use serde::Serialize;

use crate::errors::RoundTripResult;

#[derive(Clone, Debug, Serialize)]
pub struct ColumnSummary {
  pub path: String,
  pub physical_type: String,
  pub compression: String,
  pub encodings: Vec<String>,
  pub num_values: i64,
  pub compressed_size: i64,
  pub uncompressed_size: i64,
  pub data_page_offset: i64,
  pub dictionary_page_offset: Option<i64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RowGroupSummary {
  pub idx: usize,
  pub num_rows: i64,
  pub total_byte_size: i64,
  pub columns: Vec<ColumnSummary>,
}

/// Footer metadata of a parquet file.
#[derive(Clone, Debug, Serialize)]
pub struct FileSummary {
  pub filename: String,
  pub file_size: u64,
  pub format_version: i32,
  pub created_by: Option<String>,
  pub num_rows: i64,
  pub num_row_groups: usize,
  // tables go last so this serializes to valid TOML
  pub row_groups: Vec<RowGroupSummary>,
}

fn summarize_column(meta: &ColumnChunkMetaData) -> ColumnSummary {
  ColumnSummary {
    path: meta.column_path().string(),
    physical_type: meta.column_type().to_string(),
    compression: meta.compression().to_string(),
    encodings: meta
      .encodings()
      .iter()
      .map(|encoding| encoding.to_string())
      .collect(),
    num_values: meta.num_values(),
    compressed_size: meta.compressed_size(),
    uncompressed_size: meta.uncompressed_size(),
    data_page_offset: meta.data_page_offset(),
    dictionary_page_offset: meta.dictionary_page_offset(),
  }
}

fn summarize_row_group(idx: usize, meta: &RowGroupMetaData) -> RowGroupSummary {
  RowGroupSummary {
    idx,
    num_rows: meta.num_rows(),
    total_byte_size: meta.total_byte_size(),
    columns: meta.columns().iter().map(summarize_column).collect(),
  }
}

pub fn summarize<P: AsRef<Path>>(path: P) -> RoundTripResult<FileSummary> {
  let path = path.as_ref();
  let file = File::open(path)?;
  let file_size = file.metadata()?.len();
  let reader = SerializedFileReader::new(file)?;
  let meta = reader.metadata();
  let file_meta = meta.file_metadata();

  Ok(FileSummary {
    filename: path.display().to_string(),
    file_size,
    format_version: file_meta.version(),
    created_by: file_meta.created_by().map(|s| s.to_string()),
    num_rows: file_meta.num_rows(),
    num_row_groups: meta.num_row_groups(),
    row_groups: meta
      .row_groups()
      .iter()
      .enumerate()
      .map(|(idx, rg)| summarize_row_group(idx, rg))
      .collect(),
  })
}
