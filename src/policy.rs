use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use arrow::datatypes::{DataType, Schema};
use parquet::basic::{BrotliLevel, Compression, Encoding, GzipLevel, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties, WriterVersion};
use serde::Deserialize;

use crate::errors::{RoundTripError, RoundTripResult};

pub const DEFAULT_DICTIONARY_PAGE_SIZE: usize = 1 << 20;
pub const DEFAULT_PAGE_SIZE: usize = 1 << 20;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 128 << 20;
pub const DEFAULT_PAGE_ROW_COUNT_LIMIT: usize = 20_000;

const POLICY_NAMES: [&str; 3] = ["parquet", "parq", "prq"];

/// Which compressor is applied to each encoded page.
///
/// Levels are kept as plain numbers; out-of-range levels are only rejected
/// when the policy is turned into writer properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CompressionSpec {
  #[default]
  Uncompressed,
  Snappy,
  Gzip(Option<u32>),
  Zstd(Option<i32>),
  Lz4,
  Brotli(Option<u32>),
}

fn parse_level<T: FromStr>(s: &str, level_str: &str) -> RoundTripResult<Option<T>> {
  if level_str.is_empty() {
    return Ok(None);
  }
  level_str
    .parse::<T>()
    .map(Some)
    .map_err(|_| RoundTripError::invalid_argument(format!("invalid compression level in {}", s)))
}

impl FromStr for CompressionSpec {
  type Err = RoundTripError;

  fn from_str(s: &str) -> RoundTripResult<Self> {
    let lower = s.to_lowercase();
    let res = match lower.as_str() {
      "none" | "uncompressed" => CompressionSpec::Uncompressed,
      "snap" | "snappy" => CompressionSpec::Snappy,
      "lz4" => CompressionSpec::Lz4,
      other => {
        if let Some(level_str) = other.strip_prefix("gzip") {
          CompressionSpec::Gzip(parse_level(s, level_str)?)
        } else if let Some(level_str) = other.strip_prefix("zstd") {
          CompressionSpec::Zstd(parse_level(s, level_str)?)
        } else if let Some(level_str) = other.strip_prefix("brotli") {
          CompressionSpec::Brotli(parse_level(s, level_str)?)
        } else {
          return Err(RoundTripError::invalid_argument(format!(
            "unknown compression {}",
            s
          )));
        }
      }
    };
    Ok(res)
  }
}

impl TryFrom<String> for CompressionSpec {
  type Error = RoundTripError;

  fn try_from(s: String) -> RoundTripResult<Self> {
    s.parse()
  }
}

impl Display for CompressionSpec {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    fn level<T: Display>(level: &Option<T>) -> String {
      level.as_ref().map(|l| l.to_string()).unwrap_or_default()
    }

    match self {
      CompressionSpec::Uncompressed => write!(f, "uncompressed"),
      CompressionSpec::Snappy => write!(f, "snappy"),
      CompressionSpec::Gzip(l) => write!(f, "gzip{}", level(l)),
      CompressionSpec::Zstd(l) => write!(f, "zstd{}", level(l)),
      CompressionSpec::Lz4 => write!(f, "lz4"),
      CompressionSpec::Brotli(l) => write!(f, "brotli{}", level(l)),
    }
  }
}

impl CompressionSpec {
  pub fn to_parquet(&self) -> RoundTripResult<Compression> {
    let encode_err = |e: parquet::errors::ParquetError| RoundTripError::encode(e.to_string());
    let res = match *self {
      CompressionSpec::Uncompressed => Compression::UNCOMPRESSED,
      CompressionSpec::Snappy => Compression::SNAPPY,
      CompressionSpec::Gzip(level) => Compression::GZIP(match level {
        Some(l) => GzipLevel::try_new(l).map_err(encode_err)?,
        None => GzipLevel::default(),
      }),
      CompressionSpec::Zstd(level) => Compression::ZSTD(match level {
        Some(l) => ZstdLevel::try_new(l).map_err(encode_err)?,
        None => ZstdLevel::default(),
      }),
      CompressionSpec::Lz4 => Compression::LZ4_RAW,
      CompressionSpec::Brotli(level) => Compression::BROTLI(match level {
        Some(l) => BrotliLevel::try_new(l).map_err(encode_err)?,
        None => BrotliLevel::default(),
      }),
    };
    Ok(res)
  }
}

/// On-disk structural version of the written file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum FormatVersion {
  V1,
  #[default]
  V2,
}

impl FromStr for FormatVersion {
  type Err = RoundTripError;

  fn from_str(s: &str) -> RoundTripResult<Self> {
    match s.to_lowercase().as_str() {
      "1" | "1.0" | "v1" => Ok(FormatVersion::V1),
      "2" | "2.0" | "v2" => Ok(FormatVersion::V2),
      _ => Err(RoundTripError::invalid_argument(format!(
        "unknown format version {}; expected 1 or 2",
        s
      ))),
    }
  }
}

impl TryFrom<String> for FormatVersion {
  type Error = RoundTripError;

  fn try_from(s: String) -> RoundTripResult<Self> {
    s.parse()
  }
}

impl Display for FormatVersion {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      FormatVersion::V1 => write!(f, "1"),
      FormatVersion::V2 => write!(f, "2"),
    }
  }
}

impl From<FormatVersion> for WriterVersion {
  fn from(version: FormatVersion) -> Self {
    match version {
      FormatVersion::V1 => WriterVersion::PARQUET_1_0,
      FormatVersion::V2 => WriterVersion::PARQUET_2_0,
    }
  }
}

/// The non-dictionary encoding used for every leaf column. With dictionary
/// encoding on, this is what a column chunk falls back to once its
/// dictionary page fills up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ValueEncoding {
  #[default]
  Plain,
  DeltaBinaryPacked,
  DeltaLengthByteArray,
  DeltaByteArray,
  ByteStreamSplit,
  Rle,
}

impl ValueEncoding {
  const ALL: [ValueEncoding; 6] = [
    ValueEncoding::Plain,
    ValueEncoding::DeltaBinaryPacked,
    ValueEncoding::DeltaLengthByteArray,
    ValueEncoding::DeltaByteArray,
    ValueEncoding::ByteStreamSplit,
    ValueEncoding::Rle,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      ValueEncoding::Plain => "plain",
      ValueEncoding::DeltaBinaryPacked => "delta_binary_packed",
      ValueEncoding::DeltaLengthByteArray => "delta_length_byte_array",
      ValueEncoding::DeltaByteArray => "delta_byte_array",
      ValueEncoding::ByteStreamSplit => "byte_stream_split",
      ValueEncoding::Rle => "rle",
    }
  }

  pub fn to_parquet(&self) -> Encoding {
    match self {
      ValueEncoding::Plain => Encoding::PLAIN,
      ValueEncoding::DeltaBinaryPacked => Encoding::DELTA_BINARY_PACKED,
      ValueEncoding::DeltaLengthByteArray => Encoding::DELTA_LENGTH_BYTE_ARRAY,
      ValueEncoding::DeltaByteArray => Encoding::DELTA_BYTE_ARRAY,
      ValueEncoding::ByteStreamSplit => Encoding::BYTE_STREAM_SPLIT,
      ValueEncoding::Rle => Encoding::RLE,
    }
  }

  fn requires_v2(&self) -> bool {
    !matches!(self, ValueEncoding::Plain)
  }

  fn supports(&self, storage: Storage) -> bool {
    use Storage::*;

    match self {
      ValueEncoding::Plain => true,
      ValueEncoding::DeltaBinaryPacked => matches!(storage, Int32 | Int64),
      ValueEncoding::DeltaLengthByteArray => matches!(storage, ByteArray),
      ValueEncoding::DeltaByteArray => matches!(storage, ByteArray | FixedLenByteArray),
      ValueEncoding::ByteStreamSplit => matches!(storage, Float),
      ValueEncoding::Rle => matches!(storage, Boolean),
    }
  }
}

impl FromStr for ValueEncoding {
  type Err = RoundTripError;

  fn from_str(s: &str) -> RoundTripResult<Self> {
    let lower = s.to_lowercase();
    Self::ALL
      .iter()
      .find(|encoding| encoding.name() == lower)
      .copied()
      .ok_or_else(|| {
        RoundTripError::invalid_argument(format!(
          "unknown encoding {}. Expected one of: {:?}",
          s,
          Self::ALL.iter().map(|e| e.name()).collect::<Vec<_>>(),
        ))
      })
  }
}

impl TryFrom<String> for ValueEncoding {
  type Error = RoundTripError;

  fn try_from(s: String) -> RoundTripResult<Self> {
    s.parse()
  }
}

impl Display for ValueEncoding {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StatisticsLevel {
  #[default]
  None,
  Chunk,
  Page,
}

impl FromStr for StatisticsLevel {
  type Err = RoundTripError;

  fn from_str(s: &str) -> RoundTripResult<Self> {
    match s.to_lowercase().as_str() {
      "none" => Ok(StatisticsLevel::None),
      "chunk" => Ok(StatisticsLevel::Chunk),
      "page" => Ok(StatisticsLevel::Page),
      _ => Err(RoundTripError::invalid_argument(format!(
        "unknown statistics level {}; expected none, chunk, or page",
        s
      ))),
    }
  }
}

impl TryFrom<String> for StatisticsLevel {
  type Error = RoundTripError;

  fn try_from(s: String) -> RoundTripResult<Self> {
    s.parse()
  }
}

impl Display for StatisticsLevel {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      StatisticsLevel::None => "none",
      StatisticsLevel::Chunk => "chunk",
      StatisticsLevel::Page => "page",
    };
    write!(f, "{}", s)
  }
}

impl From<StatisticsLevel> for EnabledStatistics {
  fn from(level: StatisticsLevel) -> Self {
    match level {
      StatisticsLevel::None => EnabledStatistics::None,
      StatisticsLevel::Chunk => EnabledStatistics::Chunk,
      StatisticsLevel::Page => EnabledStatistics::Page,
    }
  }
}

/// How the values of a leaf column are physically stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Storage {
  Boolean,
  Int32,
  Int64,
  Float,
  ByteArray,
  FixedLenByteArray,
}

// Follows the arrow -> parquet type mapping of parquet::arrow.
fn collect_leaf_storage(dtype: &DataType, leaves: &mut Vec<Storage>) {
  use DataType::*;

  let storage = match dtype {
    Boolean => Storage::Boolean,
    Null | Int8 | Int16 | Int32 | UInt8 | UInt16 | UInt32 | Date32 | Time32(_) => Storage::Int32,
    Int64 | UInt64 | Date64 | Time64(_) | Timestamp(_, _) | Duration(_) => Storage::Int64,
    Decimal128(precision, _) | Decimal256(precision, _) => match precision {
      0..=9 => Storage::Int32,
      10..=18 => Storage::Int64,
      _ => Storage::FixedLenByteArray,
    },
    Float32 | Float64 => Storage::Float,
    Float16 | FixedSizeBinary(_) | Interval(_) => Storage::FixedLenByteArray,
    Utf8 | LargeUtf8 | Utf8View | Binary | LargeBinary | BinaryView => Storage::ByteArray,
    Dictionary(_, value_type) => return collect_leaf_storage(value_type, leaves),
    List(field) | LargeList(field) | FixedSizeList(field, _) | Map(field, _) => {
      return collect_leaf_storage(field.data_type(), leaves)
    }
    Struct(fields) => {
      for field in fields {
        collect_leaf_storage(field.data_type(), leaves);
      }
      return;
    }
    // anything else is left to the writer to accept or reject
    _ => return,
  };
  leaves.push(storage);
}

/// How a record batch should be serialized.
///
/// A policy is plain data: construction never fails, and combinations that
/// don't fit a batch's schema are only reported by [`CodecPolicy::validate`]
/// when encoding.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecPolicy {
  pub compression: CompressionSpec,
  #[serde(alias = "dict")]
  pub dictionary_enabled: bool,
  /// Soft cap in bytes on a column chunk's dictionary page, past which the
  /// chunk falls back to `encoding`.
  #[serde(alias = "dict_page_size")]
  pub dictionary_page_size: usize,
  /// Target uncompressed bytes per data page.
  pub page_size: usize,
  /// Target bytes per row group.
  #[serde(alias = "group_size")]
  pub row_group_size: usize,
  /// Hard cap on records per data page.
  #[serde(alias = "page_row_limit")]
  pub page_row_count_limit: usize,
  #[serde(alias = "version")]
  pub format_version: FormatVersion,
  pub encoding: ValueEncoding,
  #[serde(alias = "stats")]
  pub statistics: StatisticsLevel,
}

impl Default for CodecPolicy {
  fn default() -> Self {
    Self {
      compression: CompressionSpec::default(),
      dictionary_enabled: false,
      dictionary_page_size: DEFAULT_DICTIONARY_PAGE_SIZE,
      page_size: DEFAULT_PAGE_SIZE,
      row_group_size: DEFAULT_ROW_GROUP_SIZE,
      page_row_count_limit: DEFAULT_PAGE_ROW_COUNT_LIMIT,
      format_version: FormatVersion::default(),
      encoding: ValueEncoding::default(),
      statistics: StatisticsLevel::default(),
    }
  }
}

fn parse_size(key: &str, value: &str) -> RoundTripResult<usize> {
  value.parse().map_err(|_| {
    RoundTripError::invalid_argument(format!(
      "{} must be a non-negative integer, but was {}",
      key, value
    ))
  })
}

fn parse_bool(key: &str, value: &str) -> RoundTripResult<bool> {
  match value.to_lowercase().as_str() {
    "true" | "on" | "1" => Ok(true),
    "false" | "off" | "0" => Ok(false),
    _ => Err(RoundTripError::invalid_argument(format!(
      "{} must be true or false, but was {}",
      key, value
    ))),
  }
}

impl CodecPolicy {
  pub fn with_compression(mut self, compression: CompressionSpec) -> Self {
    self.compression = compression;
    self
  }

  pub fn with_dictionary_enabled(mut self, enabled: bool) -> Self {
    self.dictionary_enabled = enabled;
    self
  }

  pub fn with_dictionary_page_size(mut self, bytes: usize) -> Self {
    self.dictionary_page_size = bytes;
    self
  }

  pub fn with_page_size(mut self, bytes: usize) -> Self {
    self.page_size = bytes;
    self
  }

  pub fn with_row_group_size(mut self, bytes: usize) -> Self {
    self.row_group_size = bytes;
    self
  }

  pub fn with_page_row_count_limit(mut self, n: usize) -> Self {
    self.page_row_count_limit = n;
    self
  }

  pub fn with_format_version(mut self, version: FormatVersion) -> Self {
    self.format_version = version;
    self
  }

  pub fn with_encoding(mut self, encoding: ValueEncoding) -> Self {
    self.encoding = encoding;
    self
  }

  pub fn with_statistics(mut self, statistics: StatisticsLevel) -> Self {
    self.statistics = statistics;
    self
  }

  fn get_confs(&self) -> Vec<(&'static str, String)> {
    vec![
      ("compression", self.compression.to_string()),
      ("dict", self.dictionary_enabled.to_string()),
      (
        "dict_page_size",
        self.dictionary_page_size.to_string(),
      ),
      ("page_size", self.page_size.to_string()),
      ("group_size", self.row_group_size.to_string()),
      (
        "page_row_limit",
        self.page_row_count_limit.to_string(),
      ),
      ("version", self.format_version.to_string()),
      ("encoding", self.encoding.to_string()),
      ("stats", self.statistics.to_string()),
    ]
  }

  fn set_conf(&mut self, key: &str, value: &str) -> RoundTripResult<()> {
    match key {
      "compression" => self.compression = value.parse()?,
      "dict" | "dictionary" | "dictionary_enabled" => {
        self.dictionary_enabled = parse_bool(key, value)?
      }
      "dict_page_size" | "dictionary_page_size" => {
        self.dictionary_page_size = parse_size(key, value)?
      }
      "page_size" => self.page_size = parse_size(key, value)?,
      "group_size" | "row_group_size" => self.row_group_size = parse_size(key, value)?,
      "page_row_limit" | "page_row_count_limit" => {
        self.page_row_count_limit = parse_size(key, value)?
      }
      "version" | "format_version" => self.format_version = value.parse()?,
      "encoding" => self.encoding = value.parse()?,
      "stats" | "statistics" => self.statistics = value.parse()?,
      _ => {
        return Err(RoundTripError::invalid_argument(format!(
          "unknown conf: {}; valid confs are {:?}",
          key,
          self.get_confs().iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        )))
      }
    }
    Ok(())
  }

  /// The non-default settings, as `:key=value` pairs.
  pub fn details(&self) -> String {
    let default_confs: HashMap<&'static str, String> =
      Self::default().get_confs().into_iter().collect();
    let mut res = String::new();
    for (k, v) in self.get_confs() {
      if default_confs.get(k) != Some(&v) {
        res.push_str(&format!(":{}={}", k, v));
      }
    }
    res
  }

  /// Checks that every leaf column of `schema` can be written under this
  /// policy.
  pub fn validate(&self, schema: &Schema) -> RoundTripResult<()> {
    for (key, value) in [
      ("page_size", self.page_size),
      ("dict_page_size", self.dictionary_page_size),
      ("group_size", self.row_group_size),
      ("page_row_limit", self.page_row_count_limit),
    ] {
      if value == 0 {
        return Err(RoundTripError::encode(format!(
          "{} must be positive",
          key
        )));
      }
    }

    if self.encoding.requires_v2() && self.format_version == FormatVersion::V1 {
      return Err(RoundTripError::encode(format!(
        "encoding {} requires format version 2",
        self.encoding,
      )));
    }

    for field in schema.fields() {
      let mut leaves = Vec::new();
      collect_leaf_storage(field.data_type(), &mut leaves);
      for storage in leaves {
        if self.dictionary_enabled && storage == Storage::Boolean {
          return Err(RoundTripError::encode(format!(
            "dictionary encoding is not supported for boolean field {}",
            field.name(),
          )));
        }
        if !self.encoding.supports(storage) {
          return Err(RoundTripError::encode(format!(
            "encoding {} is not supported for field {} of type {:?}",
            self.encoding,
            field.name(),
            field.data_type(),
          )));
        }
      }
    }
    Ok(())
  }

  pub fn writer_properties(&self) -> RoundTripResult<WriterProperties> {
    let properties = WriterProperties::builder()
      .set_writer_version(self.format_version.into())
      .set_compression(self.compression.to_parquet()?)
      .set_dictionary_enabled(self.dictionary_enabled)
      .set_dictionary_page_size_limit(self.dictionary_page_size)
      .set_data_page_size_limit(self.page_size)
      .set_data_page_row_count_limit(self.page_row_count_limit)
      .set_encoding(self.encoding.to_parquet())
      .set_statistics_enabled(self.statistics.into())
      // row groups are cut by bytes in the codec instead of by row count
      .set_max_row_group_size(usize::MAX)
      .build();
    Ok(properties)
  }
}

impl FromStr for CodecPolicy {
  type Err = RoundTripError;

  /// Parses `parquet[:key=value]*`, e.g. `parquet:compression=zstd3:dict=true`.
  fn from_str(s: &str) -> RoundTripResult<Self> {
    let mut parts = s.split(':').peekable();
    if let Some(&name) = parts.peek() {
      if POLICY_NAMES.contains(&name.to_lowercase().as_str()) {
        parts.next();
      } else if !name.contains('=') {
        return Err(RoundTripError::invalid_argument(format!(
          "unknown policy name: {}",
          name
        )));
      }
    }

    let mut policy = CodecPolicy::default();
    for part in parts {
      let kv_vec = part.split('=').collect::<Vec<_>>();
      if kv_vec.len() != 2 {
        return Err(RoundTripError::invalid_argument(format!(
          "policy config {} is not a key=value pair",
          part
        )));
      }
      policy.set_conf(kv_vec[0], kv_vec[1])?;
    }
    Ok(policy)
  }
}

impl Display for CodecPolicy {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}{}", POLICY_NAMES[0], self.details())
  }
}

#[derive(Deserialize)]
struct PolicyFile {
  #[serde(default)]
  policy: Vec<CodecPolicy>,
}

/// Parses policies from TOML `[[policy]]` tables; missing keys take their
/// default values.
pub fn policies_from_toml(s: &str) -> RoundTripResult<Vec<CodecPolicy>> {
  let file: PolicyFile =
    toml::from_str(s).map_err(|e| RoundTripError::invalid_argument(e.to_string()))?;
  Ok(file.policy)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use arrow::datatypes::Field;

  use super::*;
  use crate::errors::ErrorKind;

  fn schema(dtypes: Vec<DataType>) -> Schema {
    Schema::new(
      dtypes
        .into_iter()
        .enumerate()
        .map(|(i, dtype)| Field::new(format!("c{}", i), dtype, true))
        .collect::<Vec<_>>(),
    )
  }

  #[test]
  fn test_parse_and_display() {
    let policy: CodecPolicy = "parquet:compression=zstd3:dict=true:version=1"
      .parse()
      .unwrap();
    assert_eq!(
      policy,
      CodecPolicy::default()
        .with_compression(CompressionSpec::Zstd(Some(3)))
        .with_dictionary_enabled(true)
        .with_format_version(FormatVersion::V1)
    );
    assert_eq!(
      policy.to_string(),
      "parquet:compression=zstd3:dict=true:version=1"
    );
    assert_eq!(
      CodecPolicy::default().to_string(),
      "parquet"
    );

    let bare: CodecPolicy = "compression=snappy".parse().unwrap();
    assert_eq!(bare.compression, CompressionSpec::Snappy);
  }

  #[test]
  fn test_parse_errors() {
    for bad in [
      "parquet:nope=1",
      "parquet:compression",
      "parquet:compression=lzma",
      "parquet:page_size=-3",
      "orc",
    ] {
      let err = bad.parse::<CodecPolicy>().unwrap_err();
      assert_eq!(err.kind, ErrorKind::InvalidArgument, "{}", bad);
    }
  }

  #[test]
  fn test_policies_from_toml() {
    let policies = policies_from_toml(
      r#"
[[policy]]
compression = "gzip"

[[policy]]
dict = true
dict_page_size = 4096
encoding = "delta_binary_packed"
"#,
    )
    .unwrap();
    assert_eq!(policies.len(), 2);
    assert_eq!(
      policies[0].compression,
      CompressionSpec::Gzip(None)
    );
    assert!(policies[1].dictionary_enabled);
    assert_eq!(policies[1].dictionary_page_size, 4096);
    assert_eq!(
      policies[1].encoding,
      ValueEncoding::DeltaBinaryPacked
    );
    assert_eq!(policies[1].page_size, DEFAULT_PAGE_SIZE);

    assert!(policies_from_toml("[[policy]]\ncolor = \"red\"").is_err());
  }

  #[test]
  fn test_validate_encodings_by_type() {
    let ints = schema(vec![DataType::Int64, DataType::Int32]);
    let floats = schema(vec![DataType::Float64]);
    let strings = schema(vec![DataType::Utf8]);

    let delta = CodecPolicy::default().with_encoding(ValueEncoding::DeltaBinaryPacked);
    assert!(delta.validate(&ints).is_ok());
    assert_eq!(
      delta.validate(&floats).unwrap_err().kind,
      ErrorKind::Encode
    );

    let split = CodecPolicy::default().with_encoding(ValueEncoding::ByteStreamSplit);
    assert!(split.validate(&floats).is_ok());
    assert!(split.validate(&strings).is_err());

    let delta_len = CodecPolicy::default().with_encoding(ValueEncoding::DeltaLengthByteArray);
    assert!(delta_len.validate(&strings).is_ok());
    assert!(delta_len.validate(&ints).is_err());
  }

  #[test]
  fn test_validate_nested_leaves() {
    let nested = schema(vec![DataType::List(Arc::new(Field::new(
      "item",
      DataType::Float32,
      true,
    )))]);
    assert!(CodecPolicy::default()
      .with_encoding(ValueEncoding::ByteStreamSplit)
      .validate(&nested)
      .is_ok());
    assert!(CodecPolicy::default()
      .with_encoding(ValueEncoding::DeltaBinaryPacked)
      .validate(&nested)
      .is_err());
  }

  #[test]
  fn test_validate_dictionary_on_boolean() {
    let bools = schema(vec![DataType::Boolean]);
    let dict = CodecPolicy::default().with_dictionary_enabled(true);
    assert_eq!(
      dict.validate(&bools).unwrap_err().kind,
      ErrorKind::Encode
    );
    assert!(dict
      .validate(&schema(vec![DataType::Int64]))
      .is_ok());
  }

  #[test]
  fn test_validate_version_and_sizes() {
    let ints = schema(vec![DataType::Int64]);
    let v1_delta = CodecPolicy::default()
      .with_encoding(ValueEncoding::DeltaBinaryPacked)
      .with_format_version(FormatVersion::V1);
    assert!(v1_delta.validate(&ints).is_err());
    assert!(CodecPolicy::default()
      .with_format_version(FormatVersion::V1)
      .validate(&ints)
      .is_ok());
    assert!(CodecPolicy::default()
      .with_page_row_count_limit(0)
      .validate(&ints)
      .is_err());
  }

  #[test]
  fn test_writer_properties() {
    let policy = CodecPolicy::default()
      .with_compression(CompressionSpec::Snappy)
      .with_dictionary_enabled(true)
      .with_page_row_count_limit(100);
    let props = policy.writer_properties().unwrap();
    assert_eq!(
      props.writer_version(),
      WriterVersion::PARQUET_2_0
    );
    assert_eq!(props.data_page_row_count_limit(), 100);
    assert_eq!(
      props.dictionary_page_size_limit(),
      DEFAULT_DICTIONARY_PAGE_SIZE
    );

    let bad_level = CodecPolicy::default().with_compression(CompressionSpec::Gzip(Some(99)));
    assert_eq!(
      bad_level.writer_properties().unwrap_err().kind,
      ErrorKind::Encode
    );
  }
}
