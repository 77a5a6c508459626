use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;

use prq_roundtrip::{synthetic, CodecPolicy, ColumnarCodec, ParquetCodec};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TableKind {
  Int64,
  Str,
}

/// Write a random single-column table to bench against.
#[derive(Clone, Debug, Parser)]
pub struct GenerateOpt {
  #[arg(long, short)]
  pub output: PathBuf,
  #[arg(long, value_enum, default_value = "int64")]
  pub kind: TableKind,
  /// Number of rows.
  #[arg(long, short, default_value = "1000000")]
  pub n: usize,
  #[arg(long, default_value = "0")]
  pub seed: u64,
  /// Shortest string length, for `--kind str`.
  #[arg(long, default_value = "1")]
  pub min_len: usize,
  /// Longest string length, for `--kind str`.
  #[arg(long, default_value = "16")]
  pub max_len: usize,
  /// Policy to write the table under.
  #[arg(long, default_value = "parquet", value_parser = CodecPolicy::from_str)]
  pub policy: CodecPolicy,
}

pub fn generate(opt: GenerateOpt) -> Result<()> {
  let batch = match opt.kind {
    TableKind::Int64 => synthetic::int64_batch(opt.n, opt.seed)?,
    TableKind::Str => synthetic::string_batch(opt.n, opt.min_len, opt.max_len, opt.seed)?,
  };
  ParquetCodec.encode(&opt.output, &batch, &opt.policy)?;
  info!(
    "wrote {} {:?} rows to {:?} under {}",
    batch.num_rows(),
    opt.kind,
    opt.output,
    opt.policy
  );
  Ok(())
}
