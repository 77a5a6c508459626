use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use prq_roundtrip::inspect::summarize;

/// Print footer metadata of a parquet file: row groups, and each column
/// chunk's encodings, compression, and sizes.
#[derive(Clone, Debug, Parser)]
pub struct InspectOpt {
  pub path: PathBuf,
}

pub fn inspect(opt: InspectOpt) -> Result<()> {
  let summary = summarize(&opt.path)?;
  println!("{}", toml::to_string_pretty(&summary)?);
  Ok(())
}
