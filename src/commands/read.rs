use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use prq_roundtrip::{Harness, ParquetCodec};

use crate::commands::make_progress_bar;

/// Time full decodes of a parquet file.
#[derive(Clone, Debug, Parser)]
pub struct ReadOpt {
  #[arg(long, short)]
  pub input: PathBuf,
  #[arg(long, default_value = "10")]
  pub iters: usize,
}

pub fn read(opt: ReadOpt) -> Result<()> {
  let progress_bar = make_progress_bar(opt.iters)?;
  let report = Harness::new(ParquetCodec)
    .with_progress_bar(progress_bar.clone())
    .read_bench(&opt.input, opt.iters)?;
  progress_bar.finish_and_clear();
  report.print_table();
  Ok(())
}
