use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;

use prq_roundtrip::policy::{self, CodecPolicy};
use prq_roundtrip::{Harness, HarnessOpt, ParquetCodec, Target};

use crate::commands::make_progress_bar;

/// Decode a parquet file once, then time re-encoding it under each policy.
///
/// Each policy writes to its own file in the output directory, named after
/// the input and the policy's position, e.g. `taxi_0.parquet`. Existing
/// files there are replaced.
#[derive(Clone, Debug, Parser)]
pub struct BenchOpt {
  /// Parquet file to decode.
  #[arg(long, short)]
  pub input: PathBuf,
  #[arg(long, short, default_value = "bench_out")]
  pub output_dir: PathBuf,
  /// Comma-separated list of policies, each optionally with
  /// colon-separated settings.
  ///
  /// For example, `parquet,parquet:compression=zstd3:dict=true` compares the
  /// default policy against zstd level 3 with dictionary encoding.
  ///
  /// To see what valid settings look like, try entering an invalid one.
  #[arg(long, short, default_value = "parquet", value_parser = CodecPolicy::from_str, value_delimiter = ',')]
  pub policies: Vec<CodecPolicy>,
  /// TOML file of `[[policy]]` tables to bench in addition to `--policies`.
  #[arg(long)]
  pub policy_file: Option<PathBuf>,
  /// Number of times to encode under each policy.
  #[arg(long, default_value = "10")]
  pub iters: usize,
  /// Skip checking that each output decodes back to the input records.
  ///
  /// This does not affect benchmark timing.
  #[arg(long)]
  pub no_assertions: bool,
}

impl BenchOpt {
  fn targets(&self) -> Result<Vec<Target>> {
    let mut policies = self.policies.clone();
    if let Some(path) = &self.policy_file {
      policies.extend(policy::policies_from_toml(&fs::read_to_string(path)?)?);
    }

    let stem = self
      .input
      .file_stem()
      .and_then(|stem| stem.to_str())
      .unwrap_or("output");
    let targets = policies
      .into_iter()
      .enumerate()
      .map(|(i, policy)| {
        Target::new(
          self.output_dir.join(format!("{}_{}.parquet", stem, i)),
          policy,
        )
      })
      .collect::<Vec<_>>();

    if let Some(target) = targets.iter().find(|target| target.dest == self.input) {
      return Err(anyhow!(
        "output {:?} would overwrite the input",
        target.dest
      ));
    }
    Ok(targets)
  }
}

pub fn bench(opt: BenchOpt) -> Result<()> {
  let targets = opt.targets()?;
  fs::create_dir_all(&opt.output_dir)?;

  let progress_bar = make_progress_bar(targets.len() * opt.iters + 1)?;
  let mut harness = Harness::new(ParquetCodec)
    .with_opt(HarnessOpt {
      no_assertions: opt.no_assertions,
    })
    .with_progress_bar(progress_bar.clone());
  let report = harness.run_targets(&opt.input, &targets, opt.iters)?;
  progress_bar.finish_and_clear();
  info!(
    "finished {} targets for {} iters",
    targets.len(),
    opt.iters
  );

  report.print_table();
  Ok(())
}
