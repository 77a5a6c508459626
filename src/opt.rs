use clap::{Parser, Subcommand};

use crate::commands::bench::BenchOpt;
use crate::commands::generate::GenerateOpt;
use crate::commands::inspect::InspectOpt;
use crate::commands::read::ReadOpt;

#[derive(Clone, Debug, Parser)]
#[command(about = "time parquet decode/encode round trips under different writer policies")]
pub struct OptWrapper {
  #[command(subcommand)]
  pub opt: Opt,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Opt {
  Bench(BenchOpt),
  Read(ReadOpt),
  Generate(GenerateOpt),
  Inspect(InspectOpt),
}
