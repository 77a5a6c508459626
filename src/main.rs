use anyhow::Result;
use clap::Parser;

use crate::opt::{Opt, OptWrapper};

mod commands;
mod opt;

fn main() -> Result<()> {
  env_logger::init();
  let opt = OptWrapper::parse().opt;
  match opt {
    Opt::Bench(bench_opt) => commands::bench::bench(bench_opt)?,
    Opt::Read(read_opt) => commands::read::read(read_opt)?,
    Opt::Generate(generate_opt) => commands::generate::generate(generate_opt)?,
    Opt::Inspect(inspect_opt) => commands::inspect::inspect(inspect_opt)?,
  }
  Ok(())
}
