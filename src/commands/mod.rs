use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

pub mod bench;
pub mod generate;
pub mod inspect;
pub mod read;

fn make_progress_bar(len: usize) -> Result<ProgressBar> {
  Ok(
    ProgressBar::new(len as u64)
      .with_message("passes")
      .with_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {wide_bar} {pos}/{len} {msg} ",
      )?),
  )
}
