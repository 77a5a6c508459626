use std::path::PathBuf;
use std::time::Duration;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::harness::{Phase, TimingSample};

/// A file written during a run and its size after the first encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedOutput {
  pub target: usize,
  pub dest: PathBuf,
  pub policy: String,
  pub size: u64,
}

/// Everything a run measured. Samples are in the order they were taken.
#[derive(Clone, Debug, Default)]
pub struct RunReport {
  samples: Vec<TimingSample>,
  pub outputs: Vec<EncodedOutput>,
}

pub fn median_duration(mut durations: Vec<Duration>) -> Option<Duration> {
  if durations.is_empty() {
    return None;
  }
  durations.sort_unstable();
  let lo = durations[(durations.len() - 1) / 2];
  let hi = durations[durations.len() / 2];
  Some((lo + hi) / 2)
}

pub fn mean_duration(durations: &[Duration]) -> Option<Duration> {
  if durations.is_empty() {
    return None;
  }
  let total_nanos: u128 = durations.iter().map(Duration::as_nanos).sum();
  let mean_nanos = total_nanos / durations.len() as u128;
  Some(Duration::new(
    (mean_nanos / 1_000_000_000) as u64,
    (mean_nanos % 1_000_000_000) as u32,
  ))
}

fn display_duration(duration: &Duration) -> String {
  format!("{:?}", duration)
}

fn display_size(size: &Option<u64>) -> String {
  size.map(|s| s.to_string()).unwrap_or_default()
}

#[derive(Clone, Tabled)]
pub struct PrintStat {
  pub phase: String,
  pub n: usize,
  #[tabled(display_with = "display_duration")]
  pub mean_dt: Duration,
  #[tabled(display_with = "display_duration")]
  pub median_dt: Duration,
  #[tabled(display_with = "display_duration")]
  pub total_dt: Duration,
  #[tabled(display_with = "display_size")]
  pub output_size: Option<u64>,
}

impl RunReport {
  pub(crate) fn push(&mut self, sample: TimingSample) {
    self.samples.push(sample);
  }

  pub fn samples(&self) -> &[TimingSample] {
    &self.samples
  }

  pub fn decode_samples(&self) -> Vec<&TimingSample> {
    self
      .samples
      .iter()
      .filter(|sample| sample.phase == Phase::Decode)
      .collect()
  }

  pub fn encode_samples(&self, target: usize) -> Vec<&TimingSample> {
    self
      .samples
      .iter()
      .filter(|sample| matches!(&sample.phase, Phase::Encode { target: t, .. } if *t == target))
      .collect()
  }

  /// Distinct phases, in the order they were first measured.
  pub fn phases(&self) -> Vec<Phase> {
    let mut res: Vec<Phase> = Vec::new();
    for sample in &self.samples {
      if !res.contains(&sample.phase) {
        res.push(sample.phase.clone());
      }
    }
    res
  }

  pub fn durations(&self, phase: &Phase) -> Vec<Duration> {
    self
      .samples
      .iter()
      .filter(|sample| &sample.phase == phase)
      .map(|sample| sample.elapsed)
      .collect()
  }

  pub fn mean(&self, phase: &Phase) -> Option<Duration> {
    mean_duration(&self.durations(phase))
  }

  pub fn median(&self, phase: &Phase) -> Option<Duration> {
    median_duration(self.durations(phase))
  }

  pub fn total(&self, phase: &Phase) -> Duration {
    self.durations(phase).iter().sum()
  }

  pub fn stats(&self) -> Vec<PrintStat> {
    self
      .phases()
      .into_iter()
      .map(|phase| {
        let output_size = match &phase {
          Phase::Decode => None,
          Phase::Encode { target, .. } => self
            .outputs
            .iter()
            .find(|output| output.target == *target)
            .map(|output| output.size),
        };
        PrintStat {
          phase: phase.to_string(),
          n: self.durations(&phase).len(),
          mean_dt: self.mean(&phase).unwrap_or_default(),
          median_dt: self.median(&phase).unwrap_or_default(),
          total_dt: self.total(&phase),
          output_size,
        }
      })
      .collect()
  }

  pub fn print_table(&self) {
    let stats = self.stats();
    if stats.is_empty() {
      println!("No samples were recorded!");
      return;
    }

    let table = Table::new(stats)
      .with(Style::rounded())
      .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
      .to_string();
    println!("{}", table);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn encode_phase(target: usize) -> Phase {
    Phase::Encode {
      target,
      policy: "parquet".to_string(),
    }
  }

  fn sample(iteration: usize, phase: Phase, millis: u64) -> TimingSample {
    TimingSample {
      iteration,
      phase,
      elapsed: Duration::from_millis(millis),
    }
  }

  #[test]
  fn test_median_duration() {
    let ms = Duration::from_millis;
    assert_eq!(median_duration(vec![]), None);
    assert_eq!(
      median_duration(vec![ms(5), ms(1), ms(3)]),
      Some(ms(3))
    );
    assert_eq!(
      median_duration(vec![ms(4), ms(1), ms(2), ms(8)]),
      Some(ms(3))
    );
  }

  #[test]
  fn test_mean_duration() {
    let ms = Duration::from_millis;
    assert_eq!(mean_duration(&[]), None);
    assert_eq!(mean_duration(&[ms(1), ms(2), ms(6)]), Some(ms(3)));
    assert_eq!(
      mean_duration(&[Duration::from_secs(u64::MAX / 2); 2]),
      Some(Duration::from_secs(u64::MAX / 2))
    );
    assert_eq!(
      mean_duration(&[Duration::new(1, 0), Duration::new(2, 500)]),
      Some(Duration::new(1, 500_000_250))
    );
  }

  #[test]
  fn test_aggregates_by_phase() {
    let mut report = RunReport::default();
    report.push(sample(0, Phase::Decode, 10));
    report.push(sample(0, encode_phase(0), 2));
    report.push(sample(0, encode_phase(1), 7));
    report.push(sample(1, encode_phase(0), 4));
    report.outputs.push(EncodedOutput {
      target: 1,
      dest: PathBuf::from("b.parquet"),
      policy: "parquet".to_string(),
      size: 123,
    });

    assert_eq!(
      report.phases(),
      vec![Phase::Decode, encode_phase(0), encode_phase(1)]
    );
    assert_eq!(report.encode_samples(0).len(), 2);
    assert_eq!(
      report.mean(&encode_phase(0)),
      Some(Duration::from_millis(3))
    );
    assert_eq!(
      report.total(&encode_phase(0)),
      Duration::from_millis(6)
    );
    assert_eq!(report.mean(&encode_phase(5)), None);

    let stats = report.stats();
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].output_size, None);
    assert_eq!(stats[1].output_size, None);
    assert_eq!(stats[2].output_size, Some(123));
    assert_eq!(stats[1].n, 2);
  }
}
