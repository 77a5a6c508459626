use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use log::{debug, info, warn};

use crate::batch::RecordBatch;
use crate::codec::{ColumnarCodec, ParquetCodec};
use crate::errors::{ErrorPhase, RoundTripError, RoundTripResult};
use crate::policy::CodecPolicy;
use crate::report::{EncodedOutput, RunReport};

/// What a [`TimingSample`] measured.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
  Decode,
  /// Encoding to the `target`th destination under `policy`.
  Encode { target: usize, policy: String },
}

impl Display for Phase {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Phase::Decode => write!(f, "decode"),
      Phase::Encode { target, policy } => write!(f, "encode#{}[{}]", target, policy),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingSample {
  pub iteration: usize,
  pub phase: Phase,
  pub elapsed: Duration,
}

/// A destination file and the policy to encode it under.
#[derive(Clone, Debug)]
pub struct Target {
  pub dest: PathBuf,
  pub policy: CodecPolicy,
}

impl Target {
  pub fn new<P: Into<PathBuf>>(dest: P, policy: CodecPolicy) -> Self {
    Self {
      dest: dest.into(),
      policy,
    }
  }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HarnessOpt {
  /// Skip decoding each target's first output to check it holds the same
  /// records as the source. This does not affect timings.
  pub no_assertions: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HarnessState {
  Idle,
  Decoding,
  Decoded,
  /// Encoding the target with this index.
  Encoding(usize),
  Done,
}

/// Times decode/encode round trips of one source file.
///
/// The source is decoded once per run and the cached batch is reused,
/// read-only, by every encode pass. The first error ends the run.
#[derive(Debug)]
pub struct Harness<C: ColumnarCodec = ParquetCodec> {
  codec: C,
  opt: HarnessOpt,
  state: HarnessState,
  progress_bar: ProgressBar,
}

impl<C: ColumnarCodec + Default> Default for Harness<C> {
  fn default() -> Self {
    Self::new(C::default())
  }
}

fn remove_existing(dest: &Path) -> RoundTripResult<()> {
  match fs::remove_file(dest) {
    Ok(()) => {
      warn!("replacing existing file {:?}", dest);
      Ok(())
    }
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e.into()),
  }
}

impl<C: ColumnarCodec> Harness<C> {
  pub fn new(codec: C) -> Self {
    Self {
      codec,
      opt: HarnessOpt::default(),
      state: HarnessState::Idle,
      progress_bar: ProgressBar::hidden(),
    }
  }

  pub fn with_opt(mut self, opt: HarnessOpt) -> Self {
    self.opt = opt;
    self
  }

  /// The bar is advanced once per decode and once per encode.
  pub fn with_progress_bar(mut self, progress_bar: ProgressBar) -> Self {
    self.progress_bar = progress_bar;
    self
  }

  pub fn state(&self) -> HarnessState {
    self.state
  }

  pub fn codec(&self) -> &C {
    &self.codec
  }

  fn transition(&mut self, state: HarnessState) {
    debug!("harness {:?} -> {:?}", self.state, state);
    self.state = state;
  }

  fn decode_timed(&mut self, source: &Path) -> RoundTripResult<(RecordBatch, Duration)> {
    self.transition(HarnessState::Decoding);
    let t = Instant::now();
    let batch = self
      .codec
      .decode(source)
      .map_err(|e| e.in_phase(ErrorPhase::Decode))?;
    let dt = t.elapsed();
    self.progress_bar.inc(1);
    self.transition(HarnessState::Decoded);
    debug!(
      "decoded {} rows from {:?} in {:?}",
      batch.num_rows(),
      source,
      dt
    );
    Ok((batch, dt))
  }

  fn verify(&self, batch: &RecordBatch, target: &Target) -> RoundTripResult<()> {
    let recovered = self.codec.decode(&target.dest)?;
    if !recovered.same_contents(batch)? {
      return Err(RoundTripError::encode(format!(
        "{:?} did not decode back to the source records",
        target.dest
      )));
    }
    Ok(())
  }

  fn encode_target(
    &mut self,
    batch: &RecordBatch,
    target_idx: usize,
    target: &Target,
  ) -> RoundTripResult<Duration> {
    self.transition(HarnessState::Encoding(target_idx));
    remove_existing(&target.dest)?;
    let t = Instant::now();
    self.codec.encode(&target.dest, batch, &target.policy)?;
    let dt = t.elapsed();
    self.progress_bar.inc(1);
    self.transition(HarnessState::Decoded);
    Ok(dt)
  }

  fn run_inner(
    &mut self,
    source: &Path,
    targets: &[Target],
    iterations: usize,
    report: &mut RunReport,
  ) -> RoundTripResult<()> {
    let (batch, decode_dt) = self.decode_timed(source)?;
    report.push(TimingSample {
      iteration: 0,
      phase: Phase::Decode,
      elapsed: decode_dt,
    });

    for iteration in 0..iterations {
      for (target_idx, target) in targets.iter().enumerate() {
        let policy = target.policy.to_string();
        let in_phase = |e: RoundTripError| e.in_phase(ErrorPhase::Encode(policy.clone()));

        let dt = self
          .encode_target(&batch, target_idx, target)
          .map_err(in_phase)?;
        debug!(
          "iter {} encoded {:?} under {} in {:?}",
          iteration, target.dest, policy, dt
        );
        report.push(TimingSample {
          iteration,
          phase: Phase::Encode {
            target: target_idx,
            policy: policy.clone(),
          },
          elapsed: dt,
        });

        if iteration == 0 {
          if !self.opt.no_assertions {
            self.verify(&batch, target).map_err(in_phase)?;
          }
          let size = fs::metadata(&target.dest).map_err(|e| in_phase(e.into()))?.len();
          info!(
            "{} wrote {} bytes to {:?}",
            policy, size, target.dest
          );
          report.outputs.push(EncodedOutput {
            target: target_idx,
            dest: target.dest.clone(),
            policy,
            size,
          });
        }
      }
    }
    Ok(())
  }

  /// Decodes `source` once, then encodes it to every target on each of
  /// `iterations` iterations.
  ///
  /// Produces one decode sample and `iterations * targets.len()` encode
  /// samples.
  pub fn run_targets<P: AsRef<Path>>(
    &mut self,
    source: P,
    targets: &[Target],
    iterations: usize,
  ) -> RoundTripResult<RunReport> {
    let source = source.as_ref();
    self.state = HarnessState::Idle;
    info!(
      "round trip of {:?} to {} targets for {} iterations",
      source,
      targets.len(),
      iterations
    );
    let mut report = RunReport::default();
    let res = self.run_inner(source, targets, iterations, &mut report);
    self.transition(HarnessState::Done);
    res.map(|()| report)
  }

  pub fn run<P: AsRef<Path>, Q: Into<PathBuf>>(
    &mut self,
    source: P,
    dest: Q,
    policy: &CodecPolicy,
    iterations: usize,
  ) -> RoundTripResult<RunReport> {
    self.run_targets(
      source,
      &[Target::new(dest, policy.clone())],
      iterations,
    )
  }

  /// Times a full decode of `source` on every iteration, without encoding.
  pub fn read_bench<P: AsRef<Path>>(
    &mut self,
    source: P,
    iterations: usize,
  ) -> RoundTripResult<RunReport> {
    let source = source.as_ref();
    self.state = HarnessState::Idle;
    let mut report = RunReport::default();
    let mut res = Ok(());
    for iteration in 0..iterations {
      match self.decode_timed(source) {
        Ok((_, dt)) => report.push(TimingSample {
          iteration,
          phase: Phase::Decode,
          elapsed: dt,
        }),
        Err(e) => {
          res = Err(e);
          break;
        }
      }
    }
    self.transition(HarnessState::Done);
    res.map(|()| report)
  }
}
