use std::fmt::{Display, Formatter};
use std::{fmt, io};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// The different kinds of errors a round trip can end with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
  /// `Io` errors occur when a source or destination file is missing,
  /// unreadable, or unwritable.
  Io(io::ErrorKind),
  /// `Format` errors occur during decoding, indicating the source bytes are
  /// not valid parquet.
  Format,
  /// `Encode` errors occur when a policy requests an encoding or version
  /// combination the batch's field types don't support, when the writer
  /// rejects the batch, or when an encoded file fails to decode back to the
  /// same records.
  Encode,
  /// `InvalidArgument` errors occur when a policy string or policy file
  /// cannot be parsed.
  InvalidArgument,
}

/// Where in a run an error happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorPhase {
  #[default]
  Unknown,
  Decode,
  /// Encoding under the policy with this label.
  Encode(String),
}

impl Display for ErrorPhase {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ErrorPhase::Unknown => write!(f, "unknown phase"),
      ErrorPhase::Decode => write!(f, "decode"),
      ErrorPhase::Encode(policy) => write!(f, "encode[{}]", policy),
    }
  }
}

/// The error type used in results for all round trip functionality.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("roundtrip {kind:?} error during {phase}: {message}")]
pub struct RoundTripError {
  pub kind: ErrorKind,
  pub phase: ErrorPhase,
  pub message: String,
}

impl RoundTripError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    RoundTripError {
      kind,
      phase: ErrorPhase::Unknown,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn format<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::Format, message)
  }

  pub(crate) fn encode<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::Encode, message)
  }

  pub(crate) fn invalid_argument<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InvalidArgument, message)
  }

  /// Tags the error with the phase it happened in, keeping any phase it
  /// already had.
  pub fn in_phase(mut self, phase: ErrorPhase) -> Self {
    if self.phase == ErrorPhase::Unknown {
      self.phase = phase;
    }
    self
  }

  pub fn is_io(&self) -> bool {
    matches!(self.kind, ErrorKind::Io(_))
  }
}

impl From<io::Error> for RoundTripError {
  fn from(err: io::Error) -> Self {
    Self::new(ErrorKind::Io(err.kind()), err.to_string())
  }
}

// Upstream parquet errors are classified by the caller's phase afterward;
// by default anything the parquet crate complains about is a format issue.
impl From<ParquetError> for RoundTripError {
  fn from(err: ParquetError) -> Self {
    match err {
      ParquetError::External(inner) => match inner.downcast::<io::Error>() {
        Ok(io_err) => Self::from(*io_err),
        Err(other) => Self::format(other.to_string()),
      },
      other => Self::format(other.to_string()),
    }
  }
}

impl From<ArrowError> for RoundTripError {
  fn from(err: ArrowError) -> Self {
    match err {
      ArrowError::IoError(msg, io_err) => {
        Self::new(ErrorKind::Io(io_err.kind()), msg)
      }
      ArrowError::ExternalError(inner) => match inner.downcast::<ParquetError>() {
        Ok(parquet_err) => Self::from(*parquet_err),
        Err(other) => Self::format(other.to_string()),
      },
      other => Self::format(other.to_string()),
    }
  }
}

pub type RoundTripResult<T> = Result<T, RoundTripError>;
