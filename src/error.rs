//! Error types for execution and for assembly parsing.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExecError>;

/// Every variant ends the current execution. The tape and data pointer are left as they were
/// when the failing instruction was reached.
#[derive(Debug, Error)]
pub enum ExecError {
  /// `Input` was dispatched but the source had nothing left.
  #[error("input exhausted at instruction {ip}")]
  InputExhausted { ip: usize },

  /// A `LoopStart` was skipped but no matching `LoopEnd` follows it.
  #[error("malformed program: unterminated loop starting at instruction {ip}")]
  UnterminatedLoop { ip: usize },

  /// A `LoopEnd` was reached with no loop entered.
  #[error("malformed program: unmatched loop end at instruction {ip}")]
  UnmatchedLoopEnd { ip: usize },

  /// A byte in the stream is not one of the eight opcodes.
  #[error("invalid opcode {byte:#04x} at instruction {ip}")]
  InvalidOpcode { ip: usize, byte: u8 },

  #[error("step limit of {limit} instructions exceeded")]
  StepLimitExceeded { limit: u64 },

  #[error("i/o error: {0}")]
  Io(#[from] io::Error),
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum AssemblyError {
  #[error("Error on line {line}: {name} is not an operation.")]
  NotAnOperation { line: usize, name: String },

  #[error("Error on line {line}: could not parse `{text}`.")]
  Syntax { line: usize, text: String },
}
