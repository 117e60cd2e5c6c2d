//! Structures and functions for the byte-tape virtual machine.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use tracing::{debug, warn};
#[cfg(feature = "trace_computation")]
use tracing::trace;

use crate::bytecode::{try_decode_instruction, Bytecode, Operation};
use crate::compiler::compile;
use crate::error::{ExecError, Result};
use crate::stream::{Input, Output};
use crate::tape::{Tape, DEFAULT_INITIAL_MEMORY};

/// How many cells either side of the data pointer `Display` shows.
const DISPLAY_WINDOW: usize = 8;

/// Construction parameters of a `BVM`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VmConfig {
  /// Cells present before any growth.
  pub initial_memory : usize,
  /// Largest the tape may grow to. `None` is unbounded.
  pub max_memory     : Option<usize>,
}

impl Default for VmConfig {
  fn default() -> Self {
    VmConfig {
      initial_memory : DEFAULT_INITIAL_MEMORY,
      max_memory     : None,
    }
  }
}

/// Per-call execution parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExecOptions {
  /// Flush the output after every `Output` instead of once at the end.
  pub instant_flush : bool,
  /// Fail with `ExecError::StepLimitExceeded` after this many instructions.
  pub step_limit    : Option<u64>,
}

impl Default for ExecOptions {
  fn default() -> Self {
    ExecOptions {
      instant_flush : true,
      step_limit    : None,
    }
  }
}

/**
  The virtual machine. A `BVM` owns the tape and the data pointer, both of which persist across
  calls to `exec`/`exec_compiled`. The instruction pointer and the loop-return stack belong to a
  single execution and start fresh on every call.
*/
#[derive(Clone, Debug)]
pub struct BVM {
  tape           : Tape,
  initial_memory : usize,
}

impl BVM {

  // region Construction and inspection

  pub fn new() -> BVM {
    BVM::with_config(VmConfig::default())
  }

  pub fn with_config(config: VmConfig) -> BVM {
    if config.initial_memory == 0 {
      warn!("initial memory of 0 cells requested; using 1");
    }
    BVM {
      tape           : Tape::new(config.initial_memory, config.max_memory),
      initial_memory : config.initial_memory.max(1),
    }
  }

  pub fn tape(&self) -> &Tape {
    &self.tape
  }

  pub fn pointer(&self) -> usize {
    self.tape.pointer()
  }

  pub fn max_memory(&self) -> Option<usize> {
    self.tape.maximum()
  }

  /// Zeroes the tape back to its initial length and returns the data pointer to cell 0.
  pub fn reset(&mut self) {
    self.tape.reset(self.initial_memory);
  }

  // endregion

  // region Compilation/Execution

  pub fn compile(&self, text: &str) -> Bytecode {
    compile(text)
  }

  /// Compiles `text` and executes it. Returns the number of instructions executed.
  pub fn exec<I, O>(&mut self, text: &str, options: ExecOptions, input: I, output: O) -> Result<u64>
    where I: Input,
          O: Output
  {
    let code = compile(text);
    self.exec_compiled(&code, options, input, output)
  }

  /// Executes precompiled bytecode. Returns the number of instructions executed.
  pub fn exec_compiled<I, O>(
    &mut self,
    code: &Bytecode,
    options: ExecOptions,
    input: I,
    output: O
  ) -> Result<u64>
    where I: Input,
          O: Output
  {
    debug!(length = code.len(), pointer = self.pointer(), "executing bytecode");

    let result = self.start(code, options, input, output).run();

    match &result {
      Ok(steps) => {
        debug!(steps, tape_length = self.tape.len(), pointer = self.pointer(), "execution finished");
      }
      Err(e) => {
        debug!(error = %e, pointer = self.pointer(), "execution failed");
      }
    }
    #[cfg(feature = "trace_computation")] trace!("\n{}", self);

    result
  }

  /// Begins an execution that the caller drives with `Execution::step` or `Execution::run`.
  pub fn start<'a, I, O>(
    &'a mut self,
    code: &'a Bytecode,
    options: ExecOptions,
    input: I,
    output: O
  ) -> Execution<'a, I, O>
    where I: Input,
          O: Output
  {
    Execution {
      vm         : self,
      code,
      options,
      input,
      output,
      ip         : 0,
      loop_stack : Vec::new(),
      steps      : 0,
    }
  }

  // endregion

  // region Display methods

  fn make_tape_table(cells: &[u8], highlight: usize, start: usize) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, cell) in cells.iter().enumerate() {
      let contents = match *cell {
        32..=126 => format!("{} '{}'", cell, *cell as char),
        _        => format!("{}", cell)
      };
      match i + start == highlight {

        true  => {
          table.add_row(row![r->format!("* --> M[{}] =", i + start), contents]);
        }

        false => {
          table.add_row(row![r->format!("M[{}] =", i + start), contents]);
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

}

impl Default for BVM {
  fn default() -> Self {
    BVM::new()
  }
}

/**
  A single run of a program on a `BVM`. Holds the instruction pointer and the loop-return stack,
  neither of which outlives the run.
*/
pub struct Execution<'a, I, O> {
  vm         : &'a mut BVM,
  code       : &'a Bytecode,
  options    : ExecOptions,
  input      : I,
  output     : O,
  ip         : usize,
  loop_stack : Vec<usize>,
  steps      : u64,
}

impl<'a, I, O> Execution<'a, I, O>
  where I: Input,
        O: Output
{

  pub fn is_done(&self) -> bool {
    self.ip >= self.code.len()
  }

  pub fn instruction_pointer(&self) -> usize {
    self.ip
  }

  /// Number of loop bodies currently entered.
  pub fn loop_depth(&self) -> usize {
    self.loop_stack.len()
  }

  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn tape(&self) -> &Tape {
    &self.vm.tape
  }

  /// Runs to completion and flushes the output. The output is flushed even if execution fails.
  /// Returns the number of instructions executed.
  pub fn run(&mut self) -> Result<u64> {
    let result  = self.run_to_end();
    let flushed = self.output.flush();
    result?;
    flushed?;
    Ok(self.steps)
  }

  fn run_to_end(&mut self) -> Result<()> {
    while self.step()? {}
    Ok(())
  }

  /// Executes one instruction. Returns `false` if the program had already run to completion.
  pub fn step(&mut self) -> Result<bool> {
    let ip = self.ip;
    let byte = match self.code.get(ip) {
      Some(byte) => *byte,
      None       => return Ok(false)
    };

    if let Some(limit) = self.options.step_limit {
      if self.steps >= limit {
        return Err(ExecError::StepLimitExceeded { limit });
      }
    }

    let operation = try_decode_instruction(byte).ok_or(ExecError::InvalidOpcode { ip, byte })?;

    #[cfg(feature = "trace_computation")]
      trace!(ip, %operation, pointer = self.vm.tape.pointer(), cell = self.vm.tape.get(), "dispatch");

    let tape = &mut self.vm.tape;
    let mut next = ip + 1;

    match operation {

      Operation::Incr => tape.increment(),

      Operation::Decr => tape.decrement(),

      Operation::Right => {
        // Refusal at the maximum is a no-op.
        tape.move_right();
      }

      Operation::Left => tape.move_left(),

      Operation::Output => {
        self.output.write_byte(tape.get())?;
        if self.options.instant_flush {
          self.output.flush()?;
        }
      }

      Operation::Input => {
        match self.input.read_byte()? {
          Some(value) => tape.set(value),
          None        => return Err(ExecError::InputExhausted { ip })
        }
      }

      Operation::LoopStart => {
        match tape.is_zero() {
          true  => next = self.matching_loop_end(ip)? + 1,
          false => self.loop_stack.push(ip)
        }
      }

      Operation::LoopEnd => {
        let start = self.loop_stack.pop().ok_or(ExecError::UnmatchedLoopEnd { ip })?;
        if !self.vm.tape.is_zero() {
          // Back onto the `LoopStart`, which pushes it again.
          next = start;
        }
      }

    } // end match operation

    self.ip = next;
    self.steps += 1;
    Ok(true)
  }

  /// Scans forward from the `LoopStart` at `start` for its matching `LoopEnd`.
  fn matching_loop_end(&self, start: usize) -> Result<usize> {
    let mut depth: usize = 0;

    for (ip, byte) in self.code.iter().enumerate().skip(start) {
      match try_decode_instruction(*byte) {
        Some(Operation::LoopStart) => depth += 1,
        Some(Operation::LoopEnd)   => {
          depth -= 1;
          if depth == 0 {
            return Ok(ip);
          }
        }
        _ => { /* Not a bracket */ }
      }
    }

    Err(ExecError::UnterminatedLoop { ip: start })
  }

}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for BVM {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let pointer = self.tape.pointer();
    let start   = pointer.saturating_sub(DISPLAY_WINDOW);
    let end     = (pointer + DISPLAY_WINDOW + 1).min(self.tape.len());
    let table   = BVM::make_tape_table(&self.tape[start..end], pointer, start);

    let maximum = match self.tape.maximum() {
      Some(maximum) => maximum.to_string(),
      None          => "unbounded".to_string()
    };

    write!(
      f,
      "Pointer: {}\tLength: {}\tMaximum: {}\n{}",
      pointer, self.tape.len(), maximum, table
    )
  }
}
