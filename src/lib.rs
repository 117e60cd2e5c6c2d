/*!
  A virtual machine for an eight-instruction language that operates on a tape of byte cells.

  Source text is compiled into a stream of one-byte opcodes, which the `BVM` then executes
  against its tape, reading from an `Input` and writing to an `Output`.

  ```
  use bvm::{BVM, ExecOptions};

  let mut vm = BVM::new();
  let mut output: Vec<u8> = Vec::new();
  vm.exec(",+.", ExecOptions::default(), &b"G"[..], &mut output).unwrap();
  assert_eq!(output, b"H");
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod compiler;
pub mod error;
pub mod stream;
pub mod tape;
mod bvm;

pub use bvm::{Execution, ExecOptions, VmConfig, BVM};
pub use bytecode::{disassemble, parse_assembly, Bytecode, Operation};
pub use compiler::compile;
pub use error::{AssemblyError, ExecError, Result};
pub use stream::{Input, Output};
pub use tape::Tape;
