/*!
  This module is responsible for the encoding and decoding of binary instructions.

  A `Bytecode` stream is one byte per instruction. Bytes are not validated when a stream is
  constructed from raw bytes; decoding happens as each instruction is dispatched, so a stream
  supplied from outside the compiler may carry bytes that are not opcodes.
*/
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use super::Operation;

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Bytecode {
  code: Vec<u8>
}

impl Bytecode {

  pub fn new() -> Bytecode {
    Bytecode::default()
  }

  pub fn from_operations<I>(operations: I) -> Bytecode
    where I: IntoIterator<Item = Operation>
  {
    Bytecode{
      code: operations.into_iter().map(|op| op.code()).collect()
    }
  }

  /// Wraps raw bytes without checking them. See `Bytecode::validate`.
  pub fn from_bytes(bytes: Vec<u8>) -> Bytecode {
    Bytecode{ code: bytes }
  }

  pub fn push(&mut self, operation: Operation) {
    self.code.push(operation.code());
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.code
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.code
  }

  /// Decodes the instruction at `ip`. `None` if `ip` is past the end or the byte is not an opcode.
  pub fn decode(&self, ip: usize) -> Option<Operation> {
    self.code.get(ip).and_then(|byte| try_decode_instruction(*byte))
  }

  /// Returns the index and value of the first byte that is not an opcode.
  pub fn validate(&self) -> Result<(), (usize, u8)> {
    match self.code.iter().position(|byte| try_decode_instruction(*byte).is_none()) {
      Some(ip) => Err((ip, self.code[ip])),
      None     => Ok(())
    }
  }

  /// Iterates over the decodable operations, skipping any invalid bytes.
  pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
    self.code.iter().filter_map(|byte| try_decode_instruction(*byte))
  }

  /// Renders the stream back into source symbols.
  pub fn to_source(&self) -> String {
    self.operations().map(|op| op.symbol()).collect()
  }
}

pub fn try_decode_instruction(byte: u8) -> Option<Operation> {
  Operation::try_from(byte).ok()
}

impl Deref for Bytecode {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.code
  }
}

impl FromIterator<Operation> for Bytecode {
  fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
    Bytecode::from_operations(iter)
  }
}

impl From<Vec<u8>> for Bytecode {
  fn from(bytes: Vec<u8>) -> Self {
    Bytecode::from_bytes(bytes)
  }
}

impl Display for Bytecode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_source())
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn operations_to_bytes(){
    let code = Bytecode::from_operations(vec![Operation::Incr, Operation::LoopStart, Operation::LoopEnd]);
    assert_eq!(code.as_bytes(), &[0b000, 0b110, 0b111]);
    assert_eq!(code.decode(1), Some(Operation::LoopStart));
    assert_eq!(code.decode(3), None);
  }

  #[test]
  fn invalid_bytes(){
    let code = Bytecode::from_bytes(vec![0, 1, 42, 3]);
    assert_eq!(code.validate(), Err((2, 42)));
    assert_eq!(code.decode(2), None);
    assert_eq!(code.operations().count(), 3);
    assert_eq!(code.to_source(), "+-<");
  }

  #[test]
  fn empty(){
    let code = Bytecode::new();
    assert!(code.is_empty());
    assert_eq!(code.validate(), Ok(()));
    assert_eq!(code.to_string(), "");
  }
}
