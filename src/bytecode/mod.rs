/*!

  The VM executes a stream of single-byte instructions. There are eight opcodes, each of which
  fits in three bits, and none of which carries an operand: the tape, the data pointer, and the
  loop-return stack supply everything an instruction needs. A stream is therefore just a
  `Vec<u8>`, and an enum is used for the opcode itself so that it inhabits a single byte.

  Loop brackets are not resolved ahead of time. Matching happens during execution, so a
  stream with unbalanced brackets is representable and is only rejected when the executor
  reaches the offending instruction.

*/

mod binary;
mod instruction;
mod assembly;

pub use binary::{try_decode_instruction, Bytecode};
pub use instruction::Operation;
pub use assembly::{disassemble, parse_assembly};
