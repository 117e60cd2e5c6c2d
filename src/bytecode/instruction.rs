use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/**
  Opcodes of the virtual machine.

  Rust stores enum variants as bytes. As in C, enum values are represented by consecutive
  natural numbers and can be treated as numeric types. The discriminants below ARE the
  binary encoding of the opcode, so the order the opcodes are listed in is significant.
  Every opcode fits in three bits, but each one occupies a whole byte in a `Bytecode` stream.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq,         PartialEq, Debug,            Hash
)]
#[repr(u8)]
pub enum Operation {
  Incr      = 0b000, // +
  Decr      = 0b001, // -
  Right     = 0b010, // >
  Left      = 0b011, // <
  Output    = 0b100, // .
  Input     = 0b101, // ,
  LoopStart = 0b110, // [
  LoopEnd   = 0b111, // ]
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The source character this operation is compiled from.
  pub fn symbol(&self) -> char {
    match self {
      Operation::Incr      => '+',
      Operation::Decr      => '-',
      Operation::Right     => '>',
      Operation::Left      => '<',
      Operation::Output    => '.',
      Operation::Input     => ',',
      Operation::LoopStart => '[',
      Operation::LoopEnd   => ']',
    }
  }

  /// Maps a source character to its operation. Every other character is a comment.
  pub fn from_symbol(symbol: char) -> Option<Operation> {
    match symbol {
      '+' => Some(Operation::Incr),
      '-' => Some(Operation::Decr),
      '>' => Some(Operation::Right),
      '<' => Some(Operation::Left),
      '.' => Some(Operation::Output),
      ',' => Some(Operation::Input),
      '[' => Some(Operation::LoopStart),
      ']' => Some(Operation::LoopEnd),
      _   => None
    }
  }
}


#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn symbols_round_trip(){
    for operation in Operation::iter() {
      assert_eq!(Operation::from_symbol(operation.symbol()), Some(operation));
    }
  }

  #[test]
  fn codes_are_fixed(){
    assert_eq!(Operation::Incr.code(), 0);
    assert_eq!(Operation::Output.code(), 4);
    assert_eq!(Operation::LoopEnd.code(), 7);
    assert_eq!(Operation::try_from(6u8).ok(), Some(Operation::LoopStart));
    assert!(Operation::try_from(8u8).is_err());
  }

  #[test]
  fn mnemonics(){
    assert_eq!(Operation::LoopStart.to_string(), "LoopStart");
    assert_eq!(Operation::from_str("Decr").ok(), Some(Operation::Decr));
    assert!(Operation::from_str("decr").is_err());
  }

  #[test]
  fn unknown_symbols(){
    assert_eq!(Operation::from_symbol('a'), None);
    assert_eq!(Operation::from_symbol(' '), None);
    assert_eq!(Operation::from_symbol('\n'), None);
  }
}
