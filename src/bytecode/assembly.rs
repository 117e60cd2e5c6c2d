/*!
  The human readable textual form of bytecode is called assembly. This module leverages the
  `strum` derives of `Operation` to serialize and deserialize bytecode to assembly.

  Assembly has one mnemonic per line. Leading whitespace is ignored, so loop bodies may be
  indented, and `#` starts a comment that runs to the end of the line. Blank lines are allowed.

  ```text
  Incr
  LoopStart   # while the cell is nonzero
    Decr
  LoopEnd
  ```
*/

use std::str::FromStr;

use nom::{
  character::complete::{alpha1, char as one_char, not_line_ending, space0},
  combinator::{all_consuming, opt},
  sequence::{delimited, pair, terminated},
  IResult
};

use crate::bytecode::{Bytecode, Operation};
use crate::error::AssemblyError;

const INDENT: &str = "  ";

/// Parses a single line into an optional mnemonic. Comments and blank lines yield `None`.
fn line_p(line: &str) -> IResult<&str, Option<&str>> {
  all_consuming(
    terminated(
      delimited(space0, opt(alpha1), space0),
      opt(pair(one_char('#'), not_line_ending))
    )
  )(line)
}

pub fn parse_assembly(text: &str) -> Result<Bytecode, AssemblyError> {
  let mut code = Bytecode::new();

  for (idx, line) in text.lines().enumerate() {
    // Lines count from 1.
    let line_number = idx + 1;

    match line_p(line) {

      Ok((_, Some(name))) => {
        match Operation::from_str(name) {
          Ok(operation) => code.push(operation),
          Err(_)        => {
            return Err(AssemblyError::NotAnOperation {
              line: line_number,
              name: name.to_string()
            });
          }
        }
      }

      Ok((_, None)) => { /* Blank or comment */ }

      Err(_) => {
        return Err(AssemblyError::Syntax {
          line: line_number,
          text: line.trim().to_string()
        });
      }

    } // end match line
  } // end for

  Ok(code)
}

/// Renders bytecode as assembly, indenting loop bodies. Bytes that are not opcodes are written
/// as comments so the output still parses.
pub fn disassemble(code: &Bytecode) -> String {
  let mut buffer = String::new();
  let mut depth: usize = 0;

  for (ip, byte) in code.iter().enumerate() {
    match code.decode(ip) {

      Some(operation) => {
        if operation == Operation::LoopEnd {
          depth = depth.saturating_sub(1);
        }
        buffer.push_str(&INDENT.repeat(depth));
        let mnemonic: &'static str = operation.into();
        buffer.push_str(mnemonic);
        buffer.push('\n');
        if operation == Operation::LoopStart {
          depth += 1;
        }
      }

      None => {
        buffer.push_str(&INDENT.repeat(depth));
        buffer.push_str(&format!("# invalid byte {:#04x} at {}\n", byte, ip));
      }

    }
  }

  buffer
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::compiler::compile;

  #[test]
  fn parse_with_comments(){
    let text = "
  # A comment on its own line
Incr
  LoopStart   # enter
    Decr
  LoopEnd

Output";
    let code = parse_assembly(text).unwrap();
    assert_eq!(code, compile("+[-]."));
  }

  #[test]
  fn not_an_operation(){
    let result = parse_assembly("Incr\nJump\n");
    match result {
      Err(AssemblyError::NotAnOperation { line, name }) => {
        assert_eq!(line, 2);
        assert_eq!(name, "Jump");
      }
      _ => panic!("expected NotAnOperation, got {:?}", result)
    }
  }

  #[test]
  fn syntax_error(){
    let result = parse_assembly("Incr Decr\n");
    assert!(matches!(result, Err(AssemblyError::Syntax { line: 1, .. })));

    let result = parse_assembly("Incr\nOutput(1)\n");
    assert!(matches!(result, Err(AssemblyError::Syntax { line: 2, .. })));
  }

  #[test]
  fn disassemble_indents_loops(){
    let text = disassemble(&compile("+[>[-]<]"));
    let expected = "Incr\nLoopStart\n  Right\n  LoopStart\n    Decr\n  LoopEnd\n  Left\nLoopEnd\n";
    assert_eq!(text, expected);
  }

  #[test]
  fn disassemble_then_parse(){
    let code = compile(",[.,]");
    assert_eq!(parse_assembly(&disassemble(&code)).unwrap(), code);
  }

  #[test]
  fn invalid_bytes_become_comments(){
    let code = Bytecode::from_bytes(vec![0, 200, 4]);
    let text = disassemble(&code);
    assert_eq!(text, "Incr\n# invalid byte 0xc8 at 1\nOutput\n");
    assert_eq!(parse_assembly(&text).unwrap(), compile("+."));
  }
}
