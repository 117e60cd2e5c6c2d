//! Compiles source text into bytecode.
//!
//! Compilation is a character-by-character table lookup. Characters that are not one of the
//! eight operation symbols are dropped, which is how whitespace and comments are supported.
//! Brackets are not checked here; see `crate::bvm` for how malformed loops are reported.

use crate::bytecode::{Bytecode, Operation};

pub fn compile(text: &str) -> Bytecode {
  compile_chars(text.chars())
}

pub fn compile_chars<I>(chars: I) -> Bytecode
  where I: IntoIterator<Item = char>
{
  chars.into_iter().filter_map(Operation::from_symbol).collect()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_symbol(){
    let code = compile("+-><.,[]");
    assert_eq!(code.as_bytes(), &[0, 1, 2, 3, 4, 5, 6, 7]);
  }

  #[test]
  fn comments_are_dropped(){
    let code = compile("add one: +\nthen print it: .\n");
    assert_eq!(code, Bytecode::from_operations(vec![Operation::Incr, Operation::Output]));
  }

  #[test]
  fn only_comments(){
    assert!(compile("hello world\n\t 123 ABC").is_empty());
    assert!(compile("").is_empty());
  }

  #[test]
  fn deterministic(){
    let source = "++[>+<-]>.";
    assert_eq!(compile(source), compile(source));
    assert_eq!(compile(source).to_source(), source);
  }

  #[test]
  fn unbalanced_brackets_compile(){
    assert_eq!(compile("[[").len(), 2);
    assert_eq!(compile("]").len(), 1);
  }
}
