//! Input sources and output sinks for the `Input` and `Output` instructions.
//!
//! Both traits are implemented for the `std::io` traits, so stdin/stdout, files, `Cursor`s,
//! byte slices and `Vec<u8>` all work as they are. `std::io::empty()` and `std::io::sink()`
//! serve as the null source and sink.

use std::io::{self, ErrorKind, Read, Write};

pub trait Input {
  /// Reads one byte, blocking if the source has none ready. `Ok(None)` means the source is
  /// exhausted, which is distinct from an I/O failure.
  fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

pub trait Output {
  fn write_byte(&mut self, value: u8) -> io::Result<()>;

  fn flush(&mut self) -> io::Result<()>;
}

impl<R: Read> Input for R {
  fn read_byte(&mut self) -> io::Result<Option<u8>> {
    let mut buffer = [0u8; 1];
    loop {
      match self.read(&mut buffer) {
        Ok(0)                                          => return Ok(None),
        Ok(_)                                          => return Ok(Some(buffer[0])),
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e)                                         => return Err(e),
      }
    }
  }
}

impl<W: Write> Output for W {
  fn write_byte(&mut self, value: u8) -> io::Result<()> {
    self.write_all(&[value])
  }

  fn flush(&mut self) -> io::Result<()> {
    Write::flush(self)
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  #[test]
  fn read_until_exhausted(){
    let mut input = Cursor::new(b"AB".to_vec());
    assert_eq!(input.read_byte().unwrap(), Some(b'A'));
    assert_eq!(input.read_byte().unwrap(), Some(b'B'));
    assert_eq!(input.read_byte().unwrap(), None);
    assert_eq!(input.read_byte().unwrap(), None);
  }

  #[test]
  fn write_bytes(){
    let mut output: Vec<u8> = Vec::new();
    output.write_byte(b'h').unwrap();
    output.write_byte(0xff).unwrap();
    Output::flush(&mut output).unwrap();
    assert_eq!(output, vec![b'h', 0xff]);
  }

  #[test]
  fn null_streams(){
    assert_eq!(io::empty().read_byte().unwrap(), None);
    assert!(io::sink().write_byte(1).is_ok());
  }
}
