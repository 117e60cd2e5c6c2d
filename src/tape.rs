//! The memory tape: a growable row of byte cells with a single data pointer.

use std::fmt::{Display, Formatter};
use std::ops::Deref;

pub const DEFAULT_INITIAL_MEMORY: usize = 3000;

/**
  A row of `u8` cells and the data pointer into it. The pointer always satisfies
  `0 <= pointer < len`.

  The tape starts at `initial` cells and grows one zeroed cell at a time when the pointer moves
  right off the end. If a maximum is set, growth stops once the tape holds `maximum` cells and
  further moves right off the end are ignored. A tape whose initial length is already at or past
  the maximum never grows.
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tape {
  cells   : Vec<u8>,
  pointer : usize,
  maximum : Option<usize>,
}

impl Tape {

  /// An initial length of zero is raised to one so that the pointer has a cell to point to.
  pub fn new(initial: usize, maximum: Option<usize>) -> Tape {
    Tape {
      cells   : vec![0; initial.max(1)],
      pointer : 0,
      maximum,
    }
  }

  pub fn pointer(&self) -> usize {
    self.pointer
  }

  pub fn maximum(&self) -> Option<usize> {
    self.maximum
  }

  pub fn cells(&self) -> &[u8] {
    &self.cells
  }

  /// The value of the cell under the pointer.
  pub fn get(&self) -> u8 {
    self.cells[self.pointer]
  }

  pub fn set(&mut self, value: u8) {
    self.cells[self.pointer] = value;
  }

  pub fn is_zero(&self) -> bool {
    self.get() == 0
  }

  pub fn increment(&mut self) {
    let cell = &mut self.cells[self.pointer];
    *cell = cell.wrapping_add(1);
  }

  pub fn decrement(&mut self) {
    let cell = &mut self.cells[self.pointer];
    *cell = cell.wrapping_sub(1);
  }

  /// Moves the pointer right, growing the tape if needed. Returns `false` if the maximum
  /// prevented the move.
  pub fn move_right(&mut self) -> bool {
    let next = self.pointer + 1;
    if next == self.cells.len() {
      match self.maximum {
        Some(maximum) if maximum <= next => {
          return false;
        }
        _ => {
          self.cells.push(0);
        }
      }
    }
    self.pointer = next;
    true
  }

  /// Moves the pointer left, stopping at cell 0.
  pub fn move_left(&mut self) {
    self.pointer = self.pointer.saturating_sub(1);
  }

  /// Zeroes the tape back to `initial` cells and returns the pointer to cell 0.
  pub fn reset(&mut self, initial: usize) {
    self.cells.clear();
    self.cells.resize(initial.max(1), 0);
    self.pointer = 0;
  }
}

impl Default for Tape {
  fn default() -> Self {
    Tape::new(DEFAULT_INITIAL_MEMORY, None)
  }
}

impl Deref for Tape {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.cells
  }
}

impl Display for Tape {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] p={}", self.cells.len(), self.pointer)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wraps_both_ways(){
    let mut tape = Tape::new(1, None);
    tape.decrement();
    assert_eq!(tape.get(), 255);
    tape.increment();
    assert_eq!(tape.get(), 0);

    tape.set(17);
    for _ in 0..256 {
      tape.increment();
    }
    assert_eq!(tape.get(), 17);
    for _ in 0..256 {
      tape.decrement();
    }
    assert_eq!(tape.get(), 17);
  }

  #[test]
  fn left_clamps_at_zero(){
    let mut tape = Tape::new(4, None);
    for _ in 0..10 {
      tape.move_left();
    }
    assert_eq!(tape.pointer(), 0);
    assert!(tape.move_right());
    tape.move_left();
    tape.move_left();
    assert_eq!(tape.pointer(), 0);
  }

  #[test]
  fn grows_one_cell_at_a_time(){
    let mut tape = Tape::new(2, None);
    assert!(tape.move_right());
    assert_eq!(tape.len(), 2);
    assert!(tape.move_right());
    assert_eq!(tape.len(), 3);
    assert_eq!(tape.pointer(), 2);
    assert_eq!(tape.get(), 0);
  }

  #[test]
  fn growth_stops_at_maximum(){
    let mut tape = Tape::new(2, Some(5));
    for _ in 0..20 {
      tape.move_right();
    }
    assert_eq!(tape.pointer(), 4);
    assert_eq!(tape.len(), 5);
    assert!(!tape.move_right());
    assert_eq!(tape.pointer(), 4);
  }

  #[test]
  fn initial_beyond_maximum_never_grows(){
    let mut tape = Tape::new(6, Some(3));
    for _ in 0..20 {
      tape.move_right();
    }
    assert_eq!(tape.pointer(), 5);
    assert_eq!(tape.len(), 6);
  }

  #[test]
  fn zero_maximum(){
    let mut tape = Tape::new(1, Some(0));
    assert!(!tape.move_right());
    assert_eq!(tape.pointer(), 0);
  }

  #[test]
  fn zero_initial_length(){
    let tape = Tape::new(0, None);
    assert_eq!(tape.len(), 1);
    assert_eq!(tape.get(), 0);
  }

  #[test]
  fn reset(){
    let mut tape = Tape::new(2, None);
    tape.increment();
    tape.move_right();
    tape.move_right();
    tape.reset(2);
    assert_eq!(tape.cells(), &[0, 0]);
    assert_eq!(tape.pointer(), 0);
  }
}
