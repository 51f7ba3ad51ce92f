use tracing::debug;

use crate::error::BrainfkError;

/// Number of cells on a tape unless configured otherwise.
pub const DEFAULT_TAPE_LEN: usize = 65_536;

/// A fixed-length ring of byte cells with a single cursor.
///
/// Moving past either end wraps around to the other one, and cell arithmetic
/// wraps modulo 256. The length never changes after construction.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Box<[u8]>,
    cursor: usize,
}

impl Tape {
    /// Allocate `len` zeroed cells with the cursor on cell 0.
    ///
    /// A zero-length tape has no cell for the cursor to address and is
    /// reported as an allocation failure, like a failed reservation.
    pub fn new(len: usize) -> Result<Self, BrainfkError> {
        let alloc_err = || BrainfkError::Allocation {
            what: "tape",
            requested: len,
        };
        if len == 0 {
            return Err(alloc_err());
        }
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| alloc_err())?;
        cells.resize(len, 0u8);
        debug!(cells = len, "allocated tape");
        Ok(Self {
            cells: cells.into_boxed_slice(),
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true: construction rejects zero-length tapes.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `>`
    #[inline]
    pub fn advance(&mut self) {
        self.cursor = if self.cursor + 1 == self.cells.len() {
            0
        } else {
            self.cursor + 1
        };
    }

    /// `<`
    #[inline]
    pub fn retreat(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.cells.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// `+`
    #[inline]
    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    /// `-`
    #[inline]
    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    /// Value of the cell under the cursor.
    #[inline]
    pub fn get(&self) -> u8 {
        self.cells[self.cursor]
    }

    #[inline]
    pub fn set(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tape_is_zeroed_with_cursor_at_start() {
        let tape = Tape::new(16).unwrap();
        assert_eq!(tape.len(), 16);
        assert_eq!(tape.cursor(), 0);
        assert!(tape.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn zero_length_tape_is_rejected() {
        let result = Tape::new(0);
        assert!(matches!(
            result,
            Err(BrainfkError::Allocation { what: "tape", requested: 0 })
        ));
    }

    #[test]
    fn advance_from_last_cell_wraps_to_zero() {
        let mut tape = Tape::new(3).unwrap();
        tape.advance();
        tape.advance();
        assert_eq!(tape.cursor(), 2);
        tape.advance();
        assert_eq!(tape.cursor(), 0);
    }

    #[test]
    fn retreat_from_zero_wraps_to_last_cell() {
        let mut tape = Tape::new(DEFAULT_TAPE_LEN).unwrap();
        tape.retreat();
        assert_eq!(tape.cursor(), DEFAULT_TAPE_LEN - 1);
        tape.advance();
        assert_eq!(tape.cursor(), 0);
    }

    #[test]
    fn single_cell_tape_is_a_ring_of_one() {
        let mut tape = Tape::new(1).unwrap();
        tape.advance();
        assert_eq!(tape.cursor(), 0);
        tape.retreat();
        assert_eq!(tape.cursor(), 0);
    }

    #[test]
    fn wrapping_addition() {
        let mut tape = Tape::new(1).unwrap();
        tape.set(255);
        tape.increment();
        assert_eq!(tape.get(), 0);
    }

    #[test]
    fn wrapping_subtraction() {
        let mut tape = Tape::new(1).unwrap();
        tape.decrement();
        assert_eq!(tape.get(), 255);
    }
}
