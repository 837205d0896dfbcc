//! Row-scanned 4×4 matrix keypad.
//!
//! Rows are outputs idling HIGH.  Each scan drives one row LOW at a time
//! and samples the column inputs (pulled up); a LOW column means the key
//! at that intersection is closed.  The first closed key in row-major
//! order wins.
//!
//! Generic over `embedded-hal` pins so the same scanner runs on ESP-IDF
//! GPIO wrappers and on host mock pins.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use super::{COLS, KEYMAP, KeyScanner, ROWS};

pub struct MatrixKeypad<R, C> {
    rows: [R; ROWS],
    cols: [C; COLS],
}

impl<R: OutputPin, C: InputPin> MatrixKeypad<R, C> {
    pub fn new(rows: [R; ROWS], cols: [C; COLS]) -> Self {
        Self { rows, cols }
    }

    fn release_rows(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            if let Err(e) = row.set_high() {
                warn!("keypad: row {} release failed: {:?}", i, e);
            }
        }
    }

    /// Read errors count as "not closed".
    fn column_closed(col: &mut C) -> bool {
        col.is_low().unwrap_or(false)
    }
}

impl<R: OutputPin, C: InputPin> KeyScanner for MatrixKeypad<R, C> {
    fn scan(&mut self) -> Option<char> {
        for row in 0..ROWS {
            self.release_rows();
            if let Err(e) = self.rows[row].set_low() {
                warn!("keypad: row {} drive failed: {:?}", row, e);
                continue;
            }
            for col in 0..COLS {
                if Self::column_closed(&mut self.cols[col]) {
                    return Some(KEYMAP[row * COLS + col]);
                }
            }
        }
        None
    }
}
