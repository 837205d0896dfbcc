//! 4×4 matrix keypad: raw scanning and release-event debouncing.
//!
//! ```text
//!  MatrixKeypad ──scan()──▶ KeypadDebouncer ──update()──▶ released key
//!  (row/col GPIO)            (Scanning/Debounce/Held)
//! ```

pub mod debounce;
pub mod matrix;

/// Number of row drive lines.
pub const ROWS: usize = 4;
/// Number of column sense lines.
pub const COLS: usize = 4;

/// Row-major key legend.
pub const KEYMAP: [char; ROWS * COLS] = [
    '1', '2', '3', 'A', //
    '4', '5', '6', 'B', //
    '7', '8', '9', 'C', //
    '*', '0', '#', 'D', //
];

/// Key that terminates code entry.
pub const TERMINATOR: char = '#';

/// Anything that can report the key currently held down.
///
/// Absence of a key is a normal result, not an error.
pub trait KeyScanner {
    fn scan(&mut self) -> Option<char>;
}
