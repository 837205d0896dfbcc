//! Disarm code entry and lockout.
//!
//! Two surfaces feed one comparison: keypad release events (digits
//! collected in a circular buffer, `#` to submit) and the console `4`
//! command (N characters compared position by position).  Both share a
//! single incorrect-attempt counter; reaching the limit blocks all further
//! comparisons until reset.
//!
//! While the incorrect-code indicator is lit, `#` does not submit.  It
//! must be pressed `ack_presses` times to acknowledge and clear the
//! indicator.

use log::{info, warn};

use crate::config::{AlarmConfig, CODE_LENGTH};
use crate::keypad::TERMINATOR;

/// Fixed-length circular digit buffer plus the code it is checked against.
#[derive(Debug, Clone)]
pub struct CodeEntry {
    expected: [u8; CODE_LENGTH],
    entered: [u8; CODE_LENGTH],
    cursor: usize,
}

impl CodeEntry {
    pub fn new(expected: [u8; CODE_LENGTH]) -> Self {
        Self {
            expected,
            entered: [0; CODE_LENGTH],
            cursor: 0,
        }
    }

    /// Store a character at the cursor and advance, wrapping at N.
    pub fn push(&mut self, key: u8) {
        self.entered[self.cursor] = key;
        self.cursor = (self.cursor + 1) % CODE_LENGTH;
    }

    pub fn matches(&self) -> bool {
        self.entered == self.expected
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_expected(&mut self, code: [u8; CODE_LENGTH]) {
        self.expected = code;
    }

    pub fn expected(&self) -> &[u8; CODE_LENGTH] {
        &self.expected
    }
}

/// Incorrect-attempt counter with a terminal blocked condition.
#[derive(Debug, Clone, Copy)]
pub struct Lockout {
    attempts: u8,
    limit: u8,
}

impl Lockout {
    pub fn new(limit: u8) -> Self {
        Self { attempts: 0, limit }
    }

    pub fn record_failure(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
        if self.is_blocked() {
            warn!("lockout: {} incorrect codes, system blocked", self.attempts);
        }
    }

    pub fn clear(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn is_blocked(&self) -> bool {
        self.attempts >= self.limit
    }
}

/// Result of feeding one released key into the keypad path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisarmOutcome {
    /// A character was stored at the cursor.
    Stored(char),
    /// `#` counted toward acknowledging the incorrect-code indicator.
    AckPending,
    /// Indicator acknowledged, entry reset.
    Acknowledged,
    /// `#` while the alarm is inactive: nothing to compare.
    Idle,
    /// Code matched.  The caller deactivates the alarm.
    Accepted,
    /// Code did not match.  Carries the updated attempt count.
    Rejected { attempts: u8 },
    /// System is blocked; no comparison was made.
    Blocked,
}

pub struct DisarmController {
    entry: CodeEntry,
    lockout: Lockout,
    incorrect_code: bool,
    hash_presses: u8,
    ack_presses: u8,
}

impl DisarmController {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            entry: CodeEntry::new(config.default_code_digits()),
            lockout: Lockout::new(config.max_incorrect_attempts),
            incorrect_code: false,
            hash_presses: 0,
            ack_presses: config.ack_presses,
        }
    }

    /// Install a new code (startup prompt).
    pub fn set_code(&mut self, code: [u8; CODE_LENGTH]) {
        self.entry.set_expected(code);
        self.entry.reset_cursor();
        info!("disarm: code updated");
    }

    /// Keypad path: one released key.
    pub fn on_key(&mut self, key: char, alarm_active: bool) -> DisarmOutcome {
        if self.lockout.is_blocked() {
            return DisarmOutcome::Blocked;
        }
        if key != TERMINATOR {
            // Keys outside ASCII cannot come from the keymap.
            self.entry.push(u8::try_from(key).unwrap_or(0));
            return DisarmOutcome::Stored(key);
        }

        if self.incorrect_code {
            self.hash_presses = self.hash_presses.saturating_add(1);
            if self.hash_presses >= self.ack_presses {
                self.incorrect_code = false;
                self.hash_presses = 0;
                self.entry.reset_cursor();
                return DisarmOutcome::Acknowledged;
            }
            return DisarmOutcome::AckPending;
        }

        if !alarm_active {
            return DisarmOutcome::Idle;
        }

        if self.entry.matches() {
            self.lockout.clear();
            self.entry.reset_cursor();
            DisarmOutcome::Accepted
        } else {
            self.reject()
        }
    }

    /// Console path: compare a full code read from the serial line.
    ///
    /// Compared regardless of alarm state.  On success the indicator is
    /// cleared as well; the keypad cursor is left alone.
    pub fn check_console_code(&mut self, digits: &[u8; CODE_LENGTH]) -> DisarmOutcome {
        if self.lockout.is_blocked() {
            return DisarmOutcome::Blocked;
        }
        if digits == self.entry.expected() {
            self.incorrect_code = false;
            self.lockout.clear();
            DisarmOutcome::Accepted
        } else {
            self.reject()
        }
    }

    fn reject(&mut self) -> DisarmOutcome {
        self.incorrect_code = true;
        self.lockout.record_failure();
        info!("disarm: incorrect code ({} attempts)", self.lockout.attempts());
        DisarmOutcome::Rejected {
            attempts: self.lockout.attempts(),
        }
    }

    pub fn incorrect_code_lit(&self) -> bool {
        self.incorrect_code
    }

    pub fn is_blocked(&self) -> bool {
        self.lockout.is_blocked()
    }

    pub fn attempts(&self) -> u8 {
        self.lockout.attempts()
    }

    pub fn entry(&self) -> &CodeEntry {
        &self.entry
    }
}
