//! Fuzz target: `KeypadDebouncer` + `DisarmController`
//!
//! Treats each input byte as one tick of raw keypad contact state and
//! runs the debouncer and keypad disarm path.  Released keys must come
//! from the keymap, and lockout must be monotonic.
//!
//! cargo fuzz run fuzz_keypad

#![no_main]

use hazard_alarm::AlarmConfig;
use hazard_alarm::alarm::code::{DisarmController, DisarmOutcome};
use hazard_alarm::keypad::debounce::KeypadDebouncer;
use hazard_alarm::keypad::{KEYMAP, KeyScanner};
use libfuzzer_sys::fuzz_target;

struct Raw(Option<char>);

impl KeyScanner for Raw {
    fn scan(&mut self) -> Option<char> {
        self.0
    }
}

fuzz_target!(|data: &[u8]| {
    let config = AlarmConfig::default();
    let mut debouncer = KeypadDebouncer::new(&config);
    let mut disarm = DisarmController::new(&config);
    let mut raw = Raw(None);
    let mut was_blocked = false;

    for byte in data {
        // Upper nibble 0 = no key, otherwise low nibble selects a key.
        raw.0 = (byte >> 4 != 0).then(|| KEYMAP[usize::from(byte & 0x0f)]);
        let Some(key) = debouncer.update(&mut raw) else {
            continue;
        };
        assert!(KEYMAP.contains(&key));

        let outcome = disarm.on_key(key, byte & 0x80 != 0);
        if was_blocked {
            assert_eq!(outcome, DisarmOutcome::Blocked);
        }
        was_blocked = disarm.is_blocked();
        assert!(disarm.attempts() <= config.max_incorrect_attempts);
    }
});
