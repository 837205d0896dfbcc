//! End-to-end alarm scenarios through `AlarmService::tick`.

use hazard_alarm::app::ports::SirenMode;
use hazard_alarm::config::EVENT_LOG_CAPACITY;

use crate::mock_hw::{IndicatorCall, Rig};

/// Tick distance between successive alarm LED transitions, ignoring any
/// transitions before `from`.
fn toggle_intervals(history: &[bool], from: usize) -> Vec<usize> {
    let edges: Vec<usize> = (from.max(1)..history.len())
        .filter(|&i| history[i] != history[i - 1])
        .collect();
    edges.windows(2).map(|w| w[1] - w[0]).collect()
}

fn labels(rig: &Rig) -> Vec<String> {
    rig.app
        .events()
        .dump_view()
        .iter()
        .map(|r| r.label.as_str().to_owned())
        .collect()
}

// ── Quiet system ──────────────────────────────────────────────

#[test]
fn quiet_system_stays_silent() {
    let mut rig = Rig::new();
    rig.ticks(500);

    assert!(!rig.app.alarm().is_active());
    assert!(rig.board.alarm_led_history().iter().all(|on| !on));
    assert_eq!(rig.board.siren(), Some(SirenMode::HighImpedance));
    assert!(!rig.board.incorrect_code_led());
    assert!(!rig.board.system_blocked_led());
    assert!(rig.app.events().is_empty());
    assert!(rig.serial.output.is_empty());
}

#[test]
fn indicators_written_every_tick() {
    let mut rig = Rig::new();
    rig.ticks(3);
    let sirens = rig
        .board
        .calls
        .iter()
        .filter(|c| matches!(c, IndicatorCall::Siren(_)))
        .count();
    assert_eq!(sirens, 3);
    assert_eq!(rig.board.alarm_led_history().len(), 3);
}

// ── Blink cadence per hazard combination ─────────────────────

#[test]
fn gas_blinks_at_one_second() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.ticks(400);

    assert!(rig.app.alarm().is_active());
    assert_eq!(rig.app.alarm().blink_period_ms(), Some(1000));
    assert_eq!(rig.board.siren(), Some(SirenMode::DrivenLow));

    let history = rig.board.alarm_led_history();
    // First toggle once 1000 ms have accumulated.
    assert!(!history[98]);
    assert!(history[99]);
    assert_eq!(toggle_intervals(&history, 0), [100, 100, 100]);
}

#[test]
fn over_temperature_blinks_at_half_second() {
    let mut rig = Rig::new();
    // 0.5 of full scale = 165 C per sample; the 100-sample mean crosses
    // 50 C on the 31st tick.
    rig.board.temperature_raw = 0.5;
    rig.ticks(30);
    assert!(!rig.app.alarm().is_active());
    rig.tick();
    assert!(rig.app.sensors().is_over_temperature());
    assert!(rig.app.alarm().is_active());

    rig.ticks(300);
    assert_eq!(rig.app.alarm().blink_period_ms(), Some(500));
    let history = rig.board.alarm_led_history();
    let intervals = toggle_intervals(&history, 0);
    assert!(intervals.len() >= 4);
    assert!(intervals.iter().all(|&n| n == 50));
}

#[test]
fn both_hazards_blink_fastest() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.board.temperature_raw = 0.5;
    rig.ticks(200);

    assert_eq!(rig.app.alarm().blink_period_ms(), Some(100));
    let history = rig.board.alarm_led_history();
    let intervals = toggle_intervals(&history, 40);
    assert!(intervals.len() >= 10);
    assert!(intervals.iter().all(|&n| n == 10));
}

#[test]
fn test_button_latches_both_detectors() {
    let mut rig = Rig::new();
    rig.board.test_button = true;
    rig.tick();
    rig.board.test_button = false;
    rig.ticks(100);

    assert!(rig.app.alarm().is_active());
    assert!(rig.app.alarm().state().gas_latched);
    assert!(rig.app.alarm().state().over_temp_latched);
    assert_eq!(rig.app.alarm().blink_period_ms(), Some(100));
    // The detectors themselves never fired.
    assert!(!rig.app.sensors().is_gas_detected());
}

#[test]
fn latch_survives_hazard_clearing() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.ticks(5);
    rig.board.gas_low = false;
    rig.ticks(500);

    assert!(rig.app.alarm().is_active());
    assert_eq!(rig.app.alarm().blink_period_ms(), Some(1000));
    assert_eq!(rig.board.siren(), Some(SirenMode::DrivenLow));
}

// ── Keypad disarm ─────────────────────────────────────────────

#[test]
fn keypad_code_disarms_and_silences() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();
    rig.board.gas_low = false;

    rig.keypad.type_keys("180#");
    rig.drain_keys();

    assert!(!rig.app.alarm().is_active());
    assert_eq!(rig.app.disarm().attempts(), 0);
    assert_eq!(rig.board.siren(), Some(SirenMode::HighImpedance));
    assert!(!rig.board.alarm_led());
    assert!(rig.serial.take_output().contains("180\r\n"));
}

#[test]
fn persistent_hazard_rearms_after_disarm() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.keypad.type_keys("180#");
    rig.drain_keys();

    // Disarmed, but the gas line is still asserted on the next tick.
    assert!(rig.app.alarm().is_active());
    let labels = labels(&rig);
    let on = labels.iter().filter(|l| *l == "ALARM_ON").count();
    let off = labels.iter().filter(|l| *l == "ALARM_OFF").count();
    assert_eq!((on, off), (2, 1));
}

#[test]
fn hash_while_inactive_does_nothing() {
    let mut rig = Rig::new();
    rig.keypad.type_keys("999#");
    rig.drain_keys();

    assert_eq!(rig.app.disarm().attempts(), 0);
    assert!(!rig.board.incorrect_code_led());
}

#[test]
fn wrong_code_needs_two_hash_acknowledgements() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();
    rig.board.gas_low = false;

    rig.keypad.type_keys("999#");
    rig.drain_keys();
    assert!(rig.app.alarm().is_active());
    assert_eq!(rig.app.disarm().attempts(), 1);
    assert!(rig.board.incorrect_code_led());

    // While the indicator is lit a correct code plus '#' only acknowledges.
    rig.keypad.type_keys("180#");
    rig.drain_keys();
    assert!(rig.app.alarm().is_active());
    assert!(rig.board.incorrect_code_led());

    rig.keypad.type_keys("#");
    rig.drain_keys();
    assert!(!rig.board.incorrect_code_led());
    assert_eq!(rig.app.disarm().entry().cursor(), 0);

    rig.keypad.type_keys("180#");
    rig.drain_keys();
    assert!(!rig.app.alarm().is_active());
    assert_eq!(rig.app.disarm().attempts(), 0);
}

#[test]
fn keypad_and_console_failures_share_one_lockout() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();

    for round in 0..2 {
        rig.keypad.type_keys("999#");
        rig.drain_keys();
        rig.serial.send("4999");
        rig.tick();
        assert_eq!(rig.app.disarm().attempts(), 2 * round + 2);
        rig.keypad.type_keys("##");
        rig.drain_keys();
    }
    assert!(!rig.app.disarm().is_blocked());

    rig.keypad.type_keys("999#");
    rig.drain_keys();
    assert!(rig.app.disarm().is_blocked());
    assert!(rig.board.system_blocked_led());
    assert!(rig.board.incorrect_code_led());

    // Keypad is no longer scanned and the console refuses.
    let scans = rig.keypad.scans;
    rig.keypad.type_keys("##180#");
    rig.drain_keys();
    assert_eq!(rig.keypad.scans, scans);

    rig.serial.take_output();
    rig.serial.send("4180");
    rig.ticks(4);
    let out = rig.serial.take_output();
    assert!(out.ends_with("***\r\nThe system is blocked\r\n"));
    // The code digits were read with the command, not run on later ticks.
    assert!(!out.contains("Available commands"));
    assert!(!out.contains("The alarm is activated"));
    assert!(rig.serial.input.is_empty());
    assert!(rig.app.alarm().is_active());
    assert_eq!(rig.app.disarm().attempts(), 5);
}

// ── Event log ─────────────────────────────────────────────────

#[test]
fn transitions_are_logged_and_mirrored() {
    let mut rig = Rig::new();
    rig.clock.epoch_secs = 1_000;
    rig.board.gas_low = true;
    rig.tick();

    assert_eq!(
        rig.serial.take_output(),
        "1970-01-01 00:16:40  ALARM_ON\r\n1970-01-01 00:16:40  GAS_DET_ON\r\n"
    );

    rig.clock.epoch_secs = 1_060;
    rig.board.gas_low = false;
    rig.tick();
    assert_eq!(rig.serial.take_output(), "1970-01-01 00:17:40  GAS_DET_OFF\r\n");

    rig.keypad.type_keys("999#");
    rig.drain_keys();
    rig.keypad.type_keys("##180#");
    rig.drain_keys();

    assert_eq!(
        labels(&rig),
        ["ALARM_ON", "GAS_DET_ON", "GAS_DET_OFF", "LED_IC_ON", "LED_IC_OFF", "ALARM_OFF"]
    );
    let first = &rig.app.events().dump_view()[0];
    assert_eq!(first.timestamp, 1_000);
}

#[test]
fn steady_levels_log_nothing() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();
    let logged = rig.app.events().len();
    rig.ticks(250);
    assert_eq!(rig.app.events().len(), logged);
}

#[test]
fn event_ring_wraps_after_capacity() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();
    // ALARM_ON + GAS_DET_ON, then one GAS_DET edge per tick.
    for _ in 0..EVENT_LOG_CAPACITY {
        rig.board.gas_low = !rig.board.gas_low;
        rig.tick();
    }
    let log = rig.app.events();
    assert_eq!(log.len(), EVENT_LOG_CAPACITY);
    assert_eq!(log.write_index(), 2);
    assert_eq!(log.dump_view().len(), 2);
    // Slots past the write index still hold pre-wrap entries.
    assert_eq!(log.slots()[2].label.as_str(), "GAS_DET_OFF");
}
