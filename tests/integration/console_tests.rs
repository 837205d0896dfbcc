//! Serial console commands driven through the full service.

use hazard_alarm::app::ports::SirenMode;

use crate::mock_hw::Rig;

/// Queue `input`, run one tick, return what the console printed.
fn command(rig: &mut Rig, input: &str) -> String {
    rig.serial.take_output();
    rig.serial.send(input);
    rig.tick();
    rig.serial.take_output()
}

#[test]
fn unknown_byte_prints_help() {
    let mut rig = Rig::new();
    let out = command(&mut rig, "x");
    assert!(out.starts_with("Available commands:\r\n"));
    assert!(out.contains("Press '4' to enter the code sequence\r\n"));
    assert!(out.ends_with("Press 'e' or 'E' to get the stored events\r\n\r\n"));
}

#[test]
fn one_command_per_tick() {
    let mut rig = Rig::new();
    rig.serial.send("123");
    rig.tick();
    assert_eq!(rig.serial.input.len(), 2);
    rig.ticks(2);
    assert!(rig.serial.input.is_empty());
}

#[test]
fn status_queries_follow_the_hazards() {
    let mut rig = Rig::new();
    assert_eq!(command(&mut rig, "1"), "The alarm is not activated\r\n");
    assert_eq!(command(&mut rig, "2"), "Gas is not being detected\r\n");
    assert_eq!(command(&mut rig, "3"), "Temperature is below the maximum level\r\n");

    rig.board.gas_low = true;
    rig.board.temperature_raw = 0.5;
    rig.ticks(40);
    assert_eq!(command(&mut rig, "1"), "The alarm is activated\r\n");
    assert_eq!(command(&mut rig, "2"), "Gas is being detected\r\n");
    assert_eq!(command(&mut rig, "3"), "Temperature is above the maximum level\r\n");
}

#[test]
fn temperature_in_both_scales() {
    let mut rig = Rig::new();
    // A full window of quarter-scale readings is 82.5 C.
    rig.board.temperature_raw = 0.25;
    rig.ticks(100);
    assert_eq!(command(&mut rig, "c"), "Temperature: 82.50 \u{b0} C\r\n");
    assert_eq!(command(&mut rig, "F"), "Temperature: 180.50 \u{b0} F\r\n");
}

#[test]
fn console_code_disarms() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();
    rig.board.gas_low = false;

    let out = command(&mut rig, "4180");
    assert!(out.starts_with(
        "Please enter the three digits numeric code to deactivate the alarm: ***\r\nThe code is correct\r\n\r\n"
    ));
    assert!(!rig.app.alarm().is_active());

    rig.tick();
    assert_eq!(rig.board.siren(), Some(SirenMode::HighImpedance));
}

#[test]
fn console_wrong_code_lights_indicator() {
    let mut rig = Rig::new();
    rig.board.gas_low = true;
    rig.tick();

    let out = command(&mut rig, "4123");
    assert!(out.contains("***\r\nThe code is incorrect\r\n\r\n"));
    assert!(out.contains("LED_IC_ON"));
    assert!(rig.board.incorrect_code_led());
    assert_eq!(rig.app.disarm().attempts(), 1);

    // A correct console code clears the indicator as well.
    command(&mut rig, "4180");
    rig.tick();
    assert!(!rig.board.incorrect_code_led());
    assert_eq!(rig.app.disarm().attempts(), 0);
}

#[test]
fn console_code_checked_while_inactive() {
    let mut rig = Rig::new();
    let out = command(&mut rig, "4180");
    assert!(out.contains("The code is correct"));
    let out = command(&mut rig, "4000");
    assert!(out.contains("The code is incorrect"));
    assert_eq!(rig.app.disarm().attempts(), 1);
}

#[test]
fn new_code_is_read_but_not_stored() {
    let mut rig = Rig::new();
    let out = command(&mut rig, "5999");
    assert_eq!(
        out,
        "Please enter the new three digits numeric code to deactivate the alarm: ***\r\nNew code generated\r\n\r\n"
    );
    assert!(rig.serial.input.is_empty());

    rig.board.gas_low = true;
    rig.tick();
    rig.board.gas_low = false;
    assert!(command(&mut rig, "4999").contains("The code is incorrect"));
    assert!(command(&mut rig, "4180").contains("The code is correct"));
}

#[test]
fn set_then_show_date() {
    let mut rig = Rig::new();
    let out = command(&mut rig, "s20240315123456");
    assert!(out.starts_with("\r\nType four digits for the current year (YYYY): 2024\r\n"));
    assert!(out.contains("Type two digits for the current month (01-12): 03\r\n"));
    assert!(out.contains("Type two digits for the current seconds (00-59): 56\r\n"));
    assert!(out.ends_with("Date and time has been set\r\n"));
    assert_eq!(rig.clock.epoch_secs, 1_710_506_096);

    assert_eq!(
        command(&mut rig, "T"),
        "Date and Time = Fri Mar 15 12:34:56 2024\r\n"
    );
}

#[test]
fn out_of_range_fields_roll_over() {
    let mut rig = Rig::new();
    // February 30th 2024 normalises to March 1st.
    command(&mut rig, "S20240230000000");
    assert_eq!(command(&mut rig, "t"), "Date and Time = Fri Mar  1 00:00:00 2024\r\n");
}

#[test]
fn non_digit_fields_parse_as_zero() {
    let mut rig = Rig::new();
    // Month "ab" reads as 0, which folds back to December of the year before.
    command(&mut rig, "s2024ab01000000");
    assert_eq!(command(&mut rig, "t"), "Date and Time = Fri Dec  1 00:00:00 2023\r\n");
}

#[test]
fn event_dump_lists_records_with_dates() {
    let mut rig = Rig::new();
    command(&mut rig, "s20240315123456");
    rig.board.gas_low = true;
    rig.tick();

    let out = command(&mut rig, "e");
    assert_eq!(
        out,
        "Event = ALARM_ON\r\n\
         Date and Time = Fri Mar 15 12:34:56 2024\r\n\
         \r\n\
         Event = GAS_DET_ON\r\n\
         Date and Time = Fri Mar 15 12:34:56 2024\r\n\
         \r\n"
    );
}

#[test]
fn event_dump_empty_log_prints_nothing() {
    let mut rig = Rig::new();
    assert_eq!(command(&mut rig, "E"), "");
}
