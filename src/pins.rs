//! GPIO / peripheral pin assignments for the alarm controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// 4×4 matrix keypad
// ---------------------------------------------------------------------------

/// Row drive lines (outputs, idle HIGH, scanned row driven LOW).
pub const KEYPAD_ROW_GPIOS: [i32; 4] = [4, 5, 6, 7];
/// Column sense lines (inputs with pull-up, LOW = key closed on active row).
pub const KEYPAD_COL_GPIOS: [i32; 4] = [15, 16, 17, 18];

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// MQ-2 gas detector digital output.  Active LOW (LOW = gas detected).
pub const GAS_DETECTOR_GPIO: i32 = 10;

/// LM35 temperature sensor analog output.
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LM35_ADC_GPIO: i32 = 1;

/// Alarm test push-button.  Active HIGH with internal pull-down.
pub const TEST_BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Alarm LED (blinks while the alarm is active).
pub const ALARM_LED_GPIO: i32 = 11;
/// Incorrect-code LED.
pub const INCORRECT_CODE_LED_GPIO: i32 = 12;
/// System-blocked LED (lockout).
pub const SYSTEM_BLOCKED_LED_GPIO: i32 = 13;

/// Siren driver.  Open-drain: input (high-Z) = silent, output LOW = sounding.
pub const SIREN_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Console UART
// ---------------------------------------------------------------------------

pub const CONSOLE_UART_NUM: i32 = 0;
pub const CONSOLE_UART_TX_GPIO: i32 = 43;
pub const CONSOLE_UART_RX_GPIO: i32 = 44;
pub const CONSOLE_BAUD_RATE: i32 = 115_200;
