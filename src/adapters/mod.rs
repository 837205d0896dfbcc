//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                 | Connects to              |
//! |------------|----------------------------|--------------------------|
//! | `hardware` | SensorPort, IndicatorPort  | ESP32 ADC, GPIO, siren   |
//! | `uart`     | SerialPort                 | ESP-IDF UART driver      |
//! | `time`     | ClockPort, MonotonicPort   | ESP32 system timer / RTC |

pub mod hardware;
pub mod time;
pub mod uart;
