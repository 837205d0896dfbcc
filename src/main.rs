//! Hazard alarm firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter        MatrixKeypad     UartConsole         │
//! │  (Sensor+Indicator)     (KeyScanner)     (SerialPort)        │
//! │  WallClock · Uptime                                          │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            AlarmService (pure logic)                   │  │
//! │  │  debounce · sensors · alarm · disarm · console · log   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  TickScheduler (10 ms cooperative loop)                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use hazard_alarm::adapters::hardware::HardwareAdapter;
use hazard_alarm::adapters::time::{Uptime, WallClock};
use hazard_alarm::adapters::uart::UartConsole;
use hazard_alarm::drivers::gpio::{GpioInput, GpioOutput};
use hazard_alarm::drivers::hw_init;
use hazard_alarm::keypad::matrix::MatrixKeypad;
use hazard_alarm::scheduler::{StdDelay, TickScheduler};
use hazard_alarm::{AlarmConfig, AlarmService, pins};

/// Compiled-in defaults, optionally replaced by a JSON override baked in
/// at build time.
fn load_config() -> AlarmConfig {
    let Some(json) = option_env!("ALARM_CONFIG_JSON") else {
        return AlarmConfig::default();
    };
    match AlarmConfig::from_json(json) {
        Ok(cfg) => {
            info!("Config: build-time override applied");
            cfg
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            AlarmConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Hazard alarm v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Hardware peripherals ───────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = load_config();
    info!(
        "Config: tick={}ms debounce={}ms over_temp={:.1}C",
        config.tick_ms, config.debounce_ms, config.over_temp_c
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut keypad = MatrixKeypad::new(
        pins::KEYPAD_ROW_GPIOS.map(GpioOutput::new),
        pins::KEYPAD_COL_GPIOS.map(GpioInput::new),
    );
    let mut serial = UartConsole::new(pins::CONSOLE_UART_NUM);
    let mut clock = WallClock::new();
    let mut scheduler = TickScheduler::new(StdDelay, Uptime::new(), config.tick_ms);

    // ── 4. Startup code prompt (blocking) ─────────────────────
    let mut app = AlarmService::new(&config);
    app.run_setup(&mut keypad, &mut serial, &mut scheduler);

    // ── 5. Main loop ──────────────────────────────────────────
    info!("Entering main loop");
    loop {
        scheduler.pace(|| app.tick(&mut hw, &mut keypad, &mut serial, &mut clock));
    }
}
