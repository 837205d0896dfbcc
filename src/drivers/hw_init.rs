//! One-shot hardware peripheral initialization and raw pin access.
//!
//! Configures the LM35 ADC channel, keypad/sensor/indicator GPIO, and the
//! console UART using raw ESP-IDF sys calls.  Called once from `main()`
//! before the startup prompt.
//!
//! ## Dual-target design
//!
//! On ESP-IDF every accessor goes straight to the peripheral.  On
//! host/test the same functions read and write atomics, which tests can
//! seed through the `sim_*` helpers.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, AtomicU64, Ordering};

use crate::error::HwInitError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// ADC1 channel carrying the LM35 output.
pub const ADC1_CH_LM35: u32 = 0;
/// 12-bit oneshot full scale.
pub const ADC_FULL_SCALE: f32 = 4095.0;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Simulation state (host) ───────────────────────────────────

/// One bit per GPIO.  Inputs idle HIGH (no gas, no key) except the
/// test button, which idles LOW.
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVELS: AtomicU64 = AtomicU64::new(!(1u64 << crate::pins::TEST_BUTTON_GPIO));
#[cfg(not(target_os = "espidf"))]
static SIM_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gpio(pin: i32, high: bool) {
    let bit = 1u64 << pin;
    if high {
        SIM_GPIO_LEVELS.fetch_or(bit, Ordering::Relaxed);
    } else {
        SIM_GPIO_LEVELS.fetch_and(!bit, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(raw: u16) {
    SIM_ADC.store(raw, Ordering::Relaxed);
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    // 12 dB attenuation covers the full 0-3.3 V range.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_LM35, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH{}=LM35)", ADC1_CH_LM35);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    SIM_ADC.load(Ordering::Relaxed)
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn config_pin(pin: i32, mode: gpio_mode_t, pull_up: bool, pull_down: bool) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: if pull_down {
            gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
        } else {
            gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
        },
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    for &pin in &pins::KEYPAD_COL_GPIOS {
        unsafe { config_pin(pin, gpio_mode_t_GPIO_MODE_INPUT, true, false)? };
    }
    // MQ-2 module drives its own output.
    unsafe { config_pin(pins::GAS_DETECTOR_GPIO, gpio_mode_t_GPIO_MODE_INPUT, false, false)? };
    unsafe { config_pin(pins::TEST_BUTTON_GPIO, gpio_mode_t_GPIO_MODE_INPUT, false, true)? };
    // Siren starts released (high impedance).
    unsafe { config_pin(pins::SIREN_GPIO, gpio_mode_t_GPIO_MODE_INPUT, false, false)? };

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &pins::KEYPAD_ROW_GPIOS {
        unsafe { config_pin(pin, gpio_mode_t_GPIO_MODE_OUTPUT, false, false)? };
        unsafe { gpio_set_level(pin, 1) };
    }
    let leds = [
        pins::ALARM_LED_GPIO,
        pins::INCORRECT_CODE_LED_GPIO,
        pins::SYSTEM_BLOCKED_LED_GPIO,
    ];
    for &pin in &leds {
        unsafe { config_pin(pin, gpio_mode_t_GPIO_MODE_OUTPUT, false, false)? };
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on a configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_GPIO_LEVELS.load(Ordering::Relaxed) & (1u64 << pin) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as output in init_gpio_outputs(); main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim_set_gpio(pin, high);
}

/// Reconfigure `pin` as open-drain output and pull it LOW.
#[cfg(target_os = "espidf")]
pub fn gpio_drive_open_drain_low(pin: i32) {
    // SAFETY: direction change on a pin owned by the siren driver.
    unsafe {
        gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
        gpio_set_level(pin, 0);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_drive_open_drain_low(pin: i32) {
    sim_set_gpio(pin, false);
}

/// Reconfigure `pin` as input, leaving the line floating.
#[cfg(target_os = "espidf")]
pub fn gpio_release(pin: i32) {
    // SAFETY: direction change on a pin owned by the siren driver.
    unsafe {
        gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
    }
}

/// The line floats back HIGH through the siren module's pull-up.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_release(pin: i32) {
    sim_set_gpio(pin, true);
}

// ── Console UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::CONSOLE_BAUD_RATE,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let port = pins::CONSOLE_UART_NUM;
    let ret = unsafe { uart_param_config(port, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }
    let ret = unsafe {
        uart_set_pin(
            port,
            pins::CONSOLE_UART_TX_GPIO,
            pins::CONSOLE_UART_RX_GPIO,
            -1, // RTS unused
            -1, // CTS unused
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }
    let ret = unsafe { uart_driver_install(port, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }

    info!("hw_init: UART{} console at {} baud", port, pins::CONSOLE_BAUD_RATE);
    Ok(())
}

/// Bytes waiting in the RX FIFO.
#[cfg(target_os = "espidf")]
pub fn uart_available(port: i32) -> bool {
    let mut len: usize = 0;
    // SAFETY: driver installed in init_uart(); `len` outlives the call.
    let ret = unsafe { uart_get_buffered_data_len(port, &mut len) };
    ret == ESP_OK as i32 && len > 0
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_available(_port: i32) -> bool {
    false
}

/// Block until one byte arrives.  `None` on driver error.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte(port: i32) -> Option<u8> {
    let mut byte: u8 = 0;
    loop {
        // SAFETY: one-byte buffer on the stack; driver installed in init_uart().
        let n = unsafe {
            uart_read_bytes(port, (&raw mut byte).cast(), 1, TickType_t::MAX)
        };
        match n {
            1 => return Some(byte),
            0 => continue,
            _ => return None,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte(_port: i32) -> Option<u8> {
    None
}

/// Queue bytes for transmission.  Returns `false` on a short write.
#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, bytes: &[u8]) -> bool {
    // SAFETY: `bytes` is valid for the duration of the call; the driver
    // copies into its own TX path before returning.
    let n = unsafe { uart_write_bytes(port, bytes.as_ptr().cast(), bytes.len()) };
    usize::try_from(n).is_ok_and(|n| n == bytes.len())
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_port: i32, _bytes: &[u8]) -> bool {
    true
}
