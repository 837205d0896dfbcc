//! UART console adapter — implements [`SerialPort`] over the ESP-IDF UART
//! driver installed by `hw_init`.

use crate::app::ports::SerialPort;
use crate::drivers::hw_init;
use crate::error::SerialError;

pub struct UartConsole {
    port: i32,
}

impl UartConsole {
    pub fn new(port: i32) -> Self {
        Self { port }
    }
}

impl SerialPort for UartConsole {
    fn readable(&mut self) -> bool {
        hw_init::uart_available(self.port)
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        hw_init::uart_read_byte(self.port).ok_or(SerialError::ReadFailed)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        if hw_init::uart_write(self.port, bytes) {
            Ok(())
        } else {
            Err(SerialError::WriteFailed)
        }
    }
}
