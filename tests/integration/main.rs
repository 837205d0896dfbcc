//! Integration test driver for `tests/integration/` submodule.
#![cfg(not(target_os = "espidf"))]

mod alarm_flow_tests;
mod console_tests;
mod mock_hw;
