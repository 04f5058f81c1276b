//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hardware;
pub mod hw_init;
pub mod pump;
pub mod task_pin;
pub mod valve;
