//! MistKeeper firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod ports;
pub mod state;
pub mod tasks;

mod pins;

// Hardware-facing modules; the register access inside is guarded by
// cfg attributes, so host builds get the simulated fallbacks.
pub mod drivers;
pub mod sensors;
