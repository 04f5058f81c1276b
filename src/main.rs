//! MistKeeper firmware entry point.
//!
//! Boot brings the peripherals to a safe state, then hands the work to
//! four loops: three pinned tasks plus the control loop on the main
//! thread. They share nothing but [`state::SharedState`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Core 0 (PRO_CPU)                     Core 1 (APP_CPU)        │
//! │                                                              │
//! │  climate task ──► SharedState ◄───── display task            │
//! │  water task ────► SharedState            │                   │
//! │  control loop ◄── SharedState         SSD1306                │
//! │  (main thread)                                               │
//! │       │                                                      │
//! │       └─► valve relay + pump PWM + status back to state      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod control;
pub mod display;
pub mod ports;
pub mod sensors;
pub mod state;
pub mod tasks;

mod drivers;

// ── Imports ───────────────────────────────────────────────────
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use embedded_hal_bus::i2c::MutexDevice;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info, warn};

use config::SystemConfig;
use control::Arbiter;
use drivers::hardware::HardwareActuators;
use drivers::pump::PumpDriver;
use drivers::task_pin::{Core, spawn_on_core};
use drivers::valve::ValveDriver;
use sensors::climate::ClimateSensor;
use sensors::water_level::FloatSwitch;
use state::SharedState;

// ── I2C scan ──────────────────────────────────────────────────

/// Walk the 7-bit address space and log every responder.  Runs once at
/// boot before the bus is handed to the drivers, so a missing device
/// (DHT20 at 0x38, SSD1306 at 0x3C) shows up in the boot log rather
/// than as a stream of driver errors.
fn scan_i2c(bus: &mut impl embedded_hal::i2c::I2c) {
    let mut found = 0u32;
    for addr in 1u8..127 {
        if bus.write(addr, &[]).is_ok() {
            info!("I2C device found at 0x{:02X}", addr);
            found += 1;
        }
    }
    info!("I2C scan complete: {} device(s)", found);
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  MistKeeper v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Active configuration: {}", json),
        Err(e) => warn!("Could not serialise configuration: {}", e),
    }

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // The valve relay and the pump MOSFET are in unknown states if
        // this fails; refusing to run is the only safe option.
        error!("HAL init failed: {} - halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    // Typed pins are named statically here; keep in sync with pins.rs.
    let mut i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    info!(
        "I2C up on SDA=GPIO{} SCL=GPIO{} at {} Hz",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        pins::I2C_FREQ_HZ
    );
    scan_i2c(&mut i2c);

    // Both bus devices live for the rest of the firmware; leaking the
    // mutex gives each task a 'static handle without an Arc per device.
    let bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

    // Bring the panel up before anything spawns; the splash covers boot.
    let panel = display::Panel::new(MutexDevice::new(bus))?;
    info!("Display up (SSD1306 128x64 at 0x3C)");

    let shared = Arc::new(SharedState::new());

    // ── 3. Task spawn ─────────────────────────────────────────
    //
    // Sampling and control are pinned to the PRO core.  The display
    // renders on the APP core so a slow panel flush can never hold up
    // a control tick.
    {
        let state = Arc::clone(&shared);
        let sensor = ClimateSensor::new(
            MutexDevice::new(bus),
            FreeRtos,
            config.humidity_offset_percent,
        );
        let interval = Duration::from_millis(config.sensor_read_interval_ms as u64);
        spawn_on_core(Core::Pro, 6, "climate\0", move || {
            tasks::sensor_loop(sensor, &state, interval);
        });
    }

    {
        let state = Arc::clone(&shared);
        let samples = config.water_debounce_samples;
        let interval = Duration::from_millis(config.water_poll_interval_ms as u64);
        spawn_on_core(Core::Pro, 4, "water\0", move || {
            tasks::water_loop(FloatSwitch::new(), &state, samples, interval);
        });
    }

    {
        let state = Arc::clone(&shared);
        let refresh = Duration::from_millis(config.display_refresh_interval_ms as u64);
        spawn_on_core(Core::App, 8, "display\0", move || {
            panel.run(&state, refresh);
        });
    }

    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    //
    // The main task becomes the control task.  It owns the actuators
    // outright; nothing else in the firmware can touch the valve or
    // the pump.
    tasks::control_loop(
        Arbiter::new(&config),
        HardwareActuators::new(ValveDriver::new(), PumpDriver::new()),
        &shared,
        Duration::from_millis(config.control_tick_interval_ms as u64),
    )
}
