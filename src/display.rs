//! OLED status display (SSD1306 128×64 over I²C).
//!
//! Read-only consumer of [`ControlStatus`]; the display never feeds
//! back into control. Layout and formatting are plain functions over a
//! [`DrawTarget`] so they run in host tests; only [`Panel`] touches the
//! hardware.
//!
//! The whole text block drifts horizontally a couple of pixels per
//! refresh. A static image burns shadows into these panels within weeks.

use core::fmt::Write as _;
use std::time::Duration;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;
use log::warn;
use ssd1306::{
    I2CDisplayInterface, Ssd1306,
    mode::{BufferedGraphicsMode, DisplayConfig},
    prelude::*,
};

use crate::state::{ControlStatus, SharedState};

/// Vertical distance between row baselines. FONT_6X10 is 10 px tall, so
/// 13 px leaves a 3 px gap; five rows end at y = 62 on the 64 px panel.
const ROW_PITCH_PX: i32 = 13;

/// Peak horizontal shift of the text origin.
const MAX_SHIFT_PX: i32 = 40;
/// Shift change per refresh frame.
const SHIFT_STEP_PX: i32 = 2;

/// One formatted row. 21 glyphs of FONT_6X10 fill the 128 px width.
type Row = String<21>;

// ── Layout (pure) ─────────────────────────────────────────────

/// Text origin for a refresh frame: a triangle wave, `0..=MAX_SHIFT_PX`
/// advancing `SHIFT_STEP_PX` per frame.
fn scroll_offset(frame: u32) -> i32 {
    let period = 2 * (MAX_SHIFT_PX / SHIFT_STEP_PX);
    let phase = (frame % period as u32) as i32;
    SHIFT_STEP_PX * phase.min(period - phase)
}

/// The bottom status row, most urgent condition first.
fn status_line(status: &ControlStatus) -> Row {
    let mut line = Row::new();
    if status.humidity_percent >= status.target_percent {
        let _ = line.push_str("TARGET REACHED");
    } else if status.valve_open {
        let _ = write!(line, "FILL: {}s", status.remaining_secs);
    } else if status.pump_on {
        let _ = write!(line, "MIST: {}s", status.remaining_secs);
    } else if status.remaining_secs > 0 {
        let _ = write!(line, "REST: {}s", status.remaining_secs);
    } else {
        let _ = line.push_str("STANDBY");
    }
    line
}

fn format_rows(status: &ControlStatus) -> [Row; 5] {
    let mut rows: [Row; 5] = Default::default();
    let _ = write!(rows[0], "TEMP: {:.1}C", status.temperature_c);
    let _ = write!(rows[1], "HUM:  {:.1}%", status.humidity_percent);
    let _ = write!(rows[2], "TGT:  {:.0}%", status.target_percent);
    let _ = write!(
        rows[3],
        "WATER: {}",
        if status.water_present { "OK" } else { "LOW" }
    );
    rows[4] = status_line(status);
    rows
}

/// Draw the five-row status layout into any binary framebuffer.
pub fn render(target: &mut impl DrawTarget<Color = BinaryColor>, status: &ControlStatus, frame: u32) {
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let x = scroll_offset(frame);
    for (i, row) in format_rows(status).iter().enumerate() {
        let _ = Text::with_baseline(
            row.as_str(),
            Point::new(x, i as i32 * ROW_PITCH_PX),
            style,
            Baseline::Top,
        )
        .draw(target);
    }
}

/// Boot splash shown until the first status frame lands.
pub fn render_splash(target: &mut impl DrawTarget<Color = BinaryColor>) {
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let _ = Text::with_baseline(
        "Initializing...",
        Point::new(19, 27),
        style,
        Baseline::Top,
    )
    .draw(target);
}

// ── Hardware panel ────────────────────────────────────────────

/// The SSD1306 with its buffered framebuffer, brought up in `main` and
/// then owned by the display task for the life of the firmware.
pub struct Panel<I2C> {
    display: Ssd1306<
        I2CInterface<I2C>,
        DisplaySize128x64,
        BufferedGraphicsMode<DisplaySize128x64>,
    >,
}

impl<I2C: embedded_hal::i2c::I2c> Panel<I2C> {
    /// Bring the panel up: init, dim, boot splash. Every bus error
    /// propagates; a panel that fails bring-up fails boot.
    pub fn new(i2c: I2C) -> anyhow::Result<Self> {
        let mut display = Ssd1306::new(
            I2CDisplayInterface::new(i2c),
            DisplaySize128x64,
            DisplayRotation::Rotate0,
        )
        .into_buffered_graphics_mode();

        display
            .init()
            .map_err(|e| anyhow::anyhow!("display init failed: {e:?}"))?;
        // Full brightness ages the panel; DIM is plenty indoors.
        display
            .set_brightness(Brightness::DIM)
            .map_err(|e| anyhow::anyhow!("display brightness: {e:?}"))?;

        render_splash(&mut display);
        display
            .flush()
            .map_err(|e| anyhow::anyhow!("display flush failed: {e:?}"))?;

        Ok(Self { display })
    }

    /// Refresh the panel forever. A flush error mid-flight is logged
    /// and the next frame retried, since a wedged display must never
    /// take the firmware down with it.
    pub fn run(mut self, state: &SharedState, refresh_interval: Duration) -> ! {
        let mut frame = 0u32;
        loop {
            std::thread::sleep(refresh_interval);

            let status = state.status();
            let _ = self.display.clear(BinaryColor::Off);
            render(&mut self.display, &status, frame);
            if let Err(e) = self.display.flush() {
                warn!("Display flush failed: {:?}", e);
            }
            frame = frame.wrapping_add(1);
        }
    }
}
