//! Stateless animations driven purely by pixel index and frame counter.

use super::Canvas;
use crate::color::Color;
use crate::frame::MAX_BRIGHTNESS;

pub(super) fn off(canvas: &mut Canvas) {
    canvas.fill(Color::BLACK, 0);
    let delay = canvas.pacing().off;
    canvas.request_sleep(delay);
}

// ── Pride ────────────────────────────────────────────────────────────

/// Degrees of hue the rainbow moves per frame.
const PRIDE_SPEED: u64 = 1;
const PRIDE_LIGHTNESS: f64 = 0.5;

pub(super) fn pride(canvas: &mut Canvas) {
    let frame = canvas.frame();
    let brightness = (PRIDE_LIGHTNESS * 30.0) as u8;
    canvas.all().for_each(|i| {
        let hue = ((i as u64 + frame * PRIDE_SPEED) % 360) as f64;
        canvas.set(i, Color::from_hsl(hue, 1.0, PRIDE_LIGHTNESS), brightness);
    });
    let delay = canvas.pacing().pride;
    canvas.request_sleep(delay);
}

// ── Red/green sweep ──────────────────────────────────────────────────

const SWEEP_PERIOD: i64 = 25;
const SWEEP_MIN_BRIGHTNESS: u8 = 6;

/// Bands of `SWEEP_PERIOD` pixels alternate red and green and slide one
/// pixel per frame. Brightness ramps across each band.
pub(super) fn red_green_sweep(canvas: &mut Canvas) {
    let frame = canvas.frame() as i64;
    canvas.all().for_each(|i| {
        let offset = i as i64 - frame;
        // Truncating division, so bands mirror around the origin.
        let color = match (offset / SWEEP_PERIOD % 2).abs() {
            0 => Color::new(255, 0, 0),
            _ => Color::new(0, 255, 0),
        };
        let ramp = (offset % SWEEP_PERIOD).unsigned_abs() as u8;
        canvas.set(i, color, SWEEP_MIN_BRIGHTNESS + ramp);
    });
}

// ── Shamrock ─────────────────────────────────────────────────────────

const SHAMROCK_BAND: i64 = 16;
const SHAMROCK_BANDS: [Color; 4] = [
    Color::new(0, 0x70, 0),
    Color::WHITE,
    Color::new(0x80, 0x40, 0),
    Color::WHITE,
];

pub(super) fn shamrock(canvas: &mut Canvas) {
    let frame = canvas.frame() as i64;
    canvas.all().for_each(|i| {
        let band = ((i as i64 - frame) / SHAMROCK_BAND).unsigned_abs() % 4;
        canvas.set(i, SHAMROCK_BANDS[band as usize], MAX_BRIGHTNESS);
    });
    let delay = canvas.pacing().shamrock;
    canvas.request_sleep(delay);
}
