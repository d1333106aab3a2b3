//! Animations that pick from fixed or random palettes.

use super::Canvas;
use crate::color::Color;
use crate::frame::MAX_BRIGHTNESS;
use crate::segment::ROOF;
use rand::Rng;

// ── Blink ────────────────────────────────────────────────────────────

const BLINK_ON: usize = 2;
const BLINK_OFF: usize = 5;
const BLINK_PALETTE: [Color; 4] = [
    Color::new(255, 0, 0),
    Color::new(255, 200, 0),
    Color::new(0, 255, 0),
    Color::new(0, 0, 255),
];

/// Runs of `BLINK_ON` lit pixels separated by `BLINK_OFF` dark ones. Each
/// run takes the next palette color and a fresh random brightness, so the
/// strip twinkles in place.
pub(super) fn blink(canvas: &mut Canvas) {
    let mut slot = 0;
    let mut brightness = 0;
    for i in canvas.all().indices() {
        let phase = i % (BLINK_ON + BLINK_OFF);
        if phase >= BLINK_ON {
            canvas.set(i, Color::BLACK, 0);
            continue;
        }
        if phase == 0 {
            slot = (slot + 1) % BLINK_PALETTE.len();
            brightness = 10 + canvas.rng().random_range(0..20);
        }
        canvas.set(i, BLINK_PALETTE[slot], brightness);
    }
}

// ── Two-tone ─────────────────────────────────────────────────────────

/// Roof sections alternate between two team colors. Pixels outside the
/// roof stay dark.
pub(super) fn two_tone(canvas: &mut Canvas) {
    canvas.fill(Color::BLACK, 0);
    for (n, segment) in ROOF.iter().enumerate() {
        let (color, brightness) = if n % 2 == 0 {
            (Color::new(0, 0, 30), MAX_BRIGHTNESS / 3 * 2)
        } else {
            (Color::new(0, 167, 1), MAX_BRIGHTNESS / 3)
        };
        canvas.paint_segment(segment, color, brightness);
    }
    let delay = canvas.pacing().two_tone;
    canvas.request_sleep(delay);
}

// ── Snowfall ─────────────────────────────────────────────────────────

const SKY: Color = Color::new(0, 0, 128);
const FLAKE: Color = Color::new(254, 254, 254);
const SKY_REPAINT_FRAMES: u64 = 2048;

pub(super) fn snowfall(canvas: &mut Canvas) {
    if canvas.frames_since_activation() % SKY_REPAINT_FRAMES == 0 {
        canvas.fill(SKY, MAX_BRIGHTNESS);
    }
    for _ in 0..10 {
        let i = canvas.random_index();
        canvas.set(i, FLAKE, MAX_BRIGHTNESS / 2);
    }
    for _ in 0..20 {
        let i = canvas.random_index();
        canvas.set(i, FLAKE, MAX_BRIGHTNESS);
    }
    for _ in 0..10 {
        let i = canvas.random_index();
        canvas.set(i, SKY, MAX_BRIGHTNESS);
    }
}

// ── Ember ────────────────────────────────────────────────────────────

const EMBER_HUE: f64 = 25.0;
const EMBER_BRIGHTNESS: u8 = 10;

pub(super) fn ember(canvas: &mut Canvas) {
    for i in canvas.all().indices() {
        if i % 2 == 1 {
            canvas.set(i, Color::BLACK, 0);
            continue;
        }
        let lightness = if canvas.rng().random_range(0..10) == 0 {
            0.6
        } else {
            0.4
        };
        canvas.set(i, Color::from_hsl(EMBER_HUE, 1.0, lightness), EMBER_BRIGHTNESS);
    }
}

// ── Wreath ───────────────────────────────────────────────────────────

const WREATH_GREEN: Color = Color::new(0, 90, 0);
const WREATH_LIGHTS: [Color; 4] = [
    Color::new(255, 0, 0),
    Color::new(255, 255, 0),
    Color::new(0, 0, 255),
    Color::new(255, 0, 255),
];

/// Dark green garland with a colored light on every eighth pixel.
///
/// The garland is painted once per activation; after that only the lights
/// change.
#[derive(Clone, Debug, Default)]
pub struct Wreath {
    garland_painted: bool,
}

impl Wreath {
    pub(super) fn paint(&mut self, canvas: &mut Canvas) {
        if !self.garland_painted {
            canvas.fill(WREATH_GREEN, MAX_BRIGHTNESS / 7);
            self.garland_painted = true;
        }
        let frame = canvas.frame();
        for i in canvas.all().indices().step_by(8) {
            let light = ((frame + i as u64) / 10 % 4) as usize;
            canvas.set(i, WREATH_LIGHTS[light], MAX_BRIGHTNESS);
        }
    }
}

// ── Party ────────────────────────────────────────────────────────────

pub const DEFAULT_MIN_HUE_DELTA: f64 = 20.0;
const PARTY_RUN: usize = 10;

/// Runs of `PARTY_RUN` pixels in random hues that rotate along the strip.
///
/// Each new hue lands at least `min_hue_delta` degrees (shortest arc) away
/// from the previous one, so neighboring runs never look alike.
#[derive(Clone, Debug)]
pub struct Party {
    min_hue_delta: f64,
    hue: f64,
}

impl Default for Party {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_HUE_DELTA)
    }
}

impl Party {
    /// # Panics
    /// If `min_hue_delta` is not in `[0, 180]`.
    pub fn new(min_hue_delta: f64) -> Self {
        assert!(
            (0.0..=180.0).contains(&min_hue_delta),
            "minimum hue delta must be within [0, 180]"
        );
        Self {
            min_hue_delta,
            hue: 0.0,
        }
    }

    /// Draw the next hue, in `[0, 360]`.
    pub fn next_hue(&mut self, rng: &mut impl Rng) -> f64 {
        let spread = 360.0 - self.min_hue_delta * 2.0;
        self.hue += self.min_hue_delta + rng.random::<f64>() * spread;
        while self.hue > 360.0 {
            self.hue -= 360.0;
        }
        self.hue
    }

    pub(super) fn paint(&mut self, canvas: &mut Canvas) {
        let len = canvas.len() as u64;
        let shift = canvas.frame() % len * 3;
        let mut color = Color::BLACK;
        for i in canvas.all().indices() {
            if i % PARTY_RUN == 0 {
                let hue = self.next_hue(canvas.rng());
                color = Color::from_hsl(hue, 1.0, 0.5);
            }
            let target = (i as u64 + shift) % len;
            canvas.set(target as usize, color, MAX_BRIGHTNESS);
        }
        let delay = canvas.pacing().party;
        canvas.request_sleep(delay);
    }
}
