//! Animations that treat each roof section as a unit.
//!
//! State is one fixed-size record per section of [`ROOF`], allocated on the
//! first frame after activation.

use super::Canvas;
use crate::color::Color;
use crate::frame::MAX_BRIGHTNESS;
use crate::segment::ROOF;
use rand::Rng;
use std::f64::consts::TAU;

// ── Segment toggle ───────────────────────────────────────────────────

/// Frames a section holds its state is drawn from `0..MAX_HOLD`.
const MAX_HOLD: u32 = 20;
const TOGGLE_ON: (Color, u8) = (Color::new(255, 0, 0), 30);
const TOGGLE_OFF: (Color, u8) = (Color::new(0, 128, 0), 20);

#[derive(Clone, Copy, Debug, Default)]
struct Toggle {
    on: bool,
    countdown: u32,
}

/// Each section flips between red and green after a random hold. Pixels
/// outside the roof stay dark.
#[derive(Clone, Debug, Default)]
pub struct SegmentToggle {
    toggles: Option<[Toggle; ROOF.len()]>,
}

impl SegmentToggle {
    pub(super) fn paint(&mut self, canvas: &mut Canvas) {
        let toggles = self.toggles.get_or_insert_default();
        canvas.fill(Color::BLACK, 0);
        for (toggle, segment) in toggles.iter_mut().zip(&ROOF) {
            // The section shows the state it had coming into this frame;
            // a flip becomes visible on the next one.
            let on = toggle.on;
            if toggle.countdown == 0 {
                toggle.on = !on;
                toggle.countdown = canvas.rng().random_range(0..MAX_HOLD);
            } else {
                toggle.countdown -= 1;
            }
            let (color, brightness) = if on { TOGGLE_ON } else { TOGGLE_OFF };
            canvas.paint_segment(segment, color, brightness);
        }
    }
}

// ── Candy cane ───────────────────────────────────────────────────────

const CANE_RED: Color = Color::new(90, 0, 0);

#[derive(Clone, Copy, Debug, Default)]
struct Band {
    phase: f64,
    amplitude: f64,
    speed: f64,
}

/// Dark red strip with a white band swinging out from the start of each
/// section. Every section has its own random phase, reach and speed.
#[derive(Clone, Debug, Default)]
pub struct CandyCane {
    bands: Option<[Band; ROOF.len()]>,
}

impl CandyCane {
    pub(super) fn paint(&mut self, canvas: &mut Canvas) {
        let bands = self.bands.get_or_insert_with(|| {
            let rng = canvas.rng();
            std::array::from_fn(|_| Band {
                phase: rng.random::<f64>() * TAU,
                amplitude: f64::from(10 + rng.random_range(0..5u8)),
                speed: 0.1 + rng.random::<f64>() / 3.0,
            })
        });

        canvas.fill(CANE_RED, MAX_BRIGHTNESS / 7);

        let last = canvas.len() as isize - 1;
        for (band, segment) in bands.iter_mut().zip(&ROOF) {
            band.phase += band.speed;
            let start = segment.low as isize;
            let end = start + (band.amplitude * band.phase.cos()).round() as isize;
            let from = start.min(end).max(0);
            let to = start.max(end).min(last);
            for i in from..=to {
                canvas.set(i as usize, Color::WHITE, MAX_BRIGHTNESS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{canvas, run};
    use super::super::{Animation, AnimationId};
    use super::*;
    use crate::frame::Pixel;
    use pretty_assertions::assert_eq;

    fn section_pixel(c: &Canvas, n: usize) -> Pixel {
        c.buffer().get(ROOF[n].low + 1).unwrap()
    }

    #[test]
    fn toggle_first_frame_is_all_green() {
        // Every section starts off and flips on the first frame, but shows
        // the old state until the next one.
        let mut c = canvas(749);
        c.fill(Color::WHITE, 9);
        let mut toggle = SegmentToggle::default();
        toggle.paint(&mut c);
        // Off the roof is dark, whatever was there before.
        assert_eq!(c.buffer().get(0), Some(Pixel::default()));
        for n in 0..ROOF.len() {
            assert_eq!(
                section_pixel(&c, n),
                Pixel {
                    color: TOGGLE_OFF.0,
                    brightness: 20
                }
            );
        }
        assert!(toggle.toggles.unwrap().iter().all(|t| t.on));
    }

    #[test]
    fn toggle_flips_after_countdown() {
        let mut c = canvas(749);
        let mut toggle = SegmentToggle::default();
        toggle.paint(&mut c);
        let holds: Vec<u32> = toggle.toggles.unwrap().iter().map(|t| t.countdown).collect();

        // Section n stays red for holds[n] + 1 frames after the first.
        for frame in 1..=MAX_HOLD as usize + 1 {
            toggle.paint(&mut c);
            for (n, &hold) in holds.iter().enumerate() {
                if frame <= hold as usize + 1 {
                    assert_eq!(
                        section_pixel(&c, n).color,
                        TOGGLE_ON.0,
                        "section {n} frame {frame}"
                    );
                }
            }
        }
    }

    #[test]
    fn toggle_reinitializes_when_reinstalled() {
        let mut c = canvas(749);
        let mut animation = Animation::from(AnimationId::SegmentToggle);
        run(&mut animation, &mut c, 3);

        animation = Animation::from(AnimationId::SegmentToggle);
        let Animation::SegmentToggle(fresh) = &animation else {
            unreachable!()
        };
        assert!(fresh.toggles.is_none());
    }

    #[test]
    fn candy_cane_band_starts_at_section() {
        let mut c = canvas(749);
        let mut cane = CandyCane::default();
        cane.paint(&mut c);

        for segment in &ROOF {
            let start = c.buffer().get(segment.low).unwrap();
            assert_eq!(
                start,
                Pixel {
                    color: Color::WHITE,
                    brightness: 31
                }
            );
        }
        // Nothing outside the roof gets a band.
        assert_eq!(
            c.buffer().get(0),
            Some(Pixel {
                color: CANE_RED,
                brightness: 4
            })
        );
    }

    #[test]
    fn candy_cane_clamps_to_short_strip() {
        // The last sections start far beyond a 100 pixel strip.
        let mut c = canvas(100);
        let mut animation = Animation::from(AnimationId::CandyCane);
        run(&mut animation, &mut c, 200);
        assert_eq!(
            c.buffer().get(0),
            Some(Pixel {
                color: CANE_RED,
                brightness: 4
            })
        );
    }

    #[test]
    fn candy_cane_bands_are_randomized_once() {
        let mut c = canvas(749);
        let mut cane = CandyCane::default();
        cane.paint(&mut c);
        let first = cane.bands.unwrap();
        cane.paint(&mut c);
        let second = cane.bands.unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.amplitude, b.amplitude);
            assert!((10.0..15.0).contains(&a.amplitude));
            assert!((b.phase - a.phase - a.speed).abs() < 1e-12);
        }
    }
}
