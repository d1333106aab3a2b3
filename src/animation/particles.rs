//! Animations built from short-lived moving entities.
//!
//! Both keep their entities in storage sized once up front: growers in a
//! fixed-capacity `heapless::Vec`, particles and the light accumulator in
//! vectors allocated on the first frame and reused for every burst.

use super::Canvas;
use crate::color::Color;
use crate::frame::MAX_BRIGHTNESS;
use crate::segment::{ALL_FRONT_GLASS, Segment};
use rand::Rng;

// ── Color-plosion ────────────────────────────────────────────────────

const MAX_GROWERS: usize = 10;
const GROWTH_PER_FRAME: usize = 2;
const MAX_RADIUS: usize = 80;

/// A ring of color expanding from `origin`.
#[derive(Clone, Copy, Debug)]
struct Grower {
    origin: usize,
    radius: usize,
    color: Color,
}

/// Solid-colored rings expand from random points and paint over each other.
/// A new ring starts every frame while fewer than `MAX_GROWERS` are alive.
#[derive(Clone, Debug, Default)]
pub struct ColorPlosion {
    started: bool,
    /// Oldest first, so newer rings paint over older ones.
    growers: heapless::Vec<Grower, MAX_GROWERS>,
}

impl ColorPlosion {
    pub(super) fn paint(&mut self, canvas: &mut Canvas) {
        if !self.started {
            canvas.fill(Color::BLACK, 0);
            self.growers.clear();
            self.started = true;
        }

        if !self.growers.is_full() {
            let origin = canvas.random_index();
            let hue = canvas.rng().random::<f64>() * 360.0;
            let grower = Grower {
                origin,
                radius: 0,
                color: Color::from_hsl(hue, 1.0, 0.5),
            };
            if self.growers.push(grower).is_err() {
                unreachable!("grower pushed onto a full set");
            }
        }

        self.growers.retain_mut(|grower| {
            grower.radius += GROWTH_PER_FRAME;
            grower.radius <= MAX_RADIUS
        });

        for grower in &self.growers {
            let origin = grower.origin as isize;
            for step in 0..=grower.radius as isize {
                canvas.maybe_set(origin + step, grower.color, MAX_BRIGHTNESS);
                canvas.maybe_set(origin - step, grower.color, MAX_BRIGHTNESS);
            }
        }
    }
}

// ── Fireworks ────────────────────────────────────────────────────────

const PARTICLES: usize = 1000;
/// Bursts run while progress is within `[1, MAX_PROGRESS]`.
const MAX_PROGRESS: f64 = 8.0;
const PROGRESS_STEP: f64 = 0.3;
const INITIAL_GLOW: f64 = 0.05;
const GLOW_DECAY: f64 = 0.0015;
/// Particles fly out up to this many pixels per unit of `ln(progress)`.
const SPREAD: f64 = 70.0;

#[derive(Clone, Copy, Debug)]
struct Particle {
    /// Signed distance scale; never within 1 of zero.
    amplitude: f64,
    /// Per-particle speed multiplier in `[1, 7/6)`.
    scatter: f64,
}

#[derive(Clone, Debug)]
struct Burst {
    origin: usize,
    hue: f64,
    /// Outside `[1, MAX_PROGRESS]` means "start a new burst".
    progress: f64,
    /// Light each particle adds to the pixel it is over.
    glow: f64,
    particles: Vec<Particle>,
    light: Vec<f64>,
}

impl Burst {
    fn new(pixels: usize) -> Self {
        Self {
            origin: 0,
            hue: 0.0,
            progress: 0.0,
            glow: 0.0,
            particles: Vec::with_capacity(PARTICLES),
            light: vec![0.0; pixels],
        }
    }

    fn ignite(&mut self, span: Segment, rng: &mut impl Rng) {
        self.origin = rng.random_range(span.indices());
        self.hue = f64::from(rng.random_range(0..360u16));
        self.progress = 1.0;
        self.glow = INITIAL_GLOW;
        self.particles.clear();
        for _ in 0..PARTICLES {
            let amplitude = (rng.random::<f64>() - 0.5) * 2.0 * SPREAD;
            self.particles.push(Particle {
                amplitude: amplitude + 1f64.copysign(amplitude),
                scatter: 1.0 + rng.random::<f64>() / 6.0,
            });
        }
    }
}

/// One burst at a time: particles fly out from a point on the front glass,
/// slowing logarithmically, and the burst fades as it spreads. Pixel
/// lightness comes from how many particles are over it.
#[derive(Clone, Debug, Default)]
pub struct Fireworks {
    burst: Option<Burst>,
}

impl Fireworks {
    pub(super) fn paint(&mut self, canvas: &mut Canvas) {
        let pixels = canvas.len();
        // Bursts launch from the front glass when the strip reaches it.
        let span = if ALL_FRONT_GLASS.high < pixels {
            ALL_FRONT_GLASS
        } else {
            canvas.all()
        };

        let burst = self.burst.get_or_insert_with(|| Burst::new(pixels));
        if !(1.0..=MAX_PROGRESS).contains(&burst.progress) {
            burst.ignite(span, canvas.rng());
        }

        burst.progress += PROGRESS_STEP;
        burst.glow = (burst.glow - GLOW_DECAY).max(0.0);

        burst.light.fill(0.0);
        let reach = burst.progress.ln();
        for particle in &burst.particles {
            let x = burst.origin as f64 + reach * particle.amplitude * particle.scatter;
            // Truncates toward zero.
            let x = x as isize;
            if let Ok(x) = usize::try_from(x)
                && x < pixels
            {
                burst.light[x] += burst.glow;
            }
        }

        for (i, &light) in burst.light.iter().enumerate() {
            let lightness = light.min(1.0);
            let color = Color::from_hsl(burst.hue, 1.0, lightness);
            canvas.set(i, color, (lightness * 30.0) as u8);
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

    fn lit(c: &Canvas) -> usize {
        (0..c.len())
            .filter(|&i| c.buffer().get(i).unwrap().brightness > 0)
            .count()
    }

    #[test]
    fn color_plosion_first_frame_clears_and_spawns_one_ring() {
        let mut c = canvas(184);
        c.fill(Color::WHITE, 9);
        let mut plosion = ColorPlosion::default();
        plosion.paint(&mut c);

        assert_eq!(plosion.growers.len(), 1);
        assert_eq!(plosion.growers[0].radius, GROWTH_PER_FRAME);
        // Radius 2 lights at most 5 pixels; everything else was cleared.
        let count = lit(&c);
        assert!((3..=5).contains(&count), "{count} lit");
    }

    #[test]
    fn color_plosion_caps_growers() {
        let mut c = canvas(184);
        let mut plosion = ColorPlosion::default();
        for _ in 0..200 {
            plosion.paint(&mut c);
            assert!(plosion.growers.len() <= MAX_GROWERS);
            assert!(plosion.growers.iter().all(|g| g.radius <= MAX_RADIUS));
        }
        assert_eq!(plosion.growers.len(), MAX_GROWERS);
    }

    #[test]
    fn color_plosion_retires_old_rings() {
        let mut c = canvas(184);
        let mut plosion = ColorPlosion::default();
        // Rings spawn on frames 1..=10; the first reaches radius 82 on
        // frame 41 and is dropped before a replacement can spawn.
        for _ in 0..40 {
            plosion.paint(&mut c);
        }
        assert_eq!(plosion.growers.len(), MAX_GROWERS);
        assert_eq!(plosion.growers[0].radius, MAX_RADIUS);

        plosion.paint(&mut c);
        assert_eq!(plosion.growers.len(), MAX_GROWERS - 1);
        assert_eq!(plosion.growers[0].radius, MAX_RADIUS);
    }

    #[test]
    fn color_plosion_ring_spills_past_ends() {
        let mut c = canvas(3);
        let mut animation = Animation::from(AnimationId::ColorPlosion);
        run(&mut animation, &mut c, 50);
        assert_eq!(lit(&c), 3);
    }

    #[test]
    fn fireworks_first_frame_ignites() {
        let mut c = canvas(749);
        let mut fireworks = Fireworks::default();
        fireworks.paint(&mut c);

        let burst = fireworks.burst.as_ref().unwrap();
        assert!((ALL_FRONT_GLASS.low..=ALL_FRONT_GLASS.high).contains(&burst.origin));
        assert_eq!(burst.particles.len(), PARTICLES);
        assert!((burst.progress - (1.0 + PROGRESS_STEP)).abs() < 1e-12);
        assert!(burst.particles.iter().all(|p| p.amplitude.abs() >= 1.0));
        assert!(burst.particles.iter().all(|p| (1.0..7.0 / 6.0).contains(&p.scatter)));
    }

    #[test]
    fn fireworks_light_tracks_particle_density() {
        let mut c = canvas(749);
        let mut fireworks = Fireworks::default();
        fireworks.paint(&mut c);
        let burst = fireworks.burst.as_ref().unwrap();

        // Every particle landed on the strip this early in the burst.
        let total: f64 = burst.light.iter().sum();
        let expected = PARTICLES as f64 * (INITIAL_GLOW - GLOW_DECAY);
        assert!((total - expected).abs() < 1e-6);

        // Dark pixels are exactly where no particle is.
        for (i, &light) in burst.light.iter().enumerate() {
            if light == 0.0 {
                assert_eq!(c.buffer().get(i), Some(Pixel::default()));
            }
        }
    }

    #[test]
    fn fireworks_relaunch_after_burst_ends() {
        let mut c = canvas(749);
        let mut fireworks = Fireworks::default();
        // 1.0 + 0.3k exceeds 8.0 after 24 frames; the 25th relaunches.
        for _ in 0..24 {
            fireworks.paint(&mut c);
        }
        let progress = fireworks.burst.as_ref().unwrap().progress;
        assert!(progress > MAX_PROGRESS);

        fireworks.paint(&mut c);
        let burst = fireworks.burst.as_ref().unwrap();
        assert!((burst.progress - (1.0 + PROGRESS_STEP)).abs() < 1e-12);
        assert!((burst.glow - (INITIAL_GLOW - GLOW_DECAY)).abs() < 1e-12);
    }

    #[test]
    fn fireworks_fall_back_to_whole_strip() {
        let mut c = canvas(184);
        let mut fireworks = Fireworks::default();
        fireworks.paint(&mut c);
        assert!(fireworks.burst.as_ref().unwrap().origin < 184);
        assert!(lit(&c) > 0);
    }
}
