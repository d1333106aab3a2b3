//! The paint context handed to an animation once per frame.

use crate::Pacing;
use crate::color::Color;
use crate::frame::FrameBuffer;
use crate::segment::Segment;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Everything an animation may touch while painting one frame: the frame
/// buffer, the shared frame counter, the delay request and a random source.
///
/// The active animation lives next to the canvas rather than inside it, so
/// `animation.paint(&mut canvas)` borrows the two independently.
pub struct Canvas {
    buffer: FrameBuffer,
    frame: u64,
    activated_at: u64,
    next_sleep: Duration,
    pacing: Pacing,
    rng: StdRng,
}

impl Canvas {
    /// # Panics
    /// If `pixels` is zero.
    pub fn new(pixels: usize, pacing: Pacing, rng: StdRng) -> Self {
        assert!(pixels > 0, "a strip needs at least one pixel");
        Self {
            buffer: FrameBuffer::new(pixels),
            frame: 0,
            activated_at: 0,
            next_sleep: Duration::ZERO,
            pacing,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The whole strip as a segment.
    pub fn all(&self) -> Segment {
        Segment::all(self.len())
    }

    /// Frames painted since the process started. Never reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames painted since the current animation was installed; zero on its
    /// first frame.
    pub fn frames_since_activation(&self) -> u64 {
        self.frame - self.activated_at
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Ask the render loop to wait `delay` after transmitting this frame.
    /// A later request in the same frame wins.
    pub fn request_sleep(&mut self, delay: Duration) {
        self.next_sleep = delay;
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// A uniformly random index on the strip.
    pub fn random_index(&mut self) -> usize {
        let len = self.len();
        self.rng.random_range(0..len)
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn set(&mut self, index: usize, color: Color, brightness: u8) {
        self.buffer.set(index, color, brightness);
    }

    pub fn maybe_set(&mut self, index: isize, color: Color, brightness: u8) {
        self.buffer.maybe_set(index, color, brightness);
    }

    /// Paint every pixel the same.
    pub fn fill(&mut self, color: Color, brightness: u8) {
        for index in 0..self.len() {
            self.set(index, color, brightness);
        }
    }

    /// Paint the part of `segment` that lies on this strip.
    pub fn paint_segment(&mut self, segment: &Segment, color: Color, brightness: u8) {
        segment.for_each(|index| {
            self.buffer
                .maybe_set(index.try_into().unwrap_or(isize::MAX), color, brightness);
        });
    }

    // ── Render loop hooks ─────────────────────────────────────────────

    pub(crate) fn begin_frame(&mut self) {
        self.next_sleep = Duration::ZERO;
    }

    /// Advance the frame counter and hand back the requested delay.
    pub(crate) fn end_frame(&mut self) -> Duration {
        self.frame += 1;
        self.next_sleep
    }

    pub(crate) fn mark_activation(&mut self) {
        self.activated_at = self.frame;
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Direction;
    use rand::SeedableRng;

    fn canvas(pixels: usize) -> Canvas {
        Canvas::new(pixels, Pacing::default(), StdRng::seed_from_u64(1))
    }

    #[test]
    fn paint_segment_clips_to_strip() {
        let mut c = canvas(10);
        c.paint_segment(&Segment::new(8, 20, Direction::East), Color::WHITE, 3);
        assert_eq!(c.buffer().get(7).map(|p| p.brightness), Some(0));
        assert_eq!(c.buffer().get(8).map(|p| p.brightness), Some(3));
        assert_eq!(c.buffer().get(9).map(|p| p.brightness), Some(3));
    }

    #[test]
    fn frame_hooks_track_activation_and_sleep() {
        let mut c = canvas(4);
        c.begin_frame();
        c.request_sleep(Duration::from_millis(5));
        c.request_sleep(Duration::from_millis(7));
        assert_eq!(c.end_frame(), Duration::from_millis(7));

        c.begin_frame();
        assert_eq!(c.end_frame(), Duration::ZERO);

        assert_eq!(c.frame(), 2);
        c.mark_activation();
        assert_eq!(c.frames_since_activation(), 0);
        c.begin_frame();
        c.end_frame();
        assert_eq!(c.frames_since_activation(), 1);
    }

    #[test]
    fn random_index_stays_on_strip() {
        let mut c = canvas(3);
        for _ in 0..100 {
            assert!(c.random_index() < 3);
        }
    }
}
