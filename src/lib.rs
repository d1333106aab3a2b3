//! Animation engine for an APA102 LED strip.
//!
//! The crate is split the way data flows through it:
//! - `color`: HSL → 8-bit RGB
//! - `frame`: the wire-format frame buffer
//! - `segment`: named pixel ranges on the installation
//! - `animation`: the library of per-frame painters
//! - `render`: the environment and its paint/transmit loop
//! - `transport`: where encoded frames go (SPI on the Pi)
//! - `server`: the HTTP control plane
//! - `watchdog`: exit when the binary on disk is replaced
//!
//! This file holds the shared configuration types and the Ctrl+C helpers.

pub mod animation;
pub mod color;
pub mod frame;
pub mod render;
pub mod segment;
pub mod server;
pub mod transport;
pub mod watchdog;

pub use animation::{Animation, AnimationId};
pub use color::{Color, hsl_to_rgb};
pub use frame::{FrameBuffer, MAX_BRIGHTNESS};
pub use render::{Environment, SharedEnvironment};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// ── Strip configuration ────────────────────────────────────────────

/// Physical strip parameters fixed at startup.
///
/// # Rust concept: derive macros
/// `Clone, Copy` make this cheaply copyable, and there is no hidden global:
/// the config is passed explicitly to whatever needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripConfig {
    /// Number of LEDs on the strip.
    pub pixels: usize,
}

impl StripConfig {
    pub fn new(pixels: usize) -> Self {
        Self { pixels }
    }

    /// Size in bytes of one encoded frame.
    pub fn frame_byte_count(&self) -> usize {
        4 + self.pixels * 4 + frame::stop_byte_count(self.pixels)
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self { pixels: 46 * 4 }
    }
}

// ── Pacing ─────────────────────────────────────────────────────────

/// Inter-frame delays that individual animations request.
///
/// Animations without an entry here run flat out, paced only by the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub off: Duration,
    pub pride: Duration,
    pub shamrock: Duration,
    pub two_tone: Duration,
    pub party: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            off: Duration::from_millis(200),
            pride: Duration::from_millis(30),
            shamrock: Duration::from_millis(16),
            two_tone: Duration::from_millis(300),
            party: Duration::from_millis(300),
        }
    }
}

// ── Signal handling ────────────────────────────────────────────────

/// Set up a Ctrl+C handler that sets `running` to false.
///
/// # Rust concept: Arc and AtomicBool
/// The render thread polls the flag once per frame; the signal handler
/// flips it. `Arc` shares ownership, `AtomicBool` makes the flag itself
/// thread-safe without a mutex.
pub fn setup_signal_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    Ok(running)
}

/// Check if the render loop should keep running.
pub fn is_running(running: &AtomicBool) -> bool {
    running.load(Ordering::SeqCst)
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn strip_config_default_is_184() {
        assert_eq!(StripConfig::default().pixels, 184);
    }

    #[rstest]
    #[case(8, 4 + 32 + 2)]
    #[case(184, 4 + 736 + 13)]
    #[case(100, 4 + 400 + 8)]
    fn test_frame_byte_count(#[case] pixels: usize, #[case] expected: usize) {
        assert_eq!(StripConfig::new(pixels).frame_byte_count(), expected);
        assert_eq!(FrameBuffer::new(pixels).encode().len(), expected);
    }

    #[test]
    fn pacing_defaults() {
        let pacing = Pacing::default();
        assert_eq!(pacing.pride, Duration::from_millis(30));
        assert_eq!(pacing.shamrock, Duration::from_millis(16));
        assert_eq!(pacing.off, Duration::from_millis(200));
        assert_eq!(pacing.two_tone, Duration::from_millis(300));
        assert_eq!(pacing.party, Duration::from_millis(300));
    }

    #[test]
    fn is_running_reads_flag() {
        let flag = AtomicBool::new(true);
        assert!(is_running(&flag));
        flag.store(false, Ordering::SeqCst);
        assert!(!is_running(&flag));
    }
}
