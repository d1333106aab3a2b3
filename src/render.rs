//! Render thread: owns the environment and drives the paint/transmit cycle.
//!
//! The environment sits behind one `Mutex`. The render thread holds it for
//! a whole cycle (paint, encode, transmit) and releases it before sleeping,
//! so a control-plane swap never waits behind an animation's delay.
//!
//! ## Rust concepts
//! - `Arc<Mutex<T>>` for the one shared, lock-protected handle
//! - `io::Result` and `?` to carry fatal bus errors out of the loop
//! - Generic `impl Transport` so tests can record frames instead of using SPI

use crate::animation::{Animation, AnimationId, Canvas};
use crate::color::Color;
use crate::frame::{FrameBuffer, MAX_BRIGHTNESS};
use crate::transport::Transport;
use crate::{Pacing, StripConfig, is_running};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::error::Error;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// The handle the render thread and the control plane share.
pub type SharedEnvironment = Arc<Mutex<Environment>>;

/// Lock the environment.
///
/// A panic anywhere aborts the process, so a poisoned lock is never observed
/// in production; if it is (tests), the state inside is still usable.
pub fn lock(env: &SharedEnvironment) -> MutexGuard<'_, Environment> {
    env.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Status ───────────────────────────────────────────────────────────

/// What the strip is doing, as reported to the control plane.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct EnvironmentStatus {
    /// Currently active animation
    pub animation: AnimationId,
    /// Animation that toggling on from `off` restores
    pub last_lit: AnimationId,
    /// Frames painted since startup
    pub frame: u64,
    /// Strip length
    pub pixels: usize,
    /// Server version
    pub version: String,
}

// ── Environment ──────────────────────────────────────────────────────

/// The root aggregate: frame buffer, frame counter and active animation.
///
/// Exactly one exists per process. The render loop mutates it every frame;
/// the control plane only ever swaps the active animation.
pub struct Environment {
    canvas: Canvas,
    animation: Animation,
    /// Last non-off animation selected.
    last_lit: AnimationId,
    /// Animation the most recent cycle painted, for logging changes.
    last_painted: Option<AnimationId>,
}

impl Environment {
    /// Start with `on` active, randomness seeded from the OS.
    pub fn new(config: StripConfig, pacing: Pacing, on: AnimationId) -> Self {
        Self::with_rng(config, pacing, on, StdRng::from_os_rng())
    }

    /// # Panics
    /// If the strip has no pixels.
    pub fn with_rng(config: StripConfig, pacing: Pacing, on: AnimationId, rng: StdRng) -> Self {
        let last_lit = match on {
            AnimationId::Off => AnimationId::Pride,
            lit => lit,
        };
        Self {
            canvas: Canvas::new(config.pixels, pacing, rng),
            animation: Animation::from(on),
            last_lit,
            last_painted: None,
        }
    }

    /// Wrap for sharing between the render thread and the control plane.
    pub fn shared(self) -> SharedEnvironment {
        Arc::new(Mutex::new(self))
    }

    pub fn active(&self) -> AnimationId {
        self.animation.id()
    }

    pub fn last_lit(&self) -> AnimationId {
        self.last_lit
    }

    pub fn frame(&self) -> u64 {
        self.canvas.frame()
    }

    pub fn pixels(&self) -> usize {
        self.canvas.len()
    }

    pub fn buffer(&self) -> &FrameBuffer {
        self.canvas.buffer()
    }

    /// Install a fresh `id` as the active animation and return the one it
    /// replaced. Re-selecting the active animation restarts it.
    pub fn select(&mut self, id: AnimationId) -> AnimationId {
        let previous = self.active();
        self.animation = Animation::from(id);
        self.canvas.mark_activation();
        if id != AnimationId::Off {
            self.last_lit = id;
        }
        tracing::info!("Animation selected: {} (was {})", id, previous);
        previous
    }

    /// Switch `off` to the last lit animation, anything else to `off`.
    /// Returns the newly active animation.
    pub fn toggle(&mut self) -> AnimationId {
        let next = match self.active() {
            AnimationId::Off => self.last_lit,
            _ => AnimationId::Off,
        };
        self.select(next);
        next
    }

    pub fn status(&self) -> EnvironmentStatus {
        EnvironmentStatus {
            animation: self.active(),
            last_lit: self.last_lit,
            frame: self.frame(),
            pixels: self.pixels(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Paint one frame with the active animation and transmit it.
    ///
    /// Returns the delay the animation asked for. A transmit error is
    /// returned as-is; the caller is expected to give up.
    pub fn cycle(&mut self, transport: &mut impl Transport) -> io::Result<Duration> {
        let id = self.active();
        if self.last_painted != Some(id) {
            tracing::info!("Painting {}", id);
            self.last_painted = Some(id);
        }

        self.canvas.begin_frame();
        self.animation.paint(&mut self.canvas);
        let delay = self.canvas.end_frame();

        transport.transmit(self.canvas.buffer().encode())?;
        Ok(delay)
    }

    /// Transmit an all-dark frame. The active animation is left alone.
    pub fn blank(&mut self, transport: &mut impl Transport) -> io::Result<()> {
        let buffer = self.canvas.buffer_mut();
        buffer.zero_all();
        transport.transmit(buffer.encode())
    }
}

// ── Render loop ──────────────────────────────────────────────────────

/// Main render loop: runs on a dedicated thread until `running` is cleared
/// or the transport fails.
///
/// On a clean stop the strip is blanked before returning.
pub fn render_loop(
    env: SharedEnvironment,
    mut transport: impl Transport,
    running: &AtomicBool,
) -> io::Result<()> {
    tracing::info!("Render thread started");

    while is_running(running) {
        // The guard is a temporary, so the lock is released before sleeping.
        let delay = lock(&env).cycle(&mut transport).inspect_err(|e| {
            tracing::error!("Transmit failed: {}", e);
        })?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    lock(&env).blank(&mut transport)?;
    tracing::info!("Render thread stopped, strip blanked");
    Ok(())
}

// ── Debug entry point ────────────────────────────────────────────────

/// Light `index` full white at maximum brightness, transmit once, and return.
///
/// Used to check wiring; bypasses the environment entirely.
pub fn light_single_pixel(
    config: StripConfig,
    index: usize,
    transport: &mut impl Transport,
) -> Result<(), Box<dyn Error>> {
    if index >= config.pixels {
        return Err(format!(
            "pixel {} out of range for a strip of {}",
            index, config.pixels
        )
        .into());
    }

    let mut buffer = FrameBuffer::new(config.pixels);
    buffer.set(index, Color::WHITE, MAX_BRIGHTNESS);
    transport.transmit(buffer.encode())?;
    tracing::info!("Lit pixel {} of {}", index, config.pixels);
    Ok(())
}
