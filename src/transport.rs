//! Where encoded frames go.
//!
//! On the Pi that is the SPI bus (`hardware` feature). Tests and anything
//! else that wants to look at the output use [`RecordingTransport`].

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// A sink for complete, encoded frames.
///
/// # Rust concept: traits at the hardware boundary
/// The render loop only needs "send these bytes". Making that a trait
/// keeps the loop testable on any machine, the same way our `Color` type
/// keeps color logic independent of the bus driver.
pub trait Transport: Send {
    /// Send one frame. An error here is not retried.
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()>;
}

// ── SPI ──────────────────────────────────────────────────────────────

#[cfg(feature = "hardware")]
pub use spi::SpiTransport;

#[cfg(feature = "hardware")]
mod spi {
    use super::Transport;
    use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
    use std::io;
    use std::path::Path;

    /// An APA102 strip on a Linux spidev device (clock on SCLK, data on MOSI).
    pub struct SpiTransport {
        spi: Spidev,
    }

    impl SpiTransport {
        /// Open and configure `device` for APA102: SPI mode 3, 8-bit words.
        pub fn open(device: &Path, hz: u32) -> io::Result<Self> {
            let mut spi = Spidev::open(device)?;
            let options = SpidevOptions::new()
                .bits_per_word(8)
                .max_speed_hz(hz)
                .mode(SpiModeFlags::SPI_MODE_3)
                .build();
            spi.configure(&options)?;
            Ok(Self { spi })
        }
    }

    impl Transport for SpiTransport {
        fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
            // One transfer per frame, so the kernel never splits it.
            let mut transfer = SpidevTransfer::write(frame);
            self.spi.transfer(&mut transfer)
        }
    }
}

// ── Recording ────────────────────────────────────────────────────────

/// Keeps every transmitted frame in memory.
///
/// Clones share the same recording, so a test can hand one clone to the
/// render thread and inspect another.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
    fail_after: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose transmits start failing once `frames` frames have
    /// been recorded.
    pub fn failing_after(frames: usize) -> Self {
        Self {
            frames: Arc::default(),
            fail_after: Some(frames),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.recorded().len()
    }

    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.recorded().last().cloned()
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.recorded().clone()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for RecordingTransport {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        let mut frames = self.recorded();
        if self.fail_after.is_some_and(|limit| frames.len() >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "bus write failed"));
        }
        frames.push(frame.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clones_share_recording() {
        let recorder = RecordingTransport::new();
        let mut sender = recorder.clone();
        sender.transmit(&[1, 2, 3]).unwrap();
        sender.transmit(&[4]).unwrap();

        assert_eq!(recorder.frame_count(), 2);
        assert_eq!(recorder.last_frame(), Some(vec![4]));
        assert_eq!(recorder.frames(), vec![vec![1, 2, 3], vec![4]]);
    }

    #[test]
    fn failing_after_limit() {
        let mut transport = RecordingTransport::failing_after(1);
        transport.transmit(&[0]).unwrap();
        let err = transport.transmit(&[0]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(transport.frame_count(), 1);
    }
}
