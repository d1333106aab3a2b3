//! Frame buffer in APA102 wire layout.
//!
//! The buffer *is* the bytes we clock out on the bus, so encoding a frame
//! is a borrow, not a copy:
//!
//! ```text
//! 00 00 00 00                      start marker
//! E0|a  B  G  R   × pixels         a = 5-bit global brightness
//! FF FF …                          stop marker, ceil(N/16) + 1 bytes
//! ```

use crate::color::Color;

/// Maximum value of the 5-bit per-pixel brightness field.
pub const MAX_BRIGHTNESS: u8 = 31;

const START_BYTES: usize = 4;
const BYTES_PER_PIXEL: usize = 4;
const BRIGHTNESS_PREFIX: u8 = 0b1110_0000;
const STOP_MARKER: u8 = 0xff;

/// Number of trailing `0xFF` bytes needed to clock a strip of `pixels` LEDs.
pub fn stop_byte_count(pixels: usize) -> usize {
    pixels.div_ceil(16) + 1
}

/// One pixel as stored in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub color: Color,
    pub brightness: u8,
}

/// Fixed-size, always-valid frame for a strip of `len()` pixels.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pixels: usize,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate and initialize a buffer for `pixels` LEDs, all off.
    pub fn new(pixels: usize) -> Self {
        let mut buffer = Self {
            pixels,
            bytes: vec![0; START_BYTES + pixels * BYTES_PER_PIXEL + stop_byte_count(pixels)],
        };
        buffer.initialize();
        buffer
    }

    /// Write the stop marker and turn every pixel off.
    ///
    /// `new` already calls this; the stop marker never changes afterwards.
    fn initialize(&mut self) {
        let stop = START_BYTES + self.pixels * BYTES_PER_PIXEL;
        self.bytes[stop..].fill(STOP_MARKER);
        self.zero_all();
    }

    pub fn len(&self) -> usize {
        self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels == 0
    }

    /// Set pixel `index`.
    ///
    /// # Panics
    /// If `brightness > 31` or `index >= len()`. Both are bugs in the caller,
    /// never runtime conditions.
    pub fn set(&mut self, index: usize, color: Color, brightness: u8) {
        assert!(
            brightness <= MAX_BRIGHTNESS,
            "brightness {brightness} too high; max is {MAX_BRIGHTNESS}"
        );
        assert!(
            index < self.pixels,
            "pixel {index} out of range for a strip of {}",
            self.pixels
        );
        let offset = START_BYTES + index * BYTES_PER_PIXEL;
        self.bytes[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&[
            BRIGHTNESS_PREFIX | brightness,
            color.b,
            color.g,
            color.r,
        ]);
    }

    /// Like [`set`](Self::set), but indices off either end of the strip are
    /// ignored. Brightness is still checked.
    pub fn maybe_set(&mut self, index: isize, color: Color, brightness: u8) {
        if let Ok(index) = usize::try_from(index)
            && index < self.pixels
        {
            self.set(index, color, brightness);
        }
    }

    /// Turn every pixel off. Framing bytes are untouched.
    pub fn zero_all(&mut self) {
        for index in 0..self.pixels {
            self.set(index, Color::BLACK, 0);
        }
    }

    /// Read back pixel `index`, or `None` past the end of the strip.
    pub fn get(&self, index: usize) -> Option<Pixel> {
        if index >= self.pixels {
            return None;
        }
        let offset = START_BYTES + index * BYTES_PER_PIXEL;
        let entry = &self.bytes[offset..offset + BYTES_PER_PIXEL];
        Some(Pixel {
            color: Color::new(entry[3], entry[2], entry[1]),
            brightness: entry[0] & !BRIGHTNESS_PREFIX,
        })
    }

    /// The complete frame exactly as it goes out on the bus.
    pub fn encode(&self) -> &[u8] {
        &self.bytes
    }
}

// ── Tests ──────────────────────────────────────────────────────────
