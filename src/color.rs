//! Color model: HSL to RGB conversion and the 8-bit color triple.
//!
//! Animations think in hue/saturation/lightness and hand the frame buffer
//! plain 8-bit channels. The float→byte step truncates rather than rounds,
//! so colors stay bit-identical to what the strip has always shown.

// ── HSL ──────────────────────────────────────────────────────────────

/// Convert a hue/saturation/lightness color to RGB in `[0, 1]`.
///
/// `h` is in degrees and may be negative or above 360; it is wrapped into
/// `[0, 360)` with a floor-modulo first. `s` and `l` are in `[0, 1]`.
///
/// # Rust concept: tuples as return values
/// Returning `(f64, f64, f64)` keeps this a pure function with no output
/// parameters. Callers destructure with `let (r, g, b) = ...`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let chroma = if l <= 0.5 {
        2.0 * l * s
    } else {
        (2.0 - 2.0 * l) * s
    };
    let min = l - 0.5 * chroma;

    let h = (h - 360.0 * (h / 360.0).floor()) / 60.0;
    let x = chroma * (1.0 - (h - 2.0 * (h / 2.0).floor() - 1.0).abs());

    // `h` can land on exactly 6.0 for inputs a hair below zero; that is
    // the same sector as 0.
    match (h.floor() as i64).rem_euclid(6) {
        0 => (min + chroma, min + x, min),
        1 => (min + x, min + chroma, min),
        2 => (min, min + chroma, min + x),
        3 => (min, min + x, min + chroma),
        4 => (min + x, min, min + chroma),
        _ => (min + chroma, min, min + x),
    }
}

// ── Color ────────────────────────────────────────────────────────────

/// An 8-bit RGB triple as written to the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert an HSL color to 8-bit channels, truncating each `[0, 1]`
    /// component after scaling by 255.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self::new(to_channel(r), to_channel(g), to_channel(b))
    }
}

/// `as u8` on a float saturates and truncates toward zero, which is exactly
/// the conversion we want.
fn to_channel(value: f64) -> u8 {
    (value * 255.0) as u8
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn approx(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9 && (a.2 - b.2).abs() < 1e-9
    }

    #[rstest]
    #[case(0.0, (1.0, 0.0, 0.0))] // Red
    #[case(60.0, (1.0, 1.0, 0.0))] // Yellow
    #[case(120.0, (0.0, 1.0, 0.0))] // Green
    #[case(180.0, (0.0, 1.0, 1.0))] // Cyan
    #[case(240.0, (0.0, 0.0, 1.0))] // Blue
    #[case(300.0, (1.0, 0.0, 1.0))] // Magenta
    fn primary_hues_at_half_lightness(#[case] h: f64, #[case] expected: (f64, f64, f64)) {
        assert!(approx(hsl_to_rgb(h, 1.0, 0.5), expected));
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 0.25)]
    #[case(200.0, 0.5)]
    #[case(359.0, 1.0)]
    #[case(-45.0, 0.75)]
    fn zero_saturation_is_achromatic(#[case] h: f64, #[case] l: f64) {
        assert_eq!(hsl_to_rgb(h, 0.0, l), (l, l, l));
    }

    #[rstest]
    #[case(0.0)]
    #[case(25.0)]
    #[case(90.5)]
    #[case(181.25)]
    #[case(300.0)]
    #[case(-270.0)]
    fn hue_is_periodic(#[case] h: f64) {
        assert_eq!(hsl_to_rgb(h, 1.0, 0.4), hsl_to_rgb(h + 360.0, 1.0, 0.4));
    }

    #[test]
    fn negative_hue_wraps() {
        assert!(approx(hsl_to_rgb(-120.0, 1.0, 0.5), hsl_to_rgb(240.0, 1.0, 0.5)));
    }

    #[test]
    fn hue_just_below_zero_stays_red() {
        let (r, g, b) = hsl_to_rgb(-1e-20, 1.0, 0.5);
        assert!(r > 0.99);
        assert!(g < 0.01);
        assert!(b < 0.01);
    }

    #[test]
    fn from_hsl_truncates() {
        // r = 0.8 * 255 = 204; half lightness gives 127.5 → 127
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.4), Color::new(204, 0, 0));
        assert_eq!(Color::from_hsl(0.0, 0.0, 0.5), Color::new(127, 127, 127));
    }

    #[test]
    fn from_hsl_full_lightness_is_white() {
        assert_eq!(Color::from_hsl(123.0, 1.0, 1.0), Color::WHITE);
    }
}
