//! Named pixel ranges on the physical installation.
//!
//! Segments are static data: a contiguous, inclusive run of pixel indices
//! plus the direction that run faces. They overlap freely ("all east glass"
//! covers each individual panel) and may reach past the end of a shorter
//! strip, so code painting a named segment goes through the tolerant
//! `maybe_set` path.

use std::ops::RangeInclusive;

/// Which way a run of pixels faces. Descriptive only; no animation reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// An inclusive range `[low, high]` of pixel indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub low: usize,
    pub high: usize,
    pub direction: Direction,
}

impl Segment {
    pub const fn new(low: usize, high: usize, direction: Direction) -> Self {
        assert!(low <= high, "segment low must not exceed high");
        Self {
            low,
            high,
            direction,
        }
    }

    /// The whole strip of `pixels` LEDs.
    ///
    /// # Panics
    /// If `pixels` is zero.
    pub const fn all(pixels: usize) -> Self {
        Self::new(0, pixels - 1, Direction::North)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.low..=self.high
    }

    /// Call `f` for every index in the segment, ascending.
    pub fn for_each(&self, f: impl FnMut(usize)) {
        self.indices().for_each(f);
    }

    pub fn len(&self) -> usize {
        self.high - self.low + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

// ── Installation layout ─────────────────────────────────────────────
//
// Index 0 starts at the deck. Pixels 22..=81 run along the deck wall,
// which nothing lights as a unit. East glass panels count up toward the
// front of the house; front panels are numbered right to left when facing
// the house, so panel 5 has the lowest indices.

pub const EAST_GLASS: [Segment; 8] = [
    Segment::new(82, 126, Direction::South),
    Segment::new(127, 167, Direction::South),
    Segment::new(168, 212, Direction::South),
    Segment::new(213, 255, Direction::South),
    Segment::new(256, 299, Direction::South),
    Segment::new(300, 341, Direction::South),
    Segment::new(342, 385, Direction::South),
    Segment::new(386, 429, Direction::South),
];

pub const FRONT_GLASS: [Segment; 5] = [
    Segment::new(430, 462, Direction::West),
    Segment::new(463, 501, Direction::West),
    Segment::new(502, 538, Direction::West),
    Segment::new(539, 575, Direction::West),
    Segment::new(576, 612, Direction::West),
];
pub const ALL_FRONT_GLASS: Segment = Segment::new(430, 612, Direction::West);

pub const DOOR_GLASS: Segment = Segment::new(613, 654, Direction::North);
pub const FRONT_WOOD: Segment = Segment::new(655, 705, Direction::West);
pub const WEST_WALL: Segment = Segment::new(706, 748, Direction::North);

/// Every individually lit section of the roof line, in strip order.
pub const ROOF: [Segment; 16] = [
    EAST_GLASS[0],
    EAST_GLASS[1],
    EAST_GLASS[2],
    EAST_GLASS[3],
    EAST_GLASS[4],
    EAST_GLASS[5],
    EAST_GLASS[6],
    EAST_GLASS[7],
    FRONT_GLASS[0],
    FRONT_GLASS[1],
    FRONT_GLASS[2],
    FRONT_GLASS[3],
    FRONT_GLASS[4],
    DOOR_GLASS,
    FRONT_WOOD,
    WEST_WALL,
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn for_each_visits_inclusive_range_ascending() {
        let mut seen = Vec::new();
        Segment::new(3, 6, Direction::East).for_each(|i| seen.push(i));
        assert_eq!(seen, vec![3, 4, 5, 6]);
    }

    #[test]
    fn single_pixel_segment() {
        let seg = Segment::new(9, 9, Direction::West);
        assert_eq!(seg.len(), 1);
        assert_eq!(seg.indices().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn all_covers_strip() {
        let all = Segment::all(184);
        assert_eq!((all.low, all.high, all.len()), (0, 183, 184));
    }

    #[test]
    fn front_glass_span_covers_its_panels() {
        for seg in FRONT_GLASS {
            assert!(ALL_FRONT_GLASS.low <= seg.low && seg.high <= ALL_FRONT_GLASS.high);
        }
    }

    #[test]
    fn roof_starts_after_deck_wall() {
        assert_eq!(ROOF[0].low, 82);
        assert_eq!(ROOF[ROOF.len() - 1].high, 748);
    }

    #[test]
    fn roof_sections_are_contiguous() {
        for pair in ROOF.windows(2) {
            assert_eq!(pair[0].high + 1, pair[1].low);
        }
    }
}
