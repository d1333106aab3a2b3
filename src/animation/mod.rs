//! The animation library.
//!
//! Every animation is a variant of one enum. Stateless animations are bare
//! variants; stateful ones carry their own state struct, which starts empty
//! and is filled in on the first `paint` after the animation is installed.
//! Installing an animation always builds a fresh value from its
//! [`AnimationId`], so re-selecting one re-runs its setup.
//!
//! # Rust concept: enums as tagged unions
//! A `match` on `Animation` replaces dynamic dispatch through a trait
//! object: no boxing, and the compiler checks every variant is handled.

mod canvas;
mod palette;
mod particles;
mod segments;
mod sweep;

pub use canvas::Canvas;
pub use palette::{Party, Wreath};
pub use particles::{ColorPlosion, Fireworks};
pub use segments::{CandyCane, SegmentToggle};

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Ids ──────────────────────────────────────────────────────────────

/// Name of an animation, without its state.
///
/// This is what the control plane and the CLI speak.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum AnimationId {
    /// All pixels dark
    Off,
    /// Rainbow sweeping along the strip
    Pride,
    /// Red and green bands sliding along the strip
    RedGreenSweep,
    /// Short runs of colored lights separated by dark gaps
    Blink,
    /// Each roof section flips between red and green at random
    SegmentToggle,
    /// Dark red with a white band swinging on each roof section
    CandyCane,
    /// Rings of color expanding from random points
    ColorPlosion,
    /// Particle bursts over the front glass
    Fireworks,
    /// Alternating blue and green roof sections
    TwoTone,
    /// White flakes on a deep blue sky
    Snowfall,
    /// Runs of random, clearly distinct hues
    Party,
    /// Dark green with colored lights every eighth pixel
    Wreath,
    /// Flickering orange on every other pixel
    Ember,
    /// Green, white and orange bands
    Shamrock,
}

impl AnimationId {
    pub const ALL: [Self; 14] = [
        Self::Off,
        Self::Pride,
        Self::RedGreenSweep,
        Self::Blink,
        Self::SegmentToggle,
        Self::CandyCane,
        Self::ColorPlosion,
        Self::Fireworks,
        Self::TwoTone,
        Self::Snowfall,
        Self::Party,
        Self::Wreath,
        Self::Ember,
        Self::Shamrock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Pride => "pride",
            Self::RedGreenSweep => "red_green_sweep",
            Self::Blink => "blink",
            Self::SegmentToggle => "segment_toggle",
            Self::CandyCane => "candy_cane",
            Self::ColorPlosion => "color_plosion",
            Self::Fireworks => "fireworks",
            Self::TwoTone => "two_tone",
            Self::Snowfall => "snowfall",
            Self::Party => "party",
            Self::Wreath => "wreath",
            Self::Ember => "ember",
            Self::Shamrock => "shamrock",
        }
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Animations ───────────────────────────────────────────────────────

/// An animation together with its private state.
#[derive(Clone, Debug)]
pub enum Animation {
    Off,
    Pride,
    RedGreenSweep,
    Blink,
    SegmentToggle(SegmentToggle),
    CandyCane(CandyCane),
    ColorPlosion(ColorPlosion),
    Fireworks(Fireworks),
    TwoTone,
    Snowfall,
    Party(Party),
    Wreath(Wreath),
    Ember,
    Shamrock,
}

impl From<AnimationId> for Animation {
    fn from(id: AnimationId) -> Self {
        match id {
            AnimationId::Off => Self::Off,
            AnimationId::Pride => Self::Pride,
            AnimationId::RedGreenSweep => Self::RedGreenSweep,
            AnimationId::Blink => Self::Blink,
            AnimationId::SegmentToggle => Self::SegmentToggle(SegmentToggle::default()),
            AnimationId::CandyCane => Self::CandyCane(CandyCane::default()),
            AnimationId::ColorPlosion => Self::ColorPlosion(ColorPlosion::default()),
            AnimationId::Fireworks => Self::Fireworks(Fireworks::default()),
            AnimationId::TwoTone => Self::TwoTone,
            AnimationId::Snowfall => Self::Snowfall,
            AnimationId::Party => Self::Party(Party::default()),
            AnimationId::Wreath => Self::Wreath(Wreath::default()),
            AnimationId::Ember => Self::Ember,
            AnimationId::Shamrock => Self::Shamrock,
        }
    }
}

impl Animation {
    pub fn id(&self) -> AnimationId {
        match self {
            Self::Off => AnimationId::Off,
            Self::Pride => AnimationId::Pride,
            Self::RedGreenSweep => AnimationId::RedGreenSweep,
            Self::Blink => AnimationId::Blink,
            Self::SegmentToggle(_) => AnimationId::SegmentToggle,
            Self::CandyCane(_) => AnimationId::CandyCane,
            Self::ColorPlosion(_) => AnimationId::ColorPlosion,
            Self::Fireworks(_) => AnimationId::Fireworks,
            Self::TwoTone => AnimationId::TwoTone,
            Self::Snowfall => AnimationId::Snowfall,
            Self::Party(_) => AnimationId::Party,
            Self::Wreath(_) => AnimationId::Wreath,
            Self::Ember => AnimationId::Ember,
            Self::Shamrock => AnimationId::Shamrock,
        }
    }

    /// Paint one frame onto `canvas`.
    pub fn paint(&mut self, canvas: &mut Canvas) {
        match self {
            Self::Off => sweep::off(canvas),
            Self::Pride => sweep::pride(canvas),
            Self::RedGreenSweep => sweep::red_green_sweep(canvas),
            Self::Blink => palette::blink(canvas),
            Self::SegmentToggle(a) => a.paint(canvas),
            Self::CandyCane(a) => a.paint(canvas),
            Self::ColorPlosion(a) => a.paint(canvas),
            Self::Fireworks(a) => a.paint(canvas),
            Self::TwoTone => palette::two_tone(canvas),
            Self::Snowfall => palette::snowfall(canvas),
            Self::Party(a) => a.paint(canvas),
            Self::Wreath(a) => a.paint(canvas),
            Self::Ember => palette::ember(canvas),
            Self::Shamrock => sweep::shamrock(canvas),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
