//! Start rotation and per-frame wobble.

use core::f64::consts::TAU;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use crate::config::ValueRange;
use crate::names::named_enum;
use crate::placement::finite_or;
use crate::random::uniform;

/// Offset range, ± degrees, for `random` and unconfigured `settle` starts.
pub const RANDOM_START_DEGREES: f64 = 30.0;

named_enum! {
    /// How an image's rotation enters.
    pub enum EntryRotationMode ("entry rotation mode") {
        /// Start at the final rotation.
        None = "none",
        /// Start at a configured angle or range and settle.
        Settle = "settle",
        /// Whole turns on the way in.
        Spin = "spin",
        /// Start at the final rotation ± a random offset.
        Random = "random",
        /// Start at the final rotation and oscillate during playback.
        Wobble = "wobble",
    }
    default None;
}

named_enum! {
    /// Spin direction.
    pub enum SpinDirection ("spin direction") {
        Clockwise = "clockwise" | "cw",
        Counterclockwise = "counterclockwise" | "ccw",
        /// Chosen per image.
        Random = "random",
        /// Follow the sign of the final rotation.
        Auto = "auto",
    }
    default Auto;
}

impl SpinDirection {
    /// Sign applied to whole turns. `Random` needs an rng, so it resolves in
    /// [`EntryRotationConfig::sample_start`].
    fn sign(self, final_rotation: f64) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::Counterclockwise | Self::Random => 1.0,
            Self::Auto if final_rotation >= 0.0 => 1.0,
            Self::Auto => -1.0,
        }
    }
}

/// Configured start for `settle`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum StartRotation {
    /// Exact start angle in degrees.
    Fixed(f64),
    /// Uniformly sampled start angle in degrees.
    Range(ValueRange),
}

/// Wobble oscillation settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WobbleConfig {
    /// Peak deviation in degrees.
    pub amplitude: f64,
    /// Oscillations over the animation.
    pub frequency: f64,
    /// Fade out as `(1 - t)²`.
    pub decay: bool,
}

impl Default for WobbleConfig {
    fn default() -> Self {
        Self {
            amplitude: 15.0,
            frequency: 3.0,
            decay: true,
        }
    }
}

/// Entry rotation settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct EntryRotationConfig {
    pub mode: EntryRotationMode,
    /// `settle` start; `None` means final ± [`RANDOM_START_DEGREES`].
    pub start_rotation: Option<StartRotation>,
    pub spin_count: u32,
    pub direction: SpinDirection,
    pub wobble: WobbleConfig,
}

impl Default for EntryRotationConfig {
    fn default() -> Self {
        Self {
            mode: EntryRotationMode::None,
            start_rotation: None,
            spin_count: 1,
            direction: SpinDirection::Auto,
            wobble: WobbleConfig::default(),
        }
    }
}

impl EntryRotationConfig {
    pub fn new(mode: EntryRotationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Spin `count` whole turns in `direction`.
    pub fn spin(count: u32, direction: SpinDirection) -> Self {
        Self {
            mode: EntryRotationMode::Spin,
            spin_count: count,
            direction,
            ..Self::default()
        }
    }

    /// Rotation in degrees at the start of the entry animation.
    pub fn sample_start<R: Rng + ?Sized>(&self, final_rotation: f64, rng: &mut R) -> f64 {
        match self.mode {
            EntryRotationMode::None | EntryRotationMode::Wobble => final_rotation,
            EntryRotationMode::Settle => match self.start_rotation {
                Some(StartRotation::Fixed(deg)) => finite_or(deg, final_rotation),
                Some(StartRotation::Range(r)) => finite_or(uniform(rng, r.min, r.max), final_rotation),
                None => random_offset(final_rotation, rng),
            },
            EntryRotationMode::Random => random_offset(final_rotation, rng),
            EntryRotationMode::Spin => {
                let sign = if self.direction == SpinDirection::Random {
                    if rng.random::<bool>() { 1.0 } else { -1.0 }
                } else {
                    self.direction.sign(final_rotation)
                };
                final_rotation + self.spin_count as f64 * 360.0 * sign
            }
        }
    }

    /// Rotation at `progress` for wobble playback.
    ///
    /// `final + amplitude · sin(t · frequency · 2π) · (1 - t)²` with decay,
    /// without the fade otherwise. Progress is clamped to `[0, 1]`.
    pub fn wobble_rotation(&self, progress: f64, final_rotation: f64) -> f64 {
        let t = finite_or(progress, 1.0).clamp(0.0, 1.0);
        let w = &self.wobble;
        let decay = if w.decay { (1.0 - t) * (1.0 - t) } else { 1.0 };
        final_rotation + finite_or(w.amplitude, 15.0) * (t * finite_or(w.frequency, 3.0) * TAU).sin() * decay
    }
}

fn random_offset<R: Rng + ?Sized>(final_rotation: f64, rng: &mut R) -> f64 {
    final_rotation + uniform(rng, -RANDOM_START_DEGREES, RANDOM_START_DEGREES)
}
