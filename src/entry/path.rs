//! Entry paths: the trajectory an image follows from its start point to its
//! final center.
//!
//! Linear paths are plain CSS transitions. Bounce, elastic and wave paths
//! need a position per animation frame, sampled with [`interpolate_path`].

use core::f64::consts::{PI, TAU};

#[allow(unused_imports)]
use num_traits::Float;

use crate::geometry::Point;
use crate::names::named_enum;
use crate::placement::finite_or;

named_enum! {
    /// Trajectory shape.
    pub enum PathType ("path type") {
        Linear = "linear",
        /// Overshoots the target along the line, then settles.
        Bounce = "bounce",
        /// Damped spring.
        Elastic = "elastic" | "spring",
        /// Sideways oscillation while travelling.
        Wave = "wave",
    }
    default Linear;
}

/// Whether `path` needs per-frame positions instead of a CSS transition.
pub fn requires_js_animation(path: PathType) -> bool {
    path != PathType::Linear
}

// ============================================================================
// Bounce
// ============================================================================

named_enum! {
    /// Named bounce settings.
    pub enum BouncePreset ("bounce preset") {
        Energetic = "energetic",
        Playful = "playful",
        Subtle = "subtle",
    }
    default Playful;
}

/// Bounce path settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct BouncePathConfig {
    /// Overshoot past the target, as a fraction of the travel distance.
    pub overshoot: f64,
    /// Settling oscillations after the first overshoot.
    pub bounces: u32,
    /// Amplitude kept per bounce.
    pub decay: f64,
    /// Replaces the fields above when set.
    pub preset: Option<BouncePreset>,
}

impl Default for BouncePathConfig {
    fn default() -> Self {
        Self {
            overshoot: 0.15,
            bounces: 1,
            decay: 0.5,
            preset: None,
        }
    }
}

impl BouncePathConfig {
    pub const fn from_preset(preset: BouncePreset) -> Self {
        let (overshoot, bounces, decay) = match preset {
            BouncePreset::Energetic => (0.25, 2, 0.5),
            BouncePreset::Playful => (0.2, 3, 0.6),
            BouncePreset::Subtle => (0.08, 1, 0.3),
        };
        Self {
            overshoot,
            bounces,
            decay,
            preset: Some(preset),
        }
    }

    /// The preset's values if one is set, otherwise these.
    pub fn resolved(&self) -> Self {
        self.preset.map_or(*self, Self::from_preset)
    }

    /// Travel fraction at progress `t` (0 and 1 at the ends).
    fn progress(&self, t: f64) -> f64 {
        let overshoot = finite_or(self.overshoot, 0.15).max(0.0);
        let decay = finite_or(self.decay, 0.5).clamp(0.0, 1.0);
        if t < BOUNCE_SPLIT {
            let u = t / BOUNCE_SPLIT;
            return (1.0 + overshoot) * ease_out_quad(u);
        }
        let u = (t - BOUNCE_SPLIT) / (1.0 - BOUNCE_SPLIT);
        let n = self.bounces as f64;
        1.0 + overshoot * (PI * (n + 0.5) * u).cos() * decay.powf(n * u)
    }
}

/// Progress at which a bounce first reaches its overshoot.
const BOUNCE_SPLIT: f64 = 0.6;

// ============================================================================
// Elastic
// ============================================================================

named_enum! {
    /// Named spring settings.
    pub enum ElasticPreset ("elastic preset") {
        Gentle = "gentle",
        Bouncy = "bouncy",
        Wobbly = "wobbly",
        Snappy = "snappy",
    }
    default Gentle;
}

/// Spring path settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ElasticPathConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Damped oscillations over the animation.
    pub oscillations: u32,
    pub preset: Option<ElasticPreset>,
}

impl Default for ElasticPathConfig {
    fn default() -> Self {
        Self {
            stiffness: 200.0,
            damping: 20.0,
            mass: 1.0,
            oscillations: 3,
            preset: None,
        }
    }
}

/// Highest damping ratio used; at 1 the spring stops oscillating.
const MAX_DAMPING_RATIO: f64 = 0.95;
/// Lowest damping ratio used, so an undamped spring still settles.
const MIN_DAMPING_RATIO: f64 = 0.05;

impl ElasticPathConfig {
    pub const fn from_preset(preset: ElasticPreset) -> Self {
        let (stiffness, damping, mass, oscillations) = match preset {
            ElasticPreset::Gentle => (120.0, 14.0, 1.0, 2),
            ElasticPreset::Bouncy => (300.0, 10.0, 1.0, 4),
            ElasticPreset::Wobbly => (180.0, 6.0, 1.0, 5),
            ElasticPreset::Snappy => (400.0, 30.0, 1.0, 2),
        };
        Self {
            stiffness,
            damping,
            mass,
            oscillations,
            preset: Some(preset),
        }
    }

    pub fn resolved(&self) -> Self {
        self.preset.map_or(*self, Self::from_preset)
    }

    /// Damping ratio `c / 2√(km)`, kept within
    /// `[MIN_DAMPING_RATIO, MAX_DAMPING_RATIO]`.
    pub fn damping_ratio(&self) -> f64 {
        let k = positive_or(self.stiffness, 200.0);
        let m = positive_or(self.mass, 1.0);
        let c = finite_or(self.damping, 20.0).max(0.0);
        (c / (2.0 * (k * m).sqrt())).clamp(MIN_DAMPING_RATIO, MAX_DAMPING_RATIO)
    }

    /// Step response of an underdamped spring, time-scaled so the damped
    /// frequency completes `oscillations` cycles over `t ∈ [0, 1]`.
    ///
    /// The residual left at `t = 1` is removed linearly, so the curve ends
    /// on exactly 1 however lightly damped.
    fn progress(&self, t: f64) -> f64 {
        let zeta = self.damping_ratio();
        let omega_d = TAU * self.oscillations.max(1) as f64;
        let lambda = zeta * omega_d / (1.0 - zeta * zeta).sqrt();
        let response = |t: f64| {
            let envelope = (-lambda * t).exp();
            1.0 - envelope * ((omega_d * t).cos() + lambda / omega_d * (omega_d * t).sin())
        };
        response(t) - t * (response(1.0) - 1.0)
    }
}

// ============================================================================
// Wave
// ============================================================================

named_enum! {
    /// Named wave settings.
    pub enum WavePreset ("wave preset") {
        Gentle = "gentle",
        Playful = "playful",
        Serpentine = "serpentine",
        Flutter = "flutter",
    }
    default Gentle;
}

/// Wave path settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct WavePathConfig {
    /// Peak sideways displacement, in pixels.
    pub amplitude: f64,
    /// Full cycles over the trip.
    pub frequency: f64,
    /// Fade the displacement out toward the target. Without it, use a
    /// whole-number frequency for a seamless landing.
    pub decay: bool,
    /// Exponent of the `(1 - t)` fade.
    pub decay_rate: f64,
    /// Starting phase in radians.
    pub phase: f64,
    pub preset: Option<WavePreset>,
}

impl Default for WavePathConfig {
    fn default() -> Self {
        Self {
            amplitude: 40.0,
            frequency: 2.0,
            decay: true,
            decay_rate: 0.8,
            phase: 0.0,
            preset: None,
        }
    }
}

impl WavePathConfig {
    pub const fn from_preset(preset: WavePreset) -> Self {
        let (amplitude, frequency, decay, decay_rate) = match preset {
            WavePreset::Gentle => (30.0, 1.5, true, 0.9),
            WavePreset::Playful => (50.0, 2.5, true, 0.7),
            WavePreset::Serpentine => (60.0, 3.0, false, 1.0),
            WavePreset::Flutter => (20.0, 4.0, true, 0.5),
        };
        Self {
            amplitude,
            frequency,
            decay,
            decay_rate,
            phase: 0.0,
            preset: Some(preset),
        }
    }

    pub fn resolved(&self) -> Self {
        self.preset.map_or(*self, Self::from_preset)
    }

    /// Sideways displacement at progress `t`, in pixels.
    fn displacement(&self, t: f64) -> f64 {
        let amplitude = finite_or(self.amplitude, 40.0);
        let frequency = finite_or(self.frequency, 2.0);
        let envelope = if self.decay {
            (1.0 - t).powf(finite_or(self.decay_rate, 0.8).max(0.0))
        } else {
            1.0
        };
        amplitude * (TAU * frequency * t + finite_or(self.phase, 0.0)).sin() * envelope
    }
}

// ============================================================================
// Path selection and sampling
// ============================================================================

/// Entry path: a type plus the settings of each shaped path (only the one
/// matching `path_type` is read).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct EntryPathConfig {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub path_type: PathType,
    pub bounce: BouncePathConfig,
    pub elastic: ElasticPathConfig,
    pub wave: WavePathConfig,
}

impl EntryPathConfig {
    pub fn new(path_type: PathType) -> Self {
        Self {
            path_type,
            ..Self::default()
        }
    }

    pub fn requires_js_animation(&self) -> bool {
        requires_js_animation(self.path_type)
    }
}

/// Position along `config`'s path from `start` to `end` at `progress`.
///
/// Progress at or below 0 (or NaN) returns `start`; at or above 1 returns
/// `end` exactly.
pub fn interpolate_path(start: Point, end: Point, progress: f64, config: &EntryPathConfig) -> Point {
    if !(progress > 0.0) {
        return start;
    }
    if progress >= 1.0 {
        return end;
    }
    let t = progress;
    match config.path_type {
        PathType::Linear => start.lerp(end, t),
        PathType::Bounce => start.lerp(end, config.bounce.resolved().progress(t)),
        PathType::Elastic => start.lerp(end, config.elastic.resolved().progress(t)),
        PathType::Wave => {
            let along = start.lerp(end, t);
            let offset = config.wave.resolved().displacement(t);
            let (nx, ny) = unit_normal(start, end);
            Point::new(along.x + nx * offset, along.y + ny * offset)
        }
    }
}

/// Ease-out quadratic: `1 - (1 - t)²`.
pub(crate) fn ease_out_quad(t: f64) -> f64 {
    let omt = 1.0 - t;
    1.0 - omt * omt
}

/// Left-hand unit normal of `start → end`; straight up for a zero-length trip.
fn unit_normal(start: Point, end: Point) -> (f64, f64) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = dx.hypot(dy);
    if len > 0.0 && len.is_finite() {
        (-dy / len, dx / len)
    } else {
        (0.0, -1.0)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}
