//! Shared image configuration read identically by every placement algorithm.
//!
//! All types carry their documented defaults, so a partially specified
//! configuration (for example JSON with only `rotation.mode` set) fills the
//! rest in. Per-algorithm settings live next to their algorithms in
//! [`crate::placement`].

use crate::names::named_enum;

/// Inclusive `[min, max]` interval used for jitter and sampling ranges.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Create a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range containing only `value`.
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Whether `min == max`.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Scale both ends by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::fixed(1.0)
    }
}

named_enum! {
    /// Whether placement algorithms tilt images.
    pub enum RotationMode ("rotation mode") {
        /// Every image is upright.
        None = "none",
        /// Each image gets a uniform random angle from the configured range.
        Random = "random",
    }
    default None;
}

/// Per-image rotation applied by placement algorithms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RotationConfig {
    pub mode: RotationMode,
    /// Angle range in degrees.
    pub range: ValueRange,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            mode: RotationMode::None,
            range: ValueRange::new(-15.0, 15.0),
        }
    }
}

impl RotationConfig {
    /// Random rotation within `[min, max]` degrees.
    pub const fn random(min: f64, max: f64) -> Self {
        Self {
            mode: RotationMode::Random,
            range: ValueRange::new(min, max),
        }
    }
}

/// How large images are rendered before per-image variance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SizingConfig {
    /// Fixed base height in pixels. `None` selects adaptive sizing.
    pub fixed_height: Option<f64>,
    /// Smallest adaptive height.
    pub min_height: f64,
    /// Largest adaptive height.
    pub max_height: f64,
    /// Fraction of the container area adaptive sizing aims to cover.
    pub fill_ratio: f64,
    /// Multiplicative per-image scale jitter. `1.0..1.0` disables it.
    pub variance: ValueRange,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            fixed_height: None,
            min_height: 100.0,
            max_height: 300.0,
            fill_ratio: 0.6,
            variance: ValueRange::fixed(1.0),
        }
    }
}

impl SizingConfig {
    /// Whether per-image variance is active.
    pub fn has_variance(&self) -> bool {
        !(self.variance.min == 1.0 && self.variance.max == 1.0)
    }
}

/// Cross-cutting image parameters shared by all placement algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ImageConfig {
    pub sizing: SizingConfig,
    pub rotation: RotationConfig,
}

impl ImageConfig {
    /// Set per-image scale variance.
    pub fn variance(mut self, min: f64, max: f64) -> Self {
        self.sizing.variance = ValueRange::new(min, max);
        self
    }

    /// Set rotation behaviour.
    pub fn rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    /// Use a fixed base height.
    pub fn fixed_height(mut self, height: f64) -> Self {
        self.sizing.fixed_height = Some(height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_jitter() {
        let cfg = ImageConfig::default();
        assert!(!cfg.sizing.has_variance());
        assert_eq!(cfg.rotation.mode, RotationMode::None);
        assert_eq!(cfg.sizing.variance, ValueRange::fixed(1.0));
    }

    #[test]
    fn builder_setters() {
        let cfg = ImageConfig::default()
            .variance(0.8, 1.2)
            .rotation(RotationConfig::random(-10.0, 10.0))
            .fixed_height(150.0);
        assert!(cfg.sizing.has_variance());
        assert_eq!(cfg.rotation.range, ValueRange::new(-10.0, 10.0));
        assert_eq!(cfg.sizing.fixed_height, Some(150.0));
    }

    #[test]
    fn range_helpers() {
        assert!(ValueRange::fixed(2.0).is_fixed());
        assert_eq!(ValueRange::new(-30.0, 30.0).scaled(0.5), ValueRange::new(-15.0, 15.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let cfg: ImageConfig =
            serde_json::from_str(r#"{ "rotation": { "mode": "random" } }"#).unwrap();
        assert_eq!(cfg.rotation.mode, RotationMode::Random);
        assert_eq!(cfg.rotation.range, ValueRange::new(-15.0, 15.0));
        assert_eq!(cfg.sizing.variance, ValueRange::fixed(1.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_rotation_mode_falls_back() {
        let cfg: RotationConfig = serde_json::from_str(r#"{ "mode": "tumble" }"#).unwrap();
        assert_eq!(cfg.mode, RotationMode::None);
    }
}
