//! Start scale and the per-frame pop bounce.

use alloc::vec::Vec;

use rand::Rng;

use super::path::ease_out_quad;
use crate::config::ValueRange;
use crate::names::named_enum;
use crate::placement::finite_or;
use crate::random::uniform;

named_enum! {
    /// How an image's scale enters.
    pub enum EntryScaleMode ("entry scale mode") {
        /// Start at the final scale.
        None = "none",
        /// Start smaller (`start_scale`, default 0.3).
        Grow = "grow",
        /// Start larger (`start_scale`, default 1.5).
        Shrink = "shrink",
        /// Start at a random fraction of the final scale.
        Random = "random",
        /// Start at the final scale and overshoot during playback.
        Pop = "pop",
    }
    default None;
}

const DEFAULT_GROW_SCALE: f64 = 0.3;
const DEFAULT_SHRINK_SCALE: f64 = 1.5;

/// Bounce count cap; later bounces are below visible amplitude anyway.
pub const MAX_POP_BOUNCES: u32 = 10;

/// Pop bounce settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct PopConfig {
    /// Peak scale multiplier reached halfway through.
    pub overshoot: f64,
    /// Undershoot/re-overshoot pairs after the peak, at most
    /// [`MAX_POP_BOUNCES`].
    pub bounces: u32,
    /// Amplitude kept per bounce.
    pub bounce_decay: f64,
}

impl Default for PopConfig {
    fn default() -> Self {
        Self {
            overshoot: 1.2,
            bounces: 1,
            bounce_decay: 0.5,
        }
    }
}

/// Entry scale settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct EntryScaleConfig {
    pub mode: EntryScaleMode,
    /// Multiplier for `grow`/`shrink`; `None` uses the mode's default.
    pub start_scale: Option<f64>,
    /// Multiplier range for `random`.
    pub range: ValueRange,
    pub pop: PopConfig,
}

impl Default for EntryScaleConfig {
    fn default() -> Self {
        Self {
            mode: EntryScaleMode::None,
            start_scale: None,
            range: ValueRange::new(0.5, 1.0),
            pop: PopConfig::default(),
        }
    }
}

impl EntryScaleConfig {
    pub fn new(mode: EntryScaleMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Scale at the start of the entry animation.
    pub fn sample_start<R: Rng + ?Sized>(&self, final_scale: f64, rng: &mut R) -> f64 {
        let multiplier = match self.mode {
            EntryScaleMode::None | EntryScaleMode::Pop => return final_scale,
            EntryScaleMode::Grow => self.start_scale.map_or(DEFAULT_GROW_SCALE, |s| finite_or(s, DEFAULT_GROW_SCALE)),
            EntryScaleMode::Shrink => {
                self.start_scale.map_or(DEFAULT_SHRINK_SCALE, |s| finite_or(s, DEFAULT_SHRINK_SCALE))
            }
            EntryScaleMode::Random => finite_or(uniform(rng, self.range.min, self.range.max), 1.0),
        };
        final_scale * multiplier
    }
}

/// A point on the pop curve: relative scale at a progress time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopKeyframe {
    pub time: f64,
    pub scale: f64,
}

/// Pop keyframes, relative to the final scale.
///
/// `(0, 1)`, then `(0.5, overshoot)`, then `bounces` undershoot/overshoot
/// pairs evenly spaced over the second half, each pair's amplitude scaled by
/// `bounce_decay` once more than the previous, then `(1, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PopCurve {
    keyframes: Vec<PopKeyframe>,
}

impl PopCurve {
    pub fn new(config: &PopConfig) -> Self {
        let overshoot = finite_or(config.overshoot, 1.2);
        let decay = finite_or(config.bounce_decay, 0.5).clamp(0.0, 1.0);
        let bounces = config.bounces.min(MAX_POP_BOUNCES) as usize;
        let step = 0.5 / (2 * bounces + 1) as f64;

        let mut keyframes = Vec::with_capacity(2 * bounces + 3);
        keyframes.push(PopKeyframe { time: 0.0, scale: 1.0 });
        keyframes.push(PopKeyframe {
            time: 0.5,
            scale: overshoot,
        });
        let mut amplitude = overshoot - 1.0;
        let mut time = 0.5;
        for _ in 0..bounces {
            amplitude *= decay;
            time += step;
            keyframes.push(PopKeyframe {
                time,
                scale: 1.0 - amplitude,
            });
            time += step;
            keyframes.push(PopKeyframe {
                time,
                scale: 1.0 + amplitude * decay,
            });
        }
        keyframes.push(PopKeyframe { time: 1.0, scale: 1.0 });
        Self { keyframes }
    }

    pub fn keyframes(&self) -> &[PopKeyframe] {
        &self.keyframes
    }

    /// Scale at `progress`, ease-out-quad within each keyframe segment.
    /// Returns `final_scale` exactly at and after `progress == 1`.
    pub fn scale_at(&self, progress: f64, final_scale: f64) -> f64 {
        let t = finite_or(progress, 1.0);
        if t >= 1.0 {
            return final_scale;
        }
        let t = t.max(0.0);
        let Some(i) = self.keyframes.windows(2).position(|w| t <= w[1].time) else {
            return final_scale;
        };
        let (a, b) = (self.keyframes[i], self.keyframes[i + 1]);
        let span = b.time - a.time;
        let local = if span > 0.0 { (t - a.time) / span } else { 1.0 };
        (a.scale + (b.scale - a.scale) * ease_out_quad(local)) * final_scale
    }
}

impl Default for PopCurve {
    fn default() -> Self {
        Self::new(&PopConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    // ── start scale ─────────────────────────────────────────────────────

    #[test]
    fn mode_defaults() {
        let s = |mode| EntryScaleConfig::new(mode).sample_start(2.0, &mut rng());
        assert_eq!(s(EntryScaleMode::None), 2.0);
        assert_eq!(s(EntryScaleMode::Pop), 2.0);
        assert_eq!(s(EntryScaleMode::Grow), 0.6);
        assert_eq!(s(EntryScaleMode::Shrink), 3.0);
    }

    #[test]
    fn explicit_start_scale() {
        let mut cfg = EntryScaleConfig::new(EntryScaleMode::Grow);
        cfg.start_scale = Some(0.5);
        assert_eq!(cfg.sample_start(1.0, &mut rng()), 0.5);
    }

    #[test]
    fn random_within_range() {
        let cfg = EntryScaleConfig::new(EntryScaleMode::Random);
        let mut r = rng();
        for _ in 0..100 {
            let s = cfg.sample_start(2.0, &mut r);
            assert!((1.0..2.0).contains(&s), "{s}");
        }
    }

    // ── pop ─────────────────────────────────────────────────────────────

    #[test]
    fn default_keyframes() {
        let curve = PopCurve::default();
        let k = curve.keyframes();
        assert_eq!(k.len(), 5);
        assert_eq!((k[1].time, k[1].scale), (0.5, 1.2));
        assert!((k[2].scale - 0.9).abs() < 1e-12);
        assert!((k[3].scale - 1.05).abs() < 1e-12);
        assert_eq!((k[4].time, k[4].scale), (1.0, 1.0));
        assert!(k.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn pop_settles_exactly() {
        let curve = PopCurve::default();
        assert_eq!(curve.scale_at(1.0, 0.8), 0.8);
        assert_eq!(curve.scale_at(1.5, 0.8), 0.8);
        assert_eq!(curve.scale_at(0.0, 0.8), 0.8);
    }

    #[test]
    fn pop_peaks_halfway() {
        let curve = PopCurve::default();
        assert!((curve.scale_at(0.5, 2.0) - 2.4).abs() < 1e-12);
        // Ease-out: three quarters of the rise by a quarter of the way.
        assert!((curve.scale_at(0.25, 1.0) - 1.15).abs() < 1e-12);
    }

    #[test]
    fn no_bounces_goes_straight_home() {
        let curve = PopCurve::new(&PopConfig {
            bounces: 0,
            ..PopConfig::default()
        });
        assert_eq!(curve.keyframes().len(), 3);
        assert!(curve.scale_at(0.75, 1.0) > 1.0);
    }
    #[test]
    fn bounce_count_is_capped() {
        let curve = PopCurve::new(&PopConfig {
            bounces: u32::MAX,
            ..PopConfig::default()
        });
        let k = curve.keyframes();
        assert_eq!(k.len(), 2 * MAX_POP_BOUNCES as usize + 3);
        assert!(k.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(curve.scale_at(1.0, 0.7), 0.7);
    }
}
