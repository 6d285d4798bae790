//! Entry animations: where each image starts, and how it gets to its layout.
//!
//! [`EntryAnimationEngine`] is built once per layout pass from an
//! [`EntryAnimationConfig`] and the algorithm that produced the layouts. It
//! computes a start state per image and, for effects a single CSS transition
//! cannot express (shaped paths, wobble, pop), per-frame values.
//!
//! # Example
//!
//! ```
//! use cloudlayout::entry::{EntryAnimationConfig, EntryAnimationEngine, EntryStartPosition};
//! use cloudlayout::{ContainerBounds, ImageLayout, LayoutAlgorithm};
//! use rand::SeedableRng;
//!
//! let engine = EntryAnimationEngine::new(EntryAnimationConfig::default(), LayoutAlgorithm::Grid);
//! assert_eq!(engine.start_position(), EntryStartPosition::Top);
//! assert_eq!(
//!     engine.transition(),
//!     "opacity 600ms ease-out, transform 600ms cubic-bezier(0.25, 1, 0.5, 1)"
//! );
//!
//! let layout = ImageLayout { id: 0, x: 200.0, y: 150.0, rotation: 0.0, scale: 1.0, base_size: 100.0, z_index: 1 };
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let start = engine.calculate_start_position(&layout, 150.0, 100.0, ContainerBounds::new(800.0, 600.0), 0, 1, &mut rng);
//! assert_eq!((start.x, start.y), (200.0, -200.0));
//! ```

mod path;
mod position;
mod rotation;
mod scale;

pub use path::{
    BouncePathConfig, BouncePreset, ElasticPathConfig, ElasticPreset, EntryPathConfig, PathType,
    WavePathConfig, WavePreset, interpolate_path, requires_js_animation,
};
pub use position::{
    CircularDistribution, CircularStartConfig, EntryStartConfig, EntryStartPosition, StartPosition,
};
pub use rotation::{
    EntryRotationConfig, EntryRotationMode, RANDOM_START_DEGREES, SpinDirection, StartRotation,
    WobbleConfig,
};
pub use scale::{
    EntryScaleConfig, EntryScaleMode, MAX_POP_BOUNCES, PopConfig, PopCurve, PopKeyframe,
};

use alloc::format;
use alloc::string::String;

use rand::Rng;

use crate::geometry::{ContainerBounds, Point};
use crate::placement::{ImageLayout, LayoutAlgorithm, finite_or};

/// CSS easing used for the transform transition unless configured.
pub const DEFAULT_EASING: &str = "cubic-bezier(0.25, 1, 0.5, 1)";

/// Entry animation timing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EntryTiming {
    /// Milliseconds.
    pub duration: u32,
}

impl Default for EntryTiming {
    fn default() -> Self {
        Self { duration: 600 }
    }
}

/// Complete entry animation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EntryAnimationConfig {
    pub start: EntryStartConfig,
    pub timing: EntryTiming,
    /// CSS timing function for the transform transition.
    pub easing: String,
    pub path: EntryPathConfig,
    pub rotation: EntryRotationConfig,
    pub scale: EntryScaleConfig,
}

impl Default for EntryAnimationConfig {
    fn default() -> Self {
        Self {
            start: EntryStartConfig::default(),
            timing: EntryTiming::default(),
            easing: String::from(DEFAULT_EASING),
            path: EntryPathConfig::default(),
            rotation: EntryRotationConfig::default(),
            scale: EntryScaleConfig::default(),
        }
    }
}

impl EntryAnimationConfig {
    pub fn position(mut self, position: EntryStartPosition) -> Self {
        self.start.position = Some(position);
        self
    }

    pub fn path(mut self, path: EntryPathConfig) -> Self {
        self.path = path;
        self
    }

    pub fn rotation(mut self, rotation: EntryRotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scale(mut self, scale: EntryScaleConfig) -> Self {
        self.scale = scale;
        self
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.timing.duration = ms;
        self
    }
}

/// Everything an image needs at the first frame of its entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EntryStart {
    pub position: StartPosition,
    /// Degrees.
    pub rotation: f64,
    pub scale: f64,
}

/// Interpolated state at one animation frame. `x`/`y` are the image center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EntryFrame {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
}

/// Entry animation calculator for one layout pass.
#[derive(Clone, Debug)]
pub struct EntryAnimationEngine {
    config: EntryAnimationConfig,
    position: EntryStartPosition,
    pop: PopCurve,
}

impl EntryAnimationEngine {
    /// Resolve the start position against `algorithm` and precompute the pop
    /// curve.
    pub fn new(config: EntryAnimationConfig, algorithm: LayoutAlgorithm) -> Self {
        let position = config
            .start
            .position
            .unwrap_or_else(|| EntryStartPosition::default_for(algorithm));
        let pop = PopCurve::new(&config.scale.pop);
        log::debug!(
            "entry animation for {algorithm}: start {position}, path {}, rotation {}, scale {}",
            config.path.path_type,
            config.rotation.mode,
            config.scale.mode
        );
        Self {
            config,
            position,
            pop,
        }
    }

    pub fn config(&self) -> &EntryAnimationConfig {
        &self.config
    }

    /// The resolved start position rule.
    pub fn start_position(&self) -> EntryStartPosition {
        self.position
    }

    /// Start center for `layout`, rendered at `image_width` × `image_height`.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_start_position<R: Rng + ?Sized>(
        &self,
        layout: &ImageLayout,
        image_width: f64,
        image_height: f64,
        bounds: ContainerBounds,
        index: usize,
        total: usize,
        rng: &mut R,
    ) -> StartPosition {
        position::start_position(
            self.position,
            &self.config.start,
            Point::new(layout.x, layout.y),
            image_width,
            image_height,
            bounds,
            (index, total),
            rng,
        )
    }

    pub fn calculate_start_rotation<R: Rng + ?Sized>(&self, final_rotation: f64, rng: &mut R) -> f64 {
        self.config.rotation.sample_start(final_rotation, rng)
    }

    pub fn calculate_start_scale<R: Rng + ?Sized>(&self, final_scale: f64, rng: &mut R) -> f64 {
        self.config.scale.sample_start(final_scale, rng)
    }

    /// Position, rotation and scale at the first frame.
    ///
    /// The image size used for edge starts is the rendered layout size with
    /// a 1.5:1 aspect unless `rendered` gives the measured size.
    pub fn calculate_start<R: Rng + ?Sized>(
        &self,
        layout: &ImageLayout,
        rendered: Option<(f64, f64)>,
        bounds: ContainerBounds,
        total: usize,
        rng: &mut R,
    ) -> EntryStart {
        let (w, h) = rendered.unwrap_or_else(|| {
            let h = layout.rendered_height();
            (h * crate::placement::BOUNDING_ASPECT, h)
        });
        EntryStart {
            position: self.calculate_start_position(layout, w, h, bounds, layout.id, total, rng),
            rotation: self.calculate_start_rotation(layout.rotation, rng),
            scale: self.calculate_start_scale(layout.scale, rng),
        }
    }

    /// Wobble rotation at `progress` (only meaningful in wobble mode).
    pub fn calculate_wobble_rotation(&self, progress: f64, final_rotation: f64) -> f64 {
        self.config.rotation.wobble_rotation(progress, final_rotation)
    }

    /// Pop scale at `progress`; exactly `final_scale` at `progress >= 1`.
    pub fn calculate_pop_scale(&self, progress: f64, final_scale: f64) -> f64 {
        self.pop.scale_at(progress, final_scale)
    }

    /// Whether transform must be driven per frame instead of by CSS.
    pub fn requires_js_animation(&self) -> bool {
        self.config.path.requires_js_animation()
            || self.config.rotation.mode == EntryRotationMode::Wobble
            || self.config.scale.mode == EntryScaleMode::Pop
    }

    /// CSS `transition` value for the entry.
    ///
    /// Only opacity transitions when transform is driven per frame.
    pub fn transition(&self) -> String {
        let d = self.config.timing.duration;
        if self.requires_js_animation() {
            format!("opacity {d}ms ease-out")
        } else {
            format!("opacity {d}ms ease-out, transform {d}ms {}", self.config.easing)
        }
    }

    /// Interpolated state at `progress` between `start` and `layout`.
    ///
    /// Progress is clamped to `[0, 1]`; at 1 the frame equals the layout.
    pub fn frame_at(&self, progress: f64, start: &EntryStart, layout: &ImageLayout) -> EntryFrame {
        let t = finite_or(progress, 1.0).clamp(0.0, 1.0);
        if t >= 1.0 {
            return EntryFrame {
                x: layout.x,
                y: layout.y,
                rotation: layout.rotation,
                scale: layout.scale,
            };
        }

        let p = interpolate_path(start.position.point(), Point::new(layout.x, layout.y), t, &self.config.path);
        let rotation = if self.config.rotation.mode == EntryRotationMode::Wobble {
            self.calculate_wobble_rotation(t, layout.rotation)
        } else {
            lerp(start.rotation, layout.rotation, t)
        };
        let scale = if self.config.scale.mode == EntryScaleMode::Pop {
            let pop = self.calculate_pop_scale(t, layout.scale);
            if start.position.use_scale { pop * t } else { pop }
        } else if start.position.use_scale {
            lerp(0.0, layout.scale, t)
        } else {
            lerp(start.scale, layout.scale, t)
        };

        EntryFrame {
            x: p.x,
            y: p.y,
            rotation,
            scale,
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout() -> ImageLayout {
        ImageLayout {
            id: 2,
            x: 100.0,
            y: 300.0,
            rotation: 10.0,
            scale: 1.0,
            base_size: 100.0,
            z_index: 3,
        }
    }

    const BOUNDS: ContainerBounds = ContainerBounds::new(800.0, 600.0);

    // ── start ───────────────────────────────────────────────────────────

    #[test]
    fn explicit_position_wins() {
        let cfg = EntryAnimationConfig::default().position(EntryStartPosition::Bottom);
        let engine = EntryAnimationEngine::new(cfg, LayoutAlgorithm::Radial);
        assert_eq!(engine.start_position(), EntryStartPosition::Bottom);
    }

    #[test]
    fn default_position_by_algorithm() {
        let engine = EntryAnimationEngine::new(EntryAnimationConfig::default(), LayoutAlgorithm::Wave);
        assert_eq!(engine.start_position(), EntryStartPosition::Left);
    }

    #[test]
    fn calculate_start_uses_layout_size() {
        let engine = EntryAnimationEngine::new(EntryAnimationConfig::default(), LayoutAlgorithm::Cluster);
        let s = engine.calculate_start(&layout(), None, BOUNDS, 5, &mut StdRng::seed_from_u64(1));
        assert_eq!(s.position, StartPosition::new(-(150.0 + 100.0), 300.0));
        assert_eq!(s.rotation, 10.0);
        assert_eq!(s.scale, 1.0);
    }

    // ── transition ──────────────────────────────────────────────────────

    #[test]
    fn transition_selection() {
        let css = EntryAnimationEngine::new(EntryAnimationConfig::default().duration(400), LayoutAlgorithm::Grid);
        assert!(!css.requires_js_animation());
        assert_eq!(
            css.transition(),
            "opacity 400ms ease-out, transform 400ms cubic-bezier(0.25, 1, 0.5, 1)"
        );

        let js = [
            EntryAnimationConfig::default().path(EntryPathConfig::new(PathType::Bounce)),
            EntryAnimationConfig::default().rotation(EntryRotationConfig::new(EntryRotationMode::Wobble)),
            EntryAnimationConfig::default().scale(EntryScaleConfig::new(EntryScaleMode::Pop)),
        ];
        for cfg in js {
            let engine = EntryAnimationEngine::new(cfg, LayoutAlgorithm::Grid);
            assert!(engine.requires_js_animation());
            assert_eq!(engine.transition(), "opacity 600ms ease-out");
        }
    }

    // ── frames ──────────────────────────────────────────────────────────

    #[test]
    fn frames_run_start_to_final() {
        let cfg = EntryAnimationConfig::default()
            .position(EntryStartPosition::Left)
            .rotation(EntryRotationConfig::spin(1, SpinDirection::Clockwise))
            .scale(EntryScaleConfig::new(EntryScaleMode::Grow));
        let engine = EntryAnimationEngine::new(cfg, LayoutAlgorithm::Grid);
        let l = layout();
        let start = engine.calculate_start(&l, Some((150.0, 100.0)), BOUNDS, 5, &mut StdRng::seed_from_u64(2));

        let f0 = engine.frame_at(0.0, &start, &l);
        assert_eq!((f0.x, f0.y), (start.position.x, start.position.y));
        assert_eq!(f0.rotation, -350.0);
        assert!((f0.scale - 0.3).abs() < 1e-12);

        let f1 = engine.frame_at(1.0, &start, &l);
        assert_eq!(f1, EntryFrame { x: 100.0, y: 300.0, rotation: 10.0, scale: 1.0 });
    }

    #[test]
    fn center_start_grows_from_zero() {
        let engine = EntryAnimationEngine::new(EntryAnimationConfig::default(), LayoutAlgorithm::Radial);
        let l = layout();
        let start = engine.calculate_start(&l, None, BOUNDS, 5, &mut StdRng::seed_from_u64(3));
        assert!(start.position.use_scale);
        assert_eq!(engine.frame_at(0.0, &start, &l).scale, 0.0);
        assert_eq!(engine.frame_at(0.5, &start, &l).scale, 0.5);
    }

    #[test]
    fn wobble_and_pop_frames() {
        let cfg = EntryAnimationConfig::default()
            .position(EntryStartPosition::Top)
            .rotation(EntryRotationConfig::new(EntryRotationMode::Wobble))
            .scale(EntryScaleConfig::new(EntryScaleMode::Pop));
        let engine = EntryAnimationEngine::new(cfg, LayoutAlgorithm::Grid);
        let l = layout();
        let start = engine.calculate_start(&l, None, BOUNDS, 5, &mut StdRng::seed_from_u64(4));
        let mid = engine.frame_at(0.5, &start, &l);
        assert!((mid.scale - 1.2).abs() < 1e-12);
        assert_eq!(mid.rotation, engine.calculate_wobble_rotation(0.5, 10.0));
        assert_eq!(engine.calculate_pop_scale(1.0, 0.7), 0.7);
    }

    #[test]
    fn oversized_pop_config_is_harmless() {
        let mut scale = EntryScaleConfig::new(EntryScaleMode::Grow);
        scale.pop.bounces = u32::MAX;
        let engine = EntryAnimationEngine::new(EntryAnimationConfig::default().scale(scale), LayoutAlgorithm::Grid);
        assert_eq!(engine.calculate_pop_scale(1.0, 1.0), 1.0);
        assert!(!engine.requires_js_animation());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_config() {
        let cfg: EntryAnimationConfig = serde_json::from_str(
            r#"{ "start": { "position": "circular", "circular": { "radius": "80%" } },
                 "rotation": { "mode": "spin", "spinCount": 2 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.start.position, Some(EntryStartPosition::Circular));
        assert_eq!(cfg.start.offset, 100.0);
        assert_eq!(cfg.start.circular.unwrap().radius, crate::names::Length::Percent(80.0));
        assert_eq!(cfg.rotation.spin_count, 2);
        assert_eq!(cfg.easing, DEFAULT_EASING);
        assert_eq!(cfg.timing.duration, 600);
    }
}
