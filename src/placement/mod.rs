//! Placement algorithms.
//!
//! Each algorithm turns an image count and container bounds into one
//! [`ImageLayout`] per image. All of them honour the same contract:
//!
//! - the output has exactly `image_count` entries and `layouts[i].id == i`
//! - `x`/`y` are the image **center**, in container pixels
//! - every number is finite, even for zero or negative container sizes
//! - randomness only perturbs values, never the number of entries
//!
//! # Example
//!
//! ```
//! use cloudlayout::{ContainerBounds, LayoutOptions, LayoutSettings, Placement};
//! use cloudlayout::placement::{RadialConfig, RadialPlacement};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let radial = RadialPlacement::new(RadialConfig::default(), LayoutSettings::default());
//! let layouts = radial.generate(
//!     7,
//!     ContainerBounds::new(800.0, 600.0),
//!     &LayoutOptions::with_fixed_height(100.0),
//!     &mut rng,
//! );
//! assert_eq!(layouts.len(), 7);
//! assert_eq!((layouts[0].x, layouts[0].y), (400.0, 300.0));
//! ```

mod cluster;
mod grid;
mod honeycomb;
mod radial;
mod scatter;
mod spiral;
mod wave;

pub use cluster::{ClusterCenters, ClusterConfig, ClusterDistribution, ClusterPlacement};
pub use grid::{FillDirection, GridAlignment, GridConfig, GridPlacement, GridStagger};
pub use honeycomb::{HoneycombConfig, HoneycombPlacement};
pub use radial::{RadialConfig, RadialPlacement};
pub use scatter::{ScatterConfig, ScatterPlacement};
pub use spiral::{SpiralConfig, SpiralDirection, SpiralPlacement, SpiralType};
pub use wave::{WaveConfig, WavePlacement, WaveSync};

use alloc::vec::Vec;

use rand::Rng;

use crate::config::{ImageConfig, RotationMode};
use crate::geometry::ContainerBounds;
use crate::names::named_enum;
use crate::random::uniform;

/// Base image height used when the caller supplies none.
pub const DEFAULT_IMAGE_HEIGHT: f64 = 200.0;

/// Padding used when the configured value is missing or invalid.
pub const DEFAULT_PADDING: f64 = 50.0;

/// Width:height ratio assumed when keeping an image's box inside the container.
pub const BOUNDING_ASPECT: f64 = 1.5;

/// Geometry for one image produced by a layout pass.
///
/// The rendered height is `base_size * scale`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ImageLayout {
    /// Ordinal of the image in the input sequence.
    pub id: usize,
    /// Center x in container pixels.
    pub x: f64,
    /// Center y in container pixels.
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Multiplier applied to `base_size`.
    pub scale: f64,
    /// Unscaled image height in pixels.
    pub base_size: f64,
    /// Stacking order; higher is on top.
    pub z_index: i32,
}

impl ImageLayout {
    /// Rendered height in pixels.
    pub fn rendered_height(&self) -> f64 {
        self.base_size * self.scale
    }

    /// Whether every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.base_size.is_finite()
    }
}

/// Per-pass options supplied by the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutOptions {
    /// Base image height in pixels. `None` uses [`DEFAULT_IMAGE_HEIGHT`].
    pub fixed_height: Option<f64>,
}

impl LayoutOptions {
    /// Options with a fixed base height.
    pub const fn with_fixed_height(height: f64) -> Self {
        Self {
            fixed_height: Some(height),
        }
    }

    /// The base height to lay out with: finite and at least 1.
    pub fn base_size(&self) -> f64 {
        match self.fixed_height {
            Some(h) if h.is_finite() && h > 0.0 => h.max(1.0),
            _ => DEFAULT_IMAGE_HEIGHT,
        }
    }
}

/// Settings shared by every algorithm: container padding and image config.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LayoutSettings {
    /// Inset from each container edge, in pixels.
    pub padding: f64,
    pub image: ImageConfig,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            image: ImageConfig::default(),
        }
    }
}

impl LayoutSettings {
    /// Set padding.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set image config.
    pub fn image(mut self, image: ImageConfig) -> Self {
        self.image = image;
        self
    }

    /// Padding sanitized to a finite, non-negative value.
    pub(crate) fn effective_padding(&self) -> f64 {
        if self.padding.is_finite() {
            self.padding.max(0.0)
        } else {
            DEFAULT_PADDING
        }
    }

    /// Per-image variance multiplier, 1.0 when variance is off.
    pub(crate) fn sample_scale<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_scale(&self.image, rng)
    }

    /// Per-image rotation in degrees, 0 unless rotation mode is random.
    pub(crate) fn sample_rotation<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_rotation(&self.image, 1.0, rng)
    }
}

/// The shared placement contract.
pub trait Placement {
    /// Lay out `image_count` images inside `bounds`.
    fn generate<R: Rng + ?Sized>(
        &self,
        image_count: usize,
        bounds: ContainerBounds,
        options: &LayoutOptions,
        rng: &mut R,
    ) -> Vec<ImageLayout>;
}

// ============================================================================
// Algorithm dispatch
// ============================================================================

named_enum! {
    /// Placement algorithm selector.
    pub enum LayoutAlgorithm ("layout algorithm") {
        Radial = "radial",
        Grid = "grid",
        Spiral = "spiral",
        Cluster = "cluster",
        Wave = "wave",
        Honeycomb = "honeycomb",
        /// Uniform scatter with collision avoidance.
        Random = "random" | "scatter",
    }
    default Radial;
}

/// Complete layout configuration: algorithm choice, shared settings, and the
/// settings of every algorithm (only the selected one is read).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LayoutConfig {
    pub algorithm: LayoutAlgorithm,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub settings: LayoutSettings,
    pub radial: RadialConfig,
    pub grid: GridConfig,
    pub spiral: SpiralConfig,
    pub cluster: ClusterConfig,
    pub wave: WaveConfig,
    pub honeycomb: HoneycombConfig,
    pub random: ScatterConfig,
}

impl LayoutConfig {
    /// Default configuration for `algorithm`.
    pub fn for_algorithm(algorithm: LayoutAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }
}

/// Closed set of placement algorithms, each carrying its configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementLayout {
    Radial(RadialPlacement),
    Grid(GridPlacement),
    Spiral(SpiralPlacement),
    Cluster(ClusterPlacement),
    Wave(WavePlacement),
    Honeycomb(HoneycombPlacement),
    Random(ScatterPlacement),
}

impl PlacementLayout {
    /// Build the algorithm selected by `config.algorithm`.
    pub fn from_config(config: &LayoutConfig) -> Self {
        let s = config.settings;
        match config.algorithm {
            LayoutAlgorithm::Radial => Self::Radial(RadialPlacement::new(config.radial, s)),
            LayoutAlgorithm::Grid => Self::Grid(GridPlacement::new(config.grid, s)),
            LayoutAlgorithm::Spiral => Self::Spiral(SpiralPlacement::new(config.spiral, s)),
            LayoutAlgorithm::Cluster => Self::Cluster(ClusterPlacement::new(config.cluster, s)),
            LayoutAlgorithm::Wave => Self::Wave(WavePlacement::new(config.wave, s)),
            LayoutAlgorithm::Honeycomb => {
                Self::Honeycomb(HoneycombPlacement::new(config.honeycomb, s))
            }
            LayoutAlgorithm::Random => Self::Random(ScatterPlacement::new(config.random, s)),
        }
    }

    /// Which algorithm this is.
    pub fn algorithm(&self) -> LayoutAlgorithm {
        match self {
            Self::Radial(_) => LayoutAlgorithm::Radial,
            Self::Grid(_) => LayoutAlgorithm::Grid,
            Self::Spiral(_) => LayoutAlgorithm::Spiral,
            Self::Cluster(_) => LayoutAlgorithm::Cluster,
            Self::Wave(_) => LayoutAlgorithm::Wave,
            Self::Honeycomb(_) => LayoutAlgorithm::Honeycomb,
            Self::Random(_) => LayoutAlgorithm::Random,
        }
    }
}

impl Placement for PlacementLayout {
    fn generate<R: Rng + ?Sized>(
        &self,
        image_count: usize,
        bounds: ContainerBounds,
        options: &LayoutOptions,
        rng: &mut R,
    ) -> Vec<ImageLayout> {
        let layouts = match self {
            Self::Radial(p) => p.generate(image_count, bounds, options, rng),
            Self::Grid(p) => p.generate(image_count, bounds, options, rng),
            Self::Spiral(p) => p.generate(image_count, bounds, options, rng),
            Self::Cluster(p) => p.generate(image_count, bounds, options, rng),
            Self::Wave(p) => p.generate(image_count, bounds, options, rng),
            Self::Honeycomb(p) => p.generate(image_count, bounds, options, rng),
            Self::Random(p) => p.generate(image_count, bounds, options, rng),
        };
        debug_assert_eq!(layouts.len(), image_count);
        debug_assert!(layouts.iter().enumerate().all(|(i, l)| l.id == i && l.is_finite()));
        layouts
    }
}

/// Run a full layout pass with an explicit random source.
///
/// Resolves the base image height from `config.settings.image.sizing`
/// before dispatching to the selected algorithm.
pub fn generate_layouts_with<R: Rng + ?Sized>(
    config: &LayoutConfig,
    image_count: usize,
    bounds: ContainerBounds,
    rng: &mut R,
) -> Vec<ImageLayout> {
    let options = crate::sizing::layout_options(&config.settings.image.sizing, image_count, bounds);
    PlacementLayout::from_config(config).generate(image_count, bounds, &options, rng)
}

/// Run a full layout pass using the thread-local random source.
#[cfg(feature = "std")]
pub fn generate_layouts(
    config: &LayoutConfig,
    image_count: usize,
    bounds: ContainerBounds,
) -> Vec<ImageLayout> {
    generate_layouts_with(config, image_count, bounds, &mut rand::rng())
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(crate) fn sample_scale<R: Rng + ?Sized>(image: &ImageConfig, rng: &mut R) -> f64 {
    if !image.sizing.has_variance() {
        return 1.0;
    }
    let v = image.sizing.variance;
    let s = uniform(rng, v.min, v.max);
    if s.is_finite() && s > 0.0 { s } else { 1.0 }
}

/// Rotation from the configured range scaled by `factor`.
pub(crate) fn sample_rotation<R: Rng + ?Sized>(image: &ImageConfig, factor: f64, rng: &mut R) -> f64 {
    match image.rotation.mode {
        RotationMode::None => 0.0,
        RotationMode::Random => {
            let r = image.rotation.range.scaled(factor);
            let deg = uniform(rng, r.min, r.max);
            if deg.is_finite() { deg } else { 0.0 }
        }
    }
}

/// Clamp a center so a `size`-tall image (1.5:1 box) stays inside the padded
/// container. An axis too small to fit collapses to its midpoint.
pub(crate) fn clamp_center(
    x: f64,
    y: f64,
    size: f64,
    bounds: ContainerBounds,
    padding: f64,
) -> (f64, f64) {
    let half_w = size * BOUNDING_ASPECT / 2.0;
    let half_h = size / 2.0;
    (
        clamp_axis(x, padding + half_w, bounds.width - padding - half_w),
        clamp_axis(y, padding + half_h, bounds.height - padding - half_h),
    )
}

pub(crate) fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if lo <= hi {
        v.clamp(lo, hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// `[lo, hi]` if non-empty, otherwise the midpoint twice.
pub(crate) fn axis_range(lo: f64, hi: f64) -> (f64, f64) {
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    }
}

/// `value` if finite, else `fallback`.
pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Stacking order from a 0-based position, saturating at `i32::MAX`.
pub(crate) fn z_from_index(i: usize) -> i32 {
    i32::try_from(i.saturating_add(1)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotationConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // ── options ─────────────────────────────────────────────────────────

    #[test]
    fn base_size_falls_back() {
        assert_eq!(LayoutOptions::default().base_size(), DEFAULT_IMAGE_HEIGHT);
        assert_eq!(LayoutOptions::with_fixed_height(f64::NAN).base_size(), DEFAULT_IMAGE_HEIGHT);
        assert_eq!(LayoutOptions::with_fixed_height(0.0).base_size(), DEFAULT_IMAGE_HEIGHT);
        assert_eq!(LayoutOptions::with_fixed_height(0.5).base_size(), 1.0);
        assert_eq!(LayoutOptions::with_fixed_height(120.0).base_size(), 120.0);
    }

    #[test]
    fn padding_sanitized() {
        assert_eq!(LayoutSettings::default().padding(-3.0).effective_padding(), 0.0);
        assert_eq!(
            LayoutSettings::default().padding(f64::INFINITY).effective_padding(),
            DEFAULT_PADDING
        );
    }

    // ── clamp ───────────────────────────────────────────────────────────

    #[test]
    fn clamp_keeps_box_inside() {
        let b = ContainerBounds::new(800.0, 600.0);
        let (x, y) = clamp_center(-100.0, 900.0, 100.0, b, 50.0);
        assert_eq!(x, 50.0 + 75.0);
        assert_eq!(y, 600.0 - 50.0 - 50.0);
    }

    #[test]
    fn clamp_collapses_when_too_small() {
        let b = ContainerBounds::new(100.0, 80.0);
        let (x, y) = clamp_center(0.0, 0.0, 200.0, b, 50.0);
        assert_eq!(x, 50.0);
        assert_eq!(y, 40.0);
    }

    // ── sampling ────────────────────────────────────────────────────────

    #[test]
    fn no_variance_no_rotation_by_default() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = LayoutSettings::default();
        for _ in 0..20 {
            assert_eq!(s.sample_scale(&mut rng), 1.0);
            assert_eq!(s.sample_rotation(&mut rng), 0.0);
        }
    }

    #[test]
    fn rotation_factor_narrows_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let image = ImageConfig::default().rotation(RotationConfig::random(-30.0, 30.0));
        for _ in 0..200 {
            let r = sample_rotation(&image, 1.0 / 3.0, &mut rng);
            assert!(r.abs() <= 10.0 + 1e-9);
        }
    }

    // ── dispatch ────────────────────────────────────────────────────────

    #[test]
    fn lookup_builds_selected_algorithm() {
        for &alg in LayoutAlgorithm::ALL {
            let layout = PlacementLayout::from_config(&LayoutConfig::for_algorithm(alg));
            assert_eq!(layout.algorithm(), alg);
        }
    }

    #[test]
    fn scatter_alias() {
        assert_eq!(LayoutAlgorithm::from_name("scatter"), Some(LayoutAlgorithm::Random));
        assert_eq!(LayoutAlgorithm::from_name_lenient("mosaic"), LayoutAlgorithm::Radial);
    }

    #[test]
    fn generate_with_resolves_size() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut config = LayoutConfig::for_algorithm(LayoutAlgorithm::Honeycomb);
        config.settings.image = ImageConfig::default().fixed_height(64.0);
        let layouts = generate_layouts_with(&config, 3, ContainerBounds::new(500.0, 500.0), &mut rng);
        assert_eq!(layouts.len(), 3);
        assert!(layouts.iter().all(|l| l.base_size == 64.0));
    }

    #[test]
    fn z_index_saturates() {
        assert_eq!(z_from_index(0), 1);
        assert_eq!(z_from_index(usize::MAX), i32::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn layout_config_from_partial_json() {
        let cfg: LayoutConfig = serde_json::from_str(
            r#"{ "algorithm": "cluster", "padding": 20, "cluster": { "clusterCount": 3 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.algorithm, LayoutAlgorithm::Cluster);
        assert_eq!(cfg.settings.padding, 20.0);
        assert_eq!(cfg.cluster.cluster_count, crate::names::AutoCount::Fixed(3));
        assert_eq!(cfg.radial, RadialConfig::default());
    }
}
