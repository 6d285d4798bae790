//! Cluster placement: organic groups of images around spaced-out centers.
//!
//! Centers are chosen by best-candidate rejection sampling; images are dealt
//! round-robin across clusters and scattered around their center with a
//! Gaussian or uniform-disc offset.

use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use super::{ImageLayout, LayoutOptions, LayoutSettings, Placement, axis_range, clamp_center, finite_or};
use crate::geometry::{ContainerBounds, Point};
use crate::names::{AutoCount, named_enum};
use crate::random::{angle, standard_normal, uniform};

/// Candidate points tried per cluster center.
pub const CENTER_ATTEMPTS: usize = 100;
/// Upper bound for an automatic cluster count.
const MAX_AUTO_CLUSTERS: usize = 10;
/// One cluster per this many images when resolving `auto`.
const IMAGES_PER_AUTO_CLUSTER: usize = 8;
/// Fraction of the spacing-cell count usable as clusters.
const AUTO_AREA_FACTOR: f64 = 0.6;
/// Gaussian offsets are clamped to ±this many standard deviations.
const SIGMA_CLAMP: f64 = 3.0;

named_enum! {
    /// Distribution of images around their cluster center.
    pub enum ClusterDistribution ("cluster distribution") {
        /// Denser toward the center.
        Gaussian = "gaussian" | "normal",
        /// Even density within a disc of radius `spread`.
        Uniform = "uniform",
    }
    default Gaussian;
}

/// Cluster layout settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ClusterConfig {
    pub cluster_count: AutoCount,
    /// Maximum offset of an image from its center, in pixels.
    pub cluster_spread: f64,
    /// Target minimum distance between centers, in pixels.
    pub cluster_spacing: f64,
    pub distribution: ClusterDistribution,
    /// 0 to 1. Pulls images inward and enlarges them together.
    pub overlap: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster_count: AutoCount::Auto,
            cluster_spread: 150.0,
            cluster_spacing: 200.0,
            distribution: ClusterDistribution::Gaussian,
            overlap: 0.3,
        }
    }
}

impl ClusterConfig {
    pub fn cluster_count(mut self, count: usize) -> Self {
        self.cluster_count = AutoCount::Fixed(count);
        self
    }

    pub fn distribution(mut self, distribution: ClusterDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn spread(mut self, spread: f64) -> Self {
        self.cluster_spread = spread;
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.cluster_spacing = spacing;
        self
    }

    fn spread_px(&self) -> f64 {
        finite_or(self.cluster_spread, 150.0).max(0.0)
    }

    fn spacing_px(&self) -> f64 {
        finite_or(self.cluster_spacing, 200.0).max(1.0)
    }

    /// Resolve the cluster count for `image_count` images.
    ///
    /// `auto` is `min(ceil(n / 8), floor(w/spacing · h/spacing · 0.6), 10)`,
    /// floored at 1.
    pub fn resolve_count(&self, image_count: usize, bounds: ContainerBounds) -> usize {
        self.cluster_count.resolve_with(|| {
            let spacing = self.spacing_px();
            let bounds = bounds.sanitized();
            let by_area = ((bounds.width / spacing) * (bounds.height / spacing) * AUTO_AREA_FACTOR).floor();
            image_count
                .div_ceil(IMAGES_PER_AUTO_CLUSTER)
                .min(by_area as usize)
                .min(MAX_AUTO_CLUSTERS)
        })
    }
}

/// Cluster centers and the smallest pairwise distance rejection sampling
/// achieved (`None` with fewer than two centers).
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterCenters {
    pub centers: Vec<Point>,
    pub min_distance: Option<f64>,
}

/// Cluster placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClusterPlacement {
    pub config: ClusterConfig,
    pub settings: LayoutSettings,
}

impl ClusterPlacement {
    pub const fn new(config: ClusterConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }

    /// Pick `count` centers inside the padded area inset by the spread.
    ///
    /// Each center keeps the best of up to [`CENTER_ATTEMPTS`] candidates
    /// (largest distance to earlier centers), stopping early once a
    /// candidate is at least `cluster_spacing` away from all of them.
    pub fn cluster_centers<R: Rng + ?Sized>(
        &self,
        count: usize,
        bounds: ContainerBounds,
        rng: &mut R,
    ) -> ClusterCenters {
        let bounds = bounds.sanitized();
        let padding = self.settings.effective_padding();
        let spread = self.config.spread_px();
        let spacing = self.config.spacing_px();
        let (min_x, max_x) = axis_range(padding + spread, bounds.width - padding - spread);
        let (min_y, max_y) = axis_range(padding + spread, bounds.height - padding - spread);

        let mut centers: Vec<Point> = Vec::with_capacity(count);
        let mut min_distance: Option<f64> = None;
        for _ in 0..count {
            let mut best = Point::new(min_x, min_y);
            let mut best_distance = f64::NEG_INFINITY;
            for _ in 0..CENTER_ATTEMPTS {
                let candidate = Point::new(uniform(rng, min_x, max_x), uniform(rng, min_y, max_y));
                let nearest = centers
                    .iter()
                    .map(|c| c.distance_to(candidate))
                    .fold(f64::INFINITY, f64::min);
                if nearest > best_distance {
                    best = candidate;
                    best_distance = nearest;
                }
                if nearest >= spacing {
                    break;
                }
            }
            if !centers.is_empty() {
                min_distance = Some(min_distance.map_or(best_distance, |d| d.min(best_distance)));
            }
            centers.push(best);
        }

        ClusterCenters {
            centers,
            min_distance,
        }
    }

    /// Offset of one image from its cluster center, before overlap.
    fn sample_offset<R: Rng + ?Sized>(&self, spread: f64, rng: &mut R) -> (f64, f64) {
        match self.config.distribution {
            ClusterDistribution::Gaussian => {
                let gx = standard_normal(rng).clamp(-SIGMA_CLAMP, SIGMA_CLAMP) / SIGMA_CLAMP;
                let gy = standard_normal(rng).clamp(-SIGMA_CLAMP, SIGMA_CLAMP) / SIGMA_CLAMP;
                (gx * spread, gy * spread)
            }
            ClusterDistribution::Uniform => {
                let r = rng.random::<f64>().sqrt() * spread;
                let a = angle(rng);
                (a.cos() * r, a.sin() * r)
            }
        }
    }
}

/// Cluster index of image `i` among `clusters` (round-robin).
pub(crate) fn cluster_of(i: usize, clusters: usize) -> usize {
    i % clusters.max(1)
}

impl Placement for ClusterPlacement {
    fn generate<R: Rng + ?Sized>(
        &self,
        image_count: usize,
        bounds: ContainerBounds,
        options: &LayoutOptions,
        rng: &mut R,
    ) -> Vec<ImageLayout> {
        let mut layouts = Vec::with_capacity(image_count);
        if image_count == 0 {
            return layouts;
        }

        let bounds = bounds.sanitized();
        let size = options.base_size();
        let padding = self.settings.effective_padding();
        let spread = self.config.spread_px();
        let overlap = finite_or(self.config.overlap, 0.3).clamp(0.0, 1.0);
        let clusters = self.config.resolve_count(image_count, bounds);
        let ClusterCenters { centers, min_distance } = self.cluster_centers(clusters, bounds, rng);

        log::debug!(
            "cluster layout: {image_count} images in {clusters} clusters, min center distance {min_distance:?}"
        );

        for id in 0..image_count {
            let center = centers[cluster_of(id, clusters)];
            let (mut ox, mut oy) = self.sample_offset(spread, rng);
            ox /= 1.0 + overlap * 0.5;
            oy /= 1.0 + overlap * 0.5;
            let scale = self.settings.sample_scale(rng) * (1.0 + overlap * 0.3);
            let (x, y) = clamp_center(center.x + ox, center.y + oy, size * scale, bounds, padding);

            let distance = ox.hypot(oy);
            let z_index = (100.0 - distance / spread.max(1.0) * 50.0).round().max(1.0) as i32;

            layouts.push(ImageLayout {
                id,
                x,
                y,
                rotation: self.settings.sample_rotation(rng),
                scale,
                base_size: size,
                z_index,
            });
        }

        layouts
    }
}
