//! Random placement: uniform scatter with best-candidate collision avoidance.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use super::{
    BOUNDING_ASPECT, ImageLayout, LayoutOptions, LayoutSettings, Placement, axis_range, clamp_center,
    finite_or, z_from_index,
};
use crate::geometry::{ContainerBounds, Point};
use crate::random::uniform;

/// Random (scatter) layout settings.
///
/// Each candidate is checked only against images in neighboring cells of a
/// `min_distance` grid, so a pass costs about `O(n · max_attempts · log n)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ScatterConfig {
    /// Candidates tried per image.
    pub max_attempts: usize,
    /// Accept a candidate once it is this many image heights from every
    /// placed image.
    pub min_distance_factor: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            min_distance_factor: 0.8,
        }
    }
}

impl ScatterConfig {
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn min_distance_factor(mut self, factor: f64) -> Self {
        self.min_distance_factor = factor;
        self
    }
}

/// Random placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScatterPlacement {
    pub config: ScatterConfig,
    pub settings: LayoutSettings,
}

impl ScatterPlacement {
    pub const fn new(config: ScatterConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }
}

impl Placement for ScatterPlacement {
    fn generate<R: Rng + ?Sized>(
        &self,
        image_count: usize,
        bounds: ContainerBounds,
        options: &LayoutOptions,
        rng: &mut R,
    ) -> Vec<ImageLayout> {
        let mut layouts: Vec<ImageLayout> = Vec::with_capacity(image_count);
        if image_count == 0 {
            return layouts;
        }

        let bounds = bounds.sanitized();
        let size = options.base_size();
        let padding = self.settings.effective_padding();
        let attempts = self.config.max_attempts.max(1);
        let min_distance = finite_or(self.config.min_distance_factor, 0.8).max(0.0) * size;
        let half_w = size * BOUNDING_ASPECT / 2.0;
        let (x_lo, x_hi) = axis_range(padding + half_w, bounds.width - padding - half_w);
        let (y_lo, y_hi) = axis_range(padding + size / 2.0, bounds.height - padding - size / 2.0);

        log::debug!("random layout: {image_count} images, {attempts} attempts, min distance {min_distance:.1}");

        let mut placed = NeighborGrid::new(Point::new(x_lo, y_lo), min_distance);
        let mut crowded = 0usize;
        for id in 0..image_count {
            let mut best = Point::new(x_lo, y_lo);
            let mut best_distance = f64::NEG_INFINITY;
            for _ in 0..attempts {
                let candidate = Point::new(uniform(rng, x_lo, x_hi), uniform(rng, y_lo, y_hi));
                let nearest = placed.nearest_within(candidate);
                if nearest > best_distance {
                    best = candidate;
                    best_distance = nearest;
                }
                if nearest >= min_distance {
                    break;
                }
            }
            if best_distance < min_distance {
                crowded += 1;
            }

            let scale = self.settings.sample_scale(rng);
            let (x, y) = clamp_center(best.x, best.y, size * scale, bounds, padding);
            placed.insert(Point::new(x, y));
            layouts.push(ImageLayout {
                id,
                x,
                y,
                rotation: self.settings.sample_rotation(rng),
                scale,
                base_size: size,
                z_index: z_from_index(id),
            });
        }

        if crowded > 0 {
            log::trace!("random layout: {crowded} images placed closer than {min_distance:.1}");
        }

        layouts
    }
}

// ============================================================================
// Neighbor lookup
// ============================================================================

/// Placed centers bucketed into square cells `radius` wide.
///
/// Any point closer than `radius` to a query lies in the query's cell or one
/// of its eight neighbors, so only those are scanned.
struct NeighborGrid {
    origin: Point,
    radius: f64,
    cells: BTreeMap<(i64, i64), Vec<Point>>,
}

impl NeighborGrid {
    fn new(origin: Point, radius: f64) -> Self {
        Self {
            origin,
            radius,
            cells: BTreeMap::new(),
        }
    }

    fn cell(&self, p: Point) -> (i64, i64) {
        // `as` saturates, so far-off points share the edge cells.
        (
            ((p.x - self.origin.x) / self.radius).floor() as i64,
            ((p.y - self.origin.y) / self.radius).floor() as i64,
        )
    }

    fn insert(&mut self, p: Point) {
        if self.radius > 0.0 {
            let key = self.cell(p);
            self.cells.entry(key).or_default().push(p);
        }
    }

    /// Distance to the nearest placed point when it is closer than `radius`;
    /// infinity otherwise.
    fn nearest_within(&self, p: Point) -> f64 {
        if !(self.radius > 0.0) {
            return f64::INFINITY;
        }
        let (cx, cy) = self.cell(p);
        let mut nearest = f64::INFINITY;
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(points) = self.cells.get(&key) {
                    for q in points {
                        nearest = nearest.min(p.distance_to(*q));
                    }
                }
            }
        }
        if nearest < self.radius { nearest } else { f64::INFINITY }
    }
}
