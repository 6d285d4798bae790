//! Base image height for a layout pass.
//!
//! Either the configured fixed height or an adaptive height chosen so that
//! `image_count` images at a 1.4:1 aspect cover roughly `fill_ratio` of the
//! container, clamped to the configured limits.

#[allow(unused_imports)]
use num_traits::Float;

use crate::config::SizingConfig;
use crate::geometry::ContainerBounds;
use crate::placement::{LayoutOptions, finite_or};

/// Assumed width:height ratio of an average image when estimating coverage.
pub const ESTIMATED_ASPECT: f64 = 1.4;

/// Resolve the base image height in pixels.
///
/// Always finite and at least 1.
pub fn image_height(config: &SizingConfig, image_count: usize, bounds: ContainerBounds) -> f64 {
    if let Some(h) = config.fixed_height
        && h.is_finite()
        && h > 0.0
    {
        return h;
    }

    let min = finite_or(config.min_height, 100.0).max(1.0);
    let max = finite_or(config.max_height, 300.0).max(min);
    if image_count == 0 {
        return max;
    }

    let bounds = bounds.sanitized();
    let area = bounds.width * bounds.height * finite_or(config.fill_ratio, 0.6).clamp(0.0, 1.0);
    let h = (area / (image_count as f64 * ESTIMATED_ASPECT)).sqrt();
    h.clamp(min, max)
}

/// [`LayoutOptions`] carrying the resolved height.
pub fn layout_options(config: &SizingConfig, image_count: usize, bounds: ContainerBounds) -> LayoutOptions {
    LayoutOptions::with_fixed_height(image_height(config, image_count, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_height_wins() {
        let cfg = SizingConfig {
            fixed_height: Some(120.0),
            ..SizingConfig::default()
        };
        assert_eq!(image_height(&cfg, 50, ContainerBounds::new(800.0, 600.0)), 120.0);
    }

    #[test]
    fn invalid_fixed_height_is_ignored() {
        let cfg = SizingConfig {
            fixed_height: Some(-4.0),
            ..SizingConfig::default()
        };
        let h = image_height(&cfg, 4, ContainerBounds::new(800.0, 600.0));
        assert!((100.0..=300.0).contains(&h));
    }

    #[test]
    fn adaptive_shrinks_with_count() {
        let cfg = SizingConfig::default();
        let bounds = ContainerBounds::new(1600.0, 1200.0);
        let few = image_height(&cfg, 10, bounds);
        let many = image_height(&cfg, 40, bounds);
        assert!(few > many);
        // 1600*1200*0.6 / (10*1.4) = 82285.7 -> sqrt ~ 286.9
        assert!((few - 286.85).abs() < 0.1);
    }

    #[test]
    fn adaptive_clamps() {
        let cfg = SizingConfig::default();
        assert_eq!(image_height(&cfg, 1, ContainerBounds::new(4000.0, 4000.0)), 300.0);
        assert_eq!(image_height(&cfg, 500, ContainerBounds::new(400.0, 300.0)), 100.0);
        assert_eq!(image_height(&cfg, 0, ContainerBounds::new(400.0, 300.0)), 300.0);
    }

    #[test]
    fn degenerate_bounds_hit_minimum() {
        let cfg = SizingConfig::default();
        assert_eq!(image_height(&cfg, 5, ContainerBounds::new(0.0, -10.0)), 100.0);
    }

    #[test]
    fn options_carry_height() {
        let cfg = SizingConfig {
            fixed_height: Some(90.0),
            ..SizingConfig::default()
        };
        let opts = layout_options(&cfg, 3, ContainerBounds::new(10.0, 10.0));
        assert_eq!(opts.fixed_height, Some(90.0));
    }
}
