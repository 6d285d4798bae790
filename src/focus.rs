//! Focus (zoom) geometry: bring one image to the container center.

use crate::geometry::ContainerBounds;
use crate::placement::{BOUNDING_ASPECT, ImageLayout, finite_or};

/// Focus settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct FocusConfig {
    /// Target height as a multiple of the image's base size.
    pub focus_scale: f64,
    /// Cap on rendered height, as a fraction of container height.
    pub max_height_ratio: f64,
    /// Cap on rendered width, as a fraction of container width.
    pub max_width_ratio: f64,
    pub z_index: i32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            focus_scale: 2.5,
            max_height_ratio: 0.8,
            max_width_ratio: 0.8,
            z_index: 1000,
        }
    }
}

/// Geometry of `layout` while focused.
///
/// Centered, upright, raised to `config.z_index`. The rendered height is
/// `base_size * focus_scale`, reduced to fit the container ratios (widths
/// assume a 1.5:1 image), but never below the image's current scale.
pub fn focus_layout(layout: &ImageLayout, bounds: ContainerBounds, config: &FocusConfig) -> ImageLayout {
    let bounds = bounds.sanitized();
    let center = bounds.center();
    let base = if layout.base_size.is_finite() && layout.base_size > 0.0 {
        layout.base_size
    } else {
        1.0
    };
    let current = finite_or(layout.scale, 1.0);

    let target = (base * finite_or(config.focus_scale, 2.5))
        .min(bounds.height * finite_or(config.max_height_ratio, 0.8))
        .min(bounds.width * finite_or(config.max_width_ratio, 0.8) / BOUNDING_ASPECT);
    let scale = (target / base).max(current);

    log::trace!("focus image {}: scale {current} -> {scale}", layout.id);

    ImageLayout {
        id: layout.id,
        x: center.x,
        y: center.y,
        rotation: 0.0,
        scale,
        base_size: layout.base_size,
        z_index: config.z_index,
    }
}
