//! Honeycomb placement: uniform hexagonal tiles filled ring by ring.
//!
//! Sizes are uniform and rotation is always zero; variance and rotation
//! settings are ignored so neighbouring tiles stay flush.

use alloc::vec::Vec;

use rand::Rng;

use super::{ImageLayout, LayoutOptions, LayoutSettings, Placement, finite_or};
use crate::geometry::{ContainerBounds, hex_cube_to_pixel, hex_ring_cells};

/// zIndex of the center tile; ring `k` gets `CENTER_Z_INDEX - k`.
const CENTER_Z_INDEX: i32 = 100;

/// Honeycomb layout settings.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct HoneycombConfig {
    /// Gap added to the tile pitch, in pixels.
    pub spacing: f64,
}

impl HoneycombConfig {
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Honeycomb placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HoneycombPlacement {
    pub config: HoneycombConfig,
    pub settings: LayoutSettings,
}

impl HoneycombPlacement {
    pub const fn new(config: HoneycombConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }
}

impl Placement for HoneycombPlacement {
    fn generate<R: Rng + ?Sized>(
        &self,
        image_count: usize,
        bounds: ContainerBounds,
        options: &LayoutOptions,
        _rng: &mut R,
    ) -> Vec<ImageLayout> {
        let mut layouts = Vec::with_capacity(image_count);
        if image_count == 0 {
            return layouts;
        }

        let bounds = bounds.sanitized();
        let size = options.base_size();
        let hex_h = (size + finite_or(self.config.spacing, 0.0)).max(1.0);
        let center = bounds.center();

        log::debug!("honeycomb layout: {image_count} images, pitch {hex_h:.1}");

        let mut ring: u32 = 0;
        while layouts.len() < image_count {
            let z_index = (CENTER_Z_INDEX - i32::try_from(ring).unwrap_or(i32::MAX)).max(1);
            for cube in hex_ring_cells(ring) {
                if layouts.len() >= image_count {
                    break;
                }
                let (x, y) = hex_cube_to_pixel(cube, center.x, center.y, hex_h);
                layouts.push(ImageLayout {
                    id: layouts.len(),
                    x,
                    y,
                    rotation: 0.0,
                    scale: 1.0,
                    base_size: size,
                    z_index,
                });
            }
            ring += 1;
        }

        layouts
    }
}
