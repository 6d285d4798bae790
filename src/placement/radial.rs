//! Radial placement: one focal image at the center, concentric elliptical
//! rings around it.

use alloc::vec::Vec;
use core::f64::consts::TAU;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use super::{ImageLayout, LayoutOptions, LayoutSettings, Placement, clamp_center, finite_or, sample_rotation};
use crate::geometry::{ContainerBounds, ellipse_circumference};

/// Horizontal stretch of each ring relative to its vertical radius.
const ELLIPSE_STRETCH: f64 = 1.5;
/// Estimated on-screen width of an image relative to its height.
const ESTIMATED_WIDTH_FACTOR: f64 = 1.4;
/// Packs items ~40% denser than their estimated width.
const DENSITY_FACTOR: f64 = 0.7;
/// Extra angular offset per ring so rings don't line up radially.
const RING_OFFSET_DEGREES: f64 = 20.0;
/// zIndex of the center image; ring `k` gets `CENTER_Z_INDEX - k`.
const CENTER_Z_INDEX: i32 = 100;
/// Smallest ring step as a fraction of image size, so rings always grow.
const MIN_RING_STEP_FRACTION: f64 = 0.01;
/// Largest vertical ring radius; keeps the stretched radius and perimeter finite.
const MAX_RING_RADIUS: f64 = f64::MAX / 8.0;

/// Radial layout settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct RadialConfig {
    /// Multiplier on the ring-to-ring distance. Below 1 packs rings tighter.
    pub tightness: f64,
    /// 0 disables; 1 shrinks the outermost estimated ring to 50%.
    pub scale_decay: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            tightness: 1.0,
            scale_decay: 0.0,
        }
    }
}

impl RadialConfig {
    /// Set ring tightness.
    pub fn tightness(mut self, tightness: f64) -> Self {
        self.tightness = tightness;
        self
    }

    /// Set outer-ring scale decay.
    pub fn scale_decay(mut self, decay: f64) -> Self {
        self.scale_decay = decay;
        self
    }
}

/// Radial placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RadialPlacement {
    pub config: RadialConfig,
    pub settings: LayoutSettings,
}

impl RadialPlacement {
    pub const fn new(config: RadialConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }
}

impl Placement for RadialPlacement {
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
        let center = bounds.center();
        let tightness = finite_or(self.config.tightness, 1.0).max(0.0);
        let scale_decay = finite_or(self.config.scale_decay, 0.0).clamp(0.0, 1.0);

        let estimated_max_rings = (image_count as f64).sqrt().ceil().max(1.0);
        let max_radius = (center.x.min(center.y) - padding - size / 2.0).max(1.0);
        let ring_step = (max_radius / estimated_max_rings * tightness).max(size * MIN_RING_STEP_FRACTION);
        let item_width = size * ESTIMATED_WIDTH_FACTOR * DENSITY_FACTOR;

        log::debug!(
            "radial layout: {image_count} images in {}x{}, size {size}, max radius {max_radius:.1}",
            bounds.width,
            bounds.height
        );

        // Focal image: exact center, calmer rotation.
        layouts.push(ImageLayout {
            id: 0,
            x: center.x,
            y: center.y,
            rotation: sample_rotation(&self.settings.image, 1.0 / 3.0, rng),
            scale: self.settings.sample_scale(rng),
            base_size: size,
            z_index: CENTER_Z_INDEX,
        });

        let mut ring: u32 = 1;
        while layouts.len() < image_count {
            let radius_y = (ring as f64 * ring_step).min(MAX_RING_RADIUS);
            let radius_x = radius_y * ELLIPSE_STRETCH;
            let slots = (ellipse_circumference(radius_x, radius_y) / item_width).floor();
            let items_in_ring = if slots.is_finite() {
                slots as usize
            } else {
                image_count - layouts.len()
            };
            if items_in_ring == 0 {
                ring += 1;
                continue;
            }

            let normalized_ring = (ring as f64 / estimated_max_rings).min(1.0);
            let ring_scale = 1.0 - normalized_ring * scale_decay * 0.5;
            let angle_step = TAU / items_in_ring as f64;
            let ring_offset = (ring as f64 * RING_OFFSET_DEGREES).to_radians();
            let z_index = (CENTER_Z_INDEX - i32::try_from(ring).unwrap_or(i32::MAX)).max(1);
            log::trace!("radial ring {ring}: {items_in_ring} slots, radius {radius_x:.1}x{radius_y:.1}");

            for i in 0..items_in_ring {
                if layouts.len() >= image_count {
                    break;
                }
                let angle = i as f64 * angle_step + ring_offset;
                let scale = ring_scale * self.settings.sample_scale(rng);
                let (x, y) = clamp_center(
                    center.x + angle.cos() * radius_x,
                    center.y + angle.sin() * radius_y,
                    size * scale,
                    bounds,
                    padding,
                );
                layouts.push(ImageLayout {
                    id: layouts.len(),
                    x,
                    y,
                    rotation: self.settings.sample_rotation(rng),
                    scale,
                    base_size: size,
                    z_index,
                });
            }
            ring += 1;
        }

        layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImageConfig, RotationConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn radial() -> RadialPlacement {
        RadialPlacement::default()
    }

    // ── counts ──────────────────────────────────────────────────────────

    #[test]
    fn empty_is_empty() {
        let l = radial().generate(0, ContainerBounds::new(800.0, 600.0), &LayoutOptions::default(), &mut rng());
        assert!(l.is_empty());
    }

    #[test]
    fn single_image_exact_center() {
        let l = radial().generate(1, ContainerBounds::new(800.0, 600.0), &LayoutOptions::default(), &mut rng());
        assert_eq!(l.len(), 1);
        assert_eq!((l[0].x, l[0].y), (400.0, 300.0));
        assert_eq!(l[0].z_index, 100);
    }

    #[test]
    fn seven_images_rings() {
        let l = radial().generate(
            7,
            ContainerBounds::new(800.0, 600.0),
            &LayoutOptions::with_fixed_height(100.0),
            &mut rng(),
        );
        assert_eq!(l.len(), 7);
        assert_eq!(l[0].id, 0);
        assert_eq!((l[0].x, l[0].y), (400.0, 300.0));
        assert_eq!(l[0].z_index, 100);
        for w in l[1..].windows(2) {
            assert!(w[0].z_index >= w[1].z_index);
        }
        assert!(l[1..].iter().all(|x| x.z_index < 100));
        // Ring 1 fits five 100px images (circumference ~529 / 98).
        assert!(l[1..6].iter().all(|x| x.z_index == 99));
        assert_eq!(l[6].z_index, 98);
    }

    #[test]
    fn ids_are_ordinals() {
        let l = radial().generate(40, ContainerBounds::new(1200.0, 900.0), &LayoutOptions::default(), &mut rng());
        for (i, layout) in l.iter().enumerate() {
            assert_eq!(layout.id, i);
        }
    }

    // ── geometry ────────────────────────────────────────────────────────

    #[test]
    fn ring_is_wider_than_tall() {
        let l = radial().generate(
            6,
            ContainerBounds::new(2000.0, 2000.0),
            &LayoutOptions::with_fixed_height(100.0),
            &mut rng(),
        );
        let max_dx = l.iter().map(|p| (p.x - 1000.0).abs()).fold(0.0, f64::max);
        let max_dy = l.iter().map(|p| (p.y - 1000.0).abs()).fold(0.0, f64::max);
        assert!(max_dx > max_dy);
    }

    #[test]
    fn stays_inside_padded_bounds() {
        let b = ContainerBounds::new(800.0, 600.0);
        let l = radial().generate(60, b, &LayoutOptions::with_fixed_height(80.0), &mut rng());
        for p in &l {
            let half_w = p.rendered_height() * 0.75;
            let half_h = p.rendered_height() / 2.0;
            assert!(p.x - half_w >= 50.0 - 1e-9 && p.x + half_w <= 750.0 + 1e-9, "{p:?}");
            assert!(p.y - half_h >= 50.0 - 1e-9 && p.y + half_h <= 550.0 + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn scale_decay_shrinks_outer_rings() {
        let p = RadialPlacement::new(RadialConfig::default().scale_decay(1.0), LayoutSettings::default());
        let l = p.generate(30, ContainerBounds::new(1600.0, 1200.0), &LayoutOptions::with_fixed_height(60.0), &mut rng());
        assert_eq!(l[0].scale, 1.0);
        let last = l.last().unwrap();
        assert!(last.scale < 1.0 && last.scale >= 0.5);
    }

    #[test]
    fn center_rotation_is_calmer() {
        let settings = LayoutSettings::default()
            .image(ImageConfig::default().rotation(RotationConfig::random(-30.0, 30.0)));
        let p = RadialPlacement::new(RadialConfig::default(), settings);
        let mut r = rng();
        for _ in 0..50 {
            let l = p.generate(1, ContainerBounds::new(800.0, 600.0), &LayoutOptions::default(), &mut r);
            assert!(l[0].rotation.abs() <= 10.0 + 1e-9);
        }
    }

    // ── degenerate input ────────────────────────────────────────────────

    #[test]
    fn zero_container_is_finite() {
        let l = radial().generate(25, ContainerBounds::new(0.0, 0.0), &LayoutOptions::default(), &mut rng());
        assert_eq!(l.len(), 25);
        assert!(l.iter().all(ImageLayout::is_finite));
    }

    #[test]
    fn huge_tightness_terminates() {
        let p = RadialPlacement::new(RadialConfig::default().tightness(1e300), LayoutSettings::default());
        let l = p.generate(3, ContainerBounds::new(800.0, 600.0), &LayoutOptions::with_fixed_height(100.0), &mut rng());
        assert_eq!(l.len(), 3);
        assert!(l.iter().all(ImageLayout::is_finite));
    }

    #[test]
    fn huge_container_terminates() {
        let l = radial().generate(
            12,
            ContainerBounds::new(1e300, 1e300),
            &LayoutOptions::with_fixed_height(100.0),
            &mut rng(),
        );
        assert_eq!(l.len(), 12);
        assert!(l.iter().all(ImageLayout::is_finite));
    }

    #[test]
    fn zero_tightness_terminates() {
        let p = RadialPlacement::new(RadialConfig::default().tightness(0.0), LayoutSettings::default());
        let l = p.generate(10, ContainerBounds::new(800.0, 600.0), &LayoutOptions::default(), &mut rng());
        assert_eq!(l.len(), 10);
    }
}
