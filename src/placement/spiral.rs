//! Spiral placement: images follow a golden-angle, Archimedean, or
//! logarithmic spiral out from the container center.

use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use super::{ImageLayout, LayoutOptions, LayoutSettings, Placement, clamp_center, finite_or};
use crate::geometry::ContainerBounds;
use crate::names::named_enum;

/// 360° / φ², in degrees.
pub const GOLDEN_ANGLE_DEGREES: f64 = 137.507_764_050_037_85;
/// Horizontal stretch applied to spiral offsets.
const SPIRAL_STRETCH: f64 = 1.5;
/// Angular step between consecutive images on Archimedean and log spirals.
const ANGLE_STEP: f64 = 0.5;
/// Growth rate `b` in `r = a·e^(bθ)`.
const LOG_GROWTH: f64 = 0.15;

named_enum! {
    /// Spiral shape.
    pub enum SpiralType ("spiral type") {
        /// Sunflower packing: golden-angle steps, radius ∝ √i.
        Golden = "golden",
        /// Constant spacing between turns.
        Archimedean = "archimedean",
        /// Turns widen exponentially.
        Logarithmic = "logarithmic",
    }
    default Golden;
}

named_enum! {
    /// Screen winding direction.
    pub enum SpiralDirection ("spiral direction") {
        Clockwise = "clockwise" | "cw",
        Counterclockwise = "counterclockwise" | "ccw",
    }
    default Clockwise;
}

impl SpiralDirection {
    /// Angle sign; screen y grows downward, so clockwise is positive.
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::Counterclockwise => -1.0,
        }
    }
}

/// Spiral layout settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SpiralConfig {
    pub spiral_type: SpiralType,
    pub direction: SpiralDirection,
    /// Multiplier on the spiral's radius. Below 1 pulls it inward.
    pub tightness: f64,
    /// 0 disables; 1 shrinks the outermost image to 50%.
    pub scale_decay: f64,
    /// Angle of the first step, in degrees.
    pub start_angle: f64,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            spiral_type: SpiralType::Golden,
            direction: SpiralDirection::Clockwise,
            tightness: 1.0,
            scale_decay: 0.0,
            start_angle: 0.0,
        }
    }
}

impl SpiralConfig {
    pub fn spiral_type(mut self, spiral_type: SpiralType) -> Self {
        self.spiral_type = spiral_type;
        self
    }

    pub fn direction(mut self, direction: SpiralDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn scale_decay(mut self, decay: f64) -> Self {
        self.scale_decay = decay;
        self
    }

    /// Polar position of image `i` of `n`: `(angle radians, radius fraction 0..=1)`.
    fn polar(&self, i: usize, n: usize) -> (f64, f64) {
        let fi = i as f64;
        let last = n.saturating_sub(1) as f64;
        match self.spiral_type {
            SpiralType::Golden => {
                (fi * GOLDEN_ANGLE_DEGREES.to_radians(), (fi / n.max(1) as f64).sqrt())
            }
            SpiralType::Archimedean => {
                let t = if last > 0.0 { fi / last } else { 0.0 };
                (fi * ANGLE_STEP, t)
            }
            SpiralType::Logarithmic => {
                let theta = fi * ANGLE_STEP;
                let theta_max = last * ANGLE_STEP;
                let t = if theta_max > 0.0 {
                    ((LOG_GROWTH * theta).exp() - 1.0) / ((LOG_GROWTH * theta_max).exp() - 1.0)
                } else {
                    0.0
                };
                (theta, t)
            }
        }
    }
}

/// Spiral placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpiralPlacement {
    pub config: SpiralConfig,
    pub settings: LayoutSettings,
}

impl SpiralPlacement {
    pub const fn new(config: SpiralConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }
}

impl Placement for SpiralPlacement {
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

        let cfg = &self.config;
        let bounds = bounds.sanitized();
        let size = options.base_size();
        let padding = self.settings.effective_padding();
        let center = bounds.center();
        let tightness = finite_or(cfg.tightness, 1.0).max(0.0);
        let scale_decay = finite_or(cfg.scale_decay, 0.0).clamp(0.0, 1.0);
        let start = finite_or(cfg.start_angle, 0.0).to_radians();
        let sign = cfg.direction.sign();
        let max_radius = (center.x.min(center.y) - padding - size / 2.0).max(1.0);

        log::debug!(
            "spiral layout: {image_count} images, {} {}, max radius {max_radius:.1}",
            cfg.spiral_type,
            cfg.direction
        );

        for id in 0..image_count {
            let (theta, fraction) = cfg.polar(id, image_count);
            let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 1.0 };
            let radius = fraction * max_radius * tightness;
            let angle = start + sign * theta;
            let scale = (1.0 - fraction * scale_decay * 0.5) * self.settings.sample_scale(rng);
            let (x, y) = clamp_center(
                center.x + angle.cos() * radius * SPIRAL_STRETCH,
                center.y + angle.sin() * radius,
                size * scale,
                bounds,
                padding,
            );
            layouts.push(ImageLayout {
                id,
                x,
                y,
                rotation: self.settings.sample_rotation(rng),
                scale,
                base_size: size,
                z_index: i32::try_from(image_count - id).unwrap_or(i32::MAX).max(1),
            });
        }

        layouts
    }
}
