//! Wave placement: rows of images riding sine waves across the container.

use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use super::{
    BOUNDING_ASPECT, ImageLayout, LayoutOptions, LayoutSettings, Placement, axis_range, clamp_center,
    finite_or, z_from_index,
};
use crate::config::RotationMode;
use crate::geometry::ContainerBounds;
use crate::names::named_enum;

named_enum! {
    /// How the phase of each row relates to the others.
    pub enum WaveSync ("wave synchronization") {
        /// Each row is shifted by `π / rows` from the previous one.
        Offset = "offset",
        /// Every row shares the same phase.
        Synchronized = "synchronized" | "sync",
        /// Odd rows are inverted.
        Alternating = "alternating",
    }
    default Offset;
}

/// Wave layout settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct WaveConfig {
    pub rows: usize,
    /// Peak displacement from a row's baseline, in pixels.
    pub amplitude: f64,
    /// Full cycles across the usable width.
    pub frequency: f64,
    /// Base phase in radians.
    pub phase_shift: f64,
    pub synchronization: WaveSync,
    /// Tilt images along the wave tangent when rotation is not random.
    pub follow_wave: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            amplitude: 100.0,
            frequency: 2.0,
            phase_shift: 0.0,
            synchronization: WaveSync::Offset,
            follow_wave: false,
        }
    }
}

impl WaveConfig {
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn synchronization(mut self, sync: WaveSync) -> Self {
        self.synchronization = sync;
        self
    }

    pub fn follow_wave(mut self, follow: bool) -> Self {
        self.follow_wave = follow;
        self
    }

    /// Phase of `row` out of `rows`, in radians.
    pub fn row_phase(&self, row: usize, rows: usize) -> f64 {
        let base = finite_or(self.phase_shift, 0.0);
        match self.synchronization {
            WaveSync::Synchronized => base,
            WaveSync::Offset => base + row as f64 * PI / rows.max(1) as f64,
            WaveSync::Alternating => base + if row % 2 == 1 { PI } else { 0.0 },
        }
    }
}

/// Wave placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WavePlacement {
    pub config: WaveConfig,
    pub settings: LayoutSettings,
}

impl WavePlacement {
    pub const fn new(config: WaveConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }
}

impl Placement for WavePlacement {
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
        let frequency = finite_or(cfg.frequency, 2.0);

        let per_row = image_count.div_ceil(cfg.rows.clamp(1, image_count));
        let rows = image_count.div_ceil(per_row);
        let band = ((bounds.height - 2.0 * padding) / rows as f64).max(0.0);
        let amplitude = finite_or(cfg.amplitude, 100.0).abs().min(band / 2.0);
        let half_w = size * BOUNDING_ASPECT / 2.0;
        let (x_lo, x_hi) = axis_range(padding + half_w, bounds.width - padding - half_w);
        let span = x_hi - x_lo;

        log::debug!(
            "wave layout: {image_count} images in {rows} rows of {per_row}, amplitude {amplitude:.1}, {}",
            cfg.synchronization
        );

        for id in 0..image_count {
            let row = id / per_row;
            let col = id % per_row;
            let in_row = per_row.min(image_count - row * per_row);
            let u = if in_row > 1 {
                col as f64 / (in_row - 1) as f64
            } else {
                0.5
            };
            let theta = TAU * frequency * u + cfg.row_phase(row, rows);
            let base_y = padding + band * (row as f64 + 0.5);

            let scale = self.settings.sample_scale(rng);
            let rotation = match self.settings.image.rotation.mode {
                RotationMode::Random => self.settings.sample_rotation(rng),
                RotationMode::None if cfg.follow_wave && span > 0.0 => {
                    let slope = amplitude * TAU * frequency * theta.cos() / span;
                    slope.atan().to_degrees()
                }
                RotationMode::None => 0.0,
            };
            let (x, y) = clamp_center(
                x_lo + u * span,
                base_y + amplitude * theta.sin(),
                size * scale,
                bounds,
                padding,
            );

            layouts.push(ImageLayout {
                id,
                x,
                y,
                rotation,
                scale,
                base_size: size,
                z_index: z_from_index(id),
            });
        }

        layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run(config: WaveConfig, n: usize, height: f64) -> Vec<ImageLayout> {
        WavePlacement::new(config, LayoutSettings::default()).generate(
            n,
            ContainerBounds::new(800.0, 600.0),
            &LayoutOptions::with_fixed_height(height),
            &mut StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn flat_wave_spaces_evenly() {
        let l = run(WaveConfig::default().amplitude(0.0), 5, 100.0);
        let xs: Vec<f64> = l.iter().map(|p| p.x).collect();
        assert_eq!(xs, [125.0, 262.5, 400.0, 537.5, 675.0]);
        assert!(l.iter().all(|p| p.y == 300.0));
    }

    #[test]
    fn amplitude_capped_to_row_band() {
        let l = run(WaveConfig::default().rows(2).amplitude(1000.0), 20, 50.0);
        for p in &l {
            let base = if p.id < 10 { 175.0 } else { 425.0 };
            assert!((p.y - base).abs() <= 125.0 + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn alternating_rows_mirror() {
        let cfg = WaveConfig::default()
            .rows(2)
            .amplitude(50.0)
            .synchronization(WaveSync::Alternating);
        let l = run(cfg, 10, 40.0);
        for j in 0..5 {
            let a = l[j].y - 175.0;
            let b = l[j + 5].y - 425.0;
            assert!((a + b).abs() < 1e-9, "col {j}: {a} vs {b}");
        }
    }

    #[test]
    fn synchronized_rows_match() {
        let cfg = WaveConfig::default()
            .rows(2)
            .amplitude(50.0)
            .synchronization(WaveSync::Synchronized);
        let l = run(cfg, 10, 40.0);
        for j in 0..5 {
            assert!(((l[j].y - 175.0) - (l[j + 5].y - 425.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn follow_wave_tilts_along_slope() {
        let cfg = WaveConfig::default().amplitude(50.0).frequency(1.0).follow_wave(true);
        let l = run(cfg, 5, 60.0);
        assert!(l[0].rotation > 0.0);
        assert!(l[1].rotation.abs() < 1e-9);
        assert!(l[2].rotation < 0.0);
    }

    #[test]
    fn no_tilt_without_follow() {
        let l = run(WaveConfig::default(), 9, 60.0);
        assert!(l.iter().all(|p| p.rotation == 0.0));
    }

    #[test]
    fn more_rows_than_images() {
        let l = run(WaveConfig::default().rows(12), 3, 60.0);
        assert_eq!(l.len(), 3);
        assert_eq!(l.iter().map(|p| p.z_index).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(l.iter().all(ImageLayout::is_finite));
    }
}
