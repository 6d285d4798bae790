//! Grid placement: rows and columns filling the padded container, with
//! optional stagger, jitter, and stacking of images that exceed a fixed
//! grid's capacity.

use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use super::{ImageLayout, LayoutOptions, LayoutSettings, Placement, clamp_center, finite_or, z_from_index};
use crate::geometry::ContainerBounds;
use crate::names::{AutoCount, named_enum};
use crate::random::uniform;
use crate::sizing::ESTIMATED_ASPECT;

/// Jitter displacement as a fraction of the cell, at `jitter == 1`.
const JITTER_CELL_FRACTION: f64 = 0.3;

named_enum! {
    /// Which lines of the grid are offset by half a cell.
    pub enum GridStagger ("grid stagger") {
        None = "none",
        /// Odd rows shift right.
        Row = "row",
        /// Odd columns shift down.
        Column = "column",
    }
    default None;
}

named_enum! {
    /// Order in which cells are filled.
    pub enum FillDirection ("fill direction") {
        Row = "row",
        Column = "column",
    }
    default Row;
}

named_enum! {
    /// Alignment of the last, partially filled line.
    pub enum GridAlignment ("grid alignment") {
        Start = "start",
        Center = "center",
        End = "end",
    }
    default Center;
}

/// Grid layout settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct GridConfig {
    pub columns: AutoCount,
    pub rows: AutoCount,
    pub stagger: GridStagger,
    /// Random displacement, 0 to 1.
    pub jitter: f64,
    /// Space between cells in pixels.
    pub gap: f64,
    /// Lets images grow past their cell, 0 to 1.
    pub overlap: f64,
    pub fill_direction: FillDirection,
    pub alignment: GridAlignment,
    /// Diagonal offset per stacked layer, as a fraction of the cell.
    pub overflow_offset: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: AutoCount::Auto,
            rows: AutoCount::Auto,
            stagger: GridStagger::None,
            jitter: 0.0,
            gap: 10.0,
            overlap: 0.0,
            fill_direction: FillDirection::Row,
            alignment: GridAlignment::Center,
            overflow_offset: 0.25,
        }
    }
}

impl GridConfig {
    /// Fix the column count.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = AutoCount::Fixed(columns);
        self
    }

    /// Fix the row count.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = AutoCount::Fixed(rows);
        self
    }

    pub fn stagger(mut self, stagger: GridStagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn fill_direction(mut self, direction: FillDirection) -> Self {
        self.fill_direction = direction;
        self
    }

    pub fn alignment(mut self, alignment: GridAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Resolve `(columns, rows)` for `image_count` images in an
    /// `avail_w × avail_h` area.
    pub fn dimensions(&self, image_count: usize, avail_w: f64, avail_h: f64) -> (usize, usize) {
        let n = image_count.max(1);
        match (self.columns.fixed(), self.rows.fixed()) {
            (Some(c), Some(r)) => (c, r),
            (Some(c), None) => (c, n.div_ceil(c)),
            (None, Some(r)) => (n.div_ceil(r), r),
            (None, None) => {
                let aspect = avail_w.max(1.0) / avail_h.max(1.0);
                let c = ((n as f64 * aspect / ESTIMATED_ASPECT).sqrt().ceil() as usize).clamp(1, n);
                (c, n.div_ceil(c))
            }
        }
    }
}

/// Grid placement algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GridPlacement {
    pub config: GridConfig,
    pub settings: LayoutSettings,
}

impl GridPlacement {
    pub const fn new(config: GridConfig, settings: LayoutSettings) -> Self {
        Self { config, settings }
    }
}

impl Placement for GridPlacement {
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
        let padding = self.settings.effective_padding();
        let avail_w = (bounds.width - 2.0 * padding).max(1.0);
        let avail_h = (bounds.height - 2.0 * padding).max(1.0);
        let gap = finite_or(cfg.gap, 10.0).max(0.0);
        let jitter = finite_or(cfg.jitter, 0.0).clamp(0.0, 1.0);
        let overlap = finite_or(cfg.overlap, 0.0).clamp(0.0, 1.0);
        let overflow_offset = finite_or(cfg.overflow_offset, 0.25).max(0.0);

        let (cols, rows) = cfg.dimensions(image_count, avail_w, avail_h);
        let capacity = cols.saturating_mul(rows).max(1);
        let cell_w = ((avail_w - gap * (cols - 1) as f64) / cols as f64).max(1.0);
        let cell_h = ((avail_h - gap * (rows - 1) as f64) / rows as f64).max(1.0);
        let size = options
            .base_size()
            .min(cell_h * (1.0 + overlap))
            .min(cell_w / ESTIMATED_ASPECT * (1.0 + overlap))
            .max(1.0);

        // Lines of the first layer; only the final one can be partial.
        let first_layer = image_count.min(capacity);
        let line_len = match cfg.fill_direction {
            FillDirection::Row => cols,
            FillDirection::Column => rows,
        };
        let partial_line = first_layer / line_len;
        let partial_len = first_layer % line_len;

        log::debug!(
            "grid layout: {image_count} images as {cols}x{rows}, cell {cell_w:.1}x{cell_h:.1}, size {size:.1}"
        );

        for id in 0..image_count {
            let slot = id % capacity;
            let layer = (id / capacity) as f64;
            let (col, row) = match cfg.fill_direction {
                FillDirection::Row => (slot % cols, slot / cols),
                FillDirection::Column => (slot / rows, slot % rows),
            };

            let mut x = padding + col as f64 * (cell_w + gap) + cell_w / 2.0;
            let mut y = padding + row as f64 * (cell_h + gap) + cell_h / 2.0;

            // Align the trailing partial line of the first layer.
            let line = match cfg.fill_direction {
                FillDirection::Row => row,
                FillDirection::Column => col,
            };
            if id < capacity && partial_len > 0 && line == partial_line {
                let empty = (line_len - partial_len) as f64;
                let shift = match cfg.alignment {
                    GridAlignment::Start => 0.0,
                    GridAlignment::Center => 0.5,
                    GridAlignment::End => 1.0,
                };
                match cfg.fill_direction {
                    FillDirection::Row => x += empty * (cell_w + gap) * shift,
                    FillDirection::Column => y += empty * (cell_h + gap) * shift,
                }
            }

            match cfg.stagger {
                GridStagger::None => {}
                GridStagger::Row if row % 2 == 1 => x += (cell_w + gap) / 2.0,
                GridStagger::Column if col % 2 == 1 => y += (cell_h + gap) / 2.0,
                _ => {}
            }

            if jitter > 0.0 {
                x += uniform(rng, -1.0, 1.0) * jitter * cell_w * JITTER_CELL_FRACTION;
                y += uniform(rng, -1.0, 1.0) * jitter * cell_h * JITTER_CELL_FRACTION;
            }

            x += layer * overflow_offset * cell_w;
            y += layer * overflow_offset * cell_h;

            let scale = self.settings.sample_scale(rng);
            let (x, y) = clamp_center(x, y, size * scale, bounds, padding);
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

        layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(9)
    }

    fn grid(config: GridConfig) -> GridPlacement {
        GridPlacement::new(config, LayoutSettings::default())
    }

    // ── dimensions ──────────────────────────────────────────────────────

    #[test]
    fn auto_dimensions_cover_count() {
        let cfg = GridConfig::default();
        for n in 1..50 {
            let (c, r) = cfg.dimensions(n, 700.0, 500.0);
            assert!(c * r >= n, "{n}: {c}x{r}");
            assert!(c >= 1 && r >= 1);
        }
    }

    #[test]
    fn fixed_columns_derive_rows() {
        assert_eq!(GridConfig::default().columns(4).dimensions(10, 100.0, 100.0), (4, 3));
        assert_eq!(GridConfig::default().rows(2).dimensions(7, 100.0, 100.0), (4, 2));
        assert_eq!(GridConfig::default().columns(0).dimensions(3, 100.0, 100.0), (1, 3));
    }

    // ── placement ───────────────────────────────────────────────────────

    #[test]
    fn full_rows_share_y() {
        let g = grid(GridConfig::default().columns(3));
        let l = g.generate(6, ContainerBounds::new(900.0, 700.0), &LayoutOptions::default(), &mut rng());
        assert_eq!(l.len(), 6);
        assert_eq!(l[0].y, l[1].y);
        assert_eq!(l[1].y, l[2].y);
        assert!(l[3].y > l[0].y);
        assert!(l[0].x < l[1].x && l[1].x < l[2].x);
    }

    #[test]
    fn column_fill_goes_down_first() {
        let g = grid(GridConfig::default().rows(2).fill_direction(FillDirection::Column));
        let l = g.generate(4, ContainerBounds::new(900.0, 700.0), &LayoutOptions::default(), &mut rng());
        assert_eq!(l[0].x, l[1].x);
        assert!(l[1].y > l[0].y);
        assert!(l[2].x > l[0].x);
    }

    #[test]
    fn partial_row_is_centered() {
        let g = grid(GridConfig::default().columns(3));
        let b = ContainerBounds::new(1000.0, 800.0);
        let l = g.generate(4, b, &LayoutOptions::with_fixed_height(50.0), &mut rng());
        assert!((l[3].x - l[1].x).abs() < 1e-9);
    }

    #[test]
    fn start_alignment_keeps_first_column() {
        let g = grid(GridConfig::default().columns(3).alignment(GridAlignment::Start));
        let l = g.generate(4, ContainerBounds::new(1000.0, 800.0), &LayoutOptions::with_fixed_height(50.0), &mut rng());
        assert!((l[3].x - l[0].x).abs() < 1e-9);
    }

    #[test]
    fn row_stagger_shifts_odd_rows() {
        let g = grid(GridConfig::default().columns(3).stagger(GridStagger::Row));
        let l = g.generate(6, ContainerBounds::new(1200.0, 800.0), &LayoutOptions::with_fixed_height(50.0), &mut rng());
        assert!(l[3].x > l[0].x);
    }

    #[test]
    fn overflow_stacks_with_higher_z() {
        let g = grid(GridConfig::default().columns(2).rows(2));
        let l = g.generate(6, ContainerBounds::new(1200.0, 1000.0), &LayoutOptions::with_fixed_height(50.0), &mut rng());
        assert_eq!(l.len(), 6);
        // Image 4 lands on image 0's cell, pushed down-right.
        assert!(l[4].x > l[0].x && l[4].y > l[0].y);
        assert!(l[4].z_index > l[0].z_index);
    }

    #[test]
    fn jitter_moves_images_within_bounds() {
        let g = grid(GridConfig::default().jitter(1.0));
        let b = ContainerBounds::new(800.0, 600.0);
        let l = g.generate(12, b, &LayoutOptions::default(), &mut rng());
        assert!(l.iter().all(|p| p.x >= 0.0 && p.x <= 800.0 && p.y >= 0.0 && p.y <= 600.0));
    }

    #[test]
    fn size_fits_cells() {
        let g = grid(GridConfig::default().columns(10).rows(10));
        let l = g.generate(100, ContainerBounds::new(1000.0, 1000.0), &LayoutOptions::default(), &mut rng());
        assert!(l.iter().all(|p| p.base_size < 200.0));
    }

    #[test]
    fn degenerate_container() {
        let g = grid(GridConfig::default());
        let l = g.generate(9, ContainerBounds::new(-10.0, 0.0), &LayoutOptions::default(), &mut rng());
        assert_eq!(l.len(), 9);
        assert!(l.iter().all(ImageLayout::is_finite));
    }
}
