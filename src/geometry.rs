//! Container bounds, points, and flat-top hex grid math.
//!
//! The hex grid uses cube coordinates `(x, y, z)` with `x + y + z == 0`.
//! Pitch ratios come from [`HEXAGON_REFERENCE_POINTS`], the same polygon
//! [`hexagon_clip_path`] emits for clipping images, so layout spacing and
//! the visible shape cannot drift apart.
//!
//! # Example
//!
//! ```
//! use cloudlayout::geometry::{HexCube, hex_cube_to_pixel, hex_ring_cells};
//!
//! assert_eq!(hex_cube_to_pixel(HexCube::new(1, 0, -1), 100.0, 100.0, 80.0), (160.0, 140.0));
//! assert_eq!(hex_ring_cells(2).len(), 12);
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

#[allow(unused_imports)]
use num_traits::Float;

/// Pixel dimensions of the mounting element, snapshotted per layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerBounds {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl ContainerBounds {
    /// Create new bounds.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Geometric center of the container.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Half the diagonal length.
    pub fn half_diagonal(&self) -> f64 {
        (self.width * self.width + self.height * self.height).sqrt() / 2.0
    }

    /// Whether either dimension is zero, negative, or not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Bounds with non-finite or negative dimensions replaced by zero.
    pub(crate) fn sanitized(self) -> Self {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(fix(self.width), fix(self.height))
    }
}

/// A point in container-relative pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

// ============================================================================
// Hexagon reference shape
// ============================================================================

/// Height of the reference hexagon, in reference units.
pub const HEXAGON_REFERENCE_HEIGHT: f64 = 100.0;

/// Flat-top hexagon vertices in a 100×100 reference box, clockwise from the
/// top-left vertex.
///
/// ```text
///      (25,0)____(75,0)
///           /    \
///   (0,50) <      > (100,50)
///           \____/
///     (25,100)   (75,100)
/// ```
pub const HEXAGON_REFERENCE_POINTS: [(f64, f64); 6] = [
    (25.0, 0.0),
    (75.0, 0.0),
    (100.0, 50.0),
    (75.0, 100.0),
    (25.0, 100.0),
    (0.0, 50.0),
];

/// Horizontal distance between adjacent hex columns, as a fraction of hex height.
///
/// A neighbouring column starts where the top-right vertex sits (x = 75).
pub const HEX_COL_STEP_RATIO: f64 = HEXAGON_REFERENCE_POINTS[1].0 / HEXAGON_REFERENCE_HEIGHT;

/// Vertical offset of odd hex columns, as a fraction of hex height.
///
/// Equal to the height of the side vertex (y = 50).
pub const HEX_ROW_OFFSET_RATIO: f64 = HEXAGON_REFERENCE_POINTS[2].1 / HEXAGON_REFERENCE_HEIGHT;

/// CSS `clip-path` value for the reference hexagon.
pub fn hexagon_clip_path() -> String {
    let mut out = String::from("polygon(");
    for (i, (x, y)) in HEXAGON_REFERENCE_POINTS.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "{}% {}%",
            x / HEXAGON_REFERENCE_HEIGHT * 100.0,
            y / HEXAGON_REFERENCE_HEIGHT * 100.0
        );
    }
    out.push(')');
    out
}

// ============================================================================
// Cube coordinates
// ============================================================================

/// Cube coordinate on a flat-top hex grid. Invariant: `x + y + z == 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl HexCube {
    /// The center cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a cube coordinate. Debug builds assert `x + y + z == 0`.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0);
        Self { x, y, z }
    }

    /// Hex distance from the origin (the ring index this cell belongs to).
    pub fn ring(self) -> u32 {
        self.x
            .unsigned_abs()
            .max(self.y.unsigned_abs())
            .max(self.z.unsigned_abs())
    }

    fn step(self, dir: (i32, i32, i32)) -> Self {
        Self {
            x: self.x + dir.0,
            y: self.y + dir.1,
            z: self.z + dir.2,
        }
    }
}

/// Walk directions for ring enumeration. Starting from the top cell this
/// order traces the ring clockwise on screen (y grows downward).
const RING_DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
    (1, -1, 0),
];

/// Convert a cube coordinate to the pixel center of its cell.
///
/// `hex_h` is the cell pitch (visual height plus any spacing).
pub fn hex_cube_to_pixel(cube: HexCube, origin_x: f64, origin_y: f64, hex_h: f64) -> (f64, f64) {
    let col_step = HEX_COL_STEP_RATIO * hex_h;
    let px = origin_x + col_step * cube.x as f64;
    let py = origin_y + hex_h * (cube.y as f64 + cube.x as f64 * HEX_ROW_OFFSET_RATIO);
    (px, py)
}

/// All cells at hex distance `ring` from the origin, clockwise from the top.
///
/// Ring 0 is the single origin cell; ring `k > 0` has exactly `6k` cells.
pub fn hex_ring_cells(ring: u32) -> Vec<HexCube> {
    if ring == 0 {
        return alloc::vec![HexCube::ORIGIN];
    }
    let r = ring as i32;
    let mut cells = Vec::with_capacity(6 * ring as usize);
    let mut cube = HexCube::new(0, -r, r);
    for dir in RING_DIRECTIONS {
        for _ in 0..ring {
            cells.push(cube);
            cube = cube.step(dir);
        }
    }
    cells
}

/// Ramanujan's second approximation of an ellipse perimeter.
///
/// Written in terms of `h = ((rx - ry) / (rx + ry))²` so no intermediate
/// grows past `rx + ry`.
pub(crate) fn ellipse_circumference(rx: f64, ry: f64) -> f64 {
    let sum = rx + ry;
    if !(sum > 0.0) {
        return 0.0;
    }
    let h = ((rx - ry) / sum).powi(2);
    core::f64::consts::PI * sum * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}
