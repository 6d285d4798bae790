//! Where an image starts its entry animation.
//!
//! All coordinates are image centers, like [`ImageLayout`](crate::ImageLayout).

use core::f64::consts::TAU;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

use crate::geometry::{ContainerBounds, Point};
use crate::names::{Length, named_enum};
use crate::placement::{LayoutAlgorithm, finite_or};
use crate::random::{angle, index};

named_enum! {
    /// Start position rule.
    pub enum EntryStartPosition ("start position") {
        /// Just outside whichever container edge is closest to the final center.
        NearestEdge = "nearest-edge",
        Top = "top",
        Bottom = "bottom",
        Left = "left",
        Right = "right",
        /// The container center, growing from scale 0.
        Center = "center",
        /// A uniformly chosen edge per image.
        RandomEdge = "random-edge",
        /// On a circle around the container center.
        Circular = "circular",
    }
    default NearestEdge;
}

impl EntryStartPosition {
    /// Start position used when none is configured, by layout algorithm.
    pub const fn default_for(algorithm: LayoutAlgorithm) -> Self {
        match algorithm {
            LayoutAlgorithm::Radial | LayoutAlgorithm::Spiral => Self::Center,
            LayoutAlgorithm::Grid => Self::Top,
            LayoutAlgorithm::Wave => Self::Left,
            LayoutAlgorithm::Cluster | LayoutAlgorithm::Random | LayoutAlgorithm::Honeycomb => {
                Self::NearestEdge
            }
        }
    }
}

named_enum! {
    /// Angle assignment on the circular start.
    pub enum CircularDistribution ("circular distribution") {
        /// `index / total · 2π`.
        Even = "even",
        Random = "random",
    }
    default Even;
}

/// Settings for [`EntryStartPosition::Circular`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CircularStartConfig {
    /// Pixels, or percent of half the container diagonal.
    pub radius: Length,
    pub distribution: CircularDistribution,
}

impl Default for CircularStartConfig {
    fn default() -> Self {
        Self {
            radius: Length::Percent(120.0),
            distribution: CircularDistribution::Even,
        }
    }
}

/// Start settings of an entry animation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct EntryStartConfig {
    /// `None` picks [`EntryStartPosition::default_for`] the layout algorithm.
    pub position: Option<EntryStartPosition>,
    /// Extra distance beyond an edge, in pixels.
    pub offset: f64,
    /// Only read for circular starts; `None` uses the defaults.
    pub circular: Option<CircularStartConfig>,
}

impl Default for EntryStartConfig {
    fn default() -> Self {
        Self {
            position: None,
            offset: 100.0,
            circular: None,
        }
    }
}

/// A computed start point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StartPosition {
    pub x: f64,
    pub y: f64,
    /// Animate scale up from 0 (set for center starts).
    pub use_scale: bool,
}

impl StartPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            use_scale: false,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One of the four container edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Edge closest to `p`; ties go to the earlier of left, right, top, bottom.
    pub(crate) fn nearest(p: Point, bounds: ContainerBounds) -> Self {
        let distance = |edge: Edge| match edge {
            Edge::Left => p.x,
            Edge::Right => bounds.width - p.x,
            Edge::Top => p.y,
            Edge::Bottom => bounds.height - p.y,
        };
        let mut best = Edge::Left;
        for edge in Edge::ALL {
            if distance(edge) < distance(best) {
                best = edge;
            }
        }
        best
    }
}

/// Resolve one start point.
///
/// `image_width`/`image_height` are the rendered size; `index`/`total` feed
/// the even circular distribution.
#[allow(clippy::too_many_arguments)]
pub(crate) fn start_position<R: Rng + ?Sized>(
    position: EntryStartPosition,
    config: &EntryStartConfig,
    final_center: Point,
    image_width: f64,
    image_height: f64,
    bounds: ContainerBounds,
    index_and_total: (usize, usize),
    rng: &mut R,
) -> StartPosition {
    let offset = finite_or(config.offset, 100.0);
    let image_width = finite_or(image_width, 0.0).max(0.0);
    let image_height = finite_or(image_height, 0.0).max(0.0);
    let outside = |edge: Edge| match edge {
        Edge::Left => StartPosition::new(-(image_width + offset), final_center.y),
        Edge::Right => StartPosition::new(bounds.width + image_width + offset, final_center.y),
        Edge::Top => StartPosition::new(final_center.x, -(image_height + offset)),
        Edge::Bottom => StartPosition::new(final_center.x, bounds.height + image_height + offset),
    };

    match position {
        EntryStartPosition::NearestEdge => outside(Edge::nearest(final_center, bounds)),
        EntryStartPosition::Top => outside(Edge::Top),
        EntryStartPosition::Bottom => outside(Edge::Bottom),
        EntryStartPosition::Left => outside(Edge::Left),
        EntryStartPosition::Right => outside(Edge::Right),
        EntryStartPosition::RandomEdge => outside(Edge::ALL[index(rng, Edge::ALL.len())]),
        EntryStartPosition::Center => {
            let c = bounds.center();
            StartPosition {
                x: c.x,
                y: c.y,
                use_scale: true,
            }
        }
        EntryStartPosition::Circular => {
            let circular = config.circular.unwrap_or_default();
            let radius = finite_or(circular.radius.resolve(bounds.half_diagonal()), 0.0);
            let (i, total) = index_and_total;
            let theta = match circular.distribution {
                CircularDistribution::Even if total > 0 => i as f64 / total as f64 * TAU,
                CircularDistribution::Even => 0.0,
                CircularDistribution::Random => angle(rng),
            };
            let c = bounds.center();
            StartPosition::new(c.x + theta.cos() * radius, c.y + theta.sin() * radius)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: ContainerBounds = ContainerBounds::new(800.0, 600.0);

    fn start(position: EntryStartPosition, center: Point) -> StartPosition {
        start_position(
            position,
            &EntryStartConfig::default(),
            center,
            150.0,
            100.0,
            BOUNDS,
            (0, 1),
            &mut StdRng::seed_from_u64(1),
        )
    }

    // ── defaults ────────────────────────────────────────────────────────

    #[test]
    fn default_table() {
        use LayoutAlgorithm::*;
        assert_eq!(EntryStartPosition::default_for(Radial), EntryStartPosition::Center);
        assert_eq!(EntryStartPosition::default_for(Spiral), EntryStartPosition::Center);
        assert_eq!(EntryStartPosition::default_for(Grid), EntryStartPosition::Top);
        assert_eq!(EntryStartPosition::default_for(Cluster), EntryStartPosition::NearestEdge);
        assert_eq!(EntryStartPosition::default_for(Random), EntryStartPosition::NearestEdge);
        assert_eq!(EntryStartPosition::default_for(Wave), EntryStartPosition::Left);
        assert_eq!(EntryStartPosition::default_for(Honeycomb), EntryStartPosition::NearestEdge);
    }

    // ── edges ───────────────────────────────────────────────────────────

    #[test]
    fn nearest_edge_left() {
        let s = start(EntryStartPosition::NearestEdge, Point::new(120.0, 310.0));
        assert_eq!(s.x, -(150.0 + 100.0));
        assert_eq!(s.y, 310.0);
        assert!(!s.use_scale);
    }

    #[test]
    fn nearest_edge_each_side() {
        assert_eq!(Edge::nearest(Point::new(700.0, 300.0), BOUNDS), Edge::Right);
        assert_eq!(Edge::nearest(Point::new(400.0, 20.0), BOUNDS), Edge::Top);
        assert_eq!(Edge::nearest(Point::new(400.0, 590.0), BOUNDS), Edge::Bottom);
        // Equidistant from left and top.
        assert_eq!(Edge::nearest(Point::new(10.0, 10.0), BOUNDS), Edge::Left);
    }

    #[test]
    fn named_edges_ignore_distance() {
        let c = Point::new(790.0, 300.0);
        assert_eq!(start(EntryStartPosition::Left, c), StartPosition::new(-250.0, 300.0));
        assert_eq!(start(EntryStartPosition::Top, c), StartPosition::new(790.0, -200.0));
        assert_eq!(start(EntryStartPosition::Bottom, c), StartPosition::new(790.0, 800.0));
        assert_eq!(start(EntryStartPosition::Right, c), StartPosition::new(1050.0, 300.0));
    }

    #[test]
    fn random_edge_is_outside() {
        let mut rng = StdRng::seed_from_u64(4);
        let c = Point::new(400.0, 300.0);
        for _ in 0..50 {
            let s = start_position(
                EntryStartPosition::RandomEdge,
                &EntryStartConfig::default(),
                c,
                150.0,
                100.0,
                BOUNDS,
                (0, 1),
                &mut rng,
            );
            let outside = s.x < 0.0 || s.x > 800.0 || s.y < 0.0 || s.y > 600.0;
            assert!(outside, "{s:?}");
        }
    }

    // ── center & circular ───────────────────────────────────────────────

    #[test]
    fn center_flags_scale() {
        let s = start(EntryStartPosition::Center, Point::new(10.0, 10.0));
        assert_eq!((s.x, s.y), (400.0, 300.0));
        assert!(s.use_scale);
    }

    #[test]
    fn circular_even_default_radius() {
        // Half diagonal of 800x600 is 500; 120% is 600.
        let s = start(EntryStartPosition::Circular, Point::new(0.0, 0.0));
        assert!((s.x - 1000.0).abs() < 1e-9);
        assert!((s.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn circular_even_spreads_by_index() {
        let config = EntryStartConfig {
            circular: Some(CircularStartConfig {
                radius: Length::Pixels(100.0),
                distribution: CircularDistribution::Even,
            }),
            ..EntryStartConfig::default()
        };
        let s = start_position(
            EntryStartPosition::Circular,
            &config,
            Point::new(0.0, 0.0),
            10.0,
            10.0,
            BOUNDS,
            (1, 4),
            &mut StdRng::seed_from_u64(1),
        );
        assert!((s.x - 400.0).abs() < 1e-9);
        assert!((s.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn circular_random_keeps_radius() {
        let config = EntryStartConfig {
            circular: Some(CircularStartConfig {
                radius: Length::Pixels(250.0),
                distribution: CircularDistribution::Random,
            }),
            ..EntryStartConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        for i in 0..20 {
            let s = start_position(
                EntryStartPosition::Circular,
                &config,
                Point::new(0.0, 0.0),
                10.0,
                10.0,
                BOUNDS,
                (i, 20),
                &mut rng,
            );
            assert!((s.point().distance_to(BOUNDS.center()) - 250.0).abs() < 1e-9);
        }
    }
}
