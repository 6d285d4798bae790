//! Placement algorithms and entry-animation math for image cloud galleries.
//!
//! Pure geometry: no DOM, no pixels, no I/O. `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`geometry`] — Container bounds, points, flat-top hex grid math
//! - [`config`] — Shared image configuration (sizing, variance, rotation)
//! - [`sizing`] — Adaptive base image height
//! - [`placement`] — Radial, grid, spiral, cluster, wave, honeycomb and random layouts
//! - [`entry`] — Entry start positions, rotation/scale modes, paths, per-frame playback
//! - [`transform`] — CSS transform strings for center-positioned elements
//! - [`focus`] — Zoomed geometry for a focused image
//! - `svg` — SVG rendering of a layout pass (feature `svg`)
//!
//! # Example
//!
//! ```
//! use cloudlayout::{ContainerBounds, LayoutAlgorithm, LayoutConfig, generate_layouts_with};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let config = LayoutConfig::for_algorithm(LayoutAlgorithm::Spiral);
//! let layouts = generate_layouts_with(&config, 24, ContainerBounds::new(1200.0, 800.0), &mut rng);
//! assert_eq!(layouts.len(), 24);
//! assert!(layouts.iter().enumerate().all(|(i, l)| l.id == i));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod names;
mod random;

pub mod config;
pub mod entry;
pub mod focus;
pub mod geometry;
pub mod placement;
pub mod sizing;
#[cfg(feature = "svg")]
pub mod svg;
pub mod transform;

pub use config::{ImageConfig, RotationConfig, RotationMode, SizingConfig, ValueRange};
pub use entry::{EntryAnimationConfig, EntryAnimationEngine, EntryStartPosition, StartPosition};
pub use error::ParseError;
pub use focus::{FocusConfig, focus_layout};
pub use geometry::{ContainerBounds, HexCube, Point};
pub use names::{AutoCount, Length};
pub use placement::{
    ImageLayout, LayoutAlgorithm, LayoutConfig, LayoutOptions, LayoutSettings, Placement,
    PlacementLayout, generate_layouts_with,
};
#[cfg(feature = "std")]
pub use placement::generate_layouts;
pub use random::{standard_normal, uniform};
