//! SVG visualization of a layout pass.
//!
//! Draws the container, its padded area, and one rotated 1.5:1 box per image
//! labelled with its id, painted in stacking order.
//!
//! # Example
//!
//! ```
//! use cloudlayout::{ContainerBounds, LayoutAlgorithm, LayoutConfig, generate_layouts_with};
//! use cloudlayout::svg::render_layouts_svg;
//! use rand::SeedableRng;
//!
//! let config = LayoutConfig::for_algorithm(LayoutAlgorithm::Honeycomb);
//! let bounds = ContainerBounds::new(800.0, 600.0);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let layouts = generate_layouts_with(&config, 12, bounds, &mut rng);
//!
//! let svg = render_layouts_svg(bounds, config.settings.padding, &layouts);
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

#[allow(unused_imports)]
use num_traits::Float;

use crate::geometry::ContainerBounds;
use crate::placement::{BOUNDING_ASPECT, ImageLayout};

/// Margin around the container frame.
const MARGIN: f64 = 20.0;
/// Height of the caption line above the frame.
const CAPTION_H: f64 = 22.0;

/// Render `layouts` inside `bounds` as a complete SVG document.
pub fn render_layouts_svg(bounds: ContainerBounds, padding: f64, layouts: &[ImageLayout]) -> String {
    let bounds = bounds.sanitized();
    let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
    let total_w = bounds.width + 2.0 * MARGIN;
    let total_h = bounds.height + 2.0 * MARGIN + CAPTION_H;
    let ox = MARGIN;
    let oy = MARGIN + CAPTION_H;

    let mut svg = String::with_capacity(1024 + layouts.len() * 256);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    );

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .caption { font-size: 13px; font-weight: bold; fill: #333; }
  .id { font-size: 11px; fill: #fff; }
  .container { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .padded { fill: none; stroke: #aaa; stroke-width: 1; stroke-dasharray: 4,2; }
  .image { fill: #6ba3d6; fill-opacity: 0.85; stroke: #2c6faa; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .caption { fill: #e0e0e0; }
    .container { fill: #2d2d2d; stroke: #555; }
    .padded { stroke: #666; }
    .image { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let _ = writeln!(
        svg,
        r#"<text x="{ox}" y="{:.1}" class="caption">{}</text>"#,
        MARGIN + 14.0,
        escape_xml(&format!("{} images  {}×{}", layouts.len(), bounds.width, bounds.height))
    );
    let _ = writeln!(
        svg,
        r#"<rect x="{ox:.1}" y="{oy:.1}" width="{:.1}" height="{:.1}" class="container"/>"#,
        bounds.width, bounds.height
    );
    if padding > 0.0 && 2.0 * padding < bounds.width && 2.0 * padding < bounds.height {
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="padded"/>"#,
            ox + padding,
            oy + padding,
            bounds.width - 2.0 * padding,
            bounds.height - 2.0 * padding
        );
    }

    // Painter's order: lowest z first; ties keep input order.
    let mut order: Vec<&ImageLayout> = layouts.iter().filter(|l| l.is_finite()).collect();
    order.sort_by_key(|l| l.z_index);

    for l in order {
        let h = l.rendered_height();
        let w = h * BOUNDING_ASPECT;
        let cx = ox + l.x;
        let cy = oy + l.y;
        let _ = writeln!(
            svg,
            r#"<g transform="rotate({:.2} {cx:.1} {cy:.1})"><rect x="{:.1}" y="{:.1}" width="{w:.1}" height="{h:.1}" class="image" rx="2"/><text x="{cx:.1}" y="{:.1}" class="id" text-anchor="middle">{}</text></g>"#,
            l.rotation,
            cx - w / 2.0,
            cy - h / 2.0,
            cy + 4.0,
            l.id
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
