//! CSS transform strings for positioned images.
//!
//! Elements are placed with `left`/`top` at their layout center. The
//! transform first shifts them back by half their rendered size (or `-50%`
//! when the size is unknown) so the center lands on that point, then applies
//! rotation and scale.

use alloc::format;
use alloc::string::String;

use crate::entry::StartPosition;
use crate::placement::ImageLayout;

/// Translation that moves an element's top-left corner to center it on its
/// `left`/`top` point.
pub fn center_offset(rendered: Option<(f64, f64)>) -> String {
    match rendered {
        Some((w, h)) if w.is_finite() && h.is_finite() => {
            format!("translate({}px, {}px)", num(-w / 2.0), num(-h / 2.0))
        }
        _ => String::from("translate(-50%, -50%)"),
    }
}

/// Transform at rest.
pub fn build_final_transform(rotation: f64, scale: f64, rendered: Option<(f64, f64)>) -> String {
    format!(
        "{} rotate({}deg) scale({})",
        center_offset(rendered),
        num(rotation),
        num(scale)
    )
}

/// Transform at the first entry frame.
///
/// The element already sits at the final center, so the start point becomes
/// a translation relative to it. Center starts scale from 0.
pub fn build_start_transform(
    start: &StartPosition,
    layout: &ImageLayout,
    start_rotation: f64,
    start_scale: f64,
    rendered: Option<(f64, f64)>,
) -> String {
    let dx = start.x - layout.x;
    let dy = start.y - layout.y;
    let scale = if start.use_scale { 0.0 } else { start_scale };
    format!(
        "{} translate({}px, {}px) rotate({}deg) scale({})",
        center_offset(rendered),
        num(dx),
        num(dy),
        num(start_rotation),
        num(scale)
    )
}

/// Finite value without a negative zero.
fn num(v: f64) -> f64 {
    if v.is_finite() { v + 0.0 } else { 0.0 }
}
