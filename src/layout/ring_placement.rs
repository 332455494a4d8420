// Ring distribution.
//
// A tier of n nodes is spread evenly around an ellipse centered on the canvas.
// Index 0 sits at the top (angle -π/2 before phase), later indices follow
// clockwise in screen coordinates (y grows downward), each 2π/n apart.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Point, Radii};

/// Angle of slot `index` in a ring of `count` slots.
pub fn ring_angle(index: usize, count: usize, phase: f64) -> f64 {
    phase + index as f64 * (TAU / count as f64) - FRAC_PI_2
}

/// Positions for `count` slots around `center`. Empty for `count == 0`.
pub fn place_ring(count: usize, center: Point, radii: Radii, phase: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = ring_angle(i, count, phase);
            Point {
                x: center.x + radii.rx * angle.cos(),
                y: center.y + radii.ry * angle.sin(),
            }
        })
        .collect()
}
