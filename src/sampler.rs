//! Toroidal bicubic sampling of a [`NoiseLattice`].
//!
//! The lattice is treated as a torus: neighbour lookups wrap on both axes, so the
//! interpolated field tiles without seams. Lattices narrower than four cells are fine,
//! the 4x4 neighbourhood simply revisits cells.

use crate::lattice::NoiseLattice;

/// Cubic interpolation through four control points, reproducing `b` at `t = 0`
/// and `c` at `t = 1`.
#[inline]
pub fn cubic_interpolate(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let p = (d - c) - (a - b);
    p * t * t * t + ((a - b) - p) * t * t + (c - a) * t + b
}

/// Sample the lattice at fractional coordinates `(sx, sy)`.
///
/// Coordinates may lie anywhere; they are wrapped modulo the lattice size.
pub fn sample(lattice: &NoiseLattice, sx: f32, sy: f32) -> f32 {
    let x_floor = sx.floor();
    let y_floor = sy.floor();
    let fx = sx - x_floor;
    let fy = sy - y_floor;
    // reduce the base cell onto the lattice first so high-octave coordinates
    // cannot overflow the neighbour offsets
    let x0 = (x_floor as f64).rem_euclid(lattice.width() as f64) as i64;
    let y0 = (y_floor as f64).rem_euclid(lattice.height() as f64) as i64;

    // values[i][j]: i steps along x, j along y, offsets -1..=2
    let mut values = [[0.0f32; 4]; 4];
    for (i, column) in values.iter_mut().enumerate() {
        for (j, value) in column.iter_mut().enumerate() {
            *value = lattice.get_wrapped(x0 + i as i64 - 1, y0 + j as i64 - 1);
        }
    }

    let mut along_y = [0.0f32; 4];
    for (i, column) in values.iter().enumerate() {
        along_y[i] = cubic_interpolate(column[0], column[1], column[2], column[3], fy);
    }

    cubic_interpolate(along_y[0], along_y[1], along_y[2], along_y[3], fx)
}
