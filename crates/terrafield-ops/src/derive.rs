//! Derived fields: steepness-angle maps and planar vector fields.
//!
//! Both derivations index the `(cols-1)×(rows-1)` interior grid: each
//! output cell summarizes the quad whose lower corner is the same-index
//! lattice point.

use std::f32::consts::TAU;

use glam::Vec3;

use terrafield_core::{Coord, Field, ScalarMap, remap};

// ---------------------------------------------------------------------------
// Steepness
// ---------------------------------------------------------------------------

/// Unsigned inclination angle, in radians `[0, π]`, of the segment `a → b`
/// against its projection onto the horizontal plane through `a`.
///
/// 0 means flat; π/2 is approached as the segment turns vertical.
#[inline]
pub fn steepness_angle(a: Vec3, b: Vec3) -> f32 {
    let flat = Vec3::new(b.x, b.y, a.z);
    (b - a).angle_between(flat - a)
}

/// Per-cell slope of the lattice, sized `(cols-1)×(rows-1)`.
///
/// Cell `(i, j)` holds the [`steepness_angle`] of the quad diagonal from
/// corner `(i, j)` to corner `(i+1, j+1)`. A perfectly flat field yields
/// zero everywhere.
pub fn steepness_map(field: &Field) -> ScalarMap {
    let cols = (field.cols() - 1).max(0);
    let rows = (field.rows() - 1).max(0);
    let mut map = ScalarMap::new(cols, rows);
    for row in 0..rows {
        for col in 0..cols {
            let c = Coord::new(col, row);
            if let (Some(a), Some(b)) = (field.point(c), field.point(c.shift(1, 1))) {
                map.set(c, steepness_angle(a, b));
            }
        }
    }
    map
}

// ---------------------------------------------------------------------------
// Vector field
// ---------------------------------------------------------------------------

/// A `(cols-1)×(rows-1)` grid of planar unit vectors derived from a scalar
/// map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorMap {
    cols: i32,
    rows: i32,
    vectors: Vec<Vec3>,
}

impl VectorMap {
    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The vector at cell `c`, or `None` out of bounds.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Vec3> {
        if c.col >= 0 && c.col < self.cols && c.row >= 0 && c.row < self.rows {
            Some(self.vectors[(c.row * self.cols + c.col) as usize])
        } else {
            None
        }
    }

    /// The vectors in row-major order.
    #[inline]
    pub fn vectors(&self) -> &[Vec3] {
        &self.vectors
    }
}

/// Turn a scalar map into a field of planar unit vectors, sized one short
/// of the map on each axis.
///
/// Each value is remapped from `[lo, hi]` to an angle in `[0, 2π)` and
/// emitted as `(cos θ, sin θ, 0)`. The z component stays zero: the field
/// describes flow in the grid plane.
pub fn vector_field(map: &ScalarMap, lo: f32, hi: f32) -> VectorMap {
    let cols = (map.cols() - 1).max(0);
    let rows = (map.rows() - 1).max(0);
    let mut vectors = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let v = map.get(Coord::new(col, row)).unwrap_or(lo);
            let angle = remap(v, lo, hi, 0.0, TAU);
            vectors.push(Vec3::new(angle.cos(), angle.sin(), 0.0));
        }
    }
    VectorMap {
        cols,
        rows,
        vectors,
    }
}
