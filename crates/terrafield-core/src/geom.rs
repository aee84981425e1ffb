//! Geometry primitives: [`Coord`], [`Aabb`], and the [`remap`] helper.

use std::fmt;

use glam::Vec3;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid cell address. `col` grows along +X, `row` along +Y.
///
/// Signed so that positions computed by agent code may fall outside the
/// lattice; mutation through such an address is silently ignored rather
/// than an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    /// Cell (0, 0).
    pub const ZERO: Self = Self { col: 0, row: 0 };

    /// Create a new cell address.
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Return an address shifted by (dcol, drow).
    #[inline]
    pub const fn shift(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Row-major ordering: by row, then by column. Matches the lattice
    /// storage and scan order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// An axis-aligned min/max box, used as the crop volume for visibility
/// tests.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners, canonicalized so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether `p` lies inside the box. Inclusive on every face.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

// ---------------------------------------------------------------------------
// remap
// ---------------------------------------------------------------------------

/// Linearly remap `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]`.
///
/// The result is not clamped; values outside the input range extrapolate.
/// A degenerate input range (`in_lo == in_hi`) yields non-finite output,
/// so callers must supply a proper range.
#[inline]
pub fn remap(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (out_hi - out_lo) * ((v - in_lo) / (in_hi - in_lo))
}
