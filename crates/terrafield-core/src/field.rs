//! The [`Field`] type — a COLS×ROWS lattice of 3D points.
//!
//! A `Field` owns its point storage exclusively. Heights are mutated
//! through explicit calls; scalar maps are separate buffers that share
//! only the addressing scheme. Storage is row-major: the column index
//! increments fastest, and every exhaustive scan in this module walks
//! cells in that order.

use std::fmt;

use glam::Vec3;

use crate::geom::{Aabb, Coord, remap};
use crate::scalar::ScalarMap;
use crate::sources::NoiseSource;

/// Stride, in noise-space units, between adjacent lattice cells when
/// sampling a [`NoiseSource`].
const NOISE_STEP: f32 = 0.1;

// ---------------------------------------------------------------------------
// FieldError
// ---------------------------------------------------------------------------

/// Errors from lattice construction and bulk assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Construction with fewer than one column or row.
    BadDimensions { cols: i32, rows: i32 },
    /// Construction with a non-positive cell size.
    BadCellSize { x: f32, y: f32 },
    /// A bulk assignment whose input length does not equal `cols * rows`.
    LengthMismatch { expected: usize, got: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::BadDimensions { cols, rows } => {
                write!(f, "field dimensions must be positive, got {cols}x{rows}")
            }
            FieldError::BadCellSize { x, y } => {
                write!(f, "cell size must be positive, got {x}x{y}")
            }
            FieldError::LengthMismatch { expected, got } => {
                write!(f, "expected {expected} points, got {got}")
            }
        }
    }
}

impl std::error::Error for FieldError {}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A regular lattice of 3D points with a world-space origin and fixed cell
/// size.
///
/// Constructed once; never resized (resizing means building a new field).
/// Point heights (z) are mutable throughout a session, while the x/y
/// positions stay on the regular grid unless replaced wholesale via
/// [`set_points`](Field::set_points).
#[derive(Debug, Clone)]
pub struct Field {
    origin: Vec3,
    cols: i32,
    rows: i32,
    cell_size_x: f32,
    cell_size_y: f32,
    points: Vec<Vec3>,
    crop: Aabb,
    crop_active: bool,
}

impl Field {
    /// Create a lattice anchored at `origin`, with `cols * rows` points
    /// spaced `cell_size_x`/`cell_size_y` world units apart.
    ///
    /// Each point starts at `origin + (col * cell_size_x, row * cell_size_y, 0)`.
    pub fn new(
        origin: Vec3,
        cols: i32,
        rows: i32,
        cell_size_x: f32,
        cell_size_y: f32,
    ) -> Result<Self, FieldError> {
        if cols < 1 || rows < 1 {
            return Err(FieldError::BadDimensions { cols, rows });
        }
        if cell_size_x <= 0.0 || cell_size_y <= 0.0 {
            return Err(FieldError::BadCellSize {
                x: cell_size_x,
                y: cell_size_y,
            });
        }

        let mut points = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                points.push(Vec3::new(
                    origin.x + col as f32 * cell_size_x,
                    origin.y + row as f32 * cell_size_y,
                    origin.z,
                ));
            }
        }

        Ok(Self {
            origin,
            cols,
            rows,
            cell_size_x,
            cell_size_y,
            points,
            crop: Aabb::default(),
            crop_active: false,
        })
    }

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

    /// World-space anchor of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Cell size as `(x, y)` world units per cell step.
    #[inline]
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_size_x, self.cell_size_y)
    }

    /// The points in row-major order (column index fastest).
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if c.col >= 0 && c.col < self.cols && c.row >= 0 && c.row < self.rows {
            Some((c.row * self.cols + c.col) as usize)
        } else {
            None
        }
    }

    /// The point at cell `c`, or `None` out of bounds.
    #[inline]
    pub fn point(&self, c: Coord) -> Option<Vec3> {
        self.index(c).map(|i| self.points[i])
    }

    /// Row-major iterator over `(Coord, point)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Vec3)> + '_ {
        let cols = self.cols;
        self.points.iter().enumerate().map(move |(i, &p)| {
            let i = i as i32;
            (Coord::new(i % cols, i / cols), p)
        })
    }

    // -----------------------------------------------------------------------
    // Height mutation
    // -----------------------------------------------------------------------

    /// Set the height (z) of the point at `c`. Does nothing out of bounds,
    /// so agent code may write through clamped or unclamped positions
    /// without checking first.
    pub fn set_height(&mut self, c: Coord, z: f32) {
        if let Some(i) = self.index(c) {
            self.points[i].z = z;
        }
    }

    /// Add `dz` to the height of the point at `c`. Does nothing out of
    /// bounds.
    pub fn add_height(&mut self, c: Coord, dz: f32) {
        if let Some(i) = self.index(c) {
            self.points[i].z += dz;
        }
    }

    /// Replace every point from a flat slice, column index fastest,
    /// wrapping to the next row every `cols` entries.
    ///
    /// The slice length must be exactly `cols * rows`; anything else is a
    /// [`FieldError::LengthMismatch`] and the lattice is left untouched.
    pub fn set_points(&mut self, pts: &[Vec3]) -> Result<(), FieldError> {
        if pts.len() != self.points.len() {
            return Err(FieldError::LengthMismatch {
                expected: self.points.len(),
                got: pts.len(),
            });
        }
        self.points.copy_from_slice(pts);
        Ok(())
    }

    /// Perturb every height by a noise sample.
    ///
    /// Cell `(col, row)` samples `noise` at `(col * 0.1, row * 0.1)`; the
    /// sample is remapped from the source's declared output range into
    /// `[min_height, max_height]` and **added** to the existing height.
    pub fn apply_noise(&mut self, min_height: f32, max_height: f32, noise: &impl NoiseSource) {
        let (lo, hi) = noise.output_range();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let s = noise.sample(col as f32 * NOISE_STEP, row as f32 * NOISE_STEP);
                let i = (row * self.cols + col) as usize;
                self.points[i].z += remap(s, lo, hi, min_height, max_height);
            }
        }
    }

    /// Overwrite every height from a scalar map, remapping each value from
    /// `[0, 255]` into `[min, max]`.
    ///
    /// The map must be `cols * rows` sized; anything else is a
    /// [`FieldError::LengthMismatch`] and the lattice is left untouched.
    pub fn load_map_as_height(
        &mut self,
        map: &ScalarMap,
        min: f32,
        max: f32,
    ) -> Result<(), FieldError> {
        if map.len() != self.points.len() {
            return Err(FieldError::LengthMismatch {
                expected: self.points.len(),
                got: map.len(),
            });
        }
        for (point, &v) in self.points.iter_mut().zip(map.values()) {
            point.z = remap(v, 0.0, 255.0, min, max);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cropping
    // -----------------------------------------------------------------------

    /// Set the crop volume. Cropping still has no effect until
    /// [`set_crop_active`](Field::set_crop_active) turns it on.
    pub fn set_crop(&mut self, min: Vec3, max: Vec3) {
        self.crop = Aabb::new(min, max);
    }

    /// Toggle the crop predicate.
    pub fn set_crop_active(&mut self, active: bool) {
        self.crop_active = active;
    }

    /// Whether cropping is currently applied.
    #[inline]
    pub fn crop_active(&self) -> bool {
        self.crop_active
    }

    /// The configured crop volume.
    #[inline]
    pub fn crop(&self) -> Aabb {
        self.crop
    }

    /// Whether `p` survives the crop predicate. Always true while cropping
    /// is inactive; otherwise true iff `p` lies inside the crop volume.
    /// Pure; every drawing or export path that culls geometry shares it.
    #[inline]
    pub fn is_visible(&self, p: Vec3) -> bool {
        !self.crop_active || self.crop.contains(p)
    }

    // -----------------------------------------------------------------------
    // Spatial queries
    // -----------------------------------------------------------------------

    /// The cell whose point is nearest to `query`, excluding any point
    /// exactly coincident with it.
    ///
    /// Exhaustive O(cols·rows) scan in row-major order (column index
    /// fastest); ties keep the first cell encountered. The coincident-point
    /// exclusion means a query sampled from the lattice itself finds its
    /// nearest *other* cell. If no cell lies at a nonzero distance (a 1×1
    /// grid queried at its own point), falls back to [`Coord::ZERO`].
    pub fn closest_cell(&self, query: Vec3) -> Coord {
        let mut best = Coord::ZERO;
        let mut best_dist = f32::INFINITY;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let i = (row * self.cols + col) as usize;
                let d = self.points[i].distance(query);
                if d > 0.0 && d < best_dist {
                    best_dist = d;
                    best = Coord::new(col, row);
                }
            }
        }
        best
    }

    /// The lattice point at [`closest_cell`](Field::closest_cell), by value.
    pub fn closest_point(&self, query: Vec3) -> Vec3 {
        self.point(self.closest_cell(query)).unwrap_or(self.origin)
    }

    /// The cell containing `p` when projected onto the grid plane: offset
    /// from the origin divided by the cell size, truncated toward zero,
    /// then clamped per axis into the lattice.
    ///
    /// O(1), in contrast to the exhaustive [`closest_cell`](Field::closest_cell);
    /// callers on a regular axis-aligned grid should prefer this.
    pub fn cell_containing(&self, p: Vec3) -> Coord {
        let col = ((p.x - self.origin.x) / self.cell_size_x) as i32;
        let row = ((p.y - self.origin.y) / self.cell_size_y) as i32;
        Coord::new(
            col.clamp(0, self.cols - 1),
            row.clamp(0, self.rows - 1),
        )
    }

    /// The lattice point at [`cell_containing`](Field::cell_containing), by
    /// value.
    pub fn point_in_grid(&self, p: Vec3) -> Vec3 {
        self.point(self.cell_containing(p)).unwrap_or(self.origin)
    }
}
