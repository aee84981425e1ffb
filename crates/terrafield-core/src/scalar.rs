//! The [`ScalarMap`] type — an auxiliary float buffer parallel to a
//! [`Field`](crate::Field).
//!
//! A data map shares the lattice's addressing (row-major, column index
//! fastest) but is otherwise an independent buffer: agents deposit into
//! it, fades decay it, and the field can consume it as a height source.
//! Values carry no inherent bounds; the fade and clamp operations apply
//! domain-specific limits.

use crate::geom::{Coord, remap};
use crate::sources::PixelSampler;

/// A COLS×ROWS buffer of scalar values addressed like the point lattice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarMap {
    cols: i32,
    rows: i32,
    values: Vec<f32>,
}

impl ScalarMap {
    /// Create a zero-filled map. Negative dimensions are treated as zero.
    pub fn new(cols: i32, rows: i32) -> Self {
        Self::filled(cols, rows, 0.0)
    }

    /// Create a map with every value set to `v`.
    pub fn filled(cols: i32, rows: i32, v: f32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            values: vec![v; (cols * rows) as usize],
        }
    }

    /// Sample a map from an external pixel source.
    ///
    /// Cell `(col, row)` reads the pixel at the rounded linear
    /// interpolation of its index across the sampler's width and height,
    /// so the whole source is covered regardless of relative resolution.
    pub fn from_sampler(sampler: &impl PixelSampler, cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        let max_x = sampler.width().saturating_sub(1) as f32;
        let max_y = sampler.height().saturating_sub(1) as f32;

        let mut values = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let x = if cols > 1 {
                    remap(col as f32, 0.0, (cols - 1) as f32, 0.0, max_x).round() as u32
                } else {
                    0
                };
                let y = if rows > 1 {
                    remap(row as f32, 0.0, (rows - 1) as f32, 0.0, max_y).round() as u32
                } else {
                    0
                };
                values.push(sampler.sample(x, y));
            }
        }
        Self { cols, rows, values }
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

    /// Total number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if c.col >= 0 && c.col < self.cols && c.row >= 0 && c.row < self.rows {
            Some((c.row * self.cols + c.col) as usize)
        } else {
            None
        }
    }

    /// The value at cell `c`, or `None` out of bounds.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<f32> {
        self.index(c).map(|i| self.values[i])
    }

    /// Set the value at cell `c`. Does nothing out of bounds.
    #[inline]
    pub fn set(&mut self, c: Coord, v: f32) {
        if let Some(i) = self.index(c) {
            self.values[i] = v;
        }
    }

    /// Add `dv` to the value at cell `c`. Does nothing out of bounds.
    #[inline]
    pub fn add(&mut self, c: Coord, dv: f32) {
        if let Some(i) = self.index(c) {
            self.values[i] += dv;
        }
    }

    /// The values in row-major order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mutable access to the values in row-major order.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Shift every value by `delta`, then clamp into `[lower, upper]` —
    /// ceiling first, floor second.
    ///
    /// A small negative `delta` applied each tick decays deposits toward
    /// `lower`, which is what makes the map usable for stigmergy.
    pub fn fade(&mut self, delta: f32, upper: f32, lower: f32) {
        for v in &mut self.values {
            *v += delta;
            if *v >= upper {
                *v = upper;
            }
            if *v <= lower {
                *v = lower;
            }
        }
    }

    /// Clamp every value into `[0, 255]`, the byte intensity range
    /// expected before conversion to display intensities.
    pub fn clamp_to_bytes(&mut self) {
        for v in &mut self.values {
            *v = v.clamp(0.0, 255.0);
        }
    }

    /// Linearly remap every value from `[from_lo, from_hi]` to
    /// `[to_lo, to_hi]`, unclamped.
    pub fn remap_values(&mut self, from_lo: f32, from_hi: f32, to_lo: f32, to_hi: f32) {
        for v in &mut self.values {
            *v = remap(*v, from_lo, from_hi, to_lo, to_hi);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use glam::Vec3;

    /// A sampler returning a constant intensity for every pixel.
    struct Uniform {
        w: u32,
        h: u32,
        v: f32,
    }

    impl PixelSampler for Uniform {
        fn width(&self) -> u32 {
            self.w
        }
        fn height(&self) -> u32 {
            self.h
        }
        fn sample(&self, _x: u32, _y: u32) -> f32 {
            self.v
        }
    }

    /// A sampler whose value encodes the pixel position, for checking
    /// which pixels get read.
    struct Gradient {
        w: u32,
        h: u32,
    }

    impl PixelSampler for Gradient {
        fn width(&self) -> u32 {
            self.w
        }
        fn height(&self) -> u32 {
            self.h
        }
        fn sample(&self, x: u32, y: u32) -> f32 {
            (y * self.w + x) as f32
        }
    }

    #[test]
    fn get_set_and_bounds() {
        let mut m = ScalarMap::new(4, 3);
        m.set(Coord::new(2, 1), 7.0);
        assert_eq!(m.get(Coord::new(2, 1)), Some(7.0));
        assert_eq!(m.get(Coord::new(4, 0)), None);
        assert_eq!(m.get(Coord::new(0, -1)), None);
        // Out-of-bounds writes are ignored.
        m.set(Coord::new(9, 9), 1.0);
        m.add(Coord::new(-1, 0), 1.0);
        assert!(m.values().iter().filter(|v| **v != 0.0).count() == 1);
    }

    #[test]
    fn from_sampler_covers_full_source() {
        // 3x3 map over a 5x5 source: corners must read corner pixels.
        let m = ScalarMap::from_sampler(&Gradient { w: 5, h: 5 }, 3, 3);
        assert_eq!(m.get(Coord::new(0, 0)), Some(0.0));
        assert_eq!(m.get(Coord::new(2, 0)), Some(4.0));
        assert_eq!(m.get(Coord::new(0, 2)), Some(20.0));
        assert_eq!(m.get(Coord::new(2, 2)), Some(24.0));
        // Center cell reads the center pixel.
        assert_eq!(m.get(Coord::new(1, 1)), Some(12.0));
    }

    #[test]
    fn from_sampler_single_column_reads_pixel_zero() {
        let m = ScalarMap::from_sampler(&Gradient { w: 5, h: 5 }, 1, 2);
        assert_eq!(m.get(Coord::new(0, 0)), Some(0.0));
        assert_eq!(m.get(Coord::new(0, 1)), Some(20.0));
    }

    #[test]
    fn fade_clamps_at_upper() {
        let mut m = ScalarMap::filled(3, 3, 95.0);
        m.fade(10.0, 100.0, 0.0);
        for &v in m.values() {
            assert_eq!(v, 100.0);
        }
    }

    #[test]
    fn fade_clamps_at_lower() {
        let mut m = ScalarMap::filled(3, 3, -5.0);
        m.fade(-1.0, 100.0, 0.0);
        for &v in m.values() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn fade_applies_ceiling_before_floor() {
        // With crossed bounds the floor wins, because it is applied last.
        let mut m = ScalarMap::filled(2, 2, 50.0);
        m.fade(0.0, 10.0, 20.0);
        for &v in m.values() {
            assert_eq!(v, 20.0);
        }
    }

    #[test]
    fn fade_decays_deposits_over_ticks() {
        let mut m = ScalarMap::filled(2, 2, 3.0);
        for _ in 0..10 {
            m.fade(-0.5, 255.0, 0.0);
        }
        for &v in m.values() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn clamp_to_bytes() {
        let mut m = ScalarMap::new(2, 2);
        m.set(Coord::new(0, 0), -4.0);
        m.set(Coord::new(1, 0), 300.0);
        m.set(Coord::new(0, 1), 128.0);
        m.clamp_to_bytes();
        assert_eq!(m.get(Coord::new(0, 0)), Some(0.0));
        assert_eq!(m.get(Coord::new(1, 0)), Some(255.0));
        assert_eq!(m.get(Coord::new(0, 1)), Some(128.0));
    }

    #[test]
    fn remap_values_rescales() {
        let mut m = ScalarMap::filled(2, 2, 128.0);
        m.remap_values(0.0, 255.0, 0.0, 1.0);
        for &v in m.values() {
            assert!((v - 128.0 / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn white_source_yields_max_height() {
        // A uniformly white image loaded as height lands exactly on `max`.
        let sampler = Uniform {
            w: 8,
            h: 8,
            v: 255.0,
        };
        let map = ScalarMap::from_sampler(&sampler, 5, 5);
        let mut f = Field::new(Vec3::ZERO, 5, 5, 1.0, 1.0).unwrap();
        f.load_map_as_height(&map, 0.0, 10.0).unwrap();
        for &p in f.points() {
            assert_eq!(p.z, 10.0);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn scalar_map_serde_roundtrip() {
        let mut m = ScalarMap::new(2, 2);
        m.set(Coord::new(1, 1), 42.0);
        let json = serde_json::to_string(&m).unwrap();
        let back: ScalarMap = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
