//! Surface meshing: lattice triangulation and exporter hand-off.
//!
//! The mesh is transient. [`MeshBuilder`] rebuilds it from scratch per
//! export, copies corner values (triangles do not reference the lattice),
//! and clears it after hand-off so repeated exports never accumulate
//! stale geometry.

use std::error::Error;

use glam::Vec3;

use terrafield_core::{Coord, Field};

/// One mesh face. Corner values are copies of the lattice points at build
/// time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

/// A triangle soup produced from a lattice.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceMesh {
    triangles: Vec<Triangle>,
}

impl SurfaceMesh {
    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh holds no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The triangles in emission order.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Discard all triangles.
    pub fn clear(&mut self) {
        self.triangles.clear();
    }
}

/// Sink for finished meshes. Implementations write STL/OBJ/etc. outside
/// this crate; the engine only hands over the triangle soup and a base
/// name.
pub trait MeshExporter {
    fn export(&mut self, mesh: &SurfaceMesh, name: &str) -> Result<(), Box<dyn Error>>;
}

/// Triangulates a [`Field`] into a [`SurfaceMesh`].
///
/// Meshed cells run over `i` in `[0, cols-3]` and `j` in `[0, rows-3]`,
/// one cell ring short of the lattice edge. Downstream consumers depend
/// on that exact boundary, so it is preserved here and pinned by tests.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: SurfaceMesh,
}

impl MeshBuilder {
    /// Create a builder with an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current mesh contents.
    #[inline]
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    /// Discard accumulated triangles.
    pub fn clear(&mut self) {
        self.mesh.clear();
    }

    /// Rebuild the mesh from `field`.
    ///
    /// Each meshed cell emits two triangles over its corners
    /// `p1..p4 = (i,j), (i+1,j), (i+1,j+1), (i,j+1)`:
    /// `(p1, p2, p3)` then `(p1, p3, p4)`. Winding is part of the
    /// contract; downstream normal computation depends on it. Fields
    /// smaller than 3×3 produce an empty mesh.
    pub fn build(&mut self, field: &Field) -> &SurfaceMesh {
        self.mesh.clear();
        let max_col = (field.cols() - 2).max(0);
        let max_row = (field.rows() - 2).max(0);
        for row in 0..max_row {
            for col in 0..max_col {
                let c = Coord::new(col, row);
                let corners = (
                    field.point(c),
                    field.point(c.shift(1, 0)),
                    field.point(c.shift(1, 1)),
                    field.point(c.shift(0, 1)),
                );
                if let (Some(p1), Some(p2), Some(p3), Some(p4)) = corners {
                    self.mesh.triangles.push(Triangle {
                        a: p1,
                        b: p2,
                        c: p3,
                    });
                    self.mesh.triangles.push(Triangle {
                        a: p1,
                        b: p3,
                        c: p4,
                    });
                }
            }
        }
        &self.mesh
    }

    /// Build from `field`, hand the mesh to `exporter` under `name`, then
    /// clear. Returns the number of triangles handed off. Exporter
    /// failures propagate and still leave the builder cleared on the next
    /// build.
    pub fn export_into(
        &mut self,
        field: &Field,
        exporter: &mut impl MeshExporter,
        name: &str,
    ) -> Result<usize, Box<dyn Error>> {
        self.build(field);
        let count = self.mesh.len();
        exporter.export(&self.mesh, name)?;
        log::debug!("handed off mesh '{name}' ({count} triangles)");
        self.mesh.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    struct CountingExporter {
        calls: usize,
        last_len: usize,
        last_name: String,
    }

    impl CountingExporter {
        fn new() -> Self {
            Self {
                calls: 0,
                last_len: 0,
                last_name: String::new(),
            }
        }
    }

    impl MeshExporter for CountingExporter {
        fn export(&mut self, mesh: &SurfaceMesh, name: &str) -> Result<(), Box<dyn Error>> {
            self.calls += 1;
            self.last_len = mesh.len();
            self.last_name = name.to_string();
            Ok(())
        }
    }

    fn field(cols: i32, rows: i32) -> Field {
        Field::new(Vec3::ZERO, cols, rows, 1.0, 1.0).unwrap()
    }

    #[test]
    fn four_by_four_triangle_count() {
        // Meshed cells stop one ring short: (cols-2) * (rows-2) quads.
        let f = field(4, 4);
        let mut b = MeshBuilder::new();
        let mesh = b.build(&f);
        assert_eq!(mesh.len(), 2 * 2 * 2);
    }

    #[test]
    fn winding_order_is_exact() {
        let f = field(3, 3);
        let mut b = MeshBuilder::new();
        let mesh = b.build(&f);
        assert_eq!(mesh.len(), 2);
        let t0 = mesh.triangles()[0];
        let t1 = mesh.triangles()[1];
        // (0,0), (1,0), (1,1) then (0,0), (1,1), (0,1).
        assert_eq!(t0.a, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(t0.b, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(t0.c, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(t1.a, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(t1.b, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(t1.c, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn triangles_copy_heights_at_build_time() {
        let mut f = field(3, 3);
        f.set_height(Coord::new(1, 1), 4.0);
        let mut b = MeshBuilder::new();
        let mesh = b.build(&f).clone();
        assert_eq!(mesh.triangles()[0].c.z, 4.0);
        // Later mutation does not reach the built mesh.
        f.set_height(Coord::new(1, 1), 9.0);
        assert_eq!(mesh.triangles()[0].c.z, 4.0);
    }

    #[test]
    fn small_fields_produce_empty_mesh() {
        let mut b = MeshBuilder::new();
        assert!(b.build(&field(2, 2)).is_empty());
        assert!(b.build(&field(1, 1)).is_empty());
        assert!(b.build(&field(3, 2)).is_empty());
    }

    #[test]
    fn export_clears_between_calls() {
        let f = field(5, 5);
        let mut b = MeshBuilder::new();
        let mut exporter = CountingExporter::new();

        let n1 = b.export_into(&f, &mut exporter, "pass1").unwrap();
        let n2 = b.export_into(&f, &mut exporter, "pass2").unwrap();
        assert_eq!(n1, 2 * 3 * 3);
        // No accumulation across exports.
        assert_eq!(n2, n1);
        assert_eq!(exporter.calls, 2);
        assert_eq!(exporter.last_len, n1);
        assert_eq!(exporter.last_name, "pass2");
        assert!(b.mesh().is_empty());
    }

    #[test]
    fn exporter_failure_propagates() {
        struct Failing;
        impl MeshExporter for Failing {
            fn export(&mut self, _mesh: &SurfaceMesh, _name: &str) -> Result<(), Box<dyn Error>> {
                Err("disk full".into())
            }
        }
        let f = field(4, 4);
        let mut b = MeshBuilder::new();
        assert!(b.export_into(&f, &mut Failing, "out").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn mesh_serde_roundtrip() {
        let f = field(3, 3);
        let mut b = MeshBuilder::new();
        let mesh = b.build(&f).clone();
        let json = serde_json::to_string(&mesh).unwrap();
        let back: SurfaceMesh = serde_json::from_str(&json).unwrap();
        assert_eq!(mesh, back);
    }
}
