//! **terrafield-ops** — algorithms over terrafield grids.
//!
//! This crate derives secondary state from the core types and turns the
//! lattice into exportable geometry:
//!
//! - **Steepness maps** ([`steepness_map`]) — per-cell slope angles.
//! - **Vector fields** ([`vector_field`]) — planar unit vectors from a
//!   scalar map, for flow visualization.
//! - **Surface meshing** ([`MeshBuilder`]) — two-triangles-per-cell
//!   triangulation handed to an external [`MeshExporter`].
//! - **Default noise** ([`LatticeNoise`]) — a seedable value-noise source
//!   for height perturbation.

pub mod derive;
pub mod mesh;
pub mod noise;

pub use derive::{VectorMap, steepness_angle, steepness_map, vector_field};
pub use mesh::{MeshBuilder, MeshExporter, SurfaceMesh, Triangle};
pub use noise::LatticeNoise;
