//! **terrafield-core** — regular-grid height-field and scalar-field engine
//! (core types).
//!
//! This crate provides the foundational types of the *terrafield* ecosystem:
//! the point lattice ([`Field`]), auxiliary scalar buffers ([`ScalarMap`]),
//! geometry helpers, and the boundary capability traits ([`PixelSampler`],
//! [`NoiseSource`]) through which external data enters the engine.

pub mod field;
pub mod geom;
pub mod scalar;
pub mod sources;

pub use field::{Field, FieldError};
pub use geom::{Aabb, Coord, remap};
pub use scalar::ScalarMap;
pub use sources::{NoiseSource, PixelSampler};

pub use glam::Vec3;
