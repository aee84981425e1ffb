//! Stigmergy walkthrough.
//!
//! Agents wander a lattice and deposit into a trail map that decays each
//! tick; the surviving trails become terrain, which is then analyzed
//! (steepness, flow field), cropped, and handed to a mesh exporter.

use std::error::Error;
use std::f32::consts::FRAC_PI_2;

use rand::RngExt;

use terrafield_core::{Coord, Field, ScalarMap, Vec3};
use terrafield_ops::{
    LatticeNoise, MeshBuilder, MeshExporter, SurfaceMesh, steepness_map, vector_field,
};

const COLS: i32 = 48;
const ROWS: i32 = 36;
const TICKS: usize = 400;
const AGENTS: usize = 12;
const DEPOSIT: f32 = 32.0;
const DECAY: f32 = -0.8;

/// An exporter that only reports what it was handed.
struct PrintExporter;

impl MeshExporter for PrintExporter {
    fn export(&mut self, mesh: &SurfaceMesh, name: &str) -> Result<(), Box<dyn Error>> {
        println!("export '{name}': {} triangles", mesh.len());
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();

    let mut field = Field::new(Vec3::ZERO, COLS, ROWS, 1.0, 1.0)?;
    println!("lattice: {COLS}x{ROWS}, cell size 1.0");

    // Agents deposit while the whole map fades toward zero, so only
    // well-trodden paths survive.
    let mut trail = ScalarMap::new(COLS, ROWS);
    let mut agents: Vec<Coord> = (0..AGENTS)
        .map(|_| Coord::new(rng.random_range(0..COLS), rng.random_range(0..ROWS)))
        .collect();

    for _ in 0..TICKS {
        for agent in &mut agents {
            trail.add(*agent, DEPOSIT);
            let next = agent.shift(rng.random_range(-1..=1), rng.random_range(-1..=1));
            agent.col = next.col.clamp(0, COLS - 1);
            agent.row = next.row.clamp(0, ROWS - 1);
        }
        trail.fade(DECAY, 255.0, 0.0);
    }
    let marked = trail.values().iter().filter(|v| **v > 0.0).count();
    println!("trail map: {marked}/{} cells marked after {TICKS} ticks", trail.len());

    // Trails become terrain, roughened with a little noise on top.
    field.load_map_as_height(&trail, 0.0, 8.0)?;
    field.apply_noise(0.0, 1.5, &LatticeNoise::from_rng(&mut rng));

    let steep = steepness_map(&field);
    let max_angle = steep.values().iter().copied().fold(0.0f32, f32::max);
    println!("steepness: max {max_angle:.2} rad over {} interior cells", steep.len());

    let flow = vector_field(&steep, 0.0, FRAC_PI_2);
    println!("flow field: {} arrows", flow.vectors().len());

    // Crop a border strip away before export.
    field.set_crop(
        Vec3::new(4.0, 4.0, -1.0),
        Vec3::new((COLS - 5) as f32, (ROWS - 5) as f32, 64.0),
    );
    field.set_crop_active(true);
    let visible = field
        .points()
        .iter()
        .filter(|p| field.is_visible(**p))
        .count();
    println!("crop: {visible}/{} points visible", field.points().len());

    let mut builder = MeshBuilder::new();
    let count = builder.export_into(&field, &mut PrintExporter, "stigmergy")?;
    println!("done: {count} triangles handed off");
    Ok(())
}
