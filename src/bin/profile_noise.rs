//! Profiling tool for the noise pipeline and the two blur implementations

use std::time::Instant;

use island_generator::blur::{blur, blur_direct};
use island_generator::fractal::OctaveParams;
use island_generator::heightmap::{generate_elevation_raster, generate_noise_matrix, ElevationParams};
use island_generator::lattice::NoiseLattice;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let width = 512;
    let height = 512;
    let seed = 1337u64;
    let radius = 6;
    let sigma = 3.0;

    println!("=== Performance Profiling ===");
    println!("Map size: {}x{} ({} cells)", width, height, width * height);
    println!();

    let params = ElevationParams {
        width,
        height,
        seed,
        octaves: OctaveParams::default(),
        power: 0.9,
    };

    let start = Instant::now();
    NoiseLattice::generate(seed, width, height)?;
    let lattice_time = start.elapsed();
    println!("Lattice generation: {:?}", lattice_time);

    let start = Instant::now();
    generate_noise_matrix(&params)?;
    let matrix_time = start.elapsed();
    println!("Noise matrix ({} octaves): {:?}", params.octaves.octaves, matrix_time);

    let elevation = generate_elevation_raster(&params)?;

    let start = Instant::now();
    let fast = blur(&elevation, radius, sigma)?;
    let separable_time = start.elapsed();
    println!("Separable blur (r={}, sigma={}): {:?}", radius, sigma, separable_time);

    let start = Instant::now();
    let slow = blur_direct(&elevation, radius, sigma)?;
    let direct_time = start.elapsed();
    println!("Direct blur (r={}, sigma={}): {:?}", radius, sigma, direct_time);

    let max_diff = fast
        .as_slice()
        .iter()
        .zip(slow.as_slice())
        .map(|(&a, &b)| (a as i32 - b as i32).abs())
        .max()
        .unwrap_or(0);

    println!("\n=== Summary ===");
    println!("Noise matrix:   {:?}", matrix_time);
    println!("Blur speedup:   {:.1}x", direct_time.as_secs_f64() / separable_time.as_secs_f64().max(1e-9));
    println!("Max blur delta: {}", max_diff);
    Ok(())
}
