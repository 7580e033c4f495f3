//! Island map generation library
//!
//! Seeded value noise on a toroidal lattice, summed over octaves, remapped into an
//! 8-bit elevation raster, optionally Gaussian-blurred and bucketed into biome bands.

pub mod biomes;
pub mod blur;
pub mod config;
pub mod error;
pub mod export;
pub mod fractal;
pub mod heightmap;
pub mod lattice;
pub mod remap;
pub mod sampler;
pub mod tilemap;

pub use biomes::{BiomeBand, BiomeHistogram, BiomeTable};
pub use blur::GaussianKernel;
pub use config::MapConfig;
pub use error::{ConfigError, GenError};
pub use fractal::OctaveParams;
pub use heightmap::{
    apply_gaussian_blur, generate_elevation_raster, generate_map, generate_noise_matrix,
    BlurParams, ElevationParams, ElevationRaster,
};
pub use lattice::NoiseLattice;
pub use tilemap::Tilemap;
