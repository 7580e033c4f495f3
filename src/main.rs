use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use island_generator::config::MapConfig;
use island_generator::export;
use island_generator::heightmap::{self, BlurParams};

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate seeded value-noise island maps with elevation biomes")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<String>,

    /// Width of the map in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Base noise frequency (lattice cells per map cell)
    #[arg(short, long)]
    frequency: Option<f32>,

    /// Amplitude of the first octave
    #[arg(short, long)]
    amplitude: Option<f32>,

    /// Amplitude decay per octave (0-1]
    #[arg(short, long)]
    persistence: Option<f32>,

    /// Number of noise octaves
    #[arg(short, long)]
    octaves: Option<u32>,

    /// Power curve exponent applied after normalization
    #[arg(long)]
    power: Option<f32>,

    /// Enable Gaussian blur with this radius
    #[arg(long)]
    blur_radius: Option<usize>,

    /// Gaussian blur standard deviation (enables blur)
    #[arg(long)]
    blur_sigma: Option<f32>,

    /// Biome map output path
    #[arg(long)]
    output: Option<String>,

    /// Also write the grayscale elevation raster here
    #[arg(long)]
    elevation_output: Option<String>,

    /// Pixels per cell edge in the biome map
    #[arg(long)]
    scale: Option<u32>,

    /// Write the effective configuration (with the seed used) to this path
    #[arg(long)]
    save_config: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut MapConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }
        if let Some(v) = self.frequency {
            config.frequency = v;
        }
        if let Some(v) = self.amplitude {
            config.amplitude = v;
        }
        if let Some(v) = self.persistence {
            config.persistence = v;
        }
        if let Some(v) = self.octaves {
            config.octaves = v;
        }
        if let Some(v) = self.power {
            config.power = v;
        }
        if self.blur_radius.is_some() || self.blur_sigma.is_some() {
            let base = config.blur.unwrap_or_default();
            config.blur = Some(BlurParams {
                radius: self.blur_radius.unwrap_or(base.radius),
                sigma: self.blur_sigma.unwrap_or(base.sigma),
            });
        }
        if let Some(v) = &self.output {
            config.output = v.clone();
        }
        if let Some(v) = &self.elevation_output {
            config.elevation_output = Some(v.clone());
        }
        if let Some(v) = self.scale {
            config.scale = v;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);

    println!("Generating island with seed: {}", seed);
    println!("Map size: {}x{}", config.width, config.height);
    println!(
        "Noise: frequency {} amplitude {} persistence {} octaves {} power {}",
        config.frequency, config.amplitude, config.persistence, config.octaves, config.power
    );

    let params = config.elevation_params(seed);
    let mut elevation = heightmap::generate_elevation_raster(&params)?;
    let (lo, hi) = elevation
        .as_slice()
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    println!("Elevation range: {}..{}", lo, hi);

    if let Some(blur) = &config.blur {
        println!("Applying Gaussian blur (radius {}, sigma {})...", blur.radius, blur.sigma);
        elevation = heightmap::apply_gaussian_blur(&elevation, blur.radius, blur.sigma)?;
    }

    let biome_map = config.biomes.classify_raster(&elevation);
    let histogram = config.biomes.histogram(&biome_map);
    let total = histogram.total().max(1) as f64;
    println!("Biomes:");
    for (band, &count) in config.biomes.bands().iter().zip(&histogram.counts) {
        println!("  {:<14} {:>7} ({:.1}%)", band.name, count, 100.0 * count as f64 / total);
    }
    if histogram.unclassified > 0 {
        println!("  {:<14} {:>7}", "unclassified", histogram.unclassified);
    }

    export::export_biome_map(&biome_map, &config.biomes, config.scale, &config.output)?;
    println!("Saved biome map to {}", config.output);

    if let Some(path) = &config.elevation_output {
        export::export_elevation(&elevation, path)?;
        println!("Saved elevation raster to {}", path);
    }

    if let Some(path) = &args.save_config {
        config.save(path)?;
        println!("Saved config to {}", path);
    }

    Ok(())
}
