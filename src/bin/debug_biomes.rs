//! Debug script to output the island biome map as ASCII

use std::fs::File;
use std::io::Write;

use island_generator::biomes::BiomeTable;
use island_generator::export::biome_ascii;
use island_generator::fractal::OctaveParams;
use island_generator::heightmap::{generate_elevation_raster, ElevationParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let width = 128;
    let height = 64;
    let seed = 12345u64;

    let params = ElevationParams {
        width,
        height,
        seed,
        octaves: OctaveParams::default(),
        power: 0.9,
    };
    let elevation = generate_elevation_raster(&params)?;

    let table = BiomeTable::island();
    let biome_map = table.classify_raster(&elevation);
    let histogram = table.histogram(&biome_map);

    let mut file = File::create("biome_debug.txt")?;

    writeln!(file, "=== ISLAND BIOME DEBUG MAP ({}x{}) seed={} ===", width, height, seed)?;
    writeln!(file)?;

    writeln!(file, "LEGEND:")?;
    for band in table.bands() {
        writeln!(file, "  {} = {:<14} {:>3}..={:<3}", band.glyph, band.name, band.min, band.max)?;
    }
    writeln!(file, "  ? = unclassified")?;
    writeln!(file)?;

    writeln!(file, "BIOME MAP:")?;
    write!(file, "{}", biome_ascii(&biome_map, &table))?;
    writeln!(file)?;

    writeln!(file, "BIOME COUNTS:")?;
    let total = histogram.total() as f64;
    for (band, &count) in table.bands().iter().zip(&histogram.counts) {
        writeln!(file, "  {:<14} {:>6} ({:.1}%)", band.name, count, 100.0 * count as f64 / total)?;
    }
    writeln!(file, "  {:<14} {:>6}", "unclassified", histogram.unclassified)?;

    println!("Wrote biome_debug.txt");
    Ok(())
}
