use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

use crate::biomes::BiomeTable;
use crate::tilemap::Tilemap;

/// Colour drawn for cells no band claims.
pub const UNCLASSIFIED_COLOR: [u8; 3] = [255, 0, 255];

/// Grayscale image of an elevation raster, one pixel per cell.
pub fn elevation_image(elevation: &Tilemap<u8>) -> GrayImage {
    let mut img: GrayImage = ImageBuffer::new(elevation.width as u32, elevation.height as u32);
    for (x, y, &v) in elevation.iter() {
        img.put_pixel(x as u32, y as u32, Luma([v]));
    }
    img
}

/// Export an elevation raster as a grayscale PNG.
pub fn export_elevation(elevation: &Tilemap<u8>, path: &str) -> Result<(), image::ImageError> {
    elevation_image(elevation).save(path)
}

/// Colour image of a biome map, each cell drawn as a `scale` x `scale` block.
pub fn biome_image(biome_map: &Tilemap<Option<usize>>, table: &BiomeTable, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let mut img: RgbImage = ImageBuffer::new(
        biome_map.width as u32 * scale,
        biome_map.height as u32 * scale,
    );

    for (x, y, &cell) in biome_map.iter() {
        let color = cell
            .and_then(|i| table.band(i))
            .map_or(UNCLASSIFIED_COLOR, |band| band.color);
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x as u32 * scale + dx, y as u32 * scale + dy, Rgb(color));
            }
        }
    }

    img
}

/// Export a biome map as an RGB PNG.
pub fn export_biome_map(
    biome_map: &Tilemap<Option<usize>>,
    table: &BiomeTable,
    scale: u32,
    path: &str,
) -> Result<(), image::ImageError> {
    biome_image(biome_map, table, scale).save(path)
}

/// One text line per row, using each band's glyph (`?` when unclassified).
pub fn biome_ascii(biome_map: &Tilemap<Option<usize>>, table: &BiomeTable) -> String {
    let mut out = String::with_capacity((biome_map.width + 1) * biome_map.height);
    for y in 0..biome_map.height {
        for &cell in biome_map.row(y) {
            out.push(cell.and_then(|i| table.band(i)).map_or('?', |band| band.glyph));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::BiomeBand;

    fn two_band_table() -> BiomeTable {
        BiomeTable::new(vec![
            BiomeBand::new("Low", 0, 99, [10, 20, 30], 'l'),
            BiomeBand::new("High", 200, 255, [200, 210, 220], 'h'),
        ])
        .unwrap()
    }

    #[test]
    fn test_biome_image_scales_blocks() {
        let table = two_band_table();
        let biomes = Tilemap::from_vec(2, 1, vec![Some(0), None]).unwrap();
        let img = biome_image(&biomes, &table, 2);
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30]);
        assert_eq!(img.get_pixel(2, 0).0, UNCLASSIFIED_COLOR);
        assert_eq!(img.get_pixel(3, 1).0, UNCLASSIFIED_COLOR);
    }

    #[test]
    fn test_ascii_dump() {
        let table = two_band_table();
        let biomes = Tilemap::from_vec(3, 2, vec![Some(0), Some(1), None, None, Some(0), Some(0)]).unwrap();
        assert_eq!(biome_ascii(&biomes, &table), "lh?\n?ll\n");
    }

    #[test]
    fn test_png_files_written() {
        let dir = tempfile::tempdir().unwrap();
        let elevation = Tilemap::from_vec(3, 2, vec![0u8, 50, 150, 200, 255, 99]).unwrap();
        let table = two_band_table();

        let gray_path = dir.path().join("elevation.png");
        export_elevation(&elevation, gray_path.to_str().unwrap()).unwrap();
        let gray = image::open(&gray_path).unwrap().to_luma8();
        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.get_pixel(1, 1).0, [255]);

        let biome_path = dir.path().join("biomes.png");
        let biomes = table.classify_raster(&elevation);
        export_biome_map(&biomes, &table, 3, biome_path.to_str().unwrap()).unwrap();
        let rgb = image::open(&biome_path).unwrap().to_rgb8();
        assert_eq!(rgb.dimensions(), (9, 6));
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);
    }
}
