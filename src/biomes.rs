//! Elevation bands ("biomes") and the classifier that assigns them.
//!
//! A table is an ordered list of disjoint inclusive ranges. Lookup returns the first
//! band containing the value, or `None` when no band does: uncovered elevations stay
//! unclassified instead of falling back to a neighbouring band.

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::tilemap::Tilemap;

/// One named elevation range with its map colour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeBand {
    pub name: String,
    /// Lowest elevation in the band (inclusive)
    pub min: u8,
    /// Highest elevation in the band (inclusive)
    pub max: u8,
    pub color: [u8; 3],
    /// Character used by text dumps
    pub glyph: char,
}

impl BiomeBand {
    pub fn new(name: &str, min: u8, max: u8, color: [u8; 3], glyph: char) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
            color,
            glyph,
        }
    }

    #[inline]
    pub fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }

    fn overlaps(&self, other: &BiomeBand) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Ordered, validated set of biome bands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BiomeBand>", into = "Vec<BiomeBand>")]
pub struct BiomeTable {
    bands: Vec<BiomeBand>,
}

impl BiomeTable {
    /// Build a table, rejecting inverted or overlapping ranges.
    pub fn new(bands: Vec<BiomeBand>) -> Result<Self, GenError> {
        for (i, band) in bands.iter().enumerate() {
            if band.min > band.max {
                return Err(GenError::InvalidBiomeTable(format!(
                    "band `{}` has min {} above max {}",
                    band.name, band.min, band.max
                )));
            }
            if let Some(other) = bands[..i].iter().find(|other| other.overlaps(band)) {
                return Err(GenError::InvalidBiomeTable(format!(
                    "bands `{}` and `{}` overlap",
                    other.name, band.name
                )));
            }
        }
        Ok(Self { bands })
    }

    /// The eight-band island palette, covering 0..=255 without gaps.
    pub fn island() -> Self {
        Self {
            bands: vec![
                BiomeBand::new("Deep Water", 0, 24, [0, 0, 139], '~'),
                BiomeBand::new("Water", 25, 49, [0, 0, 255], '-'),
                BiomeBand::new("Sand", 50, 79, [218, 165, 32], '.'),
                BiomeBand::new("Valley", 80, 119, [0, 100, 0], ','),
                BiomeBand::new("Isle", 120, 149, [0, 128, 0], '"'),
                BiomeBand::new("Forest", 150, 199, [50, 205, 50], 'f'),
                BiomeBand::new("Mountain", 200, 243, [128, 128, 128], '^'),
                BiomeBand::new("High Mountain", 244, 255, [245, 245, 245], 'A'),
            ],
        }
    }

    pub fn bands(&self) -> &[BiomeBand] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> Option<&BiomeBand> {
        self.bands.get(index)
    }

    /// Index of the first band containing `value`.
    pub fn classify_index(&self, value: u8) -> Option<usize> {
        self.bands.iter().position(|band| band.contains(value))
    }

    /// The band containing `value`, or `None` if unclassified.
    pub fn classify(&self, value: u8) -> Option<&BiomeBand> {
        self.classify_index(value).map(|i| &self.bands[i])
    }

    /// Band index for every cell of an elevation raster.
    pub fn classify_raster(&self, elevation: &Tilemap<u8>) -> Tilemap<Option<usize>> {
        elevation.map(|&v| self.classify_index(v))
    }

    /// Cell count per band, plus unclassified cells.
    pub fn histogram(&self, biome_map: &Tilemap<Option<usize>>) -> BiomeHistogram {
        let mut counts = vec![0usize; self.bands.len()];
        let mut unclassified = 0;
        for &cell in biome_map.as_slice() {
            match cell {
                Some(i) if i < counts.len() => counts[i] += 1,
                _ => unclassified += 1,
            }
        }
        BiomeHistogram { counts, unclassified }
    }
}

impl Default for BiomeTable {
    fn default() -> Self {
        Self::island()
    }
}

impl TryFrom<Vec<BiomeBand>> for BiomeTable {
    type Error = GenError;

    fn try_from(bands: Vec<BiomeBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<BiomeTable> for Vec<BiomeBand> {
    fn from(table: BiomeTable) -> Self {
        table.bands
    }
}

/// Result of [`BiomeTable::histogram`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeHistogram {
    /// Cells per band, indexed like the table
    pub counts: Vec<usize>,
    pub unclassified: usize,
}

impl BiomeHistogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum::<usize>() + self.unclassified
    }
}
