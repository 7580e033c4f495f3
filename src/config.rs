//! Map configuration, loadable from JSON and overridable from the command line.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::biomes::BiomeTable;
use crate::error::{ConfigError, GenError};
use crate::fractal::OctaveParams;
use crate::heightmap::{BlurParams, ElevationParams};

/// Full description of one map run. Missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    /// Fixed seed; a random one is drawn when absent
    pub seed: Option<u64>,
    pub frequency: f32,
    pub amplitude: f32,
    pub persistence: f32,
    pub octaves: u32,
    pub power: f32,
    /// Smoothing pass, off unless present
    pub blur: Option<BlurParams>,
    pub biomes: BiomeTable,
    /// Biome map PNG
    pub output: String,
    /// Grayscale elevation PNG, skipped when absent
    pub elevation_output: Option<String>,
    /// Pixels per cell edge in the biome map
    pub scale: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        let octaves = OctaveParams::default();
        Self {
            width: 256,
            height: 256,
            seed: None,
            frequency: octaves.frequency,
            amplitude: octaves.amplitude,
            persistence: octaves.persistence,
            octaves: octaves.octaves,
            power: 0.9,
            blur: None,
            biomes: BiomeTable::island(),
            output: "generated_island.png".to_string(),
            elevation_output: None,
            scale: 2,
        }
    }
}

impl MapConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Generation parameters for a concrete seed.
    pub fn elevation_params(&self, seed: u64) -> ElevationParams {
        ElevationParams {
            width: self.width,
            height: self.height,
            seed,
            octaves: OctaveParams {
                frequency: self.frequency,
                amplitude: self.amplitude,
                persistence: self.persistence,
                octaves: self.octaves,
            },
            power: self.power,
        }
    }

    /// Reject anything generation would reject, before doing any work.
    pub fn validate(&self) -> Result<(), GenError> {
        self.elevation_params(self.seed.unwrap_or_default()).validate()?;
        if let Some(blur) = &self.blur {
            if !(blur.sigma > 0.0) || !blur.sigma.is_finite() {
                return Err(GenError::param("sigma", blur.sigma));
            }
        }
        if self.scale == 0 {
            return Err(GenError::param("scale", self.scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_island_program() {
        let config = MapConfig::default();
        assert_eq!((config.width, config.height), (256, 256));
        assert_eq!(config.octaves, 16);
        assert!((config.frequency - 0.1).abs() < f32::EPSILON);
        assert!((config.persistence - 0.1).abs() < f32::EPSILON);
        assert!((config.power - 0.9).abs() < f32::EPSILON);
        assert!(config.blur.is_none());
        assert_eq!(config.biomes.bands().len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: MapConfig =
            serde_json::from_str(r#"{"width": 64, "seed": 7, "blur": {"radius": 2, "sigma": 1.5}}"#)
                .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 256);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.blur, Some(BlurParams { radius: 2, sigma: 1.5 }));
        assert_eq!(config.elevation_params(7).octaves.octaves, 16);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let config = MapConfig {
            seed: Some(42),
            blur: Some(BlurParams::default()),
            ..MapConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(MapConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"octaves": 0}"#).unwrap();
        assert!(matches!(
            MapConfig::load(&path),
            Err(ConfigError::Invalid(GenError::InvalidParameter { name: "octaves", .. }))
        ));

        std::fs::write(&path, r#"{"blur": {"radius": -1, "sigma": 1.0}}"#).unwrap();
        assert!(matches!(MapConfig::load(&path), Err(ConfigError::Parse(_))));

        assert!(matches!(
            MapConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_validate_blur_and_scale() {
        let config = MapConfig {
            blur: Some(BlurParams { radius: 2, sigma: 0.0 }),
            ..MapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MapConfig {
            scale: 0,
            ..MapConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
