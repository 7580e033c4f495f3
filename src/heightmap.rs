//! Elevation raster generation: lattice, fractal sum, remap, optional blur.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::blur;
use crate::error::GenError;
use crate::fractal::{fractal_value, OctaveParams};
use crate::lattice::NoiseLattice;
use crate::remap::{normalize, quantize, validate_power};
use crate::tilemap::Tilemap;

/// 8-bit elevation per cell, row-major.
pub type ElevationRaster = Tilemap<u8>;

/// Share of clamped cells above which the fractal clamp is reported.
const SATURATION_WARN_RATIO: f32 = 0.05;

// =============================================================================
// PARAMETERS
// =============================================================================

/// Everything needed to synthesize one elevation raster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationParams {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    #[serde(flatten)]
    pub octaves: OctaveParams,
    /// Power curve exponent (> 1 favours lowlands, < 1 favours peaks)
    pub power: f32,
}

impl ElevationParams {
    pub fn validate(&self) -> Result<(), GenError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        self.octaves.validate()?;
        validate_power(self.power)
    }
}

/// Optional smoothing pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlurParams {
    pub radius: usize,
    pub sigma: f32,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self { radius: 3, sigma: 2.0 }
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Normalized, power-shaped noise in [0, 1] for every cell.
///
/// The elevation raster is exactly the quantization of this matrix.
pub fn generate_noise_matrix(params: &ElevationParams) -> Result<Tilemap<f32>, GenError> {
    params.validate()?;
    let start = Instant::now();

    let lattice = NoiseLattice::generate(params.seed, params.width, params.height)?;
    debug!(seed = params.seed, elapsed = ?start.elapsed(), "lattice ready");

    let mut saturated = 0usize;
    let mut data = Vec::with_capacity(params.width * params.height);
    for y in 0..params.height {
        for x in 0..params.width {
            let raw = fractal_value(x, y, &params.octaves, &lattice);
            if raw.abs() == 1.0 {
                saturated += 1;
            }
            data.push(normalize(raw, params.power)?);
        }
    }

    let ratio = saturated as f32 / data.len() as f32;
    if ratio > SATURATION_WARN_RATIO {
        warn!(
            saturated,
            ratio,
            "fractal sum clamped to [-1, 1] in {:.1}% of cells",
            ratio * 100.0
        );
    }
    debug!(elapsed = ?start.elapsed(), octaves = params.octaves.octaves, "noise matrix ready");

    Tilemap::from_vec(params.width, params.height, data)
}

/// Synthesize the 8-bit elevation raster.
pub fn generate_elevation_raster(params: &ElevationParams) -> Result<ElevationRaster, GenError> {
    let matrix = generate_noise_matrix(params)?;
    let raster = matrix.map(|&v| quantize(v));
    info!(
        width = raster.width,
        height = raster.height,
        seed = params.seed,
        "elevation raster generated"
    );
    Ok(raster)
}

/// Smooth a raster with a normalized Gaussian kernel, clamping at the borders.
pub fn apply_gaussian_blur(
    raster: &ElevationRaster,
    radius: usize,
    sigma: f32,
) -> Result<ElevationRaster, GenError> {
    if raster.is_empty() {
        return Err(GenError::InvalidDimension {
            width: raster.width,
            height: raster.height,
        });
    }
    let start = Instant::now();
    let blurred = blur::blur(raster, radius, sigma)?;
    debug!(radius, sigma, elapsed = ?start.elapsed(), "blur applied");
    Ok(blurred)
}

/// Elevation raster followed by the blur pass when one is requested.
pub fn generate_map(
    params: &ElevationParams,
    blur: Option<&BlurParams>,
) -> Result<ElevationRaster, GenError> {
    let raster = generate_elevation_raster(params)?;
    match blur {
        Some(b) => apply_gaussian_blur(&raster, b.radius, b.sigma),
        None => Ok(raster),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remap::remap;

    fn island_params() -> ElevationParams {
        ElevationParams {
            width: 100,
            height: 100,
            seed: 12345,
            octaves: OctaveParams {
                frequency: 0.1,
                amplitude: 1.0,
                persistence: 0.5,
                octaves: 4,
            },
            power: 0.9,
        }
    }

    #[test]
    fn test_small_single_octave_map() {
        let params = ElevationParams {
            width: 4,
            height: 4,
            seed: 1,
            octaves: OctaveParams {
                frequency: 1.0,
                amplitude: 1.0,
                persistence: 0.5,
                octaves: 1,
            },
            power: 1.0,
        };
        let raster = generate_elevation_raster(&params).unwrap();
        assert_eq!(raster.width, 4);
        assert_eq!(raster.height, 4);
        assert_eq!(raster.len(), 16);

        // at unit frequency every cell lands on its own lattice point
        let lattice = NoiseLattice::generate(1, 4, 4).unwrap();
        for (x, y, &v) in raster.iter() {
            assert_eq!(v, remap(lattice.get(x, y), 1.0).unwrap());
        }
    }

    #[test]
    fn test_many_octaves_at_unit_frequency() {
        // by the last octave the sample coordinates are far beyond i64 range
        let params = ElevationParams {
            width: 4,
            height: 4,
            seed: 1,
            octaves: OctaveParams {
                frequency: 1.0,
                amplitude: 1.0,
                persistence: 0.5,
                octaves: 64,
            },
            power: 1.0,
        };
        let raster = generate_elevation_raster(&params).unwrap();
        assert_eq!((raster.width, raster.height), (4, 4));
    }

    #[test]
    fn test_dimensions_match_request() {
        let params = ElevationParams {
            width: 37,
            height: 11,
            ..island_params()
        };
        let raster = generate_elevation_raster(&params).unwrap();
        assert_eq!((raster.width, raster.height), (37, 11));
    }

    #[test]
    fn test_noise_matrix_in_unit_range() {
        let matrix = generate_noise_matrix(&island_params()).unwrap();
        assert_eq!((matrix.width, matrix.height), (100, 100));
        for (x, y, &v) in matrix.iter() {
            assert!((0.0..=1.0).contains(&v), "{v} out of range at ({x}, {y})");
        }
    }

    #[test]
    fn test_raster_is_quantized_matrix() {
        let params = island_params();
        let matrix = generate_noise_matrix(&params).unwrap();
        let raster = generate_elevation_raster(&params).unwrap();
        for ((_, _, &v), &e) in matrix.iter().zip(raster.as_slice()) {
            assert_eq!(quantize(v), e);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_elevation_raster(&island_params()).unwrap();
        let b = generate_elevation_raster(&island_params()).unwrap();
        assert_eq!(a, b);

        let other = generate_elevation_raster(&ElevationParams {
            seed: 54321,
            ..island_params()
        })
        .unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_map_has_relief() {
        let raster = generate_elevation_raster(&island_params()).unwrap();
        let lo = raster.as_slice().iter().min().unwrap();
        let hi = raster.as_slice().iter().max().unwrap();
        assert!(hi - lo > 50, "expected varied terrain, got {lo}..{hi}");
    }

    #[test]
    fn test_invalid_dimensions() {
        let params = ElevationParams {
            width: 0,
            ..island_params()
        };
        assert_eq!(
            generate_elevation_raster(&params),
            Err(GenError::InvalidDimension { width: 0, height: 100 })
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let base = island_params();
        let cases = [
            ElevationParams { power: 0.0, ..base },
            ElevationParams {
                octaves: OctaveParams { frequency: 0.0, ..base.octaves },
                ..base
            },
            ElevationParams {
                octaves: OctaveParams { persistence: -0.5, ..base.octaves },
                ..base
            },
            ElevationParams {
                octaves: OctaveParams { octaves: 0, ..base.octaves },
                ..base
            },
        ];
        for params in cases {
            assert!(matches!(
                generate_elevation_raster(&params),
                Err(GenError::InvalidParameter { .. })
            ));
        }
        assert!(matches!(
            apply_gaussian_blur(&Tilemap::new_with(4, 4, 0u8), 2, 0.0),
            Err(GenError::InvalidParameter { name: "sigma", .. })
        ));
    }

    #[test]
    fn test_overflowing_amplitude_is_reported() {
        // frequency 1 on a 4x4 lattice: after two octaves every sample hits cell (0, 0),
        // so the running sum overflows unless that cell is almost exactly zero
        let outcomes: Vec<_> = (1..=10u64)
            .map(|seed| {
                generate_elevation_raster(&ElevationParams {
                    width: 4,
                    height: 4,
                    seed,
                    octaves: OctaveParams {
                        frequency: 1.0,
                        amplitude: f32::MAX,
                        persistence: 1.0,
                        octaves: 16,
                    },
                    power: 1.0,
                })
            })
            .collect();
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(GenError::NumericAnomaly { stage: "remap", .. }))));
    }

    #[test]
    fn test_blur_stays_in_range_and_opt_in() {
        let params = island_params();
        let plain = generate_map(&params, None).unwrap();
        assert_eq!(plain, generate_elevation_raster(&params).unwrap());

        let blurred = generate_map(&params, Some(&BlurParams::default())).unwrap();
        assert_eq!((blurred.width, blurred.height), (plain.width, plain.height));
        assert_ne!(blurred, plain);
    }

    #[test]
    fn test_blur_flat_raster() {
        let flat = Tilemap::new_with(10, 10, 100u8);
        let out = apply_gaussian_blur(&flat, 3, 2.0).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_params_serialize_flat() {
        let json = serde_json::to_value(island_params()).unwrap();
        assert_eq!(json["frequency"], serde_json::json!(0.1f32));
        assert_eq!(json["octaves"], serde_json::json!(4));
        let back: ElevationParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, island_params());
    }
}
