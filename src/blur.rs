//! Gaussian smoothing of elevation rasters.
//!
//! Sampling outside the raster clamps to the nearest border cell. This differs on
//! purpose from the noise sampler, which wraps: the blurred map is not a torus.

use tracing::debug;

use crate::error::GenError;
use crate::tilemap::Tilemap;

/// Normalized Gaussian kernel of side `2 * radius + 1`.
///
/// Only the 1D axis weights are stored. The 2D kernel is their outer product, which
/// is exactly the normalized 2D Gaussian, so [`GaussianKernel::weight`] derives it
/// on demand.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    radius: usize,
    sigma: f32,
    /// 1D weights, summing to 1
    axis: Vec<f32>,
}

impl GaussianKernel {
    pub fn new(radius: usize, sigma: f32) -> Result<Self, GenError> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(GenError::param("sigma", sigma));
        }
        let size = radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .filter(|&size| i64::try_from(size).is_ok())
            .ok_or_else(|| GenError::param("radius", radius as f64))?;

        // f64 keeps sigma^2 representable for any positive f32 sigma
        let two_sigma_sq = 2.0 * f64::from(sigma) * f64::from(sigma);
        let mut axis: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - radius as f64;
                (-d * d / two_sigma_sq).exp()
            })
            .collect();
        let total: f64 = axis.iter().sum();
        check_weight_sum(total)?;
        axis.iter_mut().for_each(|w| *w /= total);

        Ok(Self {
            radius,
            sigma,
            axis: axis.into_iter().map(|w| w as f32).collect(),
        })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn size(&self) -> usize {
        self.axis.len()
    }

    /// Weight at offset `(dx, dy)` from the centre, each in `-radius..=radius`.
    pub fn weight(&self, dx: i64, dy: i64) -> f32 {
        let r = self.radius as i64;
        self.axis[(dx + r) as usize] * self.axis[(dy + r) as usize]
    }

    pub fn axis_weights(&self) -> &[f32] {
        &self.axis
    }
}

fn check_weight_sum(total: f64) -> Result<(), GenError> {
    if total.is_finite() && total > 0.0 {
        Ok(())
    } else {
        Err(GenError::NumericAnomaly { stage: "blur kernel", value: total })
    }
}

fn to_intensity(value: f32) -> Result<u8, GenError> {
    if !value.is_finite() {
        return Err(GenError::NumericAnomaly { stage: "blur", value: value.into() });
    }
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

/// Separable blur: a horizontal pass into a float buffer, then a vertical pass.
pub fn blur(raster: &Tilemap<u8>, radius: usize, sigma: f32) -> Result<Tilemap<u8>, GenError> {
    let kernel = GaussianKernel::new(radius, sigma)?;
    let axis = kernel.axis_weights();
    let r = radius as i64;
    debug!(radius, sigma, width = raster.width, height = raster.height, "separable blur");

    let mut horizontal = Tilemap::new_with(raster.width, raster.height, 0.0f32);
    for y in 0..raster.height {
        for x in 0..raster.width {
            let mut sum = 0.0;
            for (k, &w) in axis.iter().enumerate() {
                let sx = x as i64 + k as i64 - r;
                sum += w * f32::from(*raster.get_clamped(sx, y as i64));
            }
            horizontal.set(x, y, sum);
        }
    }

    let mut data = Vec::with_capacity(raster.len());
    for y in 0..raster.height {
        for x in 0..raster.width {
            let mut sum = 0.0;
            for (k, &w) in axis.iter().enumerate() {
                let sy = y as i64 + k as i64 - r;
                sum += w * *horizontal.get_clamped(x as i64, sy);
            }
            data.push(to_intensity(sum)?);
        }
    }

    Tilemap::from_vec(raster.width, raster.height, data)
}

/// Direct 2D convolution, O(cells * kernel area). Reference for [`blur`].
pub fn blur_direct(raster: &Tilemap<u8>, radius: usize, sigma: f32) -> Result<Tilemap<u8>, GenError> {
    let kernel = GaussianKernel::new(radius, sigma)?;
    let r = radius as i64;

    let mut data = Vec::with_capacity(raster.len());
    for y in 0..raster.height as i64 {
        for x in 0..raster.width as i64 {
            let mut sum = 0.0f32;
            for dy in -r..=r {
                for dx in -r..=r {
                    sum += kernel.weight(dx, dy) * f32::from(*raster.get_clamped(x + dx, y + dy));
                }
            }
            data.push(to_intensity(sum)?);
        }
    }

    Tilemap::from_vec(raster.width, raster.height, data)
}
