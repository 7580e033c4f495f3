//! Seeded base lattice for value noise.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenError;
use crate::tilemap::Tilemap;

/// Grid of independent random scalars in [-1, 1], read-only once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseLattice {
    values: Tilemap<f32>,
}

impl NoiseLattice {
    /// Fill a `width` x `height` lattice from `seed`.
    ///
    /// The generator is advanced exactly `width * height` times in row-major order, so the
    /// same seed and dimensions always give a bit-identical lattice.
    pub fn generate(seed: u64, width: usize, height: usize) -> Result<Self, GenError> {
        if width == 0 || height == 0 {
            return Err(GenError::InvalidDimension { width, height });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let data: Vec<f32> = (0..width * height)
            .map(|_| rng.gen::<f32>() * 2.0 - 1.0)
            .collect();

        Ok(Self {
            values: Tilemap::from_vec(width, height, data)?,
        })
    }

    pub fn width(&self) -> usize {
        self.values.width
    }

    pub fn height(&self) -> usize {
        self.values.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        *self.values.get(x, y)
    }

    /// Toroidal read: any integer coordinate maps back onto the lattice.
    #[inline]
    pub fn get_wrapped(&self, x: i64, y: i64) -> f32 {
        *self.values.get_wrapped(x, y)
    }

    pub fn values(&self) -> &Tilemap<f32> {
        &self.values
    }
}
