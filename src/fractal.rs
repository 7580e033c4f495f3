//! Fractal (multi-octave) summation of lattice samples.

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::lattice::NoiseLattice;
use crate::sampler::sample;

/// Octave settings: after every octave the frequency doubles and the amplitude is
/// multiplied by `persistence`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctaveParams {
    /// Lattice cells per grid cell for the first octave (lower = larger features)
    pub frequency: f32,
    /// Weight of the first octave
    pub amplitude: f32,
    /// Amplitude decay per octave, in (0, 1]
    pub persistence: f32,
    /// Number of octaves, at least 1
    pub octaves: u32,
}

impl Default for OctaveParams {
    fn default() -> Self {
        Self {
            frequency: 0.1,
            amplitude: 1.0,
            persistence: 0.1,
            octaves: 16,
        }
    }
}

impl OctaveParams {
    pub fn validate(&self) -> Result<(), GenError> {
        if !(self.frequency > 0.0) || !self.frequency.is_finite() {
            return Err(GenError::param("frequency", self.frequency));
        }
        if !self.amplitude.is_finite() {
            return Err(GenError::param("amplitude", self.amplitude));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(GenError::param("persistence", self.persistence));
        }
        if self.octaves < 1 {
            return Err(GenError::param("octaves", self.octaves));
        }
        Ok(())
    }
}

/// Raw fractal value at grid cell `(x, y)`, clamped to [-1, 1].
///
/// The clamp is applied after summation, so constructive overlap between octaves is
/// cut off rather than rescaled. A non-finite sum passes through unclamped for the
/// remap stage to report.
pub fn fractal_value(x: usize, y: usize, params: &OctaveParams, lattice: &NoiseLattice) -> f32 {
    let mut total = 0.0f32;
    let mut frequency = params.frequency;
    let mut amplitude = params.amplitude;

    for _ in 0..params.octaves {
        total += sample(lattice, x as f32 * frequency, y as f32 * frequency) * amplitude;
        frequency *= 2.0;
        amplitude *= params.persistence;
    }

    if total.is_finite() {
        total.clamp(-1.0, 1.0)
    } else {
        total
    }
}
