//! Raw noise to 8-bit elevation.

use crate::error::GenError;

/// Map a raw value in [-1, 1] onto [0, 1] and shape it with `v ^ power`.
///
/// Finite raw values outside [-1, 1] saturate before the power curve. Non-finite
/// input is reported, never clamped.
pub fn normalize(raw: f32, power: f32) -> Result<f32, GenError> {
    if !raw.is_finite() {
        return Err(GenError::NumericAnomaly { stage: "remap", value: raw.into() });
    }
    let v = (raw * 0.5 + 0.5).clamp(0.0, 1.0);
    let shaped = v.powf(power);
    if !shaped.is_finite() {
        return Err(GenError::NumericAnomaly { stage: "remap", value: shaped.into() });
    }
    Ok(shaped)
}

/// Scale a [0, 1] value to an intensity, rounding to nearest.
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Full remap: normalize, power curve, quantize.
pub fn remap(raw: f32, power: f32) -> Result<u8, GenError> {
    normalize(raw, power).map(quantize)
}

pub(crate) fn validate_power(power: f32) -> Result<(), GenError> {
    if power > 0.0 && power.is_finite() {
        Ok(())
    } else {
        Err(GenError::param("power", power))
    }
}
