//! Pointer input, sampled pull-style by the render tick.
//!
//! The host supplies the current pointer position already normalized to
//! [-1, 1]; this adapter only applies the gain. It is always eligible and
//! never permission-gated.

use crate::signal::OffsetVector;

/// Normalize one pointer sample. Returns `None` for a non-finite position so
/// the caller holds the previous fused value instead of poisoning the cache.
#[must_use]
pub fn offset_from(position: [f32; 2], gain: f32) -> Option<OffsetVector> {
    let offset = OffsetVector::new(position[0] * gain, position[1] * gain);
    offset.is_finite().then_some(offset)
}
