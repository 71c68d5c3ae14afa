/// Piecewise linear-to-sRGB transfer for one channel.
#[must_use]
pub fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Apply the transfer per color channel; alpha passes through unchanged.
#[must_use]
pub fn linear_to_srgb_rgba(rgba: [f32; 4]) -> [f32; 4] {
    [
        linear_to_srgb(rgba[0]),
        linear_to_srgb(rgba[1]),
        linear_to_srgb(rgba[2]),
        rgba[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_intensity_maps_to_one() {
        // 1.055 * 1^(1/2.4) - 0.055 == 1.0
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_maps_to_zero() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
    }

    #[test]
    fn linear_segment_below_the_knee() {
        let v = 0.002;
        assert!((linear_to_srgb(v) - v * 12.92).abs() < 1e-7);
    }

    #[test]
    fn alpha_passes_through() {
        let out = linear_to_srgb_rgba([0.5, 0.5, 0.5, 0.25]);
        assert_eq!(out[3], 0.25);
        assert!(out[0] > 0.5);
    }
}
