//! Sample-domain gain stage
//!
//! Output device volume tops out at unity, so any boost above that has to
//! be baked into the samples themselves.

/// Multiply every sample by `multiplier`, hard-clamping to [-1, 1].
///
/// Multipliers at or below 1.0 (and NaN) leave the buffer untouched.
/// Returns the number of samples that hit the clamp.
pub fn amplify(samples: &mut [f32], multiplier: f32) -> usize {
    if multiplier.is_nan() || multiplier <= 1.0 {
        return 0;
    }

    let mut clipped = 0;
    for sample in samples.iter_mut() {
        let boosted = *sample * multiplier;
        if !(-1.0..=1.0).contains(&boosted) {
            clipped += 1;
        }
        *sample = boosted.clamp(-1.0, 1.0);
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_and_below_is_bit_identical() {
        let original = vec![0.5f32, -0.25, 1.0, -1.0, 0.0, 3.0, f32::MIN_POSITIVE];
        for multiplier in [1.0f32, 0.99, 0.5, 0.0, -2.0, f32::NAN] {
            let mut samples = original.clone();
            assert_eq!(amplify(&mut samples, multiplier), 0);
            let same = samples
                .iter()
                .zip(&original)
                .all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same, "multiplier {multiplier} modified the buffer");
        }
    }

    #[test]
    fn test_gain_scales_and_clamps() {
        let mut samples = vec![0.1f32, -0.1, 0.5, -0.5, 0.9, -0.9];
        let clipped = amplify(&mut samples, 2.0);
        assert_eq!(samples, vec![0.2, -0.2, 1.0, -1.0, 1.0, -1.0]);
        // Exactly +/-1.0 is not counted as clipping
        assert_eq!(clipped, 2);
    }

    #[test]
    fn test_output_always_in_range() {
        let mut samples: Vec<f32> = (-200..=200).map(|i| i as f32 / 37.0).collect();
        for multiplier in [1.01f32, 2.0, 5.0, 1000.0, f32::MAX] {
            let mut boosted = samples.clone();
            amplify(&mut boosted, multiplier);
            assert!(boosted.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
        amplify(&mut samples, 3.0);
        assert_eq!(samples[200], 0.0);
    }
}
