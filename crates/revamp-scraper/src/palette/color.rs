//! Color-space predicates: near-neutral detection and perceptual distance.

use revamp_core::ColorSample;

/// HSL lightness above which a color reads as white.
const WHITE_LIGHTNESS: f64 = 0.92;
/// HSL lightness below which a color reads as black.
const BLACK_LIGHTNESS: f64 = 0.10;
/// HSL saturation below which a color reads as gray.
const GRAY_SATURATION: f64 = 0.15;

/// Redmean distance under which two colors count as the same brand color.
pub const MERGE_DISTANCE: f64 = 64.0;

/// `true` for near-white, near-black and near-gray colors.
#[must_use]
pub fn is_near_neutral(rgb: [u8; 3]) -> bool {
    let [r, g, b] = rgb.map(|c| f64::from(c) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if lightness > WHITE_LIGHTNESS || lightness < BLACK_LIGHTNESS {
        return true;
    }

    let chroma = max - min;
    let saturation = if chroma == 0.0 {
        0.0
    } else {
        chroma / (1.0 - (2.0 * lightness - 1.0).abs())
    };
    saturation < GRAY_SATURATION
}

/// "Redmean" weighted Euclidean distance, a cheap approximation of
/// perceived difference in sRGB.
#[must_use]
pub fn redmean_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    let r_mean = (f64::from(a[0]) + f64::from(b[0])) / 2.0;
    let dr = f64::from(a[0]) - f64::from(b[0]);
    let dg = f64::from(a[1]) - f64::from(b[1]);
    let db = f64::from(a[2]) - f64::from(b[2]);
    ((2.0 + r_mean / 256.0) * dr * dr
        + 4.0 * dg * dg
        + (2.0 + (255.0 - r_mean) / 256.0) * db * db)
        .sqrt()
}

/// Collapses samples closer than `threshold` onto the first one seen.
///
/// Survivors keep their input order and are pairwise at least `threshold`
/// apart, so merging an already-merged list returns it unchanged.
#[must_use]
pub fn merge_similar(samples: Vec<ColorSample>, threshold: f64) -> Vec<ColorSample> {
    let mut kept: Vec<ColorSample> = Vec::with_capacity(samples.len());
    for sample in samples {
        if kept
            .iter()
            .all(|k| redmean_distance(k.rgb, sample.rgb) >= threshold)
        {
            kept.push(sample);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn near_neutral_examples_are_excluded() {
        assert!(is_near_neutral([250, 250, 248]));
        assert!(is_near_neutral([10, 10, 12]));
        assert!(is_near_neutral([128, 128, 130]));
        assert!(is_near_neutral([255, 255, 255]));
        assert!(is_near_neutral([0, 0, 0]));
    }

    #[test]
    fn saturated_colors_are_kept() {
        assert!(!is_near_neutral([200, 30, 40]));
        assert!(!is_near_neutral([20, 120, 220]));
        assert!(!is_near_neutral([255, 200, 210]));
        assert!(!is_near_neutral([34, 139, 34]));
    }

    #[test]
    fn distance_is_zero_for_identical_and_symmetric() {
        assert!(redmean_distance([12, 200, 99], [12, 200, 99]).abs() < f64::EPSILON);
        let ab = redmean_distance([200, 30, 40], [20, 120, 220]);
        let ba = redmean_distance([20, 120, 220], [200, 30, 40]);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn merge_keeps_first_of_similar_colors() {
        let merged = merge_similar(
            vec![
                ColorSample::new([200, 30, 40], "a"),
                ColorSample::new([205, 35, 42], "b"),
                ColorSample::new([20, 120, 220], "c"),
            ],
            MERGE_DISTANCE,
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].source, "a");
        assert_eq!(merged[1].source, "c");
    }

    #[test]
    fn merge_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let samples: Vec<ColorSample> = (0..40)
                .map(|i| ColorSample::new(rng.random::<[u8; 3]>(), format!("img{i}")))
                .collect();
            let once = merge_similar(samples, MERGE_DISTANCE);
            let twice = merge_similar(once.clone(), MERGE_DISTANCE);
            assert_eq!(once, twice);
        }
    }
}
