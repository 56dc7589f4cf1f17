//! Deterministic k-means quantization of an image's non-neutral pixels.
//!
//! Seeds come from the most populated cells of a 4-bit-per-channel
//! histogram, so the same pixels always produce the same palette.

use image::RgbImage;

use super::color::is_near_neutral;

const MAX_ITERATIONS: usize = 10;
/// Stop once no centroid moves further than this (in RGB units).
const CONVERGENCE_EPSILON: f64 = 0.5;
const BINS_PER_CHANNEL: usize = 16;

/// Up to `k` dominant colors, most populated cluster first.
///
/// Near-neutral pixels are ignored; an image made only of them yields an
/// empty palette.
pub(crate) fn dominant_colors(image: &RgbImage, k: usize) -> Vec<[u8; 3]> {
    let pixels: Vec<[f64; 3]> = image
        .pixels()
        .map(|p| p.0)
        .filter(|c| !is_near_neutral(*c))
        .map(|c| c.map(f64::from))
        .collect();

    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids = histogram_seeds(&pixels, k);
    let mut counts = vec![0usize; centroids.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut sums = vec![[0.0f64; 3]; centroids.len()];
        counts.iter_mut().for_each(|c| *c = 0);

        for px in &pixels {
            let idx = nearest(&centroids, px);
            counts[idx] += 1;
            for ch in 0..3 {
                sums[idx][ch] += px[ch];
            }
        }

        let mut max_shift = 0.0f64;
        for (i, centroid) in centroids.iter_mut().enumerate() {
            if counts[i] == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let n = counts[i] as f64;
            let updated = [sums[i][0] / n, sums[i][1] / n, sums[i][2] / n];
            max_shift = max_shift.max(squared_distance(centroid, &updated).sqrt());
            *centroid = updated;
        }

        if max_shift < CONVERGENCE_EPSILON {
            break;
        }
    }

    let mut clusters: Vec<(usize, [f64; 3])> = counts
        .into_iter()
        .zip(centroids)
        .filter(|(count, _)| *count > 0)
        .collect();
    // Stable sort keeps seed order between equally sized clusters.
    clusters.sort_by(|a, b| b.0.cmp(&a.0));

    clusters
        .into_iter()
        .map(|(_, c)| c.map(channel_to_u8))
        .collect()
}

/// Mean colors of the `k` most populated histogram cells.
fn histogram_seeds(pixels: &[[f64; 3]], k: usize) -> Vec<[f64; 3]> {
    let mut cells = vec![(0usize, [0.0f64; 3]); BINS_PER_CHANNEL.pow(3)];
    for px in pixels {
        let cell = &mut cells[cell_index(px)];
        cell.0 += 1;
        for ch in 0..3 {
            cell.1[ch] += px[ch];
        }
    }

    let mut populated: Vec<(usize, usize, [f64; 3])> = cells
        .into_iter()
        .enumerate()
        .filter(|(_, (count, _))| *count > 0)
        .map(|(idx, (count, sum))| {
            #[allow(clippy::cast_precision_loss)]
            let n = count as f64;
            (idx, count, [sum[0] / n, sum[1] / n, sum[2] / n])
        })
        .collect();
    populated.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    populated.into_iter().take(k).map(|(_, _, c)| c).collect()
}

fn cell_index(px: &[f64; 3]) -> usize {
    let bucket = |v: f64| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let b = (v as usize) * BINS_PER_CHANNEL / 256;
        b.min(BINS_PER_CHANNEL - 1)
    };
    (bucket(px[0]) * BINS_PER_CHANNEL + bucket(px[1])) * BINS_PER_CHANNEL + bucket(px[2])
}

fn nearest(centroids: &[[f64; 3]], px: &[f64; 3]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_distance(c, px);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|ch| (a[ch] - b[ch]).powi(2)).sum()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn striped(colors: &[([u8; 3], u32)]) -> RgbImage {
        let height: u32 = colors.iter().map(|(_, rows)| rows).sum();
        let mut img = RgbImage::new(10, height);
        let mut y = 0;
        for (color, rows) in colors {
            for _ in 0..*rows {
                for x in 0..10 {
                    img.put_pixel(x, y, Rgb(*color));
                }
                y += 1;
            }
        }
        img
    }

    #[test]
    fn solid_color_yields_single_centroid() {
        let img = striped(&[([200, 30, 40], 10)]);
        assert_eq!(dominant_colors(&img, 3), vec![[200, 30, 40]]);
    }

    #[test]
    fn orders_clusters_by_area() {
        let img = striped(&[([20, 120, 220], 3), ([200, 30, 40], 6), ([40, 180, 60], 1)]);
        assert_eq!(
            dominant_colors(&img, 3),
            vec![[200, 30, 40], [20, 120, 220], [40, 180, 60]]
        );
    }

    #[test]
    fn ignores_neutral_pixels() {
        let img = striped(&[([255, 255, 255], 8), ([200, 30, 40], 2)]);
        assert_eq!(dominant_colors(&img, 3), vec![[200, 30, 40]]);
    }

    #[test]
    fn all_neutral_image_yields_nothing() {
        let img = striped(&[([250, 250, 248], 4), ([10, 10, 12], 4), ([128, 128, 130], 4)]);
        assert!(dominant_colors(&img, 3).is_empty());
    }

    #[test]
    fn never_exceeds_k() {
        let img = striped(&[
            ([200, 30, 40], 2),
            ([20, 120, 220], 2),
            ([40, 180, 60], 2),
            ([240, 160, 20], 2),
            ([150, 40, 200], 2),
        ]);
        assert_eq!(dominant_colors(&img, 3).len(), 3);
    }

    #[test]
    fn same_pixels_give_same_palette() {
        let img = striped(&[([200, 30, 40], 5), ([210, 40, 60], 5), ([20, 120, 220], 3)]);
        assert_eq!(dominant_colors(&img, 3), dominant_colors(&img, 3));
    }
}
