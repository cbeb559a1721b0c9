//! Dominant-color extraction: quantize-and-histogram over a small canvas.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use rayon::prelude::*;

use super::SampledColor;
use crate::bitmap::Bitmap;

/// Side of the fixed canvas every input is resampled to. Bounds the cost
/// of a scan independent of source resolution.
const CANVAS_SIZE: u32 = 100;
/// Quantization steps per channel.
const QUANT_LEVELS: u32 = 8;
/// Pixels more transparent than this are ignored.
const MIN_ALPHA: f64 = 0.5;
/// Mean-brightness band outside of which pixels count as background noise.
const MIN_BRIGHTNESS: f64 = 0.1;
const MAX_BRIGHTNESS: f64 = 0.95;

/// Default maximum palette size.
pub const DEFAULT_MAX_COLORS: usize = 8;

/// Extract the up-to-`max_colors` most dominant colors of `bitmap`,
/// most dominant first.
///
/// Near-transparent pixels and near-black/near-white extremes are dropped
/// before quantization; an image with nothing left after filtering yields
/// an empty palette, not an error. Percentages are shares of the retained
/// pixels. Equal-count buckets rank by ascending bucket key so output is
/// stable across runs.
pub fn dominant_colors(bitmap: &Bitmap, max_colors: usize) -> Vec<SampledColor> {
    // Nearest neighbor keeps actual source pixels on the canvas; a
    // smoothing filter would blend neighbors into buckets that exist in
    // no source pixel.
    let canvas = imageops::resize(
        &bitmap.to_rgba_image(),
        CANVAS_SIZE,
        CANVAS_SIZE,
        FilterType::Nearest,
    );

    let buckets: HashMap<(u8, u8, u8), usize> = canvas
        .as_raw()
        .par_chunks_exact(4)
        .filter_map(|px| quantize([px[0], px[1], px[2], px[3]]))
        .fold(HashMap::new, |mut acc, key| {
            *acc.entry(key).or_insert(0) += 1;
            acc
        })
        .reduce(HashMap::new, |mut left, right| {
            for (key, count) in right {
                *left.entry(key).or_insert(0) += count;
            }
            left
        });

    let retained: usize = buckets.values().sum();
    if retained == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<((u8, u8, u8), usize)> = buckets.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let step = 1.0 / f64::from(QUANT_LEVELS);
    ranked
        .into_iter()
        .take(max_colors)
        .map(|(key, count)| {
            SampledColor::new(
                f64::from(key.0) * step,
                f64::from(key.1) * step,
                f64::from(key.2) * step,
                count as f64 / retained as f64 * 100.0,
            )
        })
        .collect()
}

/// Quantize one RGBA pixel to its bucket key, or drop it as background.
///
/// The key is the per-channel index `round(v * levels)`, 0..=levels; the
/// representative color is recovered as `index / levels`.
fn quantize(px: [u8; 4]) -> Option<(u8, u8, u8)> {
    let r = f64::from(px[0]) / 255.0;
    let g = f64::from(px[1]) / 255.0;
    let b = f64::from(px[2]) / 255.0;
    let a = f64::from(px[3]) / 255.0;

    if a < MIN_ALPHA {
        return None;
    }
    let brightness = (r + g + b) / 3.0;
    if brightness < MIN_BRIGHTNESS || brightness > MAX_BRIGHTNESS {
        return None;
    }

    let levels = f64::from(QUANT_LEVELS);
    Some((
        (r * levels).round() as u8,
        (g * levels).round() as u8,
        (b * levels).round() as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_bitmap(width: u32, height: u32, rgba: [u8; 4]) -> Bitmap {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Bitmap::from_rgba8(width, height, data).unwrap()
    }

    fn bitmap_from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Bitmap {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        Bitmap::from_rgba8(width, height, data).unwrap()
    }

    #[test]
    fn two_color_half_and_half_image() {
        // Two mid-brightness colors, 50% of the pixels each.
        let blueish = [51, 102, 153, 255];
        let orangish = [153, 102, 51, 255];
        let bmp = bitmap_from_pixels(2, 2, &[blueish, orangish, blueish, orangish]);

        let palette = dominant_colors(&bmp, 8);
        assert_eq!(palette.len(), 2);
        for color in &palette {
            assert!(
                (color.percentage - 50.0).abs() < 1e-6,
                "expected 50%, got {}",
                color.percentage
            );
        }
    }

    #[test]
    fn fully_transparent_image_yields_empty_palette() {
        let bmp = solid_bitmap(4, 4, [120, 120, 120, 0]);
        assert!(dominant_colors(&bmp, 8).is_empty());
    }

    #[test]
    fn extreme_brightness_is_background_noise() {
        let near_black = solid_bitmap(4, 4, [10, 10, 10, 255]);
        let near_white = solid_bitmap(4, 4, [250, 250, 250, 255]);
        assert!(dominant_colors(&near_black, 8).is_empty());
        assert!(dominant_colors(&near_white, 8).is_empty());
    }

    #[test]
    fn result_is_capped_at_max_colors() {
        let pixels = [
            [51, 102, 153, 255],
            [153, 102, 51, 255],
            [102, 153, 51, 255],
            [51, 153, 102, 255],
        ];
        let bmp = bitmap_from_pixels(2, 2, &pixels);
        let palette = dominant_colors(&bmp, 2);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn percentages_are_bounded_and_sum_to_at_most_hundred() {
        let pixels = [
            [51, 102, 153, 255],
            [153, 102, 51, 255],
            [102, 153, 51, 255],
            [5, 5, 5, 255], // filtered out
        ];
        let bmp = bitmap_from_pixels(2, 2, &pixels);
        let palette = dominant_colors(&bmp, 8);
        let sum: f64 = palette.iter().map(|c| c.percentage).sum();
        assert!(palette
            .iter()
            .all(|c| c.percentage >= 0.0 && c.percentage <= 100.0));
        assert!(sum <= 100.0 + 1e-9);
    }

    #[test]
    fn unfiltered_percentages_sum_to_hundred() {
        let bmp = solid_bitmap(3, 3, [128, 128, 128, 255]);
        let palette = dominant_colors(&bmp, 8);
        assert_eq!(palette.len(), 1);
        assert!((palette[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn equal_counts_rank_by_ascending_bucket_key() {
        let pixels = [
            [153, 102, 51, 255],  // key (5, 3, 2)
            [51, 102, 153, 255],  // key (2, 3, 5)
            [102, 51, 153, 255],  // key (3, 2, 5)
            [51, 153, 102, 255],  // key (2, 5, 3)
        ];
        let bmp = bitmap_from_pixels(2, 2, &pixels);
        let palette = dominant_colors(&bmp, 8);
        assert_eq!(palette.len(), 4);

        let keys: Vec<(u8, u8, u8)> = palette.iter().map(|c| c.rgb8()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted, "equal-count buckets must rank by key");
    }

    #[test]
    fn dominant_color_comes_first() {
        let blueish = [51, 102, 153, 255];
        let orangish = [153, 102, 51, 255];
        let bmp = bitmap_from_pixels(2, 2, &[blueish, blueish, blueish, orangish]);

        let palette = dominant_colors(&bmp, 8);
        assert_eq!(palette.len(), 2);
        assert!(palette[0].percentage > palette[1].percentage);
        // (51, 102, 153) quantizes to indices (2, 3, 5) -> (63, 95, 159)
        assert_eq!(palette[0].hex, "#3F5F9F");
    }

    #[test]
    fn quantize_drops_transparent_and_extremes() {
        assert_eq!(quantize([128, 128, 128, 100]), None);
        assert_eq!(quantize([5, 5, 5, 255]), None);
        assert_eq!(quantize([250, 250, 250, 255]), None);
        assert_eq!(quantize([128, 128, 128, 255]), Some((4, 4, 4)));
    }
}
