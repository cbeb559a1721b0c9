use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Re-implement the functions here since they're in a binary crate
fn parse_hex(input: &str) -> Option<(u8, u8, u8)> {
    let hex: String = input.chars().filter(char::is_ascii_alphanumeric).collect();
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> (u8, u8, u8, u8) {
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;
    let k = 1.0 - rf.max(gf).max(bf);
    if k >= 1.0 {
        return (0, 0, 0, 100);
    }
    let c = (1.0 - rf - k) / (1.0 - k);
    let m = (1.0 - gf - k) / (1.0 - k);
    let y = (1.0 - bf - k) / (1.0 - k);
    (
        (c * 100.0) as u8,
        (m * 100.0) as u8,
        (y * 100.0) as u8,
        (k * 100.0) as u8,
    )
}

fn quantize_histogram(pixels: &[u8]) -> HashMap<(u8, u8, u8), u32> {
    let mut counts = HashMap::new();
    for px in pixels.chunks_exact(4) {
        let a = f64::from(px[3]) / 255.0;
        if a < 0.5 {
            continue;
        }
        let r = f64::from(px[0]) / 255.0;
        let g = f64::from(px[1]) / 255.0;
        let b = f64::from(px[2]) / 255.0;
        let brightness = (r + g + b) / 3.0;
        if !(0.1..=0.95).contains(&brightness) {
            continue;
        }
        let key = (
            (r * 8.0).round() as u8,
            (g * 8.0).round() as u8,
            (b * 8.0).round() as u8,
        );
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn bench_parse_hex(c: &mut Criterion) {
    c.bench_function("parse_hex", |b| b.iter(|| parse_hex(black_box("#FF5733"))));
}

fn bench_rgb_to_cmyk(c: &mut Criterion) {
    c.bench_function("rgb_to_cmyk", |b| {
        b.iter(|| rgb_to_cmyk(black_box(255), black_box(87), black_box(51)))
    });
}

fn bench_quantize_histogram(c: &mut Criterion) {
    // Same size as the extraction canvas, varied channel values
    let pixels: Vec<u8> = (0..100 * 100 * 4)
        .map(|i| ((i * 37) % 251) as u8)
        .collect();
    c.bench_function("quantize_histogram_100x100", |b| {
        b.iter(|| quantize_histogram(black_box(&pixels)))
    });
}

criterion_group!(
    benches,
    bench_parse_hex,
    bench_rgb_to_cmyk,
    bench_quantize_histogram,
);
criterion_main!(benches);
