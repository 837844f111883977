// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate image;
extern crate mandelbrot;
extern crate rand;

use mandelbrot::escape::{escape_time, in_set};
use mandelbrot::{partition, targa, Chunk, Color, ColorPair, ImageBuffer, Renderer, Viewport};
use num::Complex;
use rand::Rng;

const INSIDE: Color = Color::new(0x000000);
const OUTSIDE: Color = Color::new(0xFFFFFF);

fn render(width: usize, height: usize, workers: usize, limit: usize) -> Vec<u8> {
    let renderer = Renderer::new(
        Viewport::default(),
        ColorPair::new(INSIDE, OUTSIDE),
        limit,
    )
    .unwrap();
    let result = renderer
        .render(
            ImageBuffer::new(width, height).unwrap(),
            &partition(width, workers).unwrap(),
        )
        .unwrap();
    assert!(result.image.is_complete());
    targa::encode_to_vec(&result.image).unwrap()
}

#[test]
fn random_partitions_cover_every_column() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let width = rng.gen_range(1, 2000);
        let workers = rng.gen_range(1, width + 1);
        let parts = partition(width, workers).unwrap();
        assert_eq!(parts.len(), workers);
        let mut seen = vec![false; width];
        for chunk in &parts {
            assert!(!chunk.is_empty());
            for column in chunk.columns() {
                assert!(!seen[column], "column {} assigned twice", column);
                seen[column] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}

#[test]
fn set_geometry() {
    for limit in 1..20 {
        assert!(in_set(Complex::new(0.0, 0.0), limit));
    }
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let angle = rng.gen_range(0.0, std::f64::consts::PI * 2.0);
        let radius = rng.gen_range(2.0001, 100.0);
        let c = Complex::from_polar(&radius, &angle);
        assert_eq!(escape_time(c, rng.gen_range(1, 1000)), Some(1));
    }
}

#[test]
fn small_scenario() {
    let parts = partition(4, 2).unwrap();
    assert_eq!(
        parts.chunks(),
        &[Chunk { start: 0, end: 2 }, Chunk { start: 2, end: 4 }]
    );
    let bytes = render(4, 2, 2, 50);
    assert_eq!(bytes.len(), 18 + 4 * 2 * 3);
    let (header, pixels) = targa::decode(&bytes).unwrap();
    assert_eq!((header.width, header.height, header.bits_per_pixel), (4, 2, 24));
    assert!(pixels.iter().all(|p| *p == INSIDE || *p == OUTSIDE));
}

#[test]
fn output_does_not_depend_on_worker_count() {
    let reference = render(96, 72, 1, 256);
    let mut rng = rand::thread_rng();
    for _ in 0..6 {
        let workers = rng.gen_range(2, 97);
        assert_eq!(render(96, 72, workers, 256), reference, "{} workers", workers);
    }
    assert_eq!(render(96, 72, 96, 256), reference);
}

#[test]
fn one_worker_per_column() {
    let bytes = render(40, 30, 40, 100);
    assert_eq!(bytes.len(), 18 + 40 * 30 * 3);
}

#[test]
fn image_crate_reads_our_output() {
    // Red and blue match, so the test holds whichever way the reader
    // orders the channels.
    let color = Color::new(0x40A040);
    let mut buffer = ImageBuffer::new(31, 17).unwrap();
    buffer.fill(color);
    let bytes = targa::encode_to_vec(&buffer).unwrap();

    let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::TGA)
        .unwrap()
        .to_rgb();
    assert_eq!((decoded.width(), decoded.height()), (31, 17));
    let raw = decoded.into_raw();
    assert_eq!(raw.len(), 31 * 17 * 3);
    for rgb in raw.chunks(3) {
        assert_eq!(rgb, &[color.red(), color.green(), color.blue()]);
    }
}

#[test]
fn written_files_match_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uniform.tga");
    let mut buffer = ImageBuffer::new(5, 4).unwrap();
    buffer.fill(Color::new(0x8F00FF));
    targa::write_image(&path, &buffer).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, targa::encode_to_vec(&buffer).unwrap());

    let (_, pixels) = targa::decode(&on_disk).unwrap();
    assert!(pixels.iter().all(|p| *p == Color::new(0x8F00FF)));
}

#[test]
fn missing_directories_fail_to_encode() {
    let dir = tempfile::tempdir().unwrap();
    let mut buffer = ImageBuffer::new(2, 2).unwrap();
    buffer.fill(Color::new(0));
    match targa::write_image(dir.path().join("nope").join("x.tga"), &buffer) {
        Err(mandelbrot::Error::EncodeFailed { .. }) => {}
        other => panic!("expected EncodeFailed, got {:?}", other),
    }
}
