// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate mandelbrot;

use criterion::Criterion;
use mandelbrot::{partition, targa, ColorPair, ImageBuffer, NamedColor, Renderer, Viewport};

fn renderer() -> Renderer {
    let colors = ColorPair::new(NamedColor::Black.color(), NamedColor::White.color());
    Renderer::new(Viewport::default(), colors, 256).unwrap()
}

fn render_320x240(c: &mut Criterion) {
    c.bench_function_over_inputs(
        "render 320x240",
        |b, &&workers| {
            let r = renderer();
            let parts = partition(320, workers).unwrap();
            let mut image = Some(ImageBuffer::new(320, 240).unwrap());
            b.iter(|| {
                let result = r.render(image.take().unwrap(), &parts).unwrap();
                image = Some(result.into_image());
            })
        },
        &[1usize, 2, 4, 8],
    );
}

fn encode_1280x960(c: &mut Criterion) {
    let mut image = ImageBuffer::new(1280, 960).unwrap();
    image.fill(NamedColor::Indigo.color());
    c.bench_function("encode 1280x960", move |b| {
        b.iter(|| targa::encode_to_vec(&image).unwrap())
    });
}

criterion_group!(benches, render_320x240, encode_1280x960);
criterion_main!(benches);
