// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::palette::{describe, parse_color};
use mandelbrot::{partition, targa, ColorPair, ImageBuffer, Renderer, RunReport, Viewport};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const UPPERLEFT: &str = "upperleft";
const LOWERRIGHT: &str = "lowerright";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const INSIDE: &str = "inside";
const OUTSIDE: &str = "outside";
const REPORT: &str = "report";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Multi-threaded Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.tga")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1280x960")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(UPPERLEFT)
                .required(false)
                .long(UPPERLEFT)
                .short("u")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,1.125")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse upper left corner"))
                .help("Upper left corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(LOWERRIGHT)
                .required(false)
                .long(LOWERRIGHT)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,-1.125")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse lower right corner"))
                .help("Lower right corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::from(u16::max_value()),
                        "Could not parse thread count",
                        "Thread count must be at least 1 and no more than the image width",
                    )
                })
                .help("Number of threads to use in solver (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1024")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iterations before a point is assumed to be in the set"),
        )
        .arg(
            Arg::with_name(INSIDE)
                .required(false)
                .long(INSIDE)
                .takes_value(true)
                .default_value("black")
                .validator(|s| parse_color(&s).map(|_| ()))
                .help("Colour of the set: 1-9, a palette name, or #RRGGBB"),
        )
        .arg(
            Arg::with_name(OUTSIDE)
                .required(false)
                .long(OUTSIDE)
                .takes_value(true)
                .default_value("white")
                .validator(|s| parse_color(&s).map(|_| ()))
                .help("Colour of everything else: 1-9, a palette name, or #RRGGBB"),
        )
        .arg(
            Arg::with_name(REPORT)
                .required(false)
                .long(REPORT)
                .takes_value(true)
                .help("Append a run report to this file"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), mandelbrot::Error> {
    let (width, height) = parse_pair::<u16>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let (width, height) = (usize::from(width), usize::from(height));
    let upper_left = parse_complex(matches.value_of(UPPERLEFT).unwrap())
        .expect("Error parsing upper left point");
    let lower_right = parse_complex(matches.value_of(LOWERRIGHT).unwrap())
        .expect("Error parsing lower right point");
    let threads = match matches.value_of(THREADS) {
        Some(t) => usize::from_str(t).expect("Could not parse thread count."),
        None => num_cpus::get().min(width.max(1)),
    };
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let colors = ColorPair::new(
        parse_color(matches.value_of(INSIDE).unwrap()).expect("Could not parse inside colour"),
        parse_color(matches.value_of(OUTSIDE).unwrap()).expect("Could not parse outside colour"),
    );
    let output = PathBuf::from(matches.value_of(OUTPUT).unwrap());

    // Everything that can be checked is checked before a thread starts.
    let viewport = Viewport::from_corners(upper_left, lower_right)?;
    let image = ImageBuffer::new(width, height)?;
    let parts = partition(width, threads)?;
    let renderer = Renderer::new(viewport, colors, iterations)?;

    info!(
        "Generating a {} and {} Mandelbrot set",
        describe(colors.inside),
        describe(colors.outside)
    );
    let result = renderer.render(image, &parts)?;
    info!(
        "Rendered {}x{} with {} threads in {} ms",
        width,
        height,
        threads,
        result.elapsed_millis()
    );

    targa::write_image(&output, &result.image)?;
    info!("Wrote {}", output.display());

    if let Some(log) = matches.value_of(REPORT) {
        RunReport {
            elapsed: result.elapsed,
            workers: threads,
            colors,
            output,
        }
        .append_to(log)?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
