// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The multi-threaded renderer.
//!
//! The image is split into column chunks, one per worker.  Each worker
//! owns a mutable band of the buffer covering exactly its chunk, so
//! the workers never share a cell and nobody needs a lock.  All the
//! workers live inside a crossbeam scope; the scope can't end, and the
//! buffer can't be handed back, until every one of them has been
//! joined.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;
use tracing::{debug, info};

use crate::buffer::{ColorPair, ColumnBand, ImageBuffer};
use crate::chunks::{Chunk, Partition};
use crate::errors::{Error, Result};
use crate::escape;
use crate::planes::{Pixel, PlaneMapper, Viewport};

/// A finished render: the image, and what it cost.
#[derive(Debug)]
pub struct RenderResult {
    /// The fully populated image.
    pub image: ImageBuffer,
    /// Wall-clock time from the first spawn to the last join.
    pub elapsed: Duration,
    /// How many chunk tasks ran to completion.
    pub tasks: usize,
}

impl RenderResult {
    /// Elapsed time in whole milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Give the buffer back, to be reused by the next render.
    pub fn into_image(self) -> ImageBuffer {
        self.image
    }
}

/// The parameters of a render.  Once built, nothing here changes, and
/// every worker reads it through a shared reference.
#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    viewport: Viewport,
    colors: ColorPair,
    limit: usize,
}

impl Renderer {
    /// `limit` is the number of iterations after which a point is
    /// assumed to be in the set.
    pub fn new(viewport: Viewport, colors: ColorPair, limit: usize) -> Result<Renderer> {
        if limit == 0 {
            return Err(Error::InvalidIterationLimit);
        }
        Ok(Renderer {
            viewport,
            colors,
            limit,
        })
    }

    /// The region being rendered.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The colours being used.
    pub fn colors(&self) -> ColorPair {
        self.colors
    }

    /// The iteration bound.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Fill every column of one band.
    pub fn render_band(&self, plane: &PlaneMapper, band: &mut ColumnBand) -> Result<()> {
        let chunk = band.chunk();
        for (column, row) in iproduct!(chunk.columns(), 0..band.height()) {
            let point = plane.pixel_to_point(&Pixel(column, row));
            let color = self.colors.pick(escape::in_set(point, self.limit));
            band.set(column, row, color)?;
        }
        Ok(())
    }

    /// Render the whole image, one worker per chunk of `partition`.
    /// The buffer is taken by value and comes back inside the result;
    /// on failure it is dropped, so a half-drawn image can never reach
    /// the encoder.
    #[tracing::instrument(skip_all, fields(workers = partition.len(), limit = self.limit))]
    pub fn render(&self, image: ImageBuffer, partition: &Partition) -> Result<RenderResult> {
        self.run_bands(image, partition, |plane, band| self.render_band(plane, band))
    }

    /// Spawn `paint` once per band and join them all.  The first
    /// failure in column order wins, but only after every worker has
    /// been joined.
    fn run_bands<F>(
        &self,
        mut image: ImageBuffer,
        partition: &Partition,
        paint: F,
    ) -> Result<RenderResult>
    where
        F: Fn(&PlaneMapper, &mut ColumnBand) -> Result<()> + Sync,
    {
        let plane = PlaneMapper::new(image.width(), image.height(), self.viewport)?;
        if partition.width() != image.width() {
            return Err(Error::PartitionMismatch {
                partition: partition.width(),
                image: image.width(),
            });
        }

        image.reset();
        let start = Instant::now();
        let total = partition.len();
        let completed = AtomicUsize::new(0);

        let outcomes: Vec<(Chunk, Result<()>)> = {
            let bands = image.bands_mut(partition)?;
            let plane = &plane;
            let completed = &completed;
            let paint = &paint;
            crossbeam::scope(|spawner| {
                let handles: Vec<(Chunk, ScopedJoinHandle<Result<()>>)> = bands
                    .into_iter()
                    .map(|mut band| {
                        let chunk = band.chunk();
                        let handle = spawner.spawn(move |_| {
                            let outcome = paint(plane, &mut band);
                            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                            debug!(%chunk, done, total, "chunk finished");
                            outcome
                        });
                        (chunk, handle)
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|(chunk, handle)| {
                        let outcome = match handle.join() {
                            Ok(outcome) => outcome,
                            Err(panic) => Err(Error::RenderFailed {
                                chunk,
                                cause: panic_message(panic.as_ref()),
                            }),
                        };
                        (chunk, outcome)
                    })
                    .collect::<Vec<_>>()
            })
            .map_err(|panic| Error::RenderFailed {
                chunk: Chunk {
                    start: 0,
                    end: partition.width(),
                },
                cause: panic_message(panic.as_ref()),
            })?
        };

        let elapsed = start.elapsed();
        let tasks = completed.load(Ordering::SeqCst);
        for (chunk, outcome) in outcomes {
            if let Err(err) = outcome {
                return Err(match err {
                    Error::RenderFailed { .. } => err,
                    other => Error::RenderFailed {
                        chunk,
                        cause: other.to_string(),
                    },
                });
            }
        }

        info!(
            millis = elapsed.as_millis() as u64,
            tasks, "render complete"
        );
        Ok(RenderResult {
            image,
            elapsed,
            tasks,
        })
    }
}

/// Best effort at turning a panic payload into words.
fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
