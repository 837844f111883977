// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A plain-text record of each run, appended to a log file so that
//! timings for different worker counts can be compared afterwards.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::buffer::ColorPair;
use crate::errors::{Error, Result};
use crate::palette::describe;

/// What happened on one run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// How long the render took.
    pub elapsed: Duration,
    /// How many workers shared the image.
    pub workers: usize,
    /// The colours used.
    pub colors: ColorPair,
    /// Where the image went.
    pub output: PathBuf,
}

impl RunReport {
    /// Append this report to `path`, creating the file if needed.
    pub fn append_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|cause| Error::ReportFailed { cause })?;
        write!(file, "{}", self).map_err(|cause| Error::ReportFailed { cause })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Mandelbrot render")?;
        writeln!(f, "  time taken: {} ms", self.elapsed.as_millis())?;
        writeln!(f, "  workers:    {}", self.workers)?;
        writeln!(f, "  inside:     {}", describe(self.colors.inside))?;
        writeln!(f, "  outside:    {}", describe(self.colors.outside))?;
        writeln!(f, "  output:     {}", self.output.display())
    }
}
