mod frame;
mod march;
mod shade;
pub mod threads;

use std::{error, ops::Range};

use geom::{distance, ZeroVectorError};
use scene::Scene;

pub use crate::{
    frame::{Frame, Idx},
    march::{HIT_EPSILON, MAX_STEPS},
    shade::{Palette, PaletteError, MAX_SHADE_DISTANCE},
    threads::Threads,
};

use crate::frame::Band;

/// Number of row bands a frame is split into.
pub const WORKER_COUNT: u32 = 4;

/// {0}
#[derive(Debug, displaydoc::Display)]
pub struct Error(ErrorRepr);

#[derive(Debug, displaydoc::Display)]
enum ErrorRepr {
    /// cannot cast a ray through pixel [{x}, {y}]: {err}
    DegenerateRay { x: u32, y: u32, err: ZeroVectorError },
    /// band {0} was not rendered by any worker
    BandNotRendered(usize),
}

impl From<ErrorRepr> for Error {
    fn from(repr: ErrorRepr) -> Error {
        Error(repr)
    }
}

impl error::Error for Error {}

/// Runs the given closure on each of its workers and returns once all are done.
pub type ThreadPool<'t> = dyn Fn(&(dyn Fn() + Sync)) + 't;

pub struct Renderer<'t> {
    in_parallel: &'t ThreadPool<'t>,
    palette: Palette,
}

impl<'t> Renderer<'t> {
    pub fn new(in_parallel: &'t ThreadPool<'t>) -> Renderer<'t> {
        Renderer { in_parallel, palette: Palette::default() }
    }

    pub fn with_palette(mut self, palette: Palette) -> Renderer<'t> {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Renders one frame, blocking until every band is done.
    ///
    /// The scene stays borrowed for the whole call, so all bands see the same
    /// camera and objects. Fails if any band fails or is never run.
    pub fn render(&self, scene: &Scene) -> Result<Frame, Error> {
        let screen = scene.camera.screen();
        let bands = bands(screen.height(), WORKER_COUNT);
        let palette = &self.palette;

        let mut frame = Frame::new(screen.dim(), palette.background());
        let partition = frame.partition(&bands);
        (self.in_parallel)(&|| {
            while let Some(band) = partition.next_band() {
                let index = band.index;
                tracing::trace!(band = index, rows = ?band.rows, "rendering band");
                partition.complete(index, render_band(scene, palette, band));
            }
        });
        for (index, outcome) in partition.finish().enumerate() {
            outcome.ok_or(ErrorRepr::BandNotRendered(index))??;
        }

        tracing::debug!(width = screen.width(), height = screen.height(), "frame rendered");
        Ok(frame)
    }
}

/// Splits `[0, height)` into `count` contiguous bands of `height / count`
/// rows, the last band also taking the remainder.
pub fn bands(height: u32, count: u32) -> Vec<Range<u32>> {
    assert!(count > 0);
    let part = height / count;
    (0..count)
        .map(|i| {
            let start = i * part;
            let end = if i + 1 == count { height } else { start + part };
            start..end
        })
        .collect()
}

fn render_band(scene: &Scene, palette: &Palette, band: Band<'_>) -> Result<(), ErrorRepr> {
    let camera = &scene.camera;
    let eye = camera.position();
    let width = camera.screen().width();
    for (y, row) in band.rows.zip(band.buf.chunks_mut(width as usize)) {
        for (x, cell) in (0..width).zip(row) {
            let ray = camera.cast(x, y).map_err(|err| ErrorRepr::DegenerateRay { x, y, err })?;
            let hit = march::trace(scene, &ray).map(|p| distance(eye, p));
            *cell = palette.shade(hit);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
