use crate::config::{ChartConfig, ChartError};
use crate::geometry;
use crate::gui::view;
use cairo::{Context, SvgSurface};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SVG stream did not hand back the render buffer")]
    StreamMismatch,
}

/// Renders the chart into an in-memory SVG document. Uses the same layout
/// and draw routine as the widget, so it needs no display.
pub fn render_svg(config: &ChartConfig) -> Result<Vec<u8>, RenderError> {
    let (geometry, segments) = geometry::layout_segments(config)?;
    let surface = SvgSurface::for_stream(config.size, config.size, Vec::<u8>::new())?;
    let cr = Context::new(&surface)?;
    view::draw(&cr, config, &geometry, &segments)?;
    drop(cr);

    let stream = surface
        .finish_output_stream()
        .map_err(|e| RenderError::Io(e.error))?;
    stream
        .downcast::<Vec<u8>>()
        .map(|buf| *buf)
        .map_err(|_| RenderError::StreamMismatch)
}

/// Renders the chart straight into an SVG file at `path`.
pub fn write_svg<P: AsRef<Path>>(config: &ChartConfig, path: P) -> Result<(), RenderError> {
    let (geometry, segments) = geometry::layout_segments(config)?;
    let surface = SvgSurface::new(config.size, config.size, Some(path))?;
    let cr = Context::new(&surface)?;
    view::draw(&cr, config, &geometry, &segments)?;
    drop(cr);
    surface.finish();
    Ok(())
}
