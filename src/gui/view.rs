use super::{LABEL_FONT_SIZE, REFERENCE_SIZE, START_OFFSET};
use crate::config::{ChartConfig, ColorToken};
use crate::geometry::{RingGeometry, SegmentArc};
use cairo::Context;
use std::f64::consts::PI;

/// Turns segment descriptors into stroked arcs: background track first, then
/// one arc per filled segment, then the optional centered label.
pub fn draw(
    cr: &Context,
    config: &ChartConfig,
    geometry: &RingGeometry,
    segments: &[SegmentArc],
) -> Result<(), cairo::Error> {
    cr.set_line_width(config.stroke_width.max(0.0));
    cr.set_line_cap(config.line_cap.to_cairo());

    let center = config.size / 2.0;

    if config.show_background_track {
        draw_track(cr, center, geometry.radius, &config.background_track_color)?;
    }

    // A collapsed ring has no circumference to place arcs on. `segments` is
    // already empty in that case; the guard keeps the angle math away from a
    // zero radius.
    if geometry.radius > 0.0 {
        for segment in segments {
            draw_segment(cr, center, geometry.radius, segment)?;
        }
    }

    if let Some(label) = config.label.as_deref().filter(|l| !l.is_empty()) {
        draw_label(cr, center, config.size, label)?;
    }

    Ok(())
}

fn draw_track(
    cr: &Context,
    center: f64,
    radius: f64,
    color: &ColorToken,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(center, center, radius, 0.0, 2.0 * PI);
    cr.stroke()
}

fn draw_segment(
    cr: &Context,
    center: f64,
    radius: f64,
    segment: &SegmentArc,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = segment.color.into_components();
    cr.set_source_rgba(r, g, b, a);
    let start = START_OFFSET + segment.offset / radius;
    cr.arc(center, center, radius, start, start + segment.length / radius);
    cr.stroke()
}

fn draw_label(cr: &Context, center: f64, size: f64, text: &str) -> Result<(), cairo::Error> {
    cr.set_source_rgb(0.2, 0.2, 0.2);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE * (size / REFERENCE_SIZE));
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(center - ext.width() / 2.0, center + ext.height() / 2.0);
        cr.show_text(text)?;
    }
    Ok(())
}
