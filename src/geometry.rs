use crate::config::{ChartConfig, ChartError, ColorToken};
use std::f64::consts::PI;

/// Arc lengths derived from a [`ChartConfig`]. All lengths are layout units
/// measured along the ring circumference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Ring radius after paddings and half the stroke width, floored at 0.
    pub radius: f64,
    pub circumference: f64,
    /// Capacity of one slot: `circumference / segment_count`.
    pub slot_length: f64,
    /// Total arc length representing current progress.
    pub filled_length: f64,
}

impl RingGeometry {
    pub fn from_config(config: &ChartConfig) -> Result<Self, ChartError> {
        if config.segment_count == 0 {
            return Err(ChartError::InvalidSegmentCount);
        }

        let radius = (config.size / 2.0
            - config.outer_padding
            - config.stroke_width / 2.0
            - config.inner_padding)
            .max(0.0);
        let circumference = 2.0 * PI * radius;

        // A non-positive max_value leaves the ratio undefined; render as
        // empty instead of dividing by zero. The current value is clamped to
        // [0, max_value] so a negative input never yields a negative arc.
        let filled_length = if config.max_value > 0.0 {
            (config.current_value.clamp(0.0, config.max_value) / config.max_value) * circumference
        } else {
            0.0
        };

        Ok(Self {
            radius,
            circumference,
            slot_length: circumference / config.segment_count as f64,
            filled_length,
        })
    }
}

/// One drawable arc. `offset` is the distance along the circumference from
/// the twelve o'clock origin to the start of this segment's slot; gaps are
/// reserved for unfilled slots too, so spacing stays put as the value moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentArc {
    pub index: usize,
    pub color: ColorToken,
    pub length: f64,
    pub offset: f64,
}

/// Partitions the filled arc across equal-capacity slots in slot order.
/// Emission stops as soon as the filled length is exhausted; slots past that
/// point are simply absent.
pub fn layout_segments(
    config: &ChartConfig,
) -> Result<(RingGeometry, Vec<SegmentArc>), ChartError> {
    config.validate()?;
    let geometry = RingGeometry::from_config(config)?;

    let mut segments = Vec::with_capacity(config.segment_count);
    let mut remaining = geometry.filled_length;

    for index in 0..config.segment_count {
        if remaining <= 0.0 {
            break;
        }
        let portion = geometry.slot_length.min(remaining);
        segments.push(SegmentArc {
            index,
            color: config.color_for(index),
            length: portion,
            offset: index as f64 * (geometry.slot_length + config.gap_length),
        });
        remaining -= portion;
    }

    Ok((geometry, segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn total_filled(segments: &[SegmentArc]) -> f64 {
        segments.iter().map(|s| s.length).sum()
    }

    #[test]
    fn default_config_numbers() {
        let cfg = ChartConfig::default();
        let (geometry, segments) = layout_segments(&cfg).unwrap();

        assert_eq!(geometry.radius, 55.0);
        assert!((geometry.circumference - 110.0 * PI).abs() < EPS);
        assert!((geometry.filled_length - 0.8 * geometry.circumference).abs() < EPS);
        assert!((geometry.slot_length - geometry.circumference / 4.0).abs() < EPS);

        // 80/100 over four slots: three full segments plus a 5% remainder.
        assert_eq!(segments.len(), 4);
        for s in &segments[..3] {
            assert!((s.length - geometry.slot_length).abs() < EPS);
        }
        assert!((segments[3].length - 0.05 * geometry.circumference).abs() < EPS);
    }

    #[test]
    fn filled_total_matches_progress_ratio() {
        for (current, max) in [(0.0, 100.0), (33.0, 100.0), (80.0, 100.0), (7.0, 9.0)] {
            let cfg = ChartConfig {
                current_value: current,
                max_value: max,
                ..ChartConfig::default()
            };
            let (geometry, segments) = layout_segments(&cfg).unwrap();
            let expected = (current.min(max) / max) * geometry.circumference;
            assert!(
                (total_filled(&segments) - expected).abs() < 1e-6,
                "current={current} max={max}"
            );
        }
    }

    #[test]
    fn zero_value_emits_no_segments() {
        let cfg = ChartConfig {
            current_value: 0.0,
            ..ChartConfig::default()
        };
        let (_, segments) = layout_segments(&cfg).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn full_value_fills_every_slot() {
        let cfg = ChartConfig {
            current_value: 100.0,
            segment_count: 6,
            ..ChartConfig::default()
        };
        let (geometry, segments) = layout_segments(&cfg).unwrap();
        assert_eq!(segments.len(), 6);
        for s in &segments {
            assert!((s.length - geometry.slot_length).abs() < 1e-6);
        }
        assert!((total_filled(&segments) - geometry.circumference).abs() < 1e-6);
    }

    #[test]
    fn value_above_max_clamps_to_full() {
        let cfg = ChartConfig {
            current_value: 250.0,
            ..ChartConfig::default()
        };
        let (geometry, segments) = layout_segments(&cfg).unwrap();
        assert_eq!(segments.len(), 4);
        assert!((total_filled(&segments) - geometry.circumference).abs() < 1e-6);
    }

    #[test]
    fn negative_value_clamps_to_empty() {
        let cfg = ChartConfig {
            current_value: -15.0,
            ..ChartConfig::default()
        };
        let (geometry, segments) = layout_segments(&cfg).unwrap();
        assert_eq!(geometry.filled_length, 0.0);
        assert!(segments.is_empty());
    }

    #[test]
    fn non_positive_max_value_renders_empty() {
        for max in [0.0, -10.0] {
            let cfg = ChartConfig {
                max_value: max,
                ..ChartConfig::default()
            };
            let (geometry, segments) = layout_segments(&cfg).unwrap();
            assert_eq!(geometry.filled_length, 0.0);
            assert!(segments.is_empty());
        }
    }

    #[test]
    fn no_zero_length_segment_is_emitted() {
        // 50% of four slots fills exactly two; the third must not appear.
        let cfg = ChartConfig {
            current_value: 50.0,
            ..ChartConfig::default()
        };
        let (_, segments) = layout_segments(&cfg).unwrap();
        assert_eq!(segments.len(), 2);
        for s in &segments {
            assert!(s.length > 0.0);
        }
    }

    #[test]
    fn slots_are_equal_regardless_of_value() {
        let base = ChartConfig::default();
        let (g1, _) = layout_segments(&base).unwrap();
        let other = ChartConfig {
            current_value: 13.0,
            ..base
        };
        let (g2, _) = layout_segments(&other).unwrap();
        assert_eq!(g1.slot_length, g2.slot_length);
    }

    #[test]
    fn colors_cycle_over_short_lists() {
        let cfg = ChartConfig {
            current_value: 100.0,
            segment_count: 5,
            segment_colors: vec!["#111111".parse().unwrap(), "#222222".parse().unwrap()],
            ..ChartConfig::default()
        };
        let (_, segments) = layout_segments(&cfg).unwrap();
        let colors: Vec<String> = segments.iter().map(|s| s.color.to_string()).collect();
        assert_eq!(
            colors,
            ["#111111", "#222222", "#111111", "#222222", "#111111"]
        );
    }

    #[test]
    fn slot_offsets_reserve_gaps() {
        let cfg = ChartConfig {
            current_value: 100.0,
            ..ChartConfig::default()
        };
        let (geometry, segments) = layout_segments(&cfg).unwrap();
        for s in &segments {
            let expected = s.index as f64 * (geometry.slot_length + cfg.gap_length);
            assert!((s.offset - expected).abs() < EPS);
        }
    }

    #[test]
    fn single_slot_spans_the_ring() {
        let cfg = ChartConfig {
            segment_count: 1,
            current_value: 100.0,
            ..ChartConfig::default()
        };
        let (geometry, segments) = layout_segments(&cfg).unwrap();
        assert_eq!(segments.len(), 1);
        assert!((segments[0].length - geometry.circumference).abs() < EPS);
        assert_eq!(segments[0].offset, 0.0);
    }

    #[test]
    fn oversized_paddings_collapse_to_a_point() {
        let cfg = ChartConfig {
            size: 10.0,
            stroke_width: 40.0,
            ..ChartConfig::default()
        };
        let (geometry, segments) = layout_segments(&cfg).unwrap();
        assert_eq!(geometry.radius, 0.0);
        assert_eq!(geometry.circumference, 0.0);
        assert!(segments.is_empty());
    }

    #[test]
    fn zero_segment_count_is_rejected() {
        let cfg = ChartConfig {
            segment_count: 0,
            ..ChartConfig::default()
        };
        assert_eq!(
            layout_segments(&cfg).unwrap_err(),
            ChartError::InvalidSegmentCount
        );
    }
}
