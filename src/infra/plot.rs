// ============================================================
// Layer 6 — Scatter Plot Writer
// ============================================================
// Renders point series into a PNG with plotters' bitmap backend.
// Only points and axis lines are drawn: the build carries no font
// backend, so there are no captions or tick labels.
//
// The file is overwritten on every call.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (800, 600);
const POINT_RADIUS: i32 = 3;

/// One coloured set of (x, y) points.
#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub points: Vec<(f32, f32)>,
    pub color:  RGBColor,
}

impl ScatterSeries {
    pub fn new(xs: &[f32], ys: &[f32], color: RGBColor) -> Self {
        Self { points: xs.iter().copied().zip(ys.iter().copied()).collect(), color }
    }
}

/// Smallest [min, max] covering every coordinate picked by `axis`,
/// widened by 5% so edge points stay inside the frame.
fn padded_range(series: &[ScatterSeries], axis: impl Fn(&(f32, f32)) -> f32) -> (f32, f32) {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.points.iter().map(&axis))
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if lo > hi {
        return (-1.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    (lo - pad, hi + pad)
}

pub fn write_scatter(path: &Path, series: &[ScatterSeries]) -> Result<()> {
    let (x_lo, x_hi) = padded_range(series, |p| p.0);
    let (y_lo, y_hi) = padded_range(series, |p| p.1);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    // Axes through the origin, when it is in view
    let axis = BLACK.mix(0.4);
    if (y_lo..=y_hi).contains(&0.0) {
        chart.draw_series(std::iter::once(PathElement::new(vec![(x_lo, 0.0), (x_hi, 0.0)], axis)))?;
    }
    if (x_lo..=x_hi).contains(&0.0) {
        chart.draw_series(std::iter::once(PathElement::new(vec![(0.0, y_lo), (0.0, y_hi)], axis)))?;
    }

    for s in series {
        chart.draw_series(
            s.points
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|&p| Circle::new(p, POINT_RADIUS, s.color.filled())),
        )?;
    }

    root.present()
        .with_context(|| format!("Cannot write plot '{}'", path.display()))?;

    tracing::info!("Plot saved to '{}'", path.display());
    Ok(())
}
