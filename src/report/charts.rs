//! PNG chart artifacts rendered with plotters.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

const HISTOGRAM_BINS: usize = 100;
const BAR_FILL: RGBColor = RGBColor(178, 34, 86);
const HIST_FILL: RGBColor = RGBColor(135, 206, 235);

/// Render a 100-bin histogram of transaction amounts over all cleaned rows.
pub fn render_amount_histogram(amounts: &[f64], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize chart: {}", path.display()))?;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in amounts {
        min = min.min(v);
        max = max.max(v);
    }
    if amounts.is_empty() {
        min = 0.0;
        max = 1.0;
    }
    // Degenerate range (all amounts equal): widen so the axis is drawable.
    if max <= min {
        min -= 0.5;
        max += 0.5;
    }

    let bin_width = (max - min) / HISTOGRAM_BINS as f64;
    let mut counts = vec![0u32; HISTOGRAM_BINS];
    for &v in amounts {
        let idx = (((v - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        counts[idx] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Transaction Amount Distribution", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min..max, 0u32..(y_max + y_max / 10 + 1))?;
    chart
        .configure_mesh()
        .x_desc("Amount")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().filter(|(_, &c)| c > 0).map(
        |(i, &count)| {
            let x0 = min + i as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0u32), (x1, count)], HIST_FILL.filled())
        },
    ))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}

/// Render a horizontal bar chart of the top fraud-prone agencies.
///
/// `counts` holds (agency, flagged-row count) pairs, highest first; at most
/// eight are passed in. The highest bar is drawn at the top.
pub fn render_fraud_agencies(counts: &[(String, usize)], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize chart: {}", path.display()))?;

    let bars = counts.len().max(1);
    let x_max = counts.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Fraud-Prone Agencies", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(240)
        .build_cartesian_2d(0u32..x_max + 1, 0f64..bars as f64)?;

    // Each bar occupies the band [bars-1-i, bars-i); label ticks with the
    // agency owning the band they sit under.
    let names: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(bars)
        .y_label_formatter(&|y| {
            let band = y.floor() as usize;
            if band < names.len() {
                names[names.len() - 1 - band].to_string()
            } else {
                String::new()
            }
        })
        .x_desc("Fraud Count")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
        let y0 = (counts.len() - 1 - i) as f64 + 0.15;
        let y1 = (counts.len() - i) as f64 - 0.15;
        Rectangle::new([(0u32, y0), (*count as u32, y1)], BAR_FILL.filled())
    }))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}
