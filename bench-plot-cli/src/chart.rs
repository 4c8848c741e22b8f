//! Chart rendering
//!
//! Renders the per-module runtime scaling grid: one subplot per clock region,
//! per-platform tavg/tmax/tmin series normalized by hit count, log-scaled
//! resolution axis and a dashed vertical line at the CPU core limit. Output
//! backend (SVG or bitmap) is chosen from the file extension.

use crate::config::AppConfig;
use anyhow::{bail, Result};
use bench_report_parser::ReportLoader;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

const STATS: &[(&str, LineKind)] = &[
    ("tavg", LineKind::Solid),
    ("tmax", LineKind::Dashed),
    ("tmin", LineKind::Dotted),
];

#[derive(Clone, Copy)]
enum LineKind {
    Solid,
    Dashed,
    Dotted,
}

/// Render the chart grid to `output`
pub fn render(
    loader: &ReportLoader,
    config: &AppConfig,
    platforms: &[String],
    output: &Path,
) -> Result<()> {
    let size = (config.chart.width, config.chart.height);
    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("svg") => {
            let root = SVGBackend::new(output, size).into_drawing_area();
            draw_grid(&root, loader, config, platforms)?;
            root.present()?;
        }
        Some("png") | Some("bmp") | Some("jpg") | Some("jpeg") => {
            let root = BitMapBackend::new(output, size).into_drawing_area();
            draw_grid(&root, loader, config, platforms)?;
            root.present()?;
        }
        _ => bail!("Unsupported output format: {:?} (use .svg or .png)", output),
    }

    log::info!("Chart written to {:?}", output);
    Ok(())
}

/// Draw the full subplot grid onto a drawing area
fn draw_grid<DB>(
    root: &DrawingArea<DB, Shift>,
    loader: &ReportLoader,
    config: &AppConfig,
    platforms: &[String],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let titled = root.titled(&config.chart.title, ("sans-serif", 24))?;

    let areas = titled.split_evenly((config.chart.rows, config.chart.cols));
    let max_subplots = config.chart.rows * config.chart.cols;

    if config.regions.len() > max_subplots {
        log::warn!(
            "{} regions configured but only {} subplot slots; extra regions are dropped",
            config.regions.len(),
            max_subplots
        );
    }

    for (region, area) in config.regions.iter().zip(areas.iter()) {
        draw_region(area, loader, config, platforms, region)?;
    }

    Ok(())
}

/// Draw one region's subplot
fn draw_region<DB>(
    area: &DrawingArea<DB, Shift>,
    loader: &ReportLoader,
    config: &AppConfig,
    platforms: &[String],
    region: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    // Gather every platform's normalized series up front to size the axes
    let mut series_by_platform = Vec::new();
    for platform in platforms {
        let Some(table) = loader.table(platform) else {
            continue;
        };
        for (stat, kind) in STATS {
            let points: Vec<(f64, f64)> = table
                .normalized_series(region, stat)
                .into_iter()
                .map(|(res, v)| (res.nx() as f64, v))
                .collect();
            if !points.is_empty() {
                series_by_platform.push((platform.as_str(), *stat, *kind, points));
            }
        }
    }

    if series_by_platform.is_empty() {
        log::warn!("No data for region {:?}, leaving subplot empty", region);
        return Ok(());
    }

    let x_min = series_by_platform
        .iter()
        .flat_map(|(_, _, _, pts)| pts.iter().map(|p| p.0))
        .fold(f64::INFINITY, f64::min);
    let x_max = series_by_platform
        .iter()
        .flat_map(|(_, _, _, pts)| pts.iter().map(|p| p.0))
        .fold(f64::NEG_INFINITY, f64::max);

    // A single resolution collapses the log range; pad it out
    let (x_min, x_max) = if x_min < x_max {
        (x_min, x_max)
    } else {
        (x_min / 2.0, x_max * 2.0)
    };

    let y_max = match config.y_limits.get(region) {
        Some(limit) => *limit,
        None => {
            let data_max = series_by_platform
                .iter()
                .flat_map(|(_, _, _, pts)| pts.iter().map(|p| p.1))
                .fold(0.0f64, f64::max);
            (data_max * 1.1).max(1e-9)
        }
    };

    let mut chart = ChartBuilder::on(area)
        .caption(region, ("sans-serif", 15))
        .margin(8)
        .x_label_area_size(28)
        .y_label_area_size(48)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|nx| format!("{}x", nx.round() as u64))
        .y_labels(5)
        .label_style(("sans-serif", 11))
        .draw()?;

    // Core-count threshold marker
    let limit = config.chart.core_limit as f64;
    chart.draw_series(DashedLineSeries::new(
        [(limit, 0.0), (limit, y_max)],
        5,
        5,
        BLACK.stroke_width(1),
    ))?;

    // Register legend entries only on the first subplot slot
    let show_legend = config.regions.first().map(String::as_str) == Some(region);

    for (platform, stat, kind, points) in &series_by_platform {
        let [r, g, b] = config.platform_color(platform);
        let color = RGBColor(r, g, b);

        let anno = match kind {
            LineKind::Solid => chart.draw_series(LineSeries::new(
                points.clone(),
                color.stroke_width(2),
            ))?,
            LineKind::Dashed => chart.draw_series(DashedLineSeries::new(
                points.clone(),
                6,
                4,
                color.stroke_width(1),
            ))?,
            LineKind::Dotted => chart.draw_series(DashedLineSeries::new(
                points.clone(),
                2,
                4,
                color.stroke_width(1),
            ))?,
        };

        if show_legend {
            anno.label(format!("{} {}", platform.to_uppercase(), stat))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
        }

        chart.draw_series(
            points
                .iter()
                .map(|p| Circle::new(*p, 3, color.filled())),
        )?;
    }

    if show_legend {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    Ok(())
}
