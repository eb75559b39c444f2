//! SVG rendering of extracted windows.

use plotters::prelude::*;
use std::path::Path;

use crate::sample::Channel;
use crate::trigger::ChannelSelection;
use crate::window::Window;

/// Errors that can occur while rendering a plot
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Nothing to draw
    #[error("Window has no samples")]
    EmptyWindow,

    /// Error reported by the drawing backend
    #[error("Drawing error: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(error.to_string())
    }
}

/// Appearance of a window plot.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Chart title
    pub title: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Axes to draw
    pub channels: ChannelSelection,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            title: "G-Force Over Time".to_string(),
            width: 1024,
            height: 600,
            channels: ChannelSelection::all(),
        }
    }
}

fn channel_color(channel: Channel) -> RGBColor {
    match channel {
        Channel::X => BLUE,
        Channel::Y => GREEN,
        Channel::Z => RED,
    }
}

/// Draw one line per selected axis against seconds since the window start.
pub fn render_window_svg(window: &Window, path: &Path, style: &PlotStyle) -> Result<(), PlotError> {
    let samples = window.samples();
    let first = samples.first().ok_or(PlotError::EmptyWindow)?;

    let seconds: Vec<f64> = samples
        .iter()
        .map(|s| {
            (s.timestamp - first.timestamp)
                .num_microseconds()
                .unwrap_or(i64::MAX) as f64
                / 1e6
        })
        .collect();
    let x_max = seconds.last().copied().unwrap_or(0.0).max(1e-6);

    let (y_min, y_max) = samples
        .iter()
        .flat_map(|s| style.channels.iter().map(move |c| s.value(c)))
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((y_max - y_min) * 0.05).max(0.1);

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(&style.title, ("sans-serif", 24).into_font())
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(0f64..x_max, (y_min - pad)..(y_max + pad))?;

    chart
        .configure_mesh()
        .x_desc("Time since window start (s)")
        .y_desc("G-Force")
        .draw()?;

    for channel in style.channels.iter() {
        let color = channel_color(channel);
        let series = seconds
            .iter()
            .zip(samples)
            .map(|(&t, s)| (t, s.value(channel)));
        chart
            .draw_series(LineSeries::new(series, &color))?
            .label(channel.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if let Some(offset) = window.trigger_offset() {
        let t = seconds[offset];
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(t, y_min - pad), (t, y_max + pad)],
            &BLACK.mix(0.3),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;
    use crate::window::crop;
    use chrono::{NaiveDate, TimeDelta};
    use num::rational::Ratio;
    use tempfile::tempdir;

    #[test]
    fn test_render_window_svg() {
        let start = NaiveDate::from_ymd_opt(2016, 5, 24)
            .unwrap()
            .and_hms_opt(14, 30, 12)
            .unwrap();
        let samples: Vec<Sample> = (0..200)
            .map(|i| {
                let x = if i == 100 { 8.0 } else { (i as f64 * 0.1).sin() };
                Sample::new(start + TimeDelta::milliseconds(i), x, 0.0, 1.0)
            })
            .collect();
        let window = crop(&samples, 100, 50, Ratio::new(1, 5));

        let dir = tempdir().unwrap();
        let path = dir.path().join("window.svg");
        render_window_svg(&window, &path, &PlotStyle::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("G-Force"));
    }
}
