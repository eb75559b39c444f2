use anyhow::{Context, Result};
use log::info;
#[cfg(not(feature = "plot"))]
use log::warn;
use std::path::{Path, PathBuf};

use shockcrop::config::{ExtractionConfig, LocationCoefficient};
use shockcrop::ingest::SensorConnectReader;
use shockcrop::recording::Recording;
use shockcrop::trigger::Polarity;
use shockcrop::window::Window;
use shockcrop::writer::{output_paths, write_windows};

use super::config::Config;
use super::{printout, ExtractArgs};

/// Crop windows around the strongest peaks of a Sensor Connect export
pub fn run(args: ExtractArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let file_config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    let config = build_config(&args, &file_config)?;
    let name = display_name(&args.input);

    info!("shockcrop - Shock Event Extraction");
    info!("==================================");
    info!("Input: {}", args.input.display());
    if config.is_single_max() {
        info!("Mode: single maximum");
    } else {
        info!("Mode: {} captures, deadzone {}", config.num_captures(), config.deadzone());
    }
    info!(
        "Axes: {}, polarity: {}, window: {} samples, coefficient: {}",
        config.channels(),
        config.polarity(),
        config.window_size(),
        config.location_coefficient()
    );

    let samples = SensorConnectReader::new()
        .read_path(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let recording = Recording::new(name.clone(), samples).context("Failed to load recording")?;
    info!("{}", recording.summary());

    let windows = recording.extract(&config).context("Extraction failed")?;

    if args.printout {
        for (i, window) in windows.iter().enumerate() {
            if windows.len() > 1 {
                println!("Capture {}:", i + 1);
            }
            printout::print_window(window);
        }
    }

    let paths = output_paths(&args.input, args.output.as_deref(), windows.len());
    let stats = write_windows(&windows, &paths).context("Failed to write output")?;
    for path in &paths {
        info!("Wrote {}", path.display());
    }
    println!("{stats}");

    if args.plot {
        let title = args
            .title
            .clone()
            .or_else(|| file_config.plot.title.clone())
            .unwrap_or(name);
        render_plots(&windows, &paths, &title, &config)?;
    }

    Ok(())
}

/// Merge flags over the config file over the library defaults.
fn build_config(args: &ExtractArgs, file: &Config) -> Result<ExtractionConfig> {
    let section = &file.extraction;
    let mut builder = ExtractionConfig::builder();

    if let Some(axes) = args.axis.as_deref().or(section.axes.as_deref()) {
        builder = builder.axes(axes)?;
    }

    let polarity = match (args.polarity, section.polarity.as_deref()) {
        (Some(polarity), _) => Some(polarity),
        (None, Some(text)) => Some(text.parse::<Polarity>().map_err(anyhow::Error::msg)?),
        (None, None) => None,
    };
    if let Some(polarity) = polarity {
        builder = builder.polarity(polarity);
    }

    if let Some(num_captures) = args.number.or(section.num_captures) {
        builder = builder.num_captures(num_captures);
    }
    if let Some(deadzone) = args.deadzone.or(section.deadzone) {
        builder = builder.deadzone(deadzone);
    }
    if let Some(window_size) = args.size.or(section.window_size) {
        builder = builder.window_size(window_size);
    }

    let coefficient = args
        .coefficient
        .clone()
        .or_else(|| section.location_coefficient.as_ref().map(|c| c.to_string()));
    if let Some(text) = coefficient {
        builder = builder.location_coefficient(text.parse::<LocationCoefficient>()?);
    }

    builder = builder.max_mode(args.maximum || section.max_mode.unwrap_or(false));

    Ok(builder.build()?)
}

fn display_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

#[cfg(feature = "plot")]
fn render_plots(
    windows: &[Window],
    paths: &[PathBuf],
    title: &str,
    config: &ExtractionConfig,
) -> Result<()> {
    use shockcrop::plot::{render_window_svg, PlotStyle};

    for (i, (window, path)) in windows.iter().zip(paths).enumerate() {
        let svg = path.with_extension("svg");
        let style = PlotStyle {
            title: if windows.len() > 1 {
                format!("{} - capture {}", title, i + 1)
            } else {
                title.to_string()
            },
            channels: config.channels().clone(),
            ..Default::default()
        };
        render_window_svg(window, &svg, &style)
            .with_context(|| format!("Failed to render {}", svg.display()))?;
        info!("Plotted {}", svg.display());
    }
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn render_plots(
    _windows: &[Window],
    _paths: &[PathBuf],
    _title: &str,
    _config: &ExtractionConfig,
) -> Result<()> {
    warn!("Plotting requested but shockcrop was built without the 'plot' feature");
    Ok(())
}
