use anyhow::{Context, Result};
use std::path::PathBuf;

use shockcrop::ingest::SensorConnectReader;
use shockcrop::recording::Recording;

/// Display summary statistics of a Sensor Connect export
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let samples = SensorConnectReader::new()
        .read_path(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let recording = Recording::new(name, samples).context("Failed to load recording")?;
    let summary = recording.summary();

    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{text}");
        return Ok(());
    }

    println!("Recording Information");
    println!("=====================");
    println!("File: {}", file.display());
    if let (Some(first), Some(last)) = (recording.samples().first(), recording.samples().last()) {
        println!("Start: {}", first.timestamp);
        println!("End:   {}", last.timestamp);
    }
    println!();
    println!("{summary}");

    Ok(())
}
