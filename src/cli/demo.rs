use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use shockcrop::sample::{Channel, Sample};
use shockcrop::writer::write_sensor_connect;

/// Generate a synthetic Sensor Connect recording
pub fn run(output: PathBuf, samples: usize, spikes: usize, rate: u32) -> Result<()> {
    if rate == 0 {
        anyhow::bail!("Sample rate must be positive");
    }

    info!("shockcrop - Synthetic Impact Recording");
    info!("======================================");

    let start = demo_start()?;
    let data = generate_recording(start, samples, spikes, rate);
    let header = vec![
        "FILE_INFO".to_string(),
        "Generator,shockcrop demo".to_string(),
        format!("Sample Rate,{rate} Hz"),
        format!("Impacts,{spikes}"),
    ];

    info!("Creating recording: {}", output.display());
    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_sensor_connect(BufWriter::new(file), &header, &data)
        .context("Failed to write demo recording")?;

    info!("Demo recording complete!");
    info!("  Samples written: {}", data.len());
    for (k, index) in spike_positions(samples, spikes).enumerate() {
        let (channel, magnitude) = spike_shape(k);
        info!("  Impact {} at sample {} on {} ({:+.1} g)", k + 1, index, channel, magnitude);
    }
    println!("Wrote {} samples to {}", data.len(), output.display());

    Ok(())
}

fn demo_start() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2016, 5, 24)
        .and_then(|date| date.and_hms_opt(14, 30, 12))
        .context("Invalid demo start time")
}

/// Evenly spaced impact locations.
fn spike_positions(samples: usize, spikes: usize) -> impl Iterator<Item = usize> {
    let spacing = if spikes == 0 { 0 } else { samples / spikes };
    (0..spikes).map(move |k| k * spacing + spacing / 2)
}

/// Channel and peak amplitude of impact `k`. Amplitudes decrease so the
/// expected trigger order follows generation order.
fn spike_shape(k: usize) -> (Channel, f64) {
    let channel = Channel::ALL[k % Channel::ALL.len()];
    let magnitude = 12.0 - k as f64 * 1.5;
    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
    (channel, sign * magnitude.max(3.0))
}

/// Low-level vibration on every axis plus a damped ring-down after each impact.
fn generate_recording(start: NaiveDateTime, samples: usize, spikes: usize, rate: u32) -> Vec<Sample> {
    let period_us = 1_000_000 / i64::from(rate).max(1);

    let mut data: Vec<Sample> = (0..samples)
        .map(|i| {
            let t = i as f64;
            let x = (t * 0.1).sin() * 0.2;
            let y = (t * 0.037).sin() * 0.15;
            let z = 1.0 + (t * 0.071).cos() * 0.1;
            Sample::new(start + TimeDelta::microseconds(i as i64 * period_us), x, y, z)
        })
        .collect();

    for (k, index) in spike_positions(samples, spikes).enumerate() {
        let (channel, peak) = spike_shape(k);
        for (offset, sample) in data.iter_mut().skip(index).take(40).enumerate() {
            let decay = (-(offset as f64) / 6.0).exp();
            let ring = (offset as f64 * std::f64::consts::FRAC_PI_2).cos();
            sample.channels[channel.index()] += peak * decay * ring;
        }
    }

    data
}
