//! Integration tests for shockcrop
//!
//! These tests drive the full pipeline: a Sensor Connect export on disk is
//! ingested, triggers are detected, windows are cropped and written back out.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use shockcrop::config::{ExtractionConfig, LocationCoefficient};
use shockcrop::ingest::{self, parse_timestamp, IngestError};
use shockcrop::recording::Recording;
use shockcrop::sample::Sample;
use shockcrop::trigger::{Polarity, TriggerError};
use shockcrop::writer::{output_paths, write_sensor_connect, write_windows};
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 5, 24)
        .unwrap()
        .and_hms_opt(14, 30, 12)
        .unwrap()
}

/// Quiet recording at 1 kHz with the given `(index, x, y, z)` overrides.
fn recording_with_spikes(len: usize, spikes: &[(usize, f64, f64, f64)]) -> Vec<Sample> {
    let mut samples: Vec<Sample> = (0..len)
        .map(|i| Sample::new(start() + TimeDelta::milliseconds(i as i64), 0.0, 0.0, 1.0))
        .collect();
    for &(index, x, y, z) in spikes {
        samples[index].channels = [x, y, z];
    }
    samples
}

fn export(path: &Path, samples: &[Sample]) {
    let header = vec![
        "FILE_INFO".to_string(),
        "Sample Rate,1000 Hz".to_string(),
    ];
    write_sensor_connect(File::create(path).unwrap(), &header, samples).unwrap();
}

fn read_window_file(path: &Path) -> Vec<Sample> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .enumerate()
        .map(|(line, record)| {
            let record = record.unwrap();
            let timestamp = parse_timestamp(&record[0], line as u64 + 1).unwrap();
            let value = |i: usize| record[i].parse::<f64>().unwrap();
            Sample::new(timestamp, value(1), value(2), value(3))
        })
        .collect()
}

/// Test the complete export-extract-write cycle
#[test]
fn test_multiple_capture_pipeline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("drop_test.csv");
    let data = recording_with_spikes(
        3000,
        &[(600, 9.0, 0.0, 1.0), (1500, 0.0, -12.0, 1.0), (2400, 0.0, 0.0, 7.5)],
    );
    export(&input, &data);

    let samples = ingest::read_path(&input).unwrap();
    assert_eq!(samples, data);

    let recording = Recording::new("drop_test.csv", samples).unwrap();
    let config = ExtractionConfig::builder().build().unwrap();
    let windows = recording.extract(&config).unwrap();

    let centers: Vec<usize> = windows.iter().map(|w| w.trigger_index()).collect();
    assert_eq!(centers, vec![1500, 600, 2400]);

    let paths = output_paths(&input, None, windows.len());
    let stats = write_windows(&windows, &paths).unwrap();
    assert_eq!(stats.files_written, 3);
    assert_eq!(stats.rows_written, 900);
    assert_eq!(stats.clipped_windows, 0);

    for (window, path) in windows.iter().zip(&paths) {
        let rows = read_window_file(path);
        assert_eq!(rows.len(), 300);
        assert_eq!(rows, window.samples());
        assert_eq!(rows[60], data[window.trigger_index()]);
    }
    assert!(dir.path().join("drop_test_trunc1.csv").exists());
    assert!(dir.path().join("drop_test_trunc3.csv").exists());
}

#[test]
fn test_single_max_pipeline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("impact.csv");
    export(&input, &recording_with_spikes(1000, &[(500, 10.0, 0.0, 1.0)]));

    let recording = Recording::new("impact.csv", ingest::read_path(&input).unwrap()).unwrap();
    let config = ExtractionConfig::builder()
        .axes("x")
        .unwrap()
        .max_mode(true)
        .build()
        .unwrap();
    let windows = recording.extract(&config).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!((windows[0].begin(), windows[0].end()), (440, 740));

    let output = dir.path().join("clips").join("impact_clip.csv");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    let paths = output_paths(&input, Some(&output), 1);
    assert_eq!(paths, vec![output.clone()]);
    write_windows(&windows, &paths).unwrap();

    let rows = read_window_file(&output);
    assert_eq!(rows.len(), 300);
    assert_eq!(rows[60].channels, [10.0, 0.0, 1.0]);
}

#[test]
fn test_polarity_and_coefficient_pipeline() {
    let data = recording_with_spikes(2000, &[(400, 6.0, 0.0, 1.0), (1200, -8.0, 0.0, 1.0)]);
    let recording = Recording::new("mixed", data).unwrap();

    let config = ExtractionConfig::builder()
        .axes("x")
        .unwrap()
        .polarity(Polarity::Positive)
        .num_captures(1)
        .window_size(100)
        .location_coefficient("1/2".parse::<LocationCoefficient>().unwrap())
        .build()
        .unwrap();
    let windows = recording.extract(&config).unwrap();
    assert_eq!(windows[0].trigger_index(), 400);
    assert_eq!((windows[0].begin(), windows[0].end()), (350, 450));

    let config = ExtractionConfig::builder()
        .axes("x")
        .unwrap()
        .polarity(Polarity::Both)
        .num_captures(1)
        .window_size(100)
        .build()
        .unwrap();
    let windows = recording.extract(&config).unwrap();
    assert_eq!(windows[0].trigger_index(), 1200);
}

#[test]
fn test_clipped_window_is_shorter() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("early.csv");
    let recording =
        Recording::new("early.csv", recording_with_spikes(500, &[(10, 0.0, 0.0, 9.0)])).unwrap();
    let config = ExtractionConfig::builder().num_captures(1).build().unwrap();

    let windows = recording.extract(&config).unwrap();
    assert!(windows[0].is_clipped());
    assert_eq!(windows[0].len(), 250);
    assert_eq!(windows[0].trigger_offset(), Some(10));

    let stats = write_windows(&windows, &output_paths(&input, None, 1)).unwrap();
    assert_eq!(stats.clipped_windows, 1);
    assert_eq!(read_window_file(&dir.path().join("early_trunc.csv")).len(), 250);
}

#[test]
fn test_insufficient_triggers_writes_nothing() {
    let recording =
        Recording::new("pair", recording_with_spikes(1000, &[(100, 10.0, 0.0, 1.0), (105, 10.0, 0.0, 1.0)]))
            .unwrap();
    let config = ExtractionConfig::builder()
        .axes("x")
        .unwrap()
        .num_captures(2)
        .deadzone(50)
        .build()
        .unwrap();

    let result = recording.extract(&config);
    assert_eq!(
        result,
        Err(TriggerError::InsufficientDistinctTriggers {
            requested: 2,
            found: 1
        })
    );
}

#[test]
fn test_missing_data_start_is_reported() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("not_an_export.csv");
    fs::write(&input, "Time,x,y,z\n05/24/16 14:30:12.000000,0,0,1\n").unwrap();

    let result = ingest::read_path(&input);
    assert!(matches!(result, Err(IngestError::MissingDataStart { .. })));
}

#[test]
fn test_invalid_axis_is_reported() {
    let result = ExtractionConfig::builder().axes("xw");
    assert!(matches!(
        result,
        Err(TriggerError::InvalidAxisSpecification { .. })
    ));
}
