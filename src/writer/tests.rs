use super::*;
use crate::ingest::SensorConnectReader;
use crate::window::crop;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use num::rational::Ratio;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 5, 24)
        .unwrap()
        .and_hms_micro_opt(14, 30, 12, 0)
        .unwrap()
}

fn samples(len: usize) -> Vec<Sample> {
    (0..len)
        .map(|i| {
            Sample::new(
                start() + TimeDelta::microseconds(i as i64 * 500),
                i as f64 * 0.5,
                -(i as f64),
                1.0,
            )
        })
        .collect()
}

// ==================== Output Naming ====================

#[test]
fn test_default_single_name() {
    let paths = output_paths(Path::new("/data/run.csv"), None, 1);
    assert_eq!(paths, vec![PathBuf::from("/data/run_trunc.csv")]);
}

#[test]
fn test_default_numbered_names() {
    let paths = output_paths(Path::new("/data/run.csv"), None, 3);
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/data/run_trunc1.csv"),
            PathBuf::from("/data/run_trunc2.csv"),
            PathBuf::from("/data/run_trunc3.csv"),
        ]
    );
}

#[test]
fn test_user_output_names() {
    assert_eq!(
        output_paths(Path::new("run.csv"), Some(Path::new("out")), 1),
        vec![PathBuf::from("out.csv")]
    );
    assert_eq!(
        output_paths(Path::new("run.csv"), Some(Path::new("out.csv")), 1),
        vec![PathBuf::from("out.csv")]
    );
    assert_eq!(
        output_paths(Path::new("run.csv"), Some(Path::new("clips/out.csv")), 2),
        vec![PathBuf::from("clips/out1.csv"), PathBuf::from("clips/out2.csv")]
    );
}

#[test]
fn test_input_without_csv_extension() {
    let paths = output_paths(Path::new("capture.txt"), None, 1);
    assert_eq!(paths, vec![PathBuf::from("capture.txt_trunc.csv")]);
}

// ==================== Window Writer ====================

#[test]
fn test_write_window_rows() -> Result<(), WriterError> {
    let data = samples(10);
    let window = crop(&data, 5, 4, Ratio::new(1, 2));

    let mut writer = WindowWriter::new(Vec::new());
    writer.write_window(&window)?;
    assert_eq!(writer.rows_written(), 4);
    let bytes = writer.inner.into_inner().map_err(|e| e.into_error())?;

    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "05/24/16 14:30:12.001500,1.5,-3,1");
    assert_eq!(lines[2], "05/24/16 14:30:12.002500,2.5,-5,1");
    Ok(())
}

#[test]
fn test_write_windows_to_files() -> Result<(), WriterError> {
    let dir = tempdir()?;
    let data = samples(100);
    let windows = vec![
        crop(&data, 50, 20, Ratio::new(1, 5)),
        crop(&data, 2, 20, Ratio::new(1, 5)),
    ];
    let paths = output_paths(&dir.path().join("run.csv"), None, windows.len());

    let stats = write_windows(&windows, &paths)?;
    assert_eq!(stats.files_written, 2);
    assert_eq!(stats.rows_written, 20 + 18);
    assert_eq!(stats.clipped_windows, 1);
    assert!(stats.to_string().contains("1 clipped"));

    let second = fs::read_to_string(dir.path().join("run_trunc2.csv"))?;
    assert_eq!(second.lines().count(), 18);
    Ok(())
}

#[test]
fn test_write_windows_path_mismatch() {
    let data = samples(10);
    let windows = vec![crop(&data, 5, 4, Ratio::new(1, 2))];
    let result = write_windows(&windows, &[]);
    assert!(matches!(
        result,
        Err(WriterError::PathCountMismatch { windows: 1, paths: 0 })
    ));
}

// ==================== Sensor Connect Export ====================

#[test]
fn test_sensor_connect_export_reads_back() -> Result<(), WriterError> {
    let data = samples(25);
    let mut buffer = Vec::new();
    write_sensor_connect(&mut buffer, &["Generated".to_string()], &data)?;

    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("Generated\nDATA_START\nTime,ch1,ch2,ch3\n"));

    let parsed = SensorConnectReader::new().read(Cursor::new(text)).unwrap();
    assert_eq!(parsed, data);
    Ok(())
}
