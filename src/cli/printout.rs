//! Terminal listing of a cropped window.

use shockcrop::sample::Sample;
use shockcrop::window::Window;

const TIME_FORMAT: &str = "%M:%S%.6f";
const TRIGGER_MARKER: &str = "<---- Trigger";

/// Print every sample of `window`, marking the trigger row.
pub fn print_window(window: &Window) {
    let trigger = window.trigger_offset();
    for (i, sample) in window.samples().iter().enumerate() {
        let line = format_row(i, sample);
        if trigger == Some(i) {
            println!("{} {}", highlight(&line), marker());
        } else {
            println!("{line}");
        }
    }
}

fn format_row(i: usize, sample: &Sample) -> String {
    format!(
        "<[{}] TIME={}, X={}, Y={}, Z={}>",
        i,
        sample.timestamp.format(TIME_FORMAT),
        sample.channels[0],
        sample.channels[1],
        sample.channels[2]
    )
}

#[cfg(feature = "colorized_output")]
fn highlight(line: &str) -> String {
    console::style(line).bold().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn highlight(line: &str) -> String {
    line.to_string()
}

#[cfg(feature = "colorized_output")]
fn marker() -> String {
    console::style(TRIGGER_MARKER).red().bold().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn marker() -> String {
    TRIGGER_MARKER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_row() {
        let timestamp = NaiveDate::from_ymd_opt(2016, 5, 24)
            .unwrap()
            .and_hms_micro_opt(14, 30, 12, 1500)
            .unwrap();
        let sample = Sample::new(timestamp, 0.5, -1.25, 1.0);
        assert_eq!(
            format_row(7, &sample),
            "<[7] TIME=30:12.001500, X=0.5, Y=-1.25, Z=1>"
        );
    }
}
