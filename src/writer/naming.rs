use std::path::{Path, PathBuf};

const CSV_EXTENSION: &str = ".csv";

/// Output file names for `count` windows cut from `input`.
///
/// One window goes to `<stem>_trunc.csv`, several to `<stem>_trunc<k>.csv`
/// (k from 1), next to the input. A user-supplied `output` replaces
/// `<stem>_trunc`; `.csv` is appended when missing and captures are numbered
/// before the extension.
pub fn output_paths(input: &Path, output: Option<&Path>, count: usize) -> Vec<PathBuf> {
    let base = match output {
        Some(output) => strip_csv(&output.to_string_lossy()).to_string(),
        None => {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stem = format!("{}_trunc", strip_csv(&name));
            input.with_file_name(stem).to_string_lossy().into_owned()
        }
    };

    if count == 1 {
        vec![PathBuf::from(format!("{base}{CSV_EXTENSION}"))]
    } else {
        (1..=count)
            .map(|k| PathBuf::from(format!("{base}{k}{CSV_EXTENSION}")))
            .collect()
    }
}

fn strip_csv(name: &str) -> &str {
    name.strip_suffix(CSV_EXTENSION).unwrap_or(name)
}
