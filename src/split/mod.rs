//! Train/test split of a labels CSV.
//!
//! Rows are grouped by their `filename` column so every box of an image
//! lands on the same side of the split.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use crate::error::GeolabelError;

const FILENAME_COLUMN: &str = "filename";
pub const TRAIN_FILE_NAME: &str = "train_labels.csv";
pub const TEST_FILE_NAME: &str = "test_labels.csv";

/// Split options.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    /// Share of image groups that go to the training set, in [0, 1].
    pub train_fraction: f64,
    pub seed: u64,
    /// Directory receiving `train_labels.csv` and `test_labels.csv`.
    pub out_dir: PathBuf,
}

/// Group counts of a finished split.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub groups: usize,
    pub train_groups: usize,
    pub test_groups: usize,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Validate split options before touching any file.
pub fn validate_split_options(opts: &SplitOptions) -> Result<(), GeolabelError> {
    if !(0.0..=1.0).contains(&opts.train_fraction) {
        return Err(GeolabelError::InvalidArguments {
            message: format!(
                "train fraction must be within [0.0, 1.0], got {}",
                opts.train_fraction
            ),
        });
    }
    Ok(())
}

/// Number of groups assigned to training: `floor(groups * fraction)`.
pub fn train_group_count(groups: usize, fraction: f64) -> usize {
    ((groups as f64) * fraction).floor() as usize
}

/// Split `csv_path` into train/test CSV files.
pub fn split_labels(csv_path: &Path, opts: &SplitOptions) -> Result<SplitSummary, GeolabelError> {
    validate_split_options(opts)?;

    let read_err = |source| GeolabelError::CsvRead {
        path: csv_path.to_path_buf(),
        source,
    };

    let file = File::open(csv_path).map_err(GeolabelError::Io)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers().map_err(read_err)?.clone();
    let filename_idx = headers
        .iter()
        .position(|column| column == FILENAME_COLUMN)
        .ok_or_else(|| GeolabelError::InvalidArguments {
            message: format!(
                "{} has no '{FILENAME_COLUMN}' column",
                csv_path.display()
            ),
        })?;

    let mut groups: BTreeMap<String, Vec<csv::StringRecord>> = BTreeMap::new();
    for result in reader.records() {
        let record = result.map_err(read_err)?;
        let key = record.get(filename_idx).unwrap_or_default().to_string();
        groups.entry(key).or_default().push(record);
    }
    let groups: Vec<Vec<csv::StringRecord>> = groups.into_values().collect();

    let train_count = train_group_count(groups.len(), opts.train_fraction);
    let mut order: Vec<usize> = (0..groups.len()).collect();
    let mut rng = StdRng::seed_from_u64(opts.seed);
    order.shuffle(&mut rng);

    let mut train_indices = order[..train_count].to_vec();
    let mut test_indices = order[train_count..].to_vec();
    train_indices.sort_unstable();
    test_indices.sort_unstable();

    let train_path = opts.out_dir.join(TRAIN_FILE_NAME);
    let test_path = opts.out_dir.join(TEST_FILE_NAME);
    let train_rows = write_groups(&train_path, &headers, &groups, &train_indices)?;
    let test_rows = write_groups(&test_path, &headers, &groups, &test_indices)?;

    let summary = SplitSummary {
        groups: groups.len(),
        train_groups: train_indices.len(),
        test_groups: test_indices.len(),
        train_rows,
        test_rows,
    };
    log::info!(
        "Split {} image group(s): {} train, {} test",
        summary.groups,
        summary.train_groups,
        summary.test_groups
    );
    Ok(summary)
}

fn write_groups(
    path: &Path,
    headers: &csv::StringRecord,
    groups: &[Vec<csv::StringRecord>],
    indices: &[usize],
) -> Result<usize, GeolabelError> {
    let write_err = |source| GeolabelError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(GeolabelError::Io)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(headers).map_err(write_err)?;

    let mut rows = 0;
    for &idx in indices {
        for record in &groups[idx] {
            writer.write_record(record).map_err(write_err)?;
            rows += 1;
        }
    }

    writer
        .into_inner()
        .map_err(|e| GeolabelError::Io(e.into_error()))?
        .flush()
        .map_err(GeolabelError::Io)?;

    Ok(rows)
}
