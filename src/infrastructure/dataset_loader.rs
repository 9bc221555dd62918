use crate::domain::errors::DatasetError;
use crate::domain::ml::feature_registry::{
    AGE_COLUMN, FeatureValue, FeatureRow, TARGET_COLUMN, VEHICLE_FEATURES, is_missing_marker,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Rows with a usable target, keyed by feature name.
#[derive(Debug, Clone, Default)]
pub struct LabelledDataset {
    /// Schema features found in the header, in schema order.
    pub present_features: Vec<&'static str>,
    pub rows: Vec<FeatureRow>,
    pub targets: Vec<f64>,
    /// Rows discarded for a missing target.
    pub dropped: usize,
    pub total_columns: usize,
}

impl LabelledDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load_dataset(path: &Path) -> Result<LabelledDataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.display().to_string(),
        });
    }

    info!("Loading dataset from {:?}", path);
    let file = File::open(path).map_err(csv::Error::from)?;
    read_dataset(BufReader::new(file))
}

/// Parses a CSV stream, dropping rows whose target is empty or NA-like.
///
/// Columns outside the feature schema are ignored. `age` is never read from
/// the file; the trainer derives it.
pub fn read_dataset<R: Read>(reader: R) -> Result<LabelledDataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let target_idx = headers
        .iter()
        .position(|h| h == TARGET_COLUMN)
        .ok_or_else(|| DatasetError::MissingTarget {
            column: TARGET_COLUMN.to_string(),
        })?;

    let feature_columns: Vec<(usize, &'static str, _)> = VEHICLE_FEATURES
        .iter()
        .filter(|f| f.name != AGE_COLUMN)
        .filter_map(|f| {
            headers
                .iter()
                .position(|h| h == f.name)
                .map(|idx| (idx, f.name, f.kind))
        })
        .collect();

    let mut dataset = LabelledDataset {
        present_features: feature_columns.iter().map(|(_, name, _)| *name).collect(),
        total_columns: headers.len(),
        ..Default::default()
    };

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row_number = i + 1;

        let raw_target = record.get(target_idx).unwrap_or("");
        if is_missing_marker(raw_target) {
            dataset.dropped += 1;
            continue;
        }
        let target = raw_target
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DatasetError::InvalidNumber {
                column: TARGET_COLUMN.to_string(),
                row: row_number,
                value: raw_target.to_string(),
            })?;

        let mut row = FeatureRow::new();
        for (idx, name, kind) in &feature_columns {
            let raw = record.get(*idx).unwrap_or("");
            let value = FeatureValue::from_cell(raw, *kind).map_err(|value| {
                DatasetError::InvalidNumber {
                    column: name.to_string(),
                    row: row_number,
                    value,
                }
            })?;
            row.insert(name, value);
        }

        dataset.rows.push(row);
        dataset.targets.push(target);
    }

    info!(
        "Dataset loaded: {} labelled rows, {} columns ({} dropped for missing {})",
        dataset.rows.len(),
        dataset.total_columns,
        dataset.dropped,
        TARGET_COLUMN
    );

    Ok(dataset)
}
