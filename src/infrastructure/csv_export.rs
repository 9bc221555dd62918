use crate::domain::history::{HISTORY_COLUMNS, HistoryEntry};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_FILE_NAME: &str = "vehicle_price_predictions.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Serializes history to UTF-8 CSV: one header row, one row per entry, no index column.
pub fn history_to_csv(entries: &[HistoryEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Header written explicitly so an empty history still exports a valid file
    wtr.write_record(HISTORY_COLUMNS)?;
    for entry in entries {
        wtr.serialize(entry)?;
    }

    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Writes the export under `dir` with the fixed file name, replacing any previous export.
pub fn write_export(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create export dir {:?}", dir))?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;
    info!("Exported {} bytes to {:?}", bytes.len(), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{VehicleRecord, VehicleSpec};

    fn entries(n: usize) -> Vec<HistoryEntry> {
        (0..n)
            .map(|i| {
                let spec = VehicleSpec {
                    make: "Toyota".to_string(),
                    model: format!("Model {}", i),
                    ..VehicleSpec::default()
                };
                let record = VehicleRecord::new(spec).unwrap();
                HistoryEntry::new(&record, 2025, 10_000.0 + i as f64)
            })
            .collect()
    }

    #[test]
    fn test_export_parses_back_with_header() {
        let bytes = history_to_csv(&entries(3)).unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());

        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, HISTORY_COLUMNS);

        let parsed: Vec<HistoryEntry> = rdr.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, entries(3));
    }

    #[test]
    fn test_labels_written_verbatim() {
        let bytes = history_to_csv(&entries(1)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().ends_with("drivetrain,Predicted Price ($)"));
        assert_eq!(
            lines.next().unwrap(),
            "Toyota,Model 0,2024,1,10,4,Gasoline,Automatic,SUV,2,Front-wheel Drive,10000.0"
        );
    }

    #[test]
    fn test_empty_history_exports_header_only() {
        let bytes = history_to_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
