use crate::domain::vehicle::{Choice, VehicleRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
}

const fn numeric(name: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        kind: FeatureKind::Numeric,
    }
}

const fn categorical(name: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        kind: FeatureKind::Categorical,
    }
}

/// Ordered feature schema shared by the trainer and the predictor.
/// Any change here invalidates previously trained artifacts.
pub const VEHICLE_FEATURES: &[FeatureSpec] = &[
    categorical("make"),
    categorical("model"),
    numeric("year"),
    numeric("age"),
    numeric("mileage"),
    numeric("cylinders"),
    categorical("fuel"),
    categorical("transmission"),
    categorical("body"),
    numeric("doors"),
    categorical("drivetrain"),
];

pub const TARGET_COLUMN: &str = "price";
pub const YEAR_COLUMN: &str = "year";
pub const AGE_COLUMN: &str = "age";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
    Missing,
}

impl FeatureValue {
    /// Parses a raw CSV cell. Empty and NA-like cells become `Missing`;
    /// infinite numbers are rejected.
    pub fn from_cell(raw: &str, kind: FeatureKind) -> Result<Self, String> {
        let cell = raw.trim();
        if is_missing_marker(cell) {
            return Ok(FeatureValue::Missing);
        }
        match kind {
            FeatureKind::Numeric => cell
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FeatureValue::Number)
                .ok_or_else(|| cell.to_string()),
            FeatureKind::Categorical => Ok(FeatureValue::Text(cell.to_string())),
        }
    }
}

pub fn is_missing_marker(cell: &str) -> bool {
    cell.is_empty()
        || cell.eq_ignore_ascii_case("na")
        || cell.eq_ignore_ascii_case("nan")
        || cell.eq_ignore_ascii_case("null")
}

static MISSING: FeatureValue = FeatureValue::Missing;

/// One observation keyed by feature name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    values: HashMap<String, FeatureValue>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FeatureValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: FeatureValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Absent columns read as `Missing`.
    pub fn get(&self, name: &str) -> &FeatureValue {
        self.values.get(name).unwrap_or(&MISSING)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds the single inference row for a validated record.
pub fn record_to_row(record: &VehicleRecord, reference_year: i32) -> FeatureRow {
    FeatureRow::new()
        .with("make", FeatureValue::Text(record.make().to_string()))
        .with("model", FeatureValue::Text(record.model().to_string()))
        .with("year", FeatureValue::Number(record.year() as f64))
        .with("age", FeatureValue::Number(record.age(reference_year) as f64))
        .with("mileage", FeatureValue::Number(record.mileage() as f64))
        .with("cylinders", FeatureValue::Number(record.cylinders() as f64))
        .with("fuel", FeatureValue::Text(record.fuel().label().to_string()))
        .with(
            "transmission",
            FeatureValue::Text(record.transmission().label().to_string()),
        )
        .with("body", FeatureValue::Text(record.body().label().to_string()))
        .with("doors", FeatureValue::Number(record.doors() as f64))
        .with(
            "drivetrain",
            FeatureValue::Text(record.drivetrain().label().to_string()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::VehicleSpec;

    #[test]
    fn test_schema_order_and_kinds() {
        let names: Vec<&str> = VEHICLE_FEATURES.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "make",
                "model",
                "year",
                "age",
                "mileage",
                "cylinders",
                "fuel",
                "transmission",
                "body",
                "doors",
                "drivetrain"
            ]
        );

        let numeric: Vec<&str> = VEHICLE_FEATURES
            .iter()
            .filter(|f| f.kind == FeatureKind::Numeric)
            .map(|f| f.name)
            .collect();
        assert_eq!(numeric, vec!["year", "age", "mileage", "cylinders", "doors"]);
    }

    #[test]
    fn test_record_row_covers_every_schema_feature() {
        let record = VehicleRecord::new(VehicleSpec::default()).unwrap();
        let row = record_to_row(&record, 2025);

        assert_eq!(row.len(), VEHICLE_FEATURES.len());
        for spec in VEHICLE_FEATURES {
            assert!(row.contains(spec.name), "missing {}", spec.name);
        }
        assert_eq!(row.get("age"), &FeatureValue::Number(1.0));
        assert_eq!(
            row.get("drivetrain"),
            &FeatureValue::Text("Front-wheel Drive".to_string())
        );
    }

    #[test]
    fn test_absent_column_reads_as_missing() {
        let row = FeatureRow::new();
        assert_eq!(row.get("make"), &FeatureValue::Missing);
    }

    #[test]
    fn test_cell_parsing() {
        assert_eq!(
            FeatureValue::from_cell("42", FeatureKind::Numeric),
            Ok(FeatureValue::Number(42.0))
        );
        assert_eq!(
            FeatureValue::from_cell(" NaN ", FeatureKind::Numeric),
            Ok(FeatureValue::Missing)
        );
        assert_eq!(
            FeatureValue::from_cell("abc", FeatureKind::Numeric),
            Err("abc".to_string())
        );
        assert_eq!(
            FeatureValue::from_cell("-inf", FeatureKind::Numeric),
            Err("-inf".to_string())
        );
        assert_eq!(
            FeatureValue::from_cell("Ford", FeatureKind::Categorical),
            Ok(FeatureValue::Text("Ford".to_string()))
        );
    }
}
