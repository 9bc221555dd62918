use crate::domain::vehicle::{BodyType, Drivetrain, FuelType, Transmission, VehicleRecord};
use serde::{Deserialize, Serialize};

/// One successful prediction, flattened the way it is shown and exported.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub age: i32,
    pub mileage: u32,
    pub cylinders: u8,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub body: BodyType,
    pub doors: u8,
    pub drivetrain: Drivetrain,
    #[serde(rename = "Predicted Price ($)")]
    pub predicted_price: f64,
}

pub const HISTORY_COLUMNS: &[&str] = &[
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
    "drivetrain",
    "Predicted Price ($)",
];

impl HistoryEntry {
    pub fn new(record: &VehicleRecord, reference_year: i32, price: f64) -> Self {
        Self {
            make: record.make().to_string(),
            model: record.model().to_string(),
            year: record.year(),
            age: record.age(reference_year),
            mileage: record.mileage(),
            cylinders: record.cylinders(),
            fuel: record.fuel(),
            transmission: record.transmission(),
            body: record.body(),
            doors: record.doors(),
            drivetrain: record.drivetrain(),
            predicted_price: round_cents(price),
        }
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Session-scoped list of predictions in submission order.
#[derive(Debug, Clone, Default)]
pub struct PredictionHistory {
    entries: Vec<HistoryEntry>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Empties the list in place.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
