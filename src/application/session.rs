//! One interactive session: validated submissions, prediction history and export.
//!
//! Every user action goes through [`PredictionSession::handle`] with the
//! session passed in explicitly. History is only changed by a successful
//! submission (append) or a clear.

use crate::application::ml::predictor::PricePredictor;
use crate::domain::errors::{PredictionError, ValidationError};
use crate::domain::history::{HistoryEntry, PredictionHistory};
use crate::domain::ml::feature_registry::record_to_row;
use crate::domain::vehicle::record::DEFAULT_REFERENCE_YEAR;
use crate::domain::vehicle::{VehicleRecord, VehicleSpec};
use crate::infrastructure::csv_export::history_to_csv;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub price: f64,
    pub entry: HistoryEntry,
}

impl Prediction {
    pub fn formatted(&self) -> String {
        format_currency(self.price)
    }
}

#[derive(Debug, Clone)]
pub enum SessionAction {
    Submit(VehicleSpec),
    ClearHistory,
    ExportCsv,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Predicted(Prediction),
    Failed(SubmitError),
    Cleared { removed: usize },
    Exported(Vec<u8>),
    ExportFailed(String),
}

#[derive(Debug, Clone)]
pub struct PredictionSession {
    history: PredictionHistory,
    reference_year: i32,
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_YEAR)
    }
}

impl PredictionSession {
    pub fn new(reference_year: i32) -> Self {
        Self {
            history: PredictionHistory::new(),
            reference_year,
        }
    }

    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn handle(&mut self, predictor: &dyn PricePredictor, action: SessionAction) -> ActionOutcome {
        match action {
            SessionAction::Submit(spec) => match self.submit(predictor, spec) {
                Ok(prediction) => ActionOutcome::Predicted(prediction),
                Err(e) => ActionOutcome::Failed(e),
            },
            SessionAction::ClearHistory => ActionOutcome::Cleared {
                removed: self.clear(),
            },
            SessionAction::ExportCsv => match self.export_csv() {
                Ok(bytes) => ActionOutcome::Exported(bytes),
                Err(e) => ActionOutcome::ExportFailed(e.to_string()),
            },
        }
    }

    /// Validates, predicts, and appends on success. History is untouched on failure.
    pub fn submit(
        &mut self,
        predictor: &dyn PricePredictor,
        spec: VehicleSpec,
    ) -> Result<Prediction, SubmitError> {
        let record = VehicleRecord::new(spec)?;
        let row = record_to_row(&record, self.reference_year);

        let price = predictor.predict(&row).inspect_err(|e| {
            warn!("Prediction failed for {} {}: {}", record.make(), record.model(), e);
        })?;

        let entry = HistoryEntry::new(&record, self.reference_year, price);
        self.history.append(entry.clone());
        info!(
            "Predicted {} for {} {} ({})",
            format_currency(price),
            record.make(),
            record.model(),
            record.year()
        );

        Ok(Prediction { price, entry })
    }

    /// Empties history in place and returns how many entries were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        info!("Cleared {} predictions from history", removed);
        removed
    }

    pub fn export_csv(&self) -> Result<Vec<u8>, csv::Error> {
        history_to_csv(self.history.entries())
    }
}

/// Formats as US dollars with thousands separators, e.g. `$12,345.67`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
