//! Column-wise preprocessing fitted on the training split.
//!
//! Numeric columns are median-imputed then standardized. Categorical columns
//! are filled with [`MISSING_CATEGORY`] then one-hot encoded against the
//! sorted set of categories seen during fit. Output layout is every numeric
//! column in schema order, followed by the one-hot blocks in schema order.

use crate::domain::errors::{PipelineError, PredictionError};
use crate::domain::ml::feature_registry::{FeatureKind, FeatureRow, FeatureValue};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

/// Placeholder category for missing categorical values.
pub const MISSING_CATEGORY: &str = "missing";

/// A feature column as seen at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: FeatureKind,
}

impl ColumnSpec {
    pub fn new(name: &str, kind: FeatureKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    pub median: f64,
    pub mean: f64,
    pub scale: f64,
}

impl NumericColumn {
    fn fit(name: &str, values: &[Option<f64>]) -> Self {
        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        // A column with no observed values imputes to zero.
        let median = if observed.is_empty() {
            0.0
        } else {
            Data::new(observed).median()
        };

        let imputed: Vec<f64> = values.iter().map(|v| v.unwrap_or(median)).collect();
        let mean = imputed.iter().mean();
        let std = imputed.iter().population_std_dev();
        let scale = if std.is_finite() && std > 0.0 { std } else { 1.0 };

        Self {
            name: name.to_string(),
            median,
            mean,
            scale,
        }
    }

    pub fn transform(&self, value: Option<f64>) -> f64 {
        (value.unwrap_or(self.median) - self.mean) / self.scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    /// Sorted, deduplicated.
    pub categories: Vec<String>,
}

impl CategoricalColumn {
    fn fit(name: &str, values: &[Option<String>]) -> Self {
        let mut categories: Vec<String> = values
            .iter()
            .map(|v| v.clone().unwrap_or_else(|| MISSING_CATEGORY.to_string()))
            .collect();
        categories.sort();
        categories.dedup();

        Self {
            name: name.to_string(),
            categories,
        }
    }

    /// Appends the one-hot block for `value`; unknown categories leave it all zero.
    pub fn encode_into(&self, value: Option<&str>, out: &mut Vec<f64>) {
        let start = out.len();
        out.resize(start + self.categories.len(), 0.0);

        let key = value.unwrap_or(MISSING_CATEGORY);
        if let Ok(idx) = self.categories.binary_search_by(|c| c.as_str().cmp(key)) {
            out[start + idx] = 1.0;
        }
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }
}

/// Fitted column transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
}

impl Preprocessor {
    pub fn fit(columns: &[ColumnSpec], rows: &[FeatureRow]) -> Result<Self, PipelineError> {
        if columns.is_empty() {
            return Err(PipelineError::NoFeatures);
        }
        if rows.is_empty() {
            return Err(PipelineError::EmptyData {
                stage: "preprocessor",
            });
        }

        let mut numeric = Vec::new();
        let mut categorical = Vec::new();

        for column in columns {
            match column.kind {
                FeatureKind::Numeric => {
                    let values = rows
                        .iter()
                        .map(|row| numeric_value(&column.name, row.get(&column.name)))
                        .collect::<Result<Vec<_>, _>>()?;
                    numeric.push(NumericColumn::fit(&column.name, &values));
                }
                FeatureKind::Categorical => {
                    let values: Vec<Option<String>> = rows
                        .iter()
                        .map(|row| categorical_value(row.get(&column.name)))
                        .collect();
                    categorical.push(CategoricalColumn::fit(&column.name, &values));
                }
            }
        }

        Ok(Self {
            numeric,
            categorical,
        })
    }

    /// Transforms one row, looking every column up by name.
    pub fn transform_row(&self, row: &FeatureRow) -> Result<Vec<f64>, PredictionError> {
        let mut out = Vec::with_capacity(self.n_features_out());

        for column in &self.numeric {
            let value = numeric_value(&column.name, row.get(&column.name))?;
            out.push(column.transform(value));
        }

        for column in &self.categorical {
            let value = categorical_value(row.get(&column.name));
            column.encode_into(value.as_deref(), &mut out);
        }

        Ok(out)
    }

    pub fn transform(&self, rows: &[FeatureRow]) -> Result<Vec<Vec<f64>>, PredictionError> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    pub fn n_features_out(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.width()).sum::<usize>()
    }
}

fn numeric_value(column: &str, value: &FeatureValue) -> Result<Option<f64>, PredictionError> {
    match value {
        FeatureValue::Number(n) if n.is_nan() => Ok(None),
        FeatureValue::Number(n) => Ok(Some(*n)),
        FeatureValue::Missing => Ok(None),
        FeatureValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| PredictionError::NotNumeric {
                column: column.to_string(),
                value: s.clone(),
            }),
    }
}

fn categorical_value(value: &FeatureValue) -> Option<String> {
    match value {
        FeatureValue::Text(s) => Some(s.clone()),
        FeatureValue::Number(n) => Some(n.to_string()),
        FeatureValue::Missing => None,
    }
}
