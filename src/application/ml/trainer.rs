use crate::application::ml::metrics::RegressionMetrics;
use crate::application::ml::pipeline::{ForestParams, VehiclePricePipeline};
use crate::application::ml::preprocessing::ColumnSpec;
use crate::domain::errors::{DatasetError, PipelineError, TrainingError};
use crate::domain::ml::feature_registry::{
    AGE_COLUMN, FeatureRow, FeatureValue, TARGET_COLUMN, VEHICLE_FEATURES, YEAR_COLUMN,
};
use crate::infrastructure::dataset_loader::LabelledDataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerConfig {
    pub test_size: f64,
    pub split_seed: u64,
    pub forest: ForestParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            split_seed: 42,
            forest: ForestParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub labelled_rows: usize,
    pub dropped_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub features: Vec<String>,
    /// Newest year in the dataset, used as the age reference during training.
    pub reference_year: Option<f64>,
    pub metrics: Option<RegressionMetrics>,
}

#[derive(Debug)]
pub struct TrainingOutcome {
    pub pipeline: VehiclePricePipeline,
    pub report: TrainingReport,
}

/// Adds `age = max(year) - year` to every row and returns the max year used.
///
/// Rows with a missing year get a missing age. Returns `None` when the
/// dataset has no year column or no observed year.
pub fn derive_age(rows: &mut [FeatureRow]) -> Option<f64> {
    let max_year = rows
        .iter()
        .filter_map(|row| match row.get(YEAR_COLUMN) {
            FeatureValue::Number(y) if !y.is_nan() => Some(*y),
            _ => None,
        })
        .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |m| m.max(y))))?;

    for row in rows.iter_mut() {
        let age = match row.get(YEAR_COLUMN) {
            FeatureValue::Number(y) if !y.is_nan() => FeatureValue::Number(max_year - y),
            _ => FeatureValue::Missing,
        };
        row.insert(AGE_COLUMN, age);
    }

    Some(max_year)
}

/// Shuffled index split with a fixed seed.
///
/// The test share is rounded up, but at least one row always stays in the
/// training split.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * test_size).ceil() as usize;
    let n_test = n_test.min(n.saturating_sub(1));
    let test = indices.split_off(n - n_test);
    (indices, test)
}

/// Selects schema columns present in the dataset, derives age, splits,
/// fits the pipeline and scores it on the held-out rows.
pub fn train(
    mut dataset: LabelledDataset,
    config: &TrainerConfig,
) -> Result<TrainingOutcome, TrainingError> {
    if !(0.0..1.0).contains(&config.test_size) {
        return Err(TrainingError::InvalidTestSize(config.test_size));
    }
    if dataset.is_empty() {
        return Err(DatasetError::NoLabelledRows {
            column: TARGET_COLUMN.to_string(),
        }
        .into());
    }

    let reference_year = if dataset.present_features.contains(&YEAR_COLUMN) {
        derive_age(&mut dataset.rows)
    } else {
        None
    };

    let columns: Vec<ColumnSpec> = VEHICLE_FEATURES
        .iter()
        .filter(|f| {
            dataset.present_features.contains(&f.name)
                || (f.name == AGE_COLUMN && dataset.present_features.contains(&YEAR_COLUMN))
        })
        .map(|f| ColumnSpec::new(f.name, f.kind))
        .collect();
    if columns.is_empty() {
        return Err(DatasetError::NoFeatures.into());
    }

    let (train_idx, test_idx) =
        train_test_split(dataset.len(), config.test_size, config.split_seed);
    info!(
        "Train rows: {}, test rows: {}, features: {}",
        train_idx.len(),
        test_idx.len(),
        columns.len()
    );

    let select = |idx: &[usize]| -> (Vec<FeatureRow>, Vec<f64>) {
        idx.iter()
            .map(|&i| (dataset.rows[i].clone(), dataset.targets[i]))
            .unzip()
    };
    let (x_train, y_train) = select(&train_idx);
    let (x_test, y_test) = select(&test_idx);

    info!(
        "Training Random Forest Regressor (Trees: {}, Depth: {:?}, MinSplit: {})...",
        config.forest.n_trees, config.forest.max_depth, config.forest.min_samples_split
    );
    let pipeline = VehiclePricePipeline::fit(columns.clone(), &x_train, &y_train, config.forest)?;

    let metrics = if x_test.is_empty() {
        warn!("No held-out rows; skipping evaluation");
        None
    } else {
        let predictions = pipeline.predict(&x_test).map_err(PipelineError::from)?;
        RegressionMetrics::evaluate(&predictions, &y_test)
    };

    Ok(TrainingOutcome {
        pipeline,
        report: TrainingReport {
            labelled_rows: dataset.len(),
            dropped_rows: dataset.dropped,
            train_rows: train_idx.len(),
            test_rows: test_idx.len(),
            features: columns.into_iter().map(|c| c.name).collect(),
            reference_year,
            metrics,
        },
    })
}
