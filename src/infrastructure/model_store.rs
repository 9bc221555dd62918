use crate::application::ml::pipeline::VehiclePricePipeline;
use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_MODEL_PATH: &str = "model/vehicle_price_model.json";

/// Reads and writes the trained pipeline artifact as JSON.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites any existing artifact; no backup is kept.
    pub fn save(&self, pipeline: &VehiclePricePipeline) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create model directory {:?}", parent))?;
        }

        // Write to temp file then rename so a crash never leaves a half-written model
        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)
                .with_context(|| format!("Failed to create {:?}", temp_path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, pipeline).context("Failed to serialize model")?;
            writer.flush().context("Failed to flush model file")?;
        }
        fs::rename(&temp_path, &self.path).context("Failed to rename model file")?;

        info!("Saved model to {:?}", self.path);
        Ok(())
    }

    pub fn load(&self) -> Result<VehiclePricePipeline> {
        if !self.path.exists() {
            bail!(
                "Model file not found at {:?}. Run the `train` binary first.",
                self.path
            );
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open model file {:?}", self.path))?;
        let pipeline: VehiclePricePipeline = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to deserialize model from {:?}", self.path))?;

        info!("Successfully loaded model from {:?}", self.path);
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("vehicle-price-store-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_artifact_is_an_error() {
        let store = ModelStore::new(temp_path("absent.json"));
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_corrupt_artifact_is_an_error() {
        let path = temp_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{not json").unwrap();

        let err = ModelStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize"));
        let _ = fs::remove_file(path);
    }
}
