use crate::error::{CliError, Result};
use elisa_plate::core::models::experiment::Experiment;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlateConfig {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub calibration_columns: Option<usize>,
    pub standards: Option<Vec<f64>>,
    pub start_column: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileExperiment {
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default = "default_timepoints")]
    pub timepoints: usize,
    pub replicates: usize,
}

fn default_timepoints() -> usize {
    1
}

impl From<FileExperiment> for Experiment {
    fn from(p: FileExperiment) -> Self {
        Self {
            subjects: p.subjects,
            timepoints: p.timepoints,
            replicates: p.replicates,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub plate: Option<FilePlateConfig>,
    #[serde(default)]
    pub experiments: Vec<FileExperiment>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading design from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
