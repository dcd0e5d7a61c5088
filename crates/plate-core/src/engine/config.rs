use crate::core::models::experiment::Experiment;
use crate::core::models::grid::{LayoutError, PlateGrid};
use thiserror::Error;

/// The eight-point standard curve used by default, lowest concentration first.
pub const DEFAULT_STANDARDS: [f64; 8] = [0.0, 0.1, 0.2, 0.4, 0.8, 1.6, 3.2, 6.4];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Design must contain at least one experiment")]
    NoExperiments,
}

/// Geometry and calibration of one plate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateConfig {
    pub rows: usize,
    pub columns: usize,
    pub calibration_columns: usize,
    pub standards: Vec<f64>,
    /// First column samples may occupy. `None` starts right after calibration.
    pub start_column: Option<usize>,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 12,
            calibration_columns: 1,
            standards: DEFAULT_STANDARDS.to_vec(),
            start_column: None,
        }
    }
}

impl PlateConfig {
    /// Builds a fresh grid with this configuration's calibration layout.
    pub fn build_grid(&self) -> Result<PlateGrid, LayoutError> {
        PlateGrid::build(
            self.rows,
            self.columns,
            self.calibration_columns,
            &self.standards,
        )
    }

    pub fn start_column(&self) -> usize {
        self.start_column
            .unwrap_or(self.calibration_columns + 1)
            .max(self.calibration_columns + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    pub plate: PlateConfig,
    pub experiments: Vec<Experiment>,
}

#[derive(Default)]
pub struct DesignConfigBuilder {
    rows: Option<usize>,
    columns: Option<usize>,
    calibration_columns: Option<usize>,
    standards: Option<Vec<f64>>,
    start_column: Option<usize>,
    experiments: Vec<Experiment>,
}

impl DesignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }
    pub fn calibration_columns(mut self, count: usize) -> Self {
        self.calibration_columns = Some(count);
        self
    }
    pub fn standards(mut self, standards: Vec<f64>) -> Self {
        self.standards = Some(standards);
        self
    }
    pub fn start_column(mut self, column: usize) -> Self {
        self.start_column = Some(column);
        self
    }
    pub fn experiment(mut self, experiment: Experiment) -> Self {
        self.experiments.push(experiment);
        self
    }
    pub fn experiments(mut self, experiments: impl IntoIterator<Item = Experiment>) -> Self {
        self.experiments.extend(experiments);
        self
    }

    pub fn build(self) -> Result<DesignConfig, ConfigError> {
        let plate = PlateConfig {
            rows: self.rows.ok_or(ConfigError::MissingParameter("rows"))?,
            columns: self.columns.ok_or(ConfigError::MissingParameter("columns"))?,
            calibration_columns: self
                .calibration_columns
                .ok_or(ConfigError::MissingParameter("calibration_columns"))?,
            standards: self
                .standards
                .ok_or(ConfigError::MissingParameter("standards"))?,
            start_column: self.start_column,
        };
        if self.experiments.is_empty() {
            return Err(ConfigError::NoExperiments);
        }
        Ok(DesignConfig {
            plate,
            experiments: self.experiments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experiment() -> Experiment {
        Experiment {
            subjects: vec!["M1".into()],
            timepoints: 2,
            replicates: 2,
        }
    }

    #[test]
    fn builder_reports_the_first_missing_parameter() {
        let err = DesignConfigBuilder::new()
            .rows(8)
            .experiment(experiment())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("columns"));
    }

    #[test]
    fn builder_requires_an_experiment() {
        let err = DesignConfigBuilder::new()
            .rows(8)
            .columns(12)
            .calibration_columns(1)
            .standards(vec![])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NoExperiments);
    }

    #[test]
    fn builder_assembles_a_complete_design() {
        let config = DesignConfigBuilder::new()
            .rows(8)
            .columns(12)
            .calibration_columns(1)
            .standards(DEFAULT_STANDARDS.to_vec())
            .experiments([experiment(), experiment()])
            .build()
            .unwrap();
        assert_eq!(config.plate, PlateConfig::default());
        assert_eq!(config.experiments.len(), 2);
    }

    #[test]
    fn start_column_never_falls_inside_calibration() {
        let mut plate = PlateConfig::default();
        assert_eq!(plate.start_column(), 2);
        plate.start_column = Some(1);
        assert_eq!(plate.start_column(), 2);
        plate.start_column = Some(5);
        assert_eq!(plate.start_column(), 5);
    }

    #[test]
    fn default_plate_builds_a_calibrated_grid() {
        let grid = PlateConfig::default().build_grid().unwrap();
        assert_eq!(grid.calibration().len(), 8);
        assert_eq!(grid.row_capacity(2), 11);
    }
}
