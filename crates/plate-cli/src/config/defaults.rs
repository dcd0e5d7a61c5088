use elisa_plate::engine::config::DEFAULT_STANDARDS;

pub struct DefaultsConfig {
    pub rows: usize,
    pub columns: usize,
    pub calibration_columns: usize,
    pub standards: Vec<f64>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 12,
            calibration_columns: 1,
            standards: DEFAULT_STANDARDS.to_vec(),
        }
    }
}
