use elisa_plate::engine::config::DesignConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub output_dir: PathBuf,
    pub design: DesignConfig,
}
