use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::DesignArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use elisa_plate::core::models::experiment::Experiment;
use elisa_plate::engine::config as core_config;

pub fn build_config(args: &DesignArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let plate_file = file_config.plate.take().unwrap_or_default();
    let rows = args.rows.or(plate_file.rows).unwrap_or(defaults.rows);
    let columns = args.columns.or(plate_file.columns).unwrap_or(defaults.columns);
    let calibration_columns = args
        .calibration_columns
        .or(plate_file.calibration_columns)
        .unwrap_or(defaults.calibration_columns);
    let standards = if args.no_standards {
        Vec::new()
    } else {
        plate_file.standards.unwrap_or(defaults.standards)
    };

    let mut experiments: Vec<Experiment> = file_config
        .experiments
        .into_iter()
        .map(Into::into)
        .collect();
    for spec in &args.experiments {
        experiments.push(parser::parse_experiment(spec).map_err(|e| CliError::Argument(e.to_string()))?);
    }

    let mut builder = core_config::DesignConfigBuilder::new()
        .rows(rows)
        .columns(columns)
        .calibration_columns(calibration_columns)
        .standards(standards)
        .experiments(experiments);
    if let Some(start_column) = plate_file.start_column {
        builder = builder.start_column(start_column);
    }
    let design = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        output_dir: args.output.clone(),
        design,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let value: usize = value_str.trim().parse().map_err(|_| {
            CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
        })?;

        let plate = config.plate.get_or_insert_with(Default::default);
        match key.trim() {
            "plate.rows" => plate.rows = Some(value),
            "plate.columns" => plate.columns = Some(value),
            "plate.calibration-columns" => plate.calibration_columns = Some(value),
            "plate.start-column" => plate.start_column = Some(value),
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
