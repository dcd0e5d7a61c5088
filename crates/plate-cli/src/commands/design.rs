use crate::cli::DesignArgs;
use crate::config::builder::build_config;
use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use elisa_plate::{
    core::io::layout_csv::LayoutCsv,
    engine::progress::ProgressReporter,
    workflows::overflow::{self, PlateOutcome},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn run(args: DesignArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from design file and CLI arguments...");
    let config = build_config(&args)?;
    debug!("Final plate configuration: {:?}", config.design.plate);

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Laying out samples...");
    let written = execute(&config, &reporter)?;

    for (outcome, path) in &written {
        if !args.no_preview {
            println!("\nPlate {}:", outcome.plate_number);
            print!("{}", outcome.grid.render_text());
        }
        println!(
            "✓ Plate {} ({} sample wells) written to: {}",
            outcome.plate_number,
            outcome.result.assignments.len(),
            path.display()
        );
    }
    println!("Design complete: {} plate(s).", written.len());

    Ok(())
}

/// Runs the overflow workflow and writes one layout file per plate into the
/// configured output directory.
pub fn execute(
    config: &AppConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<(PlateOutcome, PathBuf)>> {
    std::fs::create_dir_all(&config.output_dir)?;

    let plates = overflow::run_with_config(&config.design, reporter)?;
    info!("Workflow finished with {} plate(s).", plates.len());

    plates
        .into_iter()
        .map(|outcome| {
            let path = output_path(&config.output_dir, outcome.plate_number);
            info!("Writing plate {} to {:?}", outcome.plate_number, &path);
            LayoutCsv::write_to_path(&outcome.grid, &path)
                .map_err(|e| CliError::layout_file(&path, e))?;
            Ok((outcome, path))
        })
        .collect()
}

fn output_path(dir: &Path, plate_number: usize) -> PathBuf {
    dir.join(format!("plate_layout_p{}.csv", plate_number))
}
