use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use elisa_plate::core::io::layout_csv::LayoutCsv;
use tracing::info;

pub fn run(args: ShowArgs) -> Result<()> {
    info!("Loading layout from {:?}", &args.input);
    let grid = LayoutCsv::read_from_path(
        &args.input,
        args.dimensions.rows,
        args.dimensions.columns,
    )
    .map_err(|e| CliError::layout_file(&args.input, e))?;

    println!("{}", args.input.display());
    print!("{}", grid.render_text());
    println!("{} occupied well(s).", grid.occupied_count());
    Ok(())
}
