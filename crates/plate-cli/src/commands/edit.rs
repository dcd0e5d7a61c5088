use crate::cli::EditArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use elisa_plate::core::io::layout_csv::LayoutCsv;
use elisa_plate::core::models::grid::{PlateGrid, WellContent};
use elisa_plate::core::models::well::Well;
use tracing::{debug, info};

/// Manual edits parsed from the command line.
#[derive(Debug, Default)]
struct EditPlan {
    moves: Vec<(Well, Well)>,
    clears: Vec<Well>,
    sets: Vec<(Well, String)>,
}

impl EditPlan {
    fn from_args(args: &EditArgs) -> Result<Self> {
        let argument = |e: parser::ParseError| CliError::Argument(e.to_string());
        Ok(Self {
            moves: args
                .moves
                .iter()
                .map(|s| parser::parse_move(s).map_err(argument))
                .collect::<Result<_>>()?,
            clears: args
                .clears
                .iter()
                .map(|s| parser::parse_well(s).map_err(argument))
                .collect::<Result<_>>()?,
            sets: args
                .set_wells
                .iter()
                .map(|s| parser::parse_set_well(s).map_err(argument))
                .collect::<Result<_>>()?,
        })
    }

    fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.clears.is_empty() && self.sets.is_empty()
    }

    /// Applies moves, then clears, then sets.
    fn apply(self, grid: &mut PlateGrid) -> Result<()> {
        for (from, to) in self.moves {
            debug!("Moving {} -> {}", from, to);
            grid.move_well(from, to)?;
        }
        for well in self.clears {
            debug!("Clearing {}", well);
            grid.clear(well)?;
        }
        for (well, value) in self.sets {
            debug!("Setting {} = {}", well, value);
            grid.place(well, WellContent::Label(value))?;
        }
        Ok(())
    }
}

pub fn run(args: EditArgs) -> Result<()> {
    let plan = EditPlan::from_args(&args)?;
    if plan.is_empty() {
        return Err(CliError::Argument(
            "No edits given. Use --move, --clear or --set-well.".to_string(),
        ));
    }

    info!("Loading layout from {:?}", &args.input);
    let mut grid = LayoutCsv::read_from_path(
        &args.input,
        args.dimensions.rows,
        args.dimensions.columns,
    )
    .map_err(|e| CliError::layout_file(&args.input, e))?;

    plan.apply(&mut grid)?;

    let output = args.output.as_ref().unwrap_or(&args.input);
    info!("Writing edited layout to {:?}", output);
    LayoutCsv::write_to_path(&grid, output).map_err(|e| CliError::layout_file(output, e))?;

    print!("{}", grid.render_text());
    println!("✓ Edited layout written to: {}", output.display());
    Ok(())
}
