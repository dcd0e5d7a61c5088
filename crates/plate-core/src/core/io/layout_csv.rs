use crate::core::models::grid::{LayoutError, PlateGrid, WellContent};
use crate::core::models::group::SampleId;
use crate::core::models::well::{RowLabel, Well};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

const STANDARD_ID_PREFIX: &str = "STD_";

#[derive(Debug, Error)]
pub enum LayoutFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid record {record}: {reason}")]
    InvalidRecord { record: usize, reason: String },
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum WellKind {
    Standard,
    Sample,
    Label,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LayoutRecord {
    #[serde(rename = "Row")]
    row: String,
    #[serde(rename = "Col")]
    col: u8,
    #[serde(rename = "Type")]
    kind: WellKind,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Replicate")]
    replicate: Option<usize>,
    #[serde(rename = "Concentration")]
    concentration: Option<f64>,
}

impl LayoutRecord {
    fn from_well(well: Well, content: &WellContent) -> Self {
        let (kind, replicate, concentration) = match content {
            WellContent::Standard { concentration } => (WellKind::Standard, None, Some(*concentration)),
            WellContent::Sample { replicate, .. } => (WellKind::Sample, Some(*replicate), None),
            WellContent::Label(_) => (WellKind::Label, None, None),
        };
        Self {
            row: well.row.to_string(),
            col: well.column,
            kind,
            id: content.to_string(),
            replicate,
            concentration,
        }
    }

    fn into_well(self, record: usize) -> Result<(Well, WellContent), LayoutFileError> {
        let invalid = |reason: String| LayoutFileError::InvalidRecord { record, reason };

        let mut row_chars = self.row.trim().chars();
        let row = match (row_chars.next(), row_chars.next()) {
            (Some(c), None) => RowLabel::from_char(c),
            _ => None,
        }
        .ok_or_else(|| invalid(format!("invalid row label '{}'", self.row)))?;
        if self.col == 0 {
            return Err(invalid("column numbers start at 1".to_string()));
        }
        let well = Well::new(row, self.col);

        let content = match self.kind {
            WellKind::Standard => {
                let concentration = match self.concentration {
                    Some(c) => c,
                    None => self
                        .id
                        .strip_prefix(STANDARD_ID_PREFIX)
                        .and_then(|s| s.parse().ok())
                        .ok_or_else(|| {
                            invalid(format!("standard at {} has no concentration", well))
                        })?,
                };
                WellContent::Standard { concentration }
            }
            WellKind::Sample => {
                let replicate = self
                    .replicate
                    .filter(|&r| r >= 1)
                    .ok_or_else(|| invalid(format!("sample at {} has no replicate index", well)))?;
                WellContent::Sample {
                    sample_id: SampleId::new(self.id),
                    replicate,
                }
            }
            WellKind::Label => WellContent::Label(self.id),
        };
        Ok((well, content))
    }
}

/// Reads and writes plate layouts as a flat CSV table.
///
/// One record per occupied well with the columns
/// `Row,Col,Type,ID,Replicate,Concentration`. Empty wells are not written.
pub struct LayoutCsv;

impl LayoutCsv {
    /// Writes every occupied well of `grid` in row-major order.
    pub fn write_to(grid: &PlateGrid, writer: impl Write) -> Result<(), LayoutFileError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (well, content) in grid.wells() {
            csv_writer.serialize(LayoutRecord::from_well(well, content))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Rebuilds a plate of the given dimensions from a layout table.
    ///
    /// The plate is created without automatic calibration; standards are taken
    /// from the file like any other well.
    pub fn read_from(
        reader: impl Read,
        rows: usize,
        columns: usize,
    ) -> Result<PlateGrid, LayoutFileError> {
        let mut grid = PlateGrid::blank(rows, columns)?;
        let mut csv_reader = csv::Reader::from_reader(reader);
        for (i, record) in csv_reader.deserialize::<LayoutRecord>().enumerate() {
            let (well, content) = record?.into_well(i + 1)?;
            grid.place(well, content)?;
        }
        Ok(grid)
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        rows: usize,
        columns: usize,
    ) -> Result<PlateGrid, LayoutFileError> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), rows, columns)
    }

    pub fn write_to_path<P: AsRef<Path>>(grid: &PlateGrid, path: P) -> Result<(), LayoutFileError> {
        let file = File::create(path)?;
        Self::write_to(grid, BufWriter::new(file))
    }
}
