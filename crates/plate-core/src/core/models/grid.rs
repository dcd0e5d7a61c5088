use super::assignment::PlacementResult;
use super::group::SampleId;
use super::well::{MAX_ROWS, RowLabel, Well};
use std::fmt;
use thiserror::Error;

const MAX_COLUMNS: usize = u8::MAX as usize;
const MAX_RENDERED_CELL_WIDTH: usize = 10;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LayoutError {
    #[error("A plate must have at least one row")]
    NoRows,
    #[error("A plate supports at most {max} rows, got {rows}")]
    TooManyRows { rows: usize, max: usize },
    #[error("A plate must have between 1 and {max} columns, got {columns}")]
    InvalidColumnCount { columns: usize, max: usize },
    #[error(
        "Calibration occupies {calibration_columns} column(s), leaving no sample columns on a {columns}-column plate"
    )]
    CalibrationTooWide {
        calibration_columns: usize,
        columns: usize,
    },
    #[error("Standards were supplied but no calibration column is reserved")]
    NoCalibrationColumn,
    #[error("Expected one standard per row ({rows}), got {standards}")]
    StandardsMismatch { standards: usize, rows: usize },
    #[error("Well {well} is outside the {rows}x{columns} plate")]
    WellOutOfBounds {
        well: Well,
        rows: usize,
        columns: usize,
    },
    #[error("Well {0} is empty")]
    EmptyWell(Well),
}

/// The value held by an occupied well.
#[derive(Debug, Clone, PartialEq)]
pub enum WellContent {
    Standard { concentration: f64 },
    Sample { sample_id: SampleId, replicate: usize },
    Label(String),
}

impl fmt::Display for WellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WellContent::Standard { concentration } => write!(f, "STD_{}", concentration),
            WellContent::Sample { sample_id, .. } => write!(f, "{}", sample_id),
            WellContent::Label(text) => f.write_str(text),
        }
    }
}

/// A known-concentration standard bound to a calibration well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationAssignment {
    pub well: Well,
    pub concentration: f64,
}

/// The addressable space of one assay plate.
///
/// Columns `1..=calibration_columns` are reserved for the standard curve; every
/// other well is a slot available for samples. Wells are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGrid {
    rows: usize,
    columns: usize,
    calibration_columns: usize,
    wells: Vec<Option<WellContent>>,
    calibration: Vec<CalibrationAssignment>,
}

impl PlateGrid {
    /// Builds a plate and lays out its calibration standards.
    ///
    /// Standards are placed one value per row in reverse order of `standards`:
    /// the first row receives the last (highest) concentration and the last row
    /// receives the first. Every calibration column of a row carries the same
    /// value. An empty `standards` slice skips calibration; the calibration
    /// columns stay reserved.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the geometry is invalid or the number of
    /// standards does not match the number of rows.
    pub fn build(
        rows: usize,
        columns: usize,
        calibration_columns: usize,
        standards: &[f64],
    ) -> Result<Self, LayoutError> {
        if rows == 0 {
            return Err(LayoutError::NoRows);
        }
        if rows > MAX_ROWS {
            return Err(LayoutError::TooManyRows {
                rows,
                max: MAX_ROWS,
            });
        }
        if columns == 0 || columns > MAX_COLUMNS {
            return Err(LayoutError::InvalidColumnCount {
                columns,
                max: MAX_COLUMNS,
            });
        }
        if calibration_columns >= columns {
            return Err(LayoutError::CalibrationTooWide {
                calibration_columns,
                columns,
            });
        }
        if !standards.is_empty() {
            if calibration_columns == 0 {
                return Err(LayoutError::NoCalibrationColumn);
            }
            if standards.len() != rows {
                return Err(LayoutError::StandardsMismatch {
                    standards: standards.len(),
                    rows,
                });
            }
        }

        let mut grid = Self {
            rows,
            columns,
            calibration_columns,
            wells: vec![None; rows * columns],
            calibration: Vec::with_capacity(standards.len() * calibration_columns),
        };

        if !standards.is_empty() {
            for row in grid.row_labels() {
                let concentration = standards[rows - 1 - row.index()];
                for column in 1..=calibration_columns {
                    let well = Well::new(row, column as u8);
                    grid.calibration.push(CalibrationAssignment {
                        well,
                        concentration,
                    });
                    grid.place(well, WellContent::Standard { concentration })?;
                }
            }
        }

        Ok(grid)
    }

    /// Creates a plate with no reserved columns and no standards, ready to be
    /// populated from a saved layout.
    pub fn blank(rows: usize, columns: usize) -> Result<Self, LayoutError> {
        Self::build(rows, columns, 0, &[])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn calibration_columns(&self) -> usize {
        self.calibration_columns
    }

    pub fn first_sample_column(&self) -> usize {
        self.calibration_columns + 1
    }

    pub fn calibration(&self) -> &[CalibrationAssignment] {
        &self.calibration
    }

    pub fn row_labels(&self) -> impl Iterator<Item = RowLabel> + use<> {
        (0..self.rows).filter_map(RowLabel::from_index)
    }

    pub fn contains(&self, well: Well) -> bool {
        well.row.index() < self.rows && well.column >= 1 && (well.column as usize) <= self.columns
    }

    /// The slots available for samples, in canonical order: rows top to bottom,
    /// and within a row, columns left to right from `start_column`. Columns in
    /// the calibration region are never returned.
    pub fn available_slots(&self, start_column: usize) -> Vec<Well> {
        let first = start_column.max(self.first_sample_column());
        self.row_labels()
            .flat_map(|row| (first..=self.columns).map(move |c| Well::new(row, c as u8)))
            .collect()
    }

    pub fn sample_slots(&self) -> Vec<Well> {
        self.available_slots(self.first_sample_column())
    }

    /// Slots per row when filling from `start_column`.
    pub fn row_capacity(&self, start_column: usize) -> usize {
        let first = start_column.max(self.first_sample_column());
        (self.columns + 1).saturating_sub(first)
    }

    pub fn get(&self, well: Well) -> Option<&WellContent> {
        self.index_of(well).ok().and_then(|i| self.wells[i].as_ref())
    }

    pub fn place(&mut self, well: Well, content: WellContent) -> Result<(), LayoutError> {
        let index = self.index_of(well)?;
        self.wells[index] = Some(content);
        Ok(())
    }

    /// Empties a well, returning what it held.
    pub fn clear(&mut self, well: Well) -> Result<Option<WellContent>, LayoutError> {
        let index = self.index_of(well)?;
        Ok(self.wells[index].take())
    }

    /// Moves the content of `from` into `to`, overwriting whatever `to` held.
    pub fn move_well(&mut self, from: Well, to: Well) -> Result<(), LayoutError> {
        let to_index = self.index_of(to)?;
        let content = self.clear(from)?.ok_or(LayoutError::EmptyWell(from))?;
        self.wells[to_index] = Some(content);
        Ok(())
    }

    /// Writes every assignment of `result` into the plate.
    pub fn apply(&mut self, result: &PlacementResult) -> Result<(), LayoutError> {
        for assignment in &result.assignments {
            self.place(
                assignment.well,
                WellContent::Sample {
                    sample_id: assignment.sample_id.clone(),
                    replicate: assignment.replicate,
                },
            )?;
        }
        Ok(())
    }

    /// Occupied wells in row-major order.
    pub fn wells(&self) -> impl Iterator<Item = (Well, &WellContent)> {
        self.wells.iter().enumerate().filter_map(|(i, content)| {
            let content = content.as_ref()?;
            let row = RowLabel::from_index(i / self.columns)?;
            Some((Well::new(row, (i % self.columns + 1) as u8), content))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.wells.iter().filter(|w| w.is_some()).count()
    }

    /// Number of sample wells in `row`.
    pub fn samples_in_row(&self, row: RowLabel) -> usize {
        self.wells()
            .filter(|(well, content)| {
                well.row == row && matches!(content, WellContent::Sample { .. })
            })
            .count()
    }

    /// Renders the plate as a fixed-width text table with `.` for empty wells.
    pub fn render_text(&self) -> String {
        let cells: Vec<String> = self
            .wells
            .iter()
            .map(|w| match w {
                Some(content) => truncate_cell(&content.to_string()),
                None => ".".to_string(),
            })
            .collect();
        let width = cells
            .iter()
            .map(|c| c.chars().count())
            .chain(std::iter::once(self.columns.to_string().len()))
            .max()
            .unwrap_or(1);

        let mut out = String::from("  ");
        for column in 1..=self.columns {
            out.push_str(&format!(" {:>width$}", column, width = width));
        }
        out.push('\n');
        for row in self.row_labels() {
            out.push_str(&format!("{} ", row));
            let start = row.index() * self.columns;
            for cell in &cells[start..start + self.columns] {
                out.push_str(&format!(" {:>width$}", cell, width = width));
            }
            out.push('\n');
        }
        out
    }

    fn index_of(&self, well: Well) -> Result<usize, LayoutError> {
        if !self.contains(well) {
            return Err(LayoutError::WellOutOfBounds {
                well,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(well.row.index() * self.columns + (well.column as usize - 1))
    }
}

fn truncate_cell(text: &str) -> String {
    if text.chars().count() > MAX_RENDERED_CELL_WIDTH {
        let head: String = text.chars().take(MAX_RENDERED_CELL_WIDTH - 2).collect();
        format!("{}..", head)
    } else {
        text.to_string()
    }
}
