use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest number of rows a plate can address with single-letter labels.
pub const MAX_ROWS: usize = 26;

/// An ordinal row label (`A`, `B`, ...) stored as a zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowLabel(u8);

impl RowLabel {
    /// Creates a row label from a zero-based index, or `None` past `Z`.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MAX_ROWS).then_some(Self(index as u8))
    }

    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper
            .is_ascii_uppercase()
            .then(|| Self(upper as u8 - b'A'))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseWellError {
    #[error("Well label is empty")]
    Empty,
    #[error("Invalid row letter '{0}' (expected A-Z)")]
    InvalidRow(char),
    #[error("Invalid column number '{0}' (expected a positive integer)")]
    InvalidColumn(String),
}

/// One addressable location on a plate: a row label and a 1-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Well {
    pub row: RowLabel,
    pub column: u8,
}

impl Well {
    pub fn new(row: RowLabel, column: u8) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for Well {
    type Err = ParseWellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let first = chars.next().ok_or(ParseWellError::Empty)?;
        let row = RowLabel::from_char(first).ok_or(ParseWellError::InvalidRow(first))?;

        let column_str = chars.as_str();
        let column: u8 = column_str
            .parse()
            .map_err(|_| ParseWellError::InvalidColumn(column_str.to_string()))?;
        if column == 0 {
            return Err(ParseWellError::InvalidColumn(column_str.to_string()));
        }

        Ok(Self { row, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(c: char) -> RowLabel {
        RowLabel::from_char(c).unwrap()
    }

    #[test]
    fn row_label_round_trips_through_index_and_char() {
        let label = RowLabel::from_index(7).unwrap();
        assert_eq!(label.as_char(), 'H');
        assert_eq!(label.index(), 7);
        assert_eq!(RowLabel::from_char('h'), Some(label));
    }

    #[test]
    fn row_label_rejects_out_of_range_values() {
        assert!(RowLabel::from_index(MAX_ROWS).is_none());
        assert!(RowLabel::from_char('1').is_none());
    }

    #[test]
    fn well_displays_as_row_letter_followed_by_column() {
        assert_eq!(Well::new(row('B'), 5).to_string(), "B5");
        assert_eq!(Well::new(row('A'), 12).to_string(), "A12");
    }

    #[test]
    fn well_parses_case_insensitively() {
        assert_eq!("b5".parse::<Well>().unwrap(), Well::new(row('B'), 5));
        assert_eq!(" H12 ".parse::<Well>().unwrap(), Well::new(row('H'), 12));
    }

    #[test]
    fn well_parse_reports_specific_errors() {
        assert_eq!("".parse::<Well>(), Err(ParseWellError::Empty));
        assert_eq!("?3".parse::<Well>(), Err(ParseWellError::InvalidRow('?')));
        assert_eq!(
            "A0".parse::<Well>(),
            Err(ParseWellError::InvalidColumn("0".to_string()))
        );
        assert_eq!(
            "Ax".parse::<Well>(),
            Err(ParseWellError::InvalidColumn("x".to_string()))
        );
    }

    #[test]
    fn wells_order_row_major() {
        let mut wells = vec![
            Well::new(row('B'), 1),
            Well::new(row('A'), 3),
            Well::new(row('A'), 2),
        ];
        wells.sort();
        let labels: Vec<String> = wells.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["A2", "A3", "B1"]);
    }
}
