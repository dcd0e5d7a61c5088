use elisa_plate::core::models::experiment::Experiment;
use elisa_plate::core::models::well::{ParseWellError, Well};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid experiment format for '{0}'. Expected 'SUBJECTS:TIMEPOINTS:REPLICATES' (e.g., 'M1,M2:3:2')."
    )]
    InvalidExperimentFormat(String),

    #[error("Invalid {field} '{value}' in experiment '{spec}'. Expected a positive integer.")]
    InvalidCount {
        field: &'static str,
        value: String,
        spec: String,
    },

    #[error("Invalid well '{label}': {source}")]
    InvalidWell {
        label: String,
        #[source]
        source: ParseWellError,
    },

    #[error("Invalid move '{0}'. Expected 'SRC:DST' (e.g., 'B5:A5').")]
    InvalidMoveFormat(String),

    #[error("Invalid well assignment '{0}'. Expected 'WELL=VALUE' (e.g., 'A5=Control').")]
    InvalidSetFormat(String),
}

pub fn parse_well(label: &str) -> Result<Well, ParseError> {
    label.parse().map_err(|source| ParseError::InvalidWell {
        label: label.to_string(),
        source,
    })
}

/// Parses `SUBJECTS:TIMEPOINTS:REPLICATES`; an empty subject list is allowed.
pub fn parse_experiment(spec: &str) -> Result<Experiment, ParseError> {
    let parts: Vec<&str> = spec.split(':').collect();
    let [subjects, timepoints, replicates] = parts.as_slice() else {
        return Err(ParseError::InvalidExperimentFormat(spec.to_string()));
    };

    let count = |field: &'static str, value: &str| -> Result<usize, ParseError> {
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ParseError::InvalidCount {
                field,
                value: value.to_string(),
                spec: spec.to_string(),
            }),
        }
    };

    Ok(Experiment {
        subjects: subjects
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        timepoints: count("timepoint count", *timepoints)?,
        replicates: count("replicate count", *replicates)?,
    })
}

pub fn parse_move(spec: &str) -> Result<(Well, Well), ParseError> {
    let (src, dst) = spec
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidMoveFormat(spec.to_string()))?;
    Ok((parse_well(src)?, parse_well(dst)?))
}

pub fn parse_set_well(spec: &str) -> Result<(Well, String), ParseError> {
    let (well, value) = spec
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidSetFormat(spec.to_string()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseError::InvalidSetFormat(spec.to_string()));
    }
    Ok((parse_well(well)?, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experiment_spec_parses_subjects_and_counts() {
        let exp = parse_experiment("M1, M2 ,M3:3:2").unwrap();
        assert_eq!(exp.subjects, vec!["M1", "M2", "M3"]);
        assert_eq!(exp.timepoints, 3);
        assert_eq!(exp.replicates, 2);
    }

    #[test]
    fn experiment_spec_allows_anonymous_subjects() {
        let exp = parse_experiment(":1:3").unwrap();
        assert!(exp.subjects.is_empty());
    }

    #[test]
    fn experiment_spec_rejects_wrong_shape_and_zero_counts() {
        assert_eq!(
            parse_experiment("M1:3"),
            Err(ParseError::InvalidExperimentFormat("M1:3".to_string()))
        );
        assert!(matches!(
            parse_experiment("M1:3:0"),
            Err(ParseError::InvalidCount {
                field: "replicate count",
                ..
            })
        ));
        assert!(matches!(
            parse_experiment("M1:x:2"),
            Err(ParseError::InvalidCount {
                field: "timepoint count",
                ..
            })
        ));
    }

    #[test]
    fn move_spec_parses_two_wells() {
        let (src, dst) = parse_move("B5:a5").unwrap();
        assert_eq!(src.to_string(), "B5");
        assert_eq!(dst.to_string(), "A5");
        assert!(matches!(
            parse_move("B5-A5"),
            Err(ParseError::InvalidMoveFormat(_))
        ));
        assert!(matches!(
            parse_move("B5:Z"),
            Err(ParseError::InvalidWell { .. })
        ));
    }

    #[test]
    fn set_spec_requires_a_value() {
        let (well, value) = parse_set_well("A5=Control").unwrap();
        assert_eq!(well.to_string(), "A5");
        assert_eq!(value, "Control");
        assert!(matches!(
            parse_set_well("A5="),
            Err(ParseError::InvalidSetFormat(_))
        ));
        assert!(matches!(
            parse_set_well("A5"),
            Err(ParseError::InvalidSetFormat(_))
        ));
    }
}
