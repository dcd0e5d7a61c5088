use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::grid::LayoutError;
use crate::core::models::group::GroupError;

/// A group that no row of the plate is wide enough to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplaceableGroup {
    pub first_member: String,
    pub members: usize,
    pub replicate_count: usize,
    pub row_capacity: usize,
}

impl std::fmt::Display for UnplaceableGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' ({} sample(s), {} replicates > {} slots per row)",
            self.first_member, self.members, self.replicate_count, self.row_capacity
        )
    }
}

fn describe(groups: &[UnplaceableGroup]) -> String {
    groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid plate configuration: {source}")]
    Configuration {
        #[from]
        source: LayoutError,
    },

    #[error("Invalid sample group: {source}")]
    InvalidGroup {
        #[from]
        source: GroupError,
    },

    #[error("Invalid design configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(
        "Plate {plate} placed no samples; {} group(s) can never fit: {}",
        .groups.len(),
        describe(.groups)
    )]
    Starvation {
        plate: usize,
        groups: Vec<UnplaceableGroup>,
    },
}
