use super::group::{Group, SampleId};
use super::well::{RowLabel, Well};

/// One replicate of one sample bound to a well. Replicates are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub sample_id: SampleId,
    pub well: Well,
    pub replicate: usize,
}

/// The output of a single scheduler run over one plate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementResult {
    pub assignments: Vec<Assignment>,
    pub leftovers: Vec<Group>,
}

impl PlacementResult {
    pub fn is_complete(&self) -> bool {
        self.leftovers.is_empty()
    }

    /// Distinct samples placed, in placement order.
    pub fn placed_samples(&self) -> Vec<&SampleId> {
        let mut seen = Vec::new();
        for assignment in &self.assignments {
            if seen.last() != Some(&&assignment.sample_id) {
                seen.push(&assignment.sample_id);
            }
        }
        seen
    }

    pub fn leftover_samples(&self) -> impl Iterator<Item = &SampleId> {
        self.leftovers.iter().flat_map(|g| g.members().iter())
    }

    /// Number of wells assigned in `row`.
    pub fn wells_in_row(&self, row: RowLabel) -> usize {
        self.assignments.iter().filter(|a| a.well.row == row).count()
    }

    pub fn wells_for<'a>(&'a self, sample_id: &'a SampleId) -> impl Iterator<Item = &'a Assignment> {
        self.assignments
            .iter()
            .filter(move |a| &a.sample_id == sample_id)
    }
}
