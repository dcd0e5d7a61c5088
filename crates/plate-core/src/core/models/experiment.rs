use super::group::{Group, GroupError, GroupQueue, SampleId};

/// One experiment of a design: a set of subjects sampled at the same number of
/// timepoints and measured with the same number of replicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experiment {
    pub subjects: Vec<String>,
    pub timepoints: usize,
    pub replicates: usize,
}

impl Experiment {
    /// Expands the experiment into one group per subject.
    ///
    /// Sample ids are `"{subject}_t{t}"` listed from the latest timepoint down
    /// to `t0`, or the bare subject name when there is a single timepoint. An
    /// experiment without subjects gets one subject named `Exp{number}_Sample`.
    pub fn to_groups(&self, number: usize) -> Result<Vec<Group>, GroupError> {
        let fallback = [format!("Exp{}_Sample", number)];
        let subjects: &[String] = if self.subjects.is_empty() {
            &fallback
        } else {
            &self.subjects
        };
        let timepoints = self.timepoints.max(1);

        subjects
            .iter()
            .map(|subject| {
                let members = (0..timepoints).rev().map(|t| {
                    if timepoints > 1 {
                        SampleId::new(format!("{}_t{}", subject, t))
                    } else {
                        SampleId::new(subject.clone())
                    }
                });
                Group::new(members, self.replicates)
            })
            .collect()
    }
}

/// Builds the placement queue for a list of experiments, in order.
///
/// Experiments are numbered from 1 when naming anonymous subjects.
pub fn build_queue(experiments: &[Experiment]) -> Result<GroupQueue, GroupError> {
    let mut queue = GroupQueue::new();
    for (i, experiment) in experiments.iter().enumerate() {
        for group in experiment.to_groups(i + 1)? {
            queue.push_back(group);
        }
    }
    Ok(queue)
}
