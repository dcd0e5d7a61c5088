use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Opaque identifier of one biological sample (typically one subject at one timepoint).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleId(String);

impl SampleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SampleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SampleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GroupError {
    #[error("Replicate count must be at least 1 (group starting with '{first_member}')")]
    ZeroReplicates { first_member: String },
    #[error("A sample group must contain at least one member")]
    Empty,
}

/// An ordered run of samples from one subject that share a replicate count.
///
/// Groups are placed as a unit. The scheduler may split a group between
/// members, but a single member's replicates are never separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<SampleId>,
    replicate_count: usize,
}

impl Group {
    /// Creates a validated group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Empty`] for an empty member list and
    /// [`GroupError::ZeroReplicates`] when `replicate_count` is zero.
    pub fn new<I, S>(members: I, replicate_count: usize) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SampleId>,
    {
        let members: Vec<SampleId> = members.into_iter().map(Into::into).collect();
        let Some(first) = members.first() else {
            return Err(GroupError::Empty);
        };
        if replicate_count == 0 {
            return Err(GroupError::ZeroReplicates {
                first_member: first.to_string(),
            });
        }
        Ok(Self {
            members,
            replicate_count,
        })
    }

    pub fn members(&self) -> &[SampleId] {
        &self.members
    }

    pub fn replicate_count(&self) -> usize {
        self.replicate_count
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of slots the whole group occupies.
    pub fn footprint(&self) -> usize {
        self.members.len() * self.replicate_count
    }

    /// Splits off the members from `at` onward as a new group with the same
    /// replicate count. Returns `None` when nothing remains past `at`.
    pub(crate) fn split_off(&mut self, at: usize) -> Option<Group> {
        if at >= self.members.len() {
            return None;
        }
        let rest = self.members.split_off(at);
        Some(Group {
            members: rest,
            replicate_count: self.replicate_count,
        })
    }
}

/// The ordered queue of groups awaiting placement.
///
/// Backed by a deque so that split remainders can be pushed back to the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupQueue {
    groups: VecDeque<Group>,
}

impl GroupQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, group: Group) {
        self.groups.push_back(group);
    }

    pub fn push_front(&mut self, group: Group) {
        self.groups.push_front(group);
    }

    /// Removes and returns the first group (in queue order) that satisfies `predicate`.
    pub fn take_first(&mut self, predicate: impl Fn(&Group) -> bool) -> Option<Group> {
        let index = self.groups.iter().position(predicate)?;
        self.groups.remove(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// All sample ids in queue order.
    pub fn sample_ids(&self) -> impl Iterator<Item = &SampleId> {
        self.groups.iter().flat_map(|g| g.members.iter())
    }

    pub fn into_vec(self) -> Vec<Group> {
        self.groups.into()
    }
}

impl FromIterator<Group> for GroupQueue {
    fn from_iter<T: IntoIterator<Item = Group>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Group>> for GroupQueue {
    fn from(groups: Vec<Group>) -> Self {
        Self {
            groups: groups.into(),
        }
    }
}

impl IntoIterator for GroupQueue {
    type Item = Group;
    type IntoIter = std::collections::vec_deque::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str], reps: usize) -> Group {
        Group::new(ids.iter().copied(), reps).unwrap()
    }

    #[test]
    fn group_rejects_zero_replicates() {
        let err = Group::new(["S1_t0"], 0).unwrap_err();
        assert_eq!(
            err,
            GroupError::ZeroReplicates {
                first_member: "S1_t0".to_string()
            }
        );
    }

    #[test]
    fn group_rejects_empty_member_list() {
        let err = Group::new(Vec::<SampleId>::new(), 2).unwrap_err();
        assert_eq!(err, GroupError::Empty);
    }

    #[test]
    fn footprint_is_members_times_replicates() {
        assert_eq!(group(&["a", "b", "c"], 2).footprint(), 6);
    }

    #[test]
    fn split_off_keeps_replicate_count_and_order() {
        let mut g = group(&["a", "b", "c", "d"], 3);
        let rest = g.split_off(1).unwrap();
        assert_eq!(g.members(), &[SampleId::from("a")]);
        assert_eq!(
            rest.members(),
            &[SampleId::from("b"), SampleId::from("c"), SampleId::from("d")]
        );
        assert_eq!(rest.replicate_count(), 3);
        assert!(g.split_off(1).is_none());
    }

    #[test]
    fn take_first_removes_the_earliest_match_only() {
        let mut queue: GroupQueue =
            vec![group(&["a"], 4), group(&["b"], 2), group(&["c"], 2)].into();

        let taken = queue.take_first(|g| g.replicate_count() <= 2).unwrap();
        assert_eq!(taken.members()[0].as_str(), "b");

        let remaining: Vec<&str> = queue.sample_ids().map(SampleId::as_str).collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }

    #[test]
    fn take_first_returns_none_without_touching_queue() {
        let mut queue: GroupQueue = vec![group(&["a"], 5)].into();
        assert!(queue.take_first(|g| g.replicate_count() <= 2).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn push_front_takes_priority() {
        let mut queue: GroupQueue = vec![group(&["a"], 1)].into();
        queue.push_front(group(&["z"], 1));
        let order: Vec<&str> = queue.sample_ids().map(SampleId::as_str).collect();
        assert_eq!(order, vec!["z", "a"]);
    }
}
