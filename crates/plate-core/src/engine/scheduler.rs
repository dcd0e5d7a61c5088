//! Greedy, row-bounded first-fit placement of sample groups onto plate slots.

use crate::core::models::assignment::{Assignment, PlacementResult};
use crate::core::models::group::GroupQueue;
use crate::core::models::well::Well;
use tracing::{debug, trace};

/// Places groups from `queue` onto `slots` and returns the assignments made
/// together with every group that did not fit.
///
/// `slots` must be in canonical order (row by row, left to right). The cursor
/// walks the slots one row segment at a time:
///
/// - the first queued group whose replicate count fits in what is left of the
///   current row is taken;
/// - as many of its members as fit are placed, each member on
///   `replicate_count` consecutive slots;
/// - unplaced members go back to the **front** of the queue as a new group so
///   they are tried next;
/// - if no group fits, the rest of the row is skipped and stays empty.
///
/// Placement never crosses a row boundary. A group wider than every row is
/// simply returned in the leftovers.
pub fn assign(slots: &[Well], mut queue: GroupQueue) -> PlacementResult {
    let total = slots.len();
    let mut assignments = Vec::new();
    let mut cursor = 0;

    while cursor < total && !queue.is_empty() {
        let row_remaining = remaining_in_row(slots, cursor);

        let Some(mut group) = queue.take_first(|g| g.replicate_count() <= row_remaining) else {
            debug!(
                row = %slots[cursor].row,
                skipped = row_remaining,
                "No queued group fits the rest of the row; skipping to the next row."
            );
            cursor += row_remaining;
            continue;
        };

        let replicates = group.replicate_count();
        let place_count = group.len().min(row_remaining / replicates);
        let remainder = group.split_off(place_count);

        debug!(
            start = %slots[cursor],
            first_member = %group.members()[0],
            placed = place_count,
            replicates,
            split = remainder.is_some(),
            "Placing group."
        );

        for sample_id in group.members() {
            for (offset, &well) in slots[cursor..cursor + replicates].iter().enumerate() {
                trace!(sample = %sample_id, well = %well, replicate = offset + 1, "Assigned.");
                assignments.push(Assignment {
                    sample_id: sample_id.clone(),
                    well,
                    replicate: offset + 1,
                });
            }
            cursor += replicates;
        }

        if let Some(rest) = remainder {
            queue.push_front(rest);
        }
    }

    PlacementResult {
        assignments,
        leftovers: queue.into_vec(),
    }
}

/// Number of consecutive slots from `start` that share the row of `slots[start]`.
fn remaining_in_row(slots: &[Well], start: usize) -> usize {
    let row = slots[start].row;
    slots[start..].iter().take_while(|w| w.row == row).count()
}
