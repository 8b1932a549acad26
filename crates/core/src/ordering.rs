//! Display-order computation for the project list.
//!
//! The admin UI reorders projects with up/down buttons, a "move to
//! position" input, and drag-and-drop. All three reduce to the same pure
//! step: given the current id sequence and a [`MoveIntent`], produce the
//! new sequence plus the dense `(id, sort_order)` pairs to persist.
//!
//! [`compute_move`] performs no I/O. Malformed intents (unknown id,
//! out-of-range index, boundary step) are not errors: they yield the input
//! sequence unchanged with `changed = false`, and the caller decides
//! whether that is a UI no-op or worth surfacing.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// A user reordering intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveIntent {
    /// Exchange the project with its immediate neighbour.
    Step { id: DbId, direction: MoveDirection },
    /// Remove the project and reinsert it at `target_index`.
    ToPosition { id: DbId, target_index: usize },
    /// Drag-and-drop: remove `dragged_id` and reinsert it at `target_id`'s
    /// slot in the original sequence.
    Drag { dragged_id: DbId, target_id: DbId },
}

/// One `(id, sort_order)` assignment to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPair {
    pub id: DbId,
    pub sort_order: i32,
}

/// Result of [`compute_move`].
///
/// `pairs` always covers the entire sequence with dense zero-based values
/// (`pairs[k].sort_order == k`), because every position between the source
/// and destination shifts. `changed` is `false` when the intent was a no-op
/// and nothing needs to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovePlan {
    pub sequence: Vec<DbId>,
    pub pairs: Vec<OrderPair>,
    pub changed: bool,
}

impl MovePlan {
    fn noop(sequence: &[DbId]) -> Self {
        Self::from_sequence(sequence.to_vec(), false)
    }

    fn from_sequence(sequence: Vec<DbId>, changed: bool) -> Self {
        let pairs = sequence
            .iter()
            .enumerate()
            .map(|(index, &id)| OrderPair {
                id,
                sort_order: index as i32,
            })
            .collect();
        Self {
            sequence,
            pairs,
            changed,
        }
    }
}

/// Compute the new total order for `sequence` under `intent`.
///
/// The output sequence is always a permutation of the input, and the
/// returned pairs reindex it densely as `0..n-1`.
pub fn compute_move(sequence: &[DbId], intent: &MoveIntent) -> MovePlan {
    match *intent {
        MoveIntent::Step { id, direction } => step(sequence, id, direction),
        MoveIntent::ToPosition { id, target_index } => to_position(sequence, id, target_index),
        MoveIntent::Drag {
            dragged_id,
            target_id,
        } => drag(sequence, dragged_id, target_id),
    }
}

fn step(sequence: &[DbId], id: DbId, direction: MoveDirection) -> MovePlan {
    let Some(index) = position_of(sequence, id) else {
        return MovePlan::noop(sequence);
    };
    let neighbour = match direction {
        // First element cannot move up, last cannot move down.
        MoveDirection::Up if index == 0 => return MovePlan::noop(sequence),
        MoveDirection::Down if index + 1 == sequence.len() => return MovePlan::noop(sequence),
        MoveDirection::Up => index - 1,
        MoveDirection::Down => index + 1,
    };
    let mut next = sequence.to_vec();
    next.swap(index, neighbour);
    MovePlan::from_sequence(next, true)
}

fn to_position(sequence: &[DbId], id: DbId, target_index: usize) -> MovePlan {
    let Some(index) = position_of(sequence, id) else {
        return MovePlan::noop(sequence);
    };
    if target_index == index || target_index >= sequence.len() {
        return MovePlan::noop(sequence);
    }
    let mut next = sequence.to_vec();
    let moved = next.remove(index);
    next.insert(target_index, moved);
    MovePlan::from_sequence(next, true)
}

fn drag(sequence: &[DbId], dragged_id: DbId, target_id: DbId) -> MovePlan {
    if dragged_id == target_id {
        return MovePlan::noop(sequence);
    }
    let (Some(dragged_index), Some(target_index)) = (
        position_of(sequence, dragged_id),
        position_of(sequence, target_id),
    ) else {
        return MovePlan::noop(sequence);
    };
    let mut next = sequence.to_vec();
    let moved = next.remove(dragged_index);
    // The drop slot is the target's index in the original sequence; after
    // removing the dragged element it can be one past the end, so clamp.
    let insert_at = target_index.min(next.len());
    next.insert(insert_at, moved);
    MovePlan::from_sequence(next, true)
}

fn position_of(sequence: &[DbId], id: DbId) -> Option<usize> {
    sequence.iter().position(|&candidate| candidate == id)
}
