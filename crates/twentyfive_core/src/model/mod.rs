//! Board domain model.
//!
//! # Responsibility
//! - Define the value types persisted to the board file.
//! - Define the location taxonomy used to address tasks and categories.
//!
//! # Invariants
//! - Every value type is `Clone` as a deep copy, so snapshots are
//!   independent of the live board.
//! - Wire field names match the persisted JSON format exactly.

pub mod board;
pub mod category;
pub mod id;
pub mod location;
pub mod task;

use serde::{Deserialize, Deserializer};

/// Reads `null` (or a missing field, with `#[serde(default)]`) as
/// `T::default()`. Hand-edited files write `null` for empty values.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
