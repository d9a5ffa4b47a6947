//! Ordering primitives for user-arranged lists.
//!
//! A list item's position is never stored on the item between reorder events;
//! it is derived from where the item sits in the list. [`ReorderPayload`] is the
//! transient mapping produced from one such reading and shipped to a
//! persistence endpoint as a flat JSON object (`{"<id>": <position>, ...}`).

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::DomainError;

/// Opaque identifier of an orderable item.
///
/// Identifiers are compared as text and never interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<uuid::Uuid> for ItemId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("item `{0}` appears more than once in the list")]
    DuplicateId(ItemId),
    #[error("list holds more items than positions can address")]
    TooManyItems,
}

/// Mapping from item identifier to zero-based position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReorderPayload {
    positions: BTreeMap<ItemId, u32>,
}

impl ReorderPayload {
    /// Assign positions `0..n` to `ids` in the order they are yielded.
    pub fn from_sequence<I, T>(ids: I) -> Result<Self, PayloadError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        let mut positions = BTreeMap::new();
        for (index, id) in ids.into_iter().enumerate() {
            let position = u32::try_from(index).map_err(|_| PayloadError::TooManyItems)?;
            match positions.entry(id.into()) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                btree_map::Entry::Occupied(slot) => {
                    return Err(PayloadError::DuplicateId(slot.key().clone()));
                }
            }
        }
        Ok(Self { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: &ItemId) -> Option<u32> {
        self.positions.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.positions.iter().map(|(id, position)| (id, *position))
    }

    /// Identifiers sorted by their assigned position.
    pub fn ordered_ids(&self) -> Vec<&ItemId> {
        let mut entries: Vec<_> = self.positions.iter().collect();
        entries.sort_by_key(|(_, position)| **position);
        entries.into_iter().map(|(id, _)| id).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Order a new sibling receives when none was supplied: one past the current
/// maximum, or zero for the first sibling.
pub fn next_sort_order(existing_max: Option<i32>) -> i32 {
    existing_max.map_or(0, |max| max.saturating_add(1))
}

/// Resolve the order for a new sibling, keeping an explicit order verbatim.
pub fn resolve_sort_order(
    explicit: Option<i32>,
    existing_max: Option<i32>,
) -> Result<i32, DomainError> {
    match explicit {
        Some(order) if order < 0 => Err(DomainError::validation(
            "sort_order",
            "order must not be negative",
        )),
        Some(order) => Ok(order),
        None => Ok(next_sort_order(existing_max)),
    }
}

/// 1-based label shown next to an item stored at `sort_order`.
pub fn ordinal_label(sort_order: i32) -> String {
    (i64::from(sort_order) + 1).to_string()
}
