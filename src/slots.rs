//! Spell slot tracking for a character sheet.
//!
//! The slot table maps slot level to remaining casts. Character-sheet data
//! arrives with levels as string map keys; [`SlotTable::from_raw`] validates
//! them once at the ingestion boundary so every later lookup is integer-keyed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error type for slot-table ingestion.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Invalid slot level key: {0}")]
    InvalidLevel(String),
}

/// Remaining casts at one slot level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotState {
    pub remaining: u32,
}

/// A character's spell slots, ordered by level.
///
/// Serializes as a bare level-to-state map, matching the character-sheet
/// wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotTable {
    slots: BTreeMap<u8, SlotState>,
}

// Deserialization routes through `from_raw` so the positive-level rule holds
// on every ingestion path, not just the explicit one.
impl<'de> Deserialize<'de> for SlotTable {
    fn deserialize<D>(deserializer: D) -> Result<SlotTable, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, SlotState>::deserialize(deserializer)?;
        SlotTable::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from string-keyed character-sheet data, validating each
    /// level key once. Slot levels are positive integers; anything else
    /// (including `"0"`) is rejected.
    pub fn from_raw<I>(raw: I) -> Result<SlotTable, SlotError>
    where
        I: IntoIterator<Item = (String, SlotState)>,
    {
        let mut slots = BTreeMap::new();
        for (key, state) in raw {
            let level: u8 = key
                .parse()
                .ok()
                .filter(|&level| level > 0)
                .ok_or_else(|| SlotError::InvalidLevel(key))?;
            slots.insert(level, state);
        }
        Ok(SlotTable { slots })
    }

    /// Deserialize a table from character-sheet JSON (string object keys).
    /// Level keys are validated the same way as in [`from_raw`].
    ///
    /// [`from_raw`]: SlotTable::from_raw
    pub fn from_json(json: &str) -> Result<SlotTable, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the remaining count at a level.
    pub fn set(&mut self, level: u8, remaining: u32) {
        self.slots.insert(level, SlotState { remaining });
    }

    /// Remaining casts at a level (0 if the level isn't in the table).
    pub fn remaining(&self, level: u8) -> u32 {
        self.slots.get(&level).map_or(0, |slot| slot.remaining)
    }

    /// Slot levels usable to cast a spell of the given level: at or above the
    /// spell's level, with at least one cast remaining. Ascending, freshly
    /// materialized; empty when no slot qualifies, which is a normal outcome
    /// (the caller disables casting).
    pub fn available_levels(&self, spell_level: u8) -> Vec<u8> {
        self.slots
            .iter()
            .filter(|&(&level, slot)| level >= spell_level && slot.remaining > 0)
            .map(|(&level, _)| level)
            .collect()
    }

    /// Spend one slot at the given level. Returns false if none remain.
    pub fn expend(&mut self, level: u8) -> bool {
        match self.slots.get_mut(&level) {
            Some(slot) if slot.remaining > 0 => {
                slot.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Reset the table to the given per-level totals (a long rest).
    pub fn restore_all<I>(&mut self, totals: I)
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        self.slots = totals
            .into_iter()
            .map(|(level, remaining)| (level, SlotState { remaining }))
            .collect();
    }
}
