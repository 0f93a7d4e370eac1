//! Bidirectional `@handle` ↔ channel id index.
//!
//! Handles are case-insensitive and stored lower-cased with a leading `@`. Each handle maps to at most
//! one channel, and a sighting makes the observed handle the channel's only one: the last sighting
//! wins and a rename drops the channel's previous handles.
//!
//! A restored map may list several handles for one channel (files written before renames were
//! tracked). All of them stay resolvable until the channel is next observed.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Normalizes `Name`, `@Name` or ` @NAME ` to `@name`.
pub fn normalize_handle(handle: &str) -> String {
    let trimmed = handle.trim().trim_start_matches('@');
    format!("@{}", trimmed.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    by_handle: BTreeMap<String, i64>,
    /// Current handle per channel. Absent for channels whose restored handle is ambiguous.
    by_channel: HashMap<i64, String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an index from a persisted handle map, keeping every entry.
    ///
    /// A channel listed under exactly one handle gets it as its current handle. A channel listed
    /// under several keeps all of them resolvable and has no current handle until the next sighting.
    pub fn from_map(map: &BTreeMap<String, i64>) -> Self {
        let mut index = Self::new();
        for (handle, channel_id) in map {
            let handle = normalize_handle(handle);
            if handle.len() > 1 {
                index.by_handle.insert(handle, *channel_id);
            }
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for channel_id in index.by_handle.values() {
            *counts.entry(*channel_id).or_default() += 1;
        }
        for (handle, channel_id) in &index.by_handle {
            match counts.get(channel_id) {
                Some(1) => {
                    index.by_channel.insert(*channel_id, handle.clone());
                }
                _ => debug!(channel_id, handle = %handle, "Restored alias handle"),
            }
        }
        index
    }

    /// Records that `channel_id` currently uses `handle`. Returns true if the handle map changed.
    pub fn observe(&mut self, handle: &str, channel_id: i64) -> bool {
        let handle = normalize_handle(handle);
        if handle.len() == 1 {
            return false;
        }
        if self.by_channel.get(&channel_id) == Some(&handle) {
            return false;
        }

        let before = self.by_handle.len();
        self.by_handle
            .retain(|h, owner| *owner != channel_id || *h == handle);
        let mut changed = self.by_handle.len() != before;

        match self.by_handle.insert(handle.clone(), channel_id) {
            Some(previous_owner) if previous_owner == channel_id => {}
            Some(previous_owner) => {
                if self.by_channel.get(&previous_owner) == Some(&handle) {
                    self.by_channel.remove(&previous_owner);
                }
                changed = true;
            }
            None => changed = true,
        }
        self.by_channel.insert(channel_id, handle);
        changed
    }

    /// Looks up a handle, with or without the leading `@`, case-insensitively.
    pub fn resolve(&self, handle: &str) -> Option<i64> {
        self.by_handle.get(&normalize_handle(handle)).copied()
    }

    pub fn handle_of(&self, channel_id: i64) -> Option<&str> {
        self.by_channel.get(&channel_id).map(String::as_str)
    }

    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.by_handle.clone()
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}
