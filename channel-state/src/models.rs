use std::collections::{BTreeMap, BTreeSet};

use cbot_core::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usage state of one channel. Created on first sighting, never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelState {
    pub channel_id: i64,
    pub display_name: Option<String>,
    /// Processed posts; only ever increases.
    pub usage_count: u64,
    pub(crate) first_seen: u64,
}

impl ChannelState {
    pub(crate) fn new(channel_id: i64, first_seen: u64) -> Self {
        Self {
            channel_id,
            display_name: None,
            usage_count: 0,
            first_seen,
        }
    }

    pub(crate) fn set_display_name(&mut self, display_name: Option<&str>) {
        if let Some(name) = display_name.filter(|n| !n.is_empty()) {
            self.display_name = Some(name.to_string());
        }
    }
}

/// One row of the status report. `tier` reflects allow-list membership at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStats {
    pub channel_id: i64,
    pub display_name: Option<String>,
    pub usage_count: u64,
    pub tier: Tier,
}

/// One processed post. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub timestamp: DateTime<Utc>,
    pub channel_id: i64,
    pub display_name: Option<String>,
    pub original_text: String,
    pub generated_text: String,
    pub tier: Tier,
}

/// Durable shape of the whitelist file.
///
/// The aliases accept files written by the earlier deployment (`gpt4_whitelist`, `username_map`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistSnapshot {
    #[serde(default, alias = "gpt4_whitelist")]
    pub premium_channels: BTreeSet<i64>,
    #[serde(default, alias = "username_map")]
    pub handles: BTreeMap<String, i64>,
}

impl WhitelistSnapshot {
    pub fn is_empty(&self) -> bool {
        self.premium_channels.is_empty() && self.handles.is_empty()
    }
}
