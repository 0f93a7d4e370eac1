//! In-memory channel state store.
//!
//! One [`ChannelStore`] owns every piece of shared mutable state: channel usage, the premium
//! allow-list, the handle index and the post log. Clones share the same state. Critical sections
//! never await, so the write lock is held only for the mutation itself.
//!
//! [`ChannelStore::lock_channel`] is a separate per-channel serialization point: a caller holds it
//! across the slow generation call so one channel's posts are committed in arrival order, while
//! other channels keep making progress.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use cbot_core::Tier;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

use crate::models::{ChannelState, ChannelStats, PostRecord, WhitelistSnapshot};
use crate::name_index::NameIndex;

#[derive(Debug, Default)]
struct StoreInner {
    channels: HashMap<i64, ChannelState>,
    next_seq: u64,
    allow_list: BTreeSet<i64>,
    names: NameIndex,
    posts: Vec<PostRecord>,
}

impl StoreInner {
    fn channel_mut(&mut self, channel_id: i64) -> &mut ChannelState {
        let seq = self.next_seq;
        let state = self.channels.entry(channel_id).or_insert_with(|| {
            debug!(channel_id, "New channel observed");
            ChannelState::new(channel_id, seq)
        });
        if state.first_seen == seq {
            self.next_seq += 1;
        }
        state
    }

    fn record_post(&mut self, channel_id: i64, display_name: Option<&str>, tier: Tier) -> u64 {
        let state = self.channel_mut(channel_id);
        state.set_display_name(display_name);
        state.usage_count += 1;
        debug!(channel_id, usage_count = state.usage_count, tier = %tier, "Post counted");
        state.usage_count
    }
}

/// Shared handle to the bot's channel state.
#[derive(Debug, Clone, Default)]
pub struct ChannelStore {
    inner: Arc<RwLock<StoreInner>>,
    channel_locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl ChannelStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a persisted whitelist.
    pub async fn with_snapshot(snapshot: &WhitelistSnapshot) -> Self {
        let store = Self::new();
        store.restore(snapshot).await;
        store
    }

    /// Replaces the allow-list and name index with the persisted ones. Usage state is untouched.
    pub async fn restore(&self, snapshot: &WhitelistSnapshot) {
        let mut inner = self.inner.write().await;
        inner.allow_list = snapshot.premium_channels.clone();
        inner.names = NameIndex::from_map(&snapshot.handles);
        info!(
            premium_channels = inner.allow_list.len(),
            handles = inner.names.len(),
            "Restored whitelist into channel store"
        );
    }

    /// Registers a sighting of `channel_id`, creating its state if absent and refreshing its display
    /// name and handle. Returns true when the name index changed and should be persisted.
    pub async fn observe(&self, channel_id: i64, display_name: Option<&str>) -> bool {
        let mut inner = self.inner.write().await;
        inner.channel_mut(channel_id).set_display_name(display_name);
        match display_name.filter(|n| !n.is_empty()) {
            Some(name) => inner.names.observe(name, channel_id),
            None => false,
        }
    }

    /// Counts one processed post for `channel_id`. Returns the new usage count.
    pub async fn record_post(&self, channel_id: i64, display_name: Option<&str>, tier: Tier) -> u64 {
        let mut inner = self.inner.write().await;
        inner.record_post(channel_id, display_name, tier)
    }

    /// Counts the post and appends it to the log under one lock. Returns the new usage count.
    pub async fn commit_post(&self, record: PostRecord) -> u64 {
        let mut inner = self.inner.write().await;
        let count = inner.record_post(record.channel_id, record.display_name.as_deref(), record.tier);
        debug!(
            channel_id = record.channel_id,
            tier = %record.tier,
            usage_count = count,
            "Post committed"
        );
        inner.posts.push(record);
        count
    }

    /// Snapshot of every channel in first-seen order.
    pub async fn stats(&self) -> Vec<ChannelStats> {
        let inner = self.inner.read().await;
        let mut states: Vec<&ChannelState> = inner.channels.values().collect();
        states.sort_by_key(|s| s.first_seen);
        states
            .into_iter()
            .map(|s| ChannelStats {
                channel_id: s.channel_id,
                display_name: s.display_name.clone(),
                usage_count: s.usage_count,
                tier: Tier::from_membership(inner.allow_list.contains(&s.channel_id)),
            })
            .collect()
    }

    pub async fn channel(&self, channel_id: i64) -> Option<ChannelState> {
        self.inner.read().await.channels.get(&channel_id).cloned()
    }

    pub async fn is_premium(&self, channel_id: i64) -> bool {
        self.inner.read().await.allow_list.contains(&channel_id)
    }

    pub async fn tier_for(&self, channel_id: i64) -> Tier {
        Tier::from_membership(self.is_premium(channel_id).await)
    }

    /// Adds `channel_id` to the allow-list. Returns false if it was already a member.
    pub async fn allow(&self, channel_id: i64) -> bool {
        let added = self.inner.write().await.allow_list.insert(channel_id);
        info!(channel_id, added, "Allow-list add");
        added
    }

    /// Removes `channel_id` from the allow-list. Returns false if it was not a member.
    pub async fn remove(&self, channel_id: i64) -> bool {
        let removed = self.inner.write().await.allow_list.remove(&channel_id);
        info!(channel_id, removed, "Allow-list remove");
        removed
    }

    pub async fn allow_list(&self) -> BTreeSet<i64> {
        self.inner.read().await.allow_list.clone()
    }

    /// Resolves an `@handle` seen on an earlier inbound event.
    pub async fn resolve_handle(&self, handle: &str) -> Option<i64> {
        self.inner.read().await.names.resolve(handle)
    }

    /// Posts of one channel in insertion order.
    pub async fn posts_for(&self, channel_id: i64) -> Vec<PostRecord> {
        self.inner
            .read()
            .await
            .posts
            .iter()
            .filter(|p| p.channel_id == channel_id)
            .cloned()
            .collect()
    }

    pub async fn post_count(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    /// Current allow-list and name index in their durable shape.
    pub async fn whitelist_snapshot(&self) -> WhitelistSnapshot {
        let inner = self.inner.read().await;
        WhitelistSnapshot {
            premium_channels: inner.allow_list.clone(),
            handles: inner.names.to_map(),
        }
    }

    /// Waits for exclusive use of `channel_id`. Hold the guard for the whole read-generate-commit
    /// sequence of one post.
    pub async fn lock_channel(&self, channel_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.channel_locks.lock().await;
            locks
                .entry(channel_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
