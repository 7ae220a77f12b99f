//! Saved playback positions
//!
//! Keyed by media identity. Unbounded unless a capacity is configured, in
//! which case the least recently used entry makes room for new ones.

use feedplay_core::{MediaId, PlaybackState};
use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::debug;

/// Map from media identity to its last saved playback state
#[derive(Debug)]
pub struct PlaybackStateStore {
    entries: LruCache<MediaId, PlaybackState>,
}

impl PlaybackStateStore {
    /// Create a store, bounded when `capacity` is given
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let entries = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self { entries }
    }

    /// Insert or replace the state for its media
    pub fn put(&mut self, state: PlaybackState) {
        let media_id = state.media_id.clone();
        if let Some((evicted, _)) = self.entries.push(media_id.clone(), state) {
            if evicted != media_id {
                debug!("Evicted saved playback state for {}", evicted);
            }
        }
    }

    /// Look up a state and mark it recently used
    pub fn get(&mut self, media_id: &MediaId) -> Option<&PlaybackState> {
        self.entries.get(media_id)
    }

    /// Look up a state without touching recency
    pub fn peek(&self, media_id: &MediaId) -> Option<&PlaybackState> {
        self.entries.peek(media_id)
    }

    /// Number of saved states
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is saved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All states, least recently used first
    pub fn snapshot(&self) -> Vec<PlaybackState> {
        self.entries.iter().rev().map(|(_, state)| state.clone()).collect()
    }
}

impl Default for PlaybackStateStore {
    fn default() -> Self {
        Self::new(None)
    }
}
