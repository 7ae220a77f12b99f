//! Playback manager - owner of the current player slot
//!
//! Tracks which item is the current player and remembers where each media
//! left off. The manager only holds a weak handle to the current player: the
//! host container decides how long an item lives.

use crate::store::PlaybackStateStore;
use crate::types::SlotState;
use feedplay_core::{refers_to, MediaId, PlaybackState, PlayerRef, WeakPlayerRef};
use std::num::NonZeroUsize;
use std::rc::Rc;
use tracing::debug;

/// Single-slot playback manager
///
/// Every mutation of the current player slot and of the saved states goes
/// through this type. It is not thread-safe; hosts with several threads must
/// confine it (or the controller owning it) to one of them.
#[derive(Debug, Default)]
pub struct PlaybackManager {
    player: Option<WeakPlayerRef>,
    states: PlaybackStateStore,
}

impl PlaybackManager {
    /// Create a manager, bounding saved states when `capacity` is given
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        Self {
            player: None,
            states: PlaybackStateStore::new(capacity),
        }
    }

    /// Current player, if one is assigned and still alive
    pub fn player(&self) -> Option<PlayerRef> {
        self.player.as_ref().and_then(|weak| weak.upgrade())
    }

    /// True when `item` is the current player
    pub fn is_current(&self, item: &PlayerRef) -> bool {
        self.player
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0 && refers_to(weak, item))
    }

    /// True when a live current player is assigned
    pub fn has_player(&self) -> bool {
        self.player().is_some()
    }

    /// Replace the current player reference
    ///
    /// Does not touch the item itself. Callers stop the previous occupant
    /// before assigning a new one.
    pub fn set_player(&mut self, player: Option<&PlayerRef>) {
        self.player = player.map(Rc::downgrade);
    }

    /// State of the player slot
    pub fn slot_state(&self) -> SlotState {
        let Some(player) = self.player() else {
            return SlotState::Empty;
        };

        let player = player.borrow();
        if !player.is_prepared() {
            SlotState::AssignedUnprepared
        } else if player.is_playing() {
            SlotState::AssignedPlaying
        } else {
            SlotState::AssignedPaused
        }
    }

    /// Save (or overwrite) the playback position of `media_id`
    pub fn save_playback_state(&mut self, media_id: MediaId, position: i64, duration: i64) {
        debug!("Saving playback state for {}: {}/{}ms", media_id, position, duration);
        self.states
            .put(PlaybackState::new(media_id, position, duration));
    }

    /// Saved state to resume `media_id` from
    ///
    /// Returns `None` when nothing was saved, meaning "start from zero". The
    /// manager never seeks; the caller applies the position to the item.
    pub fn restore_playback_state(&mut self, media_id: &MediaId) -> Option<PlaybackState> {
        self.states.get(media_id).cloned()
    }

    /// Saved state for `media_id`, without affecting cache recency
    pub fn get_playback_state(&self, media_id: &MediaId) -> Option<PlaybackState> {
        self.states.peek(media_id).cloned()
    }

    /// Start the current player
    ///
    /// No-op without a current player; a detach may have raced the caller.
    /// Returns whether a player was started.
    pub fn start_playback(&mut self) -> bool {
        match self.player() {
            Some(player) => {
                player.borrow_mut().start();
                true
            }
            None => false,
        }
    }

    /// Pause the current player
    ///
    /// No-op without a current player. Returns whether a player was paused.
    pub fn pause_playback(&mut self) -> bool {
        match self.player() {
            Some(player) => {
                player.borrow_mut().pause();
                true
            }
            None => false,
        }
    }

    /// Number of saved states
    pub fn saved_state_count(&self) -> usize {
        self.states.len()
    }

    /// All saved states, least recently used first
    ///
    /// Lets a host persist positions across its own restarts.
    pub fn export_states(&self) -> Vec<PlaybackState> {
        self.states.snapshot()
    }

    /// Load previously exported states
    ///
    /// Existing entries for the same media are overwritten.
    pub fn import_states<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = PlaybackState>,
    {
        for state in states {
            self.states.put(state);
        }
    }
}
