//! Autoplay Events
//!
//! Emitted by the list controller whenever it acts on an item, so the host
//! can update its UI or log what happened. Drained with
//! `ListController::drain_events`.

use crate::strategy::Strategy;
use feedplay_core::{MediaId, PlaybackState};
use serde::{Deserialize, Serialize};

/// Events emitted by the autoplay engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AutoplayEvent {
    /// An election picked a winner different from the current player
    PlayerElected {
        /// Media of the winner
        media_id: MediaId,
        /// Its position in the list
        play_order: usize,
    },

    /// Item was asked to prepare its media
    PreparationRequested {
        /// Media being prepared
        media_id: MediaId,
    },

    /// Current player started (or resumed) playback
    PlaybackStarted {
        /// Media now playing
        media_id: MediaId,
        /// Position it resumed from, 0 when nothing was saved
        position: i64,
    },

    /// Current player was paused
    PlaybackPaused {
        /// Media paused
        media_id: MediaId,
    },

    /// A playback position was saved
    StateSaved {
        /// The saved snapshot
        state: PlaybackState,
    },

    /// Item's media resources were released
    PlayerReleased {
        /// Media released
        media_id: MediaId,
    },

    /// Media played to the end
    PlaybackCompleted {
        /// Media that finished
        media_id: MediaId,
    },

    /// Media primitive reported an error
    PlaybackFailed {
        /// Media that failed
        media_id: MediaId,
        /// Whether the item's own hook handled it
        handled: bool,
    },

    /// Election strategy was replaced
    StrategyChanged {
        /// Strategy now in effect
        strategy: Strategy,
    },
}

impl AutoplayEvent {
    /// Media the event is about, if any
    pub fn media_id(&self) -> Option<&MediaId> {
        match self {
            Self::PlayerElected { media_id, .. }
            | Self::PreparationRequested { media_id }
            | Self::PlaybackStarted { media_id, .. }
            | Self::PlaybackPaused { media_id }
            | Self::PlayerReleased { media_id }
            | Self::PlaybackCompleted { media_id }
            | Self::PlaybackFailed { media_id, .. } => Some(media_id),
            Self::StateSaved { state } => Some(&state.media_id),
            Self::StrategyChanged { .. } => None,
        }
    }
}
