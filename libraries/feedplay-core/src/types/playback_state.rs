/// Saved playback position for a media item
use super::MediaId;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of where an item's playback stood
///
/// Written when a playing item is paused or detached, read back when the
/// item is selected to play again. Positions and durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Media this state belongs to
    pub media_id: MediaId,

    /// Playback position in milliseconds
    pub position: i64,

    /// Total duration in milliseconds (0 or negative when unknown)
    pub duration: i64,
}

impl PlaybackState {
    /// Create a new snapshot
    pub fn new(media_id: MediaId, position: i64, duration: i64) -> Self {
        Self {
            media_id,
            position,
            duration,
        }
    }

    /// Snapshot positioned at the start of the media
    pub fn rewound(media_id: MediaId, duration: i64) -> Self {
        Self::new(media_id, 0, duration)
    }

    /// Playback progress in `[0, 1]`, or `None` when the duration is unknown
    pub fn progress(&self) -> Option<f64> {
        if self.duration <= 0 {
            return None;
        }
        Some((self.position as f64 / self.duration as f64).clamp(0.0, 1.0))
    }
}
