//! Core types for autoplay management

use crate::strategy::Strategy;
use feedplay_core::{AutoplayError, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Scroll state reported by the host container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollState {
    /// Not scrolling
    Idle,

    /// Being dragged by the user
    Dragging,

    /// Animating towards a final position (fling)
    Settling,
}

/// State of the playback manager's single player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// No current player
    Empty,

    /// Current player is still preparing its media
    AssignedUnprepared,

    /// Current player is prepared but not playing
    AssignedPaused,

    /// Current player is playing
    AssignedPlaying,
}

/// Configuration for the list controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Initial election strategy (default: first playable, top-down)
    pub strategy: Strategy,

    /// Maximum number of saved playback states (default: unbounded)
    pub state_cache_capacity: Option<usize>,
}

impl AutoplayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.state_capacity().map(|_| ())
    }

    /// Saved-state capacity, `None` meaning unbounded
    pub fn state_capacity(&self) -> Result<Option<NonZeroUsize>> {
        match self.state_cache_capacity {
            None => Ok(None),
            Some(capacity) => NonZeroUsize::new(capacity).map(Some).ok_or_else(|| {
                AutoplayError::invalid_config("state_cache_capacity must be greater than zero")
            }),
        }
    }
}
