//! Feedplay - Autoplay Management
//!
//! Decides which item of a scrollable list should be playing, hands playback
//! over as the user scrolls, and remembers where each media left off.
//!
//! This crate provides:
//! - Candidate filtering (wants to play + containment gate)
//! - Swappable election strategies (most visible, first playable, keep-last, rest)
//! - A single-slot playback manager with saved positions (optionally LRU-bounded)
//! - A list controller reacting to scroll, attach/detach and media callbacks
//! - Events for host UI synchronization
//!
//! # Architecture
//!
//! `feedplay-playback` is host-agnostic:
//! - No dependency on any UI toolkit
//! - No dependency on any media framework
//! - Single-threaded and event-driven; nothing blocks
//!
//! The host list implements [`PlayerContainer`], its media items implement
//! [`Playable`], and the host forwards its events to [`ListController`].
//!
//! # Example: Electing a player
//!
//! ```rust
//! use feedplay_playback::{Electable, Strategy};
//!
//! struct Tile { order: usize, visible: f32 }
//!
//! impl Electable for Tile {
//!     fn play_order(&self) -> usize { self.order }
//!     fn visible_area_ratio(&self) -> f32 { self.visible }
//! }
//!
//! let tiles = [
//!     Tile { order: 0, visible: 0.3 },
//!     Tile { order: 1, visible: 0.9 },
//!     Tile { order: 2, visible: 0.5 },
//! ];
//!
//! let winner = Strategy::MostVisibleTopDown.find_best_player(&tiles).unwrap();
//! assert_eq!(winner.order, 1);
//!
//! let winner = Strategy::FirstPlayableTopDown.find_best_player(&tiles).unwrap();
//! assert_eq!(winner.order, 0);
//! ```
//!
//! # Example: Host integration
//!
//! ```rust,no_run
//! use feedplay_playback::{AutoplayConfig, ListController, ScrollState};
//! use feedplay_playback::{PlayerContainer, PlayerRef, Rect, VisibleRange};
//!
//! struct Feed { rows: Vec<Option<PlayerRef>> }
//!
//! impl PlayerContainer for Feed {
//!     fn window_rect(&self) -> Rect { Rect::new(0, 0, 1080, 2340) }
//!     fn container_rect(&self) -> Rect { Rect::new(0, 120, 1080, 2200) }
//!     fn visible_ranges(&self) -> Vec<VisibleRange> { vec![VisibleRange::new(0, 3)] }
//!     fn player_at(&self, position: usize) -> Option<PlayerRef> {
//!         self.rows.get(position).cloned().flatten()
//!     }
//! }
//!
//! let feed = Feed { rows: Vec::new() };
//! let mut controller = ListController::new(AutoplayConfig::default())?;
//!
//! // Forward host events
//! controller.on_scroll_state_changed(&feed, ScrollState::Idle);
//! for event in controller.drain_events() {
//!     println!("{event:?}");
//! }
//! # Ok::<(), feedplay_playback::AutoplayError>(())
//! ```

mod candidates;
mod controller;
mod events;
mod manager;
mod store;
mod strategy;
pub mod types;

// Public exports
pub use candidates::{Candidate, CandidateFilter};
pub use controller::ListController;
pub use events::AutoplayEvent;
pub use manager::PlaybackManager;
pub use store::PlaybackStateStore;
pub use strategy::{Electable, Strategy};
pub use types::{AutoplayConfig, ScrollState, SlotState};

pub use feedplay_core::{
    AutoplayError, MediaError, MediaId, Playable, PlaybackState, PlayerContainer, PlayerRef,
    Rect, Result, VisibleRange, WeakPlayerRef,
};
