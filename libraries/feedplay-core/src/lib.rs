//! Feedplay Core
//!
//! Platform-agnostic core types, geometry, traits, and error handling for the
//! Feedplay autoplay engine.
//!
//! This crate provides the building blocks shared by the playback engine and
//! any host that embeds it (a UI list, a simulator, a test harness).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaId`, `PlaybackState`, `VisibleRange`
//! - **Geometry**: `Rect`, visible-area ratio and the containment gate
//! - **Core Traits**: `Playable` (the media item), `PlayerContainer` (the host list)
//! - **Error Handling**: `AutoplayError`, `MediaError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use feedplay_core::geometry::{visible_area_ratio, Rect};
//!
//! let viewport = Rect::new(0, 0, 1080, 1920);
//! let item = Rect::new(0, 1620, 1080, 2220);
//!
//! // Half of the item hangs below the viewport
//! assert_eq!(visible_area_ratio(&item, &viewport), 0.5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod geometry;
pub mod traits;
pub mod types;

pub use error::{AutoplayError, MediaError, Result};
pub use geometry::{containment_check, visible_area_ratio, Rect};
pub use traits::{refers_to, same_player, Playable, PlayerContainer, PlayerRef, WeakPlayerRef};
pub use types::{MediaId, PlaybackState, VisibleRange};
