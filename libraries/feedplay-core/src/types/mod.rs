//! Domain types for Feedplay

mod ids;
mod playback_state;
mod visible_range;

pub use ids::MediaId;
pub use playback_state::PlaybackState;
pub use visible_range::VisibleRange;
