/// Core traits for Feedplay
use crate::error::MediaError;
use crate::geometry::Rect;
use crate::types::{MediaId, VisibleRange};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to a materialized playable item
///
/// The container owns the item's visual lifetime and holds the strong
/// reference. The engine compares handles by pointer to tell visual slots
/// apart, and only keeps [`WeakPlayerRef`]s between events.
pub type PlayerRef = Rc<RefCell<dyn Playable>>;

/// Non-owning handle to a playable item
pub type WeakPlayerRef = Weak<RefCell<dyn Playable>>;

/// A list item that can play media
///
/// Implemented by item types that opt into autoplay. Items that do not
/// implement it are simply never offered to the engine by the container.
///
/// `prepare` is asynchronous from the engine's point of view: it must return
/// immediately, and the host reports completion later through the
/// controller's `on_prepared`.
pub trait Playable {
    /// Stable identity of the media, independent of the visual slot
    fn media_id(&self) -> MediaId;

    /// Position of the item in the list, `None` when it has no position
    /// (being removed or not yet laid out)
    fn play_order(&self) -> Option<usize>;

    /// Whether the item would like to play right now
    fn wants_to_play(&self) -> bool;

    /// Whether the media primitive finished preparing
    fn is_prepared(&self) -> bool;

    /// Whether the media primitive is currently playing
    fn is_playing(&self) -> bool;

    /// Current position in milliseconds
    fn current_position(&self) -> i64;

    /// Duration in milliseconds (0 or negative when unknown)
    fn duration(&self) -> i64;

    /// On-screen rectangle of the item's player surface
    fn screen_rect(&self) -> Rect;

    /// Begin preparing the media; must not block
    fn prepare(&mut self);

    /// Start or resume playback
    fn start(&mut self);

    /// Pause playback, keeping the media prepared
    fn pause(&mut self);

    /// Move the playhead to `position` milliseconds
    fn seek_to(&mut self, position: i64);

    /// Stop playback and free the media resources
    ///
    /// After release the item reports `is_prepared() == false`.
    fn release(&mut self);

    /// Item-level error hook
    ///
    /// Returns `true` when the item handled the error, in which case the
    /// engine rewinds its saved state and gives up the playback slot.
    fn on_playback_error(&mut self, error: &MediaError) -> bool {
        let _ = error;
        false
    }
}

/// The scrollable list hosting playable items
///
/// Queried by the controller during elections. All rectangles share the
/// coordinate space of [`Playable::screen_rect`].
pub trait PlayerContainer {
    /// Part of the window not covered by system decorations
    fn window_rect(&self) -> Rect;

    /// Visible rectangle of the container itself
    fn container_rect(&self) -> Rect;

    /// Visible adapter positions
    ///
    /// Linear lists report one range; grids report one per span. Empty when
    /// nothing is laid out.
    fn visible_ranges(&self) -> Vec<VisibleRange>;

    /// Playable item materialized at `position`, if any
    ///
    /// Returns `None` for positions without a view or whose item does not
    /// implement [`Playable`].
    fn player_at(&self, position: usize) -> Option<PlayerRef>;
}

/// True when both handles point at the same visual slot
///
/// Compares data addresses only, so handles created through different
/// unsizing coercions of the same item still match.
pub fn same_player(a: &PlayerRef, b: &PlayerRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// True when `weak` still refers to the slot behind `strong`
pub fn refers_to(weak: &WeakPlayerRef, strong: &PlayerRef) -> bool {
    std::ptr::eq(Weak::as_ptr(weak).cast::<()>(), Rc::as_ptr(strong).cast::<()>())
}
