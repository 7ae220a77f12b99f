//! List controller - autoplay orchestration
//!
//! Reacts to container events (attach, detach, scroll settled) and media
//! events (prepared, completed, failed). It builds candidates, asks the
//! strategy for a winner, and moves playback through the manager.
//!
//! # Invariants
//!
//! - At most one item plays at any time. The previous current player is
//!   always paused before a new one is assigned and started.
//! - Elections only run when scrolling comes to rest, never mid-scroll.
//! - Callbacks for items that are no longer attached, or no longer current,
//!   are ignored. Every mutation re-validates first.
//!
//! # Borrowing
//!
//! Items are `Rc<RefCell<_>>` handles. The host must not hold a borrow of an
//! item while calling into the controller with it.

use crate::candidates::{Candidate, CandidateFilter};
use crate::events::AutoplayEvent;
use crate::manager::PlaybackManager;
use crate::strategy::{Electable, Strategy};
use crate::types::{AutoplayConfig, ScrollState};
use feedplay_core::{
    refers_to, same_player, MediaError, MediaId, PlaybackState, PlayerContainer, PlayerRef,
    Result, VisibleRange, WeakPlayerRef,
};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Drives autoplay for one scrollable list
#[derive(Debug)]
pub struct ListController {
    manager: PlaybackManager,
    strategy: Strategy,

    // Items the container reported as attached and not yet detached
    attached: Vec<WeakPlayerRef>,

    // Attached while the slot was empty, waiting for their layout to settle
    awaiting_layout: Vec<WeakPlayerRef>,

    pending_events: Vec<AutoplayEvent>,
}

impl ListController {
    /// Create a controller from configuration
    ///
    /// Fails on invalid configuration instead of silently falling back.
    pub fn new(config: AutoplayConfig) -> Result<Self> {
        let capacity = config.state_capacity()?;
        Ok(Self {
            manager: PlaybackManager::new(capacity),
            strategy: config.strategy,
            attached: Vec::new(),
            awaiting_layout: Vec::new(),
            pending_events: Vec::new(),
        })
    }

    /// Create a controller with an unbounded state store
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            manager: PlaybackManager::default(),
            strategy,
            attached: Vec::new(),
            awaiting_layout: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Active election strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Playback manager
    pub fn manager(&self) -> &PlaybackManager {
        &self.manager
    }

    /// Playback manager, mutably (for importing saved states)
    pub fn manager_mut(&mut self) -> &mut PlaybackManager {
        &mut self.manager
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<AutoplayEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// True when `item` was attached and not detached since
    pub fn is_attached(&self, item: &PlayerRef) -> bool {
        self.attached
            .iter()
            .any(|weak| weak.strong_count() > 0 && refers_to(weak, item))
    }

    /// Swap the election strategy and re-elect immediately
    pub fn set_strategy<C: PlayerContainer + ?Sized>(&mut self, container: &C, strategy: Strategy) {
        info!("Playback strategy changed: {} -> {}", self.strategy, strategy);
        self.strategy = strategy;
        self.emit(AutoplayEvent::StrategyChanged { strategy });
        self.on_scroll_settled(container);
    }

    /// Whether the strategy's containment gate lets `item` play
    pub fn allows_to_play<C: PlayerContainer + ?Sized>(&self, container: &C, item: &PlayerRef) -> bool {
        CandidateFilter::for_container(self.strategy, container).allows_to_play(&*item.borrow())
    }

    /// Ask the active strategy for a winner among `candidates`
    pub fn find_best_player<'a>(&self, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        self.strategy.find_best_player(candidates)
    }

    /// Candidates for the next election
    ///
    /// The current player comes first when it still has a list position and
    /// is eligible, followed by eligible items in the visible range. Grid
    /// containers report several ranges; their outer bound is scanned.
    pub fn collect_candidates<C: PlayerContainer + ?Sized>(&self, container: &C) -> Vec<Candidate> {
        let filter = CandidateFilter::for_container(self.strategy, container);

        let current = self
            .manager
            .player()
            .filter(|player| player.borrow().play_order().is_some());

        let visible = VisibleRange::union_of(&container.visible_ranges());
        let in_range = visible
            .into_iter()
            .flat_map(|range| range.positions())
            .filter_map(|position| container.player_at(position));

        filter.filter(current.into_iter().chain(in_range))
    }

    /// Run an election without acting on it
    pub fn elect<C: PlayerContainer + ?Sized>(&self, container: &C) -> Option<Candidate> {
        let candidates = self.collect_candidates(container);
        self.find_best_player(&candidates).cloned()
    }

    /// Scroll state changed; elections only run once scrolling is idle
    pub fn on_scroll_state_changed<C: PlayerContainer + ?Sized>(
        &mut self,
        container: &C,
        state: ScrollState,
    ) {
        if state == ScrollState::Idle {
            self.on_scroll_settled(container);
        }
    }

    /// Scrolling came to rest: elect and hand playback over
    pub fn on_scroll_settled<C: PlayerContainer + ?Sized>(&mut self, container: &C) {
        let candidates = self.collect_candidates(container);
        let current = self.manager.player();
        let elected = self
            .find_best_player(&candidates)
            .map(|winner| (PlayerRef::clone(winner.player()), winner.play_order()));

        debug!(
            "Election over {} candidates with {}: {:?}",
            candidates.len(),
            self.strategy,
            elected.as_ref().map(|(player, _)| player.borrow().media_id())
        );

        match (&elected, &current) {
            (Some((winner, _)), Some(current)) if same_player(winner, current) => {
                let (prepared, playing) = {
                    let current = current.borrow();
                    (current.is_prepared(), current.is_playing())
                };
                if !prepared {
                    self.prepare(current);
                } else if !playing {
                    self.restore_and_start(current);
                }
                return;
            }
            (None, None) => return,
            _ => {}
        }

        if let Some(current) = &current {
            let playing = current.borrow().is_playing();
            if playing {
                self.save_and_pause_current(current);
            }
        }

        let Some((elected, play_order)) = elected else {
            return;
        };

        let media_id = elected.borrow().media_id();
        self.emit(AutoplayEvent::PlayerElected {
            media_id,
            play_order,
        });

        self.manager.set_player(None);
        let prepared = elected.borrow().is_prepared();
        if prepared {
            self.manager.set_player(Some(&elected));
            self.restore_and_start(&elected);
        } else {
            self.prepare(&elected);
        }
    }

    /// Item was attached to the container
    ///
    /// The current player resumes right away. Otherwise, when nothing is
    /// playing, the item waits for [`ListController::on_layout_settled`]
    /// before it is considered.
    pub fn on_item_attached(&mut self, item: &PlayerRef) {
        self.prune();
        if !self.is_attached(item) {
            self.attached.push(Rc::downgrade(item));
        }

        if self.manager.is_current(item) {
            let prepared = item.borrow().is_prepared();
            if prepared {
                self.restore_and_start(item);
            } else {
                self.prepare(item);
            }
        } else if !self.manager.has_player()
            && !self.awaiting_layout.iter().any(|weak| refers_to(weak, item))
        {
            self.awaiting_layout.push(Rc::downgrade(item));
        }
    }

    /// One-shot signal that an attached item's layout is stable
    pub fn on_layout_settled<C: PlayerContainer + ?Sized>(&mut self, container: &C, item: &PlayerRef) {
        let Some(index) = self
            .awaiting_layout
            .iter()
            .position(|weak| refers_to(weak, item))
        else {
            debug!("Ignoring layout signal for an item not awaiting one");
            return;
        };
        self.awaiting_layout.swap_remove(index);

        if !self.is_attached(item) || self.manager.is_current(item) {
            return;
        }
        if self.manager.has_player() {
            debug!("Slot taken before layout settled, leaving item idle");
            return;
        }
        if !self.is_eligible(container, item) {
            return;
        }

        let prepared = item.borrow().is_prepared();
        if prepared {
            self.manager.set_player(Some(item));
            self.restore_and_start(item);
        } else {
            self.prepare(item);
        }
    }

    /// Item was detached or its slot recycled
    ///
    /// Saves and pauses it if it was playing as the current player, frees
    /// the slot, and always releases the item's media.
    pub fn on_item_detached(&mut self, item: &PlayerRef) {
        self.attached
            .retain(|weak| weak.strong_count() > 0 && !refers_to(weak, item));
        self.awaiting_layout
            .retain(|weak| weak.strong_count() > 0 && !refers_to(weak, item));

        if self.manager.is_current(item) {
            let playing = item.borrow().is_playing();
            if playing {
                self.save_and_pause_current(item);
            }
            self.manager.set_player(None);
        }

        let media_id = item.borrow().media_id();
        item.borrow_mut().release();
        self.emit(AutoplayEvent::PlayerReleased { media_id });
    }

    /// Item finished preparing its media
    pub fn on_prepared<C: PlayerContainer + ?Sized>(&mut self, container: &C, item: &PlayerRef) {
        if !self.is_attached(item) {
            debug!("Ignoring prepared callback for a detached item");
            return;
        }
        if !self.is_eligible(container, item) {
            return;
        }

        if self.manager.is_current(item) {
            self.restore_and_start(item);
        } else if !self.manager.has_player() {
            self.manager.set_player(Some(item));
            self.restore_and_start(item);
        } else {
            debug!(
                "Prepared item {} stays idle, another item holds the slot",
                item.borrow().media_id()
            );
        }
    }

    /// Item's media played to the end
    ///
    /// Rewinds its saved state and frees the slot. Playback does not advance
    /// until the next election.
    pub fn on_completion(&mut self, item: &PlayerRef) {
        if !self.is_attached(item) {
            debug!("Ignoring completion for a detached item");
            return;
        }

        let (media_id, duration) = {
            let item = item.borrow();
            (item.media_id(), item.duration())
        };

        self.emit(AutoplayEvent::PlaybackCompleted {
            media_id: media_id.clone(),
        });
        self.save_state(media_id, 0, duration);

        if self.manager.is_current(item) {
            self.manager.set_player(None);
        }
    }

    /// Item's media reported an error
    ///
    /// The item's own hook runs first. Only a handled error rewinds the saved
    /// state, pauses the item and frees the slot. Returns whether it was
    /// handled; errors from detached items are ignored and report `false`.
    pub fn on_error(&mut self, item: &PlayerRef, error: &MediaError) -> bool {
        if !self.is_attached(item) {
            debug!("Ignoring playback error for a detached item: {}", error);
            return false;
        }

        let handled = item.borrow_mut().on_playback_error(error);
        let (media_id, duration) = {
            let item = item.borrow();
            (item.media_id(), item.duration())
        };

        warn!("Playback error on {} (handled: {}): {}", media_id, handled, error);
        self.emit(AutoplayEvent::PlaybackFailed {
            media_id: media_id.clone(),
            handled,
        });

        if !handled {
            return false;
        }

        self.save_state(media_id.clone(), 0, duration);
        if self.manager.is_current(item) {
            if self.manager.pause_playback() {
                self.emit(AutoplayEvent::PlaybackPaused { media_id });
            }
            self.manager.set_player(None);
        }
        true
    }

    fn is_eligible<C: PlayerContainer + ?Sized>(&self, container: &C, item: &PlayerRef) -> bool {
        CandidateFilter::for_container(self.strategy, container).is_eligible(&*item.borrow())
    }

    fn prepare(&mut self, item: &PlayerRef) {
        let media_id = item.borrow().media_id();
        debug!("Preparing {}", media_id);
        item.borrow_mut().prepare();
        self.emit(AutoplayEvent::PreparationRequested { media_id });
    }

    // `item` must be the current player; a running player keeps its position
    fn restore_and_start(&mut self, item: &PlayerRef) {
        let (media_id, playing) = {
            let item = item.borrow();
            (item.media_id(), item.is_playing())
        };
        if playing {
            debug!("{} is already playing", media_id);
            return;
        }

        let position = match self.manager.restore_playback_state(&media_id) {
            Some(state) => {
                item.borrow_mut().seek_to(state.position);
                state.position
            }
            None => 0,
        };

        if self.manager.start_playback() {
            self.emit(AutoplayEvent::PlaybackStarted { media_id, position });
        }
    }

    // `item` must be the current player
    fn save_and_pause_current(&mut self, item: &PlayerRef) {
        let (media_id, position, duration) = {
            let item = item.borrow();
            (item.media_id(), item.current_position(), item.duration())
        };

        self.save_state(media_id.clone(), position, duration);
        if self.manager.pause_playback() {
            self.emit(AutoplayEvent::PlaybackPaused { media_id });
        }
    }

    fn save_state(&mut self, media_id: MediaId, position: i64, duration: i64) {
        self.manager
            .save_playback_state(media_id.clone(), position, duration);
        self.emit(AutoplayEvent::StateSaved {
            state: PlaybackState::new(media_id, position, duration),
        });
    }

    fn prune(&mut self) {
        self.attached.retain(|weak| weak.strong_count() > 0);
        self.awaiting_layout.retain(|weak| weak.strong_count() > 0);
    }

    fn emit(&mut self, event: AutoplayEvent) {
        self.pending_events.push(event);
    }
}

impl Default for ListController {
    fn default() -> Self {
        Self::with_strategy(Strategy::default())
    }
}
