//! Candidate filtering
//!
//! Turns materialized items into election candidates: items that want to
//! play and pass the strategy's containment gate.

use crate::strategy::{Electable, Strategy};
use feedplay_core::{
    same_player, visible_area_ratio, MediaId, Playable, PlayerContainer, PlayerRef, Rect,
};
use std::fmt;

/// An item eligible for election, with the values it is ranked by
///
/// Ranking values are captured when the candidate is built so a strategy
/// never has to borrow the item again.
#[derive(Clone)]
pub struct Candidate {
    player: PlayerRef,
    media_id: MediaId,
    play_order: usize,
    visible_ratio: f32,
}

impl Candidate {
    /// Handle of the candidate item
    pub fn player(&self) -> &PlayerRef {
        &self.player
    }

    /// Media identity of the candidate
    pub fn media_id(&self) -> &MediaId {
        &self.media_id
    }

    /// True when this candidate is the slot behind `player`
    pub fn is(&self, player: &PlayerRef) -> bool {
        same_player(&self.player, player)
    }
}

impl Electable for Candidate {
    fn play_order(&self) -> usize {
        self.play_order
    }

    fn visible_area_ratio(&self) -> f32 {
        self.visible_ratio
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("media_id", &self.media_id)
            .field("play_order", &self.play_order)
            .field("visible_ratio", &self.visible_ratio)
            .finish_non_exhaustive()
    }
}

/// Side-effect-free filter over materialized items
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter {
    strategy: Strategy,
    window: Rect,
    container: Rect,
}

impl CandidateFilter {
    /// Create a filter for explicit window and container rectangles
    pub fn new(strategy: Strategy, window: Rect, container: Rect) -> Self {
        Self {
            strategy,
            window,
            container,
        }
    }

    /// Create a filter from the container's current geometry
    pub fn for_container<C: PlayerContainer + ?Sized>(strategy: Strategy, container: &C) -> Self {
        Self::new(strategy, container.window_rect(), container.container_rect())
    }

    /// The strategy's containment gate for `item`
    pub fn allows_to_play(&self, item: &dyn Playable) -> bool {
        self.strategy
            .allows_to_play(&self.window, &self.container, &item.screen_rect())
    }

    /// Whether `item` wants to play and is allowed to
    pub fn is_eligible(&self, item: &dyn Playable) -> bool {
        item.wants_to_play() && self.allows_to_play(item)
    }

    /// Build a candidate for `player` if it is eligible
    ///
    /// Items without a list position rank after every positioned item.
    pub fn candidate(&self, player: &PlayerRef) -> Option<Candidate> {
        let item = player.borrow();
        if !self.is_eligible(&*item) {
            return None;
        }

        Some(Candidate {
            player: PlayerRef::clone(player),
            media_id: item.media_id(),
            play_order: item.play_order().unwrap_or(usize::MAX),
            visible_ratio: visible_area_ratio(&item.screen_rect(), &self.container),
        })
    }

    /// Keep the eligible items, skipping handles already seen
    pub fn filter<I>(&self, players: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = PlayerRef>,
    {
        let mut candidates: Vec<Candidate> = Vec::new();
        for player in players {
            if candidates.iter().any(|c| c.is(&player)) {
                continue;
            }
            if let Some(candidate) = self.candidate(&player) {
                candidates.push(candidate);
            }
        }
        candidates
    }
}
