//! Election strategies
//!
//! A strategy decides which of the current candidates should be playing.
//! Strategies are plain values: stateless, `Copy`, and swappable at runtime.
//!
//! Every ordering here uses a stable sort. Ties therefore keep the order of
//! the previous pass (or the order the candidates were supplied in), which is
//! what makes "topmost wins" and "keep the last winner" hold.

use feedplay_core::{containment_check, AutoplayError, Rect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Values a strategy ranks candidates by
pub trait Electable {
    /// Position in the list, lower is closer to the top
    fn play_order(&self) -> usize;

    /// Visible fraction of the item, in `[0, 1]`
    fn visible_area_ratio(&self) -> f32;
}

/// Autoplay election policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Never plays anything
    Rest,

    /// Most visible item wins, topmost on ties
    MostVisibleTopDown,

    /// Most visible item wins, the earlier-listed candidate on ties
    ///
    /// The controller lists the current player first, so it keeps playing
    /// when another item is exactly as visible.
    MostVisibleTopDownKeepLast,

    /// Topmost playable item wins, regardless of visibility
    #[default]
    FirstPlayableTopDown,

    /// First listed candidate wins
    ///
    /// The controller lists the current player first, so it keeps playing
    /// for as long as it stays eligible.
    FirstPlayableTopDownKeepLast,
}

impl Strategy {
    /// Every strategy, in declaration order
    pub const ALL: [Strategy; 5] = [
        Strategy::Rest,
        Strategy::MostVisibleTopDown,
        Strategy::MostVisibleTopDownKeepLast,
        Strategy::FirstPlayableTopDown,
        Strategy::FirstPlayableTopDownKeepLast,
    ];

    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::MostVisibleTopDown => "most-visible-top-down",
            Self::MostVisibleTopDownKeepLast => "most-visible-top-down-keep-last",
            Self::FirstPlayableTopDown => "first-playable-top-down",
            Self::FirstPlayableTopDownKeepLast => "first-playable-top-down-keep-last",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rest => "Do nothing",
            Self::MostVisibleTopDown => "Most visible item, top - down",
            Self::MostVisibleTopDownKeepLast => {
                "Most visible item, top - down. Keep last playing item."
            }
            Self::FirstPlayableTopDown => "First playable item, top - down",
            Self::FirstPlayableTopDownKeepLast => {
                "First playable item, top - down. Keep last playing item."
            }
        }
    }

    /// Pick at most one winner
    ///
    /// Candidates are expected to have passed [`Strategy::allows_to_play`]
    /// already. An empty slice always yields `None`.
    pub fn find_best_player<'a, T: Electable>(&self, candidates: &'a [T]) -> Option<&'a T> {
        if candidates.is_empty() {
            return None;
        }

        let mut ranked: Vec<&T> = candidates.iter().collect();
        match self {
            Self::Rest => return None,
            Self::MostVisibleTopDown => {
                ranked.sort_by_key(|c| c.play_order());
                ranked.sort_by(|a, b| by_visibility_desc(*a, *b));
            }
            Self::MostVisibleTopDownKeepLast => {
                ranked.sort_by(|a, b| by_visibility_desc(*a, *b));
            }
            Self::FirstPlayableTopDown => {
                ranked.sort_by_key(|c| c.play_order());
            }
            Self::FirstPlayableTopDownKeepLast => {}
        }

        ranked.first().copied()
    }

    /// Whether an item is allowed to play under this strategy
    ///
    /// Every strategy except [`Strategy::Rest`] applies the geometry
    /// containment gate. `Rest` allows nothing.
    pub fn allows_to_play(&self, window: &Rect, container: &Rect, item: &Rect) -> bool {
        match self {
            Self::Rest => false,
            _ => containment_check(window, container, item),
        }
    }
}

fn by_visibility_desc<T: Electable>(a: &T, b: &T) -> Ordering {
    b.visible_area_ratio().total_cmp(&a.visible_area_ratio())
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = AutoplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| AutoplayError::unknown_strategy(s))
    }
}
