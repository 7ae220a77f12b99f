//! Scenario files
//!
//! A scenario describes the items of a vertical feed and a sequence of steps
//! a user (or the media layer) performs on it:
//!
//! ```toml
//! item_height = 600
//! auto_prepare = true
//!
//! [[items]]
//! id = "intro"
//! duration = 8000
//!
//! [[items]]
//! id = "banner"
//! wants_to_play = false
//!
//! [[steps]]
//! action = "scroll"
//! to = 450
//!
//! [[steps]]
//! action = "tick"
//! ms = 1500
//! ```

use crate::error::{Result, SimError};
use feedplay_playback::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    /// Height of items that do not set their own
    #[serde(default = "default_item_height")]
    pub item_height: i32,

    /// Complete preparations right after each step instead of waiting for
    /// explicit `prepared` steps
    #[serde(default)]
    pub auto_prepare: bool,

    /// Overrides the configured strategy
    #[serde(default)]
    pub strategy: Option<Strategy>,

    pub items: Vec<ItemSpec>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemSpec {
    pub id: String,

    #[serde(default)]
    pub height: Option<i32>,

    #[serde(default = "default_duration")]
    pub duration: i64,

    #[serde(default = "default_true")]
    pub wants_to_play: bool,

    /// Whether the item recovers from media errors on its own
    #[serde(default = "default_true")]
    pub handles_errors: bool,
}

/// One thing happening to the feed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Drag the list to an absolute offset, then let it rest unless
    /// `settle` is false
    Scroll {
        to: i32,
        #[serde(default = "default_true")]
        settle: bool,
    },

    /// Fling: the list keeps moving on its own before resting
    Fling { to: i32 },

    /// Scrolling stopped
    Idle,

    /// Media of an item finished preparing
    Prepared { item: String },

    /// Advance the playing item's clock, completing it at its end
    Tick { ms: i64 },

    /// Media of an item reported an error
    Fail { item: String },

    /// Swap the election strategy
    Strategy { name: Strategy },

    /// Toggle an item's willingness to play
    SetWantsToPlay { item: String, value: bool },
}

impl Scenario {
    pub fn from_toml(source: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(SimError::Scenario("a feed needs at least one item".to_string()));
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(SimError::Scenario(format!("duplicate item id {}", item.id)));
            }
            if self.height_of(item) <= 0 {
                return Err(SimError::Scenario(format!(
                    "item {} must have a positive height",
                    item.id
                )));
            }
            if item.duration <= 0 {
                return Err(SimError::Scenario(format!(
                    "item {} must have a positive duration",
                    item.id
                )));
            }
        }

        for step in &self.steps {
            let referenced = match step {
                Step::Prepared { item } | Step::Fail { item } | Step::SetWantsToPlay { item, .. } => {
                    Some(item)
                }
                _ => None,
            };
            if let Some(item) = referenced {
                if !seen.contains(item.as_str()) {
                    return Err(SimError::UnknownItem(item.clone()));
                }
            }
        }

        Ok(())
    }

    pub fn height_of(&self, item: &ItemSpec) -> i32 {
        item.height.unwrap_or(self.item_height)
    }
}

fn default_item_height() -> i32 {
    600
}

fn default_duration() -> i64 {
    10_000
}

fn default_true() -> bool {
    true
}
