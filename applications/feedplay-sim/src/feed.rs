//! Simulated feed
//!
//! Lays scenario items out in one vertical column and tracks which of them
//! are attached, i.e. intersect the list viewport.

use crate::config::ViewportSettings;
use crate::error::{Result, SimError};
use crate::scenario::Scenario;
use feedplay_core::{
    MediaError, MediaId, Playable, PlayerContainer, PlayerRef, Rect, VisibleRange,
};
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory media item
///
/// Preparation is asynchronous: `prepare` only marks the item as preparing
/// until the simulator completes it.
#[derive(Debug)]
pub struct SimPlayer {
    id: MediaId,
    order: usize,
    rect: Rect,
    wants: bool,
    handles_errors: bool,
    preparing: bool,
    prepared: bool,
    playing: bool,
    position: i64,
    duration: i64,
}

impl SimPlayer {
    pub fn is_preparing(&self) -> bool {
        self.preparing
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn set_wants_to_play(&mut self, wants: bool) {
        self.wants = wants;
    }

    /// Mark preparation done; returns whether one was in flight
    pub fn finish_preparing(&mut self) -> bool {
        if !self.preparing {
            return false;
        }
        self.preparing = false;
        self.prepared = true;
        true
    }

    /// Advance playback by `ms`; returns true when the media reached its end
    pub fn advance(&mut self, ms: i64) -> bool {
        if !self.playing {
            return false;
        }

        self.position = (self.position + ms).min(self.duration);
        if self.position == self.duration {
            self.playing = false;
            return true;
        }
        false
    }
}

impl Playable for SimPlayer {
    fn media_id(&self) -> MediaId {
        self.id.clone()
    }

    fn play_order(&self) -> Option<usize> {
        Some(self.order)
    }

    fn wants_to_play(&self) -> bool {
        self.wants
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn current_position(&self) -> i64 {
        self.position
    }

    fn duration(&self) -> i64 {
        self.duration
    }

    fn screen_rect(&self) -> Rect {
        self.rect
    }

    fn prepare(&mut self) {
        if !self.prepared {
            self.preparing = true;
        }
    }

    fn start(&mut self) {
        if self.prepared {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_to(&mut self, position: i64) {
        self.position = position.clamp(0, self.duration);
    }

    fn release(&mut self) {
        self.preparing = false;
        self.prepared = false;
        self.playing = false;
    }

    fn on_playback_error(&mut self, _error: &MediaError) -> bool {
        if self.handles_errors {
            self.playing = false;
        }
        self.handles_errors
    }
}

/// Attachment changes caused by a scroll
#[derive(Debug, Default)]
pub struct Attachment {
    pub attached: Vec<usize>,
    pub detached: Vec<usize>,
}

/// Vertical list of simulated players
pub struct SimFeed {
    viewport: ViewportSettings,
    items: Vec<Rc<RefCell<SimPlayer>>>,
    heights: Vec<i32>,
    attached: Vec<bool>,
    offset: i32,
}

impl SimFeed {
    pub fn new(viewport: ViewportSettings, scenario: &Scenario) -> Self {
        let items = scenario
            .items
            .iter()
            .enumerate()
            .map(|(order, item)| {
                Rc::new(RefCell::new(SimPlayer {
                    id: MediaId::new(item.id.clone()),
                    order,
                    rect: Rect::default(),
                    wants: item.wants_to_play,
                    handles_errors: item.handles_errors,
                    preparing: false,
                    prepared: false,
                    playing: false,
                    position: 0,
                    duration: item.duration,
                }))
            })
            .collect();
        let heights = scenario.items.iter().map(|item| scenario.height_of(item)).collect();

        let mut feed = Self {
            viewport,
            items,
            heights,
            attached: vec![false; scenario.items.len()],
            offset: 0,
        };
        feed.layout();
        feed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn player(&self, index: usize) -> &Rc<RefCell<SimPlayer>> {
        &self.items[index]
    }

    pub fn handle(&self, index: usize) -> PlayerRef {
        self.items[index].clone()
    }

    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.borrow().id.as_str() == id)
            .ok_or_else(|| SimError::UnknownItem(id.to_string()))
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.attached[index]
    }

    /// Index of the item currently playing, if any
    pub fn playing(&self) -> Option<usize> {
        self.items.iter().position(|item| item.borrow().playing)
    }

    /// Number of items playing; more than one is a bug
    pub fn playing_count(&self) -> usize {
        self.items.iter().filter(|item| item.borrow().playing).count()
    }

    /// Largest offset that still fills the viewport
    pub fn max_offset(&self) -> i32 {
        let total: i32 = self.heights.iter().sum();
        (total - self.viewport.list_height).max(0)
    }

    /// Move the list and report which items entered or left the viewport
    pub fn scroll_to(&mut self, offset: i32) -> Attachment {
        self.offset = offset.clamp(0, self.max_offset());
        self.layout();

        let mut changes = Attachment::default();
        let list = self.viewport.list_rect();
        for (index, item) in self.items.iter().enumerate() {
            let visible = list.intersects(&item.borrow().rect);
            match (self.attached[index], visible) {
                (false, true) => changes.attached.push(index),
                (true, false) => changes.detached.push(index),
                _ => {}
            }
            self.attached[index] = visible;
        }
        changes
    }

    fn layout(&mut self) {
        let mut top = self.viewport.list_top - self.offset;
        for (item, height) in self.items.iter().zip(&self.heights) {
            item.borrow_mut().rect = Rect::from_size(0, top, self.viewport.width, *height);
            top += height;
        }
    }
}

impl PlayerContainer for SimFeed {
    fn window_rect(&self) -> Rect {
        self.viewport.window_rect()
    }

    fn container_rect(&self) -> Rect {
        self.viewport.list_rect()
    }

    fn visible_ranges(&self) -> Vec<VisibleRange> {
        let first = self.attached.iter().position(|&attached| attached);
        let last = self.attached.iter().rposition(|&attached| attached);
        match (first, last) {
            (Some(first), Some(last)) => vec![VisibleRange::new(first, last)],
            _ => Vec::new(),
        }
    }

    fn player_at(&self, position: usize) -> Option<PlayerRef> {
        if *self.attached.get(position)? {
            Some(self.handle(position))
        } else {
            None
        }
    }
}
