//! Shared fixtures for controller tests
//!
//! `FakePlayer` behaves like a real media item: preparation is asynchronous
//! (the test completes it explicitly), and it only plays once prepared.
//! `FakeFeed` lays items out in a single vertical column and reports the
//! ones intersecting its viewport as visible.

#![allow(dead_code)]

use feedplay_playback::{
    ListController, MediaError, MediaId, Playable, PlayerContainer, PlayerRef, Rect,
    VisibleRange,
};
use std::cell::RefCell;
use std::rc::Rc;

pub const ITEM_HEIGHT: i32 = 400;
pub const VIEWPORT_HEIGHT: i32 = 1000;
pub const WIDTH: i32 = 1000;

/// Scripted media item
#[derive(Debug)]
pub struct FakePlayer {
    pub id: MediaId,
    pub order: Option<usize>,
    pub rect: Rect,
    pub wants: bool,
    pub preparing: bool,
    pub prepared: bool,
    pub playing: bool,
    pub position: i64,
    pub duration: i64,
    pub handles_errors: bool,

    pub prepare_calls: usize,
    pub start_calls: usize,
    pub pause_calls: usize,
    pub release_calls: usize,
    pub seeks: Vec<i64>,
}

impl FakePlayer {
    pub fn new(id: &str, order: usize) -> Self {
        Self {
            id: MediaId::new(id),
            order: Some(order),
            rect: Rect::default(),
            wants: true,
            preparing: false,
            prepared: false,
            playing: false,
            position: 0,
            duration: 5000,
            handles_errors: true,
            prepare_calls: 0,
            start_calls: 0,
            pause_calls: 0,
            release_calls: 0,
            seeks: Vec::new(),
        }
    }

    /// Finish an in-flight preparation; returns whether one was pending
    pub fn finish_preparing(&mut self) -> bool {
        if !self.preparing {
            return false;
        }
        self.preparing = false;
        self.prepared = true;
        true
    }
}

impl Playable for FakePlayer {
    fn media_id(&self) -> MediaId {
        self.id.clone()
    }

    fn play_order(&self) -> Option<usize> {
        self.order
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
        self.prepare_calls += 1;
        if !self.prepared {
            self.preparing = true;
        }
    }

    fn start(&mut self) {
        self.start_calls += 1;
        if self.prepared {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.playing = false;
    }

    fn seek_to(&mut self, position: i64) {
        self.seeks.push(position);
        self.position = position;
    }

    fn release(&mut self) {
        self.release_calls += 1;
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

pub type Fake = Rc<RefCell<FakePlayer>>;

/// Single-column feed of fake players
pub struct FakeFeed {
    pub window: Rect,
    pub viewport: Rect,
    pub offset: i32,
    pub items: Vec<Fake>,
    pub attached: Vec<bool>,
    /// Replaces the computed visible range when set (grid layouts)
    pub ranges_override: Option<Vec<VisibleRange>>,
}

impl FakeFeed {
    /// Feed of `count` items named `item-0`, `item-1`, ...
    pub fn new(count: usize) -> Self {
        let items = (0..count)
            .map(|i| Rc::new(RefCell::new(FakePlayer::new(&format!("item-{i}"), i))))
            .collect();

        let mut feed = Self {
            window: Rect::new(0, 0, WIDTH, VIEWPORT_HEIGHT + 200),
            viewport: Rect::new(0, 0, WIDTH, VIEWPORT_HEIGHT),
            offset: 0,
            items,
            attached: vec![true; count],
            ranges_override: None,
        };
        feed.layout();
        feed
    }

    pub fn fake(&self, index: usize) -> &Fake {
        &self.items[index]
    }

    pub fn item(&self, index: usize) -> PlayerRef {
        self.items[index].clone()
    }

    pub fn scroll_to(&mut self, offset: i32) {
        self.offset = offset;
        self.layout();
    }

    fn layout(&mut self) {
        for (i, item) in self.items.iter().enumerate() {
            let top = i as i32 * ITEM_HEIGHT - self.offset;
            item.borrow_mut().rect = Rect::from_size(0, top, WIDTH, ITEM_HEIGHT);
        }
    }

    /// Indices of items currently playing
    pub fn playing(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.borrow().playing)
            .map(|(i, _)| i)
            .collect()
    }

    /// Attach every visible item and let its layout settle
    pub fn attach_visible(&self, controller: &mut ListController) {
        for position in self.visible_positions() {
            let item = self.item(position);
            controller.on_item_attached(&item);
            controller.on_layout_settled(self, &item);
        }
    }

    /// Complete preparation of `index` and report it to the controller
    pub fn finish_preparing(&self, controller: &mut ListController, index: usize) -> bool {
        let finished = self.items[index].borrow_mut().finish_preparing();
        if finished {
            controller.on_prepared(self, &self.item(index));
        }
        finished
    }

    pub fn visible_positions(&self) -> Vec<usize> {
        (0..self.items.len())
            .filter(|&i| self.attached[i] && self.viewport.intersects(&self.items[i].borrow().rect))
            .collect()
    }
}

impl PlayerContainer for FakeFeed {
    fn window_rect(&self) -> Rect {
        self.window
    }

    fn container_rect(&self) -> Rect {
        self.viewport
    }

    fn visible_ranges(&self) -> Vec<VisibleRange> {
        if let Some(ranges) = &self.ranges_override {
            return ranges.clone();
        }

        let visible = self.visible_positions();
        match (visible.first(), visible.last()) {
            (Some(&first), Some(&last)) => vec![VisibleRange::new(first, last)],
            _ => Vec::new(),
        }
    }

    fn player_at(&self, position: usize) -> Option<PlayerRef> {
        if !self.attached.get(position).copied().unwrap_or(false) {
            return None;
        }
        Some(self.item(position))
    }
}
