//! Scenario runner
//!
//! Plays the host role for a [`SimFeed`]: forwards scroll, attach, detach and
//! media callbacks to the list controller and records every event it emits.

use crate::config::{SimConfig, TraceFormat};
use crate::error::{Result, SimError};
use crate::feed::{Attachment, SimFeed};
use crate::scenario::{Scenario, Step};
use feedplay_core::{MediaError, MediaId, Playable, PlaybackState};
use feedplay_playback::{AutoplayEvent, ListController, ScrollState};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{debug, info, warn};

/// Error code reported for `fail` steps
const SIMULATED_ERROR: i32 = -1004;

/// One controller event, tagged with when it happened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    /// Step number, 0 for the initial layout
    pub step: usize,
    /// List offset when the event was emitted
    pub offset: i32,
    pub event: AutoplayEvent,
}

/// Outcome of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub trace: Vec<TraceEntry>,
    pub playing: Option<MediaId>,
    pub saved_states: Vec<PlaybackState>,
}

pub struct Simulator {
    feed: SimFeed,
    controller: ListController,
    auto_prepare: bool,
    trace: Vec<TraceEntry>,
}

impl Simulator {
    /// Build the feed and perform its initial layout
    pub fn new(config: &SimConfig, scenario: &Scenario) -> Result<Self> {
        let mut autoplay = config.autoplay.clone();
        if let Some(strategy) = scenario.strategy {
            autoplay.strategy = strategy;
        }

        let mut sim = Self {
            feed: SimFeed::new(config.viewport, scenario),
            controller: ListController::new(autoplay)?,
            auto_prepare: scenario.auto_prepare,
            trace: Vec::new(),
        };

        info!(
            "Simulating {} items with {}",
            sim.feed.len(),
            sim.controller.strategy()
        );

        let initial = sim.feed.scroll_to(0);
        sim.apply_attachment(&initial);
        sim.finish_step(0)?;
        Ok(sim)
    }

    /// Run every step of `scenario` and report the outcome
    pub fn run(mut self, scenario: &Scenario) -> Result<Report> {
        for (index, step) in scenario.steps.iter().enumerate() {
            self.step(step)?;
            self.finish_step(index + 1)?;
        }
        Ok(self.report())
    }

    pub fn feed(&self) -> &SimFeed {
        &self.feed
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    /// Apply a single step without recording it
    pub fn step(&mut self, step: &Step) -> Result<()> {
        debug!("Step: {:?}", step);

        match step {
            Step::Scroll { to, settle } => {
                self.controller
                    .on_scroll_state_changed(&self.feed, ScrollState::Dragging);
                self.move_to(*to);
                if *settle {
                    self.controller
                        .on_scroll_state_changed(&self.feed, ScrollState::Idle);
                }
            }
            Step::Fling { to } => {
                self.controller
                    .on_scroll_state_changed(&self.feed, ScrollState::Dragging);
                self.controller
                    .on_scroll_state_changed(&self.feed, ScrollState::Settling);
                self.move_to(*to);
                self.controller
                    .on_scroll_state_changed(&self.feed, ScrollState::Idle);
            }
            Step::Idle => {
                self.controller
                    .on_scroll_state_changed(&self.feed, ScrollState::Idle);
            }
            Step::Prepared { item } => {
                let index = self.feed.index_of(item)?;
                if !self.complete_preparation(index) {
                    warn!("{} was not preparing, ignoring", item);
                }
            }
            Step::Tick { ms } => self.tick(*ms),
            Step::Fail { item } => {
                let index = self.feed.index_of(item)?;
                let error = MediaError::new(1, SIMULATED_ERROR, "simulated failure");
                self.controller.on_error(&self.feed.handle(index), &error);
            }
            Step::Strategy { name } => self.controller.set_strategy(&self.feed, *name),
            Step::SetWantsToPlay { item, value } => {
                let index = self.feed.index_of(item)?;
                self.feed.player(index).borrow_mut().set_wants_to_play(*value);
            }
        }

        Ok(())
    }

    fn move_to(&mut self, offset: i32) {
        let changes = self.feed.scroll_to(offset);
        self.apply_attachment(&changes);
    }

    fn apply_attachment(&mut self, changes: &Attachment) {
        for &index in &changes.detached {
            self.controller.on_item_detached(&self.feed.handle(index));
        }
        for &index in &changes.attached {
            let item = self.feed.handle(index);
            self.controller.on_item_attached(&item);
            self.controller.on_layout_settled(&self.feed, &item);
        }
    }

    fn complete_preparation(&mut self, index: usize) -> bool {
        let finished = self.feed.player(index).borrow_mut().finish_preparing();
        if finished {
            self.controller
                .on_prepared(&self.feed, &self.feed.handle(index));
        }
        finished
    }

    fn tick(&mut self, ms: i64) {
        let Some(index) = self.feed.playing() else {
            debug!("Nothing playing, tick of {}ms ignored", ms);
            return;
        };

        let completed = self.feed.player(index).borrow_mut().advance(ms);
        if completed {
            self.controller.on_completion(&self.feed.handle(index));
        }
    }

    fn finish_step(&mut self, step: usize) -> Result<()> {
        if self.auto_prepare {
            for index in 0..self.feed.len() {
                let preparing = self.feed.player(index).borrow().is_preparing();
                if preparing && self.feed.is_attached(index) {
                    self.complete_preparation(index);
                }
            }
        }

        let offset = self.feed.offset();
        for event in self.controller.drain_events() {
            self.trace.push(TraceEntry {
                step,
                offset,
                event,
            });
        }

        let playing = self.feed.playing_count();
        if playing > 1 {
            return Err(SimError::Invariant(format!(
                "{playing} items playing after step {step}"
            )));
        }
        Ok(())
    }

    fn report(&self) -> Report {
        Report {
            trace: self.trace.clone(),
            playing: self
                .feed
                .playing()
                .map(|index| self.feed.player(index).borrow().media_id()),
            saved_states: self.controller.manager().export_states(),
        }
    }
}

impl Report {
    /// Render the report in the configured format
    pub fn render(&self, format: TraceFormat, verbose: bool) -> Result<String> {
        match format {
            TraceFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            TraceFormat::Text => Ok(self.render_text(verbose)),
        }
    }

    fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();

        for entry in &self.trace {
            if let Some(line) = describe(&entry.event, verbose) {
                let _ = writeln!(out, "[step {} @ {}px] {}", entry.step, entry.offset, line);
            }
        }

        match &self.playing {
            Some(media_id) => {
                let _ = writeln!(out, "playing: {media_id}");
            }
            None => out.push_str("playing: nothing\n"),
        }
        for state in &self.saved_states {
            let _ = writeln!(
                out,
                "saved: {} at {}/{}ms",
                state.media_id, state.position, state.duration
            );
        }

        out
    }
}

fn describe(event: &AutoplayEvent, verbose: bool) -> Option<String> {
    let line = match event {
        AutoplayEvent::PlayerElected {
            media_id,
            play_order,
        } => format!("elected {media_id} (#{play_order})"),
        AutoplayEvent::PlaybackStarted { media_id, position } => {
            format!("started {media_id} at {position}ms")
        }
        AutoplayEvent::PlaybackPaused { media_id } => format!("paused {media_id}"),
        AutoplayEvent::PlaybackCompleted { media_id } => format!("completed {media_id}"),
        AutoplayEvent::PlaybackFailed { media_id, handled } => {
            let outcome = if *handled { "handled" } else { "unhandled" };
            format!("failed {media_id} ({outcome})")
        }
        AutoplayEvent::StrategyChanged { strategy } => format!("strategy -> {strategy}"),

        // Bookkeeping, only shown on request
        AutoplayEvent::PreparationRequested { media_id } if verbose => {
            format!("preparing {media_id}")
        }
        AutoplayEvent::PlayerReleased { media_id } if verbose => format!("released {media_id}"),
        AutoplayEvent::StateSaved { state } if verbose => format!(
            "saved {} at {}/{}ms",
            state.media_id, state.position, state.duration
        ),
        _ => return None,
    };
    Some(line)
}
