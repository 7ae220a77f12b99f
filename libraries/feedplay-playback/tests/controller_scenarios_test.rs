//! Scenario tests for the list controller
//!
//! Each test drives a `FakeFeed` through host events the way a scrolling
//! list would and checks which item ends up playing.

mod common;

use common::FakeFeed;
use feedplay_playback::{
    AutoplayConfig, AutoplayError, AutoplayEvent, Electable, ListController, MediaError,
    MediaId, PlaybackState, Rect, ScrollState, SlotState, Strategy, VisibleRange,
};

// ===== Helpers =====

/// Feed with its visible items attached and prepared; item 0 plays
fn playing_feed(strategy: Strategy, count: usize) -> (FakeFeed, ListController) {
    let feed = FakeFeed::new(count);
    let mut controller = ListController::with_strategy(strategy);

    feed.attach_visible(&mut controller);
    for position in feed.visible_positions() {
        feed.finish_preparing(&mut controller, position);
    }
    assert_eq!(feed.playing(), vec![0]);

    controller.drain_events();
    (feed, controller)
}

fn id(name: &str) -> MediaId {
    MediaId::new(name)
}

fn saved(controller: &ListController, name: &str) -> Option<(i64, i64)> {
    controller
        .manager()
        .get_playback_state(&id(name))
        .map(|state| (state.position, state.duration))
}

// ===== Startup =====

#[test]
fn first_prepared_item_claims_the_slot() {
    let feed = FakeFeed::new(6);
    let mut controller = ListController::default();

    feed.attach_visible(&mut controller);
    for position in 0..3 {
        assert_eq!(feed.fake(position).borrow().prepare_calls, 1);
    }
    assert!(feed.playing().is_empty());

    // Item 1 finishes first and takes the slot; later ones stay idle
    feed.finish_preparing(&mut controller, 1);
    feed.finish_preparing(&mut controller, 0);
    feed.finish_preparing(&mut controller, 2);

    assert_eq!(feed.playing(), vec![1]);
    assert!(controller.manager().is_current(&feed.item(1)));
    assert_eq!(controller.manager().slot_state(), SlotState::AssignedPlaying);
}

#[test]
fn layout_signal_is_one_shot() {
    let feed = FakeFeed::new(3);
    let mut controller = ListController::default();
    let item = feed.item(0);

    controller.on_item_attached(&item);
    controller.on_layout_settled(&feed, &item);
    controller.on_layout_settled(&feed, &item);

    assert_eq!(feed.fake(0).borrow().prepare_calls, 1);
}

#[test]
fn layout_signal_without_attach_is_ignored() {
    let feed = FakeFeed::new(3);
    let mut controller = ListController::default();

    controller.on_layout_settled(&feed, &feed.item(0));

    assert_eq!(feed.fake(0).borrow().prepare_calls, 0);
    assert!(controller.drain_events().is_empty());
}

#[test]
fn containment_gate_blocks_a_list_outside_the_window() {
    let mut feed = FakeFeed::new(3);
    feed.window = Rect::new(0, 0, 1000, 500);
    let mut controller = ListController::default();

    feed.attach_visible(&mut controller);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    for position in 0..3 {
        assert_eq!(feed.fake(position).borrow().prepare_calls, 0);
    }
    assert!(controller.elect(&feed).is_none());
}

// ===== Scroll handoff =====

#[test]
fn scroll_handoff_saves_and_restores_positions() {
    let (mut feed, mut controller) = playing_feed(Strategy::MostVisibleTopDown, 6);
    feed.fake(0).borrow_mut().position = 1200;

    // Item 0 scrolls mostly out, items 1 and 2 are fully visible
    feed.scroll_to(300);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    assert_eq!(feed.playing(), vec![1]);
    assert_eq!(saved(&controller, "item-0"), Some((1200, 5000)));
    assert_eq!(feed.fake(0).borrow().pause_calls, 1);
    assert_eq!(
        controller.drain_events(),
        vec![
            AutoplayEvent::StateSaved {
                state: PlaybackState::new(id("item-0"), 1200, 5000),
            },
            AutoplayEvent::PlaybackPaused { media_id: id("item-0") },
            AutoplayEvent::PlayerElected {
                media_id: id("item-1"),
                play_order: 1,
            },
            AutoplayEvent::PlaybackStarted {
                media_id: id("item-1"),
                position: 0,
            },
        ]
    );

    // Back to the top: item 0 resumes where it left off
    feed.fake(1).borrow_mut().position = 700;
    feed.scroll_to(0);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    assert_eq!(feed.playing(), vec![0]);
    assert_eq!(feed.fake(0).borrow().seeks, vec![1200]);
    assert_eq!(saved(&controller, "item-1"), Some((700, 5000)));
}

#[test]
fn elections_wait_for_scrolling_to_stop() {
    let (mut feed, mut controller) = playing_feed(Strategy::MostVisibleTopDown, 6);

    feed.scroll_to(300);
    controller.on_scroll_state_changed(&feed, ScrollState::Dragging);
    controller.on_scroll_state_changed(&feed, ScrollState::Settling);
    assert_eq!(feed.playing(), vec![0]);
    assert!(controller.drain_events().is_empty());

    controller.on_scroll_state_changed(&feed, ScrollState::Idle);
    assert_eq!(feed.playing(), vec![1]);
}

#[test]
fn settling_on_the_current_player_keeps_it_playing() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);

    controller.on_scroll_state_changed(&feed, ScrollState::Idle);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    let item = feed.fake(0).borrow();
    assert_eq!(feed.playing(), vec![0]);
    assert_eq!((item.start_calls, item.pause_calls), (1, 0));
}

#[test]
fn unprepared_winner_is_prepared_then_claims_the_slot() {
    let (mut feed, mut controller) = playing_feed(Strategy::MostVisibleTopDown, 8);

    // Items 3 and 4 were never attached, so they are not prepared yet
    feed.scroll_to(1300);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    assert!(feed.playing().is_empty());
    assert_eq!(controller.manager().slot_state(), SlotState::Empty);
    assert_eq!(feed.fake(4).borrow().prepare_calls, 1);

    let item = feed.item(4);
    controller.on_item_attached(&item);
    feed.finish_preparing(&mut controller, 4);
    assert_eq!(feed.playing(), vec![4]);
}

// ===== Strategy changes =====

#[test]
fn strategy_swap_reelects_immediately() {
    let (mut feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);

    feed.scroll_to(300);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);
    assert_eq!(feed.playing(), vec![0]);

    controller.set_strategy(&feed, Strategy::MostVisibleTopDown);

    assert_eq!(controller.strategy(), Strategy::MostVisibleTopDown);
    assert_eq!(feed.playing(), vec![1]);
    assert_eq!(
        controller.drain_events().first(),
        Some(&AutoplayEvent::StrategyChanged {
            strategy: Strategy::MostVisibleTopDown
        })
    );
}

#[test]
fn rest_pauses_playback_until_another_strategy_resumes_it() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().position = 2500;

    controller.set_strategy(&feed, Strategy::Rest);
    assert!(feed.playing().is_empty());
    assert_eq!(saved(&controller, "item-0"), Some((2500, 5000)));
    assert!(controller.elect(&feed).is_none());

    controller.set_strategy(&feed, Strategy::FirstPlayableTopDown);
    assert_eq!(feed.playing(), vec![0]);
    assert_eq!(feed.fake(0).borrow().seeks, vec![2500]);
}

#[test]
fn keep_last_holds_the_current_player_on_a_tie() {
    let feed = FakeFeed::new(6);
    feed.fake(0).borrow_mut().wants = false;
    let mut controller = ListController::with_strategy(Strategy::MostVisibleTopDownKeepLast);

    feed.attach_visible(&mut controller);
    feed.finish_preparing(&mut controller, 1);
    assert_eq!(feed.playing(), vec![1]);

    // Item 0 becomes playable and is exactly as visible as item 1
    feed.fake(0).borrow_mut().wants = true;
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);
    assert_eq!(feed.playing(), vec![1]);
    assert_eq!(feed.fake(0).borrow().prepare_calls, 0);

    controller.drain_events();
    controller.set_strategy(&feed, Strategy::MostVisibleTopDown);
    assert!(feed.playing().is_empty());
    assert_eq!(feed.fake(0).borrow().prepare_calls, 1);
    assert!(controller.drain_events().contains(&AutoplayEvent::PlayerElected {
        media_id: id("item-0"),
        play_order: 0,
    }));
}

// ===== Empty elections =====

#[test]
fn empty_candidate_set_leaves_the_slot_untouched() {
    let (feed, mut controller) = playing_feed(Strategy::MostVisibleTopDown, 6);
    feed.fake(0).borrow_mut().position = 300;
    for item in &feed.items {
        item.borrow_mut().wants = false;
    }

    assert!(controller.find_best_player(&[]).is_none());
    assert!(controller.elect(&feed).is_none());
    assert!(controller.manager().is_current(&feed.item(0)));
    assert_eq!(saved(&controller, "item-0"), None);
    assert_eq!(feed.playing(), vec![0]);
}

#[test]
fn settling_with_nothing_to_play_is_a_no_op() {
    let feed = FakeFeed::new(4);
    for item in &feed.items {
        item.borrow_mut().wants = false;
    }
    let mut controller = ListController::default();

    feed.attach_visible(&mut controller);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    assert!(controller.drain_events().is_empty());
    assert_eq!(controller.manager().slot_state(), SlotState::Empty);
    assert_eq!(controller.manager().saved_state_count(), 0);
}

// ===== Detach =====

#[test]
fn detaching_the_current_player_saves_pauses_and_releases_it() {
    let (mut feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().position = 800;

    feed.attached[0] = false;
    controller.on_item_detached(&feed.item(0));

    {
        let item = feed.fake(0).borrow();
        assert_eq!((item.pause_calls, item.release_calls), (1, 1));
        assert!(!item.prepared);
    }
    assert_eq!(saved(&controller, "item-0"), Some((800, 5000)));
    assert_eq!(controller.manager().slot_state(), SlotState::Empty);
    assert!(!controller.is_attached(&feed.item(0)));
    assert!(controller.drain_events().contains(&AutoplayEvent::PlayerReleased {
        media_id: id("item-0")
    }));

    // A newly attached item does not start on its own
    feed.scroll_to(400);
    let newcomer = feed.item(3);
    controller.on_item_attached(&newcomer);

    assert!(feed.playing().is_empty());
    assert_eq!(feed.fake(3).borrow().start_calls, 0);
    assert_eq!(feed.fake(3).borrow().prepare_calls, 0);

    // Once its layout settles it prepares, and plays only when ready
    controller.on_layout_settled(&feed, &newcomer);
    assert_eq!(feed.fake(3).borrow().prepare_calls, 1);
    assert!(feed.playing().is_empty());
}

#[test]
fn detaching_an_idle_item_only_releases_it() {
    let (mut feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);

    feed.attached[2] = false;
    controller.on_item_detached(&feed.item(2));

    assert_eq!(feed.fake(2).borrow().release_calls, 1);
    assert_eq!(feed.fake(2).borrow().pause_calls, 0);
    assert_eq!(saved(&controller, "item-2"), None);
    assert_eq!(feed.playing(), vec![0]);
}

#[test]
fn reattached_current_player_resumes() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);

    // Pause via a strategy that never elects, keeping the slot assigned
    controller.set_strategy(&feed, Strategy::Rest);
    controller.set_strategy(&feed, Strategy::FirstPlayableTopDown);
    assert_eq!(feed.playing(), vec![0]);

    feed.fake(0).borrow_mut().playing = false;
    controller.on_item_attached(&feed.item(0));
    assert_eq!(feed.playing(), vec![0]);
}

#[test]
fn stale_prepared_callback_is_ignored() {
    let feed = FakeFeed::new(3);
    let mut controller = ListController::default();
    let item = feed.item(0);

    controller.on_item_attached(&item);
    controller.on_layout_settled(&feed, &item);
    controller.on_item_detached(&item);

    // The media layer reports readiness after the item went away
    feed.fake(0).borrow_mut().prepared = true;
    controller.on_prepared(&feed, &item);

    assert_eq!(feed.fake(0).borrow().start_calls, 0);
    assert_eq!(controller.manager().slot_state(), SlotState::Empty);
}

#[test]
fn layout_signal_after_claiming_does_not_restart() {
    let feed = FakeFeed::new(3);
    let mut controller = ListController::default();
    controller
        .manager_mut()
        .save_playback_state(id("item-0"), 1000, 5000);
    let item = feed.item(0);

    // Preparation finishes before the layout signal arrives
    controller.on_item_attached(&item);
    feed.fake(0).borrow_mut().prepared = true;
    controller.on_prepared(&feed, &item);
    assert_eq!(feed.playing(), vec![0]);

    feed.fake(0).borrow_mut().position = 3000;
    controller.on_layout_settled(&feed, &item);

    let item = feed.fake(0).borrow();
    assert_eq!(item.seeks, vec![1000]);
    assert_eq!(item.start_calls, 1);
    assert_eq!(item.position, 3000);
}

#[test]
fn repeated_callbacks_leave_a_playing_item_alone() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().position = 2000;
    controller
        .manager_mut()
        .save_playback_state(id("item-0"), 500, 5000);

    controller.on_prepared(&feed, &feed.item(0));
    controller.on_item_attached(&feed.item(0));

    let item = feed.fake(0).borrow();
    assert!(item.playing);
    assert!(item.seeks.is_empty());
    assert_eq!((item.start_calls, item.position), (1, 2000));
    assert!(controller.drain_events().is_empty());
}

// ===== Completion and errors =====

#[test]
fn completion_rewinds_and_frees_the_slot() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    {
        let mut item = feed.fake(0).borrow_mut();
        item.playing = false;
        item.position = 5000;
    }

    controller.on_completion(&feed.item(0));

    assert_eq!(saved(&controller, "item-0"), Some((0, 5000)));
    assert_eq!(controller.manager().slot_state(), SlotState::Empty);
    assert!(feed.playing().is_empty());

    // Nothing advances until the next election, which replays from zero
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);
    assert_eq!(feed.playing(), vec![0]);
    assert_eq!(feed.fake(0).borrow().seeks, vec![0]);
}

#[test]
fn handled_error_rewinds_pauses_and_frees_the_slot() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().position = 900;

    let handled = controller.on_error(&feed.item(0), &MediaError::new(1, -1004, "io"));

    assert!(handled);
    assert_eq!(saved(&controller, "item-0"), Some((0, 5000)));
    assert_eq!(feed.fake(0).borrow().pause_calls, 1);
    assert_eq!(controller.manager().slot_state(), SlotState::Empty);
    assert!(controller.drain_events().contains(&AutoplayEvent::PlaybackFailed {
        media_id: id("item-0"),
        handled: true,
    }));
}

#[test]
fn unhandled_error_changes_nothing() {
    let (feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().handles_errors = false;

    let handled = controller.on_error(&feed.item(0), &MediaError::new(100, 0, "server died"));

    assert!(!handled);
    assert_eq!(saved(&controller, "item-0"), None);
    assert_eq!(feed.fake(0).borrow().pause_calls, 0);
    assert!(controller.manager().is_current(&feed.item(0)));
}

#[test]
fn late_completion_after_detach_keeps_the_saved_position() {
    let (mut feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().position = 4000;

    feed.attached[0] = false;
    controller.on_item_detached(&feed.item(0));
    assert_eq!(saved(&controller, "item-0"), Some((4000, 5000)));
    controller.drain_events();

    controller.on_completion(&feed.item(0));

    assert_eq!(saved(&controller, "item-0"), Some((4000, 5000)));
    assert!(controller.drain_events().is_empty());
}

#[test]
fn late_error_after_detach_keeps_the_saved_position() {
    let (mut feed, mut controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);
    feed.fake(0).borrow_mut().position = 4000;

    feed.attached[0] = false;
    controller.on_item_detached(&feed.item(0));
    controller.drain_events();

    let handled = controller.on_error(&feed.item(0), &MediaError::new(1, -1004, "io"));

    assert!(!handled);
    assert_eq!(saved(&controller, "item-0"), Some((4000, 5000)));
    assert_eq!(feed.fake(0).borrow().pause_calls, 1);
    assert!(controller.drain_events().is_empty());
}

// ===== Grids and configuration =====

#[test]
fn grid_ranges_are_scanned_as_one_span() {
    let mut feed = FakeFeed::new(6);
    feed.ranges_override = Some(vec![VisibleRange::new(1, 2), VisibleRange::new(0, 0)]);
    let controller = ListController::default();

    let candidates = controller.collect_candidates(&feed);
    let orders: Vec<usize> = candidates.iter().map(Electable::play_order).collect();

    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(controller.elect(&feed).map(|c| c.media_id().clone()), Some(id("item-0")));
}

#[test]
fn current_player_leads_the_candidate_list() {
    let (mut feed, controller) = playing_feed(Strategy::FirstPlayableTopDown, 6);

    feed.scroll_to(300);
    let candidates = controller.collect_candidates(&feed);

    assert!(candidates[0].is(&feed.item(0)));
    assert_eq!(candidates.len(), 4);
}

#[test]
fn zero_state_capacity_is_rejected() {
    let config = AutoplayConfig {
        state_cache_capacity: Some(0),
        ..Default::default()
    };

    assert!(matches!(
        ListController::new(config),
        Err(AutoplayError::InvalidConfig(_))
    ));
}

#[test]
fn bounded_state_store_forgets_the_oldest_media() {
    let config = AutoplayConfig {
        strategy: Strategy::MostVisibleTopDown,
        state_cache_capacity: Some(1),
    };
    let mut controller = ListController::new(config).unwrap();
    let mut feed = FakeFeed::new(6);

    feed.attach_visible(&mut controller);
    for position in feed.visible_positions() {
        feed.finish_preparing(&mut controller, position);
    }
    feed.fake(0).borrow_mut().position = 100;

    feed.scroll_to(300);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);
    feed.fake(1).borrow_mut().position = 200;
    feed.scroll_to(0);
    controller.on_scroll_state_changed(&feed, ScrollState::Idle);

    assert_eq!(controller.manager().saved_state_count(), 1);
    assert_eq!(saved(&controller, "item-1"), Some((200, 5000)));
    assert_eq!(saved(&controller, "item-0"), None);
}
