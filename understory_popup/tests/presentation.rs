// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete bar and content transitions: ordering, legality, geometry and ownership.

mod common;

use std::rc::Rc;

use common::{
    BOUNDS, Event, SAFE_BOTTOM, Track, completion, config, count, host, opened, presented,
    recorded, states,
};
use kurbo::Rect;
use understory_popup::PresentationState::{
    Closed, Closing, Dismissing, Hidden, Open, Opening, Presenting,
};
use understory_popup::geometry::Insets;
use understory_popup::host::{PlainHost, PopupHost, TabBarHost, ToolbarHost};
use understory_popup::{PopupConfig, PopupController, TransitionResult};

#[test]
fn present_emits_state_then_will_then_did() {
    let (mut popup, log) = recorded(config());
    let mut host = host();

    assert!(popup.present_bar(&mut host, Track::new(1), true, None));
    assert_eq!(
        *log.borrow(),
        vec![Event::State(Presenting, Hidden), Event::WillPresent]
    );
    assert!(popup.is_animating());

    popup.advance(&mut host, 250);
    assert_eq!(popup.state(), Presenting);
    assert_eq!(log.borrow().len(), 2);

    popup.advance(&mut host, 500);
    assert_eq!(popup.state(), Closed);
    assert_eq!(
        *log.borrow(),
        vec![
            Event::State(Presenting, Hidden),
            Event::WillPresent,
            Event::State(Closed, Presenting),
            Event::DidPresent,
        ]
    );
    assert!(!popup.is_animating());
}

#[test]
fn bar_animates_from_hidden_to_closed_frame() {
    let (mut popup, _log) = recorded(config());
    let mut host = host();
    popup.present_bar(&mut host, Track::new(1), true, None);

    let bar = popup.bar().unwrap();
    assert_eq!(bar.frame().rect.height(), 0.0);
    assert_eq!(bar.frame().rect.y0, 1_000.0 - SAFE_BOTTOM);
    assert_eq!(host.surface().installed_bar_frame(), Some(bar.frame().rect));
    assert_eq!(host.surface().layout_passes(), 1);

    popup.advance(&mut host, 250);
    let mid = popup.bar().unwrap().frame().rect;
    assert!(mid.height() > 0.0 && mid.height() < 64.0 + SAFE_BOTTOM);

    popup.advance(&mut host, 500);
    assert_eq!(
        popup.bar().unwrap().frame().rect,
        Rect::new(0.0, 1_000.0 - 64.0 - SAFE_BOTTOM, 400.0, 1_000.0)
    );
}

#[test]
fn present_then_dismiss_restores_host_inset() {
    let (mut popup, _log) = recorded(config());
    let mut host = host();
    host.adjust_bottom_content_inset(20.0);

    popup.present_bar(&mut host, Track::new(1), true, None);
    assert_eq!(host.surface().bottom_content_inset(), 84.0);
    assert_eq!(popup.applied_bottom_inset(), 64.0);
    popup.advance(&mut host, 500);

    popup.dismiss_bar(&mut host, true, None);
    assert_eq!(host.surface().bottom_content_inset(), 20.0);
    popup.advance(&mut host, 1_000);

    assert_eq!(popup.state(), Hidden);
    assert_eq!(host.surface().bottom_content_inset(), 20.0);
    assert_eq!(popup.applied_bottom_inset(), 0.0);
}

#[test]
fn repeated_present_dismiss_cycles_do_not_drift() {
    let (mut popup, _log) = recorded(config());
    let mut host = host();
    for i in 0..5 {
        popup.present_bar(&mut host, Track::new(i), false, None);
        popup.dismiss_bar(&mut host, false, None);
    }
    assert_eq!(host.surface().bottom_content_inset(), 0.0);
}

#[test]
fn dismiss_fades_linearly_and_releases_bar_and_content() {
    let (mut popup, mut host, log) = presented();
    let track_witness = Rc::clone(&popup.content().unwrap().content().witness);

    popup.dismiss_bar(&mut host, true, None);
    assert!(popup.bar().unwrap().is_layout_suspended());
    assert_eq!(
        *log.borrow(),
        vec![Event::State(Dismissing, Closed), Event::WillDismiss]
    );

    popup.advance(&mut host, 250);
    let bar = popup.bar().unwrap();
    assert!((bar.frame().alpha - 0.5).abs() < 1e-9);

    popup.advance(&mut host, 500);
    assert_eq!(popup.state(), Hidden);
    assert!(popup.bar().is_none());
    assert!(popup.content().is_none());
    assert_eq!(Rc::strong_count(&track_witness), 1);
    assert!(host.surface().installed_bar_frame().is_none());
    assert_eq!(popup.presenting_transition().target(), None);
    assert_eq!(popup.dismissing_transition().target(), None);
    assert_eq!(
        log.borrow()[2..],
        [Event::State(Hidden, Dismissing), Event::DidDismiss]
    );
}

#[test]
fn dismiss_while_hidden_only_runs_completion_once() {
    let (mut popup, log) = recorded(config());
    let mut host = host();
    let (results, done) = completion();

    assert!(!popup.dismiss_bar(&mut host, true, done));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);
    assert!(log.borrow().is_empty());
    assert!(host.surface().installed_bar_frame().is_none());
    assert_eq!(host.surface().bottom_content_inset(), 0.0);

    popup.advance(&mut host, 10_000);
    assert_eq!(results.borrow().len(), 1);
}

#[test]
fn open_is_rejected_unless_closed() {
    let (mut popup, log) = recorded(config());
    let mut host = host();

    // Hidden.
    let (results, done) = completion();
    assert!(!popup.open_content(&mut host, true, done));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);

    // Presenting.
    popup.present_bar(&mut host, Track::new(1), true, None);
    let before = log.borrow().len();
    let (results, done) = completion();
    assert!(!popup.open_content(&mut host, true, done));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);
    assert_eq!(log.borrow().len(), before);
    assert_eq!(popup.state(), Presenting);

    // Open.
    popup.advance(&mut host, 500);
    popup.open_content(&mut host, false, None);
    assert_eq!(popup.state(), Open);
    let (results, done) = completion();
    assert!(!popup.open_content(&mut host, true, done));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);
    assert_eq!(popup.state(), Open);
}

#[test]
fn open_and_close_round_trip_with_notifications() {
    let (mut popup, mut host, log) = presented();
    let (results, done) = completion();

    assert!(popup.open_content(&mut host, true, done));
    assert_eq!(
        *log.borrow(),
        vec![Event::State(Opening, Closed), Event::WillOpen(1)]
    );
    assert!(results.borrow().is_empty());

    popup.advance(&mut host, 500);
    assert_eq!(popup.state(), Open);
    assert_eq!(*results.borrow(), vec![TransitionResult::Completed]);
    assert_eq!(popup.content().unwrap().frame().rect, BOUNDS);
    assert_eq!(popup.content().unwrap().frame().alpha, 1.0);

    popup.close_content(&mut host, true, None);
    popup.advance(&mut host, 1_000);
    assert_eq!(popup.state(), Closed);
    assert_eq!(
        *log.borrow(),
        vec![
            Event::State(Opening, Closed),
            Event::WillOpen(1),
            Event::State(Open, Opening),
            Event::DidOpen(1),
            Event::State(Closing, Open),
            Event::WillClose(1),
            Event::State(Closed, Closing),
            Event::DidClose(1),
        ]
    );
}

#[test]
fn close_is_rejected_unless_open() {
    let (mut popup, mut host, log) = presented();
    let (results, done) = completion();
    assert!(!popup.close_content(&mut host, true, done));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);
    assert!(log.borrow().is_empty());
}

#[test]
fn requests_during_a_transition_are_rejected() {
    let (mut popup, mut host, _log) = presented();
    popup.open_content(&mut host, true, None);

    let (results, done) = completion();
    assert!(!popup.dismiss_bar(&mut host, true, done));
    assert!(!popup.close_content(&mut host, true, None));
    assert!(!popup.present_bar(&mut host, Track::new(2), true, None));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);
    assert_eq!(popup.state(), Opening);
}

#[test]
fn dismiss_from_open_closes_first() {
    let (mut popup, mut host, log) = opened();
    let (results, done) = completion();

    assert!(popup.dismiss_bar(&mut host, true, done));
    assert_eq!(popup.state(), Closing);

    popup.advance(&mut host, 500);
    assert_eq!(popup.state(), Dismissing);
    assert!(results.borrow().is_empty());

    popup.advance(&mut host, 1_000);
    assert_eq!(popup.state(), Hidden);
    assert_eq!(*results.borrow(), vec![TransitionResult::Completed]);
    assert_eq!(
        states(&log),
        vec![
            (Closing, Open),
            (Closed, Closing),
            (Dismissing, Closed),
            (Hidden, Dismissing),
        ]
    );
    assert_eq!(count(&log, &Event::DidClose(1)), 1);
    assert_eq!(count(&log, &Event::DidDismiss), 1);
}

#[test]
fn non_animated_requests_complete_synchronously() {
    let (mut popup, log) = recorded(config());
    let mut host = host();
    let (results, done) = completion();

    popup.present_bar(&mut host, Track::new(1), false, done);
    assert_eq!(popup.state(), Closed);
    assert_eq!(*results.borrow(), vec![TransitionResult::Completed]);
    assert_eq!(states(&log), vec![(Presenting, Hidden), (Closed, Presenting)]);
    assert!(!popup.is_animating());
}

#[test]
fn closed_bar_height_follows_docked_element() {
    for safe in [0.0, 34.0] {
        let mut plain = PlainHost::new(BOUNDS, Insets::bottom(safe));
        let mut popup = PopupController::<Track>::new(PopupConfig::default());
        popup.present_bar(&mut plain, Track::new(1), false, None);
        assert_eq!(popup.bar().unwrap().frame().rect.height(), 64.0 + safe);

        let mut toolbar = ToolbarHost::new(BOUNDS, Insets::bottom(safe), 49.0);
        assert_eq!(toolbar.bottom_bar_view().unwrap().height(), 49.0);
        let mut popup = PopupController::<Track>::new(PopupConfig::default());
        popup.present_bar(&mut toolbar, Track::new(1), false, None);
        let rect = popup.bar().unwrap().frame().rect;
        assert_eq!(rect.height(), 64.0);
        assert_eq!(rect.y1, 1_000.0 - safe - 49.0);
    }
}

#[test]
fn bar_sits_directly_above_tab_bar() {
    let mut host = TabBarHost::new(BOUNDS, Insets::bottom(34.0), 49.0);
    let mut popup = PopupController::<Track>::default();
    popup.present_bar(&mut host, Track::new(1), false, None);
    let rect = popup.bar().unwrap().frame().rect;
    assert_eq!(rect.y1, host.default_frame_for_bottom_bar().y0);
    assert_eq!(rect.height(), 64.0);
}

#[test]
fn empty_host_yields_zero_height_bar() {
    let mut host = PlainHost::new(Rect::ZERO, Insets::bottom(34.0));
    let mut popup = PopupController::<Track>::default();
    assert!(popup.present_bar(&mut host, Track::new(1), false, None));
    assert_eq!(popup.state(), Closed);
    assert_eq!(popup.bar().unwrap().frame().rect.height(), 0.0);
}

#[test]
fn layout_bar_follows_host_resize() {
    let (mut popup, mut host, _log) = presented();
    host.surface_mut()
        .set_bounds(Rect::new(0.0, 0.0, 800.0, 500.0));

    assert!(popup.layout_bar(&host));
    assert_eq!(
        popup.bar().unwrap().frame().rect,
        Rect::new(0.0, 500.0 - 64.0 - SAFE_BOTTOM, 800.0, 500.0)
    );

    popup.open_content(&mut host, true, None);
    assert!(!popup.layout_bar(&host));
}

#[test]
fn tap_opens_content_and_restores_highlight() {
    let (mut popup, mut host, log) = presented();
    assert!(popup.tap_bar(&mut host));
    assert!(!popup.bar().unwrap().is_highlighted());
    assert_eq!(popup.state(), Opening);
    assert_eq!(count(&log, &Event::WillOpen(1)), 1);

    popup.advance(&mut host, 500);
    assert!(!popup.tap_bar(&mut host));
}

#[test]
fn disabled_tap_does_nothing() {
    let (mut popup, mut host, log) = presented();
    popup.set_bar_tap_enabled(false);
    assert!(!popup.tap_bar(&mut host));
    assert_eq!(popup.state(), Closed);
    assert!(log.borrow().is_empty());
}

#[test]
fn set_content_replaces_without_leaking() {
    let (mut popup, host, _log) = presented();
    let mut witnesses = vec![Rc::clone(&popup.content().unwrap().content().witness)];

    for id in 2..7 {
        let track = Track::new(id);
        witnesses.push(Rc::clone(&track.witness));
        assert!(popup.set_content(&host, track).is_ok());

        let content = popup.content().unwrap();
        assert_eq!(content.content().id, id);
        assert_eq!(
            popup.dismissing_transition().target(),
            Some(understory_popup::interactive::DragTarget::Content(
                content.id()
            ))
        );
    }

    let (live, previous) = witnesses.split_last().unwrap();
    assert_eq!(Rc::strong_count(live), 2);
    for witness in previous {
        assert_eq!(Rc::strong_count(witness), 1);
    }
}

#[test]
fn set_content_hands_back_when_not_closed() {
    let (mut popup, host, _log) = opened();
    let rejected = popup.set_content(&host, Track::new(9)).unwrap_err();
    assert_eq!(rejected.id, 9);
    assert_eq!(popup.content().unwrap().content().id, 1);
}

#[test]
fn release_on_close_drops_content() {
    let mut config = config();
    config.release_content_on_close = true;
    let (mut popup, log) = recorded(config);
    let mut host = host();
    popup.present_bar(&mut host, Track::new(1), false, None);
    popup.open_content(&mut host, false, None);
    popup.close_content(&mut host, false, None);

    assert_eq!(count(&log, &Event::DidClose(1)), 1);
    assert!(popup.content().is_none());
    let (results, done) = completion();
    assert!(!popup.open_content(&mut host, true, done));
    assert_eq!(*results.borrow(), vec![TransitionResult::Rejected]);

    assert!(popup.set_content(&host, Track::new(2)).is_ok());
    assert!(popup.open_content(&mut host, false, None));
    assert_eq!(count(&log, &Event::DidOpen(2)), 1);
}

#[test]
fn removed_observer_stops_receiving() {
    let (mut popup, log) = recorded(config());
    let mut host = host();
    let extra_log = common::Log::default();
    let id = popup.add_observer(Box::new(common::Recorder::new(extra_log.clone())));
    assert!(popup.remove_observer(id).is_some());

    popup.present_bar(&mut host, Track::new(1), false, None);
    assert!(extra_log.borrow().is_empty());
    assert_eq!(states(&log).len(), 2);
}

/// Drives a long pseudo-random script of requests and checks every reported
/// state change is an edge of the state machine.
#[test]
fn scripted_requests_only_follow_legal_edges() {
    let (mut popup, log) = recorded(config());
    let mut host = host();
    let mut seed: u32 = 0x2545_f491;
    let mut now = 0;

    for step in 0..2_000_u32 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let animated = seed & 0x100 != 0;
        match seed % 9 {
            0 => {
                popup.present_bar(&mut host, Track::new(step), animated, None);
            }
            1 => {
                popup.dismiss_bar(&mut host, animated, None);
            }
            2 | 3 => {
                popup.open_content(&mut host, animated, None);
            }
            4 => {
                popup.close_content(&mut host, animated, None);
            }
            5 => {
                popup.tap_bar(&mut host);
            }
            6 => {
                let y = f64::from(seed % 1_000);
                popup.drag_began(&host, kurbo::Point::new(10.0, y), now);
            }
            7 => {
                let y = f64::from((seed >> 8) % 1_000);
                now += 16;
                popup.drag_changed(kurbo::Point::new(10.0, y), now);
                popup.drag_ended(&mut host, kurbo::Point::new(10.0, y), now);
            }
            _ => {
                now += u64::from(seed % 400);
                popup.advance(&mut host, now);
            }
        }
    }

    let transitions = states(&log);
    assert!(transitions.len() > 50, "script should exercise the machine");
    for (state, previous) in transitions {
        assert!(
            previous.is_legal_edge(state),
            "illegal edge {previous:?} -> {state:?}"
        );
    }
    if matches!(popup.state(), Hidden | Dismissing) {
        assert_eq!(host.surface().bottom_content_inset(), 0.0);
    } else {
        assert_eq!(host.surface().bottom_content_inset(), 64.0);
    }
}
