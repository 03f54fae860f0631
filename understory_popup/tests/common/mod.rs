// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the popup integration tests.

#![allow(
    dead_code,
    unreachable_pub,
    reason = "each test binary uses a different subset of these helpers"
)]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_popup::geometry::{Insets, PresentationStyle};
use understory_popup::host::PlainHost;
use understory_popup::{
    BarView, Completion, PopupConfig, PopupContent, PopupController, PopupObserver,
    PresentationState, TransitionResult,
};

pub const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 1_000.0);
pub const SAFE_BOTTOM: f64 = 34.0;

/// Content with an identity, an optional scroll offset and a drop witness.
#[derive(Debug)]
pub struct Track {
    pub id: u32,
    pub scroll: Option<f64>,
    pub witness: Rc<()>,
}

impl Track {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            scroll: None,
            witness: Rc::new(()),
        }
    }
}

impl PopupContent for Track {
    fn scroll_offset(&self) -> Option<f64> {
        self.scroll
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    State(PresentationState, PresentationState),
    WillPresent,
    DidPresent,
    WillDismiss,
    DidDismiss,
    WillOpen(u32),
    DidOpen(u32),
    WillClose(u32),
    DidClose(u32),
    Interactive(PresentationState, f64),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct Recorder {
    log: Log,
}

impl Recorder {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl PopupObserver<Track> for Recorder {
    fn state_changed(&mut self, state: PresentationState, previous: PresentationState) {
        self.log.borrow_mut().push(Event::State(state, previous));
    }

    fn will_present(&mut self, _bar: &BarView) {
        self.log.borrow_mut().push(Event::WillPresent);
    }

    fn did_present(&mut self, _bar: &BarView) {
        self.log.borrow_mut().push(Event::DidPresent);
    }

    fn will_dismiss(&mut self, _bar: &BarView) {
        self.log.borrow_mut().push(Event::WillDismiss);
    }

    fn did_dismiss(&mut self, _bar: &BarView) {
        self.log.borrow_mut().push(Event::DidDismiss);
    }

    fn will_open(&mut self, content: &Track) {
        self.log.borrow_mut().push(Event::WillOpen(content.id));
    }

    fn did_open(&mut self, content: &Track) {
        self.log.borrow_mut().push(Event::DidOpen(content.id));
    }

    fn will_close(&mut self, content: &Track) {
        self.log.borrow_mut().push(Event::WillClose(content.id));
    }

    fn did_close(&mut self, content: &Track) {
        self.log.borrow_mut().push(Event::DidClose(content.id));
    }

    fn interactive_presentation(
        &mut self,
        _content: &Track,
        state: PresentationState,
        progress: f64,
        _location: Point,
    ) {
        self.log
            .borrow_mut()
            .push(Event::Interactive(state, progress));
    }
}

pub fn host() -> PlainHost {
    PlainHost::new(BOUNDS, Insets::bottom(SAFE_BOTTOM))
}

/// Full-screen content so that drag progress is displacement over 1000pt.
pub fn config() -> PopupConfig {
    PopupConfig {
        presentation_style: PresentationStyle::FullScreen,
        ..PopupConfig::default()
    }
}

pub fn recorded(config: PopupConfig) -> (PopupController<Track>, Log) {
    let log: Log = Rc::default();
    let mut popup = PopupController::new(config);
    popup.add_observer(Box::new(Recorder::new(log.clone())));
    (popup, log)
}

pub type Results = Rc<RefCell<Vec<TransitionResult>>>;

pub fn completion() -> (Results, Option<Completion>) {
    let results: Results = Rc::default();
    let sink = results.clone();
    let completion: Completion = Box::new(move |result| sink.borrow_mut().push(result));
    (results, Some(completion))
}

/// A controller with the bar presented (non-animated) and the log cleared.
pub fn presented() -> (PopupController<Track>, PlainHost, Log) {
    let (mut popup, log) = recorded(config());
    let mut host = host();
    assert!(popup.present_bar(&mut host, Track::new(1), false, None));
    log.borrow_mut().clear();
    (popup, host, log)
}

/// A controller with the content open (non-animated) and the log cleared.
pub fn opened() -> (PopupController<Track>, PlainHost, Log) {
    let (mut popup, mut host, log) = presented();
    assert!(popup.open_content(&mut host, false, None));
    log.borrow_mut().clear();
    (popup, host, log)
}

pub fn states(log: &Log) -> Vec<(PresentationState, PresentationState)> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::State(state, previous) => Some((*state, *previous)),
            _ => None,
        })
        .collect()
}

pub fn count(log: &Log, wanted: &Event) -> usize {
    log.borrow().iter().filter(|event| *event == wanted).count()
}
