// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content transitions: open, close, replace.

use crate::animation::{Easing, Frame};
use crate::controller::{
    Completion, ContentStep, ContentView, PopupContent, PopupController, TransitionResult,
    duration_if, finish,
};
use crate::host::PopupHost;
use crate::interactive::DragTarget;
use crate::state::PresentationState;

impl<C: PopupContent> PopupController<C> {
    /// Opens the content above the bar.
    ///
    /// Only legal while [`Closed`](PresentationState::Closed) with content
    /// attached. Drags are not delegated to the interactive transitions until
    /// the content has opened.
    ///
    /// Returns `false` if the request was rejected; `completion` runs either way.
    pub fn open_content<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        animated: bool,
        completion: Option<Completion>,
    ) -> bool {
        if self.state != PresentationState::Closed {
            return self.reject("open_content", completion);
        }
        let Some(content) = &self.content else {
            return self.reject("open_content", completion);
        };
        let open = self.content_frames_for(host, content.style()).open;

        self.set_state(PresentationState::Opening);
        if let Some(content) = &self.content {
            self.observers.for_each(|o| o.will_open(content.content()));
        }
        self.interactive_delegation = false;

        let duration = duration_if(animated, self.config.content_animation_ms);
        self.start_content(
            host,
            ContentStep::Open,
            Frame::opaque(open),
            duration,
            Easing::EaseInOut,
            completion,
        );
        true
    }

    /// Closes the content back behind the bar.
    ///
    /// Only legal while [`Open`](PresentationState::Open).
    pub fn close_content<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        animated: bool,
        completion: Option<Completion>,
    ) -> bool {
        if self.state != PresentationState::Open {
            return self.reject("close_content", completion);
        }
        let Some(content) = &self.content else {
            return self.reject("close_content", completion);
        };
        let closed = self.content_frames_for(host, content.style()).closed;

        self.set_state(PresentationState::Closing);
        if let Some(content) = &self.content {
            self.observers.for_each(|o| o.will_close(content.content()));
        }
        self.interactive_delegation = false;

        let duration = duration_if(animated, self.config.content_animation_ms);
        self.start_content(
            host,
            ContentStep::Close,
            Frame::transparent(closed),
            duration,
            Easing::EaseInOut,
            completion,
        );
        true
    }

    pub(crate) fn complete_content<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        step: ContentStep,
        completion: Option<Completion>,
    ) {
        match step {
            ContentStep::Open => {
                self.capture_scroll_offset();
                self.set_state(PresentationState::Open);
                self.interactive_delegation = true;
                if let Some(content) = &self.content {
                    self.observers.for_each(|o| o.did_open(content.content()));
                }
            }
            ContentStep::Close => {
                self.set_state(PresentationState::Closed);
                self.interactive_delegation = true;
                self.capture_scroll_offset();
                if let Some(content) = &self.content {
                    self.observers.for_each(|o| o.did_close(content.content()));
                }
                if self.config.release_content_on_close {
                    self.content = None;
                    self.dismissing.detach();
                }
            }
            ContentStep::Revert(origin) => {
                self.set_state(origin);
                self.interactive_delegation = true;
            }
        }
        finish(completion, TransitionResult::Completed);

        if self.state == PresentationState::Closed {
            if let Some(queued) = self.queued_dismiss.take() {
                self.dismiss_bar(host, queued.animated, queued.completion);
            }
        }
    }

    /// Replaces the content while the bar is up and the content is closed.
    ///
    /// The dismissing transition is reattached to the new content and the
    /// previous content is dropped. Hands `content` back if the controller is
    /// in any other state.
    pub fn set_content<H: PopupHost + ?Sized>(&mut self, host: &H, content: C) -> Result<(), C> {
        if self.state != PresentationState::Closed || self.is_animating() {
            return Err(content);
        }
        let style = self.config.presentation_style;
        let closed = self.content_frames_for(host, style).closed;
        let id = self.next_content_id();
        self.content = Some(ContentView::new(
            id,
            content,
            style,
            Frame::transparent(closed),
        ));
        self.dismissing.attach(DragTarget::Content(id));
        self.capture_scroll_offset();
        Ok(())
    }

    /// Re-reads the content's scroll offset after it scrolled.
    pub fn content_did_scroll(&mut self) {
        self.capture_scroll_offset();
    }

    fn capture_scroll_offset(&mut self) {
        let offset = self
            .content
            .as_ref()
            .and_then(|content| content.content().scroll_offset());
        self.dismissing.capture_scroll_offset(offset);
    }
}
