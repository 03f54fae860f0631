// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar transitions: present, dismiss, relayout and tap.

use crate::animation::{Easing, Frame};
use crate::controller::{
    BarStep, BarView, Completion, ContentView, PopupContent, PopupController, QueuedDismiss,
    TransitionResult, duration_if, finish,
};
use crate::host::PopupHost;
use crate::interactive::DragTarget;
use crate::state::PresentationState;

impl<C: PopupContent> PopupController<C> {
    /// Presents the bar with `content` attached, pinned above the host's bottom element.
    ///
    /// Only legal while [`Hidden`](PresentationState::Hidden). The bar is
    /// installed beneath the host's docked element at its hidden frame and
    /// animates to its closed frame; the host's bottom content inset grows by
    /// the bar height for as long as the bar is up.
    ///
    /// Returns `false` if the request was rejected; `completion` runs either way.
    pub fn present_bar<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        content: C,
        animated: bool,
        completion: Option<Completion>,
    ) -> bool {
        if self.state != PresentationState::Hidden {
            return self.reject("present_bar", completion);
        }

        let height = sanitize_height(self.config.bar_height);
        let frames = self.bar_frames_for(host, height);
        self.bar = Some(BarView::new(height, Frame::opaque(frames.hidden)));

        let style = self.config.presentation_style;
        let content_closed = self.content_frames_for(host, style).closed;
        let id = self.next_content_id();
        self.content = Some(ContentView::new(
            id,
            content,
            style,
            Frame::transparent(content_closed),
        ));

        host.install_popup_bar(frames.hidden);
        host.layout_if_needed();

        self.set_state(PresentationState::Presenting);
        if let Some(bar) = &self.bar {
            self.observers.for_each(|o| o.will_present(bar));
        }

        host.adjust_bottom_content_inset(height);
        self.applied_inset = height;

        let duration = duration_if(animated, self.config.bar_animation_ms);
        self.start_bar(
            host,
            BarStep::Present,
            Frame::opaque(frames.closed),
            duration,
            Easing::EaseInOut,
            completion,
        );
        true
    }

    /// Dismisses the bar, releasing it and its content once the animation completes.
    ///
    /// Rejected while [`Hidden`](PresentationState::Hidden) or while any
    /// transition is in flight. When the content is open it is closed first
    /// and the dismissal follows from the close completion.
    pub fn dismiss_bar<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        animated: bool,
        completion: Option<Completion>,
    ) -> bool {
        match self.state {
            PresentationState::Closed => {}
            PresentationState::Open if self.queued_dismiss.is_none() => {
                self.queued_dismiss = Some(QueuedDismiss {
                    animated,
                    completion,
                });
                if !self.close_content(host, animated, None) {
                    if let Some(queued) = self.queued_dismiss.take() {
                        finish(queued.completion, TransitionResult::Rejected);
                    }
                    return false;
                }
                return true;
            }
            _ => return self.reject("dismiss_bar", completion),
        }

        let Some(bar) = &mut self.bar else {
            return self.reject("dismiss_bar", completion);
        };
        bar.layout_suspended = true;
        let height = bar.height();
        let hidden = self.bar_frames_for(host, height).hidden;

        self.set_state(PresentationState::Dismissing);
        if let Some(bar) = &self.bar {
            self.observers.for_each(|o| o.will_dismiss(bar));
        }

        host.adjust_bottom_content_inset(-self.applied_inset);
        self.applied_inset = 0.0;

        let duration = duration_if(animated, self.config.bar_animation_ms);
        self.start_bar(
            host,
            BarStep::Dismiss,
            Frame::transparent(hidden),
            duration,
            Easing::Linear,
            completion,
        );
        true
    }

    pub(crate) fn complete_bar<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        step: BarStep,
        completion: Option<Completion>,
    ) {
        match step {
            BarStep::Present => {
                self.set_state(PresentationState::Closed);
                if let Some(bar) = &self.bar {
                    self.observers.for_each(|o| o.did_present(bar));
                }
                self.presenting.attach(DragTarget::Bar);
                if let Some(content) = &self.content {
                    self.dismissing.attach(DragTarget::Content(content.id()));
                    self.dismissing
                        .capture_scroll_offset(content.content().scroll_offset());
                }
            }
            BarStep::Dismiss => {
                self.set_state(PresentationState::Hidden);
                if let Some(bar) = &self.bar {
                    self.observers.for_each(|o| o.did_dismiss(bar));
                }
                host.remove_popup_bar();
                self.reset_peek();
                self.bar = None;
                self.content = None;
                self.presenting.detach();
                self.dismissing.detach();
            }
        }
        finish(completion, TransitionResult::Completed);
    }

    /// Re-pins the bar (and resting content) to the host's current geometry.
    ///
    /// Does nothing while an animation or drag owns the frames, while bar
    /// layout is suspended, or when no bar is installed. Returns `true` if
    /// frames were updated.
    pub fn layout_bar<H: PopupHost + ?Sized>(&mut self, host: &H) -> bool {
        if self.is_animating()
            || !matches!(
                self.state,
                PresentationState::Closed | PresentationState::Open
            )
        {
            return false;
        }
        let Some(bar) = &self.bar else {
            return false;
        };
        if bar.layout_suspended {
            return false;
        }
        let closed = self.bar_frames_for(host, bar.height()).closed;
        let content_frames = self
            .content
            .as_ref()
            .map(|content| self.content_frames_for(host, content.style()));

        if let Some(bar) = &mut self.bar {
            bar.frame.rect = closed;
        }
        if let (Some(content), Some(frames)) = (&mut self.content, content_frames) {
            content.frame = if self.state == PresentationState::Open {
                Frame::opaque(frames.open)
            } else {
                Frame::transparent(frames.closed)
            };
        }
        true
    }

    /// Handles a tap on the bar: highlights it around a request to open the content.
    ///
    /// Returns `true` if the open request was accepted.
    pub fn tap_bar<H: PopupHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match &mut self.bar {
            Some(bar) if bar.tap_enabled => bar.highlighted = true,
            _ => return false,
        }
        let accepted = self.open_content(host, true, None);
        if let Some(bar) = &mut self.bar {
            bar.highlighted = false;
        }
        accepted
    }
}

fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}
