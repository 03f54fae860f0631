// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capability interface and stock adapters.
//!
//! The controller never owns its host. Every operation borrows the host for
//! the duration of the call, reads its geometry, and applies the few side
//! effects the bar needs (bottom content inset, installing the bar beneath the
//! docked element, forcing a layout pass).
//!
//! Three adapters cover the common container shapes:
//!
//! - [`TabBarHost`]: a tab bar that reaches the bottom edge and covers the safe area itself.
//! - [`ToolbarHost`]: a toolbar sitting above the safe area.
//! - [`PlainHost`]: no docked element; the bar covers the safe area.
//!
//! ```
//! use kurbo::Rect;
//! use understory_popup::geometry::Insets;
//! use understory_popup::host::{PlainHost, PopupHost, TabBarHost};
//!
//! let bounds = Rect::new(0.0, 0.0, 390.0, 844.0);
//! let tabs = TabBarHost::new(bounds, Insets::bottom(34.0), 49.0);
//! assert!(tabs.has_docked_bottom_element());
//! assert_eq!(tabs.insets_for_bottom_bar().bottom, 0.0);
//!
//! let plain = PlainHost::new(bounds, Insets::bottom(34.0));
//! assert!(!plain.has_docked_bottom_element());
//! assert_eq!(plain.insets_for_bottom_bar().bottom, 34.0);
//! ```

use kurbo::Rect;

use crate::geometry::Insets;

/// The host's bottom-docked element, such as a tab bar or toolbar.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DockedElement {
    /// Frame of the element in host coordinates.
    pub frame: Rect,
}

impl DockedElement {
    /// An invisible zero-height element at the top edge of `default_frame`.
    ///
    /// Used when a host does not report a docked element.
    #[must_use]
    pub fn placeholder(default_frame: Rect) -> Self {
        Self {
            frame: Rect::new(
                default_frame.x0,
                default_frame.y0,
                default_frame.x1,
                default_frame.y0,
            ),
        }
    }

    /// Height of the element.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.frame.height()
    }
}

/// What the popup controller needs from the container it lives in.
///
/// Only the geometry queries are required; side effects default to no-ops.
pub trait PopupHost {
    /// Bounds of the host's view.
    fn bounds(&self) -> Rect;

    /// Default frame of the host's bottom element.
    ///
    /// The bar is pinned directly above its top edge.
    fn default_frame_for_bottom_bar(&self) -> Rect;

    /// Insets for the bottom bar. Only `bottom` is consumed.
    fn insets_for_bottom_bar(&self) -> Insets;

    /// The docked element, if the host has one.
    fn bottom_bar_view(&self) -> Option<DockedElement> {
        None
    }

    /// The docked element, or a zero-height placeholder when there is none.
    fn docked_element(&self) -> DockedElement {
        self.bottom_bar_view()
            .unwrap_or_else(|| DockedElement::placeholder(self.default_frame_for_bottom_bar()))
    }

    /// Returns `true` if a docked element with non-zero height is present.
    fn has_docked_bottom_element(&self) -> bool {
        self.docked_element_height() > 0.0
    }

    /// Height of the docked element, `0` when there is none.
    fn docked_element_height(&self) -> f64 {
        self.docked_element().height()
    }

    /// Adjusts the bottom inset of the host's scrollable content by `delta`.
    fn adjust_bottom_content_inset(&mut self, delta: f64);

    /// Inserts the bar container directly beneath the docked element.
    fn install_popup_bar(&mut self, frame: Rect) {
        let _ = frame;
    }

    /// Removes the bar container from the host's hierarchy.
    fn remove_popup_bar(&mut self) {}

    /// Forces a pending layout pass.
    fn layout_if_needed(&mut self) {}

    /// Open frame for [`PresentationStyle::Custom`](crate::geometry::PresentationStyle::Custom).
    fn custom_content_frame(&self) -> Option<Rect> {
        None
    }
}

/// State shared by the stock adapters.
#[derive(Clone, Debug, PartialEq)]
pub struct HostSurface {
    bounds: Rect,
    safe_area: Insets,
    bottom_content_inset: f64,
    bar_frame: Option<Rect>,
    layout_passes: u32,
}

impl HostSurface {
    fn new(bounds: Rect, safe_area: Insets) -> Self {
        Self {
            bounds,
            safe_area,
            bottom_content_inset: 0.0,
            bar_frame: None,
            layout_passes: 0,
        }
    }

    /// Bounds of the host.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Sets the bounds, for example after a rotation.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Safe-area insets of the host.
    #[must_use]
    pub fn safe_area(&self) -> Insets {
        self.safe_area
    }

    /// Sets the safe-area insets.
    pub fn set_safe_area(&mut self, safe_area: Insets) {
        self.safe_area = safe_area;
    }

    /// Current bottom inset of the host's scrollable content.
    #[must_use]
    pub fn bottom_content_inset(&self) -> f64 {
        self.bottom_content_inset
    }

    /// Frame the bar was installed with, while it is installed.
    #[must_use]
    pub fn installed_bar_frame(&self) -> Option<Rect> {
        self.bar_frame
    }

    /// Number of forced layout passes so far.
    #[must_use]
    pub fn layout_passes(&self) -> u32 {
        self.layout_passes
    }

    fn adjust_inset(&mut self, delta: f64) {
        self.bottom_content_inset += delta;
    }

    fn set_bar(&mut self, frame: Option<Rect>) {
        self.bar_frame = frame;
    }

    fn layout(&mut self) {
        self.layout_passes += 1;
    }

    fn bottom_edge(&self) -> Rect {
        let b = self.bounds;
        Rect::new(b.x0, b.y1, b.x1, b.y1)
    }
}

/// A tab-bar container. The tab bar extends to the bottom edge and covers the safe area.
#[derive(Clone, Debug, PartialEq)]
pub struct TabBarHost {
    surface: HostSurface,
    tab_bar_height: f64,
    tab_bar_hidden: bool,
}

impl TabBarHost {
    /// Creates a host with a visible tab bar of `tab_bar_height` above the safe area.
    #[must_use]
    pub fn new(bounds: Rect, safe_area: Insets, tab_bar_height: f64) -> Self {
        Self {
            surface: HostSurface::new(bounds, safe_area),
            tab_bar_height,
            tab_bar_hidden: false,
        }
    }

    /// Shows or hides the tab bar.
    pub fn set_tab_bar_hidden(&mut self, hidden: bool) {
        self.tab_bar_hidden = hidden;
    }

    /// Shared host state.
    #[must_use]
    pub fn surface(&self) -> &HostSurface {
        &self.surface
    }

    /// Mutable shared host state.
    pub fn surface_mut(&mut self) -> &mut HostSurface {
        &mut self.surface
    }

    fn tab_bar_frame(&self) -> Rect {
        let b = self.surface.bounds;
        let height = self.tab_bar_height + self.surface.safe_area.bottom;
        Rect::new(b.x0, b.y1 - height, b.x1, b.y1)
    }
}

impl PopupHost for TabBarHost {
    fn bounds(&self) -> Rect {
        self.surface.bounds
    }

    fn default_frame_for_bottom_bar(&self) -> Rect {
        if self.tab_bar_hidden {
            self.surface.bottom_edge()
        } else {
            self.tab_bar_frame()
        }
    }

    fn insets_for_bottom_bar(&self) -> Insets {
        if self.tab_bar_hidden {
            Insets::bottom(self.surface.safe_area.bottom)
        } else {
            Insets::ZERO
        }
    }

    fn bottom_bar_view(&self) -> Option<DockedElement> {
        (!self.tab_bar_hidden).then(|| DockedElement {
            frame: self.tab_bar_frame(),
        })
    }

    fn adjust_bottom_content_inset(&mut self, delta: f64) {
        self.surface.adjust_inset(delta);
    }

    fn install_popup_bar(&mut self, frame: Rect) {
        self.surface.set_bar(Some(frame));
    }

    fn remove_popup_bar(&mut self) {
        self.surface.set_bar(None);
    }

    fn layout_if_needed(&mut self) {
        self.surface.layout();
    }
}

/// A navigation-style container with a toolbar above the safe area.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolbarHost {
    surface: HostSurface,
    toolbar_height: f64,
    toolbar_hidden: bool,
}

impl ToolbarHost {
    /// Creates a host with a visible toolbar of `toolbar_height`.
    #[must_use]
    pub fn new(bounds: Rect, safe_area: Insets, toolbar_height: f64) -> Self {
        Self {
            surface: HostSurface::new(bounds, safe_area),
            toolbar_height,
            toolbar_hidden: false,
        }
    }

    /// Shows or hides the toolbar.
    pub fn set_toolbar_hidden(&mut self, hidden: bool) {
        self.toolbar_hidden = hidden;
    }

    /// Shared host state.
    #[must_use]
    pub fn surface(&self) -> &HostSurface {
        &self.surface
    }

    /// Mutable shared host state.
    pub fn surface_mut(&mut self) -> &mut HostSurface {
        &mut self.surface
    }

    fn toolbar_frame(&self) -> Rect {
        let b = self.surface.bounds;
        let bottom = b.y1 - self.surface.safe_area.bottom;
        Rect::new(b.x0, bottom - self.toolbar_height, b.x1, bottom)
    }
}

impl PopupHost for ToolbarHost {
    fn bounds(&self) -> Rect {
        self.surface.bounds
    }

    fn default_frame_for_bottom_bar(&self) -> Rect {
        if self.toolbar_hidden {
            self.surface.bottom_edge()
        } else {
            self.toolbar_frame()
        }
    }

    fn insets_for_bottom_bar(&self) -> Insets {
        if self.toolbar_hidden {
            Insets::bottom(self.surface.safe_area.bottom)
        } else {
            Insets::ZERO
        }
    }

    fn bottom_bar_view(&self) -> Option<DockedElement> {
        (!self.toolbar_hidden).then(|| DockedElement {
            frame: self.toolbar_frame(),
        })
    }

    fn adjust_bottom_content_inset(&mut self, delta: f64) {
        self.surface.adjust_inset(delta);
    }

    fn install_popup_bar(&mut self, frame: Rect) {
        self.surface.set_bar(Some(frame));
    }

    fn remove_popup_bar(&mut self) {
        self.surface.set_bar(None);
    }

    fn layout_if_needed(&mut self) {
        self.surface.layout();
    }
}

/// A container with no docked element.
#[derive(Clone, Debug, PartialEq)]
pub struct PlainHost {
    surface: HostSurface,
    custom_content_frame: Option<Rect>,
}

impl PlainHost {
    /// Creates a plain host.
    #[must_use]
    pub fn new(bounds: Rect, safe_area: Insets) -> Self {
        Self {
            surface: HostSurface::new(bounds, safe_area),
            custom_content_frame: None,
        }
    }

    /// Sets the open frame used by the custom presentation style.
    pub fn set_custom_content_frame(&mut self, frame: Option<Rect>) {
        self.custom_content_frame = frame;
    }

    /// Shared host state.
    #[must_use]
    pub fn surface(&self) -> &HostSurface {
        &self.surface
    }

    /// Mutable shared host state.
    pub fn surface_mut(&mut self) -> &mut HostSurface {
        &mut self.surface
    }
}

impl PopupHost for PlainHost {
    fn bounds(&self) -> Rect {
        self.surface.bounds
    }

    fn default_frame_for_bottom_bar(&self) -> Rect {
        self.surface.bottom_edge()
    }

    fn insets_for_bottom_bar(&self) -> Insets {
        Insets::bottom(self.surface.safe_area.bottom)
    }

    fn adjust_bottom_content_inset(&mut self, delta: f64) {
        self.surface.adjust_inset(delta);
    }

    fn install_popup_bar(&mut self, frame: Rect) {
        self.surface.set_bar(Some(frame));
    }

    fn remove_popup_bar(&mut self) {
        self.surface.set_bar(None);
    }

    fn layout_if_needed(&mut self) {
        self.surface.layout();
    }

    fn custom_content_frame(&self) -> Option<Rect> {
        self.custom_content_frame
    }
}
