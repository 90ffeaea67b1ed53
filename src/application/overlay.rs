// SPDX-License-Identifier: MPL-2.0
//! Render model of the lightbox overlay.
//!
//! The controller never touches the host DOM for its own UI. It keeps this
//! plain-data model up to date and the browser adapter mirrors it into the
//! overlay element tree (inline `transform`, `opacity` and `transition`
//! styles, the `active` class, button visibility).

use crate::application::controls;
use crate::application::interaction_bar::{Action, ActionBarState};
use crate::application::viewport::{SlideSource, Viewport};
use crate::domain::animation::{Transform, TransitionList};
use crate::domain::layout::ViewMode;
use crate::domain::newtypes::Opacity;
use crate::domain::zoom::ZoomTransform;
use smallvec::SmallVec;

/// Inline style of the slide strip.
#[derive(Debug, Clone, PartialEq)]
pub struct StripStyle {
    /// `translateX` in px.
    pub translate_x: f32,
    pub transition: TransitionList,
}

/// One slide element and the image(s) inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub sources: SmallVec<[SlideSource; 2]>,
    /// Slide transform: dismiss drag and exit animation.
    pub transform: Transform,
    pub opacity: Opacity,
    pub transition: TransitionList,
    /// Image transform: pinch zoom and pan.
    pub image_transform: Transform,
    pub image_transition: TransitionList,
}

impl SlideView {
    fn at_rest(sources: SmallVec<[SlideSource; 2]>) -> Self {
        Self {
            sources,
            transform: Transform::IDENTITY,
            opacity: Opacity::OPAQUE,
            transition: TransitionList::none(),
            image_transform: Transform::IDENTITY,
            image_transition: TransitionList::none(),
        }
    }

    /// Puts the slide back at rest without animation.
    pub fn reset(&mut self) {
        let sources = std::mem::take(&mut self.sources);
        *self = Self::at_rest(sources);
    }
}

/// Action bar as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBarView {
    pub state: ActionBarState,
    pub pressed: Option<Action>,
}

/// Current look of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// `active` class: entry transition applied.
    pub active: bool,
    pub pointer_events: bool,
    pub backdrop_opacity: Opacity,
    pub strip: StripStyle,
    pub slides: Vec<SlideView>,
    pub controls_visible: bool,
    /// Previous/next buttons are present.
    pub nav_buttons: bool,
    /// Spread toggle, present for multi-image sessions; the value is the
    /// mode currently shown.
    pub spread_toggle: Option<ViewMode>,
    /// `None` hides the bar.
    pub action_bar: Option<ActionBarView>,
}

impl Overlay {
    /// Overlay as inserted, before the entry transition.
    #[must_use]
    pub fn inserted(viewport: &Viewport, image_count: usize, controls_visible: bool) -> Self {
        let navigation = controls::has_navigation(image_count);
        let mut overlay = Self {
            active: false,
            pointer_events: true,
            backdrop_opacity: Opacity::OPAQUE,
            strip: StripStyle {
                translate_x: 0.0,
                transition: TransitionList::none(),
            },
            slides: Vec::new(),
            controls_visible,
            nav_buttons: navigation,
            spread_toggle: navigation.then_some(viewport.view_mode()),
            action_bar: None,
        };
        overlay.rebuild_slides(viewport);
        overlay
    }

    /// Recreates every slide element, as after a view mode change.
    pub fn rebuild_slides(&mut self, viewport: &Viewport) {
        self.slides = viewport
            .slides()
            .iter()
            .map(|slide| SlideView::at_rest(slide.images.iter().map(|img| img.source.clone()).collect()))
            .collect();
        self.sync_strip(viewport);
        if self.spread_toggle.is_some() {
            self.spread_toggle = Some(viewport.view_mode());
        }
    }

    /// Copies lazily materialised sources from the viewport.
    pub fn sync_sources(&mut self, viewport: &Viewport) {
        for (view, slide) in self.slides.iter_mut().zip(viewport.slides()) {
            for (source, image) in view.sources.iter_mut().zip(&slide.images) {
                if *source != image.source {
                    source.clone_from(&image.source);
                }
            }
        }
    }

    pub fn sync_strip(&mut self, viewport: &Viewport) {
        self.strip.translate_x = viewport.strip_translate_x();
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut SlideView> {
        self.slides.get_mut(index)
    }

    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&SlideView> {
        self.slides.get(index)
    }

    /// Applies `zoom` to the images of slide `index`.
    pub fn set_zoom(&mut self, index: usize, zoom: ZoomTransform, transition: TransitionList) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.image_transform = Transform::new(zoom.pan, zoom.scale);
            slide.image_transition = transition;
        }
    }

    /// Clears zoom on every slide.
    pub fn reset_zoom(&mut self) {
        for slide in &mut self.slides {
            slide.image_transform = Transform::IDENTITY;
            slide.image_transition = TransitionList::none();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Point;
    use crate::domain::image::{ImageEntry, ImageList};
    use crate::domain::layout::ReadingDirection;
    use crate::domain::node::NodeId;
    use crate::test_utils::assert_abs_diff_eq;

    fn images(count: u64) -> ImageList {
        ImageList::from_entries((0..count).map(|i| {
            ImageEntry::new(
                format!("https://pbs.twimg.com/media/{i}?name=small"),
                "large",
                NodeId::new(i),
                None,
            )
        }))
        .expect("non-empty")
    }

    #[test]
    fn inserted_overlay_is_inactive_without_transition() {
        let list = images(3);
        let viewport = Viewport::render(&list, 1, ViewMode::Single, ReadingDirection::Ltr, 400.0);
        let overlay = Overlay::inserted(&viewport, list.len(), true);

        assert!(!overlay.active);
        assert!(overlay.strip.transition.is_none());
        assert_abs_diff_eq!(overlay.strip.translate_x, -400.0);
        assert_eq!(overlay.slides.len(), 3);
        assert!(overlay.nav_buttons);
        assert_eq!(overlay.spread_toggle, Some(ViewMode::Single));
    }

    #[test]
    fn single_image_has_no_navigation() {
        let list = images(1);
        let viewport = Viewport::render(&list, 0, ViewMode::Single, ReadingDirection::Ltr, 400.0);
        let overlay = Overlay::inserted(&viewport, list.len(), true);
        assert!(!overlay.nav_buttons);
        assert_eq!(overlay.spread_toggle, None);
    }

    #[test]
    fn sources_follow_lazy_loading() {
        let list = images(4);
        let mut viewport = Viewport::render(&list, 0, ViewMode::Single, ReadingDirection::Ltr, 400.0);
        let mut overlay = Overlay::inserted(&viewport, list.len(), true);
        assert!(!overlay.slides[3].sources[0].is_loaded());

        viewport.set_index(3);
        overlay.sync_sources(&viewport);
        assert!(overlay.slides[3].sources[0].is_loaded());
    }

    #[test]
    fn zoom_reset_clears_every_slide() {
        let list = images(3);
        let viewport = Viewport::render(&list, 0, ViewMode::Single, ReadingDirection::Ltr, 400.0);
        let mut overlay = Overlay::inserted(&viewport, list.len(), true);
        let zoom = ZoomTransform::new(2.0, Point::new(5.0, 5.0));
        overlay.set_zoom(0, zoom, TransitionList::none());
        overlay.set_zoom(1, zoom, TransitionList::none());

        assert_eq!(overlay.slides[1].image_transform, Transform::new(zoom.pan, 2.0));

        overlay.reset_zoom();
        assert!(overlay.slides.iter().all(|s| s.image_transform.is_identity()));
    }
}
