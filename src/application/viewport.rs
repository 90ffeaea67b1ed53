// SPDX-License-Identifier: MPL-2.0
//! Paged strip of slides.
//!
//! [`Viewport`] owns the current page index. The strip position is always
//! derived from it: `offset = index × width`. Gesture code may add a transient
//! drag preview on top, but only [`Viewport::set_index`] moves the strip.

use crate::domain::image::{ImageEntry, ImageList};
use crate::domain::layout::{ReadingDirection, ViewMode};
use smallvec::SmallVec;

/// Pages on each side of the current one whose images are loaded eagerly.
const PRELOAD_RADIUS: usize = 1;

/// Source of a slide image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideSource {
    /// `src` is set; the browser fetches the image.
    Loaded(String),
    /// URL kept aside (`data-src`) until the slide comes near.
    Deferred(String),
}

impl SlideSource {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, SlideSource::Loaded(_))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            SlideSource::Loaded(url) | SlideSource::Deferred(url) => url,
        }
    }

    fn materialize(&mut self) {
        if let SlideSource::Deferred(url) = self {
            *self = SlideSource::Loaded(std::mem::take(url));
        }
    }
}

/// One image inside a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideImage {
    /// Position in the session's [`ImageList`].
    pub image_index: usize,
    pub source: SlideSource,
}

/// One page of the strip: one image, or two in spread mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slide {
    pub images: SmallVec<[SlideImage; 2]>,
}

impl Slide {
    /// Image shown first (the one whose post feeds the action bar).
    #[must_use]
    pub fn primary_image_index(&self) -> Option<usize> {
        self.images.first().map(|img| img.image_index)
    }
}

/// Strip state of the open session.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    mode: ViewMode,
    direction: ReadingDirection,
    current_index: usize,
    slides: Vec<Slide>,
    width: f32,
    drag_preview: f32,
}

impl Viewport {
    /// Builds the strip for `images`, centred on the image at `initial_image`.
    ///
    /// `initial_image` is a position in `images`; in spread mode it is mapped
    /// to the pair containing it.
    #[must_use]
    pub fn render(
        images: &ImageList,
        initial_image: usize,
        mode: ViewMode,
        direction: ReadingDirection,
        width: f32,
    ) -> Self {
        let initial_image = initial_image.min(images.len().saturating_sub(1));
        let current_index = ViewMode::Single.convert_index(initial_image, mode, images.len());
        let mut viewport = Self {
            mode,
            direction,
            current_index,
            slides: build_slides(images, mode),
            width,
            drag_preview: 0.0,
        };
        viewport.load_window();
        viewport
    }

    /// Moves to `new_index`, clamped to the valid range.
    ///
    /// Returns `false` when the (clamped) index equals the current one. The
    /// drag preview is cleared in both cases.
    pub fn set_index(&mut self, new_index: usize) -> bool {
        self.drag_preview = 0.0;
        let clamped = new_index.min(self.max_index());
        if clamped == self.current_index {
            return false;
        }
        self.current_index = clamped;
        self.load_window();
        true
    }

    /// Switches between single and spread pages, rebuilding every slide.
    pub fn set_view_mode(&mut self, mode: ViewMode, images: &ImageList) {
        if mode == self.mode {
            return;
        }
        self.current_index = self
            .mode
            .convert_index(self.current_index, mode, images.len());
        self.mode = mode;
        self.slides = build_slides(images, mode);
        self.current_index = self.current_index.min(self.max_index());
        self.drag_preview = 0.0;
        self.load_window();
    }

    /// Updates the width after a viewport resize.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Sets the transient finger displacement added to the strip position.
    pub fn drag_preview(&mut self, dx: f32) {
        self.drag_preview = dx;
    }

    pub fn clear_drag_preview(&mut self) {
        self.drag_preview = 0.0;
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn direction(&self) -> ReadingDirection {
        self.direction
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn max_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_index)
    }

    /// Logical strip offset: `current_index × width`.
    #[must_use]
    pub fn strip_offset(&self) -> f32 {
        // Page counts are tiny.
        #[allow(clippy::cast_precision_loss)]
        let index = self.current_index as f32;
        index * self.width
    }

    /// CSS `translateX` of the strip, including any drag preview.
    #[must_use]
    pub fn strip_translate_x(&self) -> f32 {
        self.direction.translate_sign() * self.strip_offset() + self.drag_preview
    }

    #[must_use]
    pub fn has_drag_preview(&self) -> bool {
        self.drag_preview != 0.0
    }

    /// Entries shown on the current page.
    #[must_use]
    pub fn current_entries<'a>(&self, images: &'a ImageList) -> SmallVec<[&'a ImageEntry; 2]> {
        self.current_slide()
            .map(|slide| {
                slide
                    .images
                    .iter()
                    .filter_map(|img| images.get(img.image_index))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Entry feeding the action bar and the close animation.
    #[must_use]
    pub fn primary_entry<'a>(&self, images: &'a ImageList) -> Option<&'a ImageEntry> {
        self.current_slide()
            .and_then(Slide::primary_image_index)
            .and_then(|index| images.get(index))
    }

    fn load_window(&mut self) {
        let start = self.current_index.saturating_sub(PRELOAD_RADIUS);
        let end = (self.current_index + PRELOAD_RADIUS).min(self.max_index());
        if let Some(window) = self.slides.get_mut(start..=end) {
            for slide in window {
                for image in &mut slide.images {
                    image.source.materialize();
                }
            }
        }
    }
}

fn build_slides(images: &ImageList, mode: ViewMode) -> Vec<Slide> {
    let per_slide = match mode {
        ViewMode::Single => 1,
        ViewMode::Spread => 2,
    };
    images
        .as_slice()
        .chunks(per_slide)
        .enumerate()
        .map(|(page, chunk)| Slide {
            images: chunk
                .iter()
                .enumerate()
                .map(|(offset, entry)| SlideImage {
                    image_index: page * per_slide + offset,
                    source: SlideSource::Deferred(entry.high_res_url.clone()),
                })
                .collect(),
        })
        .collect()
}
