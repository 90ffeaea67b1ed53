// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core lightbox types and rules.
//!
//! This module contains pure value objects and business rules. It never talks
//! to the host page; the only external crates used are `serde` derives (for
//! types that appear in the configuration) and `regex` (size-token rewriting).
//!
//! # Modules
//!
//! - [`animation`]: CSS transition values ([`Transition`](animation::Transition))
//! - [`geometry`]: Points, sizes and rectangles in CSS pixels
//! - [`image`]: Session images ([`ImageEntry`](image::ImageEntry),
//!   [`ImageList`](image::ImageList)) and high-resolution URL derivation
//! - [`layout`]: [`ViewMode`](layout::ViewMode) and
//!   [`ReadingDirection`](layout::ReadingDirection)
//! - [`newtypes`]: Range-checked values ([`ControlsTimeout`](newtypes::ControlsTimeout),
//!   [`Opacity`](newtypes::Opacity))
//! - [`node`]: Opaque host node handles ([`NodeId`](node::NodeId))
//! - [`time`]: Event timestamps ([`Timestamp`](time::Timestamp))
//! - [`zoom`]: Pinch zoom and pan ([`ZoomTransform`](zoom::ZoomTransform))

pub mod animation;
pub mod geometry;
pub mod image;
pub mod layout;
pub mod newtypes;
pub mod node;
pub mod time;
pub mod zoom;
