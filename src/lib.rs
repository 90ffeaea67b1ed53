// SPDX-License-Identifier: MPL-2.0
//! `x_lightbox` is the gesture and state engine of a touch lightbox for the
//! X (Twitter) web client.
//!
//! It collects the images of the post or thread a photo belongs to, lays them
//! out as a paged strip, interprets swipe, pull-to-dismiss and pinch
//! gestures, and keeps browser history in step so the platform back gesture
//! closes the viewer. The host page is reached only through the traits in
//! [`application::port`]; the overlay is produced as a plain render model.

#![doc(html_root_url = "https://docs.rs/x_lightbox/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_utils;

pub use application::lifecycle::LightboxController;
pub use config::Config;
pub use error::{Error, Result};
