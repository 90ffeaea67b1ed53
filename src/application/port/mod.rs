// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the interfaces through which the engine reaches the
//! browser. These traits use only domain types, ensuring the application
//! layer remains independent of any concrete binding.
//!
//! # Available Ports
//!
//! - [`host`]: Read-mostly access to the host document ([`HostPage`])
//! - [`history`]: Session history entries ([`BrowserHistory`])
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `web-sys` handles)
//! - Node handles are plain [`NodeId`](crate::domain::node::NodeId) values
//!   that adapters resolve on every call
//! - Methods are infallible: a missing node reads as `None` or empty
//!
//! # Example
//!
//! ```ignore
//! use x_lightbox::application::port::HostPage;
//! use x_lightbox::domain::node::NodeId;
//!
//! fn is_image(page: &impl HostPage, node: NodeId) -> bool {
//!     page.tag_name(node).as_deref() == Some("img")
//! }
//! ```

pub mod history;
pub mod host;

// Re-export main types for convenience
pub use history::BrowserHistory;
pub use host::HostPage;

/// Everything the lightbox controller needs from the browser.
///
/// Blanket-implemented for any type providing both ports, so a single adapter
/// object can be handed to the controller.
pub trait HostEnvironment: HostPage + BrowserHistory {}

impl<T: HostPage + BrowserHistory> HostEnvironment for T {}
