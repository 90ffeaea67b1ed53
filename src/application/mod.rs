// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions through which the host page is reached
//! - [`markers`] and [`dom`]: Selector roles and tree queries over a port
//! - [`collector`]: Gathers the images of a viewing context
//! - [`viewport`]: Paged strip of slides
//! - [`gesture`]: Touch state machine
//! - [`controls`], [`interaction_bar`], [`overlay`]: Overlay UI state
//! - [`timers`], [`history`]: Deferred work and history echo handling
//! - [`lifecycle`]: Session owner and single entry point for host events
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Nothing here names a browser binding
//!
//! # Example
//!
//! ```
//! use x_lightbox::application::lifecycle::{ClickDisposition, LightboxController};
//! use x_lightbox::application::port::HostPage;
//! use x_lightbox::domain::time::Timestamp;
//! use x_lightbox::infrastructure::MemoryPage;
//!
//! let mut page = MemoryPage::new();
//! let mut controller = LightboxController::default();
//! let body = page.document_root();
//! let outcome = controller.on_click(&mut page, body, Timestamp::from_millis(0.0));
//! assert_eq!(outcome, ClickDisposition::Ignored);
//! ```

pub mod collector;
pub mod controls;
pub mod dom;
pub mod gesture;
pub mod history;
pub mod interaction_bar;
pub mod lifecycle;
pub mod markers;
pub mod overlay;
pub mod port;
pub mod timers;
pub mod viewport;

pub use lifecycle::{LifecyclePhase, LightboxController};
