// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`memory_page`]: In-memory document and history (implements [`HostPage`]
//!   and [`BrowserHistory`]), used by tests, benches and headless hosts
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - A `web-sys` adapter lives with the extension shell, outside this crate
//!
//! [`HostPage`]: crate::application::port::HostPage
//! [`BrowserHistory`]: crate::application::port::BrowserHistory

pub mod memory_page;

// Re-export main types for convenience
pub use memory_page::{ElementSpec, MemoryPage};
