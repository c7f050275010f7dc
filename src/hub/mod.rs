//! Hub communication module.
//!
//! This module provides the client, configuration, and wire types for
//! talking to a memehub content service.

pub mod client;
pub mod config;
pub mod types;

pub use client::HubClient;
pub use config::{HubConfig, DEFAULT_HUB_PORT, HUB_URL_ENV};
pub use types::{HubResponse, MemeRecord};
