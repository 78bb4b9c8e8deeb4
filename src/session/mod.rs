//! Session-oriented rendering API.

/// Render configuration and quality presets.
pub mod config;
/// Scene-to-sink frame loop.
pub mod render_session;
