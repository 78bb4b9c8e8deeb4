//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`crate::session::render_session::RenderSession::render_all`].

/// `ffmpeg`-based video sinks (MP4 or WebM via system `ffmpeg`).
pub mod ffmpeg;
/// PNG frame-sequence sink.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
