//! beatline is a small toolkit for short, deterministic explainer animations.
//!
//! A scene is written as a script:
//!
//! - Build static primitives (shapes, text, formula labels) into an element tree
//! - Position them with pure layout operators over bounding boxes
//! - Append beats of concurrent animation steps with [`SceneBuilder::play`] and
//!   [`SceneBuilder::wait`]
//!
//! A finalized [`Scene`] is sampled by the [`Evaluator`] into a [`FrameSnapshot`], rasterized by
//! a [`RenderBackend`] and streamed into a [`FrameSink`] by a [`RenderSession`].
#![forbid(unsafe_code)]

/// Easing curves and interpolation.
pub mod animation;
/// Scene builder DSL.
pub mod composition;
/// Encoding sinks.
pub mod encode;
/// Frame sampling.
pub mod eval;
/// Core value types, colors and errors.
pub mod foundation;
/// Pure layout operators.
pub mod layout;
/// Rendering backends.
pub mod render;
/// Scene model: elements, tree, steps and timeline.
pub mod scene;
/// Built-in scene catalog.
pub mod scenes;
/// Session-oriented rendering API.
pub mod session;

pub use crate::animation::ease::Ease;
pub use crate::composition::dsl::SceneBuilder;
pub use crate::eval::evaluator::Evaluator;
pub use crate::eval::snapshot::{DrawGeometry, DrawItem, FrameSnapshot};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, DOWN, Direction, FRAME_HEIGHT, FRAME_WIDTH, Fps, FrameIndex, LEFT,
    ORIGIN, Point, RIGHT, Rect, UP, Vec2,
};
pub use crate::foundation::error::{BeatlineError, BeatlineResult};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::raster::SvgRasterBackend;
pub use crate::scene::element::{ElementId, ElementSpec};
pub use crate::scene::model::Scene;
pub use crate::scene::step::{Step, StepKind, lagged};
pub use crate::session::config::{OutputFormat, Quality, RenderConfig};
pub use crate::session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
