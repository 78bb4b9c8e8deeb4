//! Rendering backends.
//!
//! A backend turns a resolved [`crate::eval::snapshot::FrameSnapshot`] into premultiplied RGBA8
//! pixels. The reference backend goes through an SVG document rasterized by `resvg`.

/// Backend trait and frame type.
pub mod backend;
/// `resvg`-based raster backend.
pub mod raster;
/// Snapshot-to-SVG writer.
pub mod svg;
