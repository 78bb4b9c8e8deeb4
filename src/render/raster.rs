use std::sync::Arc;

use crate::eval::snapshot::FrameSnapshot;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::svg::snapshot_to_svg;

/// Reference backend: snapshot → SVG document → `usvg` tree → `resvg` pixmap.
pub struct SvgRasterBackend {
    opts: usvg::Options<'static>,
}

impl SvgRasterBackend {
    /// Create a backend with the system font database loaded.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_fontdb(Arc::new(db))
    }

    /// Create a backend over an existing font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            opts: usvg::Options {
                fontdb,
                ..Default::default()
            },
        }
    }
}

impl Default for SvgRasterBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SvgRasterBackend {
    fn render(&mut self, snapshot: &FrameSnapshot, canvas: Canvas) -> BeatlineResult<FrameRGBA> {
        let svg = snapshot_to_svg(snapshot, canvas)?;
        let tree = usvg::Tree::from_str(&svg, &self.opts)
            .map_err(|e| BeatlineError::render(format!("failed to parse frame svg: {e}")))?;
        let data = rasterize_tree_to_premul_rgba8(&tree, canvas.width, canvas.height)?;
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        })
    }
}

fn rasterize_tree_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> BeatlineResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        BeatlineError::render(format!("failed to allocate {width}x{height} pixmap"))
    })?;
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
