use crate::encode::sink::{FrameSink, SinkConfig, check_order, ensure_parent_dir, partial_path};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::foundation::math::flatten_premul_over_bg_to_opaque_rgba8;
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Sink writing one `frame_NNNNNN.png` per frame into a directory.
///
/// Frames land in `<out_dir>.partial` first; `end` renames the directory into place.
pub struct PngSequenceSink {
    out_dir: PathBuf,
    partial: PathBuf,
    overwrite: bool,
    bg_rgba: [u8; 4],
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
}

impl PngSequenceSink {
    /// Create a sink targeting `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>, overwrite: bool, bg_rgba: [u8; 4]) -> Self {
        let out_dir = out_dir.into();
        let partial = partial_path(&out_dir);
        Self {
            out_dir,
            partial,
            overwrite,
            bg_rgba,
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
        }
    }

    /// File name used for frame `idx`.
    pub fn frame_file_name(idx: FrameIndex) -> String {
        format!("frame_{:06}.png", idx.0)
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> BeatlineResult<()> {
        if self.out_dir.exists() && !self.overwrite {
            return Err(BeatlineError::render(format!(
                "output directory '{}' already exists",
                self.out_dir.display()
            )));
        }
        ensure_parent_dir(&self.out_dir)?;
        if self.partial.exists() {
            std::fs::remove_dir_all(&self.partial)
                .with_context(|| format!("failed to clear '{}'", self.partial.display()))?;
        }
        std::fs::create_dir_all(&self.partial)
            .with_context(|| format!("failed to create '{}'", self.partial.display()))?;

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BeatlineResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BeatlineError::render("png sink not started"))?;
        check_order(self.last_idx, idx)?;
        self.last_idx = Some(idx);
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(BeatlineError::render(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, &frame.data, self.bg_rgba)?;
        let path = self.partial.join(Self::frame_file_name(idx));
        write_rgba_png(&path, frame.width, frame.height, self.scratch.clone())
    }

    fn end(&mut self) -> BeatlineResult<()> {
        if self.cfg.take().is_none() {
            return Err(BeatlineError::render("png sink not started"));
        }
        if self.out_dir.exists() {
            std::fs::remove_dir_all(&self.out_dir)
                .with_context(|| format!("failed to replace '{}'", self.out_dir.display()))?;
        }
        std::fs::rename(&self.partial, &self.out_dir)
            .with_context(|| format!("failed to move '{}' into place", self.partial.display()))?;
        tracing::info!(out = %self.out_dir.display(), "png sequence written");
        Ok(())
    }

    fn abort(&mut self) {
        self.cfg = None;
        let _ = std::fs::remove_dir_all(&self.partial);
    }
}

/// Write straight-alpha RGBA8 pixels to a PNG file.
pub fn write_rgba_png(path: &Path, width: u32, height: u32, data: Vec<u8>) -> BeatlineResult<()> {
    let img = image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| BeatlineError::render("rgba buffer does not match frame size"))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| BeatlineError::render(format!("failed to write '{}': {e}", path.display())))
}

/// Flatten a premultiplied frame over `bg_rgba` and write it as PNG.
pub fn write_frame_png(path: &Path, frame: &FrameRGBA, bg_rgba: [u8; 4]) -> BeatlineResult<()> {
    let mut out = vec![0u8; frame.data.len()];
    flatten_premul_over_bg_to_opaque_rgba8(&mut out, &frame.data, bg_rgba)?;
    ensure_parent_dir(path)?;
    write_rgba_png(path, frame.width, frame.height, out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
