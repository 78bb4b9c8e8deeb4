use crate::eval::snapshot::FrameSnapshot;
use crate::foundation::core::Canvas;
use crate::foundation::error::BeatlineResult;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries (sinks flatten before encoding).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A renderer that turns a resolved [`FrameSnapshot`] into pixels.
pub trait RenderBackend {
    /// Rasterize `snapshot` onto a `canvas`-sized frame.
    fn render(&mut self, snapshot: &FrameSnapshot, canvas: Canvas) -> BeatlineResult<FrameRGBA>;
}
