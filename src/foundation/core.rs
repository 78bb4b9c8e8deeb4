use crate::foundation::error::{BeatlineError, BeatlineResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Height of the visible frame in scene units.
pub const FRAME_HEIGHT: f64 = 8.0;
/// Width of the visible frame in scene units (16:9).
pub const FRAME_WIDTH: f64 = FRAME_HEIGHT * 16.0 / 9.0;

/// Scene-space origin (frame center).
pub const ORIGIN: Point = Point::new(0.0, 0.0);
/// Unit vector pointing up (scene y grows upward).
pub const UP: Vec2 = Vec2::new(0.0, 1.0);
/// Unit vector pointing down.
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
/// Unit vector pointing left.
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Unit vector pointing right.
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// Bounding box of the visible frame in scene units.
pub fn frame_rect() -> Rect {
    Rect::new(
        -FRAME_WIDTH / 2.0,
        -FRAME_HEIGHT / 2.0,
        FRAME_WIDTH / 2.0,
        FRAME_HEIGHT / 2.0,
    )
}

/// Axis-aligned direction used by layout operators.
///
/// In a [`Rect`] the `y0` side is the bottom edge and `y1` the top edge, since scene y grows
/// upward.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward +y.
    Up,
    /// Toward -y.
    Down,
    /// Toward -x.
    Left,
    /// Toward +x.
    Right,
}

impl Direction {
    /// Unit vector for this direction.
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => UP,
            Self::Down => DOWN,
            Self::Left => LEFT,
            Self::Right => RIGHT,
        }
    }

    /// The opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `true` for left/right.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Coordinate of the `self`-facing edge of `r`.
    pub fn edge_of(self, r: Rect) -> f64 {
        match self {
            Self::Up => r.y1,
            Self::Down => r.y0,
            Self::Left => r.x0,
            Self::Right => r.x1,
        }
    }

    /// Midpoint of the `self`-facing edge of `r`.
    pub fn edge_midpoint(self, r: Rect) -> Point {
        let c = r.center();
        match self {
            Self::Up => Point::new(c.x, r.y1),
            Self::Down => Point::new(c.x, r.y0),
            Self::Left => Point::new(r.x0, c.y),
            Self::Right => Point::new(r.x1, c.y),
        }
    }
}

/// Absolute 0-based frame index in scene timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> BeatlineResult<Self> {
        if den == 0 {
            return Err(BeatlineError::construction("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BeatlineError::construction("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timestamp of frame `idx` in seconds.
    pub fn frame_time_secs(self, idx: FrameIndex) -> f64 {
        (idx.0 as f64) * self.frame_duration_secs()
    }

    /// Number of frames needed to cover `secs`, rounding up.
    ///
    /// A tiny tolerance keeps `1.0 s @ 30 fps` at exactly 30 frames despite float noise.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        let frames = secs.max(0.0) * self.as_f64();
        (frames - 1e-9).ceil().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Pixels per scene unit along y (the frame is always [`FRAME_HEIGHT`] units tall).
    pub fn pixels_per_unit(self) -> f64 {
        f64::from(self.height) / FRAME_HEIGHT
    }

    /// Affine mapping scene coordinates (origin centered, y up) to pixel coordinates
    /// (origin top-left, y down).
    pub fn scene_to_pixel(self) -> Affine {
        let sx = f64::from(self.width) / FRAME_WIDTH;
        let sy = self.pixels_per_unit();
        Affine::new([
            sx,
            0.0,
            0.0,
            -sy,
            f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0,
        ])
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Affine that maps `src` onto `dst` (independent x/y scale).
///
/// Degenerate source extents keep a unit scale on that axis.
pub fn rect_to_rect(src: Rect, dst: Rect) -> Affine {
    let sx = if src.width().abs() > 1e-12 {
        dst.width() / src.width()
    } else {
        1.0
    };
    let sy = if src.height().abs() > 1e-12 {
        dst.height() / src.height()
    } else {
        1.0
    };
    Affine::translate(dst.center().to_vec2())
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-src.center().to_vec2())
}

/// Affine scaling by `scale` and rotating by `rotation` radians around `pivot`.
pub fn about(pivot: Point, scale: f64, rotation: f64) -> Affine {
    Affine::translate(pivot.to_vec2())
        * Affine::rotate(rotation)
        * Affine::scale(scale)
        * Affine::translate(-pivot.to_vec2())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
