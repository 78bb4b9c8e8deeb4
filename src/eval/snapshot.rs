use serde::Serialize;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Rect};
use crate::scene::element::ElementId;

/// Resolved picture of a scene at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Scene time in seconds.
    pub time: f64,
    /// Background fill.
    pub background: Color,
    /// Draw list, back to front.
    pub items: Vec<DrawItem>,
}

impl FrameSnapshot {
    /// Number of items produced by scene elements (overlays excluded).
    pub fn element_item_count(&self) -> usize {
        self.items.iter().filter(|i| i.element.is_some()).count()
    }

    /// Items produced by one element.
    pub fn items_for(&self, id: ElementId) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |i| i.element == Some(id))
    }
}

/// Stroke paint in scene units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrokePaint {
    /// Color.
    pub color: Color,
    /// Width in scene units.
    pub width: f64,
    /// Opacity.
    pub opacity: f64,
    /// Dash length in scene units, for dashed lines.
    pub dash: Option<f64>,
}

/// Fill paint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FillPaint {
    /// Color.
    pub color: Color,
    /// Opacity.
    pub opacity: f64,
}

/// What to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawGeometry {
    /// Vector path in scene coordinates.
    Path {
        /// Geometry, already transformed to scene space.
        path: BezPath,
    },
    /// Text block centered on its local origin.
    Text {
        /// Display lines, top to bottom.
        lines: Vec<String>,
        /// Estimated local extent of the block, centered on the origin.
        extent: Rect,
        /// Em height in local units.
        em: f64,
        /// Distance between baselines in local units.
        line_height: f64,
        /// Bold weight.
        bold: bool,
        /// Italic slant.
        italic: bool,
        /// Local-to-scene transform.
        transform: Affine,
        /// Revealed fraction, left to right.
        reveal: f64,
    },
}

/// One primitive of the draw list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawItem {
    /// Element this item belongs to; `None` for highlight overlays.
    pub element: Option<ElementId>,
    /// Geometry.
    pub geometry: DrawGeometry,
    /// Stroke, if any.
    pub stroke: Option<StrokePaint>,
    /// Fill (glyph color for text), if any.
    pub fill: Option<FillPaint>,
    /// Group opacity applied on top of stroke and fill opacity.
    pub opacity: f64,
}
