use kurbo::Shape as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, ORIGIN, Point, Rect, Vec2, about};
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::scene::formula;

/// Flattening tolerance (scene units) used when converting curves to paths.
pub const PATH_TOLERANCE: f64 = 1e-3;

/// Font-size to em conversion: a `font_size` of 48 is 0.6 scene units tall.
pub const EM_PER_FONT_SIZE: f64 = 1.0 / 80.0;

const LINE_HEIGHT_EM: f64 = 1.2;
const ADVANCE_EM: f64 = 0.55;
const ADVANCE_EM_BOLD: f64 = 0.6;

/// Stable identifier of an element inside one scene's tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometric primitive, in element-local coordinates.
///
/// Rectangles, ellipses and dots are centered on the local origin. Lines, arrows and polygons
/// carry their points directly, and arcs are centered on their circle's center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle, optionally with rounded corners.
    Rectangle {
        /// Width in scene units.
        width: f64,
        /// Height in scene units.
        height: f64,
        /// Corner radius; `0` for sharp corners.
        corner_radius: f64,
    },
    /// Ellipse (a circle when width equals height).
    Ellipse {
        /// Horizontal diameter.
        width: f64,
        /// Vertical diameter.
        height: f64,
    },
    /// Circular arc, counter-clockwise from `start_angle` by `sweep_angle` radians.
    Arc {
        /// Radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// Signed sweep in radians.
        sweep_angle: f64,
    },
    /// Straight segment, optionally dashed.
    Line {
        /// First endpoint.
        start: Point,
        /// Second endpoint.
        end: Point,
        /// Dash length; `None` draws a solid line.
        dash: Option<f64>,
    },
    /// Segment with a filled triangular tip at `end`.
    Arrow {
        /// Tail.
        start: Point,
        /// Tip.
        end: Point,
        /// Maximum tip length; capped to a quarter of the arrow length.
        tip_length: f64,
    },
    /// Small filled disc.
    Dot {
        /// Radius.
        radius: f64,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in drawing order.
        vertices: Vec<Point>,
    },
}

/// How a path is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintRole {
    /// Stroked with the element color, filled with the element fill.
    Outline,
    /// Filled with the element color, no stroke (dots, arrow tips).
    Solid,
}

impl Shape {
    fn validate(&self) -> BeatlineResult<()> {
        fn non_negative(what: &str, v: f64) -> BeatlineResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(BeatlineError::construction(format!(
                    "{what} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        }
        fn finite_point(what: &str, p: Point) -> BeatlineResult<()> {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(BeatlineError::construction(format!(
                    "{what} must be finite"
                )));
            }
            Ok(())
        }

        match self {
            Self::Rectangle {
                width,
                height,
                corner_radius,
            } => {
                non_negative("rectangle width", *width)?;
                non_negative("rectangle height", *height)?;
                non_negative("corner radius", *corner_radius)?;
                if *corner_radius > width.min(*height) / 2.0 {
                    return Err(BeatlineError::construction(format!(
                        "corner radius {corner_radius} exceeds half the rectangle's shorter side"
                    )));
                }
            }
            Self::Ellipse { width, height } => {
                non_negative("ellipse width", *width)?;
                non_negative("ellipse height", *height)?;
            }
            Self::Arc {
                radius,
                start_angle,
                sweep_angle,
            } => {
                non_negative("arc radius", *radius)?;
                if !start_angle.is_finite() || !sweep_angle.is_finite() {
                    return Err(BeatlineError::construction("arc angles must be finite"));
                }
            }
            Self::Line { start, end, dash } => {
                finite_point("line start", *start)?;
                finite_point("line end", *end)?;
                if let Some(d) = dash
                    && (!d.is_finite() || *d <= 0.0)
                {
                    return Err(BeatlineError::construction(format!(
                        "dash length must be > 0, got {d}"
                    )));
                }
            }
            Self::Arrow {
                start,
                end,
                tip_length,
            } => {
                finite_point("arrow start", *start)?;
                finite_point("arrow end", *end)?;
                if (*end - *start).hypot() <= 1e-9 {
                    return Err(BeatlineError::construction("arrow has zero length"));
                }
                if !tip_length.is_finite() || *tip_length <= 0.0 {
                    return Err(BeatlineError::construction(format!(
                        "arrow tip length must be > 0, got {tip_length}"
                    )));
                }
            }
            Self::Dot { radius } => non_negative("dot radius", *radius)?,
            Self::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(BeatlineError::construction(format!(
                        "polygon needs at least 3 vertices, got {}",
                        vertices.len()
                    )));
                }
                for v in vertices {
                    finite_point("polygon vertex", *v)?;
                }
            }
        }
        Ok(())
    }

    /// Local-space paths making up this shape.
    pub fn paths(&self) -> Vec<(BezPath, PaintRole)> {
        match self {
            Self::Rectangle {
                width,
                height,
                corner_radius,
            } => {
                let rect = Rect::from_center_size(ORIGIN, (*width, *height));
                let path = if *corner_radius > 0.0 {
                    kurbo::RoundedRect::from_rect(rect, *corner_radius).to_path(PATH_TOLERANCE)
                } else {
                    rect.to_path(PATH_TOLERANCE)
                };
                vec![(path, PaintRole::Outline)]
            }
            Self::Ellipse { width, height } => {
                let e = kurbo::Ellipse::new(ORIGIN, Vec2::new(width / 2.0, height / 2.0), 0.0);
                vec![(e.to_path(PATH_TOLERANCE), PaintRole::Outline)]
            }
            Self::Arc {
                radius,
                start_angle,
                sweep_angle,
            } => {
                let arc = kurbo::Arc::new(
                    ORIGIN,
                    Vec2::new(*radius, *radius),
                    *start_angle,
                    *sweep_angle,
                    0.0,
                );
                vec![(arc.to_path(PATH_TOLERANCE), PaintRole::Outline)]
            }
            Self::Line { start, end, .. } => {
                let mut p = BezPath::new();
                p.move_to(*start);
                p.line_to(*end);
                vec![(p, PaintRole::Outline)]
            }
            Self::Arrow {
                start,
                end,
                tip_length,
            } => {
                let v = *end - *start;
                let len = v.hypot();
                let dir = v / len;
                let normal = Vec2::new(-dir.y, dir.x);
                let tip = tip_length.min(len * 0.25);
                let base = *end - dir * tip;
                let half_w = tip * 0.5;

                let mut shaft = BezPath::new();
                shaft.move_to(*start);
                shaft.line_to(base);

                let mut head = BezPath::new();
                head.move_to(*end);
                head.line_to(base + normal * half_w);
                head.line_to(base - normal * half_w);
                head.close_path();
                vec![(shaft, PaintRole::Outline), (head, PaintRole::Solid)]
            }
            Self::Dot { radius } => {
                let c = kurbo::Circle::new(ORIGIN, *radius);
                vec![(c.to_path(PATH_TOLERANCE), PaintRole::Solid)]
            }
            Self::Polygon { vertices } => {
                let mut p = BezPath::new();
                for (i, v) in vertices.iter().enumerate() {
                    if i == 0 {
                        p.move_to(*v);
                    } else {
                        p.line_to(*v);
                    }
                }
                p.close_path();
                vec![(p, PaintRole::Outline)]
            }
        }
    }

    /// Local bounding box.
    pub fn local_bounds(&self) -> Rect {
        match self {
            Self::Rectangle { width, height, .. } | Self::Ellipse { width, height } => {
                Rect::from_center_size(ORIGIN, (*width, *height))
            }
            Self::Dot { radius } => Rect::from_center_size(ORIGIN, (radius * 2.0, radius * 2.0)),
            Self::Line { start, end, .. } | Self::Arrow { start, end, .. } => {
                Rect::from_points(*start, *end)
            }
            _ => union_bounds(self.paths().iter().map(|(p, _)| p.bounding_box())),
        }
    }

    /// Start point of stroke-like shapes.
    pub fn start_point(&self) -> Option<Point> {
        match self {
            Self::Line { start, .. } | Self::Arrow { start, .. } => Some(*start),
            _ => None,
        }
    }
}

/// Text label parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    /// Label source: plain text, or TeX-like source for formulas. `\n` separates lines.
    pub content: String,
    /// Font size in points (48 is the conventional default).
    pub font_size: f64,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Italic slant.
    #[serde(default)]
    pub italic: bool,
}

impl TextSpec {
    /// Em height in scene units.
    pub fn em(&self) -> f64 {
        self.font_size * EM_PER_FONT_SIZE
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f64 {
        self.em() * LINE_HEIGHT_EM
    }

    /// Estimated local bounds of `lines`, centered on the origin.
    ///
    /// Widths come from a fixed per-character advance, so layout never depends on installed
    /// fonts.
    pub fn estimate_bounds(&self, lines: &[String]) -> Rect {
        let advance = if self.bold {
            ADVANCE_EM_BOLD
        } else {
            ADVANCE_EM
        };
        let widest = lines
            .iter()
            .map(|l| l.chars().filter(|c| !is_combining(*c)).count())
            .max()
            .unwrap_or(0);
        let w = (widest as f64) * advance * self.em();
        let n = lines.len().max(1) as f64;
        let h = self.em() + (n - 1.0) * self.line_height();
        Rect::from_center_size(ORIGIN, (w, h))
    }
}

fn is_combining(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{20D0}'..='\u{20FF}')
}

/// What an element is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Geometric primitive.
    Shape(Shape),
    /// Plain text label.
    Text(TextSpec),
    /// Formula label; `content` holds TeX-like source.
    Formula(TextSpec),
    /// Container owning other elements.
    Group,
}

/// Placement of an element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Translation of the local origin.
    pub position: Point,
    /// Rotation in radians around the local bounds center.
    pub rotation: f64,
    /// Uniform scale around the local bounds center.
    pub scale: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            position: ORIGIN,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Paint parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color; glyph color for labels.
    pub color: Color,
    /// Stroke width in hundredths of a scene unit.
    pub stroke_width: f64,
    /// Stroke opacity.
    pub stroke_opacity: f64,
    /// Explicit fill color; falls back to `color`.
    pub fill: Option<Color>,
    /// Fill opacity; `0` leaves outlines unfilled.
    pub fill_opacity: f64,
    /// Overall opacity multiplier.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            stroke_width: 4.0,
            stroke_opacity: 1.0,
            fill: None,
            fill_opacity: 0.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    /// Fill color actually painted.
    pub fn fill_color(&self) -> Color {
        self.fill.unwrap_or(self.color)
    }

    fn validate(&self) -> BeatlineResult<()> {
        if !self.color.is_valid() {
            return Err(BeatlineError::construction("color channels must be in [0, 1]"));
        }
        if let Some(fill) = self.fill
            && !fill.is_valid()
        {
            return Err(BeatlineError::construction(
                "fill color channels must be in [0, 1]",
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(BeatlineError::construction(format!(
                "stroke width must be finite and >= 0, got {}",
                self.stroke_width
            )));
        }
        for (what, v) in [
            ("stroke opacity", self.stroke_opacity),
            ("fill opacity", self.fill_opacity),
            ("opacity", self.opacity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(BeatlineError::construction(format!(
                    "{what} must be in [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// One node of a scene's element tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Id, unique within the scene.
    pub id: ElementId,
    /// Optional human-readable name used in diagnostics.
    pub name: Option<String>,
    /// Primitive kind.
    pub kind: ElementKind,
    /// Placement.
    pub geometry: Geometry,
    /// Paint.
    pub style: Style,
    /// Paint order among siblings; higher draws later.
    pub z_index: i32,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    /// Owning group; `None` only for the scene root.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Direct children (empty for non-groups).
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// `true` for groups.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group)
    }

    /// Name if set, id otherwise.
    pub fn label(&self) -> String {
        match &self.name {
            Some(n) => format!("'{n}' ({})", self.id),
            None => self.id.to_string(),
        }
    }

    /// Local-to-scene transform of a leaf.
    pub fn world_transform(&self) -> Affine {
        let pivot = self.local_bounds().center();
        Affine::translate(self.geometry.position.to_vec2())
            * about(pivot, self.geometry.scale, self.geometry.rotation)
    }

    /// Local bounds of a leaf; groups report an empty rect at their position.
    pub fn local_bounds(&self) -> Rect {
        match &self.kind {
            ElementKind::Shape(shape) => shape.local_bounds(),
            ElementKind::Text(spec) => spec.estimate_bounds(&self.display_lines()),
            ElementKind::Formula(spec) => spec.estimate_bounds(&self.display_lines()),
            ElementKind::Group => Rect::from_origin_size(ORIGIN, (0.0, 0.0)),
        }
    }

    /// Scene-space bounds of a leaf (groups are resolved by the tree).
    pub fn leaf_bounds(&self) -> Rect {
        if self.is_group() {
            return Rect::from_origin_size(self.geometry.position, (0.0, 0.0));
        }
        self.world_transform().transform_rect_bbox(self.local_bounds())
    }

    pub(crate) fn validate(&self) -> BeatlineResult<()> {
        validate_parts(&self.kind, &self.geometry, &self.style)
    }

    /// Display lines of a text or formula label.
    pub fn display_lines(&self) -> Vec<String> {
        match &self.kind {
            ElementKind::Text(spec) => spec.content.split('\n').map(str::to_owned).collect(),
            ElementKind::Formula(spec) => formula::to_display(&spec.content)
                .unwrap_or_else(|_| spec.content.clone())
                .split('\n')
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }
}

pub(crate) fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Rect {
    rects
        .into_iter()
        .reduce(|a, b| a.union(b))
        .unwrap_or_else(|| Rect::from_origin_size(ORIGIN, (0.0, 0.0)))
}

/// Not-yet-inserted element; validated when added to a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSpec {
    pub(crate) name: Option<String>,
    pub(crate) kind: ElementKind,
    pub(crate) geometry: Geometry,
    pub(crate) style: Style,
    pub(crate) z_index: i32,
    /// `(buff, segment length)` of a `buff` call that would consume the whole segment.
    rejected_buff: Option<(f64, f64)>,
}

impl ElementSpec {
    fn new(kind: ElementKind) -> Self {
        Self {
            name: None,
            kind,
            geometry: Geometry::default(),
            style: Style::default(),
            z_index: 0,
            rejected_buff: None,
        }
    }

    pub(crate) fn group_spec() -> Self {
        Self::new(ElementKind::Group)
    }

    /// Attach a diagnostic name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stroke (and glyph) color.
    pub fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Fill color and opacity.
    pub fn fill(mut self, color: Color, opacity: f64) -> Self {
        self.style.fill = Some(color);
        self.style.fill_opacity = opacity;
        self
    }

    /// Fill opacity using the stroke color.
    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.style.fill_opacity = opacity;
        self
    }

    /// Stroke width in hundredths of a scene unit.
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.style.stroke_width = width;
        self
    }

    /// Stroke opacity.
    pub fn stroke_opacity(mut self, opacity: f64) -> Self {
        self.style.stroke_opacity = opacity;
        self
    }

    /// Overall opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }

    /// Paint order among siblings.
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    /// Bold label weight (no effect on shapes).
    pub fn bold(mut self) -> Self {
        if let ElementKind::Text(spec) | ElementKind::Formula(spec) = &mut self.kind {
            spec.bold = true;
        }
        self
    }

    /// Italic label slant (no effect on shapes).
    pub fn italic(mut self) -> Self {
        if let ElementKind::Text(spec) | ElementKind::Formula(spec) = &mut self.kind {
            spec.italic = true;
        }
        self
    }

    /// Rotate around the bounds center.
    pub fn rotate(mut self, radians: f64) -> Self {
        self.geometry.rotation += radians;
        self
    }

    /// Scale around the bounds center.
    pub fn scale(mut self, factor: f64) -> Self {
        self.geometry.scale *= factor;
        self
    }

    /// Translate by `by`.
    pub fn shift(mut self, by: Vec2) -> Self {
        self.geometry.position += by;
        self
    }

    /// Place the bounds center at `point`.
    pub fn move_to(mut self, point: Point) -> Self {
        let center = self.bounds().center();
        self.geometry.position += point - center;
        self
    }

    /// Shorten a line or arrow by `buff` at both ends.
    ///
    /// A negative buff, or one that leaves nothing of the segment, fails validation.
    pub fn buff(mut self, buff: f64) -> Self {
        if let ElementKind::Shape(
            Shape::Line { start, end, .. } | Shape::Arrow { start, end, .. },
        ) = &mut self.kind
        {
            let v = *end - *start;
            let len = v.hypot();
            if buff.is_finite() && buff >= 0.0 && len > 2.0 * buff {
                let d = v / len * buff;
                *start += d;
                *end -= d;
            } else {
                self.rejected_buff = Some((buff, len));
            }
        }
        self
    }

    /// Tip length of an arrow.
    pub fn tip_length(mut self, length: f64) -> Self {
        if let ElementKind::Shape(Shape::Arrow { tip_length, .. }) = &mut self.kind {
            *tip_length = length;
        }
        self
    }

    /// Scene-space bounds as currently placed.
    pub fn bounds(&self) -> Rect {
        self.to_element(ElementId(u32::MAX)).leaf_bounds()
    }

    pub(crate) fn validate(&self) -> BeatlineResult<()> {
        if let Some((buff, len)) = self.rejected_buff {
            return Err(BeatlineError::construction(format!(
                "buff {buff} must be >= 0 and leave part of a segment of length {len}"
            )));
        }
        validate_parts(&self.kind, &self.geometry, &self.style)
    }

    pub(crate) fn to_element(&self, id: ElementId) -> Element {
        Element {
            id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            geometry: self.geometry,
            style: self.style,
            z_index: self.z_index,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Checks shared by specs being inserted and elements loaded from a serialized scene.
fn validate_parts(kind: &ElementKind, geometry: &Geometry, style: &Style) -> BeatlineResult<()> {
    match kind {
        ElementKind::Shape(shape) => shape.validate()?,
        ElementKind::Text(spec) | ElementKind::Formula(spec) => {
            if spec.content.trim().is_empty() {
                return Err(BeatlineError::construction("label text must be non-empty"));
            }
            if !spec.font_size.is_finite() || spec.font_size <= 0.0 {
                return Err(BeatlineError::construction(format!(
                    "font size must be > 0, got {}",
                    spec.font_size
                )));
            }
            if matches!(kind, ElementKind::Formula(_)) {
                formula::to_display(&spec.content)?;
            }
        }
        ElementKind::Group => {}
    }
    let g = geometry;
    if !g.position.x.is_finite() || !g.position.y.is_finite() || !g.rotation.is_finite() {
        return Err(BeatlineError::construction("element placement must be finite"));
    }
    if !g.scale.is_finite() || g.scale <= 0.0 {
        return Err(BeatlineError::construction(format!(
            "element scale must be > 0, got {}",
            g.scale
        )));
    }
    style.validate()
}

/// Rectangle centered on the origin.
pub fn rectangle(width: f64, height: f64) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Rectangle {
        width,
        height,
        corner_radius: 0.0,
    }))
}

/// Rounded rectangle centered on the origin.
pub fn rounded_rectangle(width: f64, height: f64, corner_radius: f64) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Rectangle {
        width,
        height,
        corner_radius,
    }))
}

/// Square centered on the origin.
pub fn square(side: f64) -> ElementSpec {
    rectangle(side, side)
}

/// Circle centered on the origin.
pub fn circle(radius: f64) -> ElementSpec {
    ellipse(radius * 2.0, radius * 2.0)
}

/// Ellipse centered on the origin.
pub fn ellipse(width: f64, height: f64) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Ellipse { width, height }))
}

/// Arc around `center`.
pub fn arc(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> ElementSpec {
    let mut spec = ElementSpec::new(ElementKind::Shape(Shape::Arc {
        radius,
        start_angle,
        sweep_angle,
    }));
    spec.geometry.position = center;
    spec
}

/// Solid segment.
pub fn line(start: Point, end: Point) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Line {
        start,
        end,
        dash: None,
    }))
}

/// Dashed segment.
pub fn dashed_line(start: Point, end: Point, dash: f64) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Line {
        start,
        end,
        dash: Some(dash),
    }))
}

/// Arrow from `start` to `end`.
pub fn arrow(start: Point, end: Point) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Arrow {
        start,
        end,
        tip_length: 0.25,
    }))
}

/// Filled dot at `center`.
pub fn dot(center: Point, radius: f64) -> ElementSpec {
    let mut spec = ElementSpec::new(ElementKind::Shape(Shape::Dot { radius }));
    spec.geometry.position = center;
    spec
}

/// Closed polygon through `vertices`.
pub fn polygon(vertices: impl IntoIterator<Item = Point>) -> ElementSpec {
    ElementSpec::new(ElementKind::Shape(Shape::Polygon {
        vertices: vertices.into_iter().collect(),
    }))
}

/// Plain text label centered on the origin.
pub fn text(content: impl Into<String>, font_size: f64) -> ElementSpec {
    ElementSpec::new(ElementKind::Text(TextSpec {
        content: content.into(),
        font_size,
        bold: false,
        italic: false,
    }))
}

/// Formula label centered on the origin.
pub fn formula(source: impl Into<String>, font_size: f64) -> ElementSpec {
    ElementSpec::new(ElementKind::Formula(TextSpec {
        content: source.into(),
        font_size,
        bold: false,
        italic: false,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;
