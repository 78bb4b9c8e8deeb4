use std::f64::consts::{PI, TAU};

use kurbo::Shape as _;

use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::eval::snapshot::{DrawGeometry, DrawItem, FillPaint, FrameSnapshot, StrokePaint};
use crate::foundation::color::Color;
use crate::foundation::core::{
    Affine, BezPath, FrameIndex, Fps, Point, Rect, Vec2, about, rect_to_rect,
};
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::foundation::path::trim_path;
use crate::scene::element::{Element, ElementId, ElementKind, Geometry, PaintRole, Shape, Style};
use crate::scene::model::Scene;
use crate::scene::step::{GrowOrigin, Step, StepKind};
use crate::scene::timeline::{Beat, BeatKind};

const HIGHLIGHT_BUFF: f64 = 0.1;
const OVERLAY_STROKE_WIDTH: f64 = 0.04;
const FLASH_RAYS: usize = 12;
const FLASH_RADIUS: f64 = 0.3;
const FLASH_RAY_LENGTH: f64 = 0.2;
const WIGGLES: f64 = 6.0;
const MIN_DETERMINANT: f64 = 1e-12;

/// Samples finalized scenes into [`FrameSnapshot`]s.
///
/// Sampling replays every beat that ended before `t` at full progress and the current beat at
/// its eased progress, so any instant can be resolved independently of the others.
pub struct Evaluator;

impl Evaluator {
    /// Resolve the picture at `t` seconds.
    #[tracing::instrument(level = "trace", skip(scene), fields(scene = %scene.name))]
    pub fn sample(scene: &Scene, t: f64) -> BeatlineResult<FrameSnapshot> {
        if !t.is_finite() || t < 0.0 {
            return Err(BeatlineError::render(format!(
                "sample time must be finite and >= 0, got {t}"
            )));
        }

        let mut replay = Replay::new(scene);
        let mut start = 0.0;
        for beat in scene.timeline.beats() {
            if t < start {
                break;
            }
            let end = start + beat.duration;
            let done = t >= end;
            if beat.kind == BeatKind::Play {
                let local = if done { beat.duration } else { t - start };
                replay.apply_beat(beat, local, done)?;
            }
            if !done {
                break;
            }
            start = end;
        }

        let mut items = replay.emit()?;
        items.append(&mut replay.overlays);
        Ok(FrameSnapshot {
            time: t,
            background: scene.background,
            items,
        })
    }

    /// Resolve frame `frame` at `fps`.
    pub fn eval_frame(scene: &Scene, fps: Fps, frame: FrameIndex) -> BeatlineResult<FrameSnapshot> {
        Self::sample(scene, fps.frame_time_secs(frame))
    }
}

#[derive(Clone, Debug)]
struct Morph {
    to: ElementId,
    to_placement: Affine,
    to_color: Option<Color>,
    t: f64,
}

#[derive(Clone, Debug)]
struct NodeState {
    visible: bool,
    appearance: ElementId,
    placement: Affine,
    opacity: f64,
    fade: f64,
    draw: f64,
    fill: f64,
    color: Option<Color>,
    transient: Affine,
    tint: Option<Color>,
    morph: Option<Morph>,
}

impl NodeState {
    fn settle(&mut self) {
        self.fade = 1.0;
        self.draw = 1.0;
        self.fill = 1.0;
        self.morph = None;
    }
}

struct Paint {
    color: Option<Color>,
    tint: Option<Color>,
    draw: f64,
    fill: f64,
    alpha: f64,
}

struct Replay<'a> {
    scene: &'a Scene,
    nodes: Vec<NodeState>,
    overlays: Vec<DrawItem>,
}

impl<'a> Replay<'a> {
    fn new(scene: &'a Scene) -> Self {
        let nodes = scene
            .tree
            .iter()
            .map(|el| NodeState {
                visible: scene.visible_at_start.contains(&el.id),
                appearance: el.id,
                placement: Affine::IDENTITY,
                opacity: el.style.opacity,
                fade: 1.0,
                draw: 1.0,
                fill: 1.0,
                color: None,
                transient: Affine::IDENTITY,
                tint: None,
                morph: None,
            })
            .collect();
        Self {
            scene,
            nodes,
            overlays: Vec::new(),
        }
    }

    fn node(&mut self, id: ElementId) -> &mut NodeState {
        &mut self.nodes[id.0 as usize]
    }

    fn leaves_of(&self, targets: &[ElementId]) -> Vec<ElementId> {
        targets
            .iter()
            .flat_map(|&t| self.scene.tree.leaves(t))
            .collect()
    }

    fn apply_beat(&mut self, beat: &Beat, local: f64, done: bool) -> BeatlineResult<()> {
        let base = self.nodes.clone();
        for step in &beat.steps {
            let raw = if done { 1.0 } else { step.progress_at(local) };
            let p = step.ease.apply(raw);
            self.apply_step(step, &base, p, raw < 1.0)?;
        }
        Ok(())
    }

    fn apply_step(
        &mut self,
        step: &Step,
        base: &[NodeState],
        p: f64,
        running: bool,
    ) -> BeatlineResult<()> {
        let leaves = self.leaves_of(&step.targets);
        match &step.kind {
            StepKind::Add => {
                if !running {
                    for id in leaves {
                        let st = self.node(id);
                        st.visible = true;
                        st.settle();
                    }
                }
            }
            StepKind::Remove => {
                if !running {
                    for id in leaves {
                        self.node(id).visible = false;
                    }
                }
            }
            StepKind::Create | StepKind::Write => {
                for id in leaves {
                    let st = self.node(id);
                    st.visible = true;
                    st.fade = 1.0;
                    st.draw = p;
                    st.fill = p;
                }
            }
            StepKind::DrawBorderThenFill => {
                for id in leaves {
                    let st = self.node(id);
                    st.visible = true;
                    st.fade = 1.0;
                    st.draw = (2.0 * p).min(1.0);
                    st.fill = (2.0 * p - 1.0).max(0.0);
                }
            }
            StepKind::FadeIn { shift, scale } => {
                for &target in &step.targets {
                    let c = self.bounds_in(base, target)?.center();
                    let k = scale + (1.0 - scale) * p;
                    let xf = Affine::translate(-*shift * (1.0 - p)) * about(c, k, 0.0);
                    for id in self.scene.tree.leaves(target) {
                        let st = self.node(id);
                        st.visible = true;
                        st.draw = 1.0;
                        st.fill = 1.0;
                        st.fade = p;
                        if running {
                            st.transient = xf * st.transient;
                        }
                    }
                }
            }
            StepKind::FadeOut { shift, scale } => {
                for &target in &step.targets {
                    let c = self.bounds_in(base, target)?.center();
                    let k = 1.0 + (scale - 1.0) * p;
                    let xf = Affine::translate(*shift * p) * about(c, k, 0.0);
                    for id in self.scene.tree.leaves(target) {
                        let st = self.node(id);
                        if running {
                            st.fade = 1.0 - p;
                            st.transient = xf * st.transient;
                        } else {
                            st.visible = false;
                            st.fade = 1.0;
                        }
                    }
                }
            }
            StepKind::Transform { into } => {
                self.apply_morph(&leaves, *into, base, p, running, false)
            }
            StepKind::ReplacementTransform { into } => {
                self.apply_morph(&leaves, *into, base, p, running, true)
            }
            StepKind::Shift { by } => {
                let xf = Affine::translate(*by * p);
                for id in leaves {
                    let st = self.node(id);
                    st.placement = xf * st.placement;
                }
            }
            StepKind::MoveTo { point } => {
                for &target in &step.targets {
                    let delta = *point - self.bounds_in(base, target)?.center();
                    self.place_subtree(target, Affine::translate(delta * p));
                }
            }
            StepKind::Scale { factor } => {
                for &target in &step.targets {
                    let c = self.bounds_in(base, target)?.center();
                    self.place_subtree(target, about(c, 1.0 + (factor - 1.0) * p, 0.0));
                }
            }
            StepKind::Rotate { angle } => {
                for &target in &step.targets {
                    let c = self.bounds_in(base, target)?.center();
                    self.place_subtree(target, about(c, 1.0, angle * p));
                }
            }
            StepKind::SetOpacity { opacity } => {
                for id in leaves {
                    let from = base[id.0 as usize].opacity;
                    self.node(id).opacity = <f64 as Lerp>::lerp(&from, opacity, p);
                }
            }
            StepKind::SetColor { color } => {
                for id in leaves {
                    let from = self.current_color(base, id)?;
                    self.node(id).color = Some(<Color as Lerp>::lerp(&from, color, p));
                }
            }
            StepKind::Grow { origin } => {
                for &target in &step.targets {
                    let pivot = self.grow_pivot(base, target, *origin)?;
                    for id in self.scene.tree.leaves(target) {
                        let st = self.node(id);
                        st.visible = true;
                        st.settle();
                        if running {
                            st.transient = about(pivot, p, 0.0) * st.transient;
                        }
                    }
                }
            }
            StepKind::Indicate { scale, color } => {
                if running {
                    for &target in &step.targets {
                        let c = self.bounds_in(base, target)?.center();
                        let xf = about(c, 1.0 + (scale - 1.0) * p, 0.0);
                        for id in self.scene.tree.leaves(target) {
                            let from = self.current_color(base, id)?;
                            let st = self.node(id);
                            st.transient = xf * st.transient;
                            st.tint = Some(<Color as Lerp>::lerp(&from, color, p));
                        }
                    }
                }
            }
            StepKind::Circumscribe { color } => {
                if running {
                    for &target in &step.targets {
                        let frame = self
                            .bounds_in(base, target)?
                            .inflate(HIGHLIGHT_BUFF, HIGHLIGHT_BUFF);
                        self.push_flash_path(frame.to_path(1e-3), *color, p);
                    }
                }
            }
            StepKind::Flash { color } => {
                if running {
                    for &target in &step.targets {
                        let c = self.bounds_in(base, target)?.center();
                        for i in 0..FLASH_RAYS {
                            let theta = TAU * (i as f64) / (FLASH_RAYS as f64);
                            let dir = Vec2::new(theta.cos(), theta.sin());
                            let mut ray = BezPath::new();
                            ray.move_to(c + dir * FLASH_RADIUS);
                            ray.line_to(c + dir * (FLASH_RADIUS + FLASH_RAY_LENGTH));
                            self.push_flash_path(ray, *color, p);
                        }
                    }
                }
            }
            StepKind::Wiggle { angle, scale } => {
                if running {
                    let envelope = Ease::ThereAndBack.apply(p);
                    let rot = angle * envelope * (WIGGLES * PI * p).sin();
                    let k = 1.0 + (scale - 1.0) * envelope;
                    for &target in &step.targets {
                        let c = self.bounds_in(base, target)?.center();
                        let xf = about(c, k, rot);
                        for id in self.scene.tree.leaves(target) {
                            let st = self.node(id);
                            st.transient = xf * st.transient;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_morph(
        &mut self,
        sources: &[ElementId],
        into: ElementId,
        base: &[NodeState],
        p: f64,
        running: bool,
        replace: bool,
    ) {
        let dests = self.scene.tree.leaves(into);
        let Some(&last) = dests.last() else {
            return;
        };
        for (i, &src) in sources.iter().enumerate() {
            let dst = &base[dests.get(i).copied().unwrap_or(last).0 as usize];
            let (to, to_placement, to_color) = (dst.appearance, dst.placement, dst.color);
            let st = self.node(src);
            if running {
                st.visible = true;
                st.morph = Some(Morph {
                    to,
                    to_placement,
                    to_color,
                    t: p,
                });
            } else if replace {
                st.visible = false;
                st.morph = None;
            } else {
                st.visible = true;
                st.appearance = to;
                st.placement = to_placement;
                st.color = to_color;
                st.settle();
            }
        }
        if replace && !running {
            for dst in dests {
                let st = self.node(dst);
                st.visible = true;
                st.settle();
            }
        }
    }

    fn place_subtree(&mut self, target: ElementId, xf: Affine) {
        for id in self.scene.tree.leaves(target) {
            let st = self.node(id);
            st.placement = xf * st.placement;
        }
    }

    fn push_flash_path(&mut self, path: BezPath, color: Color, p: f64) {
        let (a, b) = ((2.0 * p - 1.0).max(0.0), (2.0 * p).min(1.0));
        if b <= a {
            return;
        }
        self.overlays.push(DrawItem {
            element: None,
            geometry: DrawGeometry::Path {
                path: trim_path(&path, a, b),
            },
            stroke: Some(StrokePaint {
                color,
                width: OVERLAY_STROKE_WIDTH,
                opacity: 1.0,
                dash: None,
            }),
            fill: None,
            opacity: 1.0,
        });
    }

    fn element(&self, id: ElementId) -> BeatlineResult<&'a Element> {
        self.scene.tree.get(id)
    }

    fn current_color(&self, base: &[NodeState], id: ElementId) -> BeatlineResult<Color> {
        let st = &base[id.0 as usize];
        Ok(match st.color {
            Some(c) => c,
            None => self.element(st.appearance)?.style.color,
        })
    }

    fn leaf_bounds_in(&self, nodes: &[NodeState], id: ElementId) -> BeatlineResult<Rect> {
        let st = &nodes[id.0 as usize];
        let el = self.element(st.appearance)?;
        Ok(st.placement.transform_rect_bbox(el.leaf_bounds()))
    }

    fn bounds_in(&self, nodes: &[NodeState], target: ElementId) -> BeatlineResult<Rect> {
        let leaves = self.scene.tree.leaves(target);
        if leaves.is_empty() {
            return self.scene.tree.bounds(target);
        }
        let rects = leaves
            .iter()
            .map(|&id| self.leaf_bounds_in(nodes, id))
            .collect::<BeatlineResult<Vec<_>>>()?;
        Ok(rects
            .into_iter()
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO))
    }

    fn grow_pivot(
        &self,
        base: &[NodeState],
        target: ElementId,
        origin: GrowOrigin,
    ) -> BeatlineResult<Point> {
        let bounds = self.bounds_in(base, target)?;
        Ok(match origin {
            GrowOrigin::Center => bounds.center(),
            GrowOrigin::Edge(dir) => dir.edge_midpoint(bounds),
            GrowOrigin::Start => {
                let st = &base[target.0 as usize];
                let el = self.element(st.appearance)?;
                match &el.kind {
                    ElementKind::Shape(shape) => shape
                        .start_point()
                        .map(|s| st.placement * el.world_transform() * s)
                        .unwrap_or_else(|| bounds.center()),
                    _ => bounds.center(),
                }
            }
        })
    }

    fn emit(&self) -> BeatlineResult<Vec<DrawItem>> {
        let mut out = Vec::new();
        for id in self.scene.tree.paint_order() {
            let st = &self.nodes[id.0 as usize];
            let alpha = st.opacity * st.fade;
            if !st.visible || alpha <= 0.0 {
                continue;
            }
            let from = self.element(st.appearance)?;
            let paint = Paint {
                color: st.color,
                tint: st.tint,
                draw: st.draw,
                fill: st.fill,
                alpha,
            };
            let Some(m) = &st.morph else {
                emit_element(id, from, st.transient * st.placement, &paint, &mut out);
                continue;
            };

            let to = self.element(m.to)?;
            if let Some(mid) = lerp_element(from, to, m.t) {
                let color = match (st.color, m.to_color) {
                    (None, None) => None,
                    (a, b) => Some(<Color as Lerp>::lerp(
                        &a.unwrap_or(from.style.color),
                        &b.unwrap_or(to.style.color),
                        m.t,
                    )),
                };
                let placement = lerp_affine(st.placement, m.to_placement, m.t);
                let paint = Paint { color, ..paint };
                emit_element(id, &mid, st.transient * placement, &paint, &mut out);
            } else {
                let ba = st.placement.transform_rect_bbox(from.leaf_bounds());
                let bb = m.to_placement.transform_rect_bbox(to.leaf_bounds());
                let mid = <Rect as Lerp>::lerp(&ba, &bb, m.t);
                let out_paint = Paint {
                    alpha: alpha * (1.0 - m.t),
                    draw: 1.0,
                    fill: 1.0,
                    ..paint
                };
                emit_element(
                    id,
                    from,
                    st.transient * rect_to_rect(ba, mid) * st.placement,
                    &out_paint,
                    &mut out,
                );
                let in_paint = Paint {
                    color: m.to_color,
                    tint: st.tint,
                    draw: 1.0,
                    fill: 1.0,
                    alpha: alpha * m.t,
                };
                emit_element(
                    id,
                    to,
                    st.transient * rect_to_rect(bb, mid) * m.to_placement,
                    &in_paint,
                    &mut out,
                );
            }
        }
        Ok(out)
    }
}

fn emit_element(owner: ElementId, el: &Element, m: Affine, paint: &Paint, out: &mut Vec<DrawItem>) {
    if paint.alpha <= 0.0 {
        return;
    }
    let xf = m * el.world_transform();
    if xf.determinant().abs() < MIN_DETERMINANT {
        return;
    }
    let stroke_color = paint.tint.or(paint.color).unwrap_or(el.style.color);
    let fill_color = paint.tint.or(paint.color).unwrap_or(el.style.fill_color());
    let style = &el.style;

    match &el.kind {
        ElementKind::Shape(shape) => {
            let dash = match shape {
                Shape::Line { dash, .. } => *dash,
                _ => None,
            };
            for (path, role) in shape.paths() {
                let world = xf * path;
                match role {
                    PaintRole::Outline => {
                        let stroke = (style.stroke_width > 0.0
                            && style.stroke_opacity > 0.0
                            && paint.draw > 0.0)
                            .then_some(StrokePaint {
                                color: stroke_color,
                                width: style.stroke_width / 100.0,
                                opacity: style.stroke_opacity,
                                dash,
                            });
                        let fill = (style.fill_opacity > 0.0 && paint.fill > 0.0).then_some(
                            FillPaint {
                                color: fill_color,
                                opacity: style.fill_opacity * paint.fill,
                            },
                        );
                        if paint.draw >= 1.0 {
                            if stroke.is_some() || fill.is_some() {
                                out.push(path_item(owner, world, stroke, fill, paint.alpha));
                            }
                            continue;
                        }
                        if fill.is_some() {
                            out.push(path_item(owner, world.clone(), None, fill, paint.alpha));
                        }
                        if stroke.is_some() {
                            let trimmed = trim_path(&world, 0.0, paint.draw);
                            out.push(path_item(owner, trimmed, stroke, None, paint.alpha));
                        }
                    }
                    PaintRole::Solid => {
                        if paint.fill > 0.0 {
                            let fill = FillPaint {
                                color: stroke_color,
                                opacity: style.stroke_opacity * paint.fill,
                            };
                            out.push(path_item(owner, world, None, Some(fill), paint.alpha));
                        }
                    }
                }
            }
        }
        ElementKind::Text(spec) | ElementKind::Formula(spec) => {
            if paint.draw <= 0.0 {
                return;
            }
            let lines = el.display_lines();
            out.push(DrawItem {
                element: Some(owner),
                geometry: DrawGeometry::Text {
                    extent: spec.estimate_bounds(&lines),
                    lines,
                    em: spec.em(),
                    line_height: spec.line_height(),
                    bold: spec.bold,
                    italic: spec.italic,
                    transform: xf,
                    reveal: paint.draw,
                },
                stroke: None,
                fill: Some(FillPaint {
                    color: stroke_color,
                    opacity: style.stroke_opacity,
                }),
                opacity: paint.alpha,
            });
        }
        ElementKind::Group => {}
    }
}

fn path_item(
    owner: ElementId,
    path: BezPath,
    stroke: Option<StrokePaint>,
    fill: Option<FillPaint>,
    opacity: f64,
) -> DrawItem {
    DrawItem {
        element: Some(owner),
        geometry: DrawGeometry::Path { path },
        stroke,
        fill,
        opacity,
    }
}

fn lerp_affine(a: Affine, b: Affine, t: f64) -> Affine {
    let (ca, cb) = (a.as_coeffs(), b.as_coeffs());
    let mut out = [0.0; 6];
    for (o, (x, y)) in out.iter_mut().zip(ca.iter().zip(cb.iter())) {
        *o = <f64 as Lerp>::lerp(x, y, t);
    }
    Affine::new(out)
}

fn lerp_style(a: &Style, b: &Style, t: f64) -> Style {
    Style {
        color: <Color as Lerp>::lerp(&a.color, &b.color, t),
        stroke_width: <f64 as Lerp>::lerp(&a.stroke_width, &b.stroke_width, t),
        stroke_opacity: <f64 as Lerp>::lerp(&a.stroke_opacity, &b.stroke_opacity, t),
        fill: Some(<Color as Lerp>::lerp(&a.fill_color(), &b.fill_color(), t)),
        fill_opacity: <f64 as Lerp>::lerp(&a.fill_opacity, &b.fill_opacity, t),
        opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
    }
}

fn lerp_shape(a: &Shape, b: &Shape, t: f64) -> Option<Shape> {
    let l = |x: &f64, y: &f64| <f64 as Lerp>::lerp(x, y, t);
    Some(match (a, b) {
        (
            Shape::Rectangle {
                width: w0,
                height: h0,
                corner_radius: r0,
            },
            Shape::Rectangle {
                width: w1,
                height: h1,
                corner_radius: r1,
            },
        ) => Shape::Rectangle {
            width: l(w0, w1),
            height: l(h0, h1),
            corner_radius: l(r0, r1),
        },
        (
            Shape::Ellipse {
                width: w0,
                height: h0,
            },
            Shape::Ellipse {
                width: w1,
                height: h1,
            },
        ) => Shape::Ellipse {
            width: l(w0, w1),
            height: l(h0, h1),
        },
        (
            Shape::Arc {
                radius: r0,
                start_angle: s0,
                sweep_angle: w0,
            },
            Shape::Arc {
                radius: r1,
                start_angle: s1,
                sweep_angle: w1,
            },
        ) => Shape::Arc {
            radius: l(r0, r1),
            start_angle: l(s0, s1),
            sweep_angle: l(w0, w1),
        },
        (
            Shape::Line {
                start: s0,
                end: e0,
                dash: d0,
            },
            Shape::Line {
                start: s1,
                end: e1,
                dash: d1,
            },
        ) => Shape::Line {
            start: <Point as Lerp>::lerp(s0, s1, t),
            end: <Point as Lerp>::lerp(e0, e1, t),
            dash: if t < 0.5 { *d0 } else { *d1 },
        },
        (
            Shape::Arrow {
                start: s0,
                end: e0,
                tip_length: k0,
            },
            Shape::Arrow {
                start: s1,
                end: e1,
                tip_length: k1,
            },
        ) => Shape::Arrow {
            start: <Point as Lerp>::lerp(s0, s1, t),
            end: <Point as Lerp>::lerp(e0, e1, t),
            tip_length: l(k0, k1),
        },
        (Shape::Dot { radius: r0 }, Shape::Dot { radius: r1 }) => Shape::Dot { radius: l(r0, r1) },
        (Shape::Polygon { vertices: v0 }, Shape::Polygon { vertices: v1 })
            if v0.len() == v1.len() =>
        {
            Shape::Polygon {
                vertices: v0
                    .iter()
                    .zip(v1)
                    .map(|(p, q)| <Point as Lerp>::lerp(p, q, t))
                    .collect(),
            }
        }
        _ => return None,
    })
}

fn lerp_element(a: &Element, b: &Element, t: f64) -> Option<Element> {
    let (ElementKind::Shape(sa), ElementKind::Shape(sb)) = (&a.kind, &b.kind) else {
        return None;
    };
    let shape = lerp_shape(sa, sb, t)?;
    Some(Element {
        kind: ElementKind::Shape(shape),
        geometry: Geometry {
            position: <Point as Lerp>::lerp(&a.geometry.position, &b.geometry.position, t),
            rotation: <f64 as Lerp>::lerp(&a.geometry.rotation, &b.geometry.rotation, t),
            scale: <f64 as Lerp>::lerp(&a.geometry.scale, &b.geometry.scale, t),
        },
        style: lerp_style(&a.style, &b.style, t),
        ..a.clone()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
