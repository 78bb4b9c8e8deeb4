use std::collections::BTreeSet;

use crate::{
    foundation::color::Color,
    foundation::core::{Direction, Point, Rect, Vec2, frame_rect},
    foundation::error::{BeatlineError, BeatlineResult},
    layout::ops::{self, CrossAlign},
    scene::element::{ElementId, ElementSpec, rectangle},
    scene::model::Scene,
    scene::step::{IntoTargets, Step},
    scene::timeline::Timeline,
    scene::tree::ElementTree,
};

/// Usual `to_edge` margin.
pub const MED_LARGE_BUFF: f64 = 0.5;

/// Imperative builder for one [`Scene`].
///
/// Elements are inserted and positioned first, then beats are appended with [`play`] and
/// [`wait`]. Every call validates its inputs and fails before changing anything.
///
/// [`play`]: SceneBuilder::play
/// [`wait`]: SceneBuilder::wait
pub struct SceneBuilder {
    name: String,
    background: Color,
    tree: ElementTree,
    timeline: Timeline,
    visible: BTreeSet<ElementId>,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            tree: ElementTree::new(),
            timeline: Timeline::new(),
            visible: BTreeSet::new(),
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Element tree built so far.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Duration of the beats appended so far.
    pub fn duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    /// Insert an element under the scene root (hidden until a step or [`SceneBuilder::show`]).
    pub fn add(&mut self, spec: ElementSpec) -> BeatlineResult<ElementId> {
        self.tree.insert(&spec)
    }

    /// Group root-level elements; the group can then be positioned and animated as one.
    pub fn group(&mut self, children: &[ElementId]) -> BeatlineResult<ElementId> {
        self.tree.group(children, None)
    }

    /// [`SceneBuilder::group`] with a diagnostic name.
    pub fn named_group(
        &mut self,
        name: impl Into<String>,
        children: &[ElementId],
    ) -> BeatlineResult<ElementId> {
        self.tree.group(children, Some(name.into()))
    }

    /// Mark elements (and every leaf under groups) as visible from the first frame.
    pub fn show(&mut self, targets: impl IntoTargets) -> BeatlineResult<()> {
        let targets = targets.into_targets();
        for &id in &targets {
            self.tree.get(id)?;
        }
        for id in targets {
            self.visible.extend(self.tree.leaves(id));
        }
        Ok(())
    }

    /// Current scene-space bounds of an element.
    pub fn bounds(&self, id: ElementId) -> BeatlineResult<Rect> {
        self.tree.bounds(id)
    }

    /// Insert a rectangle around `target`, `buff` away from its bounds on every side.
    pub fn surrounding_rectangle(
        &mut self,
        target: ElementId,
        buff: f64,
        color: Color,
    ) -> BeatlineResult<ElementId> {
        let b = self.tree.bounds(target)?.inflate(buff, buff);
        let spec = rectangle(b.width(), b.height())
            .color(color)
            .move_to(b.center());
        self.add(spec)
    }

    fn apply(&mut self, id: ElementId, offset: Vec2) -> BeatlineResult<()> {
        self.tree.shift(id, offset)
    }

    /// Translate an element (and its subtree).
    pub fn shift(&mut self, id: ElementId, by: Vec2) -> BeatlineResult<()> {
        self.apply(id, by)
    }

    /// Center an element on `point`.
    pub fn move_to(&mut self, id: ElementId, point: Point) -> BeatlineResult<()> {
        let b = self.tree.bounds(id)?;
        self.apply(id, ops::move_to(b, point))
    }

    /// Place `id` on the `edge` side of `reference`, `buffer` away.
    pub fn next_to(
        &mut self,
        id: ElementId,
        reference: ElementId,
        edge: Direction,
        buffer: f64,
    ) -> BeatlineResult<()> {
        let b = self.tree.bounds(id)?;
        let r = self.tree.bounds(reference)?;
        self.apply(id, ops::align(b, r, edge, buffer))
    }

    /// Place `id` on the `edge` side of a point.
    pub fn next_to_point(
        &mut self,
        id: ElementId,
        point: Point,
        edge: Direction,
        buffer: f64,
    ) -> BeatlineResult<()> {
        let b = self.tree.bounds(id)?;
        let r = Rect::from_points(point, point);
        self.apply(id, ops::align(b, r, edge, buffer))
    }

    /// Make `id`'s `edge` flush with `reference`'s.
    pub fn align_to(
        &mut self,
        id: ElementId,
        reference: ElementId,
        edge: Direction,
    ) -> BeatlineResult<()> {
        let b = self.tree.bounds(id)?;
        let r = self.tree.bounds(reference)?;
        self.apply(id, ops::align_to(b, r, edge))
    }

    /// Push `id` against a frame edge.
    pub fn to_edge(&mut self, id: ElementId, edge: Direction, buffer: f64) -> BeatlineResult<()> {
        let b = self.tree.bounds(id)?;
        self.apply(id, ops::to_edge(b, frame_rect(), edge, buffer))
    }

    /// Scale the subtree of `id` around its bounds center.
    pub fn scale(&mut self, id: ElementId, factor: f64) -> BeatlineResult<()> {
        let c = self.tree.bounds(id)?.center();
        self.tree.transform_about(id, c, factor, 0.0)
    }

    /// Rotate the subtree of `id` around its bounds center.
    pub fn rotate(&mut self, id: ElementId, angle: f64) -> BeatlineResult<()> {
        let c = self.tree.bounds(id)?.center();
        self.tree.transform_about(id, c, 1.0, angle)
    }

    /// Stack `ids` along `direction`, then recenter the run on its original center.
    pub fn arrange(
        &mut self,
        ids: &[ElementId],
        direction: Direction,
        gap: f64,
    ) -> BeatlineResult<()> {
        self.arrange_aligned(ids, direction, gap, CrossAlign::Center)
    }

    /// [`SceneBuilder::arrange`] with a cross-axis alignment.
    pub fn arrange_aligned(
        &mut self,
        ids: &[ElementId],
        direction: Direction,
        gap: f64,
        align: CrossAlign,
    ) -> BeatlineResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let boxes = ids
            .iter()
            .map(|&id| self.tree.bounds(id))
            .collect::<BeatlineResult<Vec<_>>>()?;
        let before = self.tree.bounds_of(ids)?.center();
        for (&id, off) in ids.iter().zip(ops::stack_aligned(&boxes, direction, gap, align)) {
            self.apply(id, off)?;
        }
        let after = self.tree.bounds_of(ids)?.center();
        for &id in ids {
            self.apply(id, before - after)?;
        }
        Ok(())
    }

    fn check_refs(&self, steps: &[Step]) -> BeatlineResult<()> {
        for step in steps {
            for id in step.targets.iter().copied().chain(step.kind.morph_target()) {
                if !self.tree.contains(id) {
                    return Err(BeatlineError::reference(format!(
                        "{} step refers to unknown element {id}",
                        step_name(step)
                    )));
                }
                if id == ElementTree::ROOT {
                    return Err(BeatlineError::reference(
                        "the scene root cannot be animated directly",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Append a beat of concurrent steps; returns its duration.
    pub fn play(&mut self, steps: Vec<Step>) -> BeatlineResult<f64> {
        self.check_refs(&steps)?;
        self.timeline.add_beat(steps, None)
    }

    /// Append a beat time-scaled to last exactly `run_time` seconds.
    pub fn play_with(&mut self, steps: Vec<Step>, run_time: f64) -> BeatlineResult<f64> {
        self.check_refs(&steps)?;
        self.timeline.add_beat(steps, Some(run_time))
    }

    /// Append a pure delay.
    pub fn wait(&mut self, secs: f64) -> BeatlineResult<()> {
        self.timeline.add_wait(secs)
    }

    pub fn build(self) -> BeatlineResult<Scene> {
        if self.name.trim().is_empty() {
            return Err(BeatlineError::construction("scene name must be non-empty"));
        }
        if !self.background.is_valid() {
            return Err(BeatlineError::construction(
                "background color channels must be in [0, 1]",
            ));
        }
        tracing::debug!(
            scene = %self.name,
            elements = self.tree.len(),
            beats = self.timeline.beats().len(),
            duration = self.timeline.total_duration(),
            "scene built"
        );
        Ok(Scene {
            name: self.name,
            background: self.background,
            tree: self.tree,
            timeline: self.timeline,
            visible_at_start: self.visible,
        })
    }
}

fn step_name(step: &Step) -> String {
    serde_json::to_value(&step.kind)
        .ok()
        .and_then(|v| v.get("kind").and_then(|k| k.as_str()).map(str::to_owned))
        .unwrap_or_else(|| "step".to_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
