use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point, Vec2};
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::scene::element::ElementId;

/// Where a `grow` step starts from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowOrigin {
    /// Bounds center.
    Center,
    /// Midpoint of one bounds edge.
    Edge(Direction),
    /// Start point of a line or arrow (bounds center for other shapes).
    Start,
}

/// What a step does to its targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Make visible instantly.
    Add,
    /// Hide instantly.
    Remove,
    /// Draw strokes progressively, then show fills.
    Create,
    /// Like `Create`, the usual choice for labels.
    Write,
    /// Draw outlines, then cross-fade into the filled look.
    DrawBorderThenFill,
    /// Fade in, optionally arriving from `-shift` and from `scale`.
    FadeIn {
        /// The element starts this far from its final place.
        shift: Vec2,
        /// Starting scale relative to the final size.
        scale: f64,
    },
    /// Fade out, optionally drifting by `shift` and toward `scale`.
    FadeOut {
        /// Drift applied over the fade.
        shift: Vec2,
        /// Final scale relative to the current size.
        scale: f64,
    },
    /// Morph each target into the look and place of `into`; targets stay the visible element.
    Transform {
        /// Element whose appearance is adopted.
        into: ElementId,
    },
    /// Morph into `into`, then hide the targets and show `into` itself.
    ReplacementTransform {
        /// Element replacing the targets.
        into: ElementId,
    },
    /// Translate by `by`.
    Shift {
        /// Offset.
        by: Vec2,
    },
    /// Translate so the bounds center lands on `point`.
    MoveTo {
        /// Destination of the bounds center.
        point: Point,
    },
    /// Scale around the bounds center.
    Scale {
        /// Multiplier.
        factor: f64,
    },
    /// Rotate around the bounds center.
    Rotate {
        /// Angle in radians (counter-clockwise).
        angle: f64,
    },
    /// Animate overall opacity.
    SetOpacity {
        /// Target opacity.
        opacity: f64,
    },
    /// Animate stroke, fill and glyph color.
    SetColor {
        /// Target color.
        color: Color,
    },
    /// Grow from zero size.
    Grow {
        /// Fixed point of the growth.
        origin: GrowOrigin,
    },
    /// Briefly enlarge and tint.
    Indicate {
        /// Peak scale.
        scale: f64,
        /// Peak tint.
        color: Color,
    },
    /// Run a highlight stroke around the bounds.
    Circumscribe {
        /// Highlight color.
        color: Color,
    },
    /// Burst of short rays around the bounds center.
    Flash {
        /// Ray color.
        color: Color,
    },
    /// Shake in place.
    Wiggle {
        /// Peak rotation in radians.
        angle: f64,
        /// Peak scale.
        scale: f64,
    },
}

impl StepKind {
    fn default_run_time(&self) -> f64 {
        match self {
            Self::Add | Self::Remove => 0.0,
            Self::Wiggle { .. } => 2.0,
            Self::DrawBorderThenFill => 2.0,
            _ => 1.0,
        }
    }

    fn default_ease(&self) -> Ease {
        match self {
            Self::Indicate { .. } => Ease::ThereAndBack,
            Self::Circumscribe { .. } | Self::Flash { .. } | Self::Wiggle { .. } => Ease::Linear,
            _ => Ease::Smooth,
        }
    }

    /// Morph target, when the step has one.
    pub fn morph_target(&self) -> Option<ElementId> {
        match self {
            Self::Transform { into } | Self::ReplacementTransform { into } => Some(*into),
            _ => None,
        }
    }
}

/// Anything usable as the target list of a step.
pub trait IntoTargets {
    /// Collect into an id list.
    fn into_targets(self) -> Vec<ElementId>;
}

impl IntoTargets for ElementId {
    fn into_targets(self) -> Vec<ElementId> {
        vec![self]
    }
}

impl IntoTargets for Vec<ElementId> {
    fn into_targets(self) -> Vec<ElementId> {
        self
    }
}

impl IntoTargets for &[ElementId] {
    fn into_targets(self) -> Vec<ElementId> {
        self.to_vec()
    }
}

impl<const N: usize> IntoTargets for [ElementId; N] {
    fn into_targets(self) -> Vec<ElementId> {
        self.to_vec()
    }
}

/// One animation applied to a set of elements inside a beat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Elements the step acts on.
    pub targets: Vec<ElementId>,
    /// Effect.
    #[serde(flatten)]
    pub kind: StepKind,
    /// Run time in seconds.
    pub run_time: f64,
    /// Rate function.
    pub ease: Ease,
    /// Start offset inside the beat, in seconds.
    pub delay: f64,
}

impl Step {
    /// Step with the default run time and ease of its kind.
    pub fn new(kind: StepKind, targets: impl IntoTargets) -> Self {
        Self {
            targets: targets.into_targets(),
            run_time: kind.default_run_time(),
            ease: kind.default_ease(),
            kind,
            delay: 0.0,
        }
    }

    /// Override the run time.
    pub fn run_time(mut self, secs: f64) -> Self {
        self.run_time = secs;
        self
    }

    /// Override the rate function.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Start `secs` after the beat begins.
    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = secs;
        self
    }

    /// Time at which the step finishes, relative to the beat start.
    pub fn end_time(&self) -> f64 {
        self.delay + self.run_time
    }

    /// Normalized, un-eased progress at `local` seconds into the beat.
    pub fn progress_at(&self, local: f64) -> f64 {
        if self.run_time <= 0.0 {
            return if local >= self.delay { 1.0 } else { 0.0 };
        }
        ((local - self.delay) / self.run_time).clamp(0.0, 1.0)
    }

    /// `true` while `local` lies inside `[delay, delay + run_time)`.
    pub fn is_running_at(&self, local: f64) -> bool {
        local >= self.delay && local < self.end_time()
    }

    pub(crate) fn validate(&self) -> BeatlineResult<()> {
        if self.targets.is_empty() {
            return Err(BeatlineError::schedule("step has no targets"));
        }
        if !self.run_time.is_finite() || self.run_time < 0.0 {
            return Err(BeatlineError::schedule(format!(
                "step run time must be finite and >= 0, got {}",
                self.run_time
            )));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(BeatlineError::schedule(format!(
                "step delay must be finite and >= 0, got {}",
                self.delay
            )));
        }
        let scale = match &self.kind {
            StepKind::FadeIn { scale, .. }
            | StepKind::FadeOut { scale, .. }
            | StepKind::Indicate { scale, .. }
            | StepKind::Wiggle { scale, .. } => Some(*scale),
            _ => None,
        };
        if let Some(scale) = scale
            && (!scale.is_finite() || scale < 0.0)
        {
            return Err(BeatlineError::schedule(format!(
                "step scale must be finite and >= 0, got {scale}"
            )));
        }

        if let StepKind::Scale { factor } = self.kind
            && (!factor.is_finite() || factor <= 0.0)
        {
            return Err(BeatlineError::schedule(format!(
                "scale factor must be > 0, got {factor}"
            )));
        }

        let color = match &self.kind {
            StepKind::SetColor { color }
            | StepKind::Indicate { color, .. }
            | StepKind::Circumscribe { color }
            | StepKind::Flash { color } => Some(*color),
            _ => None,
        };
        if let Some(color) = color
            && !color.is_valid()
        {
            return Err(BeatlineError::schedule(
                "step color channels must be in [0, 1]",
            ));
        }

        match &self.kind {
            StepKind::SetOpacity { opacity } if !(0.0..=1.0).contains(opacity) => {
                Err(BeatlineError::schedule(format!(
                    "opacity must be in [0, 1], got {opacity}"
                )))
            }
            StepKind::Rotate { angle } | StepKind::Wiggle { angle, .. } if !angle.is_finite() => {
                Err(BeatlineError::schedule("step angle must be finite"))
            }
            StepKind::Transform { into } | StepKind::ReplacementTransform { into }
                if self.targets.contains(into) =>
            {
                Err(BeatlineError::schedule(format!(
                    "element {into} cannot transform into itself"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Make visible instantly.
    pub fn add(targets: impl IntoTargets) -> Self {
        Self::new(StepKind::Add, targets)
    }

    /// Hide instantly.
    pub fn remove(targets: impl IntoTargets) -> Self {
        Self::new(StepKind::Remove, targets)
    }

    /// Draw strokes progressively.
    pub fn create(targets: impl IntoTargets) -> Self {
        Self::new(StepKind::Create, targets)
    }

    /// Write labels progressively.
    pub fn write(targets: impl IntoTargets) -> Self {
        Self::new(StepKind::Write, targets)
    }

    /// Draw outlines, then fill.
    pub fn draw_border_then_fill(targets: impl IntoTargets) -> Self {
        Self::new(StepKind::DrawBorderThenFill, targets)
    }

    /// Plain fade-in.
    pub fn fade_in(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::FadeIn {
                shift: Vec2::ZERO,
                scale: 1.0,
            },
            targets,
        )
    }

    /// Fade in while arriving along `shift`.
    pub fn fade_in_shift(targets: impl IntoTargets, shift: Vec2) -> Self {
        Self::new(StepKind::FadeIn { shift, scale: 1.0 }, targets)
    }

    /// Fade in while growing from `scale`.
    pub fn fade_in_scaled(targets: impl IntoTargets, scale: f64) -> Self {
        Self::new(
            StepKind::FadeIn {
                shift: Vec2::ZERO,
                scale,
            },
            targets,
        )
    }

    /// Plain fade-out.
    pub fn fade_out(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::FadeOut {
                shift: Vec2::ZERO,
                scale: 1.0,
            },
            targets,
        )
    }

    /// Fade out while drifting along `shift`.
    pub fn fade_out_shift(targets: impl IntoTargets, shift: Vec2) -> Self {
        Self::new(StepKind::FadeOut { shift, scale: 1.0 }, targets)
    }

    /// Morph into `into`.
    pub fn transform(targets: impl IntoTargets, into: ElementId) -> Self {
        Self::new(StepKind::Transform { into }, targets)
    }

    /// Morph into `into`, then hand over to it.
    pub fn replacement_transform(targets: impl IntoTargets, into: ElementId) -> Self {
        Self::new(StepKind::ReplacementTransform { into }, targets)
    }

    /// Translate by `by`.
    pub fn shift(targets: impl IntoTargets, by: Vec2) -> Self {
        Self::new(StepKind::Shift { by }, targets)
    }

    /// Move the bounds center to `point`.
    pub fn move_to(targets: impl IntoTargets, point: Point) -> Self {
        Self::new(StepKind::MoveTo { point }, targets)
    }

    /// Scale by `factor`.
    pub fn scale(targets: impl IntoTargets, factor: f64) -> Self {
        Self::new(StepKind::Scale { factor }, targets)
    }

    /// Rotate by `angle` radians.
    pub fn rotate(targets: impl IntoTargets, angle: f64) -> Self {
        Self::new(StepKind::Rotate { angle }, targets)
    }

    /// Animate opacity.
    pub fn set_opacity(targets: impl IntoTargets, opacity: f64) -> Self {
        Self::new(StepKind::SetOpacity { opacity }, targets)
    }

    /// Animate color.
    pub fn set_color(targets: impl IntoTargets, color: Color) -> Self {
        Self::new(StepKind::SetColor { color }, targets)
    }

    /// Grow from the bounds center.
    pub fn grow_from_center(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::Grow {
                origin: GrowOrigin::Center,
            },
            targets,
        )
    }

    /// Grow from one edge.
    pub fn grow_from_edge(targets: impl IntoTargets, edge: Direction) -> Self {
        Self::new(
            StepKind::Grow {
                origin: GrowOrigin::Edge(edge),
            },
            targets,
        )
    }

    /// Grow an arrow (or line) out of its start point.
    pub fn grow_arrow(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::Grow {
                origin: GrowOrigin::Start,
            },
            targets,
        )
    }

    /// Yellow pulse at 1.2x.
    pub fn indicate(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::Indicate {
                scale: 1.2,
                color: Color::YELLOW,
            },
            targets,
        )
    }

    /// Yellow highlight around the bounds.
    pub fn circumscribe(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::Circumscribe {
                color: Color::YELLOW,
            },
            targets,
        )
    }

    /// Yellow ray burst.
    pub fn flash(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::Flash {
                color: Color::YELLOW,
            },
            targets,
        )
    }

    /// Shake with the usual amplitude.
    pub fn wiggle(targets: impl IntoTargets) -> Self {
        Self::new(
            StepKind::Wiggle {
                angle: 0.01 * std::f64::consts::TAU,
                scale: 1.1,
            },
            targets,
        )
    }
}

/// Stagger `steps`: step `i` starts `i * lag_ratio * run_time` after the beat begins.
pub fn lagged(steps: Vec<Step>, lag_ratio: f64) -> BeatlineResult<Vec<Step>> {
    if !lag_ratio.is_finite() || lag_ratio < 0.0 {
        return Err(BeatlineError::schedule(format!(
            "lag ratio must be finite and >= 0, got {lag_ratio}"
        )));
    }
    Ok(steps
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let delay = s.delay + (i as f64) * lag_ratio * s.run_time;
            s.delay(delay)
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/step.rs"]
mod tests;
