use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::scene::element::ElementId;
use crate::scene::timeline::Timeline;
use crate::scene::tree::ElementTree;

/// Finalized scene: element tree, beat list and background.
///
/// Built through [`crate::SceneBuilder`]; once built it is never mutated, and every frame is a
/// pure function of the scene and a timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name, also the default output file stem.
    pub name: String,
    /// Background fill.
    pub background: Color,
    /// Element tree.
    pub tree: ElementTree,
    /// Beat list.
    pub timeline: Timeline,
    /// Elements visible from the first frame.
    pub visible_at_start: BTreeSet<ElementId>,
}

impl Scene {
    /// Output duration in seconds.
    pub fn duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> BeatlineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BeatlineError::serde(format!("serialize scene '{}': {e}", self.name)))
    }

    /// Parse a scene previously written by [`Scene::to_json_pretty`].
    ///
    /// The loaded scene gets the same checks the builder applies, so a malformed file fails here
    /// rather than while frames are sampled.
    pub fn from_json_str(s: &str) -> BeatlineResult<Self> {
        let scene: Self = serde_json::from_str(s)
            .map_err(|e| BeatlineError::serde(format!("parse scene json: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> BeatlineResult<()> {
        if self.name.trim().is_empty() {
            return Err(BeatlineError::construction("scene name must be non-empty"));
        }
        if !self.background.is_valid() {
            return Err(BeatlineError::construction(
                "background color channels must be in [0, 1]",
            ));
        }
        self.tree.validate()?;
        self.timeline.validate()?;

        for id in &self.visible_at_start {
            self.tree.get(*id)?;
        }
        for beat in self.timeline.beats() {
            for step in &beat.steps {
                for id in step.targets.iter().copied().chain(step.kind.morph_target()) {
                    self.tree.get(id)?;
                    if id == ElementTree::ROOT {
                        return Err(BeatlineError::reference(
                            "the scene root cannot be animated directly",
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
