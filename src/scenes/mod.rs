//! Scene catalog.
//!
//! Each scene is a self-contained script over the public builder API; scenes share nothing at
//! runtime beyond the palette below.

use crate::foundation::color::Color;
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::scene::model::Scene;

mod big_picture;
mod chsh;
mod dpi;
mod entropy;
mod gauge;
mod ic_game;
mod polytope;
mod prbox;
mod prbox_crime;
mod proof_sketch;

/// One catalog entry.
#[derive(Clone, Copy)]
pub struct SceneEntry {
    /// Scene name, also used as the default artifact name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    build: fn() -> BeatlineResult<Scene>,
}

impl SceneEntry {
    /// Run the scene script.
    pub fn build(&self) -> BeatlineResult<Scene> {
        (self.build)()
    }
}

impl std::fmt::Debug for SceneEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

const CATALOG: &[SceneEntry] = &[
    SceneEntry {
        name: "CorrelationPolytope",
        description: "Nested local, quantum and no-signaling correlation sets",
        build: polytope::build,
    },
    SceneEntry {
        name: "PRBoxScene",
        description: "The PR-box as a two-party black box and its defining correlations",
        build: prbox::build,
    },
    SceneEntry {
        name: "CHSHBars",
        description: "Bar chart of CHSH scores with the Tsirelson bound",
        build: chsh::build,
    },
    SceneEntry {
        name: "TsirelsonGauge",
        description: "Gauge needle sweeping the CHSH score up to the Tsirelson bound",
        build: gauge::build,
    },
    SceneEntry {
        name: "PRBoxCrime",
        description: "PR-box truth table winning every CHSH round, stamped as a violation",
        build: prbox_crime::build,
    },
    SceneEntry {
        name: "ICGame",
        description: "The information causality game between Alice and Bob",
        build: ic_game::build,
    },
    SceneEntry {
        name: "DPIChain",
        description: "DPI implies information causality implies Tsirelson's bound",
        build: dpi::build,
    },
    SceneEntry {
        name: "EntropyDef",
        description: "Generalized entropy as the minimum over fine-grained measurements",
        build: entropy::build,
    },
    SceneEntry {
        name: "ProofSketch",
        description: "Axioms feeding the lemmas that prove the main theorem",
        build: proof_sketch::build,
    },
    SceneEntry {
        name: "BigPicture",
        description: "Classical, quantum and no-signaling sets with the rules bounding each",
        build: big_picture::build,
    },
];

/// All registered scenes, in presentation order.
pub fn catalog() -> &'static [SceneEntry] {
    CATALOG
}

/// Look up a scene by name (ASCII case-insensitive).
pub fn find(name: &str) -> BeatlineResult<&'static SceneEntry> {
    CATALOG
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let known: Vec<_> = CATALOG.iter().map(|e| e.name).collect();
            BeatlineError::reference(format!(
                "unknown scene \"{name}\" (known: {})",
                known.join(", ")
            ))
        })
}

/// Build the named scene.
#[tracing::instrument(level = "debug")]
pub fn build(name: &str) -> BeatlineResult<Scene> {
    find(name)?.build()
}

pub(crate) struct Palette {
    pub background: Color,
    pub local: Color,
    pub quantum: Color,
    pub no_signaling: Color,
}

pub(crate) fn palette() -> BeatlineResult<Palette> {
    Ok(Palette {
        background: Color::parse("#0f0f1a")?,
        local: Color::parse("#44aaff")?,
        quantum: Color::parse("#aa44ff")?,
        no_signaling: Color::parse("#ff4444")?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/mod.rs"]
mod tests;
