use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{BeatlineError, BeatlineResult};

/// Resolution and frame-rate preset.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Quality {
    /// 854x480 @ 15 fps.
    #[serde(rename = "l", alias = "low")]
    #[value(name = "l", alias = "low")]
    Low,
    /// 1280x720 @ 30 fps.
    #[default]
    #[serde(rename = "m", alias = "medium")]
    #[value(name = "m", alias = "medium")]
    Medium,
    /// 1920x1080 @ 60 fps.
    #[serde(rename = "h", alias = "high")]
    #[value(name = "h", alias = "high")]
    High,
    /// 3840x2160 @ 60 fps.
    #[serde(rename = "k", alias = "4k")]
    #[value(name = "k", alias = "4k")]
    FourK,
}

impl Quality {
    /// Output canvas for this preset.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Low => (854, 480),
            Self::Medium => (1280, 720),
            Self::High => (1920, 1080),
            Self::FourK => (3840, 2160),
        };
        Canvas { width, height }
    }

    /// Frame rate for this preset.
    pub fn fps(self) -> Fps {
        let num = match self {
            Self::Low => 15,
            Self::Medium => 30,
            Self::High | Self::FourK => 60,
        };
        Fps { num, den: 1 }
    }
}

/// Artifact written by a full render.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// H.264 in MP4.
    #[default]
    Mp4,
    /// VP9 in WebM.
    Webm,
    /// Directory of numbered PNG frames.
    Png,
}

impl OutputFormat {
    /// File extension of the artifact; empty for PNG sequences (a directory).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
            Self::Png => "",
        }
    }
}

/// Caller configuration for one render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Resolution/frame-rate preset.
    pub quality: Quality,
    /// Output container.
    pub format: OutputFormat,
    /// Directory receiving artifacts named after their scene.
    pub out_dir: PathBuf,
    /// Explicit output path; overrides `out_dir`.
    pub output: Option<PathBuf>,
    /// Replace an existing artifact.
    pub overwrite: bool,
    /// Reuse the previous frame's pixels when the sampled snapshot did not change.
    pub static_frame_elision: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            format: OutputFormat::default(),
            out_dir: PathBuf::from("media"),
            output: None,
            overwrite: true,
            static_frame_elision: true,
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn from_path(path: &Path) -> BeatlineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BeatlineError::serde(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> BeatlineResult<Self> {
        serde_json::from_str(text).map_err(|e| BeatlineError::serde(e.to_string()))
    }

    /// Artifact path for `scene_name`.
    pub fn output_path(&self, scene_name: &str) -> PathBuf {
        if let Some(p) = &self.output {
            return p.clone();
        }
        let ext = self.format.extension();
        if ext.is_empty() {
            self.out_dir.join(scene_name)
        } else {
            self.out_dir.join(format!("{scene_name}.{ext}"))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
