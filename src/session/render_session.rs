use std::path::PathBuf;

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec};
use crate::encode::png::PngSequenceSink;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::eval::evaluator::Evaluator;
use crate::eval::snapshot::FrameSnapshot;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::raster::SvgRasterBackend;
use crate::scene::model::Scene;
use crate::session::config::{OutputFormat, Quality, RenderConfig};

/// Options controlling a [`RenderSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Reuse the previous frame when the sampled snapshot is unchanged.
    pub static_frame_elision: bool,
}

impl RenderSessionOpts {
    /// Options for a quality preset.
    pub fn from_quality(quality: Quality) -> Self {
        Self {
            canvas: quality.canvas(),
            fps: quality.fps(),
            static_frame_elision: true,
        }
    }
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self::from_quality(Quality::default())
    }
}

/// Render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames pushed to the sink.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from the previous one by static-frame elision.
    pub frames_elided: u64,
}

/// Frame-by-frame renderer for one finalized [`Scene`].
pub struct RenderSession {
    scene: Scene,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Create a session; the canvas must be non-empty.
    pub fn new(scene: Scene, opts: RenderSessionOpts) -> BeatlineResult<Self> {
        if opts.canvas.width == 0 || opts.canvas.height == 0 {
            return Err(BeatlineError::render("canvas width/height must be non-zero"));
        }
        Fps::new(opts.fps.num, opts.fps.den)?;
        Ok(Self { scene, opts })
    }

    /// The scene being rendered.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Session options.
    pub fn opts(&self) -> RenderSessionOpts {
        self.opts
    }

    /// `ceil(duration * fps)`, never less than one frame.
    pub fn frame_count(&self) -> u64 {
        self.opts
            .fps
            .secs_to_frames_ceil(self.scene.duration())
            .max(1)
    }

    /// Resolved snapshot of frame `idx`.
    pub fn snapshot(&self, idx: FrameIndex) -> BeatlineResult<FrameSnapshot> {
        if idx.0 >= self.frame_count() {
            return Err(BeatlineError::render(format!(
                "frame {} is outside the scene ({} frames)",
                idx.0,
                self.frame_count()
            )));
        }
        Evaluator::eval_frame(&self.scene, self.opts.fps, idx)
    }

    /// Render frame `idx`.
    pub fn render_frame(
        &self,
        backend: &mut dyn RenderBackend,
        idx: FrameIndex,
    ) -> BeatlineResult<FrameRGBA> {
        let snap = self.snapshot(idx)?;
        backend.render(&snap, self.opts.canvas)
    }

    /// Render the scene at an arbitrary time in seconds.
    pub fn render_at(&self, backend: &mut dyn RenderBackend, t: f64) -> BeatlineResult<FrameRGBA> {
        let snap = Evaluator::sample(&self.scene, t)?;
        backend.render(&snap, self.opts.canvas)
    }

    /// Render every frame in order into `sink`.
    ///
    /// On failure the sink is aborted, so file sinks leave no output behind.
    #[tracing::instrument(skip_all, fields(scene = %self.scene.name))]
    pub fn render_all(
        &self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> BeatlineResult<RenderStats> {
        let cfg = SinkConfig {
            width: self.opts.canvas.width,
            height: self.opts.canvas.height,
            fps: self.opts.fps,
        };
        sink.begin(cfg)?;
        let res = self
            .stream_frames(backend, &mut *sink)
            .and_then(|stats| sink.end().map(|()| stats));
        match res {
            Ok(stats) => {
                tracing::info!(
                    frames = stats.frames_total,
                    rendered = stats.frames_rendered,
                    elided = stats.frames_elided,
                    "render finished"
                );
                Ok(stats)
            }
            Err(e) => {
                tracing::error!(error = %e, "render failed; aborting sink");
                sink.abort();
                Err(e)
            }
        }
    }

    fn stream_frames(
        &self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> BeatlineResult<RenderStats> {
        let total = self.frame_count();
        let mut stats = RenderStats::default();
        let mut prev: Option<(FrameSnapshot, FrameRGBA)> = None;

        for f in 0..total {
            let idx = FrameIndex(f);
            let snap = self.snapshot(idx)?;
            let reusable = self.opts.static_frame_elision
                && prev.as_ref().is_some_and(|(p, _)| same_picture(p, &snap));

            if reusable {
                stats.frames_elided += 1;
            } else {
                let frame = backend.render(&snap, self.opts.canvas)?;
                stats.frames_rendered += 1;
                prev = Some((snap, frame));
            }
            if let Some((_, frame)) = prev.as_ref() {
                sink.push_frame(idx, frame)?;
            }
            stats.frames_total += 1;

            if f % 100 == 0 {
                tracing::debug!(frame = f, total, "rendering");
            }
        }
        Ok(stats)
    }
}

fn same_picture(a: &FrameSnapshot, b: &FrameSnapshot) -> bool {
    a.background == b.background && a.items == b.items
}

/// Build the sink selected by `cfg` for `scene`.
pub fn create_sink(cfg: &RenderConfig, scene: &Scene) -> (PathBuf, Box<dyn FrameSink>) {
    let out = cfg.output_path(&scene.name);
    let bg = scene.background.with_alpha(1.0).to_rgba8();
    let sink: Box<dyn FrameSink> = match cfg.format {
        OutputFormat::Png => Box::new(PngSequenceSink::new(&out, cfg.overwrite, bg)),
        OutputFormat::Mp4 | OutputFormat::Webm => {
            let codec = if cfg.format == OutputFormat::Webm {
                VideoCodec::Vp9Webm
            } else {
                VideoCodec::H264Mp4
            };
            Box::new(FfmpegSink::new(FfmpegSinkOpts {
                out_path: out.clone(),
                codec,
                overwrite: cfg.overwrite,
                bg_rgba: bg,
            }))
        }
    };
    (out, sink)
}

/// Render `scene` to the artifact described by `cfg`, returning its path.
pub fn render_scene(scene: Scene, cfg: &RenderConfig) -> BeatlineResult<(PathBuf, RenderStats)> {
    let (out, mut sink) = create_sink(cfg, &scene);
    let mut opts = RenderSessionOpts::from_quality(cfg.quality);
    opts.static_frame_elision = cfg.static_frame_elision;
    let session = RenderSession::new(scene, opts)?;
    let mut backend = SvgRasterBackend::new();
    let stats = session.render_all(&mut backend, sink.as_mut())?;
    Ok((out, stats))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
