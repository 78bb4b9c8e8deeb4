use serde::{Deserialize, Serialize};

use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::scene::step::Step;

/// Whether a beat animates or only holds the current picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeatKind {
    /// Concurrent animation steps.
    Play,
    /// Pure delay.
    Wait,
}

/// Set of concurrent steps; the next beat starts only after this one ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Play or wait.
    pub kind: BeatKind,
    /// Steps, all starting relative to the beat start.
    pub steps: Vec<Step>,
    /// Length in seconds.
    pub duration: f64,
}

/// Ordered beat list of one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    beats: Vec<Beat>,
}

fn check_duration(what: &str, secs: f64) -> BeatlineResult<()> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(BeatlineError::schedule(format!(
            "{what} must be finite and >= 0, got {secs}"
        )));
    }
    Ok(())
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a beat of concurrent `steps`.
    ///
    /// The beat lasts as long as its slowest step (`delay + run_time`). With an override the
    /// whole beat is time-scaled so it lasts exactly `duration_override`.
    pub fn add_beat(
        &mut self,
        steps: Vec<Step>,
        duration_override: Option<f64>,
    ) -> BeatlineResult<f64> {
        let beat = Self::make_beat(steps, duration_override)?;
        let duration = beat.duration;
        self.beats.push(beat);
        Ok(duration)
    }

    pub(crate) fn make_beat(
        mut steps: Vec<Step>,
        duration_override: Option<f64>,
    ) -> BeatlineResult<Beat> {
        if steps.is_empty() {
            return Err(BeatlineError::schedule("a beat needs at least one step"));
        }
        for step in &steps {
            step.validate()?;
        }
        let natural = steps.iter().map(Step::end_time).fold(0.0, f64::max);

        let duration = match duration_override {
            None => natural,
            Some(d) => {
                check_duration("beat duration", d)?;
                if natural > 0.0 {
                    let k = d / natural;
                    for step in &mut steps {
                        step.delay *= k;
                        step.run_time *= k;
                    }
                }
                d
            }
        };
        Ok(Beat {
            kind: BeatKind::Play,
            steps,
            duration,
        })
    }

    /// Append a pure delay.
    pub fn add_wait(&mut self, duration: f64) -> BeatlineResult<()> {
        check_duration("wait duration", duration)?;
        self.beats.push(Beat {
            kind: BeatKind::Wait,
            steps: Vec::new(),
            duration,
        });
        Ok(())
    }

    /// Re-check beats that did not come from [`Timeline::add_beat`], e.g. ones read from JSON.
    pub(crate) fn validate(&self) -> BeatlineResult<()> {
        for (i, beat) in self.beats.iter().enumerate() {
            check_duration("beat duration", beat.duration)?;
            match beat.kind {
                BeatKind::Wait if !beat.steps.is_empty() => {
                    return Err(BeatlineError::schedule(format!(
                        "wait beat {i} carries steps"
                    )));
                }
                BeatKind::Wait => {}
                BeatKind::Play => {
                    if beat.steps.is_empty() {
                        return Err(BeatlineError::schedule(format!("beat {i} has no steps")));
                    }
                    for step in &beat.steps {
                        step.validate()?;
                    }
                    let natural = beat.steps.iter().map(Step::end_time).fold(0.0, f64::max);
                    let tolerance = 1e-9 * beat.duration.max(1.0);
                    if natural > 0.0 && (natural - beat.duration).abs() > tolerance {
                        return Err(BeatlineError::schedule(format!(
                            "beat {i} lasts {} but its steps end at {natural}",
                            beat.duration
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Beats in insertion order.
    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    /// Sum of all beat durations, waits included.
    pub fn total_duration(&self) -> f64 {
        self.beats.iter().map(|b| b.duration).sum()
    }

    /// Start time of every beat.
    pub fn beat_starts(&self) -> Vec<f64> {
        let mut t = 0.0;
        self.beats
            .iter()
            .map(|b| {
                let start = t;
                t += b.duration;
                start
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
