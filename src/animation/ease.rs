/// Rate functions mapping normalized step progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Sigmoid ease-in/out; the default for every step.
    #[default]
    Smooth,
    /// First half of [`Ease::Smooth`], stretched: starts slow, ends fast.
    RushInto,
    /// Second half of [`Ease::Smooth`], stretched: starts fast, ends slow.
    RushFrom,
    /// Goes to 1 at the midpoint and back to 0 (smoothly).
    ThereAndBack,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

const SMOOTH_INFLECTION: f64 = 10.0;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64) -> f64 {
    let error = sigmoid(-SMOOTH_INFLECTION / 2.0);
    ((sigmoid(SMOOTH_INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

impl Ease {
    /// Apply this rate function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
            Self::RushInto => 2.0 * smooth(t / 2.0),
            Self::RushFrom => 2.0 * smooth(t / 2.0 + 0.5) - 1.0,
            Self::ThereAndBack => {
                let nt = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
                smooth(nt)
            }
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// `true` when the function ends back at 0 instead of 1.
    pub fn returns_to_start(self) -> bool {
        matches!(self, Self::ThereAndBack)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
