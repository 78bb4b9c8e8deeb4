use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

use crate::foundation::core::BezPath;

const ARCLEN_ACCURACY: f64 = 1e-4;

/// Total arc length of `path`.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum()
}

/// Portion of `path` between the arc-length fractions `start` and `end`.
///
/// Fractions are clamped to `[0, 1]`; an empty interval yields an empty path.
pub fn trim_path(path: &BezPath, start: f64, end: f64) -> BezPath {
    let start = start.clamp(0.0, 1.0);
    let end = end.clamp(0.0, 1.0);
    if start <= 0.0 && end >= 1.0 {
        return path.clone();
    }
    if end <= start {
        return BezPath::new();
    }

    let segs: Vec<(PathSeg, f64)> = path
        .segments()
        .map(|s| (s, s.arclen(ARCLEN_ACCURACY)))
        .collect();
    let total: f64 = segs.iter().map(|(_, l)| l).sum();
    if total <= 0.0 {
        return BezPath::new();
    }

    let (a, b) = (start * total, end * total);
    let mut out = Vec::new();
    let mut acc = 0.0;
    for (seg, len) in segs {
        let (s0, s1) = (acc, acc + len);
        acc = s1;
        if len <= 0.0 || s1 <= a || s0 >= b {
            continue;
        }
        let t0 = if a > s0 {
            seg.inv_arclen(a - s0, ARCLEN_ACCURACY)
        } else {
            0.0
        };
        let t1 = if b < s1 {
            seg.inv_arclen(b - s0, ARCLEN_ACCURACY)
        } else {
            1.0
        };
        out.push(seg.subsegment(t0..t1));
    }
    BezPath::from_path_segments(out.into_iter())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/path.rs"]
mod tests;
