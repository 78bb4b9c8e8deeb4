use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Vec2};

/// Interpolation contract for animatable values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rect {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rect::new(
            <f64 as Lerp>::lerp(&a.x0, &b.x0, t),
            <f64 as Lerp>::lerp(&a.y0, &b.y0, t),
            <f64 as Lerp>::lerp(&a.x1, &b.x1, t),
            <f64 as Lerp>::lerp(&a.y1, &b.y1, t),
        )
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Color::rgba(
            <f64 as Lerp>::lerp(&a.r, &b.r, t),
            <f64 as Lerp>::lerp(&a.g, &b.g, t),
            <f64 as Lerp>::lerp(&a.b, &b.b, t),
            <f64 as Lerp>::lerp(&a.a, &b.a, t),
        )
    }
}

impl<T: Lerp + Clone> Lerp for Option<T> {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Some(a), Some(b)) => Some(T::lerp(a, b, t)),
            (Some(a), None) => Some(a.clone()),
            (None, b) => b.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
