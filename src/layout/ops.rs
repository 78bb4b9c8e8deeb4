use serde::{Deserialize, Serialize};

use crate::foundation::core::{Direction, Point, Rect, Vec2};

/// Cross-axis placement for stacks.
///
/// `Start` is the low-coordinate side (left for vertical stacks, bottom for horizontal ones).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossAlign {
    /// Low edges flush.
    Start,
    /// Centers aligned.
    #[default]
    Center,
    /// High edges flush.
    End,
}

fn cross_offset(anchor: Rect, content: Rect, horizontal_axis: bool, align: CrossAlign) -> f64 {
    let (a0, a1, c0, c1) = if horizontal_axis {
        (anchor.y0, anchor.y1, content.y0, content.y1)
    } else {
        (anchor.x0, anchor.x1, content.x0, content.x1)
    };
    match align {
        CrossAlign::Start => a0 - c0,
        CrossAlign::Center => (a0 + a1) * 0.5 - (c0 + c1) * 0.5,
        CrossAlign::End => a1 - c1,
    }
}

fn axis_vec(direction: Direction, along: f64, cross: f64) -> Vec2 {
    if direction.is_horizontal() {
        Vec2::new(along, cross)
    } else {
        Vec2::new(cross, along)
    }
}

/// Offsets that stack `boxes` along `direction`, `gap` apart, centered on the first box.
///
/// The first box stays where it is. Returns one offset per input box; an empty input yields an
/// empty list.
pub fn stack(boxes: &[Rect], direction: Direction, gap: f64) -> Vec<Vec2> {
    stack_aligned(boxes, direction, gap, CrossAlign::Center)
}

/// [`stack`] with an explicit cross-axis alignment against the first box.
pub fn stack_aligned(
    boxes: &[Rect],
    direction: Direction,
    gap: f64,
    align: CrossAlign,
) -> Vec<Vec2> {
    let Some(&first) = boxes.first() else {
        return Vec::new();
    };
    let mut offsets = Vec::with_capacity(boxes.len());
    offsets.push(Vec2::ZERO);
    let mut prev = first;
    for &b in &boxes[1..] {
        let d = align_offset(b, prev, direction, gap);
        let along = if direction.is_horizontal() { d.x } else { d.y };
        let cross = cross_offset(first, b, direction.is_horizontal(), align);
        let off = axis_vec(direction, along, cross);
        prev = b + off;
        offsets.push(off);
    }
    offsets
}

fn align_offset(element: Rect, reference: Rect, edge: Direction, buffer: f64) -> Vec2 {
    let target = edge.edge_of(reference) + buffer * sign(edge);
    let facing = edge.opposite().edge_of(element);
    axis_vec(edge, target - facing, 0.0)
}

fn sign(direction: Direction) -> f64 {
    match direction {
        Direction::Up | Direction::Right => 1.0,
        Direction::Down | Direction::Left => -1.0,
    }
}

/// Offset placing `element` on the `edge` side of `reference`, `buffer` away, cross axis centered.
///
/// A zero-extent reference acts as a point: the element's facing edge sits `buffer` from it.
pub fn align(element: Rect, reference: Rect, edge: Direction, buffer: f64) -> Vec2 {
    let along = align_offset(element, reference, edge, buffer);
    let cross = cross_offset(reference, element, edge.is_horizontal(), CrossAlign::Center);
    along + axis_vec(edge, 0.0, cross)
}

/// Offset making `element`'s `edge` flush with `reference`'s `edge` (other axis untouched).
pub fn align_to(element: Rect, reference: Rect, edge: Direction) -> Vec2 {
    axis_vec(edge, edge.edge_of(reference) - edge.edge_of(element), 0.0)
}

/// Offset pushing `element` against `frame`'s `edge`, `buffer` inside it.
pub fn to_edge(element: Rect, frame: Rect, edge: Direction, buffer: f64) -> Vec2 {
    let target = edge.edge_of(frame) - buffer * sign(edge);
    axis_vec(edge, target - edge.edge_of(element), 0.0)
}

/// Offset placing `element`'s center on `point`.
pub fn move_to(element: Rect, point: Point) -> Vec2 {
    point - element.center()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/ops.rs"]
mod tests;
