use std::f64::consts::{PI, SQRT_2};

use crate::animation::ease::Ease;
use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, LEFT, Point, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::layout::ops::CrossAlign;
use crate::scene::element::{ElementId, arc, dot, formula, line, text};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind};
use crate::scenes::palette;

const CENTER: Point = Point::new(0.0, -0.3);
const RADIUS: f64 = 3.2;
const START_ANGLE: f64 = 150.0 * PI / 180.0;
const END_ANGLE: f64 = 30.0 * PI / 180.0;
const SPAN: f64 = START_ANGLE - END_ANGLE;
const NEEDLE_LEN: f64 = RADIUS - 0.6;

/// Gauge angle of a CHSH score in `[0, 4]`.
fn s_to_angle(s: f64) -> f64 {
    START_ANGLE - s / 4.0 * SPAN
}

fn on_circle(radius: f64, angle: f64) -> Point {
    CENTER + Vec2::from_angle(angle) * radius
}

fn needle(b: &mut SceneBuilder, s: f64) -> BeatlineResult<ElementId> {
    b.add(line(CENTER, on_circle(NEEDLE_LEN, s_to_angle(s))).stroke_width(4.0))
}

fn readout(b: &mut SceneBuilder, src: &str, color: Color) -> BeatlineResult<ElementId> {
    let id = b.add(formula(src, 40.0).color(color))?;
    b.next_to_point(id, CENTER, Direction::Down, 0.8)?;
    Ok(id)
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let grey_b = Color::parse("GREY_B")?;
    let mut b = SceneBuilder::new("TsirelsonGauge").background(pal.background);
    let tsirelson = 2.0 * SQRT_2;

    let bg_arc = b.add(
        arc(CENTER, RADIUS, END_ANGLE, SPAN)
            .color(Color::parse("GREY_D")?)
            .stroke_width(14.0),
    )?;
    let zone = |from: f64, to: f64, color: Color, opacity: f64| {
        arc(CENTER, RADIUS, s_to_angle(from), s_to_angle(to) - s_to_angle(from))
            .color(color)
            .stroke_width(16.0)
            .stroke_opacity(opacity)
    };
    let classical_arc = b.add(zone(0.0, 2.0, pal.local, 0.6))?;
    let quantum_arc = b.add(zone(2.0, tsirelson, pal.quantum, 0.6))?;
    let forbidden_arc = b.add(zone(tsirelson, 4.0, pal.no_signaling, 0.3))?;

    let mut tick_parts = Vec::new();
    for (s, label, color) in [
        (0.0, "0", grey_b),
        (2.0, "2", pal.local),
        (tsirelson, r"2\sqrt{2}", pal.quantum),
        (4.0, "4", pal.no_signaling),
    ] {
        let a = s_to_angle(s);
        tick_parts.push(b.add(
            line(on_circle(RADIUS - 0.35, a), on_circle(RADIUS + 0.35, a))
                .color(color)
                .stroke_width(3.0),
        )?);
        tick_parts.push(b.add(
            formula(label, 26.0)
                .color(color)
                .move_to(on_circle(RADIUS + 0.75, a)),
        )?);
    }
    let ticks = b.named_group("ticks", &tick_parts)?;

    let classical_lbl = b.add(
        text("Classical", 20.0)
            .color(pal.local)
            .bold()
            .move_to(CENTER + Vec2::new(-1.8, 1.0)),
    )?;
    let quantum_lbl = b.add(
        text("Quantum", 20.0)
            .color(pal.quantum)
            .bold()
            .move_to(CENTER + Vec2::new(0.0, 2.0)),
    )?;
    let forbidden_lbl = b.add(
        text("Forbidden?", 20.0)
            .color(pal.no_signaling)
            .bold()
            .move_to(CENTER + Vec2::new(1.8, 1.0)),
    )?;

    let needle_dot = b.add(dot(CENTER, 0.12).z_index(5))?;
    let pointer = needle(&mut b, 0.0)?;
    let at_classical = needle(&mut b, 2.0)?;
    let at_tsirelson = needle(&mut b, tsirelson)?;
    let overshoot = needle(&mut b, 3.5)?;

    let s_display = readout(&mut b, "S = 0.00", Color::WHITE)?;
    let s_classical = readout(&mut b, "S = 2.00", pal.local)?;
    let s_tsirelson = readout(&mut b, r"S = 2\sqrt{2} \approx 2.83", pal.quantum)?;
    let s_overshoot = readout(&mut b, "S = 3.50", pal.no_signaling)?;

    let title = b.add(text("CHSH Score S", 36.0).bold())?;
    b.to_edge(title, Direction::Up, 0.4)?;

    let bound_rows = [
        b.add(formula(r"\text{Classical: } S \leq 2", 24.0).color(pal.local))?,
        b.add(formula(r"\text{Tsirelson: } S \leq 2\sqrt{2}", 24.0).color(pal.quantum))?,
        b.add(formula(r"\text{No-Signaling: } S \leq 4", 24.0).color(pal.no_signaling))?,
    ];
    b.arrange_aligned(&bound_rows, Direction::Down, 0.2, CrossAlign::Start)?;
    let bounds_text = b.named_group("bounds", &bound_rows)?;
    b.to_edge(bounds_text, Direction::Right, 0.5)?;
    b.shift(bounds_text, Vec2::new(0.0, -0.5))?;

    let tsirelson_def = b.add(
        formula(r"2 - \sqrt{2} \;\leq\; S \;\leq\; 2 + \sqrt{2}", 28.0).color(pal.quantum),
    )?;
    b.to_edge(tsirelson_def, Direction::Down, 0.4)?;

    b.play_with(vec![Step::write(title)], 0.7)?;
    b.play_with(vec![Step::create(bg_arc)], 0.8)?;
    b.play(vec![Step::create(classical_arc), Step::fade_in(classical_lbl)])?;
    b.play(vec![Step::create(quantum_arc), Step::fade_in(quantum_lbl)])?;
    b.play(vec![Step::create(forbidden_arc), Step::fade_in(forbidden_lbl)])?;
    b.play_with(vec![Step::fade_in(ticks)], 0.8)?;

    b.play_with(vec![Step::create(pointer), Step::fade_in(needle_dot)], 0.5)?;
    b.play_with(vec![Step::fade_in(s_display)], 0.4)?;

    b.play_with(
        vec![
            Step::transform(pointer, at_classical),
            Step::transform(s_display, s_classical),
        ],
        1.5,
    )?;
    b.play_with(
        vec![Step::new(StepKind::Flash { color: pal.local }, needle_dot)],
        0.5,
    )?;
    b.wait(0.3)?;

    b.play_with(
        vec![
            Step::transform(pointer, at_tsirelson),
            Step::transform(s_display, s_tsirelson),
        ],
        1.5,
    )?;
    b.play_with(
        vec![Step::new(StepKind::Flash { color: pal.quantum }, needle_dot)],
        0.5,
    )?;

    b.play(vec![Step::write(tsirelson_def)])?;
    b.wait(0.3)?;

    // Push into the forbidden zone, then bounce back.
    b.play_with(
        vec![
            Step::transform(pointer, overshoot).ease(Ease::RushInto),
            Step::transform(s_display, s_overshoot).ease(Ease::RushInto),
        ],
        0.8,
    )?;
    b.play_with(
        vec![
            Step::transform(pointer, at_tsirelson).ease(Ease::RushFrom),
            Step::transform(s_display, s_tsirelson).ease(Ease::RushFrom),
        ],
        0.6,
    )?;
    b.play_with(
        vec![Step::new(
            StepKind::Wiggle {
                angle: 0.03,
                scale: 1.05,
            },
            pointer,
        )],
        0.6,
    )?;

    b.play(vec![Step::fade_in_shift(bounds_text, LEFT * 0.3)])?;
    b.wait(2.0)?;

    b.build()
}
