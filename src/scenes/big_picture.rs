use std::f64::consts::PI;

use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, ORIGIN, Point, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::scene::element::{circle, dot, line, rounded_rectangle, text};
use crate::scene::model::Scene;
use crate::scene::step::Step;
use crate::scenes::palette;

const PR_RADIUS: f64 = 3.0;
const CROSS_HALF: f64 = 0.2;

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let grey_b = Color::parse("GREY_B")?;
    let pr_red = Color::parse("#ff5555")?;
    let mut b = SceneBuilder::new("BigPicture").background(pal.background);

    let title = b.add(text("The Big Picture", 38.0).bold())?;
    b.to_edge(title, Direction::Up, 0.4)?;
    b.play_with(vec![Step::write(title)], 0.7)?;

    // Outermost first, so inner sets paint on top.
    let mut rings = Vec::new();
    for (radius, color, name) in [
        (3.5, pal.no_signaling, "No-Signaling"),
        (2.5, pal.quantum, "Quantum"),
        (1.5, pal.local, "Classical"),
    ] {
        let ring = b.add(
            circle(radius)
                .color(color)
                .fill_opacity(0.15)
                .stroke_width(2.5)
                .move_to(ORIGIN),
        )?;
        let label = b.add(
            text(name, 18.0)
                .color(color)
                .bold()
                .move_to(ORIGIN + Vec2::new(0.0, radius - 0.25)),
        )?;
        rings.push((ring, label));
    }

    let rule = |from: f64, y: f64, color: Color| {
        line(Point::new(from, y), Point::new(4.5, y))
            .color(color)
            .stroke_width(1.5)
    };
    let mut annotations = Vec::new();

    let bell = [
        b.add(rule(1.5, -0.3, pal.local))?,
        b.add(
            text("Bell inequalities", 14.0)
                .color(pal.local)
                .move_to(Point::new(5.5, -0.3)),
        )?,
    ];
    annotations.push(b.named_group("classical boundary", &bell)?);

    let chain = [
        b.add(text("DPI → IC → Tsirelson", 14.0).color(pal.quantum))?,
        b.add(text("(This paper!)", 12.0).color(Color::YELLOW))?,
    ];
    b.arrange(&chain, Direction::Down, 0.05)?;
    let chain = b.group(&chain)?;
    b.move_to(chain, Point::new(5.8, -0.9))?;
    let quantum_rule = b.add(rule(2.5, -0.8, pal.quantum))?;
    annotations.push(b.named_group("quantum boundary", &[quantum_rule, chain])?);

    let relativity = [
        b.add(rule(3.5, -1.3, pal.no_signaling))?,
        b.add(
            text("Relativity (no-signaling)", 14.0)
                .color(pal.no_signaling)
                .move_to(Point::new(5.9, -1.3)),
        )?,
    ];
    annotations.push(b.named_group("no-signaling boundary", &relativity)?);

    let pr_at = ORIGIN + Vec2::from_angle(-30.0 * PI / 180.0) * PR_RADIUS;
    let pr_dot = b.add(dot(pr_at, 0.12).color(pr_red).z_index(5))?;
    let pr_label = b.add(text("PR-Box", 14.0).color(pr_red))?;
    let dot_box = b.bounds(pr_dot)?;
    let label_box = b.bounds(pr_label)?;
    b.move_to(
        pr_label,
        Point::new(
            dot_box.x1 + 0.1 + label_box.width() / 2.0,
            dot_box.y0 - 0.1 - label_box.height() / 2.0,
        ),
    )?;
    let cross_line = |dx: f64| {
        line(
            pr_at + Vec2::new(-dx, CROSS_HALF),
            pr_at + Vec2::new(dx, -CROSS_HALF),
        )
        .color(pr_red)
        .stroke_width(3.0)
        .z_index(6)
    };
    let strokes = [
        b.add(cross_line(CROSS_HALF))?,
        b.add(cross_line(-CROSS_HALF))?,
    ];
    let pr_cross = b.named_group("pr cross", &strokes)?;

    let oq_box = b.add(
        rounded_rectangle(10.5, 1.4, 0.1)
            .color(Color::parse("GREY_D")?)
            .fill(Color::parse("#12122a")?, 0.9)
            .stroke_width(1.5),
    )?;
    b.to_edge(oq_box, Direction::Down, 0.3)?;
    let oq_center = b.bounds(oq_box)?.center();
    let oq_title = b.add(
        text("Open Questions", 18.0)
            .color(Color::YELLOW)
            .bold()
            .move_to(oq_center + Vec2::new(0.0, 0.3)),
    )?;
    // Stacked rather than side by side; the second question alone spans most of the frame.
    let questions = [
        b.add(
            text("Can DPI + additional axioms fully derive quantum theory?", 14.0)
                .color(grey_b),
        )?,
        b.add(
            text(
                "Are there non-quantum theories between Classical & Tsirelson that satisfy DPI?",
                14.0,
            )
            .color(grey_b),
        )?,
    ];
    b.arrange(&questions, Direction::Down, 0.05)?;
    let oq_items = b.named_group("open questions", &questions)?;
    b.move_to(oq_items, oq_center + Vec2::new(0.0, -0.2))?;

    for &(ring, label) in &rings {
        b.play_with(vec![Step::create(ring), Step::write(label)], 0.6)?;
    }
    b.wait(0.3)?;
    for &ann in &annotations {
        b.play_with(vec![Step::fade_in(ann)], 0.6)?;
    }

    b.play_with(vec![Step::fade_in(pr_dot), Step::write(pr_label)], 0.5)?;
    b.play_with(vec![Step::create(pr_cross)], 0.5)?;
    b.wait(0.3)?;

    b.play_with(vec![Step::create(oq_box), Step::write(oq_title)], 0.7)?;
    b.play_with(vec![Step::fade_in(oq_items)], 0.8)?;
    b.wait(2.0)?;

    b.build()
}
