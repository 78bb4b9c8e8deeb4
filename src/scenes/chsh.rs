use std::f64::consts::SQRT_2;

use crate::composition::dsl::{MED_LARGE_BUFF, SceneBuilder};
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point};
use crate::foundation::error::BeatlineResult;
use crate::scene::element::{dashed_line, formula, line, rectangle, text};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind};
use crate::scenes::palette;

const BAR_WIDTH: f64 = 1.2;
const SPACING: f64 = 2.0;
const MAX_HEIGHT: f64 = 4.0;
const BASE_Y: f64 = -1.5;

fn bar_height(s: f64) -> f64 {
    s / 4.0 * MAX_HEIGHT
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let mut b = SceneBuilder::new("CHSHBars").background(pal.background);

    let title = b.add(text("CHSH Score Comparison", 36.0).bold())?;
    b.to_edge(title, Direction::Up, MED_LARGE_BUFF)?;
    b.play_with(vec![Step::write(title)], 0.8)?;

    let data = [
        ("Classical\n(Local)", 3.0, pal.local, "S=3"),
        (
            "Quantum\n(Tsirelson)",
            2.0 + SQRT_2,
            pal.quantum,
            r"S=2+\sqrt{2}\approx 3.41",
        ),
        ("PR-Box\n(No-Signal.)", 4.0, pal.no_signaling, "S=4"),
    ];

    let mut bars = Vec::new();
    let mut labels = Vec::new();
    let mut values = Vec::new();
    for (i, (label, s, color, value)) in data.into_iter().enumerate() {
        let x = (i as f64 - 1.0) * SPACING;
        let h = bar_height(s);
        let bar = b.add(
            rectangle(BAR_WIDTH, h)
                .color(color)
                .fill(color, 0.6)
                .stroke_width(2.0)
                .move_to(Point::new(x, BASE_Y + h / 2.0)),
        )?;
        let lbl = b.add(text(label, 18.0).color(color))?;
        b.next_to(lbl, bar, Direction::Down, 0.2)?;
        let val = b.add(formula(value, 22.0))?;
        b.next_to(val, bar, Direction::Up, 0.15)?;
        bars.push(bar);
        labels.push(lbl);
        values.push(val);
    }

    let baseline = b.add(
        line(Point::new(-3.0, BASE_Y), Point::new(3.0, BASE_Y))
            .color(Color::parse("GREY")?)
            .stroke_width(1.0),
    )?;

    let ts_y = BASE_Y + bar_height(2.0 + SQRT_2);
    let ts_line = b.add(
        dashed_line(Point::new(-3.5, ts_y), Point::new(3.5, ts_y), 0.15)
            .color(Color::YELLOW)
            .stroke_width(2.0),
    )?;
    let ts_label = b.add(text("Tsirelson's Bound", 18.0).color(Color::YELLOW))?;
    b.next_to(ts_label, ts_line, Direction::Right, 0.15)?;

    b.play_with(vec![Step::create(baseline)], 0.5)?;
    for i in 0..bars.len() {
        b.play_with(
            vec![
                Step::grow_from_edge(bars[i], Direction::Down),
                Step::write(labels[i]),
            ],
            0.8,
        )?;
        b.play_with(vec![Step::write(values[i])], 0.5)?;
    }
    b.wait(0.3)?;

    b.play(vec![Step::create(ts_line), Step::write(ts_label)])?;
    b.play_with(
        vec![Step::new(
            StepKind::Indicate {
                scale: 1.02,
                color: Color::YELLOW,
            },
            ts_line,
        )],
        0.8,
    )?;

    let q_mark = b.add(text("?", 60.0).color(Color::YELLOW).bold())?;
    b.next_to(q_mark, bars[2], Direction::Up, 0.6)?;
    b.play_with(vec![Step::fade_in_scaled(q_mark, 2.0)], 0.8)?;
    b.play_with(
        vec![Step::new(
            StepKind::Indicate {
                scale: 1.2,
                color: Color::YELLOW,
            },
            q_mark,
        )],
        0.8,
    )?;
    b.wait(2.0)?;

    b.build()
}
