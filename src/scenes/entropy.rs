use std::f64::consts::PI;

use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::layout::ops::CrossAlign;
use crate::scene::element::{
    ElementId, arrow, circle, formula, rectangle, rounded_rectangle, text,
};
use crate::scene::model::Scene;
use crate::scene::step::{Step, lagged};
use crate::scenes::palette;

const STATE_AT: Point = Point::new(-3.5, 0.0);

/// Outcome distributions of the three sample measurements, least uncertain first.
const OUTCOMES: [[f64; 3]; 3] = [[0.6, 0.3, 0.1], [0.35, 0.35, 0.3], [0.5, 0.4, 0.1]];
const SHANNON: [f64; 3] = [1.36, 1.58, 1.45];

/// Place `id` just beyond `point` along `dir`, touching it with the corner (or edge) facing back.
fn place_beyond(
    b: &mut SceneBuilder,
    id: ElementId,
    point: Point,
    dir: Vec2,
    buff: f64,
) -> BeatlineResult<()> {
    let bounds = b.bounds(id)?;
    let sign = |v: f64| if v.abs() < 1e-9 { 0.0 } else { v.signum() };
    let half = Vec2::new(
        sign(dir.x) * bounds.width() / 2.0,
        sign(dir.y) * bounds.height() / 2.0,
    );
    b.move_to(id, point + dir * buff + half)
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let grey_b = Color::parse("GREY_B")?;
    let cyan = Color::parse("#00ccff")?;
    let mint = Color::parse("#55ff99")?;
    let mut b = SceneBuilder::new("EntropyDef").background(pal.background);

    let title = b.add(text("Generalized Entropy", 36.0).bold())?;
    b.to_edge(title, Direction::Up, 0.4)?;
    b.play_with(vec![Step::write(title)], 0.7)?;

    let idea = b.add(
        text("Minimal uncertainty over all maximal measurements", 20.0).color(grey_b),
    )?;
    b.next_to(idea, title, Direction::Down, 0.2)?;
    b.play_with(vec![Step::fade_in(idea)], 0.5)?;

    let state = b.add(
        circle(1.0)
            .color(pal.quantum)
            .fill_opacity(0.15)
            .stroke_width(2.5)
            .move_to(STATE_AT),
    )?;
    let state_lbl = b.add(formula(r"\vec{P}", 36.0).color(pal.quantum).move_to(STATE_AT))?;
    let state_desc = b.add(text("State", 16.0).color(grey_b))?;
    b.next_to(state_desc, state, Direction::Down, 0.15)?;

    let mut measurements = Vec::new();
    for (i, deg) in [-30.0_f64, 0.0, 30.0].into_iter().enumerate() {
        let dir = Vec2::from_angle(deg * PI / 180.0);
        let start = STATE_AT + dir * 1.1;
        let end = start + dir * 2.0;
        let arr = b.add(arrow(start, end).color(grey_b).stroke_width(2.0))?;
        let lbl = b.add(formula(&format!("e_{}", i + 1), 18.0).color(grey_b))?;
        let side = if deg >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        b.next_to(lbl, arr, side, 0.05)?;

        let mut bars = Vec::new();
        for h in OUTCOMES[i] {
            bars.push(b.add(
                rectangle(0.2, h * 1.5)
                    .color(cyan)
                    .fill_opacity(0.5)
                    .stroke_width(1.0),
            )?);
        }
        b.arrange_aligned(&bars, Direction::Right, 0.05, CrossAlign::Start)?;
        let chart = b.named_group(format!("chart e{}", i + 1), &bars)?;
        place_beyond(&mut b, chart, end + dir * 0.3, dir, 0.1)?;

        let h_val = b.add(
            formula(&format!(r"H_{{\text{{Sh}}}} = {:.2}", SHANNON[i]), 16.0).color(cyan),
        )?;
        b.next_to(h_val, chart, Direction::Down, 0.1)?;
        measurements.push((arr, lbl, bars, h_val));
    }

    let min_at = b.bounds(measurements[0].3)?.inflate(0.08, 0.08);
    let min_highlight = b.add(
        rectangle(min_at.width(), min_at.height())
            .color(Color::YELLOW)
            .stroke_width(2.0)
            .move_to(min_at.center()),
    )?;
    let min_label = b.add(text("MIN", 14.0).color(Color::YELLOW).bold())?;
    b.next_to(min_label, min_highlight, Direction::Down, 0.05)?;

    let result_at = Point::new(0.0, -2.2);
    let result_box = b.add(
        rounded_rectangle(6.0, 1.8, 0.1)
            .color(pal.quantum)
            .fill(Color::parse("#1a0a2e")?, 0.9)
            .stroke_width(2.0)
            .move_to(result_at),
    )?;
    let result_eq = b.add(
        formula(
            r"H(\vec{P}) = \min_{e \in \mathcal{M}^*} H_{\text{Sh}}(e(\vec{P}))",
            26.0,
        )
        .move_to(result_at + Vec2::new(0.0, 0.2)),
    )?;
    let result_note = b.add(
        text("Minimized over all fine-grained measurements", 14.0)
            .color(grey_b)
            .move_to(result_at + Vec2::new(0.0, -0.35)),
    )?;

    let mut props = Vec::new();
    for (src, color) in [
        (r"\bullet\; \text{Classical} \to H_{\text{Sh}}", mint),
        (r"\bullet\; \text{Quantum} \to H_{\text{vN}}", mint),
        (r"\bullet\; 0 \leq H(\vec{P}) \leq \log\, d", grey_b),
        (r"\bullet\; \text{Concavity holds}", grey_b),
    ] {
        props.push(b.add(formula(src, 20.0).color(color))?);
    }
    b.arrange_aligned(&props, Direction::Down, 0.15, CrossAlign::Start)?;
    let prop_list = b.named_group("properties", &props)?;
    b.to_edge(prop_list, Direction::Right, 0.5)?;
    b.shift(prop_list, Vec2::new(0.0, 0.3))?;

    b.play_with(
        vec![
            Step::create(state),
            Step::write(state_lbl),
            Step::fade_in(state_desc),
        ],
        0.8,
    )?;
    for (arr, lbl, bars, h_val) in &measurements {
        b.play_with(vec![Step::grow_arrow(*arr), Step::write(*lbl)], 0.5)?;
        let bar_steps = bars.iter().map(|&bar| Step::fade_in(bar)).collect();
        b.play_with(lagged(bar_steps, 0.15)?, 0.5)?;
        b.play_with(vec![Step::write(*h_val)], 0.3)?;
    }
    b.wait(0.3)?;

    b.play_with(
        vec![Step::create(min_highlight), Step::fade_in(min_label)],
        0.6,
    )?;
    b.play_with(
        vec![
            Step::create(result_box),
            Step::write(result_eq),
            Step::fade_in(result_note),
        ],
        1.2,
    )?;
    let prop_steps = props.iter().map(|&p| Step::fade_in(p)).collect();
    b.play_with(lagged(prop_steps, 0.2)?, 1.0)?;
    b.wait(2.0)?;

    b.build()
}
