use std::f64::consts::{SQRT_2, TAU};

use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point, RIGHT, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::layout::ops::CrossAlign;
use crate::scene::element::{arrow, dot, formula, line, polygon, square, text};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind};
use crate::scenes::palette;

// Data square [-0.3, 1.3]^2 drawn 6 units wide, centered half a unit left of the origin.
const UNITS_PER_DATA: f64 = 6.0 / 1.6;

fn c2p(x: f64, y: f64) -> Point {
    Point::new(-0.5 + (x - 0.5) * UNITS_PER_DATA, (y - 0.5) * UNITS_PER_DATA)
}

// Superellipse between the local square and the no-signaling square.
fn quantum_outline() -> Vec<Point> {
    const N: usize = 100;
    const R: f64 = 0.42;
    const EXP: f64 = 2.5;
    (0..N)
        .map(|i| {
            let th = TAU * (i as f64) / (N as f64);
            let (s, c) = th.sin_cos();
            let qx = 0.5 + R * c.signum() * c.abs().powf(2.0 / EXP);
            let qy = 0.5 + R * s.signum() * s.abs().powf(2.0 / EXP);
            c2p(qx, qy)
        })
        .collect()
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let grey_b = Color::parse("GREY_B")?;
    let grey_d = Color::parse("GREY_D")?;
    let mut b = SceneBuilder::new("CorrelationPolytope").background(pal.background);

    let x_axis = b.add(line(c2p(-0.3, 0.0), c2p(1.3, 0.0)).color(grey_d).stroke_width(1.0))?;
    let y_axis = b.add(line(c2p(0.0, -0.3), c2p(0.0, 1.3)).color(grey_d).stroke_width(1.0))?;
    let axes = b.named_group("axes", &[x_axis, y_axis])?;

    let x_label = b.add(formula(r"\langle A_0 B_0 \rangle", 28.0).color(grey_b))?;
    b.next_to(x_label, x_axis, Direction::Down, 0.3)?;
    let y_label = b.add(formula(r"\langle A_0 B_1 \rangle", 28.0).color(grey_b))?;
    b.next_to(y_label, y_axis, Direction::Left, 0.3)?;

    let ns_square = b.add(
        polygon([c2p(0.0, 0.0), c2p(1.0, 0.0), c2p(1.0, 1.0), c2p(0.0, 1.0)])
            .color(pal.no_signaling)
            .fill(pal.no_signaling, 0.08)
            .stroke_width(2.5),
    )?;
    let ns_label = b.add(formula(r"\mathcal{NS}", 34.0).color(pal.no_signaling))?;
    b.move_to(ns_label, c2p(0.92, 0.92))?;

    let r_local = 0.25 * SQRT_2;
    let local_square = b.add(
        polygon([
            c2p(0.5, 0.5 + r_local),
            c2p(0.5 + r_local, 0.5),
            c2p(0.5, 0.5 - r_local),
            c2p(0.5 - r_local, 0.5),
        ])
        .color(pal.local)
        .fill(pal.local, 0.15)
        .stroke_width(2.5),
    )?;
    let local_label = b.add(formula(r"\mathcal{L}", 34.0).color(pal.local))?;
    b.move_to(local_label, c2p(0.5, 0.5))?;

    let quantum_body = b.add(
        polygon(quantum_outline())
            .color(pal.quantum)
            .fill(pal.quantum, 0.12)
            .stroke_width(2.5),
    )?;
    let quantum_label = b.add(formula(r"\mathcal{Q}", 34.0).color(pal.quantum))?;
    b.move_to(quantum_label, c2p(0.72, 0.72))?;

    let pr_dot = b.add(dot(c2p(1.0, 1.0), 0.08).color(Color::YELLOW))?;
    let pr_label = b.add(formula(r"\text{PR}", 28.0).color(Color::YELLOW))?;
    b.next_to(pr_label, pr_dot, Direction::Right, 0.12)?;
    b.shift(pr_label, Vec2::new(0.0, 0.2))?;

    // Legend.
    let legend_title = b.add(text("Correlation Sets", 22.0).bold())?;
    b.to_edge(legend_title, Direction::Right, 0.5)?;
    b.shift(legend_title, Vec2::new(-0.3, 2.5))?;
    let mut rows = Vec::new();
    for (name, color) in [
        ("Local (L)", pal.local),
        ("Quantum (Q)", pal.quantum),
        ("No-Signaling (NS)", pal.no_signaling),
    ] {
        let swatch = b.add(square(0.2).color(color).fill_opacity(0.4))?;
        let label = b.add(text(name, 18.0).color(color))?;
        b.arrange(&[swatch, label], Direction::Right, 0.15)?;
        rows.push(b.group(&[swatch, label])?);
    }
    let pr_swatch = b.add(dot(Point::ORIGIN, 0.06).color(Color::YELLOW))?;
    let pr_text = b.add(text("PR-Box", 18.0).color(Color::YELLOW))?;
    b.arrange(&[pr_swatch, pr_text], Direction::Right, 0.15)?;
    rows.push(b.group(&[pr_swatch, pr_text])?);
    b.arrange_aligned(&rows, Direction::Down, 0.2, CrossAlign::Start)?;
    let legend = b.named_group("legend", &rows)?;
    b.next_to(legend, legend_title, Direction::Down, 0.3)?;
    b.align_to(legend, legend_title, Direction::Left)?;

    let s_local = b.add(formula(r"S \leq 3", 26.0).color(pal.local))?;
    let s_quantum = b.add(formula(r"S \leq 2+\sqrt{2}", 26.0).color(pal.quantum))?;
    let s_ns = b.add(formula(r"S \leq 4", 26.0).color(pal.no_signaling))?;
    let s_rows = [s_local, s_quantum, s_ns];
    b.arrange_aligned(&s_rows, Direction::Down, 0.15, CrossAlign::Start)?;
    let s_text = b.named_group("s-values", &s_rows)?;
    b.to_edge(s_text, Direction::Right, 0.5)?;
    b.shift(s_text, Vec2::new(-0.3, -1.0))?;

    let gap_arrow = b.add(
        arrow(c2p(0.85, 0.88), c2p(0.97, 0.97))
            .color(Color::YELLOW)
            .stroke_width(3.0)
            .buff(0.05)
            .tip_length(0.12),
    )?;
    let gap_label = b.add(text("The Gap", 20.0).color(Color::YELLOW).italic())?;
    b.next_to(gap_label, gap_arrow, Direction::Left, 0.1)?;
    b.shift(gap_label, Vec2::new(0.0, -0.15))?;

    b.play_with(
        vec![Step::create(axes), Step::write(x_label), Step::write(y_label)],
        1.2,
    )?;
    b.wait(0.3)?;

    b.play_with(
        vec![
            Step::draw_border_then_fill(local_square),
            Step::write(local_label),
        ],
        1.5,
    )?;
    b.wait(0.5)?;

    b.play_with(
        vec![
            Step::fade_in_scaled(quantum_body, 0.8),
            Step::write(quantum_label),
        ],
        2.0,
    )?;
    b.wait(0.5)?;

    b.play_with(
        vec![Step::draw_border_then_fill(ns_square), Step::write(ns_label)],
        1.5,
    )?;
    b.wait(0.5)?;

    b.play_with(
        vec![
            Step::fade_in_scaled(pr_dot, 2.0),
            Step::write(pr_label),
            Step::flash(pr_dot),
        ],
        1.2,
    )?;
    b.wait(0.5)?;

    b.play_with(
        vec![
            Step::fade_in_shift(legend_title, RIGHT * 0.3),
            Step::fade_in_shift(legend, RIGHT * 0.3),
            Step::fade_in_shift(s_text, RIGHT * 0.3),
        ],
        1.5,
    )?;

    b.play_with(vec![Step::grow_arrow(gap_arrow), Step::fade_in(gap_label)], 1.0)?;
    b.play_with(
        vec![Step::new(
            StepKind::Indicate {
                scale: 1.1,
                color: Color::YELLOW,
            },
            gap_arrow,
        )],
        1.0,
    )?;
    b.wait(2.0)?;

    b.build()
}
