use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, LEFT, Point, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::scene::element::{
    ElementId, ElementSpec, arrow, dashed_line, formula, rounded_rectangle, square, text,
};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind, lagged};
use crate::scenes::palette;

const N_BITS: usize = 4;
const ALICE_AT: Point = Point::new(-4.5, -0.3);
const BOB_AT: Point = Point::new(4.0, -0.3);

fn party_box(stroke: Color, fill: Color, center: Point) -> ElementSpec {
    rounded_rectangle(3.0, 4.0, 0.15)
        .color(stroke)
        .fill(fill, 0.9)
        .stroke_width(2.5)
        .move_to(center)
}

/// `label  relation  verdict` laid out as one row.
fn verdict_row(
    b: &mut SceneBuilder,
    who: &str,
    who_color: Color,
    relation: &str,
    verdict: &str,
    color: Color,
) -> BeatlineResult<ElementId> {
    let parts = [
        b.add(text(who, 18.0).color(who_color).bold())?,
        b.add(formula(relation, 22.0).color(color))?,
        b.add(text(verdict, 16.0).color(color).bold())?,
    ];
    b.arrange(&parts, Direction::Right, 0.2)?;
    b.named_group(who, &parts)
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let teal = Color::parse("TEAL")?;
    let orange = Color::parse("ORANGE")?;
    let green = Color::parse("GREEN")?;
    let grey_b = Color::parse("GREY_B")?;
    let mut b = SceneBuilder::new("ICGame").background(pal.background);

    let title = b.add(text("Information Causality", 38.0).bold())?;
    b.to_edge(title, Direction::Up, 0.4)?;
    b.play_with(vec![Step::write(title)], 0.7)?;

    let alice_box = b.add(party_box(teal, Color::parse("#0a2a2a")?, ALICE_AT))?;
    let alice_lbl = b.add(text("Alice", 24.0).color(teal).bold())?;
    b.next_to(alice_lbl, alice_box, Direction::Up, 0.15)?;

    let mut bits = Vec::new();
    for i in 0..N_BITS {
        let cell = b.add(square(0.5).color(teal).fill_opacity(0.25).stroke_width(2.0))?;
        let name = b.add(formula(&format!("a_{i}"), 20.0))?;
        let at = b.bounds(cell)?.center();
        b.move_to(name, at)?;
        bits.push(b.group(&[cell, name])?);
    }
    b.arrange(&bits, Direction::Right, 0.15)?;
    let bit_group = b.named_group("bits", &bits)?;
    b.move_to(bit_group, ALICE_AT + Vec2::new(0.0, 0.8))?;
    let bits_label = b.add(
        formula(r"\vec{a} = (a_0, \ldots, a_{N-1})", 22.0)
            .color(teal)
            .move_to(ALICE_AT + Vec2::new(0.0, -0.1)),
    )?;
    let alice_note = b.add(
        text("N random bits", 16.0)
            .color(grey_b)
            .move_to(ALICE_AT + Vec2::new(0.0, -0.7)),
    )?;

    let channel = b.add(
        arrow(Point::new(-2.7, -0.3), Point::new(-0.2, -0.3))
            .color(orange)
            .stroke_width(4.0),
    )?;
    let ch_label = b.add(formula(r"\vec{x}", 30.0).color(orange))?;
    b.next_to(ch_label, channel, Direction::Up, 0.15)?;
    let ch_desc = b.add(text("m classical bits", 16.0).color(orange))?;
    b.next_to(ch_desc, channel, Direction::Down, 0.15)?;

    let bob_box = b.add(party_box(pal.local, Color::parse("#0a1a2e")?, BOB_AT))?;
    let bob_lbl = b.add(text("Bob", 24.0).color(pal.local).bold())?;
    b.next_to(bob_lbl, bob_box, Direction::Up, 0.15)?;
    let b_input = b.add(
        formula(r"b \in \{0,\ldots,N-1\}", 20.0).move_to(BOB_AT + Vec2::new(0.0, 0.8)),
    )?;
    let b_desc = b.add(text("random index", 16.0).color(grey_b))?;
    b.next_to(b_desc, b_input, Direction::Down, 0.15)?;
    let beta_out = b.add(
        formula(r"\beta = \text{guess of } a_b", 20.0)
            .color(Color::YELLOW)
            .move_to(BOB_AT + Vec2::new(0.0, -0.5)),
    )?;

    let resource_line = b.add(
        dashed_line(Point::new(-4.5, -2.8), Point::new(4.0, -2.8), 0.15)
            .color(pal.quantum)
            .stroke_width(2.0),
    )?;
    let resource_lbl = b.add(text("Shared No-Signaling Resource", 16.0).color(pal.quantum))?;
    b.next_to(resource_lbl, resource_line, Direction::Down, 0.1)?;

    let perf_box = b.add(
        rounded_rectangle(10.0, 1.2, 0.1)
            .color(pal.quantum)
            .fill(Color::parse("#1a0a2e")?, 0.8)
            .stroke_width(2.0),
    )?;
    b.to_edge(perf_box, Direction::Down, 0.3)?;
    let perf_center = b.bounds(perf_box)?.center();
    let perf_eq = b.add(
        formula(r"I = \sum_{i=0}^{N-1} I_{\text{Sh}}(a_i : \beta \mid b=i)", 26.0)
            .move_to(perf_center + Vec2::new(-1.5, 0.0)),
    )?;
    let perf_rule = b.add(formula(r"\leq m", 30.0).color(green))?;
    b.next_to(perf_rule, perf_eq, Direction::Right, 0.3)?;
    let performance = b.named_group("performance", &[perf_eq, perf_rule])?;

    b.play_with(vec![Step::create(alice_box), Step::write(alice_lbl)], 0.7)?;
    let bit_steps = bits.iter().map(|&bit| Step::fade_in(bit)).collect();
    b.play_with(lagged(bit_steps, 0.1)?, 0.8)?;
    b.play_with(vec![Step::write(bits_label), Step::fade_in(alice_note)], 0.7)?;

    b.play_with(
        vec![
            Step::grow_arrow(channel),
            Step::write(ch_label),
            Step::fade_in(ch_desc),
        ],
        0.8,
    )?;

    b.play_with(vec![Step::create(bob_box), Step::write(bob_lbl)], 0.7)?;
    b.play_with(
        vec![
            Step::write(b_input),
            Step::fade_in(b_desc),
            Step::write(beta_out),
        ],
        0.8,
    )?;

    b.play_with(
        vec![Step::create(resource_line), Step::fade_in(resource_lbl)],
        0.8,
    )?;
    b.wait(0.3)?;

    b.play_with(vec![Step::create(perf_box), Step::write(perf_eq)], 1.0)?;
    b.play_with(vec![Step::write(perf_rule)], 0.6)?;
    b.play_with(
        vec![Step::new(StepKind::Circumscribe { color: green }, performance)],
        0.8,
    )?;
    b.wait(0.3)?;

    let verdict_qm = verdict_row(&mut b, "Quantum:", pal.quantum, r"I \leq m", "PASS", green)?;
    b.move_to(verdict_qm, Point::new(4.0, -1.5))?;
    let verdict_pr = verdict_row(
        &mut b,
        "PR-Box:",
        pal.no_signaling,
        "I > m",
        "FAIL",
        pal.no_signaling,
    )?;
    b.next_to(verdict_pr, verdict_qm, Direction::Down, 0.25)?;

    b.play_with(vec![Step::fade_in_shift(verdict_qm, LEFT * 0.3)], 0.8)?;
    b.play_with(vec![Step::fade_in_shift(verdict_pr, LEFT * 0.3)], 0.8)?;
    b.play_with(
        vec![Step::new(
            StepKind::Indicate {
                scale: 1.05,
                color: pal.no_signaling,
            },
            verdict_pr,
        )],
        0.8,
    )?;
    b.wait(2.0)?;

    b.build()
}
