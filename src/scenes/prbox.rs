use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point, RIGHT, UP, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::layout::ops::CrossAlign;
use crate::scene::element::{arrow, formula, rounded_rectangle, text};
use crate::scene::model::Scene;
use crate::scene::step::Step;
use crate::scenes::palette;

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let teal = Color::parse("TEAL")?;
    let teal_b = Color::parse("TEAL_B")?;
    let orange = Color::parse("ORANGE")?;
    let green = Color::parse("GREEN")?;
    let mut b = SceneBuilder::new("PRBoxScene").background(pal.background);

    let title = b.add(text("The PR-Box", 40.0).color(Color::YELLOW).bold())?;
    b.to_edge(title, Direction::Up, 0.5)?;
    b.play_with(vec![Step::write(title)], 0.8)?;

    let center = Point::new(-2.5, 0.0);
    let pr_box = b.add(
        rounded_rectangle(3.5, 2.5, 0.2)
            .color(pal.quantum)
            .fill(Color::parse("#1a0a2e")?, 0.9)
            .stroke_width(3.0)
            .move_to(center),
    )?;
    let box_label = b.add(text("PR", 36.0).color(pal.quantum).bold().move_to(center))?;

    let top = center.y + 1.25;
    let bottom = center.y - 1.25;
    let port = |dx: f64, from: f64, to: f64, color: Color| {
        arrow(Point::new(center.x + dx, from), Point::new(center.x + dx, to))
            .color(color)
            .stroke_width(3.0)
    };

    let input_x = b.add(port(-0.8, top + 1.0, top, teal))?;
    let input_y = b.add(port(0.8, top + 1.0, top, teal))?;
    let x_label = b.add(formula("x", 32.0).color(teal))?;
    b.next_to(x_label, input_x, Direction::Up, 0.1)?;
    let y_label = b.add(formula("y", 32.0).color(teal))?;
    b.next_to(y_label, input_y, Direction::Up, 0.1)?;
    let alice = b.add(text("Alice", 20.0).color(teal_b))?;
    b.next_to(alice, x_label, Direction::Left, 0.3)?;
    let bob = b.add(text("Bob", 20.0).color(teal_b))?;
    b.next_to(bob, y_label, Direction::Right, 0.3)?;

    let output_a = b.add(port(-0.8, bottom, bottom - 1.0, orange))?;
    let output_b = b.add(port(0.8, bottom, bottom - 1.0, orange))?;
    let a_label = b.add(formula("a", 32.0).color(orange))?;
    b.next_to(a_label, output_a, Direction::Down, 0.1)?;
    let b_label = b.add(formula("b", 32.0).color(orange))?;
    b.next_to(b_label, output_b, Direction::Down, 0.1)?;

    let table_title = b.add(
        text("Defining Property", 24.0)
            .bold()
            .shift(Vec2::new(3.0, 1.5)),
    )?;
    let mut correlations = Vec::new();
    for (src, color) in [
        (r"p(a = b \mid 00) = 1", green),
        (r"p(a = b \mid 01) = 1", green),
        (r"p(a = b \mid 10) = 1", green),
        (r"p(a \neq b \mid 11) = 1", Color::parse("#ff6666")?),
    ] {
        correlations.push(b.add(formula(src, 26.0).color(color))?);
    }
    b.arrange_aligned(&correlations, Direction::Down, 0.25, CrossAlign::Start)?;
    let table = b.named_group("correlations", &correlations)?;
    b.shift(table, Vec2::new(3.0, 0.2))?;

    let chsh_line = b.add(
        formula(r"\Rightarrow \; S = 4", 32.0)
            .color(Color::YELLOW)
            .shift(Vec2::new(3.0, -1.2)),
    )?;

    let ns_ok = b.add(text("✓  No-Signaling", 22.0).color(green))?;
    let ts_bad = b.add(text("✗  Violates Tsirelson", 22.0).color(pal.no_signaling))?;
    b.arrange_aligned(&[ns_ok, ts_bad], Direction::Down, 0.15, CrossAlign::Start)?;
    let checks = b.named_group("checks", &[ns_ok, ts_bad])?;
    b.shift(checks, Vec2::new(3.0, -2.2))?;

    b.play(vec![Step::create(pr_box), Step::write(box_label)])?;
    b.play(vec![
        Step::grow_arrow(input_x),
        Step::grow_arrow(input_y),
        Step::write(x_label),
        Step::write(y_label),
        Step::fade_in(alice),
        Step::fade_in(bob),
    ])?;
    b.play(vec![
        Step::grow_arrow(output_a),
        Step::grow_arrow(output_b),
        Step::write(a_label),
        Step::write(b_label),
    ])?;
    b.wait(0.5)?;

    b.play_with(vec![Step::write(table_title)], 0.6)?;
    for &row in &correlations {
        b.play_with(vec![Step::fade_in_shift(row, RIGHT * 0.3)], 0.5)?;
    }
    b.wait(0.3)?;

    b.play_with(vec![Step::write(chsh_line)], 0.8)?;
    b.play(vec![Step::circumscribe(chsh_line)])?;
    b.play_with(vec![Step::fade_in_shift(checks, UP * 0.2)], 0.8)?;
    b.wait(2.0)?;

    b.build()
}
