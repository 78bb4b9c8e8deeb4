use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point, Vec2};
use crate::foundation::error::BeatlineResult;
use crate::scene::element::{ElementId, ElementSpec, arrow, formula, line, rounded_rectangle, text};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind};
use crate::scenes::palette;

fn chain_box(stroke: Color, fill: Color, center: Point) -> ElementSpec {
    rounded_rectangle(4.0, 2.0, 0.15)
        .color(stroke)
        .fill(fill, 0.9)
        .stroke_width(2.5)
        .move_to(center)
}

fn link(from: Point, to: Point, color: Color, width: f64) -> ElementSpec {
    arrow(from, to)
        .color(color)
        .stroke_width(width)
        .buff(0.1)
        .tip_length(0.2)
}

fn pulse(id: ElementId, color: Color, scale: f64) -> Step {
    Step::new(StepKind::Indicate { scale, color }, id)
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let orange = Color::parse("#ff9800")?;
    let grey_b = Color::parse("GREY_B")?;
    let grey_d = Color::parse("GREY_D")?;
    let mut b = SceneBuilder::new("DPIChain").background(pal.background);

    let title = b.add(text("The Logical Chain", 38.0).bold())?;
    b.to_edge(title, Direction::Up, 0.4)?;
    let subtitle = b.add(text("How DPI implies Tsirelson's Bound", 22.0).color(grey_b))?;
    b.next_to(subtitle, title, Direction::Down, 0.15)?;
    b.play_with(vec![Step::write(title), Step::fade_in(subtitle)], 0.8)?;

    let dpi_c = Point::new(-4.5, 0.3);
    let ic_c = Point::new(0.0, 0.3);
    let ts_c = Point::new(4.5, 0.3);

    let dpi_box = b.add(chain_box(orange, Color::parse("#2e1a0a")?, dpi_c))?;
    let dpi_title = b.add(
        text("DPI", 28.0)
            .color(orange)
            .bold()
            .move_to(dpi_c + Vec2::new(0.0, 0.4)),
    )?;
    let dpi_eq = b.add(
        formula(r"H(A|B) \leq H(A|T(B))", 20.0)
            .color(grey_b)
            .move_to(dpi_c + Vec2::new(0.0, -0.2)),
    )?;
    let dpi_desc = b.add(
        text("+ COND + SHAN", 14.0)
            .color(grey_d)
            .move_to(dpi_c + Vec2::new(0.0, -0.55)),
    )?;

    let ic_box = b.add(chain_box(pal.quantum, Color::parse("#1a0a2e")?, ic_c))?;
    let ic_title = b.add(
        text("Information\nCausality", 24.0)
            .color(pal.quantum)
            .bold()
            .move_to(ic_c + Vec2::new(0.0, 0.3)),
    )?;
    let ic_eq = b.add(
        formula(r"I \leq m", 22.0)
            .color(grey_b)
            .move_to(ic_c + Vec2::new(0.0, -0.35)),
    )?;

    let ts_box = b.add(chain_box(pal.local, Color::parse("#0a1a2e")?, ts_c))?;
    let ts_title = b.add(
        text("Tsirelson's\nBound", 24.0)
            .color(pal.local)
            .bold()
            .move_to(ts_c + Vec2::new(0.0, 0.3)),
    )?;
    let ts_eq = b.add(
        formula(r"S \leq 2\sqrt{2}", 22.0)
            .color(grey_b)
            .move_to(ts_c + Vec2::new(0.0, -0.35)),
    )?;

    let half_w = Vec2::new(2.0, 0.0);
    let arrow1 = b.add(link(dpi_c + half_w, ic_c - half_w, Color::YELLOW, 4.0))?;
    let arrow1_lbl = b.add(formula(r"\Rightarrow", 36.0).color(Color::YELLOW))?;
    b.next_to(arrow1_lbl, arrow1, Direction::Up, 0.05)?;
    let arrow2 = b.add(link(ic_c + half_w, ts_c - half_w, Color::YELLOW, 4.0))?;
    let arrow2_lbl = b.add(formula(r"\Rightarrow", 36.0).color(Color::YELLOW))?;
    b.next_to(arrow2_lbl, arrow2, Direction::Up, 0.05)?;
    let cite_lbl = b.add(text("[Pawłowski et al.]", 12.0).color(grey_d))?;
    b.next_to(cite_lbl, arrow2, Direction::Down, 0.05)?;

    let pr_label = b.add(
        formula(r"\text{PR-Box } (S=4)", 26.0)
            .color(pal.no_signaling)
            .move_to(Point::new(0.0, -2.2)),
    )?;
    let pr = b.bounds(pr_label)?;
    let (left, right) = (pr.x0 - 0.2, pr.x1 + 0.2);
    let cy = pr.center().y;
    let cross1 = b.add(
        line(Point::new(left, cy - 0.15), Point::new(right, cy + 0.15))
            .color(pal.no_signaling)
            .stroke_width(4.0),
    )?;
    let cross2 = b.add(
        line(Point::new(left, cy + 0.15), Point::new(right, cy - 0.15))
            .color(pal.no_signaling)
            .stroke_width(4.0),
    )?;

    let pr_top = Point::new(pr.center().x, pr.y1);
    let box_bottom = Vec2::new(0.0, -1.0);
    let mut blocked = Vec::new();
    let mut marks = Vec::new();
    for (dx, target) in [(-2.0, dpi_c), (0.0, ic_c), (2.0, ts_c)] {
        let a = b.add(
            link(
                pr_top + Vec2::new(dx, 0.0),
                target + box_bottom,
                pal.no_signaling,
                2.0,
            )
            .stroke_opacity(0.5),
        )?;
        let mid = b.bounds(a)?.center();
        marks.push(b.add(formula(r"\times", 30.0).color(pal.no_signaling).move_to(mid))?);
        blocked.push(a);
    }
    let x_marks = b.named_group("x-marks", &marks)?;

    let insight_box = b.add(
        rounded_rectangle(11.0, 0.8, 0.1)
            .color(Color::YELLOW)
            .fill(Color::parse("#2e2a0a")?, 0.6)
            .stroke_width(2.0),
    )?;
    b.to_edge(insight_box, Direction::Down, 0.2)?;
    let insight_text = b.add(
        text(
            "The real constraint is information-theoretic, not just relativistic!",
            18.0,
        )
        .color(Color::YELLOW)
        .bold(),
    )?;
    let insight_center = b.bounds(insight_box)?.center();
    b.move_to(insight_text, insight_center)?;

    b.play_with(vec![Step::create(dpi_box), Step::write(dpi_title)], 0.8)?;
    b.play_with(vec![Step::write(dpi_eq), Step::fade_in(dpi_desc)], 0.7)?;
    b.wait(0.3)?;
    b.play_with(vec![Step::grow_arrow(arrow1), Step::fade_in(arrow1_lbl)], 0.8)?;

    b.play_with(vec![Step::create(ic_box), Step::write(ic_title)], 0.8)?;
    b.play_with(vec![Step::write(ic_eq)], 0.5)?;
    b.wait(0.3)?;
    b.play_with(
        vec![
            Step::grow_arrow(arrow2),
            Step::fade_in(arrow2_lbl),
            Step::fade_in(cite_lbl),
        ],
        0.8,
    )?;

    b.play_with(vec![Step::create(ts_box), Step::write(ts_title)], 0.8)?;
    b.play_with(vec![Step::write(ts_eq)], 0.5)?;

    b.play(vec![
        pulse(dpi_box, orange, 1.03),
        pulse(ic_box, pal.quantum, 1.03),
        pulse(ts_box, pal.local, 1.03),
    ])?;
    b.wait(0.3)?;

    b.play_with(vec![Step::write(pr_label)], 0.6)?;
    b.play_with(blocked.iter().map(|&a| Step::create(a)).collect(), 0.8)?;
    b.play_with(
        vec![
            Step::fade_in(x_marks),
            Step::create(cross1),
            Step::create(cross2),
        ],
        0.8,
    )?;
    b.wait(0.3)?;

    b.play(vec![Step::create(insight_box), Step::write(insight_text)])?;
    b.play_with(vec![pulse(insight_box, Color::YELLOW, 1.02)], 0.8)?;
    b.wait(2.0)?;

    b.build()
}
