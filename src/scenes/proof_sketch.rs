use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point};
use crate::foundation::error::BeatlineResult;
use crate::scene::element::{ElementId, formula, line, rounded_rectangle, text};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind, lagged};
use crate::scenes::palette;

/// Which lemmas each axiom feeds, by lemma index.
const FEEDS: [&[usize]; 3] = [&[0, 1, 2, 3], &[1, 2, 3], &[0, 1, 2, 3]];

/// Stack `parts` vertically and center the stack on `on`.
fn caption(
    b: &mut SceneBuilder,
    parts: &[ElementId],
    gap: f64,
    on: ElementId,
) -> BeatlineResult<ElementId> {
    b.arrange(parts, Direction::Down, gap)?;
    let group = b.group(parts)?;
    let at = b.bounds(on)?.center();
    b.move_to(group, at)?;
    Ok(group)
}

fn bottom(b: &SceneBuilder, id: ElementId) -> BeatlineResult<Point> {
    let r = b.bounds(id)?;
    Ok(Point::new(r.center().x, r.y0))
}

fn top(b: &SceneBuilder, id: ElementId) -> BeatlineResult<Point> {
    let r = b.bounds(id)?;
    Ok(Point::new(r.center().x, r.y1))
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let grey_b = Color::parse("GREY_B")?;
    let grey_d = Color::parse("GREY_D")?;
    let mut b = SceneBuilder::new("ProofSketch").background(pal.background);

    let title = b.add(text("Proof Architecture", 38.0).bold())?;
    b.to_edge(title, Direction::Up, 0.4)?;
    b.play_with(vec![Step::write(title)], 0.7)?;

    let mut axioms = Vec::new();
    for (name, src, stroke, fill) in [
        ("COND", r"H(A|B)=H(AB){-}H(B)", pal.quantum, "#1a0a2e"),
        ("SHAN", r"H_{\text{class}}=H_{\text{Sh}}", Color::parse("#ffdd44")?, "#2e2a0a"),
        ("DPI", r"H(A|B)\leq H(A|T(B))", Color::parse("#ff5555")?, "#2e0a0a"),
    ] {
        let frame = b.add(
            rounded_rectangle(2.8, 1.0, 0.12)
                .color(stroke)
                .fill(Color::parse(fill)?, 0.8)
                .stroke_width(2.5),
        )?;
        axioms.push((frame, name, src, stroke));
    }
    let frames: Vec<_> = axioms.iter().map(|a| a.0).collect();
    b.arrange(&frames, Direction::Right, 0.8)?;
    let axiom_row = b.named_group("axioms", &frames)?;
    b.move_to(axiom_row, Point::new(0.0, 3.0))?;

    let mut axiom_captions = Vec::new();
    for &(frame, name, src, stroke) in &axioms {
        let parts = [
            b.add(text(name, 20.0).color(stroke).bold())?,
            b.add(formula(src, 16.0).color(grey_b))?,
        ];
        axiom_captions.push(caption(&mut b, &parts, 0.1, frame)?);
    }

    let mut lemma_boxes = Vec::new();
    let mut lemma_captions = Vec::new();
    let mut lemma_units = Vec::new();
    for (name, src, color, desc) in [
        (
            "Lemma 3",
            r"\sum_i H(A_i|\gamma)\geq H(A_1\ldots A_n|\gamma)",
            pal.local,
            "Subadditivity",
        ),
        (
            "Lemma 4",
            r"H(A|B)=H(A)\text{ (product)}",
            Color::parse("#55ff99")?,
            "Product States",
        ),
        (
            "Lemma 5",
            r"H(X|Y)\geq 0\text{ (class.)}",
            Color::parse("#ff9800")?,
            "Positivity",
        ),
        ("Lemma 6", r"H(\vec{a}|B\vec{x})\geq n-m", pal.quantum, "IC Bound"),
    ] {
        let frame = b.add(
            rounded_rectangle(3.0, 1.3, 0.12)
                .color(color)
                .fill(pal.background, 0.7)
                .stroke_width(2.0),
        )?;
        let parts = [
            b.add(text(name, 18.0).color(color).bold())?,
            b.add(formula(src, 14.0).color(grey_b))?,
            b.add(text(desc, 12.0).color(grey_d))?,
        ];
        let cap = caption(&mut b, &parts, 0.08, frame)?;
        lemma_units.push(b.named_group(name, &[frame, cap])?);
        lemma_boxes.push(frame);
        lemma_captions.push(cap);
    }
    b.arrange(&lemma_units, Direction::Right, 0.3)?;
    let lemma_row = b.named_group("lemmas", &lemma_units)?;
    b.move_to(lemma_row, Point::new(0.0, 0.5))?;

    let theorem_box = b.add(
        rounded_rectangle(8.0, 1.6, 0.15)
            .color(Color::YELLOW)
            .fill(Color::parse("#2e2a0a")?, 0.9)
            .stroke_width(3.0)
            .move_to(Point::new(0.0, -2.0)),
    )?;
    let theorem_parts = [
        b.add(text("Theorem 2", 24.0).color(Color::YELLOW).bold())?,
        b.add(formula(
            r"\text{COND + SHAN + DPI} \;\Rightarrow\; \text{Tsirelson's Bound}",
            20.0,
        ))?,
    ];
    let theorem_text = caption(&mut b, &theorem_parts, 0.15, theorem_box)?;

    let mut axiom_lines = Vec::new();
    for (&(frame, ..), feeds) in axioms.iter().zip(FEEDS) {
        for &t in feeds {
            let from = bottom(&b, frame)?;
            let to = top(&b, lemma_boxes[t])?;
            axiom_lines.push(b.add(line(from, to).color(grey_d).stroke_width(1.5).buff(0.1))?);
        }
    }
    let mut lemma_lines = Vec::new();
    for &lemma in &lemma_boxes {
        let from = bottom(&b, lemma)?;
        let to = top(&b, theorem_box)?;
        lemma_lines.push(b.add(
            line(from, to)
                .color(Color::YELLOW)
                .stroke_width(2.0)
                .stroke_opacity(0.7)
                .buff(0.1),
        )?);
    }

    // Each axiom's frame and caption enter together, staggered by 0.3 of a step.
    let mut axiom_steps = Vec::new();
    for (i, (&(frame, ..), &cap)) in axioms.iter().zip(&axiom_captions).enumerate() {
        let delay = i as f64 * 0.3;
        axiom_steps.push(Step::create(frame).delay(delay));
        axiom_steps.push(Step::fade_in(cap).delay(delay));
    }
    b.play_with(axiom_steps, 1.5)?;
    b.wait(0.3)?;

    let line_steps = axiom_lines.iter().map(|&l| Step::create(l)).collect();
    b.play_with(lagged(line_steps, 0.05)?, 1.0)?;

    for (&frame, &cap) in lemma_boxes.iter().zip(&lemma_captions) {
        b.play_with(vec![Step::create(frame), Step::fade_in(cap)], 0.6)?;
    }
    b.wait(0.3)?;

    let line_steps = lemma_lines.iter().map(|&l| Step::create(l)).collect();
    b.play_with(lagged(line_steps, 0.1)?, 0.8)?;

    b.play_with(
        vec![Step::create(theorem_box), Step::write(theorem_text)],
        1.0,
    )?;
    b.play_with(
        vec![Step::new(
            StepKind::Indicate {
                scale: 1.03,
                color: Color::YELLOW,
            },
            theorem_box,
        )],
        0.8,
    )?;
    b.wait(2.0)?;

    b.build()
}
