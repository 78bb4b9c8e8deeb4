use std::f64::consts::{PI, SQRT_2, TAU};

use crate::animation::ease::Ease;
use crate::composition::dsl::SceneBuilder;
use crate::foundation::color::Color;
use crate::foundation::core::{Direction, Point, RIGHT, UP};
use crate::foundation::error::BeatlineResult;
use crate::scene::element::{
    ElementId, dashed_line, formula, line, rectangle, rounded_rectangle, text,
};
use crate::scene::model::Scene;
use crate::scene::step::{Step, StepKind, lagged};
use crate::scenes::palette;

const COL_WIDTHS: [f64; 5] = [1.2, 1.2, 1.5, 1.5, 1.3];
const ROW_HEIGHT: f64 = 0.7;
const X_START: f64 = -3.2;
const Y_START: f64 = 1.2;
const COUNTER_AT: Point = Point::new(4.0, 0.6);

const BAR_MAX_W: f64 = 5.5;
const BAR_BASE_X: f64 = -3.5;
const BAR_BASE_Y: f64 = -2.2;

/// Centers of the table columns.
fn column_centers() -> [f64; 5] {
    let mut x = X_START;
    COL_WIDTHS.map(|w| {
        let c = x + w / 2.0;
        x += w;
        c
    })
}

fn counter(
    b: &mut SceneBuilder,
    src: &str,
    size: f64,
    color: Color,
) -> BeatlineResult<ElementId> {
    b.add(formula(src, size).color(color).move_to(COUNTER_AT))
}

pub(super) fn build() -> BeatlineResult<Scene> {
    let pal = palette()?;
    let teal = Color::parse("TEAL")?;
    let orange = Color::parse("ORANGE")?;
    let green = Color::parse("GREEN")?;
    let grey_b = Color::parse("GREY_B")?;
    let mut b = SceneBuilder::new("PRBoxCrime").background(pal.background);

    let title = b.add(
        text("PR-Box: The Perfect Crime", 38.0)
            .color(Color::YELLOW)
            .bold(),
    )?;
    b.to_edge(title, Direction::Up, 0.5)?;
    let subtitle = b.add(
        formula(r"\text{Correlation rule: } a \oplus b = x \cdot y", 28.0).color(grey_b),
    )?;
    b.next_to(subtitle, title, Direction::Down, 0.2)?;

    let col_colors = [teal, teal, orange, orange, green];
    let centers = column_centers();

    let mut header_cells = Vec::new();
    for ((src, color), x) in [r"x", r"y", r"x \cdot y", r"a \oplus b", r"\text{Win?}"]
        .into_iter()
        .zip(col_colors)
        .zip(centers)
    {
        let cell = formula(src, 26.0)
            .color(color)
            .move_to(Point::new(x, Y_START));
        header_cells.push(b.add(cell)?);
    }
    let header_row = b.named_group("header", &header_cells)?;
    let table_right = X_START + COL_WIDTHS.iter().sum::<f64>();
    let header_line = b.add(
        line(
            Point::new(X_START, Y_START - 0.35),
            Point::new(table_right, Y_START - 0.35),
        )
        .color(Color::parse("GREY_D")?)
        .stroke_width(1.5),
    )?;

    // a xor b always equals x and y, so every round is won.
    let mut rows = Vec::new();
    for (r, (x, y)) in [(0u8, 0u8), (0, 1), (1, 0), (1, 1)].into_iter().enumerate() {
        let xy = x & y;
        let values = [
            x.to_string(),
            y.to_string(),
            xy.to_string(),
            xy.to_string(),
            r"\checkmark".to_owned(),
        ];
        let row_y = Y_START - 0.7 - r as f64 * ROW_HEIGHT;
        let mut cells = Vec::new();
        for (i, src) in values.iter().enumerate() {
            let color = if i == 4 { green } else { col_colors[i] };
            cells.push(b.add(
                formula(src, 28.0)
                    .color(color)
                    .move_to(Point::new(centers[i], row_y)),
            )?);
        }
        rows.push(b.named_group(format!("row {r}"), &cells)?);
    }

    let counter_title = b.add(
        text("CHSH Score", 22.0)
            .bold()
            .move_to(Point::new(4.0, 1.5)),
    )?;
    let s_display = counter(&mut b, "S = 0", 36.0, green)?;
    let mut s_steps = Vec::new();
    for i in 1..=4 {
        let color = if i < 4 { green } else { Color::YELLOW };
        s_steps.push(counter(&mut b, &format!("S = {i}"), 36.0, color)?);
    }
    let s_final = counter(&mut b, "S = 4", 48.0, Color::YELLOW)?;

    b.play_with(vec![Step::write(title), Step::fade_in(subtitle)], 1.0)?;
    b.play_with(vec![Step::fade_in(header_row), Step::create(header_line)], 0.8)?;
    b.play_with(vec![Step::fade_in(counter_title), Step::fade_in(s_display)], 0.5)?;
    for (r, (&row, &next)) in rows.iter().zip(&s_steps).enumerate() {
        b.play_with(vec![Step::fade_in_shift(row, RIGHT * 0.3)], 0.6)?;
        b.play_with(vec![Step::transform(s_display, next)], 0.4)?;
        if r < 3 {
            b.wait(0.2)?;
        }
    }
    b.wait(0.3)?;

    b.play_with(vec![Step::transform(s_display, s_final)], 0.5)?;
    b.play_with(vec![Step::circumscribe(s_display)], 0.8)?;

    let mut bar_groups = Vec::new();
    for (i, (name, val, color)) in [
        ("Classical", 2.0, pal.local),
        ("Tsirelson", 2.0 * SQRT_2, pal.quantum),
        ("PR-Box", 4.0, pal.no_signaling),
    ]
    .into_iter()
    .enumerate()
    {
        let y = BAR_BASE_Y - i as f64 * 0.7;
        let w = val / 4.0 * BAR_MAX_W;
        let bar = b.add(
            rectangle(w, 0.4)
                .color(color)
                .fill(color, 0.5)
                .stroke_width(2.0)
                .move_to(Point::new(BAR_BASE_X + w / 2.0, y)),
        )?;
        let label = b.add(text(name, 16.0).color(color))?;
        b.next_to(label, bar, Direction::Left, 0.15)?;
        let value = if i == 2 {
            "S=4".to_owned()
        } else {
            format!("S={val:.2}")
        };
        let value = b.add(formula(&value, 18.0))?;
        b.next_to(value, bar, Direction::Right, 0.15)?;
        bar_groups.push(b.named_group(name, &[bar, label, value])?);
    }
    let bar_steps = bar_groups.iter().map(|&g| Step::fade_in(g)).collect();
    b.play_with(lagged(bar_steps, 0.3)?, 1.5)?;

    let ts_x = BAR_BASE_X + SQRT_2 / 2.0 * BAR_MAX_W;
    let ts_line = b.add(
        dashed_line(
            Point::new(ts_x, BAR_BASE_Y + 0.4),
            Point::new(ts_x, BAR_BASE_Y - 1.8),
            0.1,
        )
        .color(Color::YELLOW)
        .stroke_width(2.0),
    )?;
    let ts_label = b.add(text("Tsirelson", 14.0).color(Color::YELLOW))?;
    b.next_to(ts_label, ts_line, Direction::Up, 0.1)?;
    b.play_with(vec![Step::create(ts_line), Step::fade_in(ts_label)], 0.8)?;

    let stamp = b.add(
        text("VIOLATION", 60.0)
            .color(pal.no_signaling)
            .bold()
            .rotate(15.0 * PI / 180.0)
            .opacity(0.0)
            .move_to(Point::new(0.5, 0.0)),
    )?;
    let around = b.bounds(stamp)?.inflate(0.2, 0.2);
    let border = b.add(
        rounded_rectangle(around.width(), around.height(), 0.1)
            .color(pal.no_signaling)
            .stroke_width(4.0)
            .opacity(0.0)
            .move_to(around.center()),
    )?;
    let stamp_group = b.named_group("stamp", &[border, stamp])?;
    b.show(stamp_group)?;
    b.play_with(
        vec![Step::set_opacity(stamp_group, 0.85).ease(Ease::RushInto)],
        0.5,
    )?;
    b.play_with(
        vec![Step::new(
            StepKind::Wiggle {
                angle: 0.01 * TAU,
                scale: 1.05,
            },
            stamp_group,
        )],
        0.6,
    )?;

    let ns_text = b.add(text("Yet it respects No-Signaling!", 22.0).color(grey_b))?;
    b.to_edge(ns_text, Direction::Down, 0.3)?;
    b.play_with(vec![Step::fade_in_shift(ns_text, UP * 0.2)], 0.8)?;
    b.wait(2.0)?;

    b.build()
}
