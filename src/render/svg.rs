use std::fmt::Write as _;

use crate::eval::snapshot::{DrawGeometry, DrawItem, FillPaint, FrameSnapshot, StrokePaint};
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Canvas, Rect};
use crate::foundation::error::{BeatlineError, BeatlineResult};

const FONT_FAMILY: &str = "sans-serif";

/// Serialize a snapshot to a standalone SVG document of `canvas` size.
///
/// The document holds one background `<rect>` followed by one `<path>` or `<text>` element per
/// draw item, back to front. Scene coordinates are baked into pixel space.
pub fn snapshot_to_svg(snapshot: &FrameSnapshot, canvas: Canvas) -> BeatlineResult<String> {
    let mut out = String::new();
    write_document(&mut out, snapshot, canvas)
        .map_err(|e| BeatlineError::render(format!("failed to format svg: {e}")))?;
    Ok(out)
}

fn write_document(
    out: &mut String,
    snapshot: &FrameSnapshot,
    canvas: Canvas,
) -> std::fmt::Result {
    let (w, h) = (canvas.width, canvas.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}" fill-opacity="{}"/>"#,
        snapshot.background.to_svg_hex(),
        num(snapshot.background.a)
    )?;

    let to_px = canvas.scene_to_pixel();
    let ppu = canvas.pixels_per_unit();
    for (i, item) in snapshot.items.iter().enumerate() {
        match &item.geometry {
            DrawGeometry::Path { path } => {
                let mut path = path.clone();
                path.apply_affine(to_px);
                write!(out, r#"<path d="{}""#, path.to_svg())?;
                write_stroke(out, item.stroke.as_ref(), ppu)?;
                write_fill(out, item.fill.as_ref())?;
                write_opacity(out, item)?;
                writeln!(out, "/>")?;
            }
            DrawGeometry::Text {
                lines,
                extent,
                em,
                line_height,
                bold,
                italic,
                transform,
                reveal,
            } => {
                let clip = (*reveal < 1.0).then(|| format!("reveal-{i}"));
                if let Some(id) = &clip {
                    write_reveal_clip(out, id, *extent, *em, *reveal)?;
                }

                let m = to_px * *transform * Affine::FLIP_Y;
                let [a, b, c, d, e, f] = m.as_coeffs();
                write!(
                    out,
                    r#"<text transform="matrix({} {} {} {} {} {})" font-family="{FONT_FAMILY}" font-size="{}" text-anchor="middle" dominant-baseline="central""#,
                    num(a),
                    num(b),
                    num(c),
                    num(d),
                    num(e),
                    num(f),
                    num(*em)
                )?;
                if *bold {
                    write!(out, r#" font-weight="bold""#)?;
                }
                if *italic {
                    write!(out, r#" font-style="italic""#)?;
                }
                match item.fill.as_ref() {
                    Some(fill) => write_fill(out, Some(fill))?,
                    None => write_fill(
                        out,
                        Some(&FillPaint {
                            color: Color::WHITE,
                            opacity: 1.0,
                        }),
                    )?,
                }
                write_opacity(out, item)?;
                if let Some(id) = &clip {
                    write!(out, r#" clip-path="url(#{id})""#)?;
                }
                write!(out, ">")?;

                let first = -((lines.len().max(1) - 1) as f64) * line_height / 2.0;
                for (k, line) in lines.iter().enumerate() {
                    write!(
                        out,
                        r#"<tspan x="0" y="{}">{}</tspan>"#,
                        num(first + (k as f64) * line_height),
                        escape_xml(line)
                    )?;
                }
                writeln!(out, "</text>")?;
            }
        }
    }

    writeln!(out, "</svg>")
}

fn write_stroke(out: &mut String, stroke: Option<&StrokePaint>, ppu: f64) -> std::fmt::Result {
    let Some(s) = stroke else {
        return write!(out, r#" stroke="none""#);
    };
    write!(
        out,
        r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
        s.color.to_svg_hex(),
        num(s.color.a * s.opacity),
        num(s.width * ppu)
    )?;
    if let Some(dash) = s.dash {
        let px = num(dash * ppu);
        write!(out, r#" stroke-dasharray="{px} {px}""#)?;
    }
    Ok(())
}

fn write_fill(out: &mut String, fill: Option<&FillPaint>) -> std::fmt::Result {
    match fill {
        Some(f) => write!(
            out,
            r#" fill="{}" fill-opacity="{}""#,
            f.color.to_svg_hex(),
            num(f.color.a * f.opacity)
        ),
        None => write!(out, r#" fill="none""#),
    }
}

fn write_opacity(out: &mut String, item: &DrawItem) -> std::fmt::Result {
    if item.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, num(item.opacity.max(0.0)))?;
    }
    Ok(())
}

// Clip rect lives in the text's own (y-down) user space.
fn write_reveal_clip(
    out: &mut String,
    id: &str,
    extent: Rect,
    em: f64,
    reveal: f64,
) -> std::fmt::Result {
    let pad = em * 0.5;
    let x = extent.x0 - pad;
    let width = (extent.width() + 2.0 * pad) * reveal.clamp(0.0, 1.0);
    writeln!(
        out,
        r#"<defs><clipPath id="{id}" clipPathUnits="userSpaceOnUse"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
        num(x),
        num(-extent.y1 - pad),
        num(width),
        num(extent.height() + 2.0 * pad)
    )
}

fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
