//! TeX-like formula source to a plain Unicode display string.
//!
//! This is not a typesetter: it covers the subset of math-mode commands the talk scenes use
//! (relations, arrows, Greek letters, `\sqrt`, `\frac`, `\text`, accents and simple
//! sub/superscripts) and renders them as a single line of text. Unknown commands are rejected so
//! typos surface at construction time.

use crate::foundation::error::{BeatlineError, BeatlineResult};

/// `(command, display, is_relation)`; relations get a space on both sides.
const SYMBOLS: &[(&str, &str, bool)] = &[
    ("leq", "≤", true),
    ("le", "≤", true),
    ("geq", "≥", true),
    ("ge", "≥", true),
    ("neq", "≠", true),
    ("ne", "≠", true),
    ("approx", "≈", true),
    ("equiv", "≡", true),
    ("sim", "∼", true),
    ("in", "∈", true),
    ("notin", "∉", true),
    ("subset", "⊂", true),
    ("subseteq", "⊆", true),
    ("supset", "⊃", true),
    ("mid", "|", true),
    ("to", "→", true),
    ("rightarrow", "→", true),
    ("leftarrow", "←", true),
    ("Rightarrow", "⇒", true),
    ("Leftarrow", "⇐", true),
    ("implies", "⇒", true),
    ("iff", "⟺", true),
    ("Leftrightarrow", "⇔", true),
    ("mapsto", "↦", true),
    ("oplus", "⊕", false),
    ("otimes", "⊗", false),
    ("cdot", "·", false),
    ("times", "×", false),
    ("pm", "±", false),
    ("cup", "∪", false),
    ("cap", "∩", false),
    ("infty", "∞", false),
    ("sum", "Σ", false),
    ("prod", "Π", false),
    ("partial", "∂", false),
    ("nabla", "∇", false),
    ("forall", "∀", false),
    ("exists", "∃", false),
    ("emptyset", "∅", false),
    ("langle", "⟨", false),
    ("rangle", "⟩", false),
    ("lceil", "⌈", false),
    ("rceil", "⌉", false),
    ("lfloor", "⌊", false),
    ("rfloor", "⌋", false),
    ("ldots", "…", false),
    ("cdots", "⋯", false),
    ("dots", "…", false),
    ("checkmark", "✓", false),
    ("bullet", "•", false),
    ("alpha", "α", false),
    ("beta", "β", false),
    ("gamma", "γ", false),
    ("delta", "δ", false),
    ("epsilon", "ε", false),
    ("varepsilon", "ε", false),
    ("eta", "η", false),
    ("theta", "θ", false),
    ("lambda", "λ", false),
    ("mu", "μ", false),
    ("pi", "π", false),
    ("rho", "ρ", false),
    ("sigma", "σ", false),
    ("tau", "τ", false),
    ("phi", "φ", false),
    ("chi", "χ", false),
    ("psi", "ψ", false),
    ("omega", "ω", false),
    ("Gamma", "Γ", false),
    ("Delta", "Δ", false),
    ("Theta", "Θ", false),
    ("Lambda", "Λ", false),
    ("Sigma", "Σ", false),
    ("Phi", "Φ", false),
    ("Psi", "Ψ", false),
    ("Omega", "Ω", false),
];

const SUPERSCRIPTS: &[(char, char)] = &[
    ('0', '⁰'),
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
    ('+', '⁺'),
    ('-', '⁻'),
    ('=', '⁼'),
    ('(', '⁽'),
    (')', '⁾'),
    ('n', 'ⁿ'),
    ('i', 'ⁱ'),
    ('x', 'ˣ'),
    ('*', '*'),
];

const SUBSCRIPTS: &[(char, char)] = &[
    ('0', '₀'),
    ('1', '₁'),
    ('2', '₂'),
    ('3', '₃'),
    ('4', '₄'),
    ('5', '₅'),
    ('6', '₆'),
    ('7', '₇'),
    ('8', '₈'),
    ('9', '₉'),
    ('+', '₊'),
    ('-', '₋'),
    ('=', '₌'),
    ('(', '₍'),
    (')', '₎'),
    ('a', 'ₐ'),
    ('e', 'ₑ'),
    ('h', 'ₕ'),
    ('i', 'ᵢ'),
    ('j', 'ⱼ'),
    ('k', 'ₖ'),
    ('l', 'ₗ'),
    ('m', 'ₘ'),
    ('n', 'ₙ'),
    ('o', 'ₒ'),
    ('p', 'ₚ'),
    ('r', 'ᵣ'),
    ('s', 'ₛ'),
    ('t', 'ₜ'),
    ('u', 'ᵤ'),
    ('v', 'ᵥ'),
    ('x', 'ₓ'),
];

/// Convert formula source into its display string.
pub fn to_display(source: &str) -> BeatlineResult<String> {
    let mut p = Parser {
        chars: source.chars().collect(),
        pos: 0,
    };
    let out = p.parse_seq(false)?;
    Ok(tidy(&out))
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse_seq(&mut self, in_group: bool) -> BeatlineResult<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            match c {
                '}' => {
                    if in_group {
                        self.pos += 1;
                        return Ok(out);
                    }
                    return Err(BeatlineError::construction(format!(
                        "formula has an unbalanced '}}' at offset {}",
                        self.pos
                    )));
                }
                '{' => {
                    self.pos += 1;
                    out.push_str(&self.parse_seq(true)?);
                }
                '\\' => {
                    self.pos += 1;
                    out.push_str(&self.parse_command()?);
                }
                '^' | '_' => {
                    self.pos += 1;
                    let arg = self.parse_arg()?;
                    out.push_str(&script(&arg, c == '^'));
                }
                '=' | '<' | '>' => {
                    self.pos += 1;
                    out.push(' ');
                    out.push(c);
                    out.push(' ');
                }
                c if c.is_whitespace() => self.pos += 1,
                c => {
                    self.pos += 1;
                    out.push(c);
                }
            }
        }
        if in_group {
            return Err(BeatlineError::construction("formula is missing a closing '}'"));
        }
        Ok(out)
    }

    fn parse_arg(&mut self) -> BeatlineResult<String> {
        self.skip_ws();
        match self.bump() {
            Some('{') => self.parse_seq(true),
            Some('\\') => self.parse_command(),
            Some(c) => Ok(c.to_string()),
            None => Err(BeatlineError::construction(
                "formula ends where an argument was expected",
            )),
        }
    }

    /// Verbatim braced argument, used by text-mode commands (spaces are kept).
    fn parse_raw_group(&mut self) -> BeatlineResult<String> {
        self.skip_ws();
        if self.bump() != Some('{') {
            return Err(BeatlineError::construction(
                "text command expects a braced argument",
            ));
        }
        let mut depth = 1usize;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                }
                _ => {}
            }
            out.push(c);
        }
        Err(BeatlineError::construction("formula is missing a closing '}'"))
    }

    fn parse_command(&mut self) -> BeatlineResult<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        if name.is_empty() {
            let Some(c) = self.bump() else {
                return Err(BeatlineError::construction("formula ends with a lone '\\'"));
            };
            return Ok(match c {
                ';' | ',' | ':' | ' ' => " ".to_owned(),
                '!' => String::new(),
                '\\' => "\n".to_owned(),
                '|' => "‖".to_owned(),
                other => other.to_string(),
            });
        }

        match name.as_str() {
            "text" | "mathrm" | "textbf" | "mathbf" | "textit" | "operatorname" => {
                self.parse_raw_group()
            }
            "mathcal" | "mathbb" | "mathit" | "boldsymbol" => self.parse_arg(),
            "frac" => {
                let num = self.parse_arg()?;
                let den = self.parse_arg()?;
                Ok(format!("{}/{}", wrap(&num), wrap(&den)))
            }
            "sqrt" => {
                let arg = self.parse_arg()?;
                Ok(format!("√{}", wrap(&arg)))
            }
            "vec" => Ok(format!("{}\u{20D7}", self.parse_arg()?)),
            "hat" => Ok(format!("{}\u{0302}", self.parse_arg()?)),
            "bar" | "overline" => Ok(format!("{}\u{0305}", self.parse_arg()?)),
            "tilde" => Ok(format!("{}\u{0303}", self.parse_arg()?)),
            "left" | "right" | "big" | "Big" | "bigg" | "Bigg" => {
                if self.peek() == Some('.') {
                    self.pos += 1;
                }
                Ok(String::new())
            }
            "displaystyle" | "limits" => Ok(String::new()),
            "quad" | "qquad" => Ok(" ".to_owned()),
            "log" | "ln" | "exp" | "max" | "min" | "sin" | "cos" | "Pr" => Ok(name),
            other => SYMBOLS
                .iter()
                .find(|(cmd, _, _)| *cmd == other)
                .map(|(_, sym, relation)| {
                    if *relation {
                        format!(" {sym} ")
                    } else {
                        (*sym).to_owned()
                    }
                })
                .ok_or_else(|| {
                    BeatlineError::construction(format!(
                        "unsupported formula command \\{other}"
                    ))
                }),
        }
    }
}

fn wrap(s: &str) -> String {
    if s.trim().chars().count() > 1 {
        format!("({})", s.trim())
    } else {
        s.trim().to_owned()
    }
}

fn script(arg: &str, sup: bool) -> String {
    let table = if sup { SUPERSCRIPTS } else { SUBSCRIPTS };
    let mapped: Option<String> = arg
        .trim()
        .chars()
        .map(|c| table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to))
        .collect();
    match mapped {
        Some(s) if !s.is_empty() => s,
        _ => {
            let mark = if sup { '^' } else { '_' };
            format!("{mark}{}", wrap(arg))
        }
    }
}

fn tidy(s: &str) -> String {
    s.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/scene/formula.rs"]
mod tests;
