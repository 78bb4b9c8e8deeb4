use super::*;

#[test]
fn relations_and_roots() {
    assert_eq!(to_display(r"S \leq 2+\sqrt{2}").unwrap(), "S ≤ 2+√2");
    assert_eq!(to_display(r"S \leq 2\sqrt{2}").unwrap(), "S ≤ 2√2");
}

#[test]
fn brackets_and_subscripts() {
    assert_eq!(
        to_display(r"\langle A_0 B_1 \rangle").unwrap(),
        "⟨A₀B₁⟩"
    );
    assert_eq!(to_display(r"x^{2}").unwrap(), "x²");
}

#[test]
fn text_mode_keeps_spaces() {
    assert_eq!(
        to_display(r"\text{PR-Box } (S=4)").unwrap(),
        "PR-Box (S = 4)"
    );
}

#[test]
fn conditional_probability_reads_naturally() {
    assert_eq!(
        to_display(r"p(a = b \mid 00) = 1").unwrap(),
        "p(a = b | 00) = 1"
    );
}

#[test]
fn frac_wraps_multi_char_parts() {
    assert_eq!(to_display(r"\frac{1}{2}").unwrap(), "1/2");
    assert_eq!(to_display(r"\frac{a+b}{2}").unwrap(), "(a+b)/2");
}

#[test]
fn list_bullets_render() {
    assert_eq!(to_display(r"\bullet\; H \geq 0").unwrap(), "• H ≥ 0");
}

#[test]
fn unmappable_subscript_falls_back_to_marker() {
    assert_eq!(to_display(r"a_b").unwrap(), "a_b");
}

#[test]
fn unknown_command_and_unbalanced_braces_fail() {
    assert!(to_display(r"\notacommand x").is_err());
    assert!(to_display(r"{x").is_err());
    assert!(to_display(r"x}").is_err());
}
