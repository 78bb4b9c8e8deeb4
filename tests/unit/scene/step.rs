use super::*;

#[test]
fn defaults_depend_on_kind() {
    let add = Step::add(ElementId(1));
    assert_eq!(add.run_time, 0.0);
    let create = Step::create([ElementId(1), ElementId(2)]);
    assert_eq!(create.run_time, 1.0);
    assert_eq!(create.ease, Ease::Smooth);
    assert_eq!(create.targets.len(), 2);
    assert_eq!(Step::indicate(ElementId(1)).ease, Ease::ThereAndBack);
}

#[test]
fn progress_is_clamped_and_offset_by_delay() {
    let s = Step::create(ElementId(1)).run_time(2.0).delay(1.0);
    assert_eq!(s.progress_at(0.5), 0.0);
    assert_eq!(s.progress_at(2.0), 0.5);
    assert_eq!(s.progress_at(5.0), 1.0);
    assert!(s.is_running_at(1.0));
    assert!(!s.is_running_at(3.0));
    assert_eq!(s.end_time(), 3.0);
}

#[test]
fn instant_steps_jump_at_their_delay() {
    let s = Step::remove(ElementId(1)).delay(0.5);
    assert_eq!(s.progress_at(0.4), 0.0);
    assert_eq!(s.progress_at(0.5), 1.0);
}

#[test]
fn invalid_steps_are_schedule_errors() {
    let bad = [
        Step::create(Vec::<ElementId>::new()),
        Step::create(ElementId(1)).run_time(-1.0),
        Step::create(ElementId(1)).delay(f64::NAN),
        Step::scale(ElementId(1), -2.0),
        Step::set_opacity(ElementId(1), 1.5),
        Step::set_color(ElementId(1), Color::rgb(2.0, 0.0, 0.0)),
        Step::transform(ElementId(1), ElementId(1)),
    ];
    for step in bad {
        let err = step.validate().unwrap_err();
        assert!(matches!(err, BeatlineError::Schedule(_)), "{err}");
    }
    Step::transform(ElementId(1), ElementId(2)).validate().unwrap();
}

#[test]
fn lagged_staggers_starts() {
    let steps = lagged(
        vec![
            Step::fade_in(ElementId(1)),
            Step::fade_in(ElementId(2)),
            Step::fade_in(ElementId(3)).run_time(2.0),
        ],
        0.25,
    )
    .unwrap();
    assert_eq!(steps[0].delay, 0.0);
    assert_eq!(steps[1].delay, 0.25);
    assert_eq!(steps[2].delay, 1.0);
    assert!(lagged(Vec::new(), -0.1).is_err());
}

#[test]
fn steps_serialize_with_a_kind_tag() {
    let step = Step::shift(ElementId(3), Vec2::new(1.0, 0.0));
    let json = serde_json::to_value(&step).unwrap();
    assert_eq!(json["kind"], "shift");
    assert_eq!(json["targets"][0], 3);
    let back: Step = serde_json::from_value(json).unwrap();
    assert_eq!(back, step);
}

#[test]
fn shorthand_constructors_fill_in_parameters() {
    let out = Step::fade_out_shift(ElementId(1), Vec2::new(0.0, -0.5));
    assert_eq!(
        out.kind,
        StepKind::FadeOut {
            shift: Vec2::new(0.0, -0.5),
            scale: 1.0
        }
    );
    assert_eq!(
        Step::grow_from_center(ElementId(1)).kind,
        StepKind::Grow {
            origin: GrowOrigin::Center
        }
    );
    match Step::wiggle(ElementId(1)).kind {
        StepKind::Wiggle { angle, scale } => {
            assert!(angle > 0.0);
            assert_eq!(scale, 1.1);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn zero_scale_step_is_rejected_like_builder_scale() {
    let err = Step::scale(ElementId(1), 0.0).validate().unwrap_err();
    assert!(matches!(err, BeatlineError::Schedule(_)), "{err}");
    Step::scale(ElementId(1), 0.5).validate().unwrap();
    // Fades may still start from, or shrink toward, zero size.
    Step::fade_in_scaled(ElementId(1), 0.0).validate().unwrap();
}
