use super::*;
use crate::scene::element::ElementId;

fn fade(secs: f64) -> Step {
    Step::fade_in(ElementId(1)).run_time(secs)
}

#[test]
fn total_duration_sums_beats_and_waits() {
    let mut tl = Timeline::new();
    tl.add_beat(vec![fade(0.8)], None).unwrap();
    tl.add_beat(vec![fade(0.4), fade(1.0)], None).unwrap();
    tl.add_beat(vec![fade(0.6)], None).unwrap();
    tl.add_wait(2.5).unwrap();
    assert!((tl.total_duration() - 4.9).abs() < 1e-9);
    assert_eq!(tl.beats().len(), 4);
    assert_eq!(tl.beats()[3].kind, BeatKind::Wait);
}

#[test]
fn beat_duration_is_the_slowest_step_including_delay() {
    let mut tl = Timeline::new();
    let d = tl
        .add_beat(vec![fade(1.0), fade(0.5).delay(0.75)], None)
        .unwrap();
    assert_eq!(d, 1.25);
}

#[test]
fn override_time_scales_every_step() {
    let mut tl = Timeline::new();
    let d = tl
        .add_beat(vec![fade(1.0), fade(0.5).delay(0.5)], Some(3.0))
        .unwrap();
    assert_eq!(d, 3.0);
    let steps = &tl.beats()[0].steps;
    assert_eq!(steps[0].run_time, 3.0);
    assert_eq!(steps[1].delay, 1.5);
    assert_eq!(steps[1].run_time, 1.5);
}

#[test]
fn instant_beats_take_the_override_verbatim() {
    let mut tl = Timeline::new();
    let d = tl
        .add_beat(vec![Step::add(ElementId(1))], Some(0.5))
        .unwrap();
    assert_eq!(d, 0.5);
    assert_eq!(tl.beats()[0].steps[0].run_time, 0.0);
}

#[test]
fn invalid_beats_leave_the_timeline_unchanged() {
    let mut tl = Timeline::new();
    tl.add_beat(vec![fade(1.0)], None).unwrap();
    assert!(tl.add_beat(Vec::new(), None).is_err());
    assert!(tl.add_beat(vec![fade(1.0)], Some(-1.0)).is_err());
    assert!(tl.add_beat(vec![fade(1.0), fade(-0.5)], None).is_err());
    assert!(tl.add_wait(f64::INFINITY).is_err());
    assert_eq!(tl.beats().len(), 1);
}

#[test]
fn beat_starts_accumulate_in_insertion_order() {
    let mut tl = Timeline::new();
    tl.add_beat(vec![fade(1.0)], None).unwrap();
    tl.add_wait(0.5).unwrap();
    tl.add_beat(vec![fade(2.0)], None).unwrap();
    assert_eq!(tl.beat_starts(), vec![0.0, 1.0, 1.5]);
}
