use super::*;
use kurbo::Shape as _;
use crate::composition::dsl::SceneBuilder;
use crate::foundation::path::path_length;
use crate::scene::element::{circle, rectangle, square, text};

fn path_of(item: &DrawItem) -> &BezPath {
    match &item.geometry {
        DrawGeometry::Path { path } => path,
        DrawGeometry::Text { .. } => panic!("expected a path item"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn create_exposes_the_stroke_progressively() {
    let mut b = SceneBuilder::new("Create");
    let a = b.add(square(2.0)).unwrap();
    b.play(vec![Step::create(a).ease(Ease::Linear)]).unwrap();
    let scene = b.build().unwrap();

    let half = Evaluator::sample(&scene, 0.5).unwrap();
    let items: Vec<_> = half.items_for(a).collect();
    assert_eq!(items.len(), 1);
    assert!(close(path_length(path_of(items[0])), 4.0));

    let done = Evaluator::sample(&scene, 1.0).unwrap();
    let items: Vec<_> = done.items_for(a).collect();
    assert_eq!(items.len(), 1);
    assert!(close(path_length(path_of(items[0])), 8.0));
}

#[test]
fn elements_are_hidden_until_introduced() {
    let mut b = SceneBuilder::new("Hidden");
    let a = b.add(square(1.0)).unwrap();
    let c = b.add(circle(0.5)).unwrap();
    b.show(c).unwrap();
    b.wait(1.0).unwrap();
    b.play(vec![Step::add(a)]).unwrap();
    let scene = b.build().unwrap();

    let before = Evaluator::sample(&scene, 0.5).unwrap();
    assert_eq!(before.items_for(a).count(), 0);
    assert_eq!(before.items_for(c).count(), 1);
    let after = Evaluator::sample(&scene, 1.0).unwrap();
    assert_eq!(after.items_for(a).count(), 1);
}

#[test]
fn fade_out_dims_then_hides() {
    let mut b = SceneBuilder::new("FadeOut");
    let a = b.add(square(1.0)).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::fade_out(a).ease(Ease::Linear)]).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.25).unwrap();
    let item = mid.items_for(a).next().unwrap();
    assert!(close(item.opacity, 0.75));
    assert_eq!(Evaluator::sample(&scene, 1.0).unwrap().items_for(a).count(), 0);
}

#[test]
fn transform_makes_the_source_display_the_target() {
    let mut b = SceneBuilder::new("Transform");
    let a = b.add(square(1.0)).unwrap();
    let t = b.add(circle(1.0).shift(Vec2::new(3.0, 0.0))).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::transform(a, t)]).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.5).unwrap();
    assert_eq!(mid.items_for(a).count(), 2);

    let done = Evaluator::sample(&scene, 1.0).unwrap();
    assert_eq!(done.items_for(t).count(), 0);
    let items: Vec<_> = done.items_for(a).collect();
    assert_eq!(items.len(), 1);
    let bb = path_of(items[0]).bounding_box();
    assert!(close(bb.center().x, 3.0));
    assert!(close(bb.width(), 2.0));
}

#[test]
fn matching_shapes_interpolate_in_place() {
    let mut b = SceneBuilder::new("Morph");
    let a = b.add(square(1.0)).unwrap();
    let t = b.add(square(3.0).shift(Vec2::new(2.0, 0.0))).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::transform(a, t).ease(Ease::Linear)]).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.5).unwrap();
    let items: Vec<_> = mid.items_for(a).collect();
    assert_eq!(items.len(), 1);
    let bb = path_of(items[0]).bounding_box();
    assert!(close(bb.width(), 2.0));
    assert!(close(bb.center().x, 1.0));
}

#[test]
fn replacement_transform_hands_over_to_the_target() {
    let mut b = SceneBuilder::new("Replace");
    let a = b.add(square(1.0)).unwrap();
    let t = b.add(circle(0.5)).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::replacement_transform(a, t)]).unwrap();
    let scene = b.build().unwrap();

    let done = Evaluator::sample(&scene, 1.0).unwrap();
    assert_eq!(done.items_for(a).count(), 0);
    assert_eq!(done.items_for(t).count(), 1);
}

#[test]
fn shift_moves_by_the_eased_fraction() {
    let mut b = SceneBuilder::new("Shift");
    let a = b.add(square(1.0)).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::shift(a, Vec2::new(2.0, 0.0)).ease(Ease::Linear)])
        .unwrap();
    b.wait(1.0).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.5).unwrap();
    let c = path_of(mid.items_for(a).next().unwrap()).bounding_box().center();
    assert!(close(c.x, 1.0));
    let later = Evaluator::sample(&scene, 1.5).unwrap();
    let c = path_of(later.items_for(a).next().unwrap()).bounding_box().center();
    assert!(close(c.x, 2.0));
}

#[test]
fn highlight_overlays_only_exist_while_running() {
    let mut b = SceneBuilder::new("Highlight");
    let a = b.add(square(1.0)).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::circumscribe(a), Step::flash(a)]).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.5).unwrap();
    assert_eq!(mid.items.len() - mid.element_item_count(), 1 + FLASH_RAYS);
    let done = Evaluator::sample(&scene, 1.0).unwrap();
    assert_eq!(done.items.len(), done.element_item_count());
}

#[test]
fn write_reveals_text_left_to_right() {
    let mut b = SceneBuilder::new("Write");
    let l = b.add(text("Tsirelson", 48.0)).unwrap();
    b.play(vec![Step::write(l).ease(Ease::Linear)]).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.25).unwrap();
    match &mid.items_for(l).next().unwrap().geometry {
        DrawGeometry::Text { reveal, lines, .. } => {
            assert!(close(*reveal, 0.25));
            assert_eq!(lines, &vec!["Tsirelson".to_owned()]);
        }
        DrawGeometry::Path { .. } => panic!("expected text"),
    }
}

#[test]
fn grow_starts_from_nothing_and_settles() {
    let mut b = SceneBuilder::new("Grow");
    let a = b.add(square(1.0)).unwrap();
    b.play(vec![Step::grow_from_edge(a, crate::foundation::core::Direction::Down)])
        .unwrap();
    let scene = b.build().unwrap();

    assert_eq!(Evaluator::sample(&scene, 0.0).unwrap().items_for(a).count(), 0);
    let done = Evaluator::sample(&scene, 1.0).unwrap();
    let bb = path_of(done.items_for(a).next().unwrap()).bounding_box();
    assert!(close(bb.width(), 1.0));
}

#[test]
fn sampling_is_deterministic_and_rejects_bad_times() {
    let mut b = SceneBuilder::new("Deterministic");
    let a = b.add(square(1.0)).unwrap();
    b.play(vec![Step::create(a), Step::indicate(a)]).unwrap();
    let scene = b.build().unwrap();
    assert_eq!(
        Evaluator::sample(&scene, 0.37).unwrap(),
        Evaluator::sample(&scene, 0.37).unwrap()
    );
    assert!(Evaluator::sample(&scene, -1.0).is_err());
    assert!(Evaluator::sample(&scene, f64::NAN).is_err());

    let fps = Fps::new(30, 1).unwrap();
    let f = Evaluator::eval_frame(&scene, fps, FrameIndex(15)).unwrap();
    assert!(close(f.time, 0.5));
}

fn center_of(snap: &FrameSnapshot, id: ElementId) -> Point {
    path_of(snap.items_for(id).next().unwrap()).bounding_box().center()
}

fn bbox_of(snap: &FrameSnapshot, id: ElementId) -> Rect {
    path_of(snap.items_for(id).next().unwrap()).bounding_box()
}

#[test]
fn move_to_glides_the_center_to_the_point() {
    let mut b = SceneBuilder::new("MoveTo");
    let a = b.add(square(1.0)).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::move_to(a, Point::new(4.0, -2.0)).ease(Ease::Linear)])
        .unwrap();
    let scene = b.build().unwrap();

    let mid = center_of(&Evaluator::sample(&scene, 0.5).unwrap(), a);
    assert!(close(mid.x, 2.0) && close(mid.y, -1.0));
    let done = center_of(&Evaluator::sample(&scene, 1.0).unwrap(), a);
    assert!(close(done.x, 4.0) && close(done.y, -2.0));
}

#[test]
fn rotate_turns_around_the_bounds_center() {
    let mut b = SceneBuilder::new("Rotate");
    let a = b.add(rectangle(2.0, 1.0).shift(Vec2::new(1.0, 1.0))).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::rotate(a, PI / 2.0).ease(Ease::Linear)]).unwrap();
    let scene = b.build().unwrap();

    let mid = bbox_of(&Evaluator::sample(&scene, 0.5).unwrap(), a);
    assert!(close(mid.width(), 3.0 / 2f64.sqrt()));
    assert!(close(mid.center().x, 1.0) && close(mid.center().y, 1.0));

    let done = bbox_of(&Evaluator::sample(&scene, 1.0).unwrap(), a);
    assert!(close(done.width(), 1.0));
    assert!(close(done.height(), 2.0));
    assert!(close(done.center().x, 1.0) && close(done.center().y, 1.0));
}

#[test]
fn draw_border_then_fill_outlines_first_then_fills() {
    let mut b = SceneBuilder::new("BorderThenFill");
    let a = b.add(square(2.0).fill(Color::YELLOW, 0.8)).unwrap();
    b.play(vec![Step::draw_border_then_fill(a).ease(Ease::Linear)])
        .unwrap();
    let scene = b.build().unwrap();
    assert_eq!(scene.duration(), 2.0);

    // First half: only the outline, half drawn.
    let early = Evaluator::sample(&scene, 0.5).unwrap();
    let items: Vec<_> = early.items_for(a).collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].fill.is_none());
    assert!(close(path_length(path_of(items[0])), 4.0));

    // Second half: full outline, fill fading in.
    let late = Evaluator::sample(&scene, 1.5).unwrap();
    let items: Vec<_> = late.items_for(a).collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].stroke.is_some());
    assert!(close(items[0].fill.unwrap().opacity, 0.4));

    let done = Evaluator::sample(&scene, 2.0).unwrap();
    assert!(close(done.items_for(a).next().unwrap().fill.unwrap().opacity, 0.8));
}

#[test]
fn fade_in_arrives_from_its_shift_and_scale() {
    let mut b = SceneBuilder::new("FadeInShift");
    let a = b.add(square(1.0)).unwrap();
    let c = b.add(square(1.0).shift(Vec2::new(0.0, 3.0))).unwrap();
    b.play(vec![
        Step::fade_in_shift(a, Vec2::new(1.0, 0.0)).ease(Ease::Linear),
        Step::fade_in_scaled(c, 0.5).ease(Ease::Linear),
    ])
    .unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.5).unwrap();
    let item = mid.items_for(a).next().unwrap();
    assert!(close(item.opacity, 0.5));
    assert!(close(center_of(&mid, a).x, -0.5));
    let grown = bbox_of(&mid, c);
    assert!(close(grown.width(), 0.75));
    assert!(close(grown.center().y, 3.0));

    let done = Evaluator::sample(&scene, 1.0).unwrap();
    assert!(close(center_of(&done, a).x, 0.0));
    assert!(close(bbox_of(&done, c).width(), 1.0));
    assert!(close(done.items_for(a).next().unwrap().opacity, 1.0));
}

#[test]
fn set_color_and_set_opacity_interpolate() {
    let mut b = SceneBuilder::new("SetPaint");
    let a = b.add(square(1.0)).unwrap();
    let c = b.add(square(1.0).shift(Vec2::new(2.0, 0.0))).unwrap();
    b.show([a, c]).unwrap();
    b.play(vec![
        Step::set_color(a, Color::BLACK).ease(Ease::Linear),
        Step::set_opacity(c, 0.2).ease(Ease::Linear),
    ])
    .unwrap();
    b.wait(1.0).unwrap();
    let scene = b.build().unwrap();

    let mid = Evaluator::sample(&scene, 0.5).unwrap();
    let halfway = <Color as Lerp>::lerp(&Color::WHITE, &Color::BLACK, 0.5);
    assert_eq!(mid.items_for(a).next().unwrap().stroke.unwrap().color, halfway);
    assert!(close(mid.items_for(c).next().unwrap().opacity, 0.6));

    let later = Evaluator::sample(&scene, 1.5).unwrap();
    assert_eq!(later.items_for(a).next().unwrap().stroke.unwrap().color, Color::BLACK);
    assert!(close(later.items_for(c).next().unwrap().opacity, 0.2));
}

#[test]
fn wiggle_shakes_in_place_and_settles() {
    let mut b = SceneBuilder::new("Wiggle");
    let a = b.add(square(1.0).shift(Vec2::new(-1.0, 0.5))).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::wiggle(a)]).unwrap();
    let scene = b.build().unwrap();
    assert_eq!(scene.duration(), 2.0);

    let shaking = bbox_of(&Evaluator::sample(&scene, 0.5).unwrap(), a);
    assert!(shaking.width() > 1.0 + 1e-3);
    assert!(close(shaking.center().x, -1.0) && close(shaking.center().y, 0.5));

    let done = bbox_of(&Evaluator::sample(&scene, 2.0).unwrap(), a);
    assert!(close(done.width(), 1.0));
    assert!(close(done.height(), 1.0));
}

#[test]
fn group_steps_move_every_descendant_alike() {
    let mut b = SceneBuilder::new("GroupShift");
    let a = b.add(square(1.0).shift(Vec2::new(-2.0, 0.0))).unwrap();
    let c = b.add(square(0.5).shift(Vec2::new(1.0, 1.0))).unwrap();
    let g = b.group(&[a, c]).unwrap();
    b.show(g).unwrap();
    b.play(vec![Step::shift(g, Vec2::new(3.0, 2.5))]).unwrap();
    b.play(vec![Step::move_to(g, Point::new(0.0, 0.0))]).unwrap();
    let scene = b.build().unwrap();

    let start = Evaluator::sample(&scene, 0.0).unwrap();
    let shifted = Evaluator::sample(&scene, 1.0).unwrap();
    for id in [a, c] {
        let d = center_of(&shifted, id) - center_of(&start, id);
        assert!(close(d.x, 3.0) && close(d.y, 2.5), "{id} moved by {d:?}");
    }

    let moved = Evaluator::sample(&scene, 2.0).unwrap();
    let da = center_of(&moved, a) - center_of(&shifted, a);
    let dc = center_of(&moved, c) - center_of(&shifted, c);
    assert!(close(da.x, dc.x) && close(da.y, dc.y));
    let group_box = bbox_of(&moved, a).union(bbox_of(&moved, c));
    assert!(close(group_box.center().x, 0.0) && close(group_box.center().y, 0.0));
}
