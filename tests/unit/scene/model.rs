use super::*;
use crate::composition::dsl::SceneBuilder;
use crate::scene::element::{arrow, formula, square};
use crate::scene::step::Step;
use kurbo::Point;

fn sample_scene() -> Scene {
    let mut b = SceneBuilder::new("Roundtrip").background(Color::parse("GREY_E").unwrap());
    let a = b.add(square(1.0)).unwrap();
    let f = b.add(formula(r"S \leq 2", 48.0)).unwrap();
    let ar = b.add(arrow(Point::new(-1.0, 0.0), Point::new(1.0, 0.0))).unwrap();
    b.show(a).unwrap();
    b.play(vec![Step::write(f), Step::grow_arrow(ar)]).unwrap();
    b.wait(1.0).unwrap();
    b.build().unwrap()
}

#[test]
fn scene_json_roundtrips() {
    let scene = sample_scene();
    let json = scene.to_json_pretty().unwrap();
    let back = Scene::from_json_str(&json).unwrap();
    assert_eq!(back, scene);
    assert_eq!(back.duration(), 2.0);
}

#[test]
fn dangling_references_are_rejected_on_load() {
    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["visible_at_start"] = serde_json::json!([99]);
    let err = Scene::from_json_str(&value.to_string()).unwrap_err();
    assert!(matches!(err, BeatlineError::Reference(_)));

    let err = Scene::from_json_str("{").unwrap_err();
    assert!(matches!(err, BeatlineError::Serde(_)));
}

fn load(value: &serde_json::Value) -> BeatlineResult<Scene> {
    Scene::from_json_str(&value.to_string())
}

#[test]
fn dangling_child_links_are_rejected_on_load() {
    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["tree"]["nodes"][0]["children"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!(99));
    let err = load(&value).unwrap_err();
    assert!(matches!(err, BeatlineError::Reference(_)), "{err}");

    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["tree"]["nodes"][2]["parent"] = serde_json::json!(1);
    let err = load(&value).unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)), "{err}");
}

#[test]
fn invalid_element_parameters_are_rejected_on_load() {
    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["tree"]["nodes"][1]["kind"]["shape"]["width"] = serde_json::json!(-5.0);
    let err = load(&value).unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)), "{err}");

    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["tree"]["nodes"][1]["style"]["opacity"] = serde_json::json!(3.0);
    assert!(load(&value).is_err());
}

#[test]
fn detached_ownership_cycles_are_rejected_on_load() {
    let mut b = SceneBuilder::new("Cycle");
    let a = b.add(square(1.0)).unwrap();
    let c = b.add(square(1.0)).unwrap();
    let g1 = b.group(&[a]).unwrap();
    let g2 = b.group(&[c]).unwrap();
    let mut value = serde_json::to_value(b.build().unwrap()).unwrap();
    Scene::from_json_str(&value.to_string()).unwrap();

    let nodes = &mut value["tree"]["nodes"];
    nodes[0]["children"] = serde_json::json!([]);
    nodes[g1.0 as usize]["parent"] = serde_json::json!(g2.0);
    nodes[g1.0 as usize]["children"] = serde_json::json!([a.0, g2.0]);
    nodes[g2.0 as usize]["parent"] = serde_json::json!(g1.0);
    nodes[g2.0 as usize]["children"] = serde_json::json!([c.0, g1.0]);
    let err = load(&value).unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)), "{err}");
}

#[test]
fn beat_durations_must_match_their_steps_on_load() {
    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["timeline"]["beats"][0]["duration"] = serde_json::json!(5.0);
    let err = load(&value).unwrap_err();
    assert!(matches!(err, BeatlineError::Schedule(_)), "{err}");

    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["timeline"]["beats"][1]["duration"] = serde_json::json!(-1.0);
    assert!(load(&value).is_err());

    let mut value = serde_json::to_value(sample_scene()).unwrap();
    value["timeline"]["beats"][0]["steps"] = serde_json::json!([]);
    assert!(load(&value).is_err());
}
