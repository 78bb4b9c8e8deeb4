use super::*;
use crate::eval::evaluator::Evaluator;

#[test]
fn every_catalog_scene_builds_and_samples() {
    for entry in catalog() {
        let scene = entry.build().unwrap();
        assert_eq!(scene.name, entry.name);
        let d = scene.duration();
        assert!(d > 2.0, "{} is too short: {d}", entry.name);
        for t in [0.0, d * 0.5, d] {
            let snap = Evaluator::sample(&scene, t).unwrap();
            assert_eq!(snap.background, scene.background);
        }
        let end = Evaluator::sample(&scene, d).unwrap();
        assert!(end.element_item_count() > 0, "{} ends empty", entry.name);
    }
}

#[test]
fn names_are_unique() {
    let mut names: Vec<_> = catalog().iter().map(|e| e.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), catalog().len());
}

#[test]
fn lookup_ignores_ascii_case() {
    assert_eq!(find("chshbars").unwrap().name, "CHSHBars");
    assert_eq!(build("dpichain").unwrap().name, "DPIChain");
}

#[test]
fn unknown_scene_is_a_reference_error() {
    let err = build("RandomAccessCode").unwrap_err();
    assert!(matches!(err, BeatlineError::Reference(_)));
    assert!(err.to_string().contains("CorrelationPolytope"));
}

#[test]
fn scenes_start_on_the_shared_background() {
    let bg = palette().unwrap().background;
    for entry in catalog() {
        assert_eq!(entry.build().unwrap().background, bg);
    }
}

#[test]
fn prbox_timing_matches_its_script() {
    // 0.8 + 1 + 1 + 1 + 0.5 + 0.6 + 4 * 0.5 + 0.3 + 0.8 + 1 + 0.8 + 2
    let scene = build("PRBoxScene").unwrap();
    assert!((scene.duration() - 11.8).abs() < 1e-9);
}

#[test]
fn catalog_follows_the_talk() {
    let names: Vec<_> = catalog().iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        [
            "CorrelationPolytope",
            "PRBoxScene",
            "CHSHBars",
            "TsirelsonGauge",
            "PRBoxCrime",
            "ICGame",
            "DPIChain",
            "EntropyDef",
            "ProofSketch",
            "BigPicture",
        ]
    );
}

#[test]
fn ic_game_timing_matches_its_script() {
    // 0.7 + 0.7 + 0.8 + 0.7 + 0.8 + 0.7 + 0.8 + 0.8 + 0.3 + 1 + 0.6 + 0.8 + 0.3 + 3 * 0.8 + 2
    let scene = build("ICGame").unwrap();
    assert!((scene.duration() - 13.4).abs() < 1e-9);
}

#[test]
fn violation_stamp_stays_hidden_until_it_fades_in() {
    let scene = build("PRBoxCrime").unwrap();
    assert!((scene.duration() - 14.7).abs() < 1e-9);
    let stamp = scene
        .tree
        .iter()
        .find(|e| e.name.as_deref() == Some("stamp"))
        .unwrap()
        .id;
    let leaves = scene.tree.leaves(stamp);
    assert_eq!(leaves.len(), 2);

    let before = Evaluator::sample(&scene, 10.0).unwrap();
    for &leaf in &leaves {
        assert_eq!(before.items_for(leaf).count(), 0);
    }

    let end = Evaluator::sample(&scene, scene.duration()).unwrap();
    for &leaf in &leaves {
        let items: Vec<_> = end.items_for(leaf).collect();
        assert!(!items.is_empty());
        for item in items {
            assert!((item.opacity - 0.85).abs() < 1e-9);
        }
    }
}
