use super::*;
use crate::scene::element::{circle, rectangle, square, text};

fn approx_rect(a: Rect, b: Rect) -> bool {
    (a.x0 - b.x0).abs() < 1e-9
        && (a.y0 - b.y0).abs() < 1e-9
        && (a.x1 - b.x1).abs() < 1e-9
        && (a.y1 - b.y1).abs() < 1e-9
}

#[test]
fn insert_places_elements_under_root() {
    let mut tree = ElementTree::new();
    assert!(tree.is_empty());
    let a = tree.insert(&square(1.0)).unwrap();
    assert_eq!(a, ElementId(1));
    assert_eq!(tree.get(a).unwrap().parent(), Some(ElementTree::ROOT));
    assert_eq!(tree.get(ElementTree::ROOT).unwrap().children(), &[a]);
}

#[test]
fn unknown_ids_are_reference_errors() {
    let tree = ElementTree::new();
    let err = tree.get(ElementId(7)).unwrap_err();
    assert!(matches!(err, BeatlineError::Reference(_)));
}

#[test]
fn moving_a_group_moves_every_descendant_by_the_same_offset() {
    let mut tree = ElementTree::new();
    let a = tree.insert(&square(1.0)).unwrap();
    let b = tree
        .insert(&circle(0.5).shift(Vec2::new(2.0, 1.0)))
        .unwrap();
    let c = tree.insert(&text("label", 36.0)).unwrap();
    let inner = tree.group(&[a, b], None).unwrap();
    let outer = tree.group(&[inner, c], Some("all".to_owned())).unwrap();

    let before: Vec<Rect> = [a, b, c].iter().map(|&id| tree.bounds(id).unwrap()).collect();
    let d = Vec2::new(-1.25, 0.75);
    tree.shift(outer, d).unwrap();
    for (id, old) in [a, b, c].iter().zip(before) {
        assert!(approx_rect(tree.bounds(*id).unwrap(), old + d));
    }
}

#[test]
fn group_bounds_cover_children() {
    let mut tree = ElementTree::new();
    let a = tree.insert(&square(1.0)).unwrap();
    let b = tree.insert(&square(1.0).shift(Vec2::new(3.0, 0.0))).unwrap();
    let g = tree.group(&[a, b], None).unwrap();
    assert!(approx_rect(
        tree.bounds(g).unwrap(),
        Rect::new(-0.5, -0.5, 3.5, 0.5)
    ));
    assert_eq!(tree.get(g).unwrap().geometry.position, Point::new(1.5, 0.0));
}

#[test]
fn an_element_has_a_single_owner() {
    let mut tree = ElementTree::new();
    let a = tree.insert(&square(1.0)).unwrap();
    let _g = tree.group(&[a], None).unwrap();
    let err = tree.group(&[a], None).unwrap_err();
    assert!(matches!(err, BeatlineError::Construction(_)));

    let b = tree.insert(&square(1.0)).unwrap();
    assert!(tree.group(&[b, b], None).is_err());
    assert!(tree.group(&[ElementTree::ROOT], None).is_err());
}

#[test]
fn attach_rejects_cycles() {
    let mut tree = ElementTree::new();
    let a = tree.insert(&square(1.0)).unwrap();
    let g = tree.group(&[a], None).unwrap();
    assert!(tree.attach(g, g).is_err());
    let b = tree.insert(&square(1.0)).unwrap();
    assert!(tree.attach(b, g).is_err());
    tree.attach(g, b).unwrap();
    assert_eq!(tree.leaves(g), vec![a, b]);
}

#[test]
fn move_to_centers_a_group() {
    let mut tree = ElementTree::new();
    let a = tree.insert(&square(1.0)).unwrap();
    let b = tree.insert(&square(1.0).shift(Vec2::new(2.0, 0.0))).unwrap();
    let g = tree.group(&[a, b], None).unwrap();
    tree.move_to(g, Point::new(0.0, 2.0)).unwrap();
    let c = tree.bounds(g).unwrap().center();
    assert!((c.x).abs() < 1e-9);
    assert!((c.y - 2.0).abs() < 1e-9);
}

#[test]
fn transform_about_scales_positions_and_sizes() {
    let mut tree = ElementTree::new();
    let a = tree.insert(&square(1.0).shift(Vec2::new(1.0, 0.0))).unwrap();
    let b = tree.insert(&square(1.0).shift(Vec2::new(-1.0, 0.0))).unwrap();
    let g = tree.group(&[a, b], None).unwrap();
    tree.transform_about(g, Point::ORIGIN, 2.0, 0.0).unwrap();
    assert!(approx_rect(
        tree.bounds(a).unwrap(),
        Rect::new(1.0, -1.0, 3.0, 1.0)
    ));
    assert!(approx_rect(
        tree.bounds(g).unwrap(),
        Rect::new(-3.0, -1.0, 3.0, 1.0)
    ));
    assert!(tree.transform_about(g, Point::ORIGIN, 0.0, 0.0).is_err());
}

#[test]
fn paint_order_respects_z_index() {
    let mut tree = ElementTree::new();
    let back = tree.insert(&rectangle(2.0, 2.0).z_index(-1)).unwrap();
    let a = tree.insert(&square(1.0)).unwrap();
    let top = tree.insert(&square(0.5).z_index(3)).unwrap();
    let b = tree.insert(&square(1.0)).unwrap();
    let g = tree.group(&[a, b], None).unwrap();
    assert_eq!(tree.paint_order(), vec![back, a, b, top]);
    assert!(!tree.paint_order().contains(&g));
}
