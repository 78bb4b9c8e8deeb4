use super::*;

#[test]
fn fps_frame_count_rounds_up_without_float_noise() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(1.0), 30);
    assert_eq!(fps.secs_to_frames_ceil(1.01), 31);
    assert_eq!(fps.secs_to_frames_ceil(0.0), 0);
    assert_eq!(fps.secs_to_frames_ceil(4.9), 147);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn scene_to_pixel_maps_frame_corners() {
    let canvas = Canvas {
        width: 1920,
        height: 1080,
    };
    let m = canvas.scene_to_pixel();
    let c = m * ORIGIN;
    assert!((c.x - 960.0).abs() < 1e-9);
    assert!((c.y - 540.0).abs() < 1e-9);

    let tl = m * Point::new(-FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0);
    assert!(tl.x.abs() < 1e-9);
    assert!(tl.y.abs() < 1e-9);
}

#[test]
fn direction_edges_follow_y_up_convention() {
    let r = Rect::new(-1.0, -2.0, 3.0, 4.0);
    assert_eq!(Direction::Up.edge_of(r), 4.0);
    assert_eq!(Direction::Down.edge_of(r), -2.0);
    assert_eq!(Direction::Left.edge_of(r), -1.0);
    assert_eq!(Direction::Right.edge_of(r), 3.0);
    assert_eq!(Direction::Down.edge_midpoint(r), Point::new(1.0, -2.0));
}

#[test]
fn rect_to_rect_maps_corners() {
    let src = Rect::new(0.0, 0.0, 1.0, 1.0);
    let dst = Rect::new(2.0, 2.0, 6.0, 4.0);
    let m = rect_to_rect(src, dst);
    let p = m * Point::new(1.0, 1.0);
    assert!((p.x - 6.0).abs() < 1e-9);
    assert!((p.y - 4.0).abs() < 1e-9);
}
