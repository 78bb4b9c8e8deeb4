use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![v; 8],
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(2)).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].1.data[0], 2);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame(1)).unwrap();
    let err = sink.push_frame(FrameIndex(3), &frame(1)).unwrap_err();
    assert!(matches!(err, BeatlineError::Render(_)));
}

#[test]
fn abort_discards_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.abort();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
}

#[test]
fn partial_path_appends_suffix() {
    assert_eq!(
        partial_path(Path::new("out/CHSHBars.mp4")),
        PathBuf::from("out/CHSHBars.mp4.partial")
    );
}
